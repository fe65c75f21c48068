//! Prompt assembly and answer extraction.
//!
//! One fixed system prompt for every question; the user message embeds
//! the title, the declared type, and the options (or an explicit
//! "no options" marker). The type is opaque text — anything beyond the
//! four documented kinds is passed through to the backend unvalidated.

use quizbot_core::types::ChatExchange;

/// Output cap for every exchange; answers are a handful of short lines.
pub const MAX_OUTPUT_TOKENS: u32 = 2048;

/// Fixed instructions sent as the system message of every exchange.
const SYSTEM_PROMPT: &str = "\
You are a helpful AI assistant. You are powerful, intelligent, all-knowing, and highly proficient in all areas of knowledge. The user will present you with questions they encounter during their studies. Your task is to help them solve these questions accurately. The user will usually provide the **question** and its **type**, such as `single`, `multiple`, `judgement`, or `completion`. Please follow these rules:

 1. **Single Choice / Judgement**: Output only the full text of the correct option (one line).
 2. **Multiple Choice**: Output the full text of all correct options, one per line.
 3. **Completion (e.g., with blanks like `___`)**: Output only the text(s) to be filled in, one line per blank, in order.

Your responses should be concise and directly usable by the user. Do not provide any extra explanation unless the user explicitly asks for it.";

/// Build the single exchange for one question.
///
/// An absent type interpolates as empty text; absent or empty options
/// become a "(No options)" marker instead of an options block.
pub fn build_exchange(title: &str, kind: Option<&str>, options: Option<&str>) -> ChatExchange {
    let kind = kind.unwrap_or("");
    let options_part = match options {
        Some(o) if !o.is_empty() => format!("\n{o}"),
        _ => "(No options)".to_string(),
    };

    ChatExchange {
        system_prompt: SYSTEM_PROMPT.to_string(),
        user_message: format!("Here is my question:\n{title} (Type: {kind}){options_part}"),
        max_output_tokens: MAX_OUTPUT_TOKENS,
    }
}

/// Split reply text into trimmed, non-empty answer lines, in order.
pub fn extract_answer_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
