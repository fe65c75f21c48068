//! Provider registry — builds the ordered fallback list from configuration.
//!
//! Construction never fails: incomplete or unrecognized entries are
//! skipped so one bad config line can't take the whole service down.

use std::sync::Arc;

use tracing::{info, warn};

use quizbot_core::config::schema::ProviderEntry;

use crate::googleai::{GoogleAiClient, DEFAULT_MODEL as DEFAULT_GOOGLE_MODEL};
use crate::openai::OpenAiClient;
use crate::traits::ChatClient;

/// The ordered, immutable list of usable chat backends.
///
/// Order is exactly the configuration order and defines fallback
/// priority. Built once at startup and shared read-only for the process
/// lifetime.
pub struct ProviderRegistry {
    clients: Vec<Arc<dyn ChatClient>>,
}

impl ProviderRegistry {
    /// Build the registry from configured entries.
    pub fn from_entries(entries: &[ProviderEntry]) -> Self {
        let mut clients: Vec<Arc<dyn ChatClient>> = Vec::new();

        for entry in entries {
            match build_client(entry) {
                Some(client) => {
                    info!(
                        client = client.name(),
                        kind = %entry.kind,
                        model = entry.model.as_deref().unwrap_or("(default)"),
                        "chat client initialized"
                    );
                    clients.push(client);
                }
                None => {
                    warn!(kind = %entry.kind, "skipping unusable provider entry");
                }
            }
        }

        Self { clients }
    }

    /// Build a registry from already-constructed clients, keeping their
    /// order as the fallback order.
    pub fn from_clients(clients: Vec<Arc<dyn ChatClient>>) -> Self {
        Self { clients }
    }

    /// The clients, in fallback order.
    pub fn clients(&self) -> &[Arc<dyn ChatClient>] {
        &self.clients
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

/// Dispatch on the entry's declared kind.
///
/// Each kind validates its own required fields; unknown tags produce no
/// client rather than an error.
fn build_client(entry: &ProviderEntry) -> Option<Arc<dyn ChatClient>> {
    match entry.kind.as_str() {
        "GoogleAi" => {
            let api_key = entry.api_key.as_deref()?;
            let model = entry.model.as_deref().unwrap_or(DEFAULT_GOOGLE_MODEL);
            Some(Arc::new(GoogleAiClient::new(api_key, model)))
        }
        "OpenAi" => {
            let api_key = entry.api_key.as_deref()?;
            let model = entry.model.as_deref()?;
            Some(Arc::new(OpenAiClient::new(
                api_key,
                model,
                entry.endpoint.as_deref(),
            )))
        }
        _ => None,
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: &str, api_key: Option<&str>, model: Option<&str>) -> ProviderEntry {
        ProviderEntry {
            kind: kind.to_string(),
            api_key: api_key.map(String::from),
            model: model.map(String::from),
            endpoint: None,
        }
    }

    #[test]
    fn test_empty_config_empty_registry() {
        let registry = ProviderRegistry::from_entries(&[]);
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_googleai_requires_api_key() {
        let registry = ProviderRegistry::from_entries(&[entry("GoogleAi", None, None)]);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_googleai_defaults_model() {
        let registry = ProviderRegistry::from_entries(&[entry("GoogleAi", Some("k"), None)]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.clients()[0].name(), "GoogleAi");
    }

    #[test]
    fn test_openai_requires_api_key_and_model() {
        // Missing model: skipped entirely
        let registry = ProviderRegistry::from_entries(&[entry("OpenAi", Some("k"), None)]);
        assert!(registry.is_empty());

        // Missing key: skipped entirely
        let registry = ProviderRegistry::from_entries(&[entry("OpenAi", None, Some("gpt-4o"))]);
        assert!(registry.is_empty());

        // Both present: usable
        let registry =
            ProviderRegistry::from_entries(&[entry("OpenAi", Some("k"), Some("gpt-4o"))]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.clients()[0].name(), "OpenAi");
    }

    #[test]
    fn test_unknown_kind_skipped() {
        let registry = ProviderRegistry::from_entries(&[
            entry("AzureAi", Some("k"), Some("m")),
            entry("", Some("k"), Some("m")),
        ]);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_order_preserved_and_bad_entries_dropped() {
        let registry = ProviderRegistry::from_entries(&[
            entry("GoogleAi", Some("g"), None),
            entry("OpenAi", Some("o"), None), // skipped: no model
            entry("OpenAi", Some("o"), Some("gpt-4o-mini")),
            entry("Mystery", Some("x"), Some("y")), // skipped: unknown
        ]);

        let names: Vec<_> = registry.clients().iter().map(|c| c.name()).collect();
        assert_eq!(names, ["GoogleAi", "OpenAi"]);
    }
}
