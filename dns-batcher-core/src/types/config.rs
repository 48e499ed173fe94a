//! Injected pipeline configuration.

use serde::{Deserialize, Serialize};

/// Tunables for the batch-change pipeline.
///
/// Deserialized from the host application's configuration tree and injected
/// into the service context; the core keeps no global state. Field names
/// follow the service's kebab-case configuration keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BatchConfig {
    /// Maximum number of changes accepted in a single batch.
    pub batch_change_limit: usize,

    /// Inclusive TTL bounds, in seconds.
    pub min_ttl: u32,
    pub max_ttl: u32,

    /// Allow-list for NS record targets. NS adds are rejected unless the
    /// target matches one of these names.
    pub approved_name_servers: Vec<String>,

    /// Regex patterns for names whose mutation is forbidden via batch.
    pub high_value_domains: Vec<String>,

    /// Delay in milliseconds between zone sync rounds. Consumed by zone
    /// sync, not by the intake pipeline.
    pub sync_delay: u64,

    /// Ceiling for `max_items` on summary listings.
    pub max_list_items: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_change_limit: 1000,
            min_ttl: 30,
            max_ttl: 2_147_483_647,
            approved_name_servers: Vec::new(),
            high_value_domains: Vec::new(),
            sync_delay: 10_000,
            max_list_items: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = BatchConfig::default();
        assert_eq!(config.batch_change_limit, 1000);
        assert_eq!(config.min_ttl, 30);
        assert_eq!(config.max_list_items, 100);
        assert!(config.approved_name_servers.is_empty());
    }

    #[test]
    fn deserializes_kebab_case_with_defaults() {
        let json = r#"{
            "batch-change-limit": 20,
            "approved-name-servers": ["ns1.example.net."],
            "high-value-domains": ["^vault\\."]
        }"#;
        let config: BatchConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.batch_change_limit, 20);
        assert_eq!(config.approved_name_servers, vec!["ns1.example.net."]);
        assert_eq!(config.high_value_domains, vec!["^vault\\."]);
        // Unspecified fields fall back to defaults.
        assert_eq!(config.min_ttl, 30);
        assert_eq!(config.sync_delay, 10_000);
    }
}
