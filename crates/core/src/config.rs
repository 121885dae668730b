use std::collections::HashMap;

/// Key holding the compartment applications are scoped to
pub const COMPARTMENT_ID_KEY: &str = "oracle.compartment-id";

/// Read-only key/value configuration lookup
pub trait ConfigProvider: Send + Sync {
    /// Value for `key`, or an empty string when unset
    fn get_string(&self, key: &str) -> String;
}

/// In-memory `ConfigProvider`
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    values: HashMap<String, String>,
}

impl StaticConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration scoped to a single compartment
    #[must_use]
    pub fn with_compartment(compartment_id: impl Into<String>) -> Self {
        Self::new().set(COMPARTMENT_ID_KEY, compartment_id)
    }

    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ConfigProvider for StaticConfig {
    fn get_string(&self, key: &str) -> String {
        self.values.get(key).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_config_lookup() {
        let config = StaticConfig::with_compartment("ocid1.compartment.oc1..abc");

        assert_eq!(
            config.get_string(COMPARTMENT_ID_KEY),
            "ocid1.compartment.oc1..abc"
        );
        assert_eq!(config.get_string("unknown.key"), "");
    }
}
