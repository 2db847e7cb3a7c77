//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::personas::Persona;

/// Environment variable names.
pub mod env_keys {
    pub const TYPING_DELAY_MS: &str = "PERSONA_FLOW_TYPING_DELAY_MS";
    pub const PERSONA: &str = "PERSONA_FLOW_PERSONA";
    pub const TABLE: &str = "PERSONA_FLOW_TABLE";
}

/// Runtime configuration for the terminal front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowConfig {
    /// Cosmetic pause before each assistant message.
    pub typing_delay: Duration,
    /// Skip the selector and open this persona directly.
    pub initial_persona: Option<Persona>,
    /// JSON step table replacing the built-in flow of the persona it names.
    pub table_override: Option<PathBuf>,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            typing_delay: Duration::from_millis(800),
            initial_persona: None,
            table_override: None,
        }
    }
}

impl FlowConfig {
    /// Build config from environment variables. Unset variables keep their
    /// defaults; set but invalid values are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = non_empty(lookup(env_keys::TYPING_DELAY_MS)) {
            let ms: u64 = raw.parse().map_err(|e| ConfigError::InvalidValue {
                key: env_keys::TYPING_DELAY_MS.to_string(),
                message: format!("{raw:?} is not a number of milliseconds: {e}"),
            })?;
            config.typing_delay = Duration::from_millis(ms);
        }

        if let Some(raw) = non_empty(lookup(env_keys::PERSONA)) {
            let persona = raw.parse::<Persona>().map_err(|e| ConfigError::InvalidValue {
                key: env_keys::PERSONA.to_string(),
                message: e.to_string(),
            })?;
            config.initial_persona = Some(persona);
        }

        config.table_override = non_empty(lookup(env_keys::TABLE)).map(PathBuf::from);

        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = FlowConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, FlowConfig::default());
        assert_eq!(config.typing_delay, Duration::from_millis(800));
    }

    #[test]
    fn reads_all_keys() {
        let config = FlowConfig::from_lookup(lookup(&[
            (env_keys::TYPING_DELAY_MS, "0"),
            (env_keys::PERSONA, " Research "),
            (env_keys::TABLE, "/tmp/flow.json"),
        ]))
        .unwrap();
        assert_eq!(config.typing_delay, Duration::ZERO);
        assert_eq!(config.initial_persona, Some(Persona::Research));
        assert_eq!(config.table_override, Some(PathBuf::from("/tmp/flow.json")));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = FlowConfig::from_lookup(lookup(&[
            (env_keys::TYPING_DELAY_MS, "  "),
            (env_keys::TABLE, ""),
        ]))
        .unwrap();
        assert_eq!(config, FlowConfig::default());
    }

    #[test]
    fn invalid_values_are_errors() {
        let err = FlowConfig::from_lookup(lookup(&[(env_keys::TYPING_DELAY_MS, "fast")]))
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref key, .. } if key == env_keys::TYPING_DELAY_MS)
        );

        let err = FlowConfig::from_lookup(lookup(&[(env_keys::PERSONA, "weather")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == env_keys::PERSONA));
    }
}
