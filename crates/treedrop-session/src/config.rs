#![forbid(unsafe_code)]

//! Session configuration.
//!
//! # Environment Variables
//!
//! | Variable | Field | Format |
//! |----------|-------|--------|
//! | `TREEDROP_ACCEPTANCE_SETTLE_MS` | `acceptance_settle` | integer milliseconds |
//! | `TREEDROP_EXCLUDE_GRABBED` | `exclude_grabbed` | bool |
//! | `TREEDROP_KEYBOARD` | `keyboard_enabled` | bool |
//!
//! Bools accept `1/0/true/false/yes/no/on/off`. Unparseable values leave the
//! default in place and are reported by
//! [`SessionConfig::from_env_with_diagnostics`].

use std::env;
use std::time::Duration;

use treedrop_core::ConfigError;

use crate::arbiter::DEFAULT_ACCEPTANCE_SETTLE;
use crate::keyboard::KeyBindingMap;

const ENV_ACCEPTANCE_SETTLE_MS: &str = "TREEDROP_ACCEPTANCE_SETTLE_MS";
const ENV_EXCLUDE_GRABBED: &str = "TREEDROP_EXCLUDE_GRABBED";
const ENV_KEYBOARD: &str = "TREEDROP_KEYBOARD";

/// Upper bound on the settle window.
const MAX_ACCEPTANCE_SETTLE: Duration = Duration::from_secs(10);

/// Configuration for a drag session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// How long a leave waits before releasing acceptance.
    pub acceptance_settle: Duration,
    /// Skip the dragged element when resolving slots, so indices are
    /// reported as if it were already removed.
    pub exclude_grabbed: bool,
    /// Whether key-downs on draggables can move them.
    pub keyboard_enabled: bool,
    /// Keyboard bindings.
    pub key_bindings: KeyBindingMap,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            acceptance_settle: DEFAULT_ACCEPTANCE_SETTLE,
            exclude_grabbed: true,
            keyboard_enabled: true,
            key_bindings: KeyBindingMap::default(),
        }
    }
}

/// Environment parse result with diagnostics.
#[derive(Debug, Clone)]
pub struct SessionConfigParse {
    /// Parsed configuration (defaults where a value was rejected).
    pub config: SessionConfig,
    /// Rejected values.
    pub errors: Vec<ConfigError>,
}

impl SessionConfig {
    /// Set the acceptance settle window.
    #[must_use]
    pub fn with_acceptance_settle(mut self, settle: Duration) -> Self {
        self.acceptance_settle = settle;
        self
    }

    /// Set whether the dragged element is skipped during resolution.
    #[must_use]
    pub fn with_exclude_grabbed(mut self, exclude: bool) -> Self {
        self.exclude_grabbed = exclude;
        self
    }

    /// Enable or disable keyboard moves.
    #[must_use]
    pub fn with_keyboard(mut self, enabled: bool) -> Self {
        self.keyboard_enabled = enabled;
        self
    }

    /// Replace the key bindings.
    #[must_use]
    pub fn with_key_bindings(mut self, bindings: KeyBindingMap) -> Self {
        self.key_bindings = bindings;
        self
    }

    /// Parse config from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with_diagnostics().config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> SessionConfigParse {
        from_env_with(|key| env::var(key).ok())
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        if self.acceptance_settle.is_zero() || self.acceptance_settle > MAX_ACCEPTANCE_SETTLE {
            errors.push(ConfigError::invalid(
                "acceptance_settle",
                format!("{}ms", self.acceptance_settle.as_millis()),
                "must be between 1ms and 10s",
            ));
        }
        if self.keyboard_enabled && self.key_bindings.is_empty() {
            errors.push(ConfigError::invalid(
                "key_bindings",
                "{}",
                "keyboard moves are enabled but no keys are bound",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn from_env_with<F>(mut get: F) -> SessionConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut config = SessionConfig::default();
    let mut errors = Vec::new();

    if let Some(value) = get(ENV_ACCEPTANCE_SETTLE_MS) {
        match value.trim().parse::<u64>() {
            Ok(ms) => config.acceptance_settle = Duration::from_millis(ms),
            Err(_) => errors.push(ConfigError::invalid(
                "acceptance_settle_ms",
                value,
                "expected integer milliseconds",
            )),
        }
    }

    if let Some(value) = get(ENV_EXCLUDE_GRABBED) {
        match parse_bool(&value) {
            Some(parsed) => config.exclude_grabbed = parsed,
            None => errors.push(ConfigError::invalid(
                "exclude_grabbed",
                value,
                "expected bool (1/0/true/false)",
            )),
        }
    }

    if let Some(value) = get(ENV_KEYBOARD) {
        match parse_bool(&value) {
            Some(parsed) => config.keyboard_enabled = parsed,
            None => errors.push(ConfigError::invalid(
                "keyboard_enabled",
                value,
                "expected bool (1/0/true/false)",
            )),
        }
    }

    if let Err(mut invalid) = config.validate() {
        errors.append(&mut invalid);
    }

    SessionConfigParse { config, errors }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
