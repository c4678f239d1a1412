//! Configuration defaults with fail-closed resolution.
//!
//! Every tunable has a documented default. An explicitly configured value
//! takes precedence; a missing value falls back to the default; a value
//! that is non-finite or negative fails closed rather than being clamped.

use std::fmt;

use sahay_core::escalation::PolicyConfig;

/// All tunable parameters of the safety core's surroundings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigParam {
    /// How many trailing session levels the escalation policy consults.
    RecentLevelWindowSize,
    /// Run length of consecutive prior at-least-low levels that triggers
    /// the sustained-trend rule.
    SustainedLowRunLength,
    /// Maximum number of crisis events the log holds.
    EventLogCapacity,
    /// Maximum number of concurrent session windows.
    SessionRegistryCapacity,
    /// Maximum helpline entries shown per turn.
    HelplineListMaxEntries,
}

/// Error when a parameter is missing or unusable.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingConfigError {
    pub param_name: &'static str,
    pub reason: &'static str,
}

impl fmt::Display for MissingConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "config fail-closed: '{}' is unusable ({})",
            self.param_name, self.reason
        )
    }
}

impl std::error::Error for MissingConfigError {}

/// Returns the documented default for a parameter.
pub fn default_value(param: ConfigParam) -> f64 {
    match param {
        ConfigParam::RecentLevelWindowSize => 5.0,
        ConfigParam::SustainedLowRunLength => 2.0,
        ConfigParam::EventLogCapacity => 4096.0,
        ConfigParam::SessionRegistryCapacity => 1024.0,
        ConfigParam::HelplineListMaxEntries => 5.0,
    }
}

/// Returns the snake_case name for a parameter.
pub fn param_name(param: ConfigParam) -> &'static str {
    match param {
        ConfigParam::RecentLevelWindowSize => "recent_level_window_size",
        ConfigParam::SustainedLowRunLength => "sustained_low_run_length",
        ConfigParam::EventLogCapacity => "event_log_capacity",
        ConfigParam::SessionRegistryCapacity => "session_registry_capacity",
        ConfigParam::HelplineListMaxEntries => "helpline_list_max_entries",
    }
}

/// Expected number of ConfigParam variants. Update when adding variants
/// so the completeness check below stays honest.
pub const EXPECTED_PARAM_COUNT: usize = 5;

/// All known `ConfigParam` variants (for exhaustive iteration in tests).
pub const ALL_PARAMS: &[ConfigParam] = &[
    ConfigParam::RecentLevelWindowSize,
    ConfigParam::SustainedLowRunLength,
    ConfigParam::EventLogCapacity,
    ConfigParam::SessionRegistryCapacity,
    ConfigParam::HelplineListMaxEntries,
];

/// Resolve a configuration value with fail-closed semantics.
///
/// - `Some(v)` with a finite, non-negative `v` wins over the default.
/// - `None` resolves to the documented default.
/// - Non-finite or negative explicit values are rejected.
pub fn resolve_config_value(
    param: ConfigParam,
    value: Option<f64>,
) -> Result<f64, MissingConfigError> {
    if let Some(v) = value {
        if !v.is_finite() {
            return Err(MissingConfigError {
                param_name: param_name(param),
                reason: "value is non-finite (NaN or Infinity); fail-closed",
            });
        }
        if v < 0.0 {
            return Err(MissingConfigError {
                param_name: param_name(param),
                reason: "value is negative; all config params must be non-negative",
            });
        }
        return Ok(v);
    }
    Ok(default_value(param))
}

/// Build a core policy config from optionally-overridden values.
///
/// Both parameters must resolve to at least 1: a zero window would blind
/// the trend rule and a zero run would fire it on every message.
pub fn policy_config_from_values(
    recent_window: Option<f64>,
    sustained_low_run: Option<f64>,
) -> Result<PolicyConfig, MissingConfigError> {
    let window = resolve_config_value(ConfigParam::RecentLevelWindowSize, recent_window)?;
    if window < 1.0 {
        return Err(MissingConfigError {
            param_name: param_name(ConfigParam::RecentLevelWindowSize),
            reason: "window must be at least 1",
        });
    }
    let run = resolve_config_value(ConfigParam::SustainedLowRunLength, sustained_low_run)?;
    if run < 1.0 {
        return Err(MissingConfigError {
            param_name: param_name(ConfigParam::SustainedLowRunLength),
            reason: "run length must be at least 1",
        });
    }
    Ok(PolicyConfig {
        recent_window: window as usize,
        sustained_low_run: run as usize,
    })
}
