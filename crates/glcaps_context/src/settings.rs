//! Context configuration

use glcaps_core::{ApiFamily, Version};
use serde::{Deserialize, Serialize};

/// What to do after a forwarded call when the driver reports an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCheckPolicy {
    /// Never query the error state after a call.
    Disabled,
    /// Record and log the error, then carry on.
    Log,
    /// Record, log and panic. API misuse is a programming error.
    Abort,
}

impl Default for ErrorCheckPolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            ErrorCheckPolicy::Abort
        } else {
            ErrorCheckPolicy::Disabled
        }
    }
}

/// How buffers are unbound once an encoder is done with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnbindPolicy {
    #[default]
    Default,
    EndEncoding,
    ClearCommandBuffer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextSettings {
    pub error_check: ErrorCheckPolicy,
    /// Cap on the desktop version the context reports, if any.
    pub max_desktop_version: Option<Version>,
    /// Cap on the embedded version the context reports, if any.
    pub max_embedded_version: Option<Version>,
    /// Turn on driver debug output when the driver supports a callback.
    pub debug_output: bool,
    pub unbind_policy: UnbindPolicy,
    pub log_extensions: bool,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            error_check: ErrorCheckPolicy::default(),
            max_desktop_version: None,
            max_embedded_version: None,
            debug_output: cfg!(debug_assertions),
            unbind_policy: UnbindPolicy::Default,
            log_extensions: true,
        }
    }
}

impl ContextSettings {
    pub fn with_error_check(mut self, policy: ErrorCheckPolicy) -> Self {
        self.error_check = policy;
        self
    }

    /// Highest version the context may report for the given family.
    pub fn max_version(&self, family: ApiFamily) -> Option<Version> {
        match family {
            ApiFamily::Desktop => self.max_desktop_version,
            ApiFamily::Embedded => self.max_embedded_version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glcaps_core::version::ES_3_0;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: ContextSettings =
            serde_json::from_str(r#"{ "error_check": "Log", "log_extensions": false }"#).unwrap();
        assert_eq!(settings.error_check, ErrorCheckPolicy::Log);
        assert!(!settings.log_extensions);
        assert_eq!(settings.unbind_policy, UnbindPolicy::Default);
        assert_eq!(settings.max_version(ApiFamily::Embedded), None);
    }

    #[test]
    fn test_max_version_per_family() {
        let settings = ContextSettings {
            max_embedded_version: Some(ES_3_0),
            ..ContextSettings::default()
        };
        assert_eq!(settings.max_version(ApiFamily::Embedded), Some(ES_3_0));
        assert_eq!(settings.max_version(ApiFamily::Desktop), None);
    }
}
