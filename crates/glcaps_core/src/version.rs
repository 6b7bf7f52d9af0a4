//! Driver version model
//!
//! Two independently numbered families share one logical API: desktop GL and
//! GL ES. Versions only compare within a family.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Which family of the API a context implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiFamily {
    /// Desktop OpenGL
    Desktop,
    /// OpenGL ES
    Embedded,
}

impl ApiFamily {
    /// Lowest version a context of this family is assumed to provide.
    pub const fn baseline(self) -> Version {
        Version::new(self, 2, 0)
    }
}

/// Probed driver version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    pub family: ApiFamily,
    pub major: u32,
    pub minor: u32,
}

pub const GL_1_1: Version = Version::new(ApiFamily::Desktop, 1, 1);
pub const GL_2_0: Version = Version::new(ApiFamily::Desktop, 2, 0);
pub const GL_2_1: Version = Version::new(ApiFamily::Desktop, 2, 1);
pub const GL_3_0: Version = Version::new(ApiFamily::Desktop, 3, 0);
pub const GL_3_1: Version = Version::new(ApiFamily::Desktop, 3, 1);
pub const GL_3_2: Version = Version::new(ApiFamily::Desktop, 3, 2);
pub const GL_3_3: Version = Version::new(ApiFamily::Desktop, 3, 3);
pub const GL_4_0: Version = Version::new(ApiFamily::Desktop, 4, 0);
pub const GL_4_1: Version = Version::new(ApiFamily::Desktop, 4, 1);
pub const GL_4_2: Version = Version::new(ApiFamily::Desktop, 4, 2);
pub const GL_4_3: Version = Version::new(ApiFamily::Desktop, 4, 3);
pub const GL_4_4: Version = Version::new(ApiFamily::Desktop, 4, 4);
pub const GL_4_5: Version = Version::new(ApiFamily::Desktop, 4, 5);
pub const GL_4_6: Version = Version::new(ApiFamily::Desktop, 4, 6);

pub const ES_2_0: Version = Version::new(ApiFamily::Embedded, 2, 0);
pub const ES_3_0: Version = Version::new(ApiFamily::Embedded, 3, 0);
pub const ES_3_1: Version = Version::new(ApiFamily::Embedded, 3, 1);
pub const ES_3_2: Version = Version::new(ApiFamily::Embedded, 3, 2);

/// Prefix GL ES drivers put in front of the version numbers.
const EMBEDDED_PREFIX: &str = "OpenGL ES";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    #[error("version string is missing")]
    Missing,

    #[error("version string '{0}' does not start with '{EMBEDDED_PREFIX}'")]
    MissingPrefix(String),

    #[error("version string '{0}' has no <major>.<minor> pair")]
    Malformed(String),
}

impl Version {
    pub const fn new(family: ApiFamily, major: u32, minor: u32) -> Self {
        Self {
            family,
            major,
            minor,
        }
    }

    /// Parse a driver version string.
    ///
    /// Missing or unreadable strings fall back to the family baseline.
    pub fn parse(family: ApiFamily, version: Option<&str>) -> Self {
        match parse_numbers(family, version) {
            Ok((major, minor)) => Self::known(family, major, minor),
            Err(err) => {
                tracing::debug!("failed to parse GL version: {err}");
                family.baseline()
            }
        }
    }

    /// Snap arbitrary numbers onto a version this crate knows rules for.
    pub fn known(family: ApiFamily, major: u32, minor: u32) -> Self {
        let (major, minor) = match family {
            ApiFamily::Desktop => match (major, minor) {
                (1, _) => (1, 1),
                (2, 0..=1) | (3, 0..=3) | (4, 0..=6) => (major, minor),
                (2..=4, _) => (major, 0),
                _ => (2, 0),
            },
            ApiFamily::Embedded => match (major, minor) {
                (3, 0..=2) => (3, minor),
                (3, _) => (3, 0),
                _ => (2, 0),
            },
        };
        Self::new(family, major, minor)
    }

    /// Clamp to `highest` when this version exceeds it.
    pub fn constrain(self, highest: Version) -> Self {
        if self.family == highest.family && self > highest {
            tracing::info!(
                "context supports {self}, constraining supported version to {highest}"
            );
            highest
        } else {
            self
        }
    }

    /// True when extension names must be queried one by one.
    pub fn supports_indexed_extensions(self) -> bool {
        match self.family {
            ApiFamily::Desktop => self >= GL_3_0,
            ApiFamily::Embedded => self >= ES_3_0,
        }
    }

    /// Matching shading language version, if one exists.
    pub fn shader_version(self) -> Option<ShaderVersion> {
        let (family, major, minor) = match (self.family, self.major, self.minor) {
            (ApiFamily::Embedded, 2, _) => (ShaderFamily::GlslEs, 1, 0),
            (ApiFamily::Embedded, 3, minor) => (ShaderFamily::GlslEs, 3, minor * 10),
            (ApiFamily::Desktop, 2, minor) => (ShaderFamily::Glsl, 1, 10 + minor * 10),
            (ApiFamily::Desktop, 3, 3) => (ShaderFamily::Glsl, 3, 30),
            (ApiFamily::Desktop, 3, minor) => (ShaderFamily::Glsl, 1, 30 + minor * 10),
            (ApiFamily::Desktop, 4, minor) => (ShaderFamily::Glsl, 4, minor * 10),
            _ => return None,
        };
        Some(ShaderVersion {
            family,
            major,
            minor,
        })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.family != other.family {
            return None;
        }
        Some((self.major, self.minor).cmp(&(other.major, other.minor)))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.family {
            ApiFamily::Desktop => write!(f, "OpenGL {}.{}", self.major, self.minor),
            ApiFamily::Embedded => write!(f, "{EMBEDDED_PREFIX} {}.{}", self.major, self.minor),
        }
    }
}

fn parse_numbers(family: ApiFamily, version: Option<&str>) -> Result<(u32, u32), VersionParseError> {
    let text = version.ok_or(VersionParseError::Missing)?;
    let rest = match family {
        ApiFamily::Desktop => text,
        ApiFamily::Embedded => text
            .trim_start()
            .strip_prefix(EMBEDDED_PREFIX)
            .ok_or_else(|| VersionParseError::MissingPrefix(text.to_string()))?,
    };

    let malformed = || VersionParseError::Malformed(text.to_string());
    let rest = rest.trim_start();
    let (major, rest) = leading_number(rest).ok_or_else(malformed)?;
    let rest = rest.strip_prefix('.').ok_or_else(malformed)?;
    let (minor, _) = leading_number(rest).ok_or_else(malformed)?;
    Ok((major, minor))
}

fn leading_number(text: &str) -> Option<(u32, &str)> {
    let end = text
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(text.len(), |(i, _)| i);
    let value = text[..end].parse().ok()?;
    Some((value, &text[end..]))
}

/// Shading language family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShaderFamily {
    Glsl,
    GlslEs,
}

/// Shading language version, minor expressed in hundredths (`4.10` is `4, 10`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShaderVersion {
    pub family: ShaderFamily,
    pub major: u32,
    pub minor: u32,
}

impl ShaderVersion {
    /// The `#version` line for shader sources.
    pub fn directive(self) -> String {
        let number = self.major * 100 + self.minor;
        match (self.family, number) {
            (ShaderFamily::GlslEs, 100) => "#version 100".to_string(),
            (ShaderFamily::GlslEs, n) => format!("#version {n} es"),
            (ShaderFamily::Glsl, n) => format!("#version {n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_desktop_with_vendor_suffix() {
        let version = Version::parse(ApiFamily::Desktop, Some("4.6.0 NVIDIA 535.113.01"));
        assert_eq!(version, GL_4_6);
    }

    #[test]
    fn test_parse_embedded() {
        assert_eq!(
            Version::parse(ApiFamily::Embedded, Some("OpenGL ES 3.2 V@0502.0")),
            ES_3_2
        );
        assert_eq!(Version::parse(ApiFamily::Embedded, Some("OpenGL ES 3.0 Mesa")), ES_3_0);
    }

    #[test]
    fn test_parse_falls_back_to_baseline() {
        assert_eq!(Version::parse(ApiFamily::Desktop, None), GL_2_0);
        assert_eq!(Version::parse(ApiFamily::Desktop, Some("")), GL_2_0);
        assert_eq!(Version::parse(ApiFamily::Embedded, Some("3.1")), ES_2_0);
        assert_eq!(Version::parse(ApiFamily::Embedded, Some("OpenGL ES x.y")), ES_2_0);
    }

    #[test]
    fn test_parse_errors_name_the_bad_string() {
        assert_eq!(parse_numbers(ApiFamily::Desktop, None), Err(VersionParseError::Missing));

        let err = parse_numbers(ApiFamily::Embedded, Some("3.1")).unwrap_err();
        assert_eq!(err, VersionParseError::MissingPrefix("3.1".to_string()));
        assert_eq!(err.to_string(), "version string '3.1' does not start with 'OpenGL ES'");

        let err = parse_numbers(ApiFamily::Desktop, Some("4")).unwrap_err();
        assert_eq!(err.to_string(), "version string '4' has no <major>.<minor> pair");
    }

    #[test]
    fn test_unknown_minor_snaps_to_family_floor() {
        assert_eq!(Version::known(ApiFamily::Desktop, 4, 9), GL_4_0);
        assert_eq!(Version::known(ApiFamily::Desktop, 2, 7), GL_2_0);
        assert_eq!(Version::known(ApiFamily::Desktop, 1, 5), GL_1_1);
        assert_eq!(Version::known(ApiFamily::Desktop, 7, 0), GL_2_0);
        assert_eq!(Version::known(ApiFamily::Embedded, 3, 9), ES_3_0);
        assert_eq!(Version::known(ApiFamily::Embedded, 2, 1), ES_2_0);
    }

    #[test]
    fn test_ordering_is_per_family() {
        assert!(GL_3_3 > GL_3_0);
        assert!(ES_3_1 >= ES_3_0);
        assert_eq!(GL_3_0.partial_cmp(&ES_3_0), None);
        assert!(!(GL_4_6 > ES_2_0));
        assert!(!(GL_4_6 < ES_2_0));
    }

    #[test]
    fn test_constrain() {
        assert_eq!(GL_4_6.constrain(GL_4_1), GL_4_1);
        assert_eq!(GL_3_3.constrain(GL_4_1), GL_3_3);
        assert_eq!(ES_3_2.constrain(GL_2_0), ES_3_2);
    }

    #[test]
    fn test_shader_directives() {
        let directive = |v: Version| v.shader_version().map(ShaderVersion::directive);
        assert_eq!(directive(ES_2_0).as_deref(), Some("#version 100"));
        assert_eq!(directive(ES_3_0).as_deref(), Some("#version 300 es"));
        assert_eq!(directive(ES_3_2).as_deref(), Some("#version 320 es"));
        assert_eq!(directive(GL_2_0).as_deref(), Some("#version 110"));
        assert_eq!(directive(GL_2_1).as_deref(), Some("#version 120"));
        assert_eq!(directive(GL_3_2).as_deref(), Some("#version 150"));
        assert_eq!(directive(GL_3_3).as_deref(), Some("#version 330"));
        assert_eq!(directive(GL_4_1).as_deref(), Some("#version 410"));
        assert_eq!(directive(GL_4_6).as_deref(), Some("#version 460"));
        assert_eq!(directive(GL_1_1), None);
    }

    #[test]
    fn test_indexed_extension_threshold() {
        assert!(!GL_2_1.supports_indexed_extensions());
        assert!(GL_3_0.supports_indexed_extensions());
        assert!(!ES_2_0.supports_indexed_extensions());
        assert!(ES_3_0.supports_indexed_extensions());
    }
}
