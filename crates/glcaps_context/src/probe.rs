//! One-time discovery of the driver version and extensions

use glcaps_core::{ExtensionSet, Probed, Version};
use tracing::{debug, info};

use crate::error::ProbeError;
use crate::gl_enums::{EXTENSIONS, NUM_EXTENSIONS, RENDERER, VENDOR, VERSION};
use crate::native::NativeGl;
use crate::settings::ContextSettings;

/// Everything read from the driver while probing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverInfo {
    pub probed: Probed,
    pub vendor: String,
    pub renderer: String,
}

/// Make the context current and read its version and extensions.
pub fn probe<G: NativeGl>(gl: &G, settings: &ContextSettings) -> Result<DriverInfo, ProbeError> {
    if !gl.make_current() {
        return Err(ProbeError::MakeCurrent);
    }

    let family = gl.api_family();
    let reported = Version::parse(family, gl.get_string(VERSION).as_deref());
    let extensions = read_extensions(gl, reported);

    let version = match settings.max_version(family) {
        Some(highest) => reported.constrain(highest),
        None => reported,
    };

    let vendor = gl.get_string(VENDOR).unwrap_or_default();
    let renderer = gl.get_string(RENDERER).unwrap_or_default();
    info!(%version, vendor = %vendor, renderer = %renderer, "GL context probed");
    if settings.log_extensions {
        debug!(count = extensions.len(), extensions = ?extensions.sorted(), "GL extensions");
    }

    Ok(DriverInfo {
        probed: Probed::new(version, extensions),
        vendor,
        renderer,
    })
}

/// Indexed reads where the driver supports them, the combined string otherwise.
fn read_extensions<G: NativeGl>(gl: &G, version: Version) -> ExtensionSet {
    if version.supports_indexed_extensions() {
        let count = gl.get_integer(NUM_EXTENSIONS).max(0) as u32;
        ExtensionSet::from_names((0..count).filter_map(|i| gl.get_string_i(EXTENSIONS, i)))
    } else {
        ExtensionSet::from_combined(gl.get_string(EXTENSIONS).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{DriverSnapshot, ExtensionStyle, SnapshotDriver};
    use glcaps_core::version::*;
    use glcaps_core::ApiFamily;

    fn snapshot(version: &str, style: ExtensionStyle) -> DriverSnapshot {
        DriverSnapshot {
            family: ApiFamily::Embedded,
            version: Some(version.to_string()),
            extensions: vec!["GL_OES_depth24".into(), "GL_EXT_texture_storage".into()],
            extension_style: style,
            ..DriverSnapshot::default()
        }
    }

    #[test]
    fn test_indexed_extensions_on_es3() {
        let driver = SnapshotDriver::new(snapshot("OpenGL ES 3.0 build 1", ExtensionStyle::Indexed));
        let info = probe(&driver, &ContextSettings::default()).unwrap();
        assert_eq!(info.probed.version, ES_3_0);
        assert!(info.probed.extensions.contains("GL_OES_depth24"));
        // exact match only
        assert!(!info.probed.extensions.contains("GL_OES_depth"));
    }

    #[test]
    fn test_combined_extensions_on_es2() {
        let driver = SnapshotDriver::new(snapshot("OpenGL ES 2.0", ExtensionStyle::Combined));
        let info = probe(&driver, &ContextSettings::default()).unwrap();
        assert_eq!(info.probed.version, ES_2_0);
        assert!(info.probed.extensions.contains("GL_EXT_texture_storage"));
        assert_eq!(driver.calls_to("glGetStringi"), 0);
    }

    #[test]
    fn test_missing_version_falls_back_to_baseline() {
        let mut snap = snapshot("", ExtensionStyle::Combined);
        snap.version = None;
        let driver = SnapshotDriver::new(snap);
        let info = probe(&driver, &ContextSettings::default()).unwrap();
        assert_eq!(info.probed.version, ES_2_0);
    }

    #[test]
    fn test_version_is_constrained() {
        let driver = SnapshotDriver::new(snapshot("OpenGL ES 3.2", ExtensionStyle::Indexed));
        let settings = ContextSettings {
            max_embedded_version: Some(ES_3_0),
            ..ContextSettings::default()
        };
        let info = probe(&driver, &settings).unwrap();
        assert_eq!(info.probed.version, ES_3_0);
        assert_eq!(info.probed.extensions.len(), 2);
    }

    #[test]
    fn test_make_current_failure() {
        let mut snap = snapshot("OpenGL ES 3.0", ExtensionStyle::Indexed);
        snap.make_current_succeeds = false;
        let driver = SnapshotDriver::new(snap);
        assert!(matches!(
            probe(&driver, &ContextSettings::default()),
            Err(ProbeError::MakeCurrent)
        ));
    }
}
