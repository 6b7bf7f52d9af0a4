//! Capability report for one initialized context

use std::collections::BTreeMap;
use std::fmt::{self, Write};

use glcaps_context::{Context, FeatureLimit, NativeGl};
use glcaps_core::{
    Capability, InternalCapability, InternalRequirement, Requirement, TextureCapability, TextureFormat,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Report {
    pub version: String,
    pub shading_language: Option<String>,
    pub vendor: String,
    pub renderer: String,
    pub extensions: Vec<String>,
    pub capabilities: BTreeMap<&'static str, bool>,
    pub internal_capabilities: BTreeMap<&'static str, bool>,
    pub texture_capabilities: BTreeMap<&'static str, bool>,
    pub requirements: BTreeMap<&'static str, bool>,
    pub internal_requirements: BTreeMap<&'static str, bool>,
    pub limits: BTreeMap<&'static str, usize>,
    /// Supported formats and their capability flags. Unsupported ones are left out.
    pub formats: BTreeMap<&'static str, Vec<&'static str>>,
}

fn answers<K: Copy>(keys: &[K], name: impl Fn(K) -> &'static str, answer: impl Fn(K) -> bool) -> BTreeMap<&'static str, bool> {
    keys.iter().map(|&key| (name(key), answer(key))).collect()
}

impl Report {
    pub fn collect<G: NativeGl>(ctx: &Context<G>) -> Self {
        let version = ctx.version();
        let extensions = ctx
            .matrix()
            .probed()
            .map(|p| p.extensions.sorted().into_iter().map(str::to_owned).collect())
            .unwrap_or_default();

        let mut formats = BTreeMap::new();
        for &format in TextureFormat::ALL {
            let caps = ctx.texture_format_capabilities(format);
            if !caps.is_empty() {
                formats.insert(format.name(), caps.iter_names().map(|(name, _)| name).collect());
            }
        }

        Self {
            version: version.map_or_else(|| "unavailable".to_string(), |v| v.to_string()),
            shading_language: version.and_then(|v| v.shader_version()).map(|s| s.directive()),
            vendor: ctx.vendor().to_string(),
            renderer: ctx.renderer().to_string(),
            extensions,
            capabilities: answers(Capability::ALL, Capability::name, |k| ctx.has_capability(k)),
            internal_capabilities: answers(InternalCapability::ALL, InternalCapability::name, |k| {
                ctx.has_internal_capability(k)
            }),
            texture_capabilities: answers(TextureCapability::ALL, TextureCapability::name, |k| {
                ctx.has_texture_capability(k)
            }),
            requirements: answers(Requirement::ALL, Requirement::name, |k| ctx.has_requirement(k)),
            internal_requirements: answers(InternalRequirement::ALL, InternalRequirement::name, |k| {
                ctx.has_internal_requirement(k)
            }),
            limits: FeatureLimit::ALL
                .iter()
                .map(|&limit| (limit.name(), ctx.feature_limit(limit)))
                .collect(),
            formats,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn section(out: &mut String, title: &str, answers: &BTreeMap<&'static str, bool>) -> fmt::Result {
    let supported = answers.values().filter(|&&v| v).count();
    writeln!(out, "\n{title} ({supported}/{})", answers.len())?;
    for (name, answer) in answers {
        writeln!(out, "  [{}] {name}", if *answer { "x" } else { " " })?;
    }
    Ok(())
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        writeln!(out, "{} ({} / {})", self.version, self.vendor, self.renderer)?;
        if let Some(glsl) = &self.shading_language {
            writeln!(out, "shading language: {glsl}")?;
        }
        writeln!(out, "extensions: {}", self.extensions.len())?;

        section(&mut out, "Capabilities", &self.capabilities)?;
        section(&mut out, "Internal capabilities", &self.internal_capabilities)?;
        section(&mut out, "Texture capabilities", &self.texture_capabilities)?;
        section(&mut out, "Requirements", &self.requirements)?;
        section(&mut out, "Internal requirements", &self.internal_requirements)?;

        writeln!(out, "\nLimits")?;
        for (name, value) in &self.limits {
            writeln!(out, "  {name}: {value}")?;
        }

        writeln!(out, "\nFormats ({}/{})", self.formats.len(), TextureFormat::COUNT)?;
        for (name, caps) in &self.formats {
            writeln!(out, "  {name}: {}", caps.join(" | "))?;
        }
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glcaps_context::{ContextSettings, DriverSnapshot, ErrorCheckPolicy, SnapshotDriver};

    fn report() -> Report {
        let mut ctx = Context::new(
            SnapshotDriver::new(DriverSnapshot::embedded_3_0()),
            ContextSettings::default().with_error_check(ErrorCheckPolicy::Log),
        );
        ctx.initialize().unwrap();
        Report::collect(&ctx)
    }

    #[test]
    fn test_report_covers_every_key() {
        let report = report();
        assert_eq!(report.version, "OpenGL ES 3.0");
        assert_eq!(report.shading_language.as_deref(), Some("#version 300 es"));
        assert_eq!(report.capabilities.len(), Capability::COUNT);
        assert_eq!(report.internal_requirements.len(), InternalRequirement::COUNT);
        assert_eq!(report.limits.len(), FeatureLimit::COUNT);
        assert_eq!(report.limits["MaxTextureDimension1D2D"], 4096);
        assert!(report.formats.contains_key("Rgba8Unorm"));
        assert!(!report.formats.contains_key("Invalid"));
    }

    #[test]
    fn test_text_and_json_render() {
        let report = report();
        let text = report.to_string();
        assert!(text.starts_with("OpenGL ES 3.0 (glcaps / snapshot renderer)"));
        assert!(text.contains("[x] MultiSample"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["capabilities"]["MultiSample"], true);
    }
}
