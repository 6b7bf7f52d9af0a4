//! Driver extension reporting
//!
//! Drivers report extensions in one of two styles:
//! - a single space separated string (older drivers), searched by substring
//! - an indexed list of names, searched by exact membership

use std::collections::HashSet;

use crate::version::ApiFamily;

/// Immutable set of probed extension names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSet {
    combined: String,
    names: HashSet<String>,
}

impl ExtensionSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from the single combined `GL_EXTENSIONS` string.
    pub fn from_combined(combined: impl Into<String>) -> Self {
        let combined = combined.into();
        let names = combined.split_whitespace().map(str::to_owned).collect();
        Self { combined, names }
    }

    /// Build from names queried one at a time.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            combined: String::new(),
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// True when `name` is reported.
    ///
    /// A combined string is searched by substring, so a name that prefixes a
    /// longer reported name also matches.
    pub fn contains(&self, name: &str) -> bool {
        if !self.combined.is_empty() {
            self.combined.contains(name)
        } else {
            self.names.contains(name)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Names in sorted order, for logging and reports.
    pub fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Which family an extension is meaningful for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilyGate {
    Desktop,
    Embedded,
    /// Checked on either family.
    Any,
}

impl FamilyGate {
    pub fn admits(self, family: ApiFamily) -> bool {
        match self {
            FamilyGate::Desktop => family == ApiFamily::Desktop,
            FamilyGate::Embedded => family == ApiFamily::Embedded,
            FamilyGate::Any => true,
        }
    }
}

define_keys! {
    /// Extensions the rule table and the dispatch candidates refer to by key.
    pub enum Extension {
        AppleRgb422,
        BindlessTextureArb,
        BindlessTextureNv,
        Debug,
        DebugLabel,
        DebugMarker,
        Depth24,
        Depth32,
        DepthTexture,
        DiscardFramebuffer,
        DrawBuffers,
        Es2Compatibility,
        FramebufferBlit,
        FramebufferObject,
        InvalidateSubdata,
        MapBuffer,
        MapBufferRange,
        MultiSampleApple,
        MultiSampleExt,
        MultiSampleImg,
        RequiredInternalFormat,
        ShaderImageLoadStore,
        Srgb,
        SrgbWriteControl,
        /// `GL_APPLE_sync`
        Sync,
        TexStorage,
        Texture3D,
        TextureFormatBgra8888Apple,
        TextureFormatBgra8888Ext,
        TextureFloat,
        /// Needed for `GL_HALF_FLOAT_OES`, which differs from `GL_HALF_FLOAT`.
        TextureHalfFloat,
        TextureRgArb,
        TextureRgExt,
        TextureSrgb,
        TextureType2101010Rev,
        VertexArrayObject,
        /// `GL_NV_instanced_arrays`
        VertexAttribDivisor,
    }
}

impl Extension {
    /// Reported extension string.
    pub const fn gl_name(self) -> &'static str {
        self.describe().0
    }

    pub const fn gate(self) -> FamilyGate {
        self.describe().1
    }

    const fn describe(self) -> (&'static str, FamilyGate) {
        use FamilyGate::*;
        match self {
            Extension::AppleRgb422 => ("GL_APPLE_rgb_422", Any),
            Extension::BindlessTextureArb => ("GL_ARB_bindless_texture", Desktop),
            Extension::BindlessTextureNv => ("GL_NV_bindless_texture", Any),
            Extension::Debug => ("GL_KHR_debug", Any),
            Extension::DebugLabel => ("GL_EXT_debug_label", Any),
            Extension::DebugMarker => ("GL_EXT_debug_marker", Any),
            Extension::Depth24 => ("GL_OES_depth24", Embedded),
            Extension::Depth32 => ("GL_OES_depth32", Embedded),
            Extension::DepthTexture => ("GL_OES_depth_texture", Embedded),
            Extension::DiscardFramebuffer => ("GL_EXT_discard_framebuffer", Embedded),
            Extension::DrawBuffers => ("GL_EXT_draw_buffers", Embedded),
            Extension::Es2Compatibility => ("GL_ARB_ES2_compatibility", Desktop),
            Extension::FramebufferBlit => ("GL_EXT_framebuffer_blit", Desktop),
            Extension::FramebufferObject => ("GL_ARB_framebuffer_object", Desktop),
            Extension::InvalidateSubdata => ("GL_ARB_invalidate_subdata", Any),
            Extension::MapBuffer => ("GL_OES_mapbuffer", Embedded),
            Extension::MapBufferRange => ("GL_EXT_map_buffer_range", Embedded),
            Extension::MultiSampleApple => ("GL_APPLE_framebuffer_multisample", Embedded),
            Extension::MultiSampleExt => ("GL_EXT_multisampled_render_to_texture", Embedded),
            Extension::MultiSampleImg => ("GL_IMG_multisampled_render_to_texture", Embedded),
            Extension::RequiredInternalFormat => ("GL_OES_required_internalformat", Embedded),
            Extension::ShaderImageLoadStore => ("GL_EXT_shader_image_load_store", Embedded),
            Extension::Srgb => ("GL_EXT_sRGB", Embedded),
            Extension::SrgbWriteControl => ("GL_EXT_sRGB_write_control", Embedded),
            Extension::Sync => ("GL_APPLE_sync", Embedded),
            Extension::TexStorage => ("GL_EXT_texture_storage", Any),
            Extension::Texture3D => ("GL_OES_texture_3D", Embedded),
            Extension::TextureFormatBgra8888Apple => ("GL_APPLE_texture_format_BGRA8888", Embedded),
            Extension::TextureFormatBgra8888Ext => ("GL_EXT_texture_format_BGRA8888", Embedded),
            Extension::TextureFloat => ("GL_ARB_texture_float", Desktop),
            Extension::TextureHalfFloat => ("GL_OES_texture_half_float", Embedded),
            Extension::TextureRgArb => ("GL_ARB_texture_rg", Desktop),
            Extension::TextureRgExt => ("GL_EXT_texture_rg", Embedded),
            Extension::TextureSrgb => ("GL_EXT_texture_sRGB", Desktop),
            Extension::TextureType2101010Rev => ("GL_EXT_texture_type_2_10_10_10_REV", Embedded),
            Extension::VertexArrayObject => ("GL_OES_vertex_array_object", Embedded),
            Extension::VertexAttribDivisor => ("GL_NV_instanced_arrays", Embedded),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_uses_substring_search() {
        let set = ExtensionSet::from_combined("GL_OES_depth24 GL_EXT_texture_storage");
        assert!(set.contains("GL_OES_depth24"));
        assert!(set.contains("GL_EXT_texture"));
        assert!(!set.contains("GL_OES_depth32"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_indexed_uses_exact_membership() {
        let set = ExtensionSet::from_names(["GL_KHR_debug", "GL_EXT_texture_storage"]);
        assert!(set.contains("GL_KHR_debug"));
        assert!(!set.contains("GL_EXT_texture"));
    }

    #[test]
    fn test_empty_set_contains_nothing() {
        let set = ExtensionSet::empty();
        assert!(set.is_empty());
        assert!(!set.contains("GL_KHR_debug"));
        assert!(!set.contains(""));
    }

    #[test]
    fn test_sorted_names() {
        let set = ExtensionSet::from_names(["b", "c", "a"]);
        assert_eq!(set.sorted(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_extension_keys_are_indexed_densely() {
        assert_eq!(Extension::COUNT, 37);
        for (i, ext) in Extension::ALL.iter().enumerate() {
            assert_eq!(ext.index(), i);
            assert!(ext.gl_name().starts_with("GL_"));
        }
        assert_eq!(Extension::VertexArrayObject.gl_name(), "GL_OES_vertex_array_object");
        assert_eq!(Extension::BindlessTextureArb.gate(), FamilyGate::Desktop);
    }

    #[test]
    fn test_gate_admits_family() {
        assert!(FamilyGate::Any.admits(ApiFamily::Desktop));
        assert!(FamilyGate::Embedded.admits(ApiFamily::Embedded));
        assert!(!FamilyGate::Embedded.admits(ApiFamily::Desktop));
    }
}
