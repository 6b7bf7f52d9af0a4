//! Derivation rules, one `match` per key kind
//!
//! Rules are pure functions of the probed version and extension set. References
//! to other keys go back through the matrix so they are memoized too.

use crate::extensions::Extension;
use crate::keys::{Capability, InternalCapability, InternalRequirement, Requirement, TextureCapability};
use crate::matrix::{CapabilityMatrix, Probed};
use crate::version::*;

pub(crate) struct Rules<'a> {
    matrix: &'a CapabilityMatrix,
    probed: &'a Probed,
}

impl<'a> Rules<'a> {
    pub(crate) fn new(matrix: &'a CapabilityMatrix, probed: &'a Probed) -> Self {
        Self { matrix, probed }
    }

    // ------------------------------------------------------------------
    // Predicates
    // ------------------------------------------------------------------

    fn is_embedded(&self) -> bool {
        self.probed.version.family == ApiFamily::Embedded
    }

    fn is_desktop(&self) -> bool {
        !self.is_embedded()
    }

    /// Desktop context at or above `threshold`.
    fn desktop(&self, threshold: Version) -> bool {
        debug_assert_eq!(threshold.family, ApiFamily::Desktop);
        self.is_desktop() && self.probed.version >= threshold
    }

    /// Embedded context at or above `threshold`.
    fn embedded(&self, threshold: Version) -> bool {
        debug_assert_eq!(threshold.family, ApiFamily::Embedded);
        self.is_embedded() && self.probed.version >= threshold
    }

    fn desktop_or_embedded(&self, desktop: Version, embedded: Version) -> bool {
        self.desktop(desktop) || self.embedded(embedded)
    }

    /// Extension reported, on any family.
    fn extension(&self, name: &str) -> bool {
        self.probed.extensions.contains(name)
    }

    fn desktop_extension(&self, name: &str) -> bool {
        self.is_desktop() && self.extension(name)
    }

    fn embedded_extension(&self, name: &str) -> bool {
        self.is_embedded() && self.extension(name)
    }

    /// Either family's version threshold, or `name` on any family.
    fn version_or_extension(&self, desktop: Version, embedded: Version, name: &str) -> bool {
        self.desktop_or_embedded(desktop, embedded) || self.extension(name)
    }

    /// Like [`Self::version_or_extension`] with a distinct name per family.
    /// Neither name is family gated.
    fn version_or_extensions(
        &self,
        desktop: Version,
        embedded: Version,
        desktop_name: &str,
        embedded_name: &str,
    ) -> bool {
        self.desktop(desktop)
            || self.extension(desktop_name)
            || self.embedded(embedded)
            || self.extension(embedded_name)
    }

    fn has(&self, ext: Extension) -> bool {
        self.matrix.has_extension(ext)
    }

    fn cap(&self, key: Capability) -> bool {
        self.matrix.has_capability(key)
    }

    fn internal(&self, key: InternalCapability) -> bool {
        self.matrix.has_internal_capability(key)
    }

    fn texture(&self, key: TextureCapability) -> bool {
        self.matrix.has_texture_capability(key)
    }

    fn internal_req(&self, key: InternalRequirement) -> bool {
        self.matrix.has_internal_requirement(key)
    }

    // ------------------------------------------------------------------
    // Rule table
    // ------------------------------------------------------------------

    pub(crate) fn extension_rule(&self, key: Extension) -> bool {
        key.gate().admits(self.probed.version.family) && self.extension(key.gl_name())
    }

    pub(crate) fn capability_rule(&self, key: Capability) -> bool {
        use Capability::*;
        match key {
            BindBytes | BufferDeviceAddress | BufferNoCopy | BufferRing => false,
            BindUniform => true,
            Compute => {
                self.desktop_or_embedded(GL_4_3, ES_3_1)
                    || (self.extension("GL_ARB_compute_shader")
                        && self.internal(InternalCapability::ProgramInterfaceQuery)
                        && self.internal(InternalCapability::ShaderImageLoadStore))
            }
            DepthCompare => self.desktop_or_embedded(GL_2_0, ES_3_0),
            // Known to work on 2.1 desktop drivers.
            DepthShaderRead => self.desktop_or_embedded(GL_2_1, ES_3_0),
            DrawFirstIndexFirstVertex | Indices8Bit => false,
            DrawIndexedIndirect => self.version_or_extension(GL_4_0, ES_3_1, "GL_ARB_draw_indirect"),
            ExplicitBinding => {
                self.version_or_extension(GL_4_2, ES_3_1, "GL_ARB_shading_language_420pack")
            }
            ExplicitBindingExt => self.desktop_extension("GL_ARB_shading_language_420pack"),
            ExternalMemoryObjects => {
                self.extension("GL_EXT_memory_object") && self.extension("GL_EXT_memory_object_fd")
            }
            MapBufferRange => {
                self.desktop_or_embedded(GL_3_0, ES_3_0)
                    || self.desktop_extension("GL_ARB_map_buffer_range")
                    || self.has(Extension::MapBufferRange)
            }
            MinMaxBlend => self.version_or_extension(GL_2_0, ES_3_0, "GL_EXT_blend_minmax"),
            MultipleRenderTargets => {
                self.version_or_extension(GL_2_0, ES_3_0, "GL_EXT_draw_buffers")
            }
            MultiSample => {
                self.desktop(GL_3_0)
                    || self.has(Extension::FramebufferObject)
                    || self.embedded(ES_3_0)
                    || self.has(Extension::MultiSampleApple)
                    || self.has(Extension::MultiSampleExt)
                    || self.has(Extension::MultiSampleImg)
            }
            MultiSampleResolve => false,
            Multiview => {
                self.desktop_or_embedded(GL_3_0, ES_3_0) && self.extension("GL_OVR_multiview2")
            }
            MultiViewMultisample => false,
            PushConstants => false,
            ReadWriteFramebuffer => {
                self.desktop_or_embedded(GL_3_0, ES_3_0)
                    || self.has(Extension::FramebufferObject)
                    || self.embedded_extension("GL_APPLE_framebuffer_multisample")
            }
            SamplerMinMaxLod => self.desktop_or_embedded(GL_2_0, ES_3_0),
            ShaderLibrary => false,
            ShaderTextureLod => self.version_or_extensions(
                GL_3_0,
                ES_3_0,
                "GL_ARB_shader_texture_lod",
                "GL_EXT_shader_texture_lod",
            ),
            ShaderTextureLodExt => {
                self.desktop_extension("GL_ARB_shader_texture_lod")
                    || self.embedded_extension("GL_EXT_shader_texture_lod")
            }
            Srgb => self.version_or_extensions(GL_2_1, ES_3_0, "GL_EXT_texture_sRGB", "GL_EXT_sRGB"),
            SrgbWriteControl => {
                self.desktop(GL_3_0)
                    || self.desktop_extension("GL_ARB_framebuffer_sRGB")
                    || self.desktop_extension("GL_EXT_framebuffer_sRGB")
                    || self.embedded_extension("GL_EXT_sRGB_write_control")
            }
            StandardDerivative => {
                self.version_or_extension(GL_2_0, ES_3_0, "GL_OES_standard_derivatives")
            }
            StandardDerivativeExt => self.embedded_extension("GL_OES_standard_derivatives"),
            StorageBuffers => {
                self.desktop_or_embedded(GL_4_3, ES_3_1)
                    || self.desktop_extension("GL_ARB_shader_storage_buffer_object")
            }
            Texture2DArray => {
                self.version_or_extension(GL_3_0, ES_3_0, "GL_EXT_texture_array")
                    || self.desktop_extension("GL_EXT_gpu_shader4")
            }
            TextureArrayExt => {
                self.desktop_extension("GL_EXT_texture_array")
                    || self.desktop_extension("GL_EXT_gpu_shader4")
            }
            Texture3D => self.version_or_extension(GL_2_0, ES_3_0, "GL_OES_texture_3D"),
            TextureBindless => self.desktop_extension("GL_ARB_bindless_texture"),
            TextureExternalImage => {
                self.embedded(ES_3_0)
                    || self.extension("GL_OES_EGL_image_external_essl3")
                    || self.embedded_extension("GL_OES_EGL_image_external")
            }
            TextureFilterAnisotropic => {
                self.desktop(GL_4_6)
                    || self.extension("GL_EXT_texture_filter_anisotropic")
                    || self.desktop_extension("GL_ARB_texture_filter_anisotropic")
            }
            TextureFloat => {
                self.desktop_or_embedded(GL_3_0, ES_3_0)
                    || self.has(Extension::TextureFloat)
                    || self.embedded_extension("GL_OES_texture_float")
            }
            TextureFormatRg => {
                self.desktop_or_embedded(GL_3_0, ES_3_0)
                    || self.has(Extension::TextureRgArb)
                    || self.has(Extension::TextureRgExt)
            }
            TextureFormatRgb => true,
            TextureHalfFloat => {
                self.desktop_or_embedded(GL_3_0, ES_3_0)
                    || self.has(Extension::TextureFloat)
                    || self.has(Extension::TextureHalfFloat)
            }
            TextureNotPot => self.version_or_extension(GL_2_0, ES_3_0, "GL_OES_texture_npot"),
            TexturePartialMipChain => {
                self.desktop_or_embedded(GL_2_0, ES_3_0)
                    || self.embedded_extension("GL_APPLE_texture_max_level")
            }
            UniformBlocks => {
                self.version_or_extension(GL_3_1, ES_3_0, "GL_ARB_uniform_buffer_object")
            }
            ValidationLayersEnabled => false,
        }
    }

    pub(crate) fn internal_capability_rule(&self, key: InternalCapability) -> bool {
        use InternalCapability::*;
        match key {
            ClearDepthf => self.desktop_or_embedded(GL_4_1, ES_2_0),
            DebugLabel => {
                self.desktop_or_embedded(GL_4_3, ES_3_2)
                    || self.has(Extension::Debug)
                    || self.has(Extension::DebugLabel)
            }
            DebugMessage => {
                self.desktop_or_embedded(GL_4_3, ES_3_2)
                    || self.has(Extension::Debug)
                    || self.has(Extension::DebugMarker)
            }
            DebugMessageCallback => {
                self.desktop_or_embedded(GL_4_3, ES_3_2) || self.has(Extension::Debug)
            }
            DrawElementsInstanced => self.desktop_or_embedded(GL_3_1, ES_3_0),
            FramebufferBlit => {
                self.version_or_extension(GL_3_0, ES_3_0, "GL_EXT_framebuffer_blit")
                    || self.has(Extension::FramebufferObject)
            }
            FramebufferObject => {
                self.desktop_or_embedded(GL_3_0, ES_2_0) || self.has(Extension::FramebufferObject)
            }
            GetStringi => self.desktop_or_embedded(GL_3_0, ES_3_0),
            InvalidateFramebuffer => {
                self.desktop_or_embedded(GL_4_3, ES_3_0)
                    || self.has(Extension::InvalidateSubdata)
                    || self.has(Extension::DiscardFramebuffer)
            }
            MapBuffer => self.desktop(GL_2_0) || self.has(Extension::MapBuffer),
            PackRowLength => self.desktop_or_embedded(GL_2_0, ES_3_0),
            PixelBufferObject => self.version_or_extensions(
                GL_2_1,
                ES_3_0,
                "GL_ARB_pixel_buffer_object",
                "GL_NV_pixel_buffer_object",
            ),
            PolygonFillMode => self.desktop(GL_2_0),
            ProgramInterfaceQuery => {
                self.desktop_or_embedded(GL_4_3, ES_3_1)
                    || self.desktop_extension("GL_ARB_program_interface_query")
            }
            SeamlessCubeMap => self.desktop(GL_3_2) || self.extension("GL_ARB_seamless_cube_map"),
            ShaderImageLoadStore => {
                self.desktop_or_embedded(GL_4_2, ES_3_1)
                    || self.desktop_extension("GL_ARB_shader_image_load_store")
                    || self.has(Extension::ShaderImageLoadStore)
            }
            Sync => {
                self.desktop_or_embedded(GL_3_2, ES_3_0)
                    || self.desktop_extension("GL_ARB_sync")
                    || self.has(Extension::Sync)
            }
            TexStorage => {
                self.version_or_extension(GL_4_2, ES_3_0, "GL_ARB_texture_storage")
                    || self.has(Extension::TexStorage)
            }
            TextureCompare => {
                self.desktop_or_embedded(GL_2_0, ES_3_0)
                    || self.embedded_extension("GL_EXT_shadow_samplers")
            }
            UnmapBuffer => {
                self.desktop_or_embedded(GL_2_0, ES_3_0)
                    || self.has(Extension::MapBuffer)
                    || self.has(Extension::MapBufferRange)
            }
            UnpackRowLength => {
                self.desktop_or_embedded(GL_2_0, ES_3_0)
                    || self.embedded_extension("GL_EXT_unpack_subimage")
            }
            VertexArrayObject => {
                self.desktop_or_embedded(GL_3_0, ES_3_0)
                    || self.extension("GL_ARB_vertex_array_object")
            }
            VertexAttribDivisor => {
                self.desktop_or_embedded(GL_3_3, ES_3_0) || self.has(Extension::VertexAttribDivisor)
            }
        }
    }

    pub(crate) fn texture_capability_rule(&self, key: TextureCapability) -> bool {
        use TextureCapability::*;
        match key {
            ColorFilterable16f => {
                self.desktop_or_embedded(GL_2_0, ES_3_0)
                    || self.has(Extension::TextureFloat)
                    || self.embedded_extension("GL_OES_texture_half_float_linear")
            }
            ColorFilterable32f => {
                self.desktop(GL_3_0)
                    || self.has(Extension::TextureFloat)
                    || self.embedded_extension("GL_OES_texture_float_linear")
            }
            ColorFormatRgb10A2Ui => {
                self.version_or_extension(GL_4_0, ES_3_0, "GL_ARB_texture_rgb10_a2ui")
            }
            ColorFormatRgInt => {
                self.desktop_or_embedded(GL_3_0, ES_3_0)
                    || self.desktop_extension("GL_ARB_texture_rg")
            }
            ColorFormatRgUnorm16 => {
                self.desktop(GL_3_0)
                    || self.extension("GL_ARB_texture_rg")
                    || self.embedded_extension("GL_EXT_texture_norm16")
            }
            ColorRenderbuffer16f => {
                self.version_or_extension(GL_3_0, ES_3_2, "GL_EXT_color_buffer_half_float")
                    || (self.has(Extension::FramebufferObject) && self.has(Extension::TextureFloat))
            }
            ColorRenderbuffer32f => {
                self.version_or_extension(GL_3_0, ES_3_2, "GL_EXT_color_buffer_float")
                    || (self.has(Extension::FramebufferObject) && self.has(Extension::TextureFloat))
            }
            ColorRenderbufferRg16f => {
                self.desktop_or_embedded(GL_3_0, ES_3_2)
                    || self.embedded_extension("GL_EXT_color_buffer_float")
                    || self.embedded_extension("GL_EXT_color_buffer_half_float")
            }
            ColorRenderbufferRg32f => {
                self.desktop_or_embedded(GL_3_0, ES_3_2)
                    || self.embedded_extension("GL_EXT_color_buffer_float")
            }
            ColorRenderbufferRg8 => {
                self.desktop_or_embedded(GL_3_0, ES_3_0)
                    || (self.has(Extension::FramebufferObject) && self.has(Extension::TextureRgArb))
                    || self.has(Extension::TextureRgExt)
            }
            ColorRenderbufferRgb10A2 => {
                self.desktop_or_embedded(GL_3_0, ES_3_0)
                    || self.has(Extension::RequiredInternalFormat)
            }
            ColorRenderbufferRgb16f => self.embedded_extension("GL_EXT_color_buffer_half_float"),
            ColorRenderbufferRgba8 => {
                self.version_or_extension(GL_3_0, ES_3_0, "GL_OES_rgb8_rgba8")
                    || self.has(Extension::FramebufferObject)
                    || self.has(Extension::RequiredInternalFormat)
            }
            ColorRenderbufferSrgba8 => {
                self.desktop_or_embedded(GL_2_1, ES_3_0) || self.has(Extension::Srgb)
            }
            ColorTexImage16f | ColorTexImage32f => {
                self.desktop_or_embedded(GL_3_0, ES_3_0) || self.has(Extension::TextureFloat)
            }
            // Sized alpha went away in desktop 3.0, where R8 plus a swizzle stands in.
            ColorTexImageA8 => {
                (self.desktop(GL_2_0) && !self.desktop(GL_3_0))
                    || (self.desktop(GL_3_0) && self.texture(ColorTexImageRg8))
                    || self.has(Extension::RequiredInternalFormat)
            }
            ColorTexImageBgr10A2 => self.desktop(GL_2_0),
            ColorTexImageBgr5A1 => {
                self.is_desktop() || self.has(Extension::TextureFormatBgra8888Apple)
            }
            ColorTexImageBgra => {
                self.is_desktop()
                    || self.has(Extension::TextureFormatBgra8888Ext)
                    || self.has(Extension::TextureFormatBgra8888Apple)
            }
            ColorTexImageBgraRgba8 => self.desktop(GL_2_0),
            ColorTexImageBgraSrgba => {
                self.is_desktop()
                    || (self.embedded(ES_3_0) && self.has(Extension::TextureFormatBgra8888Apple))
            }
            ColorTexImageLa => !self.desktop(GL_3_0),
            ColorTexImageLa8 => {
                (self.desktop(GL_2_0) && !self.desktop(GL_3_0))
                    || self.has(Extension::RequiredInternalFormat)
            }
            ColorTexImageRg8 => {
                self.desktop_or_embedded(GL_2_0, ES_3_0) || self.has(Extension::TextureRgArb)
            }
            ColorTexImageRgb10A2 => {
                self.texture(ColorRenderbufferRgb10A2) || self.has(Extension::TextureType2101010Rev)
            }
            ColorTexImageRgba8 => {
                self.desktop_or_embedded(GL_2_0, ES_3_0)
                    || self.has(Extension::RequiredInternalFormat)
            }
            ColorTexImageSrgba8 => {
                self.desktop_or_embedded(GL_2_1, ES_3_0) || self.has(Extension::TextureSrgb)
            }
            ColorTexStorage16f => {
                self.desktop_or_embedded(GL_4_2, ES_3_0)
                    || ((self.cap(Capability::TextureHalfFloat)
                        || self.texture(ColorRenderbuffer16f))
                        && self.internal(InternalCapability::TexStorage))
            }
            ColorTexStorage32f => {
                self.desktop_or_embedded(GL_4_2, ES_3_0)
                    || ((self.cap(Capability::TextureFloat) || self.texture(ColorRenderbuffer32f))
                        && self.internal(InternalCapability::TexStorage))
            }
            ColorTexStorageA8 => {
                (self.desktop(GL_3_0) && self.texture(ColorTexStorageRg8))
                    || self.has(Extension::TexStorage)
            }
            // APPLE BGRA8888 brings its own TexStorage support; the EXT variant needs
            // GL_EXT_texture_storage.
            ColorTexStorageBgra8 => {
                (self.has(Extension::TextureFormatBgra8888Apple)
                    && (self.embedded(ES_3_0) || self.internal(InternalCapability::TexStorage)))
                    || (self.has(Extension::TextureFormatBgra8888Ext)
                        && self.has(Extension::TexStorage))
            }
            ColorTexStorageLa8 => self.has(Extension::TexStorage),
            ColorTexStorageRg8 => {
                self.desktop_or_embedded(GL_4_2, ES_3_0)
                    || (self.has(Extension::TexStorage) && self.has(Extension::TextureRgExt))
            }
            ColorTexStorageRgb10A2 => {
                self.desktop_or_embedded(GL_4_2, ES_3_0)
                    || (self.has(Extension::TexStorage)
                        && self.has(Extension::TextureType2101010Rev))
            }
            ColorTexStorageRgba8 => {
                self.texture(ColorRenderbufferRgba8) && self.internal(InternalCapability::TexStorage)
            }
            // GL_EXT_texture_storage has no SRGB8_ALPHA8.
            ColorTexStorageSrgba8 => {
                self.cap(Capability::Srgb)
                    && self.internal(InternalCapability::TexStorage)
                    && !(self.internal_req(InternalRequirement::TexStorageExtReq)
                        && self.has(Extension::TexStorage))
            }
            Depth24Stencil8 => {
                self.version_or_extensions(
                    GL_3_0,
                    ES_3_0,
                    "GL_EXT_packed_depth_stencil",
                    "GL_OES_packed_depth_stencil",
                ) || self.has(Extension::FramebufferObject)
            }
            Depth32FStencil8 => {
                self.version_or_extension(GL_3_0, ES_3_0, "GL_ARB_depth_buffer_float")
            }
            DepthFilterable => self.desktop(GL_2_0),
            DepthRenderbuffer16 => {
                self.desktop_or_embedded(GL_3_0, ES_2_0) || self.has(Extension::FramebufferObject)
            }
            DepthRenderbuffer24 => {
                self.desktop_or_embedded(GL_3_0, ES_3_0)
                    || self.has(Extension::FramebufferObject)
                    || self.has(Extension::Depth24)
            }
            // 32-bit integer depth only reaches embedded through extensions.
            DepthRenderbuffer32 => {
                self.desktop(GL_3_0)
                    || self.has(Extension::FramebufferObject)
                    || self.has(Extension::Depth32)
            }
            DepthTexImage => {
                self.desktop_or_embedded(GL_2_0, ES_3_0) || self.has(Extension::DepthTexture)
            }
            DepthTexImage16 => {
                self.desktop_or_embedded(GL_2_0, ES_3_0)
                    || (self.texture(DepthTexImage) && self.has(Extension::RequiredInternalFormat))
            }
            DepthTexImage24 => {
                self.desktop_or_embedded(GL_2_0, ES_3_0)
                    || (self.has(Extension::Depth24) && self.has(Extension::RequiredInternalFormat))
            }
            DepthTexImage32 => {
                self.desktop(GL_2_0)
                    || self.has(Extension::DepthTexture)
                    || (self.has(Extension::Depth32) && self.has(Extension::RequiredInternalFormat))
            }
            DepthTexStorage16 => {
                self.desktop_or_embedded(GL_4_2, ES_3_0)
                    || (self.texture(DepthRenderbuffer16)
                        && self.internal(InternalCapability::TexStorage))
            }
            DepthTexStorage24 => {
                self.desktop_or_embedded(GL_4_2, ES_3_0)
                    || (self.texture(DepthRenderbuffer24)
                        && self.internal(InternalCapability::TexStorage))
            }
            DepthTexStorage32 => {
                self.desktop(GL_4_2)
                    || (self.has(Extension::DepthTexture) && self.has(Extension::TexStorage))
            }
            StencilTexture8 => self.version_or_extensions(
                GL_4_4,
                ES_3_2,
                "GL_ARB_texture_stencil8",
                "GL_OES_texture_stencil8",
            ),
            TextureCompressionAstc => {
                self.embedded(ES_3_2)
                    || self.extension("GL_KHR_texture_compression_astc_hdr")
                    || self.extension("GL_KHR_texture_compression_astc_ldr")
                    || self.extension("GL_OES_texture_compression_astc")
            }
            TextureCompressionBptc => {
                self.desktop_extension("GL_ARB_texture_compression_bptc")
                    || self.embedded_extension("GL_EXT_texture_compression_bptc")
                    || self.desktop(GL_4_2)
            }
            TextureCompressionEtc1 => {
                self.embedded_extension("GL_EXT_compressed_ETC1_RGB8_sub_texture")
                    || self.embedded_extension("GL_OES_compressed_ETC1_RGB8_texture")
            }
            TextureCompressionEtc2Eac => {
                self.desktop_or_embedded(GL_4_3, ES_3_0)
                    || self.desktop_extension("GL_ARB_ES3_compatibility")
            }
            TextureCompressionPvrtc => self.embedded_extension("GL_IMG_texture_compression_pvrtc"),
            // Desktop initializes compressed textures with TexImage only, embedded with
            // TexStorage only.
            TextureCompressionTexImage => self.is_desktop(),
            TextureCompressionTexStorage => {
                self.is_embedded() && self.internal(InternalCapability::TexStorage)
            }
            TextureInteger => {
                self.desktop_or_embedded(GL_3_0, ES_3_0)
                    || self.desktop_extension("GL_EXT_texture_integer")
            }
            TextureTypeUint8888Rev => self.desktop(GL_2_0),
        }
    }

    pub(crate) fn requirement_rule(&self, key: Requirement) -> bool {
        use Requirement::*;
        match key {
            ExplicitBindingExtReq => self.is_desktop() && !self.desktop(GL_4_2),
            // textureLod() arrived with GLSL 1.30.
            ShaderTextureLodExtReq => !self.desktop_or_embedded(GL_3_0, ES_3_0),
            // Desktop has had derivatives since 2.0.
            StandardDerivativeExtReq => self.is_embedded() && !self.embedded(ES_3_0),
            TextureArrayExtReq => self.is_desktop() && !self.desktop(GL_3_0),
            TextureFormatRgExtReq => self.is_embedded() && !self.embedded(ES_3_0),
        }
    }

    pub(crate) fn internal_requirement_rule(&self, key: InternalRequirement) -> bool {
        use InternalRequirement::*;
        let embedded_before_3 = self.is_embedded() && !self.embedded(ES_3_0);
        match key {
            ColorTexImageRgb5A1Unsized
            | ColorTexImageRgbApple422Unsized
            | Depth24Stencil8Unsized
            | DrawBuffersExtReq
            | MapBufferRangeExtReq
            | SyncExtReq
            | TextureHalfFloatExtReq
            | UnmapBufferExtReq
            | VertexArrayObjectExtReq => embedded_before_3,
            ColorTexImageRgb10A2Unsized => {
                !self.texture(TextureCapability::ColorRenderbufferRgb10A2)
                    && self.has(Extension::TextureType2101010Rev)
            }
            ColorTexImageRgba4Unsized => {
                embedded_before_3 && !self.has(Extension::RequiredInternalFormat)
            }
            DebugMessageExtReq | DebugMessageCallbackExtReq | DebugLabelExtReq => {
                !self.desktop_or_embedded(GL_4_3, ES_3_2)
            }
            DebugLabelExtEnumsReq => {
                self.internal_req(DebugLabelExtReq) && !self.has(Extension::Debug)
            }
            Depth32Unsized => self.has(Extension::DepthTexture),
            // GL_ARB_framebuffer_object carries the core blit entry point.
            FramebufferBlitExtReq => {
                !self.desktop_or_embedded(GL_3_0, ES_3_0) && !self.has(Extension::FramebufferObject)
            }
            InvalidateFramebufferExtReq => {
                !self.desktop_or_embedded(GL_4_3, ES_3_0) && !self.has(Extension::InvalidateSubdata)
            }
            MapBufferExtReq => self.is_embedded(),
            // The IMG extension uses different enum values than later core versions.
            MultiSampleExtReq => {
                !(self.desktop(GL_3_0)
                    || self.has(Extension::FramebufferObject)
                    || self.embedded(ES_3_0))
            }
            ShaderImageLoadStoreExtReq => self.is_desktop() && !self.desktop(GL_4_2),
            SwizzleAlphaTexturesReq => self.desktop(GL_3_0),
            TexStorageExtReq => {
                !self.version_or_extension(GL_4_2, ES_3_0, "GL_ARB_texture_storage")
            }
            Texture3DExtReq => !self.desktop_or_embedded(GL_2_0, ES_3_0),
            VertexAttribDivisorExtReq => !self.desktop_or_embedded(GL_3_3, ES_3_0),
        }
    }
}
