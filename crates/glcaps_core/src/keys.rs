//! Closed key sets answered by the capability matrix
//!
//! Each set is densely indexed so a single 64-bit word can memoize it.

define_keys! {
    /// Logical features exposed to resource creation code.
    pub enum Capability {
        BindBytes,
        BindUniform,
        BufferDeviceAddress,
        BufferNoCopy,
        BufferRing,
        Compute,
        DepthCompare,
        DepthShaderRead,
        DrawFirstIndexFirstVertex,
        DrawIndexedIndirect,
        ExplicitBinding,
        /// Explicit binding through `GL_ARB_shading_language_420pack`.
        ExplicitBindingExt,
        ExternalMemoryObjects,
        Indices8Bit,
        MapBufferRange,
        MinMaxBlend,
        MultipleRenderTargets,
        MultiSample,
        MultiSampleResolve,
        Multiview,
        MultiViewMultisample,
        PushConstants,
        ReadWriteFramebuffer,
        SamplerMinMaxLod,
        ShaderLibrary,
        ShaderTextureLod,
        ShaderTextureLodExt,
        Srgb,
        SrgbWriteControl,
        StandardDerivative,
        StandardDerivativeExt,
        StorageBuffers,
        Texture2DArray,
        TextureArrayExt,
        Texture3D,
        TextureBindless,
        TextureExternalImage,
        TextureFilterAnisotropic,
        TextureFloat,
        TextureFormatRg,
        TextureFormatRgb,
        TextureHalfFloat,
        /// Non power of two textures.
        TextureNotPot,
        TexturePartialMipChain,
        UniformBlocks,
        ValidationLayersEnabled,
    }
}

define_keys! {
    /// Features only consulted by dispatch and format translation.
    pub enum InternalCapability {
        ClearDepthf,
        /// Debug labels on objects.
        DebugLabel,
        /// Debug messages and group markers.
        DebugMessage,
        DebugMessageCallback,
        DrawElementsInstanced,
        FramebufferBlit,
        FramebufferObject,
        GetStringi,
        InvalidateFramebuffer,
        MapBuffer,
        /// `GL_PACK_ROW_LENGTH` with `glPixelStorei`.
        PackRowLength,
        PixelBufferObject,
        PolygonFillMode,
        ProgramInterfaceQuery,
        SeamlessCubeMap,
        ShaderImageLoadStore,
        Sync,
        TexStorage,
        /// `GL_TEXTURE_COMPARE_MODE` and `GL_TEXTURE_COMPARE_FUNC`.
        TextureCompare,
        UnmapBuffer,
        /// `GL_UNPACK_ROW_LENGTH` with `glPixelStorei`.
        UnpackRowLength,
        VertexArrayObject,
        VertexAttribDivisor,
    }
}

define_keys! {
    /// Per-format building blocks for the format capability table.
    pub enum TextureCapability {
        ColorFilterable16f,
        ColorFilterable32f,
        ColorFormatRgb10A2Ui,
        ColorFormatRgInt,
        ColorFormatRgUnorm16,
        ColorRenderbuffer16f,
        ColorRenderbuffer32f,
        ColorRenderbufferRg16f,
        ColorRenderbufferRg32f,
        ColorRenderbufferRg8,
        ColorRenderbufferRgb10A2,
        ColorRenderbufferRgb16f,
        ColorRenderbufferRgba8,
        ColorRenderbufferSrgba8,
        ColorTexImage16f,
        ColorTexImage32f,
        /// RGB10_A2 uploaded with a BGRA format.
        ColorTexImageBgr10A2,
        ColorTexImageBgr5A1,
        ColorTexImageBgra,
        /// BGRA format with an RGBA8 internal format.
        ColorTexImageBgraRgba8,
        ColorTexImageBgraSrgba,
        ColorTexImageA8,
        /// Unsized LUMINANCE and LUMINANCE_ALPHA.
        ColorTexImageLa,
        ColorTexImageLa8,
        ColorTexImageRg8,
        ColorTexImageRgb10A2,
        ColorTexImageRgba8,
        ColorTexImageSrgba8,
        ColorTexStorage16f,
        ColorTexStorage32f,
        ColorTexStorageA8,
        ColorTexStorageBgra8,
        ColorTexStorageLa8,
        ColorTexStorageRg8,
        ColorTexStorageRgb10A2,
        ColorTexStorageRgba8,
        ColorTexStorageSrgba8,
        Depth24Stencil8,
        Depth32FStencil8,
        DepthFilterable,
        DepthRenderbuffer16,
        DepthRenderbuffer24,
        DepthRenderbuffer32,
        DepthTexImage,
        DepthTexImage16,
        DepthTexImage24,
        DepthTexImage32,
        DepthTexStorage16,
        DepthTexStorage24,
        DepthTexStorage32,
        StencilTexture8,
        TextureCompressionAstc,
        TextureCompressionBptc,
        TextureCompressionEtc1,
        TextureCompressionEtc2Eac,
        TextureCompressionPvrtc,
        /// Compressed textures may be initialized with TexImage.
        TextureCompressionTexImage,
        /// Compressed textures may be initialized with TexStorage.
        TextureCompressionTexStorage,
        TextureInteger,
        TextureTypeUint8888Rev,
    }
}

define_keys! {
    /// Shader-facing requirements: the suffixed form must be used.
    pub enum Requirement {
        ExplicitBindingExtReq,
        ShaderTextureLodExtReq,
        StandardDerivativeExtReq,
        TextureArrayExtReq,
        TextureFormatRgExtReq,
    }
}

define_keys! {
    /// Suffixed entry point or unsized format requirements.
    pub enum InternalRequirement {
        ColorTexImageRgb10A2Unsized,
        ColorTexImageRgb5A1Unsized,
        ColorTexImageRgba4Unsized,
        ColorTexImageRgbApple422Unsized,
        DebugMessageExtReq,
        DebugMessageCallbackExtReq,
        /// `GL_EXT_debug_label` object type enums are required.
        DebugLabelExtEnumsReq,
        DebugLabelExtReq,
        Depth24Stencil8Unsized,
        Depth32Unsized,
        DrawBuffersExtReq,
        FramebufferBlitExtReq,
        InvalidateFramebufferExtReq,
        MapBufferExtReq,
        MapBufferRangeExtReq,
        MultiSampleExtReq,
        ShaderImageLoadStoreExtReq,
        SyncExtReq,
        /// Alpha textures are emulated with R8 plus a swizzle.
        SwizzleAlphaTexturesReq,
        TexStorageExtReq,
        Texture3DExtReq,
        TextureHalfFloatExtReq,
        UnmapBufferExtReq,
        VertexArrayObjectExtReq,
        VertexAttribDivisorExtReq,
    }
}
