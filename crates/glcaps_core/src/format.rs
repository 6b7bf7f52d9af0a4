//! Texture formats and their capability bits

use bitflags::bitflags;

define_keys! {
    /// Logical texture formats known to the backend.
    pub enum TextureFormat {
        Invalid,

        A8Unorm,
        L8Unorm,
        R8Unorm,

        R16Float,
        R16Uint,
        R16Unorm,
        B5G5R5A1Unorm,
        B5G6R5Unorm,
        Abgr4Unorm,
        La8Unorm,
        Rg8Unorm,
        R4G2B2UnormApple,
        R4G2B2UnormRevApple,
        R5G5B5A1Unorm,

        Rgbx8Unorm,

        Rgba8Unorm,
        Bgra8Unorm,
        Bgra8UnormRev,
        Rgba8UnormSrgb,
        Bgra8UnormSrgb,
        Rg16Float,
        Rg16Uint,
        Rg16Unorm,
        Rgb10A2UnormRev,
        Rgb10A2UintRev,
        Bgr10A2Unorm,
        R32Float,
        Rgb16Float,

        Rgba16Float,
        Rg32Float,

        Rgb32Float,

        Rgba32Uint,
        Rgba32Float,

        Astc4x4Rgba,
        Astc4x4Srgb,
        Astc5x4Rgba,
        Astc5x4Srgb,
        Astc5x5Rgba,
        Astc5x5Srgb,
        Astc6x5Rgba,
        Astc6x5Srgb,
        Astc6x6Rgba,
        Astc6x6Srgb,
        Astc8x5Rgba,
        Astc8x5Srgb,
        Astc8x6Rgba,
        Astc8x6Srgb,
        Astc8x8Rgba,
        Astc8x8Srgb,
        Astc10x5Rgba,
        Astc10x5Srgb,
        Astc10x6Rgba,
        Astc10x6Srgb,
        Astc10x8Rgba,
        Astc10x8Srgb,
        Astc10x10Rgba,
        Astc10x10Srgb,
        Astc12x10Rgba,
        Astc12x10Srgb,
        Astc12x12Rgba,
        Astc12x12Srgb,
        Pvrtc2BppRgba,
        Pvrtc2BppRgb,
        Pvrtc4BppRgba,
        Pvrtc4BppRgb,
        Etc1Rgb8,
        Etc2Rgb8,
        Etc2Srgb8,
        Etc2Rgb8A1,
        Etc2Srgb8A1,
        Etc2Rgba8Eac,
        Etc2Srgb8A8Eac,
        EacRg11Unorm,
        EacRg11Snorm,
        EacR11Unorm,
        EacR11Snorm,
        Bc7RgbaUnorm,
        Bc7RgbaSrgb,

        Depth16Unorm,
        Depth24Unorm,
        Depth32Unorm,
        Depth24UnormStencil8,
        /// Falls back to [`TextureFormat::Depth24UnormStencil8`] when
        /// 32-bit depth with stencil is unavailable.
        Depth32UnormStencil8,
        Stencil8,
    }
}

impl TextureFormat {
    pub fn is_compressed(self) -> bool {
        self >= TextureFormat::Astc4x4Rgba && self <= TextureFormat::Bc7RgbaSrgb
    }

    pub fn is_depth_or_stencil(self) -> bool {
        self >= TextureFormat::Depth16Unorm
    }
}

bitflags! {
    /// What a texture format can be used for. Empty means unsupported.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextureFormatCapabilities: u8 {
        /// Can be sampled in shaders.
        const SAMPLED = 1 << 0;
        /// Can be sampled with linear filtering.
        const SAMPLED_FILTERED = 1 << 1;
        /// Can be allocated with immutable storage.
        const STORAGE = 1 << 2;
        /// Can be a render target.
        const ATTACHMENT = 1 << 3;
        /// Can be rendered to and sampled from the same texture.
        const SAMPLED_ATTACHMENT = 1 << 4;
    }
}
