//! Per-format capability derivation, cached on first query

use dashmap::DashMap;

use crate::extensions::Extension;
use crate::format::{TextureFormat, TextureFormatCapabilities as Caps};
use crate::keys::{Capability, InternalCapability, InternalRequirement, TextureCapability};
use crate::matrix::CapabilityMatrix;

#[derive(Debug, Default)]
pub struct FormatCapabilityTable {
    cache: DashMap<TextureFormat, Caps>,
}

impl FormatCapabilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capabilities of `format`.
    ///
    /// 32-bit depth with stencil is normalized to its 24-bit form first when the
    /// richer format is unavailable, so both share one cache entry.
    pub fn resolve(&self, matrix: &CapabilityMatrix, format: TextureFormat) -> Caps {
        let format = normalize(matrix, format);
        if let Some(found) = self.cache.get(&format).map(|entry| *entry) {
            return found;
        }

        match derive(matrix, format) {
            Some(caps) => *self.cache.entry(format).or_insert(caps),
            None => *self.cache.entry(format).or_default(),
        }
    }

    pub fn insert(&self, format: TextureFormat, caps: Caps) {
        self.cache.insert(format, caps);
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

fn normalize(matrix: &CapabilityMatrix, format: TextureFormat) -> TextureFormat {
    if format == TextureFormat::Depth32UnormStencil8
        && !matrix.has_texture_capability(TextureCapability::Depth32FStencil8)
    {
        TextureFormat::Depth24UnormStencil8
    } else {
        format
    }
}

/// Derive the capabilities of a format. `None` for formats outside the table.
fn derive(matrix: &CapabilityMatrix, format: TextureFormat) -> Option<Caps> {
    use TextureCapability as T;
    use TextureFormat as F;

    let cap = |key| matrix.has_capability(key);
    let tex = |key| matrix.has_texture_capability(key);
    let when = |flag: bool, caps: Caps| if flag { caps } else { Caps::empty() };

    let sampled = Caps::SAMPLED;
    let filtered = Caps::SAMPLED_FILTERED;
    let attachment = Caps::ATTACHMENT;
    let sampled_attachment = Caps::SAMPLED_ATTACHMENT;
    let storage = when(
        matrix.has_internal_capability(InternalCapability::TexStorage),
        Caps::STORAGE,
    );
    let compressed = sampled | when(tex(T::TextureCompressionTexStorage), Caps::STORAGE);
    let all = sampled | filtered | storage | attachment | sampled_attachment;

    let mut caps = Caps::empty();
    match format {
        F::La8Unorm | F::L8Unorm => {
            if tex(T::ColorTexImageLa) {
                caps |= sampled | filtered;
                caps |= when(tex(T::ColorTexStorageLa8), storage);
            }
        }
        F::A8Unorm => {
            caps |= sampled | filtered;
            caps |= when(tex(T::ColorTexStorageA8), storage);
        }
        F::Rgba8Unorm | F::Rgbx8Unorm => {
            caps |= sampled | filtered;
            caps |= when(tex(T::ColorTexStorageRgba8), storage);
            caps |= when(tex(T::ColorTexImageRgba8), sampled_attachment);
            caps |= when(tex(T::ColorRenderbufferRgba8), attachment);
        }
        F::Rg8Unorm | F::R8Unorm => {
            if cap(Capability::TextureFormatRg) {
                caps |= sampled | filtered;
                caps |= when(tex(T::ColorTexStorageRg8), storage);
                caps |= when(tex(T::ColorTexImageRg8), sampled_attachment);
                caps |= when(tex(T::ColorRenderbufferRg8), attachment);
            }
        }
        // BGRA renderbuffers came in a later revision of the EXT extension; not relied on.
        F::Bgra8Unorm => {
            caps |= when(tex(T::ColorTexImageBgra), sampled | filtered);
            caps |= when(tex(T::ColorTexImageBgraRgba8), sampled_attachment);
            caps |= when(tex(T::ColorTexStorageBgra8), storage);
        }
        F::Rgba8UnormSrgb => {
            if cap(Capability::Srgb) {
                caps |= sampled | filtered;
                caps |= when(tex(T::ColorTexStorageSrgba8), storage);
                caps |= when(tex(T::ColorTexImageSrgba8), sampled_attachment);
                caps |= when(tex(T::ColorRenderbufferSrgba8), attachment);
            }
        }
        F::Bgra8UnormSrgb => {
            caps |= when(
                cap(Capability::Srgb) && tex(T::ColorTexImageBgraSrgba),
                sampled | filtered,
            );
        }
        F::Rgba16Float => {
            caps |= when(cap(Capability::TextureHalfFloat), sampled);
            caps |= when(tex(T::ColorTexImage16f), sampled_attachment);
            caps |= when(tex(T::ColorTexStorage16f), storage);
            caps |= when(tex(T::ColorRenderbuffer16f), attachment);
            caps |= when(tex(T::ColorFilterable16f), filtered);
        }
        // RGB float formats are not renderable through TexImage.
        F::Rgb16Float => {
            caps |= when(cap(Capability::TextureHalfFloat), sampled);
            caps |= when(tex(T::ColorRenderbufferRgb16f), attachment | sampled_attachment);
            caps |= when(tex(T::ColorTexStorage16f), storage);
            caps |= when(tex(T::ColorFilterable16f), filtered);
        }
        F::Rg16Float | F::R16Float => {
            if cap(Capability::TextureFormatRg) {
                caps |= when(cap(Capability::TextureHalfFloat), sampled);
                caps |= when(tex(T::ColorRenderbufferRg16f), attachment | sampled_attachment);
                caps |= when(tex(T::ColorTexStorage16f), storage);
                caps |= when(tex(T::ColorFilterable16f), filtered);
            }
        }
        F::Rgba32Float => {
            caps |= when(cap(Capability::TextureFloat), sampled);
            caps |= when(tex(T::ColorTexStorage32f), storage);
            caps |= when(tex(T::ColorRenderbuffer32f), attachment | sampled_attachment);
            caps |= when(tex(T::ColorFilterable32f), filtered);
        }
        F::Rgb32Float => {
            caps |= when(cap(Capability::TextureFloat), sampled);
            caps |= when(tex(T::ColorTexStorage32f), storage);
            caps |= when(tex(T::ColorFilterable32f), filtered);
        }
        F::Rg32Float | F::R32Float => {
            if cap(Capability::TextureFormatRg) {
                caps |= when(cap(Capability::TextureFloat), sampled);
                caps |= when(tex(T::ColorTexStorage32f), storage);
                caps |= when(tex(T::ColorRenderbufferRg32f), sampled_attachment | attachment);
                caps |= when(tex(T::ColorFilterable32f), filtered);
            }
        }
        F::R16Unorm | F::Rg16Unorm => {
            caps |= when(tex(T::ColorFormatRgUnorm16), all);
        }
        F::R16Uint | F::Rg16Uint => {
            caps |= when(tex(T::ColorFormatRgInt), sampled | storage | attachment);
        }
        F::Rgba32Uint => {
            caps |= when(
                tex(T::TextureInteger),
                sampled | storage | attachment | sampled_attachment,
            );
        }
        F::B5G5R5A1Unorm => {
            caps |= when(tex(T::ColorTexImageBgr5A1), sampled | filtered);
        }
        F::Abgr4Unorm => caps |= all,
        // APPLE rgb_422 formats are not color renderable.
        F::R4G2B2UnormApple => {
            if matrix.has_extension(Extension::AppleRgb422) {
                caps |= sampled | filtered | storage;
            }
        }
        // TexStorage has no UNSIGNED_SHORT_8_8_REV_APPLE.
        F::R4G2B2UnormRevApple => {
            caps |= when(matrix.has_extension(Extension::AppleRgb422), sampled | filtered);
        }
        F::R5G5B5A1Unorm => {
            caps |= sampled | filtered | storage;
            caps |= when(
                matrix.has_internal_capability(InternalCapability::FramebufferObject),
                attachment | sampled_attachment,
            );
        }
        F::Bgr10A2Unorm => {
            caps |= when(tex(T::ColorTexImageBgr10A2), sampled | filtered);
        }
        F::Rgb10A2UnormRev => {
            if tex(T::ColorTexImageRgb10A2) {
                caps |= sampled | filtered;
                caps |= when(
                    !matrix.has_internal_requirement(InternalRequirement::ColorTexImageRgb10A2Unsized),
                    sampled_attachment,
                );
            }
            caps |= when(tex(T::ColorTexStorageRgb10A2), storage);
            caps |= when(tex(T::ColorRenderbufferRgb10A2), attachment);
        }
        F::Rgb10A2UintRev => {
            caps |= when(
                tex(T::ColorFormatRgb10A2Ui),
                sampled | storage | attachment | sampled_attachment,
            );
        }
        F::Bgra8UnormRev => {
            caps |= when(tex(T::TextureTypeUint8888Rev), sampled | filtered);
        }
        F::B5G6R5Unorm => {}
        F::Depth16Unorm => {
            caps |= when(tex(T::DepthTexImage), sampled);
            caps |= when(tex(T::DepthTexImage16), sampled_attachment);
            caps |= when(tex(T::DepthTexStorage16), storage);
            caps |= when(tex(T::DepthRenderbuffer16), attachment);
            caps |= when(tex(T::DepthFilterable), filtered);
        }
        // 24-bit depth also reports what 32-bit depth can do, since drivers
        // commonly hand out the wider format for it.
        F::Depth24Unorm => {
            caps |= when(tex(T::DepthTexImage24), sampled | sampled_attachment);
            caps |= when(tex(T::DepthTexStorage24), storage);
            caps |= when(tex(T::DepthRenderbuffer24), attachment);
            caps |= when(tex(T::DepthTexImage32), sampled | sampled_attachment);
            caps |= when(tex(T::DepthTexStorage32), storage);
            caps |= when(tex(T::DepthRenderbuffer32), attachment);
            caps |= when(tex(T::DepthFilterable), filtered);
        }
        F::Depth32Unorm => {
            caps |= when(tex(T::DepthTexImage32), sampled | sampled_attachment);
            caps |= when(tex(T::DepthTexStorage32), storage);
            caps |= when(tex(T::DepthRenderbuffer32), attachment);
            caps |= when(tex(T::DepthFilterable), filtered);
        }
        F::Depth24UnormStencil8 => {
            if tex(T::Depth24Stencil8) {
                caps |= sampled | attachment | sampled_attachment | storage;
            }
        }
        F::Depth32UnormStencil8 => {
            if tex(T::Depth32FStencil8) {
                caps |= sampled | attachment | sampled_attachment | storage;
            }
        }
        F::Stencil8 => {
            caps |= when(tex(T::StencilTexture8), sampled | storage);
            caps |= attachment;
        }
        F::Astc4x4Rgba
        | F::Astc4x4Srgb
        | F::Astc5x4Rgba
        | F::Astc5x4Srgb
        | F::Astc5x5Rgba
        | F::Astc5x5Srgb
        | F::Astc6x5Rgba
        | F::Astc6x5Srgb
        | F::Astc6x6Rgba
        | F::Astc6x6Srgb
        | F::Astc8x5Rgba
        | F::Astc8x5Srgb
        | F::Astc8x6Rgba
        | F::Astc8x6Srgb
        | F::Astc8x8Rgba
        | F::Astc8x8Srgb
        | F::Astc10x5Rgba
        | F::Astc10x5Srgb
        | F::Astc10x6Rgba
        | F::Astc10x6Srgb
        | F::Astc10x8Rgba
        | F::Astc10x8Srgb
        | F::Astc10x10Rgba
        | F::Astc10x10Srgb
        | F::Astc12x10Rgba
        | F::Astc12x10Srgb
        | F::Astc12x12Rgba
        | F::Astc12x12Srgb => {
            caps |= when(tex(T::TextureCompressionAstc), compressed);
        }
        F::Bc7RgbaUnorm | F::Bc7RgbaSrgb => {
            caps |= when(tex(T::TextureCompressionBptc), compressed);
        }
        F::Pvrtc2BppRgba | F::Pvrtc2BppRgb | F::Pvrtc4BppRgba | F::Pvrtc4BppRgb => {
            caps |= when(tex(T::TextureCompressionPvrtc), compressed);
        }
        F::Etc1Rgb8 => {
            caps |= when(tex(T::TextureCompressionEtc1), compressed);
        }
        F::Etc2Rgb8
        | F::Etc2Srgb8
        | F::Etc2Rgb8A1
        | F::Etc2Srgb8A1
        | F::Etc2Rgba8Eac
        | F::Etc2Srgb8A8Eac
        | F::EacRg11Unorm
        | F::EacRg11Snorm
        | F::EacR11Unorm
        | F::EacR11Snorm => {
            caps |= when(tex(T::TextureCompressionEtc2Eac), compressed);
        }
        F::Invalid => return None,
    }
    Some(caps)
}
