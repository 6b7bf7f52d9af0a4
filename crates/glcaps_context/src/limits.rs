//! Numeric device limits

use glcaps_core::version::{GL_2_0, ES_3_0};
use glcaps_core::{define_keys, ApiFamily, Capability, CapabilityMatrix, Extension, InternalRequirement};

use crate::gl_enums::*;
use crate::native::NativeGl;

define_keys! {
    /// Limits a renderer can ask the context for.
    pub enum FeatureLimit {
        BufferAlignment,
        BufferNoCopyAlignment,
        MaxBindBytesBytes,
        MaxCubeMapDimension,
        MaxFragmentUniformVectors,
        MaxMultisampleCount,
        MaxPushConstantBytes,
        MaxTextureDimension1D2D,
        MaxStorageBufferBytes,
        MaxUniformBufferBytes,
        MaxVertexUniformVectors,
        PushConstantsAlignment,
        ShaderStorageBufferOffsetAlignment,
    }
}

pub(crate) fn query<G: NativeGl>(gl: &G, matrix: &CapabilityMatrix, limit: FeatureLimit) -> usize {
    let integer = |pname| gl.get_integer(pname).max(0) as usize;

    match limit {
        FeatureLimit::BufferAlignment => 16,
        FeatureLimit::BufferNoCopyAlignment
        | FeatureLimit::MaxBindBytesBytes
        | FeatureLimit::MaxPushConstantBytes
        | FeatureLimit::PushConstantsAlignment => 0,
        FeatureLimit::MaxTextureDimension1D2D => integer(MAX_TEXTURE_SIZE),
        FeatureLimit::MaxCubeMapDimension => integer(MAX_CUBE_MAP_TEXTURE_SIZE),
        FeatureLimit::MaxVertexUniformVectors => uniform_vectors(
            gl,
            matrix,
            MAX_VERTEX_UNIFORM_COMPONENTS,
            MAX_VERTEX_UNIFORM_VECTORS,
        ),
        FeatureLimit::MaxFragmentUniformVectors => uniform_vectors(
            gl,
            matrix,
            MAX_FRAGMENT_UNIFORM_COMPONENTS,
            MAX_FRAGMENT_UNIFORM_VECTORS,
        ),
        FeatureLimit::MaxMultisampleCount => {
            if matrix.has_capability(Capability::MultiSample) {
                integer(max_samples_enum(matrix))
            } else {
                0
            }
        }
        FeatureLimit::MaxStorageBufferBytes => {
            if matrix.has_capability(Capability::StorageBuffers) {
                integer(MAX_SHADER_STORAGE_BLOCK_SIZE)
            } else {
                0
            }
        }
        FeatureLimit::MaxUniformBufferBytes => {
            if matrix.has_capability(Capability::UniformBlocks) {
                integer(MAX_UNIFORM_BLOCK_SIZE)
            } else {
                0
            }
        }
        FeatureLimit::ShaderStorageBufferOffsetAlignment => {
            if matrix.has_capability(Capability::UniformBlocks) {
                integer(SHADER_STORAGE_BUFFER_OFFSET_ALIGNMENT)
            } else {
                256
            }
        }
    }
}

/// Enum holding the sample count ceiling for this driver.
pub(crate) fn max_samples_enum(matrix: &CapabilityMatrix) -> GLenum {
    if matrix.has_internal_requirement(InternalRequirement::MultiSampleExtReq)
        && matrix.has_extension(Extension::MultiSampleImg)
    {
        MAX_SAMPLES_IMG
    } else {
        MAX_SAMPLES
    }
}

/// Uniform vectors, derived from the component count where that query exists.
fn uniform_vectors<G: NativeGl>(
    gl: &G,
    matrix: &CapabilityMatrix,
    components: GLenum,
    vectors: GLenum,
) -> usize {
    let has_components = matrix.version().is_some_and(|v| match v.family {
        ApiFamily::Desktop => v >= GL_2_0,
        ApiFamily::Embedded => v >= ES_3_0,
    });
    let value = if has_components {
        gl.get_integer(components) / 4
    } else {
        gl.get_integer(vectors)
    };
    value.max(0) as usize
}

/// Compute shader uniform components, zero without compute support.
pub(crate) fn max_compute_uniforms<G: NativeGl>(gl: &G, matrix: &CapabilityMatrix) -> usize {
    if matrix.has_capability(Capability::Compute) {
        gl.get_integer(MAX_COMPUTE_UNIFORM_COMPONENTS).max(0) as usize
    } else {
        0
    }
}
