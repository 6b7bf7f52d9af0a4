//! GL enum values used by the context layer

pub type GLenum = u32;
pub type GLuint = u32;
pub type GLint = i32;
pub type GLsizei = i32;
pub type GLbitfield = u32;
pub type GLuint64 = u64;

// Strings
pub const VENDOR: GLenum = 0x1F00;
pub const RENDERER: GLenum = 0x1F01;
pub const VERSION: GLenum = 0x1F02;
pub const EXTENSIONS: GLenum = 0x1F03;
pub const NUM_EXTENSIONS: GLenum = 0x821D;

// Errors
pub const NO_ERROR: GLenum = 0;
pub const INVALID_ENUM: GLenum = 0x0500;
pub const INVALID_VALUE: GLenum = 0x0501;
pub const INVALID_OPERATION: GLenum = 0x0502;
pub const STACK_OVERFLOW: GLenum = 0x0503;
pub const STACK_UNDERFLOW: GLenum = 0x0504;
pub const OUT_OF_MEMORY: GLenum = 0x0505;
pub const INVALID_FRAMEBUFFER_OPERATION: GLenum = 0x0506;

// Framebuffers
pub const FRAMEBUFFER: GLenum = 0x8D40;
pub const READ_FRAMEBUFFER: GLenum = 0x8CA8;
pub const DRAW_FRAMEBUFFER: GLenum = 0x8CA9;
pub const RENDERBUFFER: GLenum = 0x8D41;
pub const COLOR_ATTACHMENT0: GLenum = 0x8CE0;
pub const DEPTH_ATTACHMENT: GLenum = 0x8D00;

// Buffers
pub const ARRAY_BUFFER: GLenum = 0x8892;
pub const ELEMENT_ARRAY_BUFFER: GLenum = 0x8893;
pub const UNIFORM_BUFFER: GLenum = 0x8A11;
pub const SHADER_STORAGE_BUFFER: GLenum = 0x90D2;

// Objects and labels
pub const BUFFER: GLenum = 0x82E0;
pub const TEXTURE: GLenum = 0x1702;
pub const TEXTURE_2D: GLenum = 0x0DE1;

// Debug output
pub const DEBUG_OUTPUT: GLenum = 0x92E0;
pub const DEBUG_SOURCE_APPLICATION: GLenum = 0x824A;
pub const DEBUG_TYPE_MARKER: GLenum = 0x8268;
pub const DEBUG_SEVERITY_NOTIFICATION: GLenum = 0x826B;
pub const MAX_DEBUG_GROUP_STACK_DEPTH: GLenum = 0x826C;

// State
pub const TEXTURE_CUBE_MAP_SEAMLESS: GLenum = 0x884F;
pub const FRONT_AND_BACK: GLenum = 0x0408;
pub const LINE: GLenum = 0x1B01;
pub const FILL: GLenum = 0x1B02;
pub const SYNC_GPU_COMMANDS_COMPLETE: GLenum = 0x9117;

// Limits
pub const MAX_TEXTURE_SIZE: GLenum = 0x0D33;
pub const MAX_CUBE_MAP_TEXTURE_SIZE: GLenum = 0x851C;
pub const MAX_SAMPLES: GLenum = 0x8D57;
pub const MAX_SAMPLES_IMG: GLenum = 0x9135;
pub const MAX_VERTEX_UNIFORM_COMPONENTS: GLenum = 0x8B4A;
pub const MAX_VERTEX_UNIFORM_VECTORS: GLenum = 0x8DFB;
pub const MAX_FRAGMENT_UNIFORM_COMPONENTS: GLenum = 0x8B49;
pub const MAX_FRAGMENT_UNIFORM_VECTORS: GLenum = 0x8DFD;
pub const MAX_COMPUTE_UNIFORM_COMPONENTS: GLenum = 0x8263;
pub const MAX_SHADER_STORAGE_BLOCK_SIZE: GLenum = 0x90DE;
pub const MAX_UNIFORM_BLOCK_SIZE: GLenum = 0x8A30;
pub const SHADER_STORAGE_BUFFER_OFFSET_ALIGNMENT: GLenum = 0x90DF;

/// Human readable name of a `glGetError` code.
pub fn error_name(code: GLenum) -> &'static str {
    match code {
        NO_ERROR => "GL_NO_ERROR",
        INVALID_ENUM => "GL_INVALID_ENUM",
        INVALID_VALUE => "GL_INVALID_VALUE",
        INVALID_OPERATION => "GL_INVALID_OPERATION",
        STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        _ => "unknown GL error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_names() {
        assert_eq!(error_name(INVALID_ENUM), "GL_INVALID_ENUM");
        assert_eq!(error_name(0xdead), "unknown GL error");
    }
}
