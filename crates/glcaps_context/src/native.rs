//! Boundary to the native driver
//!
//! [`NativeGl`] is the only place the context touches a real driver. Plain
//! calls (`get_string`, `bind_buffer`, ...) exist under one name everywhere.
//! Calls that have several spellings take the [`EntryPoint`] the dispatch
//! table bound, and the implementation forwards to that symbol.
//!
//! Implementations must be cheap to call and must not block; the context may
//! call them while holding no locks at all, but never while holding a
//! deletion queue lock.

use std::ffi::c_void;

use glcaps_core::ApiFamily;

use crate::dispatch::EntryPoint;
use crate::gl_enums::{GLbitfield, GLenum, GLint, GLsizei, GLuint, GLuint64};

/// Opaque fence object returned by `glFenceSync`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GlSync(pub usize);

impl GlSync {
    pub const NULL: GlSync = GlSync(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Driver debug message sink installed with `debug_message_callback`.
pub type DebugCallback = fn(source: GLenum, kind: GLenum, id: GLuint, severity: GLenum, message: &str);

/// A native GL or GL ES context.
#[allow(clippy::too_many_arguments)]
pub trait NativeGl {
    // ------------------------------------------------------------------
    // Context ownership
    // ------------------------------------------------------------------

    /// Family of the API the context was created for.
    fn api_family(&self) -> ApiFamily;

    /// Bind the context to the calling thread.
    fn make_current(&self) -> bool;

    fn is_current(&self) -> bool;

    /// True when another context sharing objects with this one is current.
    fn is_current_sharegroup(&self) -> bool;

    // ------------------------------------------------------------------
    // Queries and plain calls
    // ------------------------------------------------------------------

    fn get_string(&self, name: GLenum) -> Option<String>;
    fn get_string_i(&self, name: GLenum, index: GLuint) -> Option<String>;
    fn get_integer(&self, pname: GLenum) -> GLint;
    fn get_error(&self) -> GLenum;
    fn enable(&self, cap: GLenum);

    fn bind_buffer(&self, target: GLenum, buffer: GLuint);
    fn delete_buffers(&self, buffers: &[GLuint]);
    fn delete_framebuffers(&self, framebuffers: &[GLuint]);
    fn delete_renderbuffers(&self, renderbuffers: &[GLuint]);
    fn delete_textures(&self, textures: &[GLuint]);
    fn delete_program(&self, program: GLuint);
    fn delete_shader(&self, shader: GLuint);

    // ------------------------------------------------------------------
    // Dispatched calls
    // ------------------------------------------------------------------

    fn bind_vertex_array(&self, entry: EntryPoint, array: GLuint);
    fn gen_vertex_arrays(&self, entry: EntryPoint, arrays: &mut [GLuint]);
    fn delete_vertex_arrays(&self, entry: EntryPoint, arrays: &[GLuint]);

    fn blit_framebuffer(
        &self,
        entry: EntryPoint,
        src: [GLint; 4],
        dst: [GLint; 4],
        mask: GLbitfield,
        filter: GLenum,
    );

    fn bind_image_texture(
        &self,
        entry: EntryPoint,
        unit: GLuint,
        texture: GLuint,
        level: GLint,
        layered: bool,
        layer: GLint,
        access: GLenum,
        format: GLenum,
    );
    fn memory_barrier(&self, entry: EntryPoint, barriers: GLbitfield);

    fn fence_sync(&self, entry: EntryPoint, condition: GLenum, flags: GLbitfield) -> GlSync;
    fn delete_sync(&self, entry: EntryPoint, sync: GlSync);
    fn get_sync_iv(&self, entry: EntryPoint, sync: GlSync, pname: GLenum, values: &mut [GLint]) -> GLsizei;

    fn tex_storage_1d(&self, entry: EntryPoint, target: GLenum, levels: GLsizei, format: GLenum, width: GLsizei);
    fn tex_storage_2d(
        &self,
        entry: EntryPoint,
        target: GLenum,
        levels: GLsizei,
        format: GLenum,
        width: GLsizei,
        height: GLsizei,
    );
    fn tex_storage_3d(
        &self,
        entry: EntryPoint,
        target: GLenum,
        levels: GLsizei,
        format: GLenum,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
    );

    fn map_buffer(&self, entry: EntryPoint, target: GLenum, access: GLenum) -> *mut c_void;
    fn map_buffer_range(
        &self,
        entry: EntryPoint,
        target: GLenum,
        offset: isize,
        length: isize,
        access: GLbitfield,
    ) -> *mut c_void;
    fn unmap_buffer(&self, entry: EntryPoint, target: GLenum) -> bool;

    fn vertex_attrib_divisor(&self, entry: EntryPoint, index: GLuint, divisor: GLuint);
    fn draw_buffers(&self, entry: EntryPoint, buffers: &[GLenum]);

    fn object_label(&self, entry: EntryPoint, identifier: GLenum, name: GLuint, label: &str);
    fn push_debug_group(&self, entry: EntryPoint, source: GLenum, id: GLuint, message: &str);
    fn pop_debug_group(&self, entry: EntryPoint);
    fn debug_message_insert(
        &self,
        entry: EntryPoint,
        source: GLenum,
        kind: GLenum,
        id: GLuint,
        severity: GLenum,
        message: &str,
    );
    fn debug_message_callback(&self, entry: EntryPoint, callback: DebugCallback);

    fn invalidate_framebuffer(&self, entry: EntryPoint, target: GLenum, attachments: &[GLenum]);
    fn clear_depth(&self, entry: EntryPoint, depth: f32);

    fn framebuffer_texture_2d_multisample(
        &self,
        entry: EntryPoint,
        target: GLenum,
        attachment: GLenum,
        textarget: GLenum,
        texture: GLuint,
        level: GLint,
        samples: GLsizei,
    );
    fn renderbuffer_storage_multisample(
        &self,
        entry: EntryPoint,
        target: GLenum,
        samples: GLsizei,
        format: GLenum,
        width: GLsizei,
        height: GLsizei,
    );

    fn get_texture_handle(&self, entry: EntryPoint, texture: GLuint) -> GLuint64;
    fn make_texture_handle_resident(&self, entry: EntryPoint, handle: GLuint64);
    fn make_texture_handle_non_resident(&self, entry: EntryPoint, handle: GLuint64);

    fn polygon_mode(&self, entry: EntryPoint, face: GLenum, mode: GLenum);
}
