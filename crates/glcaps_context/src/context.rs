//! The per-context hub
//!
//! A [`Context`] owns everything that is only valid for one native context:
//! the capability matrix, the dispatch table, the deletion queues and the
//! once-queried limits. Nothing here is global; pass the context to whatever
//! needs answers.
//!
//! Probing and first use of every slot are expected on the thread that owns
//! the native context. After that, capability reads are safe from anywhere and
//! deletions may be queued from any thread through [`Context::deletion`].

use std::ffi::c_void;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use glcaps_core::{
    Capability, CapabilityMatrix, Extension, InternalCapability, InternalRequirement, Requirement,
    TextureCapability, TextureFormat, TextureFormatCapabilities, Version,
};
use glcaps_metrics::Counter;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing::{debug, error, warn};

use crate::deletion::{DeletionCoordinator, DestructionGuard, ObjectKind};
use crate::dispatch::{DispatchTable, EntryPoint, Slot, SlotState};
use crate::error::{GlError, ProbeError};
use crate::gl_enums::*;
use crate::limits::{self, FeatureLimit};
use crate::native::{DebugCallback, GlSync, NativeGl};
use crate::probe::{self, DriverInfo};
use crate::settings::{ContextSettings, ErrorCheckPolicy, UnbindPolicy};

#[derive(Debug, Default)]
struct DebugGroups {
    /// Pushes minus pops, including pushes that were dropped.
    depth: u32,
    overflow_logged: bool,
}

/// Capability answers, dispatch and deferred deletion for one native context.
pub struct Context<G: NativeGl> {
    gl: G,
    settings: ContextSettings,
    matrix: CapabilityMatrix,
    info: Option<DriverInfo>,
    dispatch: DispatchTable,
    deletion: Arc<DeletionCoordinator>,
    max_samples: OnceCell<GLint>,
    debug_group_limit: OnceCell<u32>,
    debug_groups: Mutex<DebugGroups>,
    call_count: AtomicU64,
    last_error: Mutex<Option<GlError>>,
    counters: Mutex<Counter>,
}

impl<G: NativeGl> Context<G> {
    /// Wrap a native context. Nothing is probed until [`Context::initialize`].
    pub fn new(gl: G, settings: ContextSettings) -> Self {
        Self {
            gl,
            settings,
            matrix: CapabilityMatrix::unavailable(),
            info: None,
            dispatch: DispatchTable::new(),
            deletion: Arc::new(DeletionCoordinator::new()),
            max_samples: OnceCell::new(),
            debug_group_limit: OnceCell::new(),
            debug_groups: Mutex::new(DebugGroups::default()),
            call_count: AtomicU64::new(0),
            last_error: Mutex::new(None),
            counters: Mutex::new(Counter::new()),
        }
    }

    /// Probe the driver and apply the default state.
    ///
    /// On failure the context stays unavailable: every capability reads
    /// `false`, every format is unsupported and dispatched calls are dropped.
    /// Calling this again after success does nothing.
    pub fn initialize(&mut self) -> Result<(), ProbeError> {
        if self.matrix.is_available() {
            return Ok(());
        }

        let info = probe::probe(&self.gl, &self.settings).inspect_err(|err| {
            error!("GL context unavailable: {err}");
        })?;
        self.matrix = CapabilityMatrix::new(info.probed.clone());
        self.info = Some(info);

        if self.matrix.has_internal_capability(InternalCapability::SeamlessCubeMap) {
            self.gl.enable(TEXTURE_CUBE_MAP_SEAMLESS);
        }
        if self.settings.debug_output
            && self.matrix.has_internal_capability(InternalCapability::DebugMessageCallback)
        {
            self.gl.enable(DEBUG_OUTPUT);
        }
        Ok(())
    }

    // ========================================================================
    // Capability queries
    // ========================================================================

    pub fn is_available(&self) -> bool {
        self.matrix.is_available()
    }

    pub fn matrix(&self) -> &CapabilityMatrix {
        &self.matrix
    }

    pub fn version(&self) -> Option<Version> {
        self.matrix.version()
    }

    pub fn vendor(&self) -> &str {
        self.info.as_ref().map_or("", |info| info.vendor.as_str())
    }

    pub fn renderer(&self) -> &str {
        self.info.as_ref().map_or("", |info| info.renderer.as_str())
    }

    pub fn has_capability(&self, key: Capability) -> bool {
        self.matrix.has_capability(key)
    }

    pub fn has_internal_capability(&self, key: InternalCapability) -> bool {
        self.matrix.has_internal_capability(key)
    }

    pub fn has_texture_capability(&self, key: TextureCapability) -> bool {
        self.matrix.has_texture_capability(key)
    }

    pub fn has_requirement(&self, key: Requirement) -> bool {
        self.matrix.has_requirement(key)
    }

    pub fn has_internal_requirement(&self, key: InternalRequirement) -> bool {
        self.matrix.has_internal_requirement(key)
    }

    pub fn has_extension(&self, key: Extension) -> bool {
        self.matrix.has_extension(key)
    }

    /// Raw check against the probed extension list.
    pub fn is_supported(&self, name: &str) -> bool {
        self.matrix.is_supported(name)
    }

    pub fn texture_format_capabilities(&self, format: TextureFormat) -> TextureFormatCapabilities {
        self.matrix.texture_format_capabilities(format)
    }

    /// Numeric limit, or zero when the context is unavailable.
    pub fn feature_limit(&self, limit: FeatureLimit) -> usize {
        if !self.is_available() {
            return 0;
        }
        limits::query(&self.gl, &self.matrix, limit)
    }

    pub fn max_compute_uniforms(&self) -> usize {
        limits::max_compute_uniforms(&self.gl, &self.matrix)
    }

    pub fn slot_state(&self, slot: Slot) -> SlotState {
        self.dispatch.state(slot)
    }

    // ========================================================================
    // Settings and bookkeeping
    // ========================================================================

    pub fn settings(&self) -> &ContextSettings {
        &self.settings
    }

    pub fn unbind_policy(&self) -> UnbindPolicy {
        self.settings.unbind_policy
    }

    pub fn set_unbind_policy(&mut self, policy: UnbindPolicy) {
        self.settings.unbind_policy = policy;
    }

    pub fn set_error_check(&mut self, policy: ErrorCheckPolicy) {
        self.settings.error_check = policy;
    }

    pub fn native(&self) -> &G {
        &self.gl
    }

    /// Forwarded native calls since creation or the last reset.
    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Per symbol call counts. Empty unless built with metrics.
    pub fn call_counters(&self) -> Vec<(&'static str, usize)> {
        self.counters.lock().sorted()
    }

    pub fn reset_counters(&self) {
        self.call_count.store(0, Ordering::Relaxed);
        self.counters.lock().reset_all();
    }

    pub fn last_error(&self) -> Option<GlError> {
        *self.last_error.lock()
    }

    /// Query the driver error state now, regardless of the check policy.
    pub fn check_errors(&self) -> Result<(), GlError> {
        let code = self.gl.get_error();
        if code == NO_ERROR {
            return Ok(());
        }
        let err = GlError {
            code,
            call: "glGetError",
        };
        *self.last_error.lock() = Some(err);
        Err(err)
    }

    // ========================================================================
    // Forwarding
    // ========================================================================

    /// Bound entry point for `slot`. Slots stay unresolved until the context
    /// has been probed.
    fn entry(&self, slot: Slot) -> Option<EntryPoint> {
        if !self.matrix.is_available() {
            debug!(slot = %slot, "call before initialization dropped");
            return None;
        }
        self.dispatch.resolve(slot, &self.matrix)
    }

    fn forward<R>(&self, slot: Slot, call: impl FnOnce(&G, EntryPoint) -> R) -> Option<R> {
        let entry = self.entry(slot)?;
        let result = call(&self.gl, entry);
        self.after_call(entry.symbol());
        Some(result)
    }

    fn after_call(&self, symbol: &'static str) {
        self.count_call(symbol);
        if self.settings.error_check != ErrorCheckPolicy::Disabled {
            let code = self.gl.get_error();
            self.report_error(code, symbol);
        }
    }

    fn count_call(&self, symbol: &'static str) {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        glcaps_metrics::metrics! {
            self.counters.lock().increment(symbol, 1);
        }
        #[cfg(not(feature = "metrics"))]
        let _ = symbol;
    }

    fn report_error(&self, code: GLenum, symbol: &'static str) {
        if code == NO_ERROR {
            return;
        }
        let err = GlError { code, call: symbol };
        *self.last_error.lock() = Some(err);
        match self.settings.error_check {
            ErrorCheckPolicy::Disabled => {}
            ErrorCheckPolicy::Log => error!("{err}"),
            ErrorCheckPolicy::Abort => {
                error!("{err}");
                panic!("GL error: {err}");
            }
        }
    }

    // ========================================================================
    // Dispatched operations
    // ========================================================================

    pub fn bind_vertex_array(&self, array: GLuint) {
        self.forward(Slot::BindVertexArray, |gl, e| gl.bind_vertex_array(e, array));
    }

    /// Fill `arrays` with new vertex array names. Left untouched when vertex
    /// arrays are unavailable.
    pub fn gen_vertex_arrays(&self, arrays: &mut [GLuint]) {
        self.forward(Slot::GenVertexArrays, |gl, e| gl.gen_vertex_arrays(e, arrays));
    }

    pub fn blit_framebuffer(&self, src: [GLint; 4], dst: [GLint; 4], mask: GLbitfield, filter: GLenum) {
        self.forward(Slot::BlitFramebuffer, |gl, e| {
            gl.blit_framebuffer(e, src, dst, mask, filter)
        });
    }

    #[allow(clippy::too_many_arguments)]
    pub fn bind_image_texture(
        &self,
        unit: GLuint,
        texture: GLuint,
        level: GLint,
        layered: bool,
        layer: GLint,
        access: GLenum,
        format: GLenum,
    ) {
        self.forward(Slot::BindImageTexture, |gl, e| {
            gl.bind_image_texture(e, unit, texture, level, layered, layer, access, format)
        });
    }

    pub fn memory_barrier(&self, barriers: GLbitfield) {
        self.forward(Slot::MemoryBarrier, |gl, e| gl.memory_barrier(e, barriers));
    }

    pub fn fence_sync(&self, condition: GLenum, flags: GLbitfield) -> GlSync {
        self.forward(Slot::FenceSync, |gl, e| gl.fence_sync(e, condition, flags))
            .unwrap_or(GlSync::NULL)
    }

    pub fn delete_sync(&self, sync: GlSync) {
        if sync.is_null() {
            return;
        }
        self.forward(Slot::DeleteSync, |gl, e| gl.delete_sync(e, sync));
    }

    /// Returns the number of values written.
    pub fn get_sync_iv(&self, sync: GlSync, pname: GLenum, values: &mut [GLint]) -> GLsizei {
        self.forward(Slot::GetSynciv, |gl, e| gl.get_sync_iv(e, sync, pname, values))
            .unwrap_or(0)
    }

    pub fn tex_storage_1d(&self, target: GLenum, levels: GLsizei, format: GLenum, width: GLsizei) {
        self.forward(Slot::TexStorage1D, |gl, e| {
            gl.tex_storage_1d(e, target, levels, format, width)
        });
    }

    pub fn tex_storage_2d(&self, target: GLenum, levels: GLsizei, format: GLenum, width: GLsizei, height: GLsizei) {
        self.forward(Slot::TexStorage2D, |gl, e| {
            gl.tex_storage_2d(e, target, levels, format, width, height)
        });
    }

    #[allow(clippy::too_many_arguments)]
    pub fn tex_storage_3d(
        &self,
        target: GLenum,
        levels: GLsizei,
        format: GLenum,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
    ) {
        self.forward(Slot::TexStorage3D, |gl, e| {
            gl.tex_storage_3d(e, target, levels, format, width, height, depth)
        });
    }

    /// Null when mapping is unavailable.
    pub fn map_buffer(&self, target: GLenum, access: GLenum) -> *mut c_void {
        self.forward(Slot::MapBuffer, |gl, e| gl.map_buffer(e, target, access))
            .unwrap_or(std::ptr::null_mut())
    }

    pub fn map_buffer_range(&self, target: GLenum, offset: isize, length: isize, access: GLbitfield) -> *mut c_void {
        self.forward(Slot::MapBufferRange, |gl, e| {
            gl.map_buffer_range(e, target, offset, length, access)
        })
        .unwrap_or(std::ptr::null_mut())
    }

    pub fn unmap_buffer(&self, target: GLenum) -> bool {
        self.forward(Slot::UnmapBuffer, |gl, e| gl.unmap_buffer(e, target))
            .unwrap_or(false)
    }

    pub fn vertex_attrib_divisor(&self, index: GLuint, divisor: GLuint) {
        self.forward(Slot::VertexAttribDivisor, |gl, e| {
            gl.vertex_attrib_divisor(e, index, divisor)
        });
    }

    pub fn draw_buffers(&self, buffers: &[GLenum]) {
        self.forward(Slot::DrawBuffers, |gl, e| gl.draw_buffers(e, buffers));
    }

    pub fn object_label(&self, identifier: GLenum, name: GLuint, label: &str) {
        self.forward(Slot::ObjectLabel, |gl, e| gl.object_label(e, identifier, name, label));
    }

    /// Open a debug group. Groups beyond the driver's stack depth are dropped
    /// together with their matching pops.
    pub fn push_debug_group(&self, source: GLenum, id: GLuint, message: &str) {
        let limit = self.debug_group_limit();
        let forward = {
            let mut groups = self.debug_groups.lock();
            groups.depth += 1;
            let forward = groups.depth < limit;
            if !forward && !groups.overflow_logged {
                groups.overflow_logged = true;
                error!(depth = groups.depth, limit, "debug group stack exhausted, dropping groups");
            }
            forward
        };
        if forward {
            self.forward(Slot::PushDebugGroup, |gl, e| gl.push_debug_group(e, source, id, message));
        }
    }

    pub fn pop_debug_group(&self) {
        let limit = self.debug_group_limit();
        let forward = {
            let mut groups = self.debug_groups.lock();
            if groups.depth == 0 {
                error!("debug group stack is empty, nothing to pop");
                return;
            }
            let forward = groups.depth < limit;
            groups.depth -= 1;
            forward
        };
        if forward {
            self.forward(Slot::PopDebugGroup, |gl, e| gl.pop_debug_group(e));
        }
    }

    pub fn debug_group_depth(&self) -> u32 {
        self.debug_groups.lock().depth
    }

    /// Deepest forwarded group stack. Unbounded for the marker extension,
    /// zero when debug groups are unavailable.
    fn debug_group_limit(&self) -> u32 {
        if !self.is_available() {
            return 0;
        }
        *self.debug_group_limit.get_or_init(|| {
            match self.entry(Slot::PushDebugGroup) {
                Some(EntryPoint::PushGroupMarkerExt) => u32::MAX,
                Some(_) => self.gl.get_integer(MAX_DEBUG_GROUP_STACK_DEPTH).max(0) as u32,
                None => 0,
            }
        })
    }

    pub fn debug_message_insert(&self, source: GLenum, kind: GLenum, id: GLuint, severity: GLenum, message: &str) {
        self.forward(Slot::DebugMessageInsert, |gl, e| {
            gl.debug_message_insert(e, source, kind, id, severity, message)
        });
    }

    pub fn debug_message_callback(&self, callback: DebugCallback) {
        self.forward(Slot::DebugMessageCallback, |gl, e| gl.debug_message_callback(e, callback));
    }

    pub fn invalidate_framebuffer(&self, target: GLenum, attachments: &[GLenum]) {
        self.forward(Slot::InvalidateFramebuffer, |gl, e| {
            gl.invalidate_framebuffer(e, target, attachments)
        });
    }

    pub fn clear_depth(&self, depth: f32) {
        self.forward(Slot::ClearDepth, |gl, e| gl.clear_depth(e, depth));
    }

    /// Attach a texture with implicit multisampling.
    ///
    /// `samples` is clamped to the driver maximum. Some drivers only accept
    /// `GL_FRAMEBUFFER` here; a draw or read target rejected with
    /// `GL_INVALID_ENUM` is retried once with it.
    pub fn framebuffer_texture_2d_multisample(
        &self,
        target: GLenum,
        attachment: GLenum,
        textarget: GLenum,
        texture: GLuint,
        level: GLint,
        samples: GLsizei,
    ) {
        let Some(entry) = self.entry(Slot::FramebufferTexture2DMultisample) else {
            return;
        };
        let max = *self
            .max_samples
            .get_or_init(|| self.gl.get_integer(limits::max_samples_enum(&self.matrix)));
        let samples = samples.min(max);

        self.gl
            .framebuffer_texture_2d_multisample(entry, target, attachment, textarget, texture, level, samples);
        self.count_call(entry.symbol());

        let code = self.gl.get_error();
        let retry = code == INVALID_ENUM
            && (target == DRAW_FRAMEBUFFER || target == READ_FRAMEBUFFER)
            && entry == EntryPoint::FramebufferTexture2DMultisampleExt;
        if retry {
            debug!(target, "multisampled attachment rejected, retrying with GL_FRAMEBUFFER");
            self.gl.framebuffer_texture_2d_multisample(
                entry,
                FRAMEBUFFER,
                attachment,
                textarget,
                texture,
                level,
                samples,
            );
            self.after_call(entry.symbol());
        } else if self.settings.error_check != ErrorCheckPolicy::Disabled {
            self.report_error(code, entry.symbol());
        }
    }

    pub fn renderbuffer_storage_multisample(
        &self,
        target: GLenum,
        samples: GLsizei,
        format: GLenum,
        width: GLsizei,
        height: GLsizei,
    ) {
        self.forward(Slot::RenderbufferStorageMultisample, |gl, e| {
            gl.renderbuffer_storage_multisample(e, target, samples, format, width, height)
        });
    }

    /// Bindless handle, zero when bindless textures are unavailable.
    pub fn get_texture_handle(&self, texture: GLuint) -> GLuint64 {
        self.forward(Slot::GetTextureHandle, |gl, e| gl.get_texture_handle(e, texture))
            .unwrap_or(0)
    }

    pub fn make_texture_handle_resident(&self, handle: GLuint64) {
        self.forward(Slot::MakeTextureHandleResident, |gl, e| {
            gl.make_texture_handle_resident(e, handle)
        });
    }

    pub fn make_texture_handle_non_resident(&self, handle: GLuint64) {
        self.forward(Slot::MakeTextureHandleNonResident, |gl, e| {
            gl.make_texture_handle_non_resident(e, handle)
        });
    }

    /// Fill or wireframe for both faces. Desktop only.
    pub fn polygon_fill_mode(&self, mode: GLenum) {
        self.forward(Slot::PolygonFillMode, |gl, e| gl.polygon_mode(e, FRONT_AND_BACK, mode));
    }

    // ========================================================================
    // Deletion
    // ========================================================================

    /// Shared deletion queues, for threads that drop GL resources.
    pub fn deletion(&self) -> Arc<DeletionCoordinator> {
        Arc::clone(&self.deletion)
    }

    /// Block destruction until the guard is dropped.
    pub fn destruction_guard(&self) -> DestructionGuard<'_> {
        self.deletion.guard()
    }

    /// True when deletes must wait for the next flush.
    fn should_queue(&self) -> bool {
        (!self.gl.is_current() && !self.gl.is_current_sharegroup())
            || !self.deletion.is_destruction_allowed()
    }

    fn plain<R>(&self, symbol: &'static str, call: impl FnOnce(&G) -> R) -> R {
        let result = call(&self.gl);
        self.after_call(symbol);
        result
    }

    fn delete_or_queue(&self, kind: ObjectKind, handles: &[GLuint], delete: impl FnOnce(&[GLuint])) {
        if handles.is_empty() {
            return;
        }
        if self.should_queue() {
            self.deletion.enqueue(kind, handles);
        } else {
            delete(handles);
        }
    }

    pub fn delete_buffers(&self, buffers: &[GLuint]) {
        self.delete_or_queue(ObjectKind::Buffer, buffers, |h| {
            self.plain("glDeleteBuffers", |gl| gl.delete_buffers(h))
        });
    }

    pub fn delete_framebuffers(&self, framebuffers: &[GLuint]) {
        self.delete_or_queue(ObjectKind::Framebuffer, framebuffers, |h| {
            self.plain("glDeleteFramebuffers", |gl| gl.delete_framebuffers(h))
        });
    }

    pub fn delete_renderbuffers(&self, renderbuffers: &[GLuint]) {
        self.delete_or_queue(ObjectKind::Renderbuffer, renderbuffers, |h| {
            self.plain("glDeleteRenderbuffers", |gl| gl.delete_renderbuffers(h))
        });
    }

    pub fn delete_vertex_arrays(&self, arrays: &[GLuint]) {
        self.delete_or_queue(ObjectKind::VertexArray, arrays, |h| {
            self.forward(Slot::DeleteVertexArrays, |gl, e| gl.delete_vertex_arrays(e, h));
        });
    }

    pub fn delete_textures(&self, textures: &[GLuint]) {
        self.delete_or_queue(ObjectKind::Texture, textures, |h| {
            self.plain("glDeleteTextures", |gl| gl.delete_textures(h))
        });
    }

    pub fn delete_program(&self, program: GLuint) {
        if program == 0 {
            return;
        }
        self.delete_or_queue(ObjectKind::Program, &[program], |_| {
            self.plain("glDeleteProgram", |gl| gl.delete_program(program))
        });
    }

    pub fn delete_shader(&self, shader: GLuint) {
        if shader == 0 {
            return;
        }
        self.delete_or_queue(ObjectKind::Shader, &[shader], |_| {
            self.plain("glDeleteShader", |gl| gl.delete_shader(shader))
        });
    }

    /// Bind `target` to zero now, or at the next flush when off-thread.
    pub fn unbind_buffer(&self, target: GLenum) {
        if self.should_queue() {
            self.deletion.enqueue_unbind(target);
        } else {
            self.plain("glBindBuffer", |gl| gl.bind_buffer(target, 0));
        }
    }

    /// Delete everything queued since the last flush.
    ///
    /// Does nothing unless this context or one sharing its objects is
    /// current. Returns the number of objects deleted.
    pub fn flush_deletion_queue(&self) -> usize {
        if !self.gl.is_current() && !self.gl.is_current_sharegroup() {
            warn!("deletion queue flushed without a current context, skipping");
            return 0;
        }

        let mut deleted = 0;

        let buffers = self.deletion.drain(ObjectKind::Buffer);
        if !buffers.is_empty() {
            self.plain("glDeleteBuffers", |gl| gl.delete_buffers(&buffers));
            deleted += buffers.len();
        }

        for target in self.deletion.drain_unbind_targets() {
            self.plain("glBindBuffer", |gl| gl.bind_buffer(target, 0));
        }

        let framebuffers = self.deletion.drain(ObjectKind::Framebuffer);
        if !framebuffers.is_empty() {
            self.plain("glDeleteFramebuffers", |gl| gl.delete_framebuffers(&framebuffers));
            deleted += framebuffers.len();
        }

        let renderbuffers = self.deletion.drain(ObjectKind::Renderbuffer);
        if !renderbuffers.is_empty() {
            self.plain("glDeleteRenderbuffers", |gl| gl.delete_renderbuffers(&renderbuffers));
            deleted += renderbuffers.len();
        }

        let arrays = self.deletion.drain(ObjectKind::VertexArray);
        if !arrays.is_empty() {
            self.forward(Slot::DeleteVertexArrays, |gl, e| gl.delete_vertex_arrays(e, &arrays));
            deleted += arrays.len();
        }

        for program in self.deletion.drain(ObjectKind::Program) {
            self.plain("glDeleteProgram", |gl| gl.delete_program(program));
            deleted += 1;
        }

        for shader in self.deletion.drain(ObjectKind::Shader) {
            self.plain("glDeleteShader", |gl| gl.delete_shader(shader));
            deleted += 1;
        }

        let textures = self.deletion.drain(ObjectKind::Texture);
        if !textures.is_empty() {
            self.plain("glDeleteTextures", |gl| gl.delete_textures(&textures));
            deleted += textures.len();
        }

        if deleted > 0 {
            debug!(deleted, "deletion queue flushed");
        }
        deleted
    }
}

impl<G: NativeGl + std::fmt::Debug> std::fmt::Debug for Context<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("gl", &self.gl)
            .field("version", &self.version())
            .field("resolved_slots", &self.dispatch.resolved_count())
            .field("call_count", &self.call_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{DriverSnapshot, ExtensionStyle, SnapshotDriver};
    use glcaps_core::ApiFamily;

    fn context(version: &str, extensions: &[&str]) -> Context<SnapshotDriver> {
        context_with(version, extensions, &[], ErrorCheckPolicy::Log)
    }

    fn context_with(
        version: &str,
        extensions: &[&str],
        integers: &[(GLenum, GLint)],
        policy: ErrorCheckPolicy,
    ) -> Context<SnapshotDriver> {
        let snapshot = DriverSnapshot {
            family: ApiFamily::Embedded,
            version: Some(version.to_string()),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            extension_style: ExtensionStyle::Combined,
            integers: integers.iter().copied().collect(),
            ..DriverSnapshot::default()
        };
        let settings = ContextSettings::default().with_error_check(policy);
        let mut ctx = Context::new(SnapshotDriver::new(snapshot), settings);
        ctx.initialize().unwrap();
        ctx.native().clear_calls();
        ctx
    }

    #[test]
    fn test_uninitialized_context_answers_false() {
        let ctx = Context::new(
            SnapshotDriver::new(DriverSnapshot::embedded_3_0()),
            ContextSettings::default(),
        );
        assert!(!ctx.has_capability(Capability::MultiSample));
        assert!(ctx.texture_format_capabilities(TextureFormat::Rgba8Unorm).is_empty());
        ctx.clear_depth(1.0);
        assert_eq!(ctx.slot_state(Slot::ClearDepth), SlotState::Unresolved);
        assert_eq!(ctx.call_count(), 0);
        assert_eq!(ctx.feature_limit(FeatureLimit::MaxTextureDimension1D2D), 0);
    }

    #[test]
    fn test_failed_probe_leaves_context_unavailable() {
        let snapshot = DriverSnapshot {
            make_current_succeeds: false,
            current: false,
            ..DriverSnapshot::embedded_3_0()
        };
        let mut ctx = Context::new(SnapshotDriver::new(snapshot), ContextSettings::default());
        assert!(matches!(ctx.initialize(), Err(ProbeError::MakeCurrent)));
        assert!(!ctx.is_available());
        assert!(!ctx.has_internal_capability(InternalCapability::VertexArrayObject));
    }

    #[test]
    fn test_absent_slot_is_a_no_op() {
        let ctx = context("OpenGL ES 2.0", &[]);
        assert_eq!(ctx.fence_sync(SYNC_GPU_COMMANDS_COMPLETE, 0), GlSync::NULL);
        assert_eq!(ctx.slot_state(Slot::FenceSync), SlotState::Absent);
        assert!(ctx.native().calls().is_empty());
        assert_eq!(ctx.call_count(), 0);
    }

    #[test]
    fn test_forwarded_calls_are_counted() {
        let ctx = context("OpenGL ES 3.0", &[]);
        ctx.bind_vertex_array(3);
        ctx.bind_vertex_array(0);
        assert_eq!(ctx.native().calls_to("glBindVertexArray"), 2);
        assert_eq!(ctx.call_count(), 2);
        ctx.reset_counters();
        assert_eq!(ctx.call_count(), 0);
    }

    #[test]
    fn test_error_is_recorded_under_log_policy() {
        let ctx = context("OpenGL ES 3.0", &[]);
        ctx.native().push_error(INVALID_OPERATION);
        ctx.bind_vertex_array(99);
        let err = ctx.last_error().unwrap();
        assert_eq!(err.code, INVALID_OPERATION);
        assert_eq!(err.call, "glBindVertexArray");
    }

    #[test]
    #[should_panic(expected = "GL_INVALID_VALUE")]
    fn test_abort_policy_panics() {
        let ctx = context_with("OpenGL ES 3.0", &[], &[], ErrorCheckPolicy::Abort);
        ctx.native().push_error(INVALID_VALUE);
        ctx.clear_depth(0.5);
    }

    #[test]
    fn test_disabled_policy_skips_error_queries() {
        let ctx = context_with("OpenGL ES 3.0", &[], &[], ErrorCheckPolicy::Disabled);
        let queries = ctx.native().error_queries();
        ctx.clear_depth(1.0);
        ctx.bind_vertex_array(1);
        assert_eq!(ctx.native().error_queries(), queries);
    }

    #[test]
    fn test_check_errors() {
        let ctx = context("OpenGL ES 3.0", &[]);
        assert!(ctx.check_errors().is_ok());
        ctx.native().push_error(OUT_OF_MEMORY);
        assert_eq!(ctx.check_errors().unwrap_err().code, OUT_OF_MEMORY);
        assert_eq!(ctx.last_error().map(|e| e.code), Some(OUT_OF_MEMORY));
    }

    #[test]
    fn test_samples_are_clamped() {
        let ctx = context_with(
            "OpenGL ES 2.0",
            &["GL_EXT_multisampled_render_to_texture"],
            &[(MAX_SAMPLES, 4)],
            ErrorCheckPolicy::Log,
        );
        ctx.framebuffer_texture_2d_multisample(FRAMEBUFFER, COLOR_ATTACHMENT0, TEXTURE_2D, 7, 0, 16);
        let call = ctx
            .native()
            .last_call("glFramebufferTexture2DMultisampleEXT")
            .unwrap();
        assert_eq!(call.args[5], 4);
    }

    #[test]
    fn test_img_samples_use_img_ceiling() {
        let ctx = context_with(
            "OpenGL ES 2.0",
            &["GL_IMG_multisampled_render_to_texture"],
            &[(MAX_SAMPLES, 8), (MAX_SAMPLES_IMG, 2)],
            ErrorCheckPolicy::Log,
        );
        ctx.framebuffer_texture_2d_multisample(FRAMEBUFFER, COLOR_ATTACHMENT0, TEXTURE_2D, 7, 0, 4);
        let call = ctx
            .native()
            .last_call("glFramebufferTexture2DMultisampleIMG")
            .unwrap();
        assert_eq!(call.args[5], 2);
    }

    #[test]
    fn test_draw_target_retried_with_framebuffer() {
        let ctx = context_with(
            "OpenGL ES 2.0",
            &["GL_EXT_multisampled_render_to_texture"],
            &[(MAX_SAMPLES, 4)],
            ErrorCheckPolicy::Log,
        );
        ctx.native().push_error(INVALID_ENUM);
        ctx.framebuffer_texture_2d_multisample(DRAW_FRAMEBUFFER, COLOR_ATTACHMENT0, TEXTURE_2D, 7, 0, 4);

        let calls = ctx.native().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].args[0], i64::from(DRAW_FRAMEBUFFER));
        assert_eq!(calls[1].args[0], i64::from(FRAMEBUFFER));
        assert!(ctx.last_error().is_none());
    }

    #[test]
    fn test_debug_groups_respect_stack_depth() {
        let ctx = context_with(
            "OpenGL ES 3.2",
            &[],
            &[(MAX_DEBUG_GROUP_STACK_DEPTH, 3)],
            ErrorCheckPolicy::Log,
        );
        for _ in 0..4 {
            ctx.push_debug_group(DEBUG_SOURCE_APPLICATION, 0, "pass");
        }
        assert_eq!(ctx.native().calls_to("glPushDebugGroup"), 2);
        assert_eq!(ctx.debug_group_depth(), 4);

        for _ in 0..5 {
            ctx.pop_debug_group();
        }
        assert_eq!(ctx.native().calls_to("glPopDebugGroup"), 2);
        assert_eq!(ctx.debug_group_depth(), 0);
    }

    #[test]
    fn test_debug_marker_is_unbounded() {
        let ctx = context("OpenGL ES 2.0", &["GL_EXT_debug_marker"]);
        for _ in 0..100 {
            ctx.push_debug_group(DEBUG_SOURCE_APPLICATION, 0, "marker");
        }
        assert_eq!(ctx.native().calls_to("glPushGroupMarkerEXT"), 100);
    }

    #[test]
    fn test_object_label_prefers_khr() {
        let ctx = context("OpenGL ES 2.0", &["GL_EXT_debug_label", "GL_KHR_debug"]);
        ctx.object_label(BUFFER, 5, "vertices");
        let call = ctx.native().last_call("glObjectLabelKHR").unwrap();
        assert_eq!(call.text.as_deref(), Some("vertices"));
    }

    #[test]
    fn test_initialize_enables_defaults() {
        let mut ctx = Context::new(
            SnapshotDriver::new(DriverSnapshot {
                family: ApiFamily::Desktop,
                version: Some("4.3.0 NVIDIA".to_string()),
                ..DriverSnapshot::default()
            }),
            ContextSettings {
                debug_output: true,
                ..ContextSettings::default()
            },
        );
        ctx.initialize().unwrap();
        assert!(ctx.native().is_enabled(TEXTURE_CUBE_MAP_SEAMLESS));
        assert!(ctx.native().is_enabled(DEBUG_OUTPUT));
    }

    #[test]
    fn test_deletes_run_directly_when_current() {
        let ctx = context("OpenGL ES 3.0", &[]);
        ctx.delete_buffers(&[1, 2]);
        ctx.delete_program(4);
        assert_eq!(ctx.native().calls_to("glDeleteBuffers"), 1);
        assert_eq!(ctx.native().calls_to("glDeleteProgram"), 1);
        assert!(ctx.deletion().is_empty());
    }

    #[test]
    fn test_deletes_queue_when_not_current() {
        let ctx = context("OpenGL ES 3.0", &[]);
        ctx.native().set_current(false);
        ctx.delete_textures(&[8, 9]);
        ctx.delete_shader(3);
        ctx.unbind_buffer(ARRAY_BUFFER);
        assert!(ctx.native().calls().is_empty());
        assert_eq!(ctx.deletion().pending(ObjectKind::Texture), 2);

        // a shared context being current is enough
        ctx.native().set_sharegroup_current(true);
        ctx.delete_textures(&[10]);
        assert_eq!(ctx.native().calls_to("glDeleteTextures"), 1);
    }

    #[test]
    fn test_guard_queues_direct_deletes() {
        let ctx = context("OpenGL ES 3.0", &[]);
        {
            let _guard = ctx.destruction_guard();
            ctx.delete_framebuffers(&[6]);
            assert_eq!(ctx.flush_deletion_queue(), 0);
        }
        assert_eq!(ctx.flush_deletion_queue(), 1);
        assert_eq!(ctx.native().calls_to("glDeleteFramebuffers"), 1);
    }

    #[test]
    fn test_flush_order() {
        let ctx = context("OpenGL ES 3.0", &[]);
        ctx.native().set_current(false);
        ctx.delete_textures(&[1]);
        ctx.delete_shader(2);
        ctx.delete_program(3);
        ctx.delete_vertex_arrays(&[4]);
        ctx.delete_renderbuffers(&[5]);
        ctx.delete_framebuffers(&[6]);
        ctx.unbind_buffer(ELEMENT_ARRAY_BUFFER);
        ctx.delete_buffers(&[7]);

        assert_eq!(ctx.flush_deletion_queue(), 0);
        ctx.native().set_current(true);
        assert_eq!(ctx.flush_deletion_queue(), 7);
        assert_eq!(
            ctx.native().symbols(),
            vec![
                "glDeleteBuffers",
                "glBindBuffer",
                "glDeleteFramebuffers",
                "glDeleteRenderbuffers",
                "glDeleteVertexArrays",
                "glDeleteProgram",
                "glDeleteShader",
                "glDeleteTextures",
            ]
        );
        assert!(ctx.deletion().is_empty());
    }

    #[test]
    fn test_feature_limits() {
        let ctx = context_with(
            "OpenGL ES 3.0",
            &[],
            &[(MAX_TEXTURE_SIZE, 8192), (MAX_UNIFORM_BLOCK_SIZE, 16384)],
            ErrorCheckPolicy::Log,
        );
        assert_eq!(ctx.feature_limit(FeatureLimit::MaxTextureDimension1D2D), 8192);
        assert_eq!(ctx.feature_limit(FeatureLimit::MaxUniformBufferBytes), 16384);
        assert_eq!(ctx.feature_limit(FeatureLimit::MaxStorageBufferBytes), 0);
    }
}
