//! Recorded driver snapshots
//!
//! A [`DriverSnapshot`] captures what a real driver reported: its version,
//! strings, extensions and integer limits. [`SnapshotDriver`] replays one as
//! a [`NativeGl`], records every call it receives and never touches a GPU.
//! It backs the report binary and the tests.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::ffi::c_void;
use std::path::Path;

use glcaps_core::ApiFamily;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::dispatch::EntryPoint;
use crate::error::SnapshotError;
use crate::gl_enums::*;
use crate::native::{DebugCallback, GlSync, NativeGl};

/// How the driver exposes its extension list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExtensionStyle {
    /// One space separated `GL_EXTENSIONS` string.
    #[default]
    Combined,
    /// `GL_NUM_EXTENSIONS` names read with `glGetStringi`.
    Indexed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverSnapshot {
    pub family: ApiFamily,
    pub version: Option<String>,
    pub vendor: String,
    pub renderer: String,
    pub extensions: Vec<String>,
    pub extension_style: ExtensionStyle,
    /// Answers for `glGetIntegerv`. Unlisted names read as zero.
    pub integers: BTreeMap<GLenum, GLint>,
    /// Whether the context starts out current on the calling thread.
    pub current: bool,
    pub sharegroup_current: bool,
    pub make_current_succeeds: bool,
    /// Codes returned by successive `glGetError` calls before `GL_NO_ERROR`.
    pub errors: Vec<GLenum>,
}

impl Default for DriverSnapshot {
    fn default() -> Self {
        Self {
            family: ApiFamily::Embedded,
            version: None,
            vendor: String::new(),
            renderer: String::new(),
            extensions: Vec::new(),
            extension_style: ExtensionStyle::Combined,
            integers: BTreeMap::new(),
            current: true,
            sharegroup_current: false,
            make_current_succeeds: true,
            errors: Vec::new(),
        }
    }
}

impl DriverSnapshot {
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// A typical mobile GL ES 3.0 driver.
    pub fn embedded_3_0() -> Self {
        let integers = [
            (MAX_TEXTURE_SIZE, 4096),
            (MAX_CUBE_MAP_TEXTURE_SIZE, 4096),
            (MAX_SAMPLES, 4),
            (MAX_VERTEX_UNIFORM_COMPONENTS, 1024),
            (MAX_VERTEX_UNIFORM_VECTORS, 256),
            (MAX_FRAGMENT_UNIFORM_COMPONENTS, 896),
            (MAX_FRAGMENT_UNIFORM_VECTORS, 224),
            (MAX_UNIFORM_BLOCK_SIZE, 16384),
            (SHADER_STORAGE_BUFFER_OFFSET_ALIGNMENT, 256),
            (MAX_DEBUG_GROUP_STACK_DEPTH, 64),
        ];
        let extensions = [
            "GL_EXT_color_buffer_half_float",
            "GL_EXT_debug_marker",
            "GL_EXT_multisampled_render_to_texture",
            "GL_EXT_texture_filter_anisotropic",
            "GL_KHR_debug",
            "GL_KHR_texture_compression_astc_ldr",
            "GL_OES_EGL_image_external",
            "GL_OES_texture_float_linear",
        ];
        Self {
            family: ApiFamily::Embedded,
            version: Some("OpenGL ES 3.0 snapshot".to_string()),
            vendor: "glcaps".to_string(),
            renderer: "snapshot renderer".to_string(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            extension_style: ExtensionStyle::Indexed,
            integers: integers.into_iter().collect(),
            ..Self::default()
        }
    }
}

/// One native call received by a [`SnapshotDriver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub symbol: &'static str,
    pub args: Vec<i64>,
    pub text: Option<String>,
}

#[derive(Debug, Default)]
struct DriverState {
    calls: Vec<Call>,
    errors: VecDeque<GLenum>,
    current: bool,
    sharegroup_current: bool,
    enabled: BTreeSet<GLenum>,
    next_name: GLuint,
    error_queries: usize,
}

/// [`NativeGl`] that answers from a [`DriverSnapshot`] and records calls.
#[derive(Debug)]
pub struct SnapshotDriver {
    snapshot: DriverSnapshot,
    state: Mutex<DriverState>,
}

macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        vec![$($arg as i64),*]
    };
}

impl SnapshotDriver {
    pub fn new(snapshot: DriverSnapshot) -> Self {
        let state = DriverState {
            errors: snapshot.errors.iter().copied().collect(),
            current: snapshot.current,
            sharegroup_current: snapshot.sharegroup_current,
            next_name: 1,
            ..DriverState::default()
        };
        Self {
            snapshot,
            state: Mutex::new(state),
        }
    }

    pub fn snapshot(&self) -> &DriverSnapshot {
        &self.snapshot
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    /// Symbols of every recorded call, in order.
    pub fn symbols(&self) -> Vec<&'static str> {
        self.state.lock().calls.iter().map(|c| c.symbol).collect()
    }

    pub fn calls_to(&self, symbol: &str) -> usize {
        self.state.lock().calls.iter().filter(|c| c.symbol == symbol).count()
    }

    pub fn last_call(&self, symbol: &str) -> Option<Call> {
        self.state
            .lock()
            .calls
            .iter()
            .rev()
            .find(|c| c.symbol == symbol)
            .cloned()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    pub fn set_current(&self, current: bool) {
        self.state.lock().current = current;
    }

    pub fn set_sharegroup_current(&self, current: bool) {
        self.state.lock().sharegroup_current = current;
    }

    /// Queue an error for the next `glGetError`.
    pub fn push_error(&self, code: GLenum) {
        self.state.lock().errors.push_back(code);
    }

    pub fn is_enabled(&self, cap: GLenum) -> bool {
        self.state.lock().enabled.contains(&cap)
    }

    pub fn error_queries(&self) -> usize {
        self.state.lock().error_queries
    }

    fn record(&self, symbol: &'static str, args: Vec<i64>) {
        self.record_text(symbol, args, None);
    }

    fn record_text(&self, symbol: &'static str, args: Vec<i64>, text: Option<&str>) {
        self.state.lock().calls.push(Call {
            symbol,
            args,
            text: text.map(str::to_owned),
        });
    }

    fn record_handles(&self, symbol: &'static str, handles: &[GLuint]) {
        self.record(symbol, handles.iter().map(|&h| i64::from(h)).collect());
    }
}

impl NativeGl for SnapshotDriver {
    fn api_family(&self) -> ApiFamily {
        self.snapshot.family
    }

    fn make_current(&self) -> bool {
        let mut state = self.state.lock();
        if self.snapshot.make_current_succeeds {
            state.current = true;
        }
        self.snapshot.make_current_succeeds
    }

    fn is_current(&self) -> bool {
        self.state.lock().current
    }

    fn is_current_sharegroup(&self) -> bool {
        self.state.lock().sharegroup_current
    }

    fn get_string(&self, name: GLenum) -> Option<String> {
        match name {
            VERSION => self.snapshot.version.clone(),
            VENDOR => Some(self.snapshot.vendor.clone()),
            RENDERER => Some(self.snapshot.renderer.clone()),
            EXTENSIONS => match self.snapshot.extension_style {
                ExtensionStyle::Combined => Some(self.snapshot.extensions.join(" ")),
                ExtensionStyle::Indexed => None,
            },
            _ => None,
        }
    }

    fn get_string_i(&self, name: GLenum, index: GLuint) -> Option<String> {
        self.record("glGetStringi", args![name, index]);
        match (name, self.snapshot.extension_style) {
            (EXTENSIONS, ExtensionStyle::Indexed) => self.snapshot.extensions.get(index as usize).cloned(),
            _ => None,
        }
    }

    fn get_integer(&self, pname: GLenum) -> GLint {
        match (pname, self.snapshot.extension_style) {
            (NUM_EXTENSIONS, ExtensionStyle::Indexed) => {
                GLint::try_from(self.snapshot.extensions.len()).unwrap_or(GLint::MAX)
            }
            (NUM_EXTENSIONS, ExtensionStyle::Combined) => 0,
            _ => self.snapshot.integers.get(&pname).copied().unwrap_or(0),
        }
    }

    fn get_error(&self) -> GLenum {
        let mut state = self.state.lock();
        state.error_queries += 1;
        state.errors.pop_front().unwrap_or(NO_ERROR)
    }

    fn enable(&self, cap: GLenum) {
        self.record("glEnable", args![cap]);
        self.state.lock().enabled.insert(cap);
    }

    fn bind_buffer(&self, target: GLenum, buffer: GLuint) {
        self.record("glBindBuffer", args![target, buffer]);
    }

    fn delete_buffers(&self, buffers: &[GLuint]) {
        self.record_handles("glDeleteBuffers", buffers);
    }

    fn delete_framebuffers(&self, framebuffers: &[GLuint]) {
        self.record_handles("glDeleteFramebuffers", framebuffers);
    }

    fn delete_renderbuffers(&self, renderbuffers: &[GLuint]) {
        self.record_handles("glDeleteRenderbuffers", renderbuffers);
    }

    fn delete_textures(&self, textures: &[GLuint]) {
        self.record_handles("glDeleteTextures", textures);
    }

    fn delete_program(&self, program: GLuint) {
        self.record("glDeleteProgram", args![program]);
    }

    fn delete_shader(&self, shader: GLuint) {
        self.record("glDeleteShader", args![shader]);
    }

    fn bind_vertex_array(&self, entry: EntryPoint, array: GLuint) {
        self.record(entry.symbol(), args![array]);
    }

    fn gen_vertex_arrays(&self, entry: EntryPoint, arrays: &mut [GLuint]) {
        {
            let mut state = self.state.lock();
            for slot in arrays.iter_mut() {
                *slot = state.next_name;
                state.next_name += 1;
            }
        }
        self.record_handles(entry.symbol(), arrays);
    }

    fn delete_vertex_arrays(&self, entry: EntryPoint, arrays: &[GLuint]) {
        self.record_handles(entry.symbol(), arrays);
    }

    fn blit_framebuffer(
        &self,
        entry: EntryPoint,
        src: [GLint; 4],
        dst: [GLint; 4],
        mask: GLbitfield,
        filter: GLenum,
    ) {
        let mut args: Vec<i64> = src.iter().chain(dst.iter()).map(|&v| i64::from(v)).collect();
        args.extend(args![mask, filter]);
        self.record(entry.symbol(), args);
    }

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
    ) {
        self.record(
            entry.symbol(),
            args![unit, texture, level, layered, layer, access, format],
        );
    }

    fn memory_barrier(&self, entry: EntryPoint, barriers: GLbitfield) {
        self.record(entry.symbol(), args![barriers]);
    }

    fn fence_sync(&self, entry: EntryPoint, condition: GLenum, flags: GLbitfield) -> GlSync {
        self.record(entry.symbol(), args![condition, flags]);
        let mut state = self.state.lock();
        let sync = GlSync(state.next_name as usize);
        state.next_name += 1;
        sync
    }

    fn delete_sync(&self, entry: EntryPoint, sync: GlSync) {
        self.record(entry.symbol(), args![sync.0]);
    }

    fn get_sync_iv(&self, entry: EntryPoint, sync: GlSync, pname: GLenum, values: &mut [GLint]) -> GLsizei {
        self.record(entry.symbol(), args![sync.0, pname]);
        values.iter_mut().for_each(|v| *v = 0);
        0
    }

    fn tex_storage_1d(&self, entry: EntryPoint, target: GLenum, levels: GLsizei, format: GLenum, width: GLsizei) {
        self.record(entry.symbol(), args![target, levels, format, width]);
    }

    fn tex_storage_2d(
        &self,
        entry: EntryPoint,
        target: GLenum,
        levels: GLsizei,
        format: GLenum,
        width: GLsizei,
        height: GLsizei,
    ) {
        self.record(entry.symbol(), args![target, levels, format, width, height]);
    }

    fn tex_storage_3d(
        &self,
        entry: EntryPoint,
        target: GLenum,
        levels: GLsizei,
        format: GLenum,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
    ) {
        self.record(entry.symbol(), args![target, levels, format, width, height, depth]);
    }

    fn map_buffer(&self, entry: EntryPoint, target: GLenum, access: GLenum) -> *mut c_void {
        self.record(entry.symbol(), args![target, access]);
        std::ptr::null_mut()
    }

    fn map_buffer_range(
        &self,
        entry: EntryPoint,
        target: GLenum,
        offset: isize,
        length: isize,
        access: GLbitfield,
    ) -> *mut c_void {
        self.record(entry.symbol(), args![target, offset, length, access]);
        std::ptr::null_mut()
    }

    fn unmap_buffer(&self, entry: EntryPoint, target: GLenum) -> bool {
        self.record(entry.symbol(), args![target]);
        true
    }

    fn vertex_attrib_divisor(&self, entry: EntryPoint, index: GLuint, divisor: GLuint) {
        self.record(entry.symbol(), args![index, divisor]);
    }

    fn draw_buffers(&self, entry: EntryPoint, buffers: &[GLenum]) {
        self.record_handles(entry.symbol(), buffers);
    }

    fn object_label(&self, entry: EntryPoint, identifier: GLenum, name: GLuint, label: &str) {
        self.record_text(entry.symbol(), args![identifier, name], Some(label));
    }

    fn push_debug_group(&self, entry: EntryPoint, source: GLenum, id: GLuint, message: &str) {
        self.record_text(entry.symbol(), args![source, id], Some(message));
    }

    fn pop_debug_group(&self, entry: EntryPoint) {
        self.record(entry.symbol(), Vec::new());
    }

    fn debug_message_insert(
        &self,
        entry: EntryPoint,
        source: GLenum,
        kind: GLenum,
        id: GLuint,
        severity: GLenum,
        message: &str,
    ) {
        self.record_text(entry.symbol(), args![source, kind, id, severity], Some(message));
    }

    fn debug_message_callback(&self, entry: EntryPoint, _callback: DebugCallback) {
        self.record(entry.symbol(), Vec::new());
    }

    fn invalidate_framebuffer(&self, entry: EntryPoint, target: GLenum, attachments: &[GLenum]) {
        let mut args = args![target];
        args.extend(attachments.iter().map(|&a| i64::from(a)));
        self.record(entry.symbol(), args);
    }

    fn clear_depth(&self, entry: EntryPoint, depth: f32) {
        // recorded in thousandths
        self.record(entry.symbol(), args![(depth * 1000.0).round()]);
    }

    fn framebuffer_texture_2d_multisample(
        &self,
        entry: EntryPoint,
        target: GLenum,
        attachment: GLenum,
        textarget: GLenum,
        texture: GLuint,
        level: GLint,
        samples: GLsizei,
    ) {
        self.record(
            entry.symbol(),
            args![target, attachment, textarget, texture, level, samples],
        );
    }

    fn renderbuffer_storage_multisample(
        &self,
        entry: EntryPoint,
        target: GLenum,
        samples: GLsizei,
        format: GLenum,
        width: GLsizei,
        height: GLsizei,
    ) {
        self.record(entry.symbol(), args![target, samples, format, width, height]);
    }

    fn get_texture_handle(&self, entry: EntryPoint, texture: GLuint) -> GLuint64 {
        self.record(entry.symbol(), args![texture]);
        (1u64 << 32) | u64::from(texture)
    }

    fn make_texture_handle_resident(&self, entry: EntryPoint, handle: GLuint64) {
        self.record(entry.symbol(), args![handle]);
    }

    fn make_texture_handle_non_resident(&self, entry: EntryPoint, handle: GLuint64) {
        self.record(entry.symbol(), args![handle]);
    }

    fn polygon_mode(&self, entry: EntryPoint, face: GLenum, mode: GLenum) {
        self.record(entry.symbol(), args![face, mode]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_json_roundtrip_keeps_integers() {
        let snapshot = DriverSnapshot::embedded_3_0();
        let json = snapshot.to_json().unwrap();
        let restored = DriverSnapshot::from_json(&json).unwrap();
        assert_eq!(restored, snapshot);
        assert_eq!(restored.integers.get(&MAX_SAMPLES), Some(&4));
    }

    #[test]
    fn test_sparse_json_uses_defaults() {
        let snapshot = DriverSnapshot::from_json(r#"{ "family": "Desktop", "version": "4.1 Metal" }"#).unwrap();
        assert_eq!(snapshot.family, ApiFamily::Desktop);
        assert!(snapshot.make_current_succeeds);
        assert!(snapshot.current);
        assert!(snapshot.extensions.is_empty());
    }

    #[test]
    fn test_errors_drain_in_order() {
        let driver = SnapshotDriver::new(DriverSnapshot {
            errors: vec![INVALID_ENUM, INVALID_VALUE],
            ..DriverSnapshot::default()
        });
        assert_eq!(driver.get_error(), INVALID_ENUM);
        assert_eq!(driver.get_error(), INVALID_VALUE);
        assert_eq!(driver.get_error(), NO_ERROR);
        assert_eq!(driver.error_queries(), 3);
    }

    #[test]
    fn test_extension_styles() {
        let mut snapshot = DriverSnapshot::embedded_3_0();
        let driver = SnapshotDriver::new(snapshot.clone());
        assert_eq!(driver.get_string(EXTENSIONS), None);
        assert_eq!(driver.get_integer(NUM_EXTENSIONS), snapshot.extensions.len() as GLint);

        snapshot.extension_style = ExtensionStyle::Combined;
        let driver = SnapshotDriver::new(snapshot);
        assert!(driver.get_string(EXTENSIONS).unwrap().contains("GL_KHR_debug"));
        assert_eq!(driver.get_integer(NUM_EXTENSIONS), 0);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = DriverSnapshot::load("/nonexistent/driver.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/driver.json"));
    }
}
