//! Dispatch resolution
//!
//! Every logical operation with more than one native spelling owns a [`Slot`].
//! A slot carries an ordered list of guarded [`Candidate`]s. The first call
//! through a slot walks the list top to bottom and binds the first candidate
//! whose guards all hold; when none do the slot becomes absent and calls
//! through it are dropped. Either way the outcome is final for the lifetime of
//! the table.
//!
//! Order matters: core entry points come before suffixed fallbacks and the
//! vendor order below is the order drivers are trusted in. Do not reorder.

use std::sync::atomic::{AtomicU16, Ordering};

use glcaps_core::{
    define_keys, Capability, CapabilityMatrix, Extension, InternalCapability, InternalRequirement,
};
use tracing::{debug, warn};

define_keys! {
    /// Concrete native entry points a slot can bind to.
    pub enum EntryPoint {
        BindVertexArray,
        BindVertexArrayOes,
        GenVertexArrays,
        GenVertexArraysOes,
        DeleteVertexArrays,
        DeleteVertexArraysOes,
        BlitFramebuffer,
        BlitFramebufferExt,
        BindImageTexture,
        BindImageTextureExt,
        MemoryBarrier,
        MemoryBarrierExt,
        FenceSync,
        FenceSyncApple,
        DeleteSync,
        DeleteSyncApple,
        GetSynciv,
        GetSyncivApple,
        TexStorage1D,
        TexStorage1DExt,
        TexStorage2D,
        TexStorage2DExt,
        TexStorage3D,
        TexStorage3DExt,
        MapBuffer,
        MapBufferOes,
        MapBufferRange,
        MapBufferRangeExt,
        UnmapBuffer,
        UnmapBufferOes,
        VertexAttribDivisor,
        VertexAttribDivisorNv,
        DrawBuffers,
        DrawBuffersExt,
        ObjectLabel,
        ObjectLabelKhr,
        LabelObjectExt,
        PushDebugGroup,
        PushDebugGroupKhr,
        PushGroupMarkerExt,
        PopDebugGroup,
        PopDebugGroupKhr,
        PopGroupMarkerExt,
        DebugMessageInsert,
        DebugMessageInsertKhr,
        InsertEventMarkerExt,
        DebugMessageCallback,
        DebugMessageCallbackKhr,
        InvalidateFramebuffer,
        DiscardFramebufferExt,
        ClearDepthf,
        ClearDepth,
        FramebufferTexture2DMultisampleExt,
        FramebufferTexture2DMultisampleImg,
        RenderbufferStorageMultisample,
        RenderbufferStorageMultisampleExt,
        RenderbufferStorageMultisampleImg,
        RenderbufferStorageMultisampleApple,
        GetTextureHandleArb,
        GetTextureHandleNv,
        MakeTextureHandleResidentArb,
        MakeTextureHandleResidentNv,
        MakeTextureHandleNonResidentArb,
        MakeTextureHandleNonResidentNv,
        PolygonMode,
    }
}

impl EntryPoint {
    /// Exported symbol name of the entry point.
    pub const fn symbol(self) -> &'static str {
        use EntryPoint::*;
        match self {
            BindVertexArray => "glBindVertexArray",
            BindVertexArrayOes => "glBindVertexArrayOES",
            GenVertexArrays => "glGenVertexArrays",
            GenVertexArraysOes => "glGenVertexArraysOES",
            DeleteVertexArrays => "glDeleteVertexArrays",
            DeleteVertexArraysOes => "glDeleteVertexArraysOES",
            BlitFramebuffer => "glBlitFramebuffer",
            BlitFramebufferExt => "glBlitFramebufferEXT",
            BindImageTexture => "glBindImageTexture",
            BindImageTextureExt => "glBindImageTextureEXT",
            MemoryBarrier => "glMemoryBarrier",
            MemoryBarrierExt => "glMemoryBarrierEXT",
            FenceSync => "glFenceSync",
            FenceSyncApple => "glFenceSyncAPPLE",
            DeleteSync => "glDeleteSync",
            DeleteSyncApple => "glDeleteSyncAPPLE",
            GetSynciv => "glGetSynciv",
            GetSyncivApple => "glGetSyncivAPPLE",
            TexStorage1D => "glTexStorage1D",
            TexStorage1DExt => "glTexStorage1DEXT",
            TexStorage2D => "glTexStorage2D",
            TexStorage2DExt => "glTexStorage2DEXT",
            TexStorage3D => "glTexStorage3D",
            TexStorage3DExt => "glTexStorage3DEXT",
            MapBuffer => "glMapBuffer",
            MapBufferOes => "glMapBufferOES",
            MapBufferRange => "glMapBufferRange",
            MapBufferRangeExt => "glMapBufferRangeEXT",
            UnmapBuffer => "glUnmapBuffer",
            UnmapBufferOes => "glUnmapBufferOES",
            VertexAttribDivisor => "glVertexAttribDivisor",
            VertexAttribDivisorNv => "glVertexAttribDivisorNV",
            DrawBuffers => "glDrawBuffers",
            DrawBuffersExt => "glDrawBuffersEXT",
            ObjectLabel => "glObjectLabel",
            ObjectLabelKhr => "glObjectLabelKHR",
            LabelObjectExt => "glLabelObjectEXT",
            PushDebugGroup => "glPushDebugGroup",
            PushDebugGroupKhr => "glPushDebugGroupKHR",
            PushGroupMarkerExt => "glPushGroupMarkerEXT",
            PopDebugGroup => "glPopDebugGroup",
            PopDebugGroupKhr => "glPopDebugGroupKHR",
            PopGroupMarkerExt => "glPopGroupMarkerEXT",
            DebugMessageInsert => "glDebugMessageInsert",
            DebugMessageInsertKhr => "glDebugMessageInsertKHR",
            InsertEventMarkerExt => "glInsertEventMarkerEXT",
            DebugMessageCallback => "glDebugMessageCallback",
            DebugMessageCallbackKhr => "glDebugMessageCallbackKHR",
            InvalidateFramebuffer => "glInvalidateFramebuffer",
            DiscardFramebufferExt => "glDiscardFramebufferEXT",
            ClearDepthf => "glClearDepthf",
            ClearDepth => "glClearDepth",
            FramebufferTexture2DMultisampleExt => "glFramebufferTexture2DMultisampleEXT",
            FramebufferTexture2DMultisampleImg => "glFramebufferTexture2DMultisampleIMG",
            RenderbufferStorageMultisample => "glRenderbufferStorageMultisample",
            RenderbufferStorageMultisampleExt => "glRenderbufferStorageMultisampleEXT",
            RenderbufferStorageMultisampleImg => "glRenderbufferStorageMultisampleIMG",
            RenderbufferStorageMultisampleApple => "glRenderbufferStorageMultisampleAPPLE",
            GetTextureHandleArb => "glGetTextureHandleARB",
            GetTextureHandleNv => "glGetTextureHandleNV",
            MakeTextureHandleResidentArb => "glMakeTextureHandleResidentARB",
            MakeTextureHandleResidentNv => "glMakeTextureHandleResidentNV",
            MakeTextureHandleNonResidentArb => "glMakeTextureHandleNonResidentARB",
            MakeTextureHandleNonResidentNv => "glMakeTextureHandleNonResidentNV",
            PolygonMode => "glPolygonMode",
        }
    }
}

/// One condition of a candidate. A candidate binds when all of its guards hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Capability(Capability),
    Internal(InternalCapability),
    Requires(InternalRequirement),
    NotRequires(InternalRequirement),
    Extension(Extension),
    AnyExtension(&'static [Extension]),
}

impl Guard {
    pub fn holds(&self, matrix: &CapabilityMatrix) -> bool {
        match *self {
            Guard::Capability(key) => matrix.has_capability(key),
            Guard::Internal(key) => matrix.has_internal_capability(key),
            Guard::Requires(key) => matrix.has_internal_requirement(key),
            Guard::NotRequires(key) => !matrix.has_internal_requirement(key),
            Guard::Extension(key) => matrix.has_extension(key),
            Guard::AnyExtension(keys) => keys.iter().any(|key| matrix.has_extension(*key)),
        }
    }
}

/// An entry point together with the guards that must hold to bind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub entry: EntryPoint,
    pub guards: &'static [Guard],
}

impl Candidate {
    const fn new(entry: EntryPoint, guards: &'static [Guard]) -> Self {
        Self { entry, guards }
    }

    pub fn admitted(&self, matrix: &CapabilityMatrix) -> bool {
        self.guards.iter().all(|guard| guard.holds(matrix))
    }
}

define_keys! {
    /// Logical operations resolved through the dispatch table.
    pub enum Slot {
        BindVertexArray,
        GenVertexArrays,
        DeleteVertexArrays,
        BlitFramebuffer,
        BindImageTexture,
        MemoryBarrier,
        FenceSync,
        DeleteSync,
        GetSynciv,
        TexStorage1D,
        TexStorage2D,
        TexStorage3D,
        MapBuffer,
        MapBufferRange,
        UnmapBuffer,
        VertexAttribDivisor,
        DrawBuffers,
        ObjectLabel,
        PushDebugGroup,
        PopDebugGroup,
        DebugMessageInsert,
        DebugMessageCallback,
        InvalidateFramebuffer,
        ClearDepth,
        FramebufferTexture2DMultisample,
        RenderbufferStorageMultisample,
        GetTextureHandle,
        MakeTextureHandleResident,
        MakeTextureHandleNonResident,
        PolygonFillMode,
    }
}

// ============================================================================
// Candidate tables
// ============================================================================

use EntryPoint as E;
use Extension as X;
use Guard::{AnyExtension, Extension as Ext, Internal, NotRequires, Requires};
use InternalCapability as I;
use InternalRequirement as R;

/// Core entry point unless the suffixed one is required, suffixed one when
/// required and its extension is present.
macro_rules! core_or_suffixed {
    ($name:ident: $core:ident / $suffixed:ident, $cap:expr, $req:ident, $ext:ident) => {
        const $name: &[Candidate] = &[
            Candidate::new(E::$core, &[NotRequires(R::$req), $cap]),
            Candidate::new(E::$suffixed, &[Requires(R::$req), Ext(X::$ext)]),
        ];
    };
}

core_or_suffixed!(BIND_VERTEX_ARRAY: BindVertexArray / BindVertexArrayOes,
    Internal(I::VertexArrayObject), VertexArrayObjectExtReq, VertexArrayObject);
core_or_suffixed!(GEN_VERTEX_ARRAYS: GenVertexArrays / GenVertexArraysOes,
    Internal(I::VertexArrayObject), VertexArrayObjectExtReq, VertexArrayObject);
core_or_suffixed!(DELETE_VERTEX_ARRAYS: DeleteVertexArrays / DeleteVertexArraysOes,
    Internal(I::VertexArrayObject), VertexArrayObjectExtReq, VertexArrayObject);
core_or_suffixed!(BLIT_FRAMEBUFFER: BlitFramebuffer / BlitFramebufferExt,
    Internal(I::FramebufferBlit), FramebufferBlitExtReq, FramebufferBlit);
core_or_suffixed!(BIND_IMAGE_TEXTURE: BindImageTexture / BindImageTextureExt,
    Internal(I::ShaderImageLoadStore), ShaderImageLoadStoreExtReq, ShaderImageLoadStore);
core_or_suffixed!(MEMORY_BARRIER: MemoryBarrier / MemoryBarrierExt,
    Internal(I::ShaderImageLoadStore), ShaderImageLoadStoreExtReq, ShaderImageLoadStore);
core_or_suffixed!(FENCE_SYNC: FenceSync / FenceSyncApple,
    Internal(I::Sync), SyncExtReq, Sync);
core_or_suffixed!(DELETE_SYNC: DeleteSync / DeleteSyncApple,
    Internal(I::Sync), SyncExtReq, Sync);
core_or_suffixed!(GET_SYNCIV: GetSynciv / GetSyncivApple,
    Internal(I::Sync), SyncExtReq, Sync);
core_or_suffixed!(TEX_STORAGE_1D: TexStorage1D / TexStorage1DExt,
    Internal(I::TexStorage), TexStorageExtReq, TexStorage);
core_or_suffixed!(TEX_STORAGE_2D: TexStorage2D / TexStorage2DExt,
    Internal(I::TexStorage), TexStorageExtReq, TexStorage);
core_or_suffixed!(TEX_STORAGE_3D: TexStorage3D / TexStorage3DExt,
    Internal(I::TexStorage), TexStorageExtReq, TexStorage);
core_or_suffixed!(MAP_BUFFER: MapBuffer / MapBufferOes,
    Internal(I::MapBuffer), MapBufferExtReq, MapBuffer);
core_or_suffixed!(MAP_BUFFER_RANGE: MapBufferRange / MapBufferRangeExt,
    Guard::Capability(Capability::MapBufferRange), MapBufferRangeExtReq, MapBufferRange);
core_or_suffixed!(VERTEX_ATTRIB_DIVISOR: VertexAttribDivisor / VertexAttribDivisorNv,
    Internal(I::VertexAttribDivisor), VertexAttribDivisorExtReq, VertexAttribDivisor);
core_or_suffixed!(INVALIDATE_FRAMEBUFFER: InvalidateFramebuffer / DiscardFramebufferExt,
    Internal(I::InvalidateFramebuffer), InvalidateFramebufferExtReq, DiscardFramebuffer);

const UNMAP_BUFFER: &[Candidate] = &[
    Candidate::new(E::UnmapBuffer, &[NotRequires(R::UnmapBufferExtReq), Internal(I::UnmapBuffer)]),
    Candidate::new(
        E::UnmapBufferOes,
        &[
            Requires(R::UnmapBufferExtReq),
            AnyExtension(&[X::MapBuffer, X::MapBufferRange]),
        ],
    ),
];

const MRT: Guard = Guard::Capability(Capability::MultipleRenderTargets);

const DRAW_BUFFERS: &[Candidate] = &[
    Candidate::new(E::DrawBuffers, &[MRT, NotRequires(R::DrawBuffersExtReq)]),
    Candidate::new(E::DrawBuffersExt, &[MRT, Requires(R::DrawBuffersExtReq), Ext(X::DrawBuffers)]),
];

const OBJECT_LABEL: &[Candidate] = &[
    Candidate::new(E::ObjectLabel, &[NotRequires(R::DebugLabelExtReq), Internal(I::DebugLabel)]),
    Candidate::new(E::ObjectLabelKhr, &[Requires(R::DebugLabelExtReq), Ext(X::Debug)]),
    Candidate::new(E::LabelObjectExt, &[Requires(R::DebugLabelExtReq), Ext(X::DebugLabel)]),
];

/// Core, then `GL_KHR_debug`, then the `GL_EXT_debug_marker` spelling.
macro_rules! debug_message {
    ($name:ident: $core:ident / $khr:ident / $marker:ident) => {
        const $name: &[Candidate] = &[
            Candidate::new(
                E::$core,
                &[Internal(I::DebugMessage), NotRequires(R::DebugMessageExtReq)],
            ),
            Candidate::new(
                E::$khr,
                &[Internal(I::DebugMessage), Requires(R::DebugMessageExtReq), Ext(X::Debug)],
            ),
            Candidate::new(
                E::$marker,
                &[Internal(I::DebugMessage), Requires(R::DebugMessageExtReq), Ext(X::DebugMarker)],
            ),
        ];
    };
}

debug_message!(PUSH_DEBUG_GROUP: PushDebugGroup / PushDebugGroupKhr / PushGroupMarkerExt);
debug_message!(POP_DEBUG_GROUP: PopDebugGroup / PopDebugGroupKhr / PopGroupMarkerExt);
debug_message!(DEBUG_MESSAGE_INSERT: DebugMessageInsert / DebugMessageInsertKhr / InsertEventMarkerExt);

const DEBUG_MESSAGE_CALLBACK: &[Candidate] = &[
    Candidate::new(
        E::DebugMessageCallback,
        &[Internal(I::DebugMessageCallback), NotRequires(R::DebugMessageCallbackExtReq)],
    ),
    Candidate::new(
        E::DebugMessageCallbackKhr,
        &[
            Internal(I::DebugMessageCallback),
            Requires(R::DebugMessageCallbackExtReq),
            Ext(X::Debug),
        ],
    ),
];

const CLEAR_DEPTH: &[Candidate] = &[
    Candidate::new(E::ClearDepthf, &[Internal(I::ClearDepthf)]),
    Candidate::new(E::ClearDepth, &[]),
];

const FRAMEBUFFER_TEXTURE_2D_MULTISAMPLE: &[Candidate] = &[
    Candidate::new(E::FramebufferTexture2DMultisampleExt, &[Ext(X::MultiSampleExt)]),
    Candidate::new(E::FramebufferTexture2DMultisampleImg, &[Ext(X::MultiSampleImg)]),
];

const MULTISAMPLE: Guard = Guard::Capability(Capability::MultiSample);

const RENDERBUFFER_STORAGE_MULTISAMPLE: &[Candidate] = &[
    Candidate::new(
        E::RenderbufferStorageMultisample,
        &[MULTISAMPLE, NotRequires(R::MultiSampleExtReq)],
    ),
    Candidate::new(
        E::RenderbufferStorageMultisampleExt,
        &[MULTISAMPLE, Requires(R::MultiSampleExtReq), Ext(X::MultiSampleExt)],
    ),
    Candidate::new(
        E::RenderbufferStorageMultisampleImg,
        &[MULTISAMPLE, Requires(R::MultiSampleExtReq), Ext(X::MultiSampleImg)],
    ),
    Candidate::new(
        E::RenderbufferStorageMultisampleApple,
        &[MULTISAMPLE, Requires(R::MultiSampleExtReq), Ext(X::MultiSampleApple)],
    ),
];

const GET_TEXTURE_HANDLE: &[Candidate] = &[
    Candidate::new(E::GetTextureHandleArb, &[Ext(X::BindlessTextureArb)]),
    Candidate::new(E::GetTextureHandleNv, &[Ext(X::BindlessTextureNv)]),
];

const MAKE_TEXTURE_HANDLE_RESIDENT: &[Candidate] = &[
    Candidate::new(E::MakeTextureHandleResidentArb, &[Ext(X::BindlessTextureArb)]),
    Candidate::new(E::MakeTextureHandleResidentNv, &[Ext(X::BindlessTextureNv)]),
];

const MAKE_TEXTURE_HANDLE_NON_RESIDENT: &[Candidate] = &[
    Candidate::new(E::MakeTextureHandleNonResidentArb, &[Ext(X::BindlessTextureArb)]),
    Candidate::new(E::MakeTextureHandleNonResidentNv, &[Ext(X::BindlessTextureNv)]),
];

const POLYGON_FILL_MODE: &[Candidate] = &[Candidate::new(E::PolygonMode, &[Internal(I::PolygonFillMode)])];

impl Slot {
    /// Ordered candidates; the first admitted one wins.
    pub fn candidates(self) -> &'static [Candidate] {
        match self {
            Slot::BindVertexArray => BIND_VERTEX_ARRAY,
            Slot::GenVertexArrays => GEN_VERTEX_ARRAYS,
            Slot::DeleteVertexArrays => DELETE_VERTEX_ARRAYS,
            Slot::BlitFramebuffer => BLIT_FRAMEBUFFER,
            Slot::BindImageTexture => BIND_IMAGE_TEXTURE,
            Slot::MemoryBarrier => MEMORY_BARRIER,
            Slot::FenceSync => FENCE_SYNC,
            Slot::DeleteSync => DELETE_SYNC,
            Slot::GetSynciv => GET_SYNCIV,
            Slot::TexStorage1D => TEX_STORAGE_1D,
            Slot::TexStorage2D => TEX_STORAGE_2D,
            Slot::TexStorage3D => TEX_STORAGE_3D,
            Slot::MapBuffer => MAP_BUFFER,
            Slot::MapBufferRange => MAP_BUFFER_RANGE,
            Slot::UnmapBuffer => UNMAP_BUFFER,
            Slot::VertexAttribDivisor => VERTEX_ATTRIB_DIVISOR,
            Slot::DrawBuffers => DRAW_BUFFERS,
            Slot::ObjectLabel => OBJECT_LABEL,
            Slot::PushDebugGroup => PUSH_DEBUG_GROUP,
            Slot::PopDebugGroup => POP_DEBUG_GROUP,
            Slot::DebugMessageInsert => DEBUG_MESSAGE_INSERT,
            Slot::DebugMessageCallback => DEBUG_MESSAGE_CALLBACK,
            Slot::InvalidateFramebuffer => INVALIDATE_FRAMEBUFFER,
            Slot::ClearDepth => CLEAR_DEPTH,
            Slot::FramebufferTexture2DMultisample => FRAMEBUFFER_TEXTURE_2D_MULTISAMPLE,
            Slot::RenderbufferStorageMultisample => RENDERBUFFER_STORAGE_MULTISAMPLE,
            Slot::GetTextureHandle => GET_TEXTURE_HANDLE,
            Slot::MakeTextureHandleResident => MAKE_TEXTURE_HANDLE_RESIDENT,
            Slot::MakeTextureHandleNonResident => MAKE_TEXTURE_HANDLE_NON_RESIDENT,
            Slot::PolygonFillMode => POLYGON_FILL_MODE,
        }
    }
}

// ============================================================================
// Dispatch table
// ============================================================================

/// Observable state of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Unresolved,
    Bound(EntryPoint),
    /// No candidate was admitted; calls through the slot are dropped.
    Absent,
}

const UNRESOLVED: u16 = 0;
const ABSENT: u16 = u16::MAX;

const _: () = assert!(EntryPoint::COUNT < ABSENT as usize);

/// Resolved entry point per slot for one context.
///
/// Each slot is a single atomic word so resolved answers can be read from any
/// thread. First resolution is expected on the context's owning thread.
#[derive(Debug)]
pub struct DispatchTable {
    slots: [AtomicU16; Slot::COUNT],
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchTable {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| AtomicU16::new(UNRESOLVED)),
        }
    }

    pub fn state(&self, slot: Slot) -> SlotState {
        match self.slots[slot.index()].load(Ordering::Acquire) {
            UNRESOLVED => SlotState::Unresolved,
            ABSENT => SlotState::Absent,
            encoded => match EntryPoint::ALL.get(usize::from(encoded) - 1) {
                Some(entry) => SlotState::Bound(*entry),
                None => SlotState::Absent,
            },
        }
    }

    /// Entry point bound to `slot`, resolving it against `matrix` on first use.
    ///
    /// Once a slot is bound or absent the matrix is no longer consulted for it.
    pub fn resolve(&self, slot: Slot, matrix: &CapabilityMatrix) -> Option<EntryPoint> {
        match self.state(slot) {
            SlotState::Bound(entry) => return Some(entry),
            SlotState::Absent => return None,
            SlotState::Unresolved => {}
        }

        let chosen = slot
            .candidates()
            .iter()
            .find(|candidate| candidate.admitted(matrix))
            .map(|candidate| candidate.entry);

        let encoded = match chosen {
            Some(entry) => entry.index() as u16 + 1,
            None => ABSENT,
        };
        self.slots[slot.index()].store(encoded, Ordering::Release);

        match chosen {
            Some(entry) => debug!(slot = %slot, entry = entry.symbol(), "dispatch slot bound"),
            None => warn!(slot = %slot, "no supported entry point, calls will be dropped"),
        }
        chosen
    }

    /// Number of slots resolved so far, bound or absent.
    pub fn resolved_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.load(Ordering::Relaxed) != UNRESOLVED)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glcaps_core::version::*;
    use glcaps_core::{ExtensionSet, Probed};

    fn matrix(version: Version, extensions: &[&str]) -> CapabilityMatrix {
        CapabilityMatrix::new(Probed::new(
            version,
            ExtensionSet::from_names(extensions.iter().copied()),
        ))
    }

    #[test]
    fn test_every_slot_has_candidates() {
        assert_eq!(Slot::COUNT, 30);
        for slot in Slot::ALL {
            assert!(!slot.candidates().is_empty(), "{slot} has no candidates");
        }
    }

    #[test]
    fn test_symbols_are_unique() {
        let mut symbols: Vec<_> = EntryPoint::ALL.iter().map(|e| e.symbol()).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), EntryPoint::COUNT);
    }

    #[test]
    fn test_core_vertex_array_on_es3() {
        let table = DispatchTable::new();
        let m = matrix(ES_3_0, &[]);
        assert_eq!(table.resolve(Slot::BindVertexArray, &m), Some(EntryPoint::BindVertexArray));
        assert_eq!(table.state(Slot::BindVertexArray), SlotState::Bound(EntryPoint::BindVertexArray));
        assert_eq!(table.state(Slot::GenVertexArrays), SlotState::Unresolved);
    }

    #[test]
    fn test_absent_slot_is_recorded() {
        let table = DispatchTable::new();
        let m = matrix(ES_2_0, &[]);
        assert_eq!(table.resolve(Slot::FenceSync, &m), None);
        assert_eq!(table.state(Slot::FenceSync), SlotState::Absent);
        assert_eq!(table.resolved_count(), 1);
    }

    #[test]
    fn test_resolution_is_final() {
        let table = DispatchTable::new();
        let es2 = matrix(ES_2_0, &["GL_OES_vertex_array_object"]);
        let es3 = matrix(ES_3_0, &[]);
        let first = table.resolve(Slot::BindVertexArray, &es2);
        assert_eq!(first, Some(EntryPoint::BindVertexArrayOes));
        assert_eq!(table.resolve(Slot::BindVertexArray, &es3), first);
    }

    #[test]
    fn test_multisample_vendor_order() {
        let both = matrix(
            ES_2_0,
            &["GL_EXT_multisampled_render_to_texture", "GL_IMG_multisampled_render_to_texture"],
        );
        let table = DispatchTable::new();
        assert_eq!(
            table.resolve(Slot::FramebufferTexture2DMultisample, &both),
            Some(EntryPoint::FramebufferTexture2DMultisampleExt)
        );

        let img = matrix(ES_2_0, &["GL_IMG_multisampled_render_to_texture"]);
        let table = DispatchTable::new();
        assert_eq!(
            table.resolve(Slot::FramebufferTexture2DMultisample, &img),
            Some(EntryPoint::FramebufferTexture2DMultisampleImg)
        );
    }

    #[test]
    fn test_clear_depth_always_resolves() {
        let table = DispatchTable::new();
        assert_eq!(table.resolve(Slot::ClearDepth, &matrix(GL_2_1, &[])), Some(EntryPoint::ClearDepth));
        let table = DispatchTable::new();
        assert_eq!(table.resolve(Slot::ClearDepth, &matrix(ES_2_0, &[])), Some(EntryPoint::ClearDepthf));
    }

    #[test]
    fn test_unavailable_matrix_binds_only_unguarded() {
        let table = DispatchTable::new();
        let m = CapabilityMatrix::unavailable();
        for slot in Slot::ALL {
            let _ = table.resolve(*slot, &m);
        }
        assert_eq!(table.state(Slot::ClearDepth), SlotState::Bound(EntryPoint::ClearDepth));
        assert_eq!(table.state(Slot::BindVertexArray), SlotState::Absent);
    }
}
