//! Deferred destruction of GL objects
//!
//! GL objects may only be deleted while their context is current. Resource
//! drops on other threads push handles here, and the owning thread drains the
//! queues once per frame.
//!
//! Each object kind has its own lock. Locks cover the append or the swap and
//! nothing else, so no native call ever runs under one.

use std::collections::BTreeSet;
use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};

use glcaps_core::define_keys;
use parking_lot::Mutex;

use crate::gl_enums::{GLenum, GLuint};

define_keys! {
    /// GL object kinds with a deletion queue, in flush order.
    pub enum ObjectKind {
        Buffer,
        Framebuffer,
        Renderbuffer,
        VertexArray,
        Program,
        Shader,
        Texture,
    }
}

/// Per-kind deletion queues shared between producer threads and the owning
/// thread.
#[derive(Debug, Default)]
pub struct DeletionCoordinator {
    queues: [Mutex<Vec<GLuint>>; ObjectKind::COUNT],
    unbind_targets: Mutex<BTreeSet<GLenum>>,
    guards: AtomicUsize,
}

impl DeletionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue handles for deletion. Zero handles are skipped.
    ///
    /// Returns how many handles were queued.
    pub fn enqueue(&self, kind: ObjectKind, handles: &[GLuint]) -> usize {
        let mut live = handles.iter().copied().filter(|&h| h != 0).peekable();
        if live.peek().is_none() {
            return 0;
        }
        let mut queue = self.queues[kind.index()].lock();
        let before = queue.len();
        queue.extend(live);
        queue.len() - before
    }

    /// Queue a buffer target to be bound to zero at the next flush.
    pub fn enqueue_unbind(&self, target: GLenum) {
        self.unbind_targets.lock().insert(target);
    }

    /// Take every pending handle of `kind`, in enqueue order.
    ///
    /// Returns nothing and leaves the queue intact while a
    /// [`DestructionGuard`] is alive.
    pub fn drain(&self, kind: ObjectKind) -> Vec<GLuint> {
        if !self.is_destruction_allowed() {
            return Vec::new();
        }
        mem::take(&mut *self.queues[kind.index()].lock())
    }

    /// Take every pending unbind target, in ascending order.
    pub fn drain_unbind_targets(&self) -> Vec<GLenum> {
        if !self.is_destruction_allowed() {
            return Vec::new();
        }
        mem::take(&mut *self.unbind_targets.lock()).into_iter().collect()
    }

    pub fn pending(&self, kind: ObjectKind) -> usize {
        self.queues[kind.index()].lock().len()
    }

    pub fn pending_unbind_targets(&self) -> usize {
        self.unbind_targets.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        ObjectKind::ALL.iter().all(|kind| self.pending(*kind) == 0)
            && self.pending_unbind_targets() == 0
    }

    pub fn is_destruction_allowed(&self) -> bool {
        self.guards.load(Ordering::Acquire) == 0
    }

    /// Block destruction until the returned guard is dropped. Guards nest.
    pub fn guard(&self) -> DestructionGuard<'_> {
        self.guards.fetch_add(1, Ordering::AcqRel);
        DestructionGuard { coordinator: self }
    }

    pub fn active_guards(&self) -> usize {
        self.guards.load(Ordering::Acquire)
    }
}

/// Keeps destruction blocked for its lifetime.
#[must_use = "destruction is only blocked while the guard is alive"]
#[derive(Debug)]
pub struct DestructionGuard<'a> {
    coordinator: &'a DeletionCoordinator,
}

impl Drop for DestructionGuard<'_> {
    fn drop(&mut self) {
        self.coordinator.guards.fetch_sub(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_zero_handles_are_skipped() {
        let coordinator = DeletionCoordinator::new();
        assert_eq!(coordinator.enqueue(ObjectKind::Buffer, &[0, 0]), 0);
        assert_eq!(coordinator.enqueue(ObjectKind::Buffer, &[0, 7, 0, 9]), 2);
        assert_eq!(coordinator.drain(ObjectKind::Buffer), vec![7, 9]);
        assert!(coordinator.is_empty());
    }

    #[test]
    fn test_drain_keeps_enqueue_order_per_kind() {
        let coordinator = DeletionCoordinator::new();
        coordinator.enqueue(ObjectKind::Texture, &[3]);
        coordinator.enqueue(ObjectKind::Shader, &[100]);
        coordinator.enqueue(ObjectKind::Texture, &[1, 2]);
        assert_eq!(coordinator.drain(ObjectKind::Texture), vec![3, 1, 2]);
        assert_eq!(coordinator.pending(ObjectKind::Shader), 1);
        assert!(coordinator.drain(ObjectKind::Texture).is_empty());
    }

    #[test]
    fn test_nested_guards() {
        let coordinator = DeletionCoordinator::new();
        coordinator.enqueue(ObjectKind::Program, &[4, 5]);

        let outer = coordinator.guard();
        let inner = coordinator.guard();
        assert_eq!(coordinator.active_guards(), 2);
        drop(inner);
        assert!(coordinator.drain(ObjectKind::Program).is_empty());
        assert_eq!(coordinator.pending(ObjectKind::Program), 2);

        drop(outer);
        assert!(coordinator.is_destruction_allowed());
        assert_eq!(coordinator.drain(ObjectKind::Program), vec![4, 5]);
    }

    #[test]
    fn test_unbind_targets_deduplicate() {
        let coordinator = DeletionCoordinator::new();
        coordinator.enqueue_unbind(0x8893);
        coordinator.enqueue_unbind(0x8892);
        coordinator.enqueue_unbind(0x8893);
        assert_eq!(coordinator.pending_unbind_targets(), 2);
        assert_eq!(coordinator.drain_unbind_targets(), vec![0x8892, 0x8893]);
        assert!(coordinator.is_empty());
    }

    #[test]
    fn test_concurrent_enqueue_loses_nothing() {
        let coordinator = DeletionCoordinator::new();
        let threads = 8u32;
        let per_thread = 250u32;

        thread::scope(|scope| {
            for t in 0..threads {
                let coordinator = &coordinator;
                scope.spawn(move || {
                    for i in 0..per_thread {
                        coordinator.enqueue(ObjectKind::Buffer, &[t * per_thread + i + 1]);
                    }
                });
            }
        });

        let mut drained = coordinator.drain(ObjectKind::Buffer);
        assert_eq!(drained.len(), (threads * per_thread) as usize);
        drained.sort_unstable();
        drained.dedup();
        assert_eq!(drained.len(), (threads * per_thread) as usize);
    }
}
