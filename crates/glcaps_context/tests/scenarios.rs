//! End-to-end scenarios over a recorded driver

use std::sync::Arc;
use std::thread;

use glcaps_context::gl_enums::*;
use glcaps_context::*;
use glcaps_core::{ApiFamily, Capability, InternalCapability, TextureFormat};

fn context(version: &str, extensions: &[&str]) -> Context<SnapshotDriver> {
    let snapshot = DriverSnapshot {
        family: ApiFamily::Embedded,
        version: Some(version.to_string()),
        extensions: extensions.iter().map(|e| e.to_string()).collect(),
        ..DriverSnapshot::default()
    };
    let settings = ContextSettings::default().with_error_check(ErrorCheckPolicy::Log);
    let mut ctx = Context::new(SnapshotDriver::new(snapshot), settings);
    ctx.initialize().expect("snapshot context initializes");
    ctx.native().clear_calls();
    ctx
}

#[test]
fn test_compute_unavailable_on_es3_without_extensions() {
    let ctx = context("OpenGL ES 3.0", &[]);
    assert!(!ctx.has_capability(Capability::Compute));
}

#[test]
fn test_compute_through_extension_and_prerequisites() {
    let ctx = context("OpenGL ES 3.0", &["GL_ARB_compute_shader"]);
    let matrix = ctx.matrix();
    assert!(matrix.seed_internal_capability(InternalCapability::ProgramInterfaceQuery, true));
    assert!(matrix.seed_internal_capability(InternalCapability::ShaderImageLoadStore, true));
    assert!(ctx.has_capability(Capability::Compute));
}

#[test]
fn test_suffixed_vertex_array_on_es2() {
    let ctx = context("OpenGL ES 2.0", &["GL_OES_vertex_array_object"]);
    ctx.bind_vertex_array(1);
    assert_eq!(
        ctx.slot_state(Slot::BindVertexArray),
        SlotState::Bound(EntryPoint::BindVertexArrayOes)
    );
    assert_eq!(ctx.native().calls_to("glBindVertexArrayOES"), 1);
    assert_eq!(ctx.native().calls_to("glBindVertexArray"), 0);
}

#[test]
fn test_buffers_from_three_threads() {
    let ctx = context("OpenGL ES 3.0", &[]);
    ctx.native().set_current(false);

    const BATCHES: [&[GLuint]; 3] = [&[11, 12], &[21], &[31, 32]];
    let handles: Vec<_> = BATCHES
        .into_iter()
        .map(|batch| {
            let deletion = ctx.deletion();
            thread::spawn(move || {
                deletion.enqueue(ObjectKind::Buffer, batch);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    ctx.native().set_current(true);
    assert_eq!(ctx.flush_deletion_queue(), 5);

    let call = ctx.native().last_call("glDeleteBuffers").unwrap();
    let mut deleted = call.args.clone();
    deleted.sort_unstable();
    assert_eq!(deleted, vec![11, 12, 21, 31, 32]);
    assert_eq!(ctx.deletion().pending(ObjectKind::Buffer), 0);
}

#[test]
fn test_nested_guards_hold_the_queue() {
    let coordinator = Arc::new(DeletionCoordinator::new());
    coordinator.enqueue(ObjectKind::Texture, &[1, 2, 3]);

    let a = coordinator.guard();
    let b = coordinator.guard();
    drop(b);
    assert!(coordinator.drain(ObjectKind::Texture).is_empty());
    assert_eq!(coordinator.pending(ObjectKind::Texture), 3);

    drop(a);
    assert_eq!(coordinator.drain(ObjectKind::Texture), vec![1, 2, 3]);
}

#[test]
fn test_depth_stencil_fallback_matches_24_bit() {
    let ctx = context("OpenGL ES 2.0", &["GL_OES_packed_depth_stencil"]);
    assert_eq!(
        ctx.texture_format_capabilities(TextureFormat::Depth32UnormStencil8),
        ctx.texture_format_capabilities(TextureFormat::Depth24UnormStencil8)
    );
}

#[test]
fn test_slot_resolves_once() {
    let ctx = context("OpenGL ES 3.0", &[]);
    ctx.tex_storage_2d(TEXTURE_2D, 1, 0x8058, 4, 4);
    let evaluations = ctx.matrix().evaluations();
    let state = ctx.slot_state(Slot::TexStorage2D);

    ctx.tex_storage_2d(TEXTURE_2D, 1, 0x8058, 8, 8);
    assert_eq!(ctx.matrix().evaluations(), evaluations);
    assert_eq!(ctx.slot_state(Slot::TexStorage2D), state);
    assert_eq!(ctx.native().calls_to("glTexStorage2D"), 2);
}

#[test]
fn test_background_producers_with_flush_on_owner() {
    let ctx = context("OpenGL ES 3.0", &[]);
    ctx.native().set_current(false);

    let threads = 4u32;
    let per_thread = 64u32;
    thread::scope(|scope| {
        for t in 0..threads {
            let deletion = ctx.deletion();
            scope.spawn(move || {
                for i in 0..per_thread {
                    deletion.enqueue(ObjectKind::Renderbuffer, &[t * 1000 + i + 1]);
                }
            });
        }
    });

    ctx.native().set_current(true);
    assert_eq!(ctx.flush_deletion_queue(), (threads * per_thread) as usize);
    assert!(ctx.deletion().is_empty());
}

#[test]
fn test_built_in_snapshot_report_surface() {
    let mut ctx = Context::new(
        SnapshotDriver::new(DriverSnapshot::embedded_3_0()),
        ContextSettings::default().with_error_check(ErrorCheckPolicy::Log),
    );
    ctx.initialize().unwrap();
    assert_eq!(ctx.vendor(), "glcaps");
    assert!(ctx.has_capability(Capability::MultiSample));
    assert_eq!(ctx.feature_limit(FeatureLimit::MaxMultisampleCount), 4);
    assert_eq!(ctx.feature_limit(FeatureLimit::MaxVertexUniformVectors), 256);
}
