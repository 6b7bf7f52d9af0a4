//! GL Capabilities Context
//!
//! Everything that needs a live native context:
//! - Probing the driver once per context
//! - Resolving each logical operation to one native entry point
//! - Deferring object deletion until the context is current
//! - Limits, error checking and call accounting
//!
//! # Example
//!
//! ```ignore
//! use glcaps_context::{Context, ContextSettings, DriverSnapshot, SnapshotDriver};
//!
//! let driver = SnapshotDriver::new(DriverSnapshot::embedded_3_0());
//! let mut ctx = Context::new(driver, ContextSettings::default());
//! ctx.initialize()?;
//! ctx.bind_vertex_array(0);
//! ctx.flush_deletion_queue();
//! ```

pub mod context;
pub mod deletion;
pub mod dispatch;
pub mod error;
pub mod gl_enums;
pub mod limits;
pub mod native;
pub mod probe;
pub mod settings;
pub mod snapshot;

pub use context::Context;
pub use deletion::{DeletionCoordinator, DestructionGuard, ObjectKind};
pub use dispatch::{Candidate, DispatchTable, EntryPoint, Guard, Slot, SlotState};
pub use error::{GlError, ProbeError, SnapshotError};
pub use limits::FeatureLimit;
pub use native::{DebugCallback, GlSync, NativeGl};
pub use probe::{probe, DriverInfo};
pub use settings::{ContextSettings, ErrorCheckPolicy, UnbindPolicy};
pub use snapshot::{Call, DriverSnapshot, ExtensionStyle, SnapshotDriver};
