//! GL Capabilities Core
//!
//! Pure capability logic for GL and GL ES contexts:
//! - Version model for the desktop and embedded families
//! - Probed extension sets
//! - Closed key sets and their derivation rules
//! - Memoized capability matrix
//! - Texture format capability table

#[macro_use]
mod macros;

pub mod extensions;
pub mod format;
pub mod format_table;
pub mod keys;
pub mod matrix;
mod rules;
pub mod version;

pub use extensions::{Extension, ExtensionSet, FamilyGate};
pub use format::{TextureFormat, TextureFormatCapabilities};
pub use format_table::FormatCapabilityTable;
pub use keys::{Capability, InternalCapability, InternalRequirement, Requirement, TextureCapability};
pub use matrix::{CapabilityMatrix, Probed};
pub use version::{ApiFamily, ShaderFamily, ShaderVersion, Version};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
