//! # loadstone-bindings-core
//!
//! Shared FFI type definitions for loadstone language bindings.
//!
//! This crate provides:
//! - **IR types**: FFI-friendly representations of core types
//! - **Conversions**: Core type → IR type transformations
//! - **Validation**: Test fixtures for binding conformance
//!
//! ## Design Principle
//!
//! **Bindings do not define semantics.**
//!
//! All load-order and metadata logic lives in `loadstone-core`. This crate
//! only provides data transformations for FFI marshalling. Language bindings
//! are thin wrappers that:
//! 1. Accept FFI-compatible input (strings, primitives)
//! 2. Convert to core types
//! 3. Call into `loadstone_core`
//! 4. Convert the result to FFI-compatible output
//!
//! ```text
//! FFI Input → Core Types → loadstone_core → Core Result → IR Types → FFI Output
//! ```

pub mod conversion;
pub mod types;
pub mod validation;

// Re-export IR types
pub use types::{
    IRGameType, IRLogLevel, IRMasterlistInfo, IRMessageType, IRPluginCleanliness, IRPluginTags,
    IRSimpleMessage, IRVersion,
};

// Re-export conversions
pub use conversion::{library_version, ToIR};

// Re-export validation fixtures
pub use validation::{TEST_MASTERLIST_YAML, TEST_USERLIST_YAML};
