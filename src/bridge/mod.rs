//! JNI binding layer between the Ludii host and the [`crate::agent`] adapter.
//!
//! [`bindings`] resolves and caches host metadata once per process,
//! [`wrappers`] implements the [`crate::host`] traits over live JNI handles,
//! and [`exports`] holds the `native` methods the host calls.
pub mod bindings;
pub mod exports;
pub mod jvm;
pub mod wrappers;

pub use bindings::*;
pub use jvm::*;
pub use wrappers::*;
