//! # Keystone Core
//!
//! Core types, traits, and error definitions shared by the Keystone
//! document repositories: the error taxonomy, the instrumentation context
//! threaded through every call, the response envelope that carries soft
//! failures, and the document capabilities the generic repositories are
//! written against.

pub mod domain;
pub mod error;
pub mod instrumentation;
pub mod response;
pub mod result;
pub mod telemetry;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use instrumentation::*;
pub use response::*;
pub use result::*;
pub use telemetry::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::{module, HasComponent, Interface};
