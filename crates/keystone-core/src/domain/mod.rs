//! # Keystone Domain
//!
//! Default entities stored by the repositories. Applications with their own
//! document shapes implement the capabilities in [`crate::traits`] instead.

pub mod news;
pub mod plan;
pub mod user;

pub use news::*;
pub use plan::*;
pub use user::*;
