//! Instrumentation context threaded through every repository call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

/// Opaque tracing/correlation token supplied by the caller.
///
/// Repositories never interpret it beyond recording the correlation id on
/// their tracing span and copying it into the response they return.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrumentation {
    correlation_id: Uuid,
    created_at: DateTime<Utc>,
}

impl Instrumentation {
    /// Creates a context with a fresh correlation id.
    #[must_use]
    pub fn new() -> Self {
        Self::with_correlation_id(Uuid::now_v7())
    }

    /// Creates a context for an existing correlation id.
    #[must_use]
    pub fn with_correlation_id(correlation_id: Uuid) -> Self {
        Self {
            correlation_id,
            created_at: Utc::now(),
        }
    }

    /// Returns the correlation id.
    #[must_use]
    pub const fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    /// Returns when the context was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Default for Instrumentation {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Instrumentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.correlation_id)
    }
}
