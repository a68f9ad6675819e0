//! Response envelope carrying results or soft failures.

use crate::Instrumentation;
use serde::{Deserialize, Serialize};

/// Message for a user resolved with plan lookup but no plan reference.
pub const MISSING_PLAN_ID: &str = "Missing PlanId";

/// Message for an insert-or-replace that the store refused.
pub const INVALID_USER_UPDATE: &str = "Invalid user update.";

/// Business-level outcome of a repository call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Outcome<T> {
    /// The call produced a result.
    Success { results: T },
    /// A soft error; `message` is `None` for the generic case.
    Failure {
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

/// Response returned by every repository operation.
///
/// Always carries the caller's [`Instrumentation`], whatever the outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<T> {
    pub instrumentation: Instrumentation,
    #[serde(flatten)]
    pub outcome: Outcome<T>,
}

impl<T> Response<T> {
    /// Creates a successful response.
    #[must_use]
    pub fn success(instrumentation: &Instrumentation, results: T) -> Self {
        Self {
            instrumentation: instrumentation.clone(),
            outcome: Outcome::Success { results },
        }
    }

    /// Creates a soft error without a message.
    #[must_use]
    pub fn failure(instrumentation: &Instrumentation) -> Self {
        Self {
            instrumentation: instrumentation.clone(),
            outcome: Outcome::Failure { message: None },
        }
    }

    /// Creates a soft error with a message.
    #[must_use]
    pub fn failure_with(instrumentation: &Instrumentation, message: impl Into<String>) -> Self {
        Self {
            instrumentation: instrumentation.clone(),
            outcome: Outcome::Failure {
                message: Some(message.into()),
            },
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Returns the result, if any.
    #[must_use]
    pub const fn results(&self) -> Option<&T> {
        match &self.outcome {
            Outcome::Success { results } => Some(results),
            Outcome::Failure { .. } => None,
        }
    }

    /// Consumes the response, returning the result, if any.
    #[must_use]
    pub fn into_results(self) -> Option<T> {
        match self.outcome {
            Outcome::Success { results } => Some(results),
            Outcome::Failure { .. } => None,
        }
    }

    /// Returns the soft error message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Failure { message } => message.as_deref(),
            Outcome::Success { .. } => None,
        }
    }
}
