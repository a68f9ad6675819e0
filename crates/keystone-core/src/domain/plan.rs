//! Plan entity.

use crate::PlanData;
use serde::{Deserialize, Serialize};

/// Subscription plan associated with a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Unique identifier for the plan.
    pub id: String,

    /// Display name.
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Feature flags granted by the plan.
    #[serde(default)]
    pub features: Vec<String>,

    /// Whether new users are assigned this plan.
    #[serde(default)]
    pub default: bool,

    /// Display order.
    #[serde(default)]
    pub order: i32,

    #[serde(default)]
    pub updated_timestamp: Option<i64>,
}

impl Plan {
    /// Creates a plan with the given id and name.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

impl PlanData for Plan {
    fn id(&self) -> &str {
        &self.id
    }
}
