//! User entity.

use super::plan::Plan;
use crate::UserData;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// Identity assigned by the external authentication provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExternalIdentity {
    /// Identifier in the external system.
    #[validate(custom(function = "crate::validation::rules::not_blank"))]
    pub id: String,

    #[validate(email)]
    #[serde(default)]
    pub email: Option<String>,

    /// Profile picture URL.
    #[validate(url)]
    #[serde(default)]
    pub picture: Option<String>,
}

/// Free-form user settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserSettings {
    #[serde(default)]
    pub version: Option<i32>,
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

/// User record as stored in the user collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier for the user.
    #[validate(custom(function = "crate::validation::rules::not_blank"))]
    pub id: String,

    #[validate(nested)]
    pub external: ExternalIdentity,

    /// Reference into the plan collection.
    #[serde(default)]
    pub plan_id: Option<String>,

    #[serde(default)]
    pub roles: Vec<String>,

    #[serde(default)]
    pub settings: Option<UserSettings>,

    /// Last update time in epoch milliseconds.
    #[serde(default)]
    pub updated_timestamp: Option<i64>,

    /// Resolved plan; filled at read time, never written to the user collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
}

impl User {
    /// Creates a user known to the given external identity.
    #[must_use]
    pub fn new(id: impl Into<String>, external: ExternalIdentity) -> Self {
        Self {
            id: id.into(),
            external,
            ..Self::default()
        }
    }

    /// Sets the plan reference.
    #[must_use]
    pub fn with_plan_id(mut self, plan_id: impl Into<String>) -> Self {
        self.plan_id = Some(plan_id.into());
        self
    }
}

impl ExternalIdentity {
    /// Creates an external identity with only an id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
            picture: None,
        }
    }
}

impl UserData for User {
    type Plan = Plan;

    fn id(&self) -> &str {
        &self.id
    }

    fn external_id(&self) -> &str {
        &self.external.id
    }

    fn plan_id(&self) -> Option<&str> {
        self.plan_id.as_deref().filter(|id| !id.is_empty())
    }

    fn set_plan(&mut self, plan: Option<Plan>) {
        self.plan = plan;
    }

    fn set_updated_timestamp(&mut self, timestamp: i64) {
        self.updated_timestamp = Some(timestamp);
    }
}
