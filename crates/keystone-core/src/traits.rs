//! Document capabilities the generic repositories are written against.
//!
//! A concrete application picks its own user, plan and news types; the
//! repositories only rely on the accessors declared here.

use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;

/// A record that can be stored in and read from a document collection.
pub trait Document: Serialize + DeserializeOwned + Clone + Unpin + Send + Sync + 'static {}

impl<T> Document for T where T: Serialize + DeserializeOwned + Clone + Unpin + Send + Sync + 'static {}

/// A subscription plan record.
pub trait PlanData: Document {
    /// Returns the plan's unique identifier.
    fn id(&self) -> &str;
}

/// A user record with a resolvable plan reference.
pub trait UserData: Document + Validate {
    /// The plan type embedded once resolved.
    type Plan: PlanData;

    /// Returns the user's unique identifier.
    fn id(&self) -> &str;

    /// Returns the identifier assigned by the external identity provider.
    fn external_id(&self) -> &str;

    /// Returns the plan reference, `None` when absent or empty.
    fn plan_id(&self) -> Option<&str>;

    /// Attaches the resolved plan.
    fn set_plan(&mut self, plan: Option<Self::Plan>);

    /// Stamps the last update timestamp in epoch milliseconds.
    fn set_updated_timestamp(&mut self, timestamp: i64);
}

/// A news record.
pub trait NewsData: Document {
    /// Returns the article's unique identifier.
    fn id(&self) -> &str;
}

/// Current time in epoch milliseconds, the unit of every stored timestamp.
#[must_use]
pub fn timestamp() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
