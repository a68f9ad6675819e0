//! News entity.

use crate::NewsData;
use serde::{Deserialize, Serialize};

/// A news article shown to users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub article: Option<String>,
    #[serde(default)]
    pub requires_auth: bool,
    #[serde(default)]
    pub sticky: bool,
    /// Publication time in epoch milliseconds.
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub updated_timestamp: Option<i64>,
}

impl NewsData for News {
    fn id(&self) -> &str {
        &self.id
    }
}
