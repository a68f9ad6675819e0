//! Field-exclusion profiles applied server-side to user reads.
//!
//! Profiles are declared, not computed: which caller sees which fields is
//! decided where the response is shaped, the store only trims documents.

use mongodb::bson::Document;

/// A declarative list of fields excluded from returned documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    excluded: &'static [&'static str],
}

impl Projection {
    /// Excludes only the storage-internal `_id`.
    pub const DEFAULT: Self = Self::exclude(&["_id"]);

    /// Excludes `_id`, the external email and picture, roles and the plan reference.
    pub const PRIVILEGED: Self = Self::exclude(&[
        "_id",
        "external.email",
        "external.picture",
        "roles",
        "planId",
    ]);

    /// Excludes `_id`, roles and the plan reference; external fields are kept.
    pub const RESTRICTED: Self = Self::exclude(&["_id", "roles", "planId"]);

    /// Creates a profile excluding the given dotted field paths.
    #[must_use]
    pub const fn exclude(excluded: &'static [&'static str]) -> Self {
        Self { excluded }
    }

    /// Returns the excluded field paths.
    #[must_use]
    pub const fn excluded(&self) -> &'static [&'static str] {
        self.excluded
    }

    /// Checks if a dotted field path is excluded.
    #[must_use]
    pub fn excludes(&self, field: &str) -> bool {
        self.excluded.contains(&field)
    }

    /// Renders the profile as a MongoDB projection document.
    #[must_use]
    pub fn to_document(&self) -> Document {
        let mut document = Document::new();
        for field in self.excluded {
            document.insert(*field, 0);
        }
        document
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::DEFAULT
    }
}
