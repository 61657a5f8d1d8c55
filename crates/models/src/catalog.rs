//! Collections the site persists and the indexes declared on them.

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Packages,
    Bookings,
    CabBookings,
    Testimonials,
    ContactInquiries,
    GalleryImages,
    Admins,
    TeamMembers,
    Popups,
    SiteSettings,
}

impl Collection {
    pub const ALL: [Collection; 10] = [
        Collection::Packages,
        Collection::Bookings,
        Collection::CabBookings,
        Collection::Testimonials,
        Collection::ContactInquiries,
        Collection::GalleryImages,
        Collection::Admins,
        Collection::TeamMembers,
        Collection::Popups,
        Collection::SiteSettings,
    ];

    /// Storage name; also the table name in the Postgres backend.
    pub fn name(self) -> &'static str {
        match self {
            Collection::Packages => "packages",
            Collection::Bookings => "bookings",
            Collection::CabBookings => "cab_bookings",
            Collection::Testimonials => "testimonials",
            Collection::ContactInquiries => "contact_inquiries",
            Collection::GalleryImages => "gallery_images",
            Collection::Admins => "admins",
            Collection::TeamMembers => "team_members",
            Collection::Popups => "popups",
            Collection::SiteSettings => "site_settings",
        }
    }

    pub fn indexes(self) -> impl Iterator<Item = &'static IndexSpec> {
        INDEXES.iter().filter(move |ix| ix.collection == self)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Single-field index on a top-level document field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSpec {
    pub collection: Collection,
    pub field: &'static str,
    pub unique: bool,
    pub descending: bool,
}

impl IndexSpec {
    const fn asc(collection: Collection, field: &'static str) -> Self {
        Self { collection, field, unique: false, descending: false }
    }

    const fn desc(collection: Collection, field: &'static str) -> Self {
        Self { collection, field, unique: false, descending: true }
    }

    const fn unique(collection: Collection, field: &'static str) -> Self {
        Self { collection, field, unique: true, descending: false }
    }

    pub fn name(&self) -> String {
        let prefix = if self.unique { "uniq" } else { "idx" };
        format!("{prefix}_{}_{}", self.collection.name(), self.field.to_ascii_lowercase())
    }
}

pub const INDEXES: &[IndexSpec] = &[
    IndexSpec::asc(Collection::Packages, "title"),
    IndexSpec::asc(Collection::Packages, "status"),
    IndexSpec::desc(Collection::Packages, "createdAt"),
    IndexSpec::asc(Collection::Bookings, "email"),
    IndexSpec::asc(Collection::Bookings, "status"),
    IndexSpec::desc(Collection::Bookings, "createdAt"),
    IndexSpec::asc(Collection::Testimonials, "status"),
    IndexSpec::desc(Collection::Testimonials, "rating"),
    IndexSpec::asc(Collection::CabBookings, "email"),
    IndexSpec::asc(Collection::CabBookings, "status"),
    IndexSpec::asc(Collection::CabBookings, "pickupDate"),
    IndexSpec::asc(Collection::ContactInquiries, "status"),
    IndexSpec::desc(Collection::ContactInquiries, "createdAt"),
    IndexSpec::asc(Collection::GalleryImages, "category"),
    IndexSpec::asc(Collection::GalleryImages, "isActive"),
    IndexSpec::unique(Collection::Admins, "username"),
    IndexSpec::unique(Collection::TeamMembers, "username"),
    IndexSpec::unique(Collection::TeamMembers, "email"),
    IndexSpec::asc(Collection::TeamMembers, "role"),
    IndexSpec::asc(Collection::TeamMembers, "isActive"),
    IndexSpec::desc(Collection::TeamMembers, "createdAt"),
    IndexSpec::asc(Collection::Popups, "isActive"),
    IndexSpec::asc(Collection::Popups, "startDate"),
    IndexSpec::asc(Collection::Popups, "endDate"),
    IndexSpec::desc(Collection::Popups, "createdAt"),
    IndexSpec::asc(Collection::SiteSettings, "isActive"),
];

/// A document type stored in exactly one collection.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: Collection;
    /// Human label used in not-found messages, e.g. "Package".
    const LABEL: &'static str;

    fn id(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_names_are_unique() {
        let mut names: Vec<String> = INDEXES.iter().map(IndexSpec::name).collect();
        names.sort();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }

    #[test]
    fn usernames_are_unique_per_account_collection() {
        for c in [Collection::Admins, Collection::TeamMembers] {
            assert!(c.indexes().any(|ix| ix.field == "username" && ix.unique));
        }
    }

    #[test]
    fn every_collection_has_an_index() {
        for c in Collection::ALL {
            assert!(c.indexes().next().is_some(), "{c} has no index");
        }
    }
}
