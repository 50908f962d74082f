// ── Derived user views ──
//
// Pure functions turning the working collection plus a query into the
// sequence a consumer renders. Inputs are never mutated.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::model::User;

// ── SortField ───────────────────────────────────────────────────────

/// Column a view is ordered by.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Name,
    Id,
    Username,
    Email,
}

impl SortField {
    /// Next field in the cycle used by the interactive sort control.
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Id,
            Self::Id => Self::Username,
            Self::Username => Self::Email,
            Self::Email => Self::Name,
        }
    }

    fn compare(self, a: &User, b: &User) -> Ordering {
        match self {
            Self::Name => a.name.cmp(&b.name),
            Self::Id => a.id.cmp(&b.id),
            Self::Username => a.username.cmp(&b.username),
            Self::Email => a.email.cmp(&b.email),
        }
    }
}

// ── SortOrder ───────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize,
    Deserialize,
)]
pub enum SortOrder {
    #[default]
    #[strum(to_string = "asc", serialize = "ascending")]
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[strum(to_string = "desc", serialize = "descending")]
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Self::Ascending => ord,
            Self::Descending => ord.reverse(),
        }
    }
}

// ── ViewQuery ───────────────────────────────────────────────────────

/// Everything a derived view depends on besides the collection itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub search: String,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}

impl ViewQuery {
    pub fn new(search: impl Into<String>, sort_field: SortField, sort_order: SortOrder) -> Self {
        Self {
            search: search.into(),
            sort_field,
            sort_order,
        }
    }
}

// ── Derivation ──────────────────────────────────────────────────────

/// Records whose name or username contains `search`, ignoring case.
///
/// Keeps collection order. An empty search matches everything.
pub fn filter_users(users: &[Arc<User>], search: &str) -> Vec<Arc<User>> {
    if search.is_empty() {
        return users.to_vec();
    }

    let needle = search.to_lowercase();
    users
        .iter()
        .filter(|u| {
            u.name.to_lowercase().contains(&needle) || u.username.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// A sorted copy of `users`.
///
/// Strings compare byte-wise (so `"Alice" < "bob"`), ids numerically.
/// Stable: equal keys keep their relative order in either direction.
pub fn sort_users(users: &[Arc<User>], field: SortField, order: SortOrder) -> Vec<Arc<User>> {
    let mut sorted = users.to_vec();
    sorted.sort_by(|a, b| order.apply(field.compare(a, b)));
    sorted
}

/// Filter, then sort.
pub fn derive_view(users: &[Arc<User>], query: &ViewQuery) -> Vec<Arc<User>> {
    let filtered = filter_users(users, &query.search);
    sort_users(&filtered, query.sort_field, query.sort_order)
}
