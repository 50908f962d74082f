// ── Add-user draft ──
//
// The three text fields of a user under construction. Submission is
// gated on every field being non-empty.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// An editable field of a [`UserDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DraftField {
    Name,
    Username,
    Email,
}

impl DraftField {
    /// The field after this one, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Username,
            Self::Username => Self::Email,
            Self::Email => Self::Name,
        }
    }

    /// The field before this one, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Username => Self::Name,
            Self::Email => Self::Username,
        }
    }

    /// Human label for form rendering.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Username => "Username",
            Self::Email => "Email",
        }
    }
}

/// A user record under construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub username: String,
    pub email: String,
}

impl UserDraft {
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            email: email.into(),
        }
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Username => &self.username,
            DraftField::Email => &self.email,
        }
    }

    pub fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Name => &mut self.name,
            DraftField::Username => &mut self.username,
            DraftField::Email => &mut self.email,
        }
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    /// Fields that are still empty, in form order.
    pub fn missing_fields(&self) -> Vec<DraftField> {
        DraftField::iter()
            .filter(|f| self.get(*f).is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        DraftField::iter().all(|f| !self.get(f).is_empty())
    }

    pub fn is_empty(&self) -> bool {
        DraftField::iter().all(|f| self.get(f).is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
