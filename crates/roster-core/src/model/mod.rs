// ── Domain model ──
//
// Canonical user types shared by the store, the view derivation, and
// every consumer. Wire types stay in roster-api.

pub mod draft;
pub mod user;

pub use draft::{DraftField, UserDraft};
pub use user::{User, UserId};
