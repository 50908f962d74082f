//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use roster_core::{User, UserDraft, UserId};

/// Identifies one add-form submission.
pub type SubmissionId = u64;

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Data Events (from the directory store) ────────────────────
    UsersUpdated(Arc<Vec<Arc<User>>>),

    // ── Search ────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    SearchInput(String),
    SearchSubmit,

    // ── Sorting ───────────────────────────────────────────────────
    CycleSortField,
    ToggleSortOrder,

    // ── Local mutation ────────────────────────────────────────────
    DeleteUser(UserId),

    // ── Add form ──────────────────────────────────────────────────
    ToggleAddForm,
    /// POST the draft; the id ties the outcome back to this submission.
    SubmitDraft(SubmissionId, UserDraft),
    UserAdded(SubmissionId, Arc<User>),
    AddFailed(SubmissionId),

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,
}
