// roster-core: Reactive data layer between roster-api and consumers (CLI/TUI).

pub mod config;
pub mod convert;
pub mod directory;
pub mod error;
pub mod model;
pub mod store;
pub mod stream;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_CREATE_URL, DEFAULT_LIST_URL, DirectoryConfig};
pub use directory::Directory;
pub use error::CoreError;
pub use store::UserStore;
pub use stream::UserStream;
pub use view::{SortField, SortOrder, ViewQuery, derive_view, filter_users, sort_users};

pub use model::{DraftField, User, UserDraft, UserId};
