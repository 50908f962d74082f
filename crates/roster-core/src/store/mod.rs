// ── Reactive data store ──
//
// Snapshot storage for the working collection with push-based change
// notification.

mod user_store;

pub use user_store::UserStore;
