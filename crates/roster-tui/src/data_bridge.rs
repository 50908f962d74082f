//! Data bridge: connects the [`Directory`] store to TUI actions.
//!
//! Runs as a background task: performs the one-time load, then forwards
//! every change of the working collection as an [`Action`] through the
//! TUI's action channel.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use roster_core::Directory;

use crate::action::Action;

/// Spawn the data bridge connecting the [`Directory`] user stream to the TUI.
///
/// Loads once (a failure is logged and the collection stays empty), sends
/// the initial snapshot, then loops forwarding every collection change
/// until cancelled.
pub async fn spawn_data_bridge(
    directory: Directory,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    if let Err(e) = directory.load().await {
        error!(error = %e, url = %directory.config().list_url, "failed to load users");
    }

    // Push the current snapshot so the screen renders whatever we have
    let mut users = directory.subscribe();
    let _ = action_tx.send(Action::UsersUpdated(users.current().clone()));

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            changed = users.changed() => {
                let Some(snapshot) = changed else { break };
                debug!(count = snapshot.len(), "dispatching UsersUpdated");
                if action_tx.send(Action::UsersUpdated(snapshot)).is_err() {
                    break;
                }
            }
        }
    }

    debug!("data bridge stopped");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use roster_core::{DirectoryConfig, User};

    fn unreachable_directory() -> Directory {
        // Nothing listens on port 9 locally, so the load fails fast.
        let config =
            DirectoryConfig::parse("http://127.0.0.1:9/users", "http://127.0.0.1:9/posts").unwrap();
        Directory::new(config).unwrap()
    }

    #[tokio::test]
    async fn failed_load_still_sends_snapshot_and_forwards_changes() {
        let directory = unreachable_directory();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let task = tokio::spawn(spawn_data_bridge(directory.clone(), tx, cancel.clone()));

        let Some(Action::UsersUpdated(initial)) = rx.recv().await else {
            panic!("expected initial snapshot");
        };
        assert!(initial.is_empty());

        directory
            .store()
            .append(std::sync::Arc::new(User::new(3, "Carl", "carl3", "c@x.com")));
        let Some(Action::UsersUpdated(next)) = rx.recv().await else {
            panic!("expected forwarded change");
        };
        assert_eq!(next.len(), 1);

        cancel.cancel();
        task.await.unwrap();
    }
}
