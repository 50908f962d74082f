// ── Core error types ──
//
// User-facing errors from roster-core. Consumers never match on HTTP
// internals directly; the `From<roster_api::Error>` impl translates
// transport-layer errors into domain-appropriate variants.

use thiserror::Error;

use crate::model::DraftField;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    // ── Operation errors ─────────────────────────────────────────────
    #[error("User draft is incomplete: missing {}", field_list(.missing))]
    IncompleteDraft { missing: Vec<DraftField> },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

fn field_list(fields: &[DraftField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<roster_api::Error> for CoreError {
    fn from(err: roster_api::Error) -> Self {
        match err {
            roster_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(ToString::to_string)
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: err.status(),
                    }
                }
            }
            roster_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            roster_api::Error::ClientBuild(reason) => CoreError::Config {
                message: format!("HTTP client: {reason}"),
            },
            roster_api::Error::Http { status, body } => CoreError::Api {
                message: if body.is_empty() {
                    format!("server returned HTTP {status}")
                } else {
                    format!("server returned HTTP {status}: {body}")
                },
                status: Some(status),
            },
            roster_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_keeps_status() {
        let err = CoreError::from(roster_api::Error::Http {
            status: 500,
            body: String::new(),
        });
        match err {
            CoreError::Api { status, message } => {
                assert_eq!(status, Some(500));
                assert_eq!(message, "server returned HTTP 500");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn incomplete_draft_lists_fields() {
        let err = CoreError::IncompleteDraft {
            missing: vec![DraftField::Username, DraftField::Email],
        };
        assert_eq!(
            err.to_string(),
            "User draft is incomplete: missing username, email"
        );
    }
}
