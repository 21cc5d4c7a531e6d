//! Sharing a prompt.
//!
//! A prompt is formatted into a short text payload and handed to a native
//! share target when one exists. Without one, the payload goes to the
//! clipboard and the caller tells the user it was copied. A user declining
//! the share sheet is a normal outcome, not an error.

use serde::{Deserialize, Serialize};

use crate::error::ShareError;
use crate::prompt::Prompt;
use crate::storage::ShareConfig;

/// Text handed to a share target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
}

impl SharePayload {
    pub fn for_prompt(prompt: &Prompt, config: &ShareConfig) -> Self {
        Self {
            title: config.title.clone(),
            text: share_text(prompt, &config.signature),
        }
    }
}

/// `"<emoji> <text>\n\n— <signature>"`
pub fn share_text(prompt: &Prompt, signature: &str) -> String {
    format!("{} {}\n\n— {}", prompt.emoji, prompt.text, signature)
}

/// What a native share sheet reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareResponse {
    Shared,
    Declined,
}

/// Platform share capability.
pub trait ShareTarget {
    fn share(&self, payload: &SharePayload) -> Result<ShareResponse, ShareError>;
}

/// System clipboard capability.
pub trait Clipboard {
    fn copy_text(&self, text: &str) -> Result<(), ShareError>;
}

/// Result of [`share`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ShareOutcome {
    /// The native share sheet accepted the payload.
    Shared,
    /// The user dismissed the share sheet, or it failed; nothing to report.
    Cancelled,
    /// No native share; the payload is on the clipboard.
    Copied { payload: SharePayload },
    /// Neither share nor clipboard worked; the caller can show the payload.
    Unavailable { payload: SharePayload },
}

/// Share `payload` via `native` if present, otherwise via `clipboard`.
pub fn share(
    payload: SharePayload,
    native: Option<&dyn ShareTarget>,
    clipboard: &dyn Clipboard,
) -> ShareOutcome {
    if let Some(target) = native {
        return match target.share(&payload) {
            Ok(ShareResponse::Shared) => ShareOutcome::Shared,
            Ok(ShareResponse::Declined) => ShareOutcome::Cancelled,
            Err(e) => {
                tracing::debug!(error = %e, "share sheet failed");
                ShareOutcome::Cancelled
            }
        };
    }

    match clipboard.copy_text(&payload.text) {
        Ok(()) => ShareOutcome::Copied { payload },
        Err(e) => {
            tracing::warn!(error = %e, "clipboard copy failed");
            ShareOutcome::Unavailable { payload }
        }
    }
}

/// Clipboard for contexts without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn copy_text(&self, _text: &str) -> Result<(), ShareError> {
        Err(ShareError::Clipboard("no clipboard in this context".into()))
    }
}
