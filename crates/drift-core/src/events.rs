use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::draw::DrawState;
use crate::prompt::Prompt;

/// Every draw-state change produces an Event.
/// The presentation layer renders from these; the CLI prints them as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DrawEvent {
    ShuffleStarted {
        candidates: usize,
        steps: u32,
        interval_ms: u64,
        at: DateTime<Utc>,
    },
    /// Intermediate pick shown while shuffling. Never committed.
    ShuffleStep {
        step: u32,
        of: u32,
        prompt: Prompt,
        at: DateTime<Utc>,
    },
    DrawSettled {
        prompt: Prompt,
        draw_count: u64,
        at: DateTime<Utc>,
    },
    /// A draw was requested while a shuffle was already running.
    DrawIgnored {
        at: DateTime<Utc>,
    },
    /// The filtered pool was empty; the displayed prompt is unchanged.
    NoMatches {
        at: DateTime<Utc>,
    },
    ShuffleCancelled {
        restored: Option<Prompt>,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: DrawState,
        current: Option<Prompt>,
        draw_count: u64,
        at: DateTime<Utc>,
    },
}

impl DrawEvent {
    /// The prompt a settled draw committed, if this is one.
    pub fn settled_prompt(&self) -> Option<&Prompt> {
        match self {
            DrawEvent::DrawSettled { prompt, .. } => Some(prompt),
            _ => None,
        }
    }
}
