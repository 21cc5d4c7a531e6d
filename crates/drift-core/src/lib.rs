//! # DRIFT Core Library
//!
//! This library provides the core logic for DRIFT, a deck of "activity
//! prompt" cards drawn at random. All behavior lives here; the CLI (and any
//! other front end) is a thin presentation layer over the same library.
//!
//! ## Architecture
//!
//! - **Catalog**: bundled, immutable list of prompts with unique ids
//! - **Filter**: category/effort selection over the catalog
//! - **Draw Engine**: a tick-driven state machine for the animated shuffle
//!   that requires the caller to invoke `tick()` (or `poll()`) for progress
//! - **Storage**: key-value capability with file, memory and "unavailable"
//!   backends; favorites on top of it; TOML-based configuration
//! - **Share**: payload formatting with native-share/clipboard fallback
//!
//! ## Key Components
//!
//! - [`DrawEngine`]: Core shuffle state machine
//! - [`FavoritesStore`]: Persistent set of saved prompt ids
//! - [`DriftSession`]: What a presentation layer drives
//! - [`Config`]: Application configuration management

pub mod catalog;
pub mod draw;
pub mod error;
pub mod events;
pub mod filter;
pub mod prompt;
pub mod session;
pub mod share;
pub mod storage;

pub use catalog::Catalog;
pub use draw::{draw, Clock, DrawEngine, DrawState, ManualClock, ShuffleConfig, SystemClock};
pub use error::{CatalogError, ConfigError, CoreError, ShareError, StorageError};
pub use events::DrawEvent;
pub use filter::{filter, FilterSelection};
pub use prompt::{Category, Effort, Prompt, Selector};
pub use session::DriftSession;
pub use share::{share, share_text, Clipboard, ShareOutcome, SharePayload, ShareTarget};
pub use storage::{
    Config, FavoritesStore, FileStorage, KeyValueStorage, MemoryStorage, UnavailableStorage,
    SAVED_PROMPTS_KEY,
};
