mod clock;
mod engine;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{
    draw, DrawEngine, DrawState, ShuffleConfig, DEFAULT_SHUFFLE_INTERVAL_MS,
    DEFAULT_SHUFFLE_STEPS,
};
