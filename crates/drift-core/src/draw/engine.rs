//! Draw engine implementation.
//!
//! The draw engine is a tick-driven state machine for the animated card
//! reveal. It does not use internal threads or timers - the caller is
//! responsible for calling `tick()` once per shuffle interval, or `poll()`
//! with the current time.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Shuffling -> Settled -> Shuffling -> Settled ...
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = DrawEngine::new(ShuffleConfig::default());
//! engine.trigger(candidates);
//! // Every `interval_ms`:
//! engine.tick(); // Returns DrawSettled on the final step
//! ```

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use super::clock::{now_ms, Clock};
use crate::events::DrawEvent;
use crate::prompt::Prompt;

pub const DEFAULT_SHUFFLE_STEPS: u32 = 6;
pub const DEFAULT_SHUFFLE_INTERVAL_MS: u64 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawState {
    /// Nothing drawn yet.
    Idle,
    /// A shuffle sequence is in flight; new draw requests are ignored.
    Shuffling,
    /// A prompt has been committed.
    Settled,
}

/// Shape of the animated reveal.
///
/// Deserializing goes through [`ShuffleConfig::new`], so a stored zero is
/// clamped like any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawShuffleConfig")]
pub struct ShuffleConfig {
    /// Number of intermediate picks shown before the final pick commits.
    pub steps: u32,
    /// Milliseconds between ticks.
    pub interval_ms: u64,
}

impl ShuffleConfig {
    pub fn new(steps: u32, interval_ms: u64) -> Self {
        Self {
            steps: steps.max(1),
            interval_ms: interval_ms.max(1),
        }
    }
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SHUFFLE_STEPS, DEFAULT_SHUFFLE_INTERVAL_MS)
    }
}

#[derive(Deserialize)]
struct RawShuffleConfig {
    #[serde(default = "default_steps")]
    steps: u32,
    #[serde(default = "default_interval_ms")]
    interval_ms: u64,
}

fn default_steps() -> u32 {
    DEFAULT_SHUFFLE_STEPS
}

fn default_interval_ms() -> u64 {
    DEFAULT_SHUFFLE_INTERVAL_MS
}

impl From<RawShuffleConfig> for ShuffleConfig {
    fn from(raw: RawShuffleConfig) -> Self {
        Self::new(raw.steps, raw.interval_ms)
    }
}

/// Uniform pick over `candidates`. `None` when the pool is empty.
pub fn draw<'a, T, R>(candidates: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    candidates.choose(rng)
}

/// Bookkeeping for the shuffle currently in flight.
#[derive(Debug, Clone)]
struct ShuffleRun {
    candidates: Vec<Prompt>,
    ticks_done: u32,
    started_at_ms: u64,
    /// Prompt displayed before the shuffle began, restored on cancel.
    previous: Option<Prompt>,
}

/// Core draw engine.
///
/// Only the committed prompt and the draw counter are serialized; an
/// in-flight shuffle is not carried across a save/load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawEngine {
    #[serde(default)]
    config: ShuffleConfig,
    #[serde(default)]
    current: Option<Prompt>,
    #[serde(default)]
    draw_count: u64,
    #[serde(skip)]
    shuffle: Option<ShuffleRun>,
    #[serde(skip, default = "Mcg128Xsl64::from_entropy")]
    rng: Mcg128Xsl64,
}

impl DrawEngine {
    /// Create an idle engine seeded from OS entropy.
    pub fn new(config: ShuffleConfig) -> Self {
        Self::with_rng(config, Mcg128Xsl64::from_entropy())
    }

    /// Create an idle engine with a reproducible random sequence.
    pub fn with_seed(config: ShuffleConfig, seed: u64) -> Self {
        Self::with_rng(config, Mcg128Xsl64::seed_from_u64(seed))
    }

    fn with_rng(config: ShuffleConfig, rng: Mcg128Xsl64) -> Self {
        Self {
            config: ShuffleConfig::new(config.steps, config.interval_ms),
            current: None,
            draw_count: 0,
            shuffle: None,
            rng,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> DrawState {
        if self.shuffle.is_some() {
            DrawState::Shuffling
        } else if self.current.is_some() {
            DrawState::Settled
        } else {
            DrawState::Idle
        }
    }

    pub fn is_shuffling(&self) -> bool {
        self.shuffle.is_some()
    }

    /// Prompt currently on display: the committed one, or the latest
    /// intermediate pick while shuffling.
    pub fn current(&self) -> Option<&Prompt> {
        self.current.as_ref()
    }

    /// Number of completed draws. Only ever increases.
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }

    pub fn config(&self) -> ShuffleConfig {
        self.config
    }

    /// Ticks left before the shuffle in flight settles, counting the
    /// committing tick.
    pub fn remaining_steps(&self) -> u32 {
        self.shuffle
            .as_ref()
            .map(|run| (self.config.steps + 1).saturating_sub(run.ticks_done))
            .unwrap_or(0)
    }

    pub fn snapshot(&self) -> DrawEvent {
        DrawEvent::StateSnapshot {
            state: self.state(),
            current: self.current.clone(),
            draw_count: self.draw_count,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin an animated draw over `candidates`, timed from the wall clock.
    pub fn trigger(&mut self, candidates: Vec<Prompt>) -> DrawEvent {
        self.trigger_at(candidates, now_ms())
    }

    /// Begin an animated draw with an explicit start time for `poll()`.
    pub fn trigger_at(&mut self, candidates: Vec<Prompt>, now_ms: u64) -> DrawEvent {
        if self.shuffle.is_some() {
            tracing::debug!("draw ignored: shuffle already in flight");
            return DrawEvent::DrawIgnored { at: Utc::now() };
        }
        if candidates.is_empty() {
            tracing::debug!("draw skipped: no matching prompts");
            return DrawEvent::NoMatches { at: Utc::now() };
        }

        let count = candidates.len();
        self.shuffle = Some(ShuffleRun {
            candidates,
            ticks_done: 0,
            started_at_ms: now_ms,
            previous: self.current.clone(),
        });
        tracing::debug!(candidates = count, steps = self.config.steps, "shuffle started");
        DrawEvent::ShuffleStarted {
            candidates: count,
            steps: self.config.steps,
            interval_ms: self.config.interval_ms,
            at: Utc::now(),
        }
    }

    /// Draw without animation. Ignored while a shuffle is in flight.
    pub fn draw_now(&mut self, candidates: &[Prompt]) -> DrawEvent {
        if self.shuffle.is_some() {
            return DrawEvent::DrawIgnored { at: Utc::now() };
        }
        match draw(candidates, &mut self.rng) {
            Some(pick) => {
                let pick = pick.clone();
                self.commit(pick)
            }
            None => DrawEvent::NoMatches { at: Utc::now() },
        }
    }

    /// Advance the shuffle by one interval.
    ///
    /// Ticks `1..=steps` each show an intermediate pick and return
    /// `ShuffleStep`. The tick after that makes an independent pick,
    /// commits it and returns `DrawSettled`. Outside a shuffle this is a
    /// no-op.
    pub fn tick(&mut self) -> Option<DrawEvent> {
        let run = self.shuffle.as_mut()?;
        run.ticks_done += 1;
        let step = run.ticks_done;
        let pick = draw(&run.candidates, &mut self.rng)?.clone();

        if step <= self.config.steps {
            self.current = Some(pick.clone());
            return Some(DrawEvent::ShuffleStep {
                step,
                of: self.config.steps,
                prompt: pick,
                at: Utc::now(),
            });
        }

        self.shuffle = None;
        Some(self.commit(pick))
    }

    /// Apply every tick that has come due by `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> Vec<DrawEvent> {
        let mut events = Vec::new();
        while let Some(run) = self.shuffle.as_ref() {
            let elapsed = now_ms.saturating_sub(run.started_at_ms);
            let due = elapsed / self.config.interval_ms.max(1);
            if u64::from(run.ticks_done) >= due {
                break;
            }
            match self.tick() {
                Some(event) => events.push(event),
                None => break,
            }
        }
        events
    }

    pub fn poll_clock<C: Clock + ?Sized>(&mut self, clock: &C) -> Vec<DrawEvent> {
        self.poll(clock.now_ms())
    }

    /// Abandon the shuffle in flight, restoring the previously displayed
    /// prompt. The draw counter is not touched.
    pub fn cancel(&mut self) -> Option<DrawEvent> {
        let run = self.shuffle.take()?;
        self.current = run.previous;
        tracing::debug!("shuffle cancelled");
        Some(DrawEvent::ShuffleCancelled {
            restored: self.current.clone(),
            at: Utc::now(),
        })
    }

    pub fn set_config(&mut self, config: ShuffleConfig) {
        self.config = ShuffleConfig::new(config.steps, config.interval_ms);
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn commit(&mut self, pick: Prompt) -> DrawEvent {
        self.current = Some(pick.clone());
        self.draw_count += 1;
        tracing::debug!(id = %pick.id, draw_count = self.draw_count, "draw settled");
        DrawEvent::DrawSettled {
            prompt: pick,
            draw_count: self.draw_count,
            at: Utc::now(),
        }
    }
}

impl Default for DrawEngine {
    fn default() -> Self {
        Self::new(ShuffleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::ManualClock;
    use crate::prompt::{Category, Effort};

    fn prompt(id: &str) -> Prompt {
        Prompt {
            id: id.to_string(),
            text: format!("prompt {id}"),
            category: Category::Creative,
            effort: Effort::Quick,
            emoji: "◆".to_string(),
        }
    }

    fn pool(n: usize) -> Vec<Prompt> {
        (1..=n).map(|i| prompt(&i.to_string())).collect()
    }

    fn run_to_completion(engine: &mut DrawEngine) -> Vec<DrawEvent> {
        let mut events = Vec::new();
        while engine.is_shuffling() {
            events.extend(engine.tick());
        }
        events
    }

    #[test]
    fn trigger_tick_settle() {
        let mut engine = DrawEngine::with_seed(ShuffleConfig::default(), 7);
        assert_eq!(engine.state(), DrawState::Idle);

        let started = engine.trigger(pool(5));
        assert!(matches!(started, DrawEvent::ShuffleStarted { candidates: 5, steps: 6, .. }));
        assert_eq!(engine.state(), DrawState::Shuffling);

        let events = run_to_completion(&mut engine);
        assert_eq!(events.len(), 7);
        for (i, event) in events[..6].iter().enumerate() {
            assert!(
                matches!(event, DrawEvent::ShuffleStep { step, of: 6, .. } if *step as usize == i + 1),
                "unexpected {event:?}"
            );
        }
        assert!(matches!(events[6], DrawEvent::DrawSettled { draw_count: 1, .. }));
        assert_eq!(engine.state(), DrawState::Settled);
        assert_eq!(engine.draw_count(), 1);
        assert_eq!(engine.current(), events[6].settled_prompt());
    }

    #[test]
    fn second_trigger_while_shuffling_is_ignored() {
        let mut engine = DrawEngine::with_seed(ShuffleConfig::default(), 1);
        engine.trigger(pool(3));
        engine.tick();

        let again = engine.trigger(pool(3));
        assert!(matches!(again, DrawEvent::DrawIgnored { .. }));
        assert_eq!(engine.remaining_steps(), 6);

        run_to_completion(&mut engine);
        assert_eq!(engine.draw_count(), 1);
    }

    #[test]
    fn empty_pool_leaves_state_untouched() {
        let mut engine = DrawEngine::with_seed(ShuffleConfig::default(), 3);
        engine.trigger(pool(1));
        run_to_completion(&mut engine);
        let shown = engine.current().cloned();

        let event = engine.trigger(Vec::new());
        assert!(matches!(event, DrawEvent::NoMatches { .. }));
        assert_eq!(engine.state(), DrawState::Settled);
        assert_eq!(engine.current().cloned(), shown);
        assert_eq!(engine.draw_count(), 1);
    }

    #[test]
    fn single_candidate_always_wins() {
        let mut engine = DrawEngine::with_seed(ShuffleConfig::new(3, 10), 99);
        for round in 1..=5 {
            engine.trigger(vec![prompt("only")]);
            run_to_completion(&mut engine);
            assert_eq!(engine.current().unwrap().id, "only");
            assert_eq!(engine.draw_count(), round);
        }
    }

    #[test]
    fn tick_outside_shuffle_is_noop() {
        let mut engine = DrawEngine::with_seed(ShuffleConfig::default(), 5);
        assert!(engine.tick().is_none());
        assert_eq!(engine.draw_count(), 0);
    }

    #[test]
    fn poll_applies_due_ticks_only() {
        let clock = ManualClock::new(1_000);
        let mut engine = DrawEngine::with_seed(ShuffleConfig::new(6, 80), 11);
        engine.trigger_at(pool(4), clock.now_ms());

        clock.advance(79);
        assert!(engine.poll_clock(&clock).is_empty());

        clock.advance(1);
        assert_eq!(engine.poll_clock(&clock).len(), 1);

        clock.advance(240);
        assert_eq!(engine.poll_clock(&clock).len(), 3);
        assert!(engine.is_shuffling());

        clock.advance(10_000);
        let rest = engine.poll_clock(&clock);
        assert_eq!(rest.len(), 3);
        assert!(matches!(rest[1], DrawEvent::ShuffleStep { step: 6, .. }));
        assert!(matches!(rest[2], DrawEvent::DrawSettled { .. }));
        assert!(!engine.is_shuffling());
        assert!(engine.poll_clock(&clock).is_empty());
    }

    #[test]
    fn cancel_restores_previous_prompt() {
        let mut engine = DrawEngine::with_seed(ShuffleConfig::default(), 21);
        engine.trigger(vec![prompt("first")]);
        run_to_completion(&mut engine);

        engine.trigger(vec![prompt("second")]);
        engine.tick();
        assert_eq!(engine.current().unwrap().id, "second");

        let cancelled = engine.cancel().unwrap();
        assert!(matches!(cancelled, DrawEvent::ShuffleCancelled { restored: Some(ref p), .. } if p.id == "first"));
        assert_eq!(engine.current().unwrap().id, "first");
        assert_eq!(engine.draw_count(), 1);
        assert!(engine.cancel().is_none());
    }

    #[test]
    fn draw_now_commits_immediately() {
        let mut engine = DrawEngine::with_seed(ShuffleConfig::default(), 2);
        let event = engine.draw_now(&pool(2));
        assert!(matches!(event, DrawEvent::DrawSettled { draw_count: 1, .. }));
        assert!(matches!(engine.draw_now(&[]), DrawEvent::NoMatches { .. }));

        engine.trigger(pool(2));
        assert!(matches!(engine.draw_now(&pool(2)), DrawEvent::DrawIgnored { .. }));
        assert_eq!(engine.draw_count(), 1);
    }

    #[test]
    fn uniform_draw_frequencies() {
        let candidates = pool(4);
        let mut rng = Mcg128Xsl64::seed_from_u64(42);
        let mut hits = [0u32; 4];
        let samples = 40_000;
        for _ in 0..samples {
            let pick = draw(&candidates, &mut rng).unwrap();
            let idx: usize = pick.id.parse().unwrap();
            hits[idx - 1] += 1;
        }
        for count in hits {
            let freq = f64::from(count) / f64::from(samples);
            assert!((freq - 0.25).abs() < 0.02, "frequency {freq} too far from 0.25");
        }
    }

    #[test]
    fn serde_roundtrip_keeps_counter_and_prompt() {
        let mut engine = DrawEngine::with_seed(ShuffleConfig::default(), 8);
        engine.draw_now(&pool(3));
        engine.draw_now(&pool(3));

        let json = serde_json::to_string(&engine).unwrap();
        let restored: DrawEngine = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.draw_count(), 2);
        assert_eq!(restored.current(), engine.current());
        assert_eq!(restored.state(), DrawState::Settled);
    }

    #[test]
    fn config_is_clamped() {
        let config = ShuffleConfig::new(0, 0);
        assert_eq!(config.steps, 1);
        assert_eq!(config.interval_ms, 1);

        let mut engine = DrawEngine::with_seed(config, 4);
        engine.trigger(pool(2));
        assert!(matches!(engine.tick(), Some(DrawEvent::ShuffleStep { step: 1, of: 1, .. })));
        assert!(matches!(engine.tick(), Some(DrawEvent::DrawSettled { .. })));
    }

    #[test]
    fn stored_zero_config_is_clamped_on_load() {
        let mut engine: DrawEngine =
            serde_json::from_str(r#"{"config":{"steps":0,"interval_ms":0}}"#).unwrap();
        assert_eq!(engine.config(), ShuffleConfig::new(1, 1));

        engine.trigger_at(pool(2), 0);
        let events = engine.poll(10);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], DrawEvent::DrawSettled { .. }));
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: ShuffleConfig = serde_json::from_str(r#"{"interval_ms":25}"#).unwrap();
        assert_eq!(config, ShuffleConfig::new(DEFAULT_SHUFFLE_STEPS, 25));
    }
}
