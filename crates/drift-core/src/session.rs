//! The surface a presentation layer drives.
//!
//! A [`DriftSession`] ties the catalog, the current filter selection, the
//! draw engine and an injected favorites store together, so a UI only has
//! to forward user input and render what comes back.

use crate::catalog::Catalog;
use crate::draw::DrawEngine;
use crate::events::DrawEvent;
use crate::filter::{filter, FilterSelection};
use crate::prompt::{Category, Effort, Prompt, Selector};
use crate::share::{share, Clipboard, ShareOutcome, SharePayload, ShareTarget};
use crate::storage::{FavoritesStore, KeyValueStorage, ShareConfig};

pub struct DriftSession<S> {
    catalog: Catalog,
    selection: FilterSelection,
    engine: DrawEngine,
    favorites: FavoritesStore<S>,
    share_config: ShareConfig,
}

impl<S: KeyValueStorage> DriftSession<S> {
    pub fn new(catalog: Catalog, engine: DrawEngine, favorites: FavoritesStore<S>) -> Self {
        Self {
            catalog,
            selection: FilterSelection::default(),
            engine,
            favorites,
            share_config: ShareConfig::default(),
        }
    }

    pub fn with_share_config(mut self, share_config: ShareConfig) -> Self {
        self.share_config = share_config;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // ── Filters ──────────────────────────────────────────────────────

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Changing the filters never touches the prompt on display.
    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
    }

    pub fn select_category(&mut self, category: Selector<Category>) {
        self.selection.category = category;
    }

    pub fn select_effort(&mut self, effort: Selector<Effort>) {
        self.selection.effort = effort;
    }

    pub fn candidates(&self) -> Vec<&Prompt> {
        filter(self.catalog.prompts(), &self.selection)
    }

    // ── Drawing ──────────────────────────────────────────────────────

    pub fn engine(&self) -> &DrawEngine {
        &self.engine
    }

    pub fn into_engine(self) -> DrawEngine {
        self.engine
    }

    /// Start an animated draw over the current candidates.
    pub fn trigger_draw(&mut self) -> DrawEvent {
        let pool = self.candidate_pool();
        self.engine.trigger(pool)
    }

    pub fn trigger_draw_at(&mut self, now_ms: u64) -> DrawEvent {
        let pool = self.candidate_pool();
        self.engine.trigger_at(pool, now_ms)
    }

    pub fn tick(&mut self) -> Option<DrawEvent> {
        self.engine.tick()
    }

    pub fn poll(&mut self, now_ms: u64) -> Vec<DrawEvent> {
        self.engine.poll(now_ms)
    }

    /// Draw without the shuffle animation.
    pub fn draw_now(&mut self) -> DrawEvent {
        let pool = self.candidate_pool();
        self.engine.draw_now(&pool)
    }

    /// Stop a shuffle in flight, e.g. when the view is torn down.
    pub fn cancel(&mut self) -> Option<DrawEvent> {
        self.engine.cancel()
    }

    pub fn current(&self) -> Option<&Prompt> {
        self.engine.current()
    }

    pub fn is_shuffling(&self) -> bool {
        self.engine.is_shuffling()
    }

    pub fn draw_count(&self) -> u64 {
        self.engine.draw_count()
    }

    // ── Favorites ────────────────────────────────────────────────────

    pub fn favorites(&self) -> &FavoritesStore<S> {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut FavoritesStore<S> {
        &mut self.favorites
    }

    pub fn is_current_saved(&self) -> bool {
        self.current()
            .map(|p| self.favorites.contains(&p.id))
            .unwrap_or(false)
    }

    /// Save or unsave the prompt on display. `None` when nothing is shown.
    pub fn toggle_save_current(&mut self) -> Option<bool> {
        let id = self.engine.current()?.id.clone();
        Some(self.favorites.toggle(&id))
    }

    pub fn saved_prompts(&self) -> Vec<&Prompt> {
        self.favorites.resolve(&self.catalog)
    }

    // ── Sharing ──────────────────────────────────────────────────────

    pub fn share_payload(&self, prompt: &Prompt) -> SharePayload {
        SharePayload::for_prompt(prompt, &self.share_config)
    }

    /// Share the prompt on display. `None` when nothing is shown.
    pub fn share_current(
        &self,
        native: Option<&dyn ShareTarget>,
        clipboard: &dyn Clipboard,
    ) -> Option<ShareOutcome> {
        let payload = self.share_payload(self.current()?);
        Some(share(payload, native, clipboard))
    }

    fn candidate_pool(&self) -> Vec<Prompt> {
        self.candidates().into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::ShuffleConfig;
    use crate::share::NoClipboard;
    use crate::storage::MemoryStorage;

    fn session() -> DriftSession<MemoryStorage> {
        let catalog = Catalog::bundled().unwrap();
        let engine = DrawEngine::with_seed(ShuffleConfig::default(), 5);
        DriftSession::new(catalog, engine, FavoritesStore::open(MemoryStorage::new()))
    }

    fn settle(session: &mut DriftSession<MemoryStorage>) {
        while session.is_shuffling() {
            session.tick();
        }
    }

    #[test]
    fn draw_respects_selection() {
        let mut s = session();
        s.select_category(Selector::Only(Category::Wellness));
        s.select_effort(Selector::Only(Effort::Quick));
        for _ in 0..10 {
            s.trigger_draw();
            settle(&mut s);
            let p = s.current().unwrap();
            assert_eq!(p.category, Category::Wellness);
            assert_eq!(p.effort, Effort::Quick);
        }
        assert_eq!(s.draw_count(), 10);
    }

    #[test]
    fn changing_filters_keeps_displayed_prompt() {
        let mut s = session();
        s.draw_now();
        let shown = s.current().cloned();
        s.select_category(Selector::parse("nothing-matches"));
        assert_eq!(s.current().cloned(), shown);

        assert!(matches!(s.trigger_draw(), DrawEvent::NoMatches { .. }));
        assert_eq!(s.current().cloned(), shown);
        assert_eq!(s.draw_count(), 1);
    }

    #[test]
    fn toggle_save_current() {
        let mut s = session();
        assert_eq!(s.toggle_save_current(), None);

        s.draw_now();
        assert_eq!(s.toggle_save_current(), Some(true));
        assert!(s.is_current_saved());
        assert_eq!(s.saved_prompts().len(), 1);

        assert_eq!(s.toggle_save_current(), Some(false));
        assert!(!s.is_current_saved());
    }

    #[test]
    fn share_current_needs_a_prompt() {
        let mut s = session();
        assert!(s.share_current(None, &NoClipboard).is_none());
        s.draw_now();
        let outcome = s.share_current(None, &NoClipboard).unwrap();
        assert!(matches!(outcome, ShareOutcome::Unavailable { .. }));
    }
}
