//! Category/effort filtering over the catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::prompt::{Category, Effort, Prompt, Selector};

/// Current filter controls. Transient, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub category: Selector<Category>,
    #[serde(default)]
    pub effort: Selector<Effort>,
}

impl FilterSelection {
    pub fn new(category: Selector<Category>, effort: Selector<Effort>) -> Self {
        Self { category, effort }
    }

    /// Parse both selectors from raw strings; unknown values fail closed.
    pub fn parse(category: &str, effort: &str) -> Self {
        Self::new(Selector::parse(category), Selector::parse(effort))
    }

    pub fn matches(&self, prompt: &Prompt) -> bool {
        self.category.matches(&prompt.category) && self.effort.matches(&prompt.effort)
    }
}

/// Prompts matching `selection`, in their original order.
pub fn filter<'a>(prompts: &'a [Prompt], selection: &FilterSelection) -> Vec<&'a Prompt> {
    prompts.iter().filter(|p| selection.matches(p)).collect()
}

/// Per-category and per-effort counts for a set of prompts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCounts {
    pub total: usize,
    pub by_category: BTreeMap<String, usize>,
    pub by_effort: BTreeMap<String, usize>,
}

pub fn counts<'a, I>(prompts: I) -> FilterCounts
where
    I: IntoIterator<Item = &'a Prompt>,
{
    let mut out = FilterCounts::default();
    for prompt in prompts {
        out.total += 1;
        *out
            .by_category
            .entry(prompt.category.to_string())
            .or_default() += 1;
        *out.by_effort.entry(prompt.effort.to_string()).or_default() += 1;
    }
    out
}
