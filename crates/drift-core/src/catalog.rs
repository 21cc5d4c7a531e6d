//! The prompt catalog.
//!
//! Loaded once per process from the bundled JSON asset (or a file given on
//! the command line) and shared read-only afterwards. Cloning a [`Catalog`]
//! is cheap.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::error::CatalogError;
use crate::prompt::Prompt;

const BUNDLED_PROMPTS: &str = include_str!("../data/prompts.json");

/// Immutable, ordered collection of prompts with unique ids.
#[derive(Debug, Clone)]
pub struct Catalog {
    prompts: Arc<[Prompt]>,
}

impl Catalog {
    /// Load the catalog compiled into the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_PROMPTS)
    }

    /// Parse a JSON array of prompt records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let prompts: Vec<Prompt> = serde_json::from_str(json)?;
        Self::from_prompts(prompts)
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Build a catalog from records, rejecting empty or duplicate ids and
    /// empty text.
    pub fn from_prompts(prompts: Vec<Prompt>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(prompts.len());
        for (index, prompt) in prompts.iter().enumerate() {
            if prompt.id.trim().is_empty() {
                return Err(CatalogError::EmptyId(index));
            }
            if prompt.text.trim().is_empty() {
                return Err(CatalogError::EmptyText(prompt.id.clone()));
            }
            if !seen.insert(prompt.id.as_str()) {
                return Err(CatalogError::DuplicateId(prompt.id.clone()));
            }
        }
        tracing::debug!(count = prompts.len(), "catalog loaded");
        Ok(Self {
            prompts: prompts.into(),
        })
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Prompt> {
        self.prompts.iter().find(|p| p.id == id)
    }

    /// Prompts whose ids are in `ids`, in catalog order. Unknown ids are skipped.
    pub fn resolve<S: AsRef<str>>(&self, ids: &[S]) -> Vec<&Prompt> {
        let wanted: HashSet<&str> = ids.iter().map(|id| id.as_ref()).collect();
        self.prompts
            .iter()
            .filter(|p| wanted.contains(p.id.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{Category, Effort};

    fn prompt(id: &str, text: &str) -> Prompt {
        Prompt {
            id: id.to_string(),
            text: text.to_string(),
            category: Category::Chaos,
            effort: Effort::Quick,
            emoji: "✶".to_string(),
        }
    }

    #[test]
    fn bundled_catalog_loads() {
        let catalog = Catalog::bundled().unwrap();
        assert!(catalog.len() >= 36);
        for cat in Category::ALL {
            assert!(
                catalog.prompts().iter().any(|p| p.category == cat),
                "no prompts for {cat}"
            );
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::from_prompts(vec![prompt("1", "a"), prompt("1", "b")]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "1"));
    }

    #[test]
    fn rejects_empty_id_and_text() {
        let err = Catalog::from_prompts(vec![prompt("1", "a"), prompt(" ", "b")]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyId(1)));

        let err = Catalog::from_prompts(vec![prompt("1", "")]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyText(_)));
    }

    #[test]
    fn resolve_keeps_catalog_order_and_skips_unknown() {
        let catalog =
            Catalog::from_prompts(vec![prompt("1", "a"), prompt("2", "b"), prompt("3", "c")])
                .unwrap();
        let found = catalog.resolve(&["3", "missing", "1"]);
        let ids: Vec<&str> = found.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Catalog::from_json("{not json").unwrap_err();
        assert!(matches!(err, CatalogError::ParseFailed(_)));
    }
}
