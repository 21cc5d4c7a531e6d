//! Prompt records and the closed category/effort enumerations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Activity category of a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Creative,
    Social,
    Outdoors,
    Learning,
    Wellness,
    Chaos,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Creative,
        Category::Social,
        Category::Outdoors,
        Category::Learning,
        Category::Wellness,
        Category::Chaos,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Creative => "creative",
            Category::Social => "social",
            Category::Outdoors => "outdoors",
            Category::Learning => "learning",
            Category::Wellness => "wellness",
            Category::Chaos => "chaos",
        }
    }

    /// Glyph shown next to the category name.
    pub fn icon(self) -> &'static str {
        match self {
            Category::Creative => "◆",
            Category::Social => "◈",
            Category::Outdoors => "▲",
            Category::Learning => "●",
            Category::Wellness => "○",
            Category::Chaos => "✶",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Category::Creative => "Art, writing, making",
            Category::Social => "Connection, people",
            Category::Outdoors => "Nature, exploration",
            Category::Learning => "Skills, knowledge",
            Category::Wellness => "Mind, body, rest",
            Category::Chaos => "The unexpected",
        }
    }
}

/// How much time and commitment a prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Quick,
    Committed,
    Fullsend,
}

impl Effort {
    pub const ALL: [Effort; 3] = [Effort::Quick, Effort::Committed, Effort::Fullsend];

    pub fn as_str(self) -> &'static str {
        match self {
            Effort::Quick => "quick",
            Effort::Committed => "committed",
            Effort::Fullsend => "fullsend",
        }
    }

    /// Short label used by the effort toggle.
    pub fn label(self) -> &'static str {
        match self {
            Effort::Quick => "QUICK",
            Effort::Committed => "DEEP",
            Effort::Fullsend => "ALL IN",
        }
    }

    /// Rough time commitment.
    pub fn duration_hint(self) -> &'static str {
        match self {
            Effort::Quick => "5-15 MIN",
            Effort::Committed => "30-60 MIN",
            Effort::Fullsend => "2+ HOURS",
        }
    }

    /// Stamp printed on a drawn card.
    pub fn stamp(self) -> &'static str {
        match self {
            Effort::Quick => "QUICK HIT",
            Effort::Committed => "DEEP DIVE",
            Effort::Fullsend => "ALL IN",
        }
    }
}

macro_rules! impl_display_from_str {
    ($ty:ty, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim().to_ascii_lowercase();
                Self::ALL
                    .into_iter()
                    .find(|v| v.as_str() == needle)
                    .ok_or_else(|| format!("unknown {}: {}", $what, s))
            }
        }
    };
}

impl_display_from_str!(Category, "category");
impl_display_from_str!(Effort, "effort");

/// A single activity suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub text: String,
    pub category: Category,
    pub effort: Effort,
    /// Display-only decoration.
    #[serde(default)]
    pub emoji: String,
}

/// A filter selector: everything, one concrete value, or a value that
/// could not be recognised.
///
/// Unrecognised values match nothing rather than raising an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector<T> {
    All,
    Only(T),
    Unknown(String),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Selector::All
    }
}

impl<T: PartialEq> Selector<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => wanted == value,
            Selector::Unknown(_) => false,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }
}

impl<T: FromStr> Selector<T> {
    /// Parse a selector; `"all"` (any case) is the wildcard.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Selector::All;
        }
        match trimmed.parse::<T>() {
            Ok(value) => Selector::Only(value),
            Err(_) => Selector::Unknown(trimmed.to_string()),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str("all"),
            Selector::Only(value) => value.fmt(f),
            Selector::Unknown(raw) => f.write_str(raw),
        }
    }
}

impl<T: fmt::Display> Serialize for Selector<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T: FromStr> Deserialize<'de> for Selector<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Selector::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_roundtrips_through_str() {
        for cat in Category::ALL {
            assert_eq!(cat.as_str().parse::<Category>().unwrap(), cat);
        }
        assert_eq!("  Chaos ".parse::<Category>().unwrap(), Category::Chaos);
        assert!("cooking".parse::<Category>().is_err());
    }

    #[test]
    fn effort_serializes_lowercase() {
        let json = serde_json::to_string(&Effort::Fullsend).unwrap();
        assert_eq!(json, "\"fullsend\"");
    }

    #[test]
    fn selector_parse_handles_all_and_unknown() {
        assert_eq!(Selector::<Category>::parse("ALL"), Selector::All);
        assert_eq!(
            Selector::<Category>::parse("social"),
            Selector::Only(Category::Social)
        );
        assert_eq!(
            Selector::<Effort>::parse("leisurely"),
            Selector::Unknown("leisurely".to_string())
        );
    }

    #[test]
    fn unknown_selector_matches_nothing() {
        let sel = Selector::<Effort>::parse("eventually");
        assert!(Effort::ALL.iter().all(|e| !sel.matches(e)));
    }

    #[test]
    fn prompt_deserializes_without_emoji() {
        let json = r#"{"id":"7","text":"Go outside","category":"outdoors","effort":"quick"}"#;
        let prompt: Prompt = serde_json::from_str(json).unwrap();
        assert_eq!(prompt.category, Category::Outdoors);
        assert!(prompt.emoji.is_empty());
    }
}
