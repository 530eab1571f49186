//! Project category vocabulary.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The category a project is listed under.
///
/// The platform curates a fixed set of categories; documents written by older
/// clients may carry values outside it, which round-trip through [`Category::Other`]
/// rather than failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Technology,
    Art,
    Music,
    Film,
    Games,
    Publishing,
    Food,
    Fashion,
    Health,
    /// A category value this client does not recognize.
    Other(String),
}

impl Category {
    /// All curated categories, in display order.
    pub const CURATED: [Self; 9] = [
        Self::Technology,
        Self::Art,
        Self::Music,
        Self::Film,
        Self::Games,
        Self::Publishing,
        Self::Food,
        Self::Fashion,
        Self::Health,
    ];

    /// The canonical lowercase name stored in project documents.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Technology => "technology",
            Self::Art => "art",
            Self::Music => "music",
            Self::Film => "film",
            Self::Games => "games",
            Self::Publishing => "publishing",
            Self::Food => "food",
            Self::Fashion => "fashion",
            Self::Health => "health",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.as_str() {
            "technology" => Self::Technology,
            "art" => Self::Art,
            "music" => Self::Music,
            "film" => Self::Film,
            "games" => Self::Games,
            "publishing" => Self::Publishing,
            "food" => Self::Food,
            "fashion" => Self::Fashion,
            "health" => Self::Health,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(s) => s,
            other => other.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
