//! Domain types for the book catalogue

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Book identifier, a GraphQL `Int`
pub type BookId = i32;

/// A catalogue entry. Title and author are both optional and never validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Identifier assigned by the store at insertion time
    pub id: BookId,
    /// Book title
    #[serde(default)]
    pub title: Option<String>,
    /// Book author
    #[serde(default)]
    pub author: Option<String>,
}

impl Book {
    /// Create a book with both fields present
    pub fn new(id: BookId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: Some(title.into()),
            author: Some(author.into()),
        }
    }
}

/// Rule used to pick the id of a newly inserted book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdPolicy {
    /// Monotonic counter starting after the highest seeded id; ids are never reused
    #[default]
    Sequential,
    /// Id equals the collection length before the insert. Collides with seeded ids.
    Length,
}

impl FromStr for IdPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequential" => Ok(IdPolicy::Sequential),
            "length" => Ok(IdPolicy::Length),
            other => Err(format!(
                "Invalid id policy: {}. Valid options: sequential, length",
                other
            )),
        }
    }
}

impl fmt::Display for IdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdPolicy::Sequential => f.write_str("sequential"),
            IdPolicy::Length => f.write_str("length"),
        }
    }
}

/// The two records every default store starts with
pub fn default_seed() -> Vec<Book> {
    vec![
        Book::new(1, "The Awakening", "Kate Chopin"),
        Book::new(2, "City of Glass", "Paul Auster"),
    ]
}
