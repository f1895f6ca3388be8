//! In-memory book store.
//!
//! Books are held in insertion order behind a single `RwLock`, together with
//! the next id for the `Sequential` policy. Reads clone out of a shared lock;
//! `insert` assigns the id and appends under the exclusive lock, so each
//! insert is atomic even when the host runtime serves requests concurrently.
//!
//! Nothing is ever removed or updated in place. An id is never handed out
//! twice under the `Sequential` policy; once the counter passes
//! `BookId::MAX` inserts fail with [`StoreError::IdSpaceExhausted`].

use crate::core::error::StoreError;
use crate::core::types::{default_seed, Book, BookId, IdPolicy};
use parking_lot::RwLock;

#[derive(Debug)]
struct Inner {
    books: Vec<Book>,
    // None once BookId::MAX has been used
    next_id: Option<BookId>,
}

/// Owned, ordered collection of books
#[derive(Debug)]
pub struct BookStore {
    inner: RwLock<Inner>,
    policy: IdPolicy,
}

impl BookStore {
    /// Create an empty store
    pub fn new(policy: IdPolicy) -> Self {
        Self::with_seed(Vec::new(), policy)
    }

    /// Create a store holding the two default books
    pub fn seeded(policy: IdPolicy) -> Self {
        Self::with_seed(default_seed(), policy)
    }

    /// Create a store starting with the given books, in order
    pub fn with_seed(books: Vec<Book>, policy: IdPolicy) -> Self {
        let next_id = match books.iter().map(|b| b.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        };

        Self {
            inner: RwLock::new(Inner { books, next_id }),
            policy,
        }
    }

    /// Id assignment policy in use
    pub fn policy(&self) -> IdPolicy {
        self.policy
    }

    /// All books, in insertion order
    pub fn list_all(&self) -> Vec<Book> {
        self.inner.read().books.clone()
    }

    /// First book with the given id, if any
    pub fn find_by_id(&self, id: BookId) -> Option<Book> {
        self.inner.read().books.iter().find(|book| book.id == id).cloned()
    }

    /// Append a new book and return it
    pub fn insert(&self, title: Option<String>, author: Option<String>) -> Result<Book, StoreError> {
        let mut inner = self.inner.write();

        let id = match self.policy {
            IdPolicy::Sequential => {
                let id = inner.next_id.ok_or(StoreError::IdSpaceExhausted)?;
                inner.next_id = id.checked_add(1);
                id
            }
            IdPolicy::Length => BookId::try_from(inner.books.len())
                .map_err(|_| StoreError::IdSpaceExhausted)?,
        };

        let book = Book { id, title, author };
        inner.books.push(book.clone());

        tracing::debug!(id = book.id, policy = %self.policy, "Book added");
        Ok(book)
    }

    /// Number of books held
    pub fn len(&self) -> usize {
        self.inner.read().books.len()
    }

    /// Whether the store holds no books
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::seeded(IdPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_seeded_store() {
        let store = BookStore::seeded(IdPolicy::Sequential);
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.find_by_id(1),
            Some(Book::new(1, "The Awakening", "Kate Chopin"))
        );
        assert_eq!(store.find_by_id(999), None);
    }

    #[test]
    fn test_empty_store() {
        let store = BookStore::new(IdPolicy::Sequential);
        assert!(store.is_empty());
        assert_eq!(store.insert(None, None).unwrap().id, 1);
    }

    #[test]
    fn test_sequential_policy_skips_seeded_ids() {
        let store = BookStore::seeded(IdPolicy::Sequential);
        let dune = store.insert(some("Dune"), some("Frank Herbert")).unwrap();
        assert_eq!(dune.id, 3);
        assert_eq!(store.find_by_id(3), Some(dune));
        assert_eq!(store.find_by_id(2).unwrap().title.as_deref(), Some("City of Glass"));
    }

    #[test]
    fn test_length_policy_collides_with_seed() {
        let store = BookStore::seeded(IdPolicy::Length);
        let dune = store.insert(some("Dune"), some("Frank Herbert")).unwrap();
        assert_eq!(dune, Book::new(2, "Dune", "Frank Herbert"));

        // First match wins, so the seeded record shadows the new one
        assert_eq!(store.find_by_id(2).unwrap().title.as_deref(), Some("City of Glass"));
        assert_eq!(store.list_all().iter().filter(|b| b.id == 2).count(), 2);
    }

    #[test]
    fn test_insert_without_fields() {
        let store = BookStore::seeded(IdPolicy::Sequential);
        let book = store.insert(None, None).unwrap();
        assert_eq!(book.title, None);
        assert_eq!(book.author, None);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_sequential_counter_follows_sparse_seed() {
        let store = BookStore::with_seed(vec![Book::new(40, "a", "b"), Book::new(7, "c", "d")], IdPolicy::Sequential);
        assert_eq!(store.insert(None, None).unwrap().id, 41);
        assert_eq!(store.insert(None, None).unwrap().id, 42);
    }

    #[test]
    fn test_sequential_never_reuses_max_id() {
        let store = BookStore::with_seed(vec![Book::new(BookId::MAX - 1, "a", "b")], IdPolicy::Sequential);
        assert_eq!(store.insert(None, None), Ok(Book { id: BookId::MAX, title: None, author: None }));
        assert_eq!(store.insert(None, None), Err(StoreError::IdSpaceExhausted));
        assert_eq!(store.insert(None, None), Err(StoreError::IdSpaceExhausted));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_seed_at_max_id_rejects_inserts() {
        let store = BookStore::with_seed(vec![Book::new(BookId::MAX, "a", "b")], IdPolicy::Sequential);
        assert_eq!(store.insert(None, None), Err(StoreError::IdSpaceExhausted));
        assert_eq!(store.list_all(), vec![Book::new(BookId::MAX, "a", "b")]);
    }

    #[test]
    fn test_list_all_is_idempotent() {
        let store = BookStore::seeded(IdPolicy::Sequential);
        store.insert(some("Dune"), None).unwrap();
        assert_eq!(store.list_all(), store.list_all());
    }

    #[test]
    fn test_concurrent_inserts_get_distinct_ids() {
        let store = Arc::new(BookStore::seeded(IdPolicy::Sequential));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    (0..50).map(|_| store.insert(None, None).unwrap().id).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(ids.insert(id), "duplicate id {}", id);
            }
        }
        assert_eq!(store.len(), 2 + 8 * 50);
    }

    proptest! {
        #[test]
        fn prop_list_is_seed_then_inserts(
            inputs in prop::collection::vec(
                (prop::option::of("[a-zA-Z ]{0,12}"), prop::option::of("[a-zA-Z ]{0,12}")),
                0..32,
            ),
            length_policy in any::<bool>(),
        ) {
            let policy = if length_policy { IdPolicy::Length } else { IdPolicy::Sequential };
            let store = BookStore::seeded(policy);
            let mut added = Vec::new();

            for (title, author) in inputs.iter().cloned() {
                added.push(store.insert(title, author).unwrap());
                prop_assert_eq!(store.list_all().len(), 2 + added.len());
            }

            let mut expected = default_seed();
            expected.extend(added.iter().cloned());
            prop_assert_eq!(store.list_all(), expected);
            prop_assert_eq!(store.len(), 2 + inputs.len());

            for (book, (title, author)) in added.iter().zip(inputs.iter()) {
                prop_assert_eq!(&book.title, title);
                prop_assert_eq!(&book.author, author);
            }
        }

        #[test]
        fn prop_sequential_ids_increase(count in 1usize..64) {
            let store = BookStore::seeded(IdPolicy::Sequential);
            let ids: Vec<BookId> = (0..count).map(|_| store.insert(None, None).unwrap().id).collect();

            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(ids.iter().all(|id| *id > 2));
        }
    }
}
