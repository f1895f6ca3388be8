//! Resolver layer
//!
//! Maps named query/mutation operations onto [`BookStore`] calls through an
//! explicit routing table. Nothing here depends on the GraphQL executor or
//! the HTTP server, so the table can be driven directly from tests.
//!
//! A lookup that finds nothing resolves to `null`, never to an error.

use crate::core::error::ResolverError;
use crate::core::types::{Book, BookId};
use crate::storage::SharedStore;
use crate::system::metrics::Metrics;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Operation names as exposed to clients
pub mod names {
    /// List every book
    pub const BOOKS: &str = "books";
    /// Look up a single book by id
    pub const BOOK: &str = "book";
    /// Append a new book
    pub const ADD_BOOK: &str = "addBook";
}

/// Whether an operation reads or changes state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Read-only operation
    Query,
    /// State-changing operation
    Mutation,
}

impl OperationKind {
    /// Lowercase name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
        }
    }
}

/// Handler signature stored in the routing table
pub type Handler = fn(&Resolver, &Value) -> Result<Value, ResolverError>;

#[derive(Clone, Copy)]
struct Route {
    kind: OperationKind,
    handler: Handler,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BookArgs {
    id: BookId,
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct AddBookArgs {
    title: Option<String>,
    author: Option<String>,
}

/// Operation routing table bound to a store
#[derive(Clone)]
pub struct Resolver {
    store: SharedStore,
    metrics: Arc<Metrics>,
    routes: BTreeMap<&'static str, Route>,
}

impl Resolver {
    /// Create a resolver with the `books`, `book` and `addBook` operations registered
    pub fn new(store: SharedStore, metrics: Arc<Metrics>) -> Self {
        let mut resolver = Self {
            store,
            metrics,
            routes: BTreeMap::new(),
        };

        resolver.register(names::BOOKS, OperationKind::Query, resolve_books);
        resolver.register(names::BOOK, OperationKind::Query, resolve_book);
        resolver.register(names::ADD_BOOK, OperationKind::Mutation, resolve_add_book);

        resolver
    }

    fn register(&mut self, name: &'static str, kind: OperationKind, handler: Handler) {
        self.routes.insert(name, Route { kind, handler });
    }

    /// Store this resolver reads and writes
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Registered operations, ordered by name
    pub fn operations(&self) -> Vec<(&'static str, OperationKind)> {
        self.routes.iter().map(|(name, route)| (*name, route.kind)).collect()
    }

    /// Metrics this resolver records into
    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Dispatch a named operation with JSON arguments
    ///
    /// `args` may be `null` or an object. The result is the operation's
    /// output encoded as JSON, with `null` for an absent book.
    pub fn resolve(&self, name: &str, args: &Value) -> Result<Value, ResolverError> {
        let route = self
            .routes
            .get(name)
            .ok_or_else(|| ResolverError::UnknownOperation(name.to_string()))?;

        tracing::trace!(operation = name, kind = route.kind.as_str(), "Dispatching operation");
        (route.handler)(self, args)
    }

    /// `books` query
    pub fn books(&self) -> Vec<Book> {
        let timer = self.metrics.start_timer();
        self.metrics.record_operation(names::BOOKS);

        let books = self.store.list_all();
        timer.finish();
        books
    }

    /// `book(id)` query
    pub fn book(&self, id: BookId) -> Option<Book> {
        let timer = self.metrics.start_timer();
        self.metrics.record_operation(names::BOOK);

        let book = self.store.find_by_id(id);
        if book.is_none() {
            tracing::debug!(id, "No book with this id");
        }
        timer.finish();
        book
    }

    /// `addBook(title, author)` mutation
    pub fn add_book(&self, title: Option<String>, author: Option<String>) -> Result<Book, ResolverError> {
        let timer = self.metrics.start_timer();
        self.metrics.record_operation(names::ADD_BOOK);

        let result = self.store.insert(title, author);
        match &result {
            Ok(_) => {
                self.metrics.books_added.inc();
                self.metrics.books_stored.set(self.store.len() as i64);
            }
            Err(e) => tracing::warn!("addBook rejected: {}", e),
        }
        timer.finish();
        result.map_err(ResolverError::from)
    }
}

fn parse_args<T>(operation: &str, args: &Value) -> Result<T, ResolverError>
where
    T: for<'de> Deserialize<'de>,
{
    let args = match args {
        Value::Null => Value::Object(Default::default()),
        other => other.clone(),
    };

    serde_json::from_value(args)
        .map_err(|e| ResolverError::invalid_arguments(operation, e.to_string()))
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Value, ResolverError> {
    serde_json::to_value(value).map_err(|e| ResolverError::Encoding(e.to_string()))
}

fn resolve_books(resolver: &Resolver, args: &Value) -> Result<Value, ResolverError> {
    match args {
        Value::Null => {}
        Value::Object(map) if map.is_empty() => {}
        _ => return Err(ResolverError::invalid_arguments(names::BOOKS, "takes no arguments")),
    }
    encode(&resolver.books())
}

fn resolve_book(resolver: &Resolver, args: &Value) -> Result<Value, ResolverError> {
    let BookArgs { id } = parse_args(names::BOOK, args)?;
    encode(&resolver.book(id))
}

fn resolve_add_book(resolver: &Resolver, args: &Value) -> Result<Value, ResolverError> {
    let AddBookArgs { title, author } = parse_args(names::ADD_BOOK, args)?;
    encode(&resolver.add_book(title, author)?)
}
