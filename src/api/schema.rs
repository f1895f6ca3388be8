//! GraphQL schema for the book catalogue
//!
//! Every field delegates to the [`Resolver`] stored in the schema's context
//! data; the types here only declare the shape clients see.

use async_graphql::{Context, EmptySubscription, Object, Result, Schema};

use crate::core::types::{Book, BookId};
use crate::resolver::Resolver;

/// Executable schema type
pub type BookSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema around a resolver
pub fn build_schema(resolver: Resolver) -> BookSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(resolver)
        .finish()
}

/// Schema definition language text for the catalogue
pub fn schema_sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

/// Queryable fields of a book
#[Object]
impl Book {
    /// Identifier assigned when the book was added
    async fn id(&self) -> BookId {
        self.id
    }

    async fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    async fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }
}

/// Root type for all GraphQL queries
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Every book, in the order it was added
    async fn books(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        Ok(ctx.data::<Resolver>()?.books())
    }

    /// The first book with this id, or null
    async fn book(&self, ctx: &Context<'_>, id: BookId) -> Result<Option<Book>> {
        Ok(ctx.data::<Resolver>()?.book(id))
    }
}

/// Root type for all GraphQL mutations
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Append a book. Neither field is required.
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        title: Option<String>,
        author: Option<String>,
    ) -> Result<Book> {
        Ok(ctx.data::<Resolver>()?.add_book(title, author)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::IdPolicy;
    use crate::storage::BookStore;
    use crate::system::metrics::Metrics;
    use serde_json::json;
    use std::sync::Arc;

    fn schema_over(store: BookStore) -> BookSchema {
        build_schema(Resolver::new(Arc::new(store), Arc::new(Metrics::new().unwrap())))
    }

    fn schema(policy: IdPolicy) -> BookSchema {
        schema_over(BookStore::seeded(policy))
    }

    async fn run(schema: &BookSchema, query: &str) -> serde_json::Value {
        let response = schema.execute(query).await;
        assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
        response.data.into_json().unwrap()
    }

    #[tokio::test]
    async fn test_books_query() {
        let schema = schema(IdPolicy::Sequential);
        let data = run(&schema, "{ books { id title author } }").await;
        assert_eq!(
            data,
            json!({ "books": [
                { "id": 1, "title": "The Awakening", "author": "Kate Chopin" },
                { "id": 2, "title": "City of Glass", "author": "Paul Auster" },
            ]})
        );
    }

    #[tokio::test]
    async fn test_book_query_found_and_missing() {
        let schema = schema(IdPolicy::Sequential);
        let data = run(&schema, "{ found: book(id: 1) { title author } missing: book(id: 999) { title } }").await;
        assert_eq!(
            data,
            json!({
                "found": { "title": "The Awakening", "author": "Kate Chopin" },
                "missing": null,
            })
        );
    }

    #[tokio::test]
    async fn test_book_query_requires_id() {
        let schema = schema(IdPolicy::Sequential);
        let response = schema.execute("{ book { title } }").await;
        assert!(!response.errors.is_empty());
    }

    #[tokio::test]
    async fn test_add_book_length_policy_reuses_seed_id() {
        let schema = schema(IdPolicy::Length);
        let data = run(
            &schema,
            r#"mutation { addBook(title: "Dune", author: "Frank Herbert") { id title author } }"#,
        )
        .await;
        assert_eq!(
            data,
            json!({ "addBook": { "id": 2, "title": "Dune", "author": "Frank Herbert" } })
        );
    }

    #[tokio::test]
    async fn test_add_book_without_arguments() {
        let schema = schema(IdPolicy::Sequential);
        let data = run(&schema, "mutation { addBook { id title author } }").await;
        assert_eq!(data, json!({ "addBook": { "id": 3, "title": null, "author": null } }));

        let data = run(&schema, "{ books { id } }").await;
        assert_eq!(data["books"].as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn test_mutations_run_in_order() {
        let schema = schema(IdPolicy::Sequential);
        let data = run(
            &schema,
            r#"mutation {
                first: addBook(title: "Dune") { id }
                second: addBook(title: "Emma") { id }
            }"#,
        )
        .await;
        assert_eq!(data, json!({ "first": { "id": 3 }, "second": { "id": 4 } }));
    }

    #[tokio::test]
    async fn test_variables() {
        let schema = schema(IdPolicy::Sequential);
        let request = async_graphql::Request::new("query($id: Int!) { book(id: $id) { author } }")
            .variables(async_graphql::Variables::from_json(json!({ "id": 2 })));
        let response = schema.execute(request).await;
        assert!(response.errors.is_empty());
        assert_eq!(
            response.data.into_json().unwrap(),
            json!({ "book": { "author": "Paul Auster" } })
        );
    }

    #[tokio::test]
    async fn test_add_book_after_max_id_is_an_error() {
        let schema = schema_over(BookStore::with_seed(
            vec![Book::new(BookId::MAX, "Last", "Writer")],
            IdPolicy::Sequential,
        ));
        let response = schema.execute(r#"mutation { addBook(title: "Dune") { id } }"#).await;
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].message, "Book id space exhausted");

        let data = run(&schema, "{ books { id } }").await;
        assert_eq!(data, json!({ "books": [{ "id": BookId::MAX }] }));
    }

    #[test]
    fn test_sdl_declares_operations() {
        let sdl = schema_sdl();
        assert!(sdl.contains("type Book"));
        assert!(sdl.contains("books: [Book!]!"));
        assert!(sdl.contains("book(id: Int!): Book"));
        assert!(sdl.contains("addBook(title: String, author: String): Book!"));
    }
}
