pub mod models;

use async_trait::async_trait;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use libris_http::AppError;
use libris_kernel::{InitCtx, Module};
use serde_json::json;

use crate::catalogue::{search, Book, BookId, BookPatch, Confirmation, Library, NewBook};
use models::{BookSearch, BookWithMessage};

/// Catalogue browsing, search, reservation and staff book management
pub struct BooksModule {
    library: Library,
}

impl BooksModule {
    pub fn new(library: Library) -> Self {
        Self { library }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(list_books).post(add_book))
            .route("/health", get(health_check))
            .route("/{id}", put(update_book))
            .route("/{id}/reserve", post(reserve_book))
            .with_state(self.library.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = json!({
            "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } }
        });
        let book_id = json!({
            "name": "id", "in": "path", "required": true,
            "schema": { "type": "integer", "format": "int64" }
        });
        let book_with_message = json!({
            "application/json": { "schema": { "$ref": "#/components/schemas/BookWithMessage" } }
        });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books, optionally filtered by title, author or genre",
                        "tags": ["Books"],
                        "parameters": [{
                            "name": "q", "in": "query", "required": false,
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": {
                                "description": "Matching books",
                                "content": { "application/json": { "schema": {
                                    "type": "array",
                                    "items": { "$ref": "#/components/schemas/Book" }
                                } } }
                            }
                        }
                    },
                    "post": {
                        "summary": "Add a book to the catalogue",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/NewBook" } } }
                        },
                        "responses": {
                            "201": { "description": "Book added", "content": book_with_message },
                            "422": { "description": "Missing field", "content": error }
                        }
                    }
                },
                "/{id}": {
                    "put": {
                        "summary": "Update a book",
                        "tags": ["Books"],
                        "parameters": [book_id],
                        "requestBody": {
                            "required": true,
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/BookPatch" } } }
                        },
                        "responses": {
                            "200": { "description": "Book updated", "content": book_with_message },
                            "404": { "description": "Book not found", "content": error },
                            "422": { "description": "Blank field", "content": error }
                        }
                    }
                },
                "/{id}/reserve": {
                    "post": {
                        "summary": "Reserve a book",
                        "tags": ["Books"],
                        "parameters": [book_id],
                        "responses": {
                            "200": {
                                "description": "Reservation confirmed",
                                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Confirmation" } } }
                            },
                            "404": { "description": "Book not found", "content": error },
                            "409": { "description": "Book already reserved", "content": error }
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Books health check",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": { "text/plain": { "schema": { "type": "string" } } }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "genre": { "type": "string" },
                            "available": { "type": "boolean" }
                        },
                        "required": ["id", "title", "author", "genre", "available"]
                    },
                    "NewBook": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "genre": { "type": "string" }
                        },
                        "required": ["title", "author", "genre"]
                    },
                    "BookPatch": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "genre": { "type": "string" },
                            "available": { "type": "boolean" }
                        }
                    },
                    "BookWithMessage": {
                        "type": "object",
                        "properties": {
                            "book": { "$ref": "#/components/schemas/Book" },
                            "message": { "type": "string" }
                        },
                        "required": ["book", "message"]
                    },
                    "Confirmation": {
                        "type": "object",
                        "properties": { "message": { "type": "string" } },
                        "required": ["message"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}

async fn list_books(
    State(library): State<Library>,
    Query(params): Query<BookSearch>,
) -> Json<Vec<Book>> {
    let books = library.query.list_books().await;
    match params.q {
        Some(query) => Json(search::filter_books(books, &query)),
        None => Json(books),
    }
}

async fn add_book(
    State(library): State<Library>,
    input: Result<Json<NewBook>, JsonRejection>,
) -> Result<(StatusCode, Json<BookWithMessage>), AppError> {
    let Json(input) = input?;
    let book = library.mutation.add_book(input).await?;
    let message = format!("Book \"{}\" added successfully.", book.title);
    Ok((StatusCode::CREATED, Json(BookWithMessage { book, message })))
}

async fn update_book(
    State(library): State<Library>,
    id: Result<Path<BookId>, PathRejection>,
    patch: Result<Json<BookPatch>, JsonRejection>,
) -> Result<Json<BookWithMessage>, AppError> {
    let Path(id) = id?;
    let Json(patch) = patch?;
    let book = library.mutation.update_book(id, patch).await?;
    let message = format!("Book \"{}\" updated.", book.title);
    Ok(Json(BookWithMessage { book, message }))
}

async fn reserve_book(
    State(library): State<Library>,
    id: Result<Path<BookId>, PathRejection>,
) -> Result<Json<Confirmation>, AppError> {
    let Path(id) = id?;
    Ok(Json(library.mutation.reserve(id).await?))
}

/// Create a new instance of the books module
pub fn create_module(library: Library) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(library))
}
