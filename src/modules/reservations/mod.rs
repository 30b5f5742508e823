use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, patch},
    Json, Router,
};
use libris_http::AppError;
use libris_kernel::{InitCtx, Module};
use serde::Deserialize;
use serde_json::json;

use crate::catalogue::{Confirmation, Library, ReservationStatus, ReservationView};

/// Staff view over every active reservation
pub struct ReservationsModule {
    library: Library,
}

impl ReservationsModule {
    pub fn new(library: Library) -> Self {
        Self { library }
    }
}

/// Body of a status change request. The label is parsed by the handler so
/// unknown values come back in the standard error envelope.
#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub status: String,
}

#[async_trait]
impl Module for ReservationsModule {
    fn name(&self) -> &'static str {
        "reservations"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "reservations module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(list_reservations))
            .route("/{reservation_id}", patch(update_status))
            .with_state(self.library.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = json!({
            "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } }
        });
        let statuses: Vec<&str> = ReservationStatus::ALL.iter().map(|s| s.label()).collect();

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List every active reservation",
                        "tags": ["Reservations"],
                        "responses": {
                            "200": {
                                "description": "Active reservations",
                                "content": { "application/json": { "schema": {
                                    "type": "array",
                                    "items": { "$ref": "#/components/schemas/ReservationView" }
                                } } }
                            }
                        }
                    }
                },
                "/{reservation_id}": {
                    "patch": {
                        "summary": "Change a reservation's status",
                        "description": "Checked Out, Cancelled and Expired make the book available again.",
                        "tags": ["Reservations"],
                        "parameters": [{
                            "name": "reservation_id", "in": "path", "required": true,
                            "schema": { "type": "string", "example": "RES-5" }
                        }],
                        "requestBody": {
                            "required": true,
                            "content": { "application/json": { "schema": {
                                "type": "object",
                                "properties": { "status": { "type": "string", "enum": statuses } },
                                "required": ["status"]
                            } } }
                        },
                        "responses": {
                            "200": {
                                "description": "Status recorded",
                                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Confirmation" } } }
                            },
                            "400": { "description": "Malformed reservation id", "content": error },
                            "404": { "description": "Book not found", "content": error },
                            "422": { "description": "Unknown status", "content": error }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "ReservationView": {
                        "type": "object",
                        "properties": {
                            "reservation_id": { "type": "string" },
                            "book_id": { "type": "integer", "format": "int64" },
                            "book_title": { "type": "string" },
                            "user_id": { "type": "string" },
                            "user_name": { "type": "string" },
                            "reserved_on": { "type": "string", "format": "date" },
                            "status": { "type": "string", "enum": statuses }
                        },
                        "required": ["reservation_id", "book_id", "book_title", "user_id", "user_name", "reserved_on", "status"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "reservations module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "reservations module stopped");
        Ok(())
    }
}

async fn list_reservations(State(library): State<Library>) -> Json<Vec<ReservationView>> {
    Json(library.query.list_reservations().await)
}

async fn update_status(
    State(library): State<Library>,
    Path(reservation_id): Path<String>,
    change: Result<Json<StatusChange>, JsonRejection>,
) -> Result<Json<Confirmation>, AppError> {
    let Json(change) = change?;
    let status: ReservationStatus = change.status.parse()?;
    let confirmation = library
        .mutation
        .update_reservation_status(&reservation_id, status)
        .await?;
    Ok(Json(confirmation))
}

/// Create a new instance of the reservations module
pub fn create_module(library: Library) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(ReservationsModule::new(library))
}
