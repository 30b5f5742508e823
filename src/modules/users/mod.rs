use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use libris_http::AppError;
use libris_kernel::{InitCtx, Module};
use serde_json::json;

use crate::catalogue::{Library, UserProfile, UserReservation};

/// Member directory and member-facing reservation view
pub struct UsersModule {
    library: Library,
}

impl UsersModule {
    pub fn new(library: Library) -> Self {
        Self { library }
    }
}

#[async_trait]
impl Module for UsersModule {
    fn name(&self) -> &'static str {
        "users"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "users module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(list_users))
            .route("/{user_id}", get(get_profile))
            .route("/{user_id}/reservations", get(get_reservations))
            .with_state(self.library.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let user_id = json!({
            "name": "user_id", "in": "path", "required": true,
            "schema": { "type": "string" }
        });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List library members",
                        "tags": ["Users"],
                        "responses": {
                            "200": {
                                "description": "Every member",
                                "content": { "application/json": { "schema": {
                                    "type": "array",
                                    "items": { "$ref": "#/components/schemas/UserProfile" }
                                } } }
                            }
                        }
                    }
                },
                "/{user_id}": {
                    "get": {
                        "summary": "Get a member profile",
                        "tags": ["Users"],
                        "parameters": [user_id],
                        "responses": {
                            "200": {
                                "description": "Member profile",
                                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/UserProfile" } } }
                            },
                            "404": {
                                "description": "Member not found",
                                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } } }
                            }
                        }
                    }
                },
                "/{user_id}/reservations": {
                    "get": {
                        "summary": "List the books a member has reserved",
                        "description": "Currently lists every reserved book in the catalogue for any member.",
                        "tags": ["Users"],
                        "parameters": [user_id],
                        "responses": {
                            "200": {
                                "description": "Reserved books",
                                "content": { "application/json": { "schema": {
                                    "type": "array",
                                    "items": { "$ref": "#/components/schemas/UserReservation" }
                                } } }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "UserProfile": {
                        "type": "object",
                        "properties": {
                            "user_id": { "type": "string" },
                            "name": { "type": "string" },
                            "email": { "type": "string", "format": "email" },
                            "member_id": { "type": "string" }
                        },
                        "required": ["user_id", "name", "email", "member_id"]
                    },
                    "UserReservation": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "genre": { "type": "string" },
                            "available": { "type": "boolean" },
                            "reserved_on": { "type": "string", "format": "date" },
                            "status": { "type": "string" }
                        },
                        "required": ["id", "title", "author", "genre", "available", "reserved_on", "status"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "users module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "users module stopped");
        Ok(())
    }
}

async fn list_users(State(library): State<Library>) -> Json<Vec<UserProfile>> {
    Json(library.query.list_users().await)
}

async fn get_profile(
    State(library): State<Library>,
    Path(user_id): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(library.query.get_user_profile(&user_id).await?))
}

async fn get_reservations(
    State(library): State<Library>,
    Path(user_id): Path<String>,
) -> Json<Vec<UserReservation>> {
    Json(library.query.get_user_reservations(&user_id).await)
}

/// Create a new instance of the users module
pub fn create_module(library: Library) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(UsersModule::new(library))
}
