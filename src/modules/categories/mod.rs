pub mod models;
pub mod repo;
pub mod routes;

use async_trait::async_trait;
use axum::Router;
use vitrin_kernel::{AppState, InitCtx, Migration, Module};

/// Categories collection: named groups products hang off for
/// storefront navigation and filtering.
pub struct CategoriesModule;

impl CategoriesModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for CategoriesModule {
    fn name(&self) -> &'static str {
        "categories"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "categories module initialized"
        );
        Ok(())
    }

    fn routes(&self, state: AppState) -> Option<Router> {
        Some(routes::router(state))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List categories",
                        "tags": ["Categories"],
                        "parameters": [
                            {"name": "page", "in": "query", "schema": {"type": "integer", "default": 1}},
                            {"name": "limit", "in": "query", "schema": {"type": "integer", "default": 10, "maximum": 100}}
                        ],
                        "responses": {
                            "200": {
                                "description": "Paginated categories",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/CategoryPage"}}}
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a category",
                        "tags": ["Categories"],
                        "requestBody": {
                            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/CategoryDraft"}}}
                        },
                        "responses": {
                            "201": {
                                "description": "Created category",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Category"}}}
                            },
                            "409": {
                                "description": "Name or slug already taken",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}
                            },
                            "422": {
                                "description": "Validation error",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}
                            }
                        }
                    }
                },
                "/{slug}": {
                    "get": {
                        "summary": "Fetch a category by slug",
                        "tags": ["Categories"],
                        "parameters": [{"name": "slug", "in": "path", "required": true, "schema": {"type": "string"}}],
                        "responses": {
                            "200": {
                                "description": "Category",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Category"}}}
                            },
                            "404": {
                                "description": "Unknown slug",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}
                            }
                        }
                    },
                    "patch": {
                        "summary": "Update a category by id",
                        "tags": ["Categories"],
                        "parameters": [{"name": "slug", "in": "path", "required": true, "schema": {"type": "string", "format": "uuid"}}],
                        "requestBody": {
                            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/CategoryDraft"}}}
                        },
                        "responses": {
                            "200": {
                                "description": "Updated category",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Category"}}}
                            }
                        }
                    },
                    "delete": {
                        "summary": "Delete a category by id",
                        "tags": ["Categories"],
                        "parameters": [{"name": "slug", "in": "path", "required": true, "schema": {"type": "string", "format": "uuid"}}],
                        "responses": {
                            "204": {"description": "Deleted"},
                            "409": {
                                "description": "Category still has products",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Category": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "string", "format": "uuid"},
                            "name": {"type": "string"},
                            "slug": {"type": "string"},
                            "description": {"type": "string", "nullable": true},
                            "image_url": {"type": "string", "nullable": true},
                            "created_at": {"type": "string", "format": "date-time"},
                            "updated_at": {"type": "string", "format": "date-time"}
                        },
                        "required": ["id", "name", "slug", "created_at", "updated_at"]
                    },
                    "CategoryDraft": {
                        "type": "object",
                        "properties": {
                            "name": {"type": "string"},
                            "slug": {"type": "string", "description": "Derived from name when omitted"},
                            "description": {"type": "string"},
                            "image_url": {"type": "string"}
                        }
                    },
                    "CategoryPage": {
                        "type": "object",
                        "properties": {
                            "docs": {"type": "array", "items": {"$ref": "#/components/schemas/Category"}},
                            "total": {"type": "integer"},
                            "page": {"type": "integer"},
                            "limit": {"type": "integer"},
                            "total_pages": {"type": "integer"}
                        }
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![
            Migration {
                id: "001_create_table",
                up: "CREATE TABLE IF NOT EXISTS categories (\
                     id TEXT PRIMARY KEY, \
                     name TEXT NOT NULL, \
                     slug TEXT NOT NULL, \
                     description TEXT, \
                     image_url TEXT, \
                     created_at TEXT NOT NULL, \
                     updated_at TEXT NOT NULL)",
            },
            Migration {
                id: "002_name_unique",
                up: "CREATE UNIQUE INDEX IF NOT EXISTS categories_name_unique ON categories(name)",
            },
            Migration {
                id: "003_slug_unique",
                up: "CREATE UNIQUE INDEX IF NOT EXISTS categories_slug_unique ON categories(slug)",
            },
        ]
    }
}

/// Create a new instance of the categories module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(CategoriesModule::new())
}
