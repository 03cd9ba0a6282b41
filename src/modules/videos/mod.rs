pub mod models;
pub mod repo;
pub mod routes;

use async_trait::async_trait;
use axum::Router;
use vitrin_kernel::{AppState, Migration, Module};

/// Videos collection backing the storefront gallery page.
pub struct VideosModule;

impl VideosModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for VideosModule {
    fn name(&self) -> &'static str {
        "videos"
    }

    fn routes(&self, state: AppState) -> Option<Router> {
        Some(routes::router(state))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List videos",
                        "tags": ["Videos"],
                        "parameters": [
                            {"name": "page", "in": "query", "schema": {"type": "integer", "default": 1}},
                            {"name": "limit", "in": "query", "schema": {"type": "integer", "default": 10, "maximum": 100}}
                        ],
                        "responses": {
                            "200": {"description": "Paginated videos"}
                        }
                    },
                    "post": {
                        "summary": "Create a video",
                        "tags": ["Videos"],
                        "requestBody": {
                            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/VideoDraft"}}}
                        },
                        "responses": {
                            "201": {
                                "description": "Created video",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Video"}}}
                            },
                            "422": {
                                "description": "Validation error",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}
                            }
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Fetch a video",
                        "tags": ["Videos"],
                        "parameters": [{"name": "id", "in": "path", "required": true, "schema": {"type": "string", "format": "uuid"}}],
                        "responses": {
                            "200": {
                                "description": "Video",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Video"}}}
                            }
                        }
                    },
                    "patch": {
                        "summary": "Update a video",
                        "tags": ["Videos"],
                        "parameters": [{"name": "id", "in": "path", "required": true, "schema": {"type": "string", "format": "uuid"}}],
                        "responses": {
                            "200": {"description": "Updated video"}
                        }
                    },
                    "delete": {
                        "summary": "Delete a video",
                        "tags": ["Videos"],
                        "parameters": [{"name": "id", "in": "path", "required": true, "schema": {"type": "string", "format": "uuid"}}],
                        "responses": {
                            "204": {"description": "Deleted"}
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Video": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "string", "format": "uuid"},
                            "title": {"type": "string"},
                            "url": {"type": "string", "description": "YouTube or Vimeo watch URL"},
                            "description": {"type": "string", "nullable": true},
                            "created_at": {"type": "string", "format": "date-time"},
                            "updated_at": {"type": "string", "format": "date-time"}
                        },
                        "required": ["id", "title", "url", "created_at", "updated_at"]
                    },
                    "VideoDraft": {
                        "type": "object",
                        "properties": {
                            "title": {"type": "string"},
                            "url": {"type": "string"},
                            "description": {"type": "string"}
                        },
                        "required": ["title", "url"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_create_table",
            up: "CREATE TABLE IF NOT EXISTS videos (\
                 id TEXT PRIMARY KEY, \
                 title TEXT NOT NULL, \
                 url TEXT NOT NULL, \
                 description TEXT, \
                 created_at TEXT NOT NULL, \
                 updated_at TEXT NOT NULL)",
        }]
    }
}

/// Create a new instance of the videos module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(VideosModule::new())
}
