pub mod models;
pub mod repo;
pub mod routes;

use async_trait::async_trait;
use axum::Router;
use vitrin_kernel::{AppState, InitCtx, Migration, Module};

/// Products collection: the catalog proper. Owns the slug and price
/// hooks' primary consumer and the category relationship.
pub struct ProductsModule;

impl ProductsModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for ProductsModule {
    fn name(&self) -> &'static str {
        "products"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "products module initialized"
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
                        "summary": "List products",
                        "description": "Newest first. Optionally narrowed to a category by slug; an unknown category yields an empty page.",
                        "tags": ["Products"],
                        "parameters": [
                            {"name": "page", "in": "query", "schema": {"type": "integer", "default": 1}},
                            {"name": "limit", "in": "query", "schema": {"type": "integer", "default": 10, "maximum": 100}},
                            {"name": "category", "in": "query", "schema": {"type": "string"}, "description": "Category slug filter"}
                        ],
                        "responses": {
                            "200": {
                                "description": "Paginated products",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ProductPage"}}}
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a product",
                        "description": "The slug is derived from the title when omitted and the price is always computed from mrp, discount and gst_rate. A price field in the payload is ignored.",
                        "tags": ["Products"],
                        "requestBody": {
                            "required": true,
                            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ProductDraft"}}}
                        },
                        "responses": {
                            "201": {
                                "description": "Created product with slug and price materialized",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Product"}}}
                            },
                            "409": {
                                "description": "Slug already taken",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}
                            },
                            "422": {
                                "description": "Validation error with per-field details",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}
                            }
                        }
                    }
                },
                "/{slug}": {
                    "get": {
                        "summary": "Fetch a product by slug",
                        "tags": ["Products"],
                        "parameters": [{"name": "slug", "in": "path", "required": true, "schema": {"type": "string"}}],
                        "responses": {
                            "200": {
                                "description": "Product",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Product"}}}
                            },
                            "404": {
                                "description": "Unknown slug",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}
                            }
                        }
                    },
                    "patch": {
                        "summary": "Update a product by id",
                        "description": "Merges the partial payload over the stored document, then re-runs validation and the slug and price hooks on the merged values.",
                        "tags": ["Products"],
                        "parameters": [{"name": "slug", "in": "path", "required": true, "schema": {"type": "string", "format": "uuid"}}],
                        "requestBody": {
                            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ProductDraft"}}}
                        },
                        "responses": {
                            "200": {
                                "description": "Updated product",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Product"}}}
                            },
                            "404": {
                                "description": "Unknown id",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}
                            },
                            "422": {
                                "description": "Validation error",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}
                            }
                        }
                    },
                    "delete": {
                        "summary": "Delete a product by id",
                        "tags": ["Products"],
                        "parameters": [{"name": "slug", "in": "path", "required": true, "schema": {"type": "string", "format": "uuid"}}],
                        "responses": {
                            "204": {"description": "Deleted"},
                            "404": {
                                "description": "Unknown id",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Product": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "string", "format": "uuid"},
                            "title": {"type": "string"},
                            "slug": {"type": "string"},
                            "category_id": {"type": "string", "format": "uuid"},
                            "mrp": {"type": "string", "nullable": true, "description": "Decimal, serialized as a string"},
                            "discount": {"type": "string", "nullable": true, "description": "Percent off MRP"},
                            "gst_rate": {"type": "string", "enum": ["5", "12", "18", "28"]},
                            "price": {"type": "string", "nullable": true, "readOnly": true, "description": "Derived from mrp, discount and gst_rate"},
                            "description": {"type": "string"},
                            "images": {"type": "array", "items": {"$ref": "#/components/schemas/ProductImage"}},
                            "specifications": {"type": "array", "items": {"$ref": "#/components/schemas/Specification"}},
                            "created_at": {"type": "string", "format": "date-time"},
                            "updated_at": {"type": "string", "format": "date-time"}
                        },
                        "required": ["id", "title", "slug", "category_id", "gst_rate", "description", "created_at", "updated_at"]
                    },
                    "ProductDraft": {
                        "type": "object",
                        "properties": {
                            "title": {"type": "string"},
                            "slug": {"type": "string", "description": "Derived from title when omitted"},
                            "category_id": {"type": "string", "format": "uuid"},
                            "mrp": {"type": "number", "nullable": true},
                            "discount": {"type": "number", "nullable": true},
                            "gst_rate": {"type": "string", "enum": ["5", "12", "18", "28"], "default": "18"},
                            "description": {"type": "string"},
                            "images": {"type": "array", "items": {"$ref": "#/components/schemas/ProductImage"}},
                            "specifications": {"type": "array", "items": {"$ref": "#/components/schemas/Specification"}}
                        },
                        "required": ["title", "category_id", "description"]
                    },
                    "ProductImage": {
                        "type": "object",
                        "properties": {
                            "url": {"type": "string"},
                            "alt": {"type": "string", "nullable": true}
                        },
                        "required": ["url"]
                    },
                    "Specification": {
                        "type": "object",
                        "properties": {
                            "label": {"type": "string"},
                            "value": {"type": "string"}
                        },
                        "required": ["label", "value"]
                    },
                    "ProductPage": {
                        "type": "object",
                        "properties": {
                            "docs": {"type": "array", "items": {"$ref": "#/components/schemas/Product"}},
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
                up: "CREATE TABLE IF NOT EXISTS products (\
                     id TEXT PRIMARY KEY, \
                     title TEXT NOT NULL, \
                     slug TEXT NOT NULL, \
                     category_id TEXT NOT NULL REFERENCES categories(id), \
                     mrp TEXT, \
                     discount TEXT, \
                     gst_rate TEXT NOT NULL DEFAULT '18', \
                     price TEXT, \
                     description TEXT NOT NULL, \
                     images TEXT NOT NULL DEFAULT '[]', \
                     specifications TEXT NOT NULL DEFAULT '[]', \
                     created_at TEXT NOT NULL, \
                     updated_at TEXT NOT NULL)",
            },
            Migration {
                id: "002_slug_unique",
                up: "CREATE UNIQUE INDEX IF NOT EXISTS products_slug_unique ON products(slug)",
            },
            Migration {
                id: "003_category_idx",
                up: "CREATE INDEX IF NOT EXISTS products_category_idx ON products(category_id)",
            },
            Migration {
                id: "004_created_idx",
                up: "CREATE INDEX IF NOT EXISTS products_created_idx ON products(created_at DESC)",
            },
        ]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "products module started");
        Ok(())
    }
}

/// Create a new instance of the products module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(ProductsModule::new())
}
