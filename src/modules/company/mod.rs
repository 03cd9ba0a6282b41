pub mod models;
pub mod repo;
pub mod routes;

use async_trait::async_trait;
use axum::Router;
use vitrin_kernel::{AppState, Migration, Module};

/// Company settings, a singleton document: site title, tax numbers,
/// contact details, and footer social links.
pub struct CompanyModule;

impl CompanyModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for CompanyModule {
    fn name(&self) -> &'static str {
        "company-settings"
    }

    fn routes(&self, state: AppState) -> Option<Router> {
        Some(routes::router(state))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "Fetch the company settings",
                        "description": "Returns built-in defaults until the document is first saved.",
                        "tags": ["Company settings"],
                        "responses": {
                            "200": {
                                "description": "Settings document",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/CompanySettings"}}}
                            }
                        }
                    },
                    "put": {
                        "summary": "Replace the company settings",
                        "tags": ["Company settings"],
                        "requestBody": {
                            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/CompanySettings"}}}
                        },
                        "responses": {
                            "200": {
                                "description": "Stored settings",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/CompanySettings"}}}
                            },
                            "422": {
                                "description": "Validation error",
                                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "CompanySettings": {
                        "type": "object",
                        "properties": {
                            "site_title": {"type": "string"},
                            "gst_no": {"type": "string", "nullable": true},
                            "msme_no": {"type": "string", "nullable": true},
                            "contact": {
                                "type": "object",
                                "properties": {
                                    "phone": {"type": "string", "nullable": true, "description": "Comma-separated numbers; the first is the WhatsApp contact"},
                                    "email": {"type": "string", "nullable": true},
                                    "address": {"type": "string", "nullable": true}
                                }
                            },
                            "google_maps_link": {"type": "string", "nullable": true},
                            "social_links": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "platform": {"type": "string", "enum": ["Facebook", "YouTube", "Instagram"]},
                                        "url": {"type": "string"}
                                    }
                                }
                            },
                            "updated_at": {"type": "string", "format": "date-time", "nullable": true}
                        }
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_create_table",
            up: "CREATE TABLE IF NOT EXISTS company_settings (\
                 id INTEGER PRIMARY KEY CHECK (id = 1), \
                 site_title TEXT NOT NULL, \
                 gst_no TEXT, \
                 msme_no TEXT, \
                 phone TEXT, \
                 email TEXT, \
                 address TEXT, \
                 google_maps_link TEXT, \
                 social_links TEXT NOT NULL DEFAULT '[]', \
                 updated_at TEXT NOT NULL)",
        }]
    }
}

/// Create a new instance of the company settings module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(CompanyModule::new())
}
