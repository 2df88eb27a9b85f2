//! OpenAPI 3.0 description of the todo API, served at `/openapi.json`.
//!
//! The document is written by hand and mirrors the routes in `router`. It is
//! only mounted when the deployment environment is `Development`.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

pub const DOCUMENT_PATH: &str = "/openapi.json";

/// Router serving the document at `DOCUMENT_PATH`.
pub fn routes() -> Router {
    Router::new().route(DOCUMENT_PATH, get(openapi_document))
}

async fn openapi_document() -> Json<Value> {
    Json(document())
}

pub fn document() -> Value {
    let id_param = json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int64", "minimum": 1 }
    });
    let todo = json!({
        "description": "The todo item",
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/TodoResponse" } } }
    });
    let problem = |description: &str| {
        json!({
            "description": description,
            "content": { "application/problem+json": { "schema": { "$ref": "#/components/schemas/Problem" } } }
        })
    };

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Todo API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Create, read, update and delete todo items."
        },
        "servers": [{ "url": "/", "description": "Current server" }],
        "tags": [{ "name": "Todo", "description": "Todo item lifecycle" }],
        "paths": {
            "/todo": {
                "get": {
                    "tags": ["Todo"],
                    "summary": "List all todo items",
                    "operationId": "listTodos",
                    "responses": {
                        "200": {
                            "description": "Every stored todo item",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/TodoResponse" }
                                    }
                                }
                            }
                        },
                        "500": problem("Store failure")
                    }
                },
                "post": {
                    "tags": ["Todo"],
                    "summary": "Create a todo item",
                    "operationId": "createTodo",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/CreateTodoRequest" }
                            }
                        }
                    },
                    "responses": {
                        "201": {
                            "description": "Created; `Location` names the new item",
                            "headers": { "Location": { "schema": { "type": "string" } } },
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/TodoResponse" }
                                }
                            }
                        },
                        "400": problem("Validation failed"),
                        "500": problem("Store failure")
                    }
                }
            },
            "/todo/{id}": {
                "parameters": [id_param],
                "get": {
                    "tags": ["Todo"],
                    "summary": "Fetch one todo item",
                    "operationId": "getTodo",
                    "responses": {
                        "200": todo,
                        "404": problem("No todo item with this id"),
                        "500": problem("Store failure")
                    }
                },
                "put": {
                    "tags": ["Todo"],
                    "summary": "Apply a partial update",
                    "operationId": "updateTodo",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/UpdateTodoRequest" }
                            }
                        }
                    },
                    "responses": {
                        "200": todo,
                        "400": problem("Validation failed or body id differs from path id"),
                        "404": problem("No todo item with this id"),
                        "409": problem("Modified by another request"),
                        "500": problem("Store failure")
                    }
                },
                "delete": {
                    "tags": ["Todo"],
                    "summary": "Delete a todo item",
                    "operationId": "deleteTodo",
                    "responses": {
                        "204": { "description": "Deleted" },
                        "404": problem("No todo item with this id"),
                        "500": problem("Store failure")
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Liveness check",
                    "operationId": "health",
                    "responses": {
                        "200": {
                            "description": "Service is up",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/HealthResponse" }
                                }
                            }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "CreateTodoRequest": {
                    "type": "object",
                    "required": ["title", "isCompleted", "dueDate"],
                    "properties": {
                        "title": { "type": "string", "minLength": 1, "maxLength": 100 },
                        "description": { "type": "string", "maxLength": 500, "nullable": true },
                        "isCompleted": { "type": "boolean" },
                        "dueDate": { "type": "string", "format": "date-time" }
                    }
                },
                "UpdateTodoRequest": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer", "format": "int64", "minimum": 1 },
                        "title": { "type": "string", "minLength": 1, "maxLength": 100 },
                        "description": { "type": "string", "maxLength": 500, "nullable": true },
                        "isCompleted": { "type": "boolean" },
                        "dueDate": { "type": "string", "format": "date-time" }
                    }
                },
                "TodoResponse": {
                    "type": "object",
                    "required": ["id", "title", "description", "isCompleted", "dueDate", "createdAt", "updatedAt"],
                    "properties": {
                        "id": { "type": "integer", "format": "int64" },
                        "title": { "type": "string" },
                        "description": { "type": "string", "nullable": true },
                        "isCompleted": { "type": "boolean" },
                        "dueDate": { "type": "string", "format": "date-time" },
                        "createdAt": { "type": "string", "format": "date-time" },
                        "updatedAt": { "type": "string", "format": "date-time" }
                    }
                },
                "HealthResponse": {
                    "type": "object",
                    "required": ["status"],
                    "properties": { "status": { "type": "string" } }
                },
                "Problem": {
                    "type": "object",
                    "required": ["type", "title", "status"],
                    "properties": {
                        "type": { "type": "string", "format": "uri" },
                        "title": { "type": "string" },
                        "status": { "type": "integer" },
                        "detail": { "type": "string" },
                        "instance": { "type": "string" },
                        "errors": {
                            "type": "object",
                            "additionalProperties": { "type": "array", "items": { "type": "string" } }
                        }
                    }
                }
            }
        }
    })
}
