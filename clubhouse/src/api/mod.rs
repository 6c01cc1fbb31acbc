//! REST layer: route handlers and the request/response models they share with GraphQL.
//!
//! All resources live under `/api/v1`. The generated OpenAPI document is served at
//! `/api-docs/openapi.json` and browsable at `/docs`.

pub mod handlers;
pub mod models;
