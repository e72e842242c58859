//! HTTP surface
//!
//! A thin axum layer over [`OrchestrationFacade`](infraflow_application::OrchestrationFacade).
//! Handlers never block: missions are started in the background and
//! observed by polling `GET /missions/{id}`.

mod error;
mod routes;

pub use error::ApiError;
pub use routes::{StartMissionRequest, router};
