//! REST API module
//!
//! HTTP surface over the deployment orchestrator.
//!
//! # Endpoints
//!
//! - `GET /` - Static landing page
//! - `POST /api/prepare-deployment/` - Prepare the Counter deployment payload
//! - `POST /api/verify-contract/` - Verify a deployed contract
//! - `GET /api/health/` - Health check
//!
//! The two POST endpoints are rate-limited per client IP.

pub mod handlers;
pub mod routes;

pub use handlers::ApiState;
pub use routes::create_router;
