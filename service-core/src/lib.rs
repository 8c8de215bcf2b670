//! service-core: Shared infrastructure for the portal web services.
pub mod error;
pub mod middleware;
pub mod observability;
