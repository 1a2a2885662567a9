//! Type definitions shared by the API layer
//!
//! - `pagination` - Pagination for list endpoints
//! - `response` - Health check responses

pub mod pagination;
pub mod response;

pub use pagination::{PaginatedResponse, Pagination};
pub use response::{HealthResponse, HealthStatus};
