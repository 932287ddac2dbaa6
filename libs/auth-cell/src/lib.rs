pub mod handlers;
pub mod models;
pub mod router;

pub use models::{AuthResponse, LoginRequest, SignupRequest};
pub use router::auth_routes;
