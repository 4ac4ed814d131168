//! User authentication: registration, log-in, and the bearer token guard.

mod log_in;
mod middleware;
mod register;
mod token;

pub use log_in::log_in;
pub use middleware::{AuthState, auth_guard};
pub use register::register;
pub use token::{AuthResponse, Claims, DEFAULT_TOKEN_DURATION, decode_token, encode_token};
