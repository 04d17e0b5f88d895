//! API middleware.

mod cors;
mod fallback;
mod request_log;

pub use cors::cors_layer;
pub use fallback::{panic_response, route_not_found};
pub use request_log::{client_ip, trace_layer};
