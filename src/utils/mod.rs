//! Utility functions and helpers.

pub mod fs;
pub mod http;
pub mod log;
pub mod throttle;
pub mod url;

pub use http::{ReqwestTransport, Transport};
pub use throttle::{FixedDelay, Throttle};
