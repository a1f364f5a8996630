pub mod api;
pub mod config;
pub mod error;
pub mod route;
pub mod session;
pub mod token_store;
pub mod validation;

#[cfg(test)]
mod tests;

pub const BACKEND_HOSTNAME: &str = "localhost";
pub const BACKEND_PORT: u16 = 5000;
pub const DEFAULT_BACKEND_BASE_URL: &str =
    const_format::concatcp!("http://", BACKEND_HOSTNAME, ":", BACKEND_PORT);
