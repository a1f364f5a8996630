// Public API tests for client-core, from an external consumer's
// perspective. HTTP behavior is exercised against a wiremock server;
// persistence against tempfile-backed data directories.

mod api;
mod config;
mod session;
mod token_store;
