// Unit tests for pure, synchronous logic.
// Public API behavior (HTTP, persistence, session transitions) is
// covered in integration_tests/.

mod route;
mod validation;
