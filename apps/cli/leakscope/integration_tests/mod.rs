// End-to-end command flows against a wiremock backend and a
// tempfile-backed session.

mod commands;
