// Unit tests for private command helpers.
// Full command flows are exercised in integration_tests/.

mod commands;
