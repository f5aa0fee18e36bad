// tests/policer/main.rs

mod frame_tests;

// Re-export common test utilities
pub use fixtures::test_clock::TestClock;
