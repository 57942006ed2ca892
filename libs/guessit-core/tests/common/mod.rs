//! Common test utilities for guessit-core integration tests.

pub mod fixtures;
