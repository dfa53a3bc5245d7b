//! Integration tests against a mock HTTP backend

pub mod cloning;
pub mod synthesis;
pub mod voices;
