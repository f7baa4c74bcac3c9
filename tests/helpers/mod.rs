//! Shared fixtures for the integration tests.

pub mod project_fixture;
