//! Test Module
//!
//! Cross-module test suite for the CareerChat backend.
//!
//! ## Test Categories
//! - `brain_tests`: classification, language hint, directives and prompt assembly
//! - `router_tests`: routing decisions against scripted collaborators
//! - `database_tests`: skills CRUD and the SQLite profile store
//! - `integration_tests`: router + HTTP completion actor + SQLite store
