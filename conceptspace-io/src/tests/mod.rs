//! Test modules for conceptspace-io
//!
//! File-backed tests for format dispatch and mesh persistence.

pub mod mesh_file_tests;
