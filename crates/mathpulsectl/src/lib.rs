//! Mathpulsectl library - exposes the commands for integration tests

pub mod commands;
