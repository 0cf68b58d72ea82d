//! Core types: the task boundary, the subcommand set, and invocation
//! configuration.

pub mod command;
pub mod config;
pub mod task;
