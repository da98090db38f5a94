//! Application layer orchestrating the terminal interface.
//!
//! Owns the main UI loop and coordinates between the domain services and
//! the dispatcher in polypad-core.

pub mod ui;
