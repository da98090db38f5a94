//! Core domain logic for the terminal interface.
//!
//! Business logic and data models driving the terminal UI, independent of
//! how the terminal itself is drawn.

pub mod models;
pub mod services;
