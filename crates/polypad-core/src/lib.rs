//! Core library for the polypad multi-language code workbench.
//!
//! This crate holds everything that is independent of the terminal frontend:
//! the language registry, the execution adapters, and the dispatcher that
//! routes run requests between them.
//!
//! # Architecture Overview
//!
//! - **Language registry**: static descriptors for every supported language,
//!   including the sample program shown on selection and the id the remote
//!   execution service knows the language by
//! - **Local interpreter adapter**: an embedded Python runtime running on a
//!   dedicated thread, with captured stdout/stderr
//! - **Remote execution adapter**: a client for a hosted code-execution
//!   HTTP service
//! - **Execution dispatcher**: picks the local runtime when it can, falls
//!   back to the remote service, and always produces displayable text
//! - **Configuration system**: YAML file with environment-aware overrides

pub mod config;
pub mod dispatch;
pub mod errors;
pub mod interpreter;
pub mod registry;
pub mod remote;
pub mod run;

pub use config::{InterpreterConfig, PolypadConfig, RemoteConfig};
pub use dispatch::Dispatcher;
pub use errors::RunnerError;
pub use interpreter::{DisabledInterpreter, LocalRuntime, PythonInterpreter};
pub use registry::{descriptor, LanguageDescriptor, LanguageId};
pub use remote::{RemoteRunClient, RemoteRunner};
pub use run::{fold_outcome, RunOutcome, RunRequest};
