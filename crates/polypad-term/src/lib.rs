//! Terminal user interface for the polypad code workbench.
//!
//! Two panes: an editable source pane and an execution output pane, plus a
//! status header driven by the language registry and the interpreter's
//! readiness. All execution is delegated to the dispatcher in polypad-core.

pub mod application;
pub mod domain;

pub use application::ui::{destruct_terminal_for_panic, start_loop, WorkbenchProps};
pub use domain::models::{Action, Event};
pub use domain::services::{AppState, AppStateProps};
