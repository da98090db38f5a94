//! Run request/result types and result folding.

use crate::registry::LanguageId;

/// A single run invocation. Constructed fresh for every trigger; carries no
/// identity beyond the call.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub language: LanguageId,
    pub source: String,
}

/// Normalized outcome of one execution attempt, whichever adapter produced
/// it.
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    pub stdout: String,
    pub stderr: String,
    pub compile_output: Option<String>,
    pub status: Option<String>,
}

/// Sentinel shown when a run produced no output at all.
pub const NO_OUTPUT_SENTINEL: &str = "Code executed successfully (no output)";

/// Folds an outcome into the single string shown in the output pane.
///
/// Field order is fixed: stdout first, then stderr under an `Error:` header,
/// then compiler diagnostics under a `Compile Output:` header. When all
/// three are empty the service's status description is used, and failing
/// that, the no-output sentinel.
pub fn fold_outcome(outcome: &RunOutcome) -> String {
    let mut result = String::new();

    if !outcome.stdout.is_empty() {
        result.push_str(&outcome.stdout);
    }
    if !outcome.stderr.is_empty() {
        result.push_str("Error:\n");
        result.push_str(&outcome.stderr);
    }
    if let Some(compile_output) = &outcome.compile_output {
        if !compile_output.is_empty() {
            result.push_str("Compile Output:\n");
            result.push_str(compile_output);
        }
    }

    if result.is_empty() {
        if let Some(status) = &outcome.status {
            if !status.is_empty() {
                return status.clone();
            }
        }
        return NO_OUTPUT_SENTINEL.to_string();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stdout_then_stderr_in_fixed_order() {
        let outcome = RunOutcome {
            stdout: "A".to_string(),
            stderr: "B".to_string(),
            ..Default::default()
        };
        assert_eq!(fold_outcome(&outcome), "AError:\nB");
    }

    #[test]
    fn stdout_alone_passes_through_untouched() {
        let outcome = RunOutcome {
            stdout: "hi\n".to_string(),
            ..Default::default()
        };
        assert_eq!(fold_outcome(&outcome), "hi\n");
    }

    #[test]
    fn compile_output_gets_its_own_header() {
        let outcome = RunOutcome {
            compile_output: Some("main.c:3: warning".to_string()),
            ..Default::default()
        };
        assert_eq!(fold_outcome(&outcome), "Compile Output:\nmain.c:3: warning");
    }

    #[test]
    fn empty_fields_fall_back_to_status_description() {
        let outcome = RunOutcome {
            status: Some("Accepted".to_string()),
            ..Default::default()
        };
        assert_eq!(fold_outcome(&outcome), "Accepted");
    }

    #[test]
    fn all_empty_yields_the_sentinel() {
        assert_eq!(fold_outcome(&RunOutcome::default()), NO_OUTPUT_SENTINEL);
    }

    #[test]
    fn status_is_ignored_when_streams_have_content() {
        let outcome = RunOutcome {
            stdout: "42\n".to_string(),
            status: Some("Accepted".to_string()),
            ..Default::default()
        };
        assert_eq!(fold_outcome(&outcome), "42\n");
    }
}
