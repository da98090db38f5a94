//! Execution dispatcher: routes a run to the local runtime or the remote
//! service and always comes back with displayable text.
//!
//! The local-then-remote fallback is one visible two-step function rather
//! than nested error handlers: a failed local attempt is logged, never shown
//! to the user, and the run degrades to the remote path. The dispatcher is
//! stateless; concurrent calls are independent.

use std::sync::Arc;

use crate::interpreter::LocalRuntime;
use crate::registry::{descriptor, LanguageId};
use crate::remote::RemoteRunner;
use crate::run::fold_outcome;

pub struct Dispatcher {
    local: Arc<dyn LocalRuntime>,
    remote: Arc<dyn RemoteRunner>,
}

impl Dispatcher {
    pub fn new(local: Arc<dyn LocalRuntime>, remote: Arc<dyn RemoteRunner>) -> Dispatcher {
        Dispatcher { local, remote }
    }

    /// Resolves one run request. Never fails: every adapter error ends up
    /// as explanatory text for the output pane.
    pub async fn run(&self, language: LanguageId, source: &str) -> String {
        if language.executes_locally() && self.local.is_ready() {
            match self.local.execute(source).await {
                Ok(outcome) => return fold_outcome(&outcome),
                Err(err) => {
                    log::warn!("local interpreter failed, falling back to remote execution: {err}");
                }
            }
        }

        let desc = descriptor(language);
        let Some(remote_id) = desc.remote_execution_id else {
            return format!(
                "{} cannot be executed here: no remote executor id is registered for it.",
                desc.label
            );
        };

        match self.remote.execute(source, remote_id).await {
            Ok(outcome) => fold_outcome(&outcome),
            Err(err) => {
                log::error!("remote execution failed for {language}: {err}");
                format!(
                    "Remote execution failed: {err}\n\n\
                     Remote execution has limited availability in this deployment. \
                     Check the remote settings in polypad.yaml and your network access."
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::errors::RunnerError;
    use crate::run::{RunOutcome, NO_OUTPUT_SENTINEL};

    struct MockLocal {
        ready: bool,
        result: Result<RunOutcome, RunnerError>,
        calls: AtomicUsize,
    }

    impl MockLocal {
        fn new(ready: bool, result: Result<RunOutcome, RunnerError>) -> MockLocal {
            MockLocal {
                ready,
                result,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LocalRuntime for MockLocal {
        fn is_ready(&self) -> bool {
            self.ready
        }

        async fn execute(&self, _source: &str) -> Result<RunOutcome, RunnerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    struct MockRemote {
        result: Result<RunOutcome, RunnerError>,
        calls: AtomicUsize,
        seen_ids: Mutex<Vec<u32>>,
    }

    impl MockRemote {
        fn new(result: Result<RunOutcome, RunnerError>) -> MockRemote {
            MockRemote {
                result,
                calls: AtomicUsize::new(0),
                seen_ids: Mutex::new(vec![]),
            }
        }
    }

    #[async_trait]
    impl RemoteRunner for MockRemote {
        async fn execute(&self, _source: &str, language_id: u32) -> Result<RunOutcome, RunnerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen_ids.lock().unwrap().push(language_id);
            self.result.clone()
        }
    }

    fn stdout_outcome(text: &str) -> RunOutcome {
        RunOutcome {
            stdout: text.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn local_success_never_touches_the_remote_service() {
        let local = Arc::new(MockLocal::new(true, Ok(stdout_outcome("hi\n"))));
        let remote = Arc::new(MockRemote::new(Ok(stdout_outcome("remote\n"))));
        let dispatcher = Dispatcher::new(local.clone(), remote.clone());

        let output = dispatcher.run(LanguageId::Python, "print(\"hi\")").await;

        assert_eq!(output, "hi\n");
        assert_eq!(local.calls.load(Ordering::SeqCst), 1);
        assert_eq!(remote.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn python_routes_remotely_while_the_interpreter_loads() {
        let local = Arc::new(MockLocal::new(false, Ok(stdout_outcome("unused"))));
        let remote = Arc::new(MockRemote::new(Ok(stdout_outcome("remote hi\n"))));
        let dispatcher = Dispatcher::new(local.clone(), remote.clone());

        let output = dispatcher.run(LanguageId::Python, "print(\"hi\")").await;

        assert_eq!(output, "remote hi\n");
        assert_eq!(local.calls.load(Ordering::SeqCst), 0);
        assert_eq!(remote.seen_ids.lock().unwrap().as_slice(), &[71]);
    }

    #[tokio::test]
    async fn local_fault_falls_back_to_remote_without_surfacing() {
        let local = Arc::new(MockLocal::new(
            true,
            Err(RunnerError::InterpreterFault("worker gone".to_string())),
        ));
        let remote = Arc::new(MockRemote::new(Ok(stdout_outcome("recovered\n"))));
        let dispatcher = Dispatcher::new(local.clone(), remote.clone());

        let output = dispatcher.run(LanguageId::Python, "print(1)").await;

        assert_eq!(output, "recovered\n");
        assert!(!output.contains("worker gone"));
        assert_eq!(local.calls.load(Ordering::SeqCst), 1);
        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn compiled_languages_go_straight_to_remote_with_their_id() {
        let local = Arc::new(MockLocal::new(true, Ok(stdout_outcome("unused"))));
        let remote = Arc::new(MockRemote::new(Ok(RunOutcome::default())));
        let dispatcher = Dispatcher::new(local.clone(), remote.clone());

        let output = dispatcher.run(LanguageId::Java, "class A {}").await;

        assert_eq!(output, NO_OUTPUT_SENTINEL);
        assert_eq!(local.calls.load(Ordering::SeqCst), 0);
        assert_eq!(remote.seen_ids.lock().unwrap().as_slice(), &[62]);
    }

    #[tokio::test]
    async fn remote_failure_becomes_an_explanatory_diagnostic() {
        let local = Arc::new(MockLocal::new(false, Ok(stdout_outcome("unused"))));
        let remote = Arc::new(MockRemote::new(Err(RunnerError::RemoteTransport(
            "connection refused".to_string(),
        ))));
        let dispatcher = Dispatcher::new(local, remote);

        let output = dispatcher.run(LanguageId::Java, "class A {}").await;

        assert!(output.contains("Remote execution failed"));
        assert!(output.contains("connection refused"));
        assert!(output.contains("limited availability"));
    }

    #[tokio::test]
    async fn both_paths_failing_still_resolves_to_text() {
        let local = Arc::new(MockLocal::new(
            true,
            Err(RunnerError::InterpreterFault("fault".to_string())),
        ));
        let remote = Arc::new(MockRemote::new(Err(RunnerError::RemoteService {
            status: 500,
            body: "oops".to_string(),
        })));
        let dispatcher = Dispatcher::new(local, remote);

        let output = dispatcher.run(LanguageId::Python, "print(1)").await;

        assert!(output.contains("Remote execution failed"));
        assert!(output.contains("HTTP 500"));
    }

    #[tokio::test]
    async fn folds_stderr_under_the_error_header() {
        let local = Arc::new(MockLocal::new(
            true,
            Ok(RunOutcome {
                stdout: "partial\n".to_string(),
                stderr: "Traceback: boom\n".to_string(),
                ..Default::default()
            }),
        ));
        let remote = Arc::new(MockRemote::new(Ok(RunOutcome::default())));
        let dispatcher = Dispatcher::new(local, remote);

        let output = dispatcher.run(LanguageId::Python, "boom()").await;

        assert_eq!(output, "partial\nError:\nTraceback: boom\n");
    }
}
