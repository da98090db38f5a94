//! Local interpreter adapter: an embedded Python runtime.
//!
//! The RustPython VM is not `Send`, so it lives on a dedicated OS thread.
//! Callers talk to it over a job channel and await the reply; readiness is a
//! one-way NotReady -> Ready transition published on a watch channel once
//! the runtime has loaded. A load failure leaves readiness false and the
//! dispatcher degrades to remote-only execution.

use async_trait::async_trait;
use rustpython::vm::builtins::PyBaseExceptionRef;
use rustpython::vm::compiler::Mode;
use rustpython::vm::scope::Scope;
use rustpython::vm::VirtualMachine;
use tokio::sync::{mpsc, oneshot, watch};

use crate::errors::RunnerError;
use crate::run::RunOutcome;

/// Seam the dispatcher composes against. `execute` fails only on
/// adapter-internal faults; errors raised by the user's program are data,
/// captured into the outcome's stderr.
#[async_trait]
pub trait LocalRuntime: Send + Sync {
    fn is_ready(&self) -> bool;
    async fn execute(&self, source: &str) -> Result<RunOutcome, RunnerError>;
}

const REDIRECT_STREAMS: &str = "import sys
import io
sys.stdout = io.StringIO()
sys.stderr = io.StringIO()
";

const RESTORE_STREAMS: &str = "import sys
sys.stdout = sys.__stdout__
sys.stderr = sys.__stderr__
";

struct Job {
    source: String,
    reply: oneshot::Sender<RunOutcome>,
}

pub struct PythonInterpreter {
    jobs: mpsc::UnboundedSender<Job>,
    ready: watch::Receiver<bool>,
}

impl PythonInterpreter {
    /// Starts the interpreter thread. Returns immediately; the runtime
    /// loads in the background and flips the readiness signal when done.
    pub fn spawn() -> Result<PythonInterpreter, RunnerError> {
        let (job_tx, job_rx) = mpsc::unbounded_channel();
        let (ready_tx, ready_rx) = watch::channel(false);

        std::thread::Builder::new()
            .name("python-interpreter".to_string())
            .spawn(move || interpreter_thread(job_rx, ready_tx))
            .map_err(|err| RunnerError::InterpreterLoad(err.to_string()))?;

        Ok(PythonInterpreter {
            jobs: job_tx,
            ready: ready_rx,
        })
    }

    pub fn ready_signal(&self) -> watch::Receiver<bool> {
        self.ready.clone()
    }
}

#[async_trait]
impl LocalRuntime for PythonInterpreter {
    fn is_ready(&self) -> bool {
        *self.ready.borrow()
    }

    async fn execute(&self, source: &str) -> Result<RunOutcome, RunnerError> {
        if !self.is_ready() {
            return Err(RunnerError::InterpreterNotReady);
        }

        let (reply_tx, reply_rx) = oneshot::channel();
        self.jobs
            .send(Job {
                source: source.to_string(),
                reply: reply_tx,
            })
            .map_err(|_| RunnerError::InterpreterFault("interpreter thread is gone".to_string()))?;

        reply_rx
            .await
            .map_err(|_| RunnerError::InterpreterFault("interpreter dropped the reply".to_string()))
    }
}

/// Stand-in used when the embedded interpreter is disabled by
/// configuration; every run routes to the remote service.
pub struct DisabledInterpreter;

#[async_trait]
impl LocalRuntime for DisabledInterpreter {
    fn is_ready(&self) -> bool {
        false
    }

    async fn execute(&self, _source: &str) -> Result<RunOutcome, RunnerError> {
        Err(RunnerError::InterpreterNotReady)
    }
}

fn interpreter_thread(mut jobs: mpsc::UnboundedReceiver<Job>, ready: watch::Sender<bool>) {
    let interpreter = rustpython::InterpreterConfig::new()
        .init_stdlib()
        .interpreter();

    // Warm up the modules stream capture relies on. Failure here is the
    // load-failure path: readiness stays false and every run degrades to
    // remote execution.
    let warmup = interpreter.enter(|vm| {
        let scope = vm.new_scope_with_builtins();
        exec_source(vm, scope, "import sys\nimport io\n", "<warmup>")
    });
    if let Err(rendered) = warmup {
        log::error!("python runtime failed to initialize: {rendered}");
        return;
    }

    if ready.send(true).is_err() {
        return;
    }
    log::info!("python runtime loaded and ready");

    while let Some(job) = jobs.blocking_recv() {
        let outcome = interpreter.enter(|vm| run_captured(vm, &job.source));
        // Receiver may have given up waiting; nothing to do then.
        let _ = job.reply.send(outcome);
    }
}

/// Runs one source program with stdout/stderr captured.
///
/// The real streams are restored on every path, including compile errors
/// and raised exceptions, so a failing program never leaves the runtime
/// redirected for the next job.
fn run_captured(vm: &VirtualMachine, source: &str) -> RunOutcome {
    let capture_scope = vm.new_scope_with_builtins();
    if let Err(rendered) = exec_source(vm, capture_scope.clone(), REDIRECT_STREAMS, "<capture>") {
        return RunOutcome {
            stderr: rendered,
            ..Default::default()
        };
    }

    // User code gets a scope of its own; the capture scope keeps `sys`
    // imported for the buffer readout below.
    let user_scope = vm.new_scope_with_builtins();
    let user_error = exec_source(vm, user_scope, source, "<program>").err();

    let stdout =
        eval_to_string(vm, capture_scope.clone(), "sys.stdout.getvalue()").unwrap_or_default();
    let mut stderr =
        eval_to_string(vm, capture_scope.clone(), "sys.stderr.getvalue()").unwrap_or_default();

    if let Err(rendered) = exec_source(vm, capture_scope, RESTORE_STREAMS, "<capture>") {
        log::warn!("failed to restore interpreter streams: {rendered}");
    }

    if let Some(rendered) = user_error {
        if !stderr.is_empty() && !stderr.ends_with('\n') {
            stderr.push('\n');
        }
        stderr.push_str(&rendered);
    }

    RunOutcome {
        stdout,
        stderr,
        compile_output: None,
        status: None,
    }
}

fn exec_source(vm: &VirtualMachine, scope: Scope, source: &str, origin: &str) -> Result<(), String> {
    let code = match vm.compile(source, Mode::Exec, origin.to_owned()) {
        Ok(code) => code,
        Err(err) => {
            return Err(render_exception(vm, vm.new_syntax_error(&err, Some(source))));
        }
    };
    vm.run_code_obj(code, scope)
        .map(|_| ())
        .map_err(|exc| render_exception(vm, exc))
}

fn eval_to_string(vm: &VirtualMachine, scope: Scope, expr: &str) -> Option<String> {
    let code = vm.compile(expr, Mode::Eval, "<capture>".to_owned()).ok()?;
    let value = vm.run_code_obj(code, scope).ok()?;
    let text = value.str(vm).ok()?;
    Some(text.as_str().to_owned())
}

fn render_exception(vm: &VirtualMachine, exc: PyBaseExceptionRef) -> String {
    let mut rendered = String::new();
    if vm.write_exception(&mut rendered, &exc).is_err() {
        rendered = "<unprintable python exception>".to_string();
    }
    rendered
}
