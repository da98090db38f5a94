use polypad_core::RunRequest;

/// Work handed off to the background worker.
#[derive(Debug, Clone)]
pub enum Action {
    RunSnippet {
        /// Ticket minted when the run was triggered; results carrying a
        /// ticket that is no longer current are discarded as stale.
        ticket: u64,
        request: RunRequest,
    },
}
