use std::sync::Arc;

use polypad_core::Dispatcher;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;

/// Background worker resolving run requests.
///
/// Every `RunSnippet` produces exactly one `RunFinished`, whatever happens
/// inside the dispatcher. That pairing is what guarantees the UI's running
/// flag always transitions back to false.
pub async fn start_worker(
    dispatcher: Arc<Dispatcher>,
    event_tx: mpsc::UnboundedSender<Event>,
    mut actions: mpsc::UnboundedReceiver<Action>,
) {
    while let Some(action) = actions.recv().await {
        match action {
            Action::RunSnippet { ticket, request } => {
                let output = dispatcher.run(request.language, &request.source).await;
                let event = Event::RunFinished {
                    ticket,
                    language: request.language,
                    output,
                };
                if event_tx.send(event).is_err() {
                    // UI is gone; nothing left to deliver to.
                    return;
                }
            }
        }
    }
}
