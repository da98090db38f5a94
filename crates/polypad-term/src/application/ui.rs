use std::io;
use std::io::Stdout;
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use polypad_core::{descriptor, Dispatcher, LanguageId};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use tokio::sync::{mpsc, watch};

use crate::domain::models::Event;
use crate::domain::services::{start_worker, AppState, AppStateProps, EventsService};

pub struct WorkbenchProps {
    pub dispatcher: Arc<Dispatcher>,
    pub language: LanguageId,
    /// Readiness signal of the embedded interpreter; `None` when it is
    /// disabled.
    pub ready: Option<watch::Receiver<bool>>,
}

/// Tears the terminal down from a panic handler, where the usual cleanup
/// path never runs.
pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = execute!(io::stdout(), crossterm::cursor::Show);
}

pub async fn start_loop(props: WorkbenchProps) -> Result<()> {
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();
    let (action_tx, action_rx) = mpsc::unbounded_channel();

    let interpreter_ready = props.ready.as_ref().map(|r| *r.borrow()).unwrap_or(false);
    if let Some(mut ready) = props.ready {
        let ready_tx = event_tx.clone();
        tokio::spawn(async move {
            if ready.wait_for(|is_ready| *is_ready).await.is_ok() {
                let _ = ready_tx.send(Event::InterpreterReady);
            }
        });
    }

    let worker_tx = event_tx.clone();
    tokio::spawn(start_worker(props.dispatcher, worker_tx, action_rx));

    let mut app_state = AppState::new(AppStateProps {
        language: props.language,
        interpreter_ready,
    });

    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, &mut app_state, event_rx, action_tx).await;
    restore_terminal()?;

    return result;
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app_state: &mut AppState<'_>,
    event_rx: mpsc::UnboundedReceiver<Event>,
    action_tx: mpsc::UnboundedSender<crate::domain::models::Action>,
) -> Result<()> {
    let mut events = EventsService::new(event_rx);

    loop {
        terminal.draw(|frame| draw(frame, app_state))?;

        match events.next().await? {
            Event::KeyboardCTRLC => break,
            Event::KeyboardCTRLR => {
                if let Some(action) = app_state.begin_run() {
                    action_tx.send(action)?;
                }
            }
            Event::KeyboardCTRLL => app_state.cycle_language(),
            Event::KeyboardCTRLE => app_state.reset_source(),
            Event::KeyboardCTRLK => app_state.clear_output(),
            Event::KeyboardCharInput(input) => {
                app_state.editor.input(input);
            }
            Event::KeyboardPaste(text) => {
                app_state.editor.insert_str(text);
            }
            Event::RunFinished {
                ticket,
                language,
                output,
            } => app_state.finish_run(ticket, language, output),
            Event::InterpreterReady => app_state.mark_interpreter_ready(),
            Event::UIScrollUp => app_state.scroll_by(-1),
            Event::UIScrollDown => app_state.scroll_by(1),
            Event::UIScrollPageUp => app_state.scroll_by(-10),
            Event::UIScrollPageDown => app_state.scroll_by(10),
            Event::UITick => {}
        }
    }

    return Ok(());
}

fn draw(frame: &mut Frame, state: &mut AppState) {
    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(frame.area());

    let desc = descriptor(state.language);
    let header = Line::from(vec![
        Span::raw(" polypad ").bold(),
        Span::raw(format!("· {} ", desc.label)),
        Span::raw(format!("· {}", state.status_text())).dim(),
    ]);
    frame.render_widget(Paragraph::new(header), rows[0]);

    let panes =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(rows[1]);

    state
        .editor
        .set_block(Block::bordered().title(format!(" {} · {} ", desc.file_name, desc.editor_syntax)));
    state
        .editor
        .set_line_number_style(Style::default().dim());
    frame.render_widget(&state.editor, panes[0]);

    let output_title = if state.running {
        " Output · running... "
    } else {
        " Output "
    };
    let output_text = if state.output.is_empty() {
        placeholder_text(state)
    } else {
        state.output.clone()
    };
    let output = Paragraph::new(output_text)
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0))
        .block(Block::bordered().title(output_title));
    frame.render_widget(output, panes[1]);

    let footer = Line::from(
        " Ctrl+R run · Ctrl+L language · Ctrl+E reset · Ctrl+K clear · PgUp/PgDn scroll · Ctrl+C quit ",
    )
    .dim();
    frame.render_widget(Paragraph::new(footer), rows[2]);
}

fn placeholder_text(state: &AppState) -> String {
    if state.language == LanguageId::Python && !state.interpreter_ready {
        return "Waiting for the Python environment to load...\n\
                Runs started now go to the remote execution service."
            .to_string();
    }
    return format!(
        "{} editor ready. Press Ctrl+R to run your code.",
        descriptor(state.language).label
    );
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    return Ok(Terminal::new(CrosstermBackend::new(stdout))?);
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    return Ok(());
}
