use polypad_core::LanguageId;
use tui_textarea::Input;

#[derive(Debug)]
pub enum Event {
    RunFinished {
        ticket: u64,
        language: LanguageId,
        output: String,
    },
    InterpreterReady,
    KeyboardCharInput(Input),
    KeyboardPaste(String),
    KeyboardCTRLC,
    KeyboardCTRLE,
    KeyboardCTRLK,
    KeyboardCTRLL,
    KeyboardCTRLR,
    UITick,
    UIScrollDown,
    UIScrollUp,
    UIScrollPageDown,
    UIScrollPageUp,
}
