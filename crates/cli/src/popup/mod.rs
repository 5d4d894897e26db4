//! Interactive command popup: state machine, debounce and the async driver.

mod commands;
mod debounce;
mod driver;
mod interpreter;
mod sinks;

pub use driver::{PopupDriver, PopupExit, STATUS_READY, STATUS_SEARCHING};
pub use interpreter::{
    Interpreter, LookupRequest, Mode, PopupAction, PopupEvent, ROOT_PLACEHOLDER,
};
pub use sinks::{PopupView, PromptSink, RenderSink, StatusSink, TerminalView, NO_RESULTS};

use std::io::BufRead;
use tokio::sync::mpsc;

/// Maps one terminal line onto a popup event.
///
/// `?text` updates the input, `#N` picks suggestion N, an empty line is a
/// backspace on an empty input, anything else is Enter.
pub fn parse_line(line: &str) -> PopupEvent {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return PopupEvent::Backspace { input_empty: true };
    }
    if let Some(text) = line.strip_prefix('?') {
        return PopupEvent::Input(text.to_string());
    }
    if let Some(index) = line
        .strip_prefix('#')
        .and_then(|n| n.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
    {
        return PopupEvent::Activate(index - 1);
    }
    PopupEvent::Enter(line.to_string())
}

/// Forwards lines from `reader` as events until EOF or the receiver goes
/// away. Reads on a plain thread so a pending read never holds up runtime
/// shutdown.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::Receiver<PopupEvent>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(32);
    std::thread::spawn(move || {
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(parse_line(&line)).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    log::warn!("failed to read popup input: {err}");
                    break;
                }
            }
        }
    });
    rx
}
