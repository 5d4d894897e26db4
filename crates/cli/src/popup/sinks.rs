use orgjump_protocol::ResultRecord;
use std::io::{self, Write};

pub const NO_RESULTS: &str = "No results found.";

/// Receives the suggestion list.
pub trait RenderSink {
    fn render(&mut self, records: &[ResultRecord]);
    fn clear(&mut self);
}

/// Single status line. An empty string hides it.
pub trait StatusSink {
    fn status(&mut self, text: &str);
}

/// Breadcrumb and placeholder around the input; setting them clears the input.
pub trait PromptSink {
    fn prompt(&mut self, breadcrumb: Option<&str>, placeholder: &str);
}

pub trait PopupView: RenderSink + StatusSink + PromptSink {}

impl<T: RenderSink + StatusSink + PromptSink> PopupView for T {}

/// Line-oriented view for a terminal. Suggestions are numbered from 1 so
/// `#N` can pick them.
pub struct TerminalView<W: Write> {
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// A closed reader is ignored; other write failures are logged and the popup goes on.
    fn write_text(&mut self, text: &str) {
        let written = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush());
        match written {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {}
            Err(err) => log::warn!("failed to write popup output: {err}"),
        }
    }
}

impl<W: Write> RenderSink for TerminalView<W> {
    fn render(&mut self, records: &[ResultRecord]) {
        if records.is_empty() {
            self.write_text(&format!("{NO_RESULTS}\n"));
            return;
        }
        let mut text = String::new();
        for (idx, record) in records.iter().enumerate() {
            text.push_str(&format!(
                "  {}. {}  [{}]\n",
                idx + 1,
                record.label,
                record.subtitle
            ));
        }
        self.write_text(&text);
    }

    fn clear(&mut self) {}
}

impl<W: Write> StatusSink for TerminalView<W> {
    fn status(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.write_text(&format!("{text}\n"));
    }
}

impl<W: Write> PromptSink for TerminalView<W> {
    fn prompt(&mut self, breadcrumb: Option<&str>, placeholder: &str) {
        let line = match breadcrumb {
            Some(crumb) => format!("{crumb} {placeholder}\n"),
            None => format!("{placeholder}\n"),
        };
        self.write_text(&line);
    }
}
