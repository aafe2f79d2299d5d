//! Terminal front end: transcript on stdout, `rustyline` for input.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::io::{self, Write};

use chat_widget::{terminal_columns, EntryKind, Transcript, TranscriptOptions};
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Cmd, Context, Helper, KeyCode, KeyEvent, Modifiers};
use unicode_width::UnicodeWidthStr;

use crate::app::{classify_key, ChatView, Key, KeyAction, KeyPress};
use crate::commands::COMMAND_NAMES;

pub const PROMPT: &str = "> ";

/// `ChatView` over a [`Transcript`] plus the state the input loop consults.
pub struct TerminalView<W: Write> {
    transcript: Transcript<W>,
    input_enabled: bool,
    pending_input: Option<String>,
    stop_requested: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, options: TranscriptOptions) -> Self {
        Self {
            transcript: Transcript::new(out, options),
            input_enabled: false,
            pending_input: None,
            stop_requested: false,
        }
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    /// Text to pre-fill the next prompt with, if a command staged one.
    pub fn take_pending_input(&mut self) -> Option<String> {
        self.pending_input.take()
    }

    pub fn transcript(&self) -> &Transcript<W> {
        &self.transcript
    }

    /// Erases the prompt and line the editor echoed, so the transcript entry
    /// is the only copy on screen.
    pub fn erase_echoed_input(&mut self, line: &str) {
        let Some(columns) = self.transcript.options().width else {
            return;
        };
        let rows = echoed_rows(PROMPT, line, columns);
        if rows == 0 {
            return;
        }
        let erase = format!("\x1b[{rows}F\x1b[J");
        let out = self.transcript.writer_mut();
        if let Err(error) = out.write_all(erase.as_bytes()).and_then(|()| out.flush()) {
            tracing::debug!(error = %error, "failed to erase echoed input");
        }
    }

    /// Re-reads the terminal width so wrapping tracks resizes.
    pub fn refresh_width(&mut self) {
        if self.transcript.options().width.is_some() {
            self.transcript.set_width(terminal_columns());
        }
    }

    fn report(result: io::Result<()>) {
        if let Err(error) = result {
            tracing::warn!(error = %error, "transcript write failed");
        }
    }
}

impl<W: Write> ChatView for TerminalView<W> {
    fn render(&mut self, kind: EntryKind, text: &str) {
        Self::report(self.transcript.render(kind, text));
    }

    fn show_loading(&mut self) {
        Self::report(self.transcript.show_loading_placeholder());
    }

    fn hide_loading(&mut self) {
        Self::report(self.transcript.hide_loading_placeholder());
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn clear_input(&mut self) {
        self.pending_input = None;
    }

    fn focus_input(&mut self) {
        // The prompt is redrawn, and so focused, on every loop iteration.
    }

    fn set_input(&mut self, text: &str) {
        self.pending_input = Some(text.to_string());
    }

    fn request_stop(&mut self) {
        self.stop_requested = true;
    }
}

/// Terminal rows occupied by `prompt` + `line` as echoed by the editor.
pub fn echoed_rows(prompt: &str, line: &str, columns: usize) -> usize {
    let columns = columns.max(1);
    line.split('\n')
        .enumerate()
        .map(|(index, part)| {
            let prefix = if index == 0 { prompt.width() } else { 0 };
            let width = part.width() + prefix;
            width.div_ceil(columns).max(1)
        })
        .sum()
}

/// Editor bindings for Enter with each modifier combination the terminal can
/// report, derived from [`classify_key`].
pub fn enter_bindings() -> Vec<(KeyEvent, Cmd)> {
    [
        (Modifiers::NONE, false, false),
        (Modifiers::SHIFT, true, false),
        (Modifiers::ALT, false, true),
    ]
    .into_iter()
    .map(|(modifiers, shift, alt)| {
        let cmd = match classify_key(KeyPress {
            key: Key::Enter,
            shift,
            alt,
        }) {
            KeyAction::InsertNewline => Cmd::Newline,
            KeyAction::Submit | KeyAction::Edit => Cmd::AcceptLine,
        };
        (KeyEvent(KeyCode::Enter, modifiers), cmd)
    })
    .collect()
}

/// Slash-command completion and hints for the prompt.
#[derive(Clone)]
pub struct CommandHelper {
    commands: Vec<String>,
    color: bool,
}

impl CommandHelper {
    pub fn new(color: bool) -> Self {
        Self {
            commands: COMMAND_NAMES.iter().map(|name| name.to_string()).collect(),
            color,
        }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return Ok((0, Vec::new()));
        }

        let candidates = self
            .commands
            .iter()
            .filter(|command| command.starts_with(line))
            .map(|command| Pair {
                display: command.clone(),
                replacement: command.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return None;
        }

        self.commands
            .iter()
            .find(|command| command.starts_with(line) && command.len() > line.len())
            .map(|command| command[line.len()..].to_string())
    }
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.color && line.starts_with('/') {
            Owned(format!("\x1b[36m{line}\x1b[39m"))
        } else {
            Borrowed(line)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        if self.color {
            Owned(format!("\x1b[2m{hint}\x1b[22m"))
        } else {
            Borrowed(hint)
        }
    }

    fn highlight_char(&self, line: &str, _pos: usize, _forced: bool) -> bool {
        self.color && line.starts_with('/')
    }
}

impl Validator for CommandHelper {}
