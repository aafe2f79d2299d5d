//! Line-oriented transcript renderer.
//!
//! Entries are written once, in order, and never redrawn. The only mutable
//! region is a single trailing loading line, which is written without a
//! newline so it can be erased in place with a carriage return and
//! clear-line sequence.

use std::io::{self, Write};

use unicode_width::UnicodeWidthChar;

const CLEAR_LINE: &str = "\r\x1b[2K";
const LABEL_SEPARATOR: &str = " > ";
/// Below this many text columns wrapping is skipped.
const MIN_WRAP_COLUMNS: usize = 8;

pub const DEFAULT_LOADING_TEXT: &str = "Thinking...";

/// Visual class of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    System,
    User,
    Agent,
    Error,
}

impl EntryKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "you",
            Self::Agent => "agent",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub kind: EntryKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptOptions {
    pub color: bool,
    /// Terminal columns. `None` disables wrapping.
    pub width: Option<usize>,
    pub loading_text: String,
}

impl Default for TranscriptOptions {
    fn default() -> Self {
        Self {
            color: true,
            width: None,
            loading_text: DEFAULT_LOADING_TEXT.to_string(),
        }
    }
}

impl TranscriptOptions {
    #[must_use]
    pub fn plain() -> Self {
        Self {
            color: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_width(mut self, width: Option<usize>) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_loading_text(mut self, text: impl Into<String>) -> Self {
        self.loading_text = text.into();
        self
    }
}

/// Append-only transcript panel writing to `W`.
pub struct Transcript<W: Write> {
    out: W,
    options: TranscriptOptions,
    entries: Vec<TranscriptEntry>,
    loading_visible: bool,
}

impl<W: Write> Transcript<W> {
    pub fn new(out: W, options: TranscriptOptions) -> Self {
        Self {
            out,
            options,
            entries: Vec::new(),
            loading_visible: false,
        }
    }

    /// Appends an entry and writes it below everything rendered so far.
    ///
    /// A visible loading line stays the last line.
    pub fn render(&mut self, kind: EntryKind, text: &str) -> io::Result<()> {
        let entry = TranscriptEntry {
            kind,
            text: text.to_string(),
        };
        let formatted = format_entry(&entry, &self.options);
        self.entries.push(entry);

        if self.loading_visible {
            self.out.write_all(CLEAR_LINE.as_bytes())?;
        }
        self.out.write_all(formatted.as_bytes())?;
        if self.loading_visible {
            self.out
                .write_all(loading_line(&self.options).as_bytes())?;
        }
        self.out.flush()
    }

    /// Shows the transient loading line. No-op while already shown.
    pub fn show_loading_placeholder(&mut self) -> io::Result<()> {
        if self.loading_visible {
            return Ok(());
        }
        self.out
            .write_all(loading_line(&self.options).as_bytes())?;
        self.out.flush()?;
        self.loading_visible = true;
        Ok(())
    }

    /// Erases the loading line. Idempotent.
    pub fn hide_loading_placeholder(&mut self) -> io::Result<()> {
        if !self.loading_visible {
            return Ok(());
        }
        self.out.write_all(CLEAR_LINE.as_bytes())?;
        self.out.flush()?;
        self.loading_visible = false;
        Ok(())
    }

    #[must_use]
    pub fn is_loading_visible(&self) -> bool {
        self.loading_visible
    }

    #[must_use]
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    #[must_use]
    pub fn options(&self) -> &TranscriptOptions {
        &self.options
    }

    pub fn set_width(&mut self, width: Option<usize>) {
        self.options.width = width;
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Formats one entry as `label > text`, wrapped with a hanging indent and
/// terminated by a newline.
#[must_use]
pub fn format_entry(entry: &TranscriptEntry, options: &TranscriptOptions) -> String {
    let label = entry.kind.label();
    let prefix_width = label.len() + LABEL_SEPARATOR.len();
    let text_width = options
        .width
        .map(|width| width.saturating_sub(prefix_width))
        .filter(|width| *width >= MIN_WRAP_COLUMNS);

    let lines = match text_width {
        Some(width) => wrap_text(&entry.text, width),
        None => entry.text.split('\n').map(str::to_string).collect(),
    };

    let mut out = String::new();
    out.push_str(&style_label(entry.kind, label, options.color));
    out.push_str(&dim_if(LABEL_SEPARATOR, options.color));

    let indent = " ".repeat(prefix_width);
    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(&indent);
            }
        }
        out.push_str(&style_body(entry.kind, line, options.color));
    }
    out.push('\n');
    out
}

fn loading_line(options: &TranscriptOptions) -> String {
    let label = EntryKind::Agent.label();
    format!(
        "{}{}{}",
        style_label(EntryKind::Agent, label, options.color),
        dim_if(LABEL_SEPARATOR, options.color),
        dim_if(&options.loading_text, options.color)
    )
}

/// Greedy word wrap by display width.
///
/// Explicit newlines are kept. Words wider than `width` are split.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0;

        for word in paragraph.split(' ') {
            let word_width = display_width(word);
            let gap = usize::from(!line.is_empty());

            if line_width + gap + word_width <= width {
                if gap == 1 {
                    line.push(' ');
                }
                line.push_str(word);
                line_width += gap + word_width;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }

            if word_width <= width {
                line.push_str(word);
                line_width = word_width;
                continue;
            }

            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if line_width + ch_width > width && !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push(ch);
                line_width += ch_width;
            }
        }

        lines.push(line);
    }

    lines
}

fn display_width(text: &str) -> usize {
    text.chars().map(|ch| ch.width().unwrap_or(0)).sum()
}

fn ansi_wrap(text: &str, prefix: &str, suffix: &str) -> String {
    format!("{prefix}{text}{suffix}")
}

fn dim_if(text: &str, color: bool) -> String {
    if color {
        ansi_wrap(text, "\x1b[2m", "\x1b[22m")
    } else {
        text.to_string()
    }
}

fn style_label(kind: EntryKind, label: &str, color: bool) -> String {
    if !color {
        return label.to_string();
    }
    match kind {
        EntryKind::System => ansi_wrap(label, "\x1b[2m", "\x1b[22m"),
        EntryKind::User => ansi_wrap(label, "\x1b[1m\x1b[36m", "\x1b[39m\x1b[22m"),
        EntryKind::Agent => ansi_wrap(label, "\x1b[1m\x1b[32m", "\x1b[39m\x1b[22m"),
        EntryKind::Error => ansi_wrap(label, "\x1b[1m\x1b[31m", "\x1b[39m\x1b[22m"),
    }
}

fn style_body(kind: EntryKind, text: &str, color: bool) -> String {
    if !color || text.is_empty() {
        return text.to_string();
    }
    match kind {
        EntryKind::System => ansi_wrap(text, "\x1b[2m", "\x1b[22m"),
        EntryKind::Error => ansi_wrap(text, "\x1b[31m", "\x1b[39m"),
        EntryKind::User | EntryKind::Agent => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_spaces_and_keeps_newlines() {
        assert_eq!(
            wrap_text("one two three\n\nfour", 7),
            vec!["one two", "three", "", "four"]
        );
    }

    #[test]
    fn wrap_splits_overlong_words() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_counts_wide_characters_by_display_width() {
        assert_eq!(wrap_text("日本語テキスト", 6), vec!["日本語", "テキス", "ト"]);
    }

    #[test]
    fn coloured_labels_are_wrapped_in_sgr_sequences() {
        let entry = TranscriptEntry {
            kind: EntryKind::Error,
            text: "boom".to_string(),
        };
        let formatted = format_entry(&entry, &TranscriptOptions::default());

        assert!(formatted.starts_with("\x1b[1m\x1b[31merror"));
        assert!(formatted.contains("\x1b[31mboom\x1b[39m"));
    }
}
