//! Lesson views and the text surface they render to.

use crate::host::LessonHost;

/// Input every view treats as "leave the lesson".
pub const BACK_COMMAND: &str = "back";

/// Area a view is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    /// Width in columns.
    pub width: usize,
}

impl Default for Surface {
    fn default() -> Self {
        Self { width: 72 }
    }
}

/// One rendered line, coloured with a theme token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub color: &'static str,
    pub bold: bool,
}

/// Rendered content of a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<Line>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, text: impl Into<String>, color: &'static str) {
        self.lines.push(Line {
            text: text.into(),
            color,
            bold: false,
        });
    }

    pub fn bold(&mut self, text: impl Into<String>, color: &'static str) {
        self.lines.push(Line {
            text: text.into(),
            color,
            bold: true,
        });
    }

    pub fn blank(&mut self) {
        self.text("", "");
    }

    /// All text, one line per entry. Handy for assertions.
    pub fn plain(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// An interactive lesson, produced by a builder.
pub trait LessonView {
    /// Title shown above the view.
    fn title(&self) -> &str;

    /// Draw the current state. Colours come from `host.theme()` at call time.
    fn render(&self, host: &dyn LessonHost) -> Frame;

    /// React to one line of user input.
    fn handle(&mut self, input: &str, host: &mut dyn LessonHost);
}
