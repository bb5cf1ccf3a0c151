/// How a run of text should be colored. The UI maps tones onto theme colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Severity(super::Severity),
    Faint,
    Hot,
    Normal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub tone: Tone,
}

impl Fragment {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Plain)
    }
}

/// Styled text for one panel. Built whole and swapped in whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelText {
    pub lines: Vec<Vec<Fragment>>,
}

impl PanelText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single plain line, used for placeholders like "No battery".
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            lines: vec![vec![Fragment::plain(text)]],
        }
    }

    pub fn push_line(&mut self, line: Vec<Fragment>) {
        self.lines.push(line);
    }

    /// Text with all styling stripped, lines joined by `\n`.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.iter().map(|f| f.text.as_str()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
