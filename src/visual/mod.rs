//! Pure text visualizations: percentage bars and sparklines.
//!
//! Nothing in here knows about the terminal backend or the metrics source.
//! Output is either a plain glyph string or [`Fragment`]s tagged with a
//! [`Tone`] that the UI layer resolves to colors.

pub mod markup;

pub use markup::{Fragment, PanelText, Tone};

pub const BAR_WIDTH: usize = 20;
pub const SPARKLINE_LENGTH: usize = 20;

pub const BAR_FILLED: char = '█';
pub const BAR_EMPTY: char = '░';
pub const SPARK_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn for_percent(percent: f64) -> Self {
        if percent < 50.0 {
            Severity::Low
        } else if percent < 80.0 {
            Severity::Medium
        } else {
            Severity::High
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub filled: usize,
    pub empty: usize,
    pub severity: Severity,
    pub percent: f64,
}

impl Bar {
    pub fn fragments(&self) -> Vec<Fragment> {
        vec![
            Fragment::new(
                BAR_FILLED.to_string().repeat(self.filled),
                Tone::Severity(self.severity),
            ),
            Fragment::new(BAR_EMPTY.to_string().repeat(self.empty), Tone::Faint),
            Fragment::plain(format!(" {:.1}%", self.percent)),
        ]
    }
}

impl std::fmt::Display for Bar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for fragment in self.fragments() {
            f.write_str(&fragment.text)?;
        }
        Ok(())
    }
}

/// Percentage bar of `width` cells.
///
/// The glyph counts are clamped to `0..=width`, so a reading slightly above
/// 100 (or a negative one) still draws a bar of exactly `width` cells. The
/// label and severity use the raw value.
pub fn bar(percent: f64, width: usize) -> Bar {
    let raw = (width as f64 * percent / 100.0).floor();
    let filled = if raw.is_nan() {
        0
    } else {
        raw.clamp(0.0, width as f64) as usize
    };
    Bar {
        filled,
        empty: width - filled,
        severity: Severity::for_percent(percent),
        percent,
    }
}

/// Glyph sparkline of the last `length` samples, scaled to the window max.
///
/// Output has one glyph per sample in the window, so fewer samples than
/// `length` yield a shorter string.
pub fn sparkline(history: &[f64], length: usize) -> String {
    let window = &history[history.len().saturating_sub(length)..];
    if window.is_empty() {
        return String::new();
    }

    let max = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let max = if max == 0.0 { 1.0 } else { max };
    let top = (SPARK_GLYPHS.len() - 1) as f64;

    window
        .iter()
        .map(|value| {
            let level = ((value / max) * top).floor();
            let index = if level.is_nan() {
                0
            } else {
                level.clamp(0.0, top) as usize
            };
            SPARK_GLYPHS[index]
        })
        .collect()
}
