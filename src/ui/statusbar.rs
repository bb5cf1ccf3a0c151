use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::ui::theme::Theme;

/// Draw the key pills, or the fault message when one is set.
///
/// Returns where the settings pill landed so clicks on it can toggle.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    fault: Option<&str>,
    quit_key: &str,
    toggle_key: &str,
    theme: &Theme,
) -> Option<Rect> {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    // Fault takes priority
    if let Some(msg) = fault {
        let line = Line::from(Span::styled(
            format!(" {msg}"),
            Style::default()
                .fg(theme.status_err)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line).style(bg_style), area);
        return None;
    }

    let quit = pill_spans(quit_key, "Quit", theme);
    let toggle = pill_spans(toggle_key, "Settings", theme);

    let offset = spans_width(&quit);
    let toggle_width = spans_width(&toggle);

    let mut spans = quit;
    spans.extend(toggle);
    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);

    let x = area.x.saturating_add(offset);
    if x >= area.right() {
        return None;
    }
    let width = toggle_width.min(area.right() - x);
    Some(Rect::new(x, area.y, width, 1))
}

fn spans_width(spans: &[Span]) -> u16 {
    spans
        .iter()
        .map(|s| s.content.width())
        .sum::<usize>()
        .try_into()
        .unwrap_or(u16::MAX)
}

fn pill_spans<'a>(key: &str, desc: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg).bg(theme.surface_bg),
        ),
    ]
}
