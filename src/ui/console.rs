use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::format::truncate_unicode;
use crate::ui::theme::{BorderStyle, Theme};

/// Server-mode probe log, newest line at the bottom.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    lines: &[String],
    theme: &Theme,
    border_style: BorderStyle,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_style.border_type())
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Console ",
            Style::default()
                .fg(theme.panel_title)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let height = inner.height as usize;
    let skip = lines.len().saturating_sub(height);
    let rows: Vec<Line> = lines[skip..]
        .iter()
        .map(|line| {
            Line::from(Span::styled(
                truncate_unicode(line, width),
                Style::default().fg(theme.console_fg),
            ))
        })
        .collect();

    frame.render_widget(Paragraph::new(rows), inner);
}
