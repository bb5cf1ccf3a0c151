use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::state::PanelKind;
use crate::ui::theme::{BorderStyle, Theme};
use crate::visual::PanelText;

/// Map panel markup onto styled lines.
pub fn to_lines<'a>(text: &'a PanelText, theme: &Theme) -> Vec<Line<'a>> {
    text.lines
        .iter()
        .map(|fragments| {
            Line::from(
                fragments
                    .iter()
                    .map(|f| Span::styled(f.text.as_str(), theme.tone_style(f.tone)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    kind: PanelKind,
    text: &PanelText,
    theme: &Theme,
    border_style: BorderStyle,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_style.border_type())
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            format!(" {} ", kind.title()),
            Style::default()
                .fg(theme.panel_title)
                .add_modifier(Modifier::BOLD),
        ));

    let paragraph = Paragraph::new(to_lines(text, theme))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
