pub mod console;
pub mod header;
pub mod panel;
pub mod statusbar;
pub mod theme;

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Paragraph;

use crate::app::{App, key_label};
use crate::state::{CONSOLE_LINES, PanelKind, PanelSnapshot};
use crate::ui::theme::{BorderStyle, Theme};

const GRID_COLUMNS: usize = 2;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let console_height = if app.server_mode {
        CONSOLE_LINES as u16 + 2
    } else {
        0
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(console_height),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(
        frame,
        chunks[0],
        app.server_mode,
        app.state.ticks(),
        Local::now(),
        &app.theme,
        app.border_style,
    );

    let visible = app.state.visibility().visible();
    if visible.is_empty() {
        render_hidden_hint(frame, chunks[1], &key_label(app.keybinds.toggle), &app.theme);
    } else {
        let panels = app.state.panels();
        render_grid(
            frame,
            chunks[1],
            &visible,
            &panels,
            &app.theme,
            app.border_style,
        );
    }

    if app.server_mode {
        let lines = app.state.probe_tail(CONSOLE_LINES);
        console::render(frame, chunks[2], &lines, &app.theme, app.border_style);
    }

    app.toggle_area = statusbar::render(
        frame,
        chunks[3],
        app.fault.as_deref(),
        &key_label(app.keybinds.quit),
        &key_label(app.keybinds.toggle),
        &app.theme,
    );
}

/// Visible panels in grid order, two per row.
fn render_grid(
    frame: &mut Frame,
    area: Rect,
    visible: &[PanelKind],
    panels: &PanelSnapshot,
    theme: &Theme,
    border_style: BorderStyle,
) {
    let rows: Vec<&[PanelKind]> = visible.chunks(GRID_COLUMNS).collect();
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Fill(1); rows.len()])
        .split(area);

    for (row, row_area) in rows.iter().zip(row_areas.iter()) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(*row_area);
        for (kind, cell) in row.iter().zip(cells.iter()) {
            panel::render(frame, *cell, *kind, panels.get(*kind), theme, border_style);
        }
    }
}

fn render_hidden_hint(frame: &mut Frame, area: Rect, toggle_key: &str, theme: &Theme) {
    let hint = Paragraph::new(format!("Panels hidden. Press {toggle_key} to show them."))
        .style(Style::default().fg(theme.text_secondary))
        .alignment(Alignment::Center);
    let y = area.y + area.height / 2;
    frame.render_widget(hint, Rect::new(area.x, y, area.width, 1.min(area.height)));
}

#[cfg(test)]
mod tests;
