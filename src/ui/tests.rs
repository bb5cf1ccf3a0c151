use std::sync::Arc;

use chrono::{Local, TimeZone};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::app::App;
use crate::config::Config;
use crate::state::{PanelKind, SharedTelemetry};
use crate::ui::theme::{BorderStyle, ColorSupport, SeverityOverrides, Theme};
use crate::ui::{console, draw, header, panel, statusbar};
use crate::visual::{Fragment, PanelText, Tone, bar};

fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            let cell = buf.cell((x, y)).unwrap();
            out.push_str(cell.symbol());
        }
        if y + 1 < area.height {
            out.push('\n');
        }
    }
    out
}

fn render_to_string<F>(width: u16, height: u16, draw: F) -> String
where
    F: FnOnce(&mut ratatui::Frame),
{
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();
    let buf = terminal.backend().buffer();
    buffer_to_string(buf)
}

fn make_theme() -> Theme {
    let overrides = SeverityOverrides {
        low: "#10b981".to_string(),
        mid: "#eab308".to_string(),
        high: "#ef4444".to_string(),
    };
    Theme::from_config("vivid", &overrides, ColorSupport::Truecolor)
}

fn make_app(server_mode: bool) -> App {
    App::new(&Config::default(), server_mode, Arc::new(SharedTelemetry::new()))
}

fn draw_app(app: &mut App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| draw(frame, app)).unwrap();
    buffer_to_string(terminal.backend().buffer())
}

#[test]
fn panel_shows_title_and_markup() {
    let mut text = PanelText::new();
    let mut line = bar(55.0, 20).fragments();
    line.push(Fragment::plain(" ▂█"));
    text.push_line(line);

    let output = render_to_string(40, 3, |frame| {
        panel::render(
            frame,
            Rect::new(0, 0, 40, 3),
            PanelKind::Cpu,
            &text,
            &make_theme(),
            BorderStyle::Rounded,
        );
    });

    assert!(output.contains(" CPU Usage "));
    assert!(output.contains("███████████░░░░░░░░░ 55.0% ▂█"));
    assert!(output.starts_with('╭'));
}

#[test]
fn hot_temperature_uses_hot_color() {
    let theme = make_theme();
    let mut text = PanelText::new();
    text.push_line(vec![Fragment::new("cpu: 91.0°C", Tone::Hot)]);
    text.push_line(vec![Fragment::new("ssd: 40.0°C", Tone::Normal)]);

    let backend = TestBackend::new(30, 4);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            panel::render(
                frame,
                Rect::new(0, 0, 30, 4),
                PanelKind::Temps,
                &text,
                &theme,
                BorderStyle::Thin,
            );
        })
        .unwrap();
    let buf = terminal.backend().buffer();
    assert_eq!(buf.cell((1, 1)).unwrap().fg, theme.hot);
    assert_eq!(buf.cell((1, 2)).unwrap().fg, theme.normal);
}

#[test]
fn statusbar_pills_and_toggle_area() {
    let mut toggle_area = None;
    let output = render_to_string(60, 1, |frame| {
        toggle_area = statusbar::render(
            frame,
            Rect::new(0, 0, 60, 1),
            None,
            "q",
            "s",
            &make_theme(),
        );
    });

    assert!(output.contains(" q  Quit"));
    assert!(output.contains(" s  Settings"));
    assert_eq!(toggle_area, Some(Rect::new(9, 0, 13, 1)));
}

#[test]
fn statusbar_fault_replaces_pills() {
    let mut toggle_area = Some(Rect::default());
    let output = render_to_string(60, 1, |frame| {
        toggle_area = statusbar::render(
            frame,
            Rect::new(0, 0, 60, 1),
            Some("Log write failed: disk full"),
            "q",
            "s",
            &make_theme(),
        );
    });

    assert!(output.contains("Log write failed: disk full"));
    assert!(!output.contains("Settings"));
    assert_eq!(toggle_area, None);
}

#[test]
fn header_shows_mode_and_samples() {
    let now = Local.with_ymd_and_hms(2026, 5, 6, 7, 8, 9).unwrap();
    let output = render_to_string(80, 3, |frame| {
        header::render(
            frame,
            Rect::new(0, 0, 80, 3),
            true,
            42,
            now,
            &make_theme(),
            BorderStyle::Rounded,
        );
    });

    assert!(output.contains(" sysdash "));
    assert!(output.contains("Mode: Server"));
    assert!(output.contains("Samples: 42"));
    assert!(output.contains("07:08:09"));
}

#[test]
fn console_keeps_newest_lines() {
    let lines: Vec<String> = (0..10).map(|i| format!("reply {i}")).collect();
    let output = render_to_string(30, 5, |frame| {
        console::render(
            frame,
            Rect::new(0, 0, 30, 5),
            &lines,
            &make_theme(),
            BorderStyle::Rounded,
        );
    });

    assert!(output.contains(" Console "));
    assert!(output.contains("reply 9"));
    assert!(output.contains("reply 7"));
    assert!(!output.contains("reply 6"));
}

#[test]
fn draw_grid_shows_all_panels_by_default() {
    let mut app = make_app(false);
    let output = draw_app(&mut app, 100, 30);

    for kind in PanelKind::ALL {
        assert!(output.contains(kind.title()), "{kind:?} missing");
    }
    assert!(output.contains("Collecting..."));
    assert!(!output.contains("Console"));
    assert!(app.toggle_area.is_some());
}

#[test]
fn draw_after_toggle_hides_every_panel() {
    let mut app = make_app(false);
    app.state.toggle_visibility();
    let output = draw_app(&mut app, 100, 30);

    for kind in PanelKind::ALL {
        assert!(!output.contains(kind.title()), "{kind:?} still drawn");
    }
    assert!(output.contains("Panels hidden. Press s to show them."));
}

#[test]
fn draw_server_mode_adds_console() {
    let mut app = make_app(true);
    app.state.push_probe_line("64 bytes from 8.8.8.8: time=9.8 ms".into());
    let output = draw_app(&mut app, 100, 50);

    assert!(output.contains(" Console "));
    assert!(output.contains("64 bytes from 8.8.8.8: time=9.8 ms"));
    assert!(output.contains("Mode: Server"));
}
