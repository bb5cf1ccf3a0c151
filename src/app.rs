use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;

use crate::action::Action;
use crate::config::{Config, KeybindsConfig, parse_key};
use crate::state::SharedTelemetry;
use crate::ui::theme::{BorderStyle, SeverityOverrides, Theme, resolve_color_support};

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub toggle: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            toggle: parse_key(&kb.toggle).unwrap_or(KeyCode::Char('s')),
        }
    }
}

pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Delete => "Del".to_string(),
        _ => "?".to_string(),
    }
}

/// Display-side state. Telemetry itself lives in [`SharedTelemetry`]; the
/// app only reads it and flips visibility.
pub struct App {
    pub running: bool,
    pub state: Arc<SharedTelemetry>,
    pub server_mode: bool,
    pub theme: Theme,
    pub border_style: BorderStyle,
    pub keybinds: ResolvedKeybinds,
    /// Where the settings pill was last drawn, for mouse hits.
    pub toggle_area: Option<Rect>,
    pub fault: Option<String>,
}

impl App {
    pub fn new(config: &Config, server_mode: bool, state: Arc<SharedTelemetry>) -> Self {
        let color_support = resolve_color_support(&config.colors.color_support);
        let overrides = SeverityOverrides::from_config(&config.colors);
        let theme = Theme::from_config(&config.colors.theme, &overrides, color_support);

        App {
            running: true,
            state,
            server_mode,
            theme,
            border_style: BorderStyle::from_config_str(&config.colors.border_style),
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
            toggle_area: None,
            fault: None,
        }
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        if key.code == self.keybinds.quit {
            return Action::Quit;
        }
        if key.code == self.keybinds.toggle {
            return Action::TogglePanels;
        }
        Action::None
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::TogglePanels => self.toggle_panels(),
            Action::ClickAt(col, row) => {
                if self.hits_toggle(col, row) {
                    self.toggle_panels();
                }
            }
            Action::None => {}
        }
    }

    fn toggle_panels(&mut self) {
        let flags = self.state.toggle_visibility();
        tracing::debug!(visible = flags.visible().len(), "panels toggled");
    }

    fn hits_toggle(&self, col: u16, row: u16) -> bool {
        let Some(area) = self.toggle_area else {
            return false;
        };
        col >= area.x && col < area.x + area.width && row >= area.y && row < area.y + area.height
    }

    /// Called on every redraw tick. A background fault ends the display.
    pub fn on_tick(&mut self) {
        if self.fault.is_none()
            && let Some(fault) = self.state.fault()
        {
            tracing::error!(fault = %fault, "background worker failed, leaving display");
            self.fault = Some(fault);
            self.running = false;
        }
    }
}
