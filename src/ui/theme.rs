use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

use crate::config::ColorsConfig;
use crate::visual::{Severity, Tone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSupport {
    Auto,
    Truecolor,
    Color256,
    Mono,
}

impl ColorSupport {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "truecolor" | "24bit" => ColorSupport::Truecolor,
            "256" | "256color" => ColorSupport::Color256,
            "mono" | "monochrome" => ColorSupport::Mono,
            _ => ColorSupport::Auto,
        }
    }
}

pub fn detect_color_support() -> ColorSupport {
    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorSupport::Truecolor;
    }
    ColorSupport::Color256
}

pub fn resolve_color_support(config: &str) -> ColorSupport {
    let parsed = ColorSupport::from_config_str(config);
    if parsed == ColorSupport::Auto {
        detect_color_support()
    } else {
        parsed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    Rounded,
    Thin,
}

impl BorderStyle {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "thin" | "plain" => BorderStyle::Thin,
            _ => BorderStyle::Rounded,
        }
    }

    pub fn border_type(self) -> BorderType {
        match self {
            BorderStyle::Rounded => BorderType::Rounded,
            BorderStyle::Thin => BorderType::Plain,
        }
    }
}

/// Hex colors from `[colors]` that replace the theme's severity palette.
#[derive(Debug, Clone)]
pub struct SeverityOverrides {
    pub low: String,
    pub mid: String,
    pub high: String,
}

impl SeverityOverrides {
    pub fn from_config(colors: &ColorsConfig) -> Self {
        Self {
            low: colors.severity_low.clone(),
            mid: colors.severity_mid.clone(),
            high: colors.severity_high.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub header_accent_bg: Color,
    pub header_accent_fg: Color,
    pub status_err: Color,
    pub statusbar_bg: Color,
    pub overlay_border: Color,
    pub panel_title: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
    pub console_fg: Color,
    /// Low, medium, high.
    pub severity: [Color; 3],
    pub faint: Color,
    pub hot: Color,
    pub normal: Color,
}

impl Theme {
    pub fn from_config(
        theme_name: &str,
        overrides: &SeverityOverrides,
        support: ColorSupport,
    ) -> Self {
        let mut theme = match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            "vivid" => Self::vivid(),
            "mono" => Self::mono(),
            _ => Self::dark(),
        };

        if support == ColorSupport::Mono {
            theme = Self::mono();
        } else {
            theme.apply_severity_overrides(overrides);
        }
        theme.apply_color_support(support);
        theme
    }

    fn apply_severity_overrides(&mut self, overrides: &SeverityOverrides) {
        let low = parse_hex_color(&overrides.low);
        let mid = parse_hex_color(&overrides.mid);
        let high = parse_hex_color(&overrides.high);

        if let (Some(low), Some(mid), Some(high)) = (low, mid, high) {
            self.severity = [low, mid, high];
        }
    }

    fn apply_color_support(&mut self, support: ColorSupport) {
        let map = |c: Color| adapt_color(c, support);

        self.header_accent_bg = map(self.header_accent_bg);
        self.header_accent_fg = map(self.header_accent_fg);
        self.status_err = map(self.status_err);
        self.statusbar_bg = map(self.statusbar_bg);
        self.overlay_border = map(self.overlay_border);
        self.panel_title = map(self.panel_title);
        self.text_primary = map(self.text_primary);
        self.text_secondary = map(self.text_secondary);
        self.pill_key_bg = map(self.pill_key_bg);
        self.pill_key_fg = map(self.pill_key_fg);
        self.pill_desc_fg = map(self.pill_desc_fg);
        self.surface_bg = map(self.surface_bg);
        self.console_fg = map(self.console_fg);
        self.faint = map(self.faint);
        self.hot = map(self.hot);
        self.normal = map(self.normal);

        self.severity = self.severity.map(map);
    }

    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Low => self.severity[0],
            Severity::Medium => self.severity[1],
            Severity::High => self.severity[2],
        }
    }

    /// Resolve a markup tone to a concrete style.
    pub fn tone_style(&self, tone: Tone) -> Style {
        match tone {
            Tone::Plain => Style::default().fg(self.text_primary),
            Tone::Severity(severity) => Style::default().fg(self.severity_color(severity)),
            Tone::Faint => Style::default().fg(self.faint),
            Tone::Hot => Style::default().fg(self.hot).add_modifier(Modifier::BOLD),
            Tone::Normal => Style::default().fg(self.normal),
        }
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            header_accent_bg: Color::Green,
            header_accent_fg: Color::Black,
            status_err: Color::Red,
            statusbar_bg: Color::DarkGray,
            overlay_border: Color::DarkGray,
            panel_title: Color::Cyan,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            pill_key_bg: Color::Yellow,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::DarkGray,
            console_fg: Color::Rgb(103, 232, 249),
            severity: [
                Color::Rgb(16, 185, 129),
                Color::Rgb(234, 179, 8),
                Color::Rgb(239, 68, 68),
            ],
            faint: Color::Rgb(71, 85, 105),
            hot: Color::Rgb(239, 68, 68),
            normal: Color::Rgb(16, 185, 129),
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            header_accent_bg: Color::Blue,
            header_accent_fg: Color::White,
            status_err: Color::Red,
            statusbar_bg: Color::Rgb(220, 220, 220),
            overlay_border: Color::Rgb(150, 150, 150),
            panel_title: Color::Blue,
            text_primary: Color::Black,
            text_secondary: Color::DarkGray,
            pill_key_bg: Color::Blue,
            pill_key_fg: Color::White,
            pill_desc_fg: Color::Black,
            surface_bg: Color::Rgb(200, 200, 200),
            console_fg: Color::Rgb(70, 130, 180),
            severity: [
                Color::Rgb(60, 160, 60),
                Color::Rgb(200, 140, 0),
                Color::Rgb(200, 60, 60),
            ],
            faint: Color::Rgb(180, 180, 180),
            hot: Color::Rgb(200, 60, 60),
            normal: Color::Rgb(60, 160, 60),
        }
    }

    pub fn vivid() -> Self {
        Theme {
            name: "vivid",
            header_accent_bg: Color::Rgb(203, 166, 247),
            header_accent_fg: Color::Rgb(30, 30, 46),
            status_err: Color::Rgb(243, 139, 168),
            statusbar_bg: Color::Rgb(49, 50, 68),
            overlay_border: Color::Rgb(69, 71, 90),
            panel_title: Color::Rgb(203, 166, 247),
            text_primary: Color::Rgb(205, 214, 244),
            text_secondary: Color::Rgb(166, 173, 200),
            pill_key_bg: Color::Rgb(203, 166, 247),
            pill_key_fg: Color::Rgb(30, 30, 46),
            pill_desc_fg: Color::Rgb(205, 214, 244),
            surface_bg: Color::Rgb(49, 50, 68),
            console_fg: Color::Rgb(125, 211, 252),
            severity: [
                Color::Rgb(166, 227, 161),
                Color::Rgb(249, 226, 175),
                Color::Rgb(243, 139, 168),
            ],
            faint: Color::Rgb(69, 71, 90),
            hot: Color::Rgb(243, 139, 168),
            normal: Color::Rgb(166, 227, 161),
        }
    }

    pub fn mono() -> Self {
        Theme {
            name: "mono",
            header_accent_bg: Color::Black,
            header_accent_fg: Color::White,
            status_err: Color::White,
            statusbar_bg: Color::Black,
            overlay_border: Color::White,
            panel_title: Color::White,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            pill_key_bg: Color::White,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::Black,
            console_fg: Color::White,
            severity: [Color::Gray, Color::White, Color::White],
            faint: Color::DarkGray,
            hot: Color::White,
            normal: Color::Gray,
        }
    }
}

fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 6 || !s.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&s[0..2], 16).ok()?;
    let g = u8::from_str_radix(&s[2..4], 16).ok()?;
    let b = u8::from_str_radix(&s[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

fn adapt_color(color: Color, support: ColorSupport) -> Color {
    match support {
        ColorSupport::Truecolor | ColorSupport::Auto => color,
        ColorSupport::Color256 => match color {
            Color::Rgb(r, g, b) => Color::Indexed(rgb_to_ansi256(r, g, b)),
            _ => color,
        },
        ColorSupport::Mono => match color {
            Color::Rgb(r, g, b) => {
                let luminance = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
                if luminance > 128.0 {
                    Color::White
                } else {
                    Color::Black
                }
            }
            Color::White | Color::Black | Color::Gray | Color::DarkGray => color,
            _ => Color::White,
        },
    }
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    let r = (r as f32 / 255.0 * 5.0).round() as u8;
    let g = (g as f32 / 255.0 * 5.0).round() as u8;
    let b = (b as f32 / 255.0 * 5.0).round() as u8;
    16 + 36 * r + 6 * g + b
}
