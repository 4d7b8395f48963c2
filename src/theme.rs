//! Console theming: a light or dark surface combined with a primary palette.
//!
//! # Examples
//!
//! ```
//! use rconsole::theme::{Primary, ThemeManager};
//!
//! let mut manager = ThemeManager::new();
//! manager.set_primary(Primary::Violet);
//! manager.toggle_dark();
//! let theme = manager.current_theme();
//! assert_eq!(theme.name, "Dark / violet");
//! ```

use egui::Color32;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::viewport::ViewportPort;

/// Primary accent palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primary {
    #[default]
    Emerald,
    Blue,
    Violet,
    Amber,
}

impl Primary {
    pub const ALL: [Primary; 4] = [Primary::Emerald, Primary::Blue, Primary::Violet, Primary::Amber];

    pub fn name(self) -> &'static str {
        match self {
            Primary::Emerald => "emerald",
            Primary::Blue => "blue",
            Primary::Violet => "violet",
            Primary::Amber => "amber",
        }
    }

    /// Accent shade (500) for light surfaces.
    pub fn light_shade(self) -> Color32 {
        match self {
            Primary::Emerald => hex_to_color32("#10b981"),
            Primary::Blue => hex_to_color32("#3b82f6"),
            Primary::Violet => hex_to_color32("#8b5cf6"),
            Primary::Amber => hex_to_color32("#f59e0b"),
        }
    }

    /// Accent shade (400) for dark surfaces.
    pub fn dark_shade(self) -> Color32 {
        match self {
            Primary::Emerald => hex_to_color32("#34d399"),
            Primary::Blue => hex_to_color32("#60a5fa"),
            Primary::Violet => hex_to_color32("#a78bfa"),
            Primary::Amber => hex_to_color32("#fbbf24"),
        }
    }
}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Persisted theme choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemePreference {
    pub dark_theme: bool,
    pub primary: Primary,
}

/// Complete color palette for a theme
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Surfaces
    pub background: Color32,
    pub panel_background: Color32,
    pub extreme_background: Color32,
    /// Alternate row fill for striped tables.
    pub stripe: Color32,
    /// Fill behind frozen columns.
    pub frozen_background: Color32,

    // Foreground
    pub text: Color32,
    pub text_dim: Color32,
    pub text_strong: Color32,

    // Interactive
    pub primary: Color32,
    pub selection: Color32,
    pub hover: Color32,
    pub border: Color32,

    // Status
    pub red: Color32,
    pub orange: Color32,
    pub green: Color32,
}

/// A theme with its display name.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

impl Theme {
    pub fn build(preference: ThemePreference) -> Self {
        let surface = if preference.dark_theme { "Dark" } else { "Light" };
        Self {
            name: format!("{} / {}", surface, preference.primary),
            colors: if preference.dark_theme {
                dark_colors(preference.primary)
            } else {
                light_colors(preference.primary)
            },
        }
    }
}

/// Holds the current preference and turns it into egui visuals.
#[derive(Debug, Clone, Default)]
pub struct ThemeManager {
    preference: ThemePreference,
}

impl ThemeManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preference(preference: ThemePreference) -> Self {
        Self { preference }
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    pub fn is_dark(&self) -> bool {
        self.preference.dark_theme
    }

    pub fn set_dark(&mut self, dark: bool) {
        self.preference.dark_theme = dark;
    }

    pub fn toggle_dark(&mut self) {
        self.preference.dark_theme = !self.preference.dark_theme;
    }

    pub fn set_primary(&mut self, primary: Primary) {
        self.preference.primary = primary;
    }

    /// Sets the primary palette by name.
    pub fn set_primary_by_name(&mut self, name: &str) -> Result<(), String> {
        match Primary::ALL.iter().find(|p| p.name() == name) {
            Some(primary) => {
                self.preference.primary = *primary;
                Ok(())
            }
            None => Err(format!("Palette '{}' not found", name)),
        }
    }

    pub fn current_theme(&self) -> Theme {
        Theme::build(self.preference)
    }

    /// Pushes the dark-mode flag to the host window.
    pub fn sync_viewport(&self, viewport: &mut dyn ViewportPort) {
        viewport.set_dark_mode(self.preference.dark_theme);
    }

    /// Applies a theme's colors on top of the matching egui base visuals.
    pub fn apply_theme(&self, theme: &Theme, visuals: &mut egui::Visuals) {
        let colors = &theme.colors;

        visuals.panel_fill = colors.panel_background;
        visuals.window_fill = colors.panel_background;
        visuals.extreme_bg_color = colors.extreme_background;
        visuals.faint_bg_color = colors.stripe;

        visuals.override_text_color = Some(colors.text);

        visuals.selection.bg_fill = colors.selection;
        visuals.selection.stroke.color = colors.primary;

        visuals.widgets.noninteractive.bg_fill = colors.panel_background;
        visuals.widgets.noninteractive.bg_stroke.color = colors.border;
        visuals.widgets.inactive.bg_fill = colors.hover;
        visuals.widgets.hovered.bg_fill = colors.hover;
        visuals.widgets.active.bg_fill = colors.selection;

        visuals.hyperlink_color = colors.primary;
        visuals.error_fg_color = colors.red;
        visuals.warn_fg_color = colors.orange;
    }
}

fn light_colors(primary: Primary) -> ThemeColors {
    let accent = primary.light_shade();
    ThemeColors {
        background: hex_to_color32("#f8fafc"),
        panel_background: hex_to_color32("#ffffff"),
        extreme_background: hex_to_color32("#ffffff"),
        stripe: hex_to_color32("#f1f5f9"),
        frozen_background: hex_to_color32("#f8fafc"),

        text: hex_to_color32("#334155"),
        text_dim: hex_to_color32("#64748b"),
        text_strong: hex_to_color32("#0f172a"),

        primary: accent,
        selection: with_alpha(accent, 60),
        hover: hex_to_color32("#e2e8f0"),
        border: hex_to_color32("#cbd5e1"),

        red: hex_to_color32("#ef4444"),
        orange: hex_to_color32("#f97316"),
        green: hex_to_color32("#22c55e"),
    }
}

fn dark_colors(primary: Primary) -> ThemeColors {
    let accent = primary.dark_shade();
    ThemeColors {
        background: hex_to_color32("#09090b"),
        panel_background: hex_to_color32("#18181b"),
        extreme_background: hex_to_color32("#09090b"),
        stripe: hex_to_color32("#1f1f23"),
        frozen_background: hex_to_color32("#202024"),

        text: hex_to_color32("#e4e4e7"),
        text_dim: hex_to_color32("#a1a1aa"),
        text_strong: hex_to_color32("#fafafa"),

        primary: accent,
        selection: adjust_brightness(accent, 0.45),
        hover: hex_to_color32("#27272a"),
        border: hex_to_color32("#3f3f46"),

        red: hex_to_color32("#f87171"),
        orange: hex_to_color32("#fb923c"),
        green: hex_to_color32("#4ade80"),
    }
}

/// Converts a hex color string (like "#282a36") to Color32
pub fn hex_to_color32(hex: &str) -> Color32 {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color32::from_rgb(r, g, b)
    } else {
        Color32::from_rgb(0, 0, 0)
    }
}

/// Scales a color's brightness (1.0 = unchanged)
pub fn adjust_brightness(color: Color32, factor: f32) -> Color32 {
    let r = (color.r() as f32 * factor).min(255.0) as u8;
    let g = (color.g() as f32 * factor).min(255.0) as u8;
    let b = (color.b() as f32 * factor).min(255.0) as u8;
    Color32::from_rgb(r, g, b)
}

/// Same color with a new alpha
pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}
