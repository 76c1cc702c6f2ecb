//! Terminal palettes for the two display modes.

use ratatui::style::{Color, Style};

use crate::item::DisplayMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Palette {
    pub(super) background: Color,
    pub(super) text_primary: Color,
    pub(super) text_muted: Color,
    pub(super) accent: Color,
    pub(super) border: Color,
    pub(super) danger: Color,
    pub(super) editing: Color,
}

impl Palette {
    pub(super) fn for_mode(mode: DisplayMode) -> Self {
        match mode {
            DisplayMode::Dark => Self {
                background: Color::Rgb(18, 18, 22),
                text_primary: Color::Rgb(220, 224, 220),
                text_muted: Color::Rgb(120, 128, 120),
                accent: Color::Rgb(92, 204, 92),
                border: Color::Rgb(60, 150, 60),
                danger: Color::Rgb(224, 82, 82),
                editing: Color::Rgb(224, 190, 62),
            },
            DisplayMode::Light => Self {
                background: Color::Rgb(250, 250, 247),
                text_primary: Color::Rgb(28, 28, 32),
                text_muted: Color::Rgb(110, 110, 118),
                accent: Color::Rgb(30, 120, 200),
                border: Color::Rgb(170, 170, 180),
                danger: Color::Rgb(190, 40, 40),
                editing: Color::Rgb(170, 110, 0),
            },
        }
    }

    pub(super) fn base(&self) -> Style {
        Style::default().fg(self.text_primary).bg(self.background)
    }
}
