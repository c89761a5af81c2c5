#![forbid(unsafe_code)]

//! Palette and named styles for the predictor form.

use ftui_render::cell::PackedRgba;
use ftui_style::{Style, StyleFlags};

pub mod fg {
    use super::*;

    pub const PRIMARY: PackedRgba = PackedRgba::rgb(220, 220, 240);
    pub const SECONDARY: PackedRgba = PackedRgba::rgb(180, 180, 210);
    pub const MUTED: PackedRgba = PackedRgba::rgb(120, 120, 150);
}

pub mod bg {
    use super::*;

    pub const SURFACE: PackedRgba = PackedRgba::rgb(35, 35, 60);
    pub const HIGHLIGHT: PackedRgba = PackedRgba::rgb(55, 55, 90);
}

pub mod accent {
    use super::*;

    pub const CHARGE: PackedRgba = PackedRgba::rgb(255, 210, 80);
    pub const SUCCESS: PackedRgba = PackedRgba::rgb(80, 220, 140);
    pub const ERROR: PackedRgba = PackedRgba::rgb(255, 100, 100);
    pub const INFO: PackedRgba = PackedRgba::rgb(100, 200, 255);
}

pub fn title() -> Style {
    Style::new().fg(accent::CHARGE).attrs(StyleFlags::BOLD)
}

pub fn subtitle() -> Style {
    Style::new().fg(fg::SECONDARY).attrs(StyleFlags::ITALIC)
}

pub fn body() -> Style {
    Style::new().fg(fg::PRIMARY)
}

pub fn muted() -> Style {
    Style::new().fg(fg::MUTED)
}

/// Row of the control that has focus.
pub fn focused_row() -> Style {
    Style::new()
        .bg(bg::HIGHLIGHT)
        .fg(fg::PRIMARY)
        .attrs(StyleFlags::BOLD)
}

pub fn result() -> Style {
    Style::new().fg(accent::SUCCESS).attrs(StyleFlags::BOLD)
}

pub fn insight() -> Style {
    Style::new().fg(accent::INFO)
}

pub fn error() -> Style {
    Style::new().fg(accent::ERROR).attrs(StyleFlags::BOLD)
}

pub fn panel_border() -> Style {
    Style::new().fg(PackedRgba::rgb(60, 60, 100))
}

pub fn status_bar() -> Style {
    Style::new().bg(bg::SURFACE).fg(fg::MUTED)
}
