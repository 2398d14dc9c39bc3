//! Arrow and dot controls plus click hit-testing

use bitflags::bitflags;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Paragraph, Widget},
};
use tui_carousel_core::NavigationState;

bitflags! {
    /// Which built-in controls a carousel draws.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Controls: u8 {
        const ARROWS = 1 << 0;
        const DOTS = 1 << 1;
    }
}

/// Visual treatment of arrow and dot buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlStyle {
    /// Solid arrow buttons and round dots
    #[default]
    Filled,
    /// Outlined arrow buttons and full-width "Page N" dots
    Ring,
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlHit {
    Prev,
    Next,
    Dot(usize),
}

/// Screen rectangles of the controls drawn in the last frame.
#[derive(Debug, Clone, Default)]
pub struct HitAreas {
    areas: Vec<(Rect, ControlHit)>,
}

impl HitAreas {
    pub fn clear(&mut self) {
        self.areas.clear();
    }

    pub fn push(&mut self, area: Rect, hit: ControlHit) {
        self.areas.push((area, hit));
    }

    /// Control under a terminal cell, if any.
    pub fn hit(&self, column: u16, row: u16) -> Option<ControlHit> {
        self.areas
            .iter()
            .find(|(area, _)| {
                column >= area.x
                    && column < area.x.saturating_add(area.width)
                    && row >= area.y
                    && row < area.y.saturating_add(area.height)
            })
            .map(|(_, hit)| *hit)
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

const ARROW_WIDTH: u16 = 5;

fn arrow_style(style: ControlStyle, disabled: bool) -> Style {
    match (style, disabled) {
        (_, true) => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM),
        (ControlStyle::Filled, false) => Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD),
        (ControlStyle::Ring, false) => Style::default().fg(Color::Blue),
    }
}

fn arrow_label(style: ControlStyle, hit: ControlHit) -> &'static str {
    match (style, hit) {
        (ControlStyle::Filled, ControlHit::Prev) => "[ ← ]",
        (ControlStyle::Filled, _) => "[ → ]",
        (ControlStyle::Ring, ControlHit::Prev) => "( ← )",
        (ControlStyle::Ring, _) => "( → )",
    }
}

/// Width the arrow pair needs.
pub fn arrows_width() -> u16 {
    ARROW_WIDTH * 2 + 1
}

/// Draw prev/next buttons from the left edge of `area` and record their hit areas.
pub fn render_arrows(
    buf: &mut Buffer,
    area: Rect,
    nav: &NavigationState,
    style: ControlStyle,
    hits: &mut HitAreas,
) {
    if area.height == 0 {
        return;
    }
    let buttons = [
        (ControlHit::Prev, nav.prev_disabled),
        (ControlHit::Next, nav.next_disabled),
    ];
    let mut x = area.x;
    for (hit, disabled) in buttons {
        let right = area.x.saturating_add(area.width);
        if x.saturating_add(ARROW_WIDTH) > right {
            break;
        }
        let button = Rect::new(x, area.y, ARROW_WIDTH, 1);
        buf.set_string(x, area.y, arrow_label(style, hit), arrow_style(style, disabled));
        if !disabled {
            hits.push(button, hit);
        }
        x = x.saturating_add(ARROW_WIDTH + 1);
    }
}

/// Width a filled dot row needs for `count` snaps.
pub fn dots_width(count: usize) -> u16 {
    u16::try_from(count.saturating_mul(2).saturating_sub(1)).unwrap_or(u16::MAX)
}

/// Whether arrows and `count` filled dots fit side by side in `width` columns.
pub fn fits_one_row(width: u16, count: usize) -> bool {
    arrows_width()
        .saturating_add(1)
        .saturating_add(dots_width(count))
        <= width
}

/// Draw one dot per snap, right-aligned in `area`.
///
/// Filled dots are single glyphs; ring dots split the whole width into
/// "Page N" segments.
pub fn render_dots(
    buf: &mut Buffer,
    area: Rect,
    nav: &NavigationState,
    style: ControlStyle,
    hits: &mut HitAreas,
) {
    let count = nav.snap_count();
    if count == 0 || area.height == 0 || area.width == 0 {
        return;
    }
    match style {
        ControlStyle::Filled => {
            let width = dots_width(count).min(area.width);
            let mut x = area.x + area.width - width;
            for index in 0..count {
                if x >= area.x + area.width {
                    break;
                }
                let (glyph, style) = if nav.is_selected(index) {
                    ("●", Style::default().fg(Color::Blue))
                } else {
                    ("○", Style::default().fg(Color::Blue))
                };
                buf.set_string(x, area.y, glyph, style);
                hits.push(Rect::new(x, area.y, 1, 1), ControlHit::Dot(index));
                x = x.saturating_add(2);
            }
        }
        ControlStyle::Ring => {
            let gap: u16 = 1;
            let count_u16 = u16::try_from(count).unwrap_or(u16::MAX);
            let gaps = gap.saturating_mul(count_u16 - 1);
            let segment = area.width.saturating_sub(gaps) / count_u16;
            if segment == 0 {
                return;
            }
            for index in 0..count {
                let offset = u16::try_from(index).unwrap_or(u16::MAX) * (segment + gap);
                let rect = Rect::new(area.x + offset, area.y, segment, 1);
                let style = if nav.is_selected(index) {
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::Blue)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Blue)
                };
                Paragraph::new(format!("Page {}", index + 1))
                    .alignment(Alignment::Center)
                    .style(style)
                    .render(rect, buf);
                hits.push(rect, ControlHit::Dot(index));
            }
        }
    }
}
