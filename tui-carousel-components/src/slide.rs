//! Slide content and the card widget that draws one slide

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};
use serde::{Deserialize, Serialize};

use crate::text::strip_html;

/// Label of every slide's call-to-action button.
pub const CTA_LABEL: &str = "Find out more";

/// Where a slide link opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LinkTarget {
    #[default]
    #[serde(rename = "_self")]
    SameFrame,
    #[serde(rename = "_blank")]
    Blank,
}

/// Call-to-action attached to a slide.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideButton {
    #[serde(default)]
    pub link_text: Option<String>,
    #[serde(default, rename = "linkURL", alias = "linkUrl")]
    pub link_url: Option<String>,
    #[serde(default)]
    pub target: LinkTarget,
}

/// One slide. Opaque to the carousel machinery; only [`SlideCard`] reads it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Slide {
    #[serde(alias = "_key")]
    pub key: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// HTML fragment
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub button: Option<SlideButton>,
}

impl Slide {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_button(mut self, button: SlideButton) -> Self {
        self.button = Some(button);
        self
    }

    /// Whether there is anything to show below the image.
    pub fn has_info(&self) -> bool {
        self.title.is_some() || self.description.is_some() || self.button.is_some()
    }
}

/// Draws a slide as a rounded card: image placeholder, title, description and
/// a "Find out more" button pinned to the bottom.
#[derive(Debug, Clone, Copy)]
pub struct SlideCard<'a> {
    slide: &'a Slide,
    highlighted: bool,
}

impl<'a> SlideCard<'a> {
    pub fn new(slide: &'a Slide) -> Self {
        Self {
            slide,
            highlighted: false,
        }
    }

    /// Use the accent border (first slide of the selected snap).
    pub fn highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }
}

impl Widget for SlideCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.highlighted {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let button_rows = if self.slide.button.is_some() { 1 } else { 0 };
        let [body, button] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(button_rows)]).areas(inner);

        let mut lines = Vec::new();
        if let Some(image) = &self.slide.image {
            lines.push(Line::from(Span::styled(
                format!("▨ {image}"),
                Style::default().fg(Color::DarkGray),
            )));
            if self.slide.has_info() {
                lines.push(Line::default());
            }
        }
        if let Some(title) = &self.slide.title {
            lines.push(Line::from(Span::styled(
                title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
        if let Some(description) = &self.slide.description {
            lines.extend(strip_html(description).lines().map(|l| Line::raw(l.to_string())));
        }
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(body, buf);

        if let Some(cta) = &self.slide.button {
            let label = match cta.target {
                LinkTarget::Blank => format!("[ {CTA_LABEL} ↗ ]"),
                LinkTarget::SameFrame => format!("[ {CTA_LABEL} ]"),
            };
            Paragraph::new(Line::from(label))
                .alignment(Alignment::Center)
                .style(
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::Blue)
                        .add_modifier(Modifier::BOLD),
                )
                .render(button, buf);
        }
    }
}
