//! Page section: heading, copy and a carousel of slides

use std::cell::RefCell;
use std::rc::Rc;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};
use serde::{Deserialize, Serialize};
use tui_carousel_core::{
    Component, EventKind, NavigationState, ResponsivePolicy, Viewport, TABLET_MIN_PX,
};

use crate::carousel_view::digit_index;
use crate::container::{CarouselContainer, CarouselContainerProps, ControlsMode};
use crate::controls::{
    arrows_width, render_arrows, render_dots, ControlHit, ControlStyle, HitAreas,
};
use crate::slide::Slide;
use crate::text::{copy_paragraph, strip_html, wrapped_height};

/// Which carousel a section uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionVariant {
    /// Standard policy, built-in arrows and dots
    #[default]
    Default,
    /// Custom policy, ring arrows and "Page N" dots drawn by the section
    Custom,
}

impl SectionVariant {
    pub fn policy(self) -> ResponsivePolicy {
        match self {
            SectionVariant::Default => ResponsivePolicy::standard(),
            SectionVariant::Custom => ResponsivePolicy::custom(),
        }
    }
}

/// Content of one section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, alias = "component")]
    pub variant: SectionVariant,
    #[serde(default)]
    pub title: Option<String>,
    /// HTML fragment
    #[serde(default)]
    pub copy: Option<String>,
    #[serde(default)]
    pub slides: Vec<Slide>,
}

/// Props for [`SectionCarousel`]
pub struct SectionCarouselProps<'a, A> {
    pub section: &'a Section,
    pub is_focused: bool,
    pub on_change: fn(NavigationState) -> A,
}

/// Title, copy and carousel for one [`Section`].
///
/// The variant is fixed at construction. A custom section lifts the carousel
/// controls and draws them itself; its page dots are only shown above the
/// tablet breakpoint.
pub struct SectionCarousel {
    variant: SectionVariant,
    container: CarouselContainer,
    lifted: Rc<RefCell<NavigationState>>,
    viewport: Viewport,
    hits: HitAreas,
}

impl std::fmt::Debug for SectionCarousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionCarousel")
            .field("variant", &self.variant)
            .field("container", &self.container)
            .finish()
    }
}

impl SectionCarousel {
    pub fn new(variant: SectionVariant, viewport: &Viewport) -> Self {
        Self::with_policy(variant, variant.policy(), viewport)
    }

    /// Use a policy other than the variant's own (e.g. one loaded from disk).
    pub fn with_policy(
        variant: SectionVariant,
        policy: ResponsivePolicy,
        viewport: &Viewport,
    ) -> Self {
        let lifted = Rc::new(RefCell::new(NavigationState::default()));
        let mode = match variant {
            SectionVariant::Default => ControlsMode::BuiltIn,
            SectionVariant::Custom => {
                let mirror = Rc::clone(&lifted);
                ControlsMode::lifted(move |nav| *mirror.borrow_mut() = nav.clone())
            }
        };
        Self {
            variant,
            container: CarouselContainer::new(policy, mode, viewport),
            lifted,
            viewport: viewport.clone(),
            hits: HitAreas::default(),
        }
    }

    /// Section for `section.variant`.
    pub fn for_section(section: &Section, viewport: &Viewport) -> Self {
        Self::new(section.variant, viewport)
    }

    pub fn variant(&self) -> SectionVariant {
        self.variant
    }

    pub fn container(&self) -> &CarouselContainer {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut CarouselContainer {
        &mut self.container
    }

    /// State last handed to the lifted controls (custom variant only).
    pub fn lifted_navigation(&self) -> NavigationState {
        self.lifted.borrow().clone()
    }

    fn page_dots_visible(&self) -> bool {
        self.viewport.width_px() > TABLET_MIN_PX
    }

    /// Clicks on the ring controls and digit keys for the page dots.
    fn handle_lifted_controls(
        &mut self,
        event: &EventKind,
        is_focused: bool,
    ) -> Option<NavigationState> {
        match event {
            EventKind::Key(_) if is_focused && self.page_dots_visible() => {
                let index = digit_index(event.pressed_key()?.code)?;
                self.container.track_change(|view| view.goto_index(index))
            }
            EventKind::Mouse(_) => {
                let (column, row) = event.click_position()?;
                let hit = self.hits.hit(column, row)?;
                self.container.track_change(|view| match hit {
                    ControlHit::Prev => view.prev(),
                    ControlHit::Next => view.next(),
                    ControlHit::Dot(index) => view.goto_index(index),
                })
            }
            _ => None,
        }
    }
}

impl<A> Component<A> for SectionCarousel {
    type Props<'a> = SectionCarouselProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if self.variant == SectionVariant::Custom {
            if let Err(err) = self.container.sync(props.section.slides.len()) {
                tracing::warn!(%err, "section carousel sync failed");
                return None;
            }
            if let Some(nav) = self.handle_lifted_controls(event, props.is_focused) {
                return Some((props.on_change)(nav));
            }
        }

        self.container
            .handle_event(
                event,
                CarouselContainerProps {
                    slides: &props.section.slides,
                    is_focused: props.is_focused,
                    on_change: props.on_change,
                },
            )
            .into_iter()
            .next()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.hits.clear();
        let section = props.section;
        let copy = section.copy.as_deref().map(strip_html);
        let has_slides = !section.slides.is_empty();
        let has_text = section.title.is_some() || copy.is_some();

        let title_rows = u16::from(section.title.is_some());
        let copy_rows = copy
            .as_deref()
            .map(|c| wrapped_height(c, area.width))
            .unwrap_or(0);
        let gap_rows = u16::from(has_text && has_slides);
        let lifted = self.variant == SectionVariant::Custom && has_slides;
        let control_rows = u16::from(lifted);
        let dot_rows = u16::from(lifted && self.page_dots_visible());

        let [title_area, copy_area, _, carousel_area, _, arrows_area, dots_area] =
            Layout::vertical([
                Constraint::Length(title_rows),
                Constraint::Length(copy_rows),
                Constraint::Length(gap_rows),
                Constraint::Min(0),
                Constraint::Length(control_rows),
                Constraint::Length(control_rows),
                Constraint::Length(dot_rows),
            ])
            .areas(area);

        if let Some(title) = &section.title {
            frame.render_widget(
                Paragraph::new(Line::from(title.as_str()))
                    .alignment(Alignment::Center)
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                title_area,
            );
        }
        if let Some(copy) = &copy {
            frame.render_widget(copy_paragraph(copy), copy_area);
        }

        // Always rendered so an emptied section releases its engine
        self.container.render(
            frame,
            carousel_area,
            CarouselContainerProps {
                slides: &section.slides,
                is_focused: props.is_focused,
                on_change: props.on_change,
            },
        );

        if lifted && self.container.view().is_mounted() {
            let nav = self.lifted_navigation();
            let width = arrows_width().min(arrows_area.width);
            let centered = Rect {
                x: arrows_area.x + (arrows_area.width - width) / 2,
                width,
                ..arrows_area
            };
            let buf = frame.buffer_mut();
            render_arrows(buf, centered, &nav, ControlStyle::Ring, &mut self.hits);
            render_dots(buf, dots_area, &nav, ControlStyle::Ring, &mut self.hits);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
    use tui_carousel_core::testing::{char_key, click, key, RenderHarness};
    use tui_carousel_core::{assert_emitted, assert_not_emitted, count_emitted};

    fn section(variant: SectionVariant, n: usize) -> Section {
        Section {
            variant,
            title: Some("Our work".into()),
            copy: Some("<p>Recent <em>projects</em></p>".into()),
            slides: (0..n)
                .map(|i| Slide::new(format!("s{i}")).with_title(format!("Slide {}", i + 1)))
                .collect(),
        }
    }

    fn draw(carousel: &mut SectionCarousel, section: &Section, width: u16, height: u16) -> String {
        let mut render = RenderHarness::new(width, height);
        render.render_to_string_plain(|frame| {
            let props = SectionCarouselProps {
                section,
                is_focused: true,
                on_change: |_| (),
            };
            carousel.render(frame, frame.area(), props);
        })
    }

    fn send(
        carousel: &mut SectionCarousel,
        section: &Section,
        event: EventKind,
    ) -> Vec<NavigationState> {
        carousel
            .handle_event(
                &event,
                SectionCarouselProps {
                    section,
                    is_focused: true,
                    on_change: |nav| nav,
                },
            )
            .into_iter()
            .collect()
    }

    #[test]
    fn test_variant_from_json() {
        let parsed: Section =
            serde_json::from_str(r#"{ "component": "custom", "slides": [] }"#).unwrap();
        assert_eq!(parsed.variant, SectionVariant::Custom);

        let parsed: Section = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.variant, SectionVariant::Default);
        assert!(parsed.slides.is_empty());
    }

    #[test]
    fn test_text_only_without_slides() {
        let viewport = Viewport::new(1200.0);
        let content = section(SectionVariant::Custom, 0);
        let mut carousel = SectionCarousel::for_section(&content, &viewport);

        let output = draw(&mut carousel, &content, 60, 12);
        assert!(output.contains("Our work"));
        assert!(output.contains("Recent projects"));
        assert!(!output.contains("Page 1"));
        assert!(!carousel.container().view().is_mounted());
    }

    #[test]
    fn test_custom_draws_lifted_controls() {
        let viewport = Viewport::new(1200.0);
        let content = section(SectionVariant::Custom, 6);
        let mut carousel = SectionCarousel::for_section(&content, &viewport);

        let output = draw(&mut carousel, &content, 150, 16);
        assert!(output.contains("( ← )"));
        assert!(output.contains("( → )"));
        assert!(output.contains("Page 1"));
        assert!(output.contains("Page 2"));
        assert!(!output.contains("[ → ]"));
        assert_eq!(carousel.lifted_navigation().snap_count(), 2);
    }

    #[test]
    fn test_custom_hides_pages_on_mobile() {
        let viewport = Viewport::new(600.0);
        let content = section(SectionVariant::Custom, 3);
        let mut carousel = SectionCarousel::for_section(&content, &viewport);

        let output = draw(&mut carousel, &content, 75, 16);
        assert!(output.contains("( → )"));
        assert!(!output.contains("Page 1"));
        let changed = send(&mut carousel, &content, char_key('2'));
        assert_not_emitted!(changed, _);
    }

    #[test]
    fn test_custom_click_and_digit() {
        let viewport = Viewport::new(1200.0);
        let content = section(SectionVariant::Custom, 6);
        let mut carousel = SectionCarousel::for_section(&content, &viewport);
        draw(&mut carousel, &content, 150, 16);

        let changed = send(&mut carousel, &content, char_key('2'));
        assert_eq!(count_emitted!(changed, _), 1);
        assert_eq!(carousel.lifted_navigation().selected_index, 1);

        // Page 1 is the left half of the bottom row
        let changed = send(&mut carousel, &content, click(3, 15));
        assert_emitted!(changed, nav if nav.selected_index == 0);
        assert_eq!(carousel.lifted_navigation().selected_index, 0);
    }

    #[test]
    fn test_custom_ignores_key_release() {
        let viewport = Viewport::new(1200.0);
        let content = section(SectionVariant::Custom, 6);
        let mut carousel = SectionCarousel::for_section(&content, &viewport);
        draw(&mut carousel, &content, 150, 16);
        let release = |code| {
            EventKind::Key(KeyEvent::new_with_kind(
                code,
                KeyModifiers::NONE,
                KeyEventKind::Release,
            ))
        };

        let changed = send(&mut carousel, &content, release(KeyCode::Char('2')));
        assert_not_emitted!(changed, _);
        let changed = send(&mut carousel, &content, release(KeyCode::Right));
        assert_not_emitted!(changed, _);
        assert_eq!(carousel.lifted_navigation().selected_index, 0);

        let changed = send(&mut carousel, &content, key("right"));
        assert_emitted!(changed, nav if nav.selected_index == 1);
    }

    #[test]
    fn test_default_variant_uses_built_in_controls() {
        let viewport = Viewport::new(500.0);
        let content = section(SectionVariant::Default, 3);
        let mut carousel = SectionCarousel::for_section(&content, &viewport);

        let output = draw(&mut carousel, &content, 60, 14);
        assert!(output.contains("[ → ]"));
        assert!(!output.contains("( → )"));

        let changed = send(&mut carousel, &content, key("right"));
        assert_emitted!(changed, nav if nav.selected_index == 1);
        assert_eq!(carousel.lifted_navigation(), NavigationState::default());
    }
}
