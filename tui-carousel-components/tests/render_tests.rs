//! Render tests using RenderHarness
//!
//! Each test renders a carousel into an in-memory terminal and checks the
//! visible text, the way a user would read the screen.

use tui_carousel_components::{
    CarouselContainer, CarouselContainerProps, Section, SectionCarousel, SectionCarouselProps,
    SectionVariant, Slide, SlideButton,
};
use tui_carousel_core::testing::*;
use tui_carousel_core::{Component, NavigationState, Viewport};

fn slides(n: usize) -> Vec<Slide> {
    (0..n)
        .map(|i| {
            Slide::new(format!("slide-{i}"))
                .with_title(format!("Slide {}", i + 1))
                .with_description("<p>Lorem ipsum</p>")
                .with_button(SlideButton::default())
        })
        .collect()
}

fn render_container(
    container: &mut CarouselContainer,
    slides: &[Slide],
    width: u16,
    height: u16,
) -> String {
    let mut render = RenderHarness::new(width, height);
    render.render_to_string_plain(|frame| {
        let props = CarouselContainerProps {
            slides,
            is_focused: true,
            on_change: |_| (),
        };
        container.render(frame, frame.area(), props);
    })
}

fn visible_titles(output: &str, total: usize) -> Vec<usize> {
    (1..=total)
        .filter(|n| output.contains(&format!("Slide {n}")))
        .collect()
}

#[test]
fn test_desktop_shows_three_slides() {
    let viewport = Viewport::new(1200.0);
    let mut container: CarouselContainer = CarouselContainer::standard(&viewport);
    let slides = slides(6);

    let output = render_container(&mut container, &slides, 150, 14);

    assert_eq!(visible_titles(&output, 6), vec![1, 2, 3]);
    assert!(output.contains("Find out more"), "Should show CTA");

    let nav = container.navigation();
    assert_eq!(nav.selected_index, 0);
    assert!(nav.prev_disabled);
    assert!(!nav.next_disabled);
}

#[test]
fn test_tablet_shows_two_slides() {
    let viewport = Viewport::new(900.0);
    let mut container: CarouselContainer = CarouselContainer::standard(&viewport);
    let slides = slides(6);

    let output = render_container(&mut container, &slides, 112, 14);
    assert_eq!(visible_titles(&output, 6), vec![1, 2]);
}

#[test]
fn test_mobile_shows_one_slide() {
    let viewport = Viewport::new(500.0);
    let mut container: CarouselContainer = CarouselContainer::standard(&viewport);
    let slides = slides(6);

    let output = render_container(&mut container, &slides, 62, 14);
    assert_eq!(visible_titles(&output, 6), vec![1]);
    assert_eq!(output.matches('○').count() + output.matches('●').count(), 6);
}

#[test]
fn test_next_moves_whole_page() {
    let viewport = Viewport::new(1200.0);
    let mut container: CarouselContainer = CarouselContainer::standard(&viewport);
    let slides = slides(6);
    render_container(&mut container, &slides, 150, 14);

    container.next().unwrap();
    let output = render_container(&mut container, &slides, 150, 14);

    assert_eq!(visible_titles(&output, 6), vec![4, 5, 6]);
    assert!(container.navigation().next_disabled);
}

#[test]
fn test_zero_slides_render_nothing() {
    let viewport = Viewport::new(1200.0);
    let mut container: CarouselContainer = CarouselContainer::standard(&viewport);

    let output = render_container(&mut container, &[], 150, 14);

    assert!(output.trim().is_empty(), "Should render nothing");
    assert!(!container.view().is_mounted());
    assert_eq!(container.navigation(), NavigationState::default());
}

#[test]
fn test_resize_rerenders_with_new_config() {
    let viewport = Viewport::new(1200.0);
    let mut container: CarouselContainer = CarouselContainer::standard(&viewport);
    let slides = slides(6);
    render_container(&mut container, &slides, 150, 14);

    viewport.resize_columns(62);
    let output = render_container(&mut container, &slides, 62, 14);

    assert_eq!(visible_titles(&output, 6), vec![1]);
    assert_eq!(container.navigation().snap_count(), 6);
}

#[test]
fn test_custom_section_wraps_around() {
    let viewport = Viewport::new(600.0);
    let section = Section {
        variant: SectionVariant::Custom,
        title: Some("Featured".into()),
        copy: None,
        slides: slides(3),
    };
    let mut carousel = SectionCarousel::for_section(&section, &viewport);
    let mut render = RenderHarness::new(75, 16);

    let mut draw = |carousel: &mut SectionCarousel| {
        render.render_to_string_plain(|frame| {
            let props = SectionCarouselProps {
                section: &section,
                is_focused: true,
                on_change: |_| (),
            };
            carousel.render(frame, frame.area(), props);
        })
    };

    let output = draw(&mut carousel);
    assert!(output.contains("Featured"));
    assert_eq!(visible_titles(&output, 3), vec![1]);
    assert!(!carousel.lifted_navigation().prev_disabled);

    carousel.container_mut().prev().unwrap();
    let output = draw(&mut carousel);
    assert_eq!(visible_titles(&output, 3), vec![3]);
    assert_eq!(carousel.lifted_navigation().selected_index, 2);
}

#[test]
fn test_sections_share_viewport() {
    let viewport = Viewport::new(1200.0);
    let default = SectionCarousel::new(SectionVariant::Default, &viewport);
    let custom = SectionCarousel::new(SectionVariant::Custom, &viewport);
    assert_eq!(viewport.listener_count(), 2);

    viewport.resize(700.0);
    assert!(!default.container().config().fade);
    assert!(custom.container().config().fade);
    assert!(custom.container().config().looping);

    drop(default);
    drop(custom);
    assert_eq!(viewport.listener_count(), 0);
}

#[test]
fn test_section_copy_wraps_on_word_breaks() {
    let viewport = Viewport::new(1200.0);
    let content = Section {
        variant: SectionVariant::Default,
        title: None,
        copy: Some("ab cd ef ZZ".into()),
        slides: Vec::new(),
    };
    let mut section = SectionCarousel::for_section(&content, &viewport);

    let mut render = RenderHarness::new(4, 6);
    let output = render.render_to_string_plain(|frame| {
        let props = SectionCarouselProps {
            section: &content,
            is_focused: false,
            on_change: |_| (),
        };
        section.render(frame, frame.area(), props);
    });

    // The last word lands on a fourth row
    assert!(output.contains("ZZ"), "copy cut short:\n{output}");
}
