//! Showcase - carousel sections in the terminal
//!
//! Renders a page of carousel sections, one bordered block per section. The
//! viewport width follows the terminal (8px per column) unless `--width-px`
//! pins it, so resizing the terminal walks through the breakpoints.
//!
//! Keys: Tab/Shift-Tab = focus section, Left/Right or h/l = page,
//! 1-9 = jump to page, click = focus and press, q/Esc = quit

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use carousel_showcase::page::DemoPage;
use carousel_showcase::state::{reducer, AppAction, AppState};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tui_carousel::{
    process_raw_event, spawn_event_poller, Component, EventKind, LoggingMiddleware,
    NavigationState, PollerConfig, RawEvent, SectionCarousel, SectionCarouselProps,
    StoreWithMiddleware, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "showcase")]
#[command(about = "Responsive carousel sections in the terminal")]
struct Args {
    /// Page description (JSON); the built-in page is shown when omitted
    #[arg(long)]
    page: Option<PathBuf>,

    /// Pin the viewport width in px instead of following the terminal
    #[arg(long)]
    width_px: Option<f32>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let page = match &args.page {
        Some(path) => match DemoPage::load(path) {
            Ok(page) => page,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => DemoPage::builtin(),
    };
    tracing::info!(
        sections = page.sections.len(),
        width_px = ?args.width_px,
        "showcase starting"
    );

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, page, args.width_px).await;

    // Cleanup
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "showcase exited with error");
    }
    result
}

/// One carousel per page section, plus where each was last drawn.
struct Sections {
    carousels: Vec<SectionCarousel>,
    areas: Vec<Rect>,
}

impl Sections {
    fn new(page: &DemoPage, viewport: &Viewport) -> Self {
        let carousels: Vec<_> = page
            .sections
            .iter()
            .map(|section| {
                SectionCarousel::with_policy(
                    section.variant,
                    page.policy_for(section.variant),
                    viewport,
                )
            })
            .collect();
        let areas = vec![Rect::default(); carousels.len()];
        Self { carousels, areas }
    }

    fn at(&self, column: u16, row: u16) -> Option<usize> {
        self.areas
            .iter()
            .position(|area| area.contains(Position::new(column, row)))
    }

    /// Forward an event to one section; its navigation change comes back tagged.
    fn handle_event(
        &mut self,
        index: usize,
        event: &EventKind,
        page: &DemoPage,
    ) -> Option<AppAction> {
        let carousel = self.carousels.get_mut(index)?;
        let section = page.sections.get(index)?;
        carousel
            .handle_event(
                event,
                SectionCarouselProps {
                    section,
                    is_focused: true,
                    on_change: |nav| nav,
                },
            )
            .into_iter()
            .next()
            .map(|nav: NavigationState| AppAction::CarouselDidChange(index, nav))
    }

    /// Navigation states that differ from what the store last saw.
    ///
    /// Mounting during render does not go through `handle_event`, so the
    /// main loop reconciles after each draw.
    fn changed_since(&self, state: &AppState) -> Vec<AppAction> {
        self.carousels
            .iter()
            .enumerate()
            .filter_map(|(i, carousel)| {
                let nav = carousel.container().navigation();
                (state.navigation.get(i) != Some(&nav))
                    .then_some(AppAction::CarouselDidChange(i, nav))
            })
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, page: &DemoPage, state: &AppState) {
        let area = frame.area();
        let [body, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        let rows = Layout::vertical(vec![Constraint::Fill(1); self.carousels.len()]).split(body);

        for (i, (carousel, section)) in self
            .carousels
            .iter_mut()
            .zip(page.sections.iter())
            .enumerate()
        {
            let focused = i == state.focus;
            let border = if focused { Color::Cyan } else { Color::DarkGray };
            let block = Block::default()
                .title(format!(" {:?} ", section.variant))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border));
            let inner = block.inner(rows[i]);
            frame.render_widget(block, rows[i]);

            self.areas[i] = inner;
            carousel.render(
                frame,
                inner,
                SectionCarouselProps {
                    section,
                    is_focused: focused,
                    on_change: |nav| nav,
                },
            );
        }

        let position = state
            .focused_navigation()
            .filter(|nav| nav.snap_count() > 0)
            .map(|nav| format!("page {}/{}  ", nav.selected_index + 1, nav.snap_count()))
            .unwrap_or_default();
        let help = Paragraph::new(format!(
            "{position}Tab: section  ←/→: page  1-9: jump  q: quit"
        ))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, help_area);
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    page: DemoPage,
    width_px: Option<f32>,
) -> io::Result<()> {
    // Action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppAction>();

    let mut store = StoreWithMiddleware::new(
        AppState::new(page.sections.len()),
        reducer,
        LoggingMiddleware::new(),
    );

    let viewport = match width_px {
        Some(px) => Viewport::new(px),
        None => Viewport::from_columns(terminal.size()?.width),
    };
    let mut sections = Sections::new(&page, &viewport);

    // Event poller
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let cancel_token = CancellationToken::new();
    let _handle = spawn_event_poller(event_tx, PollerConfig::default(), cancel_token.clone());

    let mut should_render = true;

    loop {
        if should_render {
            terminal.draw(|frame| sections.render(frame, &page, store.state()))?;
            should_render = false;
            for action in sections.changed_since(store.state()) {
                let _ = action_tx.send(action);
            }
        }

        tokio::select! {
            Some(raw_event) = event_rx.recv() => {
                let event = process_raw_event(raw_event);
                let focus = store.state().focus;

                let actions: Vec<AppAction> = match &event {
                    EventKind::Key(key) => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => vec![AppAction::Quit],
                        KeyCode::Tab => vec![AppAction::FocusNext],
                        KeyCode::BackTab => vec![AppAction::FocusPrev],
                        _ => sections.handle_event(focus, &event, &page).into_iter().collect(),
                    },
                    EventKind::Mouse(_) => match event
                        .click_position()
                        .and_then(|(column, row)| sections.at(column, row))
                    {
                        Some(index) => std::iter::once(AppAction::FocusSet(index))
                            .chain(sections.handle_event(index, &event, &page))
                            .collect(),
                        None => Vec::new(),
                    },
                    EventKind::Resize(width, height) => {
                        if width_px.is_none() {
                            viewport.resize_columns(*width);
                        }
                        vec![AppAction::UiTerminalResize(*width, *height)]
                    }
                };

                for action in actions {
                    let _ = action_tx.send(action);
                }
            }

            Some(action) = action_rx.recv() => {
                if matches!(action, AppAction::Quit) {
                    break;
                }
                should_render |= store.dispatch(action);
            }
        }
    }

    cancel_token.cancel();
    tracing::info!("showcase stopped");
    Ok(())
}
