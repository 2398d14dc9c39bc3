//! Terminal event polling
//!
//! A background task reads crossterm events and forwards the ones carousels
//! react to over a channel to the main loop: key presses, mouse button
//! presses and resizes. Everything else (key releases, mouse motion, focus
//! and paste events) is dropped at the source so it never triggers a redraw.
//!
//! Within one polling batch only the last resize is forwarded; each resize
//! reconfigures every mounted carousel, and intermediate widths are never
//! rendered anyway.

use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind, MouseEventKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use crate::event::EventKind;

/// Event forwarded by the poller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize(u16, u16),
}

/// Polling cadence for [`spawn_event_poller`].
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Timeout passed to each `crossterm::event::poll` call.
    pub poll_timeout: Duration,
    /// Sleep between poll cycles.
    pub loop_sleep: Duration,
    /// Upper bound on events read per cycle.
    pub max_batch: usize,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
            max_batch: 20,
        }
    }
}

/// Keep the crossterm events a carousel app acts on.
pub fn translate(event: Event) -> Option<RawEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => Some(RawEvent::Key(key)),
        Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
            Some(RawEvent::Mouse(mouse))
        }
        Event::Resize(w, h) => Some(RawEvent::Resize(w, h)),
        _ => None,
    }
}

/// Append `raw` to a batch, replacing a resize already waiting in it.
pub fn push_coalesced(batch: &mut Vec<RawEvent>, raw: RawEvent) {
    if matches!(raw, RawEvent::Resize(..)) {
        if let Some(pending) = batch
            .iter_mut()
            .find(|queued| matches!(queued, RawEvent::Resize(..)))
        {
            trace!(?raw, "coalescing resize");
            *pending = raw;
            return;
        }
    }
    batch.push(raw);
}

/// Spawn the event polling task with cancellation support
///
/// Must be called from within a tokio runtime. The task stops when the token
/// is cancelled or the receiving side of `tx` is dropped.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    config: PollerConfig,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut batch = Vec::with_capacity(config.max_batch);
        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("event poller cancelled");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(config.loop_sleep) => {
                    let mut read = 0;
                    while read < config.max_batch
                        && event::poll(config.poll_timeout).unwrap_or(false)
                    {
                        read += 1;
                        if let Some(raw) = event::read().ok().and_then(translate) {
                            push_coalesced(&mut batch, raw);
                        }
                    }
                    for raw in batch.drain(..) {
                        if tx.send(raw).is_err() {
                            debug!("event channel closed, stopping poller");
                            return;
                        }
                    }
                }
            }
        }
    })
}

/// Turn a forwarded event into the [`EventKind`] components receive.
pub fn process_raw_event(raw: RawEvent) -> EventKind {
    match raw {
        RawEvent::Key(key) => EventKind::Key(key),
        RawEvent::Mouse(mouse) => EventKind::Mouse(mouse),
        RawEvent::Resize(w, h) => EventKind::Resize(w, h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent};

    fn key_event(kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind(
            KeyCode::Right,
            KeyModifiers::NONE,
            kind,
        ))
    }

    fn mouse_event(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 10,
            row: 20,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_translate_drops_key_release() {
        assert!(matches!(
            translate(key_event(KeyEventKind::Press)),
            Some(RawEvent::Key(k)) if k.code == KeyCode::Right
        ));
        assert!(translate(key_event(KeyEventKind::Repeat)).is_some());
        assert_eq!(translate(key_event(KeyEventKind::Release)), None);
    }

    #[test]
    fn test_translate_keeps_only_button_presses() {
        let down = translate(mouse_event(MouseEventKind::Down(MouseButton::Left)));
        let kind = process_raw_event(down.unwrap());
        assert_eq!(kind.click_position(), Some((10, 20)));

        assert_eq!(translate(mouse_event(MouseEventKind::Moved)), None);
        assert_eq!(
            translate(mouse_event(MouseEventKind::Up(MouseButton::Left))),
            None
        );
        assert_eq!(translate(Event::FocusGained), None);
    }

    #[test]
    fn test_resizes_coalesce_in_place() {
        let mut batch = Vec::new();
        push_coalesced(&mut batch, RawEvent::Resize(100, 30));
        push_coalesced(&mut batch, translate(key_event(KeyEventKind::Press)).unwrap());
        push_coalesced(&mut batch, RawEvent::Resize(160, 40));
        push_coalesced(&mut batch, RawEvent::Resize(90, 30));

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], RawEvent::Resize(90, 30));
        assert!(matches!(batch[1], RawEvent::Key(_)));
    }

    #[test]
    fn test_process_raw_event_resize() {
        let kind = process_raw_event(RawEvent::Resize(160, 40));
        assert!(matches!(kind, EventKind::Resize(160, 40)));
    }
}
