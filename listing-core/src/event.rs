//! Terminal events and the background poller that produces them

use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Raw event from crossterm before processing
#[derive(Debug)]
pub enum RawEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// The event payload handed to components
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Keyboard event
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Scroll event with position and delta
    Scroll { column: u16, row: u16, delta: isize },
    /// Terminal resize
    Resize(u16, u16),
}

impl EventKind {
    /// Ctrl+C is treated as a quit request regardless of focus
    pub fn is_interrupt(&self) -> bool {
        match self {
            EventKind::Key(key) => {
                key.modifiers.contains(KeyModifiers::CONTROL)
                    && matches!(key.code, event::KeyCode::Char('c'))
            }
            _ => false,
        }
    }
}

/// Spawn the event polling task with cancellation support
///
/// Polls crossterm for events and forwards them through `tx` until
/// `cancel_token` is cancelled or the receiver goes away.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    poll_timeout: Duration,
    loop_sleep: Duration,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("Event poller cancelled, draining buffer");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(loop_sleep) => {
                    let mut events_processed = 0;
                    while events_processed < MAX_EVENTS_PER_BATCH
                        && event::poll(poll_timeout).unwrap_or(false)
                    {
                        events_processed += 1;
                        let raw = match event::read() {
                            Ok(event::Event::Key(key)) => RawEvent::Key(key),
                            Ok(event::Event::Mouse(mouse)) => RawEvent::Mouse(mouse),
                            Ok(event::Event::Resize(w, h)) => RawEvent::Resize(w, h),
                            _ => continue,
                        };
                        if tx.send(raw).is_err() {
                            debug!("Event channel closed, stopping poller");
                            return;
                        }
                    }
                }
            }
        }
    })
}

/// Process a raw event into an EventKind
pub fn process_raw_event(raw: RawEvent) -> EventKind {
    match raw {
        RawEvent::Key(key) => EventKind::Key(key),
        RawEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: 1,
            },
            MouseEventKind::ScrollUp => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: -1,
            },
            _ => EventKind::Mouse(mouse),
        },
        RawEvent::Resize(w, h) => EventKind::Resize(w, h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventKind, KeyEventState};

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    #[test]
    fn test_process_raw_event_key() {
        let kind = process_raw_event(RawEvent::Key(press(KeyCode::Char('a'), KeyModifiers::NONE)));
        assert!(matches!(kind, EventKind::Key(_)));
    }

    #[test]
    fn test_process_raw_event_scroll() {
        let scroll_up = MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        };

        match process_raw_event(RawEvent::Mouse(scroll_up)) {
            EventKind::Scroll { column, row, delta } => {
                assert_eq!((column, row, delta), (3, 4, -1));
            }
            other => panic!("Expected Scroll event, got {:?}", other),
        }
    }

    #[test]
    fn test_process_raw_event_resize() {
        let kind = process_raw_event(RawEvent::Resize(80, 24));
        assert!(matches!(kind, EventKind::Resize(80, 24)));
    }

    #[test]
    fn test_interrupt_detection() {
        let ctrl_c = EventKind::Key(press(KeyCode::Char('c'), KeyModifiers::CONTROL));
        let plain_c = EventKind::Key(press(KeyCode::Char('c'), KeyModifiers::NONE));
        assert!(ctrl_c.is_interrupt());
        assert!(!plain_c.is_interrupt());
        assert!(!EventKind::Resize(1, 1).is_interrupt());
    }
}
