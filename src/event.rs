use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEvent};
use futures::StreamExt;
use tokio::sync::mpsc;

#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Redraw from the latest shared state.
    Tick,
    Resize,
}

/// Terminal input plus a redraw tick, merged into one channel.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(redraw_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();

        let task = tokio::spawn(async move {
            let mut reader = event::EventStream::new();
            let mut redraw = tokio::time::interval(redraw_rate);
            redraw.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    maybe_event = reader.next() => {
                        match maybe_event {
                            Some(Ok(evt)) => {
                                if let Some(e) = map_event(evt)
                                    && tx.send(e).is_err()
                                {
                                    break;
                                }
                            }
                            Some(Err(err)) => {
                                tracing::warn!(error = %err, "terminal event stream failed");
                                break;
                            }
                            None => break,
                        }
                    }
                    _ = redraw.tick() => {
                        if tx.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self { rx, task }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn map_event(evt: CrosstermEvent) -> Option<Event> {
    match evt {
        CrosstermEvent::Key(key) => Some(Event::Key(key)),
        CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
        CrosstermEvent::Resize(_, _) => Some(Event::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn terminal_events_are_mapped() {
        let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        assert!(matches!(
            map_event(CrosstermEvent::Key(key)),
            Some(Event::Key(k)) if k.code == KeyCode::Char('s')
        ));
        assert!(matches!(
            map_event(CrosstermEvent::Resize(80, 24)),
            Some(Event::Resize)
        ));
        assert!(map_event(CrosstermEvent::FocusGained).is_none());
    }
}
