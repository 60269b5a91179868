//! Single event queue feeding the application.
//!
//! Terminal input and file watcher notifications are merged into one
//! channel and consumed on the UI thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::Event;

use crate::core::WatchEvent;

/// Input poll interval of the pump thread.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Anything the application reacts to.
#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input (keys, resize).
    Input(Event),
    /// File watcher notification.
    Watch(WatchEvent),
    /// Reading terminal input failed; the pump has stopped.
    InputFailed(String),
}

/// Producer side of the event queue.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: Sender<AppEvent>,
}

impl EventSender {
    /// Queue an event. Returns false once the consumer is gone.
    pub fn send(&self, event: AppEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    /// A `Send + Sync` callback suitable as a watcher sink.
    pub fn watch_sink(&self) -> impl Fn(WatchEvent) + Send + Sync + 'static {
        let tx = self.tx.clone();
        move |event| {
            let _ = tx.send(AppEvent::Watch(event));
        }
    }
}

/// Consumer side of the event queue.
#[derive(Debug)]
pub struct EventBus {
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Create an empty queue.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// New producer handle.
    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.tx.clone(),
        }
    }

    /// Wait for the next event.
    pub fn recv(&self) -> Option<AppEvent> {
        self.rx.recv().ok()
    }

    /// Wait up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<AppEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Take an already queued event without waiting.
    pub fn try_recv(&self) -> Option<AppEvent> {
        self.rx.try_recv().ok()
    }
}

/// Thread forwarding terminal input into the queue. Stopped and joined on drop.
pub struct InputPump {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for InputPump {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputPump")
            .field("stop", &self.stop)
            .field("handle", &self.handle.as_ref().map(|_| "..."))
            .finish()
    }
}

impl InputPump {
    /// Start reading crossterm events into `sender`.
    pub fn spawn(sender: EventSender) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::spawn(move || pump_loop(sender, flag));
        Self {
            stop,
            handle: Some(handle),
        }
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn pump_loop(sender: EventSender, stop: Arc<AtomicBool>) {
    while !stop.load(Ordering::Relaxed) {
        match crossterm::event::poll(POLL_INTERVAL) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(e) => {
                sender.send(AppEvent::InputFailed(e.to_string()));
                return;
            }
        }

        let event = match crossterm::event::read() {
            Ok(event) => event,
            Err(e) => {
                sender.send(AppEvent::InputFailed(e.to_string()));
                return;
            }
        };

        if !sender.send(AppEvent::Input(event)) {
            return;
        }
    }
}
