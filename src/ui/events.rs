use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};
use signal_hook::consts::{SIGINT, SIGTERM};

use crate::auth::AuthEvent;
use crate::model::{Blog, User};
use crate::shutdown::ShutdownHandle;

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize(u16, u16),
    /// Fresh result of the read query, numbered in issue order.
    BlogsLoaded { seq: u64, blogs: Vec<Blog> },
    /// Answer to `UiCommand::ResolveUser`.
    UserResolved { generation: u64, user: Option<User> },
    UserLookupFailed { generation: u64 },
    /// Forwarded from the identity provider subscription.
    Auth(AuthEvent),
    LoginFailed(String),
    /// OS signal received (SIGTERM, SIGINT)
    Shutdown,
}

pub type AppEventSender = mpsc::Sender<AppEvent>;

pub struct EventHandler {
    rx: Receiver<AppEvent>,
    tx: AppEventSender,
}

impl EventHandler {
    /// Spawns the terminal input thread. It stops once `shutdown` is signaled.
    pub fn new(tick_rate: Duration, shutdown: ShutdownHandle) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        thread::spawn(move || {
            let signaled = Arc::new(AtomicBool::new(false));
            for signal in [SIGINT, SIGTERM] {
                if let Err(err) = signal_hook::flag::register(signal, Arc::clone(&signaled)) {
                    tracing::warn!(signal, error = %err, "failed to register signal handler");
                }
            }

            let mut last_tick = Instant::now();
            loop {
                if shutdown.is_shutting_down() {
                    break;
                }
                if signaled.swap(false, Ordering::Relaxed) {
                    let _ = event_tx.send(AppEvent::Shutdown);
                }

                // Short poll so the shutdown flag is checked often.
                let timeout = tick_rate
                    .saturating_sub(last_tick.elapsed())
                    .min(Duration::from_millis(50));

                match event::poll(timeout) {
                    Ok(true) => match event::read() {
                        Ok(Event::Key(key)) => {
                            let _ = event_tx.send(AppEvent::Key(key));
                        }
                        Ok(Event::Resize(cols, rows)) => {
                            let _ = event_tx.send(AppEvent::Resize(cols, rows));
                        }
                        Ok(_) => {}
                        Err(err) => {
                            tracing::error!(error = %err, "terminal read failed");
                            break;
                        }
                    },
                    Ok(false) => {}
                    Err(err) => {
                        tracing::error!(error = %err, "terminal poll failed");
                        break;
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    let _ = event_tx.send(AppEvent::Tick);
                    last_tick = Instant::now();
                }
            }
        });

        Self { rx, tx }
    }

    pub fn next(&self, timeout: Duration) -> Result<AppEvent, mpsc::RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn sender(&self) -> AppEventSender {
        self.tx.clone()
    }
}
