use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, tick, Sender};
use log::{info, warn};

/// The delay and sound timers. Both are shared between the interpreter and
/// the thread ticking them, so every access goes through an atomic.
#[derive(Debug, Default)]
pub struct Timers {
    delay: AtomicU8,
    sound: AtomicU8,
}

impl Timers {
    pub fn new() -> Self {
        Timers {
            delay: AtomicU8::new(0),
            sound: AtomicU8::new(0),
        }
    }

    pub fn delay(&self) -> u8 {
        self.delay.load(Ordering::SeqCst)
    }

    pub fn sound(&self) -> u8 {
        self.sound.load(Ordering::SeqCst)
    }

    pub fn set_delay(&self, value: u8) {
        self.delay.store(value, Ordering::SeqCst);
    }

    pub fn set_sound(&self, value: u8) {
        self.sound.store(value, Ordering::SeqCst);
    }

    /// Consumes one elapsed timer interval.
    pub fn tick(&self) {
        decrement(&self.delay);
        decrement(&self.sound);
    }
}

/// Decrements `counter` by one, staying at 0 once it got there.
pub fn decrement(counter: &AtomicU8) {
    // fetch_update only fails if the closure returns None, i.e. the counter is already 0.
    let _ = counter.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |value| {
        value.checked_sub(1)
    });
}

/// A background thread calling `Timers::tick` once per interval. The thread
/// is stopped when `stop` is invoked or the handle is dropped.
pub struct TimerThread {
    shutdown_sender: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TimerThread {
    pub fn spawn(timers: Arc<Timers>, interval: Duration) -> Self {
        let (shutdown_sender, shutdown_receiver) = bounded::<()>(1);

        let handle = thread::spawn(move || {
            info!("Timer thread started, ticking every {:?}", interval);
            let ticker = tick(interval);
            loop {
                select! {
                    recv(ticker) -> _ => timers.tick(),
                    // Either an explicit shutdown message or the sender being dropped.
                    recv(shutdown_receiver) -> _ => break,
                }
            }
            info!("Timer thread stopped");
        });

        TimerThread {
            shutdown_sender: Some(shutdown_sender),
            handle: Some(handle),
        }
    }

    /// Signals the thread to stop and waits for it to finish. Calling this
    /// more than once is harmless.
    pub fn stop(&mut self) {
        if let Some(sender) = self.shutdown_sender.take() {
            // The thread only exits on shutdown, so the receiver is still alive.
            let _ = sender.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Timer thread panicked before shutdown");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for TimerThread {
    fn drop(&mut self) {
        self.stop();
    }
}
