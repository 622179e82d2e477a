//! Tick thread
//!
//! One dedicated thread drains the transport into the mixer every 25 ms.
//! It is the only place ticks run, so at most one tick is ever in flight,
//! and shutdown cancels exactly the pending wakeup: cues already handed to
//! the mixer keep playing out.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::mixer::Mixer;
use super::transport::Transport;

/// Wall-clock pause between ticks. Shorter than the lookahead window, so a
/// late wakeup still finds the next steps already scheduled.
pub(crate) const TICK_INTERVAL: Duration = Duration::from_millis(25);

/// Handle to the running tick thread.
pub(crate) struct Scheduler {
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl Scheduler {
    /// Start ticking. Locks are always taken transport first, mixer second.
    pub fn spawn(transport: Arc<Mutex<Transport>>, mixer: Arc<Mutex<Mixer>>) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();
        let thread = thread::spawn(move || {
            while flag.load(Ordering::SeqCst) {
                {
                    let mut transport = transport.lock().unwrap();
                    let mut mixer = mixer.lock().unwrap();
                    let now = mixer.time();
                    transport.drain(now, &mut *mixer);
                }
                thread::park_timeout(TICK_INTERVAL);
            }
        });
        Self {
            running,
            thread: Some(thread),
        }
    }

    /// Stop ticking and wait for the thread to exit.
    pub fn shutdown(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            thread.thread().unpark();
            let _ = thread.join();
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
