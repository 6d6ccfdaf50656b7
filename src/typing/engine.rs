//! Typing engine
//!
//! Drives a [`TypingMachine`] on a background thread: every tick writes the
//! new text into a [`TextSink`] and then waits for the tick's delay. The wait
//! doubles as the cancellation point, so [`TypingHandle::stop`] takes effect
//! immediately instead of after the current pause.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info};

use super::machine::{PhraseList, TypingConfig, TypingMachine};
use super::TypingError;

/// Shortest wait between ticks; zero timings would spin the worker
pub const MIN_TICK: Duration = Duration::from_millis(1);

/// Surface the engine writes text into
pub trait TextSink: Send + 'static {
    /// Replace the displayed text
    fn set_text(&mut self, text: &str);
}

impl<F> TextSink for F
where
    F: FnMut(&str) + Send + 'static,
{
    fn set_text(&mut self, text: &str) {
        self(text)
    }
}

/// Forwards every update over a channel; a closed receiver drops updates
pub struct ChannelSink(pub Sender<String>);

impl TextSink for ChannelSink {
    fn set_text(&mut self, text: &str) {
        let _ = self.0.send(text.to_string());
    }
}

/// Typing animation engine
pub struct TypingEngine {
    phrases: PhraseList,
    config: TypingConfig,
}

impl TypingEngine {
    pub fn new(phrases: PhraseList, config: TypingConfig) -> Self {
        Self { phrases, config }
    }

    /// Start cycling into `target`.
    ///
    /// A missing target is not an error: nothing is scheduled and `Ok(None)`
    /// is returned.
    pub fn start<S: TextSink>(self, target: Option<S>) -> Result<Option<TypingHandle>, TypingError> {
        let Some(mut sink) = target else {
            return Ok(None);
        };

        let phrase_count = self.phrases.len();
        let mut machine = TypingMachine::new(self.phrases, self.config);
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let thread = thread::Builder::new()
            .name("typing".to_string())
            .spawn(move || {
                loop {
                    let tick = machine.step();
                    sink.set_text(&tick.text);
                    match stop_rx.recv_timeout(tick.delay.max(MIN_TICK)) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        // Stop requested or handle dropped
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                debug!("Typing loop stopped at phrase {}", machine.phrase_index());
            })
            .map_err(TypingError::Spawn)?;

        info!("Typing animation started ({} phrases)", phrase_count);
        Ok(Some(TypingHandle {
            stop_tx: Some(stop_tx),
            thread: Some(thread),
        }))
    }
}

/// Handle to a running typing loop; dropping it stops the loop
pub struct TypingHandle {
    stop_tx: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl TypingHandle {
    /// Stop the loop and wait for the worker to exit
    pub fn stop(mut self) {
        self.shutdown();
    }

    /// Whether the worker thread is still alive
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().map_or(false, |t| !t.is_finished())
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for TypingHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    fn fast_config() -> TypingConfig {
        TypingConfig {
            typing_speed: Duration::from_millis(1),
            typing_delay: Duration::from_millis(2),
            erase_speed: Duration::from_millis(1),
            advance_pause: Duration::from_millis(1),
        }
    }

    fn wait_for<F: Fn() -> bool>(cond: F) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !cond() {
            assert!(Instant::now() < deadline, "timed out waiting for typing loop");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_missing_target_is_idle() {
        let engine = TypingEngine::new(PhraseList::new(["Hi"]).unwrap(), fast_config());
        let handle = engine.start(None::<ChannelSink>).unwrap();
        assert!(handle.is_none());
    }

    #[test]
    fn test_sink_receives_scenario_trace() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            move |text: &str| seen.lock().unwrap().push(text.to_string())
        };

        let engine = TypingEngine::new(PhraseList::new(["Hi", "Go"]).unwrap(), fast_config());
        let handle = engine.start(Some(sink)).unwrap().unwrap();
        wait_for(|| seen.lock().unwrap().len() >= 9);
        handle.stop();

        let seen = seen.lock().unwrap();
        assert_eq!(
            &seen[..9],
            &["H", "Hi", "H", "", "G", "Go", "G", "", "H"]
        );
    }

    #[test]
    fn test_channel_sink() {
        let (tx, rx) = mpsc::channel();
        let engine = TypingEngine::new(PhraseList::new(["ab"]).unwrap(), fast_config());
        let handle = engine.start(Some(ChannelSink(tx))).unwrap().unwrap();
        let first = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        let second = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        drop(handle);
        assert_eq!(first, "a");
        assert_eq!(second, "ab");
    }

    #[test]
    fn test_stop_halts_updates() {
        let count = Arc::new(AtomicUsize::new(0));
        let sink = {
            let count = Arc::clone(&count);
            move |_: &str| {
                count.fetch_add(1, Ordering::SeqCst);
            }
        };

        let engine = TypingEngine::new(PhraseList::new(["hello"]).unwrap(), fast_config());
        let handle = engine.start(Some(sink)).unwrap().unwrap();
        wait_for(|| count.load(Ordering::SeqCst) >= 3);
        assert!(handle.is_running());
        handle.stop();

        let after_stop = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn test_stop_interrupts_long_pause() {
        let config = TypingConfig {
            typing_speed: Duration::from_secs(60),
            ..fast_config()
        };
        let (tx, rx) = mpsc::channel();
        let engine = TypingEngine::new(PhraseList::new(["slow"]).unwrap(), config);
        let handle = engine.start(Some(ChannelSink(tx))).unwrap().unwrap();
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), "s");

        let started = Instant::now();
        handle.stop();
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_zero_timings_do_not_flood_sink() {
        let config = TypingConfig {
            typing_speed: Duration::ZERO,
            typing_delay: Duration::ZERO,
            erase_speed: Duration::ZERO,
            advance_pause: Duration::ZERO,
        };
        let (tx, rx) = mpsc::channel();
        let engine = TypingEngine::new(PhraseList::new(["Hi", "Go"]).unwrap(), config);
        let started = Instant::now();
        let handle = engine.start(Some(ChannelSink(tx))).unwrap().unwrap();
        thread::sleep(Duration::from_millis(16));
        handle.stop();
        let elapsed = started.elapsed();

        // At most one update per MIN_TICK, plus the first one
        let limit = (elapsed.as_millis() / MIN_TICK.as_millis()) as usize + 1;
        let queued = rx.try_iter().count();
        assert!(queued >= 1);
        assert!(queued <= limit, "{} updates in {:?}", queued, elapsed);
    }
}
