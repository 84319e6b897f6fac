//! Progress indicators for CLI operations.

use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::output::Icons;

/// Spinner animation frames
pub const SPINNER_DOTS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner for indeterminate progress, drawn on stderr.
pub struct Spinner {
    message: String,
    frames: &'static [&'static str],
    interval: Duration,
    enabled: bool,
}

impl Spinner {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            frames: SPINNER_DOTS,
            interval: Duration::from_millis(80),
            enabled: true,
        }
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Disable all output, including the final status line.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Start the spinner (returns handle to stop it)
    pub fn start(self) -> SpinnerHandle {
        let is_tty = self.enabled && io::stderr().is_terminal();
        let running = Arc::new(AtomicBool::new(is_tty));

        let thread = is_tty.then(|| {
            let running = running.clone();
            let message = self.message;
            let frames = self.frames;
            let interval = self.interval;

            std::thread::spawn(move || {
                let mut frame_idx = 0;
                let mut stderr = io::stderr();

                while running.load(Ordering::SeqCst) {
                    let frame = frames[frame_idx % frames.len()];
                    let _ = write!(stderr, "\r\x1b[36m{frame}\x1b[0m {message}");
                    let _ = stderr.flush();

                    std::thread::sleep(interval);
                    frame_idx += 1;
                }

                // Clear spinner line
                let _ = write!(stderr, "\r\x1b[K");
                let _ = stderr.flush();
            })
        });

        SpinnerHandle {
            running,
            thread,
            enabled: self.enabled,
        }
    }
}

/// Handle to control a running spinner
pub struct SpinnerHandle {
    running: Arc<AtomicBool>,
    thread: Option<std::thread::JoinHandle<()>>,
    enabled: bool,
}

impl SpinnerHandle {
    /// Stop the spinner with a success message
    pub fn finish(self, message: &str) {
        self.stop_with_symbol(Icons::CHECK, "32", message);
    }

    /// Stop the spinner with an error message
    pub fn fail(self, message: &str) {
        self.stop_with_symbol(Icons::CROSS, "31", message);
    }

    fn stop_with_symbol(mut self, symbol: &str, ansi_color: &str, message: &str) {
        self.stop();

        if !self.enabled {
            return;
        }
        if io::stderr().is_terminal() {
            eprintln!("\x1b[{ansi_color}m{symbol}\x1b[0m {message}");
        } else {
            eprintln!("{symbol} {message}");
        }
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for SpinnerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
