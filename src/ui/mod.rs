//! Lifecycle listeners for a pipeline run
//!
//! The pipeline reports through the [`Ui`] trait:
//! - Started / Completed signals (the latter carrying the run duration)
//! - Current phase (Fetching, Decoding, ... Done or Failed)
//! - Progress within the load phases
//! - Free-form activity messages
//!
//! [`UiApp`] renders all of it full-screen with ratatui, [`ConsoleUi`]
//! forwards it to the `log` facade and [`SilentUi`] drops it.

mod components;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;

use components::{LogPanel, ProgressPanel, StatusPanel};

/// Pipeline states, in the order a successful run visits them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Fetching,
    Decoding,
    Normalizing,
    SchemaInit,
    Loading,
    Done,
    Failed,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Idle => write!(f, "Idle"),
            Phase::Fetching => write!(f, "Fetching data"),
            Phase::Decoding => write!(f, "Decoding JSON"),
            Phase::Normalizing => write!(f, "Normalizing dimensions"),
            Phase::SchemaInit => write!(f, "Creating schema"),
            Phase::Loading => write!(f, "Loading rows"),
            Phase::Done => write!(f, "Complete"),
            Phase::Failed => write!(f, "Failed"),
        }
    }
}

/// Format a duration as `mm:ss.ffffff`
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}.{:06}", secs / 60, secs % 60, d.subsec_micros())
}

/// Progress information for the current operation
#[derive(Debug, Clone, Default)]
pub struct Progress {
    pub current: u64,
    pub total: u64,
    pub label: String,
}

impl Progress {
    pub fn new(current: u64, total: u64, label: impl Into<String>) -> Self {
        Self {
            current,
            total,
            label: label.into(),
        }
    }

    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.current as f64 / self.total as f64
        }
    }
}

/// Trait for UI implementations - allows both real TUI and silent/test modes
pub trait Ui {
    /// Emitted once, as the run leaves Idle
    fn started(&mut self);
    fn set_phase(&mut self, phase: Phase);
    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>);
    fn clear_progress(&mut self);
    fn log(&mut self, message: impl Into<String>);
    /// Emitted once after a successful load
    fn completed(&mut self, elapsed: Duration);
}

/// Main UI application state - full TUI implementation
pub struct UiApp {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    status: StatusPanel,
    progress: ProgressPanel,
    log: LogPanel,
}

impl UiApp {
    /// Create a new UI application and enter the alternate screen
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            status: StatusPanel::new(),
            progress: ProgressPanel::new(),
            log: LogPanel::new(),
        })
    }

    /// Draw the UI
    fn draw(&mut self) -> Result<()> {
        let status = &self.status;
        let progress = &self.progress;
        let log = &self.log;

        self.terminal.draw(|frame| {
            let area = frame.area();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(5), // Status panel
                    Constraint::Length(3), // Progress bar
                    Constraint::Min(5),    // Log panel
                ])
                .split(area);

            status.render(frame, chunks[0]);
            progress.render(frame, chunks[1]);
            log.render(frame, chunks[2]);
        })?;

        Ok(())
    }

    /// Show a final message, wait for a keypress, then restore the terminal
    pub fn finish(mut self, summary: &str) -> Result<()> {
        self.clear_progress();
        self.log(summary);
        self.log("Press any key to exit...");
        self.draw()?;

        loop {
            if event::poll(Duration::from_millis(100))? {
                if let CrosstermEvent::Key(_) = event::read()? {
                    break;
                }
            }
        }

        self.restore()
    }

    /// Restore terminal without waiting
    pub fn restore(mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Ui for UiApp {
    fn started(&mut self) {
        self.log.add("Started");
        self.draw().ok();
    }

    fn set_phase(&mut self, phase: Phase) {
        self.status.set_phase(phase);
        self.draw().ok();
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        self.progress
            .set_progress(Progress::new(current, total, label));
        self.draw().ok();
    }

    fn clear_progress(&mut self) {
        self.progress.clear();
        self.draw().ok();
    }

    fn log(&mut self, message: impl Into<String>) {
        self.log.add(message);
        self.draw().ok();
    }

    fn completed(&mut self, elapsed: Duration) {
        let message = format!("Completed in {}", format_duration(elapsed));
        self.status.set_info(message.clone());
        self.log.add(message);
        self.draw().ok();
    }
}

impl Drop for UiApp {
    fn drop(&mut self) {
        // Best effort cleanup
        terminal::disable_raw_mode().ok();
        self.terminal
            .backend_mut()
            .execute(LeaveAlternateScreen)
            .ok();
        self.terminal.show_cursor().ok();
    }
}

/// Forwards everything to the `log` facade; progress is only logged at debug level
#[derive(Default)]
pub struct ConsoleUi;

impl ConsoleUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for ConsoleUi {
    fn started(&mut self) {
        log::info!("Started");
    }

    fn set_phase(&mut self, phase: Phase) {
        log::debug!("Phase: {}", phase);
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        if current == total {
            let label: String = label.into();
            log::debug!("{}: {}/{}", label, current, total);
        }
    }

    fn clear_progress(&mut self) {}

    fn log(&mut self, message: impl Into<String>) {
        let message: String = message.into();
        log::info!("{}", message);
    }

    fn completed(&mut self, elapsed: Duration) {
        log::info!("Completed - duration: {}", format_duration(elapsed));
    }
}

/// Silent UI implementation for testing and non-interactive use
#[derive(Default)]
pub struct SilentUi;

impl SilentUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for SilentUi {
    fn started(&mut self) {}
    fn set_phase(&mut self, _phase: Phase) {}
    fn set_progress(&mut self, _current: u64, _total: u64, _label: impl Into<String>) {}
    fn clear_progress(&mut self) {}
    fn log(&mut self, _message: impl Into<String>) {}
    fn completed(&mut self, _elapsed: Duration) {}
}
