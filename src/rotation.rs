//! Prompt rotation
//!
//! Cycles the prompt shown on the Complete tab. Instead of a free-running
//! interval timer the schedule holds at most one [`ScheduledTask`] and the
//! owner polls it with the current time, the same way an event loop checks
//! its redraw deadline.

use std::time::{Duration, Instant};

use crate::app::RotationConfig;

/// Built-in sentence starters, used when no prompt source is available
pub const DEFAULT_PROMPTS: [&str; 16] = [
    "I never got to tell you that...",
    "The last time I saw them, I...",
    "If I had one more moment, I would...",
    "Sometimes I wonder what would happen if...",
    "The thing I regret most is...",
    "When I close my eyes, I can still...",
    "I wish I had the courage to...",
    "In my dreams, we still...",
    "I'm so tired of pretending that...",
    "What really pisses me off is...",
    "I can't shake this feeling that...",
    "Every time I see their face, I...",
    "I'm scared that people will find out...",
    "The chaos in my head sounds like...",
    "I exploded with joy when...",
    "Nobody understands that I...",
];

/// Seconds between prompts unless configured otherwise
pub const DEFAULT_INTERVAL_SECS: u64 = 8;

/// Top-level views of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    Create,
    Complete,
    Browse,
    #[default]
    Themes,
}

impl Tab {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "create" => Some(Tab::Create),
            "complete" => Some(Tab::Complete),
            "browse" => Some(Tab::Browse),
            "themes" => Some(Tab::Themes),
            _ => None,
        }
    }
}

/// A pending rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    due: Instant,
}

impl ScheduledTask {
    pub fn due(&self) -> Instant {
        self.due
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }
}

/// Rotation state for the Complete tab
#[derive(Debug, Clone)]
pub struct RotationSchedule {
    interval: Duration,
    prompt_count: usize,
    index: usize,
    enabled: bool,
    tab: Tab,
    input_blank: bool,
    task: Option<ScheduledTask>,
}

impl RotationSchedule {
    pub fn new(interval: Duration, prompt_count: usize) -> Self {
        Self {
            interval,
            prompt_count,
            index: 0,
            enabled: true,
            tab: Tab::default(),
            input_blank: true,
            task: None,
        }
    }

    /// Schedule over [`DEFAULT_PROMPTS`]
    pub fn with_default_prompts(interval: Duration) -> Self {
        Self::new(interval, DEFAULT_PROMPTS.len())
    }

    /// Schedule over [`DEFAULT_PROMPTS`] with the configured interval and switch
    pub fn from_config(config: &RotationConfig) -> Self {
        Self {
            enabled: config.enabled,
            ..Self::with_default_prompts(config.interval())
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Text of the current prompt, when rotating over [`DEFAULT_PROMPTS`]
    pub fn current_prompt(&self) -> Option<&'static str> {
        DEFAULT_PROMPTS.get(self.index).copied()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn pending(&self) -> Option<&ScheduledTask> {
        self.task.as_ref()
    }

    pub fn is_armed(&self) -> bool {
        self.task.is_some()
    }

    fn should_run(&self) -> bool {
        self.enabled && self.tab == Tab::Complete && self.input_blank && self.prompt_count > 0
    }

    /// Arm or cancel the task to match the current state
    ///
    /// An already armed task keeps its deadline.
    fn reevaluate(&mut self, now: Instant) {
        match (self.should_run(), self.task.is_some()) {
            (true, false) => {
                log::debug!("Prompt rotation armed");
                self.task = Some(ScheduledTask {
                    due: now + self.interval,
                });
            }
            (false, true) => {
                log::debug!("Prompt rotation cancelled");
                self.task = None;
            }
            _ => {}
        }
    }

    pub fn set_tab(&mut self, tab: Tab, now: Instant) {
        self.tab = tab;
        self.reevaluate(now);
    }

    pub fn set_enabled(&mut self, enabled: bool, now: Instant) {
        self.enabled = enabled;
        self.reevaluate(now);
    }

    /// Typing pauses rotation; clearing the input resumes it
    pub fn set_input(&mut self, input: &str, now: Instant) {
        self.input_blank = input.trim().is_empty();
        self.reevaluate(now);
    }

    /// Advance to the next prompt if the task is due
    ///
    /// Returns the new prompt index and re-arms for the next interval.
    pub fn poll(&mut self, now: Instant) -> Option<usize> {
        let task = self.task?;
        if !task.is_due(now) {
            return None;
        }
        self.index = (self.index + 1) % self.prompt_count;
        self.task = Some(ScheduledTask {
            due: now + self.interval,
        });
        Some(self.index)
    }

    /// Skip to the next prompt on request
    ///
    /// Clears the input and restarts the interval.
    pub fn advance(&mut self, now: Instant) -> usize {
        if self.prompt_count > 0 {
            self.index = (self.index + 1) % self.prompt_count;
        }
        self.input_blank = true;
        self.task = None;
        self.reevaluate(now);
        self.index
    }
}
