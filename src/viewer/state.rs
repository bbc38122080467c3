use super::layout::Layout;
use crate::constants::SPEED_STEP;
use crate::types::DailyStats;
use std::time::Duration;

/// Inputs the playback reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    TogglePause,
    Next,
    Prev,
    Restart,
    Faster,
    Slower,
    Tick,
    Resize(u16, u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Position and settings of the day-by-day animation.
#[derive(Debug)]
pub struct Playback {
    days: Vec<DailyStats>,
    current_index: usize,
    top_n: usize,
    paused: bool,
    done: bool,
    speed: Duration,
    layout: Layout,
}

impl Playback {
    pub fn new(mut days: Vec<DailyStats>, top_n: usize, speed: Duration) -> Self {
        for day in &mut days {
            day.contributors
                .sort_by(|a, b| b.cumulative_commits.cmp(&a.cumulative_commits));
        }
        Self {
            days,
            current_index: 0,
            top_n,
            paused: false,
            done: false,
            speed,
            layout: Layout::default(),
        }
    }

    pub fn days(&self) -> &[DailyStats] {
        &self.days
    }

    pub fn current(&self) -> Option<&DailyStats> {
        self.days.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn speed(&self) -> Duration {
        self.speed
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    fn last_index(&self) -> usize {
        self.days.len().saturating_sub(1)
    }

    pub fn update(&mut self, action: Action) -> Control {
        match action {
            Action::Quit => return Control::Quit,
            Action::TogglePause => self.paused = !self.paused,
            Action::Next => {
                if self.current_index < self.last_index() {
                    self.current_index += 1;
                }
            }
            Action::Prev => {
                self.current_index = self.current_index.saturating_sub(1);
            }
            Action::Restart => {
                self.current_index = 0;
                self.done = false;
            }
            Action::Faster => {
                if self.speed > SPEED_STEP {
                    self.speed -= SPEED_STEP;
                }
            }
            Action::Slower => self.speed += SPEED_STEP,
            Action::Tick => {
                if !self.paused && self.current_index < self.last_index() {
                    self.current_index += 1;
                }
                if self.current_index >= self.last_index() {
                    self.done = true;
                }
            }
            Action::Resize(width, height) => {
                self.layout = Layout::calculate(width, height);
            }
        }
        Control::Continue
    }
}
