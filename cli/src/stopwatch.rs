use chrono::prelude::*;
use minefield_core::GameStatus;

/// Game clock, running while the engine reports an active game.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Stopwatch {
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl Stopwatch {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn observe(&mut self, status: GameStatus) {
        self.observe_at(status, Utc::now());
    }

    /// Starts on the first active status, stops on the first finished one.
    pub fn observe_at(&mut self, status: GameStatus, now: DateTime<Utc>) {
        match status {
            GameStatus::Active if self.started_at.is_none() => {
                log::debug!("clock started at {}", now);
                self.started_at = Some(now);
            }
            GameStatus::Won | GameStatus::Lost
                if self.started_at.is_some() && self.ended_at.is_none() =>
            {
                log::debug!("clock stopped at {}", now);
                self.ended_at = Some(now);
            }
            _ => {}
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.ended_at.is_none()
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs_at(Utc::now())
    }

    /// How many seconds have passed since the clock started, 0 if it hasn't
    pub fn elapsed_secs_at(&self, now: DateTime<Utc>) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or(now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }
}

/// `MM:SS`, minutes keep growing past 99.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
