use super::config::Config;
use crate::ui::Ui;
use std::time::{Duration, Instant};

/// Arbiter tick cadence outside the warning window.
const TICK: Duration = Duration::from_millis(100);
/// Tight cadence inside the warning window, for sub-second display.
const URGENT: Duration = Duration::from_millis(10);

/// The arbiter's clock. Countdown mode runs a deadline down and forces
/// a full reshuffle when it lapses; elapsed mode (timeout 0) just shows
/// time since the last reset and never forces anything.
pub enum Countdown {
    Deadline {
        until: Instant,
        length: Duration,
        warning: Duration,
    },
    Elapsed {
        since: Instant,
    },
}

impl Countdown {
    pub fn new(config: &Config) -> Self {
        match config.turn_timeout {
            0 => Self::Elapsed {
                since: Instant::now(),
            },
            millis => Self::Deadline {
                until: Instant::now() + Duration::from_millis(millis),
                length: Duration::from_millis(millis),
                warning: Duration::from_millis(config.warning_time),
            },
        }
    }

    /// Start the next turn window.
    pub fn reset(&mut self) {
        match self {
            Self::Deadline { until, length, .. } => *until = Instant::now() + *length,
            Self::Elapsed { since } => *since = Instant::now(),
        }
    }

    pub fn lapsed(&self) -> bool {
        match self {
            Self::Deadline { until, .. } => Instant::now() >= *until,
            Self::Elapsed { .. } => false,
        }
    }

    pub fn elapsed_mode(&self) -> bool {
        matches!(self, Self::Elapsed { .. })
    }

    pub fn refresh(&self, ui: &dyn Ui) {
        match self {
            Self::Deadline { until, warning, .. } => {
                let left = until.saturating_duration_since(Instant::now());
                ui.set_countdown(left.as_millis() as u64, left < *warning);
            }
            Self::Elapsed { since } => {
                ui.set_elapsed(since.elapsed().as_millis() as u64);
            }
        }
    }

    /// How long the arbiter may sleep before the display goes stale:
    /// the tick interval, urgent inside the warning window, never past
    /// the deadline itself.
    pub fn nap(&self) -> Duration {
        match self {
            Self::Deadline { until, warning, .. } => {
                let left = until.saturating_duration_since(Instant::now());
                let tick = if left < *warning { URGENT } else { TICK };
                tick.min(left).max(Duration::from_millis(1))
            }
            Self::Elapsed { .. } => TICK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{Shown, TapeUi};

    fn config(timeout: u64) -> Config {
        Config {
            turn_timeout: timeout,
            warning_time: 5_000,
            ..Config::default()
        }
    }

    #[test]
    fn deadline_lapses_and_resets() {
        let mut countdown = Countdown::new(&config(20));
        assert!(!countdown.lapsed());
        std::thread::sleep(Duration::from_millis(30));
        assert!(countdown.lapsed());
        countdown.reset();
        assert!(!countdown.lapsed());
    }

    #[test]
    fn elapsed_mode_never_lapses() {
        let countdown = Countdown::new(&config(0));
        assert!(countdown.elapsed_mode());
        std::thread::sleep(Duration::from_millis(5));
        assert!(!countdown.lapsed());
    }

    #[test]
    fn warning_window_tightens_the_tick() {
        // 20ms left out of a 5s warning window: already urgent
        let countdown = Countdown::new(&config(20));
        assert!(countdown.nap() <= URGENT);
        let countdown = Countdown::new(&config(60_000));
        assert!(countdown.nap() == TICK);
    }

    #[test]
    fn refresh_styles_by_mode() {
        let tape = TapeUi::default();
        Countdown::new(&config(60_000)).refresh(&tape);
        Countdown::new(&config(0)).refresh(&tape);
        let events = tape.events();
        assert!(matches!(events[0], Shown::Countdown(_, false)));
        assert!(matches!(events[1], Shown::Elapsed(_)));
    }
}
