use super::keypad::Keypad;
use crate::gameplay::{Config, Watch};
use crossbeam_channel::select;
use rand::Rng;
use rand::rngs::SmallRng;
use std::time::Duration;

/// Stimulus loop for a simulated agent: presses a random slot at a
/// bounded rate, pausing while its agent's queue is full and exiting
/// promptly on shutdown.
pub struct Robot {
    name: String,
    keypad: Keypad,
    slots: usize,
    delay: Duration,
    rng: SmallRng,
    watch: Watch,
}

impl Robot {
    pub fn new(config: &Config, name: String, keypad: Keypad, rng: SmallRng, watch: Watch) -> Self {
        Self {
            name,
            keypad,
            slots: config.slots(),
            delay: Duration::from_millis(config.robot_delay),
            rng,
            watch,
        }
    }

    /// Thread body.
    pub fn run(mut self) {
        log::debug!("{} stimulus starting", self.name);
        loop {
            if self.watch.idle(self.delay) {
                break;
            }
            let slot = self.rng.random_range(0..self.slots);
            // blocking send: a full queue parks the generator until the
            // agent drains it or shutdown fires
            select! {
                send(self.keypad.keys, slot) -> sent => match sent {
                    Ok(()) => (),
                    Err(_) => break,
                },
                recv(self.watch.bell()) -> _ => break,
            }
        }
        log::debug!("{} stimulus stopping", self.name);
    }
}
