use crate::{SET_SIZE, Slot};
use crossbeam_channel::{Receiver, Sender, bounded};

/// Input feed for one agent: a bounded FIFO of slot selections, sized
/// to the triple. Presses against a full queue are dropped on the
/// floor, so a frozen or blocked agent never backs up its feeder.
#[derive(Clone)]
pub struct Keypad {
    pub(crate) keys: Sender<Slot>,
}

impl Keypad {
    /// Build a keypad and the consuming end its agent reads from.
    pub fn wired() -> (Keypad, Receiver<Slot>) {
        let (keys, feed) = bounded(SET_SIZE);
        (Keypad { keys }, feed)
    }

    pub fn press(&self, slot: Slot) {
        let _ = self.keys.try_send(slot);
    }
}
