use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, bounded};
use std::time::Duration;

/// Cooperative stop signal. Nothing is ever sent on the channel; the
/// signal is the disconnect that firing (or dropping) the trigger
/// causes, which wakes every watch blocked on it at once.
pub struct Trigger {
    tx: Sender<()>,
}

/// The observing end. Cloneable so one trigger can stop an agent thread
/// and its stimulus thread together. Checked at every suspension point.
#[derive(Clone)]
pub struct Watch {
    rx: Receiver<()>,
}

impl Trigger {
    pub fn wired() -> (Trigger, Watch) {
        let (tx, rx) = bounded(0);
        (Trigger { tx }, Watch { rx })
    }

    /// Fire the stop signal.
    pub fn pull(self) {
        drop(self.tx);
    }
}

impl Watch {
    pub fn stopped(&self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Sleep for the span, waking early on stop. Returns whether the
    /// stop has fired.
    pub fn idle(&self, span: Duration) -> bool {
        matches!(
            self.rx.recv_timeout(span),
            Err(RecvTimeoutError::Disconnected)
        )
    }

    /// The raw channel, for select arms alongside other sources.
    pub fn bell(&self) -> &Receiver<()> {
        &self.rx
    }
}
