use super::board::Board;
use crate::cards::Card;
use crate::{AgentId, SET_SIZE, Slot};
use crossbeam_channel::{Receiver, Sender, bounded};

/// How the arbiter ruled on a committed triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The three cards form a set: point awarded, cards removed.
    Valid,
    /// Not a set: penalty, the agent's tokens cleared.
    Invalid,
    /// The board changed under the snapshot before validation ran.
    /// No award, no penalty.
    Voided,
}

/// Snapshot of a commit: the agent, its three slots, and the cards it
/// observed there. The card snapshot lets the arbiter detect staleness
/// against the live board. Resolved exactly once through its own
/// one-shot channel.
pub struct Triple {
    pub agent: AgentId,
    pub slots: [Slot; SET_SIZE],
    pub cards: [Card; SET_SIZE],
    reply: Sender<Outcome>,
}

impl Triple {
    /// Build the snapshot and the endpoint its agent blocks on.
    pub fn commit(
        agent: AgentId,
        slots: [Slot; SET_SIZE],
        cards: [Card; SET_SIZE],
    ) -> (Self, Receiver<Outcome>) {
        let (reply, wait) = bounded(1);
        (
            Self {
                agent,
                slots,
                cards,
                reply,
            },
            wait,
        )
    }

    /// Whether every snapshotted slot still holds the card observed at
    /// commit time.
    pub fn fresh(&self, board: &Board) -> bool {
        self.slots
            .iter()
            .zip(self.cards.iter())
            .all(|(&slot, &card)| board.card(slot) == Some(card))
    }

    /// Wake the committing agent. Dropped receivers (an agent already
    /// shutting down) are fine to ignore.
    pub fn resolve(self, outcome: Outcome) {
        let _ = self.reply.send(outcome);
    }
}
