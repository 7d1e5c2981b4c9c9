use super::sink::Ui;
use crate::cards::Card;
use crate::{AgentId, Score, Slot};
use parking_lot::Mutex;

/// One recorded display event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shown {
    CardUp(Card, Slot),
    CardDown(Slot),
    TokenUp(AgentId, Slot),
    TokenDown(AgentId, Slot),
    TokensCleared,
    Score(AgentId, Score),
    Freeze(AgentId, u64),
    Countdown(u64, bool),
    Elapsed(u64),
    Winners(Vec<AgentId>),
}

/// Recording sink for assertions: keeps every event in arrival order.
#[derive(Default)]
pub struct TapeUi(Mutex<Vec<Shown>>);

impl TapeUi {
    pub fn events(&self) -> Vec<Shown> {
        self.0.lock().clone()
    }

    fn record(&self, event: Shown) {
        self.0.lock().push(event);
    }
}

impl Ui for TapeUi {
    fn place_card(&self, card: Card, slot: Slot) {
        self.record(Shown::CardUp(card, slot));
    }
    fn remove_card(&self, slot: Slot) {
        self.record(Shown::CardDown(slot));
    }
    fn place_token(&self, agent: AgentId, slot: Slot) {
        self.record(Shown::TokenUp(agent, slot));
    }
    fn remove_token(&self, agent: AgentId, slot: Slot) {
        self.record(Shown::TokenDown(agent, slot));
    }
    fn remove_all_tokens(&self) {
        self.record(Shown::TokensCleared);
    }
    fn set_score(&self, agent: AgentId, score: Score) {
        self.record(Shown::Score(agent, score));
    }
    fn set_freeze(&self, agent: AgentId, millis: u64) {
        self.record(Shown::Freeze(agent, millis));
    }
    fn set_countdown(&self, millis_left: u64, warn: bool) {
        self.record(Shown::Countdown(millis_left, warn));
    }
    fn set_elapsed(&self, millis: u64) {
        self.record(Shown::Elapsed(millis));
    }
    fn announce_winners(&self, agents: &[AgentId]) {
        self.record(Shown::Winners(agents.to_vec()));
    }
}
