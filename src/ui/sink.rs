use crate::cards::Card;
use crate::{AgentId, Score, Slot};

/// Display sink for everything the engine wants shown. Fire-and-forget:
/// implementations must return promptly and never block the game.
pub trait Ui: Send + Sync {
    fn place_card(&self, card: Card, slot: Slot);
    fn remove_card(&self, slot: Slot);
    fn place_token(&self, agent: AgentId, slot: Slot);
    fn remove_token(&self, agent: AgentId, slot: Slot);
    fn remove_all_tokens(&self);
    fn set_score(&self, agent: AgentId, score: Score);
    fn set_freeze(&self, agent: AgentId, millis: u64);
    fn set_countdown(&self, millis_left: u64, warn: bool);
    fn set_elapsed(&self, millis: u64);
    fn announce_winners(&self, agents: &[AgentId]);
}

/// Headless sink.
pub struct NullUi;

impl Ui for NullUi {
    fn place_card(&self, _: Card, _: Slot) {}
    fn remove_card(&self, _: Slot) {}
    fn place_token(&self, _: AgentId, _: Slot) {}
    fn remove_token(&self, _: AgentId, _: Slot) {}
    fn remove_all_tokens(&self) {}
    fn set_score(&self, _: AgentId, _: Score) {}
    fn set_freeze(&self, _: AgentId, _: u64) {}
    fn set_countdown(&self, _: u64, _: bool) {}
    fn set_elapsed(&self, _: u64) {}
    fn announce_winners(&self, _: &[AgentId]) {}
}
