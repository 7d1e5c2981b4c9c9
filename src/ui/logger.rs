use super::sink::Ui;
use crate::cards::Card;
use crate::{AgentId, Score, Slot};

/// Renders display events through the log facade. Grid traffic goes to
/// debug, score and winner events to info, timer ticks to trace so they
/// can be filtered out without losing the rest.
pub struct LogUi;

impl Ui for LogUi {
    fn place_card(&self, card: Card, slot: Slot) {
        log::debug!("card {} placed on slot {}", card, slot);
    }
    fn remove_card(&self, slot: Slot) {
        log::debug!("card removed from slot {}", slot);
    }
    fn place_token(&self, agent: AgentId, slot: Slot) {
        log::debug!("agent {} tokens slot {}", agent, slot);
    }
    fn remove_token(&self, agent: AgentId, slot: Slot) {
        log::debug!("agent {} untokens slot {}", agent, slot);
    }
    fn remove_all_tokens(&self) {
        log::debug!("all tokens cleared");
    }
    fn set_score(&self, agent: AgentId, score: Score) {
        log::info!("agent {} score {}", agent, score);
    }
    fn set_freeze(&self, agent: AgentId, millis: u64) {
        match millis {
            0 => log::debug!("agent {} unfrozen", agent),
            _ => log::debug!("agent {} frozen for {}ms", agent, millis),
        }
    }
    fn set_countdown(&self, millis_left: u64, warn: bool) {
        log::trace!("countdown {}ms warn={}", millis_left, warn);
    }
    fn set_elapsed(&self, millis: u64) {
        log::trace!("elapsed {}ms", millis);
    }
    fn announce_winners(&self, agents: &[AgentId]) {
        log::info!("winners: {:?}", agents);
    }
}
