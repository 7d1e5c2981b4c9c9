use super::config::Config;
use crate::cards::{Card, Shape, find_sets};
use crate::ui::Ui;
use crate::{AgentId, Slot};
use std::sync::Arc;
use std::time::Duration;

/// Shared board state: the slot/card bijection and the per-agent token
/// grid. Not internally synchronized; callers hold the board-wide mutex
/// for any sequence of calls that must be atomic.
///
/// Invariant at every call boundary: slot s holds card c iff card c sits
/// in slot s.
pub struct Board {
    slot_to_card: Vec<Option<Card>>,
    card_to_slot: Vec<Option<Slot>>,
    tokens: Vec<Vec<bool>>,
    shape: Shape,
    deal_delay: Duration,
    ui: Arc<dyn Ui>,
}

impl Board {
    pub fn new(config: &Config, ui: Arc<dyn Ui>) -> Self {
        Self {
            slot_to_card: vec![None; config.slots()],
            card_to_slot: vec![None; config.shape().deck_size()],
            tokens: vec![vec![false; config.slots()]; config.agents()],
            shape: config.shape(),
            deal_delay: Duration::from_millis(config.deal_delay),
            ui,
        }
    }

    pub fn slots(&self) -> usize {
        self.slot_to_card.len()
    }

    pub fn card(&self, slot: Slot) -> Option<Card> {
        self.slot_to_card[slot]
    }

    pub fn count_cards(&self) -> usize {
        self.slot_to_card.iter().flatten().count()
    }

    /// Cards currently on the board, in slot order.
    pub fn cards(&self) -> Vec<Card> {
        self.slot_to_card.iter().flatten().copied().collect()
    }

    /// Deal a card into an empty slot. Sleeps the configured dealing
    /// delay while the caller holds the lock, so the pause is observable
    /// to every agent as board unavailability.
    pub fn place_card(&mut self, card: Card, slot: Slot) {
        debug_assert!(self.slot_to_card[slot].is_none());
        self.nap();
        self.slot_to_card[slot] = Some(card);
        self.card_to_slot[usize::from(card)] = Some(slot);
        self.ui.place_card(card, slot);
    }

    /// Clear a slot, cascading removal of every agent's token on it.
    /// A no-op on an empty slot.
    pub fn remove_card(&mut self, slot: Slot) {
        let Some(card) = self.slot_to_card[slot] else {
            return;
        };
        self.nap();
        self.slot_to_card[slot] = None;
        self.card_to_slot[usize::from(card)] = None;
        self.ui.remove_card(slot);
        for agent in 0..self.tokens.len() {
            self.remove_token(agent, slot);
        }
    }

    /// Tokens only sit on cards: placing on an empty slot is a no-op.
    pub fn place_token(&mut self, agent: AgentId, slot: Slot) {
        if self.slot_to_card[slot].is_some() {
            self.tokens[agent][slot] = true;
            self.ui.place_token(agent, slot);
        }
    }

    /// Returns whether a token was actually present.
    pub fn remove_token(&mut self, agent: AgentId, slot: Slot) -> bool {
        let present = self.tokens[agent][slot];
        if present {
            self.tokens[agent][slot] = false;
            self.ui.remove_token(agent, slot);
        }
        present
    }

    /// Slots this agent currently has tokens on, ascending.
    pub fn tokens(&self, agent: AgentId) -> Vec<Slot> {
        self.tokens[agent]
            .iter()
            .enumerate()
            .filter(|&(_, &token)| token)
            .map(|(slot, _)| slot)
            .collect()
    }

    pub fn clear_tokens(&mut self) {
        for row in self.tokens.iter_mut() {
            row.fill(false);
        }
        self.ui.remove_all_tokens();
    }

    pub fn has_set(&self) -> bool {
        !find_sets(self.shape, &self.cards(), 1).is_empty()
    }

    /// Log every valid set currently on the table.
    pub fn hints(&self) {
        for set in find_sets(self.shape, &self.cards(), usize::MAX) {
            let slots = set
                .iter()
                .filter_map(|&card| self.card_to_slot[usize::from(card)])
                .collect::<Vec<_>>();
            let features = set
                .iter()
                .map(|&card| self.shape.features_of(card))
                .collect::<Vec<_>>();
            log::debug!("set on slots {:?} with features {:?}", slots, features);
        }
    }

    fn nap(&self) {
        if !self.deal_delay.is_zero() {
            std::thread::sleep(self.deal_delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{NullUi, Shown, TapeUi};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn config() -> Config {
        Config {
            rows: 2,
            columns: 2,
            features: 2,
            values: 3,
            humans: 2,
            robots: 0,
            deal_delay: 0,
            ..Config::default()
        }
    }

    fn board() -> Board {
        Board::new(&config(), Arc::new(NullUi))
    }

    #[test]
    fn bijection_survives_random_traffic() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut board = board();
        for _ in 0..1000 {
            let slot = rng.random_range(0..board.slots());
            match board.card(slot) {
                Some(_) => board.remove_card(slot),
                None => board.place_card(Card::from(slot as u16), slot),
            }
            for s in 0..board.slots() {
                if let Some(card) = board.card(s) {
                    assert!(board.card_to_slot[usize::from(card)] == Some(s));
                }
            }
            for (card, &slot) in board.card_to_slot.iter().enumerate() {
                if let Some(s) = slot {
                    assert!(board.card(s) == Some(Card::from(card as u16)));
                }
            }
        }
    }

    #[test]
    fn tokens_need_a_card() {
        let mut board = board();
        board.place_token(0, 0);
        assert!(board.tokens(0).is_empty());
        board.place_card(Card::from(0u16), 0);
        board.place_token(0, 0);
        assert!(board.tokens(0) == vec![0]);
    }

    #[test]
    fn card_removal_cascades_every_token() {
        let mut board = board();
        board.place_card(Card::from(4u16), 1);
        board.place_token(0, 1);
        board.place_token(1, 1);
        board.remove_card(1);
        assert!(board.tokens(0).is_empty());
        assert!(board.tokens(1).is_empty());
    }

    #[test]
    fn remove_token_reports_presence() {
        let mut board = board();
        board.place_card(Card::from(2u16), 3);
        assert!(!board.remove_token(0, 3));
        board.place_token(0, 3);
        assert!(board.remove_token(0, 3));
        assert!(!board.remove_token(0, 3));
    }

    #[test]
    fn clear_is_idempotent() {
        let mut board = board();
        board.place_card(Card::from(1u16), 0);
        board.place_token(0, 0);
        board.place_token(1, 0);
        board.clear_tokens();
        board.clear_tokens();
        for agent in 0..2 {
            for slot in 0..board.slots() {
                assert!(!board.tokens[agent][slot]);
            }
        }
    }

    #[test]
    fn events_reach_the_sink() {
        let tape = Arc::new(TapeUi::default());
        let mut board = Board::new(&config(), tape.clone());
        board.place_card(Card::from(3u16), 2);
        board.place_token(1, 2);
        board.remove_card(2);
        let events = tape.events();
        assert!(events[0] == Shown::CardUp(Card::from(3u16), 2));
        assert!(events[1] == Shown::TokenUp(1, 2));
        assert!(events[2] == Shown::CardDown(2));
        assert!(events[3] == Shown::TokenDown(1, 2));
    }

    #[test]
    fn set_probe_sees_the_table() {
        let mut board = board();
        assert!(!board.has_set());
        // single-feature difference: 0, 1, 2 form a set
        board.place_card(Card::from(0u16), 0);
        board.place_card(Card::from(1u16), 1);
        board.place_card(Card::from(2u16), 2);
        assert!(board.has_set());
    }
}
