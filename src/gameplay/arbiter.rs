use super::board::Board;
use super::config::Config;
use super::countdown::Countdown;
use super::shutdown::Watch;
use super::triple::{Outcome, Triple};
use crate::Slot;
use crate::cards::{Deck, Shape, find_sets, is_valid_set};
use crate::ui::Ui;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use parking_lot::Mutex;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use std::sync::Arc;

/// Bound on consecutive dead-board redeals in elapsed mode.
const REDEALS: usize = 64;

/// The single controlling thread. Owns the deck, the countdown, and the
/// consumer end of the pending-triple queue; resolves exactly one triple
/// at a time under the board lock and drives the deal/clear lifecycle.
pub struct Arbiter {
    board: Arc<Mutex<Board>>,
    deck: Deck,
    pending: Receiver<Triple>,
    countdown: Countdown,
    order: Vec<Slot>,
    rng: SmallRng,
    ui: Arc<dyn Ui>,
    shape: Shape,
    hints: bool,
    stop: bool,
}

impl Arbiter {
    pub fn new(
        config: &Config,
        board: Arc<Mutex<Board>>,
        pending: Receiver<Triple>,
        ui: Arc<dyn Ui>,
        rng: SmallRng,
    ) -> Self {
        Self {
            deck: Deck::full(config.shape()),
            countdown: Countdown::new(config),
            order: (0..config.slots()).collect(),
            shape: config.shape(),
            hints: config.hints,
            stop: false,
            board,
            pending,
            ui,
            rng,
        }
    }

    /// Lifecycle loop: deal, run the turn window, clear, repeat until
    /// the stop signal fires or no valid set remains anywhere.
    pub fn run(&mut self, watch: &Watch) {
        log::debug!("arbiter starting");
        while !self.finished(watch) {
            self.deal();
            self.countdown.reset();
            self.countdown.refresh(&*self.ui);
            while !self.stop && !watch.stopped() && !self.countdown.lapsed() {
                self.pause();
                self.countdown.refresh(&*self.ui);
            }
            if !self.stop && !watch.stopped() {
                // countdown lapsed: everything goes back for a reshuffle
                let board_arc = self.board.clone();
                let mut board = board_arc.lock();
                self.scoop(&mut board);
            }
        }
        log::debug!("arbiter stopping");
    }

    /// The game ends on an explicit stop or when deck and board together
    /// hold no valid set at all.
    fn finished(&self, watch: &Watch) -> bool {
        if self.stop || watch.stopped() {
            return true;
        }
        let mut cards = self.board.lock().cards();
        cards.extend_from_slice(self.deck.cards());
        find_sets(self.shape, &cards, 1).is_empty()
    }

    /// Tick-wait: sleep until the next display tick, waking early on a
    /// submission; at most one triple is resolved per wake.
    fn pause(&mut self) {
        match self.pending.recv_timeout(self.countdown.nap()) {
            Ok(triple) => {
                self.judge(triple);
                self.deal();
            }
            Err(RecvTimeoutError::Timeout) => (),
            Err(RecvTimeoutError::Disconnected) => self.stop = true,
        }
    }

    /// Resolve one committed triple under the board lock: void stale
    /// snapshots, validate live ones, mutate the board, wake the agent.
    fn judge(&mut self, triple: Triple) {
        let mut board = self.board.lock();
        let outcome = if !triple.fresh(&board) {
            for slot in triple.slots {
                board.remove_token(triple.agent, slot);
            }
            Outcome::Voided
        } else if is_valid_set(self.shape, triple.cards) {
            for slot in triple.slots {
                board.remove_card(slot);
            }
            self.countdown.reset();
            Outcome::Valid
        } else {
            for slot in triple.slots {
                board.remove_token(triple.agent, slot);
            }
            Outcome::Invalid
        };
        drop(board);
        log::debug!(
            "agent {} ruled {:?} on slots {:?}",
            triple.agent,
            outcome,
            triple.slots
        );
        triple.resolve(outcome);
    }

    /// Replenish. In elapsed mode a filled board must hold at least one
    /// set, else it is cleared back into the deck and redealt; if at
    /// that point no set exists anywhere, the game is over. Likewise an
    /// exhausted deck with a setless board ends the game.
    fn deal(&mut self) {
        let board_arc = self.board.clone();
        let mut board = board_arc.lock();
        self.fill(&mut board);
        if self.countdown.elapsed_mode() {
            let mut redeals = 0;
            while !self.stop && board.count_cards() > 0 && !board.has_set() {
                if redeals == REDEALS {
                    log::warn!("redeal bound reached, dealing on regardless");
                    break;
                }
                redeals += 1;
                self.scoop(&mut board);
                if find_sets(self.shape, self.deck.cards(), 1).is_empty() {
                    self.stop = true;
                } else {
                    self.fill(&mut board);
                }
            }
        }
        if self.deck.is_empty() && !board.has_set() {
            self.scoop(&mut board);
            self.stop = true;
        }
    }

    /// Fill every empty slot from the deck, walking the randomized slot
    /// order; both orders reshuffle only when the whole board was empty.
    fn fill(&mut self, board: &mut Board) {
        if board.count_cards() == 0 {
            self.order.shuffle(&mut self.rng);
            self.deck.shuffle(&mut self.rng);
        }
        let mut dealt = false;
        for i in 0..self.order.len() {
            let slot = self.order[i];
            if board.card(slot).is_none() {
                if let Some(card) = self.deck.draw() {
                    board.place_card(card, slot);
                    dealt = true;
                }
            }
        }
        if dealt && self.hints {
            board.hints();
        }
    }

    /// Return every card on the board to the deck and drop all tokens.
    fn scoop(&mut self, board: &mut Board) {
        board.clear_tokens();
        for i in 0..self.order.len() {
            let slot = self.order[i];
            if let Some(card) = board.card(slot) {
                self.deck.restore(card);
                board.remove_card(slot);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::gameplay::shutdown::Trigger;
    use crate::ui::{NullUi, Shown, TapeUi};
    use crossbeam_channel::{Sender, unbounded};
    use rand::SeedableRng;
    use std::time::Duration;

    fn config() -> Config {
        Config {
            rows: 2,
            columns: 2,
            features: 2,
            values: 3,
            humans: 2,
            robots: 0,
            deal_delay: 0,
            turn_timeout: 0,
            ..Config::default()
        }
    }

    fn rig(config: &Config) -> (Arbiter, Arc<Mutex<Board>>, Sender<Triple>) {
        rig_on(config, Arc::new(NullUi))
    }

    fn rig_on(config: &Config, ui: Arc<dyn Ui>) -> (Arbiter, Arc<Mutex<Board>>, Sender<Triple>) {
        let board = Arc::new(Mutex::new(Board::new(config, ui.clone())));
        let (pending_tx, pending_rx) = unbounded();
        let arbiter = Arbiter::new(
            config,
            board.clone(),
            pending_rx,
            ui,
            SmallRng::seed_from_u64(42),
        );
        (arbiter, board, pending_tx)
    }

    #[test]
    fn replenish_fills_every_slot() {
        let config = config();
        let (mut arbiter, board, _pending) = rig(&config);
        arbiter.deal();
        assert!(board.lock().count_cards() == 4);
        assert!(arbiter.deck.len() == 5);
        assert!(!arbiter.stop);
    }

    #[test]
    fn stale_snapshot_is_voided_and_detokened() {
        let config = config();
        let (mut arbiter, board, _pending) = rig(&config);
        arbiter.deal();
        let (slots, cards) = {
            let board = board.lock();
            let slots = [0, 1, 2];
            let cards = slots.map(|s| board.card(s).unwrap());
            (slots, cards)
        };
        {
            let mut board = board.lock();
            for slot in slots {
                board.place_token(0, slot);
            }
        }
        let (triple, wait) = Triple::commit(0, slots, cards);
        board.lock().remove_card(1);
        arbiter.judge(triple);
        assert!(wait.recv() == Ok(Outcome::Voided));
        assert!(board.lock().tokens(0).is_empty());
    }

    #[test]
    fn valid_triple_clears_cards_and_everyones_tokens() {
        // single feature: the whole 3-card deck is one valid set
        let config = Config {
            rows: 1,
            columns: 3,
            features: 1,
            ..config()
        };
        let (mut arbiter, board, _pending) = rig(&config);
        arbiter.deal();
        let (slots, cards) = {
            let mut board = board.lock();
            let slots = [0, 1, 2];
            let cards = slots.map(|s| board.card(s).unwrap());
            for slot in slots {
                board.place_token(0, slot);
            }
            board.place_token(1, 0);
            (slots, cards)
        };
        let (triple, wait) = Triple::commit(0, slots, cards);
        arbiter.judge(triple);
        assert!(wait.recv() == Ok(Outcome::Valid));
        let board = board.lock();
        assert!(board.count_cards() == 0);
        assert!(board.tokens(0).is_empty());
        assert!(board.tokens(1).is_empty());
    }

    #[test]
    fn invalid_triple_keeps_cards_and_other_tokens() {
        let config = config();
        let (mut arbiter, board, _pending) = rig(&config);
        {
            // features [0,0], [1,0], [2,1]: second feature breaks the set
            let mut board = board.lock();
            board.place_card(Card::from(0u16), 0);
            board.place_card(Card::from(1u16), 1);
            board.place_card(Card::from(5u16), 2);
            for slot in [0, 1, 2] {
                board.place_token(0, slot);
            }
            board.place_token(1, 0);
        }
        let cards = [Card::from(0u16), Card::from(1u16), Card::from(5u16)];
        let (triple, wait) = Triple::commit(0, [0, 1, 2], cards);
        arbiter.judge(triple);
        assert!(wait.recv() == Ok(Outcome::Invalid));
        let board = board.lock();
        assert!(board.count_cards() == 3);
        assert!(board.tokens(0).is_empty());
        assert!(board.tokens(1) == vec![0]);
    }

    #[test]
    fn exhausted_deck_without_sets_ends_the_game() {
        let config = config();
        let (mut arbiter, board, _pending) = rig(&config);
        arbiter.deal();
        assert!(board.lock().count_cards() == 4);
        {
            let mut board = board.lock();
            for slot in 0..4 {
                board.remove_card(slot);
            }
        }
        while arbiter.deck.draw().is_some() {}
        arbiter.deal();
        assert!(board.lock().count_cards() == 0);
        assert!(arbiter.stop);
    }

    #[test]
    fn submission_order_is_resolution_order() {
        let config = Config {
            rows: 1,
            columns: 3,
            features: 1,
            ..config()
        };
        let (mut arbiter, board, pending) = rig(&config);
        arbiter.deal();
        let cards = {
            let board = board.lock();
            [0, 1, 2].map(|s| board.card(s).unwrap())
        };
        let (first, first_wait) = Triple::commit(0, [0, 1, 2], cards);
        let (second, second_wait) = Triple::commit(1, [0, 1, 2], cards);
        pending.send(first).unwrap();
        pending.send(second).unwrap();
        arbiter.pause();
        arbiter.pause();
        // the first commit wins; the second sees a changed board
        assert!(first_wait.recv() == Ok(Outcome::Valid));
        assert!(second_wait.recv() == Ok(Outcome::Voided));
    }

    #[test]
    fn external_stop_ends_the_lifecycle() {
        let config = Config {
            turn_timeout: 25,
            warning_time: 10,
            ..config()
        };
        let tape = Arc::new(TapeUi::default());
        let (mut arbiter, _board, _pending) = rig_on(&config, tape.clone());
        let (trigger, watch) = Trigger::wired();
        let stopper = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(150));
            trigger.pull();
        });
        arbiter.run(&watch);
        stopper.join().unwrap();
        // at least one lapse forced a clear and a redeal
        let events = tape.events();
        assert!(events.iter().any(|e| matches!(e, Shown::TokensCleared)));
        assert!(
            events
                .iter()
                .filter(|e| matches!(e, Shown::CardUp(..)))
                .count()
                > 4
        );
    }
}
