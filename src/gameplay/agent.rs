use super::board::Board;
use super::config::Config;
use super::shutdown::Watch;
use super::triple::{Outcome, Triple};
use crate::ui::Ui;
use crate::{AgentId, SET_SIZE, Score, Slot};
use crossbeam_channel::{Receiver, Sender, select};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

/// One player. Runs an input-consumption loop on its own thread:
/// toggles tokens under the board lock, commits when it holds three,
/// then blocks on the arbiter's ruling before touching input again.
pub struct Agent {
    id: AgentId,
    name: String,
    board: Arc<Mutex<Board>>,
    ui: Arc<dyn Ui>,
    keys: Receiver<Slot>,
    pending: Sender<Triple>,
    score: Arc<AtomicU32>,
    watch: Watch,
    point_freeze: Duration,
    penalty_freeze: Duration,
}

impl Agent {
    pub fn new(
        config: &Config,
        id: AgentId,
        board: Arc<Mutex<Board>>,
        ui: Arc<dyn Ui>,
        keys: Receiver<Slot>,
        pending: Sender<Triple>,
        watch: Watch,
    ) -> Self {
        Self {
            id,
            name: config.name(id),
            board,
            ui,
            keys,
            pending,
            score: Arc::new(AtomicU32::new(0)),
            watch,
            point_freeze: Duration::from_millis(config.point_freeze),
            penalty_freeze: Duration::from_millis(config.penalty_freeze),
        }
    }

    /// Shared view of this agent's score, for the winner computation.
    pub fn counter(&self) -> Arc<AtomicU32> {
        self.score.clone()
    }

    pub fn score(&self) -> Score {
        self.score.load(Ordering::Relaxed)
    }

    /// Thread body. Exits when the stop signal fires or the input feed
    /// goes away.
    pub fn run(self) {
        log::debug!("{} starting", self.name);
        loop {
            select! {
                recv(self.keys) -> key => match key {
                    Ok(slot) => self.press(slot),
                    Err(_) => break,
                },
                recv(self.watch.bell()) -> _ => break,
            }
        }
        log::debug!("{} stopping", self.name);
    }

    /// Apply one selection event. Selecting a tokened slot untokens it;
    /// selecting a fresh occupied slot tokens it; anything else is
    /// silently ignored. Reaching three tokens commits.
    fn press(&self, slot: Slot) {
        let committed = {
            let mut board = self.board.lock();
            if slot >= board.slots() || board.remove_token(self.id, slot) {
                None
            } else if board.tokens(self.id).len() < SET_SIZE {
                board.place_token(self.id, slot);
                self.commit(&board)
            } else {
                None
            }
        };
        if let Some(wait) = committed {
            self.outcome(wait);
        }
    }

    /// Snapshot the triple and publish it to the arbiter. Called with
    /// the board lock held; the returned channel is waited on after the
    /// lock drops.
    fn commit(&self, board: &Board) -> Option<Receiver<Outcome>> {
        let picks = board.tokens(self.id);
        if picks.len() < SET_SIZE {
            return None;
        }
        let slots = [picks[0], picks[1], picks[2]];
        let cards = [
            board.card(slots[0])?,
            board.card(slots[1])?,
            board.card(slots[2])?,
        ];
        log::debug!("{} commits slots {:?}", self.name, slots);
        let (triple, wait) = Triple::commit(self.id, slots, cards);
        self.pending.send(triple).ok()?;
        Some(wait)
    }

    /// Park until the arbiter rules, or until shutdown.
    fn outcome(&self, wait: Receiver<Outcome>) {
        select! {
            recv(wait) -> ruling => match ruling {
                Ok(Outcome::Valid) => self.point(),
                Ok(Outcome::Invalid) => self.penalty(),
                Ok(Outcome::Voided) => log::debug!("{} triple voided", self.name),
                Err(_) => (),
            },
            recv(self.watch.bell()) -> _ => {
                // a ruling may already be on the wire; a point survives
                if let Ok(Outcome::Valid) = wait.try_recv() {
                    self.point();
                }
            },
        }
    }

    /// The award lands before the freeze, so a freeze cut short by
    /// termination never loses the point.
    fn point(&self) {
        let score = self.score.fetch_add(1, Ordering::Relaxed) + 1;
        self.ui.set_score(self.id, score);
        log::info!("{} scores, now at {}", self.name, score);
        self.freeze(self.point_freeze);
    }

    fn penalty(&self) {
        log::info!("{} penalized", self.name);
        self.freeze(self.penalty_freeze);
    }

    /// Mandatory post-resolution pause. Input keeps queueing but is not
    /// consumed. Cancellable by shutdown.
    fn freeze(&self, span: Duration) {
        if span.is_zero() {
            return;
        }
        self.ui.set_freeze(self.id, span.as_millis() as u64);
        self.watch.idle(span);
        self.ui.set_freeze(self.id, 0);
    }
}
