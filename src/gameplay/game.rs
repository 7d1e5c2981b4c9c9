use super::agent::Agent;
use super::arbiter::Arbiter;
use super::board::Board;
use super::config::Config;
use super::shutdown::{Trigger, Watch};
use crate::players::{Keypad, Robot};
use crate::ui::Ui;
use crate::{AgentId, Score};
use crossbeam_channel::unbounded;
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread::JoinHandle;

/// One seated player waiting for the game to start: the agent loop, the
/// stimulus loop for simulated seats, and the stop line for both.
struct Seat {
    agent: Agent,
    robot: Option<Robot>,
    trigger: Trigger,
    score: Arc<AtomicU32>,
}

/// Owns a whole game: builds the board, seats the agents, runs the
/// arbiter on the calling thread, and tears everything down in reverse
/// seating order before announcing the winners.
pub struct Game {
    config: Config,
    ui: Arc<dyn Ui>,
    board: Arc<Mutex<Board>>,
    arbiter: Arbiter,
    keypads: Vec<Keypad>,
    seats: Vec<Seat>,
    stop: Option<Trigger>,
    watch: Watch,
}

impl Game {
    pub fn new(config: Config, ui: Arc<dyn Ui>) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let board = Arc::new(Mutex::new(Board::new(&config, ui.clone())));
        let (pending_tx, pending_rx) = unbounded();
        let arbiter = Arbiter::new(
            &config,
            board.clone(),
            pending_rx,
            ui.clone(),
            SmallRng::seed_from_u64(seed),
        );
        let (stop, watch) = Trigger::wired();
        let mut keypads = Vec::new();
        let mut seats = Vec::new();
        for id in 0..config.agents() {
            let (keypad, feed) = Keypad::wired();
            let (trigger, agent_watch) = Trigger::wired();
            let agent = Agent::new(
                &config,
                id,
                board.clone(),
                ui.clone(),
                feed,
                pending_tx.clone(),
                agent_watch.clone(),
            );
            let robot = (id >= config.humans).then(|| {
                Robot::new(
                    &config,
                    config.name(id),
                    keypad.clone(),
                    SmallRng::seed_from_u64(seed.wrapping_add(1 + id as u64)),
                    agent_watch,
                )
            });
            seats.push(Seat {
                score: agent.counter(),
                agent,
                robot,
                trigger,
            });
            keypads.push(keypad);
        }
        Self {
            config,
            ui,
            board,
            arbiter,
            keypads,
            seats,
            stop: Some(stop),
            watch,
        }
    }

    /// Input feed for a seat. Human seats are driven through this from
    /// wherever key events come from; robot seats drive themselves.
    pub fn keypad(&self, agent: AgentId) -> Keypad {
        self.keypads[agent].clone()
    }

    /// External kill switch: pull it (or drop it) to end the game from
    /// outside. Taking it transfers responsibility for keeping it alive.
    pub fn stopper(&mut self) -> Option<Trigger> {
        self.stop.take()
    }

    /// Play to the end on the calling thread. Returns the seats tied at
    /// the top score.
    pub fn run(mut self) -> Vec<AgentId> {
        log::info!(
            "game on: {} agents, {} slots, {} cards",
            self.config.agents(),
            self.config.slots(),
            self.config.shape().deck_size(),
        );
        let mut running: Vec<(Trigger, Vec<JoinHandle<()>>)> = Vec::new();
        let mut scores: Vec<Arc<AtomicU32>> = Vec::new();
        for seat in self.seats.drain(..) {
            let mut threads = Vec::new();
            let agent = seat.agent;
            threads.push(std::thread::spawn(move || agent.run()));
            if let Some(robot) = seat.robot {
                threads.push(std::thread::spawn(move || robot.run()));
            }
            scores.push(seat.score);
            running.push((seat.trigger, threads));
        }
        self.arbiter.run(&self.watch);
        // stop seats in reverse start order, joining each before the next
        for (trigger, threads) in running.drain(..).rev() {
            trigger.pull();
            for thread in threads {
                let _ = thread.join();
            }
        }
        self.board.lock().clear_tokens();
        self.ui.set_countdown(0, false);
        let scores = scores
            .iter()
            .map(|score| score.load(Ordering::Relaxed))
            .collect::<Vec<Score>>();
        let best = scores.iter().copied().max().unwrap_or(0);
        let winners = scores
            .iter()
            .enumerate()
            .filter(|&(_, &score)| score == best)
            .map(|(id, _)| id)
            .collect::<Vec<AgentId>>();
        for (id, score) in scores.iter().enumerate() {
            log::info!("{} finished with {}", self.config.name(id), score);
        }
        self.ui.announce_winners(&winners);
        winners
    }
}
