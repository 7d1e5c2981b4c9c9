//! Concurrent engine for the feature-matching card game.
//!
//! A shared board of grid slots holds cards; one thread per agent toggles
//! selection tokens and commits candidate triples; a single arbiter thread
//! validates triples, replenishes the board from the deck, and drives the
//! countdown lifecycle until the game runs out of valid sets.

pub mod cards;
pub mod gameplay;
pub mod players;
pub mod ui;

/// Grid position on the board.
pub type Slot = usize;
/// Seat index, assigned in join order starting from 0.
pub type AgentId = usize;
/// Accumulated points for one agent.
pub type Score = u32;

/// Number of cards in a candidate set.
pub const SET_SIZE: usize = 3;

/// Initialize terminal logging. Call once from the binary.
pub fn log() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .expect("initialize logger");
}
