pub mod agent;
pub use agent::*;

pub mod arbiter;
pub use arbiter::*;

pub mod board;
pub use board::*;

pub mod config;
pub use config::*;

pub mod countdown;
pub use countdown::*;

pub mod game;
pub use game::*;

pub mod shutdown;
pub use shutdown::*;

pub mod triple;
pub use triple::*;
