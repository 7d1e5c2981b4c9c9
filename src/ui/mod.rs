pub mod logger;
pub use logger::*;

pub mod sink;
pub use sink::*;

pub mod tape;
pub use tape::*;
