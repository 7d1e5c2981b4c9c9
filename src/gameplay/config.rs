use crate::AgentId;
use crate::cards::Shape;
use serde::Deserialize;

/// Read-only parameter bundle, fixed for the lifetime of a game.
/// All durations are in milliseconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Board grid height.
    pub rows: usize,
    /// Board grid width.
    pub columns: usize,
    /// Features per card.
    pub features: usize,
    /// Values per feature. Deck size is values ^ features.
    pub values: usize,
    /// Keypad-driven agents, seated first.
    pub humans: usize,
    /// Simulated agents, seated after the humans.
    pub robots: usize,
    /// Display names by seat; missing entries fall back to "agent-<id>".
    pub names: Vec<String>,
    /// Pause per card while dealing or clearing, holding the board lock.
    pub deal_delay: u64,
    /// Countdown length. 0 selects elapsed mode.
    pub turn_timeout: u64,
    /// Remaining time under which the countdown display turns urgent.
    pub warning_time: u64,
    /// Post-award freeze.
    pub point_freeze: u64,
    /// Post-penalty freeze.
    pub penalty_freeze: u64,
    /// Pause between generated robot key presses.
    pub robot_delay: u64,
    /// Log every valid set on the table after each replenish.
    pub hints: bool,
    /// Seed for deck shuffles and robot stimulus; random when absent.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 3,
            columns: 4,
            features: 4,
            values: 3,
            humans: 0,
            robots: 2,
            names: Vec::new(),
            deal_delay: 100,
            turn_timeout: 60_000,
            warning_time: 5_000,
            point_freeze: 1_000,
            penalty_freeze: 3_000,
            robot_delay: 500,
            hints: false,
            seed: None,
        }
    }
}

impl Config {
    pub fn from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn slots(&self) -> usize {
        self.rows * self.columns
    }

    pub fn agents(&self) -> usize {
        self.humans + self.robots
    }

    pub fn shape(&self) -> Shape {
        Shape {
            features: self.features,
            values: self.values,
        }
    }

    pub fn name(&self, agent: AgentId) -> String {
        self.names
            .get(agent)
            .cloned()
            .unwrap_or_else(|| format!("agent-{}", agent))
    }
}
