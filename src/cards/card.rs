/// Deck geometry: how many features a card carries and how many values
/// each feature can take. The deck holds one card per feature vector,
/// so its size is values ^ features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub features: usize,
    pub values: usize,
}

impl Shape {
    pub fn deck_size(&self) -> usize {
        self.values.pow(self.features as u32)
    }

    /// Decode a card id into its feature vector, lowest feature first.
    pub fn features_of(&self, card: Card) -> Vec<u8> {
        let mut id = usize::from(card);
        let mut features = Vec::with_capacity(self.features);
        for _ in 0..self.features {
            features.push((id % self.values) as u8);
            id /= self.values;
        }
        features
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self {
            features: 4,
            values: 3,
        }
    }
}

/// u16 isomorphism
/// a card IS its id: the mixed-radix encoding of its feature vector
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card(u16);

impl From<u16> for Card {
    fn from(n: u16) -> Self {
        Self(n)
    }
}
impl From<Card> for u16 {
    fn from(c: Card) -> u16 {
        c.0
    }
}
impl From<Card> for usize {
    fn from(c: Card) -> usize {
        c.0 as usize
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "#{:02}", self.0)
    }
}

use std::fmt::{Display, Formatter, Result};
