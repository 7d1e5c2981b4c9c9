use super::card::{Card, Shape};
use rand::Rng;
use rand::seq::SliceRandom;

/// Ordered pile of undealt cards, owned exclusively by the arbiter.
/// Shrinks as cards are dealt; grows again when board clears return them.
#[derive(Debug, Clone)]
pub struct Deck(Vec<Card>);

impl Deck {
    /// One card per feature vector.
    pub fn full(shape: Shape) -> Self {
        Self((0..shape.deck_size()).map(|n| Card::from(n as u16)).collect())
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.0.shuffle(rng);
    }

    /// Deal the next card, if any remain.
    pub fn draw(&mut self) -> Option<Card> {
        self.0.pop()
    }

    /// Return a cleared card to the pile.
    pub fn restore(&mut self, card: Card) {
        self.0.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
