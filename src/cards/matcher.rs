use super::card::{Card, Shape};
use crate::SET_SIZE;

/// A triple is a valid set when, for every feature, the three cards are
/// either all equal or pairwise distinct.
pub fn is_valid_set(shape: Shape, cards: [Card; SET_SIZE]) -> bool {
    let features = cards.map(|card| shape.features_of(card));
    (0..shape.features).all(|i| {
        let (a, b, c) = (features[0][i], features[1][i], features[2][i]);
        (a == b && b == c) || (a != b && b != c && a != c)
    })
}

/// Deterministic ordered scan over 3-combinations of the given cards.
/// Stops after `limit` sets; pass 1 as an existence probe.
pub fn find_sets(shape: Shape, cards: &[Card], limit: usize) -> Vec<[Card; SET_SIZE]> {
    let mut found = Vec::new();
    for i in 0..cards.len() {
        for j in i + 1..cards.len() {
            for k in j + 1..cards.len() {
                let triple = [cards[i], cards[j], cards[k]];
                if is_valid_set(shape, triple) {
                    found.push(triple);
                    if found.len() >= limit {
                        return found;
                    }
                }
            }
        }
    }
    found
}
