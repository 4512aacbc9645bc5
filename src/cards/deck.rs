//! Canonical deck composition and shuffling.

use super::card::{Card, CardId, Color, Face};
use crate::core::rng::GameRng;

/// Number of cards in the canonical deck.
pub const DECK_SIZE: usize = 108;

/// Copies of each wild-family face.
const WILDS_PER_FACE: usize = 4;

/// Build the fixed 108-card multiset in deterministic order.
///
/// Per color: one "0", two each of "1".."9", two each of skip, reverse and
/// draw two. Then four wilds and four wild draw fours. Identifiers run from
/// 0 to 107 in construction order.
#[must_use]
pub fn build_canonical_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    let mut next_id = 0u32;
    let mut push = |cards: &mut Vec<Card>, color: Option<Color>, face: Face| {
        cards.push(Card {
            id: CardId::new(next_id),
            color,
            face,
        });
        next_id += 1;
    };

    for color in Color::ALL {
        push(&mut cards, Some(color), Face::Number(0));
        for n in 1..=9 {
            push(&mut cards, Some(color), Face::Number(n));
            push(&mut cards, Some(color), Face::Number(n));
        }
        for face in [Face::Skip, Face::Reverse, Face::DrawTwo] {
            push(&mut cards, Some(color), face);
            push(&mut cards, Some(color), face);
        }
    }

    for face in [Face::Wild, Face::WildDrawFour] {
        for _ in 0..WILDS_PER_FACE {
            push(&mut cards, None, face);
        }
    }

    debug_assert_eq!(cards.len(), DECK_SIZE);
    cards
}

/// Fisher-Yates shuffle driven by the game RNG.
///
/// Walks from the last slot down, swapping each slot with a uniformly chosen
/// slot at or below it, so every permutation is equally likely.
pub fn shuffle<T>(items: &mut [T], rng: &mut GameRng) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range_usize(0..i + 1);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_canonical_composition() {
        let deck = build_canonical_deck();
        assert_eq!(deck.len(), DECK_SIZE);

        let count = |pred: &dyn Fn(&Card) -> bool| deck.iter().filter(|c| pred(c)).count();

        for color in Color::ALL {
            assert_eq!(count(&|c| c.color == Some(color)), 25);
            assert_eq!(count(&|c| c.color == Some(color) && c.face == Face::Number(0)), 1);
            for n in 1..=9 {
                assert_eq!(count(&|c| c.color == Some(color) && c.face == Face::Number(n)), 2);
            }
            for face in [Face::Skip, Face::Reverse, Face::DrawTwo] {
                assert_eq!(count(&|c| c.color == Some(color) && c.face == face), 2);
            }
        }

        assert_eq!(count(&|c| c.face == Face::Wild && c.color.is_none()), 4);
        assert_eq!(count(&|c| c.face == Face::WildDrawFour && c.color.is_none()), 4);
    }

    #[test]
    fn test_canonical_ids_unique() {
        let deck = build_canonical_deck();
        let ids: FxHashSet<_> = deck.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), DECK_SIZE);
        assert!(deck.iter().all(|c| (c.id.raw() as usize) < DECK_SIZE));
    }

    #[test]
    fn test_canonical_is_deterministic() {
        assert_eq!(build_canonical_deck(), build_canonical_deck());
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = GameRng::new(42);
        let mut data: Vec<u32> = (0..20).collect();

        shuffle(&mut data, &mut rng);
        assert_ne!(data, (0..20).collect::<Vec<_>>());

        data.sort_unstable();
        assert_eq!(data, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_deterministic() {
        let mut a: Vec<u32> = (0..50).collect();
        let mut b = a.clone();

        shuffle(&mut a, &mut GameRng::new(7));
        shuffle(&mut b, &mut GameRng::new(7));

        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_roughly_uniform() {
        // All 6 orderings of 3 elements should show up with similar frequency.
        let mut rng = GameRng::new(1234);
        let mut counts = rustc_hash::FxHashMap::default();
        let trials = 6000;

        for _ in 0..trials {
            let mut items = [0u8, 1, 2];
            shuffle(&mut items, &mut rng);
            *counts.entry(items).or_insert(0u32) += 1;
        }

        assert_eq!(counts.len(), 6);
        for (_, &n) in counts.iter() {
            assert!((800..1200).contains(&n), "skewed permutation count {n}");
        }
    }

    #[test]
    fn test_shuffle_trivial_slices() {
        let mut rng = GameRng::new(1);
        let mut empty: Vec<u8> = vec![];
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut one = vec![9];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, vec![9]);
    }
}
