//! Hand ranking consumed at showdown.
//!
//! The engine only needs a total order over hands with explicit ties; the
//! [`HandRanker`] trait is that seam and [`StandardRanker`] the built-in
//! Texas Hold'em implementation.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, Suit};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

/// Strength of the best five-card hand. Field order makes the derived
/// ordering compare category first, then kickers high to low.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    pub kickers: [u8; 5],
}

/// Ranks hands of five to seven cards.
pub trait HandRanker {
    fn evaluate(&self, cards: &[Card]) -> HandStrength;

    fn compare(&self, a: &[Card], b: &[Card]) -> Ordering {
        self.evaluate(a).cmp(&self.evaluate(b))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRanker;

impl HandRanker for StandardRanker {
    fn evaluate(&self, cards: &[Card]) -> HandStrength {
        evaluate_hand(cards)
    }
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    a.cmp(b)
}

/// Best five-card strength among `cards` (5 to 7 cards expected).
pub fn evaluate_hand(cards: &[Card]) -> HandStrength {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut rank_mask: u16 = 0;
    let mut suit_masks = [0u16; 4];
    let mut suit_counts = [0u8; 4];
    for &c in cards {
        let r = rank_val(c.rank);
        let s = suit_index(c.suit);
        rank_counts[r as usize] += 1;
        rank_mask |= 1 << r;
        suit_masks[s] |= 1 << r;
        suit_counts[s] += 1;
    }

    let flush_suit = suit_counts.iter().position(|&n| n >= 5);

    if let Some(s) = flush_suit {
        if let Some(high) = straight_high_from_mask(suit_masks[s]) {
            return strength(Category::StraightFlush, &[high]);
        }
    }

    if let Some(quad) = highest_with_count(&rank_counts, 4) {
        let kicker = ranks_desc(&rank_counts)
            .into_iter()
            .find(|&r| r != quad)
            .unwrap_or(0);
        return strength(Category::FourOfAKind, &[quad, kicker]);
    }

    if let Some((trip, pair)) = detect_full_house(&rank_counts) {
        return strength(Category::FullHouse, &[trip, pair]);
    }

    if let Some(s) = flush_suit {
        let ranks: Vec<u8> = (2..=14u8).rev().filter(|r| suit_masks[s] & (1 << r) != 0).collect();
        return strength(Category::Flush, &ranks[..5]);
    }

    if let Some(high) = straight_high_from_mask(rank_mask) {
        return strength(Category::Straight, &[high]);
    }

    let (trips, pairs) = multiples(&rank_counts);
    if let Some(&t) = trips.first() {
        let rest = kickers_excluding(&rank_counts, &[t], 2);
        return strength(Category::ThreeOfAKind, &leading(&[t], rest));
    }
    if pairs.len() >= 2 {
        let (high, low) = (pairs[0], pairs[1]);
        // a third pair may still play as the kicker
        let rest = kickers_excluding(&rank_counts, &[high, low], 1);
        return strength(Category::TwoPair, &leading(&[high, low], rest));
    }
    if let Some(&p) = pairs.first() {
        let rest = kickers_excluding(&rank_counts, &[p], 3);
        return strength(Category::OnePair, &leading(&[p], rest));
    }

    strength(Category::HighCard, &kickers_excluding(&rank_counts, &[], 5))
}

fn strength(category: Category, ranks: &[u8]) -> HandStrength {
    let mut kickers = [0u8; 5];
    for (slot, &r) in kickers.iter_mut().zip(ranks) {
        *slot = r;
    }
    HandStrength { category, kickers }
}

fn leading(lead: &[u8], rest: Vec<u8>) -> Vec<u8> {
    let mut ranks = lead.to_vec();
    ranks.extend(rest);
    ranks
}

fn rank_val(r: Rank) -> u8 {
    r as u8
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    let mut m = mask;
    // ace plays low in the wheel
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    for high in (5..=14u8).rev() {
        let window = 0b11111u16 << (high - 4);
        if (m & window) == window {
            return Some(high);
        }
    }
    None
}

fn ranks_desc(rank_counts: &[u8; 15]) -> Vec<u8> {
    (2..=14u8).rev().filter(|&r| rank_counts[r as usize] > 0).collect()
}

fn highest_with_count(rank_counts: &[u8; 15], count: u8) -> Option<u8> {
    (2..=14u8).rev().find(|&r| rank_counts[r as usize] == count)
}

fn detect_full_house(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let (trips, pairs) = multiples(rank_counts);
    let trip = *trips.first()?;
    let pair = trips.get(1).copied().into_iter().chain(pairs.first().copied()).max()?;
    Some((trip, pair))
}

/// Trip and pair ranks, each ordered high to low.
fn multiples(rank_counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>) {
    let mut trips = vec![];
    let mut pairs = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            _ => {}
        }
    }
    (trips, pairs)
}

fn kickers_excluding(rank_counts: &[u8; 15], used: &[u8], n: usize) -> Vec<u8> {
    ranks_desc(rank_counts)
        .into_iter()
        .filter(|r| !used.contains(r))
        .take(n)
        .collect()
}
