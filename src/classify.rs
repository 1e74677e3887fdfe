use std::fmt;

use crate::cards::{Card, NUM_RANKS, NUM_SUITS};
use crate::error::{SquaresError, SquaresResult};

/// Classification of a grid line holding 0 to 5 cards. The suffix digit is
/// the number of cards present; 5-card variants are the ten canonical poker
/// ranks, sub-5-card variants keep only the hand types still reachable from
/// that many cards. "Inside straight" marks all-distinct partial lines whose
/// rank span still fits inside a single 5-rank straight window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PartialHand {
    HighCard5 = 0,
    OnePair5 = 1,
    TwoPair5 = 2,
    ThreeOfAKind5 = 3,
    Straight5 = 4,
    Flush5 = 5,
    FullHouse5 = 6,
    FourOfAKind5 = 7,
    StraightFlush5 = 8,
    RoyalFlush5 = 9,
    HighCard4 = 10,
    OnePair4 = 11,
    TwoPair4 = 12,
    ThreeOfAKind4 = 13,
    Straight4 = 14,
    Flush4 = 15,
    FourOfAKind4 = 16,
    StraightFlush4 = 17,
    RoyalFlush4 = 18,
    InsideStraight4 = 19,
    InsideStraightFlush4 = 20,
    HighCard3 = 21,
    OnePair3 = 22,
    ThreeOfAKind3 = 23,
    Straight3 = 24,
    Flush3 = 25,
    StraightFlush3 = 26,
    RoyalFlush3 = 27,
    InsideStraight3 = 28,
    InsideStraightFlush3 = 29,
    HighCard2 = 30,
    OnePair2 = 31,
    Straight2 = 32,
    Flush2 = 33,
    StraightFlush2 = 34,
    RoyalFlush2 = 35,
    InsideStraight2 = 36,
    InsideStraightFlush2 = 37,
    OneCard = 38,
    ZeroCards = 39,
}

pub const NUM_PARTIAL_HANDS: usize = 40;

pub const ALL_PARTIAL_HANDS: [PartialHand; NUM_PARTIAL_HANDS] = [
    PartialHand::HighCard5,
    PartialHand::OnePair5,
    PartialHand::TwoPair5,
    PartialHand::ThreeOfAKind5,
    PartialHand::Straight5,
    PartialHand::Flush5,
    PartialHand::FullHouse5,
    PartialHand::FourOfAKind5,
    PartialHand::StraightFlush5,
    PartialHand::RoyalFlush5,
    PartialHand::HighCard4,
    PartialHand::OnePair4,
    PartialHand::TwoPair4,
    PartialHand::ThreeOfAKind4,
    PartialHand::Straight4,
    PartialHand::Flush4,
    PartialHand::FourOfAKind4,
    PartialHand::StraightFlush4,
    PartialHand::RoyalFlush4,
    PartialHand::InsideStraight4,
    PartialHand::InsideStraightFlush4,
    PartialHand::HighCard3,
    PartialHand::OnePair3,
    PartialHand::ThreeOfAKind3,
    PartialHand::Straight3,
    PartialHand::Flush3,
    PartialHand::StraightFlush3,
    PartialHand::RoyalFlush3,
    PartialHand::InsideStraight3,
    PartialHand::InsideStraightFlush3,
    PartialHand::HighCard2,
    PartialHand::OnePair2,
    PartialHand::Straight2,
    PartialHand::Flush2,
    PartialHand::StraightFlush2,
    PartialHand::RoyalFlush2,
    PartialHand::InsideStraight2,
    PartialHand::InsideStraightFlush2,
    PartialHand::OneCard,
    PartialHand::ZeroCards,
];

impl PartialHand {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Number of cards a line must hold to be classified this way
    /// (`ZeroCards` is 0, `OneCard` is 1).
    pub fn card_count(self) -> usize {
        match self.index() {
            0..=9 => 5,
            10..=20 => 4,
            21..=29 => 3,
            30..=37 => 2,
            38 => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for PartialHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PartialHand::HighCard5 => "high card",
            PartialHand::OnePair5 => "one pair",
            PartialHand::TwoPair5 => "two pair",
            PartialHand::ThreeOfAKind5 => "three of a kind",
            PartialHand::Straight5 => "straight",
            PartialHand::Flush5 => "flush",
            PartialHand::FullHouse5 => "full house",
            PartialHand::FourOfAKind5 => "four of a kind",
            PartialHand::StraightFlush5 => "straight flush",
            PartialHand::RoyalFlush5 => "royal flush",
            PartialHand::HighCard4 => "high card 4",
            PartialHand::OnePair4 => "one pair 4",
            PartialHand::TwoPair4 => "two pair 4",
            PartialHand::ThreeOfAKind4 => "three of a kind 4",
            PartialHand::Straight4 => "straight 4",
            PartialHand::Flush4 => "flush 4",
            PartialHand::FourOfAKind4 => "four of a kind 4",
            PartialHand::StraightFlush4 => "straight flush 4",
            PartialHand::RoyalFlush4 => "royal flush 4",
            PartialHand::InsideStraight4 => "inside straight 4",
            PartialHand::InsideStraightFlush4 => "inside straight flush 4",
            PartialHand::HighCard3 => "high card 3",
            PartialHand::OnePair3 => "one pair 3",
            PartialHand::ThreeOfAKind3 => "three of a kind 3",
            PartialHand::Straight3 => "straight 3",
            PartialHand::Flush3 => "flush 3",
            PartialHand::StraightFlush3 => "straight flush 3",
            PartialHand::RoyalFlush3 => "royal flush 3",
            PartialHand::InsideStraight3 => "inside straight 3",
            PartialHand::InsideStraightFlush3 => "inside straight flush 3",
            PartialHand::HighCard2 => "high card 2",
            PartialHand::OnePair2 => "one pair 2",
            PartialHand::Straight2 => "straight 2",
            PartialHand::Flush2 => "flush 2",
            PartialHand::StraightFlush2 => "straight flush 2",
            PartialHand::RoyalFlush2 => "royal flush 2",
            PartialHand::InsideStraight2 => "inside straight 2",
            PartialHand::InsideStraightFlush2 => "inside straight flush 2",
            PartialHand::OneCard => "one card",
            PartialHand::ZeroCards => "zero cards",
        };
        write!(f, "{}", name)
    }
}

/// Shape features of the occupied slots of a line, shared by every
/// card-count branch of the classifier.
struct LineShape {
    n: usize,
    max_of_a_kind: usize,
    pairs: usize,
    trips: usize,
    flush: bool,
    straight: bool,
    royal: bool,
    inside_straight: bool,
}

fn line_shape(line: &[Option<Card>]) -> LineShape {
    let mut rank_counts = [0usize; NUM_RANKS];
    let mut suit_counts = [0usize; NUM_SUITS];
    let mut n = 0;
    for card in line.iter().flatten() {
        rank_counts[card.rank.low_index()] += 1;
        suit_counts[card.suit.index()] += 1;
        n += 1;
    }

    let max_of_a_kind = rank_counts.iter().copied().max().unwrap_or(0);
    let pairs = rank_counts.iter().filter(|&&c| c == 2).count();
    let trips = rank_counts.iter().filter(|&&c| c == 3).count();
    let flush = n >= 1 && suit_counts.iter().any(|&c| c == n);

    // Rank index 0 is the ace, so the wheel is a contiguous run; the only
    // wrap case is a top-end run ending at the king and completed by the ace.
    let mut straight = false;
    let mut royal = false;
    let mut inside_straight = false;
    if n >= 1 && max_of_a_kind == 1 {
        let lo = rank_counts.iter().position(|&c| c == 1).unwrap_or(0);
        let hi = rank_counts.iter().rposition(|&c| c == 1).unwrap_or(0);
        straight = hi - lo == n - 1;
        if !straight && rank_counts[0] == 1 {
            // ace high: the remaining n-1 ranks must be the top n-1
            straight = (NUM_RANKS - (n - 1)..NUM_RANKS).all(|r| rank_counts[r] == 1);
        }
        royal = (1..9).all(|r| rank_counts[r] == 0);
        // a royal subset always fits the ace-high T-J-Q-K-A window, which the
        // ace-low span misses
        inside_straight = hi - lo <= 4 || royal;
    }

    LineShape {
        n,
        max_of_a_kind,
        pairs,
        trips,
        flush,
        straight,
        royal,
        inside_straight,
    }
}

/// Classify a 5-slot line holding between 0 and 5 cards.
///
/// Pure and deterministic. Returns an error only when the slice itself is
/// malformed (more than 5 slots), which is a caller bug.
pub fn classify(line: &[Option<Card>]) -> SquaresResult<PartialHand> {
    if line.len() > 5 {
        return Err(SquaresError::OversizedHand(line.len()));
    }
    let shape = line_shape(line);
    Ok(match shape.n {
        0 => PartialHand::ZeroCards,
        1 => PartialHand::OneCard,
        2 => classify2(&shape),
        3 => classify3(&shape),
        4 => classify4(&shape),
        _ => classify5(&shape),
    })
}

fn classify5(s: &LineShape) -> PartialHand {
    if s.flush && s.royal && s.straight {
        return PartialHand::RoyalFlush5;
    }
    if s.flush && s.straight {
        return PartialHand::StraightFlush5;
    }
    if s.max_of_a_kind == 4 {
        return PartialHand::FourOfAKind5;
    }
    if s.trips == 1 && s.pairs == 1 {
        return PartialHand::FullHouse5;
    }
    if s.flush {
        return PartialHand::Flush5;
    }
    if s.straight {
        return PartialHand::Straight5;
    }
    if s.max_of_a_kind == 3 {
        return PartialHand::ThreeOfAKind5;
    }
    if s.pairs == 2 {
        return PartialHand::TwoPair5;
    }
    if s.pairs == 1 {
        return PartialHand::OnePair5;
    }
    PartialHand::HighCard5
}

fn classify4(s: &LineShape) -> PartialHand {
    if s.flush {
        if s.royal {
            return PartialHand::RoyalFlush4;
        }
        if s.straight {
            return PartialHand::StraightFlush4;
        }
        if s.inside_straight {
            return PartialHand::InsideStraightFlush4;
        }
    }
    if s.max_of_a_kind == 4 {
        return PartialHand::FourOfAKind4;
    }
    if s.flush {
        return PartialHand::Flush4;
    }
    if s.straight {
        return PartialHand::Straight4;
    }
    if s.inside_straight {
        return PartialHand::InsideStraight4;
    }
    if s.max_of_a_kind == 3 {
        return PartialHand::ThreeOfAKind4;
    }
    if s.pairs == 2 {
        return PartialHand::TwoPair4;
    }
    if s.pairs == 1 {
        return PartialHand::OnePair4;
    }
    PartialHand::HighCard4
}

fn classify3(s: &LineShape) -> PartialHand {
    if s.flush {
        if s.royal {
            return PartialHand::RoyalFlush3;
        }
        if s.straight {
            return PartialHand::StraightFlush3;
        }
        if s.inside_straight {
            return PartialHand::InsideStraightFlush3;
        }
        return PartialHand::Flush3;
    }
    if s.straight {
        return PartialHand::Straight3;
    }
    if s.inside_straight {
        return PartialHand::InsideStraight3;
    }
    if s.max_of_a_kind == 3 {
        return PartialHand::ThreeOfAKind3;
    }
    if s.pairs == 1 {
        return PartialHand::OnePair3;
    }
    PartialHand::HighCard3
}

fn classify2(s: &LineShape) -> PartialHand {
    if s.flush {
        if s.royal {
            return PartialHand::RoyalFlush2;
        }
        if s.straight {
            return PartialHand::StraightFlush2;
        }
        if s.inside_straight {
            return PartialHand::InsideStraightFlush2;
        }
        return PartialHand::Flush2;
    }
    if s.straight {
        return PartialHand::Straight2;
    }
    if s.inside_straight {
        return PartialHand::InsideStraight2;
    }
    if s.pairs == 1 {
        return PartialHand::OnePair2;
    }
    PartialHand::HighCard2
}
