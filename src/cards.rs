use std::fmt;

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{SquaresError, SquaresResult};

pub const NUM_RANKS: usize = 13;
pub const NUM_SUITS: usize = 4;
pub const NUM_CARDS: usize = NUM_RANKS * NUM_SUITS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    pub fn from_char(c: char) -> SquaresResult<Rank> {
        match c {
            '2' => Ok(Rank::Two),
            '3' => Ok(Rank::Three),
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            '8' => Ok(Rank::Eight),
            '9' => Ok(Rank::Nine),
            'T' => Ok(Rank::Ten),
            'J' => Ok(Rank::Jack),
            'Q' => Ok(Rank::Queen),
            'K' => Ok(Rank::King),
            'A' => Ok(Rank::Ace),
            _ => Err(SquaresError::InvalidRank(c)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    /// Ace-low rank index in `0..13`: A=0, 2=1, ..., K=12. The partial-hand
    /// classifier indexes its rank histogram this way so that the wheel
    /// (A-2-3-4-5) is a contiguous run.
    pub fn low_index(self) -> usize {
        match self {
            Rank::Ace => 0,
            r => r.value() as usize - 1,
        }
    }
}

pub const ALL_RANKS: [Rank; NUM_RANKS] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub fn from_char(c: char) -> SquaresResult<Suit> {
        match c.to_ascii_lowercase() {
            's' => Ok(Suit::Spades),
            'h' => Ok(Suit::Hearts),
            'd' => Ok(Suit::Diamonds),
            'c' => Ok(Suit::Clubs),
            _ => Err(SquaresError::InvalidSuit(c)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "\u{2660}",
            Suit::Hearts => "\u{2665}",
            Suit::Diamonds => "\u{2666}",
            Suit::Clubs => "\u{2663}",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Suit::Spades => 0,
            Suit::Hearts => 1,
            Suit::Diamonds => 2,
            Suit::Clubs => 3,
        }
    }
}

pub const ALL_SUITS: [Suit; NUM_SUITS] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    pub fn value(&self) -> u8 {
        self.rank.value()
    }

    /// Bijection onto `0..52`, used as the key of the deal-order reverse
    /// index in `PlayState`.
    pub fn deck_index(&self) -> usize {
        self.suit.index() * NUM_RANKS + self.rank.low_index()
    }

    pub fn pretty(&self) -> String {
        format!("{}{}", self.rank.to_char(), self.suit.symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

/// All 52 cards in deck-index order.
pub fn full_deck() -> [Card; NUM_CARDS] {
    let mut deck = [Card::new(Rank::Two, Suit::Spades); NUM_CARDS];
    for (i, (s, r)) in ALL_SUITS
        .iter()
        .cartesian_product(ALL_RANKS.iter())
        .enumerate()
    {
        deck[i] = Card::new(*r, *s);
    }
    deck.sort_by_key(|c| c.deck_index());
    deck
}

/// A shuffled dealing order for one real game.
pub fn shuffled_deck<R: Rng>(rng: &mut R) -> Vec<Card> {
    let mut deck: Vec<Card> = full_deck().to_vec();
    deck.shuffle(rng);
    deck
}

pub fn parse_card(notation: &str) -> SquaresResult<Card> {
    let notation = notation.trim();
    let chars: Vec<char> = notation.chars().collect();
    if chars.len() != 2 {
        return Err(SquaresError::InvalidCardNotation(notation.to_string()));
    }
    let rank = Rank::from_char(chars[0].to_ascii_uppercase())?;
    let suit = Suit::from_char(chars[1])?;
    Ok(Card::new(rank, suit))
}

/// Parse a (possibly partial) 5-slot line such as "As Kd -- -- --".
/// "--" marks an unfilled cell. Fewer than 5 tokens leaves the trailing
/// slots empty.
pub fn parse_line(notation: &str) -> SquaresResult<[Option<Card>; 5]> {
    let tokens: Vec<&str> = notation.split_whitespace().collect();
    if tokens.len() > 5 {
        return Err(SquaresError::InvalidHandNotation(notation.to_string()));
    }
    let mut line = [None; 5];
    for (i, tok) in tokens.iter().enumerate() {
        if *tok != "--" && *tok != "__" {
            line[i] = Some(parse_card(tok)?);
        }
    }
    Ok(line)
}
