use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use squares_cli::cards::{full_deck, parse_line, Card};
use squares_cli::classify::{classify, PartialHand};

fn line_of(notation: &str) -> [Option<Card>; 5] {
    parse_line(notation).unwrap()
}

fn hand_of(notation: &str) -> PartialHand {
    classify(&line_of(notation)).unwrap()
}

/// Independent straightforward 5-card evaluator, kept deliberately different
/// in structure from the production classifier. Returns the canonical hand
/// rank ordinal 0 (high card) .. 9 (royal flush).
fn reference_rank(cards: &[Card]) -> usize {
    assert_eq!(cards.len(), 5);
    let mut values: Vec<u8> = cards.iter().map(|c| c.value()).collect();
    values.sort_unstable();
    let flush = cards.iter().all(|c| c.suit == cards[0].suit);

    let mut counts: Vec<usize> = Vec::new();
    let mut i = 0;
    while i < 5 {
        let mut run = 1;
        while i + run < 5 && values[i + run] == values[i] {
            run += 1;
        }
        counts.push(run);
        i += run;
    }
    counts.sort_unstable();

    let distinct = counts.len() == 5;
    let wheel = values == [2, 3, 4, 5, 14];
    let straight = distinct && (values[4] - values[0] == 4 || wheel);
    let royal = straight && values[0] == 10;

    match (flush, straight) {
        (true, true) if royal => 9,
        (true, true) => 8,
        _ if counts == [1, 4] => 7,
        _ if counts == [2, 3] => 6,
        (true, _) => 5,
        (_, true) => 4,
        _ if counts == [1, 1, 3] => 3,
        _ if counts == [1, 2, 2] => 2,
        _ if counts == [1, 1, 1, 2] => 1,
        _ => 0,
    }
}

#[test]
fn test_agrees_with_reference_on_random_hands() {
    let deck = full_deck();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50_000 {
        let cards: Vec<Card> = deck.choose_multiple(&mut rng, 5).copied().collect();
        let line = [
            Some(cards[0]),
            Some(cards[1]),
            Some(cards[2]),
            Some(cards[3]),
            Some(cards[4]),
        ];
        let got = classify(&line).unwrap().index();
        let want = reference_rank(&cards);
        assert_eq!(got, want, "disagreement on {:?}", cards);
    }
}

#[test]
fn test_empty_and_single() {
    assert_eq!(hand_of(""), PartialHand::ZeroCards);
    assert_eq!(hand_of("7h"), PartialHand::OneCard);
}

#[test]
fn test_five_card_categories() {
    assert_eq!(hand_of("As Ks Qs Js Ts"), PartialHand::RoyalFlush5);
    assert_eq!(hand_of("9s Ks Qs Js Ts"), PartialHand::StraightFlush5);
    assert_eq!(hand_of("9s 9d 9h 9c Ts"), PartialHand::FourOfAKind5);
    assert_eq!(hand_of("9s 9d 9h Tc Ts"), PartialHand::FullHouse5);
    assert_eq!(hand_of("2s 7s Qs Js Ts"), PartialHand::Flush5);
    assert_eq!(hand_of("9s Kd Qh Jc Ts"), PartialHand::Straight5);
    assert_eq!(hand_of("9s 9d 9h Jc Ts"), PartialHand::ThreeOfAKind5);
    assert_eq!(hand_of("9s 9d Jh Jc Ts"), PartialHand::TwoPair5);
    assert_eq!(hand_of("9s 9d 2h Jc Ts"), PartialHand::OnePair5);
    assert_eq!(hand_of("9s 3d 2h Jc Ts"), PartialHand::HighCard5);
}

#[test]
fn test_wheel_is_a_straight() {
    assert_eq!(hand_of("As 2d 3h 4c 5s"), PartialHand::Straight5);
    assert_eq!(hand_of("As 2s 3s 4s 5s"), PartialHand::StraightFlush5);
}

#[test]
fn test_offsuit_royal_ranks_is_a_plain_straight() {
    assert_eq!(hand_of("Ah Ks Qs Js Ts"), PartialHand::Straight5);
}

#[test]
fn test_ace_king_is_top_end_straight_not_inside() {
    // ace completes the top-end run; never an inside straight
    assert_eq!(hand_of("Ah Ks"), PartialHand::Straight2);
    assert_eq!(hand_of("As Ks"), PartialHand::StraightFlush2);
    assert_eq!(hand_of("Ah Ks Qd"), PartialHand::Straight3);
    assert_eq!(hand_of("Ah Ks Qd Jc"), PartialHand::Straight4);
}

#[test]
fn test_ace_low_runs() {
    assert_eq!(hand_of("Ah 2s"), PartialHand::Straight2);
    assert_eq!(hand_of("Ah 3s"), PartialHand::InsideStraight2);
}

#[test]
fn test_two_card_categories() {
    assert_eq!(hand_of("7h 7s"), PartialHand::OnePair2);
    assert_eq!(hand_of("7h 8s"), PartialHand::Straight2);
    assert_eq!(hand_of("7h 9s"), PartialHand::InsideStraight2);
    assert_eq!(hand_of("7h 2h"), PartialHand::Flush2);
    assert_eq!(hand_of("7h 8h"), PartialHand::StraightFlush2);
    assert_eq!(hand_of("7h Th"), PartialHand::InsideStraightFlush2);
    assert_eq!(hand_of("Th Jh"), PartialHand::RoyalFlush2);
    assert_eq!(hand_of("Th Ah"), PartialHand::RoyalFlush2);
    assert_eq!(hand_of("2h Jd"), PartialHand::HighCard2);
}

#[test]
fn test_three_card_categories() {
    assert_eq!(hand_of("7h 7s 7d"), PartialHand::ThreeOfAKind3);
    assert_eq!(hand_of("7h 7s 2d"), PartialHand::OnePair3);
    assert_eq!(hand_of("6h 7s 8d"), PartialHand::Straight3);
    assert_eq!(hand_of("5h 7s 8d"), PartialHand::InsideStraight3);
    assert_eq!(hand_of("2h 7h Kh"), PartialHand::Flush3);
    assert_eq!(hand_of("6h 7h 8h"), PartialHand::StraightFlush3);
    assert_eq!(hand_of("5h 7h 8h"), PartialHand::InsideStraightFlush3);
    assert_eq!(hand_of("Th Jh Ah"), PartialHand::RoyalFlush3);
    assert_eq!(hand_of("2h 8d Kc"), PartialHand::HighCard3);
}

#[test]
fn test_four_card_categories() {
    assert_eq!(hand_of("7h 7s 7d 7c"), PartialHand::FourOfAKind4);
    assert_eq!(hand_of("7h 7s 7d 2c"), PartialHand::ThreeOfAKind4);
    assert_eq!(hand_of("7h 7s 2d 2c"), PartialHand::TwoPair4);
    assert_eq!(hand_of("7h 7s 2d 3c"), PartialHand::OnePair4);
    assert_eq!(hand_of("5h 6s 7d 8c"), PartialHand::Straight4);
    assert_eq!(hand_of("5h 6s 7d 9c"), PartialHand::InsideStraight4);
    assert_eq!(hand_of("5h 6h 8h 9h"), PartialHand::InsideStraightFlush4);
    assert_eq!(hand_of("2h 6h 7h Kh"), PartialHand::Flush4);
    assert_eq!(hand_of("5h 6h 7h 8h"), PartialHand::StraightFlush4);
    assert_eq!(hand_of("Th Jh Qh Ah"), PartialHand::RoyalFlush4);
    assert_eq!(hand_of("2h 6s 7d Kc"), PartialHand::HighCard4);
}

#[test]
fn test_four_of_a_kind_beats_flush_reading() {
    // quads cannot coexist with a 4-card flush; precedence keeps quads
    // above flush for the shapes that can share features
    assert_eq!(hand_of("5h 6h 7h 9h"), PartialHand::InsideStraightFlush4);
}

#[test]
fn test_ace_high_window_is_inside_straight() {
    // the ace-low span overshoots, but T-J-Q-K-A still covers these
    assert_eq!(hand_of("Ah Qs"), PartialHand::InsideStraight2);
    assert_eq!(hand_of("Ah Js Kd"), PartialHand::InsideStraight3);
    assert_eq!(hand_of("Ah Ts Jd Kc"), PartialHand::InsideStraight4);
}

#[test]
fn test_span_gap_boundary() {
    // span of exactly 4 still fits a straight window; 5 does not
    assert_eq!(hand_of("5h 9s"), PartialHand::InsideStraight2);
    assert_eq!(hand_of("5h Ts"), PartialHand::HighCard2);
}

#[test]
fn test_oversized_line_rejected() {
    let cards: Vec<Option<Card>> = full_deck()[..6].iter().map(|&c| Some(c)).collect();
    assert!(classify(&cards).is_err());
}

#[test]
fn test_classify_is_pure() {
    let line = line_of("As Ks -- -- --");
    let a = classify(&line).unwrap();
    let b = classify(&line).unwrap();
    assert_eq!(a, b);
}
