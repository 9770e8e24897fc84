use pairmatch_core::{
    CardFace, CardVisual, Event, EventBus, FlipOutcome, GameConfig, GridRule, IgnoreReason,
    JokerRule, JokerTag, Outcome, Resolution, Round, RoundError, Viewport,
};
use std::time::Duration;

const J1: CardFace = CardFace::Joker(JokerTag::One);
const J2: CardFace = CardFace::Joker(JokerTag::Two);

fn n(value: u8) -> CardFace {
    CardFace::Number(value)
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn viewport() -> Viewport {
    Viewport::new(800.0, 600.0)
}

fn example_round() -> (Round, EventBus) {
    let mut faces = vec![n(3), n(3), n(7), n(7), J1, J1, J2, J2];
    for value in 10..30 {
        faces.push(n(value));
        faces.push(n(value));
    }
    let mut events = EventBus::default();
    let round =
        Round::with_faces(GameConfig::default(), viewport(), faces, &mut events).expect("deal");
    (round, events)
}

fn small_config(pairs: u32, lives: u32) -> GameConfig {
    GameConfig {
        grid: GridRule { cols: 3, rows: 2 },
        pairs,
        jokers: vec![JokerRule {
            tag: JokerTag::One,
            copies: 2,
        }],
        lives,
        ..GameConfig::default()
    }
}

fn pick(round: &mut Round, events: &mut EventBus, a: usize, b: usize) -> Option<Resolution> {
    round.flip(a, ms(0), events).expect("flip a");
    round.flip(b, ms(0), events).expect("flip b");
    round.tick(ms(1000), events)
}

#[test]
fn matching_numbers_score_and_leave_the_grid() {
    let (mut round, mut events) = example_round();
    assert_eq!(round.flip(0, ms(0), &mut events), Ok(FlipOutcome::Selected(0)));
    assert_eq!(
        round.flip(1, ms(10), &mut events),
        Ok(FlipOutcome::MatchScheduled {
            first: 0,
            second: 1,
            due: ms(1010)
        })
    );
    assert!(round.state().input_locked());
    assert_eq!(round.tick(ms(1010), &mut events), Some(Resolution::Matched(n(3))));
    assert_eq!(round.state().pairs_found, 1);
    assert_eq!(round.state().lives, 3);
    assert_eq!(round.card(0).map(|c| c.visual()), Some(CardVisual::Removed));
    assert_eq!(round.card(1).map(|c| c.visual()), Some(CardVisual::Removed));
    assert!(!round.state().input_locked());
    assert_eq!(round.state().first, None);
    assert_eq!(round.state().second, None);
}

#[test]
fn mismatch_flips_both_back_without_scoring() {
    let (mut round, mut events) = example_round();
    assert_eq!(pick(&mut round, &mut events, 0, 2), Some(Resolution::Mismatch));
    assert_eq!(round.card(0).map(|c| c.visual()), Some(CardVisual::FaceDown));
    assert_eq!(round.card(2).map(|c| c.visual()), Some(CardVisual::FaceDown));
    assert_eq!(round.state().pairs_found, 0);
    assert_eq!(round.state().lives, 3);
    assert!(!round.state().input_locked());
    let drained: Vec<_> = events.drain().collect();
    assert!(drained.contains(&Event::Mismatch {
        first: 0,
        second: 2
    }));
}

#[test]
fn joker_pair_costs_a_life() {
    let (mut round, mut events) = example_round();
    assert_eq!(
        pick(&mut round, &mut events, 4, 5),
        Some(Resolution::JokerHit(JokerTag::One))
    );
    assert_eq!(round.state().lives, 2);
    assert_eq!(round.state().pairs_found, 0);
    assert_eq!(round.card(4).map(|c| c.visual()), Some(CardVisual::Removed));
    assert_eq!(round.state().outcome, Outcome::InProgress);
}

#[test]
fn mixed_jokers_are_a_plain_mismatch() {
    let (mut round, mut events) = example_round();
    assert_eq!(pick(&mut round, &mut events, 4, 6), Some(Resolution::Mismatch));
    assert_eq!(round.state().lives, 3);
}

#[test]
fn input_is_locked_while_a_comparison_is_pending() {
    let (mut round, mut events) = example_round();
    round.flip(0, ms(0), &mut events).expect("flip");
    round.flip(2, ms(0), &mut events).expect("flip");
    assert_eq!(
        round.flip(3, ms(500), &mut events),
        Ok(FlipOutcome::Ignored(IgnoreReason::Locked))
    );
    assert_eq!(round.face_up_count(), 2);
    assert_eq!(round.card(3).map(|c| c.flipped), Some(false));
}

#[test]
fn tick_waits_for_the_reveal_delay_and_fires_once() {
    let (mut round, mut events) = example_round();
    round.flip(0, ms(0), &mut events).expect("flip");
    round.flip(1, ms(0), &mut events).expect("flip");
    assert_eq!(round.tick(ms(999), &mut events), None);
    assert_eq!(round.state().pairs_found, 0);
    assert!(round.state().pending.is_some());
    assert_eq!(round.tick(ms(1000), &mut events), Some(Resolution::Matched(n(3))));
    assert_eq!(round.tick(ms(5000), &mut events), None);
    assert_eq!(round.resolve_pending(&mut events), None);
    assert_eq!(round.state().pairs_found, 1);
}

#[test]
fn stale_clicks_are_no_ops() {
    let (mut round, mut events) = example_round();
    round.flip(0, ms(0), &mut events).expect("flip");
    assert_eq!(
        round.flip(0, ms(0), &mut events),
        Ok(FlipOutcome::Ignored(IgnoreReason::AlreadyFaceUp))
    );
    round.flip(1, ms(0), &mut events).expect("flip");
    round.resolve_pending(&mut events);
    assert_eq!(
        round.flip(1, ms(0), &mut events),
        Ok(FlipOutcome::Ignored(IgnoreReason::Removed))
    );
    assert_eq!(round.state().first, None);
}

#[test]
fn out_of_range_index_is_an_error() {
    let (mut round, mut events) = example_round();
    assert_eq!(
        round.flip(48, ms(0), &mut events),
        Err(RoundError::InvalidCard(48))
    );
}

#[test]
fn last_life_ends_the_round() {
    let mut events = EventBus::default();
    let mut round = Round::with_faces(
        small_config(2, 1),
        viewport(),
        vec![J1, n(1), J1, n(1), n(2), n(2)],
        &mut events,
    )
    .expect("deal");
    assert_eq!(pick(&mut round, &mut events, 0, 2), Some(Resolution::Lost));
    assert_eq!(round.state().lives, 0);
    assert_eq!(round.state().outcome, Outcome::Lost);
    assert_eq!(round.state().outcome.message(), Some("Game Over"));
    assert!(round.state().input_locked());
    // the losing jokers stay on the board
    assert_eq!(round.card(0).map(|c| c.visual()), Some(CardVisual::FaceUp));

    assert_eq!(
        round.flip(1, ms(2000), &mut events),
        Ok(FlipOutcome::Ignored(IgnoreReason::RoundOver))
    );
    assert_eq!(round.tick(ms(9000), &mut events), None);
    assert_eq!(round.state().pairs_found, 0);
    assert_eq!(round.state().lives, 0);
    assert!(round.cards().iter().all(|card| !card.removed));
}

#[test]
fn finding_every_pair_wins() {
    let mut events = EventBus::default();
    let mut round = Round::with_faces(
        small_config(2, 3),
        viewport(),
        vec![n(1), n(2), J1, n(2), n(1), J1],
        &mut events,
    )
    .expect("deal");
    assert_eq!(
        pick(&mut round, &mut events, 0, 4),
        Some(Resolution::Matched(n(1)))
    );
    assert_eq!(pick(&mut round, &mut events, 1, 3), Some(Resolution::Won));
    assert_eq!(round.state().pairs_found, 2);
    assert_eq!(round.state().outcome.message(), Some("You Won!"));
    assert_eq!(
        round.flip(2, ms(0), &mut events),
        Ok(FlipOutcome::Ignored(IgnoreReason::RoundOver))
    );
    let drained: Vec<_> = events.drain().collect();
    assert_eq!(drained.last(), Some(&Event::RoundWon { pairs_found: 2 }));
}

#[test]
fn resize_keeps_the_round_and_its_pending_comparison() {
    let (mut round, mut events) = example_round();
    round.flip(0, ms(0), &mut events).expect("flip");
    round.flip(1, ms(0), &mut events).expect("flip");
    let before: Vec<_> = round.cards().to_vec();
    round.resize(Viewport::new(1600.0, 1200.0), &mut events);
    assert_eq!(round.cards(), before.as_slice());
    assert!(round.state().pending.is_some());
    assert_eq!(round.layout().cell_width, 200.0);
    assert_eq!(round.tick(ms(1000), &mut events), Some(Resolution::Matched(n(3))));
}

#[test]
fn clicks_are_hit_tested_against_the_layout() {
    let (mut round, mut events) = example_round();
    assert_eq!(
        round.flip_at(150.0, 50.0, ms(0), &mut events),
        Ok(FlipOutcome::Selected(1))
    );
    assert_eq!(
        round.flip_at(102.0, 50.0, ms(0), &mut events),
        Ok(FlipOutcome::Ignored(IgnoreReason::NoCard))
    );
}

#[test]
fn oversized_deck_is_rejected() {
    let mut events = EventBus::default();
    let err = Round::with_faces(small_config(2, 3), viewport(), vec![n(1); 7], &mut events)
        .expect_err("too many cards");
    assert_eq!(err, RoundError::DeckSize { deck: 7, cells: 6 });
}

#[test]
fn invalid_config_is_rejected() {
    let mut events = EventBus::default();
    let config = GameConfig {
        lives: 0,
        ..GameConfig::default()
    };
    assert!(matches!(
        Round::new(config, viewport(), 1, &mut events),
        Err(RoundError::Config(_))
    ));
}

#[test]
fn perfect_memory_clears_a_seeded_round() {
    for seed in [1u64, 42, 0xC0FFEE] {
        let mut events = EventBus::default();
        let mut round =
            Round::new(GameConfig::default(), viewport(), seed, &mut events).expect("deal");
        assert_eq!(round.seed(), Some(seed));
        let mut now = ms(0);
        while !round.state().outcome.is_over() {
            let next = (0..round.cards().len()).find_map(|a| {
                let card = round.cards()[a];
                if card.removed || card.face.is_joker() {
                    return None;
                }
                let b = (a + 1..round.cards().len())
                    .find(|b| !round.cards()[*b].removed && round.cards()[*b].face == card.face)?;
                Some((a, b))
            });
            let Some((a, b)) = next else { break };
            round.flip(a, now, &mut events).expect("flip");
            round.flip(b, now, &mut events).expect("flip");
            assert!(round.face_up_count() <= 2);
            now += ms(1000);
            round.tick(now, &mut events).expect("resolved");
        }
        assert_eq!(round.state().outcome, Outcome::Won);
        assert_eq!(round.state().pairs_found, 22);
        assert_eq!(round.state().lives, 3);
    }
}
