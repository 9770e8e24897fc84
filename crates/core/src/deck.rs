use crate::{CardFace, GameConfig, RngState};

/// Builds one round's deck: `pairs` distinct numbers drawn from the pool,
/// each twice, plus the configured joker copies, all shuffled together.
pub fn build_deck(config: &GameConfig, rng: &mut RngState) -> Vec<CardFace> {
    let mut pool: Vec<u8> = (1..=config.number_pool).collect();
    rng.shuffle(&mut pool);
    pool.truncate(config.pairs as usize);

    let mut deck = Vec::with_capacity(config.deck_size());
    for number in &pool {
        deck.push(CardFace::Number(*number));
    }
    for number in &pool {
        deck.push(CardFace::Number(*number));
    }
    for rule in &config.jokers {
        for _ in 0..rule.copies {
            deck.push(CardFace::Joker(rule.tag));
        }
    }
    rng.shuffle(&mut deck);
    deck
}
