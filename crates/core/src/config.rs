use crate::{JokerTag, MAX_CARD_NUMBER};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column")]
    EmptyGrid,
    #[error("card size must be non-zero")]
    EmptyCardSize,
    #[error("number pool {0} is outside 1..=52")]
    NumberPool(u8),
    #[error("{pairs} pairs requested from a pool of {pool} numbers")]
    TooManyPairs { pairs: u32, pool: u8 },
    #[error("deck of {deck} cards does not fit a grid of {cells} cells")]
    DeckTooLarge { deck: usize, cells: usize },
    #[error("a round needs at least one pair to win")]
    NoPairs,
    #[error("a round needs at least one life")]
    NoLives,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridRule {
    pub cols: u16,
    pub rows: u16,
}

impl GridRule {
    pub fn cells(&self) -> usize {
        usize::from(self.cols) * usize::from(self.rows)
    }
}

impl Default for GridRule {
    fn default() -> Self {
        Self { cols: 8, rows: 6 }
    }
}

/// Source pixel size of the card artwork.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CardSize {
    pub width: f32,
    pub height: f32,
}

impl Default for CardSize {
    fn default() -> Self {
        Self {
            width: 168.0,
            height: 243.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct JokerRule {
    pub tag: JokerTag,
    pub copies: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridRule,
    pub card_size: CardSize,
    pub number_pool: u8,
    pub pairs: u32,
    pub jokers: Vec<JokerRule>,
    pub lives: u32,
    pub reveal_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridRule::default(),
            card_size: CardSize::default(),
            number_pool: MAX_CARD_NUMBER,
            pairs: 22,
            jokers: JokerTag::ALL
                .iter()
                .map(|tag| JokerRule {
                    tag: *tag,
                    copies: 2,
                })
                .collect(),
            lives: 3,
            reveal_delay_ms: 1000,
        }
    }
}

impl GameConfig {
    pub fn deck_size(&self) -> usize {
        let jokers: usize = self.jokers.iter().map(|rule| usize::from(rule.copies)).sum();
        self.pairs as usize * 2 + jokers
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.cells() == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if !(self.card_size.width > 0.0 && self.card_size.height > 0.0) {
            return Err(ConfigError::EmptyCardSize);
        }
        if self.number_pool == 0 || self.number_pool > MAX_CARD_NUMBER {
            return Err(ConfigError::NumberPool(self.number_pool));
        }
        if self.pairs == 0 {
            return Err(ConfigError::NoPairs);
        }
        if self.pairs > u32::from(self.number_pool) {
            return Err(ConfigError::TooManyPairs {
                pairs: self.pairs,
                pool: self.number_pool,
            });
        }
        if self.lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.deck_size() > self.grid.cells() {
            return Err(ConfigError::DeckTooLarge {
                deck: self.deck_size(),
                cells: self.grid.cells(),
            });
        }
        Ok(())
    }
}
