use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_CARD_NUMBER: u8 = 52;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JokerTag {
    One,
    Two,
}

impl JokerTag {
    pub const ALL: [JokerTag; 2] = [JokerTag::One, JokerTag::Two];

    pub fn key(self) -> &'static str {
        match self {
            Self::One => "joker-1",
            Self::Two => "joker-2",
        }
    }
}

/// Identifier printed on the front of a card. Only equality matters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(tag = "kind", content = "value")]
pub enum CardFace {
    Number(u8),
    Joker(JokerTag),
}

impl CardFace {
    pub fn is_joker(&self) -> bool {
        matches!(self, Self::Joker(_))
    }

    /// Image key of the face-up texture.
    pub fn texture_key(&self) -> String {
        match self {
            Self::Number(n) => format!("card-front-{n}"),
            Self::Joker(tag) => tag.key().to_string(),
        }
    }
}

impl fmt::Display for CardFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Joker(JokerTag::One) => f.write_str("J1"),
            Self::Joker(JokerTag::Two) => f.write_str("J2"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CardVisual {
    FaceDown,
    FaceUp,
    Removed,
}

/// One grid cell's card. Its position is the layout centre at the same index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardSlot {
    pub face: CardFace,
    pub flipped: bool,
    pub removed: bool,
}

impl CardSlot {
    pub fn new(face: CardFace) -> Self {
        Self {
            face,
            flipped: false,
            removed: false,
        }
    }

    pub fn visual(&self) -> CardVisual {
        if self.removed {
            CardVisual::Removed
        } else if self.flipped {
            CardVisual::FaceUp
        } else {
            CardVisual::FaceDown
        }
    }

    pub fn is_face_up(&self) -> bool {
        self.visual() == CardVisual::FaceUp
    }
}
