//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod assets;
pub mod cards;
pub mod config;
pub mod deck;
pub mod events;
pub mod layout;
pub mod rng;
pub mod round;
pub mod state;

pub use assets::*;
pub use cards::*;
pub use config::*;
pub use deck::*;
pub use events::*;
pub use layout::*;
pub use rng::*;
pub use round::*;
pub use state::*;
