use super::*;
use crate::Outcome;

impl Round {
    /// Fires the pending comparison once its reveal delay has elapsed.
    pub fn tick(&mut self, now: Duration, events: &mut EventBus) -> Option<Resolution> {
        match self.state.pending {
            Some(pending) if now >= pending.due => self.resolve_pending(events),
            _ => None,
        }
    }

    /// Consumes the pending comparison without waiting for its deadline.
    pub fn resolve_pending(&mut self, events: &mut EventBus) -> Option<Resolution> {
        let pending = self.state.pending.take()?;
        let (first, second) = (pending.first, pending.second);
        let face = self.cards[first].face;
        self.state.clear_selection();

        let resolution = if face != self.cards[second].face {
            self.cards[first].flipped = false;
            self.cards[second].flipped = false;
            events.push(Event::Mismatch { first, second });
            Resolution::Mismatch
        } else if let CardFace::Joker(tag) = face {
            self.state.lives = self.state.lives.saturating_sub(1);
            events.push(Event::JokerMatched {
                tag,
                lives: self.state.lives,
            });
            if self.state.lives == 0 {
                self.state.outcome = Outcome::Lost;
                events.push(Event::RoundLost);
                Resolution::Lost
            } else {
                self.remove_pair(first, second);
                Resolution::JokerHit(tag)
            }
        } else {
            self.state.pairs_found += 1;
            events.push(Event::PairMatched {
                face,
                pairs_found: self.state.pairs_found,
            });
            if self.state.pairs_found >= self.config.pairs {
                self.state.outcome = Outcome::Won;
                events.push(Event::RoundWon {
                    pairs_found: self.state.pairs_found,
                });
                Resolution::Won
            } else {
                self.remove_pair(first, second);
                Resolution::Matched(face)
            }
        };
        log::debug!("resolved cards {first} and {second}: {resolution:?}");
        Some(resolution)
    }

    fn remove_pair(&mut self, first: usize, second: usize) {
        for index in [first, second] {
            self.cards[index].removed = true;
        }
    }
}
