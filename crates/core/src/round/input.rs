use super::*;
use crate::PendingMatch;

impl Round {
    pub fn flip(
        &mut self,
        index: usize,
        now: Duration,
        events: &mut EventBus,
    ) -> Result<FlipOutcome, RoundError> {
        let card = *self
            .cards
            .get(index)
            .ok_or(RoundError::InvalidCard(index))?;
        if self.state.outcome.is_over() {
            return Ok(FlipOutcome::Ignored(IgnoreReason::RoundOver));
        }
        if self.state.input_locked() {
            return Ok(FlipOutcome::Ignored(IgnoreReason::Locked));
        }
        if card.removed {
            return Ok(FlipOutcome::Ignored(IgnoreReason::Removed));
        }
        if card.flipped {
            return Ok(FlipOutcome::Ignored(IgnoreReason::AlreadyFaceUp));
        }

        self.cards[index].flipped = true;
        events.push(Event::CardFlipped {
            index,
            face: card.face,
        });

        let Some(first) = self.state.first else {
            self.state.first = Some(index);
            return Ok(FlipOutcome::Selected(index));
        };
        self.state.second = Some(index);
        let due = now + self.config.reveal_delay();
        self.state.pending = Some(PendingMatch {
            first,
            second: index,
            due,
        });
        events.push(Event::MatchScheduled {
            first,
            second: index,
        });
        Ok(FlipOutcome::MatchScheduled {
            first,
            second: index,
            due,
        })
    }

    /// Flips whatever card sits under a point of the current layout.
    pub fn flip_at(
        &mut self,
        x: f32,
        y: f32,
        now: Duration,
        events: &mut EventBus,
    ) -> Result<FlipOutcome, RoundError> {
        match self.layout.hit_test(x, y) {
            Some(index) if index < self.cards.len() => self.flip(index, now, events),
            _ => Ok(FlipOutcome::Ignored(IgnoreReason::NoCard)),
        }
    }
}
