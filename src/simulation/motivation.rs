//! Wanting: approach motivation, separate from liking
//!
//! Liking is how good things feel; wanting is how driven the subject is to
//! seek them. Learned cue salience raises wanting even while tolerance makes
//! the same actions feel weaker.

use crate::core::config::WantingConfig;
use crate::entity::subject::Subject;

/// Wanting score; 0 means no drive at all
pub fn wanting(subject: &Subject, config: &WantingConfig) -> f32 {
    let affect = &subject.affect;
    let base = config.drive
        + affect.arousal * config.arousal_weight
        + subject.cues.strongest() * config.salience_weight;

    let fatigue = config.fatigue_floor + (1.0 - config.fatigue_floor) * affect.energy / 100.0;
    let shutdown = 1.0 - config.shutdown_dampening * affect.shutdown / 100.0;

    base * fatigue * shutdown
}
