//! Swimming creatures.
//!
//! - Fish: schooling, feeding and reproduction
//! - Sharks: pursuit of the nearest fish
//! - Drifters: jellyfish and sea turtles carried by the current
//!
//! Fish and sharks share the motion primitives in [`motion`].

pub mod drifter;
pub mod fish;
pub mod motion;
pub mod shark;
pub mod species;

pub use drifter::{Drifter, DrifterKind, Jellyfish, SeaTurtle};
pub use fish::{BirthRequest, Fish, FishId};
pub use motion::Body;
pub use shark::Shark;
pub use species::{Rgb, Species, SpeciesTraits};

use serde::{Deserialize, Serialize};

/// What a swimming body is, for behaviour dispatch and rendering
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreatureKind {
    Fish(Species),
    Shark,
}

impl CreatureKind {
    /// Cruise speed of this kind
    pub fn speed(&self) -> f64 {
        match self {
            CreatureKind::Fish(species) => species.traits().speed,
            CreatureKind::Shark => shark::SHARK_SPEED,
        }
    }

    /// Whether sharks hunt this kind
    pub fn is_prey(&self) -> bool {
        matches!(self, CreatureKind::Fish(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creature_kind() {
        assert!(CreatureKind::Fish(Species::Small).is_prey());
        assert!(!CreatureKind::Shark.is_prey());
        assert_eq!(CreatureKind::Shark.speed(), 4.5);
        assert_eq!(CreatureKind::Fish(Species::Fast).speed(), 5.0);
    }
}
