//! Fish species and their trait table.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// RGB colour
pub type Rgb = [u8; 3];

/// Closed set of fish species
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Small,
    Medium,
    Large,
    Tropical,
    Fast,
}

/// Static traits of a species
#[derive(Debug)]
pub struct SpeciesTraits {
    pub name: &'static str,
    pub body_length: f64,
    pub body_width: f64,
    pub tail_length: f64,
    /// Cruise speed, the length every velocity is normalized to
    pub speed: f64,
    /// 0 = ignores the school, 1 = fully matches the school heading
    pub schooling_strength: f64,
    pub palette: &'static [Rgb],
}

impl SpeciesTraits {
    /// Personal space kept from other fish
    #[inline]
    pub fn min_distance(&self) -> f64 {
        self.body_length * 0.8
    }

    /// Range within which neighbours count toward schooling
    #[inline]
    pub fn max_distance(&self) -> f64 {
        self.body_length * 5.0
    }
}

const TRAITS: [SpeciesTraits; 5] = [
    SpeciesTraits {
        name: "Small Fish",
        body_length: 8.0,
        body_width: 4.0,
        tail_length: 6.0,
        speed: 4.5,
        schooling_strength: 0.9,
        palette: &[[192, 192, 192], [169, 169, 169], [211, 211, 211]],
    },
    SpeciesTraits {
        name: "Medium Fish",
        body_length: 12.0,
        body_width: 6.0,
        tail_length: 8.0,
        speed: 3.0,
        schooling_strength: 0.7,
        palette: &[[255, 140, 0], [255, 215, 0], [64, 224, 208]],
    },
    SpeciesTraits {
        name: "Large Fish",
        body_length: 18.0,
        body_width: 9.0,
        tail_length: 12.0,
        speed: 2.0,
        schooling_strength: 0.3,
        palette: &[[70, 130, 180], [100, 149, 237], [65, 105, 225]],
    },
    SpeciesTraits {
        name: "Tropical Fish",
        body_length: 10.0,
        body_width: 5.0,
        tail_length: 7.0,
        speed: 3.5,
        schooling_strength: 0.6,
        palette: &[[255, 20, 147], [255, 69, 0], [138, 43, 226], [255, 215, 0]],
    },
    SpeciesTraits {
        name: "Fast Fish",
        body_length: 14.0,
        body_width: 5.0,
        tail_length: 10.0,
        speed: 5.0,
        schooling_strength: 0.5,
        palette: &[[0, 191, 255], [135, 206, 250], [30, 144, 255]],
    },
];

impl Species {
    pub const ALL: [Species; 5] = [
        Species::Small,
        Species::Medium,
        Species::Large,
        Species::Tropical,
        Species::Fast,
    ];

    /// Trait table entry for this species
    #[inline]
    pub fn traits(self) -> &'static SpeciesTraits {
        &TRAITS[self as usize]
    }

    /// Uniformly random species
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Random colour from the species palette
    pub fn random_color(self, rng: &mut impl Rng) -> Rgb {
        let palette = self.traits().palette;
        palette[rng.gen_range(0..palette.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_enum() {
        assert_eq!(Species::Small.traits().name, "Small Fish");
        assert_eq!(Species::Fast.traits().speed, 5.0);
        assert_eq!(Species::Large.traits().schooling_strength, 0.3);
    }

    #[test]
    fn test_derived_distances() {
        let t = Species::Medium.traits();
        assert!((t.min_distance() - 9.6).abs() < 1e-12);
        assert_eq!(t.max_distance(), 60.0);
    }

    #[test]
    fn test_random_color_in_palette() {
        let mut rng = rand::thread_rng();
        for species in Species::ALL {
            let color = species.random_color(&mut rng);
            assert!(species.traits().palette.contains(&color));
        }
    }
}
