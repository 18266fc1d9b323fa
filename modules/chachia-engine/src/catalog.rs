//! Static registry of collectible spots.
//!
//! Spots are configuration data: built once at load time, never mutated.
//! A missing id is the "not found view" path for the caller, never a
//! failure of the session.

use chachia_common::{Challenge, Position, Rarity, Spot};

#[derive(Debug, Clone)]
pub struct SpotCatalog {
    spots: Vec<Spot>,
}

impl SpotCatalog {
    pub fn new(spots: Vec<Spot>) -> Self {
        Self { spots }
    }

    pub fn get(&self, id: u32) -> Option<&Spot> {
        self.spots.iter().find(|s| s.id == id)
    }

    pub fn spots(&self) -> &[Spot] {
        &self.spots
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// The production spot set.
    pub fn builtin() -> Self {
        let spot = |id: u32, name: &str, lat: f64, lng: f64, rarity: Rarity, xp: u32| Spot {
            id,
            name: name.to_string(),
            position: Position::new(lat, lng),
            rarity,
            xp,
            challenge: None,
        };
        let challenge = |question: &str, answer: &str| Challenge {
            question: question.to_string(),
            answer: answer.to_string(),
        };

        Self::new(vec![
            spot(1, "Medina Gate", 36.7975, 10.1753, Rarity::Standard, 15),
            Spot {
                challenge: Some(challenge(
                    "Harissa time! \u{1f336} In many Tunisian homes, I'm a spicy paste made \
                     from sun-dried chili peppers, garlic, and olive oil. People spread me on \
                     bread and add me to couscous. What am I?",
                    "harissa",
                )),
                ..spot(3, "Sidi Bou Sa\u{ef}d", 36.8733, 10.3547, Rarity::Cultural, 50)
            },
            spot(5, "Cap Bon", 36.8667, 10.8, Rarity::Standard, 15),
            spot(6, "Sousse Medina", 35.8256, 10.6389, Rarity::Standard, 15),
            Spot {
                challenge: Some(challenge(
                    "Harissa time! \u{1f30a} The Ribat of Sousse has watched over traders and \
                     sailors for centuries. Which famous sea does it face? (Hint: it touches \
                     Tunisia, Italy, and Greece.)",
                    "mediterranean",
                )),
                ..spot(7, "Ribat of Sousse", 35.8267, 10.6412, Rarity::Legendary, 85)
            },
            spot(8, "Sousse Great Mosque", 35.8245, 10.6378, Rarity::Cultural, 45),
            Spot {
                challenge: Some(challenge(
                    "Harissa time! \u{1f393} This school trains future engineers in a coastal \
                     Tunisian city famous for its Medina and beaches. Which city are we in?",
                    "sousse",
                )),
                ..spot(10, "Sousse", 53.3493, -6.2605, Rarity::Standard, 18)
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_unique_ids() {
        let catalog = SpotCatalog::builtin();
        let mut ids: Vec<u32> = catalog.spots().iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn sidi_bou_said_is_cultural_with_challenge() {
        let catalog = SpotCatalog::builtin();
        let spot = catalog.get(3).unwrap();
        assert_eq!(spot.rarity, Rarity::Cultural);
        assert_eq!(spot.xp, 50);
        assert_eq!(spot.challenge.as_ref().unwrap().answer, "harissa");
    }

    #[test]
    fn missing_id_is_none() {
        assert!(SpotCatalog::builtin().get(999).is_none());
    }
}
