//! Squad members and their derived skill averages.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Goalkeeper,
    CentralDefender,
    WingBack,
    Midfielder,
    Winger,
    Forward,
}

/// Raw skill ratings, each on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub stamina: u8,
    pub playmaking: u8,
    pub scoring: u8,
    pub winger: u8,
    pub goalkeeping: u8,
    pub passing: u8,
    pub defending: u8,
    pub set_pieces: u8,
    pub condition: u8,
}

impl Attributes {
    /// Every rating set to `value`; handy for building balanced test squads.
    pub fn uniform(value: u8) -> Self {
        Self {
            stamina: value,
            playmaking: value,
            scoring: value,
            winger: value,
            goalkeeping: value,
            passing: value,
            defending: value,
            set_pieces: value,
            condition: value,
        }
    }

    pub fn offence(&self) -> i32 {
        (self.playmaking as i32 + self.winger as i32 + self.passing as i32 + self.condition as i32)
            / 4
    }

    pub fn defence(&self) -> i32 {
        (self.playmaking as i32 + self.defending as i32 + self.condition as i32) / 3
    }

    pub fn finishing(&self) -> i32 {
        (self.scoring as i32 + self.condition as i32) / 2
    }

    pub fn goalkeeping(&self) -> i32 {
        (self.goalkeeping as i32 + self.condition as i32) / 2
    }

    pub fn set_pieces(&self) -> i32 {
        (self.set_pieces as i32 + self.condition as i32) / 2
    }
}

/// A rostered player as the simulators see them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadPlayer {
    pub id: i64,
    pub name: String,
    pub role: Role,
    pub attrs: Attributes,
}

/// A player not yet persisted; input to league creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub name: String,
    pub role: Role,
    pub attrs: Attributes,
}

const FIRST_NAMES: &[&str] = &[
    "Aldo", "Bruno", "Carlo", "Dario", "Enzo", "Fabio", "Gino", "Ivo", "Luca", "Marco", "Nico",
    "Otto", "Paolo", "Rino", "Sandro", "Tito", "Ugo", "Vito",
];

const SURNAMES: &[&str] = &[
    "Bianchi", "Colombo", "Conti", "De Luca", "Esposito", "Ferrari", "Gallo", "Greco", "Marino",
    "Moretti", "Ricci", "Romano", "Russo", "Costa", "Fontana", "Rinaldi", "Lombardi", "Barbieri",
];

/// Roster shape used when generating a squad: role and headcount.
const ROSTER_SHAPE: &[(Role, usize)] = &[
    (Role::Goalkeeper, 2),
    (Role::CentralDefender, 4),
    (Role::WingBack, 3),
    (Role::Midfielder, 4),
    (Role::Winger, 3),
    (Role::Forward, 3),
];

/// Generate a plausible 19-player roster around a club-wide base quality.
pub fn generate_squad<R: Rng + ?Sized>(rng: &mut R) -> Vec<NewPlayer> {
    let quality: i32 = rng.random_range(45..=75);
    let mut players = Vec::new();

    for &(role, count) in ROSTER_SHAPE {
        for _ in 0..count {
            let mut rate = |boost: i32| -> u8 {
                (quality + boost + rng.random_range(-15..=15)).clamp(1, 99) as u8
            };
            let attrs = match role {
                Role::Goalkeeper => Attributes {
                    stamina: rate(0),
                    playmaking: rate(-20),
                    scoring: rate(-30),
                    winger: rate(-30),
                    goalkeeping: rate(20),
                    passing: rate(-10),
                    defending: rate(0),
                    set_pieces: rate(-10),
                    condition: 0,
                },
                Role::CentralDefender | Role::WingBack => Attributes {
                    stamina: rate(5),
                    playmaking: rate(-5),
                    scoring: rate(-15),
                    winger: rate(if role == Role::WingBack { 5 } else { -10 }),
                    goalkeeping: rate(-40),
                    passing: rate(0),
                    defending: rate(15),
                    set_pieces: rate(-5),
                    condition: 0,
                },
                Role::Midfielder => Attributes {
                    stamina: rate(5),
                    playmaking: rate(10),
                    scoring: rate(0),
                    winger: rate(0),
                    goalkeeping: rate(-40),
                    passing: rate(10),
                    defending: rate(0),
                    set_pieces: rate(5),
                    condition: 0,
                },
                Role::Winger => Attributes {
                    stamina: rate(5),
                    playmaking: rate(0),
                    scoring: rate(5),
                    winger: rate(15),
                    goalkeeping: rate(-40),
                    passing: rate(5),
                    defending: rate(-10),
                    set_pieces: rate(0),
                    condition: 0,
                },
                Role::Forward => Attributes {
                    stamina: rate(0),
                    playmaking: rate(0),
                    scoring: rate(15),
                    winger: rate(0),
                    goalkeeping: rate(-40),
                    passing: rate(0),
                    defending: rate(-20),
                    set_pieces: rate(5),
                    condition: 0,
                },
            };
            let attrs = Attributes {
                condition: rng.random_range(70..=100),
                ..attrs
            };
            let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Mario");
            let last = SURNAMES.choose(rng).copied().unwrap_or("Rossi");
            players.push(NewPlayer {
                name: format!("{first} {last}"),
                role,
                attrs,
            });
        }
    }

    players
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn averages_use_integer_division() {
        let attrs = Attributes {
            stamina: 50,
            playmaking: 61,
            scoring: 80,
            winger: 40,
            goalkeeping: 10,
            passing: 70,
            defending: 33,
            set_pieces: 55,
            condition: 90,
        };
        assert_eq!(attrs.offence(), (61 + 40 + 70 + 90) / 4);
        assert_eq!(attrs.defence(), (61 + 33 + 90) / 3);
        assert_eq!(attrs.finishing(), 85);
        assert_eq!(attrs.goalkeeping(), 50);
        assert_eq!(attrs.set_pieces(), 72);
    }

    #[test]
    fn generated_squad_has_every_role() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let squad = generate_squad(&mut rng);
        assert_eq!(squad.len(), 19);
        for role in [
            Role::Goalkeeper,
            Role::CentralDefender,
            Role::WingBack,
            Role::Midfielder,
            Role::Winger,
            Role::Forward,
        ] {
            assert!(squad.iter().any(|p| p.role == role), "missing {role:?}");
        }
        assert!(squad.iter().all(|p| (70..=100).contains(&p.attrs.condition)));
    }

    #[test]
    fn generation_is_deterministic_for_a_seed() {
        let a = generate_squad(&mut ChaCha8Rng::seed_from_u64(99));
        let b = generate_squad(&mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
