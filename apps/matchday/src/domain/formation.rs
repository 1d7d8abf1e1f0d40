//! Tactical modules, best-eleven selection and pitch-zone groupings.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::squad::{Role, SquadPlayer};
use crate::errors::domain::{DomainError, ValidationKind};

/// Outfield shape: how many of each outfield role take the pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Module {
    /// 4-4-2
    FourFourTwo,
    /// 4-3-3
    FourThreeThree,
    /// 4-3-3 with three out-and-out forwards and no wingers
    FourThreeThreeOffensive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slots {
    pub centre_backs: usize,
    pub wing_backs: usize,
    pub midfielders: usize,
    pub wingers: usize,
    pub forwards: usize,
}

impl Module {
    pub const ALL: [Module; 3] = [
        Module::FourFourTwo,
        Module::FourThreeThree,
        Module::FourThreeThreeOffensive,
    ];

    pub fn slots(self) -> Slots {
        match self {
            Module::FourFourTwo => Slots {
                centre_backs: 2,
                wing_backs: 2,
                midfielders: 2,
                wingers: 2,
                forwards: 2,
            },
            Module::FourThreeThree => Slots {
                centre_backs: 2,
                wing_backs: 2,
                midfielders: 3,
                wingers: 2,
                forwards: 1,
            },
            Module::FourThreeThreeOffensive => Slots {
                centre_backs: 2,
                wing_backs: 2,
                midfielders: 3,
                wingers: 0,
                forwards: 3,
            },
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Module {
        Module::ALL[rng.random_range(0..Module::ALL.len())]
    }
}

/// Pitch third, seen from the side in possession.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zone {
    Defence,
    Midfield,
    Attack,
}

impl Zone {
    /// The same pitch area seen from the opponent's half.
    pub fn mirror(self) -> Zone {
        match self {
            Zone::Defence => Zone::Attack,
            Zone::Midfield => Zone::Midfield,
            Zone::Attack => Zone::Defence,
        }
    }

    /// Next zone up the pitch, `None` from the final third.
    pub fn advance(self) -> Option<Zone> {
        match self {
            Zone::Defence => Some(Zone::Midfield),
            Zone::Midfield => Some(Zone::Attack),
            Zone::Attack => None,
        }
    }
}

/// The eleven (or fewer) players a club fields, grouped by line.
#[derive(Debug, Clone)]
pub struct Formation<'a> {
    pub module: Module,
    pub goalkeeper: Option<&'a SquadPlayer>,
    pub centre_backs: Vec<&'a SquadPlayer>,
    pub wing_backs: Vec<&'a SquadPlayer>,
    pub midfielders: Vec<&'a SquadPlayer>,
    pub wingers: Vec<&'a SquadPlayer>,
    pub forwards: Vec<&'a SquadPlayer>,
}

#[derive(Clone, Copy)]
enum Line {
    Keeper,
    CentreBacks,
    WingBacks,
    Midfield,
    Wings,
    Forwards,
}

impl Line {
    fn role(self) -> Role {
        match self {
            Line::Keeper => Role::Goalkeeper,
            Line::CentreBacks => Role::CentralDefender,
            Line::WingBacks => Role::WingBack,
            Line::Midfield => Role::Midfielder,
            Line::Wings => Role::Winger,
            Line::Forwards => Role::Forward,
        }
    }

    fn rating(self, p: &SquadPlayer) -> i32 {
        match self {
            Line::Keeper => p.attrs.goalkeeping(),
            Line::CentreBacks | Line::WingBacks => p.attrs.defence(),
            Line::Midfield | Line::Wings => p.attrs.offence() + p.attrs.defence(),
            Line::Forwards => p.attrs.offence(),
        }
    }
}

impl<'a> Formation<'a> {
    /// Pick the best eleven for `module`.
    ///
    /// Each line first takes its best natural-role players; any shortfall is
    /// then filled from whoever is left, rated for that line. Squads with
    /// fewer than eleven players field everyone.
    pub fn select(squad: &'a [SquadPlayer], module: Module) -> Result<Self, DomainError> {
        if squad.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::EmptySquad,
                "Cannot field a formation from an empty squad",
            ));
        }

        let slots = module.slots();
        let lines = [
            (Line::Keeper, 1),
            (Line::CentreBacks, slots.centre_backs),
            (Line::WingBacks, slots.wing_backs),
            (Line::Midfield, slots.midfielders),
            (Line::Wings, slots.wingers),
            (Line::Forwards, slots.forwards),
        ];

        let mut taken = vec![false; squad.len()];
        let mut picked: Vec<Vec<&'a SquadPlayer>> = vec![Vec::new(); lines.len()];

        // Natural-role pass
        for (slot, &(line, count)) in lines.iter().enumerate() {
            let chosen = best_candidates(squad, &taken, count, line, true);
            for idx in chosen {
                taken[idx] = true;
                picked[slot].push(&squad[idx]);
            }
        }

        // Shortfall pass
        for (slot, &(line, count)) in lines.iter().enumerate() {
            let missing = count.saturating_sub(picked[slot].len());
            if missing == 0 {
                continue;
            }
            let chosen = best_candidates(squad, &taken, missing, line, false);
            for idx in chosen {
                taken[idx] = true;
                picked[slot].push(&squad[idx]);
            }
        }

        let mut lines_iter = picked.into_iter();
        let mut next = || lines_iter.next().unwrap_or_default();
        let keeper = next();
        Ok(Self {
            module,
            goalkeeper: keeper.first().copied(),
            centre_backs: next(),
            wing_backs: next(),
            midfielders: next(),
            wingers: next(),
            forwards: next(),
        })
    }

    /// Everyone on the pitch, keeper first.
    pub fn lineup(&self) -> Vec<&'a SquadPlayer> {
        self.goalkeeper
            .into_iter()
            .chain(self.centre_backs.iter().copied())
            .chain(self.wing_backs.iter().copied())
            .chain(self.midfielders.iter().copied())
            .chain(self.wingers.iter().copied())
            .chain(self.forwards.iter().copied())
            .collect()
    }

    /// Players involved when the ball is in `zone` (from this side's view).
    pub fn zone_group(&self, zone: Zone) -> Vec<&'a SquadPlayer> {
        match zone {
            Zone::Defence => self
                .goalkeeper
                .into_iter()
                .chain(self.centre_backs.iter().copied())
                .chain(self.wing_backs.iter().copied())
                .chain(self.midfielders.iter().copied())
                .collect(),
            Zone::Midfield => self
                .centre_backs
                .iter()
                .copied()
                .chain(self.wing_backs.iter().copied())
                .chain(self.midfielders.iter().copied())
                .chain(self.wingers.iter().copied())
                .collect(),
            Zone::Attack => self
                .midfielders
                .iter()
                .copied()
                .chain(self.wingers.iter().copied())
                .chain(self.forwards.iter().copied())
                .collect(),
        }
    }
}

fn best_candidates(
    squad: &[SquadPlayer],
    taken: &[bool],
    count: usize,
    line: Line,
    natural_only: bool,
) -> Vec<usize> {
    if count == 0 {
        return Vec::new();
    }
    let mut pool: Vec<usize> = (0..squad.len())
        .filter(|&i| !taken[i])
        .filter(|&i| !natural_only || squad[i].role == line.role())
        .collect();
    // Highest rating first; lower id wins ties so selection is reproducible
    pool.sort_by(|&a, &b| {
        line.rating(&squad[b])
            .cmp(&line.rating(&squad[a]))
            .then(squad[a].id.cmp(&squad[b].id))
    });
    pool.truncate(count);
    pool
}

/// Average offensive rating of a group, 0 for an empty group.
pub fn offence_average(group: &[&SquadPlayer]) -> i32 {
    if group.is_empty() {
        return 0;
    }
    group.iter().map(|p| p.attrs.offence()).sum::<i32>() / group.len() as i32
}

/// Average defensive rating of a group, 0 for an empty group.
pub fn defence_average(group: &[&SquadPlayer]) -> i32 {
    if group.is_empty() {
        return 0;
    }
    group.iter().map(|p| p.attrs.defence()).sum::<i32>() / group.len() as i32
}
