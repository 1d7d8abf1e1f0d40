//! League table arithmetic.

use std::cmp::Ordering;

use super::outcome::Score;

pub const POINTS_WIN: i32 = 3;
pub const POINTS_DRAW: i32 = 1;
pub const POINTS_LOSS: i32 = 0;

/// Increment applied to one club's row after one finished match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandingsDelta {
    pub played: i32,
    pub won: i32,
    pub drawn: i32,
    pub lost: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub points: i32,
}

impl StandingsDelta {
    /// Delta for a club that scored `scored` and conceded `conceded`.
    pub fn from_goals(scored: u8, conceded: u8) -> Self {
        let (won, drawn, lost, points) = match scored.cmp(&conceded) {
            Ordering::Greater => (1, 0, 0, POINTS_WIN),
            Ordering::Equal => (0, 1, 0, POINTS_DRAW),
            Ordering::Less => (0, 0, 1, POINTS_LOSS),
        };
        Self {
            played: 1,
            won,
            drawn,
            lost,
            goals_for: scored as i32,
            goals_against: conceded as i32,
            points,
        }
    }

    /// `(home, away)` deltas for a final score.
    pub fn for_match(score: Score) -> (Self, Self) {
        (
            Self::from_goals(score.home, score.away),
            Self::from_goals(score.away, score.home),
        )
    }
}

/// One row of the table as read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub club_id: i64,
    pub club_name: String,
    pub played: i32,
    pub won: i32,
    pub drawn: i32,
    pub lost: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub points: i32,
}

impl TableRow {
    pub fn goal_difference(&self) -> i32 {
        self.goals_for - self.goals_against
    }
}

/// Points, then goal difference, then goals scored, all descending. Club id
/// breaks any remaining tie so the order is total.
pub fn table_order(a: &TableRow, b: &TableRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.club_id.cmp(&b.club_id))
}
