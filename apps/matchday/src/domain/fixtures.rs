//! Double round-robin fixture generation (circle method).
//!
//! Produces a pure season plan: rounds, pairings, kick-off times and the
//! last-round flag. Persisting the plan and installing the season as current
//! belongs to the caller.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use time::{Duration, OffsetDateTime};

use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMatch {
    pub home_club_id: i64,
    pub away_club_id: i64,
    /// Final pairing generated for its matchday
    pub last_in_round: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRound {
    pub round_no: i16,
    pub is_last: bool,
    pub scheduled_at: OffsetDateTime,
    pub matches: Vec<PlannedMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonPlan {
    pub rounds: Vec<PlannedRound>,
    /// Clubs that need a standings row, in input order
    pub club_ids: Vec<i64>,
}

impl SeasonPlan {
    pub fn match_count(&self) -> usize {
        self.rounds.iter().map(|r| r.matches.len()).sum()
    }
}

/// Build a double round-robin for `club_ids`.
///
/// `club_ids[0]` stays fixed while the rest rotate through `N-1` matchdays.
/// Matchdays are shuffled, then mirrored (home and away swapped) and appended,
/// so round `k` and round `k + N - 1` feature the same pairings.
pub fn generate<R: Rng + ?Sized>(
    club_ids: &[i64],
    start: OffsetDateTime,
    spacing: Duration,
    rng: &mut R,
) -> Result<SeasonPlan, DomainError> {
    let n = club_ids.len();
    if n % 2 != 0 {
        return Err(DomainError::validation(
            ValidationKind::OddClubCount,
            format!("A league needs an even number of clubs to be scheduled, got {n}"),
        ));
    }
    if n < 2 {
        return Err(DomainError::validation(
            ValidationKind::TooFewClubs,
            format!("A league needs at least two clubs, got {n}"),
        ));
    }
    let distinct: HashSet<i64> = club_ids.iter().copied().collect();
    if distinct.len() != n {
        return Err(DomainError::validation_other(
            "Club list contains duplicates",
        ));
    }

    let fixed = club_ids[0];
    let rotating = &club_ids[1..];
    let days = n - 1;
    let half = n / 2;

    let mut first_half: Vec<Vec<PlannedMatch>> = (0..days)
        .map(|day| {
            let mut pairings = Vec::with_capacity(half);
            pairings.push((fixed, rotating[day]));
            for i in 1..half {
                let a = rotating[(day + i) % days];
                let b = rotating[(day + days - i) % days];
                pairings.push((a, b));
            }
            // Alternate venues day by day
            let swap = day % 2 == 1;
            let last = pairings.len() - 1;
            pairings
                .into_iter()
                .enumerate()
                .map(|(idx, (a, b))| {
                    let (home, away) = if swap { (b, a) } else { (a, b) };
                    PlannedMatch {
                        home_club_id: home,
                        away_club_id: away,
                        last_in_round: idx == last,
                    }
                })
                .collect()
        })
        .collect();

    first_half.shuffle(rng);

    let second_half: Vec<Vec<PlannedMatch>> = first_half
        .iter()
        .map(|day| {
            day.iter()
                .map(|m| PlannedMatch {
                    home_club_id: m.away_club_id,
                    away_club_id: m.home_club_id,
                    last_in_round: m.last_in_round,
                })
                .collect()
        })
        .collect();

    let total = days * 2;
    let rounds = first_half
        .into_iter()
        .chain(second_half)
        .enumerate()
        .map(|(idx, matches)| PlannedRound {
            round_no: (idx + 1) as i16,
            is_last: idx + 1 == total,
            scheduled_at: start + spacing * (idx as i32),
            matches,
        })
        .collect();

    Ok(SeasonPlan {
        rounds,
        club_ids: club_ids.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use time::macros::datetime;

    use super::*;

    fn plan(n: i64, seed: u64) -> SeasonPlan {
        let clubs: Vec<i64> = (1..=n).collect();
        generate(
            &clubs,
            datetime!(2026-08-01 15:00 UTC),
            Duration::minutes(10),
            &mut ChaCha8Rng::seed_from_u64(seed),
        )
        .unwrap()
    }

    #[test]
    fn four_club_league_shape() {
        let p = plan(4, 1);
        assert_eq!(p.rounds.len(), 6);
        assert!(p.rounds.iter().all(|r| r.matches.len() == 2));
        assert_eq!(p.match_count(), 12);

        let mut home: HashMap<i64, usize> = HashMap::new();
        let mut away: HashMap<i64, usize> = HashMap::new();
        for m in p.rounds.iter().flat_map(|r| &r.matches) {
            *home.entry(m.home_club_id).or_default() += 1;
            *away.entry(m.away_club_id).or_default() += 1;
        }
        for club in 1..=4 {
            assert_eq!(home[&club], 3, "club {club} home games");
            assert_eq!(away[&club], 3, "club {club} away games");
        }
    }

    #[test]
    fn only_final_round_is_last() {
        let p = plan(6, 3);
        let last: Vec<_> = p.rounds.iter().filter(|r| r.is_last).collect();
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].round_no, 10);
        assert_eq!(p.rounds.last().map(|r| r.is_last), Some(true));
    }

    #[test]
    fn kickoffs_step_by_spacing() {
        let p = plan(4, 2);
        for pair in p.rounds.windows(2) {
            assert_eq!(
                pair[1].scheduled_at - pair[0].scheduled_at,
                Duration::minutes(10)
            );
        }
        assert_eq!(p.rounds[0].scheduled_at, datetime!(2026-08-01 15:00 UTC));
    }

    #[test]
    fn one_sentinel_per_round() {
        let p = plan(8, 4);
        for r in &p.rounds {
            assert_eq!(r.matches.iter().filter(|m| m.last_in_round).count(), 1);
            assert!(r.matches.last().map(|m| m.last_in_round).unwrap_or(false));
        }
    }

    #[test]
    fn second_half_mirrors_first() {
        let p = plan(6, 9);
        let days = 5;
        for k in 0..days {
            let first = &p.rounds[k].matches;
            let second = &p.rounds[k + days].matches;
            for (a, b) in first.iter().zip(second) {
                assert_eq!(a.home_club_id, b.away_club_id);
                assert_eq!(a.away_club_id, b.home_club_id);
            }
        }
    }

    #[test]
    fn shuffle_depends_on_seed() {
        let orders: HashSet<Vec<(i64, i64)>> = (0..10)
            .map(|seed| {
                plan(10, seed)
                    .rounds
                    .iter()
                    .map(|r| (r.matches[0].home_club_id, r.matches[0].away_club_id))
                    .collect()
            })
            .collect();
        assert!(orders.len() > 1);
    }

    #[test]
    fn odd_and_tiny_leagues_are_rejected() {
        let start = datetime!(2026-08-01 15:00 UTC);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = generate(&[1, 2, 3], start, Duration::minutes(10), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::OddClubCount, _)
        ));
        let err = generate(&[], start, Duration::minutes(10), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::TooFewClubs, _)
        ));
        let err = generate(&[1, 1], start, Duration::minutes(10), &mut rng).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_, _)));
    }

    #[test]
    fn two_clubs_meet_twice() {
        let p = plan(2, 0);
        assert_eq!(p.rounds.len(), 2);
        assert_eq!(p.rounds[0].matches.len(), 1);
        let a = &p.rounds[0].matches[0];
        let b = &p.rounds[1].matches[0];
        assert_eq!((a.home_club_id, a.away_club_id), (b.away_club_id, b.home_club_id));
    }
}
