//! Per-team match statistics tallied from a replay's narrative.

use serde::{Deserialize, Serialize};

use super::events::MatchEventKind;
use super::replay::MatchEvent;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStats {
    pub goals: u16,
    pub shots: u16,
    pub on_target: u16,
    pub saves: u16,
    pub fouls: u16,
    pub yellow_cards: u16,
    pub red_cards: u16,
    pub corners: u16,
    pub offsides: u16,
    pub substitutions: u16,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    pub home: TeamStats,
    pub away: TeamStats,
}

impl MatchStats {
    /// Tally a narrative. Events credited to neither club are ignored.
    ///
    /// A goal is a shot on target; a save is a shot on target by the side
    /// that did not make it.
    pub fn from_events(home_club_id: i64, away_club_id: i64, events: &[MatchEvent]) -> Self {
        let mut stats = MatchStats::default();
        for event in events {
            let (own, other) = match event.club_id {
                Some(id) if id == home_club_id => (&mut stats.home, &mut stats.away),
                Some(id) if id == away_club_id => (&mut stats.away, &mut stats.home),
                _ => continue,
            };
            match event.kind {
                MatchEventKind::Goal => {
                    own.goals += 1;
                    own.shots += 1;
                    own.on_target += 1;
                }
                MatchEventKind::ShotOnTarget => {
                    own.shots += 1;
                    own.on_target += 1;
                }
                MatchEventKind::ShotOffTarget => own.shots += 1,
                MatchEventKind::Save => {
                    own.saves += 1;
                    other.shots += 1;
                    other.on_target += 1;
                }
                MatchEventKind::Foul => own.fouls += 1,
                MatchEventKind::YellowCard => own.yellow_cards += 1,
                MatchEventKind::RedCard => own.red_cards += 1,
                MatchEventKind::Corner => own.corners += 1,
                MatchEventKind::Offside => own.offsides += 1,
                MatchEventKind::Substitution => own.substitutions += 1,
                _ => {}
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(kind: MatchEventKind, club_id: Option<i64>) -> MatchEvent {
        MatchEvent {
            seq: 0,
            minute: 10,
            stoppage: 0,
            kind,
            club_id,
            player_id: None,
            description: kind.to_string(),
            home_score: 0,
            away_score: 0,
        }
    }

    #[test]
    fn saves_count_as_shots_for_the_other_side() {
        let events = [
            event(MatchEventKind::Goal, Some(1)),
            event(MatchEventKind::ShotOffTarget, Some(1)),
            event(MatchEventKind::Save, Some(2)),
            event(MatchEventKind::Foul, Some(2)),
            event(MatchEventKind::YellowCard, Some(2)),
            event(MatchEventKind::KickOff, Some(1)),
            event(MatchEventKind::HalfTime, None),
        ];
        let stats = MatchStats::from_events(1, 2, &events);

        assert_eq!(stats.home.goals, 1);
        assert_eq!(stats.home.shots, 3);
        assert_eq!(stats.home.on_target, 2);
        assert_eq!(stats.away.saves, 1);
        assert_eq!(stats.away.shots, 0);
        assert_eq!(stats.away.fouls, 1);
        assert_eq!(stats.away.yellow_cards, 1);
    }

    #[test]
    fn events_for_other_clubs_are_ignored() {
        let stats = MatchStats::from_events(1, 2, &[event(MatchEventKind::Corner, Some(9))]);
        assert_eq!(stats, MatchStats::default());
    }
}
