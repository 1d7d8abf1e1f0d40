//! Minute-by-minute live narrative for a match whose result is already known.
//!
//! The engine never decides the result. Goals are drawn against a per-side
//! budget equal to the authoritative score, and whatever budget is still open
//! when the clock runs out of minutes is flushed, so the running score always
//! finishes on the target. Everything else (shots, cards, corners) is
//! cosmetic.

use std::collections::{HashMap, HashSet};

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::events::MatchEventKind;
use super::formation::{Formation, Module};
use super::outcome::{Score, Side};
use super::squad::{Role, SquadPlayer};
use crate::errors::domain::DomainError;

pub const HALF_LENGTH: u8 = 45;
pub const FULL_LENGTH: u8 = 90;
pub const MAX_SUBSTITUTIONS: u8 = 3;
pub const ASSIST_CHANCE: f64 = 0.6;

const BASE_EVENT_RATE: f64 = 0.22;
const LATE_BOOST: f64 = 0.12;
const INTENSITY_WEIGHT: f64 = 0.2;
const MAX_EVENT_RATE: f64 = 0.85;
const INTENSITY_DECAY: f32 = 0.92;
const PENALTY_CONVERSION: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    PreMatch,
    FirstHalf,
    HalfTime,
    SecondHalf,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayPlayer {
    pub id: i64,
    pub name: String,
    pub role: Role,
}

impl From<&SquadPlayer> for ReplayPlayer {
    fn from(p: &SquadPlayer) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            role: p.role,
        }
    }
}

/// Owned team sheet for a replay: starting eleven plus bench.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayTeam {
    pub club_id: i64,
    pub name: String,
    pub on_pitch: Vec<ReplayPlayer>,
    pub bench: Vec<ReplayPlayer>,
}

impl ReplayTeam {
    pub fn from_squad(
        club_id: i64,
        name: impl Into<String>,
        squad: &[SquadPlayer],
        module: Module,
    ) -> Result<Self, DomainError> {
        let formation = Formation::select(squad, module)?;
        let starters: HashSet<i64> = formation.lineup().iter().map(|p| p.id).collect();
        let (on_pitch, bench): (Vec<_>, Vec<_>) =
            squad.iter().partition(|p| starters.contains(&p.id));
        Ok(Self {
            club_id,
            name: name.into(),
            on_pitch: on_pitch.into_iter().map(ReplayPlayer::from).collect(),
            bench: bench.into_iter().map(ReplayPlayer::from).collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub seq: i32,
    pub minute: u8,
    /// Minutes into added time; zero during regular time
    pub stoppage: u8,
    pub kind: MatchEventKind,
    pub club_id: Option<i64>,
    pub player_id: Option<i64>,
    pub description: String,
    pub home_score: u8,
    pub away_score: u8,
}

impl MatchEvent {
    pub fn is_key(&self) -> bool {
        self.kind.is_key()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveSnapshot {
    pub match_id: i64,
    pub phase: Phase,
    pub minute: u8,
    pub stoppage: u8,
    pub home_score: u8,
    pub away_score: u8,
    pub intensity: f32,
    pub event_count: usize,
    /// Stoppage allowance of the half being played
    pub added_time: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    KickOff,
    Minute,
    HalfTime,
    FullTime,
}

/// What one call to [`ReplayEngine::step`] produced.
#[derive(Debug, Clone)]
pub struct Step {
    pub tick: Tick,
    pub minute: u8,
    pub stoppage: u8,
    pub events: Vec<MatchEvent>,
}

impl Step {
    /// Snapshots go out on clock changes, on goals, on every `every`-th
    /// regular minute and on each added minute.
    pub fn snapshot_due(&self, every: u8) -> bool {
        match self.tick {
            Tick::KickOff | Tick::HalfTime | Tick::FullTime => true,
            Tick::Minute => {
                every <= 1
                    || self.stoppage > 0
                    || self.minute % every == 0
                    || self.events.iter().any(|e| e.kind == MatchEventKind::Goal)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayOutcome {
    pub score: Score,
    pub events: Vec<MatchEvent>,
}

#[derive(Debug)]
struct SideState {
    team: ReplayTeam,
    withdrawn: Vec<ReplayPlayer>,
    booked: HashMap<i64, u8>,
    substitutions: u8,
}

impl SideState {
    fn new(team: ReplayTeam) -> Self {
        Self {
            team,
            withdrawn: Vec::new(),
            booked: HashMap::new(),
            substitutions: 0,
        }
    }

    fn name_of(&self, player_id: i64) -> String {
        self.team
            .on_pitch
            .iter()
            .chain(self.team.bench.iter())
            .chain(self.withdrawn.iter())
            .find(|p| p.id == player_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }

    fn keeper(&self) -> Option<&ReplayPlayer> {
        self.team
            .on_pitch
            .iter()
            .find(|p| p.role == Role::Goalkeeper)
            .or_else(|| self.team.on_pitch.first())
    }
}

pub struct ReplayEngine<R> {
    match_id: i64,
    rng: R,
    sides: [SideState; 2],
    target: Score,
    score: Score,
    phase: Phase,
    minute: u8,
    stoppage: u8,
    added: [u8; 2],
    played_slots: u32,
    intensity: f32,
    events: Vec<MatchEvent>,
}

impl<R: Rng> ReplayEngine<R> {
    pub fn new(match_id: i64, home: ReplayTeam, away: ReplayTeam, target: Score, mut rng: R) -> Self {
        let added = [rng.random_range(1..=5u8), rng.random_range(1..=5u8)];
        Self {
            match_id,
            rng,
            sides: [SideState::new(home), SideState::new(away)],
            target,
            score: Score::default(),
            phase: Phase::PreMatch,
            minute: 0,
            stoppage: 0,
            added,
            played_slots: 0,
            intensity: 0.0,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    /// Stoppage allowance of the first and second half.
    pub fn added_time(&self) -> [u8; 2] {
        self.added
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn snapshot(&self) -> LiveSnapshot {
        let added_time = match self.phase {
            Phase::PreMatch | Phase::FirstHalf | Phase::HalfTime => self.added[0],
            Phase::SecondHalf | Phase::Finished => self.added[1],
        };
        LiveSnapshot {
            match_id: self.match_id,
            phase: self.phase,
            minute: self.minute,
            stoppage: self.stoppage,
            home_score: self.score.home,
            away_score: self.score.away,
            intensity: self.intensity,
            event_count: self.events.len(),
            added_time,
        }
    }

    /// Advance the clock by one unit. Returns `None` once the match is over.
    pub fn step(&mut self) -> Option<Step> {
        let before = self.events.len();
        let tick = match self.phase {
            Phase::PreMatch => {
                self.phase = Phase::FirstHalf;
                self.whistle(MatchEventKind::KickOff, Some(Side::Home));
                Tick::KickOff
            }
            Phase::FirstHalf => {
                if self.advance_clock(HALF_LENGTH, self.added[0]) {
                    self.play_minute();
                    Tick::Minute
                } else {
                    self.phase = Phase::HalfTime;
                    self.whistle(MatchEventKind::HalfTime, None);
                    Tick::HalfTime
                }
            }
            Phase::HalfTime => {
                self.phase = Phase::SecondHalf;
                self.minute = HALF_LENGTH;
                self.stoppage = 0;
                self.whistle(MatchEventKind::KickOff, Some(Side::Away));
                Tick::KickOff
            }
            Phase::SecondHalf => {
                if self.advance_clock(FULL_LENGTH, self.added[1]) {
                    self.play_minute();
                    Tick::Minute
                } else {
                    self.phase = Phase::Finished;
                    self.whistle(MatchEventKind::FullTime, None);
                    Tick::FullTime
                }
            }
            Phase::Finished => return None,
        };
        Some(Step {
            tick,
            minute: self.minute,
            stoppage: self.stoppage,
            events: self.events[before..].to_vec(),
        })
    }

    /// Play every remaining step without pacing.
    pub fn run_to_end(mut self) -> ReplayOutcome {
        while self.step().is_some() {}
        self.into_outcome()
    }

    pub fn into_outcome(self) -> ReplayOutcome {
        ReplayOutcome {
            score: self.score,
            events: self.events,
        }
    }

    fn advance_clock(&mut self, regular_end: u8, added: u8) -> bool {
        if self.minute < regular_end {
            self.minute += 1;
            true
        } else if self.stoppage < added {
            self.stoppage += 1;
            true
        } else {
            false
        }
    }

    fn total_slots(&self) -> u32 {
        FULL_LENGTH as u32 + self.added[0] as u32 + self.added[1] as u32
    }

    fn budget(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.target.home.saturating_sub(self.score.home) as u32,
            Side::Away => self.target.away.saturating_sub(self.score.away) as u32,
        }
    }

    fn play_minute(&mut self) {
        let remaining = self.total_slots().saturating_sub(self.played_slots).max(1);
        for side in [Side::Home, Side::Away] {
            let budget = self.budget(side);
            if budget == 0 {
                continue;
            }
            let goals = if budget >= remaining {
                budget - (remaining - 1)
            } else if self.rng.random_bool(budget as f64 / remaining as f64) {
                1
            } else {
                0
            };
            for _ in 0..goals {
                self.goal(side, None);
            }
        }

        if self.rng.random_bool(self.event_probability()) {
            self.random_event();
        }

        self.intensity *= INTENSITY_DECAY;
        self.played_slots += 1;
    }

    fn event_probability(&self) -> f64 {
        let late = self.stoppage > 0
            || (self.phase == Phase::FirstHalf && self.minute >= HALF_LENGTH - 5)
            || (self.phase == Phase::SecondHalf && self.minute >= FULL_LENGTH - 5);
        let mut p = BASE_EVENT_RATE + self.intensity as f64 * INTENSITY_WEIGHT;
        if late {
            p += LATE_BOOST;
        }
        p.clamp(0.0, MAX_EVENT_RATE)
    }

    fn event_weights(&self) -> Vec<(MatchEventKind, u32)> {
        use MatchEventKind::*;
        let goal_weight = 4 + (self.intensity * 3.0) as u32;
        let mut weights = vec![
            (ShotOnTarget, 14),
            (ShotOffTarget, 14),
            (Foul, 18),
            (Corner, 12),
            (Save, 8),
            (Offside, 8),
            (FreeKick, 8),
            (YellowCard, 6),
            (Goal, goal_weight),
            (Injury, 2),
            (RedCard, 1),
            (Penalty, 2),
        ];
        if self.phase == Phase::SecondHalf {
            weights.push((Substitution, 6));
        }
        weights
    }

    fn random_event(&mut self) {
        let weights = self.event_weights();
        let Some(kind) = pick_weighted(&mut self.rng, &weights) else {
            return;
        };
        let side = if self.rng.random_bool(0.52) {
            Side::Home
        } else {
            Side::Away
        };

        match kind {
            MatchEventKind::Goal => {
                if self.budget(side) > 0 {
                    self.goal(side, None);
                } else {
                    self.save(side.other(), side);
                }
            }
            MatchEventKind::Save => self.save(side, side.other()),
            MatchEventKind::Penalty => self.penalty(side),
            MatchEventKind::YellowCard => self.booking(side),
            MatchEventKind::RedCard => {
                if let Some(player) = self.random_outfielder(side) {
                    self.send_off(side, player, "straight red card");
                }
            }
            MatchEventKind::Substitution => {
                self.substitution(side, None);
            }
            MatchEventKind::Injury => {
                if let Some(player) = self.random_outfielder(side) {
                    let name = self.sides[side.index()].name_of(player);
                    self.push(
                        MatchEventKind::Injury,
                        Some(side),
                        Some(player),
                        format!("{name} goes down injured"),
                    );
                    if self.phase == Phase::SecondHalf || self.rng.random_bool(0.5) {
                        self.substitution(side, Some(player));
                    }
                }
            }
            other => {
                let player = self.random_player(side);
                let name = player.map(|id| self.sides[side.index()].name_of(id));
                let club = self.sides[side.index()].team.name.clone();
                let who = name.unwrap_or_else(|| club.clone());
                let description = match other {
                    MatchEventKind::ShotOnTarget => format!("{who} forces a stop with a shot on target"),
                    MatchEventKind::ShotOffTarget => format!("{who} shoots wide"),
                    MatchEventKind::Foul => format!("Foul by {who}"),
                    MatchEventKind::Corner => format!("Corner to {club}, taken by {who}"),
                    MatchEventKind::Offside => format!("{who} is caught offside"),
                    MatchEventKind::FreeKick => format!("Free kick to {club}, {who} over the ball"),
                    _ => format!("{other} ({club})"),
                };
                self.push(other, Some(side), player, description);
            }
        }
    }

    fn goal(&mut self, side: Side, taker: Option<i64>) {
        let scorer = taker.or_else(|| self.pick_scorer(side));
        match side {
            Side::Home => self.score.home += 1,
            Side::Away => self.score.away += 1,
        }
        let state = &self.sides[side.index()];
        let club = state.team.name.clone();
        let description = match scorer {
            Some(id) => format!("GOAL! {} scores for {club}", state.name_of(id)),
            None => format!("GOAL for {club}"),
        };
        self.push(MatchEventKind::Goal, Some(side), scorer, description);

        if taker.is_none() && self.rng.random_bool(ASSIST_CHANCE) {
            let candidates: Vec<i64> = self.sides[side.index()]
                .team
                .on_pitch
                .iter()
                .filter(|p| Some(p.id) != scorer)
                .map(|p| p.id)
                .collect();
            if let Some(&assist) = candidates.choose(&mut self.rng) {
                let name = self.sides[side.index()].name_of(assist);
                self.push(
                    MatchEventKind::Assist,
                    Some(side),
                    Some(assist),
                    format!("Assisted by {name}"),
                );
            }
        }
    }

    fn save(&mut self, keeper_side: Side, shooter_side: Side) {
        let keeper = self.sides[keeper_side.index()].keeper().map(|p| (p.id, p.name.clone()));
        let shooter_club = self.sides[shooter_side.index()].team.name.clone();
        let (id, description) = match keeper {
            Some((id, name)) => (Some(id), format!("{name} saves from a {shooter_club} attempt")),
            None => (None, format!("{shooter_club} attempt is blocked")),
        };
        self.push(MatchEventKind::Save, Some(keeper_side), id, description);
    }

    fn penalty(&mut self, side: Side) {
        let taker = self.pick_scorer(side);
        let club = self.sides[side.index()].team.name.clone();
        self.push(
            MatchEventKind::Penalty,
            Some(side),
            taker,
            format!("Penalty to {club}"),
        );
        if self.budget(side) > 0 && self.rng.random_bool(PENALTY_CONVERSION) {
            self.goal(side, taker);
        } else {
            self.save(side.other(), side);
        }
    }

    fn booking(&mut self, side: Side) {
        let Some(player) = self.random_outfielder(side) else {
            return;
        };
        let name = self.sides[side.index()].name_of(player);
        let cards = {
            let entry = self.sides[side.index()].booked.entry(player).or_insert(0);
            *entry += 1;
            *entry
        };
        self.push(
            MatchEventKind::YellowCard,
            Some(side),
            Some(player),
            format!("{name} is booked"),
        );
        if cards >= 2 {
            self.send_off(side, player, "second yellow card");
        }
    }

    fn send_off(&mut self, side: Side, player: i64, reason: &str) {
        let name = self.sides[side.index()].name_of(player);
        self.push(
            MatchEventKind::RedCard,
            Some(side),
            Some(player),
            format!("{name} is sent off ({reason})"),
        );
        self.sides[side.index()].team.on_pitch.retain(|p| p.id != player);
    }

    fn substitution(&mut self, side: Side, off: Option<i64>) {
        let state = &self.sides[side.index()];
        if state.substitutions >= MAX_SUBSTITUTIONS || state.team.bench.is_empty() {
            return;
        }
        let off = match off.or_else(|| self.random_outfielder(side)) {
            Some(id) => id,
            None => return,
        };
        let state = &mut self.sides[side.index()];
        let Some(pos) = state.team.on_pitch.iter().position(|p| p.id == off) else {
            return;
        };
        let bench_idx = self.rng.random_range(0..state.team.bench.len());
        let incoming = state.team.bench.remove(bench_idx);
        let outgoing = state.team.on_pitch.remove(pos);
        let description = format!("{} replaces {}", incoming.name, outgoing.name);
        let incoming_id = incoming.id;
        state.team.on_pitch.push(incoming);
        state.withdrawn.push(outgoing);
        state.substitutions += 1;
        self.push(
            MatchEventKind::Substitution,
            Some(side),
            Some(incoming_id),
            description,
        );
    }

    fn whistle(&mut self, kind: MatchEventKind, side: Option<Side>) {
        let description = match kind {
            MatchEventKind::KickOff if self.phase == Phase::SecondHalf => {
                "Second half under way".to_string()
            }
            MatchEventKind::KickOff => "Kick-off".to_string(),
            MatchEventKind::HalfTime => {
                format!("Half-time: {}-{}", self.score.home, self.score.away)
            }
            _ => format!("Full-time: {}-{}", self.score.home, self.score.away),
        };
        self.push(kind, side, None, description);
    }

    fn pick_scorer(&mut self, side: Side) -> Option<i64> {
        let weighted: Vec<(i64, u32)> = self.sides[side.index()]
            .team
            .on_pitch
            .iter()
            .map(|p| (p.id, scoring_weight(p.role)))
            .collect();
        pick_weighted(&mut self.rng, &weighted).or_else(|| self.random_player(side))
    }

    fn random_player(&mut self, side: Side) -> Option<i64> {
        self.sides[side.index()]
            .team
            .on_pitch
            .choose(&mut self.rng)
            .map(|p| p.id)
    }

    fn random_outfielder(&mut self, side: Side) -> Option<i64> {
        let outfield: Vec<i64> = self.sides[side.index()]
            .team
            .on_pitch
            .iter()
            .filter(|p| p.role != Role::Goalkeeper)
            .map(|p| p.id)
            .collect();
        outfield.choose(&mut self.rng).copied()
    }

    fn push(&mut self, kind: MatchEventKind, side: Option<Side>, player_id: Option<i64>, description: String) {
        self.intensity = (self.intensity + kind.intensity_bump()).min(1.0);
        let club_id = side.map(|s| self.sides[s.index()].team.club_id);
        self.events.push(MatchEvent {
            seq: self.events.len() as i32 + 1,
            minute: self.minute,
            stoppage: self.stoppage,
            kind,
            club_id,
            player_id,
            description,
            home_score: self.score.home,
            away_score: self.score.away,
        });
    }
}

fn scoring_weight(role: Role) -> u32 {
    match role {
        Role::Forward => 5,
        Role::Winger => 3,
        Role::Midfielder => 2,
        Role::CentralDefender | Role::WingBack => 1,
        Role::Goalkeeper => 0,
    }
}

fn pick_weighted<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[(T, u32)]) -> Option<T> {
    let total: u32 = items.iter().map(|(_, w)| w).sum();
    if total == 0 {
        return None;
    }
    let mut roll = rng.random_range(0..total);
    for (item, weight) in items {
        if roll < *weight {
            return Some(*item);
        }
        roll -= weight;
    }
    None
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::domain::squad::Attributes;

    fn team(club_id: i64) -> ReplayTeam {
        let roles = [
            Role::Goalkeeper,
            Role::CentralDefender,
            Role::CentralDefender,
            Role::WingBack,
            Role::WingBack,
            Role::Midfielder,
            Role::Midfielder,
            Role::Winger,
            Role::Winger,
            Role::Forward,
            Role::Forward,
            Role::Goalkeeper,
            Role::Midfielder,
            Role::Forward,
            Role::CentralDefender,
        ];
        let squad: Vec<SquadPlayer> = roles
            .iter()
            .enumerate()
            .map(|(i, role)| SquadPlayer {
                id: club_id * 100 + i as i64,
                name: format!("P{club_id}-{i}"),
                role: *role,
                attrs: Attributes::uniform(60),
            })
            .collect();
        ReplayTeam::from_squad(club_id, format!("Club {club_id}"), &squad, Module::FourFourTwo)
            .unwrap()
    }

    fn engine(target: Score, seed: u64) -> ReplayEngine<ChaCha8Rng> {
        ReplayEngine::new(7, team(1), team(2), target, ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn final_score_always_matches_target() {
        let targets = [
            Score::new(0, 0),
            Score::new(1, 0),
            Score::new(5, 3),
            Score::new(0, 7),
            Score::new(10, 10),
        ];
        for target in targets {
            for seed in 0..60 {
                let outcome = engine(target, seed).run_to_end();
                assert_eq!(outcome.score, target, "seed {seed}");
                let home_goals = outcome
                    .events
                    .iter()
                    .filter(|e| e.kind == MatchEventKind::Goal && e.club_id == Some(1))
                    .count();
                assert_eq!(home_goals, target.home as usize);
            }
        }
    }

    #[test]
    fn phases_run_in_order() {
        let mut e = engine(Score::new(2, 1), 3);
        assert_eq!(e.phase(), Phase::PreMatch);
        let mut ticks = Vec::new();
        let mut seen = vec![e.phase()];
        while let Some(step) = e.step() {
            if step.tick != Tick::Minute {
                ticks.push(step.tick);
            }
            if seen.last() != Some(&e.phase()) {
                seen.push(e.phase());
            }
        }
        assert_eq!(
            ticks,
            vec![Tick::KickOff, Tick::HalfTime, Tick::KickOff, Tick::FullTime]
        );
        assert_eq!(
            seen,
            vec![
                Phase::PreMatch,
                Phase::FirstHalf,
                Phase::HalfTime,
                Phase::SecondHalf,
                Phase::Finished
            ]
        );
        assert!(e.step().is_none());
    }

    #[test]
    fn stoppage_is_bounded() {
        for seed in 0..50 {
            let e = engine(Score::default(), seed);
            for added in e.added_time() {
                assert!((1..=5).contains(&added));
            }
            let outcome = e.run_to_end();
            assert!(outcome.events.iter().all(|ev| ev.stoppage <= 5));
        }
    }

    #[test]
    fn events_are_ordered_and_numbered() {
        let outcome = engine(Score::new(3, 2), 11).run_to_end();
        for (i, ev) in outcome.events.iter().enumerate() {
            assert_eq!(ev.seq, i as i32 + 1);
        }
        for pair in outcome.events.windows(2) {
            assert!((pair[0].minute, pair[0].stoppage) <= (pair[1].minute, pair[1].stoppage)
                || pair[1].kind == MatchEventKind::KickOff);
        }
        assert_eq!(outcome.events.first().map(|e| e.kind), Some(MatchEventKind::KickOff));
        assert_eq!(outcome.events.last().map(|e| e.kind), Some(MatchEventKind::FullTime));
    }

    #[test]
    fn assists_follow_their_goal() {
        let mut assists = 0;
        for seed in 0..40 {
            let outcome = engine(Score::new(4, 4), seed).run_to_end();
            for pair in outcome.events.windows(2) {
                if pair[1].kind == MatchEventKind::Assist {
                    assists += 1;
                    assert_eq!(pair[0].kind, MatchEventKind::Goal);
                    assert_eq!(pair[0].club_id, pair[1].club_id);
                    assert_ne!(pair[0].player_id, pair[1].player_id);
                }
            }
        }
        assert!(assists > 0);
    }

    #[test]
    fn dismissed_players_take_no_further_part() {
        for seed in 0..80 {
            let outcome = engine(Score::new(2, 2), seed).run_to_end();
            let mut off: HashSet<i64> = HashSet::new();
            for ev in &outcome.events {
                if let Some(pid) = ev.player_id {
                    assert!(!off.contains(&pid), "seed {seed}: {pid} reappeared");
                }
                if ev.kind == MatchEventKind::RedCard {
                    if let Some(pid) = ev.player_id {
                        off.insert(pid);
                    }
                }
            }
        }
    }

    #[test]
    fn substitutions_are_capped() {
        for seed in 0..80 {
            let outcome = engine(Score::new(1, 1), seed).run_to_end();
            for club in [1, 2] {
                let subs = outcome
                    .events
                    .iter()
                    .filter(|e| e.kind == MatchEventKind::Substitution && e.club_id == Some(club))
                    .count();
                assert!(subs <= MAX_SUBSTITUTIONS as usize);
            }
        }
    }

    #[test]
    fn snapshot_tracks_running_state() {
        let mut e = engine(Score::new(1, 0), 5);
        e.step();
        let snap = e.snapshot();
        assert_eq!(snap.match_id, 7);
        assert_eq!(snap.phase, Phase::FirstHalf);
        assert_eq!(snap.event_count, 1);
        while e.step().is_some() {}
        let snap = e.snapshot();
        assert_eq!(snap.phase, Phase::Finished);
        assert_eq!((snap.home_score, snap.away_score), (1, 0));
    }

    #[test]
    fn same_seed_same_narrative() {
        let a = engine(Score::new(2, 3), 42).run_to_end();
        let b = engine(Score::new(2, 3), 42).run_to_end();
        assert_eq!(a, b);
    }
}
