//! Catalogue of discrete match events shown in the live narrative.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchEventKind {
    KickOff,
    Goal,
    Assist,
    YellowCard,
    RedCard,
    Substitution,
    Injury,
    Offside,
    Foul,
    Corner,
    FreeKick,
    Penalty,
    Save,
    ShotOnTarget,
    ShotOffTarget,
    HalfTime,
    FullTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Minor,
    Normal,
    Major,
}

impl MatchEventKind {
    pub const ALL: [MatchEventKind; 17] = [
        MatchEventKind::KickOff,
        MatchEventKind::Goal,
        MatchEventKind::Assist,
        MatchEventKind::YellowCard,
        MatchEventKind::RedCard,
        MatchEventKind::Substitution,
        MatchEventKind::Injury,
        MatchEventKind::Offside,
        MatchEventKind::Foul,
        MatchEventKind::Corner,
        MatchEventKind::FreeKick,
        MatchEventKind::Penalty,
        MatchEventKind::Save,
        MatchEventKind::ShotOnTarget,
        MatchEventKind::ShotOffTarget,
        MatchEventKind::HalfTime,
        MatchEventKind::FullTime,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MatchEventKind::KickOff => "KICK_OFF",
            MatchEventKind::Goal => "GOAL",
            MatchEventKind::Assist => "ASSIST",
            MatchEventKind::YellowCard => "YELLOW_CARD",
            MatchEventKind::RedCard => "RED_CARD",
            MatchEventKind::Substitution => "SUBSTITUTION",
            MatchEventKind::Injury => "INJURY",
            MatchEventKind::Offside => "OFFSIDE",
            MatchEventKind::Foul => "FOUL",
            MatchEventKind::Corner => "CORNER",
            MatchEventKind::FreeKick => "FREE_KICK",
            MatchEventKind::Penalty => "PENALTY",
            MatchEventKind::Save => "SAVE",
            MatchEventKind::ShotOnTarget => "SHOT_ON_TARGET",
            MatchEventKind::ShotOffTarget => "SHOT_OFF_TARGET",
            MatchEventKind::HalfTime => "HALF_TIME",
            MatchEventKind::FullTime => "FULL_TIME",
        }
    }

    pub fn severity(self) -> Severity {
        use MatchEventKind::*;
        match self {
            Goal | RedCard | Penalty => Severity::Major,
            YellowCard | Substitution | Injury | Save | ShotOnTarget | Assist => Severity::Normal,
            KickOff | HalfTime | FullTime | Offside | Foul | Corner | FreeKick | ShotOffTarget => {
                Severity::Minor
            }
        }
    }

    /// Key events drive the intensity meter and are flagged on the feed.
    pub fn is_key(self) -> bool {
        matches!(
            self,
            MatchEventKind::Goal
                | MatchEventKind::RedCard
                | MatchEventKind::Penalty
                | MatchEventKind::KickOff
                | MatchEventKind::HalfTime
                | MatchEventKind::FullTime
        )
    }

    /// Markers of the match clock rather than of play.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            MatchEventKind::KickOff | MatchEventKind::HalfTime | MatchEventKind::FullTime
        )
    }

    pub fn intensity_bump(self) -> f32 {
        match self.severity() {
            Severity::Major => 0.35,
            Severity::Normal => 0.12,
            Severity::Minor => 0.04,
        }
    }
}

impl fmt::Display for MatchEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchEventKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MatchEventKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| DomainError::validation_other(format!("Unknown match event kind: {s}")))
    }
}
