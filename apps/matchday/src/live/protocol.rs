use serde::{Deserialize, Serialize};

use crate::domain::replay::{LiveSnapshot, MatchEvent};

/// One message on a match feed, as delivered to presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedMessage {
    Snapshot(LiveSnapshot),
    Event { match_id: i64, event: MatchEvent },
}

impl FeedMessage {
    pub fn match_id(&self) -> i64 {
        match self {
            FeedMessage::Snapshot(s) => s.match_id,
            FeedMessage::Event { match_id, .. } => *match_id,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::MatchEventKind;
    use crate::domain::replay::Phase;

    #[test]
    fn snapshot_is_tagged() {
        let msg = FeedMessage::Snapshot(LiveSnapshot {
            match_id: 3,
            phase: Phase::FirstHalf,
            minute: 10,
            stoppage: 0,
            home_score: 1,
            away_score: 0,
            intensity: 0.5,
            event_count: 4,
            added_time: 2,
        });
        let value: serde_json::Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(value["type"], "snapshot");
        assert_eq!(value["phase"], "FIRST_HALF");
        assert_eq!(value["match_id"], 3);
    }

    #[test]
    fn event_is_tagged() {
        let msg = FeedMessage::Event {
            match_id: 9,
            event: MatchEvent {
                seq: 1,
                minute: 0,
                stoppage: 0,
                kind: MatchEventKind::KickOff,
                club_id: Some(1),
                player_id: None,
                description: "Kick-off".into(),
                home_score: 0,
                away_score: 0,
            },
        };
        let value: serde_json::Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(value["type"], "event");
        assert_eq!(value["event"]["kind"], "KICK_OFF");
        assert_eq!(msg.match_id(), 9);
    }
}
