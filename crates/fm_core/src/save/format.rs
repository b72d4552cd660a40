//! On-disk snapshot format: a pretty-printed JSON document.

use super::error::StoreError;
use crate::models::Snapshot;

/// Parses and validates a snapshot document.
pub fn decode_snapshot(text: &str) -> Result<Snapshot, StoreError> {
    let snapshot: Snapshot = serde_json::from_str(text)?;
    snapshot.validate().map_err(|e| StoreError::Malformed(e.to_string()))?;
    Ok(snapshot)
}

pub fn encode_snapshot(snapshot: &Snapshot) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchEvent, MatchResult, Player, PlayerStats, Position, Team, Transfer, Money};
    use chrono::{TimeZone, Utc};

    const MINIMAL: &str = r#"{
        "teams": [{ "name": "Celtic", "league_position": 1, "points": 40 }],
        "players": [{
            "name": "Furuhashi", "team": "Celtic", "position": "Forward",
            "age": 29, "rating": 80,
            "stats": { "goals": 12, "assists": 3, "minutes_played": 1500, "shots_on_target": 25 }
        }]
    }"#;

    #[test]
    fn test_decode_without_histories() {
        let snap = decode_snapshot(MINIMAL).unwrap();
        assert_eq!(snap.teams[0].points, 40);
        assert_eq!(snap.players[0].stats, PlayerStats::new(12, 3, 1500, 25));
        assert!(snap.match_history.is_empty());
        assert!(snap.transfer_history.is_empty());
    }

    #[test]
    fn test_missing_stats_field_is_rejected() {
        let text = MINIMAL.replace(r#""assists": 3, "#, "");
        let err = decode_snapshot(&text).unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
        assert!(err.to_string().contains("assists"), "{}", err);
    }

    #[test]
    fn test_invalid_snapshot_is_malformed() {
        let text = MINIMAL.replace(r#""team": "Celtic""#, r#""team": "Rangers""#);
        assert!(matches!(decode_snapshot(&text), Err(StoreError::Malformed(_))));
    }

    #[test]
    fn test_encode_keeps_histories() {
        let played_at = Utc.with_ymd_and_hms(2024, 5, 1, 15, 0, 0).unwrap();
        let mut snap = Snapshot::new(
            vec![Team::new("Celtic", 1, 40), Team::new("Hearts", 3, 30)],
            vec![
                Player::new("Kyogo", "Celtic", Position::Forward, 29, 80),
                Player::new("Shankland", "Hearts", Position::Forward, 28, 76),
            ],
        );
        snap.match_history.push(MatchResult::new(
            "Celtic",
            "Hearts",
            90,
            vec![MatchEvent::goal(9, true, "Celtic", "Kyogo")],
            played_at,
        ));
        snap.transfer_history.push(Transfer {
            player: "Shankland".into(),
            from_team: "Hearts".into(),
            to_team: "Celtic".into(),
            fee: Money(12_000_000),
            date: played_at,
        });

        let text = encode_snapshot(&snap).unwrap();
        assert!(text.contains(r#""type": "goal""#));
        assert_eq!(decode_snapshot(&text).unwrap(), snap);
    }
}
