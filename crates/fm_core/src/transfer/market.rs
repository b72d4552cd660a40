//! Transfer execution.

use super::valuation::calculate_value;
use crate::error::{CoreError, Result};
use crate::models::{Snapshot, Transfer};
use chrono::{DateTime, Utc};

pub struct TransferMarket;

impl TransferMarket {
    /// Moves `player_name` to `destination` for its current market value.
    ///
    /// Fails with [`CoreError::AmbiguousPlayer`] when several teams have a player
    /// of that name; use [`TransferMarket::transfer_player_from`] then.
    pub fn transfer_player(
        snapshot: &mut Snapshot,
        player_name: &str,
        destination: &str,
        date: DateTime<Utc>,
    ) -> Result<Transfer> {
        let idx = snapshot.player_index(player_name)?;
        Self::execute(snapshot, idx, destination, date)
    }

    pub fn transfer_player_from(
        snapshot: &mut Snapshot,
        player_name: &str,
        source: &str,
        destination: &str,
        date: DateTime<Utc>,
    ) -> Result<Transfer> {
        let source_name = snapshot.find_team(source)?.name.clone();
        let idx = snapshot
            .players
            .iter()
            .position(|p| p.plays_for(&source_name) && p.has_name(player_name))
            .ok_or_else(|| CoreError::PlayerNotFound(format!("{} ({})", player_name, source_name)))?;
        Self::execute(snapshot, idx, destination, date)
    }

    /// Every check runs before the single write to `player.team`, so the
    /// player is never on both rosters or on none.
    fn execute(
        snapshot: &mut Snapshot,
        idx: usize,
        destination: &str,
        date: DateTime<Utc>,
    ) -> Result<Transfer> {
        let to_team = snapshot.find_team(destination)?.name.clone();
        let player = &snapshot.players[idx];

        if player.plays_for(&to_team) {
            return Err(CoreError::Validation(format!(
                "{} already plays for {}",
                player.name, to_team
            )));
        }
        if snapshot.roster(&to_team).any(|p| p.has_name(&player.name)) {
            return Err(CoreError::Validation(format!(
                "{} already has a player named {}",
                to_team, player.name
            )));
        }

        let fee = calculate_value(player)?;
        let record = Transfer {
            player: player.name.clone(),
            from_team: player.team.clone(),
            to_team: to_team.clone(),
            fee,
            date,
        };

        snapshot.players[idx].team = to_team;

        log::info!(
            "Transfer: {} {} -> {} for {}",
            record.player,
            record.from_team,
            record.to_team,
            record.fee
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, PlayerStats, Position, Team};

    fn market() -> Snapshot {
        Snapshot::new(
            vec![Team::new("Milan", 1, 40), Team::new("Inter", 2, 38), Team::new("Roma", 3, 30)],
            vec![
                Player::new("Leao", "Milan", Position::Forward, 25, 86)
                    .with_stats(PlayerStats::new(12, 8, 2_700, 40)),
                Player::new("Maignan", "Milan", Position::Goalkeeper, 29, 87),
                Player::new("Barella", "Inter", Position::Midfielder, 27, 86),
                Player::new("Rossi", "Inter", Position::Defender, 24, 70),
                Player::new("Rossi", "Roma", Position::Forward, 22, 68),
            ],
        )
    }

    fn members(snapshot: &Snapshot, team: &str) -> Vec<String> {
        snapshot.roster(team).map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_transfer_moves_player_and_records_fee() {
        let mut snap = market();
        let expected_fee = calculate_value(&snap.players[0]).unwrap();
        let now = Utc::now();

        let record = TransferMarket::transfer_player(&mut snap, "leao", "inter", now).unwrap();
        assert_eq!(record.player, "Leao");
        assert_eq!(record.from_team, "Milan");
        assert_eq!(record.to_team, "Inter");
        assert_eq!(record.fee, expected_fee);
        assert_eq!(record.date, now);

        assert_eq!(members(&snap, "Milan"), vec!["Maignan"]);
        assert_eq!(members(&snap, "Inter"), vec!["Leao", "Barella", "Rossi"]);
    }

    #[test]
    fn test_round_trip_restores_membership_and_value() {
        let mut snap = market();
        let before = members(&snap, "Milan");
        let value_before = calculate_value(&snap.players[0]).unwrap();

        TransferMarket::transfer_player(&mut snap, "Leao", "Roma", Utc::now()).unwrap();
        let back = TransferMarket::transfer_player(&mut snap, "Leao", "Milan", Utc::now()).unwrap();

        let mut after = members(&snap, "Milan");
        let mut expected = before.clone();
        after.sort();
        expected.sort();
        assert_eq!(after, expected);
        assert_eq!(snap.roster("Milan").filter(|p| p.name == "Leao").count(), 1);
        assert_eq!(back.fee, value_before);
        assert_eq!(calculate_value(&snap.players[0]).unwrap(), value_before);
    }

    #[test]
    fn test_rejections_leave_snapshot_untouched() {
        let mut snap = market();

        let err = TransferMarket::transfer_player(&mut snap, "Leao", "Milan", Utc::now());
        assert!(matches!(err, Err(CoreError::Validation(_))));

        let err = TransferMarket::transfer_player(&mut snap, "Leao", "Juventus", Utc::now());
        assert_eq!(err, Err(CoreError::TeamNotFound("Juventus".into())));

        let err = TransferMarket::transfer_player(&mut snap, "Pirlo", "Roma", Utc::now());
        assert!(matches!(err, Err(CoreError::PlayerNotFound(_))));

        let err = TransferMarket::transfer_player(&mut snap, "Rossi", "Milan", Utc::now());
        assert!(matches!(err, Err(CoreError::AmbiguousPlayer { count: 2, .. })));

        // Inter already has a Rossi.
        let err = TransferMarket::transfer_player_from(&mut snap, "Rossi", "Roma", "Inter", Utc::now());
        assert!(matches!(err, Err(CoreError::Validation(_))));

        assert_eq!(snap, market());
    }

    #[test]
    fn test_qualified_transfer_of_shared_name() {
        let mut snap = market();
        let record =
            TransferMarket::transfer_player_from(&mut snap, "rossi", "roma", "Milan", Utc::now())
                .unwrap();
        assert_eq!(record.from_team, "Roma");
        assert_eq!(record.fee, calculate_value(&snap.players[4]).unwrap());
        assert_eq!(snap.players[4].team, "Milan");
        assert_eq!(snap.players[3].team, "Inter");
    }
}
