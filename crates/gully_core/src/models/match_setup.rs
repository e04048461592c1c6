use serde::{Deserialize, Serialize};

use super::{Player, Team};
use crate::error::ScoreError;

/// Everything the innings initializer needs: both rosters, the overs limit
/// and the opening selections. Built once by the match-setup collaborator
/// and reused (with the batting side flipped) for the second innings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub team_a: Team,
    pub team_b: Team,
    pub overs: u32,
    pub batting_team_name: String,
    pub opening_batsman: Player,
    pub opening_bowler: Player,
}

impl MatchConfig {
    /// Split the configured teams into (batting, bowling) by name match.
    /// A name matching neither roster falls through to team B batting, the
    /// same resolution the setup screen applies; `validate` rejects it.
    pub fn partition(&self) -> (&Team, &Team) {
        if self.batting_team_name == self.team_a.name {
            (&self.team_a, &self.team_b)
        } else {
            (&self.team_b, &self.team_a)
        }
    }

    /// Caller-side contract check. The initializer itself never errors, so
    /// setup collaborators are expected to run this before starting play.
    pub fn validate(&self) -> Result<(), ScoreError> {
        self.team_a.validate()?;
        self.team_b.validate()?;

        if self.overs == 0 {
            return Err(ScoreError::InvalidOvers(self.overs));
        }

        if self.batting_team_name != self.team_a.name
            && self.batting_team_name != self.team_b.name
        {
            return Err(ScoreError::UnknownTeam { name: self.batting_team_name.clone() });
        }

        let (batting, bowling) = self.partition();
        if !batting.contains(&self.opening_batsman.id) {
            return Err(ScoreError::PlayerNotInRoster {
                id: self.opening_batsman.id.clone(),
                team: batting.name.clone(),
            });
        }
        if !bowling.contains(&self.opening_bowler.id) {
            return Err(ScoreError::PlayerNotInRoster {
                id: self.opening_bowler.id.clone(),
                team: bowling.name.clone(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(name: &str, prefix: &str, size: usize) -> Team {
        let mut team = Team::new(name);
        for i in 0..size {
            team.players.push(Player::with_id(format!("{prefix}{i}"), format!("{prefix} {i}")));
        }
        team
    }

    fn config() -> MatchConfig {
        let team_a = roster("Gully Kings", "a", 5);
        let team_b = roster("Street Strikers", "b", 5);
        MatchConfig {
            opening_batsman: team_a.players[0].clone(),
            opening_bowler: team_b.players[0].clone(),
            team_a,
            team_b,
            overs: 5,
            batting_team_name: "Gully Kings".to_string(),
        }
    }

    #[test]
    fn test_partition_by_batting_team_name() {
        let cfg = config();
        let (batting, bowling) = cfg.partition();
        assert_eq!(batting.name, "Gully Kings");
        assert_eq!(bowling.name, "Street Strikers");
    }

    #[test]
    fn test_validate_accepts_well_formed_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_overs() {
        let mut cfg = config();
        cfg.overs = 0;
        assert!(matches!(cfg.validate(), Err(ScoreError::InvalidOvers(0))));
    }

    #[test]
    fn test_validate_rejects_unknown_batting_team() {
        let mut cfg = config();
        cfg.batting_team_name = "Nobody".to_string();
        assert!(matches!(cfg.validate(), Err(ScoreError::UnknownTeam { .. })));
    }

    #[test]
    fn test_validate_rejects_opener_from_wrong_roster() {
        let mut cfg = config();
        cfg.opening_batsman = cfg.team_b.players[1].clone();
        assert!(matches!(cfg.validate(), Err(ScoreError::PlayerNotInRoster { .. })));
    }
}
