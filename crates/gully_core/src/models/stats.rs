use serde::{Deserialize, Serialize};

use super::Player;

/// Dismissal status of a batting-team player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatterStatus {
    #[serde(rename = "Not Out")]
    NotOut,
    Out,
    Retired,
}

/// Per-player batting figures, keyed by player id in the innings snapshot.
///
/// `runs` and `fours` are tracked independently: wide/no-ball bonus runs can
/// inflate the innings total without a boundary off the bat, so
/// `fours * 4 <= runs` is not an invariant of this ruleset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattingStats {
    pub player_id: String,
    pub player_name: String,
    pub runs: u32,
    pub fours: u32,
    pub balls_faced: u32,
    pub status: BatterStatus,
}

impl BattingStats {
    pub fn zeroed(player: &Player) -> Self {
        Self {
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            runs: 0,
            fours: 0,
            balls_faced: 0,
            status: BatterStatus::NotOut,
        }
    }
}

/// Per-player bowling figures, keyed by player id in the innings snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowlingStats {
    pub player_id: String,
    pub player_name: String,
    /// Completed overs only.
    pub overs: u32,
    pub balls_in_current_over: u8,
    pub wickets: u32,
    pub runs_conceded: u32,
    pub wides: u32,
    pub dot_balls: u32,
    pub fours_conceded: u32,
}

impl BowlingStats {
    pub fn zeroed(player: &Player) -> Self {
        Self {
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            overs: 0,
            balls_in_current_over: 0,
            wickets: 0,
            runs_conceded: 0,
            wides: 0,
            dot_balls: 0,
            fours_conceded: 0,
        }
    }

    /// Overs figure in the usual `O.B` notation (e.g. `2.3`).
    pub fn overs_display(&self) -> String {
        format!("{}.{}", self.overs, self.balls_in_current_over)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_stats_carry_player_identity() {
        let player = Player::with_id("p7", "Sunil");
        let batting = BattingStats::zeroed(&player);
        assert_eq!(batting.player_id, "p7");
        assert_eq!(batting.player_name, "Sunil");
        assert_eq!(batting.status, BatterStatus::NotOut);

        let bowling = BowlingStats::zeroed(&player);
        assert_eq!(bowling.overs_display(), "0.0");
    }

    #[test]
    fn test_status_serde_uses_display_labels() {
        let json = serde_json::to_string(&BatterStatus::NotOut).unwrap();
        assert_eq!(json, "\"Not Out\"");
        let back: BatterStatus = serde_json::from_str("\"Retired\"").unwrap();
        assert_eq!(back, BatterStatus::Retired);
    }
}
