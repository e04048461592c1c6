use serde::{Deserialize, Serialize};

use super::snapshot::InningsSnapshot;
use crate::models::Player;

/// When an innings is "all out" relative to the batting roster size. This is
/// a genuine house-rule choice, so it is configuration rather than a
/// hardcoded threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllOutRule {
    /// Play continues until every roster player is out (`wickets >= roster`).
    #[default]
    LastManStanding,
    /// Traditional rule: the innings ends with one batsman stranded
    /// (`wickets >= roster - 1`).
    LastPairStranded,
}

impl AllOutRule {
    pub fn threshold(self, roster_size: usize) -> u32 {
        match self {
            AllOutRule::LastManStanding => roster_size as u32,
            AllOutRule::LastPairStranded => roster_size.saturating_sub(1) as u32,
        }
    }
}

/// House-rule constants for one match. Scoring units are restricted to dot
/// balls, fours, wides, no-balls and wickets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRules {
    /// Legal deliveries per over.
    pub balls_per_over: u8,
    /// Runs awarded for a wide.
    pub wide_runs: u32,
    /// Wides in one over that trigger the boundary bonus; the counter resets
    /// when it fires.
    pub wides_per_bonus: u8,
    /// Bonus runs for reaching the wide quota; counts as a four.
    pub wide_bonus_runs: u32,
    /// Fixed no-ball penalty, scored once; counts as a four.
    pub no_ball_runs: u32,
    /// All-out threshold relative to roster size.
    pub all_out: AllOutRule,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            balls_per_over: 6,
            wide_runs: 1,
            wides_per_bonus: 3,
            wide_bonus_runs: 4,
            no_ball_runs: 4,
            all_out: AllOutRule::LastManStanding,
        }
    }
}

/// Per-bowler over quota. Display collaborators use this to filter the
/// next-bowler list; the engine itself records whatever it is told (the
/// quota is a selection constraint, not a scoring rule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BowlerQuota {
    /// Overs every bowler may bowl.
    pub base_overs: u32,
    /// Extended allowance for a limited number of bowlers.
    pub extended_overs: u32,
    /// How many bowlers may use the extended allowance.
    pub extended_slots: usize,
}

impl Default for BowlerQuota {
    fn default() -> Self {
        Self { base_overs: 2, extended_overs: 3, extended_slots: 3 }
    }
}

impl BowlerQuota {
    /// Bowlers eligible to take the next over: never the bowler who just
    /// finished, never anyone at the extended cap, and the extended
    /// allowance only while slots remain.
    pub fn available(&self, snapshot: &InningsSnapshot) -> Vec<Player> {
        let extended_used = snapshot
            .bowling_stats
            .values()
            .filter(|b| b.overs >= self.extended_overs)
            .count();

        snapshot
            .bowling_team
            .players
            .iter()
            .filter(|p| p.id != snapshot.current_bowler_id)
            .filter(|p| {
                let overs = snapshot.bowling_stats.get(&p.id).map(|b| b.overs).unwrap_or(0);
                if overs < self.base_overs {
                    true
                } else if overs < self.extended_overs {
                    extended_used < self.extended_slots
                } else {
                    false
                }
            })
            .cloned()
            .collect()
    }
}
