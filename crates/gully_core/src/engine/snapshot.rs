use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::events::OverEventTag;
use crate::models::{BattingStats, BowlingStats, MatchConfig, Player, Team};

/// Status line shown while neither side has won and no target is set.
pub const IN_PROGRESS_MESSAGE: &str = "Match in Progress...";

/// The complete scoring state at one instant; the unit stored in the
/// engine's history log. The log itself lives on [`super::InningsEngine`],
/// not inside the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InningsSnapshot {
    pub runs: u32,
    pub wickets: u32,
    pub overs_completed: u32,
    pub balls_in_current_over: u8,
    /// Immutable per innings.
    pub max_overs: u32,
    /// `None` for the first innings, `Some(first_innings_runs + 1)` when chasing.
    pub target: Option<u32>,
    pub current_batsman_id: String,
    pub current_bowler_id: String,
    /// Fixed at innings start.
    pub batting_team: Team,
    /// Fixed at innings start.
    pub bowling_team: Team,
    /// Not-yet-batted players, in roster order.
    pub remaining_batsmen: Vec<Player>,
    /// Retired players, eligible to return.
    pub retired_batsmen: Vec<Player>,
    pub match_over: bool,
    pub innings_over: bool,
    pub status_message: String,
    /// Innings-wide four count; includes no-ball and triple-wide bonus fours.
    pub fours: u32,
    /// Resets when the wide bonus fires and at every over boundary.
    pub wides_in_current_over: u8,
    /// Glyphs for the over in progress, cleared at the over boundary.
    pub current_over_events: Vec<OverEventTag>,
    pub batting_stats: HashMap<String, BattingStats>,
    pub bowling_stats: HashMap<String, BowlingStats>,
}

impl InningsSnapshot {
    /// Build the opening snapshot for an innings: zeroed stats for every
    /// roster player, openers at the crease, everyone else waiting.
    ///
    /// This never errors. An opener missing from its roster is a caller
    /// contract violation: the snapshot is still produced, its stats map
    /// simply has no entry for that id (see [`MatchConfig::validate`]).
    pub fn initialize(config: &MatchConfig, target: Option<u32>) -> Self {
        let (batting_team, bowling_team) = config.partition();

        let batting_stats = batting_team
            .players
            .iter()
            .map(|p| (p.id.clone(), BattingStats::zeroed(p)))
            .collect();
        let bowling_stats = bowling_team
            .players
            .iter()
            .map(|p| (p.id.clone(), BowlingStats::zeroed(p)))
            .collect();

        let remaining_batsmen = batting_team
            .players
            .iter()
            .filter(|p| p.id != config.opening_batsman.id)
            .cloned()
            .collect();

        let status_message = match target {
            Some(t) => format!("Target: {}", t),
            None => IN_PROGRESS_MESSAGE.to_string(),
        };

        Self {
            runs: 0,
            wickets: 0,
            overs_completed: 0,
            balls_in_current_over: 0,
            max_overs: config.overs,
            target,
            current_batsman_id: config.opening_batsman.id.clone(),
            current_bowler_id: config.opening_bowler.id.clone(),
            batting_team: batting_team.clone(),
            bowling_team: bowling_team.clone(),
            remaining_batsmen,
            retired_batsmen: Vec::new(),
            match_over: false,
            innings_over: false,
            status_message,
            fours: 0,
            wides_in_current_over: 0,
            current_over_events: Vec::new(),
            batting_stats,
            bowling_stats,
        }
    }

    pub fn roster_size(&self) -> usize {
        self.batting_team.players.len()
    }

    /// 1 for the innings setting the score, 2 for the chase.
    pub fn innings_number(&self) -> u8 {
        if self.target.is_none() {
            1
        } else {
            2
        }
    }

    /// Overs in the usual `O.B` notation (e.g. `3.4`).
    pub fn overs_display(&self) -> String {
        format!("{}.{}", self.overs_completed, self.balls_in_current_over)
    }

    /// Target reminder while chasing, generic in-progress line otherwise.
    pub(crate) fn progress_message(&self) -> String {
        match self.target {
            Some(t) => format!("Target: {}", t),
            None => IN_PROGRESS_MESSAGE.to_string(),
        }
    }

    /// True when no delivery, legal or illegal, has been recorded in the
    /// over in progress. Wides keep the ball count at zero but do leave an
    /// over event, so both fields are checked.
    pub(crate) fn at_over_start(&self) -> bool {
        self.balls_in_current_over == 0 && self.current_over_events.is_empty()
    }
}
