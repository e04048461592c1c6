//! Session state manager.
//!
//! Holds the runtime state of one scoring session: the application phase,
//! both rosters, the active match configuration and the scorer (with the
//! first-innings summary once the match flips). Convertible to/from
//! [`MatchSave`] for persistence; a thread-safe global instance is provided
//! for host shells that want a single ambient session.

use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::engine::{InningsEngine, MatchRules, MatchScorer};
use crate::error::ScoreError;
use crate::models::{MatchConfig, Team};
use crate::save::MatchSave;

/// Global session singleton.
pub static SESSION: Lazy<Arc<RwLock<SessionState>>> =
    Lazy::new(|| Arc::new(RwLock::new(SessionState::default())));

/// Where the session is in the setup-and-play flow. Mirrored into the
/// persisted record so a restored session resumes on the right screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    #[default]
    TeamSetup,
    PlayerSetup,
    CoinToss,
    MatchSetup,
    Scoreboard,
}

/// Runtime session state.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub phase: MatchPhase,
    pub team_a: Team,
    pub team_b: Team,
    /// The active configuration; replaced with the flipped configuration
    /// when the second innings starts.
    pub config: Option<MatchConfig>,
    pub scorer: MatchScorer,
    /// Final first-innings state, kept for the full scorecard.
    pub first_innings_summary: Option<InningsEngine>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            phase: MatchPhase::default(),
            team_a: Team::new(""),
            team_b: Team::new(""),
            config: None,
            scorer: MatchScorer::new(),
            first_innings_summary: None,
        }
    }

    /// Begin the first innings under default rules.
    pub fn start_match(&mut self, config: MatchConfig) {
        self.start_match_with_rules(config, MatchRules::default());
    }

    /// Begin the first innings under the given house rules.
    pub fn start_match_with_rules(&mut self, config: MatchConfig, rules: MatchRules) {
        log::info!("starting match: {} vs {}", config.team_a.name, config.team_b.name);
        self.first_innings_summary = None;
        self.scorer.set_state(Some(InningsEngine::with_rules(&config, None, rules)));
        self.team_a = config.team_a.clone();
        self.team_b = config.team_b.clone();
        self.config = Some(config);
        self.phase = MatchPhase::Scoreboard;
    }

    /// Flip the match: the first-innings bowling side bats next, chasing one
    /// more than the first-innings total. Default openers are the first
    /// roster players; the scorer collaborator can change them with
    /// administrative events. Returns the target.
    pub fn start_second_innings(&mut self) -> Result<u32, ScoreError> {
        let config = self.config.clone().ok_or(ScoreError::NotInitialized)?;
        let first_innings =
            self.scorer.innings().cloned().ok_or(ScoreError::NotInitialized)?;
        let final_snapshot = first_innings.current();

        let batting_team_name = final_snapshot.bowling_team.name.clone();
        let (batting, bowling) = if batting_team_name == config.team_a.name {
            (&config.team_a, &config.team_b)
        } else {
            (&config.team_b, &config.team_a)
        };
        let opening_batsman = batting
            .players
            .first()
            .cloned()
            .ok_or_else(|| ScoreError::EmptyRoster { team: batting.name.clone() })?;
        let opening_bowler = bowling
            .players
            .first()
            .cloned()
            .ok_or_else(|| ScoreError::EmptyRoster { team: bowling.name.clone() })?;

        let target = final_snapshot.runs + 1;
        let rules = first_innings.rules().clone();
        let next_config = MatchConfig {
            batting_team_name,
            opening_batsman,
            opening_bowler,
            ..config
        };

        log::info!("second innings: {} chasing {}", next_config.batting_team_name, target);
        self.scorer.set_state(Some(InningsEngine::with_rules(&next_config, Some(target), rules)));
        self.config = Some(next_config);
        self.first_innings_summary = Some(first_innings);
        Ok(target)
    }

    /// Convert runtime state to the persisted record.
    pub fn to_save(&self) -> MatchSave {
        MatchSave {
            version: crate::save::SAVE_VERSION,
            timestamp: crate::save::format::current_timestamp(),
            phase: self.phase,
            team_a: self.team_a.clone(),
            team_b: self.team_b.clone(),
            config: self.config.clone(),
            innings: self.scorer.innings().cloned(),
            first_innings_summary: self.first_innings_summary.clone(),
        }
    }

    /// Restore runtime state from a persisted record.
    pub fn from_save(save: &MatchSave) -> Self {
        let mut scorer = MatchScorer::new();
        scorer.set_state(save.innings.clone());
        Self {
            phase: save.phase,
            team_a: save.team_a.clone(),
            team_b: save.team_b.clone(),
            config: save.config.clone(),
            scorer,
            first_innings_summary: save.first_innings_summary.clone(),
        }
    }
}

/// Get a read lock on the global session.
pub fn get_session() -> std::sync::RwLockReadGuard<'static, SessionState> {
    SESSION.read().expect("SESSION lock poisoned")
}

/// Get a write lock on the global session.
pub fn get_session_mut() -> std::sync::RwLockWriteGuard<'static, SessionState> {
    SESSION.write().expect("SESSION lock poisoned")
}

/// Reset the global session to a fresh setup phase.
pub fn reset_session() {
    *SESSION.write().expect("SESSION lock poisoned") = SessionState::new();
}

/// Replace the entire global session.
pub fn set_session(new_state: SessionState) {
    *SESSION.write().expect("SESSION lock poisoned") = new_state;
}
