//! # gully_core - Deterministic Gully-Cricket Match Scoring Engine
//!
//! This library provides a deterministic scoring engine for street-rules
//! cricket with a JSON API for easy integration with app shells.
//!
//! ## Features
//! - 100% deterministic scoring (same event sequence = same scorecard)
//! - Street rules: fours only, fixed no-ball penalty, triple-wide bonus
//! - Full undo history (per ball and per over)
//! - JSON API for easy integration

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod save;
pub mod state;

// Re-export main API functions
pub use api::{
    apply_event_json, available_bowlers_json, initialize_innings_json, snapshot_json,
    InningsRequest,
};
pub use error::{Result, ScoreError};

// Re-export the scoring engine
pub use engine::{
    AllOutRule, BallEvent, BowlerQuota, ExtraKind, InningsEngine, InningsSnapshot, MatchRules,
    MatchScorer, OverEventTag, ScoreRuns, IN_PROGRESS_MESSAGE,
};

// Re-export core models
pub use models::{BatterStatus, BattingStats, BowlingStats, MatchConfig, Player, Team};

// Re-export save system
pub use save::{MatchSave, SaveError, SaveManager};

// Re-export state management
pub use state::{
    get_session, get_session_mut, reset_session, set_session, MatchPhase, SessionState, SESSION,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// JSON request schema version accepted by the API layer.
pub const SCHEMA_VERSION: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    fn config(batting: &str) -> MatchConfig {
        let mut team_a = Team::new("Gully Kings");
        let mut team_b = Team::new("Street Strikers");
        for i in 0..5 {
            team_a.players.push(Player::with_id(format!("a{i}"), format!("A {i}")));
            team_b.players.push(Player::with_id(format!("b{i}"), format!("B {i}")));
        }
        let (bat, bowl) = if batting == "Gully Kings" {
            (&team_a, &team_b)
        } else {
            (&team_b, &team_a)
        };
        MatchConfig {
            opening_batsman: bat.players[0].clone(),
            opening_bowler: bowl.players[0].clone(),
            team_a: team_a.clone(),
            team_b: team_b.clone(),
            overs: 2,
            batting_team_name: batting.to_string(),
        }
    }

    #[test]
    fn test_full_two_innings_match() {
        let mut session = SessionState::new();
        session.start_match(config("Gully Kings"));

        // First innings: 2 overs, three fours off the bat plus a wide.
        session.scorer.apply(BallEvent::Score(ScoreRuns::Four));
        session.scorer.apply(BallEvent::Extra(ExtraKind::Wide));
        session.scorer.apply(BallEvent::Score(ScoreRuns::Four));
        for _ in 0..4 {
            session.scorer.apply(BallEvent::Score(ScoreRuns::Dot));
        }
        session.scorer.apply(BallEvent::SetNextBowler(Player::with_id("b1", "B 1")));
        session.scorer.apply(BallEvent::Score(ScoreRuns::Four));
        for _ in 0..5 {
            session.scorer.apply(BallEvent::Score(ScoreRuns::Dot));
        }

        {
            let first = session.scorer.snapshot().unwrap();
            assert_eq!(first.runs, 13);
            assert!(first.innings_over);
            assert!(!first.match_over);
            assert_eq!(first.status_message, "Innings Over!");
        }

        // Second innings: the chase reaches 14 inside the overs.
        let target = session.start_second_innings().unwrap();
        assert_eq!(target, 14);

        for _ in 0..3 {
            session.scorer.apply(BallEvent::Score(ScoreRuns::Four));
        }
        session.scorer.apply(BallEvent::Extra(ExtraKind::Wide));
        session.scorer.apply(BallEvent::Extra(ExtraKind::Wide));

        {
            let chase = session.scorer.snapshot().unwrap();
            assert_eq!(chase.runs, 14);
            assert!(chase.match_over);
            // Five-a-side, no wickets down: won by five wickets.
            assert_eq!(chase.status_message, "Street Strikers won by 5 wickets!");
        }

        // The first innings card survives for the final scorecard.
        let first = session.first_innings_summary.as_ref().unwrap().current();
        assert_eq!(first.runs, 13);
        assert_eq!(first.batting_team.name, "Gully Kings");
    }

    #[test]
    fn test_json_api_smoke() {
        let cfg = config("Gully Kings");
        let request = format!(
            r#"{{"schema_version":1,"config":{},"target":5}}"#,
            serde_json::to_string(&cfg).unwrap()
        );

        let engine_json = initialize_innings_json(&request).unwrap();
        let response_json =
            apply_event_json(&engine_json, r#"{"type":"extra","payload":"Nb"}"#).unwrap();
        let response: serde_json::Value = serde_json::from_str(&response_json).unwrap();

        assert_eq!(response["accepted"], true);
        assert_eq!(response["snapshot"]["runs"], 4);
        assert_eq!(response["snapshot"]["target"], 5);
    }
}
