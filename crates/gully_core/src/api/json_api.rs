use serde::{Deserialize, Serialize};
use serde_json;

use crate::engine::{BallEvent, BowlerQuota, InningsEngine, InningsSnapshot, MatchRules};
use crate::models::MatchConfig;
use crate::SCHEMA_VERSION;

pub mod error_codes {
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const UNSUPPORTED_SCHEMA_VERSION: &str = "UNSUPPORTED_SCHEMA_VERSION";
    pub const INVALID_CONFIG: &str = "INVALID_CONFIG";
    pub const INVALID_STATE: &str = "INVALID_STATE";
    pub const INVALID_EVENT: &str = "INVALID_EVENT";
    pub const SERIALIZATION_FAILED: &str = "SERIALIZATION_FAILED";
}

fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!("{code}: {message}")
}

/// Request to start scoring an innings.
#[derive(Debug, Deserialize)]
pub struct InningsRequest {
    pub schema_version: u8,
    pub config: MatchConfig,
    /// `None` for a first innings, `Some(runs_to_win)` for a chase
    #[serde(default)]
    pub target: Option<u32>,
    /// House rules; defaults apply when omitted
    #[serde(default)]
    pub rules: Option<MatchRules>,
}

/// Response for event application: whether the event was accepted, the
/// engine to thread into the next call, and the resulting snapshot.
#[derive(Debug, Serialize)]
pub struct ApplyResponse<'a> {
    pub accepted: bool,
    pub engine: &'a InningsEngine,
    pub snapshot: &'a InningsSnapshot,
}

fn parse_engine(engine_json: &str) -> Result<InningsEngine, String> {
    serde_json::from_str(engine_json).map_err(|e| err_code(error_codes::INVALID_STATE, e))
}

fn engine_to_json(engine: &InningsEngine) -> Result<String, String> {
    serde_json::to_string(engine).map_err(|e| err_code(error_codes::SERIALIZATION_FAILED, e))
}

/// Main entry point: build a fresh innings engine from a JSON request.
/// Returns the serialized engine, to be threaded through [`apply_event_json`].
pub fn initialize_innings_json(request_json: &str) -> Result<String, String> {
    let request: InningsRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::INVALID_REQUEST, e))?;

    if request.schema_version != SCHEMA_VERSION {
        return Err(err_code(
            error_codes::UNSUPPORTED_SCHEMA_VERSION,
            format!("expected {}, got {}", SCHEMA_VERSION, request.schema_version),
        ));
    }

    request.config.validate().map_err(|e| err_code(error_codes::INVALID_CONFIG, e))?;

    let rules = request.rules.unwrap_or_default();
    let engine = InningsEngine::with_rules(&request.config, request.target, rules);
    engine_to_json(&engine)
}

/// Apply one ball event to a serialized engine. The response carries the
/// updated engine and snapshot along with the accepted flag; a rejected
/// event returns the engine unchanged rather than an error.
pub fn apply_event_json(engine_json: &str, event_json: &str) -> Result<String, String> {
    let mut engine = parse_engine(engine_json)?;
    let event: BallEvent =
        serde_json::from_str(event_json).map_err(|e| err_code(error_codes::INVALID_EVENT, e))?;

    let accepted = engine.apply(event);

    let response =
        ApplyResponse { accepted, engine: &engine, snapshot: engine.current() };
    serde_json::to_string(&response).map_err(|e| err_code(error_codes::SERIALIZATION_FAILED, e))
}

/// Extract the current snapshot from a serialized engine.
pub fn snapshot_json(engine_json: &str) -> Result<String, String> {
    let engine = parse_engine(engine_json)?;
    serde_json::to_string(engine.current())
        .map_err(|e| err_code(error_codes::SERIALIZATION_FAILED, e))
}

/// List the bowlers eligible for the next over under the standard quota.
pub fn available_bowlers_json(engine_json: &str) -> Result<String, String> {
    let engine = parse_engine(engine_json)?;
    let bowlers = BowlerQuota::default().available(engine.current());
    serde_json::to_string(&bowlers)
        .map_err(|e| err_code(error_codes::SERIALIZATION_FAILED, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, Team};

    fn request_json() -> String {
        let mut team_a = Team::new("Gully Kings");
        let mut team_b = Team::new("Street Strikers");
        for i in 0..5 {
            team_a.players.push(Player::with_id(format!("a{i}"), format!("A {i}")));
            team_b.players.push(Player::with_id(format!("b{i}"), format!("B {i}")));
        }
        let config = MatchConfig {
            opening_batsman: team_a.players[0].clone(),
            opening_bowler: team_b.players[0].clone(),
            team_a,
            team_b,
            overs: 2,
            batting_team_name: "Gully Kings".to_string(),
        };
        format!(
            r#"{{"schema_version":1,"config":{}}}"#,
            serde_json::to_string(&config).unwrap()
        )
    }

    #[test]
    fn test_initialize_and_score_a_four() {
        let engine_json = initialize_innings_json(&request_json()).unwrap();

        let response_json =
            apply_event_json(&engine_json, r#"{"type":"score","payload":"four"}"#).unwrap();
        let response: serde_json::Value = serde_json::from_str(&response_json).unwrap();

        assert_eq!(response["accepted"], true);
        assert_eq!(response["snapshot"]["runs"], 4);
        assert_eq!(response["snapshot"]["fours"], 1);
    }

    #[test]
    fn test_rejected_event_is_not_an_error() {
        let engine_json = initialize_innings_json(&request_json()).unwrap();

        // Unknown batsman id: a no-op, reported through the accepted flag.
        let event = r#"{"type":"set_next_batsman","payload":{"id":"ghost","name":"Ghost"}}"#;
        let response_json = apply_event_json(&engine_json, event).unwrap();
        let response: serde_json::Value = serde_json::from_str(&response_json).unwrap();

        assert_eq!(response["accepted"], false);
        assert_eq!(response["snapshot"]["runs"], 0);
    }

    #[test]
    fn test_schema_version_is_enforced() {
        let bad = request_json().replace(r#""schema_version":1"#, r#""schema_version":9"#);
        let err = initialize_innings_json(&bad).unwrap_err();
        assert!(err.starts_with(error_codes::UNSUPPORTED_SCHEMA_VERSION));
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let bad = request_json().replace(r#""overs":2"#, r#""overs":0"#);
        let err = initialize_innings_json(&bad).unwrap_err();
        assert!(err.starts_with(error_codes::INVALID_CONFIG));
    }

    #[test]
    fn test_snapshot_extraction() {
        let engine_json = initialize_innings_json(&request_json()).unwrap();
        let snapshot_json = snapshot_json(&engine_json).unwrap();
        let snapshot: serde_json::Value = serde_json::from_str(&snapshot_json).unwrap();

        assert_eq!(snapshot["runs"], 0);
        assert_eq!(snapshot["current_batsman_id"], "a0");
    }

    #[test]
    fn test_available_bowlers_excludes_current() {
        let engine_json = initialize_innings_json(&request_json()).unwrap();
        let bowlers_json = available_bowlers_json(&engine_json).unwrap();
        let bowlers: Vec<Player> = serde_json::from_str(&bowlers_json).unwrap();

        assert_eq!(bowlers.len(), 4);
        assert!(bowlers.iter().all(|p| p.id != "b0"));
    }

    #[test]
    fn test_garbage_state_is_an_error() {
        let err = apply_event_json("not json", r#"{"type":"wicket"}"#).unwrap_err();
        assert!(err.starts_with(error_codes::INVALID_STATE));
    }
}
