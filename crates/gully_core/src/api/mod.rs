pub mod json_api;

pub use json_api::{
    apply_event_json, available_bowlers_json, initialize_innings_json, snapshot_json,
    ApplyResponse, InningsRequest,
};
