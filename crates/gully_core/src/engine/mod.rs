pub mod events;
pub mod rules;
pub mod scoring;
pub mod snapshot;


pub use events::{BallEvent, ExtraKind, OverEventTag, ScoreRuns};
pub use rules::{AllOutRule, BowlerQuota, MatchRules};
pub use scoring::{InningsEngine, MatchScorer};
pub use snapshot::{InningsSnapshot, IN_PROGRESS_MESSAGE};
