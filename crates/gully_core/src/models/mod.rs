pub mod match_setup;
pub mod player;
pub mod stats;
pub mod team;

pub use match_setup::MatchConfig;
pub use player::Player;
pub use stats::{BatterStatus, BattingStats, BowlingStats};
pub use team::Team;
