use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Invalid overs limit: {0}")]
    InvalidOvers(u32),

    #[error("Empty roster for team {team}")]
    EmptyRoster { team: String },

    #[error("Duplicate player id: {id}")]
    DuplicatePlayerId { id: String },

    #[error("Unknown team: {name}")]
    UnknownTeam { name: String },

    #[error("Player {id} not found in {team} roster")]
    PlayerNotInRoster { id: String, team: String },

    #[error("Match not initialized")]
    NotInitialized,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScoreError>;
