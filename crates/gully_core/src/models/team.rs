use serde::{Deserialize, Serialize};

use super::Player;
use crate::error::ScoreError;

/// A fixed roster for one side of the match. Player order matters: it is the
/// batting order offered to the scorer and the display order of scorecards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub players: Vec<Player>,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), players: Vec::new() }
    }

    pub fn roster_size(&self) -> usize {
        self.players.len()
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p.id == player_id)
    }

    pub fn get_player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn validate(&self) -> Result<(), ScoreError> {
        if self.players.is_empty() {
            return Err(ScoreError::EmptyRoster { team: self.name.clone() });
        }

        let mut seen = std::collections::HashSet::new();
        for player in &self.players {
            if !seen.insert(&player.id) {
                return Err(ScoreError::DuplicatePlayerId { id: player.id.clone() });
            }
        }

        Ok(())
    }
}
