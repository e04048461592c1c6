use super::error::SaveError;
use super::SAVE_VERSION;
use crate::engine::InningsEngine;
use crate::models::{MatchConfig, Team};
use crate::state::MatchPhase;
use serde::{Deserialize, Serialize};

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

const MAX_ROSTER_SIZE: usize = 100;

/// Everything a scoring session needs to resume exactly where it stopped:
/// setup phase, rosters, configuration and the live innings with its full
/// undo history, plus the completed first innings once the match flips.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MatchSave {
    /// Save format version for migration
    pub version: u32,

    /// Save timestamp (unix milliseconds)
    pub timestamp: u64,

    /// Screen the session was on when saved
    pub phase: MatchPhase,

    pub team_a: Team,
    pub team_b: Team,

    /// Active configuration; `None` before the toss is settled
    pub config: Option<MatchConfig>,

    /// Live innings engine including undo history
    pub innings: Option<InningsEngine>,

    /// Final first-innings state, present during the chase
    #[serde(default)]
    pub first_innings_summary: Option<InningsEngine>,
}

impl Default for MatchSave {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchSave {
    pub fn new() -> Self {
        Self {
            version: SAVE_VERSION,
            timestamp: current_timestamp(),
            phase: MatchPhase::default(),
            team_a: Team::new(""),
            team_b: Team::new(""),
            config: None,
            innings: None,
            first_innings_summary: None,
        }
    }

    pub fn update_timestamp(&mut self) {
        self.timestamp = current_timestamp();
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        if self.team_a.players.len() > MAX_ROSTER_SIZE {
            return Err(SaveError::DataTooLarge { size: self.team_a.players.len() });
        }
        if self.team_b.players.len() > MAX_ROSTER_SIZE {
            return Err(SaveError::DataTooLarge { size: self.team_b.players.len() });
        }

        // Check for duplicate player IDs across both rosters
        let mut player_ids = std::collections::HashSet::new();
        for player in self.team_a.players.iter().chain(self.team_b.players.iter()) {
            if !player_ids.insert(&player.id) {
                return Err(SaveError::Corrupted);
            }
        }

        Ok(())
    }
}

/// Serialize and compress match save data
pub fn serialize_and_compress(save: &MatchSave) -> Result<Vec<u8>, SaveError> {
    // Validate before serialization
    save.validate()?;

    // 1. Serialize to MessagePack with field names
    let msgpack = to_vec_named(save).map_err(SaveError::Serialization)?;

    // 2. Compress with LZ4 (size prepended for easy decompression)
    let compressed = compress_prepend_size(&msgpack);

    // 3. Add SHA256 checksum at the end
    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);

    Ok(result)
}

/// Decompress and deserialize match save data
pub fn decompress_and_deserialize(bytes: &[u8]) -> Result<MatchSave, SaveError> {
    // Check minimum size (header + checksum)
    if bytes.len() < 4 + 32 {
        return Err(SaveError::Corrupted);
    }

    // Split payload and checksum
    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - 32);

    // Verify checksum
    let mut hasher = Sha256::new();
    hasher.update(payload);
    let calculated_checksum = hasher.finalize();

    if &calculated_checksum[..] != checksum_bytes {
        return Err(SaveError::ChecksumMismatch);
    }

    // Decompress
    let msgpack = decompress_size_prepended(payload).map_err(|_| SaveError::Decompression)?;

    // Deserialize
    let save: MatchSave = from_slice(&msgpack).map_err(SaveError::Deserialization)?;

    // Validate version
    if save.version > SAVE_VERSION {
        return Err(SaveError::VersionMismatch { found: save.version, expected: SAVE_VERSION });
    }

    Ok(save)
}

pub fn current_timestamp() -> u64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u64
}
