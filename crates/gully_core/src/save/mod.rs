// Save/Load system for the scoring session
// MessagePack + LZ4 compression with versioning and integrity checks

pub mod error;
pub mod format;
pub mod manager;

pub use error::SaveError;
pub use format::{decompress_and_deserialize, serialize_and_compress, MatchSave};
pub use manager::SaveManager;

pub const SAVE_VERSION: u32 = 1;
