use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Player;

/// Legal-ball outcome of a struck delivery. This ruleset has no singles,
/// twos, threes or sixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRuns {
    Dot,
    Four,
}

impl ScoreRuns {
    pub fn runs(self) -> u32 {
        match self {
            ScoreRuns::Dot => 0,
            ScoreRuns::Four => 4,
        }
    }
}

/// An illegal delivery. Neither kind consumes a legal ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtraKind {
    #[serde(rename = "Wd")]
    Wide,
    #[serde(rename = "Nb")]
    NoBall,
}

/// One scoring or administrative input to the match state machine. The
/// transition function is a single exhaustive match over this union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum BallEvent {
    /// A struck legal delivery: dot ball or boundary four.
    Score(ScoreRuns),
    /// A wide or no-ball; penalty runs without a legal-ball count.
    Extra(ExtraKind),
    /// The current batsman is dismissed.
    Wicket,
    /// The current batsman leaves un-dismissed and may return later.
    RetireBatsman,
    /// Administrative: bring in the given batsman. Consumes no ball.
    SetNextBatsman(Player),
    /// Administrative: hand the ball to the given bowler. Consumes no ball.
    SetNextBowler(Player),
    /// Revert the immediately preceding event, terminal states included.
    UndoLastBall,
    /// Discard the partially completed over as a batch.
    UndoOver,
}

/// Glyph recorded per delivery for the over in progress, cleared at the
/// over boundary. These are the tokens the scoreboard renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverEventTag {
    #[serde(rename = "0")]
    Dot,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "Wd")]
    Wide,
    #[serde(rename = "4n")]
    NoBall,
    #[serde(rename = "Wkt")]
    Wicket,
}

impl OverEventTag {
    pub fn glyph(self) -> &'static str {
        match self {
            OverEventTag::Dot => "0",
            OverEventTag::Four => "4",
            OverEventTag::Wide => "Wd",
            OverEventTag::NoBall => "4n",
            OverEventTag::Wicket => "Wkt",
        }
    }
}

impl fmt::Display for OverEventTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.glyph())
    }
}
