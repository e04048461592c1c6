//! The match scoring state machine.
//!
//! [`InningsEngine`] owns one innings: the live [`InningsSnapshot`] plus the
//! append-only history of every state the innings has passed through, one
//! entry per accepted event. Transitions are pure and sequential; there is
//! no I/O and nothing to retry. [`MatchScorer`] wraps the engine behind the
//! optional-state contract used by session restore.

use serde::{Deserialize, Serialize};

use super::events::{BallEvent, ExtraKind, OverEventTag, ScoreRuns};
use super::rules::MatchRules;
use super::snapshot::InningsSnapshot;
use crate::models::{BatterStatus, MatchConfig, Player};

/// One innings of play: the rules in force plus the snapshot log. The seed
/// snapshot is the initializer output; `tail` holds one entry per accepted
/// event, and the live state is the last entry (or the seed before any
/// event is accepted).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InningsEngine {
    rules: MatchRules,
    seed: InningsSnapshot,
    tail: Vec<InningsSnapshot>,
}

impl InningsEngine {
    pub fn new(config: &MatchConfig, target: Option<u32>) -> Self {
        Self::with_rules(config, target, MatchRules::default())
    }

    pub fn with_rules(config: &MatchConfig, target: Option<u32>, rules: MatchRules) -> Self {
        Self { seed: InningsSnapshot::initialize(config, target), tail: Vec::new(), rules }
    }

    pub fn rules(&self) -> &MatchRules {
        &self.rules
    }

    /// The live state.
    pub fn current(&self) -> &InningsSnapshot {
        self.tail.last().unwrap_or(&self.seed)
    }

    /// Number of snapshots in the history, seed included. Strictly +1 per
    /// accepted event, reduced only by the undo events.
    pub fn history_len(&self) -> usize {
        1 + self.tail.len()
    }

    /// All snapshots, oldest first; the last one is the live state.
    pub fn history(&self) -> impl Iterator<Item = &InningsSnapshot> {
        std::iter::once(&self.seed).chain(self.tail.iter())
    }

    /// Apply one event. Returns `true` when the event changed state; a
    /// rejected event (terminal state, contract violation, nothing to undo)
    /// is a silent no-op and returns `false`. Rejections never partially
    /// apply: the committed history is untouched.
    pub fn apply(&mut self, event: BallEvent) -> bool {
        // Undo stays available in terminal states so a wrong final ball can
        // be corrected.
        match event {
            BallEvent::UndoLastBall => return self.undo_last(),
            BallEvent::UndoOver => return self.undo_over(),
            _ => {}
        }

        if self.current().innings_over {
            log::debug!("event ignored, innings over: {:?}", event);
            return false;
        }

        let mut next = self.current().clone();
        let accepted = match event {
            BallEvent::Score(value) => {
                self.score(&mut next, value);
                true
            }
            BallEvent::Extra(kind) => {
                self.extra(&mut next, kind);
                true
            }
            BallEvent::Wicket => {
                self.wicket(&mut next);
                true
            }
            BallEvent::RetireBatsman => Self::retire(&mut next),
            BallEvent::SetNextBatsman(player) => Self::set_next_batsman(&mut next, &player),
            BallEvent::SetNextBowler(player) => Self::set_next_bowler(&mut next, &player),
            // Handled above.
            BallEvent::UndoLastBall | BallEvent::UndoOver => false,
        };

        if !accepted {
            return false;
        }

        self.check_completion(&mut next);
        self.tail.push(next);
        true
    }

    /// A struck legal delivery: dot ball or boundary four.
    fn score(&self, s: &mut InningsSnapshot, value: ScoreRuns) {
        let runs = value.runs();
        let batsman_id = s.current_batsman_id.clone();
        let bowler_id = s.current_bowler_id.clone();

        s.runs += runs;
        if let Some(batsman) = s.batting_stats.get_mut(&batsman_id) {
            batsman.runs += runs;
            batsman.balls_faced += 1;
            if value == ScoreRuns::Four {
                batsman.fours += 1;
            }
        }
        if let Some(bowler) = s.bowling_stats.get_mut(&bowler_id) {
            bowler.runs_conceded += runs;
            match value {
                ScoreRuns::Four => bowler.fours_conceded += 1,
                ScoreRuns::Dot => bowler.dot_balls += 1,
            }
        }

        match value {
            ScoreRuns::Dot => {
                s.current_over_events.push(OverEventTag::Dot);
            }
            ScoreRuns::Four => {
                s.fours += 1;
                s.current_over_events.push(OverEventTag::Four);
            }
        }

        self.advance_ball(s);
    }

    /// A wide or no-ball. Consumes no legal ball and charges no balls faced.
    fn extra(&self, s: &mut InningsSnapshot, kind: ExtraKind) {
        let bowler_id = s.current_bowler_id.clone();
        match kind {
            ExtraKind::Wide => {
                s.runs += self.rules.wide_runs;
                s.wides_in_current_over += 1;
                if let Some(bowler) = s.bowling_stats.get_mut(&bowler_id) {
                    bowler.runs_conceded += self.rules.wide_runs;
                    bowler.wides += 1;
                }
                s.current_over_events.push(OverEventTag::Wide);

                if s.wides_in_current_over >= self.rules.wides_per_bonus {
                    // The wide quota is a boundary under this ruleset.
                    s.runs += self.rules.wide_bonus_runs;
                    s.fours += 1;
                    s.wides_in_current_over = 0;
                    if let Some(bowler) = s.bowling_stats.get_mut(&bowler_id) {
                        bowler.runs_conceded += self.rules.wide_bonus_runs;
                        bowler.fours_conceded += 1;
                    }
                }
            }
            ExtraKind::NoBall => {
                // Fixed penalty, scored once; counts as a four.
                s.runs += self.rules.no_ball_runs;
                s.fours += 1;
                if let Some(bowler) = s.bowling_stats.get_mut(&bowler_id) {
                    bowler.runs_conceded += self.rules.no_ball_runs;
                    bowler.fours_conceded += 1;
                }
                s.current_over_events.push(OverEventTag::NoBall);
            }
        }
    }

    /// The current batsman is dismissed. Ball bookkeeping matches a dot
    /// ball; the delivery is also credited to the bowler as a dot.
    fn wicket(&self, s: &mut InningsSnapshot) {
        let batsman_id = s.current_batsman_id.clone();
        let bowler_id = s.current_bowler_id.clone();

        s.wickets += 1;
        if let Some(batsman) = s.batting_stats.get_mut(&batsman_id) {
            batsman.status = BatterStatus::Out;
            batsman.balls_faced += 1;
        }
        if let Some(bowler) = s.bowling_stats.get_mut(&bowler_id) {
            bowler.wickets += 1;
            bowler.dot_balls += 1;
        }

        s.current_over_events.push(OverEventTag::Wicket);
        self.advance_ball(s);
    }

    /// Consume one legal ball, closing the over when it is the last one.
    fn advance_ball(&self, s: &mut InningsSnapshot) {
        let bowler_id = s.current_bowler_id.clone();
        let new_balls = s.balls_in_current_over + 1;

        if new_balls >= self.rules.balls_per_over {
            s.balls_in_current_over = 0;
            s.overs_completed += 1;
            s.wides_in_current_over = 0;
            s.current_over_events.clear();
            if let Some(bowler) = s.bowling_stats.get_mut(&bowler_id) {
                bowler.balls_in_current_over = 0;
                bowler.overs += 1;
            }
        } else {
            s.balls_in_current_over = new_balls;
            if let Some(bowler) = s.bowling_stats.get_mut(&bowler_id) {
                bowler.balls_in_current_over = new_balls;
            }
        }
    }

    /// The current batsman leaves un-dismissed. Rejected when nobody could
    /// replace them.
    fn retire(s: &mut InningsSnapshot) -> bool {
        if s.remaining_batsmen.is_empty() && s.retired_batsmen.is_empty() {
            return false;
        }
        let Some(player) =
            s.batting_team.players.iter().find(|p| p.id == s.current_batsman_id).cloned()
        else {
            return false;
        };

        if let Some(batsman) = s.batting_stats.get_mut(&player.id) {
            batsman.status = BatterStatus::Retired;
        }
        s.retired_batsmen.push(player);
        true
    }

    /// Administrative: bring in a batsman from the waiting or retired pool.
    /// An id outside both pools is a contract violation and a no-op.
    fn set_next_batsman(s: &mut InningsSnapshot, player: &Player) -> bool {
        let eligible = s
            .remaining_batsmen
            .iter()
            .chain(s.retired_batsmen.iter())
            .any(|p| p.id == player.id);
        if !eligible {
            log::debug!("next batsman {} not in waiting or retired pool", player.id);
            return false;
        }

        s.current_batsman_id = player.id.clone();
        s.remaining_batsmen.retain(|p| p.id != player.id);
        s.retired_batsmen.retain(|p| p.id != player.id);
        true
    }

    /// Administrative: hand the ball to a bowling-team player and refresh
    /// the status line.
    fn set_next_bowler(s: &mut InningsSnapshot, player: &Player) -> bool {
        if !s.bowling_team.contains(&player.id) {
            log::debug!("next bowler {} not in bowling roster", player.id);
            return false;
        }

        s.current_bowler_id = player.id.clone();
        s.status_message = s.progress_message();
        true
    }

    /// Innings/match completion, evaluated before the snapshot is committed.
    fn check_completion(&self, s: &mut InningsSnapshot) {
        if let Some(target) = s.target {
            if s.runs >= target {
                let wickets_in_hand = (s.roster_size() as u32).saturating_sub(s.wickets);
                s.innings_over = true;
                s.match_over = true;
                s.status_message =
                    format!("{} won by {} wickets!", s.batting_team.name, wickets_in_hand);
                log::info!("match complete: {}", s.status_message);
                return;
            }
        }

        let all_out = s.wickets >= self.rules.all_out.threshold(s.roster_size());
        let overs_finished = s.overs_completed >= s.max_overs;
        if !all_out && !overs_finished {
            return;
        }

        s.innings_over = true;
        match s.target {
            Some(target) => {
                s.match_over = true;
                let margin = target.saturating_sub(1).saturating_sub(s.runs);
                s.status_message = if margin > 0 {
                    format!("{} won by {} runs!", s.bowling_team.name, margin)
                } else {
                    "Match Tied!".to_string()
                };
            }
            None => {
                s.match_over = false;
                s.status_message =
                    if all_out { "All Out!" } else { "Innings Over!" }.to_string();
            }
        }
        log::info!("innings complete: {}", s.status_message);
    }

    /// Strict single-step undo of the immediately preceding event. No-op
    /// with only the seed entry.
    fn undo_last(&mut self) -> bool {
        if self.tail.pop().is_some() {
            log::debug!("undid last event, history now {} entries", self.history_len());
            true
        } else {
            false
        }
    }

    /// Restore the most recent start-of-over state of the over in progress,
    /// discarding every delivery of that over as a batch. Invoked exactly at
    /// an over boundary (nothing recorded since), it targets the previous
    /// over instead. Administrative events recorded at the over start (the
    /// new-bowler selection) survive; everything after the first delivery
    /// does not.
    fn undo_over(&mut self) -> bool {
        if self.tail.is_empty() {
            return false;
        }

        let current = self.current();
        let target_over = if current.at_over_start() {
            match current.overs_completed.checked_sub(1) {
                Some(over) => over,
                None => return false,
            }
        } else {
            current.overs_completed
        };

        let restore = self
            .tail
            .iter()
            .rposition(|s| s.overs_completed == target_over && s.at_over_start());

        match restore {
            Some(idx) => self.tail.truncate(idx + 1),
            None => self.tail.clear(),
        }
        log::debug!("undid over {}, history now {} entries", target_over, self.history_len());
        true
    }
}

/// The outer scoring contract: an optional innings plus wholesale state
/// replacement. Events applied before any state exists are no-ops.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchScorer {
    innings: Option<InningsEngine>,
}

impl MatchScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn innings(&self) -> Option<&InningsEngine> {
        self.innings.as_ref()
    }

    /// The live snapshot, if an innings is underway.
    pub fn snapshot(&self) -> Option<&InningsSnapshot> {
        self.innings.as_ref().map(|engine| engine.current())
    }

    /// Hard override used only for session restore and reset: replaces the
    /// entire state, history included, or clears it.
    pub fn set_state(&mut self, state: Option<InningsEngine>) {
        log::debug!(
            "scorer state {}",
            if state.is_some() { "replaced" } else { "cleared" }
        );
        self.innings = state;
    }

    pub fn apply(&mut self, event: BallEvent) -> bool {
        match self.innings.as_mut() {
            Some(engine) => engine.apply(event),
            None => false,
        }
    }
}
