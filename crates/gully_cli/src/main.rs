//! Gully Cricket CLI
//!
//! Replays a ball-by-ball event script against the scoring engine and
//! prints the resulting scorecard. Finished innings can be written to a
//! save file and inspected later with `show`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use gully_core::{
    BallEvent, InningsEngine, InningsSnapshot, MatchConfig, MatchSave, SaveManager,
};

#[derive(Parser)]
#[command(name = "gully")]
#[command(about = "Score a gully cricket match from an event script", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an event script and print the scorecard
    Score {
        /// Match configuration JSON (teams, overs, openers)
        #[arg(long)]
        config: PathBuf,

        /// Ball-by-ball event script (JSON array)
        #[arg(long)]
        events: PathBuf,

        /// Chase target; omit for a first innings
        #[arg(long)]
        target: Option<u32>,

        /// Write the finished state to this save file
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the scorecard stored in a save file
    Show {
        /// Save file path
        save: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score { config, events, target, out } => {
            let engine = replay(&config, &events, target)?;
            print_scorecard(engine.current());

            if let Some(out_path) = out {
                let mut save = MatchSave::new();
                save.team_a = engine.current().batting_team.clone();
                save.team_b = engine.current().bowling_team.clone();
                save.innings = Some(engine);
                SaveManager::save_to_path(&out_path, &save)
                    .with_context(|| format!("failed to save to {}", out_path.display()))?;
                println!("\n💾 Saved to {}", out_path.display());
            }
        }

        Commands::Show { save } => {
            let loaded = SaveManager::load_from_path(&save).map_err(|e| {
                let hint = if e.is_recoverable() {
                    "check the path and try again"
                } else {
                    "the file is corrupted or incompatible"
                };
                anyhow::Error::new(e)
                    .context(format!("failed to load {} ({})", save.display(), hint))
            })?;

            if let Some(first) = &loaded.first_innings_summary {
                println!("=== First innings ===");
                print_scorecard(first.current());
                println!();
            }
            match &loaded.innings {
                Some(engine) => print_scorecard(engine.current()),
                None => println!("No innings in progress."),
            }
        }
    }

    Ok(())
}

fn replay(config_path: &Path, events_path: &Path, target: Option<u32>) -> Result<InningsEngine> {
    let config_json = std::fs::read_to_string(config_path)
        .with_context(|| format!("failed to read {}", config_path.display()))?;
    let config: MatchConfig =
        serde_json::from_str(&config_json).context("invalid match configuration")?;
    config.validate().context("match configuration rejected")?;

    let events_json = std::fs::read_to_string(events_path)
        .with_context(|| format!("failed to read {}", events_path.display()))?;
    let events: Vec<BallEvent> =
        serde_json::from_str(&events_json).context("invalid event script")?;

    let mut engine = InningsEngine::new(&config, target);
    let mut rejected = 0usize;
    for (i, event) in events.into_iter().enumerate() {
        if !engine.apply(event) {
            log::warn!("event {} rejected", i);
            rejected += 1;
        }
    }
    if rejected > 0 {
        println!("⚠️  {} event(s) were rejected", rejected);
    }

    Ok(engine)
}

fn print_scorecard(s: &InningsSnapshot) {
    println!(
        "🏏 {} {}/{} in {} ov ({} max)",
        s.batting_team.name,
        s.runs,
        s.wickets,
        s.overs_display(),
        s.max_overs
    );
    println!("   {}", s.status_message);

    println!("\n   Batting");
    for player in &s.batting_team.players {
        if let Some(b) = s.batting_stats.get(&player.id) {
            println!(
                "   {:<20} {:>3} ({} balls, {} fours) {}",
                b.player_name,
                b.runs,
                b.balls_faced,
                b.fours,
                serde_json::to_string(&b.status).unwrap_or_default().trim_matches('"')
            );
        }
    }

    println!("\n   Bowling");
    for player in &s.bowling_team.players {
        if let Some(b) = s.bowling_stats.get(&player.id) {
            if b.overs == 0 && b.balls_in_current_over == 0 && b.runs_conceded == 0 {
                continue;
            }
            println!(
                "   {:<20} {:>4} ov, {}/{} (wd {}, dots {})",
                b.player_name,
                b.overs_display(),
                b.wickets,
                b.runs_conceded,
                b.wides,
                b.dot_balls
            );
        }
    }

    if !s.current_over_events.is_empty() {
        let over: Vec<String> =
            s.current_over_events.iter().map(|e| e.to_string()).collect();
        println!("\n   This over: {}", over.join(" "));
    }
}
