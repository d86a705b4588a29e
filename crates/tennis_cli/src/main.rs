//! Tennis Scoreboard CLI
//!
//! Replays recorded points or takes live operator taps from stdin.

mod board;
mod setup;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tennis_core::MatchEngine;

use board::{score_line, Announcement, Announcer};

#[derive(Parser)]
#[command(name = "tennis")]
#[command(about = "Score a tennis match point by point", long_about = None)]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a point sequence and print the final snapshot
    Replay {
        /// Setup file (.yaml, .yml or .json)
        #[arg(long)]
        config: PathBuf,

        /// Point winners, e.g. "1121" (team 1 or 2 per point)
        #[arg(long)]
        points: String,

        /// Points are written as 0/1 instead of 1/2
        #[arg(long, default_value = "false")]
        zero_based: bool,
    },

    /// Score live: type 1 or 2 per point, q to quit
    Play {
        /// Setup file (.yaml, .yml or .json)
        #[arg(long)]
        config: PathBuf,
    },

    /// Print the JSON schema of replay requests
    Schema,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Replay {
            config,
            points,
            zero_based,
        } => {
            let mut engine = start_engine(&config)?;
            let points = parse_points(&points, zero_based)?;
            run_replay(&mut engine, &points, &mut out)?;
        }

        Commands::Play { config } => {
            let mut engine = start_engine(&config)?;
            let stdin = io::stdin();
            run_play(&mut engine, stdin.lock(), &mut out)?;
        }

        Commands::Schema => {
            let schema = tennis_core::match_request_schema()?;
            writeln!(out, "{schema}")?;
        }
    }

    Ok(())
}

fn start_engine(config: &std::path::Path) -> Result<MatchEngine> {
    let setup = setup::load_setup(config)?;
    let identities = setup.identities();
    for (team, identity) in setup.teams.iter().zip(&identities) {
        log::info!(
            "{} ({}, {}) plays as {}",
            team,
            team.ranks(),
            team.countries().join("/"),
            identity
        );
    }
    MatchEngine::new(setup.config, identities).context("Failed to start match")
}

/// Decode a point string. Whitespace and commas are skipped.
fn parse_points(sequence: &str, zero_based: bool) -> Result<Vec<usize>> {
    let offset = if zero_based { 0 } else { 1 };
    sequence
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .enumerate()
        .map(|(n, c)| {
            let team = c
                .to_digit(10)
                .and_then(|d| (d as usize).checked_sub(offset))
                .filter(|team| *team < 2);
            match team {
                Some(team) => Ok(team),
                None => bail!("Point {}: {:?} is not a team", n + 1, c),
            }
        })
        .collect()
}

fn run_replay<W: Write>(engine: &mut MatchEngine, points: &[usize], out: &mut W) -> Result<()> {
    for (n, &team) in points.iter().enumerate() {
        engine
            .record_point(team)
            .with_context(|| format!("Point {} rejected", n + 1))?;
        writeln!(out, "{}", score_line(&engine.snapshot()))?;
    }
    let snapshot = engine.snapshot().to_json_pretty()?;
    writeln!(out, "{snapshot}")?;
    Ok(())
}

fn run_play<R: BufRead, W: Write>(engine: &mut MatchEngine, input: R, out: &mut W) -> Result<()> {
    let announcer = Announcer::attach(engine);
    writeln!(out, "{}", score_line(&engine.snapshot()))?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let team = match line.trim() {
            "q" | "Q" => break,
            "" => continue,
            "1" => 0,
            "2" => 1,
            other => {
                log::warn!("Ignoring operator input {:?}", other);
                writeln!(out, "Enter 1 or 2 for the point winner, q to quit")?;
                continue;
            }
        };

        if engine.is_over() {
            writeln!(out, "Match is over, q to quit")?;
            continue;
        }
        if !score_tap(engine, team, out)? {
            continue;
        }

        for announcement in announcer.drain() {
            match announcement {
                Announcement::Message(message) => writeln!(out, ">> {message}")?,
                Announcement::Winner(name) => writeln!(out, ">> Game, set and match {name}")?,
            }
        }
        writeln!(out, "{}", score_line(&engine.snapshot()))?;
    }
    Ok(())
}

/// Record one operator tap. Input errors are reported and leave the match
/// untouched; returns whether the point was recorded.
fn score_tap<W: Write>(engine: &mut MatchEngine, team: usize, out: &mut W) -> Result<bool> {
    match engine.record_point(team) {
        Ok(_) => Ok(true),
        Err(err) if err.is_input_error() => {
            writeln!(out, "Point rejected: {err}")?;
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}
