//! One-shot replay of a token sequence.
//!
//! Applies the tokens in order against a fresh tracker and prints the
//! resulting state snapshot. Invalid operations (a delivery into a closed
//! over) are silently ignored, matching the tracker's policy; unknown
//! tokens are reported as errors.

use chrono::Utc;
use clap::Args;
use overtally_core::{Config, OverTracker, Scoreboard};

#[derive(Args)]
pub struct ReplayArgs {
    /// Ball tokens, e.g. `dot 4 wd x undo`
    #[arg(required = true)]
    pub tokens: Vec<String>,
    /// Render the scoreboard instead of JSON
    #[arg(long)]
    pub text: bool,
}

pub fn run(args: ReplayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut tracker = OverTracker::with_delays(config.delays());

    for raw in args.tokens.iter().flat_map(|t| t.split(',')) {
        let token = raw.trim();
        if token.is_empty() {
            continue;
        }
        apply_token(&mut tracker, token)?;
    }

    if args.text {
        let board = Scoreboard::new(config.display.log_separator.clone());
        println!("{}", board.render(&tracker));
    } else {
        println!("{}", serde_json::to_string_pretty(&tracker.snapshot())?);
    }
    Ok(())
}

fn apply_token(
    tracker: &mut OverTracker,
    token: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match token {
        "undo" | "u" => {
            tracker.undo();
        }
        "over" | "new" => {
            tracker.new_over();
        }
        _ => {
            let delivery = super::score::parse_delivery(token)
                .ok_or_else(|| format!("unknown token: {token}"))?;
            tracker.record(delivery, Utc::now());
        }
    }
    Ok(())
}
