//! Interactive scoring session.
//!
//! Reads ball commands from stdin and polls the tracker between inputs so
//! the deferred confirmation and auto-reset deadlines fire on time.

use std::io::Write as _;
use std::time::Duration;

use chrono::Utc;
use clap::Args;
use overtally_core::feedback::{notify, Feedback};
use overtally_core::{Config, Delivery, OverTracker, Scoreboard};

#[derive(Args)]
pub struct ScoreArgs {
    /// Disable sound feedback for this session
    #[arg(long)]
    pub quiet: bool,
}

/// Terminal feedback: rings the bell per ball, twice for a maiden.
struct TerminalFeedback {
    sound: bool,
}

impl TerminalFeedback {
    fn bell(&self, times: usize) {
        if self.sound {
            print!("{}", "\x07".repeat(times));
            let _ = std::io::stdout().flush();
        }
    }
}

impl Feedback for TerminalFeedback {
    fn on_legal_delivery(&mut self, _balls_bowled: u8) {
        self.bell(1);
    }

    fn on_extra(&mut self) {
        self.bell(1);
    }

    fn on_over_complete(&mut self, maiden: bool) {
        self.bell(if maiden { 2 } else { 1 });
        println!("{}", if maiden { "Maiden over!" } else { "Over complete." });
    }

    fn on_undo(&mut self) {
        println!("Undone.");
    }

    fn on_reset(&mut self) {
        println!("New over.");
    }
}

pub fn run(args: ScoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let tracker = OverTracker::with_delays(config.delays());
    let board = Scoreboard::new(config.display.log_separator.clone());
    let feedback = TerminalFeedback {
        sound: config.feedback.enabled && config.feedback.sound && !args.quiet,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(session(tracker, board, feedback))
}

async fn session(
    mut tracker: OverTracker,
    board: Scoreboard,
    mut feedback: TerminalFeedback,
) -> Result<(), Box<dyn std::error::Error>> {
    use tokio::io::AsyncBufReadExt;

    println!("Scoring session. Type `help` for commands, `quit` to leave.");
    println!("{}", board.render(&tracker));

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut poll = tokio::time::interval(Duration::from_millis(200));
    poll.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_line(line.trim(), &mut tracker, &board, &mut feedback) {
                    break;
                }
            }
            _ = poll.tick() => {
                if let Some(event) = tracker.tick(Utc::now()) {
                    notify(&mut feedback, &event);
                    println!("{}", board.render(&tracker));
                }
            }
        }
    }
    Ok(())
}

/// Handle one input line. Returns false when the session should end.
fn handle_line(
    line: &str,
    tracker: &mut OverTracker,
    board: &Scoreboard,
    feedback: &mut TerminalFeedback,
) -> bool {
    if line.is_empty() {
        return true;
    }
    match line {
        "quit" | "q" | "exit" => return false,
        "help" | "?" => print_help(),
        "status" | "s" => {
            if let Some(event) = tracker.tick(Utc::now()) {
                notify(feedback, &event);
            }
            println!("{}", board.render(tracker));
        }
        "undo" | "u" => match tracker.undo() {
            Some(event) => {
                notify(feedback, &event);
                println!("{}", board.render(tracker));
            }
            None => println!("Nothing to undo."),
        },
        "over" | "new" => {
            if let Some(event) = tracker.new_over() {
                notify(feedback, &event);
                println!("{}", board.render(tracker));
            }
        }
        token => match parse_delivery(token) {
            Some(delivery) => match tracker.record(delivery, Utc::now()) {
                Some(event) => {
                    notify(feedback, &event);
                    println!("{}", board.render(tracker));
                }
                None => println!("Over closed - `undo` or `over` first."),
            },
            None => println!("Unknown command `{token}` - type `help`."),
        },
    }
    true
}

/// Parse a ball token shared with `replay`.
pub(crate) fn parse_delivery(token: &str) -> Option<Delivery> {
    match token {
        "dot" | "." => Some(Delivery::Dot),
        "wide" | "wd" => Some(Delivery::Wide),
        "noball" | "nb" => Some(Delivery::NoBall),
        "bye" | "b" => Some(Delivery::Bye),
        "wicket" | "w" | "x" => Some(Delivery::Wicket),
        _ => token.parse::<u8>().ok().and_then(Delivery::runs),
    }
}

fn print_help() {
    println!("Balls:    dot (.)  1..6  wide (wd)  noball (nb)  bye (b)  wicket (w)");
    println!("Actions:  undo (u)  over  status (s)  help (?)  quit (q)");
}
