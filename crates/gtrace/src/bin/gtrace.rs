//! Command-line tool for inspecting goroutine trace files.
//!
//! # Usage
//!
//! ```bash
//! # Show per-kind statistics for a trace file
//! gtrace summary --trace trace.json
//!
//! # Sort a trace by timestamp and write it back
//! gtrace sort --trace trace.json --output sorted.json
//!
//! # Stream events one per line, optionally filtered by kind
//! gtrace show --trace trace.json --kind send
//! ```

use clap::{Parser, Subcommand};
use gtrace::events::EventKind;
use gtrace::log::EventLog;

#[derive(Parser)]
#[command(name = "gtrace")]
#[command(about = "Inspect and reorder goroutine lifecycle trace files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show summary statistics for a trace file.
    Summary {
        /// Path to trace file (JSON).
        #[arg(short, long)]
        trace: String,
    },

    /// Sort a trace by timestamp.
    Sort {
        /// Path to trace file (JSON).
        #[arg(short, long)]
        trace: String,

        /// Write the sorted trace here instead of stdout.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print events one per line.
    Show {
        /// Path to trace file (JSON).
        #[arg(short, long)]
        trace: String,

        /// Filter to specific event kinds (comma-separated).
        /// Options: create, stop, send
        #[arg(short, long)]
        kind: Option<String>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { trace } => cmd_summary(trace),
        Commands::Sort { trace, output } => cmd_sort(trace, output),
        Commands::Show { trace, kind } => cmd_show(trace, kind),
    }
}

fn load_or_exit(path: &str) -> EventLog {
    match EventLog::load(path) {
        Ok(log) => log,
        Err(e) => {
            eprintln!("Failed to load {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

fn cmd_summary(trace: String) {
    let log = load_or_exit(&trace);

    println!("Trace: {}", trace);
    println!("Events: {}", log.count());
    if let Some((first, last)) = log.time_span() {
        println!("Time span: {} .. {}", first, last);
    }
    println!();

    println!("{:>20} {:>10} {:>8}", "Event Kind", "Count", "Percent");
    println!("{}", "-".repeat(40));
    let total = log.count() as f64;
    for (kind, count) in log.summary() {
        let pct = if total > 0.0 {
            count as f64 / total * 100.0
        } else {
            0.0
        };
        println!("{:>20} {:>10} {:>7.1}%", kind.as_str(), count, pct);
    }
    println!("{}", "-".repeat(40));
    println!("{:>20} {:>10}", "Total", log.count());
}

fn cmd_sort(trace: String, output: Option<String>) {
    let mut log = load_or_exit(&trace);
    log.sort_by_time();

    match output {
        Some(path) => {
            if let Err(e) = log.save(&path) {
                eprintln!("Failed to save {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Wrote {} events to {}", log.count(), path);
        }
        None => println!("{}", log.to_json()),
    }
}

fn cmd_show(trace: String, kind: Option<String>) {
    let log = load_or_exit(&trace);
    let filter = kind.map(|k| parse_kind_filter(&k));

    let mut shown = 0usize;
    for event in log.events() {
        let passes = match filter {
            Some(ref kinds) => kinds.contains(&event.kind),
            None => true,
        };
        if passes {
            println!("{}", event);
            shown += 1;
        }
    }
    eprintln!("{} of {} events shown", shown, log.count());
}

fn parse_kind_filter(filter: &str) -> Vec<EventKind> {
    filter
        .split(',')
        .filter_map(|s| match s.trim().to_lowercase().as_str() {
            "create" => Some(EventKind::Create),
            "stop" => Some(EventKind::Stop),
            "send" => Some(EventKind::Send),
            other => {
                eprintln!("Unknown event kind filter: {}", other);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_filter_parsing() {
        assert_eq!(
            parse_kind_filter("create,send"),
            vec![EventKind::Create, EventKind::Send]
        );
        assert_eq!(parse_kind_filter(" STOP "), vec![EventKind::Stop]);
        assert!(parse_kind_filter("bogus").is_empty());
    }
}
