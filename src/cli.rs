// File: ./src/cli.rs
//! Shared command-line interface logic: argument parsing and help.

use chrono::{NaiveDate, NaiveDateTime};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Normalize a payload from a file, or stdin when `None`.
    Normalize { input: Option<PathBuf> },
    Resolve { expression: String },
    Rrule {
        text: String,
        until: Option<NaiveDate>,
    },
    Colors,
    Calendars,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: Command,
    pub root: Option<PathBuf>,
    pub now: Option<NaiveDateTime>,
    pub color: Option<String>,
    pub calendar: Option<String>,
    /// Occurrences to list per recurring event (0 = none).
    pub preview: u16,
    pub verbose: bool,
}

fn take_value(args: &[String], i: &mut usize, flag: &str) -> Result<String, String> {
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| format!("Missing value for {}", flag))
}

/// Parses arguments (without the binary name). Flags may appear anywhere.
pub fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut root = None;
    let mut now = None;
    let mut color = None;
    let mut calendar = None;
    let mut preview = 0;
    let mut verbose = false;
    let mut until = None;
    let mut positional: Vec<String> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-h" | "--help" => positional.insert(0, "help".to_string()),
            "-v" | "--verbose" => verbose = true,
            "-r" | "--root" => root = Some(PathBuf::from(take_value(args, &mut i, arg)?)),
            "--now" => {
                let raw = take_value(args, &mut i, arg)?;
                let parsed = NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M")
                    .map_err(|_| format!("Invalid --now '{}' (expected \"YYYY-MM-DD HH:MM\")", raw))?;
                now = Some(parsed);
            }
            "--color" => color = Some(take_value(args, &mut i, arg)?),
            "--calendar" => calendar = Some(take_value(args, &mut i, arg)?),
            "--preview" => {
                let raw = take_value(args, &mut i, arg)?;
                preview = raw
                    .parse::<u16>()
                    .map_err(|_| format!("Invalid --preview '{}'", raw))?;
            }
            "--until" => {
                let raw = take_value(args, &mut i, arg)?;
                let parsed = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|_| format!("Invalid --until '{}' (expected YYYY-MM-DD)", raw))?;
                until = Some(parsed);
            }
            _ if arg.starts_with('-') && arg.len() > 1 => {
                return Err(format!("Unknown option '{}'", arg));
            }
            _ => positional.push(arg.to_string()),
        }
        i += 1;
    }

    let command = match positional.first().map(String::as_str) {
        Some("help") => Command::Help,
        Some("colors") => Command::Colors,
        Some("calendars") => Command::Calendars,
        Some("resolve") => {
            if positional.len() < 2 {
                return Err("resolve needs an expression, e.g. 'next friday'".to_string());
            }
            Command::Resolve {
                expression: positional[1..].join(" "),
            }
        }
        Some("rrule") => {
            if positional.len() < 2 {
                return Err("rrule needs a recurrence phrase".to_string());
            }
            Command::Rrule {
                text: positional[1..].join(" "),
                until,
            }
        }
        Some("-") | None => Command::Normalize { input: None },
        Some(path) => {
            if positional.len() > 1 {
                return Err(format!("Unexpected argument '{}'", positional[1]));
            }
            Command::Normalize {
                input: Some(PathBuf::from(path)),
            }
        }
    };

    Ok(CliArgs {
        command,
        root,
        now,
        color,
        calendar,
        preview,
        verbose,
    })
}

pub fn print_help(binary_name: &str) {
    println!(
        "Calscribe v{} - Turns event descriptions into calendar-ready records",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] [FILE|-]", binary_name);
    println!("    {} resolve <expression>", binary_name);
    println!("    {} rrule <phrase> [--until YYYY-MM-DD]", binary_name);
    println!("    {} colors", binary_name);
    println!("    {} calendars", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>       Use a different directory for config.");
    println!("    --now \"YYYY-MM-DD HH:MM\" Resolve relative dates against this time.");
    println!("    --color <name>          Event color (Lavender, Sage, ... Tomato).");
    println!("    --calendar <name>       Target calendar by its friendly name.");
    println!("    --preview <n>           List the first n occurrences of recurring events.");
    println!("    -v, --verbose           Debug logging on stderr.");
    println!("    -h, --help              Show this help message.");
    println!();
    println!("INPUT FORMAT:");
    println!("    One \"Key: Value\" per line, events separated by a line of ---");
    println!("    Title, Summary, Location, Start Date, Start Time, End Time,");
    println!("    End Date, Recurring");
    println!();
    println!("EXAMPLES:");
    println!("    Title: Team sync");
    println!("    Start Date: next monday");
    println!("    Start Time: 9:30 AM");
    println!("    Recurring: yes, every 2 weeks on Monday");
    println!("    End Date: for 3 months");
    println!();
    println!(
        "    {} rrule \"yes, annually on July 20\" --until 2030-01-01",
        binary_name
    );
    println!("    {} resolve \"this friday\" --now \"2025-01-10 12:00\"", binary_name);
    println!();
    println!("OUTPUT:");
    println!("    One JSON object per accepted event on stdout; rejections on stderr.");
    println!("    Exit status is 1 when any block was rejected.");
}
