use anyhow::{Context, Result};
use calscribe::calendars::{CalendarDirectory, StaticCalendarDirectory};
use calscribe::cli::{self, CliArgs, Command};
use calscribe::color_utils::{EventColor, is_dark, parse_hex_to_u8};
use calscribe::config::Config;
use calscribe::context::StandardContext;
use calscribe::model::{AnchorTime, Normalizer, Selection, dates, recurrence};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::io::Read;
use std::process::ExitCode;
use strum::IntoEnumIterator;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let parsed = match cli::parse_args(&args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            eprintln!("Try 'calscribe --help'.");
            return ExitCode::from(2);
        }
    };

    let level = if parsed.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    // A second logger init only fails if one is already installed.
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    match run(parsed) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

/// Returns `Ok(false)` when some input was rejected.
fn run(args: CliArgs) -> Result<bool> {
    let anchor = match args.now {
        Some(naive) => AnchorTime::from_local(naive),
        None => AnchorTime::now(),
    };

    match &args.command {
        Command::Help => {
            cli::print_help("calscribe");
            Ok(true)
        }
        Command::Colors => {
            print_colors();
            Ok(true)
        }
        Command::Resolve { expression } => {
            match dates::try_resolve(expression, &anchor) {
                Some(date) => println!("{}", date.format("%Y-%m-%d (%A)")),
                None => {
                    log::warn!("'{}' is not a relative date; using today", expression);
                    println!("{}", anchor.date().format("%Y-%m-%d (%A)"));
                }
            }
            Ok(true)
        }
        Command::Rrule { text, until } => match recurrence::compile(text, *until, anchor.date()) {
            Ok(spec) => {
                println!("{}", spec);
                Ok(true)
            }
            Err(e) => {
                eprintln!("Could not compile '{}': {}", text, e);
                Ok(false)
            }
        },
        Command::Calendars => {
            let config = load_config(&args)?;
            let directory = StaticCalendarDirectory::from_config(&config);
            for entry in directory.calendars()? {
                let marker = if entry.name == config.default_calendar {
                    " (default)"
                } else {
                    ""
                };
                println!("{}\t{}{}", entry.name, entry.id, marker);
            }
            Ok(true)
        }
        Command::Normalize { input } => {
            let config = load_config(&args)?;
            let payload = match input {
                Some(path) => std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read '{}'", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read stdin")?;
                    buf
                }
            };
            normalize_payload(&args, &config, anchor, &payload)
        }
    }
}

fn load_config(args: &CliArgs) -> Result<Config> {
    let ctx = StandardContext::new(args.root.clone());
    let config = Config::load_or_default(&ctx)?;
    log::debug!(
        "Config: {}",
        Config::get_path_string(&ctx).unwrap_or_default()
    );
    Ok(config)
}

fn normalize_payload(
    args: &CliArgs,
    config: &Config,
    anchor: AnchorTime,
    payload: &str,
) -> Result<bool> {
    let directory = StaticCalendarDirectory::from_config(config);
    let normalizer =
        Normalizer::new(anchor, config.normalize_options()?).with_calendars(directory.calendars()?);
    let selection = Selection::new(
        args.color.clone().or_else(|| config.default_color.clone()),
        args.calendar.clone(),
    );

    let results = normalizer.normalize_payload(payload, &selection);
    if results.is_empty() {
        log::warn!("No event blocks found in input");
    }

    let mut all_ok = true;
    for result in results {
        match result.outcome {
            Ok(normalized) => {
                for diagnostic in &normalized.diagnostics {
                    eprintln!("Block {}: {}", result.index, diagnostic);
                }
                let record = &normalized.record;
                let event = record
                    .to_json()
                    .with_context(|| format!("Failed to serialize block {}", result.index))?;
                let line = serde_json::json!({
                    "block": result.index,
                    "calendarId": record.calendar_id(),
                    "event": event,
                });
                println!("{}", line);

                if args.preview > 0
                    && let Some(spec) = record.recurrence()
                {
                    match spec.occurrences(record.start().date_time, args.preview) {
                        Ok(upcoming) => {
                            for d in upcoming {
                                eprintln!("  occurs {}", d.format("%Y-%m-%d %H:%M"));
                            }
                        }
                        Err(e) => eprintln!("Block {}: {}", result.index, e),
                    }
                }
            }
            Err(e) => {
                all_ok = false;
                eprintln!("Block {}: {}", result.index, e);
            }
        }
    }
    Ok(all_ok)
}

fn print_colors() {
    for color in EventColor::iter() {
        let id = color.id().unwrap_or("-");
        match color.hex().and_then(parse_hex_to_u8) {
            Some((r, g, b)) => {
                let fg = if is_dark(r, g, b) { "97" } else { "30" };
                println!(
                    "\x1b[48;2;{};{};{}m\x1b[{}m {:^11} \x1b[0m  id {}",
                    r,
                    g,
                    b,
                    fg,
                    color.to_string(),
                    id
                );
            }
            None => println!(" {:^11}   id {}", color.to_string(), id),
        }
    }
}
