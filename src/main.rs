//! Liaison CLI
//!
//! Usage:
//!   liaison --text "I can't stand smoking"   # Single utterance evaluation
//!   liaison --interactive                    # Interactive session (U: / A: prefixes)
//!   liaison --serve                          # HTTP API server
//!   liaison --text "..." --json              # JSON output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};

use liaison::core::{run_server, SessionEngine};
use liaison::types::{ChipEvent, ChipEventKind, EngineEvent, LifecycleState, Role};
use liaison::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "liaison",
    version = VERSION,
    about = "Liaison - extract personality chips from live conversation text",
    long_about = "Liaison is the real-time intelligence engine behind a voice\n\
                  matchmaking conversation. It classifies utterances against a\n\
                  trait taxonomy, deduplicates findings into chips, reconciles\n\
                  agent confirmations, and detects the conversation sign-off.\n\n\
                  Modes:\n  \
                  --interactive  Session REPL (prefix lines with U: or A:)\n  \
                  --serve        HTTP API server mode\n\n\
                  States:\n  \
                  ACTIVE  - Conversation in progress\n  \
                  ENDING  - Sign-off detected, grace delay running\n  \
                  CLOSED  - Session over, input ignored"
)]
struct Args {
    /// Text to evaluate as a single user utterance
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive session mode - read lines from stdin (U: / A: prefixes)
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    if args.serve {
        run_serve(&args).await;
    } else if let Some(ref text) = args.text {
        run_single(text, &args);
    } else {
        // Default to interactive if no mode specified
        run_interactive(&args);
    }
}

/// Run single utterance evaluation
fn run_single(text: &str, args: &Args) {
    let mut engine = SessionEngine::new();
    let events = engine.on_utterance(Role::User, text);

    if args.json {
        let chips: Vec<&ChipEvent> = events
            .iter()
            .filter_map(|e| match e {
                EngineEvent::Chip(c) => Some(c),
                _ => None,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&chips).unwrap_or_default());
        return;
    }

    if engine.chips().is_empty() {
        println!("No traits detected.");
        return;
    }
    for event in &events {
        if let EngineEvent::Chip(chip_event) = event {
            print_chip_event(chip_event);
        }
    }
}

/// Run interactive session mode
fn run_interactive(args: &Args) {
    let mut engine = SessionEngine::new();

    print_header(args.no_color);
    println!("Prefix each line with U: (user) or A: (agent).");
    println!("Example: U: I can't stand smoking");
    println!("         A: Got it, no smoking for you.");
    println!();
    println!("The session ends when the agent signs off with \"talk soon\".");
    println!("Type 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        let prompt = format_prompt(&engine, args.no_color);
        print!("{}", prompt);
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let Some((speaker, text)) = parse_speaker_prefix(line) else {
            println!("{}", "  Please prefix with U: or A: (e.g., 'U: Hello')".yellow());
            continue;
        };

        let events = engine.on_utterance(speaker, text);

        for event in &events {
            if let EngineEvent::Chip(chip_event) = event {
                if args.json {
                    println!("{}", serde_json::to_string(chip_event).unwrap_or_default());
                } else {
                    print_chip_event(chip_event);
                }
            }
        }

        if events.iter().any(|e| matches!(e, EngineEvent::Ending)) {
            println!();
            println!("{}", "  Agent signed off - waiting for trailing audio...".yellow());
            std::thread::sleep(engine.grace());
            if engine.grace_elapsed().is_some() {
                break;
            }
        }
    }

    print_session_summary(&engine);
}

/// Parse speaker prefix (U: or A:)
fn parse_speaker_prefix(line: &str) -> Option<(Role, &str)> {
    let line = line.trim();
    let (prefix, rest) = line.split_once(':')?;
    let role: Role = prefix.parse().ok()?;
    Some((role, rest.trim()))
}

/// Print header
fn print_header(no_color: bool) {
    if no_color {
        println!("========================================");
        println!("  Liaison v{} - Session Mode", VERSION);
        println!("========================================");
    } else {
        println!("{}", format!("Liaison v{} - Session Mode", VERSION).bold());
        println!("{}", "----------------------------------------".bold());
    }
    println!();
}

/// Format the REPL prompt from lifecycle state
fn format_prompt(engine: &SessionEngine, no_color: bool) -> String {
    let state = engine.state();
    if no_color {
        format!("[{} | {} chips] > ", state, engine.chips().len())
    } else {
        format!(
            "{}{} [{} | {} chips]{} > ",
            state.color_code(),
            state.emoji(),
            state,
            engine.chips().len(),
            LifecycleState::color_reset()
        )
    }
}

/// Print one chip event
fn print_chip_event(event: &ChipEvent) {
    let chip = &event.chip;
    let line = format!(
        "  {} {} {}: {} (confidence {:.1})",
        match event.kind {
            ChipEventKind::Created => "+",
            ChipEventKind::Updated => "^",
        },
        chip.emoji,
        chip.category,
        chip.label,
        chip.confidence
    );
    match event.kind {
        ChipEventKind::Created => println!("{}", line.green()),
        ChipEventKind::Updated => println!("{}", line.cyan()),
    }
}

/// Print the final profile summary
fn print_session_summary(engine: &SessionEngine) {
    let snapshot = engine.snapshot();
    println!();
    println!("{}", "Session summary".bold());
    println!("  Chips: {}", engine.chips().len());
    if !snapshot.dealbreakers.is_empty() {
        println!("  Dealbreakers: {}", snapshot.dealbreakers.join(", "));
    }
    if !snapshot.values.is_empty() {
        println!("  Values: {}", snapshot.values.join(", "));
    }
    if !snapshot.hobbies.is_empty() {
        println!("  Hobbies: {}", snapshot.hobbies.join(", "));
    }
    if !snapshot.styles.is_empty() {
        println!("  Styles: {}", snapshot.styles.join(", "));
    }
    if !snapshot.preferences.is_empty() {
        println!("  Preferences: {}", snapshot.preferences.join(", "));
    }
    if let Some(energy) = &snapshot.personality_tags.energy {
        println!("  Energy: {}", energy);
    }
    if let Some(humor) = &snapshot.personality_tags.humor {
        println!("  Humor: {}", humor);
    }
}

/// Run HTTP API server
async fn run_serve(args: &Args) {
    println!();
    println!("{}", format!("Liaison API Server v{}", VERSION).bold());
    println!();

    if let Err(e) = run_server(&args.addr).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
