use anyhow::Context;
use clap::{Parser, Subcommand};
use lisu_keyboard::commands::HELP;
use lisu_keyboard::{
    apply_action, create_engine_from, default_config, parse_line, AudioSink, Command,
    FeedbackCategory, KeyEvent, KeyOutcome, KeyboardConfig, KeyboardEngine, MemoryPreferences,
    Preferences, Redraw, RenderState, TextBuffer, TextSink, TomlPreferences, DEFAULT_CONFIG_TOML,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lisu-keyboard")]
#[command(about = "Drive the Lisu soft keyboard input logic from the terminal")]
#[command(version)]
struct Cli {
    /// Keyboard configuration (TOML); the bundled Lisu layout if omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive REPL mode
    Repl {
        /// File remembering the last active language between runs
        #[arg(long)]
        prefs: Option<PathBuf>,
    },
    /// Validate a keyboard configuration file
    Check {
        /// Configuration file to validate
        path: PathBuf,
    },
    /// Print the bundled configuration
    DumpConfig,
}

/// Key clicks go to the log; a terminal has no click sounds.
struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, category: FeedbackCategory) {
        debug!(?category, "key click");
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<KeyboardConfig> {
    match path {
        Some(path) => KeyboardConfig::load_toml(path),
        None => default_config(),
    }
}

fn print_state(state: &RenderState) {
    println!(
        "[{} #{} | {} page | layout {}]",
        state.language_name, state.language_index, state.page, state.layout
    );
}

fn print_outcome(outcome: &KeyOutcome) {
    println!("  {:?}", outcome.action);
    if outcome.redraw != Redraw::None {
        print_state(&outcome.state);
    }
}

fn print_field(field: &TextBuffer) {
    let mut shown: String = field.text().chars().take(field.cursor()).collect();
    shown.push('|');
    shown.extend(field.text().chars().skip(field.cursor()));
    println!("text: {:?}", shown);
}

fn press(engine: &mut KeyboardEngine, field: &mut TextBuffer, code: i32) {
    let event = KeyEvent::new(code).with_selection(field.selection());
    let outcome = engine.handle_key(&event);
    apply_action(&outcome.action, field);
    print_outcome(&outcome);
}

fn run_repl(config: &KeyboardConfig, prefs_path: Option<&Path>) -> anyhow::Result<()> {
    let preferences: Box<dyn Preferences + Send> = match prefs_path {
        Some(path) => Box::new(TomlPreferences::open(path)?),
        None => Box::new(MemoryPreferences::new()),
    };
    let mut engine = create_engine_from(config, preferences)?.with_audio(Box::new(LogAudio));
    let mut field = TextBuffer::new();

    println!("lisu-keyboard: type tokens and press Enter (:help for help)");
    println!("Ctrl-D to exit.");
    print_state(&engine.activate());

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let commands = match parse_line(&line, engine.session().router()) {
            Ok(commands) => commands,
            Err(e) => {
                eprintln!("error: {:#}", e);
                continue;
            }
        };

        for command in commands {
            match command {
                Command::Press(code) => press(&mut engine, &mut field, code),
                Command::Type(text) => {
                    for ch in text.chars() {
                        press(&mut engine, &mut field, ch as i32);
                    }
                }
                Command::Swipe(direction) => print_outcome(&engine.swipe(direction)),
                Command::Language(index) => match engine.select_language(index) {
                    Some(state) => print_state(&state),
                    None => eprintln!("error: no language #{}", index),
                },
                Command::Select(range) => field.select(range),
                Command::Show => print_state(&engine.render_state()),
                Command::Help => println!("{}", HELP),
                Command::Quit => {
                    engine.deactivate();
                    return Ok(());
                }
            }
        }
        if field.pickers_shown() > 0 {
            println!("(system input method picker requested)");
        }
        print_field(&field);
        io::stdout().flush()?;
    }
    engine.deactivate();
    Ok(())
}

fn run_check(path: &Path) -> anyhow::Result<()> {
    let config = KeyboardConfig::load_toml(path)?;
    let mut engine = create_engine_from(&config, Box::new(MemoryPreferences::new()))?;
    let names = engine.session().catalog().names().join(", ");
    let state = engine.activate();
    println!(
        "✅ {}: {} languages ({}), {} compound keys, starts on {}",
        path.display(),
        engine.session().catalog().len(),
        names,
        engine.session().router().composer().len(),
        state.layout
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Check { path }) => run_check(&path),
        Some(Commands::DumpConfig) => {
            print!("{}", DEFAULT_CONFIG_TOML);
            Ok(())
        }
        Some(Commands::Repl { prefs }) => {
            let config = load_config(cli.config.as_deref())?;
            run_repl(&config, prefs.as_deref())
        }
        None => {
            let config = load_config(cli.config.as_deref())?;
            run_repl(&config, None)
        }
    }
}
