//! typecycle - A portfolio hero banner for the terminal
//!
//! Shows a name, a tagline and a line that types out, holds, and erases a
//! list of phrases forever, with count-up stats underneath.
//!
//! # Features
//!
//! - **Typing Effect**: Cycles through configured phrases with separate
//!   typing and erasing speeds
//! - **Stat Counters**: Numbers count up once when the banner opens
//! - **Themes**: Dark and light schemes, remembered between runs
//! - **Contact Form**: Validate and relay a message from the command line
//!
//! # Quick Start
//!
//! ```text
//! typecycle                  # Show the banner
//! typecycle --light          # Light theme for this run
//! typecycle --contact "Ada" ada@example.com "Loved the portfolio!"
//! ```
//!
//! # Keybindings
//!
//! | Key | Action |
//! |-----|--------|
//! | t | Toggle theme |
//! | q / Esc / Ctrl+C | Quit |

use std::env;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Instant;

use anyhow::Context;
use crossterm::event::{self, Event};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use unicode_width::UnicodeWidthStr;

use typecycle::config::{self, ColorScheme, Config};
use typecycle::contact::{self, ContactError, ContactMessage, LogRelay};
use typecycle::counter::{CounterGroup, FrameClock};
use typecycle::prefs::{PreferenceStore, ThemeMode};
use typecycle::typing::{ChannelSink, TypingEngine};
use typecycle::ui::{Action, HeroRenderer, HeroView, KeyMapper, MIN_HERO_ROWS};

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the log filter
const LOG_ENV: &str = "TYPECYCLE_LOG";

/// What to do this run
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Banner,
    Contact(ContactMessage),
    Help,
    Version,
}

/// Command line options
#[derive(Debug, Clone, PartialEq, Eq)]
struct Options {
    mode: Mode,
    /// Config file given on the command line
    config_path: Option<PathBuf>,
    /// Theme for this run, not saved
    theme: Option<ThemeMode>,
    /// Start without a typing target
    no_hero: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mode: Mode::Banner,
            config_path: None,
            theme: None,
            no_hero: false,
        }
    }
}

fn print_version() {
    eprintln!("typecycle {}", VERSION);
}

fn print_help() {
    eprintln!("typecycle {} - A portfolio hero banner for the terminal", VERSION);
    eprintln!();
    eprintln!("Usage: typecycle [OPTIONS]");
    eprintln!("       typecycle --contact <NAME> <EMAIL> <MESSAGE>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <PATH>   Use this config file");
    eprintln!("      --light           Light theme for this run");
    eprintln!("      --dark            Dark theme for this run");
    eprintln!("      --no-hero         Do not start the typing line");
    eprintln!("      --contact         Validate and send a contact message");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Keys:");
    eprintln!("  t                     Toggle theme (remembered)");
    eprintln!("  q, Esc, Ctrl+C        Quit");
    eprintln!();
    eprintln!("Configuration: ~/.typecycle/config.toml");
    eprintln!("Theme preference: ~/.typecycle/prefs.toml");
    eprintln!("Log: ~/.typecycle/typecycle.log ({} sets the filter)", LOG_ENV);
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut i = 0;

    let next_value = |i: &mut usize, what: &str| -> Result<String, String> {
        *i += 1;
        args.get(*i)
            .cloned()
            .ok_or_else(|| format!("Missing {} argument", what))
    };

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                options.mode = Mode::Help;
                return Ok(options);
            }
            "-v" | "--version" => {
                options.mode = Mode::Version;
                return Ok(options);
            }
            "-c" | "--config" => {
                options.config_path = Some(PathBuf::from(next_value(&mut i, "config path")?));
            }
            "--light" => {
                options.theme = Some(ThemeMode::Light);
            }
            "--dark" => {
                options.theme = Some(ThemeMode::Dark);
            }
            "--no-hero" => {
                options.no_hero = true;
            }
            "--contact" => {
                let name = next_value(&mut i, "contact name")?;
                let email = next_value(&mut i, "contact email")?;
                let message = next_value(&mut i, "contact message")?;
                options.mode = Mode::Contact(ContactMessage { name, email, message });
            }
            arg => {
                return Err(format!("Unknown argument: {}. Use -h for help.", arg));
            }
        }
        i += 1;
    }

    Ok(options)
}

/// Log to `~/.typecycle/typecycle.log`; the terminal belongs to the banner
fn init_logging() {
    let log_path = config::app_dir()
        .map(|dir| dir.join("typecycle.log"))
        .unwrap_or_else(|_| PathBuf::from("typecycle.log"));

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    match options.mode {
        Mode::Help => {
            print_help();
            return Ok(());
        }
        Mode::Version => {
            print_version();
            return Ok(());
        }
        _ => {}
    }

    init_logging();
    info!("typecycle {} starting...", VERSION);

    if let Mode::Contact(ref message) = options.mode {
        return run_contact(message);
    }

    let config = match options.config_path {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load(),
    };
    run_banner(&options, &config)
}

/// Validate and relay one contact message
fn run_contact(message: &ContactMessage) -> anyhow::Result<()> {
    match contact::submit(&LogRelay, message) {
        Ok(()) => {
            println!("Message sent! I'll get back to you soon.");
            Ok(())
        }
        Err(ContactError::Invalid(invalid)) => {
            for msg in &invalid.messages {
                eprintln!("Error: {}", msg);
            }
            std::process::exit(1);
        }
        Err(e) => {
            error!("Failed to send contact message: {}", e);
            Err(anyhow::Error::new(e)
                .context("There was an error sending the message. Please try again."))
        }
    }
}

/// Run the hero banner until the user quits
fn run_banner(options: &Options, config: &Config) -> anyhow::Result<()> {
    let phrases = config.phrase_list().context("Invalid phrases in config")?;
    let typed_width = phrases.iter().map(|p| p.width()).max().unwrap_or(0);

    let store = match PreferenceStore::open_default() {
        Ok(store) => Some(store),
        Err(e) => {
            warn!("Theme preference unavailable: {}", e);
            None
        }
    };
    let theme = options
        .theme
        .unwrap_or_else(|| store.as_ref().map(PreferenceStore::load).unwrap_or_default());
    info!("Theme: {}", theme);

    let (_, rows) = HeroRenderer::size()?;
    let (text_tx, text_rx) = mpsc::channel();
    // Chosen once; a terminal that grows later keeps the typed line hidden
    let target = if options.no_hero || rows < MIN_HERO_ROWS {
        None
    } else {
        Some(ChannelSink(text_tx))
    };

    let mut view = HeroView {
        name: config.name.clone(),
        hero: target.is_some(),
        typed: String::new(),
        typed_width,
        tagline: config.tagline.clone(),
        stats: config.stats.iter().map(|s| (s.label.clone(), 0)).collect(),
        scheme: ColorScheme::for_mode(theme),
    };

    let mut renderer = HeroRenderer::new();
    renderer.init()?;

    let handle = TypingEngine::new(phrases, config.typing_config()).start(target)?;

    let result = run_main_loop(&mut renderer, &mut view, &text_rx, store.as_ref(), config);

    // Stop typing before giving the terminal back
    if let Some(handle) = handle {
        handle.stop();
    }
    let _ = renderer.cleanup();

    result
}

/// Main event loop for the banner
fn run_main_loop(
    renderer: &mut HeroRenderer,
    view: &mut HeroView,
    text_rx: &Receiver<String>,
    store: Option<&PreferenceStore>,
    config: &Config,
) -> anyhow::Result<()> {
    let frame = config.counter.frame();
    let targets: Vec<u64> = config.stats.iter().map(|s| s.count).collect();
    let mut counters = CounterGroup::new();
    counters.start(&targets, config.counter.duration(), frame);

    let mut clock = FrameClock::new(frame, Instant::now());
    let mut dirty = true;
    loop {
        // Latest typed text wins
        loop {
            match text_rx.try_recv() {
                Ok(text) => {
                    view.typed = text;
                    dirty = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        let mut counted = false;
        for _ in 0..clock.due(Instant::now()) {
            counted |= counters.advance();
        }
        if counted {
            for (stat, value) in view.stats.iter_mut().zip(counters.values()) {
                stat.1 = value;
            }
            dirty = true;
        }

        if dirty {
            renderer.draw(view)?;
            dirty = false;
        }

        if !event::poll(clock.until_next(Instant::now()))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => match KeyMapper::map(&key) {
                Some(Action::Quit) => {
                    info!("Quit requested");
                    return Ok(());
                }
                Some(Action::ToggleTheme) => {
                    let theme = view.scheme.mode.toggle();
                    view.scheme = ColorScheme::for_mode(theme);
                    if let Some(store) = store {
                        if let Err(e) = store.save(theme) {
                            warn!("{}", e);
                        }
                    }
                    dirty = true;
                }
                None => {}
            },
            Event::Resize(cols, rows) => {
                info!("Terminal resized to {}x{}", cols, rows);
                dirty = true;
            }
            _ => {}
        }
    }
}
