// Klava CLI
// Terminal virtual keyboard with EN/RU layouts

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use klava_core::{Layout, Locale, Settings};

/// On-screen EN/RU keyboard for the terminal
#[derive(Parser, Debug)]
#[command(name = "klava")]
#[command(version)]
#[command(about = "On-screen EN/RU keyboard for the terminal", long_about = None)]
struct Args {
    /// Settings file (default: <config dir>/klava/settings.toml)
    #[arg(short, long, value_name = "SETTINGS")]
    settings: Option<PathBuf>,

    /// Start with this locale instead of the persisted one
    #[arg(short, long, value_name = "LOCALE")]
    locale: Option<String>,

    /// Validate the built-in layout table and exit
    #[arg(long)]
    check_layout: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    if args.check_layout {
        let layout = Layout::standard().context("layout table is invalid")?;
        println!(
            "layout ok: {} keys in {} rows",
            layout.key_count(),
            layout.rows().len()
        );
        return Ok(());
    }

    let settings_path = args
        .settings
        .or_else(Settings::default_path)
        .context("no config directory available, pass --settings")?;

    let mut settings = Settings::from_file(&settings_path).unwrap_or_else(|err| {
        log::warn!("failed to load settings, using defaults: {err}");
        Settings::default()
    });

    if let Some(locale) = args.locale.as_deref() {
        settings.locale = parse_locale(locale)?;
    }

    klava::tui::run(settings, settings_path)
}

fn parse_locale(value: &str) -> anyhow::Result<Locale> {
    match value.to_ascii_lowercase().as_str() {
        "en" => Ok(Locale::En),
        "ru" => Ok(Locale::Ru),
        other => anyhow::bail!("unknown locale '{other}', expected 'en' or 'ru'"),
    }
}
