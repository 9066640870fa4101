use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;

use mindwell::cli::args::{Cli, Commands};
use mindwell::cli::commands::{self, Context};
use mindwell::cli::completions::{completion_install_instructions, generate_completions};
use mindwell::config::{ColorSetting, Config, Paths};
use mindwell::logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let paths = Paths::new()?;
    let config = Config::load_from_path(&paths.config_file)
        .with_context(|| format!("loading {}", paths.config_file.display()))?;

    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }

    logging::init(&paths, &config)?;
    log::debug!("running {:?}", std::env::args().collect::<Vec<_>>());

    let format = cli.output.unwrap_or(config.general.default_output);
    let ctx = Context::new(paths, config, format);

    let output = match cli.command {
        Commands::Catalog { kind } => commands::catalog(&ctx, kind.as_deref())?,
        Commands::Start(args) => commands::start(&ctx, &args)?,
        Commands::Breathe(args) => commands::breathe(&ctx, &args)?,
        Commands::Tui => commands::browse(&ctx)?,
        Commands::Progress(args) => commands::progress(&ctx, args.command)?,
        Commands::Mood(args) => commands::mood(&ctx, args.command)?,
        Commands::Slots(args) => commands::slots(&ctx, &args)?,
        Commands::Config(args) => commands::config(&ctx, args.command)?,
        Commands::Completions { shell } => {
            eprintln!("{}", completion_install_instructions(shell));
            generate_completions(shell)?
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
