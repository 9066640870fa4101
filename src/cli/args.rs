use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "mindwell")]
#[command(about = "Guided breathing and meditation timer for the terminal")]
#[command(long_about = "mindwell - breathing and meditation practice in the terminal

Runs guided exercises and breathing patterns with a live countdown, keeps
track of completed sessions, and logs how you feel along the way.

QUICK START:
  mindwell catalog           List exercises and breathing patterns
  mindwell start 2           Run the 'Mindful Moment' exercise
  mindwell breathe box       Follow box breathing (4-4-4-4)
  mindwell breathe 4-7-8     Any inline pattern works too
  mindwell mood log good     Log today's mood

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  mindwell <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output,
    /// or 'json' for machine-readable output suitable for scripting.
    /// Defaults to `$MINDWELL_OUTPUT`, then `general.default_output` from
    /// the config file.
    #[arg(short, long, value_enum, global = true, env = "MINDWELL_OUTPUT")]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List exercises and breathing patterns
    ///
    /// Shows every guided exercise with its length, kind and difficulty,
    /// the built-in breathing patterns, and how much of the catalog you
    /// have completed.
    ///
    /// # Examples
    ///
    ///   mindwell catalog
    ///   mindwell catalog --kind body-scan
    #[command(alias = "ls")]
    Catalog {
        /// Only show exercises of this kind (breathing, mindfulness, body-scan, visualization)
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Run a guided exercise
    ///
    /// Opens the terminal player with the exercise loaded and running.
    /// Completing it adds a session to your progress.
    ///
    /// # Keys
    ///
    ///   space    Play / pause
    ///   r        Reset
    ///   q        Quit
    ///
    /// # Examples
    ///
    ///   mindwell start 3
    ///   mindwell start 2 --duration 90s
    ///   mindwell start 1 --headless
    Start(StartArgs),

    /// Follow a breathing pattern
    ///
    /// Accepts a catalog pattern (4-7-8, box, coherent, calming) or an
    /// inline spec of three or four phase lengths in seconds.
    ///
    /// # Examples
    ///
    ///   mindwell breathe
    ///   mindwell breathe box --cycles 5
    ///   mindwell breathe 4-2-6 --headless
    Breathe(BreatheArgs),

    /// Browse the catalog and practice interactively
    Tui,

    /// Show or reset practice progress
    ///
    /// # Examples
    ///
    ///   mindwell progress
    ///   mindwell progress history -n 5
    ///   mindwell progress reset --force
    Progress(ProgressArgs),

    /// Log and review moods
    ///
    /// # Examples
    ///
    ///   mindwell mood log good --note "Productive day #work"
    ///   mindwell mood log 2 --tags "tired, exams"
    ///   mindwell mood list
    ///   mindwell mood stats
    Mood(MoodArgs),

    /// Show open appointment slots
    ///
    /// # Examples
    ///
    ///   mindwell slots
    ///   mindwell slots --doctor 2 --date 2025-03-14
    ///   mindwell slots --seed 42
    Slots(SlotsArgs),

    /// Show configuration
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   mindwell completions zsh > ~/.zsh/completions/_mindwell
    ///   source <(mindwell completions bash)
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for running an exercise.
#[derive(Args)]
pub struct StartArgs {
    /// Exercise id from the catalog
    pub id: String,

    /// Override the exercise length (e.g. 90s, 5m, 1m30s)
    #[arg(short, long)]
    pub duration: Option<String>,

    /// Run without the terminal player, printing progress as text
    #[arg(long)]
    pub headless: bool,
}

/// Arguments for breathing.
#[derive(Args)]
pub struct BreatheArgs {
    /// Pattern id, name or spec like 4-7-8 (default from config)
    pub pattern: Option<String>,

    /// Stop after this many cycles (headless default: 3)
    #[arg(short, long)]
    pub cycles: Option<u32>,

    /// Run without the terminal player, printing phases as text
    #[arg(long)]
    pub headless: bool,
}

/// Arguments for progress.
#[derive(Args)]
pub struct ProgressArgs {
    #[command(subcommand)]
    pub command: Option<ProgressCommands>,
}

/// Progress subcommands.
#[derive(Subcommand)]
pub enum ProgressCommands {
    /// Show totals and the weekly goal (default)
    Show,

    /// List recently completed sessions
    History {
        /// Number of sessions to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    /// Erase all progress
    Reset {
        /// Confirm the reset
        #[arg(long)]
        force: bool,
    },
}

/// Arguments for mood tracking.
#[derive(Args)]
pub struct MoodArgs {
    #[command(subcommand)]
    pub command: MoodCommands,
}

/// Mood subcommands.
#[derive(Subcommand)]
pub enum MoodCommands {
    /// Log how you feel
    Log {
        /// Mood: 1-5 or very-low, low, neutral, good, very-good
        level: String,

        /// A note; #hashtags become tags
        #[arg(short = 'm', long)]
        note: Option<String>,

        /// Comma-separated tags
        #[arg(short, long)]
        tags: Option<String>,
    },

    /// List recent entries
    List {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    /// Show mood statistics and your logging streak
    Stats,

    /// Delete every mood entry
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        force: bool,
    },
}

/// Arguments for appointment slots.
#[derive(Args)]
pub struct SlotsArgs {
    /// Doctor id
    #[arg(short, long, default_value = "1")]
    pub doctor: String,

    /// Only this day (YYYY-MM-DD); defaults to every generated day
    #[arg(long)]
    pub date: Option<String>,

    /// Seed availability for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for configuration.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration (default)
    Show,

    /// Print the data directory and file locations
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_breathe() {
        let cli = Cli::parse_from(["mindwell", "breathe", "box", "--cycles", "2", "--headless"]);
        match cli.command {
            Commands::Breathe(args) => {
                assert_eq!(args.pattern.as_deref(), Some("box"));
                assert_eq!(args.cycles, Some(2));
                assert!(args.headless);
            }
            _ => panic!("expected breathe"),
        }
        assert_eq!(cli.output, None);
    }

    #[test]
    fn test_global_output_flag() {
        let cli = Cli::parse_from(["mindwell", "mood", "stats", "--output", "json"]);
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_progress_defaults_to_none() {
        let cli = Cli::parse_from(["mindwell", "progress"]);
        match cli.command {
            Commands::Progress(args) => assert!(args.command.is_none()),
            _ => panic!("expected progress"),
        }
    }
}
