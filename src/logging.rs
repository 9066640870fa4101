//! Logging setup.
//!
//! Logs go to `~/.mindwell/mindwell.log` so the terminal player is never
//! drawn over. `RUST_LOG` takes precedence over `general.log_level`.

use std::fs::OpenOptions;
use std::io::Write;

use env_logger::{Builder, Env, Target};

use crate::config::{Config, Paths};
use crate::error::MindwellError;

/// Initialize the global logger, writing to the data directory's log file.
///
/// Calling this more than once is harmless; later calls keep the first
/// logger.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init(paths: &Paths, config: &Config) -> Result<(), MindwellError> {
    paths.ensure_dirs()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.log_file)?;

    let env = Env::default().default_filter_or(config.general.log_level.as_str());
    let initialized = Builder::from_env(env)
        .target(Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {} {}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .is_ok();

    if initialized {
        log::info!(
            "logging to {} at '{}'",
            paths.log_file.display(),
            config.general.log_level
        );
    }
    Ok(())
}

/// Logger for tests, writing to the test harness.
#[cfg(test)]
pub fn init_test() {
    let _ = Builder::from_env(Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_log_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("home"));

        init(&paths, &Config::default()).unwrap();
        assert!(paths.log_file.exists());

        // A second call must not fail.
        init(&paths, &Config::default()).unwrap();
    }

    #[test]
    fn test_init_test_is_repeatable() {
        init_test();
        init_test();
        log::debug!("test logger ready");
    }
}
