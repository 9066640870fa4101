//! Shell completions generation.
//!
//! Generates shell completion scripts for bash, zsh, fish, elvish and
//! PowerShell.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::MindwellError;

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns `MindwellError::Parse` if the generated script is not UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, MindwellError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "mindwell", &mut buf);
    String::from_utf8(buf).map_err(|e| MindwellError::Parse(format!("UTF-8 error: {e}")))
}

/// Installation hint printed to stderr alongside the script.
#[must_use]
pub fn completion_install_instructions(shell: Shell) -> &'static str {
    match shell {
        Shell::Bash => "# Add to ~/.bashrc:\n#   source <(mindwell completions bash)",
        Shell::Zsh => {
            "# Save to your fpath:\n#   mindwell completions zsh > ~/.zsh/completions/_mindwell"
        }
        Shell::Fish => {
            "# Save to:\n#   mindwell completions fish > ~/.config/fish/completions/mindwell.fish"
        }
        Shell::PowerShell => {
            "# Add to $PROFILE:\n#   mindwell completions powershell | Out-String | Invoke-Expression"
        }
        Shell::Elvish => "# Save to:\n#   mindwell completions elvish > ~/.elvish/lib/mindwell.elv",
        _ => "# Unknown shell",
    }
}
