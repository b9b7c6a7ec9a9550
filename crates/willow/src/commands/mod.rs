use miette::{Context, IntoDiagnostic, Result};
use std::path::Path;

pub mod detect;
pub mod stfs;
pub mod wsg;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Print the platform a file comes from
    Detect(detect::DetectArgs),
    /// Handle WSG saves
    Wsg {
        #[command(subcommand)]
        command: wsg::WsgCommands,
    },
    /// Handle Xbox 360 STFS packages
    Stfs {
        #[command(subcommand)]
        command: stfs::StfsCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Detect(detect) => detect.handle(),
            Commands::Wsg { command } => command.handle(),
            Commands::Stfs { command } => command.handle(),
        }
    }
}

/// Read a whole input file
pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path)
        .into_diagnostic()
        .context(format!("path: {}", path.display()))
}
