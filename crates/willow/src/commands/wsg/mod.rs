pub mod info;

#[derive(clap::Subcommand)]
pub enum WsgCommands {
    /// Print the contents of a save
    Info(info::InfoArgs),
}

impl WsgCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            WsgCommands::Info(info) => info.handle(),
        }
    }
}
