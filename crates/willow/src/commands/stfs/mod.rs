pub mod extract;
pub mod info;
pub mod list;

#[derive(clap::Subcommand)]
pub enum StfsCommands {
    /// Print the header of a package
    Info(info::InfoArgs),
    /// List the files of a package
    List(list::ListArgs),
    /// Extract a package into a directory
    Extract(extract::ExtractArgs),
}

impl StfsCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            StfsCommands::Info(info) => info.handle(),
            StfsCommands::List(list) => list.handle(),
            StfsCommands::Extract(extract) => extract.handle(),
        }
    }
}
