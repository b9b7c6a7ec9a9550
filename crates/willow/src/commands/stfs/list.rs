use clap::Args;
use miette::Result;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use willow_stfs::StfsPackage;

use crate::commands::read_input;

#[derive(Args)]
pub struct ListArgs {
    /// An input STFS package
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let data = read_input(&self.file)?;
        let package = StfsPackage::new(&data)?;

        for listing in package.files() {
            if listing.is_directory {
                println!("{:>10}  {:>6}  {}/", "-", "-", listing.path.blue().bold());
            } else {
                println!(
                    "{:>10}  {:>6}  {}",
                    listing.size, listing.block_count, listing.path
                );
            }
        }
        Ok(())
    }
}
