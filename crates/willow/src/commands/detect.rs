use clap::Args;
use miette::Result;
use std::path::PathBuf;

use super::read_input;

#[derive(Args)]
pub struct DetectArgs {
    /// An input save or package
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl DetectArgs {
    pub fn handle(&self) -> Result<()> {
        let data = read_input(&self.file)?;
        println!("{}", willow_wsg::detect(&data));
        Ok(())
    }
}
