use anyhow::Result;
use clap::{ArgMatches, Command};
use gdswzd::Direction;

use super::batch::{self, Batch};

pub fn cli() -> Command {
    Command::new(crate::cli::module_component!())
        .about("Compute fractional grid indices of earth coordinates")
        .arg(batch::template_arg())
        .args(batch::batch_args())
        .arg(batch::point_arg("Longitude and latitude 'LON,LAT' in degrees").required(true))
}

pub fn exec(args: &ArgMatches) -> Result<()> {
    Batch::from_args(args)?.run(Direction::Inverse)
}
