use anyhow::Result;
use clap::{ArgMatches, Command};
use gdswzd::Direction;

use super::batch::{self, Batch};

pub fn cli() -> Command {
    Command::new(crate::cli::module_component!())
        .about("Compute latitudes and longitudes of grid points")
        .long_about(
            "Compute latitudes and longitudes of grid points.\n\n\
             All grid points are computed in the order they are stored unless points are \
             given with --point.",
        )
        .arg(batch::template_arg())
        .args(batch::batch_args())
        .arg(batch::point_arg("Fractional grid indices 'X,Y' (one-based) to compute"))
}

pub fn exec(args: &ArgMatches) -> Result<()> {
    Batch::from_args(args)?.run(Direction::Forward)
}
