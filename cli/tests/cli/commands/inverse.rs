use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::{CMD_NAME, utils};

crate::commands::test_simple_display! {
    (
        inverse_summary_with_point_outside_grid,
        "inverse",
        [utils::ROTATED_LL, "-p", "74,-54", "-p", "254,54"],
        "\
Grid:               rotated_ll (template 1), 251 x 201
Points returned:    1 of 2
First point:        x 126.0000  y 101.0000  lat 54.0000000  lon 254.0000000
Last point:         x 126.0000  y 101.0000  lat 54.0000000  lon 254.0000000
"
    ),
    (
        inverse_summary_on_global_grid,
        "inverse",
        [utils::GLOBAL_LL, "--point", "-0.5,0", "--point", "10,-90"],
        "\
Grid:               regular_ll (template 0), 360 x 181
Points returned:    2 of 2
First point:        x 360.5000  y 91.0000  lat 0.0000000  lon -0.5000000
Last point:         x 11.0000  y 181.0000  lat -90.0000000  lon 10.0000000
"
    ),
}

#[test]
fn inverse_without_points() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("inverse").arg(utils::ROTATED_LL);
    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--point"));

    Ok(())
}
