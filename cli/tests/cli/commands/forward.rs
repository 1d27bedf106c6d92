use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::{CMD_NAME, utils};

crate::commands::test_simple_display! {
    (
        forward_summary_of_rotated_lat_lon_grid,
        "forward",
        [utils::ROTATED_LL],
        "\
Grid:               rotated_ll (template 1), 251 x 201
Points returned:    50451 of 50451
First point:        x 1.0000  y 1.0000  lat -7.4912136  lon 215.8663204
Last point:         x 251.0000  y 201.0000  lat 44.5395833  lon 14.8014975
"
    ),
    (
        forward_summary_of_given_points,
        "forward",
        [utils::ROTATED_LL, "-p", "126,101", "--point", "NaN,1"],
        "\
Grid:               rotated_ll (template 1), 251 x 201
Points returned:    1 of 2
First point:        x 126.0000  y 101.0000  lat 54.0000000  lon 254.0000000
Last point:         x 126.0000  y 101.0000  lat 54.0000000  lon 254.0000000
"
    ),
    (
        forward_summary_of_global_grid_beyond_pole,
        "forward",
        [utils::GLOBAL_LL, "-p", "1,0", "-p", "1,1", "--in-place"],
        "\
Grid:               regular_ll (template 0), 360 x 181
Points returned:    1 of 2
First point:        x 1.0000  y 1.0000  lat 90.0000000  lon 0.0000000
Last point:         x 1.0000  y 1.0000  lat 90.0000000  lon 0.0000000
"
    ),
}

#[test]
fn forward_in_single_precision() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("forward").arg(utils::ROTATED_LL).arg("--single");
    cmd.assert()
        .success()
        .stdout(
            predicate::str::contains("Points returned:    50451 of 50451\n")
                .and(predicate::str::contains("lat -7.491"))
                .and(predicate::str::contains("lon 215.86"))
                .and(predicate::str::contains("lat 44.539"))
                .and(predicate::str::contains("lon 14.80")),
        )
        .stderr(predicate::str::is_empty());

    Ok(())
}

#[test]
fn forward_list_of_points() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("forward")
        .arg(utils::ROTATED_LL)
        .args(["-l", "-p", "1,1", "-p", "NaN,NaN", "--in-place", "--fill", "-1"]);
    let output = cmd.output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let lines = stdout.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].split_whitespace().eq(["x", "y", "lat", "lon", "crot", "srot", "area"]));
    let first = lines[1].split_whitespace().collect::<Vec<_>>();
    assert_eq!(&first[..4], ["1.0000", "1.0000", "-7.4912136", "215.8663204"]);
    assert_eq!(&first[4..6], ["0.7072753", "-0.7069383"]);
    let second = lines[2].split_whitespace().collect::<Vec<_>>();
    assert_eq!(&second[2..], ["-1.0000000", "-1.0000000", "-1.0000000", "-1.0000000", "-1.00"]);

    Ok(())
}

#[test]
fn verbose_forward_logs_template_decode() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.env_remove("RUST_LOG")
        .arg("forward")
        .arg(utils::ROTATED_LL)
        .args(["-p", "1,1", "-v"]);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("decoded grid definition template 1 (rotated_ll)"));

    Ok(())
}
