use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::{CMD_NAME, utils};

#[test]
fn info_of_rotated_lat_lon_template() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("info").arg(utils::ROTATED_LL);
    cmd.assert()
        .success()
        .stdout(
            predicate::str::starts_with("Grid definition template:               1 (rotated_ll)\n")
                .and(predicate::str::contains(
                    "Shape of the earth:                     SphericalRadius6371229 (radius 6371229 m)\n",
                ))
                .and(predicate::str::contains("Number of points along a parallel:      251\n"))
                .and(predicate::str::contains("Latitude of first grid point:           -45.036\n"))
                .and(predicate::str::contains("Scanning mode:                          0b01000000\n"))
                .and(predicate::str::contains("Vector components relative to:          grid\n"))
                .and(predicate::str::contains("Latitude of the southern pole:          -36\n"))
                .and(predicate::str::ends_with("Angle of rotation of projection:        0\n")),
        )
        .stderr(predicate::str::is_empty());

    Ok(())
}

#[test]
fn info_of_template_in_file() -> Result<(), Box<dyn std::error::Error>> {
    let input = utils::template_file(utils::GLOBAL_LL)?;
    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("info").arg(input.path());
    cmd.assert()
        .success()
        .stdout(
            predicate::str::starts_with("Grid definition template:               0 (regular_ll)\n")
                .and(predicate::str::contains("i direction increment:                  1\n"))
                .and(predicate::str::contains("j direction increment:                  -1\n"))
                .and(predicate::str::contains("southern pole").not()),
        )
        .stderr(predicate::str::is_empty());

    Ok(())
}

#[test]
fn info_of_template_from_stdin() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = assert_cmd::Command::cargo_bin(CMD_NAME)?;
    cmd.arg("info").arg("-").write_stdin(format!("{}\n", utils::ROTATED_LL));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(rotated_ll)"));

    Ok(())
}

macro_rules! test_template_errors {
    ($(($name:ident, $template:expr, $message:expr),)*) => ($(
        #[test]
        fn $name() -> Result<(), Box<dyn std::error::Error>> {
            let mut cmd = Command::cargo_bin(CMD_NAME)?;
            cmd.arg("info").arg($template);
            cmd.assert()
                .failure()
                .stdout(predicate::str::is_empty())
                .stderr(predicate::str::contains($message));

            Ok(())
        }
    )*);
}

test_template_errors! {
    (
        info_of_unsupported_template,
        "30:6,255,-1",
        "Grid definition template 30 is not supported"
    ),
    (
        info_of_truncated_template,
        "1:6,255,-1,255,-1,255,-1,251,201",
        "Malformed grid definition template"
    ),
    (
        info_of_unparsable_template,
        "1:6,x",
        "template must be specified as 'N:V1,V2,...'"
    ),
}
