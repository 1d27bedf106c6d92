use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::CMD_NAME;

#[test]
fn completions_for_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("completions").arg("bash");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_gdswzd()").and(predicate::str::contains("forward")))
        .stderr(predicate::str::is_empty());

    Ok(())
}
