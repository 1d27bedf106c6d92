pub(crate) mod completions;
pub(crate) mod forward;
pub(crate) mod info;
pub(crate) mod inverse;

macro_rules! test_simple_display {
    ($(($name:ident, $command:expr, $options:expr, $expected_stdout:expr),)*) => ($(
        #[test]
        fn $name() -> Result<(), Box<dyn std::error::Error>> {
            let mut cmd = Command::cargo_bin(CMD_NAME)?;
            cmd.arg($command).args($options);
            cmd.assert()
                .success()
                .stdout(predicate::str::diff($expected_stdout))
                .stderr(predicate::str::is_empty());

            Ok(())
        }
    )*);
}
pub(crate) use test_simple_display;
