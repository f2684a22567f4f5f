use assert_cmd::Command;

#[test]
fn test_help_lists_bind_flag() {
    // Arrange
    let mut command = Command::cargo_bin("fly-game").expect("binary should be built");

    // Act
    let assert = command.arg("--help").assert();

    // Assert
    let output = assert.success().get_output().stdout.clone();
    let help = String::from_utf8_lossy(&output);
    assert!(help.contains("--bind"));
    assert!(help.contains("--jump-velocity"));
}

#[test]
fn test_rejects_invalid_bind_address() {
    // Arrange
    let mut command = Command::cargo_bin("fly-game").expect("binary should be built");

    // Act
    let assert = command.args(["--bind", "not-an-address"]).assert();

    // Assert
    assert.failure();
}
