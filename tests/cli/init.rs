use anyhow::Result;

use crate::CliTest;

#[test]
fn init_writes_a_default_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert!(output.status.success());
    assert!(test.root().join("stackforge.yaml").exists());
    Ok(())
}

#[test]
fn init_fails_if_a_config_already_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("stackforge.yaml", "base_path: ./stacks\n")?;

    let output = test.command().arg("init").output()?;

    assert!(!output.status.success());
    Ok(())
}
