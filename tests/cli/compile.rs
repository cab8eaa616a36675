use anyhow::Result;

use crate::CliTest;

fn sample_root(test: &CliTest) -> Result<()> {
    test.write_file("stacks/catalog/defaults.yaml", "vars:\n  region: us-east-1\n")?;
    test.write_file(
        "stacks/orgs/core/ue1/prod.yaml",
        r#"
import:
  - catalog/defaults
vars:
  stage: prod
components:
  terraform:
    vpc:
      vars:
        cidr: 10.0.0.0/16
      backend_type: s3
"#,
    )?;
    Ok(())
}

#[test]
fn compile_prints_serialised_yaml_for_each_root() -> Result<()> {
    let test = CliTest::new()?;
    sample_root(&test)?;

    let output = test
        .command()
        .arg("compile")
        .arg("stacks/orgs/core/ue1/prod.yaml")
        .arg("--base-path")
        .arg("stacks")
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("cidr: 10.0.0.0/16"));
    assert!(stdout.contains("region: us-east-1"));
    Ok(())
}

#[test]
fn compile_json_prints_a_map_keyed_by_stack_key() -> Result<()> {
    let test = CliTest::new()?;
    sample_root(&test)?;

    let output = test
        .command()
        .arg("compile")
        .arg("stacks/orgs/core/ue1/prod.yaml")
        .arg("--base-path")
        .arg("stacks")
        .arg("--json")
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let parsed: serde_json::Value = serde_json::from_str(&stdout)?;
    assert!(parsed.get("orgs/core/ue1/prod").is_some());
    Ok(())
}

#[test]
fn compile_reports_a_missing_root_as_an_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .command()
        .arg("compile")
        .arg("stacks/does/not/exist.yaml")
        .output()?;

    assert!(!output.status.success());
    Ok(())
}
