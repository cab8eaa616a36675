use anyhow::Result;

use crate::CliTest;

fn sample_root(test: &CliTest) -> Result<()> {
    test.write_file(
        "stacks/orgs/core/ue1/prod.yaml",
        r#"
vars:
  region: us-east-1
components:
  terraform:
    vpc:
      settings:
        spacelift:
          workspace_enabled: true
      backend_type: s3
"#,
    )?;
    Ok(())
}

#[test]
fn legacy_mode_names_the_projected_stack_from_the_stack_key() -> Result<()> {
    let test = CliTest::new()?;
    sample_root(&test)?;

    let output = test
        .command()
        .arg("spacelift-stacks")
        .arg("stacks/orgs/core/ue1/prod.yaml")
        .arg("--base-path")
        .arg("stacks")
        .arg("--legacy")
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let parsed: serde_json::Value = serde_json::from_str(&stdout)?;
    assert!(parsed.get("orgs-core-ue1-prod-vpc").is_some());
    Ok(())
}

#[test]
fn a_component_without_spacelift_enabled_is_not_projected() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "stacks/orgs/core/ue1/staging.yaml",
        r#"
components:
  terraform:
    vpc:
      backend_type: s3
"#,
    )?;

    let output = test
        .command()
        .arg("spacelift-stacks")
        .arg("stacks/orgs/core/ue1/staging.yaml")
        .arg("--base-path")
        .arg("stacks")
        .arg("--legacy")
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let parsed: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(parsed.as_object().map(|o| o.len()), Some(0));
    Ok(())
}
