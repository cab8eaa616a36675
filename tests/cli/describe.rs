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
      vars:
        cidr: 10.0.0.0/16
"#,
    )?;
    Ok(())
}

#[test]
fn describe_prints_the_full_materialised_map() -> Result<()> {
    let test = CliTest::new()?;
    sample_root(&test)?;

    let output = test
        .command()
        .arg("describe")
        .arg("stacks/orgs/core/ue1/prod.yaml")
        .arg("--base-path")
        .arg("stacks")
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let parsed: serde_json::Value = serde_json::from_str(&stdout)?;
    assert!(parsed
        .get("orgs/core/ue1/prod")
        .and_then(|s| s.get("components"))
        .and_then(|c| c.get("terraform"))
        .and_then(|t| t.get("vpc"))
        .is_some());
    Ok(())
}

#[test]
fn describe_component_narrows_to_one_component_across_stacks() -> Result<()> {
    let test = CliTest::new()?;
    sample_root(&test)?;

    let output = test
        .command()
        .arg("describe")
        .arg("stacks/orgs/core/ue1/prod.yaml")
        .arg("--base-path")
        .arg("stacks")
        .arg("--component")
        .arg("terraform/vpc")
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let parsed: serde_json::Value = serde_json::from_str(&stdout)?;
    assert!(parsed.get("orgs/core/ue1/prod").is_some());
    // Narrowed view is the component's own tree, not wrapped in `components`.
    assert!(parsed["orgs/core/ue1/prod"].get("components").is_none());
    Ok(())
}

#[test]
fn describe_component_rejects_a_malformed_selector() -> Result<()> {
    let test = CliTest::new()?;
    sample_root(&test)?;

    let output = test
        .command()
        .arg("describe")
        .arg("stacks/orgs/core/ue1/prod.yaml")
        .arg("--base-path")
        .arg("stacks")
        .arg("--component")
        .arg("vpc")
        .output()?;

    assert!(!output.status.success());
    Ok(())
}
