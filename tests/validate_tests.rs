use assert_fs::prelude::*;
use predicates::prelude::*;

const CLEAN_MODEL_YAML: &str = r#"
modeling_year: 2026
stages:
  - id: soft
    name: Soft collection
    duration_days_max: 45
    next_stage_ids: []
    recovery_probability: 40
    write_off_probability: 20
portfolio:
  total_cases: 1000
  average_debt_amount: 50000
params:
  discount_rate: 0.2
  tax_rate: 0.25
caseload:
  soft: 100
"#;

const BROKEN_MODEL_YAML: &str = r#"
modeling_year: 2026
stages:
  - id: soft
    duration_days_max: 45
    next_stage_ids: [ghost]
    recovery_probability: 70
    write_off_probability: 50
portfolio:
  total_cases: 1000
  average_debt_amount: 50000
params:
  discount_rate: 0.2
  tax_rate: 0.25
caseload:
  soft: 90
"#;

#[test]
fn validate_passes_a_clean_model() {
    let input_file = assert_fs::NamedTempFile::new("model.yaml").unwrap();
    input_file.write_str(CLEAN_MODEL_YAML).unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("debtcast");
    cmd.args(["validate", "-i", input_file.path().to_str().unwrap()]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("no issues found"));
}

#[test]
fn validate_lists_every_problem() {
    let input_file = assert_fs::NamedTempFile::new("model.yaml").unwrap();
    input_file.write_str(BROKEN_MODEL_YAML).unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("debtcast");
    cmd.args(["validate", "-i", input_file.path().to_str().unwrap()]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("issue(s):"))
        .stdout(predicate::str::contains("unknown successor 'ghost'"))
        .stdout(predicate::str::contains("caseload distribution sums to 90%"))
        .stdout(predicate::str::contains("write-off will be clamped"));
}
