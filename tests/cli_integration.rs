//! End-to-end tests of the `cfe-helpers` binary.

mod common;

use std::path::Path;
use std::process::{Command, Output};

fn run(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cfe-helpers"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("cfe-helpers process should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout should be valid UTF-8")
}

#[test]
fn diff_prints_unified_diff() {
    let (_dir, root, _) = common::project();
    common::write_file(&root, "a.yaml", "zone: DE\nyear: 2030\n");
    common::write_file(&root, "b.yaml", "year: 2030\nzone: FR\n");

    let output = run(&["diff", "a.yaml", "b.yaml"], &root);
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "--- a.yaml",
            "+++ b.yaml",
            "@@ -1,2 +1,2 @@",
            " year: 2030",
            "-zone: DE",
            "+zone: FR",
        ]
    );
}

#[test]
fn diff_of_identical_files_is_silent() {
    let (_dir, root, _) = common::project();
    common::write_file(&root, "a.yaml", common::SAMPLE_CONFIG);
    let output = run(&["diff", "a.yaml", "a.yaml"], &root);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn diff_of_missing_file_fails() {
    let (_dir, root, _) = common::project();
    let output = run(&["diff", "nope.yaml", "nope.yaml"], &root);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope.yaml"));
}

#[test]
fn mock_prints_context_json_from_scripts_dir() {
    let (_dir, _root, scripts) = common::project_with_config(common::SAMPLE_CONFIG);
    let output = run(&["mock", "summarise_network", "year=2050", "zone=FR"], &scripts);
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let ctx: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("JSON context");
    assert_eq!(ctx["step"], "summarise_network");
    assert_eq!(ctx["wildcards"]["zone"], "FR");
    assert_eq!(
        ctx["input"]["network"],
        "../input/elec_s_37_lv1.0__3H-B-solar+p3_2050.nc"
    );
    assert_eq!(
        ctx["output"][0],
        "../results/summaries/FR/summary_p3_ref_0.yaml"
    );
    assert_eq!(ctx["log"], serde_json::json!([]));
    assert_eq!(ctx["config"]["solving"]["solver"]["name"], "gurobi");
}

#[test]
fn mock_locates_project_from_results_dir() {
    let (_dir, root, _) = common::project_with_config(common::SAMPLE_CONFIG);
    let results = root.join("results");
    std::fs::create_dir_all(&results).expect("create results dir");
    let output = run(&["mock", "summarise_network"], &results);
    assert!(output.status.success());
    let ctx: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("JSON context");
    assert_eq!(
        ctx["input"]["network"],
        "../input/elec_s_37_lv1.0__3H-B-solar+p3_2030.nc"
    );
}

#[test]
fn mock_yaml_output_keeps_non_string_keys() {
    let config = "time_sampling: 3H\nthresholds:\n  1: .inf\n  ~: off\n";
    let (_dir, root, _) = common::project_with_config(config);

    let json = run(&["mock", "summarise_network"], &root);
    assert!(!json.status.success());
    assert!(String::from_utf8_lossy(&json.stderr).contains("--yaml"));

    let output = run(&["mock", "summarise_network", "--yaml"], &root);
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let ctx: serde_yaml::Value = serde_yaml::from_str(&stdout(&output)).expect("YAML context");
    let thresholds = &ctx["config"]["thresholds"];
    let one = serde_yaml::Value::Number(1.into());
    let inf = thresholds.get(&one).and_then(serde_yaml::Value::as_f64);
    assert!(inf.is_some_and(f64::is_infinite), "{thresholds:?}");
    assert!(thresholds.get(&serde_yaml::Value::Null).is_some());
    assert_eq!(ctx["step"], "summarise_network");
}

#[test]
fn mock_rejects_malformed_wildcard() {
    let (_dir, root, _) = common::project();
    let output = run(&["mock", "summarise_network", "year"], &root);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid wildcard"));
}

#[test]
fn attrs_writes_component_tables() {
    let (_dir, root, _) = common::project();
    let output = run(&["attrs", "--out", "override_component_attrs"], &root);
    assert!(output.status.success());
    let links = std::fs::read_to_string(root.join("override_component_attrs/links.csv"))
        .expect("links.csv written");
    assert!(links.contains("p4,series,MW,0,4th bus output,Output"));
    assert!(links.contains("bus2,string,n/a,n/a,2nd bus,Input (optional)"));
}

#[test]
fn unknown_command_fails() {
    let (_dir, root, _) = common::project();
    let output = run(&["frobnicate"], &root);
    assert_eq!(output.status.code(), Some(1));
}
