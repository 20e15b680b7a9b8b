//! `mock_snakemake` locates the project from the process working directory.
//!
//! The working directory is process-wide, so this file holds a single test
//! that visits every entry point in turn.

mod common;

use std::env;
use std::fs;
use std::path::Path;

use cfe_helpers::context::{Step, Wildcards};
use cfe_helpers::mock_snakemake;

fn network_input(ctx: &cfe_helpers::StepContext) -> String {
    ctx.input
        .get("network")
        .map(|p| p.display().to_string())
        .expect("network input")
}

#[test]
fn mock_snakemake_finds_config_from_every_entry_point() {
    let (_dir, root, scripts) = common::project_with_config(common::SAMPLE_CONFIG);
    let results = root.join("results").join("grid_cfe");
    fs::create_dir_all(&results).expect("create results dir");

    let original = env::current_dir().expect("current dir");
    let entry_points: [&Path; 3] = [&root, &scripts, &results];
    for cwd in entry_points {
        env::set_current_dir(cwd).expect("enter entry point");
        let ctx = mock_snakemake("summarise_network", Wildcards::new().with("zone", "FR"));
        let after = env::current_dir().expect("current dir");
        env::set_current_dir(&original).expect("restore working dir");

        let ctx = ctx.expect("context builds");
        assert_eq!(after, cwd, "working dir changed for {}", cwd.display());
        assert_eq!(ctx.step, Step::SummariseNetwork);
        assert!(
            ctx.config.get("solving").is_some(),
            "config not found from {}",
            cwd.display()
        );
        assert_eq!(
            network_input(&ctx),
            "../input/elec_s_37_lv1.0__3H-B-solar+p3_2030.nc"
        );
        assert_eq!(ctx.output.len(), 1);
    }
}
