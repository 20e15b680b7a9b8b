//! cfe-helpers entry point: YAML diffing, attribute export, and step mocking.

use std::path::PathBuf;
use std::process;

use cfe_helpers::context::{ProjectLayout, Step, Wildcards, mock_step_context};
use cfe_helpers::io::attrs::write_attribute_table;
use cfe_helpers::logging::init_tracing;
use cfe_helpers::schema::{ComponentSchema, multilink::LINK};
use cfe_helpers::yaml_diff::print_yaml_diff;

/// Parsed command.
enum Command {
    Diff { left: PathBuf, right: PathBuf },
    Attrs { out_dir: Option<PathBuf> },
    Mock {
        step: String,
        scripts_dir: Option<PathBuf>,
        yaml: bool,
        wildcards: Vec<String>,
    },
}

fn print_help() {
    eprintln!("cfe-helpers — auxiliary tools for the CFE network workflow");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cfe-helpers diff <file1.yaml> <file2.yaml>");
    eprintln!("  cfe-helpers attrs [--out <dir>]");
    eprintln!("  cfe-helpers mock <step> [--scripts-dir <path>] [--yaml] [name=value ...]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  diff    Print a unified diff of two YAML documents (keys sorted)");
    eprintln!("  attrs   Write the multi-port component attributes as CSV files,");
    eprintln!("          or print the Link table to stdout when --out is omitted");
    eprintln!("  mock    Print the mock context of a workflow step as JSON, or as YAML");
    eprintln!("          with --yaml (needed when the config has non-string keys;");
    eprintln!("          JSON also prints .inf and .nan config values as null)");
    eprintln!();
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=debug) for diagnostics on stderr.");
}

fn fail(message: &str) -> ! {
    eprintln!("error: {message}");
    print_help();
    process::exit(1);
}

fn parse_args() -> Command {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        print_help();
        process::exit(1);
    }
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        process::exit(0);
    }

    match args[0].as_str() {
        "diff" => {
            if args.len() != 3 {
                fail("diff requires exactly two file paths");
            }
            Command::Diff {
                left: PathBuf::from(&args[1]),
                right: PathBuf::from(&args[2]),
            }
        }
        "attrs" => {
            let mut out_dir = None;
            let mut i = 1;
            while i < args.len() {
                match args[i].as_str() {
                    "--out" => {
                        i += 1;
                        if i >= args.len() {
                            fail("--out requires a directory argument");
                        }
                        out_dir = Some(PathBuf::from(&args[i]));
                    }
                    other => fail(&format!("unknown argument \"{other}\"")),
                }
                i += 1;
            }
            Command::Attrs { out_dir }
        }
        "mock" => {
            let Some(step) = args.get(1) else {
                fail("mock requires a step name");
            };
            let mut scripts_dir = None;
            let mut yaml = false;
            let mut wildcards = Vec::new();
            let mut i = 2;
            while i < args.len() {
                match args[i].as_str() {
                    "--scripts-dir" => {
                        i += 1;
                        if i >= args.len() {
                            fail("--scripts-dir requires a path argument");
                        }
                        scripts_dir = Some(PathBuf::from(&args[i]));
                    }
                    "--yaml" => yaml = true,
                    other => wildcards.push(other.to_string()),
                }
                i += 1;
            }
            Command::Mock {
                step: step.clone(),
                scripts_dir,
                yaml,
                wildcards,
            }
        }
        other => fail(&format!("unknown command \"{other}\"")),
    }
}

fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Diff { left, right } => {
            print_yaml_diff(&left, &right).map_err(|e| e.to_string())
        }
        Command::Attrs { out_dir } => {
            let schema = ComponentSchema::with_multilink().map_err(|e| e.to_string())?;
            match out_dir {
                Some(dir) => {
                    schema.write_csv_dir(&dir).map_err(|e| e.to_string())?;
                    eprintln!("Attribute tables written to {}", dir.display());
                    Ok(())
                }
                None => {
                    let link = schema
                        .get(LINK)
                        .ok_or_else(|| format!("schema has no {LINK} table"))?;
                    write_attribute_table(link, std::io::stdout().lock())
                        .map_err(|e| format!("failed to write CSV: {e}"))
                }
            }
        }
        Command::Mock {
            step,
            scripts_dir,
            yaml,
            wildcards,
        } => {
            let wildcards = Wildcards::parse_pairs(&wildcards)?;
            let cwd = std::env::current_dir()
                .map_err(|e| format!("cannot read working directory: {e}"))?;
            let (layout, _) = match scripts_dir {
                Some(dir) => ProjectLayout::resolve(&dir, &cwd),
                None => ProjectLayout::from_working_dir(&cwd),
            };
            let ctx = mock_step_context(&layout, Step::from(step.as_str()), wildcards)
                .map_err(|e| e.to_string())?;
            if yaml {
                let text = serde_yaml::to_string(&ctx)
                    .map_err(|e| format!("cannot encode context: {e}"))?;
                print!("{text}");
                return Ok(());
            }
            // JSON object keys must be strings and JSON has no infinities.
            let json = serde_json::to_string_pretty(&ctx)
                .map_err(|e| format!("cannot encode context as JSON ({e}); try --yaml"))?;
            println!("{json}");
            Ok(())
        }
    }
}

fn main() {
    init_tracing();
    let command = parse_args();
    if let Err(e) = run(command) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
