//! Rebuild `tests/golden/<case>/expected_report.json` from each case's
//! `input.jsonl`. Run from the repository root.
//!
//! `--check` compares instead of writing and exits non-zero on drift.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use hubscope_core::replay_file;

const INPUT_FILE: &str = "input.jsonl";
const EXPECTED_FILE: &str = "expected_report.json";

fn main() -> ExitCode {
    let check = std::env::args().skip(1).any(|arg| arg == "--check");
    match run(check) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(stale) => {
            eprintln!("{stale} golden case(s) out of date");
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::from(2)
        }
    }
}

fn run(check: bool) -> Result<usize, String> {
    let root = PathBuf::from("tests").join("golden");
    let mut stale = 0;
    for case in golden_cases(&root)? {
        let rendered = render_case(&case)?;
        let expected_path = case.join(EXPECTED_FILE);
        if check {
            let current = fs::read_to_string(&expected_path).unwrap_or_default();
            if current != rendered {
                eprintln!("stale: {}", expected_path.display());
                stale += 1;
            }
        } else {
            fs::write(&expected_path, rendered)
                .map_err(|err| format!("failed to write {}: {}", expected_path.display(), err))?;
            println!("wrote {}", expected_path.display());
        }
    }
    Ok(stale)
}

/// Case directories holding an input capture, in name order.
fn golden_cases(root: &Path) -> Result<Vec<PathBuf>, String> {
    let entries =
        fs::read_dir(root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;
    let mut cases = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|err| format!("failed to read entry: {}", err))?
            .path();
        if path.join(INPUT_FILE).is_file() {
            cases.push(path);
        }
    }
    cases.sort();
    Ok(cases)
}

fn render_case(case: &Path) -> Result<String, String> {
    let input = case.join(INPUT_FILE);
    let mut report = replay_file(&input)
        .map_err(|err| format!("replay failed for {}: {}", input.display(), err))?;
    // Platform-independent path so fixtures match on every host.
    report.input.path = input.to_string_lossy().replace('\\', "/");
    let mut json = serde_json::to_string_pretty(&report)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    json.push('\n');
    Ok(json)
}
