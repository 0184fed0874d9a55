//! Interactive dataset picker.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the picker provides the "choose an exported dataset" UX for `--pick`
//!
//! The picker searches for exported `power_load_data.csv` files under the
//! current working directory.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::io::DATASET_FILE;

/// Default directory recursion depth for finding datasets.
const DEFAULT_SEARCH_DEPTH: usize = 4;

/// Prompt the user to select a dataset from the current directory tree.
///
/// Behavior:
/// - list discovered datasets
/// - accept either a number (from the list) or an explicit path
/// - `q` cancels
pub fn prompt_for_dataset() -> Result<PathBuf, AppError> {
    let files = discover_datasets(Path::new("."));
    if files.is_empty() {
        return Err(AppError::new(
            2,
            format!("No {DATASET_FILE} found. Run `gridload generate` first or pass `--input <file.csv>`."),
        ));
    }

    println!("Found {} dataset(s):", files.len());
    for (idx, path) in files.iter().enumerate() {
        println!("{:>3}) {}", idx + 1, pretty_path(path));
    }

    loop {
        print!("Select a dataset by number (1-{}) or type a path (q to quit): ", files.len());
        io::stdout()
            .flush()
            .map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))?;

        let mut input = String::new();
        let bytes = io::stdin()
            .read_line(&mut input)
            .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;

        if bytes == 0 {
            return Err(AppError::new(
                2,
                "No input received. Provide a dataset with `--input <file.csv>`.",
            ));
        }

        let input = input.trim();
        if input.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }

        if let Ok(choice) = input.parse::<usize>() {
            if (1..=files.len()).contains(&choice) {
                return validate_csv_path(&files[choice - 1]);
            }
            println!("Invalid choice: {choice}. Enter a number between 1 and {}.", files.len());
            continue;
        }

        match validate_csv_path(Path::new(input)) {
            Ok(path) => return Ok(path),
            Err(err) => println!("{err}"),
        }
    }
}

/// Validate the provided path points to a `.csv` file.
pub fn validate_csv_path(path: &Path) -> Result<PathBuf, AppError> {
    if !path.exists() {
        return Err(AppError::new(2, format!("CSV file not found: {}", path.display())));
    }
    if path.is_dir() {
        return Err(AppError::new(
            2,
            format!("Expected a file, got a directory: {}", path.display()),
        ));
    }
    if path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        != Some(true)
    {
        return Err(AppError::new(
            2,
            format!("Expected a .csv file (got: {}).", path.display()),
        ));
    }

    Ok(path.to_path_buf())
}

/// Exported datasets under `root` (deterministic order).
pub fn discover_datasets(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    find_datasets_inner(root, 0, DEFAULT_SEARCH_DEPTH, &mut out);
    out.sort_by_key(|p| pretty_path(p));
    out
}

fn find_datasets_inner(root: &Path, depth: usize, max_depth: usize, out: &mut Vec<PathBuf>) {
    if depth > max_depth {
        return;
    }

    let Ok(entries) = fs::read_dir(root) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            if !should_skip_dir(&path) {
                find_datasets_inner(&path, depth + 1, max_depth, out);
            }
        } else if file_type.is_file() && path.file_name().and_then(|n| n.to_str()) == Some(DATASET_FILE) {
            out.push(path);
        }
    }
}

fn should_skip_dir(path: &Path) -> bool {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    matches!(name, ".git" | "target" | "node_modules")
}

fn pretty_path(path: &Path) -> String {
    let stripped = path.strip_prefix("./").unwrap_or(path);
    stripped.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_only_dataset_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("results/b")).unwrap();
        fs::create_dir_all(root.join("target")).unwrap();
        fs::write(root.join("results").join(DATASET_FILE), "").unwrap();
        fs::write(root.join("results/b").join(DATASET_FILE), "").unwrap();
        fs::write(root.join("results/daily_load_analysis.csv"), "").unwrap();
        fs::write(root.join("target").join(DATASET_FILE), "").unwrap();

        let found = discover_datasets(root);
        assert_eq!(found.len(), 2);
        assert!(found[0].ends_with(format!("results/b/{DATASET_FILE}")));
        assert!(found[1].ends_with(format!("results/{DATASET_FILE}")));
    }

    #[test]
    fn rejects_non_csv_paths() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("report.txt");
        fs::write(&txt, "").unwrap();
        assert!(validate_csv_path(&txt).is_err());
        assert!(validate_csv_path(dir.path()).is_err());
        assert!(validate_csv_path(&dir.path().join("missing.csv")).is_err());
    }
}
