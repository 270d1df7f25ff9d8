//! Locate the per-year export files in a data directory.
//!
//! Files are named either `<year>.csv` or descriptively, with the year as a
//! standalone 4-digit number somewhere in the stem
//! (e.g. `収入・支出詳細_2023.csv`).

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

use crate::types::{LoadError, SourceFile};

fn digit_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("static regex"))
}

/// Years mentioned in a file stem as standalone 4-digit numbers
pub fn years_in_name(stem: &str) -> Vec<i32> {
    digit_runs()
        .find_iter(stem)
        .filter(|m| m.as_str().len() == 4)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

fn names_single_year(path: &Path) -> bool {
    let years = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(years_in_name)
        .unwrap_or_default();
    years.windows(2).all(|w| w[0] == w[1])
}

/// Resolve one source file per requested year, in the order given.
pub fn discover_sources(data_dir: impl AsRef<Path>, years: &[i32]) -> Result<Vec<SourceFile>, LoadError> {
    let dir = data_dir.as_ref();
    let csv_files = list_csv_files(dir)?;

    let mut out = Vec::with_capacity(years.len());
    for &year in years {
        let exact = dir.join(format!("{year}.csv"));
        if csv_files.contains(&exact) {
            debug!(year, path = %exact.display(), "found year-named export");
            out.push(SourceFile::new(year, exact));
            continue;
        }

        let candidates: Vec<PathBuf> = csv_files
            .iter()
            .filter(|p| {
                p.file_stem()
                    .and_then(|s| s.to_str())
                    .is_some_and(|stem| years_in_name(stem).contains(&year))
            })
            .cloned()
            .collect();

        match candidates.as_slice() {
            [] => return Err(LoadError::FileNotFound(exact)),
            // A stem spanning several years cannot be tagged with just one of them
            [path] if names_single_year(path) => {
                debug!(year, path = %path.display(), "found descriptive export");
                out.push(SourceFile::new(year, path.clone()));
            }
            _ => return Err(LoadError::Ambiguous { year, candidates }),
        }
    }

    Ok(out)
}

fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let entries = std::fs::read_dir(dir).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoadError::FileNotFound(dir.to_path_buf()),
        _ => LoadError::Io {
            path: dir.to_path_buf(),
            source: e,
        },
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LoadError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
