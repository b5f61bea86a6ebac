// Size-ordered candidate selection for full store runs
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Result, SnapkeepError};

#[cfg(test)]
mod order_tests;

/// Directory entries under `root`, ascending by on-disk size.
///
/// Sizes come from a single batch `du -Lbs` invocation over every entry, so
/// symlinked archive directories are measured at their targets. The du line
/// count must match the entry count exactly; a mismatch means the directory
/// listing and the measurement disagreed (e.g., an entry vanished in
/// between) and is fatal.
pub fn ordered_candidates(root: &Path) -> Result<Vec<String>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        entries.push(entry.file_name().to_string_lossy().into_owned());
    }
    if entries.is_empty() {
        return Ok(entries);
    }

    let paths: Vec<PathBuf> = entries.iter().map(|name| root.join(name)).collect();
    let output = Command::new("du")
        .arg("-Lbs")
        .args(&paths)
        .stdin(Stdio::null())
        .output()?;
    if !output.status.success() {
        return Err(SnapkeepError::DiskUsage(format!(
            "du exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let measured = parse_du_output(&String::from_utf8_lossy(&output.stdout))?;
    let sizes = index_sizes(measured, &entries, root)?;

    Ok(order_by_size(entries, &sizes))
}

/// Index measured sizes by entry name, asserting the measurement covers the
/// directory listing exactly: same count, every entry present.
pub(crate) fn index_sizes(
    measured: Vec<(u64, PathBuf)>,
    entries: &[String],
    root: &Path,
) -> Result<HashMap<String, u64>> {
    if measured.len() != entries.len() {
        return Err(SnapkeepError::Inconsistency(format!(
            "du measured {} entries but {} contains {}",
            measured.len(),
            root.display(),
            entries.len()
        )));
    }

    let sizes: HashMap<String, u64> = measured
        .into_iter()
        .filter_map(|(size, path)| {
            path.file_name()
                .map(|name| (name.to_string_lossy().into_owned(), size))
        })
        .collect();
    for name in entries {
        if !sizes.contains_key(name) {
            return Err(SnapkeepError::Inconsistency(format!(
                "du did not measure {}",
                name
            )));
        }
    }
    Ok(sizes)
}

/// Parse `<bytes>\t<path>` lines as produced by du, in whatever order they
/// arrive.
pub(crate) fn parse_du_output(out: &str) -> Result<Vec<(u64, PathBuf)>> {
    let mut measured = Vec::new();
    for line in out.lines().filter(|line| !line.is_empty()) {
        let (size, path) = line
            .split_once('\t')
            .ok_or_else(|| SnapkeepError::DiskUsage(format!("unparseable du line: {:?}", line)))?;
        let size = size.trim().parse::<u64>().map_err(|e| {
            SnapkeepError::DiskUsage(format!("bad size in du line {:?}: {}", line, e))
        })?;
        measured.push((size, PathBuf::from(path)));
    }
    Ok(measured)
}

/// Ascending by measured size, name as tie-break so runs are deterministic.
pub(crate) fn order_by_size(mut entries: Vec<String>, sizes: &HashMap<String, u64>) -> Vec<String> {
    entries.sort_by_key(|name| (sizes.get(name).copied().unwrap_or(0), name.clone()));
    entries
}
