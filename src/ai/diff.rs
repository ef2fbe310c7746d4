//! Fitting a branch diff into the prompt budget

use crate::core::git::FileDiff;

/// Maximum diff size sent to the model
pub const MAX_DIFF_CHARS: usize = 8000;

const OMITTED_HEADER: &str = "Omitted (too large for the prompt):\n";

/// `  path (+3/-1)` or `  path (binary)`
fn omitted_line(file: &FileDiff) -> String {
    if file.binary {
        format!("  {} (binary)\n", file.path)
    } else {
        format!("  {} (+{}/-{})\n", file.path, file.insertions, file.deletions)
    }
}

/// Render per-file patches within `max_chars`
///
/// Smaller patches are kept first so the model sees as many whole files as
/// possible. Everything else is listed with its line counts. Files keep
/// their original order.
pub fn fit_diff(files: &[FileDiff], max_chars: usize) -> String {
    let omitted: Vec<String> = files.iter().map(omitted_line).collect();
    let mut keep = vec![false; files.len()];

    // Start from "everything omitted" and swap in whole patches while they fit
    let mut used = OMITTED_HEADER.len() + omitted.iter().map(String::len).sum::<usize>();
    let mut by_size: Vec<usize> = (0..files.len()).filter(|&i| !files[i].binary).collect();
    by_size.sort_by_key(|&i| files[i].patch.len());

    for i in by_size {
        let with_patch = (used - omitted[i].len()) + files[i].patch.len();
        if with_patch <= max_chars {
            keep[i] = true;
            used = with_patch;
        }
    }

    let mut out: String = files
        .iter()
        .zip(&keep)
        .filter(|(_, kept)| **kept)
        .map(|(file, _)| file.patch.as_str())
        .collect();

    let dropped: Vec<&String> = omitted
        .iter()
        .zip(&keep)
        .filter(|(_, kept)| !**kept)
        .map(|(line, _)| line)
        .collect();

    if !dropped.is_empty() {
        out.push_str(OMITTED_HEADER);
        for (shown, line) in dropped.iter().enumerate() {
            if out.len() + line.len() > max_chars {
                out.push_str(&format!("  ... and {} more files\n", dropped.len() - shown));
                break;
            }
            out.push_str(line);
        }
    }

    out
}
