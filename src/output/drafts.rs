//! Draft files written next to the repository

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::content::{GeneratedContent, Parts};
use crate::error::Result;

pub const TITLE_DRAFT_FILE: &str = "PR_TITLE_DRAFT.txt";
pub const DESCRIPTION_DRAFT_FILE: &str = "PR_DESCRIPTION_DRAFT.txt";

/// Write the requested drafts into `dir`, returning the paths written
pub fn save_drafts(dir: &Path, content: &GeneratedContent, target: Parts) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    if target.includes_title() {
        let path = dir.join(TITLE_DRAFT_FILE);
        fs::write(&path, format!("{}\n", content.title))?;
        written.push(path);
    }

    if target.includes_description() {
        let path = dir.join(DESCRIPTION_DRAFT_FILE);
        fs::write(&path, format!("{}\n", content.description))?;
        written.push(path);
    }

    debug!(files = written.len(), "saved drafts");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentSource;
    use tempfile::TempDir;

    fn content() -> GeneratedContent {
        GeneratedContent {
            parts: Parts::Both,
            title: "feat: add login".to_string(),
            description: "# Summary\nAdds login.".to_string(),
            source: ContentSource::Heuristic,
            warnings: Vec::new(),
            cost_usd: 0.0,
        }
    }

    fn files_in(dir: &Path) -> usize {
        fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_save_both_writes_two_files() {
        let dir = TempDir::new().unwrap();
        let written = save_drafts(dir.path(), &content(), Parts::Both).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(files_in(dir.path()), 2);
        assert_eq!(
            fs::read_to_string(dir.path().join(TITLE_DRAFT_FILE)).unwrap(),
            "feat: add login\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join(DESCRIPTION_DRAFT_FILE)).unwrap(),
            "# Summary\nAdds login.\n"
        );
    }

    #[test]
    fn test_save_title_writes_one_file() {
        let dir = TempDir::new().unwrap();
        let written = save_drafts(dir.path(), &content(), Parts::Title).unwrap();

        assert_eq!(written, vec![dir.path().join(TITLE_DRAFT_FILE)]);
        assert_eq!(files_in(dir.path()), 1);
    }

    #[test]
    fn test_save_description_writes_one_file() {
        let dir = TempDir::new().unwrap();
        save_drafts(dir.path(), &content(), Parts::Description).unwrap();
        assert!(dir.path().join(DESCRIPTION_DRAFT_FILE).is_file());
        assert_eq!(files_in(dir.path()), 1);
    }
}
