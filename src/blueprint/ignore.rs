//! `.folioignore` patterns
//!
//! Gitignore syntax, relative to the blueprint root.

use std::fs;
use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::{FolioError, FolioResult};

pub const IGNORE_FILE: &str = ".folioignore";

/// Maximum size of an ignore file (64KB)
const MAX_FILE_SIZE: u64 = 65536;

#[derive(Debug)]
pub struct IgnorePatterns {
    matcher: Gitignore,
    pattern_count: usize,
}

impl Default for IgnorePatterns {
    fn default() -> Self {
        Self {
            matcher: Gitignore::empty(),
            pattern_count: 0,
        }
    }
}

impl IgnorePatterns {
    /// Load `<root>/.folioignore`; a missing file ignores nothing.
    pub fn load(root: &Path) -> FolioResult<Self> {
        let path = root.join(IGNORE_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let size = fs::metadata(&path)?.len();
        if size > MAX_FILE_SIZE {
            return Err(FolioError::InvalidIgnorePattern {
                file: path,
                line: 0,
                message: format!("file is {size} bytes, the limit is {MAX_FILE_SIZE}"),
            });
        }

        let content = fs::read_to_string(&path)?;
        Self::from_content(root, &path, &content)
    }

    pub fn from_content(root: &Path, source: &Path, content: &str) -> FolioResult<Self> {
        let mut builder = GitignoreBuilder::new(root);
        let mut pattern_count = 0;

        for (index, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            pattern_count += 1;
            builder
                .add_line(Some(source.to_path_buf()), line)
                .map_err(|e| FolioError::InvalidIgnorePattern {
                    file: source.to_path_buf(),
                    line: index + 1,
                    message: e.to_string(),
                })?;
        }

        let matcher = builder.build().map_err(|e| FolioError::InvalidIgnorePattern {
            file: source.to_path_buf(),
            line: 0,
            message: e.to_string(),
        })?;

        Ok(Self {
            matcher,
            pattern_count,
        })
    }

    /// `rel_path` is relative to the root the patterns were loaded for.
    pub fn is_ignored(&self, rel_path: &Path, is_dir: bool) -> bool {
        self.pattern_count > 0
            && self
                .matcher
                .matched_path_or_any_parents(rel_path, is_dir)
                .is_ignore()
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    pub fn is_empty(&self) -> bool {
        self.pattern_count == 0
    }
}
