mod file;
mod key;
mod source;

use append_only_vec::AppendOnlyVec;
pub use file::SourceFile;
pub use key::SourceFileKey;
pub use line_column::Location;
pub use source::Source;
use std::{fmt::Debug, path::PathBuf};

pub struct SourceFiles {
    files: AppendOnlyVec<SourceFile>,
}

impl SourceFiles {
    pub const INTERNAL_KEY: SourceFileKey = SourceFileKey(0);

    pub fn new() -> Self {
        let files = AppendOnlyVec::new();

        // Create the <internal> file, used for constructs created by the compiler itself
        let internal = files.push(SourceFile::new("<internal>".into()));
        debug_assert_eq!(internal, Self::INTERNAL_KEY.index());

        Self { files }
    }

    pub fn get(&self, key: SourceFileKey) -> &SourceFile {
        &self.files[key.index()]
    }

    pub fn add(&self, filepath: PathBuf) -> SourceFileKey {
        SourceFileKey::from_index(self.files.push(SourceFile::new(filepath)))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

impl Debug for SourceFiles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.files.iter()).finish()
    }
}

impl Default for SourceFiles {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn test_internal_file_is_first() {
    let source_files = SourceFiles::new();
    let key = source_files.add("/a/b.src".into());

    assert_eq!(source_files.get(SourceFiles::INTERNAL_KEY).filename(), "<internal>");
    assert_eq!(source_files.get(key).filename(), "/a/b.src");
    assert_eq!(source_files.len(), 2);
    assert!(Source::internal().is_internal());
    assert!(!Source::new(key, Location::START).is_internal());
}
