//! Backup-then-write for every generated file.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::application::{ports::Filesystem, services::report::WrittenFile};
use crate::error::CycleResult;

/// Suffix appended to a file that is about to be replaced.
pub const BACKUP_SUFFIX: &str = ".backup";

/// `<path>.backup`.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Write `content` to `path`, moving an existing file to `<path>.backup`.
///
/// An older backup is overwritten. Missing parent directories are created.
pub fn write_with_backup(
    fs: &dyn Filesystem,
    path: &Path,
    content: &str,
) -> CycleResult<WrittenFile> {
    let backup = if fs.exists(path) {
        let target = backup_path(path);
        warn!(
            file = %path.display(),
            backup = %target.display(),
            "File already exists, moving it out of the way"
        );
        fs.rename(path, &target)?;
        Some(target)
    } else {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !fs.is_dir(parent) {
                fs.create_dir_all(parent)?;
            }
        }
        None
    };

    fs.write_file(path, content)?;
    debug!(file = %path.display(), bytes = content.len(), "Wrote file");

    Ok(WrittenFile {
        path: path.to_path_buf(),
        backup,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationError, ports::MockFilesystem};

    #[test]
    fn fresh_file_has_no_backup() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_is_dir().returning(|_| true);
        fs.expect_rename().never();
        fs.expect_create_dir_all().never();
        fs.expect_write_file()
            .withf(|path, content| path == Path::new("/pkg/A.h") && content == "new")
            .times(1)
            .returning(|_, _| Ok(()));

        let written = write_with_backup(&fs, Path::new("/pkg/A.h"), "new").unwrap();
        assert_eq!(written.path, PathBuf::from("/pkg/A.h"));
        assert_eq!(written.backup, None);
    }

    #[test]
    fn missing_parent_directory_is_created() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_is_dir().returning(|_| false);
        fs.expect_create_dir_all()
            .withf(|dir| dir == Path::new("/pkg/include"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_write_file().times(1).returning(|_, _| Ok(()));

        write_with_backup(&fs, Path::new("/pkg/include/A.h"), "new").unwrap();
    }

    #[test]
    fn existing_file_moves_to_backup() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_create_dir_all().never();
        fs.expect_rename()
            .withf(|from, to| from == Path::new("/pkg/A.h") && to == Path::new("/pkg/A.h.backup"))
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_write_file()
            .withf(|path, content| path == Path::new("/pkg/A.h") && content == "new")
            .times(1)
            .returning(|_, _| Ok(()));

        let written = write_with_backup(&fs, Path::new("/pkg/A.h"), "new").unwrap();
        assert_eq!(written.backup, Some(PathBuf::from("/pkg/A.h.backup")));
    }

    #[test]
    fn failed_backup_leaves_the_file_alone() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_rename().returning(|from, _| {
            Err(ApplicationError::FilesystemError {
                path: from.to_path_buf(),
                reason: "read-only".into(),
            }
            .into())
        });
        fs.expect_write_file().never();

        assert!(write_with_backup(&fs, Path::new("/pkg/A.h"), "new").is_err());
    }

    #[test]
    fn backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("src/Cyc.cxx")),
            PathBuf::from("src/Cyc.cxx.backup")
        );
    }
}
