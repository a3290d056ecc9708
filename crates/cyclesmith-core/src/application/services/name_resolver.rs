use std::path::Path;

use tracing::{instrument, warn};

use crate::{
    application::ports::Filesystem,
    domain::{
        NameEvidence, RegistryEvidence,
        analysis_name::BUILD_FILE,
        layout::INCLUDE_DIR,
        name_from_build_file,
    },
    error::CycleResult,
};

/// Derives the analysis name from the package directory.
pub struct NameResolver<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> NameResolver<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Collect the three pieces of evidence found under `workdir`.
    pub fn gather(&self, workdir: &Path) -> CycleResult<NameEvidence> {
        let directory = workdir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());

        let build_path = workdir.join(BUILD_FILE);
        let build_file = if self.filesystem.exists(&build_path) {
            name_from_build_file(&self.filesystem.read_to_string(&build_path)?)
        } else {
            None
        };
        if build_file.is_none() {
            warn!(
                file = %build_path.display(),
                "Unable to find the analysis name in the build file, was looking for a line like \"LIBRARY = MyAnalysis\""
            );
        }

        let include = workdir.join(INCLUDE_DIR);
        let files = if self.filesystem.is_dir(&include) {
            self.filesystem.list_dir(&include)?
        } else {
            Vec::new()
        };
        let registry = RegistryEvidence::from_files(&files);
        match &registry {
            RegistryEvidence::Missing => {
                warn!(dir = %include.display(), "No *_LinkDef.h file to take the analysis name from")
            }
            RegistryEvidence::Ambiguous(n) => {
                warn!(dir = %include.display(), count = n, "No unique *_LinkDef.h file to take the analysis name from")
            }
            RegistryEvidence::Unique(_) => {}
        }

        Ok(NameEvidence {
            directory,
            build_file,
            registry,
        })
    }

    /// The analysis name all three sources agree on.
    #[instrument(skip_all, fields(workdir = %workdir.display()))]
    pub fn resolve(&self, workdir: &Path) -> CycleResult<String> {
        Ok(self.gather(workdir)?.resolve()?)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::DomainError;
    use crate::error::CycleError;

    fn package(make_name: &'static str, linkdef: &'static str) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|path| path == Path::new("/work/Foo/Makefile"))
            .returning(|_| true);
        fs.expect_read_to_string()
            .withf(|path| path == Path::new("/work/Foo/Makefile"))
            .returning(move |_| Ok(format!("LIBRARY = {make_name}\n")));
        fs.expect_is_dir()
            .withf(|path| path == Path::new("/work/Foo/include"))
            .returning(|_| true);
        fs.expect_list_dir()
            .withf(|path| path == Path::new("/work/Foo/include"))
            .returning(move |_| {
                Ok(vec![PathBuf::from(format!(
                    "/work/Foo/include/{linkdef}_LinkDef.h"
                ))])
            });
        fs
    }

    #[test]
    fn agreeing_package_resolves() {
        let fs = package("Foo", "Foo");
        assert_eq!(
            NameResolver::new(&fs).resolve(Path::new("/work/Foo")).unwrap(),
            "Foo"
        );
    }

    #[test]
    fn disagreement_is_a_conflict() {
        let fs = package("Bar", "Foo");
        let err = NameResolver::new(&fs)
            .resolve(Path::new("/work/Foo"))
            .unwrap_err();
        assert!(matches!(
            err,
            CycleError::Domain(DomainError::AnalysisNameConflict { ref build_file, .. }) if build_file == "Bar"
        ));
    }

    #[test]
    fn missing_build_file_is_a_conflict() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_read_to_string().never();
        fs.expect_is_dir().returning(|_| true);
        fs.expect_list_dir()
            .returning(|_| Ok(vec![PathBuf::from("/work/Foo/include/Foo_LinkDef.h")]));

        let evidence = NameResolver::new(&fs).gather(Path::new("/work/Foo")).unwrap();
        assert_eq!(evidence.build_file, None);
        assert!(NameResolver::new(&fs).resolve(Path::new("/work/Foo")).is_err());
    }
}
