use tracing::{info, instrument};

use crate::{
    application::{
        ports::Filesystem,
        services::{artifact_writer::write_with_backup, report::WrittenFile},
    },
    domain::{SourceOptions, render_source},
    error::CycleResult,
};

/// Writes the class definition.
pub struct SourceEmitter<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> SourceEmitter<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    #[instrument(skip_all, fields(class = %opts.names))]
    pub fn emit(&self, opts: &SourceOptions<'_>) -> CycleResult<WrittenFile> {
        let path = opts.resolved_path();
        info!(
            file = %path.display(),
            header = %opts.resolved_header_path().display(),
            "Creating source"
        );
        write_with_backup(self.filesystem, &path, &render_source(opts))
    }
}
