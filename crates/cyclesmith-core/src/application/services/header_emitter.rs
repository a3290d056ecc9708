use tracing::{info, instrument};

use crate::{
    application::{
        ports::Filesystem,
        services::{artifact_writer::write_with_backup, report::WrittenFile},
    },
    domain::{HeaderOptions, render_header},
    error::CycleResult,
};

/// Writes the class declaration.
pub struct HeaderEmitter<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> HeaderEmitter<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Render and write the header; the written path is needed by the source.
    #[instrument(skip_all, fields(class = %opts.names))]
    pub fn emit(&self, opts: &HeaderOptions<'_>) -> CycleResult<WrittenFile> {
        let path = opts.resolved_path();
        info!(file = %path.display(), fields = opts.fields.len(), "Creating header");
        write_with_backup(self.filesystem, &path, &render_header(opts))
    }
}
