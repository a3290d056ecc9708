use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::Filesystem,
        services::{artifact_writer::write_with_backup, report::RegistryOutcome},
    },
    domain::{RegistryDocument, RegistryOptions, plan_registrations},
    error::CycleResult,
};

/// Adds the new cycle (and its container types) to the dictionary registry.
pub struct RegistryEmitter<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> RegistryEmitter<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Create the registry file, or extend the existing one.
    ///
    /// An existing file without a closing sentinel is left untouched.
    #[instrument(skip_all, fields(class = %opts.names))]
    pub fn emit(&self, opts: &RegistryOptions<'_>) -> CycleResult<RegistryOutcome> {
        let path = opts.resolved_path();

        if !self.filesystem.exists(&path) {
            let lines = plan_registrations(opts, None);
            info!(file = %path.display(), lines = lines.len(), "Creating registry file");
            let doc = RegistryDocument::skeleton(&lines);
            let file = write_with_backup(self.filesystem, &path, doc.as_str())?;
            return Ok(RegistryOutcome::Created { file, lines });
        }

        let existing = RegistryDocument::parse(self.filesystem.read_to_string(&path)?);
        let lines = plan_registrations(opts, Some(&existing));
        let updated = existing
            .insert_before_sentinel(&lines)
            .map_err(|e| ApplicationError::document(&path, e))?;

        if lines.is_empty() {
            info!(file = %path.display(), "Registry file already up to date");
            return Ok(RegistryOutcome::Unchanged { path });
        }

        info!(file = %path.display(), lines = lines.len(), "Extending registry file");
        let file = write_with_backup(self.filesystem, &path, updated.as_str())?;
        Ok(RegistryOutcome::Extended { file, lines })
    }
}
