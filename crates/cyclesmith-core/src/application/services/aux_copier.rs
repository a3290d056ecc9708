use tracing::{info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem, services::report::AuxOutcome},
    domain::{AssetConfig, AuxOptions, options::JOB_CONFIG_DTD},
    error::CycleResult,
};

/// Copies the job configuration DTD next to the generated configuration.
pub struct AuxCopier<'a> {
    filesystem: &'a dyn Filesystem,
    assets: &'a AssetConfig,
}

impl<'a> AuxCopier<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, assets: &'a AssetConfig) -> Self {
        Self { filesystem, assets }
    }

    /// Copy only if the target is absent; an existing file is kept as is.
    #[instrument(skip_all, fields(dir = %opts.target_dir.display()))]
    pub fn copy(&self, opts: &AuxOptions) -> CycleResult<AuxOutcome> {
        let target = opts.target_dir.join(JOB_CONFIG_DTD);
        if self.filesystem.exists(&target) {
            info!(file = %target.display(), "Keeping existing {}", JOB_CONFIG_DTD);
            return Ok(AuxOutcome::Kept { path: target });
        }

        let source = self.assets.job_config_dtd();
        if !self.filesystem.exists(&source) {
            return Err(ApplicationError::AuxTemplateMissing { path: source }.into());
        }

        if !opts.target_dir.as_os_str().is_empty() && !self.filesystem.is_dir(&opts.target_dir) {
            self.filesystem.create_dir_all(&opts.target_dir)?;
        }
        self.filesystem.copy_file(&source, &target)?;
        info!(from = %source.display(), "Using a copy of the framework DTD");
        Ok(AuxOutcome::Copied {
            from: source,
            to: target,
        })
    }
}
