use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::Filesystem,
        services::{artifact_writer::write_with_backup, report::WrittenFile},
    },
    domain::{AssetConfig, ConfigOptions, adapt_job_config, parse_document, write_document},
    error::CycleResult,
};

/// Writes the job configuration, derived from the framework's example.
pub struct ConfigEmitter<'a> {
    filesystem: &'a dyn Filesystem,
    assets: &'a AssetConfig,
}

impl<'a> ConfigEmitter<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, assets: &'a AssetConfig) -> Self {
        Self { filesystem, assets }
    }

    /// Load, adapt and write. Nothing is written (and nothing is backed up)
    /// unless every edit succeeded.
    #[instrument(skip_all, fields(class = %opts.names))]
    pub fn emit(&self, opts: &ConfigOptions<'_>) -> CycleResult<WrittenFile> {
        let template_path = self.assets.example_config();
        if !self.filesystem.exists(&template_path) {
            return Err(ApplicationError::ConfigTemplateMissing {
                path: template_path,
            }
            .into());
        }

        let text = self.filesystem.read_to_string(&template_path)?;
        let doc = parse_document(&text)
            .and_then(|template| adapt_job_config(&template, opts))
            .and_then(|adapted| write_document(&adapted))
            .map_err(|e| ApplicationError::document(&template_path, e))?;

        let path = opts.resolved_path();
        info!(
            file = %path.display(),
            template = %template_path.display(),
            "Creating job configuration"
        );
        write_with_backup(self.filesystem, &path, &doc)
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::{DomainError, NamePair};
    use crate::error::CycleError;

    const TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE JobConfiguration PUBLIC "" "JobConfig.dtd">
<JobConfiguration JobName="FirstCycleJob" OutputLevel="DEBUG">
  <Library Name="libSFrameUser"/>
  <Package Name="SFrameUser.par"/>
  <Cycle Name="FirstCycle" RunMode="PROOF">
    <InputData Type="MC">
      <In FileName="a.root"/>
      <InputTree Name="FirstTree"/>
      <OutputTree Name="FirstOutputTree"/>
    </InputData>
    <UserConfig>
      <Item Name="A" Value="1"/>
    </UserConfig>
  </Cycle>
</JobConfiguration>
"#;

    const EXAMPLE: &str = "/sframe/user/config/FirstCycle_config.xml";

    fn with_template(text: String) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_read_to_string()
            .withf(|path| path == Path::new(EXAMPLE))
            .returning(move |_| Ok(text.clone()));
        fs
    }

    #[test]
    fn writes_adapted_config() {
        let mut fs = with_template(TEMPLATE.to_string());
        fs.expect_exists()
            .returning(|path| path == Path::new(EXAMPLE));
        fs.expect_is_dir().returning(|_| true);
        fs.expect_write_file()
            .withf(|path, text| {
                path == Path::new("/pkg/config/MyCycle_config.xml")
                    && text.contains(r#"JobName="MyCycleJob""#)
                    && text.contains(r#"FileName="your/input/file.root""#)
                    && !text.contains("OutputTree")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let assets = AssetConfig::new("/sframe");
        let names = NamePair::split("MyCycle");
        let mut opts = ConfigOptions::new(&names);
        opts.path = Some(PathBuf::from("/pkg/config/MyCycle_config.xml"));

        let written = ConfigEmitter::new(&fs, &assets).emit(&opts).unwrap();
        assert_eq!(written.backup, None);
    }

    #[test]
    fn missing_template_writes_nothing() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|path| path == Path::new("/nowhere/user/config/FirstCycle_config.xml"))
            .times(1)
            .returning(|_| false);
        fs.expect_read_to_string().never();
        fs.expect_rename().never();
        fs.expect_write_file().never();

        let assets = AssetConfig::new("/nowhere");
        let names = NamePair::split("MyCycle");

        let err = ConfigEmitter::new(&fs, &assets)
            .emit(&ConfigOptions::new(&names))
            .unwrap_err();
        assert!(matches!(
            err,
            CycleError::Application(ApplicationError::ConfigTemplateMissing { .. })
        ));
    }

    #[test]
    fn duplicated_job_section_aborts_before_backup() {
        let mut fs = with_template(TEMPLATE.replace("<Library", "<JobConfiguration/><Library"));
        fs.expect_exists().returning(|_| true);
        fs.expect_rename().never();
        fs.expect_write_file().never();

        let assets = AssetConfig::new("/sframe");
        let names = NamePair::split("MyCycle");

        let err = ConfigEmitter::new(&fs, &assets)
            .emit(&ConfigOptions::new(&names))
            .unwrap_err();
        assert!(matches!(
            err,
            CycleError::Application(ApplicationError::Document {
                source: DomainError::UnexpectedSectionCount { found: 2, .. },
                ..
            })
        ));
    }
}
