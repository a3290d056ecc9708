//! Turning the framework's example job configuration into one for a new cycle.
//!
//! The example is cloned and edited step by step. Any structural surprise
//! aborts the whole edit so that a half-adapted document is never written.

use crate::domain::{
    error::DomainError,
    job_config::{
        tree::{XmlDocument, XmlElement},
        xml::inline_element,
    },
    options::ConfigOptions,
};

pub const JOB_CONFIGURATION: &str = "JobConfiguration";
pub const LIBRARY: &str = "Library";
pub const PACKAGE: &str = "Package";
pub const CYCLE: &str = "Cycle";
pub const INPUT_DATA: &str = "InputData";
pub const INPUT_FILE: &str = "In";
pub const INPUT_TREE: &str = "InputTree";
pub const OUTPUT_TREE: &str = "OutputTree";
pub const METADATA_OUTPUT_TREE: &str = "MetadataOutputTree";
pub const USER_CONFIG: &str = "UserConfig";
pub const ITEM: &str = "Item";

/// Library and package names the example configuration points at.
pub const PLACEHOLDER_LIBRARY: &str = "libSFrameUser";
pub const PLACEHOLDER_PACKAGE: &str = "SFrameUser.par";
/// Optional companion library suggested in a comment.
pub const AUX_LIBRARY: &str = "libSFrameMetaTools";
pub const AUX_PACKAGE: &str = "SFrameMetaTools.par";
pub const AUX_NOTE: &str = " Uncomment if you want to use compiled features of SFrameMetaTools: ";

pub const OUTPUT_LEVEL: &str = "INFO";
pub const RUN_MODE: &str = "LOCAL";
pub const LUMI: &str = "1.0";
pub const VERSION: &str = "V1";
pub const TREE_NAME_ITEM: &str = "InTreeName";

fn exactly_one(count: usize, element: &'static str) -> Result<(), DomainError> {
    if count == 1 {
        Ok(())
    } else {
        Err(DomainError::UnexpectedSectionCount {
            element,
            found: count,
        })
    }
}

/// Keep the first `element` below `parent` and hand it out.
fn single_exemplar<'a>(
    parent: &'a mut XmlElement,
    element: &'static str,
    parent_name: &'static str,
) -> Result<&'a mut XmlElement, DomainError> {
    parent.retain_first_descendant(element);
    parent
        .find_descendant_mut(element)
        .ok_or(DomainError::MissingExemplar {
            element,
            parent: parent_name,
        })
}

fn rename_with_suggestion(
    job: &mut XmlElement,
    element: &str,
    placeholder: &str,
    replacement: &str,
    aux: &str,
) -> Result<usize, DomainError> {
    let mut failure = None;
    let renamed = job.rename_references(element, placeholder, replacement, AUX_NOTE, |el| {
        let suggestion = el.clone().with_attr("Name", aux);
        inline_element(&suggestion).unwrap_or_else(|e| {
            failure = Some(e);
            String::new()
        })
    });
    match failure {
        Some(err) => Err(err),
        None => Ok(renamed),
    }
}

/// Adapt `template` for the cycle described by `opts`.
///
/// The template itself is left untouched.
pub fn adapt_job_config(
    template: &XmlDocument,
    opts: &ConfigOptions<'_>,
) -> Result<XmlDocument, DomainError> {
    let mut doc = template.clone();

    exactly_one(doc.count(JOB_CONFIGURATION), JOB_CONFIGURATION)?;
    exactly_one(doc.count(CYCLE), CYCLE)?;

    let job = doc
        .find_mut(JOB_CONFIGURATION)
        .ok_or(DomainError::UnexpectedSectionCount {
            element: JOB_CONFIGURATION,
            found: 0,
        })?;
    job.set_attr("JobName", opts.job_name());
    job.set_attr("OutputLevel", OUTPUT_LEVEL);

    rename_with_suggestion(
        job,
        LIBRARY,
        PLACEHOLDER_LIBRARY,
        &format!("lib{}", opts.analysis),
        AUX_LIBRARY,
    )?;
    rename_with_suggestion(
        job,
        PACKAGE,
        PLACEHOLDER_PACKAGE,
        &format!("{}.par", opts.analysis),
        AUX_PACKAGE,
    )?;

    let cycle = job
        .find_descendant_mut(CYCLE)
        .ok_or(DomainError::UnexpectedSectionCount {
            element: CYCLE,
            found: 0,
        })?;
    cycle.set_attr("Name", opts.names.full_name());
    cycle.set_attr("RunMode", RUN_MODE);

    exactly_one(cycle.count_descendants(USER_CONFIG), USER_CONFIG)?;

    {
        let input_data = single_exemplar(cycle, INPUT_DATA, CYCLE)?;
        input_data.clear_attributes();
        input_data.set_attr("Lumi", LUMI);
        input_data.set_attr("Version", VERSION);
        input_data.set_attr("Type", opts.data_type.as_str());

        let input_file = single_exemplar(input_data, INPUT_FILE, INPUT_DATA)?;
        input_file.set_attr("Lumi", LUMI);
        input_file.set_attr("FileName", opts.input_file);

        let input_tree = single_exemplar(input_data, INPUT_TREE, INPUT_DATA)?;
        input_tree.set_attr("Name", opts.input_tree);

        input_data.remove_descendants(METADATA_OUTPUT_TREE);

        match opts.output_tree {
            Some(name) => {
                let output_tree = single_exemplar(input_data, OUTPUT_TREE, INPUT_DATA)?;
                output_tree.set_attr("Name", name);
            }
            None => {
                input_data.remove_descendants(OUTPUT_TREE);
            }
        }
    }

    let user_config = cycle
        .find_descendant_mut(USER_CONFIG)
        .ok_or(DomainError::UnexpectedSectionCount {
            element: USER_CONFIG,
            found: 0,
        })?;
    let item = single_exemplar(user_config, ITEM, USER_CONFIG)?;
    item.set_attr("Name", TREE_NAME_ITEM);
    item.set_attr("Value", opts.input_tree);

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        job_config::{
            tree::XmlNode,
            xml::{parse_document, write_document},
        },
        naming::NamePair,
        tagging::DataType,
    };

    const TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE JobConfiguration PUBLIC "" "JobConfig.dtd">
<JobConfiguration JobName="FirstCycleJob" OutputLevel="DEBUG">
  <Library Name="libSFrameUser"/>
  <Package Name="SFrameUser.par"/>
  <Cycle Name="FirstCycle" RunMode="PROOF" ProofServer="lite">
    <InputData Lumi="0.0" NEventsMax="-1" Type="MC" Version="Reco">
      <In FileName="a.root" Lumi="5.0"/>
      <In FileName="b.root" Lumi="5.0"/>
      <InputTree Name="FirstTree"/>
      <InputTree Name="SecondTree"/>
      <OutputTree Name="FirstOutputTree"/>
      <OutputTree Name="SecondOutputTree"/>
      <MetadataOutputTree Name="MetaTree"/>
    </InputData>
    <InputData Lumi="0.0" Type="DATA" Version="Data">
      <In FileName="c.root" Lumi="1.0"/>
      <InputTree Name="FirstTree"/>
    </InputData>
    <UserConfig>
      <Item Name="FirstItem" Value="1"/>
      <Item Name="SecondItem" Value="2"/>
    </UserConfig>
  </Cycle>
</JobConfiguration>
"#;

    fn options<'a>(names: &'a NamePair) -> ConfigOptions<'a> {
        let mut opts = ConfigOptions::new(names);
        opts.analysis = "Ana";
        opts.input_file = "data/input.root";
        opts.input_tree = "physics";
        opts.data_type = DataType::Mc;
        opts
    }

    #[test]
    fn adapts_every_section() {
        let template = parse_document(TEMPLATE).unwrap();
        let names = NamePair::split("Ana::MyCycle");
        let mut opts = options(&names);
        opts.output_tree = Some("OutTree");

        let mut doc = adapt_job_config(&template, &opts).unwrap();
        assert_eq!(doc.root.attr("JobName"), Some("MyCycleJob"));
        assert_eq!(doc.root.attr("OutputLevel"), Some("INFO"));
        assert_eq!(doc.count("InputData"), 1);
        assert_eq!(doc.count("In"), 1);
        assert_eq!(doc.count("InputTree"), 1);
        assert_eq!(doc.count("OutputTree"), 1);
        assert_eq!(doc.count("MetadataOutputTree"), 0);
        assert_eq!(doc.count("Item"), 1);

        let cycle = doc.find_mut("Cycle").unwrap();
        assert_eq!(cycle.attr("Name"), Some("Ana::MyCycle"));
        assert_eq!(cycle.attr("RunMode"), Some("LOCAL"));
        assert_eq!(cycle.attr("ProofServer"), Some("lite"));

        let input_data = doc.find_mut("InputData").unwrap();
        assert_eq!(
            input_data.attributes,
            vec![
                ("Lumi".into(), "1.0".into()),
                ("Version".into(), "V1".into()),
                ("Type".into(), "MC".into()),
            ]
        );
        assert_eq!(
            doc.find_mut("In").unwrap().attr("FileName"),
            Some("data/input.root")
        );
        assert_eq!(doc.find_mut("InputTree").unwrap().attr("Name"), Some("physics"));
        assert_eq!(doc.find_mut("OutputTree").unwrap().attr("Name"), Some("OutTree"));
        let item = doc.find_mut("Item").unwrap();
        assert_eq!(item.attr("Name"), Some("InTreeName"));
        assert_eq!(item.attr("Value"), Some("physics"));
    }

    #[test]
    fn library_and_package_are_renamed_with_commented_suggestions() {
        let template = parse_document(TEMPLATE).unwrap();
        let names = NamePair::split("MyCycle");
        let doc = adapt_job_config(&template, &options(&names)).unwrap();

        let text = write_document(&doc).unwrap();
        assert!(text.contains(r#"<Library Name="libAna"/>"#));
        assert!(text.contains(r#"<Package Name="Ana.par"/>"#));
        assert!(text.contains(r#"<!--<Library Name="libSFrameMetaTools"/>-->"#));
        assert!(text.contains(r#"<!--<Package Name="SFrameMetaTools.par"/>-->"#));
        assert_eq!(text.matches(AUX_NOTE).count(), 2);
        assert!(matches!(doc.root.children[0], XmlNode::Comment(_)));
    }

    #[test]
    fn output_tree_is_removed_when_not_requested() {
        let template = parse_document(TEMPLATE).unwrap();
        let names = NamePair::split("MyCycle");
        let doc = adapt_job_config(&template, &options(&names)).unwrap();
        assert_eq!(doc.count("OutputTree"), 0);
    }

    #[test]
    fn missing_placeholder_leaves_libraries_alone() {
        let text = TEMPLATE.replace("libSFrameUser", "libOther");
        let template = parse_document(&text).unwrap();
        let names = NamePair::split("MyCycle");
        let doc = adapt_job_config(&template, &options(&names)).unwrap();
        let out = write_document(&doc).unwrap();
        assert!(out.contains(r#"<Library Name="libOther"/>"#));
        assert!(!out.contains("libSFrameMetaTools"));
    }

    #[test]
    fn two_cycles_abort() {
        let text = TEMPLATE.replace(
            "</JobConfiguration>",
            "<Cycle Name=\"Second\"><UserConfig/></Cycle></JobConfiguration>",
        );
        let template = parse_document(&text).unwrap();
        let names = NamePair::split("MyCycle");
        assert_eq!(
            adapt_job_config(&template, &options(&names)),
            Err(DomainError::UnexpectedSectionCount {
                element: CYCLE,
                found: 2
            })
        );
    }

    #[test]
    fn missing_input_file_is_a_structure_error() {
        let text = TEMPLATE
            .replace(r#"<In FileName="a.root" Lumi="5.0"/>"#, "")
            .replace(r#"<In FileName="b.root" Lumi="5.0"/>"#, "");
        let template = parse_document(&text).unwrap();
        let names = NamePair::split("MyCycle");
        assert_eq!(
            adapt_job_config(&template, &options(&names)),
            Err(DomainError::MissingExemplar {
                element: INPUT_FILE,
                parent: INPUT_DATA
            })
        );
    }

    #[test]
    fn template_is_not_modified() {
        let template = parse_document(TEMPLATE).unwrap();
        let names = NamePair::split("MyCycle");
        let before = template.clone();
        adapt_job_config(&template, &options(&names)).unwrap();
        assert_eq!(template, before);
    }
}
