// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for cyclesmith.
//!
//! Pure text and tree logic: type classification, naming, field models,
//! Monte-Carlo tagging, C++ rendering, the registry document, the job
//! configuration edit pipeline and name evidence.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: No filesystem or environment access; callers pass contents in
//! - **Injectable checks**: Directory checks are closures handed in by callers
//! - **Immutable inputs**: Edits produce new values instead of mutating shared state
//!
pub mod analysis_name;
pub mod error;
pub mod field;
pub mod job_config;
pub mod layout;
pub mod naming;
pub mod options;
pub mod registry;
pub mod render;
pub mod tagging;
pub mod types;

mod validation;

pub use analysis_name::{NameEvidence, RegistryEvidence, name_from_build_file};
pub use error::{DomainError, ErrorCategory};
pub use field::FieldModel;
pub use job_config::{XmlDocument, adapt_job_config, parse_document, write_document};
pub use layout::ProjectLayout;
pub use naming::NamePair;
pub use options::{
    AssetConfig, AuxOptions, ConfigOptions, GenerationOptions, HeaderOptions, RegistryOptions,
    SourceOptions,
};
pub use registry::{RegistryDocument, plan_registrations};
pub use render::{render_header, render_source};
pub use tagging::{DataType, McTagger};
pub use types::{is_container_like, normalize_type};
pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Classifier Tests
    // ========================================================================

    #[test]
    fn classifies_container_like_types() {
        for ty in ["vector<int>", "std::map<int,float>", "list <Foo>"] {
            assert!(is_container_like(ty), "{ty}");
        }
        for ty in ["int", "MyClass", "Foo<Bar"] {
            assert!(!is_container_like(ty), "{ty}");
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        for ty in [
            "std::vector< std::vector<float>>",
            "map < int , vector<int> >",
            "  Foo  ",
        ] {
            let once = normalize_type(ty);
            assert_eq!(normalize_type(&once), once);
        }
        assert_eq!(
            normalize_type("vector<vector<vector<int>>>"),
            "vector<vector<vector<int> > >"
        );
    }

    // ========================================================================
    // Header + Source Tests
    // ========================================================================

    #[test]
    fn header_and_source_for_mixed_fields() {
        let names = NamePair::split("MyCycle");
        let (tagger, _) = McTagger::compile("mc_");
        let mut fields = vec![
            FieldModel::new("el_n", "int"),
            FieldModel::new("el_pt", "std::vector<float>"),
            FieldModel::new("mc_weight", "float"),
        ];
        assert_eq!(tagger.tag(&mut fields), DataType::Mc);

        let mut header = HeaderOptions::new(&names, &fields);
        header.create_output = true;
        header.path = Some("include/MyCycle.h".into());
        let header_text = render_header(&header);
        assert!(header_text.contains("out_mc_weight"));

        let mut source = SourceOptions::new(&names, &fields);
        source.create_output = true;
        source.path = Some("src/MyCycle.cxx".into());
        source.header_path = header.path.clone();
        let text = render_source(&source);

        assert_eq!(text.matches(".clear();").count(), 1);
        assert_eq!(text.matches("if( id.GetType() == \"MC\" ) {").count(), 3);
        assert!(text.contains("#include \"../include/MyCycle.h\""));

        let guard = "   if( id.GetType() == \"MC\" ) {\n      ConnectVariable( InTreeName.c_str(), \"mc_weight\", mc_weight );\n   }";
        assert!(text.contains(guard));
        let fill = "   if( id.GetType() == \"MC\" ) {\n      out_mc_weight = mc_weight;\n   }";
        assert!(text.contains(fill));
    }
}
