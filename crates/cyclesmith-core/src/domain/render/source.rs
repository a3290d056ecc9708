//! Class definition rendering.
//!
//! Every field contributes to up to four sections: input wiring, output
//! declaration, output clearing and output filling. Runs of consecutive
//! Monte-Carlo fields share one guard per section.

use std::path::Path;

use crate::domain::{
    field::FieldModel,
    options::SourceOptions,
    render::{
        block::{CodeBlock, indent},
        context::RenderContext,
        paths::relative_include,
        templates::{
            CLEAR_OUTPUT_CALL, CLEAR_OUTPUT_SIGNATURE, CONNECT_INPUT_CALL,
            CONNECT_INPUT_SIGNATURE, DECLARE_OUTPUT_CALL, DECLARE_OUTPUT_SIGNATURE,
            FUNCTION_BODY, NAMESPACE_WRAPPER, SOURCE_BODY, SOURCE_FRAME,
        },
    },
};

/// Per-field code of the cycle, grouped by where it ends up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSections {
    pub connections: CodeBlock,
    pub declarations: CodeBlock,
    pub clearing: CodeBlock,
    pub filling: CodeBlock,
}

impl SourceSections {
    pub fn build(fields: &[FieldModel], create_output: bool) -> Self {
        let mut sections = Self::default();
        let mut mc_open = false;

        for field in fields {
            if field.is_mc() != mc_open {
                mc_open = field.is_mc();
                sections.toggle_guard(mc_open, create_output);
            }

            let prefix = field.comment_prefix();
            sections.connections.push(format!(
                "{prefix}ConnectVariable( InTreeName.c_str(), \"{}\", {} );",
                field.name(),
                field.cname()
            ));

            if create_output {
                sections.declarations.push(format!(
                    "{prefix}DeclareVariable( {}, \"{}\" );",
                    field.output_name(),
                    field.name()
                ));
                sections.filling.push(format!(
                    "{prefix}{} = {}{};",
                    field.output_name(),
                    field.indirection(),
                    field.cname()
                ));
                if field.is_pointer() && field.is_container_like() {
                    sections
                        .clearing
                        .push(format!("{prefix}{}.clear();", field.output_name()));
                }
            }
        }

        if mc_open {
            sections.toggle_guard(false, create_output);
        }
        sections
    }

    fn toggle_guard(&mut self, open: bool, create_output: bool) {
        let mut blocks = vec![&mut self.connections];
        if create_output {
            blocks.push(&mut self.declarations);
            blocks.push(&mut self.filling);
        }
        for block in blocks {
            if open {
                block.open_mc();
            } else {
                block.close_mc();
            }
        }
    }
}

fn function_body(ctx: &RenderContext, signature: &str, lines: &CodeBlock) -> String {
    ctx.clone()
        .with_variable("FUNCTION", signature)
        .with_variable("LINES", lines.render())
        .render(FUNCTION_BODY)
}

/// Full text of the source file.
pub fn render_source(opts: &SourceOptions<'_>) -> String {
    let source_path = opts.resolved_path();
    let source_dir = source_path.parent().unwrap_or(Path::new(""));
    let include = relative_include(&opts.resolved_header_path(), source_dir);

    let sections = SourceSections::build(opts.fields, opts.create_output);
    let base = RenderContext::new(opts.names);

    let mut connections = sections.connections.render();
    let mut declarations = sections.declarations.render();
    let mut clearing = sections.clearing.render();
    let filling = sections.filling.render();
    let mut bodies = String::new();

    if opts.helper_functions {
        bodies.push_str(&function_body(&base, CONNECT_INPUT_SIGNATURE, &sections.connections));
        connections = CONNECT_INPUT_CALL.to_string();

        if opts.create_output {
            bodies.push_str(&function_body(
                &base,
                DECLARE_OUTPUT_SIGNATURE,
                &sections.declarations,
            ));
            declarations = DECLARE_OUTPUT_CALL.to_string();

            if !sections.clearing.is_empty() {
                bodies.push_str(&function_body(&base, CLEAR_OUTPUT_SIGNATURE, &sections.clearing));
                clearing = CLEAR_OUTPUT_CALL.to_string();
            }
        }
    }

    let ctx = base
        .with_variable("INPUT_CONNECTIONS", connections)
        .with_variable("OUTPUT_CONNECTIONS", declarations)
        .with_variable("OUTPUT_CLEARING", clearing)
        .with_variable("OUTPUT_FILLING", filling)
        .with_variable("FUNCTION_BODIES", bodies)
        .with_variable("HEADER", include);

    let body = ctx.render(SOURCE_BODY);
    let body = if opts.names.has_namespace() {
        ctx.clone()
            .with_variable("BODY", indent(&body))
            .render(NAMESPACE_WRAPPER)
    } else {
        body
    };

    ctx.with_variable("BODY", body).render(SOURCE_FRAME)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::{naming::NamePair, render::block::BlockLine};

    fn mc(mut field: FieldModel) -> FieldModel {
        field.mark_monte_carlo();
        field
    }

    fn guard_count(block: &CodeBlock) -> usize {
        block
            .lines()
            .iter()
            .filter(|l| matches!(l, BlockLine::OpenMc))
            .count()
    }

    #[test]
    fn consecutive_mc_fields_share_one_guard() {
        let fields = vec![
            FieldModel::new("el_pt", "float"),
            mc(FieldModel::new("mc_pt", "float")),
            mc(FieldModel::new("mc_eta", "float")),
            FieldModel::new("el_eta", "float"),
        ];
        let sections = SourceSections::build(&fields, true);
        assert_eq!(guard_count(&sections.connections), 1);
        assert_eq!(guard_count(&sections.declarations), 1);
        assert_eq!(guard_count(&sections.filling), 1);
        assert_eq!(guard_count(&sections.clearing), 0);
    }

    #[test]
    fn trailing_mc_run_is_closed() {
        let fields = vec![FieldModel::new("a", "int"), mc(FieldModel::new("mc_b", "int"))];
        let sections = SourceSections::build(&fields, false);
        assert_eq!(
            sections.connections.lines().last(),
            Some(&BlockLine::CloseMc)
        );
        assert!(sections.declarations.lines().is_empty());
    }

    #[test]
    fn separate_mc_runs_get_separate_guards() {
        let fields = vec![
            mc(FieldModel::new("mc_a", "int")),
            FieldModel::new("b", "int"),
            mc(FieldModel::new("mc_c", "int")),
        ];
        let sections = SourceSections::build(&fields, false);
        assert_eq!(guard_count(&sections.connections), 2);
    }

    #[test]
    fn only_container_pointers_are_cleared() {
        let fields = vec![
            FieldModel::new("n", "int"),
            FieldModel::new("pt", "std::vector<float>"),
            FieldModel::new("obj", "MyClass").with_pointer(true),
        ];
        let sections = SourceSections::build(&fields, true);
        assert_eq!(
            sections.clearing.lines(),
            &[BlockLine::Code("out_pt.clear();".into())]
        );
    }

    #[test]
    fn inline_mode_puts_code_in_the_main_body() {
        let names = NamePair::split("MyCycle");
        let fields = vec![FieldModel::new("el_pt", "std::vector<float>")];
        let mut opts = SourceOptions::new(&names, &fields);
        opts.create_output = true;

        let text = render_source(&opts);
        assert!(text.starts_with("// Local include(s):\n#include \"MyCycle.h\""));
        assert!(text.contains("ClassImp( MyCycle );"));
        assert!(text.contains("   ConnectVariable( InTreeName.c_str(), \"el_pt\", el_pt );"));
        assert!(text.contains("   DeclareVariable( out_el_pt, \"el_pt\" );"));
        assert!(text.contains("   out_el_pt.clear();"));
        assert!(text.contains("   out_el_pt = *el_pt;"));
        assert!(!text.contains("ConnectInputVariables"));
    }

    #[test]
    fn helper_mode_moves_code_into_functions() {
        let names = NamePair::split("MyCycle");
        let fields = vec![FieldModel::new("n", "int")];
        let mut opts = SourceOptions::new(&names, &fields);
        opts.create_output = true;
        opts.helper_functions = true;

        let text = render_source(&opts);
        assert!(text.contains("   ConnectInputVariables( id );"));
        assert!(text.contains("void MyCycle::ConnectInputVariables( const SInputData& id ) {"));
        assert!(text.contains("   DeclareOutputVariables( id );"));
        assert!(!text.contains("ClearOutputVariables"));
    }

    #[test]
    fn include_is_relative_to_the_source_directory() {
        let names = NamePair::split("Ana::MyCycle");
        let mut opts = SourceOptions::new(&names, &[]);
        opts.path = Some(PathBuf::from("src/MyCycle.cxx"));
        opts.header_path = Some(PathBuf::from("include/MyCycle.h"));

        let text = render_source(&opts);
        assert!(text.contains("#include \"../include/MyCycle.h\""));
        assert!(text.contains("ClassImp( Ana::MyCycle );"));
        assert!(text.contains("namespace Ana {"));
        assert!(text.contains("   MyCycle::MyCycle()"));
    }

    #[test]
    fn absolute_header_next_to_relative_source_is_included_verbatim() {
        let names = NamePair::split("MyCycle");
        let mut opts = SourceOptions::new(&names, &[]);
        opts.header_path = Some(PathBuf::from("/pkg/include/MyCycle.h"));

        let text = render_source(&opts);
        assert!(text.contains("#include \"/pkg/include/MyCycle.h\""));
    }
}
