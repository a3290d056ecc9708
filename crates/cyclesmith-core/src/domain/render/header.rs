//! Class declaration rendering.

use crate::domain::{
    field::FieldModel,
    options::HeaderOptions,
    render::{
        block::{CodeBlock, indent},
        context::RenderContext,
        templates::{
            CLEAR_OUTPUT_DECLARATION, CONNECT_INPUT_DECLARATION, DECLARE_OUTPUT_DECLARATION,
            HEADER_BODY, HEADER_FRAME, NAMESPACE_WRAPPER,
        },
    },
};

/// Helper declarations the header carries.
///
/// The clearing helper is only useful with output and at least one
/// container-like field.
pub fn function_declarations(
    fields: &[FieldModel],
    create_output: bool,
    helper_functions: bool,
) -> String {
    if !helper_functions {
        return String::new();
    }
    let mut decls = String::from(CONNECT_INPUT_DECLARATION);
    if create_output {
        decls.push_str(DECLARE_OUTPUT_DECLARATION);
        if fields.iter().any(FieldModel::is_container_like) {
            decls.push_str(CLEAR_OUTPUT_DECLARATION);
        }
    }
    decls
}

/// Full text of the header file.
pub fn render_header(opts: &HeaderOptions<'_>) -> String {
    let mut inputs = CodeBlock::new();
    let mut outputs = CodeBlock::new();
    for field in opts.fields {
        inputs.push(field.declaration());
        if opts.create_output {
            outputs.push(field.output_declaration());
        }
    }

    let ctx = RenderContext::new(opts.names)
        .with_variable("INPUT_DECLARATIONS", inputs.render())
        .with_variable("OUTPUT_DECLARATIONS", outputs.render())
        .with_variable(
            "FUNCTION_DECLARATIONS",
            function_declarations(opts.fields, opts.create_output, opts.helper_functions),
        );

    let body = ctx.render(HEADER_BODY);
    let body = if opts.names.has_namespace() {
        ctx.clone()
            .with_variable("BODY", indent(&body))
            .render(NAMESPACE_WRAPPER)
    } else {
        body
    };

    ctx.with_variable("BODY", body).render(HEADER_FRAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::naming::NamePair;

    fn fields() -> Vec<FieldModel> {
        vec![
            FieldModel::new("el_n", "Int_t"),
            FieldModel::new("el_pt", "std::vector<float>"),
        ]
    }

    #[test]
    fn declares_inputs_and_outputs() {
        let names = NamePair::split("MyCycle");
        let fields = fields();
        let mut opts = HeaderOptions::new(&names, &fields);
        opts.create_output = true;

        let text = render_header(&opts);
        assert!(text.contains("#ifndef MYCYCLE_H"));
        assert!(text.contains("class MyCycle : public SCycleBase {"));
        assert!(text.contains("   Int_t\tel_n; ///< el_n"));
        assert!(text.contains("   std::vector<float>*\tel_pt; ///< el_pt"));
        assert!(text.contains("   int\tout_el_n;"));
        assert!(text.contains("   std::vector<float>\tout_el_pt;"));
        assert!(text.contains("ClassDef( MyCycle, 0 );"));
        assert!(!text.contains("ConnectInputVariables"));
        assert!(!text.contains("{{"));
    }

    #[test]
    fn no_output_slots_without_output() {
        let names = NamePair::split("MyCycle");
        let fields = fields();
        let text = render_header(&HeaderOptions::new(&names, &fields));
        assert!(!text.contains("out_"));
    }

    #[test]
    fn helper_declarations_follow_output_and_containers() {
        let scalar = vec![FieldModel::new("n", "int")];
        let with_vec = fields();

        let only_connect = function_declarations(&with_vec, false, true);
        assert!(only_connect.contains("ConnectInputVariables"));
        assert!(!only_connect.contains("DeclareOutputVariables"));

        let no_clear = function_declarations(&scalar, true, true);
        assert!(no_clear.contains("DeclareOutputVariables"));
        assert!(!no_clear.contains("ClearOutputVariables"));

        let all = function_declarations(&with_vec, true, true);
        assert!(all.contains("ClearOutputVariables"));

        assert!(function_declarations(&with_vec, true, false).is_empty());
    }

    #[test]
    fn namespaced_class_is_wrapped_and_indented() {
        let names = NamePair::split("Ana::MyCycle");
        let text = render_header(&HeaderOptions::new(&names, &[]));
        assert!(text.contains("#define ANA_MYCYCLE_H"));
        assert!(text.contains("namespace Ana {"));
        assert!(text.contains("   class MyCycle : public SCycleBase {"));
        assert!(text.contains("      ClassDef( Ana::MyCycle, 0 );"));
        assert!(text.contains("} // namespace Ana"));
    }

    #[test]
    fn commented_fields_stay_commented() {
        let names = NamePair::split("MyCycle");
        let fields = vec![FieldModel::new("x", "float").commented_out()];
        let text = render_header(&HeaderOptions::new(&names, &fields));
        assert!(text.contains("   //float\tx; ///< x"));
    }
}
