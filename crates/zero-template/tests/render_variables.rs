//! Integration tests for variable interpolation.

use zero_template::{RenderWarning, Value, context, render, render_with_warnings};

#[test]
fn resolves_nested_path() {
    let ctx = context! { "user" => context! { "name" => "Ada" } };
    assert_eq!(render("Hi {{ user.name }}!", &ctx), "Hi Ada!");
}

#[test]
fn interior_whitespace_is_trimmed() {
    let ctx = context! { "name" => "Ada" };
    assert_eq!(render("{{name}}|{{   name   }}|{{\tname\t}}", &ctx), "Ada|Ada|Ada");
}

#[test]
fn missing_path_is_left_verbatim() {
    let ctx = context! {};
    assert_eq!(render("{{ missing.path }}", &ctx), "{{ missing.path }}");
}

#[test]
fn list_or_record_value_is_left_verbatim() {
    let ctx = context! { "tags" => vec!["a"], "user" => context! { "name" => "Ada" } };
    assert_eq!(render("{{ tags }} {{ user }}", &ctx), "{{ tags }} {{ user }}");
}

#[test]
fn hash_prefixed_markers_are_not_variables() {
    let ctx = context! { "#x" => "no" };
    assert_eq!(render("{{#x}} {{ #x }}", &ctx), "{{#x}} {{ #x }}");
}

#[test]
fn multiline_marker_content_is_not_a_variable() {
    let ctx = context! { "a" => "A" };
    assert_eq!(render("{{ a\nb }} {{\na\n}}", &ctx), "{{ a\nb }} A");
}

#[test]
fn empty_marker_resolves_to_text_root() {
    assert_eq!(render("[{{ }}]", &Value::from("root")), "[root]");
}

#[test]
fn replacement_text_is_not_rescanned() {
    let ctx = context! { "a" => "{{ b }}", "b" => "B" };
    assert_eq!(render("{{ a }}", &ctx), "{{ b }}");
}

#[test]
fn adjacent_and_repeated_markers() {
    let ctx = context! { "x" => "1", "y" => "2" };
    assert_eq!(render("{{x}}{{y}}{{x}}", &ctx), "121");
}

#[test]
fn unicode_text_around_markers() {
    let ctx = context! { "name" => "Zoë" };
    assert_eq!(render("¡Hola, {{ name }}! ✓", &ctx), "¡Hola, Zoë! ✓");
}

#[test]
fn unresolved_variable_warns_with_suggestion() {
    let ctx = context! { "user" => context! { "name" => "Ada" } };
    let rendered = render_with_warnings("{{ user.nmae }}", &ctx);
    assert_eq!(rendered.output, "{{ user.nmae }}");
    assert_eq!(
        rendered.warnings,
        vec![RenderWarning::UnresolvedVariable {
            path: "user.nmae".into(),
            suggestion: Some("user.name".into()),
        }]
    );
    assert_eq!(
        rendered.warnings[0].to_string(),
        "unresolved variable 'user.nmae', did you mean 'user.name'?"
    );
}

#[test]
fn unresolved_variable_without_close_key_has_no_suggestion() {
    let ctx = context! { "user" => context! { "name" => "Ada" } };
    let rendered = render_with_warnings("{{ account.id }}", &ctx);
    assert_eq!(
        rendered.warnings,
        vec![RenderWarning::UnresolvedVariable {
            path: "account.id".into(),
            suggestion: None,
        }]
    );
}

#[test]
fn non_text_variable_warns() {
    let ctx = context! { "tags" => vec!["a"] };
    let rendered = render_with_warnings("{{ tags }}", &ctx);
    assert_eq!(
        rendered.warnings,
        vec![RenderWarning::NotText {
            path: "tags".into(),
            found: "list",
        }]
    );
}

#[test]
fn repeated_warnings_are_deduplicated() {
    let ctx = context! {};
    let rendered = render_with_warnings("{{ a }}{{ a }}{{ a }}", &ctx);
    assert_eq!(rendered.warnings.len(), 1);
}

#[test]
fn loop_tokens_outside_for_are_reported() {
    let rendered = render_with_warnings("{{ item }} and {{ index }}", &context! {});
    assert_eq!(rendered.output, "{{ item }} and {{ index }}");
    assert_eq!(
        rendered.warnings,
        vec![
            RenderWarning::UnresolvedVariable {
                path: "item".into(),
                suggestion: None,
            },
            RenderWarning::UnresolvedVariable {
                path: "index".into(),
                suggestion: None,
            },
        ]
    );
}
