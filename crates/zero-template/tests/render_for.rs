//! Integration tests for `{{#for}}` expansion.

use zero_template::parser::BlockKind;
use zero_template::{RenderWarning, Value, context, render, render_with_warnings};

// =============================================================================
// Numeric ranges
// =============================================================================

#[test]
fn range_substitutes_index() {
    let out = render("{{#for 1...3}}n{{ index }} {{#end_for}}", &context! {});
    assert_eq!(out, "n1 n2 n3 ");
}

#[test]
fn range_is_inclusive_for_all_small_bounds() {
    for a in -3..=3_i64 {
        for b in a..=a + 4 {
            let template = format!("{{{{#for {a}...{b}}}}}{{{{ index }}}};{{{{#end_for}}}}");
            let expected: String = (a..=b).map(|i| format!("{i};")).collect();
            assert_eq!(render(&template, &context! {}), expected, "{a}...{b}");
        }
    }
}

#[test]
fn descending_range_is_empty() {
    assert_eq!(
        render("[{{#for 5...1}}{{ index }}{{#end_for}}]", &context! {}),
        "[]"
    );
}

#[test]
fn single_element_range() {
    assert_eq!(
        render("{{#for 7...7}}{{ index }}{{#end_for}}", &context! {}),
        "7"
    );
}

#[test]
fn range_touches_only_index_token() {
    let ctx = context! { "name" => "Ada" };
    // `{{ name }}` survives the for pass and is resolved by the variable pass;
    // `{{index}}` without spaces is not the literal token.
    let out = render("{{#for 1...2}}{{ index }}{{index}}{{ name }},{{#end_for}}", &ctx);
    assert_eq!(out, "1{{index}}Ada,2{{index}}Ada,");
}

#[test]
fn range_target_is_trimmed() {
    assert_eq!(
        render("{{#for  0...1 }}{{ index }}{{#end_for}}", &context! {}),
        "01"
    );
}

// =============================================================================
// Lists of scalars
// =============================================================================

#[test]
fn list_substitutes_item() {
    let ctx = context! { "tags" => vec!["rust", "templates"] };
    let out = render("{{#for tags}}#{{ item }} {{#end_for}}", &ctx);
    assert_eq!(out, "#rust #templates ");
}

#[test]
fn list_skips_non_text_items() {
    let ctx = context! {
        "mixed" => vec![
            Value::from("a"),
            context! { "x" => "y" },
            Value::from(vec!["nested"]),
            Value::from("b"),
        ],
    };
    let rendered = render_with_warnings("{{#for mixed}}{{ item }}{{#end_for}}", &ctx);
    assert_eq!(rendered.output, "ab");
    assert_eq!(
        rendered.warnings,
        vec![
            RenderWarning::SkippedItem {
                target: "mixed".into(),
                index: 1,
                found: "record",
            },
            RenderWarning::SkippedItem {
                target: "mixed".into(),
                index: 2,
                found: "list",
            },
        ]
    );
}

#[test]
fn nested_list_path() {
    let ctx = context! { "post" => context! { "tags" => vec!["a", "b"] } };
    assert_eq!(
        render("{{#for post.tags}}{{ item }}{{#end_for}}", &ctx),
        "ab"
    );
}

#[test]
fn missing_or_non_list_target_renders_nothing() {
    let ctx = context! { "name" => "Ada" };
    let rendered = render_with_warnings(
        "[{{#for nope}}x{{#end_for}}][{{#for name}}x{{#end_for}}]",
        &ctx,
    );
    assert_eq!(rendered.output, "[][]");
    assert_eq!(
        rendered.warnings,
        vec![
            RenderWarning::NotAList {
                block: BlockKind::For,
                target: "nope".into(),
                found: "missing",
            },
            RenderWarning::NotAList {
                block: BlockKind::For,
                target: "name".into(),
                found: "text",
            },
        ]
    );
}

#[test]
fn malformed_range_falls_back_to_path() {
    // The target is looked up as the path `1` → `x`; empty segments vanish.
    let ctx = context! { "1" => context! { "x" => vec!["p"] } };
    assert_eq!(
        render("{{#for 1...x}}{{ item }}{{#end_for}}", &ctx),
        "p"
    );
}

#[test]
fn item_text_reaches_variable_pass() {
    let ctx = context! { "list" => vec!["{{ index }}"], "index" => "root" };
    // The item text lands in the output before the variable pass, so a
    // marker inside it is resolved against the root.
    assert_eq!(
        render("{{#for list}}{{ item }}{{#end_for}}", &ctx),
        "root"
    );
}

// =============================================================================
// Diagnostics
// =============================================================================

#[test]
fn loop_tokens_consumed_by_for_are_not_reported() {
    let ctx = context! { "tags" => vec!["a", "b"] };
    let rendered = render_with_warnings(
        "{{#for tags}}{{ item }}{{#end_for}}{{#for 1...2}}{{ index }}{{#end_for}}",
        &ctx,
    );
    assert_eq!(rendered.output, "ab12");
    assert!(rendered.warnings.is_empty(), "{:?}", rendered.warnings);
}

#[test]
fn nested_for_ends_at_first_closer_and_warns() {
    let rendered = render_with_warnings(
        "{{#for 1...2}}{{ index }}{{#for tags}}{{#end_for}}!{{#end_for}}",
        &context! {},
    );
    assert_eq!(rendered.output, "1{{#for tags}}2{{#for tags}}!{{#end_for}}");
    assert_eq!(
        rendered.warnings,
        vec![RenderWarning::NestedBlock {
            block: BlockKind::For,
            target: "1...2".into(),
        }]
    );
}

#[test]
fn unterminated_for_is_left_verbatim() {
    let ctx = context! { "tags" => vec!["x"] };
    let rendered = render_with_warnings("a{{#for tags}}{{ item }}", &ctx);
    assert_eq!(rendered.output, "a{{#for tags}}{{ item }}");
    assert!(rendered.warnings.contains(&RenderWarning::UnterminatedBlock {
        block: BlockKind::For,
        offset: 1,
    }));
}

#[test]
fn unterminated_for_offset_points_into_the_written_template() {
    let ctx = context! { "items" => vec![context! { "x" => "long-value" }] };
    let template = "{{#each items}}{{ x }}{{#end_each}}{{#for 1...2}}";
    let rendered = render_with_warnings(template, &ctx);
    assert_eq!(rendered.output, "long-value{{#for 1...2}}");
    assert_eq!(
        rendered.warnings,
        vec![RenderWarning::UnterminatedBlock {
            block: BlockKind::For,
            offset: 35,
        }]
    );
    assert!(template[35..].starts_with("{{#for "));
}
