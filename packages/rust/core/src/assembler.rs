//! Document assembler.
//!
//! Drives classification, anchor registration and fragment composition,
//! then writes the finished Markdown document to a sink.

use std::io::Write;

use tracing::{debug, info, instrument};

use gqldoc_markdown::{CommonMarkConverter, HtmlMinifier, MarkupConverter, Minifier, NoopMinifier};
use gqldoc_shared::{GqlDocError, RenderConfig, Result, Schema};

use crate::anchors::{AnchorNamespace, Section, build_registry};
use crate::classify::classify;
use crate::context::RenderContext;
use crate::fragments::{
    enum_fragment, input_fragment, interface_fragment, object_fragment, root_field_fragment,
    scalar_fragment, union_fragment,
};
use crate::toc::{build_toc, render_toc};

/// Render `schema` as a GitHub-flavoured Markdown document.
///
/// Uses the CommonMark converter, and the HTML minifier unless
/// `config.minify` is off.
pub fn render(schema: &Schema, config: &RenderConfig) -> Result<String> {
    let converter = CommonMarkConverter::default();
    if config.minify {
        render_with(schema, config, &converter, &HtmlMinifier)
    } else {
        render_with(schema, config, &converter, &NoopMinifier)
    }
}

/// Render with an explicit converter and minifier.
#[instrument(skip_all, fields(types = schema.types.len(), title = %config.title))]
pub fn render_with(
    schema: &Schema,
    config: &RenderConfig,
    converter: &dyn MarkupConverter,
    minifier: &dyn Minifier,
) -> Result<String> {
    let groups = classify(schema);
    let anchors = build_registry(&groups);
    let ctx = RenderContext::new(schema, &groups, &anchors, config, converter, minifier);

    let mut out = format!("# {}\n\n", config.title);

    if config.table_of_contents {
        let toc = build_toc(&groups, &anchors)?;
        if !toc.sections.is_empty() {
            out.push_str("## Table of Contents\n\n");
            out.push_str(&render_toc(&toc));
            out.push('\n');
        }
    }

    for root in groups.roots() {
        push_section_header(&mut out, &ctx, Section::for_root(root.kind))?;
        for field in &root.fields {
            out.push_str(&root_field_fragment(&ctx, root.kind, field)?);
        }
    }

    push_section(&mut out, &ctx, Section::Objects, &groups.objects, object_fragment)?;
    push_section(&mut out, &ctx, Section::Interfaces, &groups.interfaces, interface_fragment)?;
    push_section(&mut out, &ctx, Section::Enums, &groups.enums, enum_fragment)?;
    push_section(&mut out, &ctx, Section::Unions, &groups.unions, union_fragment)?;
    push_section(&mut out, &ctx, Section::InputObjects, &groups.inputs, input_fragment)?;
    push_section(&mut out, &ctx, Section::Scalars, &groups.scalars, scalar_fragment)?;

    // Fragments end with a blank line; the document ends with one newline.
    let len = out.trim_end_matches('\n').len();
    out.truncate(len);
    out.push('\n');

    debug!(anchors = anchors.len(), bytes = out.len(), "document rendered");
    Ok(out)
}

/// Render `schema` and write the document to `dst` in one piece.
///
/// Nothing is written if rendering fails.
pub fn format_markdown(dst: &mut dyn Write, schema: &Schema, config: &RenderConfig) -> Result<()> {
    let document = render(schema, config)?;
    dst.write_all(document.as_bytes())
        .and_then(|()| dst.flush())
        .map_err(GqlDocError::Write)?;
    info!(bytes = document.len(), "markdown written");
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn push_section_header(out: &mut String, ctx: &RenderContext<'_>, section: Section) -> Result<()> {
    let anchor = ctx.anchors.lookup(AnchorNamespace::Section, section.title())?;
    out.push_str(&format!("## [{}]({anchor})\n\n", section.title()));
    Ok(())
}

fn push_section<T>(
    out: &mut String,
    ctx: &RenderContext<'_>,
    section: Section,
    items: &[&T],
    fragment: fn(&RenderContext<'_>, &T) -> Result<String>,
) -> Result<()> {
    if items.is_empty() {
        return Ok(());
    }
    push_section_header(out, ctx, section)?;
    for item in items {
        out.push_str(&fragment(ctx, item)?);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use gqldoc_shared::Entity;

    /// Text between `start` and the next second-level heading.
    fn section<'d>(document: &'d str, start: &str) -> &'d str {
        let from = document.find(start).expect("section present");
        let rest = &document[from + start.len()..];
        match rest.find("\n## ") {
            Some(end) => &rest[..end],
            None => rest,
        }
    }

    fn widget_schema() -> Schema {
        schema_of(vec![
            interface("Named", &[("name", "String")]),
            implementing("Widget", &["Named"], &[("id", "ID"), ("name", "String")]),
        ])
    }

    #[test]
    fn widget_implementing_named() {
        let document = render(&widget_schema(), &RenderConfig::default()).unwrap();

        assert!(document.starts_with("# Schema Types\n\n## Table of Contents\n\n"));
        assert!(document.contains("* [Objects](#objects)\n  * [Widget](#widget)\n"));
        assert!(document.contains("* [Interfaces](#interfaces)\n  * [Named](#named)\n"));

        let objects = section(&document, "## [Objects](#objects)");
        assert_eq!(objects.matches("### [").count(), 1);
        assert_eq!(objects.matches("<tr>").count(), 3);
        assert!(objects.contains("<td><strong>id</strong> (<code>ID</code>)</td>"));

        let interfaces = section(&document, "## [Interfaces](#interfaces)");
        assert!(interfaces.contains("#### Implemented by\n\n* [<code>Widget</code>](#widget)"));
    }

    #[test]
    fn enum_and_root_field_share_a_name() {
        let schema = schema_of(vec![
            object("Query", &[("Status", "Status")]),
            enumeration("Status", &["ACTIVE", "RETIRED"]),
        ]);
        let document = render(&schema, &RenderConfig::default()).unwrap();

        assert!(document.contains("### [Status](#status)\n\n**Type:** "));
        assert!(document.contains(r##"<a href="#status"><code>Status</code></a>"##));
        assert!(document.contains("## [Enums](#enums)\n\n### [Status](#status)"));
        assert!(!document.contains("#status-1"));
    }

    #[test]
    fn sections_follow_fixed_order() {
        let schema = schema_of(vec![
            object("Query", &[("widget", "Widget")]),
            object("Mutation", &[("touch", "Boolean")]),
            object("Subscription", &[("ticks", "Int")]),
            object("Widget", &[("id", "ID")]),
            interface("Named", &[("name", "String")]),
            enumeration("Status", &["ACTIVE"]),
            union("Result", &["Widget"]),
            input("WidgetInput", &[("id", "ID")]),
            scalar("DateTime"),
        ]);
        let document = render(&schema, &RenderConfig::default()).unwrap();

        let positions: Vec<usize> = Section::ALL
            .iter()
            .map(|s| {
                document
                    .find(&format!("## [{}]({})", s.title(), s.slug()))
                    .expect("section rendered")
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn empty_groups_are_skipped() {
        let schema = schema_of(vec![
            object("Query", &[("ok", "Boolean")]),
            object("Mutation", &[("__hidden", "Boolean")]),
            scalar("DateTime"),
        ]);
        let document = render(&schema, &RenderConfig::default()).unwrap();

        assert!(document.contains("## [Queries](#queries)"));
        assert!(document.contains("## [Scalars](#scalars)"));
        for absent in ["Mutations", "Subscriptions", "Objects", "Interfaces", "Enums", "Unions", "Input Objects"] {
            assert!(!document.contains(&format!("[{absent}]")), "{absent} rendered");
        }
    }

    #[test]
    fn reserved_names_never_rendered() {
        let schema = schema_of(vec![
            object("Query", &[("__schema", "__Schema"), ("ok", "Boolean")]),
            object("__Schema", &[("types", "[__Type]")]),
            object("_Service", &[("sdl", "String")]),
        ]);
        let document = render(&schema, &RenderConfig::default()).unwrap();
        assert!(!document.contains("__schema"));
        assert!(!document.contains("_Service"));
        assert!(!document.contains("## [Objects]"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let schema = schema_of(vec![
            object("Query", &[("b", "Int"), ("a", "Widget")]),
            implementing("Widget", &["Named", "Node"], &[("id", "ID")]),
            implementing("Gadget", &["Named"], &[("id", "ID")]),
            interface("Named", &[("name", "String")]),
            interface("Node", &[("id", "ID!")]),
        ]);
        let config = RenderConfig::default();
        assert_eq!(render(&schema, &config).unwrap(), render(&schema, &config).unwrap());
    }

    #[test]
    fn toc_and_minify_can_be_disabled() {
        let config = RenderConfig {
            table_of_contents: false,
            minify: false,
            title: "API".into(),
            ..Default::default()
        };
        let document = render(&widget_schema(), &config).unwrap();

        assert!(document.starts_with("# API\n\n## [Objects](#objects)"));
        assert!(!document.contains("Table of Contents"));
        assert!(document.contains("<table>\n\t<thead>"));

        let minified = render(&widget_schema(), &RenderConfig::default()).unwrap();
        assert!(minified.contains("<table><thead><tr><th>Name</th>"));
    }

    #[test]
    fn empty_schema_is_just_a_title() {
        let document = render(&Schema::default(), &RenderConfig::default()).unwrap();
        assert_eq!(document, "# Schema Types\n");
    }

    #[test]
    fn mutation_with_unknown_return_type_degrades() {
        let schema = schema_of(vec![object("Mutation", &[("createThing", "Thing")])]);
        let document = render(&schema, &RenderConfig::default()).unwrap();
        assert!(document.contains("**Type:** <code>Thing</code>"));
        assert!(!document.contains("Return fields"));
    }

    #[test]
    fn markup_errors_abort_the_render() {
        struct Broken;
        impl MarkupConverter for Broken {
            fn to_inline(&self, markup: &str) -> Result<String> {
                Err(GqlDocError::markup(format!("cannot convert {markup:?}")))
            }
        }

        let mut schema = widget_schema();
        if let Some(Entity::Object(widget)) = schema.types.get_mut("Widget") {
            widget.description = "A *widget*.".into();
        }
        let err = render_with(&schema, &RenderConfig::default(), &Broken, &NoopMinifier).unwrap_err();
        assert!(matches!(err, GqlDocError::Markup(_)));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_errors_are_write_errors() {
        let err = format_markdown(&mut FailingWriter, &widget_schema(), &RenderConfig::default())
            .unwrap_err();
        assert!(matches!(err, GqlDocError::Write(_)));
    }

    #[test]
    fn format_markdown_writes_whole_document() {
        let schema = widget_schema();
        let config = RenderConfig::default();
        let mut sink = Vec::new();
        format_markdown(&mut sink, &schema, &config).unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), render(&schema, &config).unwrap());
    }

    #[test]
    fn same_field_under_two_roots_gets_two_anchors() {
        let schema = schema_of(vec![
            object("Query", &[("widget", "Int")]),
            object("Subscription", &[("widget", "Int")]),
        ]);
        let document = render(&schema, &RenderConfig::default()).unwrap();

        assert_eq!(document.matches("### [widget](#widget)\n").count(), 1);
        assert_eq!(document.matches("### [widget](#widget-1)\n").count(), 1);
        assert_eq!(document.matches("* [widget](#widget)\n").count(), 1);
        assert_eq!(document.matches("* [widget](#widget-1)\n").count(), 1);
    }

    #[test]
    fn wrapped_cells_keep_spaces_between_inline_elements() {
        let words = [
            "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota",
            "kappa", "lambda",
        ];
        let description = words.map(|w| format!("`{w}`")).join(" ");
        for padding in 0..20 {
            let mut widget = object_def("Widget", &[]);
            let mut id = field(&format!("id{}", "x".repeat(padding)), "ID");
            id.description = format!("{} {description}", "p".repeat(padding));
            widget.fields.push(id);
            let schema = schema_of(vec![Entity::Object(widget)]);

            let document = render(&schema, &RenderConfig::default()).unwrap();
            assert!(!document.contains("</code><code>"), "glued at padding {padding}");
            for pair in words.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                assert!(
                    document.contains(&format!("<code>{a}</code> <code>{b}</code>"))
                        || document.contains(&format!("<code>{a}</code>\n<code>{b}</code>"))
                        || document.contains(&format!("<code>{a}</code> \n<code>{b}</code>"))
                        || document.contains(&format!("<code>{a}</code>\n <code>{b}</code>")),
                    "{a} and {b} not separated at padding {padding}"
                );
            }
        }
    }

    #[test]
    fn wrapped_prose_never_opens_a_list() {
        let words = "word ".repeat(14);
        for gap in 0..12 {
            let mut widget = object_def("Widget", &[("id", "ID")]);
            widget.description = format!("{words}{} - ten items", "w".repeat(gap));
            let schema = schema_of(vec![Entity::Object(widget)]);

            let document = render(&schema, &RenderConfig::default()).unwrap();
            let objects = section(&document, "## [Objects](#objects)");
            for line in objects.lines() {
                let trimmed = line.trim_start();
                assert!(
                    !(trimmed.starts_with("- ") || trimmed == "-"),
                    "line {line:?} starts a list at gap {gap}"
                );
            }
        }
    }
}
