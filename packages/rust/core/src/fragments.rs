//! Document fragments.
//!
//! One function per entity kind plus the shared `arguments_table` and
//! `metadata_table` sub-fragments. Every fragment is a plain function over
//! [`RenderContext`]; nesting is bounded (entity → field → arguments), so
//! fragments call each other directly.
//!
//! Tables are emitted as indented HTML and minified where they are inserted
//! into block-level Markdown. Prose (headings, descriptions, lists) is left
//! as written.

use gqldoc_markdown::{escape_html, indent};
use gqldoc_shared::{
    Argument, Directive, EnumDef, Field, InputDef, InterfaceDef, ObjectDef, Result, ScalarDef,
    UnionDef,
};

use crate::anchors::AnchorNamespace;
use crate::classify::{RootKind, is_documentable};
use crate::context::RenderContext;

// ---------------------------------------------------------------------------
// Entity fragments
// ---------------------------------------------------------------------------

pub fn object_fragment(ctx: &RenderContext<'_>, def: &ObjectDef) -> Result<String> {
    let mut out = entity_header(ctx, &def.name)?;
    push_description(&mut out, ctx, &def.description)?;
    push_metadata(&mut out, ctx, &def.directives)?;
    push_link_list(&mut out, ctx, "Implements", def.implements.iter().map(String::as_str));
    push_fields(&mut out, ctx, "Fields", &def.fields)?;
    Ok(out)
}

pub fn interface_fragment(ctx: &RenderContext<'_>, def: &InterfaceDef) -> Result<String> {
    let mut out = entity_header(ctx, &def.name)?;
    push_description(&mut out, ctx, &def.description)?;
    push_metadata(&mut out, ctx, &def.directives)?;
    push_link_list(&mut out, ctx, "Implements", def.implements.iter().map(String::as_str));
    push_link_list(
        &mut out,
        ctx,
        "Implemented by",
        ctx.implementers_of(&def.name).iter().copied(),
    );
    push_fields(&mut out, ctx, "Fields", &def.fields)?;
    Ok(out)
}

pub fn union_fragment(ctx: &RenderContext<'_>, def: &UnionDef) -> Result<String> {
    let mut out = entity_header(ctx, &def.name)?;
    push_description(&mut out, ctx, &def.description)?;
    push_metadata(&mut out, ctx, &def.directives)?;
    push_link_list(&mut out, ctx, "Possible types", def.members.iter().map(String::as_str));
    Ok(out)
}

/// Values are rendered in declaration order.
pub fn enum_fragment(ctx: &RenderContext<'_>, def: &EnumDef) -> Result<String> {
    let mut out = entity_header(ctx, &def.name)?;
    push_description(&mut out, ctx, &def.description)?;
    push_metadata(&mut out, ctx, &def.directives)?;

    if def.values.is_empty() {
        return Ok(out);
    }

    out.push_str("#### Values\n\n");
    for value in &def.values {
        let mut label = format!("* **{}**", value.name);
        let mut label_width = value.name.chars().count() + 6;
        for directive in &value.directives {
            let signature = directive_signature(directive);
            label_width += signature.chars().count() + 1;
            label.push_str(&format!(" <code>{}</code>", escape_html(&signature)));
        }

        let width = width_after_label(ctx.config.widths.enum_value, label_width + 2);
        let description = ctx.description(&value.description, width)?;
        if description.is_empty() {
            out.push_str(&format!("{label}\n"));
        } else {
            out.push_str(&format!("{label}: {description}\n"));
        }
    }
    out.push('\n');
    Ok(out)
}

pub fn input_fragment(ctx: &RenderContext<'_>, def: &InputDef) -> Result<String> {
    let mut out = entity_header(ctx, &def.name)?;
    push_description(&mut out, ctx, &def.description)?;
    push_metadata(&mut out, ctx, &def.directives)?;

    let fields: Vec<&Argument> = def
        .fields
        .iter()
        .filter(|field| is_documentable(&field.name, &ctx.schema.roots))
        .collect();
    if !fields.is_empty() {
        out.push_str("#### Input fields\n\n");
        push_table(&mut out, ctx, &input_fields_table(ctx, &fields)?)?;
    }
    Ok(out)
}

pub fn scalar_fragment(ctx: &RenderContext<'_>, def: &ScalarDef) -> Result<String> {
    let mut out = entity_header(ctx, &def.name)?;
    push_description(&mut out, ctx, &def.description)?;
    push_metadata(&mut out, ctx, &def.directives)?;
    Ok(out)
}

/// A single query, mutation or subscription field.
///
/// Queries and subscriptions list their arguments in a table. Mutations
/// list their inputs and the fields of the returned type, when that type is
/// in the schema and has fields.
pub fn root_field_fragment(
    ctx: &RenderContext<'_>,
    kind: RootKind,
    field: &Field,
) -> Result<String> {
    let anchor = ctx.anchors.root_field(kind, &field.name)?;
    let mut out = format!("### [{}]({anchor})\n\n", field.name);
    push_description(&mut out, ctx, &field.description)?;
    out.push_str(&format!("**Type:** {}\n\n", ctx.type_link(&field.ty)));
    push_metadata(&mut out, ctx, &field.directives)?;

    match kind {
        RootKind::Query | RootKind::Subscription => {
            if !field.arguments.is_empty() {
                push_table(&mut out, ctx, &arguments_table(ctx, &field.arguments)?)?;
            }
        }
        RootKind::Mutation => {
            push_input_list(&mut out, ctx, &field.arguments)?;
            if let Some(fields) = ctx.schema.get(&field.ty.base).and_then(|e| e.fields()) {
                push_fields(&mut out, ctx, "Return fields", fields)?;
            }
        }
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Shared sub-fragments
// ---------------------------------------------------------------------------

/// Single-column table describing a field's arguments.
pub fn arguments_table(ctx: &RenderContext<'_>, arguments: &[Argument]) -> Result<String> {
    let mut rows = String::new();
    for argument in arguments {
        let mut lines = vec![format!(
            "<strong>{}</strong> ({})",
            argument.name,
            ctx.type_link(&argument.ty)
        )];

        let description = ctx.description(
            &argument.description,
            ctx.config.widths.argument_description,
        )?;
        if !description.is_empty() {
            lines.push("<br>".into());
            lines.push(indent(4, &description));
        }
        if let Some(default) = &argument.default_value {
            lines.push("<br>".into());
            lines.push(format!("Default: <code>{}</code>", escape_html(default)));
        }
        if !argument.directives.is_empty() {
            lines.push(indent(4, &metadata_table(&argument.directives)));
        }

        rows.push_str(&format!(
            "\t\t<tr>\n\t\t\t<td>\n\t\t\t\t{}\n\t\t\t</td>\n\t\t</tr>\n",
            lines.join("\n\t\t\t\t")
        ));
    }
    Ok(html_table(&["Arguments"], &rows))
}

/// Table of directives applied to a definition.
pub fn metadata_table(directives: &[Directive]) -> String {
    let mut rows = String::new();
    for directive in directives {
        let arguments = directive
            .arguments
            .iter()
            .map(|(name, value)| format!("<code>{}</code>", escape_html(&format!("{name}: {value}"))))
            .collect::<Vec<_>>()
            .join("<br>");
        rows.push_str(&format!(
            "\t\t<tr>\n\t\t\t<td><code>@{}</code></td>\n\t\t\t<td>{arguments}</td>\n\t\t</tr>\n",
            directive.name
        ));
    }
    html_table(&["Directive", "Arguments"], &rows)
}

/// Name/description table for output fields, with nested metadata and
/// arguments tables in the description cell.
pub fn fields_table(ctx: &RenderContext<'_>, fields: &[&Field]) -> Result<String> {
    let mut rows = String::new();
    for field in fields {
        let mut cell = ctx.description(&field.description, ctx.config.widths.field_description)?;
        if !field.directives.is_empty() {
            cell.push_str("\n\t\t\t");
            cell.push_str(&indent(3, &metadata_table(&field.directives)));
        }
        if !field.arguments.is_empty() {
            cell.push_str("\n\t\t\t");
            cell.push_str(&indent(3, &arguments_table(ctx, &field.arguments)?));
        }
        rows.push_str(&table_row(&field.name, &ctx.type_link(&field.ty), &cell));
    }
    Ok(html_table(&["Name", "Description"], &rows))
}

/// Name/description table for input-object fields. Input fields take no
/// arguments, so there is no arguments column; defaults are shown instead.
pub fn input_fields_table(ctx: &RenderContext<'_>, fields: &[&Argument]) -> Result<String> {
    let mut rows = String::new();
    for field in fields {
        let mut cell = ctx.description(&field.description, ctx.config.widths.field_description)?;
        if let Some(default) = &field.default_value {
            if !cell.is_empty() {
                cell.push_str("<br>\n\t\t\t");
            }
            cell.push_str(&format!("Default: <code>{}</code>", escape_html(default)));
        }
        if !field.directives.is_empty() {
            cell.push_str("\n\t\t\t");
            cell.push_str(&indent(3, &metadata_table(&field.directives)));
        }
        rows.push_str(&table_row(&field.name, &ctx.type_link(&field.ty), &cell));
    }
    Ok(html_table(&["Name", "Description"], &rows))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn entity_header(ctx: &RenderContext<'_>, name: &str) -> Result<String> {
    let anchor = ctx.anchors.lookup(AnchorNamespace::Type, name)?;
    Ok(format!("### [{name}]({anchor})\n\n"))
}

fn push_description(out: &mut String, ctx: &RenderContext<'_>, text: &str) -> Result<()> {
    let description = ctx.description(text, ctx.config.widths.description)?;
    if !description.is_empty() {
        out.push_str(&description);
        out.push_str("\n\n");
    }
    Ok(())
}

fn push_metadata(out: &mut String, ctx: &RenderContext<'_>, directives: &[Directive]) -> Result<()> {
    if directives.is_empty() {
        return Ok(());
    }
    push_table(out, ctx, &metadata_table(directives))
}

/// Insert a table into block-level Markdown, minified.
fn push_table(out: &mut String, ctx: &RenderContext<'_>, table: &str) -> Result<()> {
    out.push_str(&ctx.minify(table)?);
    out.push_str("\n\n");
    Ok(())
}

fn push_fields(
    out: &mut String,
    ctx: &RenderContext<'_>,
    heading: &str,
    fields: &[Field],
) -> Result<()> {
    let fields: Vec<&Field> = fields
        .iter()
        .filter(|field| is_documentable(&field.name, &ctx.schema.roots))
        .collect();
    if fields.is_empty() {
        return Ok(());
    }
    out.push_str(&format!("#### {heading}\n\n"));
    push_table(out, ctx, &fields_table(ctx, &fields)?)
}

fn push_link_list<'n>(
    out: &mut String,
    ctx: &RenderContext<'_>,
    heading: &str,
    names: impl Iterator<Item = &'n str>,
) {
    let items: Vec<String> = names
        .map(|name| format!("* {}\n", ctx.entity_link(name)))
        .collect();
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("#### {heading}\n\n"));
    for item in items {
        out.push_str(&item);
    }
    out.push('\n');
}

/// Mutation inputs as a list: `* name (Type): description`.
fn push_input_list(out: &mut String, ctx: &RenderContext<'_>, arguments: &[Argument]) -> Result<()> {
    if arguments.is_empty() {
        return Ok(());
    }
    out.push_str("#### Input fields\n\n");
    for argument in arguments {
        let label = format!(
            "* <code>{}</code> ({})",
            argument.name,
            ctx.type_link(&argument.ty)
        );
        // "* " + " (" + "): "
        let label_width =
            argument.name.chars().count() + argument.ty.display.chars().count() + 7;
        let width = width_after_label(ctx.config.widths.argument_description, label_width);
        let description = ctx.description(&argument.description, width)?;

        out.push_str(&label);
        if !description.is_empty() {
            out.push_str(": ");
            out.push_str(&description);
        }
        if let Some(default) = &argument.default_value {
            out.push_str(&format!(" Default: <code>{}</code>", escape_html(default)));
        }
        out.push('\n');
    }
    out.push('\n');
    Ok(())
}

/// Width left on a line after a label; 0 keeps wrapping disabled.
fn width_after_label(width: usize, label: usize) -> usize {
    if width == 0 {
        0
    } else {
        width.saturating_sub(label).max(1)
    }
}

/// `@name` or `@name(arg: value, ...)`.
fn directive_signature(directive: &Directive) -> String {
    if directive.arguments.is_empty() {
        return format!("@{}", directive.name);
    }
    let arguments = directive
        .arguments
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("@{}({arguments})", directive.name)
}

fn table_row(name: &str, ty: &str, cell: &str) -> String {
    format!(
        "\t\t<tr>\n\t\t\t<td><strong>{name}</strong> ({ty})</td>\n\t\t\t<td>{cell}</td>\n\t\t</tr>\n"
    )
}

fn html_table(headers: &[&str], rows: &str) -> String {
    let header_cells: String = headers
        .iter()
        .map(|header| format!("\t\t\t<th>{header}</th>\n"))
        .collect();
    format!(
        "<table>\n\t<thead>\n\t\t<tr>\n{header_cells}\t\t</tr>\n\t</thead>\n\t<tbody>\n{rows}\t</tbody>\n</table>"
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
