//! TOC (Table of Contents) builder.
//!
//! Mirrors the document layout: one entry per non-empty section, with root
//! fields or entities as children in the order they are rendered. Anchors
//! come from the registry, so TOC links and headings always agree.

use tracing::{debug, instrument};

use gqldoc_shared::{Result, Toc, TocEntry};

use crate::anchors::{AnchorNamespace, AnchorRegistry, Section};
use crate::classify::Classified;

/// Build the TOC for a classified schema.
///
/// Every name must already be registered in `anchors`; a missing one is an
/// `AnchorNotFound` error.
#[instrument(skip_all)]
pub fn build_toc(groups: &Classified<'_>, anchors: &AnchorRegistry) -> Result<Toc> {
    let mut sections = Vec::new();

    for root in groups.roots() {
        let children = root
            .fields
            .iter()
            .map(|f| Ok(entry(&f.name, anchors.root_field(root.kind, &f.name)?)))
            .collect::<Result<Vec<_>>>()?;
        sections.push(section_entry(anchors, Section::for_root(root.kind), children)?);
    }

    let kinds: [(Section, Vec<&str>); 6] = [
        (Section::Objects, groups.objects.iter().map(|d| d.name.as_str()).collect()),
        (Section::Interfaces, groups.interfaces.iter().map(|d| d.name.as_str()).collect()),
        (Section::Enums, groups.enums.iter().map(|d| d.name.as_str()).collect()),
        (Section::Unions, groups.unions.iter().map(|d| d.name.as_str()).collect()),
        (Section::InputObjects, groups.inputs.iter().map(|d| d.name.as_str()).collect()),
        (Section::Scalars, groups.scalars.iter().map(|d| d.name.as_str()).collect()),
    ];

    for (section, names) in kinds {
        if names.is_empty() {
            continue;
        }
        let children = names
            .into_iter()
            .map(|name| Ok(entry(name, anchors.lookup(AnchorNamespace::Type, name)?)))
            .collect::<Result<Vec<_>>>()?;
        sections.push(section_entry(anchors, section, children)?);
    }

    debug!(sections = sections.len(), "TOC built");
    Ok(Toc { sections })
}

/// Render a TOC as a nested Markdown list.
pub fn render_toc(toc: &Toc) -> String {
    let mut out = String::new();
    for entry in &toc.sections {
        push_entry(&mut out, entry, 0);
    }
    out
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn section_entry(
    anchors: &AnchorRegistry,
    section: Section,
    children: Vec<TocEntry>,
) -> Result<TocEntry> {
    let anchor = anchors.lookup(AnchorNamespace::Section, section.title())?;
    Ok(TocEntry {
        children,
        ..entry(section.title(), anchor)
    })
}

fn entry(title: &str, anchor: &str) -> TocEntry {
    TocEntry {
        title: title.to_string(),
        anchor: anchor.to_string(),
        children: vec![],
    }
}

fn push_entry(out: &mut String, entry: &TocEntry, depth: usize) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(&format!("* [{}]({})\n", entry.title, entry.anchor));
    for child in &entry.children {
        push_entry(out, child, depth + 1);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchors::build_registry;
    use crate::classify::classify;
    use crate::testing::*;
    use gqldoc_shared::GqlDocError;

    #[test]
    fn toc_follows_render_order() {
        let schema = schema_of(vec![
            object("Query", &[("widgets", "[Widget]"), ("status", "Status")]),
            interface("Named", &[("name", "String")]),
            implementing("Widget", &["Named"], &[("name", "String")]),
            enumeration("Status", &["ACTIVE"]),
        ]);
        let groups = classify(&schema);
        let anchors = build_registry(&groups);
        let toc = build_toc(&groups, &anchors).unwrap();

        let titles: Vec<_> = toc.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Queries", "Objects", "Interfaces", "Enums"]);

        let queries: Vec<_> = toc.sections[0]
            .children
            .iter()
            .map(|c| (c.title.as_str(), c.anchor.as_str()))
            .collect();
        assert_eq!(queries, [("status", "#status"), ("widgets", "#widgets")]);

        assert_eq!(toc.sections[3].children[0].anchor, "#status");
    }

    #[test]
    fn render_nests_children() {
        let toc = Toc {
            sections: vec![TocEntry {
                title: "Objects".into(),
                anchor: "#objects".into(),
                children: vec![TocEntry {
                    title: "Widget".into(),
                    anchor: "#widget".into(),
                    children: vec![],
                }],
            }],
        };
        assert_eq!(render_toc(&toc), "* [Objects](#objects)\n  * [Widget](#widget)\n");
    }

    #[test]
    fn empty_schema_has_empty_toc() {
        let schema = schema_of(vec![]);
        let groups = classify(&schema);
        let anchors = build_registry(&groups);
        let toc = build_toc(&groups, &anchors).unwrap();
        assert!(toc.sections.is_empty());
        assert_eq!(render_toc(&toc), "");
    }

    #[test]
    fn unregistered_name_is_an_error() {
        let schema = schema_of(vec![object("Widget", &[("id", "ID")])]);
        let groups = classify(&schema);
        let err = build_toc(&groups, &AnchorRegistry::new()).unwrap_err();
        assert!(matches!(err, GqlDocError::AnchorNotFound { .. }));
    }

    #[test]
    fn shared_root_field_names_keep_distinct_anchors() {
        let schema = schema_of(vec![
            object("Query", &[("widget", "Int")]),
            object("Subscription", &[("widget", "Int")]),
        ]);
        let groups = classify(&schema);
        let anchors = build_registry(&groups);
        let toc = build_toc(&groups, &anchors).unwrap();

        assert_eq!(toc.sections[0].children[0].anchor, "#widget");
        assert_eq!(toc.sections[1].title, "Subscriptions");
        assert_eq!(toc.sections[1].children[0].anchor, "#widget-1");
    }
}
