//! Per-render state shared by every fragment.

use std::collections::BTreeMap;

use gqldoc_markdown::{MarkupConverter, Minifier, escape_html, format_description};
use gqldoc_shared::{RenderConfig, Result, Schema, TypeRef};

use crate::anchors::{AnchorNamespace, AnchorRegistry};
use crate::classify::Classified;

/// Everything a fragment needs to render: built once per document and
/// passed down by reference.
pub struct RenderContext<'a> {
    pub schema: &'a Schema,
    pub anchors: &'a AnchorRegistry,
    pub config: &'a RenderConfig,
    /// Interface name → names of the objects implementing it, sorted.
    implementers: BTreeMap<&'a str, Vec<&'a str>>,
    converter: &'a dyn MarkupConverter,
    minifier: &'a dyn Minifier,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        schema: &'a Schema,
        groups: &Classified<'a>,
        anchors: &'a AnchorRegistry,
        config: &'a RenderConfig,
        converter: &'a dyn MarkupConverter,
        minifier: &'a dyn Minifier,
    ) -> Self {
        Self {
            schema,
            anchors,
            config,
            implementers: implementer_index(groups),
            converter,
            minifier,
        }
    }

    /// Objects implementing `interface`, in name order.
    pub fn implementers_of(&self, interface: &str) -> &[&'a str] {
        self.implementers
            .get(interface)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// HTML for a declared type, linked when its named type is documented.
    pub fn type_link(&self, ty: &TypeRef) -> String {
        let code = format!("<code>{}</code>", escape_html(&ty.display));
        match self.anchors.get(AnchorNamespace::Type, &ty.base) {
            Some(anchor) => format!(r#"<a href="{anchor}">{code}</a>"#),
            None => code,
        }
    }

    /// Markdown link to a documented entity, or plain code text.
    pub fn entity_link(&self, name: &str) -> String {
        let code = format!("<code>{}</code>", escape_html(name));
        match self.anchors.get(AnchorNamespace::Type, name) {
            Some(anchor) => format!("[{code}]({anchor})"),
            None => code,
        }
    }

    /// Convert a description to inline text wrapped to `width` columns.
    pub fn description(&self, text: &str, width: usize) -> Result<String> {
        format_description(self.converter, text, width)
    }

    pub fn minify(&self, fragment: &str) -> Result<String> {
        self.minifier.minify(fragment)
    }
}

/// Reverse of every classified object's implements list.
fn implementer_index<'a>(groups: &Classified<'a>) -> BTreeMap<&'a str, Vec<&'a str>> {
    let mut index: BTreeMap<&'a str, Vec<&'a str>> = BTreeMap::new();
    for &object in &groups.objects {
        for interface in &object.implements {
            index
                .entry(interface.as_str())
                .or_default()
                .push(object.name.as_str());
        }
    }
    for names in index.values_mut() {
        names.sort_unstable();
        names.dedup();
    }
    index
}
