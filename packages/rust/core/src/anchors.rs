//! Anchor registry: stable, collision-safe in-document link targets.
//!
//! Anchors follow the usual heading-slug convention: the first use of a key
//! is unsuffixed, later uses get `-1`, `-2`, ... Because the suffix depends
//! on insertion order, [`build_registry`] registers in exactly the order the
//! document is rendered.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, instrument};

use gqldoc_shared::{GqlDocError, Result};

use crate::classify::{Classified, RootKind};

/// Partition of the anchor keyspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorNamespace {
    /// Named entities (objects, interfaces, enums, ...).
    Type,
    /// Root fields (queries, mutations, subscriptions).
    Field,
    /// Top-level document sections.
    Section,
}

impl fmt::Display for AnchorNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Type => "type",
            Self::Field => "field",
            Self::Section => "section",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Top-level document sections, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Queries,
    Mutations,
    Subscriptions,
    Objects,
    Interfaces,
    Enums,
    Unions,
    InputObjects,
    Scalars,
}

impl Section {
    pub const ALL: [Section; 9] = [
        Self::Queries,
        Self::Mutations,
        Self::Subscriptions,
        Self::Objects,
        Self::Interfaces,
        Self::Enums,
        Self::Unions,
        Self::InputObjects,
        Self::Scalars,
    ];

    /// Heading text.
    pub fn title(self) -> &'static str {
        match self {
            Self::Queries => "Queries",
            Self::Mutations => "Mutations",
            Self::Subscriptions => "Subscriptions",
            Self::Objects => "Objects",
            Self::Interfaces => "Interfaces",
            Self::Enums => "Enums",
            Self::Unions => "Unions",
            Self::InputObjects => "Input Objects",
            Self::Scalars => "Scalars",
        }
    }

    /// Fixed anchor for the section heading.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Queries => "#queries",
            Self::Mutations => "#mutations",
            Self::Subscriptions => "#subscriptions",
            Self::Objects => "#objects",
            Self::Interfaces => "#interfaces",
            Self::Enums => "#enums",
            Self::Unions => "#unions",
            Self::InputObjects => "#input-objects",
            Self::Scalars => "#scalars",
        }
    }

    pub fn for_root(kind: RootKind) -> Self {
        match kind {
            RootKind::Query => Self::Queries,
            RootKind::Mutation => Self::Mutations,
            RootKind::Subscription => Self::Subscriptions,
        }
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Maps `(namespace, name)` to an anchor such as `#widget` or `#widget-1`.
#[derive(Debug, Default)]
pub struct AnchorRegistry {
    /// Registrations seen so far per normalized key.
    counters: HashMap<(AnchorNamespace, String), usize>,
    /// First anchor assigned to each literal name.
    anchors: HashMap<(AnchorNamespace, String), String>,
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign an anchor to `name` and return it.
    ///
    /// `explicit` replaces the synthesized `#normalized-name` base. A name
    /// already registered in `namespace` keeps its first anchor for lookups;
    /// the new, suffixed anchor is only returned.
    pub fn register(
        &mut self,
        namespace: AnchorNamespace,
        name: &str,
        explicit: Option<&str>,
    ) -> String {
        let anchor = self.assign(namespace, name, explicit);
        self.anchors
            .entry((namespace, name.to_string()))
            .or_insert_with(|| anchor.clone());
        anchor
    }

    /// Assign an anchor to a field of a root type.
    ///
    /// All roots share the `Field` counters, so the same field name under
    /// two roots gets `#name` and `#name-1`; each stays reachable through
    /// [`root_field`](Self::root_field).
    pub fn register_root_field(&mut self, root: RootKind, name: &str) -> String {
        let anchor = self.assign(AnchorNamespace::Field, name, None);
        self.anchors
            .entry((AnchorNamespace::Field, root_field_key(root, name)))
            .or_insert_with(|| anchor.clone());
        anchor
    }

    /// Anchor of a registered root field.
    pub fn root_field(&self, root: RootKind, name: &str) -> Result<&str> {
        self.lookup(AnchorNamespace::Field, &root_field_key(root, name))
    }

    fn assign(&mut self, namespace: AnchorNamespace, name: &str, explicit: Option<&str>) -> String {
        let key = normalize(name);
        let base = match explicit {
            Some(anchor) => anchor.to_string(),
            None => format!("#{key}"),
        };

        let count = self.counters.entry((namespace, key)).or_insert(0);
        let anchor = if *count > 0 {
            format!("{base}-{count}")
        } else {
            base
        };
        *count += 1;
        anchor
    }

    /// Anchor for a name that must have been registered.
    pub fn lookup(&self, namespace: AnchorNamespace, name: &str) -> Result<&str> {
        self.get(namespace, name)
            .ok_or_else(|| GqlDocError::AnchorNotFound {
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }

    /// Anchor for a name, if registered.
    pub fn get(&self, namespace: AnchorNamespace, name: &str) -> Option<&str> {
        self.anchors
            .get(&(namespace, name.to_string()))
            .map(String::as_str)
    }

    /// Number of distinct `(namespace, name)` pairs registered.
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

/// `Query.widget`
fn root_field_key(root: RootKind, name: &str) -> String {
    format!("{root:?}.{name}")
}

/// Lower-case and replace spaces with hyphens.
fn normalize(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Register every section, root field and entity in render order.
///
/// Empty groups register nothing, so their headings never take a slug.
#[instrument(skip_all)]
pub fn build_registry(groups: &Classified<'_>) -> AnchorRegistry {
    let mut registry = AnchorRegistry::new();

    for root in groups.roots() {
        let section = Section::for_root(root.kind);
        registry.register(AnchorNamespace::Section, section.title(), Some(section.slug()));
        for field in &root.fields {
            registry.register_root_field(root.kind, &field.name);
        }
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
        registry.register(AnchorNamespace::Section, section.title(), Some(section.slug()));
        for name in names {
            registry.register(AnchorNamespace::Type, name, None);
        }
    }

    debug!(anchors = registry.len(), "anchor registry built");
    registry
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
