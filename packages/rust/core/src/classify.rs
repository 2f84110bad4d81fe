//! Entity classifier.
//!
//! Partitions the schema's entity map into sorted groups by kind, dropping
//! root types, internal (`_`-prefixed) names and empty names. Groups borrow
//! from the schema; nothing in the input is reordered.

use tracing::{debug, instrument};

use gqldoc_shared::{
    EnumDef, Entity, Field, InputDef, InterfaceDef, ObjectDef, RootNames, ScalarDef, Schema,
    UnionDef,
};

/// Prefix reserved for introspection and implementation-internal names.
pub const RESERVED_PREFIX: &str = "_";

/// Which of the three schema entry points a root group belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    Query,
    Mutation,
    Subscription,
}

/// A root type with its documentable fields sorted by name.
#[derive(Debug, Clone)]
pub struct RootGroup<'a> {
    pub kind: RootKind,
    pub entity: &'a ObjectDef,
    pub fields: Vec<&'a Field>,
}

/// The schema split into ordered, filtered groups.
#[derive(Debug, Clone, Default)]
pub struct Classified<'a> {
    pub query: Option<RootGroup<'a>>,
    pub mutation: Option<RootGroup<'a>>,
    pub subscription: Option<RootGroup<'a>>,
    pub objects: Vec<&'a ObjectDef>,
    pub interfaces: Vec<&'a InterfaceDef>,
    pub enums: Vec<&'a EnumDef>,
    pub unions: Vec<&'a UnionDef>,
    pub inputs: Vec<&'a InputDef>,
    pub scalars: Vec<&'a ScalarDef>,
}

impl<'a> Classified<'a> {
    /// Root groups in render order, skipping absent or empty ones.
    pub fn roots(&self) -> impl Iterator<Item = &RootGroup<'a>> {
        [&self.query, &self.mutation, &self.subscription]
            .into_iter()
            .flatten()
            .filter(|group| !group.fields.is_empty())
    }
}

/// Whether an entity or field with this name appears in the document.
pub fn is_documentable(name: &str, roots: &RootNames) -> bool {
    !name.is_empty() && !roots.contains(name) && !name.starts_with(RESERVED_PREFIX)
}

/// Split `schema` into sorted groups.
#[instrument(skip_all, fields(types = schema.types.len()))]
pub fn classify(schema: &Schema) -> Classified<'_> {
    let roots = &schema.roots;
    let mut groups = Classified {
        query: root_group(schema, &roots.query, RootKind::Query),
        mutation: root_group(schema, &roots.mutation, RootKind::Mutation),
        subscription: root_group(schema, &roots.subscription, RootKind::Subscription),
        ..Classified::default()
    };

    for entity in schema.types.values() {
        if !is_documentable(entity.name(), roots) {
            continue;
        }
        match entity {
            Entity::Object(def) => groups.objects.push(def),
            Entity::Interface(def) => groups.interfaces.push(def),
            Entity::Union(def) => groups.unions.push(def),
            Entity::Enum(def) => groups.enums.push(def),
            Entity::Input(def) => groups.inputs.push(def),
            Entity::Scalar(def) => groups.scalars.push(def),
        }
    }

    groups.objects.sort_by(|a, b| a.name.cmp(&b.name));
    groups.interfaces.sort_by(|a, b| a.name.cmp(&b.name));
    groups.enums.sort_by(|a, b| a.name.cmp(&b.name));
    groups.unions.sort_by(|a, b| a.name.cmp(&b.name));
    groups.inputs.sort_by(|a, b| a.name.cmp(&b.name));
    groups.scalars.sort_by(|a, b| a.name.cmp(&b.name));

    debug!(
        objects = groups.objects.len(),
        interfaces = groups.interfaces.len(),
        enums = groups.enums.len(),
        unions = groups.unions.len(),
        inputs = groups.inputs.len(),
        scalars = groups.scalars.len(),
        "schema classified"
    );

    groups
}

fn root_group<'a>(schema: &'a Schema, name: &str, kind: RootKind) -> Option<RootGroup<'a>> {
    let Some(Entity::Object(entity)) = schema.get(name) else {
        return None;
    };

    let mut fields: Vec<&Field> = entity
        .fields
        .iter()
        .filter(|field| is_documentable(&field.name, &schema.roots))
        .collect();
    fields.sort_by(|a, b| a.name.cmp(&b.name));

    Some(RootGroup {
        kind,
        entity,
        fields,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[test]
    fn groups_are_sorted_and_filtered() {
        let schema = schema_of(vec![
            object("Zebra", &[("id", "ID")]),
            object("Apple", &[("id", "ID")]),
            object("__Type", &[("name", "String")]),
            object("_Internal", &[]),
            enumeration("Status", &["ACTIVE"]),
            scalar("DateTime"),
        ]);

        let groups = classify(&schema);
        let names: Vec<_> = groups.objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["Apple", "Zebra"]);
        assert_eq!(groups.enums.len(), 1);
        assert_eq!(groups.scalars.len(), 1);
        assert!(groups.interfaces.is_empty());
    }

    #[test]
    fn root_types_leave_object_group() {
        let schema = schema_of(vec![
            object("Query", &[("widgets", "[Widget]"), ("__schema", "__Schema"), ("count", "Int")]),
            object("Mutation", &[("createWidget", "Widget")]),
            object("Widget", &[("id", "ID")]),
        ]);

        let groups = classify(&schema);
        let objects: Vec<_> = groups.objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(objects, ["Widget"]);

        let query = groups.query.as_ref().unwrap();
        let fields: Vec<_> = query.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(fields, ["count", "widgets"]);
        assert_eq!(query.kind, RootKind::Query);

        assert!(groups.mutation.is_some());
        assert!(groups.subscription.is_none());
    }

    #[test]
    fn root_named_fields_are_filtered() {
        let schema = schema_of(vec![object("Query", &[("Query", "Int"), ("ok", "Boolean")])]);
        let groups = classify(&schema);
        let query = groups.query.unwrap();
        let fields: Vec<_> = query.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(fields, ["ok"]);
    }

    #[test]
    fn roots_skips_empty_groups() {
        let schema = schema_of(vec![
            object("Query", &[("ok", "Boolean")]),
            object("Mutation", &[("__hidden", "Boolean")]),
        ]);
        let groups = classify(&schema);
        assert!(groups.mutation.is_some());
        let kinds: Vec<_> = groups.roots().map(|g| g.kind).collect();
        assert_eq!(kinds, [RootKind::Query]);
    }

    #[test]
    fn non_object_root_is_absent() {
        let schema = schema_of(vec![scalar("Query")]);
        let groups = classify(&schema);
        assert!(groups.query.is_none());
        assert!(groups.scalars.is_empty());
    }

    #[test]
    fn input_schema_is_not_reordered() {
        let schema = schema_of(vec![object("Query", &[("zeta", "Int"), ("alpha", "Int")])]);
        let before = schema.clone();
        let _ = classify(&schema);
        assert_eq!(schema, before);
        let Some(Entity::Object(query)) = schema.get("Query") else {
            panic!("Query should be an object");
        };
        assert_eq!(query.fields[0].name, "zeta");
    }

    #[test]
    fn documentable_predicate() {
        let roots = RootNames::default();
        assert!(is_documentable("Widget", &roots));
        assert!(!is_documentable("", &roots));
        assert!(!is_documentable("Mutation", &roots));
        assert!(!is_documentable("__typename", &roots));
        assert!(!is_documentable("_service", &roots));
    }
}
