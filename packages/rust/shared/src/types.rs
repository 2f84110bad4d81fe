//! Core domain types: the schema entity graph and the table of contents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root operation type names used when a schema has no `schema { ... }` block.
pub const DEFAULT_QUERY_TYPE: &str = "Query";
pub const DEFAULT_MUTATION_TYPE: &str = "Mutation";
pub const DEFAULT_SUBSCRIPTION_TYPE: &str = "Subscription";

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// A loaded schema: every named entity plus the names of the root types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Entities keyed by name.
    pub types: BTreeMap<String, Entity>,
    /// Names of the query/mutation/subscription root types.
    pub roots: RootNames,
}

impl Schema {
    /// Look up an entity by name.
    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.types.get(name)
    }

    /// Insert an entity under its own name, returning any entity it replaced.
    pub fn insert(&mut self, entity: Entity) -> Option<Entity> {
        self.types.insert(entity.name().to_string(), entity)
    }
}

/// Names of the three schema entry points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootNames {
    pub query: String,
    pub mutation: String,
    pub subscription: String,
}

impl Default for RootNames {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY_TYPE.into(),
            mutation: DEFAULT_MUTATION_TYPE.into(),
            subscription: DEFAULT_SUBSCRIPTION_TYPE.into(),
        }
    }
}

impl RootNames {
    /// Whether `name` is one of the three root type names.
    pub fn contains(&self, name: &str) -> bool {
        name == self.query || name == self.mutation || name == self.subscription
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A single named schema definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Object(ObjectDef),
    Interface(InterfaceDef),
    Union(UnionDef),
    Enum(EnumDef),
    Input(InputDef),
    Scalar(ScalarDef),
}

/// Discriminant of [`Entity`], used for logging and grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Object,
    Interface,
    Union,
    Enum,
    Input,
    Scalar,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Object => "object",
            Self::Interface => "interface",
            Self::Union => "union",
            Self::Enum => "enum",
            Self::Input => "input",
            Self::Scalar => "scalar",
        };
        f.write_str(s)
    }
}

impl Entity {
    pub fn name(&self) -> &str {
        match self {
            Self::Object(def) => &def.name,
            Self::Interface(def) => &def.name,
            Self::Union(def) => &def.name,
            Self::Enum(def) => &def.name,
            Self::Input(def) => &def.name,
            Self::Scalar(def) => &def.name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Object(def) => &def.description,
            Self::Interface(def) => &def.description,
            Self::Union(def) => &def.description,
            Self::Enum(def) => &def.description,
            Self::Input(def) => &def.description,
            Self::Scalar(def) => &def.description,
        }
    }

    pub fn directives(&self) -> &[Directive] {
        match self {
            Self::Object(def) => &def.directives,
            Self::Interface(def) => &def.directives,
            Self::Union(def) => &def.directives,
            Self::Enum(def) => &def.directives,
            Self::Input(def) => &def.directives,
            Self::Scalar(def) => &def.directives,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Object(_) => EntityKind::Object,
            Self::Interface(_) => EntityKind::Interface,
            Self::Union(_) => EntityKind::Union,
            Self::Enum(_) => EntityKind::Enum,
            Self::Input(_) => EntityKind::Input,
            Self::Scalar(_) => EntityKind::Scalar,
        }
    }

    /// Output fields, for the kinds that have them (object and interface).
    pub fn fields(&self) -> Option<&[Field]> {
        match self {
            Self::Object(def) => Some(&def.fields),
            Self::Interface(def) => Some(&def.fields),
            _ => None,
        }
    }
}

/// `type Foo implements Bar { ... }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

/// `interface Foo { ... }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

/// `union Foo = A | B`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnionDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

/// `enum Foo { A B }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Values in declaration order.
    #[serde(default)]
    pub values: Vec<EnumValue>,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

/// `input Foo { ... }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<Argument>,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

/// `scalar Foo`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScalarDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

// ---------------------------------------------------------------------------
// Fields and arguments
// ---------------------------------------------------------------------------

/// An output field of an object or interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: TypeRef,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub arguments: Vec<Argument>,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

/// A field argument or an input-object field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    pub ty: TypeRef,
    #[serde(default)]
    pub description: String,
    /// Default value rendered as GraphQL source text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

/// A declared type, e.g. `[User!]!` wrapping the named type `User`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// The type as written, including list and non-null wrappers.
    pub display: String,
    /// The innermost named type.
    pub base: String,
}

impl TypeRef {
    /// A bare named type with no wrappers.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display: name.clone(),
            base: name,
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display)
    }
}

/// A directive applied to a definition (`@deprecated(reason: "...")`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    pub name: String,
    /// `(argument name, value as GraphQL source text)` in source order.
    #[serde(default)]
    pub arguments: Vec<(String, String)>,
}

// ---------------------------------------------------------------------------
// Toc
// ---------------------------------------------------------------------------

/// Document table of contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Toc {
    pub sections: Vec<TocEntry>,
}

/// A single TOC entry (recursive for nested sections).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Display title.
    pub title: String,
    /// In-document link target, including the leading `#`.
    pub anchor: String,
    /// Nested child entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TocEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_accessors_follow_variant() {
        let entity = Entity::Enum(EnumDef {
            name: "Status".into(),
            description: "Lifecycle state.".into(),
            values: vec![],
            directives: vec![Directive {
                name: "internal".into(),
                arguments: vec![],
            }],
        });

        assert_eq!(entity.name(), "Status");
        assert_eq!(entity.description(), "Lifecycle state.");
        assert_eq!(entity.kind(), EntityKind::Enum);
        assert_eq!(entity.directives().len(), 1);
        assert!(entity.fields().is_none());
    }

    #[test]
    fn schema_insert_keys_by_name() {
        let mut schema = Schema::default();
        let previous = schema.insert(Entity::Scalar(ScalarDef {
            name: "DateTime".into(),
            ..Default::default()
        }));
        assert!(previous.is_none());
        assert!(schema.get("DateTime").is_some());
        assert!(schema.get("Missing").is_none());
    }

    #[test]
    fn root_names_default_and_contains() {
        let roots = RootNames::default();
        assert!(roots.contains("Query"));
        assert!(roots.contains("Subscription"));
        assert!(!roots.contains("query"));
    }
}
