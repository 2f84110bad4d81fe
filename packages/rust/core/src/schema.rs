//! Schema loading: `.gql`/`.graphql` source → [`Schema`] entity graph.
//!
//! Parsing is delegated to `graphql-parser`. All files are merged into a
//! single document (kept for the reformatted-source output) and a single
//! entity map (consumed by the documentation renderer).

use std::io::Write;
use std::path::{Path, PathBuf};

use graphql_parser::schema::{self as ast, Definition, TypeDefinition, TypeExtension};
use tracing::{debug, info, instrument};

use gqldoc_shared::{
    Argument, Directive, Entity, EnumDef, EnumValue, Field, GqlDocError, InputDef, InterfaceDef,
    ObjectDef, Result, RootNames, ScalarDef, Schema, TypeRef, UnionDef,
};

type Document = ast::Document<'static, String>;

/// A parsed schema: the merged source document and its entity graph.
#[derive(Debug, Clone)]
pub struct ParsedSchema {
    /// All definitions from every source, in input order.
    pub document: Document,
    /// The entity graph built from the document.
    pub schema: Schema,
}

/// Parse GraphQL schema definitions from the named files.
///
/// There must be at least one file, and every file's extension must be
/// `.gql` or `.graphql`. Parsing stops at the first error.
#[instrument(skip_all, fields(file_count = filenames.len()))]
pub fn parse_files(filenames: &[PathBuf]) -> Result<ParsedSchema> {
    if filenames.is_empty() {
        return Err(GqlDocError::parse("no files provided"));
    }

    let mut sources = Vec::with_capacity(filenames.len());
    for file in filenames {
        if !has_schema_extension(file) {
            return Err(GqlDocError::parse(format!(
                "{}: must have extension .gql or .graphql",
                file.display()
            )));
        }
        let text = std::fs::read_to_string(file).map_err(|e| GqlDocError::io(file, e))?;
        debug!(path = %file.display(), bytes = text.len(), "read schema file");
        sources.push((file.display().to_string(), text));
    }

    parse_sources(&sources)
}

/// Parse in-memory `(name, source text)` pairs into one schema.
#[instrument(skip_all, fields(source_count = sources.len()))]
pub fn parse_sources(sources: &[(String, String)]) -> Result<ParsedSchema> {
    if sources.is_empty() {
        return Err(GqlDocError::parse("no files provided"));
    }

    let mut definitions = Vec::new();
    for (name, text) in sources {
        let document = graphql_parser::parse_schema::<String>(text)
            .map_err(|e| GqlDocError::parse(format!("{name}: {e}")))?
            .into_static();
        definitions.extend(document.definitions);
    }

    let document = Document { definitions };
    let schema = build_schema(&document)?;

    info!(types = schema.types.len(), "schema loaded");
    Ok(ParsedSchema { document, schema })
}

/// Write the merged schema back out as formatted GraphQL source.
pub fn format_graphql(dst: &mut dyn Write, parsed: &ParsedSchema) -> Result<()> {
    let source = parsed.document.to_string();
    dst.write_all(source.as_bytes()).map_err(GqlDocError::Write)?;
    dst.flush().map_err(GqlDocError::Write)
}

fn has_schema_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("gql" | "graphql")
    )
}

// ---------------------------------------------------------------------------
// Document → Schema
// ---------------------------------------------------------------------------

fn build_schema(document: &Document) -> Result<Schema> {
    let mut schema = Schema::default();
    let mut extensions = Vec::new();

    for definition in &document.definitions {
        match definition {
            Definition::SchemaDefinition(def) => apply_schema_definition(&mut schema.roots, def),
            Definition::TypeDefinition(def) => {
                let entity = convert_type(def);
                let name = entity.name().to_string();
                if schema.insert(entity).is_some() {
                    return Err(GqlDocError::parse(format!(
                        "type {name} is defined more than once"
                    )));
                }
            }
            // Extensions may precede the type they extend in another file.
            Definition::TypeExtension(ext) => extensions.push(ext),
            Definition::DirectiveDefinition(_) => {}
        }
    }

    for ext in extensions {
        apply_extension(&mut schema, ext)?;
    }

    debug!(
        query = %schema.roots.query,
        mutation = %schema.roots.mutation,
        subscription = %schema.roots.subscription,
        "root types resolved"
    );
    Ok(schema)
}

fn apply_schema_definition(roots: &mut RootNames, def: &ast::SchemaDefinition<'static, String>) {
    if let Some(query) = &def.query {
        roots.query = query.clone();
    }
    if let Some(mutation) = &def.mutation {
        roots.mutation = mutation.clone();
    }
    if let Some(subscription) = &def.subscription {
        roots.subscription = subscription.clone();
    }
}

fn convert_type(def: &TypeDefinition<'static, String>) -> Entity {
    match def {
        TypeDefinition::Scalar(t) => Entity::Scalar(ScalarDef {
            name: t.name.clone(),
            description: description(&t.description),
            directives: convert_directives(&t.directives),
        }),
        TypeDefinition::Object(t) => Entity::Object(ObjectDef {
            name: t.name.clone(),
            description: description(&t.description),
            implements: t.implements_interfaces.clone(),
            fields: t.fields.iter().map(convert_field).collect(),
            directives: convert_directives(&t.directives),
        }),
        TypeDefinition::Interface(t) => Entity::Interface(InterfaceDef {
            name: t.name.clone(),
            description: description(&t.description),
            implements: t.implements_interfaces.clone(),
            fields: t.fields.iter().map(convert_field).collect(),
            directives: convert_directives(&t.directives),
        }),
        TypeDefinition::Union(t) => Entity::Union(UnionDef {
            name: t.name.clone(),
            description: description(&t.description),
            members: t.types.clone(),
            directives: convert_directives(&t.directives),
        }),
        TypeDefinition::Enum(t) => Entity::Enum(EnumDef {
            name: t.name.clone(),
            description: description(&t.description),
            values: t.values.iter().map(convert_enum_value).collect(),
            directives: convert_directives(&t.directives),
        }),
        TypeDefinition::InputObject(t) => Entity::Input(InputDef {
            name: t.name.clone(),
            description: description(&t.description),
            fields: t.fields.iter().map(convert_input_value).collect(),
            directives: convert_directives(&t.directives),
        }),
    }
}

/// Merge an `extend ...` definition into the entity it extends.
fn apply_extension(schema: &mut Schema, ext: &TypeExtension<'static, String>) -> Result<()> {
    let name = extension_name(ext);
    let Some(entity) = schema.types.get_mut(name) else {
        return Err(GqlDocError::parse(format!(
            "cannot extend type {name} because it is not defined"
        )));
    };

    match (entity, ext) {
        (Entity::Scalar(def), TypeExtension::Scalar(e)) => {
            def.directives.extend(convert_directives(&e.directives));
        }
        (Entity::Object(def), TypeExtension::Object(e)) => {
            def.implements.extend(e.implements_interfaces.iter().cloned());
            def.fields.extend(e.fields.iter().map(convert_field));
            def.directives.extend(convert_directives(&e.directives));
        }
        (Entity::Interface(def), TypeExtension::Interface(e)) => {
            def.fields.extend(e.fields.iter().map(convert_field));
            def.directives.extend(convert_directives(&e.directives));
        }
        (Entity::Union(def), TypeExtension::Union(e)) => {
            def.members.extend(e.types.iter().cloned());
            def.directives.extend(convert_directives(&e.directives));
        }
        (Entity::Enum(def), TypeExtension::Enum(e)) => {
            def.values.extend(e.values.iter().map(convert_enum_value));
            def.directives.extend(convert_directives(&e.directives));
        }
        (Entity::Input(def), TypeExtension::InputObject(e)) => {
            def.fields.extend(e.fields.iter().map(convert_input_value));
            def.directives.extend(convert_directives(&e.directives));
        }
        (entity, _) => {
            return Err(GqlDocError::parse(format!(
                "cannot extend {} {name} with a different kind of type",
                entity.kind()
            )));
        }
    }

    debug!(name, "type extension merged");
    Ok(())
}

fn extension_name<'a>(ext: &'a TypeExtension<'static, String>) -> &'a str {
    match ext {
        TypeExtension::Scalar(e) => &e.name,
        TypeExtension::Object(e) => &e.name,
        TypeExtension::Interface(e) => &e.name,
        TypeExtension::Union(e) => &e.name,
        TypeExtension::Enum(e) => &e.name,
        TypeExtension::InputObject(e) => &e.name,
    }
}

fn convert_field(field: &ast::Field<'static, String>) -> Field {
    Field {
        name: field.name.clone(),
        ty: convert_type_ref(&field.field_type),
        description: description(&field.description),
        arguments: field.arguments.iter().map(convert_input_value).collect(),
        directives: convert_directives(&field.directives),
    }
}

fn convert_input_value(value: &ast::InputValue<'static, String>) -> Argument {
    Argument {
        name: value.name.clone(),
        ty: convert_type_ref(&value.value_type),
        description: description(&value.description),
        default_value: value.default_value.as_ref().map(ToString::to_string),
        directives: convert_directives(&value.directives),
    }
}

fn convert_enum_value(value: &ast::EnumValue<'static, String>) -> EnumValue {
    EnumValue {
        name: value.name.clone(),
        description: description(&value.description),
        directives: convert_directives(&value.directives),
    }
}

fn convert_type_ref(ty: &ast::Type<'static, String>) -> TypeRef {
    TypeRef {
        display: ty.to_string(),
        base: base_type_name(ty).to_string(),
    }
}

fn base_type_name<'a>(ty: &'a ast::Type<'static, String>) -> &'a str {
    match ty {
        ast::Type::NamedType(name) => name,
        ast::Type::ListType(inner) | ast::Type::NonNullType(inner) => base_type_name(inner),
    }
}

fn convert_directives(directives: &[ast::Directive<'static, String>]) -> Vec<Directive> {
    directives
        .iter()
        .map(|d| Directive {
            name: d.name.clone(),
            arguments: d
                .arguments
                .iter()
                .map(|(name, value)| (name.clone(), value.to_string()))
                .collect(),
        })
        .collect()
}

fn description(text: &Option<String>) -> String {
    text.as_deref().map(str::trim).unwrap_or_default().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
