//! Schema builders shared by the unit tests.

use gqldoc_shared::{
    Argument, Directive, Entity, EnumDef, EnumValue, Field, InputDef, InterfaceDef, ObjectDef,
    ScalarDef, Schema, TypeRef, UnionDef,
};

pub(crate) fn schema_of(entities: Vec<Entity>) -> Schema {
    let mut schema = Schema::default();
    for entity in entities {
        schema.insert(entity);
    }
    schema
}

/// `"[Widget!]!"` → display `[Widget!]!`, base `Widget`.
pub(crate) fn type_ref(display: &str) -> TypeRef {
    TypeRef {
        display: display.to_string(),
        base: display
            .trim_matches(|c| c == '[' || c == ']' || c == '!')
            .to_string(),
    }
}

pub(crate) fn field(name: &str, ty: &str) -> Field {
    Field {
        name: name.into(),
        ty: type_ref(ty),
        ..Default::default()
    }
}

pub(crate) fn argument(name: &str, ty: &str) -> Argument {
    Argument {
        name: name.into(),
        ty: type_ref(ty),
        ..Default::default()
    }
}

pub(crate) fn directive(name: &str, arguments: &[(&str, &str)]) -> Directive {
    Directive {
        name: name.into(),
        arguments: arguments
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect(),
    }
}

pub(crate) fn object_def(name: &str, fields: &[(&str, &str)]) -> ObjectDef {
    ObjectDef {
        name: name.into(),
        fields: fields.iter().map(|(n, t)| field(n, t)).collect(),
        ..Default::default()
    }
}

pub(crate) fn object(name: &str, fields: &[(&str, &str)]) -> Entity {
    Entity::Object(object_def(name, fields))
}

pub(crate) fn implementing(name: &str, interfaces: &[&str], fields: &[(&str, &str)]) -> Entity {
    let mut def = object_def(name, fields);
    def.implements = interfaces.iter().map(|i| (*i).to_string()).collect();
    Entity::Object(def)
}

pub(crate) fn interface(name: &str, fields: &[(&str, &str)]) -> Entity {
    Entity::Interface(InterfaceDef {
        name: name.into(),
        fields: fields.iter().map(|(n, t)| field(n, t)).collect(),
        ..Default::default()
    })
}

pub(crate) fn enumeration(name: &str, values: &[&str]) -> Entity {
    Entity::Enum(EnumDef {
        name: name.into(),
        values: values
            .iter()
            .map(|v| EnumValue {
                name: (*v).to_string(),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    })
}

pub(crate) fn union(name: &str, members: &[&str]) -> Entity {
    Entity::Union(UnionDef {
        name: name.into(),
        members: members.iter().map(|m| (*m).to_string()).collect(),
        ..Default::default()
    })
}

pub(crate) fn input(name: &str, fields: &[(&str, &str)]) -> Entity {
    Entity::Input(InputDef {
        name: name.into(),
        fields: fields.iter().map(|(n, t)| argument(n, t)).collect(),
        ..Default::default()
    })
}

pub(crate) fn scalar(name: &str) -> Entity {
    Entity::Scalar(ScalarDef {
        name: name.into(),
        ..Default::default()
    })
}
