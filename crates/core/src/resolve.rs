//! Schema node to TypeScript type expression.
//!
//! [`TypeResolver`] is a read-only view over a document's component tables.
//! Resolution never mutates the document, so the same node always resolves to
//! the same tree.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::error::{GenError, Result};
use crate::ir::utils::{enum_value_to_literal, pascal_case};
use crate::ir::{TsLiteral, TsPrimitive, TsProp, TsType};
use crate::spec::{
    AdditionalProperties, Components, MediaType, Operation, RefOr, RequestBody, Response, Schema,
};

/// The four component namespaces a `$ref` may point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Schema,
    Response,
    Parameter,
    RequestBody,
}

impl ComponentKind {
    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "schemas" => Some(Self::Schema),
            "responses" => Some(Self::Response),
            "parameters" => Some(Self::Parameter),
            "requestBodies" => Some(Self::RequestBody),
            _ => None,
        }
    }

    /// Suffix that keeps names from different namespaces apart.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Schema => "",
            Self::Response => "Response",
            Self::Parameter => "Parameter",
            Self::RequestBody => "RequestBody",
        }
    }

    /// Exported type name for a component of this kind.
    pub fn type_name(self, name: &str) -> String {
        format!("{}{}", pascal_case(name), self.suffix())
    }
}

/// Split `#/components/<namespace>/<name>` into its namespace and decoded name.
pub fn parse_reference(reference: &str) -> Result<(ComponentKind, String)> {
    let unsupported = || GenError::UnsupportedReference {
        reference: reference.to_string(),
    };
    let rest = reference
        .strip_prefix("#/components/")
        .ok_or_else(unsupported)?;
    let (segment, name) = rest.split_once('/').ok_or_else(unsupported)?;
    let kind = ComponentKind::from_segment(segment).ok_or_else(unsupported)?;
    if name.is_empty() || name.contains('/') {
        return Err(unsupported());
    }
    Ok((kind, name.replace("~1", "/").replace("~0", "~")))
}

/// Content types whose schema describes the transported payload: the JSON
/// family (including `+json` structured suffixes) and raw octet streams.
pub(crate) fn is_payload_media_type(mime: &str) -> bool {
    let essence = mime
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence.starts_with("application/json")
        || (essence.starts_with("application/") && essence.ends_with("+json"))
        || essence == "application/octet-stream"
}

enum ExtraProperties {
    Absent,
    Closed,
    Open(TsType),
}

#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    components: &'a Components,
}

impl<'a> TypeResolver<'a> {
    pub fn new(components: &'a Components) -> Self {
        Self { components }
    }

    pub fn components(&self) -> &'a Components {
        self.components
    }

    /// Resolve a schema node.
    pub fn resolve(&self, schema: &Schema) -> Result<TsType> {
        self.resolve_at(schema, None)
    }

    /// Resolve a schema node, naming `location` in errors raised below it.
    pub fn resolve_named(&self, schema: &Schema, location: &str) -> Result<TsType> {
        self.resolve_at(schema, Some(location))
    }

    /// Resolve a `$ref` to the exported name of its target.
    pub fn resolve_reference(&self, reference: &str) -> Result<TsType> {
        let (kind, name) = parse_reference(reference)?;
        Ok(TsType::Ref(kind.type_name(&name)))
    }

    fn resolve_at(&self, schema: &Schema, location: Option<&str>) -> Result<TsType> {
        if let Some(reference) = &schema.ref_path {
            return self.resolve_reference(reference);
        }

        let ty = match schema.primary_type() {
            Some("array") => self.resolve_array(schema, location)?,
            Some("string" | "number" | "integer" | "boolean") => resolve_scalar(schema),
            Some("object") => self.resolve_object(schema, location)?,
            Some("null") => TsType::Primitive(TsPrimitive::Null),
            Some(_) => TsType::any(),
            // `type: ["null"]`
            None if schema.schema_type.is_some() => TsType::Primitive(TsPrimitive::Null),
            None if schema.items.is_some() => self.resolve_array(schema, location)?,
            None => self.resolve_object(schema, location)?,
        };

        Ok(if schema.is_nullable() { ty.nullable() } else { ty })
    }

    fn resolve_array(&self, schema: &Schema, location: Option<&str>) -> Result<TsType> {
        let items = schema.items.as_ref().ok_or_else(|| GenError::MissingArrayItems {
            location: location.map(str::to_string),
        })?;
        let item_location = format!("{}[]", location.unwrap_or_default());
        let inner = self.resolve_at(items, Some(&item_location))?;
        Ok(TsType::Array(Box::new(inner)))
    }

    fn resolve_object(&self, schema: &Schema, location: Option<&str>) -> Result<TsType> {
        if let Some(members) = non_empty(&schema.all_of) {
            return Ok(TsType::intersection_of(self.resolve_all(members, location)?));
        }
        if let Some(members) = non_empty(&schema.one_of) {
            return Ok(TsType::union_of(self.resolve_all(members, location)?));
        }
        if let Some(members) = non_empty(&schema.any_of) {
            return Ok(TsType::union_of(self.resolve_all(members, location)?));
        }
        if let Some(values) = non_empty(&schema.enum_values) {
            return Ok(literal_union(values));
        }

        let properties = schema.properties.as_ref().filter(|p| !p.is_empty());
        let extra = self.extra_properties(schema, location)?;

        let Some(properties) = properties else {
            return Ok(match extra {
                ExtraProperties::Absent if schema.schema_type.is_none() => TsType::Object(vec![]),
                ExtraProperties::Absent => TsType::free_form(),
                ExtraProperties::Closed => TsType::Object(vec![]),
                ExtraProperties::Open(value) => TsType::IndexSignature(Box::new(value)),
            });
        };

        let fields = TsType::Object(self.resolve_fields(schema, properties, location)?);
        Ok(match extra {
            ExtraProperties::Absent | ExtraProperties::Closed => fields,
            ExtraProperties::Open(value) => {
                TsType::Intersection(vec![fields, TsType::IndexSignature(Box::new(value))])
            }
        })
    }

    fn resolve_fields(
        &self,
        schema: &Schema,
        properties: &IndexMap<String, Schema>,
        location: Option<&str>,
    ) -> Result<Vec<TsProp>> {
        properties
            .iter()
            .map(|(name, property)| {
                let property_location = match location {
                    Some(parent) => format!("{parent}.{name}"),
                    None => name.clone(),
                };
                Ok(TsProp {
                    name: name.clone(),
                    ty: self.resolve_at(property, Some(&property_location))?,
                    optional: !schema.is_required(name),
                    doc: property
                        .description
                        .as_deref()
                        .map(str::trim)
                        .filter(|d| !d.is_empty())
                        .map(str::to_string),
                })
            })
            .collect()
    }

    fn extra_properties(&self, schema: &Schema, location: Option<&str>) -> Result<ExtraProperties> {
        Ok(match &schema.additional_properties {
            None => ExtraProperties::Absent,
            Some(AdditionalProperties::Bool(false)) => ExtraProperties::Closed,
            Some(AdditionalProperties::Bool(true)) => ExtraProperties::Open(TsType::any()),
            Some(AdditionalProperties::Schema(value)) if value.is_empty() => {
                ExtraProperties::Open(TsType::any())
            }
            Some(AdditionalProperties::Schema(value)) => {
                ExtraProperties::Open(self.resolve_at(value, location)?)
            }
        })
    }

    fn resolve_all(&self, members: &[Schema], location: Option<&str>) -> Result<Vec<TsType>> {
        members.iter().map(|m| self.resolve_at(m, location)).collect()
    }

    /// Union of every 2xx payload schema, or `void` when none is declared.
    pub fn response_type(&self, operation: &Operation) -> Result<TsType> {
        let mut members = Vec::new();
        for (status, response) in &operation.responses {
            if !status.starts_with('2') {
                continue;
            }
            if let Some(ty) = self.response_payload(response, status)? {
                push_distinct(&mut members, ty);
            }
        }
        Ok(if members.is_empty() {
            TsType::void()
        } else {
            TsType::union_of(members)
        })
    }

    /// Payload type of one response; `None` when it declares no payload schema.
    pub fn response_payload(&self, response: &RefOr<Response>, location: &str) -> Result<Option<TsType>> {
        match response {
            RefOr::Ref(r) => self.resolve_reference(&r.reference).map(Some),
            RefOr::Item(response) => self.content_type(&response.content, location),
        }
    }

    /// Type of a request body; `None` when it declares no payload schema.
    pub fn request_body_type(&self, body: &RefOr<RequestBody>) -> Result<Option<TsType>> {
        match body {
            RefOr::Ref(r) => self.resolve_reference(&r.reference).map(Some),
            RefOr::Item(body) => self.content_type(&body.content, "requestBody"),
        }
    }

    fn content_type(
        &self,
        content: &IndexMap<String, MediaType>,
        location: &str,
    ) -> Result<Option<TsType>> {
        let mut members = Vec::new();
        for (mime, media) in content {
            if !is_payload_media_type(mime) {
                continue;
            }
            if let Some(schema) = &media.schema {
                push_distinct(&mut members, self.resolve_named(schema, location)?);
            }
        }
        Ok((!members.is_empty()).then(|| TsType::union_of(members)))
    }

    /// Property names of a request body that is a plain object, following
    /// references. `None` when the body can't be taken apart field by field.
    pub fn body_fields(&self, body: &RefOr<RequestBody>) -> Option<Vec<String>> {
        let mut visiting = HashSet::new();
        match body {
            RefOr::Ref(r) => self.reference_fields(&r.reference, &mut visiting),
            RefOr::Item(body) => self.content_fields(body, &mut visiting),
        }
    }

    fn reference_fields(
        &self,
        reference: &str,
        visiting: &mut HashSet<String>,
    ) -> Option<Vec<String>> {
        if !visiting.insert(reference.to_string()) {
            return None;
        }
        let fields = parse_reference(reference)
            .ok()
            .and_then(|(kind, name)| match kind {
                ComponentKind::RequestBody => match self.components.request_bodies.get(&name)? {
                    RefOr::Ref(r) => self.reference_fields(&r.reference, visiting),
                    RefOr::Item(body) => self.content_fields(body, visiting),
                },
                ComponentKind::Schema => {
                    self.schema_fields(self.components.schemas.get(&name)?, visiting)
                }
                ComponentKind::Response | ComponentKind::Parameter => None,
            });
        visiting.remove(reference);
        fields
    }

    fn content_fields(
        &self,
        body: &RequestBody,
        visiting: &mut HashSet<String>,
    ) -> Option<Vec<String>> {
        let schemas: Vec<&Schema> = body
            .content
            .iter()
            .filter(|(mime, _)| is_payload_media_type(mime))
            .filter_map(|(_, media)| media.schema.as_ref())
            .collect();
        match schemas.as_slice() {
            [schema] => self.schema_fields(schema, visiting),
            _ => None,
        }
    }

    fn schema_fields(&self, schema: &Schema, visiting: &mut HashSet<String>) -> Option<Vec<String>> {
        if let Some(reference) = &schema.ref_path {
            return self.reference_fields(reference, visiting);
        }
        if let Some(members) = non_empty(&schema.all_of) {
            let mut fields = Vec::new();
            for member in members {
                for field in self.schema_fields(member, visiting)? {
                    if !fields.contains(&field) {
                        fields.push(field);
                    }
                }
            }
            return Some(fields);
        }
        if schema.one_of.is_some()
            || schema.any_of.is_some()
            || schema.enum_values.is_some()
            || schema.items.is_some()
            || !matches!(schema.primary_type(), None | Some("object"))
            || !matches!(
                schema.additional_properties,
                None | Some(AdditionalProperties::Bool(false))
            )
        {
            return None;
        }
        schema
            .properties
            .as_ref()
            .filter(|p| !p.is_empty())
            .map(|p| p.keys().cloned().collect())
    }
}

fn resolve_scalar(schema: &Schema) -> TsType {
    if let Some(values) = non_empty(&schema.enum_values) {
        return literal_union(values);
    }
    match schema.primary_type() {
        Some("string") => TsType::string(),
        Some("boolean") => TsType::Primitive(TsPrimitive::Boolean),
        _ => TsType::Primitive(TsPrimitive::Number),
    }
}

fn literal_union(values: &[crate::spec::EnumValue]) -> TsType {
    TsType::union_of(
        values
            .iter()
            .map(|v| match enum_value_to_literal(v) {
                TsLiteral::Null => TsType::Primitive(TsPrimitive::Null),
                lit => TsType::Literal(lit),
            })
            .collect(),
    )
}

fn non_empty<T>(list: &Option<Vec<T>>) -> Option<&[T]> {
    list.as_deref().filter(|l| !l.is_empty())
}

fn push_distinct(members: &mut Vec<TsType>, ty: TsType) {
    if !members.contains(&ty) {
        members.push(ty);
    }
}
