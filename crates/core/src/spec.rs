//! OpenAPI document structs for serde deserialization.
//!
//! Only the subset of OpenAPI 3 that hook generation reads is modelled.
//! Maps are `IndexMap`s so paths, properties and components keep the order
//! they have in the document, which keeps generated output stable.

use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::{GenError, Result};

/// Root OpenAPI document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenApiSpec {
    pub openapi: Option<String>,
    /// Present on Swagger 2 documents, which must be converted upstream.
    pub swagger: Option<String>,
    /// Legacy Swagger base path, kept by converters that upgrade 2.x documents.
    pub base_path: Option<String>,
    #[serde(default, deserialize_with = "without_extensions")]
    pub paths: IndexMap<String, PathItem>,
    pub components: Option<Components>,
}

/// Reusable component tables that `$ref`s can point into.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,
    #[serde(default)]
    pub responses: IndexMap<String, RefOr<Response>>,
    #[serde(default)]
    pub parameters: IndexMap<String, RefOr<Parameter>>,
    #[serde(default)]
    pub request_bodies: IndexMap<String, RefOr<RequestBody>>,
}

/// A path item containing operations for different HTTP methods.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub post: Option<Operation>,
    pub patch: Option<Operation>,
    pub put: Option<Operation>,
    pub delete: Option<Operation>,
    /// Path-level parameters shared by all operations.
    #[serde(default)]
    pub parameters: Vec<RefOr<Parameter>>,
}

impl PathItem {
    /// Operations in generation order, paired with their verb.
    pub fn operations(&self) -> impl Iterator<Item = (Verb, &Operation)> {
        [
            (Verb::Get, self.get.as_ref()),
            (Verb::Post, self.post.as_ref()),
            (Verb::Patch, self.patch.as_ref()),
            (Verb::Put, self.put.as_ref()),
            (Verb::Delete, self.delete.as_ref()),
        ]
        .into_iter()
        .filter_map(|(verb, op)| op.map(|op| (verb, op)))
    }
}

/// HTTP verbs hooks are generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl Verb {
    /// Lowercase name, which is also the method name on the axios instance.
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Post => "post",
            Verb::Patch => "patch",
            Verb::Put => "put",
            Verb::Delete => "delete",
        }
    }

    /// Verbs whose transport call takes the body as second positional argument.
    pub fn is_update(self) -> bool {
        matches!(self, Verb::Post | Verb::Patch | Verb::Put)
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An API operation (endpoint).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub parameters: Vec<RefOr<Parameter>>,
    pub request_body: Option<RefOr<RequestBody>>,
    #[serde(default, deserialize_with = "without_extensions")]
    pub responses: IndexMap<String, RefOr<Response>>,
}

/// Deserialize a map whose `x-` specification extension keys carry
/// arbitrary values. Those entries are skipped without typing their value.
fn without_extensions<'de, D, T>(d: D) -> std::result::Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    d.deserialize_map(WithoutExtensionsVisitor(PhantomData))
}

struct WithoutExtensionsVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for WithoutExtensionsVisitor<T> {
    type Value = IndexMap<String, T>;

    fn expecting(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "a map")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = IndexMap::new();
        while let Some(key) = map.next_key::<String>()? {
            if key.starts_with("x-") {
                map.next_value::<IgnoredAny>()?;
            } else {
                entries.insert(key, map.next_value()?);
            }
        }
        Ok(entries)
    }
}

/// Either an inline object or a `$ref` to one in `components`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    Ref(Reference),
    Item(T),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Reference {
    #[serde(rename = "$ref")]
    pub reference: String,
}

/// A parameter (path, query, header or cookie).
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    #[serde(default)]
    pub required: bool,
    pub schema: Option<Schema>,
    pub description: Option<String>,
}

/// A request body definition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// A response definition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    pub description: Option<String>,
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// Media type content (e.g., application/json).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaType {
    pub schema: Option<Schema>,
}

/// JSON Schema definition used in OpenAPI.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// The type of the schema (string, number, integer, boolean, object, array).
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,

    /// Reference to another component.
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,

    /// Properties for object types.
    pub properties: Option<IndexMap<String, Schema>>,

    /// Required property names for object types.
    pub required: Option<Vec<String>>,

    /// Item schema for array types.
    pub items: Option<Box<Schema>>,

    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<EnumValue>>,

    #[serde(rename = "oneOf")]
    pub one_of: Option<Vec<Schema>>,

    #[serde(rename = "anyOf")]
    pub any_of: Option<Vec<Schema>>,

    #[serde(rename = "allOf")]
    pub all_of: Option<Vec<Schema>>,

    pub additional_properties: Option<AdditionalProperties>,

    pub description: Option<String>,

    /// OpenAPI 3.0 nullable flag (3.1 uses type arrays instead).
    pub nullable: Option<bool>,

    pub format: Option<String>,
}

/// Enum value can be string, integer, float, boolean, or null.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

/// Schema type can be a single type or an array of types (for nullable).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

/// Additional properties can be a boolean or a schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<Schema>),
}

/// Source format of a document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension; anything that is not YAML is read as JSON.
    pub fn from_extension(ext: &str) -> Self {
        if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") {
            Self::Yaml
        } else {
            Self::Json
        }
    }
}

impl OpenApiSpec {
    /// Parse an OpenAPI document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse an OpenAPI document from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse and check that the document is OpenAPI 3.
    pub fn parse(text: &str, format: DocumentFormat) -> Result<Self> {
        let spec = match format {
            DocumentFormat::Json => Self::from_json(text)?,
            DocumentFormat::Yaml => Self::from_yaml(text)?,
        };
        spec.ensure_openapi3()?;
        Ok(spec)
    }

    /// Swagger 2 upgrades happen before generation; reject anything else here.
    pub fn ensure_openapi3(&self) -> Result<()> {
        match (&self.openapi, &self.swagger) {
            (Some(version), _) if version.starts_with("3.") => Ok(()),
            (Some(version), _) => Err(GenError::UnsupportedVersion {
                found: format!("openapi {version}"),
            }),
            (None, Some(version)) => Err(GenError::UnsupportedVersion {
                found: format!("swagger {version}"),
            }),
            (None, None) => Err(GenError::UnsupportedVersion {
                found: "without an `openapi` field".into(),
            }),
        }
    }

    pub fn components(&self) -> &Components {
        static EMPTY: std::sync::LazyLock<Components> = std::sync::LazyLock::new(Components::default);
        self.components.as_ref().unwrap_or(&EMPTY)
    }
}

impl Schema {
    /// `{}`: a schema carrying no information at all.
    pub fn is_empty(&self) -> bool {
        self.schema_type.is_none()
            && self.ref_path.is_none()
            && self.properties.is_none()
            && self.items.is_none()
            && self.enum_values.is_none()
            && self.one_of.is_none()
            && self.any_of.is_none()
            && self.all_of.is_none()
            && self.additional_properties.is_none()
    }

    /// The single declared type, if any (`"null"` excluded from type arrays).
    pub fn primary_type(&self) -> Option<&str> {
        match &self.schema_type {
            Some(SchemaType::Single(t)) => Some(t.as_str()),
            Some(SchemaType::Multiple(types)) => {
                types.iter().map(String::as_str).find(|t| *t != "null")
            }
            None => None,
        }
    }

    /// Nullable through the 3.0 flag or a 3.1 type array containing `"null"`.
    pub fn is_nullable(&self) -> bool {
        if self.nullable == Some(true) {
            return true;
        }
        matches!(&self.schema_type, Some(SchemaType::Multiple(types)) if types.iter().any(|t| t == "null"))
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required
            .as_ref()
            .is_some_and(|r| r.iter().any(|name| name == property))
    }
}
