//! Entity types collected by the [`Registry`](crate::registry::Registry).
//!
//! Everything here is plain data. Routes form a tree through parent links,
//! schemas and tags point at a route, properties and parameters point at a
//! schema by name, and methods tie a route to its request/response shapes.
//! All types derive serde so a fully populated registry can be snapshotted
//! to JSON and consumed by the CLI.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP verbs recognized by the method renderer, rendered lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    pub fn as_str(self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Discriminates schemas whose fields become properties from schemas whose
/// fields become request parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    Property,
    Parameter,
}

/// Security marker attached to a method. Only the bearer-token scheme
/// renders a fragment; future variants render empty until wired up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityScheme {
    Bearer,
}

/// Arena index of a registered route. Only the registry hands these out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(pub(crate) usize);

/// Hierarchical path segment node. Root routes have no parent. Immutable
/// once registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub name: String,
    pub parent: Option<RouteId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub route: RouteId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    pub route: RouteId,
    pub kind: SchemaKind,
}

/// One field of a property schema. Identity is (name, schema).
///
/// `description: None` is the "not yet provided" state used by the
/// registry merge rule to tell a definition-site registration from a
/// description-site one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub schema: String,
    #[serde(rename = "type", default)]
    pub ty: Option<String>,
    #[serde(default)]
    pub example: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
}

/// One field of a parameter schema. Identity is (name, schema).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub schema: String,
    #[serde(rename = "type", default)]
    pub ty: Option<String>,
    #[serde(default)]
    pub example: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<ParameterLocation>,
    #[serde(default)]
    pub required: bool,
}

/// Response content; `array_of` selects the array template variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseContent {
    pub schema: String,
    #[serde(default)]
    pub array_of: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: u16,
    pub description: String,
    pub content: ResponseContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    pub schema: String,
    #[serde(default)]
    pub required: bool,
}

/// One operation on a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub route: RouteId,
    pub name: String,
    pub summary: String,
    pub description: String,
    pub http_method: HttpMethod,
    #[serde(default)]
    pub responses: Vec<Response>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub parameter_schemas: Vec<String>,
    #[serde(default)]
    pub request_body: Option<RequestBody>,
    #[serde(default)]
    pub security: Option<SecurityScheme>,
}
