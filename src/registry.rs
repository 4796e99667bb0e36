//! Registration store for API surface metadata.
//!
//! Application start-up code registers routes, schemas, methods, tags and
//! field descriptions here, then hands the populated registry by reference
//! to [`SpecGenerator`](crate::generator::SpecGenerator). The registry is
//! read-only during a generation run.
//!
//! Routes live in an arena and are addressed by [`RouteId`]; parent chains
//! are resolved iteratively with a cycle guard, so a corrupted snapshot
//! fails fast instead of looping forever.

use std::collections::HashSet;

use anyhow::bail;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{
    Method, Parameter, ParameterLocation, Property, Route, RouteId, Schema, SchemaKind, Tag,
};

/// In-memory store of every registered entity, in insertion order.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Registry {
    routes: Vec<Route>,
    methods: Vec<Method>,
    tags: Vec<Tag>,
    schemas: Vec<Schema>,
    parameters: Vec<Parameter>,
    properties: Vec<Property>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a route segment, optionally parented, and returns its id.
    pub fn add_route(&mut self, name: impl Into<String>, parent: Option<RouteId>) -> RouteId {
        let id = RouteId(self.routes.len());
        self.routes.push(Route {
            name: name.into(),
            parent,
        });
        id
    }

    pub fn add_method(&mut self, method: Method) {
        self.methods.push(method);
    }

    pub fn add_tag(&mut self, name: impl Into<String>, route: RouteId) {
        self.tags.push(Tag {
            name: name.into(),
            route,
        });
    }

    /// Starts a schema declaration. Fields added through the builder are
    /// registered without a description; descriptions arrive later through
    /// [`Registry::document_property`] / [`Registry::document_parameter`].
    pub fn schema(
        &mut self,
        name: impl Into<String>,
        route: RouteId,
        kind: SchemaKind,
    ) -> SchemaBuilder<'_> {
        SchemaBuilder {
            registry: self,
            name: name.into(),
            route,
            kind,
            fields: Vec::new(),
        }
    }

    /// Attaches a description to a property-schema field.
    pub fn document_property(
        &mut self,
        schema: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) {
        self.add_or_update_property(Property {
            name: name.into(),
            schema: schema.into(),
            ty: None,
            example: None,
            description: Some(description.into()),
            required,
        });
    }

    /// Attaches a description and location to a parameter-schema field.
    pub fn document_parameter(
        &mut self,
        schema: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        location: ParameterLocation,
        required: bool,
    ) {
        self.add_or_update_parameter(Parameter {
            name: name.into(),
            schema: schema.into(),
            ty: None,
            example: None,
            description: Some(description.into()),
            location: Some(location),
            required,
        });
    }

    /// Inserts a property or merges it into the record sharing its
    /// (name, schema) identity.
    ///
    /// Merge rule: a record still missing its description takes only the
    /// incoming description; a record that already has one takes the
    /// incoming example, name, schema and declared type instead. `required`
    /// is fixed at first insertion.
    pub fn add_or_update_property(&mut self, incoming: Property) {
        let existing = self
            .properties
            .iter_mut()
            .find(|p| p.name == incoming.name && p.schema == incoming.schema);
        match existing {
            Some(property) => {
                if property.description.is_none() {
                    property.description = incoming.description;
                } else {
                    property.example = incoming.example;
                    property.name = incoming.name;
                    property.schema = incoming.schema;
                    property.ty = incoming.ty;
                }
            }
            None => self.properties.push(incoming),
        }
    }

    /// Same merge rule as [`Registry::add_or_update_property`]; the
    /// description-missing branch additionally takes the incoming location.
    pub fn add_or_update_parameter(&mut self, incoming: Parameter) {
        let existing = self
            .parameters
            .iter_mut()
            .find(|p| p.name == incoming.name && p.schema == incoming.schema);
        match existing {
            Some(parameter) => {
                if parameter.description.is_none() {
                    parameter.description = incoming.description;
                    parameter.location = incoming.location;
                } else {
                    parameter.example = incoming.example;
                    parameter.name = incoming.name;
                    parameter.schema = incoming.schema;
                    parameter.ty = incoming.ty;
                }
            }
            None => self.parameters.push(incoming),
        }
    }

    pub fn route(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(id.0)
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Name of the route's root ancestor.
    ///
    /// Walks parent links iteratively; the walk is bounded by tree depth.
    /// A cyclic parent chain is a caller-side defect and fails fast here.
    pub fn main_route(&self, id: RouteId) -> anyhow::Result<&str> {
        let mut visited = HashSet::new();
        let mut current = id;
        loop {
            if !visited.insert(current) {
                bail!("route parent chain contains a cycle at index {}", current.0);
            }
            let Some(route) = self.routes.get(current.0) else {
                bail!("unknown route id {}", current.0);
            };
            match route.parent {
                Some(parent) => current = parent,
                None => return Ok(&route.name),
            }
        }
    }

    /// Full request path from root to the given route, each segment
    /// normalized to a leading `/`.
    pub fn full_path(&self, id: RouteId) -> anyhow::Result<String> {
        let mut visited = HashSet::new();
        let mut current = id;
        let mut path = String::new();
        loop {
            if !visited.insert(current) {
                bail!("route parent chain contains a cycle at index {}", current.0);
            }
            let Some(route) = self.routes.get(current.0) else {
                bail!("unknown route id {}", current.0);
            };
            let segment = if route.name.starts_with('/') {
                route.name.clone()
            } else {
                format!("/{}", route.name)
            };
            path = segment + &path;
            match route.parent {
                Some(parent) => current = parent,
                None => return Ok(path),
            }
        }
    }
}

/// Declares a schema and its fields in one fluent chain.
pub struct SchemaBuilder<'a> {
    registry: &'a mut Registry,
    name: String,
    route: RouteId,
    kind: SchemaKind,
    fields: Vec<(String, Option<String>, Option<Value>)>,
}

impl SchemaBuilder<'_> {
    /// Declares one field with its type name and example value.
    pub fn field(mut self, name: impl Into<String>, ty: impl Into<String>, example: Value) -> Self {
        self.fields
            .push((name.into(), Some(ty.into()), Some(example)));
        self
    }

    /// Registers the schema and every declared field. Property schemas
    /// register properties, parameter schemas register parameters; either
    /// way the description stays unset until a documentation call fills it.
    pub fn register(self) {
        let SchemaBuilder {
            registry,
            name,
            route,
            kind,
            fields,
        } = self;
        registry.schemas.push(Schema {
            name: name.clone(),
            route,
            kind,
        });
        for (field_name, ty, example) in fields {
            match kind {
                SchemaKind::Property => registry.add_or_update_property(Property {
                    name: field_name,
                    schema: name.clone(),
                    ty,
                    example,
                    description: None,
                    required: false,
                }),
                SchemaKind::Parameter => registry.add_or_update_parameter(Parameter {
                    name: field_name,
                    schema: name.clone(),
                    ty,
                    example,
                    description: None,
                    location: None,
                    required: false,
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn test_main_route_walks_to_root() {
        let mut registry = Registry::new();
        let root = registry.add_route("/users", None);
        let child = registry.add_route("{id}", Some(root));
        let grandchild = registry.add_route("posts", Some(child));

        assert_eq!(registry.main_route(root).unwrap(), "/users");
        assert_eq!(registry.main_route(child).unwrap(), "/users");
        assert_eq!(registry.main_route(grandchild).unwrap(), "/users");
    }

    #[test]
    fn test_full_path_normalizes_segments() {
        let mut registry = Registry::new();
        let root = registry.add_route("users", None);
        let child = registry.add_route("/{id}", Some(root));
        let grandchild = registry.add_route("posts", Some(child));

        assert_eq!(registry.full_path(root).unwrap(), "/users");
        assert_eq!(registry.full_path(grandchild).unwrap(), "/users/{id}/posts");
    }

    #[test]
    fn test_cycle_in_snapshot_fails_fast() {
        // Cycles cannot be built through the API; a hand-edited snapshot can
        // carry one.
        let registry: Registry = serde_json::from_value(json!({
            "routes": [
                { "name": "a", "parent": 1 },
                { "name": "b", "parent": 0 }
            ]
        }))
        .unwrap();

        let err = registry.main_route(RouteId(0)).unwrap_err();
        assert!(err.to_string().contains("cycle"));
        assert!(registry.full_path(RouteId(1)).is_err());
    }

    #[test]
    fn test_unknown_route_id_is_an_error() {
        let registry: Registry = serde_json::from_value(json!({
            "routes": [{ "name": "a", "parent": 7 }]
        }))
        .unwrap();

        let err = registry.main_route(RouteId(0)).unwrap_err();
        assert!(err.to_string().contains("unknown route id"));
    }

    #[test]
    fn test_property_definition_then_description() {
        let mut registry = Registry::new();
        let route = registry.add_route("/users", None);
        registry
            .schema("UserDto", route, SchemaKind::Property)
            .field("id", "number", json!(1))
            .register();
        registry.document_property("UserDto", "id", "User identifier", true);

        let property = &registry.properties()[0];
        assert_eq!(registry.properties().len(), 1);
        assert_eq!(property.description.as_deref(), Some("User identifier"));
        // Fields from the first registration survive.
        assert_eq!(property.ty.as_deref(), Some("number"));
        assert_eq!(property.example, Some(json!(1)));
        // Required was fixed at insertion.
        assert!(!property.required);
    }

    #[test]
    fn test_property_description_then_definition() {
        // Reverse registration order takes the other merge branch: the
        // second call replaces example and type but keeps the description.
        let mut registry = Registry::new();
        let route = registry.add_route("/users", None);
        registry.document_property("UserDto", "id", "User identifier", true);
        registry
            .schema("UserDto", route, SchemaKind::Property)
            .field("id", "number", json!(1))
            .register();

        let property = &registry.properties()[0];
        assert_eq!(registry.properties().len(), 1);
        assert_eq!(property.description.as_deref(), Some("User identifier"));
        assert_eq!(property.ty.as_deref(), Some("number"));
        assert_eq!(property.example, Some(json!(1)));
        assert!(property.required);
    }

    #[test]
    fn test_parameter_merge_takes_location_with_description() {
        let mut registry = Registry::new();
        let route = registry.add_route("/users", None);
        registry
            .schema("UserQuery", route, SchemaKind::Parameter)
            .field("limit", "integer", json!(25))
            .register();
        registry.document_parameter(
            "UserQuery",
            "limit",
            "Page size",
            ParameterLocation::Query,
            false,
        );

        let parameter = &registry.parameters()[0];
        assert_eq!(registry.parameters().len(), 1);
        assert_eq!(parameter.description.as_deref(), Some("Page size"));
        assert_eq!(parameter.location, Some(ParameterLocation::Query));
        assert_eq!(parameter.ty.as_deref(), Some("integer"));
    }

    #[test]
    fn test_registry_snapshot_round_trip() {
        let mut registry = Registry::new();
        let route = registry.add_route("/users", None);
        registry.add_tag("users", route);
        registry
            .schema("UserDto", route, SchemaKind::Property)
            .field("id", "number", json!(1))
            .register();

        let snapshot = serde_json::to_string(&registry).unwrap();
        let restored: Registry = serde_json::from_str(&snapshot).unwrap();
        assert_eq!(restored.tags(), registry.tags());
        assert_eq!(restored.properties(), registry.properties());
        assert_eq!(restored.main_route(route).unwrap(), "/users");
    }
}
