//! # swaggen
//!
//! **swaggen** generates a Swagger/OpenAPI specification as a tree of
//! TypeScript source files from API metadata registered programmatically at
//! application start-up.
//!
//! ## Overview
//!
//! Application code describes its API surface against a [`Registry`]:
//! routes (a parented tree of path segments), schemas with their fields,
//! tags, request parameters and methods. Running a [`SpecGenerator`] over
//! the populated registry renders every entity through raw placeholder
//! templates and writes one file per (root route, document kind), plus one
//! index file per kind and a top-level spec document composing them.
//!
//! The library is organized into a few modules:
//!
//! - **[`model`]** - entity types collected during registration
//! - **[`registry`]** - the registration store, route arena and resolver
//! - **[`generator`]** - templates, aggregation, formatting and
//!   orchestration of a generation run
//! - **[`cli`]** - the `swaggen` binary surface over registry snapshots
//!
//! ## Usage
//!
//! ```rust,ignore
//! use serde_json::json;
//! use swaggen::generator::{EmbeddedTemplates, PassthroughFormatter, SpecGenerator};
//! use swaggen::model::SchemaKind;
//! use swaggen::Registry;
//!
//! let mut registry = Registry::new();
//! let users = registry.add_route("/users", None);
//! registry.add_tag("users", users);
//! registry
//!     .schema("UserDto", users, SchemaKind::Property)
//!     .field("id", "number", json!(1))
//!     .register();
//! registry.document_property("UserDto", "id", "User identifier", true);
//!
//! let mut generator = SpecGenerator::new(&registry, &PassthroughFormatter);
//! generator.generate(&EmbeddedTemplates, "docs".as_ref());
//! ```
//!
//! Generation is synchronous and single-threaded, assumes the registry is
//! fully populated before it starts, and never overwrites an individual
//! file it finds on disk: per-kind folders are wiped and regenerated as a
//! whole, while a hand-edited top-level spec survives every run.

pub mod cli;
pub mod generator;
pub mod model;
pub mod registry;

pub use generator::SpecGenerator;
pub use registry::Registry;
