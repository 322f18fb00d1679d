//! Conduit Schema Generator
//!
//! Converts the Conduit workflow platform's declarative node property
//! definitions into standalone JSON Schema documents, one per plugin-node
//! version.
//!
//! ## Features
//!
//! - **Open Type Mapping**: every property type maps to a standard schema
//!   fragment; unknown types degrade gracefully instead of failing
//! - **Version Fan-Out**: versioned node exports produce one document per
//!   version, each merged over the shared base description
//! - **Vendor Metadata**: platform-only attributes survive as `x-conduit-*`
//!   keywords alongside standard JSON Schema keywords
//! - **Contained Failures**: a broken module or package never aborts a run;
//!   failures are counted and reported
//! - **Verifiable Output**: a run manifest with SHA256 checksums describes
//!   exactly what was written
//!
//! ## Architecture
//!
//! ```text
//! packages/*/conduit.json          package manifests (discovery)
//!        │  ModuleResolver
//!        ▼
//! NodeExport (single | versioned)  merged into flat NodeDescriptions
//!        │  assemble_document + convert_property (recursive)
//!        ▼
//! schemas/
//! ├── Slack.json
//! ├── HTTP_Request_v1.json
//! ├── HTTP_Request_v2.json
//! └── manifest.json               run summary with checksums
//! ```

pub mod descriptor;
pub mod sanitize;
pub mod convert;
pub mod document;
pub mod resolver;
pub mod traversal;
pub mod report;
pub mod checksum;
pub mod config;
pub mod error;

pub use descriptor::{NodeDescription, PropertyDefinition};
pub use convert::convert_property;
pub use document::{assemble_document, SCHEMA_DRAFT};
pub use resolver::{JsonModuleResolver, ModuleResolver, NodeExport, PackageManifest};
pub use traversal::{discover_manifests, Generator};
pub use report::{GenerateReport, OutputManifest, PackageReport};
pub use checksum::Checksum;
pub use config::GeneratorConfig;
pub use error::{Result, SchemaGenError};
