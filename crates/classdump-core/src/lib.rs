//! # classdump-core
//!
//! PHP class generation from abstract type definitions.
//!
//! A [`DefinitionCollection`] of value objects, messages, enums and marker
//! interfaces is turned into PHP source units by composing per-kind dumper
//! output with class and body templates.
//!
//! ## Modules
//!
//! - [`model`] - definitions, constructor alternatives, the collection and
//!   its YAML document form
//! - [`marker`] - marker interface inheritance validation
//! - [`dumper`] - per-kind code generators
//! - [`template`] - class/body templates and their loaders
//! - [`locate`] - output path resolution
//! - [`replace`] - final placeholder substitution
//! - [`generate`] - the generation pass tying the above together
//!
//! ## Example
//!
//! ```
//! use classdump_core::{
//!     generate, BuiltinTemplates, Constructor, Definition, DefinitionCollection,
//!     DefinitionKind, GenerateOptions, PlaceholderReplacer, Psr4Locator,
//! };
//!
//! let collection = DefinitionCollection::from_definitions(vec![Definition::new(
//!     DefinitionKind::ValueObject,
//!     "Foo",
//!     "Bar",
//!     vec![Constructor::new("String")],
//! )])
//! .unwrap();
//!
//! let files = generate(
//!     &collection,
//!     &Psr4Locator::new("src"),
//!     &BuiltinTemplates,
//!     &PlaceholderReplacer,
//!     &GenerateOptions::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(files.len(), 1);
//! ```

pub mod dumper;
pub mod generate;
pub mod locate;
pub mod marker;
pub mod model;
pub mod replace;
pub mod template;

pub use generate::{
    dump, generate, GenerateError, GenerateOptions, GeneratedFile, GeneratedFiles, OutputLayout,
    BANNER,
};
pub use locate::{PathLocator, Psr4Locator};
pub use marker::{ExternalMarkers, MarkerError, ResolvedParent};
pub use model::{
    Argument, CollectionError, Constructor, Definition, DefinitionCollection, DefinitionKind,
};
pub use replace::{PlaceholderReplacer, Replacer};
pub use template::{BuiltinTemplates, DirectoryTemplates, Template, TemplateError, TemplateLoader};
