//! xcube-gen library interface
//!
//! Turns a human-maintained cube listing into an XMage deck file:
//!
//! ```text
//! listing → sanitizer → override table | oracle + oldest-print selector
//!         → memoized mapper → cube (grouped, counted, sorted) → exporter
//! ```
//!
//! The listing source, the card oracle and the set catalog are traits, so
//! the pipeline runs the same against the public API or in-memory fakes.

pub mod cube;
pub mod export;
pub mod faces;
pub mod mapper;
pub mod memo;
pub mod oracle;
pub mod overrides;
pub mod pipeline;
pub mod sanitizer;
pub mod selector;
pub mod sets;
pub mod source;

pub use export::{Exporter, XMageExporter};
pub use mapper::CardMapper;
pub use oracle::{CardOracle, PrintRecord, SetCatalog, SetInfo};
pub use overrides::OverrideTable;
pub use pipeline::generate;
pub use sanitizer::NameSanitizer;
pub use selector::OldestPrintSelector;
pub use sets::SetEligibility;
pub use source::{CollectionSource, ListingFile};
