//! weapon_core - Weapon stat modifier resolution
//!
//! This library provides:
//! - Catalog: weapons, attachments, oils, scrolls and the caliber table
//! - Modifier: typed stat modifiers and the ordered three-pass application
//! - Engine: resolution of a weapon's final stats under a selection
//! - Build: selection rules and saved-build persistence

pub mod build;
pub mod catalog;
pub mod engine;
pub mod modifier;
pub mod prelude;
pub mod source;
pub mod types;

// Re-export core types for convenience
pub use build::{Build, BuildError, BuildStore, FileStore, KeyValueStore, MemoryStore, SavedBuild, StoreError};
pub use catalog::{Catalog, CatalogError, Settings};
pub use engine::{resolve, round2, StatResult, StatSheet};
pub use modifier::{AttachmentModKind, AttachmentModifier, ModKind, Modifier, StatRule};
pub use source::{Attachment, CaliberStats, CaliberTable, Enchantment, ModifierSource, Weapon};
pub use types::{stat, SlotCategory};
