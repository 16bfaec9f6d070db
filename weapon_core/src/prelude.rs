//! Prelude module for convenient imports
//!
//! ```rust
//! use weapon_core::prelude::*;
//! ```

// Catalog records
pub use crate::source::{Attachment, CaliberTable, Enchantment, ModifierSource, Weapon};
pub use crate::types::{stat, SlotCategory};

// Modifiers
pub use crate::modifier::{AttachmentModifier, ModKind, Modifier};

// Resolution
pub use crate::engine::{resolve, StatResult, StatSheet};

// Builds
pub use crate::build::{Build, BuildStore, FileStore, KeyValueStore};
pub use crate::catalog::Catalog;
