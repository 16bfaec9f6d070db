//! Catalog records: weapons and the modifier sources applied to them

mod attachment;
mod caliber;
mod enchantment;
mod weapon;

pub use attachment::{Attachment, AttachmentEffects};
pub use caliber::{CaliberStats, CaliberTable};
pub use enchantment::{Enchantment, EnchantmentEffects};
pub use weapon::Weapon;

/// Trait for catalog records that contribute modifiers to a weapon
pub trait ModifierSource {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Display name
    fn name(&self) -> &str;

    /// Stat names this source touches
    fn stat_names(&self) -> Vec<&str>;

    /// Whether the source changes anything when selected
    fn has_effect(&self) -> bool {
        !self.stat_names().is_empty()
    }
}
