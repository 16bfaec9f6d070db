//! Modifier - Enchantment and attachment stat modifiers
//!
//! Shape checks on raw catalog data happen once, here, while deserializing.
//! The engine only ever sees the resolved variants.

mod passes;

pub use passes::{apply_attachment_mods, apply_ordered, StatRule};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How an enchantment modifier combines with the running value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModKind {
    /// `value` is added
    Flat,
    /// `value * reference_base` is added
    PercentAdd,
    /// Running value is multiplied by `1 + value`
    PercentMult,
    /// Unrecognized code or name; applying it leaves the value unchanged
    Unknown,
}

impl ModKind {
    /// Numeric code used by the game data (100 / 200 / 300)
    pub fn code(&self) -> i64 {
        match self {
            ModKind::Flat => 100,
            ModKind::PercentAdd => 200,
            ModKind::PercentMult => 300,
            ModKind::Unknown => 0,
        }
    }

    pub fn from_code(code: i64) -> ModKind {
        match code {
            100 => ModKind::Flat,
            200 => ModKind::PercentAdd,
            300 => ModKind::PercentMult,
            _ => ModKind::Unknown,
        }
    }

    pub fn from_name(name: &str) -> ModKind {
        match name {
            "Flat" => ModKind::Flat,
            "PercentAdd" => ModKind::PercentAdd,
            "PercentMult" => ModKind::PercentMult,
            _ => ModKind::Unknown,
        }
    }

    /// Whether the value is displayed as a percentage
    pub fn is_percent(&self) -> bool {
        matches!(self, ModKind::PercentAdd | ModKind::PercentMult)
    }
}

impl Default for ModKind {
    fn default() -> Self {
        ModKind::Unknown
    }
}

impl Serialize for ModKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for ModKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawKind {
            Code(i64),
            FloatCode(f64),
            Name(String),
            Other(serde_json::Value),
        }

        Ok(match RawKind::deserialize(deserializer)? {
            RawKind::Code(code) => ModKind::from_code(code),
            RawKind::FloatCode(code) if code.fract() == 0.0 => ModKind::from_code(code as i64),
            RawKind::Name(name) => ModKind::from_name(&name),
            RawKind::FloatCode(_) | RawKind::Other(_) => ModKind::Unknown,
        })
    }
}

/// A single stat modifier carried by an oil or scroll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    /// Target stat name
    pub attribute: String,
    pub value: f64,
    #[serde(
        rename = "modType",
        alias = "mod_type",
        alias = "mod_type_id",
        default
    )]
    pub kind: ModKind,
}

impl Modifier {
    pub fn new(attribute: impl Into<String>, value: f64, kind: ModKind) -> Self {
        Modifier {
            attribute: attribute.into(),
            value,
            kind,
        }
    }

    pub fn flat(attribute: impl Into<String>, value: f64) -> Self {
        Modifier::new(attribute, value, ModKind::Flat)
    }

    pub fn percent_add(attribute: impl Into<String>, value: f64) -> Self {
        Modifier::new(attribute, value, ModKind::PercentAdd)
    }

    pub fn percent_mult(attribute: impl Into<String>, value: f64) -> Self {
        Modifier::new(attribute, value, ModKind::PercentMult)
    }

    /// Apply to `current`, scaling PercentAdd by `reference`
    pub fn apply(&self, current: f64, reference: f64, rule: StatRule) -> f64 {
        match (self.kind, rule) {
            (ModKind::Unknown, _) => current,
            (_, StatRule::AdditiveOnly) => current + self.value,
            (ModKind::Flat, StatRule::Standard) => current + self.value,
            (ModKind::PercentAdd, StatRule::Standard) => current + reference * self.value,
            (ModKind::PercentMult, StatRule::Standard) => current * (1.0 + self.value),
        }
    }
}

/// How an attachment modifier combines with the running value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentModKind {
    Flat,
    /// `value * running` is added
    Percent,
    Unknown,
}

/// An attachment's contribution to one stat
///
/// Catalog data writes these either as a bare number (flat) or as
/// `{ "value": n, "type": "flat" | "percent" }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttachmentModifier {
    pub value: f64,
    #[serde(rename = "type")]
    pub kind: AttachmentModKind,
}

impl AttachmentModifier {
    pub fn flat(value: f64) -> Self {
        AttachmentModifier {
            value,
            kind: AttachmentModKind::Flat,
        }
    }

    pub fn percent(value: f64) -> Self {
        AttachmentModifier {
            value,
            kind: AttachmentModKind::Percent,
        }
    }

    /// Apply to the running value, which is also the percent base
    pub fn apply(&self, current: f64, rule: StatRule) -> f64 {
        match (self.kind, rule) {
            (AttachmentModKind::Unknown, _) => current,
            (_, StatRule::AdditiveOnly) => current + self.value,
            (AttachmentModKind::Flat, StatRule::Standard) => current + self.value,
            (AttachmentModKind::Percent, StatRule::Standard) => current + current * self.value,
        }
    }
}

impl<'de> Deserialize<'de> for AttachmentModifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawAttachmentMod {
            Plain(f64),
            Detailed {
                value: f64,
                #[serde(rename = "type", default)]
                kind: Option<String>,
            },
        }

        Ok(match RawAttachmentMod::deserialize(deserializer)? {
            RawAttachmentMod::Plain(value) => AttachmentModifier::flat(value),
            RawAttachmentMod::Detailed { value, kind } => {
                let kind = match kind.as_deref() {
                    None | Some("flat") => AttachmentModKind::Flat,
                    Some("percent") => AttachmentModKind::Percent,
                    Some(_) => AttachmentModKind::Unknown,
                };
                AttachmentModifier { value, kind }
            }
        })
    }
}
