//! Typed records produced by the extractor and the struct-field parser.
//!
//! Field names and enum spellings match the JSON registry consumed by the
//! console front-end, so they are part of the output contract.

use serde::{Deserialize, Serialize};

/// Functional category of a CLI command.
///
/// Closed set: names that fit no rule land in [`Category::Other`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// `get <key>` configuration reads.
    Get,
    /// `set <key> <value>` configuration writes.
    Set,
    /// Packet log control (`log`, `log start`, ...).
    Logging,
    /// GPS control and status.
    Gps,
    /// Sensor / custom variable access.
    Sensor,
    /// RS232 / ESP-NOW bridge control.
    Bridge,
    /// Statistics dumps (`stats-packets`, ...).
    Stats,
    /// Neighbor table commands.
    Neighbor,
    /// Device-level commands (reboot, clock, version, ...).
    System,
    /// Temporary radio parameter changes.
    Radio,
    /// Config sub-commands matched outside a get/set block.
    Config,
    /// Anything not covered above.
    Other,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 12] = [
        Category::Get,
        Category::Set,
        Category::Logging,
        Category::Gps,
        Category::Sensor,
        Category::Bridge,
        Category::Stats,
        Category::Neighbor,
        Category::System,
        Category::Radio,
        Category::Config,
        Category::Other,
    ];

    /// The serialized label, also used as the registry sort key.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Get => "get",
            Category::Set => "set",
            Category::Logging => "logging",
            Category::Gps => "gps",
            Category::Sensor => "sensor",
            Category::Bridge => "bridge",
            Category::Stats => "stats",
            Category::Neighbor => "neighbor",
            Category::System => "system",
            Category::Radio => "radio",
            Category::Config => "config",
            Category::Other => "other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primitive type inferred for a command parameter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// Parsed with `atof`.
    Float,
    /// Parsed with `atoi` / `_atoi`.
    Int,
    /// Copied with `strncpy`.
    String,
}

impl ParamType {
    /// The serialized label.
    pub fn as_str(self) -> &'static str {
        match self {
            ParamType::Float => "float",
            ParamType::Int => "int",
            ParamType::String => "string",
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single inferred command parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Param {
    /// Parameter name. The source never names its arguments, so this is `value`.
    pub name: String,
    /// Inferred primitive type.
    #[serde(rename = "type")]
    pub r#type: ParamType,
}

impl Param {
    /// Name given to every inferred parameter.
    pub const DEFAULT_NAME: &'static str = "value";

    /// A parameter with the default name and the given type.
    pub fn value(r#type: ParamType) -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            r#type,
        }
    }
}

/// One CLI command recovered from `CommonCLI.cpp`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// Full command string, e.g. `set af` or `tempradio`.
    pub name: String,
    /// Functional category.
    pub category: Category,
    /// Inferred parameters, in the order their conversions were seen.
    pub params: Vec<Param>,
    /// Reply template with placeholders normalized to `{int}`, `{str}`,
    /// `{uint}` and `{float}`.
    pub response_format: Option<String>,
    /// Human-readable description.
    pub description: String,
    /// Only reachable from the local serial console.
    pub serial_only: bool,
    /// Takes an argument.
    pub has_param: bool,
}

/// C primitive types recognised inside a struct body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PrimitiveType {
    /// `float`
    #[serde(rename = "float")]
    Float,
    /// `double`
    #[serde(rename = "double")]
    Double,
    /// `char`
    #[serde(rename = "char")]
    Char,
    /// `uint8_t`
    #[serde(rename = "uint8_t")]
    U8,
    /// `uint16_t`
    #[serde(rename = "uint16_t")]
    U16,
    /// `uint32_t`
    #[serde(rename = "uint32_t")]
    U32,
    /// `int`
    #[serde(rename = "int")]
    Int,
}

impl PrimitiveType {
    /// Map a C type keyword to its variant.
    pub fn from_c_name(name: &str) -> Option<Self> {
        Some(match name {
            "float" => PrimitiveType::Float,
            "double" => PrimitiveType::Double,
            "char" => PrimitiveType::Char,
            "uint8_t" => PrimitiveType::U8,
            "uint16_t" => PrimitiveType::U16,
            "uint32_t" => PrimitiveType::U32,
            "int" => PrimitiveType::Int,
            _ => return None,
        })
    }

    /// The C spelling of this type.
    pub fn c_name(self) -> &'static str {
        match self {
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Char => "char",
            PrimitiveType::U8 => "uint8_t",
            PrimitiveType::U16 => "uint16_t",
            PrimitiveType::U32 => "uint32_t",
            PrimitiveType::Int => "int",
        }
    }
}

/// A member of a C struct declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Primitive member type.
    #[serde(rename = "type")]
    pub r#type: PrimitiveType,
    /// Length of a fixed-size array member, `None` for scalars.
    pub array_size: Option<usize>,
}

/// Struct members keyed by field name, in declaration order.
pub type FieldMap = indexmap::IndexMap<String, FieldDescriptor>;
