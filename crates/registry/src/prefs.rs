//! Struct member extraction from `CommonCLI.h`.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{FieldDescriptor, FieldMap, PrimitiveType};

/// Struct parsed by default: the node preferences persisted by the firmware.
pub const DEFAULT_STRUCT_NAME: &str = "NodePrefs";

static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(float|double|char|uint8_t|uint16_t|uint32_t|int)\s+(\w+)(?:\[(\d+)\])?")
        .expect("static regex must compile")
});

/// Extract the primitive members of `struct <struct_name> { ... }`.
///
/// Returns an empty map when the struct is absent. Members of other types are
/// skipped, and a repeated member name keeps the last declaration.
pub fn parse_struct_fields(header: &str, struct_name: &str) -> FieldMap {
    let mut fields = FieldMap::new();
    let Some(body) = struct_body(header, struct_name) else {
        tracing::warn!(struct_name, "struct not found in header");
        return fields;
    };

    for caps in FIELD_RE.captures_iter(body) {
        let Some(r#type) = PrimitiveType::from_c_name(&caps[1]) else {
            continue;
        };
        let array_size = caps.get(3).and_then(|m| m.as_str().parse().ok());
        let name = caps[2].to_string();
        fields.insert(name, FieldDescriptor { r#type, array_size });
    }
    fields
}

/// Parse the default [`DEFAULT_STRUCT_NAME`] struct.
pub fn parse_node_prefs(header: &str) -> FieldMap {
    parse_struct_fields(header, DEFAULT_STRUCT_NAME)
}

fn struct_body<'a>(header: &'a str, struct_name: &str) -> Option<&'a str> {
    let pattern = format!(r"struct {}\s*\{{([^}}]+)\}}", regex::escape(struct_name));
    let re = Regex::new(&pattern).ok()?;
    re.captures(header)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = r#"
#pragma once

struct NodePrefs {  // persisted to file
  float airtime_factor;
  char node_name[32];
  double node_lat, node_lon;
  char password[16];
  float freq;
  uint8_t tx_power_dbm;
  uint8_t disable_fwd;
  uint16_t advert_interval;   // minutes
  uint32_t guard;
  int8_t reserved;
};

class CommonCLI {
  int _prefs_version;
};
"#;

    #[test]
    fn parses_members_in_declaration_order() {
        let fields = parse_node_prefs(HEADER);
        let names: Vec<_> = fields.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            [
                "airtime_factor",
                "node_name",
                "node_lat",
                "password",
                "freq",
                "tx_power_dbm",
                "disable_fwd",
                "advert_interval",
                "guard",
            ]
        );
        assert_eq!(
            fields["node_name"],
            FieldDescriptor {
                r#type: PrimitiveType::Char,
                array_size: Some(32)
            }
        );
        assert_eq!(fields["advert_interval"].r#type, PrimitiveType::U16);
        assert_eq!(fields["freq"].array_size, None);
    }

    #[test]
    fn stops_at_struct_end() {
        let fields = parse_node_prefs(HEADER);
        assert!(!fields.contains_key("_prefs_version"));
    }

    #[test]
    fn missing_struct_yields_empty_map() {
        assert!(parse_node_prefs("struct Other { int x; };").is_empty());
        assert!(parse_node_prefs("").is_empty());
        assert!(parse_struct_fields(HEADER, "Missing").is_empty());
    }

    #[test]
    fn duplicate_member_keeps_last() {
        let fields = parse_node_prefs("struct NodePrefs { int a; char a[4]; };");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["a"].r#type, PrimitiveType::Char);
        assert_eq!(fields["a"].array_size, Some(4));
    }

    #[test]
    fn custom_struct_name() {
        let fields = parse_struct_fields("struct Radio{float bw;}", "Radio");
        assert_eq!(fields["bw"].r#type, PrimitiveType::Float);
    }
}
