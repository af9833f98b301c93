//! Line matchers for `CommonCLI.cpp`.
//!
//! Each upstream source shape the extractor cares about is recognised by one
//! function here, so a change in upstream style only touches its matcher.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::ParamType;

static COMMAND_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"memcmp\s*\(\s*(command|config)\s*,\s*"([^"]+)"\s*,\s*(\d+)\s*\)"#)
        .expect("static regex must compile")
});
static SPRINTF_REPLY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"sprintf\s*\(\s*reply\s*,\s*"([^"]*)""#).expect("static regex must compile")
});
static STRCPY_REPLY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"strcpy\s*\(\s*reply\s*,\s*"([^"]*)""#).expect("static regex must compile")
});
static SERIAL_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"sender_timestamp\s*==\s*0").expect("static regex must compile"));

/// Variable a command literal is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareTarget {
    /// The full command line (`command`).
    Command,
    /// The remainder after `get ` / `set ` (`config`).
    Config,
}

/// A `memcmp(<var>, "<literal>", <len>)` comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandToken<'a> {
    /// Which variable was compared.
    pub target: CompareTarget,
    /// The string literal, untrimmed.
    pub literal: &'a str,
    /// The length argument as written. Not checked against `literal`.
    pub declared_len: Option<usize>,
}

impl CommandToken<'_> {
    /// The literal ends in whitespace, i.e. an argument follows the keyword.
    pub fn takes_argument(&self) -> bool {
        self.literal.ends_with(char::is_whitespace)
    }
}

/// First command comparison on the line.
pub fn command_token(line: &str) -> Option<CommandToken<'_>> {
    let caps = COMMAND_TOKEN_RE.captures(line)?;
    let target = match &caps[1] {
        "config" => CompareTarget::Config,
        _ => CompareTarget::Command,
    };
    let literal = caps.get(2)?.as_str();
    let declared_len = caps[3].parse().ok();
    Some(CommandToken {
        target,
        literal,
        declared_len,
    })
}

/// Reply template written on this line, if any.
///
/// `sprintf(reply, "...")` is preferred over `strcpy(reply, "...")` when both
/// appear. Empty literals count as no template.
pub fn reply_template(line: &str) -> Option<&str> {
    [&*SPRINTF_REPLY_RE, &*STRCPY_REPLY_RE]
        .into_iter()
        .filter_map(|re| re.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .find(|literal| !literal.is_empty())
}

/// Argument conversion performed on this line, if any.
///
/// At most one per line; float beats int beats string.
pub fn param_conversion(line: &str) -> Option<ParamType> {
    if line.contains("atof(") {
        Some(ParamType::Float)
    } else if line.contains("atoi(") {
        // also covers `_atoi(`
        Some(ParamType::Int)
    } else if line.contains("strncpy(") {
        Some(ParamType::String)
    } else {
        None
    }
}

/// `sender_timestamp == 0`: the branch only runs for serial input.
pub fn is_serial_only_marker(line: &str) -> bool {
    SERIAL_ONLY_RE.is_match(line)
}

/// Start of the `get` sub-command block.
pub fn opens_get_block(line: &str) -> bool {
    line.contains("GET commands") || line.contains(r#"memcmp(command, "get ", 4)"#)
}

/// Start of the `set` sub-command block.
pub fn opens_set_block(line: &str) -> bool {
    line.contains("SET commands") || line.contains(r#"memcmp(command, "set ", 4)"#)
}

/// A new top-level command branch that does not continue the block whose
/// sub-command prefix is `prefix` (`"get "` or `"set "`).
pub fn leaves_block(line: &str, prefix: &str) -> bool {
    line.contains("} else if (memcmp(command") && !line.contains(prefix)
}

/// `} else ...`: a new branch of the current conditional.
pub fn starts_else_branch(line: &str) -> bool {
    line.trim().starts_with("} else")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_token_captures_target_literal_and_len() {
        let line = r#"} else if (memcmp(command, "neighbor.remove ", 16) == 0) {"#;
        let tok = command_token(line).unwrap();
        assert_eq!(tok.target, CompareTarget::Command);
        assert_eq!(tok.literal, "neighbor.remove ");
        assert_eq!(tok.declared_len, Some(16));
        assert!(tok.takes_argument());

        let tok = command_token(r#"if (memcmp(config, "af", 2) == 0) {"#).unwrap();
        assert_eq!(tok.target, CompareTarget::Config);
        assert!(!tok.takes_argument());
    }

    #[test]
    fn multi_word_literal_without_trailing_space_takes_no_argument() {
        let line = r#"} else if (memcmp(command, "log start", 9) == 0) {"#;
        let tok = command_token(line).unwrap();
        assert_eq!(tok.literal, "log start");
        assert!(!tok.takes_argument());

        let tok = command_token(r#"memcmp(command, "sensor list", 11)"#).unwrap();
        assert!(!tok.takes_argument());
        let tok = command_token(r#"memcmp(command, "sensor get ", 11)"#).unwrap();
        assert!(tok.takes_argument());
    }

    #[test]
    fn command_token_tolerates_spacing_and_len_mismatch() {
        let tok = command_token(r#"memcmp( command ,"ver" , 9 )"#).unwrap();
        assert_eq!(tok.literal, "ver");
        assert_eq!(tok.declared_len, Some(9));
    }

    #[test]
    fn command_token_ignores_other_variables() {
        assert!(command_token(r#"memcmp(buf, "ver", 3)"#).is_none());
        assert!(command_token(r#"strcmp(command, "ver")"#).is_none());
        assert!(command_token(r#"memcmp(command, "", 0)"#).is_none());
    }

    #[test]
    fn reply_template_prefers_sprintf_and_skips_empty() {
        let sprintf = r#"sprintf(reply, "> %d", x);"#;
        assert_eq!(reply_template(sprintf), Some("> %d"));
        assert_eq!(reply_template(r#"strcpy(reply, "OK");"#), Some("OK"));
        let both = r#"strcpy(reply, "OK"); sprintf(reply, "> %s", s);"#;
        assert_eq!(reply_template(both), Some("> %s"));
        assert_eq!(reply_template(r#"strcpy(reply, "");"#), None);
        assert_eq!(reply_template(r#"sprintf(tmp, "%d", x);"#), None);
    }

    #[test]
    fn param_conversion_priority() {
        let float = "x = atof(&config[3]);";
        let int = "x = _atoi(&config[3]);";
        let string = "StrHelper::strncpy(p, &config[5], sizeof(p));";
        assert_eq!(param_conversion(float), Some(ParamType::Float));
        assert_eq!(param_conversion(int), Some(ParamType::Int));
        assert_eq!(param_conversion(string), Some(ParamType::String));
        let mixed = "a = atoi(s); b = atof(t);";
        assert_eq!(param_conversion(mixed), Some(ParamType::Float));
        assert_eq!(param_conversion("strcpy(reply, \"OK\");"), None);
    }

    #[test]
    fn block_markers() {
        let get = r#"} else if (memcmp(command, "get ", 4) == 0) {"#;
        let ver = r#"} else if (memcmp(command, "ver", 3) == 0) {"#;
        let sub = r#"} else if (memcmp(config, "af", 2) == 0) {"#;
        assert!(opens_get_block("  // GET commands"));
        assert!(opens_get_block(get));
        assert!(opens_set_block("  // SET commands"));
        assert!(leaves_block(ver, "get "));
        assert!(!leaves_block(get, "get "));
        assert!(!leaves_block(sub, "get "));
    }

    #[test]
    fn serial_and_else_markers() {
        assert!(is_serial_only_marker("if (sender_timestamp==0 && x) {"));
        assert!(!is_serial_only_marker("sender_timestamp = 0;"));
        assert!(starts_else_branch("    } else if (x) {"));
        assert!(!starts_else_branch("    }"));
    }
}
