//! Fixed knowledge about the MeshCore command set: category rules,
//! descriptions, serial-only names, and reply-format normalization.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::model::Category;

const NEIGHBOR_COMMANDS: &[&str] = &["neighbors", "neighbor.remove"];

const SYSTEM_COMMANDS: &[&str] = &[
    "reboot",
    "advert",
    "clock",
    "clock sync",
    "time",
    "ver",
    "board",
    "erase",
    "start ota",
    "clear stats",
    "password",
];

/// Ordered prefix rules; the first prefix that matches decides the category.
const PREFIX_RULES: &[(&str, Category)] = &[
    ("get ", Category::Get),
    ("set ", Category::Set),
    ("log", Category::Logging),
    ("gps", Category::Gps),
    ("sensor", Category::Sensor),
    ("bridge", Category::Bridge),
    ("stats", Category::Stats),
];

/// Classify a full command name.
pub fn classify_category(name: &str) -> Category {
    if let Some((_, category)) = PREFIX_RULES
        .iter()
        .find(|(prefix, _)| name.starts_with(prefix))
    {
        return *category;
    }
    if NEIGHBOR_COMMANDS.contains(&name) {
        Category::Neighbor
    } else if SYSTEM_COMMANDS.contains(&name) {
        Category::System
    } else if name == "tempradio" {
        Category::Radio
    } else {
        Category::Other
    }
}

/// Commands that MeshCore only accepts from the local serial console.
pub const SERIAL_ONLY_COMMANDS: &[&str] = &[
    "get prv.key",
    "set prv.key",
    "erase",
    "log",
    "stats-packets",
    "stats-radio",
    "stats-core",
    "set freq",
];

/// Hand-written descriptions for the known MeshCore commands.
pub const COMMAND_DESCRIPTIONS: &[(&str, &str)] = &[
    // System
    ("reboot", "Reboot the device"),
    ("advert", "Send self advertisement"),
    ("clock", "Display current time"),
    ("clock sync", "Sync clock from sender timestamp"),
    ("time", "Set time to epoch seconds"),
    ("ver", "Show firmware version and build date"),
    ("board", "Show board/manufacturer name"),
    ("erase", "Erase filesystem (serial only)"),
    ("start ota", "Start OTA firmware update"),
    ("clear stats", "Reset statistics counters"),
    ("password", "Change admin password"),
    // Get commands
    ("get af", "Get airtime factor"),
    ("get name", "Get node name"),
    ("get repeat", "Get repeat/forward status (on/off)"),
    ("get lat", "Get latitude"),
    ("get lon", "Get longitude"),
    ("get radio", "Get radio params (freq,bw,sf,cr)"),
    ("get freq", "Get frequency (MHz)"),
    ("get tx", "Get TX power (dBm)"),
    ("get public.key", "Get public key (hex)"),
    ("get prv.key", "Get private key (serial only)"),
    ("get role", "Get device role"),
    ("get rxdelay", "Get RX delay base"),
    ("get txdelay", "Get TX delay factor"),
    ("get direct.txdelay", "Get direct TX delay factor"),
    ("get flood.max", "Get max flood hops"),
    ("get guest.password", "Get guest password"),
    ("get allow.read.only", "Get read-only access setting"),
    ("get advert.interval", "Get local advert interval (minutes)"),
    (
        "get flood.advert.interval",
        "Get flood advert interval (hours)",
    ),
    ("get int.thresh", "Get interference threshold"),
    ("get agc.reset.interval", "Get AGC reset interval (seconds)"),
    ("get multi.acks", "Get multi-ack setting"),
    ("get adc.multiplier", "Get ADC multiplier for battery"),
    ("get bridge.type", "Get bridge type (rs232/espnow/none)"),
    ("get bridge.enabled", "Get bridge enabled status"),
    ("get bridge.delay", "Get bridge delay (ms)"),
    ("get bridge.source", "Get bridge packet source"),
    ("get bridge.baud", "Get bridge baud rate"),
    ("get bridge.channel", "Get bridge channel (ESP-NOW)"),
    ("get bridge.secret", "Get bridge encryption secret"),
    // Set commands (same as get but with set prefix)
    ("set af", "Set airtime factor (0-9)"),
    ("set name", "Set node name"),
    ("set repeat", "Set repeat/forward (on/off)"),
    ("set lat", "Set latitude"),
    ("set lon", "Set longitude"),
    ("set radio", "Set radio params (freq bw sf cr)"),
    (
        "set freq",
        "Set frequency MHz (serial only, reboot required)",
    ),
    ("set tx", "Set TX power (dBm)"),
    ("set prv.key", "Set private key (serial only)"),
    ("set rxdelay", "Set RX delay base"),
    ("set txdelay", "Set TX delay factor"),
    ("set direct.txdelay", "Set direct TX delay factor"),
    ("set flood.max", "Set max flood hops (0-64)"),
    ("set guest.password", "Set guest password"),
    ("set allow.read.only", "Set read-only access (on/off)"),
    (
        "set advert.interval",
        "Set local advert interval (60-240 min, 0=off)",
    ),
    (
        "set flood.advert.interval",
        "Set flood advert interval (3-48 hours, 0=off)",
    ),
    ("set int.thresh", "Set interference threshold"),
    (
        "set agc.reset.interval",
        "Set AGC reset interval (seconds, rounded to 4)",
    ),
    ("set multi.acks", "Set multi-ack (0/1)"),
    ("set adc.multiplier", "Set ADC multiplier"),
    ("set bridge.enabled", "Enable/disable bridge"),
    ("set bridge.delay", "Set bridge delay (0-10000 ms)"),
    ("set bridge.source", "Set bridge source (rx/tx)"),
    ("set bridge.baud", "Set bridge baud (9600-115200)"),
    ("set bridge.channel", "Set bridge channel (1-14)"),
    ("set bridge.secret", "Set bridge encryption secret"),
    // Neighbor
    ("neighbors", "List neighbors"),
    ("neighbor.remove", "Remove neighbor by pubkey"),
    // Radio
    (
        "tempradio",
        "Apply temporary radio params (freq bw sf cr timeout_mins)",
    ),
    // Logging
    ("log", "Dump log file (serial only)"),
    ("log start", "Start packet logging"),
    ("log stop", "Stop packet logging"),
    ("log erase", "Erase log file"),
    // Stats
    ("stats-packets", "Show packet statistics (serial only)"),
    ("stats-radio", "Show radio statistics (serial only)"),
    ("stats-core", "Show core statistics (serial only)"),
    // Sensor
    ("sensor get", "Get sensor/custom variable value"),
    ("sensor set", "Set sensor/custom variable value"),
    ("sensor list", "List all sensor/custom variables"),
    // GPS
    ("gps", "Show GPS status"),
    ("gps on", "Enable GPS"),
    ("gps off", "Disable GPS"),
    ("gps sync", "Sync time from GPS"),
    ("gps setloc", "Set node location from GPS"),
    ("gps advert", "Get/set GPS advert location policy"),
];

/// Description and serial-only lookup tables handed to the extractor.
#[derive(Debug, Clone)]
pub struct Catalog {
    descriptions: HashMap<&'static str, &'static str>,
    serial_only: HashSet<&'static str>,
}

impl Catalog {
    /// Build a catalog from explicit tables.
    pub fn new(
        descriptions: &[(&'static str, &'static str)],
        serial_only: &[&'static str],
    ) -> Self {
        Self {
            descriptions: descriptions.iter().copied().collect(),
            serial_only: serial_only.iter().copied().collect(),
        }
    }

    /// The MeshCore tables.
    pub fn meshcore() -> Self {
        Self::new(COMMAND_DESCRIPTIONS, SERIAL_ONLY_COMMANDS)
    }

    /// Description for `name`, or a generated one for unknown commands.
    pub fn describe(&self, name: &str) -> String {
        match self.descriptions.get(name) {
            Some(text) => (*text).to_string(),
            None => format!("Execute {name} command"),
        }
    }

    /// Whether `name` is serial-only regardless of where it was matched.
    pub fn is_serial_only(&self, name: &str) -> bool {
        self.serial_only.contains(name)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::meshcore()
    }
}

/// printf conversions rewritten to symbolic placeholders, applied in order.
static PLACEHOLDERS: LazyLock<[(Regex, &'static str); 4]> = LazyLock::new(|| {
    let re = |pattern: &str| Regex::new(pattern).expect("static regex must compile");
    [
        (re(r"%0?2?d"), "{int}"),
        (re(r"%s"), "{str}"),
        (re(r"%u"), "{uint}"),
        (re(r"%\d*(?:\.\d*)?l?f"), "{float}"),
    ]
});

/// Replace printf conversions in a reply template with `{int}`, `{str}`,
/// `{uint}` and `{float}`.
///
/// Empty or absent templates yield `None`.
pub fn normalize_response_format(format: Option<&str>) -> Option<String> {
    let format = format.filter(|f| !f.is_empty())?;
    let mut out = format.to_string();
    for (pattern, placeholder) in PLACEHOLDERS.iter() {
        out = pattern.replace_all(&out, *placeholder).into_owned();
    }
    Some(out)
}
