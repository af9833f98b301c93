//! TypeScript rendering of a [`Registry`] for the console front-end.

use crate::model::{Category, Param};
use crate::registry::Registry;

/// Render the registry as a TypeScript module exporting `MESHCORE_COMMANDS`
/// and `MESHCORE_CATEGORIES`.
///
/// Field names are camelCased (`serialOnly`, `hasParam`); reply formats are
/// not included.
pub fn render_typescript(registry: &Registry) -> String {
    let mut lines = vec![
        "// Auto-generated from MeshCore CommonCLI.cpp".to_string(),
        format!("// Generated: {}", registry.version),
        format!("// Source: {}", registry.source_url),
        String::new(),
        "export interface MeshCoreCommand {".to_string(),
        "  name: string;".to_string(),
        "  category: string;".to_string(),
        "  params: { name: string; type: string }[];".to_string(),
        "  description: string;".to_string(),
        "  serialOnly: boolean;".to_string(),
        "  hasParam: boolean;".to_string(),
        "}".to_string(),
        String::new(),
        "export const MESHCORE_COMMANDS: MeshCoreCommand[] = [".to_string(),
    ];

    for cmd in &registry.commands {
        lines.push("  {".to_string());
        lines.push(format!("    name: {},", js_string(&cmd.name)));
        let category = js_string(cmd.category.as_str());
        lines.push(format!("    category: {category},"));
        lines.push(format!("    params: {},", params_literal(&cmd.params)));
        lines.push(format!("    description: {},", js_string(&cmd.description)));
        lines.push(format!("    serialOnly: {},", cmd.serial_only));
        lines.push(format!("    hasParam: {},", cmd.has_param));
        lines.push("  },".to_string());
    }

    lines.push("];".to_string());
    lines.push(String::new());
    lines.push(format!(
        "export const MESHCORE_CATEGORIES = {};",
        categories_literal(&registry.categories)
    ));
    lines.push(String::new());

    lines.join("\n")
}

fn js_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

fn params_literal(params: &[Param]) -> String {
    let items: Vec<String> = params
        .iter()
        .map(|p| {
            format!(
                "{{\"name\": {}, \"type\": {}}}",
                js_string(&p.name),
                js_string(p.r#type.as_str())
            )
        })
        .collect();
    format!("[{}]", items.join(", "))
}

fn categories_literal(categories: &[Category]) -> String {
    let items: Vec<String> = categories.iter().map(|c| js_string(c.as_str())).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CommandDescriptor, FieldMap, ParamType};
    use crate::registry::RegistryInfo;

    fn registry() -> Registry {
        let cmds = vec![
            CommandDescriptor {
                name: "set af".into(),
                category: Category::Set,
                params: vec![Param::value(ParamType::Float)],
                response_format: Some("OK".into()),
                description: "Set \"airtime\" factor".into(),
                serial_only: false,
                has_param: true,
            },
            CommandDescriptor {
                name: "erase".into(),
                category: Category::System,
                params: Vec::new(),
                response_format: None,
                description: "Erase filesystem (serial only)".into(),
                serial_only: true,
                has_param: false,
            },
        ];
        Registry::assemble(
            cmds,
            FieldMap::new(),
            RegistryInfo {
                version: "2026-03-04".into(),
                source_url: "https://example.invalid/CommonCLI.cpp".into(),
                generated_by: "test".into(),
            },
        )
    }

    #[test]
    fn renders_header_and_entries() {
        let ts = render_typescript(&registry());
        let header = "// Auto-generated from MeshCore CommonCLI.cpp\n// Generated: 2026-03-04\n";
        let first = "MeshCoreCommand[] = [\n  {\n    name: \"set af\",\n";
        let params = "    params: [{\"name\": \"value\", \"type\": \"float\"}],\n";
        let description = "    description: \"Set \\\"airtime\\\" factor\",\n";
        assert!(ts.starts_with(header));
        assert!(ts.contains(first));
        assert!(ts.contains(params));
        assert!(ts.contains(description));
        assert!(ts.contains("    serialOnly: true,\n    hasParam: false,\n"));
        assert!(ts.contains("    params: [],\n"));
        assert!(!ts.contains("response_format"));
    }

    #[test]
    fn categories_follow_registry_order() {
        let ts = render_typescript(&registry());
        let tail = "];\n\nexport const MESHCORE_CATEGORIES = [\"set\", \"system\"];\n";
        assert!(ts.ends_with(tail));
    }
}
