use clap::Args;
use serde::Serialize;
use vercel_env::config::EnvConfig;

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct ListArgs {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOutput {
    pub command: String,
    pub target: String,
    pub tool: String,
    pub entries: Vec<EntrySummary>,
    pub removals: Vec<String>,
}

/// Entry as shown to the operator. Literal values are summarized, not printed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySummary {
    pub name: String,
    pub source: String,
    pub description: String,
}

pub fn run(_args: ListArgs, global: &GlobalArgs) -> CmdResult<ListOutput> {
    let output = summarize(&global.config()?);

    if !global.json {
        print!("{}", render(&output));
    }

    Ok((output, 0))
}

fn summarize(config: &EnvConfig) -> ListOutput {
    let mut tool = vec![config.tool.program.clone()];
    tool.extend(config.tool.base_args.iter().cloned());
    tool.extend(config.tool.extra_args.iter().cloned());

    ListOutput {
        command: "list".to_string(),
        target: config.target.clone(),
        tool: vercel_env::shell::quote_args(&tool),
        entries: config
            .entries
            .iter()
            .map(|entry| EntrySummary {
                name: entry.name.clone(),
                source: entry.value.kind().to_string(),
                description: entry.value.describe(),
            })
            .collect(),
        removals: config.removals.clone(),
    }
}

fn render(output: &ListOutput) -> String {
    let width = output
        .entries
        .iter()
        .map(|e| e.name.len())
        .chain(output.removals.iter().map(String::len))
        .max()
        .unwrap_or(0);

    let mut text = format!("Target: {}\nTool: {}\n\nSet:\n", output.target, output.tool);
    for entry in &output.entries {
        text.push_str(&format!("  {:width$}  {}\n", entry.name, entry.description));
    }
    text.push_str("\nRemove:\n");
    for name in &output.removals {
        text.push_str(&format!("  {}\n", name));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use vercel_env::entry::EnvEntry;

    #[test]
    fn summary_never_contains_literal_values() {
        let config = EnvConfig {
            entries: vec![EnvEntry::literal("TOKEN", "super-secret")],
            ..EnvConfig::default()
        };

        let output = summarize(&config);
        let json = serde_json::to_string(&output).unwrap();

        assert!(!json.contains("super-secret"));
        assert!(!render(&output).contains("super-secret"));
        assert_eq!(output.entries[0].source, "literal");
    }

    #[test]
    fn render_lists_both_sections() {
        let config = EnvConfig {
            entries: vec![EnvEntry::from_env("A", "A")],
            removals: vec!["B".to_string()],
            ..EnvConfig::default()
        };

        let text = render(&summarize(&config));

        assert!(text.starts_with("Target: production\nTool: npx vercel\n"));
        assert!(text.contains("  A  env $A\n"));
        assert!(text.contains("Remove:\n  B\n"));
    }
}
