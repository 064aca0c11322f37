//! Vercel CLI invocations for environment variable management.
//!
//! `vercel env add <NAME> <target>` reads the value from stdin;
//! `vercel env rm <NAME> <target> -y` skips the confirmation prompt.

use crate::config::ToolConfig;
use crate::executor::Invocation;

pub const ADD_ACTION: &str = "env.add";
pub const REMOVE_ACTION: &str = "env.rm";

fn env_invocation(tool: &ToolConfig, operation: &[&str]) -> Invocation {
    let mut args = tool.base_args.clone();
    args.push("env".to_string());
    args.extend(operation.iter().map(|s| s.to_string()));
    args.extend(tool.extra_args.iter().cloned());

    Invocation::new(tool.program.clone(), args)
}

/// `vercel env add NAME TARGET`, value piped through stdin without a
/// trailing newline.
pub fn add(tool: &ToolConfig, name: &str, target: &str, value: &str) -> Invocation {
    env_invocation(tool, &["add", name, target]).with_stdin(value)
}

/// `vercel env rm NAME TARGET -y`
pub fn remove(tool: &ToolConfig, name: &str, target: &str) -> Invocation {
    env_invocation(tool, &["rm", name, target, "-y"])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(invocation: &Invocation) -> Vec<&str> {
        invocation.args.iter().map(String::as_str).collect()
    }

    #[test]
    fn add_pipes_value_through_stdin() {
        let invocation = add(&ToolConfig::default(), "API_KEY", "production", "v a l'ue");

        assert_eq!(invocation.program, "npx");
        assert_eq!(args(&invocation), ["vercel", "env", "add", "API_KEY", "production"]);
        assert_eq!(invocation.stdin.as_deref(), Some("v a l'ue"));
    }

    #[test]
    fn remove_is_non_interactive() {
        let invocation = remove(&ToolConfig::default(), "API_KEY", "preview");

        assert_eq!(args(&invocation), ["vercel", "env", "rm", "API_KEY", "preview", "-y"]);
        assert!(invocation.stdin.is_none());
    }

    #[test]
    fn extra_args_follow_operation() {
        let tool = ToolConfig {
            program: "vercel".to_string(),
            base_args: vec![],
            extra_args: vec!["--scope".to_string(), "team".to_string()],
        };
        let invocation = remove(&tool, "A", "production");

        assert_eq!(invocation.program, "vercel");
        assert_eq!(
            args(&invocation),
            ["env", "rm", "A", "production", "-y", "--scope", "team"]
        );
    }
}
