use vercel_env::batch::{ConsoleReporter, Reporter, SilentReporter};
use vercel_env::config::{EnvConfig, ToolConfig};

pub type CmdResult<T> = vercel_env::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    pub(crate) target: String,
    pub(crate) tool: String,
    pub(crate) scope: Option<String>,
    pub(crate) dry_run: bool,
    pub(crate) json: bool,
}

impl GlobalArgs {
    /// Built-in configuration with the global flag overrides applied.
    pub(crate) fn config(&self) -> vercel_env::Result<EnvConfig> {
        let mut tool = ToolConfig::from_command_line(&self.tool)?;
        if let Some(scope) = &self.scope {
            tool.extra_args.push("--scope".to_string());
            tool.extra_args.push(scope.clone());
        }

        let config = EnvConfig::builtin()?
            .with_target(&self.target)?
            .with_tool(tool);
        config.validate()?;
        Ok(config)
    }

    /// Progress lines in human mode; nothing when the JSON report is printed.
    pub(crate) fn reporter(&self) -> Box<dyn Reporter> {
        if self.json {
            Box::new(SilentReporter)
        } else {
            Box::new(ConsoleReporter::stdout())
        }
    }
}

pub mod list;
pub mod remove;
pub mod set;

pub(crate) fn run(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (vercel_env::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Set(args) => crate::output::map_cmd_result_to_json(set::run(args, global)),
        crate::Commands::Remove(args) => {
            crate::output::map_cmd_result_to_json(remove::run(args, global))
        }
        crate::Commands::List(args) => crate::output::map_cmd_result_to_json(list::run(args, global)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vercel_env::vercel;

    fn global(tool: &str, target: &str, scope: Option<&str>) -> GlobalArgs {
        GlobalArgs {
            target: target.to_string(),
            tool: tool.to_string(),
            scope: scope.map(str::to_string),
            dry_run: false,
            json: false,
        }
    }

    #[test]
    fn scope_is_passed_as_trailing_flag() {
        let config = global("npx vercel", "production", Some("acme"))
            .config()
            .unwrap();

        assert_eq!(config.tool.extra_args, ["--scope", "acme"]);
    }

    #[test]
    fn tool_target_scope_and_only_combine() {
        let config = global("vercel --debug", "preview", Some("acme"))
            .config()
            .unwrap()
            .select_removals(&["NEXT_PUBLIC_FIREBASE_APP_ID".to_string()])
            .unwrap();

        assert_eq!(config.removals, ["NEXT_PUBLIC_FIREBASE_APP_ID"]);

        let invocation = vercel::remove(&config.tool, &config.removals[0], &config.target);
        assert_eq!(invocation.program, "vercel");
        assert_eq!(
            invocation.args,
            [
                "--debug",
                "env",
                "rm",
                "NEXT_PUBLIC_FIREBASE_APP_ID",
                "preview",
                "-y",
                "--scope",
                "acme"
            ]
        );
    }

    #[test]
    fn no_scope_adds_no_extra_args() {
        let config = global("npx vercel", "production", None).config().unwrap();
        assert!(config.tool.extra_args.is_empty());
    }

    #[test]
    fn blank_target_is_rejected() {
        let err = global("npx vercel", "  ", None).config().unwrap_err();
        assert_eq!(err.code, vercel_env::ErrorCode::ValidationInvalidArgument);
    }
}
