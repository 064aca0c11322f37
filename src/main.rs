use clap::{Parser, Subcommand};

use commands::GlobalArgs;

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Json,
    Progress,
}

mod commands;
mod output;

use commands::{list, remove, set};
use vercel_env::config::DEFAULT_TARGET;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "vercel-env")]
#[command(version = VERSION)]
#[command(about = "Provision and remove Vercel project environment variables")]
struct Cli {
    /// Deployment environment the variables belong to
    #[arg(long, global = true, value_name = "ENV", default_value = DEFAULT_TARGET)]
    target: String,

    /// Command used to reach the Vercel CLI
    #[arg(long, global = true, value_name = "COMMAND", default_value = "npx vercel")]
    tool: String,

    /// Vercel team scope, passed through as --scope
    #[arg(long, global = true, value_name = "TEAM")]
    scope: Option<String>,

    /// Show what would run without invoking the Vercel CLI
    #[arg(long, global = true)]
    dry_run: bool,

    /// Print a JSON report instead of progress lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add every configured variable to the target environment
    Set(set::SetArgs),
    /// Remove every configured variable from the target environment
    #[command(visible_alias = "rm")]
    Remove(remove::RemoveArgs),
    /// Show configured variables and where their values come from
    List(list::ListArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let mode = if cli.json {
        ResponseMode::Json
    } else {
        ResponseMode::Progress
    };

    let global = GlobalArgs {
        target: cli.target,
        tool: cli.tool,
        scope: cli.scope,
        dry_run: cli.dry_run,
        json: cli.json,
    };

    let (result, exit_code) = commands::run(cli.command, &global);

    match mode {
        ResponseMode::Json => {
            let _ = output::print_json_result(result);
        }
        ResponseMode::Progress => {
            if let Err(err) = &result {
                output::print_error_human(err);
            }
        }
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
