use clap::Args;
use vercel_env::batch::{Batch, EnvVarOutcome};
use vercel_env::config::EnvConfig;
use vercel_env::executor::ProcessExecutor;
use vercel_env::BulkResult;

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct SetArgs {
    /// Only add these variables (repeatable). Defaults to all configured entries.
    #[arg(long, value_name = "NAME")]
    pub only: Vec<String>,

    /// Read this variable's value from the system keychain (repeatable).
    /// The keychain entry is stored under service `vercel-env`, account NAME.
    #[arg(long, value_name = "NAME")]
    pub from_keychain: Vec<String>,
}

pub fn run(args: SetArgs, global: &GlobalArgs) -> CmdResult<BulkResult<EnvVarOutcome>> {
    let config = configure(&args, global)?;
    let executor = ProcessExecutor;
    let mut reporter = global.reporter();

    let report = Batch::new(&config, &executor)
        .dry_run(global.dry_run)
        .apply(reporter.as_mut());

    // Per-entry failures are part of the report, not a failed run.
    Ok((report, 0))
}

fn configure(args: &SetArgs, global: &GlobalArgs) -> vercel_env::Result<EnvConfig> {
    global
        .config()?
        .source_from_keychain(&args.from_keychain)?
        .select_entries(&args.only)
}
