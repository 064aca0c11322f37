use clap::Args;
use vercel_env::batch::{Batch, EnvVarOutcome};
use vercel_env::executor::ProcessExecutor;
use vercel_env::BulkResult;

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct RemoveArgs {
    /// Only remove these variables (repeatable). Defaults to all configured names.
    #[arg(long, value_name = "NAME")]
    pub only: Vec<String>,
}

pub fn run(args: RemoveArgs, global: &GlobalArgs) -> CmdResult<BulkResult<EnvVarOutcome>> {
    let config = global.config()?.select_removals(&args.only)?;
    let executor = ProcessExecutor;
    let mut reporter = global.reporter();

    let report = Batch::new(&config, &executor)
        .dry_run(global.dry_run)
        .remove(reporter.as_mut());

    Ok((report, 0))
}
