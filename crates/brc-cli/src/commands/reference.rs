use anyhow::Context;
use brc_check::CheckContext;
use brc_config::BrcConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReferenceArgs;
use crate::output::output;

/// Handle `brc reference`.
pub fn handle(args: &ReferenceArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = BrcConfig::load_with_dotenv(flags.config.as_deref())
        .context("failed to load brc configuration")?;
    let ctx = CheckContext::from_config(&config).context("failed to load reference data")?;

    if args.toml {
        let text = toml::to_string_pretty(&ctx.reference)
            .context("failed to serialize reference data as TOML")?;
        print!("{text}");
        return Ok(());
    }

    output(&ctx.reference, flags.format)
}
