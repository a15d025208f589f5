//! Write command implementation

use anyhow::{bail, Result};

use crate::cli::WriteArgs;

pub fn execute(args: WriteArgs) -> Result<()> {
    let mut logger = super::build_logger(&args.target)?;

    if !logger.log_message(&args.message, args.level, args.component.as_deref()) {
        bail!("Entry was not written to {}", logger.current_log_path().display());
    }

    Ok(())
}
