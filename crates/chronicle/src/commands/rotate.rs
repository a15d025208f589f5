//! Rotate command implementation

use anyhow::Result;
use chronicle_logs::RotationOutcome;

use crate::cli::TargetArgs;
use crate::output::{print_info, print_success};

pub fn execute(target: TargetArgs) -> Result<()> {
    let mut logger = super::build_logger(&target)?;

    match logger.run_lifecycle() {
        RotationOutcome::Skipped => {
            print_info(&format!(
                "Nothing to rotate in {}",
                logger.log_dir().display()
            ));
        }
        RotationOutcome::Completed { archived, removed } => {
            print_success(&format!("Archived {}, removed {}", archived, removed));
        }
    }

    Ok(())
}
