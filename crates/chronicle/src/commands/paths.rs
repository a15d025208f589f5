//! Paths command implementation

use anyhow::Result;

use crate::cli::TargetArgs;
use crate::output::print_field;

pub fn execute(target: TargetArgs) -> Result<()> {
    let mut logger = super::build_logger(&target)?;

    print_field("Name", logger.name());
    print_field("Raw name", logger.raw_name());
    print_field("Base dir", logger.base_dir().display());
    print_field("Log dir", logger.log_dir().display());
    print_field("Today", logger.current_log_path().display());
    print_field("Root", logger.is_root());
    print_field("Debug", logger.is_debug());

    let rotation = *logger.rotation_config();
    print_field(
        "Rotation",
        format!(
            "archive after {}d, remove after {}d ({:?})",
            rotation.archive_after_days, rotation.remove_after_days, rotation.removal_scope
        ),
    );

    Ok(())
}
