//! Tail command implementation

use anyhow::Result;
use chronicle_logs::LogReader;

use crate::cli::TailArgs;
use crate::output::{print_info, print_logs};

pub fn execute(args: TailArgs) -> Result<()> {
    let mut logger = super::build_logger(&args.target)?;
    let reader = LogReader::new(logger.current_log_path());

    if !reader.exists() {
        print_info(&format!("No entries yet at {}", reader.path().display()));
        return Ok(());
    }

    print_logs(&reader.tail(args.lines)?);
    Ok(())
}
