use std::io::{self, Write};

use anyhow::Result;
use footage_report::seconds_from_time_label;
use tracing::info;

use crate::cli::SecondsArgs;

pub fn run(args: SecondsArgs) -> Result<()> {
    let seconds = seconds_from_time_label(&args.time);
    info!(time = %args.time, seconds, "converted time label");

    let mut output = io::stdout().lock();
    writeln!(output, "{seconds}")?;
    output.flush()?;
    Ok(())
}
