//! Legacy copy command: delegates to the external `sider-copy` executable.

use crate::error::CliError;
use crate::tool::ExternalTool;
use sider_client::ConnectionConfig;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

pub fn run(
    source: ConnectionConfig,
    destination: ConnectionConfig,
    tool: PathBuf,
    assume_yes: bool,
) -> Result<(), CliError> {
    eprintln!("This utility is deprecated. Use the sider-copy gem instead.");

    if !assume_yes {
        println!(
            "WARNING: it's up to you to FLUSHDB the destination host before to continue, \
             press Enter when ready."
        );
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
    }

    let src = source.endpoint();
    let dst = destination.endpoint();
    println!("Copying {} into {}", src, dst);

    ExternalTool::new(tool).run([src, dst])?;
    Ok(())
}
