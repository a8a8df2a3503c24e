//! Dataset digest command implementation.

use crate::error::CliError;
use crate::output;
use sider_client::{with_connection, ConnectionConfig};
use sider_digest::{DigestAlg, Digester, UnsupportedTypePolicy};

pub fn run(
    config: ConnectionConfig,
    alg: DigestAlg,
    skip_unsupported: bool,
    json_output: bool,
) -> Result<(), CliError> {
    let policy = if skip_unsupported {
        UnsupportedTypePolicy::Skip
    } else {
        UnsupportedTypePolicy::Fail
    };

    if !json_output {
        println!("{}", output::status_line(alg, &config));
    }

    let report = with_connection(&config, |conn| -> Result<_, CliError> {
        Ok(Digester::new(alg).with_policy(policy).compute(conn)?)
    })?;

    if json_output {
        println!("{}", output::format_json(&config, &report)?);
    } else {
        println!("{}", output::digest_line(&report));
    }

    Ok(())
}
