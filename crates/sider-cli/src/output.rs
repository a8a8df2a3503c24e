//! Output formatting utilities.

use serde::Serialize;
use sider_client::ConnectionConfig;
use sider_digest::{DatasetDigest, DigestAlg};

#[derive(Serialize)]
struct DigestOutput<'a> {
    host: &'a str,
    port: u16,
    db: i64,
    #[serde(flatten)]
    report: &'a DatasetDigest,
}

/// Line announcing which server is being digested.
pub fn status_line(alg: DigestAlg, config: &ConnectionConfig) -> String {
    format!(
        "Performing {} of Sider server {} {} DB: {}",
        alg.label(),
        config.host,
        config.port,
        config.db
    )
}

/// Line carrying the final digest.
pub fn digest_line(report: &DatasetDigest) -> String {
    format!("Dataset {}: {}", report.alg.label(), report.hex)
}

/// Formats a digest report together with the server it describes as JSON.
pub fn format_json(
    config: &ConnectionConfig,
    report: &DatasetDigest,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&DigestOutput {
        host: &config.host,
        port: config.port,
        db: config.db,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> DatasetDigest {
        DatasetDigest {
            alg: DigestAlg::Sha1,
            hex: "e9f3261e3546e96222b404fe20ba093bf37f1b1a".into(),
            keys_scanned: 2,
            keys_folded: 2,
            skipped_empty: 0,
            skipped_unsupported: 0,
        }
    }

    #[test]
    fn lines_match_legacy_wording() {
        let config = ConnectionConfig::default();
        assert_eq!(
            status_line(DigestAlg::Sha1, &config),
            "Performing SHA1 of Sider server 127.0.0.1 6379 DB: 0"
        );
        assert_eq!(
            digest_line(&report()),
            "Dataset SHA1: e9f3261e3546e96222b404fe20ba093bf37f1b1a"
        );
    }

    #[test]
    fn json_flattens_report_next_to_server() {
        let config = ConnectionConfig::new("db.internal", 6380, 2);
        let value: serde_json::Value =
            serde_json::from_str(&format_json(&config, &report()).unwrap()).unwrap();

        assert_eq!(value["host"], "db.internal");
        assert_eq!(value["port"], 6380);
        assert_eq!(value["db"], 2);
        assert_eq!(value["alg"], "sha-1");
        assert_eq!(value["digest"], "e9f3261e3546e96222b404fe20ba093bf37f1b1a");
        assert_eq!(value["keys_folded"], 2);
    }
}
