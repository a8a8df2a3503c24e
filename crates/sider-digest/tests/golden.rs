//! Digests pinned against the legacy `sider-sha1` tool's output format.

use sider_digest::{compute_digest, DigestAlg, Digester, MemorySource, Value};

fn members(values: &[&str]) -> Vec<Vec<u8>> {
    values.iter().map(|v| v.as_bytes().to_vec()).collect()
}

#[test]
fn scalar_and_set_dataset_matches_golden_sha1() {
    let mut source = MemorySource::new()
        .with("a", Value::Scalar(b"x".to_vec()))
        .with("b", Value::Set(members(&["m", "n"])));

    let digest = compute_digest(&mut source).unwrap();
    assert_eq!(digest.hex, "e9f3261e3546e96222b404fe20ba093bf37f1b1a");
    assert_eq!(digest.alg, DigestAlg::Sha1);
}

#[test]
fn shuffled_keys_and_members_match_same_golden_sha1() {
    let mut source = MemorySource::new()
        .with("b", Value::Set(members(&["n", "m"])))
        .with("a", Value::Scalar(b"x".to_vec()));

    assert_eq!(
        compute_digest(&mut source).unwrap().hex,
        "e9f3261e3546e96222b404fe20ba093bf37f1b1a"
    );
}

#[test]
fn scalar_and_set_dataset_matches_golden_sha256() {
    let mut source = MemorySource::new()
        .with("a", Value::Scalar(b"x".to_vec()))
        .with("b", Value::Set(members(&["n", "m"])));

    let digest = Digester::new(DigestAlg::Sha256).compute(&mut source).unwrap();
    assert_eq!(
        digest.hex,
        "cc0e36ccdcd18b245df32f9cfc2ad42f03db5d307961489cb85ca72d46fafbea"
    );
}

#[test]
fn every_value_type_matches_golden_sha1() {
    let mut source = MemorySource::new()
        .with("queue", Value::List(members(&["1", "2", "3"])))
        .with("empty", Value::List(vec![]))
        .with("greeting", Value::Scalar(b"hello".to_vec()))
        .with("board", Value::SortedSet(members(&["alice", "bob"])));

    let digest = compute_digest(&mut source).unwrap();
    assert_eq!(digest.hex, "a9baf2b006884b837ded60a0248ea3e2c779ce85");
    assert_eq!(digest.keys_scanned, 4);
    assert_eq!(digest.keys_folded, 3);
    assert_eq!(digest.skipped_empty, 1);
}

#[test]
fn empty_scalar_matches_golden_sha1() {
    let mut source = MemorySource::new().with("k", Value::Scalar(vec![]));
    assert_eq!(
        compute_digest(&mut source).unwrap().hex,
        "0bc545452b583ff6136951a1d184a28de57c1bdf"
    );
}

#[test]
fn report_serializes_with_algorithm_name() {
    let mut source = MemorySource::new().with("a", Value::Scalar(b"x".to_vec()));
    let digest = compute_digest(&mut source).unwrap();
    let json = serde_json::to_value(&digest).unwrap();

    assert_eq!(json["alg"], "sha-1");
    assert_eq!(json["digest"], digest.hex.as_str());
    assert_eq!(json["keys_folded"], 1);
}
