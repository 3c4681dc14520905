//! Golden output compatibility.
//!
//! Parses a reference key-file sample and byte-compares the re-emitted
//! forms against pinned golden bytes, so any drift in the emitters
//! shows up as a diff rather than a silent re-encoding.

use csexp::{parse, to_canonical, write_advanced};

/// A private-key sample in canonical form, with binary payloads.
const CANONICAL_KEY: &[u8] =
    b"(11:private-key(3:rsa(1:n8:\x00\xc9\x3f\x26\x5a\x11\x22\x33)(1:e3:\x01\x00\x01)(1:d8:\x45\x67\x89\xab\xcd\xef\x01\x23)))";

/// The same key in advanced form at width 100 (fits on one line).
const ADVANCED_KEY: &[u8] =
    b"(private-key (rsa (n |AMk/JloRIjM=|) (e |AQAB|) (d |RWeJq83vASM=|)))";

/// The same key at width 40, wrapped and aligned.
const ADVANCED_KEY_NARROW: &[u8] = b"(private-key\n (rsa\n  (n |AMk/JloRIjM=|)\n  (e |AQAB|)\n  (d |RWeJq83vASM=|)))";

#[test]
fn canonical_key_reemits_byte_identical() {
    let parsed = parse(CANONICAL_KEY).unwrap();
    assert!(parsed.warnings.is_empty());
    assert_eq!(to_canonical(&parsed.value), CANONICAL_KEY);
}

#[test]
fn advanced_key_matches_golden() {
    let parsed = parse(CANONICAL_KEY).unwrap();
    let mut out = Vec::new();
    write_advanced(&parsed.value, &mut out, 100).unwrap();
    assert_eq!(
        String::from_utf8_lossy(&out),
        String::from_utf8_lossy(ADVANCED_KEY)
    );
}

#[test]
fn advanced_key_narrow_matches_golden() {
    let parsed = parse(CANONICAL_KEY).unwrap();
    let mut out = Vec::new();
    write_advanced(&parsed.value, &mut out, 40).unwrap();
    assert_eq!(
        String::from_utf8_lossy(&out),
        String::from_utf8_lossy(ADVANCED_KEY_NARROW)
    );
}

#[test]
fn advanced_golden_reparses_to_the_same_tree() {
    let from_canonical = parse(CANONICAL_KEY).unwrap().value;
    let from_advanced = parse(ADVANCED_KEY).unwrap().value;
    let from_narrow = parse(ADVANCED_KEY_NARROW).unwrap().value;
    assert_eq!(from_canonical, from_advanced);
    assert_eq!(from_canonical, from_narrow);
}

#[test]
fn binary_payloads_survive_the_round_trip() {
    let parsed = parse(CANONICAL_KEY).unwrap();
    let n = parsed
        .value
        .get(1)
        .and_then(|rsa| rsa.get(1))
        .and_then(|n| n.get(1))
        .and_then(|v| v.as_bytes())
        .expect("n payload");
    assert_eq!(n, hex::decode("00c93f265a112233").unwrap());
}
