//! Round-trip properties across the three output forms.
//!
//! The canonical form is the byte-exact normal form: re-emitting a
//! parsed canonical input must reproduce it exactly, and every form
//! must re-parse to an equal tree.

use csexp::{parse, to_advanced, to_canonical, to_transport, SexpString, Value, Warning};

fn tree(input: &[u8]) -> Value {
    parse(input).unwrap().value
}

fn sample_trees() -> Vec<Value> {
    vec![
        Value::string(*b"token"),
        Value::string(*b""),
        Value::string(*b"hello world"),
        Value::string([0x00, 0x01, 0xFF, 0x80, b'a']),
        Value::String(SexpString::with_hint(*b"image/gif", [0x47, 0x49, 0x46, 0x38, 0x39, 0x61])),
        Value::List(Vec::new()),
        Value::list(vec![Value::string(*b"abc"), Value::string(*b"defg")]),
        Value::list(vec![
            Value::string(*b"private-key"),
            Value::list(vec![
                Value::string(*b"rsa"),
                Value::list(vec![Value::string(*b"e"), Value::string([0x01, 0x00, 0x01])]),
            ]),
            Value::list(vec![Value::List(Vec::new())]),
        ]),
    ]
}

// ============================================================================
// Canonical Round-Trip
// ============================================================================

#[test]
fn canonical_input_reparses_byte_identical() {
    let inputs: &[&[u8]] = &[
        b"(4:abcd)",
        b"(3:foo(5:hello))",
        b"[3:uri]5:hello",
        b"(3:a\nb)",
        b"(1:\x00)",
        b"(()())",
        b"(11:private-key(3:rsa(1:e3:\x01\x00\x01)))",
    ];
    for input in inputs {
        let value = tree(input);
        assert_eq!(
            to_canonical(&value),
            *input,
            "canonical round-trip changed {:?}",
            String::from_utf8_lossy(input)
        );
    }
}

#[test]
fn canonicalization_is_idempotent() {
    for value in sample_trees() {
        let once = to_canonical(&value);
        let twice = to_canonical(&tree(&once));
        assert_eq!(once, twice);
    }
}

// ============================================================================
// Cross-Form Equivalence
// ============================================================================

#[test]
fn all_forms_reparse_to_the_same_tree() {
    for value in sample_trees() {
        assert_eq!(tree(&to_canonical(&value)), value, "canonical");
        assert_eq!(tree(&to_advanced(&value)), value, "advanced");
        assert_eq!(tree(&to_transport(&value)), value, "transport");
    }
}

#[test]
fn advanced_inputs_equal_their_canonical_reparse() {
    let inputs: &[&[u8]] = &[
        b"(foo bar)",
        b"( \"a b\" #0102# |YWJj| )",
        b"[uri]hello",
        b"3:foo",
        b"(outer (inner leaf))",
    ];
    for input in inputs {
        let first = tree(input);
        let second = tree(&to_canonical(&first));
        assert_eq!(first, second);
    }
}

#[test]
fn transport_round_trip_preserves_trees() {
    for value in sample_trees() {
        let envelope = to_transport(&value);
        assert!(envelope.starts_with(b"{") && envelope.ends_with(b"}"));
        assert_eq!(tree(&envelope), value);
    }
}

// ============================================================================
// Length Agreement
// ============================================================================

#[test]
fn canonical_length_prefixes_match_payloads() {
    let value = Value::list(vec![
        Value::string(*b"a\nb"),
        Value::string([0u8; 10]),
        Value::string(*b""),
    ]);
    let canonical = to_canonical(&value);
    assert_eq!(
        canonical,
        [&b"(3:a\nb10:"[..], &[0u8; 10][..], &b"0:)"[..]].concat()
    );
}

// ============================================================================
// Concrete Scenarios
// ============================================================================

#[test]
fn scenario_verbatim_list() {
    assert_eq!(tree(b"(4:abcd)"), Value::list(vec![Value::string(*b"abcd")]));
}

#[test]
fn scenario_mixed_nesting() {
    assert_eq!(
        tree(b"(3:foo(5:hello))"),
        Value::list(vec![
            Value::string(*b"foo"),
            Value::list(vec![Value::string(*b"hello")]),
        ])
    );
}

#[test]
fn scenario_quoted_tab_escape() {
    assert_eq!(tree(b"\"a\\tb\""), Value::string(*b"a\tb"));
}

#[test]
fn scenario_hex_and_base64_payloads() {
    assert_eq!(tree(b"#616263#"), Value::string(*b"abc"));
    assert_eq!(tree(b"|YWJj|"), Value::string(*b"abc"));
}

#[test]
fn scenario_presentation_hint_at_top_level() {
    assert_eq!(
        tree(b"[3:uri]5:hello"),
        Value::String(SexpString::with_hint(*b"uri", *b"hello"))
    );
}

#[test]
fn scenario_transport_envelope_equals_plain_parse() {
    assert_eq!(tree(b"{KDM6Zm9vKQ==}"), tree(b"(3:foo)"));
}

#[test]
fn scenario_verbatim_declared_too_long_fails() {
    // The fourth declared byte swallows the ')', so the list never
    // closes and the parse fails downstream.
    assert!(parse(b"(4:abc)").is_err());
}

#[test]
fn scenario_verbatim_declared_too_short_yields_sibling() {
    // Verbatim lengths are trusted: exactly three bytes are taken and
    // the surplus 'd' becomes a second list child, as in the reference
    // implementation.
    assert_eq!(
        tree(b"(3:abcd)"),
        Value::list(vec![Value::string(*b"abc"), Value::string(*b"d")])
    );
}

#[test]
fn scenario_hex_length_mismatch_warns_but_yields_payload() {
    let parsed = parse(b"3#6162#").unwrap();
    assert_eq!(parsed.value, Value::string(*b"ab"));
    assert!(matches!(
        parsed.warnings[..],
        [Warning::DeclaredLengthMismatch {
            declared: 3,
            actual: 2,
            ..
        }]
    ));
}

#[test]
fn scenario_base64_padding_variants() {
    let parsed = parse(b"|YWJj=|").unwrap();
    assert_eq!(parsed.value, Value::string(*b"abc"));
    assert!(parsed.warnings.is_empty(), "cleared residual bits");

    let parsed = parse(b"|YWJjZA|").unwrap();
    assert_eq!(parsed.value, Value::string(*b"abcd"));
    assert!(parsed.warnings.is_empty(), "zero residual bits");
}
