use hiscore_proxy::http::query::{decode, encode, parse};

#[test]
fn test_decode_plus_and_percent() {
    assert_eq!(decode("Display+Name"), b"Display Name");
    assert_eq!(decode("Display%20Name"), b"Display Name");
    assert_eq!(decode("a%2Bb"), b"a+b");
    assert_eq!(decode("%7e%7E"), b"~~");
}

#[test]
fn test_decode_invalid_escapes_pass_through() {
    assert_eq!(decode("100%"), b"100%");
    assert_eq!(decode("%2"), b"%2");
    assert_eq!(decode("%zz"), b"%zz");
    assert_eq!(decode("%g1x"), b"%g1x");
}

#[test]
fn test_decode_multibyte() {
    assert_eq!(decode("%C3%86ther"), "Æther".as_bytes());
}

#[test]
fn test_decode_keeps_non_utf8_bytes() {
    assert_eq!(decode("%A0Zezima"), b"\xA0Zezima");
    assert_eq!(decode("%FF%fe"), b"\xFF\xFE");
}

#[test]
fn test_non_utf8_value_survives_reencoding() {
    let params = parse("name=%A0Zezima&other=%FF");

    assert_eq!(encode(&params["name"]), "%A0Zezima");
    assert_eq!(encode(&params["other"]), "%FF");
}

#[test]
fn test_encode_unreserved_and_space() {
    assert_eq!(encode(b"Zezima"), "Zezima");
    assert_eq!(encode(b"a-b_c.d~e"), "a-b_c.d~e");
    assert_eq!(encode(b"Lynx Titan"), "Lynx%20Titan");
    assert_eq!(encode(b"a+b/c"), "a%2Bb%2Fc");
    assert_eq!(encode("Æ".as_bytes()), "%C3%86");
}

#[test]
fn test_decode_inverts_encode() {
    for s in ["Zezima", "Lynx Titan", "a-b_c.d~e", "  spaced  out  ", "", "B0aty 2"] {
        assert_eq!(decode(&encode(s.as_bytes())), s.as_bytes());
    }
}

#[test]
fn test_parse_single_pair() {
    let params = parse("name=Zezima");

    assert_eq!(params.len(), 1);
    assert_eq!(params["name"], b"Zezima");
}

#[test]
fn test_parse_last_duplicate_wins() {
    let params = parse("a=1&a=2");

    assert_eq!(params.len(), 1);
    assert_eq!(params["a"], b"2");
}

#[test]
fn test_parse_empty() {
    assert!(parse("").is_empty());
    assert!(parse("&&").is_empty());
}

#[test]
fn test_parse_key_without_value() {
    let params = parse("flag&name=x");

    assert!(params["flag"].is_empty());
    assert_eq!(params["name"], b"x");
}

#[test]
fn test_parse_drops_empty_keys() {
    let params = parse("=orphan&name=x");

    assert_eq!(params.len(), 1);
    assert_eq!(params["name"], b"x");
}

#[test]
fn test_parse_splits_on_first_equals() {
    let params = parse("expr=a=b");

    assert_eq!(params["expr"], b"a=b");
}

#[test]
fn test_parse_decodes_keys_and_values() {
    let params = parse("player%20name=Iron+Man");

    assert_eq!(params["player name"], b"Iron Man");
}
