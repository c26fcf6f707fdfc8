use crate::error::Error;
use crate::identifier::{decode, encode, is_composite};

#[test]
fn test_encode() {
    assert_eq!(encode("example.com", "www", "A"), "example.com:www:A");
    assert_eq!(encode("example.com", "@", "MX"), "example.com:@:MX");
}

#[test]
fn test_decode_inverts_encode() {
    let cases = [
        ("example.com", "www", "A"),
        ("example.co.uk", "_dmarc", "TXT"),
        ("example.com", "@", "CNAME"),
    ];
    for (domain, name, record_type) in cases {
        let decoded = decode(&encode(domain, name, record_type)).unwrap();
        assert_eq!(
            decoded,
            Some((domain.to_string(), name.to_string(), record_type.to_string()))
        );
    }
}

#[test]
fn test_decode_wrong_arity() {
    for id in ["a:b", "a:b:c:d", ":", "example.com:www:"] {
        match decode(id) {
            Err(Error::InvalidIdentifier(raw)) => assert_eq!(raw, id),
            other => panic!("expected InvalidIdentifier for {id:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_decode_passes_opaque_ids_through() {
    assert_eq!(decode("12345").unwrap(), None);
    assert_eq!(decode("").unwrap(), None);
    assert!(!is_composite("12345"));
    assert!(is_composite("example.com:www:A"));
}
