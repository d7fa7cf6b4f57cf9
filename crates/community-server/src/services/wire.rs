//! Conversions between raw HTTP parts and interop message fields

use base64::{engine::general_purpose::STANDARD, Engine as _};
use community_core::{BodyEncoding, CommunityError, Headers, Result};
use tracing::warn;

/// Carry raw bytes in a message body. Text stays as is; anything that is
/// not UTF-8 is base64 encoded.
pub fn encode_body(bytes: &[u8]) -> (String, BodyEncoding) {
    match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_string(), BodyEncoding::Utf8),
        Err(_) => (STANDARD.encode(bytes), BodyEncoding::Base64),
    }
}

pub fn decode_body(body: &str, encoding: BodyEncoding) -> Result<Vec<u8>> {
    match encoding {
        BodyEncoding::Utf8 => Ok(body.as_bytes().to_vec()),
        BodyEncoding::Base64 => STANDARD
            .decode(body)
            .map_err(|e| CommunityError::Interop(format!("invalid base64 body: {}", e))),
    }
}

/// Collect header pairs, keeping every value of a repeated name. Values that
/// are not visible ASCII cannot be carried and are dropped with a warning.
pub fn collect_headers<'a, I>(pairs: I) -> Headers
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let mut headers = Headers::new();
    for (name, value) in pairs {
        match std::str::from_utf8(value) {
            Ok(value) if value.bytes().all(|b| b == b'\t' || (0x20..0x7f).contains(&b)) => {
                headers
                    .entry(name.to_string())
                    .or_default()
                    .push(value.to_string());
            }
            _ => warn!("Dropping header '{}' with a non-text value", name),
        }
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_body_stays_text() {
        let (body, encoding) = encode_body("héllo".as_bytes());
        assert_eq!(body, "héllo");
        assert_eq!(encoding, BodyEncoding::Utf8);
    }

    #[test]
    fn test_binary_body_is_base64() {
        let raw = [0xff, 0x00, 0x9f, 0x92];
        let (body, encoding) = encode_body(&raw);
        assert_eq!(encoding, BodyEncoding::Base64);
        assert_eq!(body, "/wCfkg==");
        assert_eq!(decode_body(&body, encoding).unwrap(), raw);
    }

    #[test]
    fn test_bad_base64_is_interop_error() {
        let err = decode_body("%%%", BodyEncoding::Base64).unwrap_err();
        assert!(matches!(err, CommunityError::Interop(_)));
    }

    #[test]
    fn test_repeated_headers_are_kept() {
        let pairs: [(&str, &[u8]); 3] = [
            ("set-cookie", b"a=1"),
            ("x-trace", b"abc"),
            ("set-cookie", b"b=2"),
        ];
        let headers = collect_headers(pairs);
        assert_eq!(headers["set-cookie"], vec!["a=1", "b=2"]);
        assert_eq!(headers["x-trace"], vec!["abc"]);
    }

    #[test]
    fn test_opaque_header_value_is_dropped() {
        let pairs: [(&str, &[u8]); 2] = [("x-raw", &[0xff, 0xfe]), ("x-ok", b"1")];
        let headers = collect_headers(pairs);
        assert!(!headers.contains_key("x-raw"));
        assert_eq!(headers["x-ok"], vec!["1"]);
    }
}
