//! Unit tests for tessera-core

use tessera_core::{
    serialization::{
        decode_strings, decode_text_array, encode_strings, encode_text_array, read_string,
        StringFrames,
    },
    Config, Error,
};

mod binary_framing_tests {
    use super::*;

    #[test]
    fn test_known_layout() {
        let bytes = encode_strings(["first", "second", "third"]);
        let parts: [&[u8]; 6] = [
            &[5, 0, 0, 0],
            b"first",
            &[6, 0, 0, 0],
            b"second",
            &[5, 0, 0, 0],
            b"third",
        ];
        let expected = parts.concat();
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_unicode_payload_length_is_in_bytes() {
        let bytes = encode_strings(["привет"]);
        assert_eq!(&bytes[..4], &[12, 0, 0, 0]);
        assert_eq!(decode_strings(&bytes).unwrap(), vec!["привет"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_rejected() {
        let bytes = [2, 0, 0, 0, 0xff, b'a'];
        let values = decode_strings(&bytes).unwrap();
        assert_eq!(values, vec!["\u{fffd}a"]);
    }

    #[test]
    fn test_read_past_end() {
        let bytes = encode_strings(["x"]);
        let err = read_string(&bytes, bytes.len()).unwrap_err();
        assert!(matches!(err, Error::TruncatedLength { remaining: 0, .. }));
    }

    #[test]
    fn test_frames_report_offsets() {
        let bytes = encode_strings(["a", "bc"]);
        let mut frames = StringFrames::new(&bytes);
        frames.next();
        assert_eq!(frames.offset(), 5);
        frames.next();
        assert_eq!(frames.offset(), 11);
        assert!(frames.next().is_none());
    }
}

mod text_array_tests {
    use super::*;

    #[test]
    fn test_escaping() {
        let text = encode_text_array(["line\nbreak", "tab\t", "back\\slash"]).unwrap();
        assert_eq!(text, r#"["line\nbreak","tab\t","back\\slash"]"#);
        assert_eq!(
            decode_text_array(&text).unwrap(),
            vec!["line\nbreak", "tab\t", "back\\slash"]
        );
    }

    #[test]
    fn test_whitespace_is_accepted() {
        let values = decode_text_array(" [ \"a\" ,\n \"b\" ] ").unwrap();
        assert_eq!(values, vec!["a", "b"]);
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(Config::from_json_str("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_malformed_document() {
        let err = Config::from_json_str("{capacity").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_binary_frames_roundtrip(values in prop::collection::vec(".*", 0..32)) {
            let bytes = encode_strings(values.iter().map(String::as_str));
            prop_assert_eq!(decode_strings(&bytes).unwrap(), values);
        }

        #[test]
        fn test_text_array_roundtrip(values in prop::collection::vec(".*", 0..32)) {
            let text = encode_text_array(values.iter().map(String::as_str)).unwrap();
            prop_assert_eq!(decode_text_array(&text).unwrap(), values);
        }

        #[test]
        fn test_truncated_buffers_fail(values in prop::collection::vec("[a-z]{1,8}", 1..8), cut in 1usize..8) {
            let bytes = encode_strings(values.iter().map(String::as_str));
            // Stay inside the last payload so the cut never lands on a frame boundary
            let cut = cut.min(values[values.len() - 1].len());
            let err = decode_strings(&bytes[..bytes.len() - cut]).unwrap_err();
            prop_assert!(err.is_truncation());
        }
    }
}
