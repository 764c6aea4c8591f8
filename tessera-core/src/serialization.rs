//! Shared codec primitives.
//!
//! Two wire formats are shared by every sequence container:
//!
//! ```text
//! Binary frame:   [len: u32 LE][payload: len bytes] ... repeated, no header
//! Text array:     ["a","b","c"]   (JSON array of strings)
//! ```
//!
//! An empty collection encodes to zero bytes and to `[]` respectively.

use byteorder::{ByteOrder, LittleEndian};
use bytes::BufMut;

use crate::error::{Error, Result};

/// Width of the length prefix in front of every frame
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Append one length-prefixed frame to `buf`.
#[inline]
pub fn put_string(buf: &mut Vec<u8>, value: &str) {
    buf.put_u32_le(value.len() as u32);
    buf.put_slice(value.as_bytes());
}

/// Read the frame starting at `offset`, returning the string and the offset
/// just past it.
pub fn read_string(data: &[u8], offset: usize) -> Result<(String, usize)> {
    let remaining = data.len().saturating_sub(offset);
    if remaining < LENGTH_PREFIX_SIZE {
        return Err(Error::TruncatedLength { offset, remaining });
    }

    let length = LittleEndian::read_u32(&data[offset..offset + LENGTH_PREFIX_SIZE]) as usize;
    let start = offset + LENGTH_PREFIX_SIZE;
    let remaining = data.len() - start;
    if remaining < length {
        return Err(Error::TruncatedPayload {
            offset: start,
            expected: length,
            remaining,
        });
    }

    let value = String::from_utf8_lossy(&data[start..start + length]).into_owned();
    Ok((value, start + length))
}

/// Concatenate the frames of `values` in iteration order.
pub fn encode_strings<'a, I>(values: I) -> Vec<u8>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut buf = Vec::new();
    for value in values {
        put_string(&mut buf, value);
    }
    buf
}

/// Decode every frame in `data`. An empty buffer yields an empty vector.
pub fn decode_strings(data: &[u8]) -> Result<Vec<String>> {
    StringFrames::new(data).collect()
}

/// Iterator over the frames of a buffer.
///
/// Yields one error and then stops if the buffer ends inside a frame.
pub struct StringFrames<'a> {
    data: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> StringFrames<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0, failed: false }
    }

    /// Offset of the next unread byte
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Iterator for StringFrames<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.data.len() {
            return None;
        }
        match read_string(self.data, self.offset) {
            Ok((value, next)) => {
                self.offset = next;
                Some(Ok(value))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Encode `values` as a JSON array of strings.
pub fn encode_text_array<'a, I>(values: I) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let values: Vec<&str> = values.into_iter().collect();
    serde_json::to_string(&values).map_err(|e| Error::Internal {
        message: format!("Text serialization failed: {}", e),
    })
}

/// Decode a JSON array of strings.
pub fn decode_text_array(text: &str) -> Result<Vec<String>> {
    serde_json::from_str::<Vec<String>>(text).map_err(|e| Error::MalformedText {
        message: format!("expected a JSON array of strings: {}", e),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_layout() {
        let mut buf = Vec::new();
        put_string(&mut buf, "first");
        assert_eq!(buf, [5, 0, 0, 0, b'f', b'i', b'r', b's', b't']);
    }

    #[test]
    fn test_read_string_advances_offset() {
        let buf = encode_strings(["ab", "", "cde"]);
        let (first, offset) = read_string(&buf, 0).unwrap();
        assert_eq!(first, "ab");
        assert_eq!(offset, 6);
        let (second, offset) = read_string(&buf, offset).unwrap();
        assert_eq!(second, "");
        assert_eq!(offset, 10);
        let (third, offset) = read_string(&buf, offset).unwrap();
        assert_eq!(third, "cde");
        assert_eq!(offset, buf.len());
    }

    #[test]
    fn test_empty_buffer_decodes_to_nothing() {
        assert!(encode_strings(std::iter::empty()).is_empty());
        assert!(decode_strings(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_length() {
        let err = decode_strings(&[5, 0]).unwrap_err();
        assert!(matches!(err, Error::TruncatedLength { offset: 0, remaining: 2 }));

        let mut buf = encode_strings(["ok"]);
        buf.extend_from_slice(&[1, 0, 0]);
        let err = decode_strings(&buf).unwrap_err();
        assert!(matches!(err, Error::TruncatedLength { offset: 6, remaining: 3 }));
    }

    #[test]
    fn test_truncated_payload() {
        let err = decode_strings(&[5, 0, 0, 0, b'f', b'i', b'r', b's']).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedPayload { offset: 4, expected: 5, remaining: 4 }
        ));
    }

    #[test]
    fn test_huge_length_prefix_does_not_panic() {
        let err = decode_strings(&[0xff, 0xff, 0xff, 0xff, b'x']).unwrap_err();
        assert!(err.is_truncation());
    }

    #[test]
    fn test_frames_stop_after_error() {
        let mut frames = StringFrames::new(&[1, 0, 0, 0, b'a', 9]);
        assert_eq!(frames.next().unwrap().unwrap(), "a");
        assert_eq!(frames.offset(), 5);
        assert!(frames.next().unwrap().is_err());
        assert!(frames.next().is_none());
    }

    #[test]
    fn test_text_array() {
        assert_eq!(encode_text_array(std::iter::empty()).unwrap(), "[]");
        assert_eq!(
            encode_text_array(["a", "say \"hi\""]).unwrap(),
            r#"["a","say \"hi\""]"#
        );
        assert_eq!(decode_text_array(r#"["x","y"]"#).unwrap(), vec!["x", "y"]);
    }

    #[test]
    fn test_text_array_rejects_wrong_shape() {
        for text in [r#"["a","b""#, "null", "{}", "[1,2]", r#"{"a":"b"}"#, ""] {
            let err = decode_text_array(text).unwrap_err();
            assert_eq!(err.error_code(), "MALFORMED_TEXT", "input {:?}", text);
        }
    }
}
