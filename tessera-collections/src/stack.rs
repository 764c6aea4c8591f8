//! LIFO stack of strings.
//!
//! The two codecs store the stack in opposite directions:
//!
//! ```text
//! push "first", "second", "third"
//!
//! text:   ["third","second","first"]          top → bottom, decode pushes in reverse
//! binary: [5]first [6]second [5]third          bottom → top, decode pushes in order
//! ```
//!
//! Either way, decoding what was encoded restores the same top.

use std::fmt;
use std::path::Path;

use tracing::{debug, warn};

use tessera_core::{
    serialization::{decode_text_array, encode_text_array, put_string, StringFrames},
    utils::{read_lines, write_lines},
    BinaryCodec, LinePersist, Result, TextCodec,
};

type Link = Option<Box<Frame>>;

#[derive(Debug)]
struct Frame {
    data: String,
    below: Link,
}

#[derive(Debug, Default)]
pub struct Stack {
    top: Link,
    len: usize,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: impl Into<String>) {
        let frame = Box::new(Frame {
            data: value.into(),
            below: self.top.take(),
        });
        self.top = Some(frame);
        self.len += 1;
    }

    /// Pop the top value; an empty stack is reported and left unchanged.
    pub fn pop(&mut self) -> Option<String> {
        let Some(mut frame) = self.top.take() else {
            warn!("Stack is empty");
            return None;
        };
        self.top = frame.below.take();
        self.len -= 1;
        Some(frame.data)
    }

    pub fn peek(&self) -> Option<&str> {
        self.top.as_deref().map(|frame| frame.data.as_str())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    pub fn clear(&mut self) {
        let mut link = self.top.take();
        while let Some(mut frame) = link {
            link = frame.below.take();
        }
        self.len = 0;
    }

    /// Iterate top → bottom.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.top.as_deref(),
        }
    }

    fn replace_with<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.clear();
        for value in values {
            self.push(value);
        }
    }
}

impl Drop for Stack {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.iter() {
            write!(f, "{} ", value)?;
        }
        Ok(())
    }
}

pub struct Iter<'a> {
    next: Option<&'a Frame>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.next?;
        self.next = frame.below.as_deref();
        Some(&frame.data)
    }
}

impl TextCodec for Stack {
    fn serialize_text(&self) -> Result<String> {
        encode_text_array(self.iter())
    }

    /// The first element of the array ends on top.
    fn deserialize_text(&mut self, text: &str) -> Result<()> {
        let values = decode_text_array(text)?;
        self.replace_with(values.into_iter().rev());
        Ok(())
    }
}

impl BinaryCodec for Stack {
    fn serialize_binary(&self) -> Result<Vec<u8>> {
        let values: Vec<&str> = self.iter().collect();
        let mut buf = Vec::new();
        for value in values.into_iter().rev() {
            put_string(&mut buf, value);
        }
        Ok(buf)
    }

    /// The last frame ends on top.
    fn deserialize_binary(&mut self, data: &[u8]) -> Result<()> {
        let values = StringFrames::new(data).collect::<Result<Vec<_>>>()?;
        self.replace_with(values);
        Ok(())
    }
}

impl LinePersist for Stack {
    /// Push every line, so the last line ends on top.
    fn load_from_file(&mut self, path: &Path) -> Result<()> {
        for line in read_lines(path)? {
            self.push(line?);
        }
        debug!(path = %path.display(), size = self.len, "Loaded stack");
        Ok(())
    }

    /// Write top → bottom.
    fn save_to_file(&self, path: &Path) -> Result<()> {
        write_lines(path, self.iter())
    }
}
