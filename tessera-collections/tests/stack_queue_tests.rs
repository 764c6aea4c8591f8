//! # Stack and Queue Tests
//!
//! The stack's two codecs store opposite directions; both must restore the
//! same top.

use tessera_collections::{BinaryCodec, Queue, Stack, TextCodec};

fn frames(values: &[&str]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for value in values {
        bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
        bytes.extend_from_slice(value.as_bytes());
    }
    bytes
}

mod stack_tests {
    use super::*;

    fn stack_of(values: &[&str]) -> Stack {
        let mut stack = Stack::new();
        for value in values {
            stack.push(*value);
        }
        stack
    }

    fn top_to_bottom(stack: &Stack) -> Vec<&str> {
        stack.iter().collect()
    }

    #[test]
    fn test_push_and_pop() {
        let mut stack = Stack::new();
        stack.push("first");
        stack.push("second");
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.peek(), Some("second"));

        assert_eq!(stack.pop().as_deref(), Some("second"));
        assert_eq!(stack.peek(), Some("first"));
        assert_eq!(stack.pop().as_deref(), Some("first"));
        assert!(stack.is_empty());

        assert_eq!(stack.pop(), None);
        assert_eq!(stack.len(), 0);
    }

    #[test]
    fn test_display_is_top_first() {
        assert_eq!(stack_of(&["a", "b"]).to_string(), "b a ");
    }

    #[test]
    fn test_serialize_text_is_top_first() {
        let stack = stack_of(&["first", "second", "third"]);
        assert_eq!(
            stack.serialize_text().unwrap(),
            r#"["third","second","first"]"#
        );
        assert_eq!(Stack::new().serialize_text().unwrap(), "[]");
    }

    #[test]
    fn test_deserialize_text_first_element_on_top() {
        let mut stack = stack_of(&["stale"]);
        stack
            .deserialize_text(r#"["third","second","first"]"#)
            .unwrap();
        assert_eq!(stack.len(), 3);
        assert_eq!(top_to_bottom(&stack), vec!["third", "second", "first"]);

        let mut empty = Stack::new();
        empty.deserialize_text("[]").unwrap();
        assert!(empty.is_empty());

        let err = stack
            .deserialize_text(r#"["first","second","third""#)
            .unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_TEXT");
        assert_eq!(stack.len(), 3);
    }

    #[test]
    fn test_serialize_binary_is_bottom_first() {
        let stack = stack_of(&["first", "second", "third"]);
        assert_eq!(
            stack.serialize_binary().unwrap(),
            frames(&["first", "second", "third"])
        );
        assert!(Stack::new().serialize_binary().unwrap().is_empty());
    }

    #[test]
    fn test_deserialize_binary_last_frame_on_top() {
        let mut stack = Stack::new();
        stack
            .deserialize_binary(&frames(&["first", "second", "third"]))
            .unwrap();
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.peek(), Some("third"));

        let mut empty = Stack::new();
        empty.deserialize_binary(&[]).unwrap();
        assert!(empty.is_empty());

        let err = stack
            .deserialize_binary(&[5, 0, 0, 0, b'f', b'i', b'r'])
            .unwrap_err();
        assert!(err.is_truncation());
        assert_eq!(stack.peek(), Some("third"));
    }

    #[test]
    fn test_both_codecs_roundtrip() {
        let stack = stack_of(&["a", "b", "c", "d"]);

        let mut from_text = Stack::new();
        from_text.deserialize_text(&stack.serialize_text().unwrap()).unwrap();
        assert_eq!(top_to_bottom(&from_text), top_to_bottom(&stack));

        let mut from_binary = Stack::new();
        from_binary.deserialize_binary(&stack.serialize_binary().unwrap()).unwrap();
        assert_eq!(top_to_bottom(&from_binary), top_to_bottom(&stack));
    }
}

mod queue_tests {
    use super::*;

    fn queue_of(values: &[&str]) -> Queue {
        let mut queue = Queue::new();
        for value in values {
            queue.push(*value);
        }
        queue
    }

    fn front_to_end(queue: &Queue) -> Vec<&str> {
        queue.iter().collect()
    }

    #[test]
    fn test_push_and_pop() {
        let mut queue = Queue::new();
        queue.push("first");
        queue.push("second");
        assert_eq!(queue.front(), Some("first"));

        assert_eq!(queue.pop().as_deref(), Some("first"));
        assert_eq!(queue.pop().as_deref(), Some("second"));
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(queue_of(&["a", "b"]).to_string(), "a b ");
    }

    #[test]
    fn test_text_codec_keeps_front_first() {
        let queue = queue_of(&["first", "second", "third"]);
        let text = queue.serialize_text().unwrap();
        assert_eq!(text, r#"["first","second","third"]"#);

        let mut restored = queue_of(&["stale"]);
        restored.deserialize_text(&text).unwrap();
        assert_eq!(restored, queue);
        assert_eq!(restored.front(), Some("first"));

        assert_eq!(Queue::new().serialize_text().unwrap(), "[]");
    }

    #[test]
    fn test_binary_codec_keeps_front_first() {
        let queue = queue_of(&["first", "second", "third"]);
        let bytes = queue.serialize_binary().unwrap();
        assert_eq!(bytes, frames(&["first", "second", "third"]));

        let mut restored = Queue::new();
        restored.deserialize_binary(&bytes).unwrap();
        assert_eq!(front_to_end(&restored), vec!["first", "second", "third"]);

        let err = restored.deserialize_binary(&[1, 0]).unwrap_err();
        assert_eq!(err.error_code(), "TRUNCATED_LENGTH");
        assert_eq!(restored.len(), 3);
    }
}
