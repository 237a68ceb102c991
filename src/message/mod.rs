//! Jupyter message model.
//!
//! Mirrors the general message format from the Jupyter messaging spec:
//! <http://jupyter-client.readthedocs.org/en/latest/messaging.html>
//!
//! Headers are optional at this layer: kernels and proxies emit partial
//! messages, and the router treats "can't extract a field" as "field absent"
//! rather than an error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A Jupyter message header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHeader {
    #[serde(default)]
    pub msg_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub session: String,
    #[serde(default)]
    pub msg_type: String,
    #[serde(default)]
    pub version: String,
}

/// A generic Jupyter message (not a wire message).
///
/// `metadata` and `content` are opaque here — they are handed verbatim to
/// whatever renders them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<MessageHeader>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_header: Option<MessageHeader>,
    #[serde(default)]
    pub metadata: serde_json::Value,
    #[serde(default)]
    pub content: serde_json::Value,
}

/// A collection of `mimetype -> data`.
///
/// Example:
///     'text/html' -> '<h1>Hey!</h1>'
///     'image/png' -> 'R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7'
pub type MimeBundle = HashMap<String, String>;

impl Message {
    /// The correlation key grouping this message with the request that
    /// produced it: `parent_header.msg_id`.
    ///
    /// `None` when the parent header is absent or carries an empty id.
    /// Messages without a key cannot be routed and are dropped upstream.
    pub fn correlation_key(&self) -> Option<&str> {
        let parent = self.parent_header.as_ref()?;
        if parent.msg_id.is_empty() {
            None
        } else {
            Some(&parent.msg_id)
        }
    }

    /// The `content.data` MIME bundle, for message classes that carry one
    /// (`execute_result`, `display_data`).
    ///
    /// `None` when there is no `data` field or it isn't a mimetype → string
    /// map.
    pub fn mime_bundle(&self) -> Option<MimeBundle> {
        serde_json::from_value(self.content.get("data")?.clone()).ok()
    }

    /// The message class from `header.msg_type`, if present.
    pub fn msg_type(&self) -> Option<&str> {
        let header = self.header.as_ref()?;
        if header.msg_type.is_empty() {
            None
        } else {
            Some(&header.msg_type)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correlation_key_from_parent_header() {
        let msg = Message {
            parent_header: Some(MessageHeader {
                msg_id: "abc-123".into(),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(msg.correlation_key(), Some("abc-123"));
    }

    #[test]
    fn missing_parent_header_has_no_key() {
        let msg = Message::default();
        assert_eq!(msg.correlation_key(), None);
    }

    #[test]
    fn empty_msg_id_has_no_key() {
        let msg = Message {
            parent_header: Some(MessageHeader::default()),
            ..Default::default()
        };
        assert_eq!(msg.correlation_key(), None);
    }

    #[test]
    fn msg_type_from_header() {
        let msg = Message {
            header: Some(MessageHeader {
                msg_type: "stream".into(),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(msg.msg_type(), Some("stream"));
        assert_eq!(Message::default().msg_type(), None);
    }

    #[test]
    fn deserialize_partial_json() {
        let msg: Message =
            serde_json::from_str(r#"{"parent_header": {"msg_id": "x"}}"#).unwrap();
        assert_eq!(msg.correlation_key(), Some("x"));
        assert_eq!(msg.msg_type(), None);
        assert!(msg.content.is_null());
    }

    #[test]
    fn deserialize_full_iopub_message() {
        let raw = r#"{
            "header": {"msg_id": "h1", "username": "kernel", "session": "s1",
                       "msg_type": "execute_result", "version": "5.0"},
            "parent_header": {"msg_id": "p1", "username": "user", "session": "s1",
                              "msg_type": "execute_request", "version": "5.0"},
            "metadata": {},
            "content": {"execution_count": 1,
                        "data": {"text/plain": "4"}}
        }"#;
        let msg: Message = serde_json::from_str(raw).unwrap();
        assert_eq!(msg.correlation_key(), Some("p1"));
        assert_eq!(msg.msg_type(), Some("execute_result"));
        assert_eq!(msg.content["data"]["text/plain"], "4");

        let bundle = msg.mime_bundle().unwrap();
        assert_eq!(bundle["text/plain"], "4");
    }

    #[test]
    fn mime_bundle_absent_or_untyped() {
        assert!(Message::default().mime_bundle().is_none());

        let msg: Message =
            serde_json::from_str(r#"{"content": {"data": {"text/plain": 42}}}"#).unwrap();
        // Non-string data values don't fit a mimetype -> string bundle
        assert!(msg.mime_bundle().is_none());
    }
}
