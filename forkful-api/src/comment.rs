use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::Time;

/// Identifier assigned by the remote API, which hands out either numbers or strings
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum CommentId {
    Number(i64),
    Text(String),
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentId::Number(n) => write!(f, "{n}"),
            CommentId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for CommentId {
    fn from(n: i64) -> CommentId {
        CommentId::Number(n)
    }
}

impl From<&str> for CommentId {
    fn from(s: &str) -> CommentId {
        CommentId::Text(String::from(s))
    }
}

impl From<String> for CommentId {
    fn from(s: String) -> CommentId {
        CommentId::Text(s)
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default, deserialize_with = "lenient_name")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_name")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_name")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_name")]
    pub avatar: Option<String>,
}

impl Author {
    pub fn display_name(&self) -> String {
        let non_empty = |s: &Option<String>| {
            s.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        };
        if let Some(full) = non_empty(&self.full_name) {
            return full;
        }
        match (non_empty(&self.first_name), non_empty(&self.last_name)) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(name), None) | (None, Some(name)) => name,
            (None, None) => String::from("Anonymous"),
        }
    }
}

/// A comment on a blog post, along with all its replies
///
/// Every field is optional on the wire: absent, null or wrongly-typed values
/// fall back to defaults, and reply entries that are not comments at all are
/// skipped, so one bad node never fails the whole tree.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<CommentId>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub comment: String,

    #[serde(default, deserialize_with = "lenient_author")]
    pub author: Option<Author>,

    #[serde(default, deserialize_with = "lenient_time")]
    pub created_at: Option<Time>,

    #[serde(default, deserialize_with = "lenient_count")]
    pub like_count: u64,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_liked: bool,

    /// Replies in the order the server sent them
    #[serde(default, deserialize_with = "lenient_replies")]
    pub replies: Vec<Comment>,
}

impl Comment {
    pub fn new(id: impl Into<CommentId>, comment: impl Into<String>) -> Comment {
        Comment {
            id: Some(id.into()),
            comment: comment.into(),
            author: None,
            created_at: None,
            like_count: 0,
            is_liked: false,
            replies: Vec::new(),
        }
    }

    pub fn with_replies(mut self, replies: Vec<Comment>) -> Comment {
        self.replies = replies;
        self
    }

    pub fn has_id(&self, id: &CommentId) -> bool {
        self.id.as_ref() == Some(id)
    }

    /// Decodes a list of comments as sent by the API, dropping the entries
    /// that are not comments
    pub fn forest(entries: Vec<Value>) -> Vec<Comment> {
        entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value(entry) {
                Ok(c) => Some(c),
                Err(err) => {
                    tracing::warn!(?err, "skipping malformed comment");
                    None
                }
            })
            .collect()
    }

    pub fn author_name(&self) -> String {
        self.author
            .as_ref()
            .map(Author::display_name)
            .unwrap_or_else(|| String::from("Anonymous"))
    }
}

fn lenient_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<CommentId>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_i64().map(CommentId::Number),
        Value::String(s) => Some(CommentId::Text(s)),
        _ => None,
    })
}

fn lenient_name<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_author<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Author>, D::Error> {
    Ok(match Value::deserialize(d)? {
        author @ Value::Object(_) => serde_json::from_value(author).ok(),
        _ => None,
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_time<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Time>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s.parse().ok(),
        _ => None,
    })
}

fn lenient_count<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(d)?, Value::Bool(true)))
}

fn lenient_replies<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Comment>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(entries) => Comment::forest(entries),
        Value::Null => Vec::new(),
        other => {
            tracing::warn!(%other, "comment replies are not a list, ignoring them");
            Vec::new()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_numbers_or_strings() {
        let ids: Vec<CommentId> = serde_json::from_str(r#"[42, "abc"]"#).unwrap();
        assert_eq!(ids, vec![CommentId::Number(42), CommentId::from("abc")]);
        assert_eq!(ids[0].to_string(), "42");
        assert_eq!(ids[1].to_string(), "abc");
        assert_ne!(CommentId::from(5), CommentId::from("5"));
    }

    #[test]
    fn full_comment() {
        let c: Comment = serde_json::from_str(
            r#"{
                "id": 1,
                "comment": "Best suya in town",
                "author": {"firstName": "Ada", "lastName": "Obi", "avatar": "https://a.example/1.png"},
                "createdAt": "2024-03-01T12:00:00Z",
                "likeCount": 3,
                "isLiked": true,
                "replies": [{"id": "r1", "comment": "Agreed"}]
            }"#,
        )
        .unwrap();
        assert_eq!(c.id, Some(CommentId::Number(1)));
        assert_eq!(c.author_name(), "Ada Obi");
        assert!(c.created_at.is_some());
        assert_eq!(c.like_count, 3);
        assert!(c.is_liked);
        assert_eq!(c.replies.len(), 1);
        assert!(c.replies[0].has_id(&CommentId::from("r1")));
    }

    #[test]
    fn malformed_nodes_get_defaults() {
        let c: Comment = serde_json::from_str(
            r#"{"id": 7, "likeCount": -2, "isLiked": null, "replies": null, "createdAt": "yesterday"}"#,
        )
        .unwrap();
        assert_eq!(c.like_count, 0);
        assert!(!c.is_liked);
        assert!(c.replies.is_empty());
        assert_eq!(c.created_at, None);
        assert_eq!(c.comment, "");

        let c: Comment = serde_json::from_str(r#"{"comment": "no id", "likeCount": "4"}"#).unwrap();
        assert_eq!(c.id, None);
        assert_eq!(c.like_count, 4);
        assert_eq!(c.author_name(), "Anonymous");
    }

    #[test]
    fn wrongly_typed_nodes_do_not_poison_siblings() {
        let comments: Vec<Comment> = serde_json::from_str(
            r#"[
                {"id": 1, "comment": "ok"},
                {"id": 2, "comment": "x", "author": "u123"},
                {"id": 3, "comment": "y", "replies": [
                    "not a comment",
                    {"id": 4, "comment": "kept", "author": {"fullName": 5, "firstName": "Ada"}},
                    42
                ]},
                {"id": {"oid": 5}, "comment": "z", "replies": "none"}
            ]"#,
        )
        .unwrap();
        assert_eq!(comments.len(), 4);
        assert_eq!(comments[0].comment, "ok");
        assert_eq!(comments[1].author, None);
        assert_eq!(comments[1].author_name(), "Anonymous");
        assert_eq!(comments[2].replies.len(), 1);
        assert!(comments[2].replies[0].has_id(&CommentId::from(4)));
        assert_eq!(comments[2].replies[0].author_name(), "Ada");
        assert_eq!(comments[3].id, None);
        assert!(comments[3].replies.is_empty());
    }

    #[test]
    fn forest_skips_non_comments() {
        let entries = serde_json::from_str(r#"[{"id": 1}, null, "x", {"id": "b", "likeCount": 2}]"#)
            .unwrap();
        let forest = Comment::forest(entries);
        assert_eq!(forest.len(), 2);
        assert!(forest[0].has_id(&CommentId::from(1)));
        assert_eq!(forest[1].like_count, 2);
    }

    #[test]
    fn display_names() {
        let author = |first: Option<&str>, last: Option<&str>, full: Option<&str>| Author {
            first_name: first.map(String::from),
            last_name: last.map(String::from),
            full_name: full.map(String::from),
            avatar: None,
        };
        assert_eq!(
            author(Some("Ada"), Some("Obi"), Some("Chef Ada")).display_name(),
            "Chef Ada"
        );
        assert_eq!(author(Some("Ada"), Some("Obi"), Some("  ")).display_name(), "Ada Obi");
        assert_eq!(author(None, Some("Obi"), None).display_name(), "Obi");
        assert_eq!(author(None, None, None).display_name(), "Anonymous");
    }
}
