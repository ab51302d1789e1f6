use std::{fmt, str::FromStr};

use chrono::Utc;
use uuid::Uuid;

use crate::{Error, Time, STUB_UUID};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
#[serde(transparent)]
pub struct DraftId(pub Uuid);

impl DraftId {
    pub fn stub() -> DraftId {
        DraftId(STUB_UUID)
    }

    /// Millisecond timestamp in the high bits, random bits in the rest
    pub fn generate() -> DraftId {
        DraftId(Uuid::now_v7())
    }
}

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for DraftId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<DraftId, uuid::Error> {
        Uuid::try_parse(s).map(DraftId)
    }
}

/// An unpublished blog post, as kept in local storage
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: DraftId,

    #[serde(default)]
    pub title: String,

    /// Serialized rich-text editor output (HTML)
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub category: String,

    /// Either a data URL or a remote URL
    #[serde(default)]
    pub cover_image: Option<String>,

    #[serde(default)]
    pub updated_at: Time,
}

impl Draft {
    pub fn new(id: DraftId) -> Draft {
        Draft {
            id,
            title: String::new(),
            content: String::new(),
            category: String::new(),
            cover_image: None,
            updated_at: Utc::now(),
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Drafts are allowed to be empty, but not to carry null bytes to the server on publish
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_string(&self.title)?;
        crate::validate_string(&self.content)?;
        crate::validate_string(&self.category)?;
        if let Some(cover) = &self.cover_image {
            crate::validate_string(cover)?;
        }
        Ok(())
    }
}
