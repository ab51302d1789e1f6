use crate::{CommentId, Draft, Error};

/// A mutation the client asks the remote API to perform
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Action {
    AddComment { text: String },
    Reply { parent_id: CommentId, text: String },
    Like { comment_id: CommentId },
    PublishDraft { draft: Draft },
}

impl Action {
    // See comments on other `validate` functions throughout forkful-api
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Action::AddComment { text } => crate::validate_text(text),
            Action::Reply { parent_id, text } => {
                if let CommentId::Text(id) = parent_id {
                    crate::validate_string(id)?;
                }
                crate::validate_text(text)
            }
            Action::Like { comment_id: _ } => Ok(()),
            Action::PublishDraft { draft } => {
                crate::validate_text(&draft.title)?;
                draft.validate()
            }
        }
    }
}
