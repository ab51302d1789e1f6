use chrono::Utc;

pub use uuid::{uuid, Uuid};
pub type Time = chrono::DateTime<Utc>;

pub const STUB_UUID: Uuid = uuid!("ffffffff-ffff-ffff-ffff-ffffffffffff");

mod action;
pub use action::Action;

mod comment;
pub use comment::{Author, Comment, CommentId};

mod draft;
pub use draft::{Draft, DraftId};

mod error;
pub use error::Error;

// Strings leaving the client must not contain null bytes, the remote API rejects them
pub fn validate_string(s: &str) -> Result<(), Error> {
    match s.contains('\0') {
        true => Err(Error::NullByteInString(String::from(s))),
        false => Ok(()),
    }
}

/// Like `validate_string`, but also rejects text that is only whitespace
pub fn validate_text(s: &str) -> Result<(), Error> {
    validate_string(s)?;
    if s.trim().is_empty() {
        return Err(Error::EmptyText);
    }
    Ok(())
}
