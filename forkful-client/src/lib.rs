mod comment;
pub use comment::CommentExt;

mod draft_store;
pub use draft_store::{request_publish, DraftStore, DEFAULT_DRAFTS_KEY};

mod error;
pub use error::StorageError;

mod reveal;
pub use reveal::{RevealPhase, RevealState, Row, REPLY_PAGE_SIZE, TOP_LEVEL_PAGE_SIZE};

mod storage;
#[cfg(feature = "web")]
pub use storage::LocalStorage;
pub use storage::{FileStorage, MemoryStorage, Storage};

pub mod tree;
pub use tree::{
    apply_like, count_all, insert_reply, like_display, paginate_replies, paginate_top_level,
    request_comment, request_like, request_reply, LikeDisplay, Page,
};

pub mod api {
    pub use forkful_api::*;
}

pub mod prelude {
    pub use crate::{CommentExt, Storage};
}
