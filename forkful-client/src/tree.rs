use crate::{
    api::{Action, Comment, CommentId, Error},
    CommentExt,
};

/// Total number of comments in `comments`, replies at every depth included
pub fn count_all(comments: &[Comment]) -> usize {
    comments.iter().map(|c| 1 + count_all(&c.replies)).sum()
}

/// The visible prefix of a list revealed page by page
#[derive(Debug, Eq, PartialEq)]
pub struct Page<'a, T> {
    pub visible: &'a [T],
    pub has_more: bool,
}

impl<'a, T> Clone for Page<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Page<'a, T> {}

impl<'a, T> Page<'a, T> {
    pub fn hidden(&self, total: usize) -> usize {
        total.saturating_sub(self.visible.len())
    }
}

pub fn paginate<T>(items: &[T], visible_count: usize) -> Page<'_, T> {
    Page {
        visible: &items[..visible_count.min(items.len())],
        has_more: visible_count < items.len(),
    }
}

pub fn paginate_top_level(comments: &[Comment], visible_count: usize) -> Page<'_, Comment> {
    paginate(comments, visible_count)
}

pub fn paginate_replies(comment: &Comment, visible_count: usize) -> Page<'_, Comment> {
    paginate(&comment.replies, visible_count)
}

/// Appends `reply` as the last reply of the comment `parent_id`, wherever it is in the tree
///
/// Returns `false`, leaving the tree untouched, if there is no such comment.
pub fn insert_reply(comments: &mut [Comment], parent_id: &CommentId, reply: Comment) -> bool {
    match Comment::find_in(comments, parent_id) {
        Some(parent) => {
            parent.replies.push(reply);
            true
        }
        None => {
            tracing::warn!(%parent_id, "reply parent is not in the comment tree, ignoring reply");
            false
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LikeDisplay {
    /// Whether the like icon is drawn filled
    pub filled: bool,
    pub count: u64,
}

// Any like at all fills the icon, even if it is not the viewer's
pub fn like_display(comment: &Comment) -> LikeDisplay {
    LikeDisplay {
        filled: comment.is_liked || comment.like_count > 0,
        count: comment.like_count,
    }
}

/// The like to send when the viewer clicks the like button, if any
pub fn request_like(comment: &Comment) -> Option<Action> {
    if comment.is_liked {
        return None;
    }
    comment.id.clone().map(|comment_id| Action::Like { comment_id })
}

/// Records a like accepted by the API; does nothing if the viewer already liked it
pub fn apply_like(comments: &mut [Comment], id: &CommentId) -> bool {
    match Comment::find_in(comments, id) {
        Some(c) if !c.is_liked => {
            c.is_liked = true;
            c.like_count = c.like_count.saturating_add(1);
            true
        }
        Some(_) => false,
        None => {
            tracing::warn!(%id, "liked comment is not in the comment tree");
            false
        }
    }
}

pub fn request_comment(text: &str) -> Result<Action, Error> {
    let action = Action::AddComment {
        text: String::from(text.trim()),
    };
    action.validate()?;
    Ok(action)
}

pub fn request_reply(parent_id: CommentId, text: &str) -> Result<Action, Error> {
    let action = Action::Reply {
        parent_id,
        text: String::from(text.trim()),
    };
    action.validate()?;
    Ok(action)
}
