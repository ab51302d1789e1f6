use crate::api::{Comment, CommentId};

pub trait CommentExt {
    /// Depth-first lookup: a node is checked before its replies, which are checked before its next sibling
    fn find<'a>(comments: &'a [Comment], id: &CommentId) -> Option<&'a Comment>;

    fn find_in<'a>(comments: &'a mut [Comment], id: &CommentId) -> Option<&'a mut Comment>;

    /// Number of replies under this comment, at any depth
    fn count_replies(&self) -> usize;

    /// Depth of the deepest reply chain, 0 for a comment without replies
    fn reply_depth(&self) -> usize;
}

impl CommentExt for Comment {
    fn find<'a>(comments: &'a [Comment], id: &CommentId) -> Option<&'a Comment> {
        for c in comments {
            if c.has_id(id) {
                return Some(c);
            }
            if let Some(res) = Comment::find(&c.replies, id) {
                return Some(res);
            }
        }
        None
    }

    fn find_in<'a>(comments: &'a mut [Comment], id: &CommentId) -> Option<&'a mut Comment> {
        for c in comments.iter_mut() {
            if c.has_id(id) {
                return Some(c);
            }
            if let Some(res) = Comment::find_in(&mut c.replies, id) {
                return Some(res);
            }
        }
        None
    }

    fn count_replies(&self) -> usize {
        crate::count_all(&self.replies)
    }

    fn reply_depth(&self) -> usize {
        self.replies
            .iter()
            .map(|r| 1 + r.reply_depth())
            .max()
            .unwrap_or(0)
    }
}
