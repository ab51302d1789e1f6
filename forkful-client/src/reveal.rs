use std::collections::HashMap;

use crate::{
    api::{Comment, CommentId},
    tree::{paginate, Page},
};

pub const TOP_LEVEL_PAGE_SIZE: usize = 10;
pub const REPLY_PAGE_SIZE: usize = 5;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RevealPhase {
    /// Only the first page is shown
    Collapsed,
    /// At least one "read more" happened, and there is still more to show
    Expanded,
    FullyShown,
}

impl RevealPhase {
    pub fn of(visible_count: usize, page_size: usize, len: usize) -> RevealPhase {
        if visible_count >= len {
            RevealPhase::FullyShown
        } else if visible_count <= page_size {
            RevealPhase::Collapsed
        } else {
            RevealPhase::Expanded
        }
    }
}

/// How much of a comment tree is revealed
///
/// The top-level list and the reply list of each comment grow independently,
/// one page at a time, and never shrink. A fresh `RevealState` should be used
/// whenever the comments are fetched again.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RevealState {
    top_level: usize,
    replies: HashMap<CommentId, usize>,
}

impl Default for RevealState {
    fn default() -> RevealState {
        RevealState::new()
    }
}

impl RevealState {
    pub fn new() -> RevealState {
        RevealState {
            top_level: TOP_LEVEL_PAGE_SIZE,
            replies: HashMap::new(),
        }
    }

    pub fn top_level_visible(&self) -> usize {
        self.top_level
    }

    pub fn replies_visible(&self, id: &CommentId) -> usize {
        self.replies.get(id).copied().unwrap_or(REPLY_PAGE_SIZE)
    }

    pub fn reveal_more_top_level(&mut self) {
        self.top_level = self.top_level.saturating_add(TOP_LEVEL_PAGE_SIZE);
    }

    pub fn reveal_more_replies(&mut self, id: &CommentId) {
        let visible = self.replies.entry(id.clone()).or_insert(REPLY_PAGE_SIZE);
        *visible = visible.saturating_add(REPLY_PAGE_SIZE);
    }

    pub fn top_level_page<'a>(&self, comments: &'a [Comment]) -> Page<'a, Comment> {
        paginate(comments, self.top_level)
    }

    // Comments without an id cannot be tracked, their replies stay on the first page
    fn replies_visible_for(&self, comment: &Comment) -> usize {
        comment
            .id
            .as_ref()
            .map(|id| self.replies_visible(id))
            .unwrap_or(REPLY_PAGE_SIZE)
    }

    pub fn replies_page<'a>(&self, comment: &'a Comment) -> Page<'a, Comment> {
        paginate(&comment.replies, self.replies_visible_for(comment))
    }

    pub fn top_level_phase(&self, comments: &[Comment]) -> RevealPhase {
        RevealPhase::of(self.top_level, TOP_LEVEL_PAGE_SIZE, comments.len())
    }

    pub fn replies_phase(&self, comment: &Comment) -> RevealPhase {
        RevealPhase::of(
            self.replies_visible_for(comment),
            REPLY_PAGE_SIZE,
            comment.replies.len(),
        )
    }

    /// Flattens the visible part of the tree into the rows a view draws, in display order
    pub fn rows<'a>(&self, comments: &'a [Comment]) -> Vec<Row<'a>> {
        let mut rows = Vec::new();
        let page = self.top_level_page(comments);
        for c in page.visible {
            self.push_rows(c, 0, &mut rows);
        }
        if page.has_more {
            rows.push(Row::MoreComments {
                hidden: page.hidden(comments.len()),
            });
        }
        rows
    }

    fn push_rows<'a>(&self, comment: &'a Comment, depth: usize, rows: &mut Vec<Row<'a>>) {
        rows.push(Row::Comment { comment, depth });
        let page = self.replies_page(comment);
        for r in page.visible {
            self.push_rows(r, depth + 1, rows);
        }
        if page.has_more {
            rows.push(Row::MoreReplies {
                parent: comment,
                depth: depth + 1,
                hidden: page.hidden(comment.replies.len()),
            });
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Row<'a> {
    Comment {
        comment: &'a Comment,
        depth: usize,
    },
    /// "Read more replies" button under `parent`
    MoreReplies {
        parent: &'a Comment,
        depth: usize,
        hidden: usize,
    },
    /// "Load more comments" button at the end of the list
    MoreComments {
        hidden: usize,
    },
}
