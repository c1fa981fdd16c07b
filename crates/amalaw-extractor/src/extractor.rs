//! Question/answer pair extraction from a comment tree.

use amalaw_domain::{html, Comment, QAPair, TargetAuthor, Thread};
use tracing::debug;

/// Extract question/answer pairs from a thread.
///
/// Walks the comment tree depth-first starting from each direct child of the
/// thread root (the root itself is never tested as an answer). A pair is
/// emitted for every live, non-empty comment authored by the target author
/// whose parent exists, has body text, and was written by someone else.
///
/// The output preserves depth-first visitation order and contains at most
/// one pair per answering comment. Anomalies (missing parent, deleted or
/// empty question, self-reply) drop the candidate and continue; the function
/// never fails.
pub fn extract(thread: &Thread, target: &TargetAuthor) -> Vec<QAPair> {
    let mut pairs = Vec::new();

    // Explicit stack rather than recursion: thread depth is attacker-shaped
    // input and must not be able to overflow the call stack. Children are
    // pushed in reverse so the leftmost child pops first.
    let mut stack: Vec<&Comment> = thread.children.iter().rev().collect();

    while let Some(comment) = stack.pop() {
        if let Some(pair) = try_pair(thread, comment, target) {
            pairs.push(pair);
        }

        // Children are traversed regardless of whether a pair was emitted,
        // and regardless of the comment's own body or deleted state.
        stack.extend(comment.children.iter().rev());
    }

    pairs
}

/// Test a single comment as an answer candidate.
fn try_pair(thread: &Thread, comment: &Comment, target: &TargetAuthor) -> Option<QAPair> {
    if !comment.has_body() || !target.matches(comment.author.as_deref()) {
        return None;
    }

    let parent_id = comment.parent?;
    let Some(parent) = find_node(thread, parent_id) else {
        debug!(
            comment_id = comment.id,
            parent_id, "parent not found in tree, dropping candidate"
        );
        return None;
    };

    if !parent.has_body {
        return None;
    }
    if target.matches(parent.author) {
        // A reply to the target author's own comment is not a question.
        return None;
    }

    let answer = comment.text.as_deref().unwrap_or_default();
    Some(QAPair {
        question: html::unescape(parent.text.unwrap_or_default()),
        answer: html::unescape(answer),
        timestamp: comment.created_at.clone(),
        thread_id: thread.id,
        thread_title: thread.title_or_empty().to_string(),
    })
}

/// A located tree node, viewed as a potential question.
///
/// The thread root and ordinary comments have different types, so parent
/// lookup flattens whichever it finds into this shape.
struct NodeRef<'a> {
    author: Option<&'a str>,
    text: Option<&'a str>,
    has_body: bool,
}

/// Locate a node by identifier, searching depth-first from the thread root.
///
/// The root itself participates: the target author answering a top-level
/// Ask HN post pairs the post body as the question. Identifiers are unique
/// within a thread, so the first match is the only match.
fn find_node(thread: &Thread, id: u64) -> Option<NodeRef<'_>> {
    if thread.id == id {
        return Some(NodeRef {
            author: thread.author.as_deref(),
            text: thread.text.as_deref(),
            has_body: thread.text.as_deref().is_some_and(|t| !t.is_empty()),
        });
    }

    let mut stack: Vec<&Comment> = thread.children.iter().rev().collect();
    while let Some(comment) = stack.pop() {
        if comment.id == id {
            return Some(NodeRef {
                author: comment.author.as_deref(),
                text: comment.text.as_deref(),
                has_body: comment.has_body(),
            });
        }
        stack.extend(comment.children.iter().rev());
    }

    None
}
