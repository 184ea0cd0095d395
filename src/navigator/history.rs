//! Back/forward history stacks

use std::collections::VecDeque;

use crate::archive::NodeId;

/// Two bounded LIFO stacks of visited folders.
/// When a stack is full the oldest entry is dropped.
#[derive(Clone, Debug)]
pub struct History {
    previous: VecDeque<NodeId>,
    next: VecDeque<NodeId>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            previous: VecDeque::new(),
            next: VecDeque::new(),
            limit,
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.previous.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.next.is_empty()
    }

    pub fn peek_previous(&self) -> Option<NodeId> {
        self.previous.back().copied()
    }

    pub fn peek_next(&self) -> Option<NodeId> {
        self.next.back().copied()
    }

    pub fn previous_len(&self) -> usize {
        self.previous.len()
    }

    pub fn next_len(&self) -> usize {
        self.next.len()
    }

    pub(super) fn push_previous(&mut self, node: NodeId) {
        push_bounded(&mut self.previous, node, self.limit);
    }

    pub(super) fn push_next(&mut self, node: NodeId) {
        push_bounded(&mut self.next, node, self.limit);
    }

    pub(super) fn pop_previous(&mut self) -> Option<NodeId> {
        self.previous.pop_back()
    }

    pub(super) fn pop_next(&mut self) -> Option<NodeId> {
        self.next.pop_back()
    }

    pub(super) fn clear_next(&mut self) {
        self.next.clear();
    }
}

fn push_bounded(stack: &mut VecDeque<NodeId>, node: NodeId, limit: usize) {
    if limit == 0 {
        return;
    }
    while stack.len() >= limit {
        stack.pop_front();
    }
    stack.push_back(node);
}
