//! Deferred statement trees.

use std::collections::VecDeque;

use declpack_core::StmtHandle;

/// Statements referenced by the record being built.
///
/// They are written after the owning record closes, in the order they were
/// queued.
#[derive(Debug, Default)]
pub struct StmtQueue {
    pending: VecDeque<StmtHandle>,
}

impl StmtQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, stmt: StmtHandle) {
        self.pending.push_back(stmt);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<StmtHandle> {
        self.pending.pop_front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
