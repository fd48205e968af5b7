use super::ProgressTask;
use core::cmp::Ordering;
use core::fmt::{Debug, Formatter};
use core::iter::FusedIterator;

/// An iterator adapter that advances a [`ProgressTask`] as its elements are consumed.
///
/// Each element counts as one completed unit the moment it is handed out, so any
/// consumer that takes every element (a `for` loop, `take(len)`, `find`, `nth`) brings
/// the task to its target. Elements never requested stay uncounted, which is how an
/// abandoned iteration ends up reporting failure.
///
/// The cursor borrows the task; it never owns it, so the task outlives every cursor
/// derived from it and still finalizes on its own terms.
pub struct IterationCursor<'t, 'a, I> {
    iter: I,
    task: &'t ProgressTask<'a>,
}

impl<'t, 'a, I> IterationCursor<'t, 'a, I> {
    /// Wrap `iter`, counting each consumed element against `task`.
    ///
    /// The task must already be started. [`BoundedIteration`](super::BoundedIteration)
    /// takes care of that for sequences of known length.
    #[must_use]
    pub const fn new(iter: I, task: &'t ProgressTask<'a>) -> Self {
        Self { iter, task }
    }

    /// The wrapped iterator.
    #[must_use]
    pub const fn inner(&self) -> &I {
        &self.iter
    }

    /// The task this cursor advances.
    #[must_use]
    pub const fn task(&self) -> &'t ProgressTask<'a> {
        self.task
    }

    /// Drop the progress coupling and return the wrapped iterator.
    #[must_use]
    pub fn into_inner(self) -> I {
        self.iter
    }
}

impl<I: Iterator> Iterator for IterationCursor<'_, '_, I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iter.next()?;
        self.task.increment();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I: ExactSizeIterator> ExactSizeIterator for IterationCursor<'_, '_, I> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<I: FusedIterator> FusedIterator for IterationCursor<'_, '_, I> {}

impl<I: PartialEq> PartialEq for IterationCursor<'_, '_, I> {
    fn eq(&self, other: &Self) -> bool {
        self.iter == other.iter
    }
}

impl<I: PartialOrd> PartialOrd for IterationCursor<'_, '_, I> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter.partial_cmp(&other.iter)
    }
}

impl<I: Debug> Debug for IterationCursor<'_, '_, I> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IterationCursor")
            .field("iter", &self.iter)
            .field("task", &self.task.name())
            .finish()
    }
}
