use super::{IterationCursor, ProgressTask};
use core::fmt::{Debug, Formatter};

const LOG_TARGET: &str = "  progress";

/// A sequence of known length whose traversal drives a [`ProgressTask`].
///
/// Creating the adapter starts the task with the sequence's length as its target.
/// Iterating it yields an [`IterationCursor`] that advances the task by one unit per
/// consumed element. Once the loop is done, the task reports its outcome when it is
/// finished or dropped, so a plain `for` loop needs no reporting code at all:
///
/// ```
/// use taskmeter_lib::progress::{ProgressTask, TrackProgress};
///
/// let files = vec!["a.txt", "b.txt", "c.txt"];
/// let task = ProgressTask::new("compress");
///
/// for file in files.iter().with_task(&task) {
///     let _ = file.len();
/// }
///
/// assert!(task.finish());
/// ```
///
/// An empty sequence leaves the task unstarted, so nothing is reported for it.
pub struct BoundedIteration<'t, 'a, I> {
    iter: I,
    task: &'t ProgressTask<'a>,
}

impl<'t, 'a, I: ExactSizeIterator> BoundedIteration<'t, 'a, I> {
    /// Adapt `sequence` and start `task` with its length.
    pub fn new<S>(sequence: S, task: &'t ProgressTask<'a>) -> Self
    where
        S: IntoIterator<IntoIter = I>,
    {
        let iter = sequence.into_iter();
        let len = iter.len();

        if len > 0 {
            task.start(len);
        } else {
            log::debug!(target: LOG_TARGET, "Not starting task '{}' for an empty sequence", task.name());
        }

        Self { iter, task }
    }

    /// Number of elements in the adapted sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'t, 'a, I> BoundedIteration<'t, 'a, I> {
    #[must_use]
    pub const fn task(&self) -> &'t ProgressTask<'a> {
        self.task
    }
}

impl<'t, 'a, I: Iterator> IntoIterator for BoundedIteration<'t, 'a, I> {
    type Item = I::Item;
    type IntoIter = IterationCursor<'t, 'a, I>;

    fn into_iter(self) -> Self::IntoIter {
        IterationCursor::new(self.iter, self.task)
    }
}

impl<I: Debug> Debug for BoundedIteration<'_, '_, I> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BoundedIteration")
            .field("iter", &self.iter)
            .field("task", &self.task.name())
            .finish()
    }
}

/// Adds [`with_task`](TrackProgress::with_task) to every sequence of known length.
pub trait TrackProgress: IntoIterator {
    /// Start `task` with this sequence's length and iterate with progress tracking.
    fn with_task<'t, 'a>(self, task: &'t ProgressTask<'a>) -> BoundedIteration<'t, 'a, Self::IntoIter>;
}

impl<S> TrackProgress for S
where
    S: IntoIterator,
    S::IntoIter: ExactSizeIterator,
{
    fn with_task<'t, 'a>(self, task: &'t ProgressTask<'a>) -> BoundedIteration<'t, 'a, Self::IntoIter> {
        BoundedIteration::new(self, task)
    }
}
