//! End-to-end scenarios for the progress tracking API.
//!
//! These drive tasks the way callers do, through plain loops and the real clock. The
//! timing-sensitive cases use sleeps that are comfortably longer than the report interval.

use core::cell::RefCell;
use core::time::Duration;
use std::thread;
use taskmeter_lib::progress::{IterationCursor, ProgressTask, ReportFunctions, TrackProgress};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Start(String),
    Progress(f64),
    Finish(bool),
}

fn recorder(events: &RefCell<Vec<Event>>) -> ReportFunctions<'_> {
    ReportFunctions::default()
        .on_start(move |name| events.borrow_mut().push(Event::Start(name.to_string())))
        .on_progress(move |percent| events.borrow_mut().push(Event::Progress(percent)))
        .on_finish(move |success| events.borrow_mut().push(Event::Finish(success)))
}

fn count(events: &[Event], pred: impl Fn(&Event) -> bool) -> usize {
    events.iter().filter(|e| pred(e)).count()
}

fn percents(events: &[Event]) -> Vec<f64> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Progress(p) => Some(*p),
            _ => None,
        })
        .collect()
}

#[test]
fn test_fast_loop_is_throttled() {
    let events = RefCell::new(Vec::new());
    {
        let task = ProgressTask::with_report("fast", recorder(&events)).with_interval(Duration::from_millis(100));
        task.start(5);
        for _ in 0..5 {
            task.increment();
        }
    }

    let events = events.borrow();
    assert_eq!(count(&events, |e| matches!(e, Event::Start(_))), 1);
    assert!(percents(&events).len() <= 1, "reports were not coalesced: {events:?}");
    assert_eq!(events.last(), Some(&Event::Finish(true)));
}

#[test]
fn test_slow_loop_reports_every_step() {
    let events = RefCell::new(Vec::new());
    let values = vec![1, 2, 3, 4, 5];
    {
        let task = ProgressTask::with_report("", recorder(&events)).with_interval(Duration::from_millis(20));
        let mut seen = Vec::new();
        for value in values.iter().with_task(&task) {
            seen.push(*value);
            thread::sleep(Duration::from_millis(40));
        }
        assert_eq!(seen, values);
    }

    let events = events.borrow();
    assert_eq!(events.first(), Some(&Event::Start(String::new())));
    assert_eq!(percents(&events), vec![20.0, 40.0, 60.0, 80.0, 100.0]);
    assert_eq!(events.last(), Some(&Event::Finish(true)));
}

#[test]
fn test_partial_run_reports_failure() {
    let events = RefCell::new(Vec::new());
    {
        let task = ProgressTask::with_report("partial", recorder(&events)).with_interval(Duration::ZERO);
        task.start(5);
        for _ in 0..3 {
            task.increment();
        }
    }

    let events = events.borrow();
    assert_eq!(percents(&events), vec![20.0, 40.0, 60.0]);
    assert_eq!(events.last(), Some(&Event::Finish(false)));
}

#[test]
fn test_unstarted_task_is_silent() {
    let events = RefCell::new(Vec::new());
    {
        let _task = ProgressTask::with_report("silent", recorder(&events));
    }
    assert!(events.borrow().is_empty());
}

#[test]
fn test_finish_fires_exactly_once() {
    let events = RefCell::new(Vec::new());
    let task = ProgressTask::with_report("explicit", recorder(&events));
    task.start(2);
    task.advance(2);
    assert!(task.finish());

    assert_eq!(count(&events.borrow(), |e| matches!(e, Event::Finish(_))), 1);
}

#[test]
fn test_bounded_iteration_over_five_elements() {
    let events = RefCell::new(Vec::new());
    let sequence = ['a', 'b', 'c', 'd', 'e'];
    {
        let task = ProgressTask::with_report("letters", recorder(&events)).with_interval(Duration::ZERO);
        let adapted = sequence.iter().with_task(&task);

        assert_eq!(task.target(), 5);
        assert_eq!(adapted.len(), 5);

        let consumed = adapted.into_iter().count();
        assert_eq!(consumed, 5);
        assert_eq!(task.progress(), 5);
        assert!(task.success());
    }

    let events = events.borrow();
    assert_eq!(count(&events, |e| matches!(e, Event::Start(_))), 1);
    assert_eq!(count(&events, |e| matches!(e, Event::Progress(_))), 5);
    assert_eq!(events.last(), Some(&Event::Finish(true)));
}

#[test]
fn test_cursor_over_unsized_iterator() {
    let task = ProgressTask::new("lines").with_interval(Duration::ZERO);
    let text = "alpha\nbeta\ngamma\n";

    // `lines()` has no exact length, so the caller starts the task.
    task.start(text.lines().count());
    let upper: Vec<_> = IterationCursor::new(text.lines(), &task).map(str::to_uppercase).collect();

    assert_eq!(upper, vec!["ALPHA", "BETA", "GAMMA"]);
    assert!(task.finish());
}

#[test]
fn test_nested_loops_share_no_state() {
    let outer_events = RefCell::new(Vec::new());
    let inner_finishes = RefCell::new(Vec::new());
    {
        let outer = ProgressTask::with_report("outer", recorder(&outer_events)).with_interval(Duration::ZERO);
        for row in (0..3).with_task(&outer) {
            let inner = ProgressTask::with_report(
                format!("row {row}"),
                ReportFunctions::default().on_finish(|success| inner_finishes.borrow_mut().push(success)),
            );
            for _ in (0..row + 1).with_task(&inner) {}
        }
    }

    assert_eq!(*inner_finishes.borrow(), vec![true, true, true]);
    assert_eq!(percents(&outer_events.borrow()).len(), 3);
    assert_eq!(outer_events.borrow().last(), Some(&Event::Finish(true)));
}

#[test]
fn test_adapters_that_stop_at_the_last_element_succeed() {
    let values = [1, 2, 3, 4, 5];

    let events = RefCell::new(Vec::new());
    {
        let task = ProgressTask::with_report("take", recorder(&events)).with_interval(Duration::ZERO);
        assert_eq!(values.iter().with_task(&task).into_iter().take(values.len()).count(), 5);
        assert_eq!(task.progress(), 5);
    }
    assert_eq!(percents(&events.borrow()).len(), 5);
    assert_eq!(events.borrow().last(), Some(&Event::Finish(true)));

    let events = RefCell::new(Vec::new());
    {
        let task = ProgressTask::with_report("find", recorder(&events)).with_interval(Duration::ZERO);
        let found = values.iter().with_task(&task).into_iter().find(|v| **v == 5);
        assert_eq!(found, Some(&5));
        assert_eq!(task.progress(), 5);
    }
    assert_eq!(events.borrow().last(), Some(&Event::Finish(true)));

    let events = RefCell::new(Vec::new());
    {
        let task = ProgressTask::with_report("nth", recorder(&events)).with_interval(Duration::ZERO);
        let last = values.iter().with_task(&task).into_iter().nth(values.len() - 1);
        assert_eq!(last, Some(&5));
        assert_eq!(task.progress(), 5);
    }
    assert_eq!(events.borrow().last(), Some(&Event::Finish(true)));
}

#[test]
fn test_adapter_stopping_short_reports_failure() {
    let events = RefCell::new(Vec::new());
    {
        let task = ProgressTask::with_report("short", recorder(&events)).with_interval(Duration::ZERO);
        let position = (10..15).with_task(&task).into_iter().position(|v| v == 12);
        assert_eq!(position, Some(2));
        assert_eq!(task.progress(), 3);
    }
    assert_eq!(events.borrow().last(), Some(&Event::Finish(false)));
}
