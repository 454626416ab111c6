//! Behavioral tests for the tailing engine: ordered delivery, idempotence,
//! truncation, deletion, trigger storms, and startup replay.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;

use tailview_core::{
    ClearReason, DeliveryBridge, LineSink, LogTailer, PollOutcome, TailReader,
};

fn append(path: &std::path::Path, content: &str) {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
}

fn sink_contents(sink: &LineSink) -> Vec<String> {
    sink.lines().iter().map(|l| l.content.clone()).collect()
}

fn outcome_contents(outcome: &PollOutcome) -> Vec<String> {
    match outcome {
        PollOutcome::Appended(lines) | PollOutcome::Cleared { lines, .. } => {
            lines.iter().map(|l| l.content.clone()).collect()
        }
        PollOutcome::NoChange => Vec::new(),
    }
}

/// Poll `check` until it returns true or `timeout` elapses.
fn wait_for(mut check: impl FnMut() -> bool, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if check() {
            return true;
        }
        thread::sleep(Duration::from_millis(20));
    }
    check()
}

// ── Ordered delivery ─────────────────────────────────────────────────────────

#[test]
fn appends_surface_in_file_order_without_duplication() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    let reader = TailReader::new(&path);
    let mut sink = LineSink::new();

    append(&path, "one\ntwo\n");
    sink.apply(reader.poll());
    append(&path, "three\n");
    sink.apply(reader.poll());
    append(&path, "four\nfive\n");
    sink.apply(reader.poll());

    assert_eq!(sink_contents(&sink), vec!["one", "two", "three", "four", "five"]);
}

// ── Idempotence ──────────────────────────────────────────────────────────────

#[test]
fn polling_twice_without_change_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    append(&path, "line\n");

    let reader = TailReader::new(&path);
    assert_eq!(outcome_contents(&reader.poll()), vec!["line"]);
    assert_eq!(reader.poll(), PollOutcome::NoChange);
    assert_eq!(reader.poll(), PollOutcome::NoChange);
}

// ── Truncation ───────────────────────────────────────────────────────────────

#[test]
fn truncation_clears_and_rereads_in_the_same_pass() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    append(&path, "stale-one\nstale-two\nstale-three\n");

    let reader = TailReader::new(&path);
    let mut sink = LineSink::new();
    sink.apply(reader.poll());
    assert_eq!(sink.len(), 3);

    // Rotate: truncate to zero, then the writer starts fresh.
    fs::write(&path, "").unwrap();
    append(&path, "fresh\n");

    let outcome = reader.poll();
    assert!(
        matches!(
            outcome,
            PollOutcome::Cleared {
                reason: ClearReason::Truncated,
                ..
            }
        ),
        "expected truncation clear, got {outcome:?}"
    );
    sink.apply(outcome);
    assert_eq!(sink_contents(&sink), vec!["fresh"]);
}

#[test]
fn truncation_to_empty_still_notifies_with_an_empty_batch() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    append(&path, "gone\n");

    let reader = TailReader::new(&path);
    reader.poll();

    fs::write(&path, "").unwrap();
    assert_eq!(
        reader.poll(),
        PollOutcome::Cleared {
            reason: ClearReason::Truncated,
            lines: Vec::new(),
        }
    );
}

// ── Deletion ─────────────────────────────────────────────────────────────────

#[test]
fn deletion_clears_and_recreated_file_is_read_from_start() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    append(&path, "before-one\nbefore-two\n");

    let reader = TailReader::new(&path);
    let mut sink = LineSink::new();
    sink.apply(reader.poll());
    assert_eq!(sink.len(), 2);

    fs::remove_file(&path).unwrap();
    let outcome = reader.poll();
    assert_eq!(
        outcome,
        PollOutcome::Cleared {
            reason: ClearReason::Deleted,
            lines: Vec::new(),
        }
    );
    sink.apply(outcome);
    assert!(sink.is_empty());

    // While the file stays missing, nothing further happens.
    assert_eq!(reader.poll(), PollOutcome::NoChange);

    append(&path, "after\n");
    sink.apply(reader.poll());
    assert_eq!(sink_contents(&sink), vec!["after"]);
}

#[test]
fn missing_file_at_startup_is_silent_until_it_appears() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("late.log");

    let reader = TailReader::new(&path);
    assert_eq!(reader.poll(), PollOutcome::NoChange);

    append(&path, "finally\n");
    assert_eq!(outcome_contents(&reader.poll()), vec!["finally"]);
}

// ── Concurrency storm ────────────────────────────────────────────────────────

#[test]
fn concurrent_triggers_collapse_and_lose_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    let expected: Vec<String> = (0..200).map(|i| format!("line-{i:03}")).collect();
    for line in &expected {
        append(&path, &format!("{line}\n"));
    }

    let reader = Arc::new(TailReader::new(&path));
    let (bridge, queue) = DeliveryBridge::channel();

    let handles: Vec<_> = (0..100)
        .map(|_| {
            let reader = Arc::clone(&reader);
            let bridge = bridge.clone();
            thread::spawn(move || reader.poll_into(&bridge))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    // Triggers suppressed by an in-flight poll deliver nothing; one final
    // poll picks up anything the last winner had not yet seen.
    reader.poll_into(&bridge);

    let mut sink = LineSink::new();
    queue.drain_into(&mut sink);
    assert_eq!(sink_contents(&sink), expected);
}

// ── Startup replay ───────────────────────────────────────────────────────────

#[test]
fn pre_existing_content_is_replayed_on_first_poll() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    for i in 0..50 {
        append(&path, &format!("historic-{i}\n"));
    }

    let tailer = LogTailer::new(&path, Duration::from_millis(100));
    let mut sink = LineSink::new();
    sink.apply(tailer.poll_now());
    assert_eq!(sink.len(), 50);
    assert_eq!(sink.lines()[0].content, "historic-0");
    assert_eq!(sink.lines()[49].content, "historic-49");
}

// ── Error taxonomy ───────────────────────────────────────────────────────────

#[test]
fn unreadable_path_fails_silently_and_polling_recovers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    append(&path, "first\n");

    let reader = TailReader::new(&path);
    let mut sink = LineSink::new();
    sink.apply(reader.poll());
    assert_eq!(sink.len(), 1);

    // Swap the file for a directory: opens succeed but reads cannot. The
    // consumer sees only silence, repeatedly, and nothing crashes.
    fs::remove_file(&path).unwrap();
    sink.apply(reader.poll()); // deletion clear
    assert!(sink.is_empty());
    fs::create_dir(&path).unwrap();
    for _ in 0..5 {
        assert_eq!(reader.poll(), PollOutcome::NoChange);
    }

    // Writer comes back; tailing resumes without intervention.
    fs::remove_dir(&path).unwrap();
    append(&path, "recovered\n");
    sink.apply(reader.poll());
    assert_eq!(sink_contents(&sink), vec!["recovered"]);
}

// ── Partial lines ────────────────────────────────────────────────────────────

#[test]
fn unterminated_tail_is_emitted_immediately_and_may_split() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    let reader = TailReader::new(&path);

    append(&path, "head");
    assert_eq!(outcome_contents(&reader.poll()), vec!["head"]);

    // The remainder arrives later and surfaces as its own entry.
    append(&path, "-tail\n");
    assert_eq!(outcome_contents(&reader.poll()), vec!["-tail"]);
}

// ── Live tailer (timer + notifier) ───────────────────────────────────────────

#[test]
fn running_tailer_delivers_appends_and_rotation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("live.log");
    append(&path, "old-1\nold-2\n");

    let mut tailer = LogTailer::new(&path, Duration::from_millis(25));
    let mut sink = LineSink::new();
    sink.apply(tailer.poll_now());
    assert_eq!(sink.len(), 2);
    tailer.start();

    append(&path, "new-1\nnew-2\n");
    assert!(
        wait_for(
            || {
                tailer.drain_into(&mut sink);
                sink.len() == 4
            },
            Duration::from_secs(5)
        ),
        "appended lines never arrived: {:?}",
        sink_contents(&sink)
    );
    assert_eq!(sink_contents(&sink), vec!["old-1", "old-2", "new-1", "new-2"]);

    // Rotation under a running tailer: the view resets to the new content.
    fs::write(&path, "rotated\n").unwrap();
    assert!(
        wait_for(
            || {
                tailer.drain_into(&mut sink);
                sink_contents(&sink) == ["rotated"]
            },
            Duration::from_secs(5)
        ),
        "rotation never surfaced: {:?}",
        sink_contents(&sink)
    );

    tailer.stop();
}
