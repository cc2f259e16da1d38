// Integration tests for live file watching
//
// A real watcher on a temp directory. Editors and fs::write may produce
// several modify events per save (truncate, then write), so each test waits
// until the expected content shows up rather than on the first event.

use quill::session::{AppEvent, Session, SessionOptions};
use quill::{TaskType, WatchMatch};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(10);

fn watching_session(match_by: WatchMatch) -> (Session, UnboundedReceiver<AppEvent>) {
    let (tx, rx) = unbounded_channel();
    let session = Session::new(
        SessionOptions {
            task: TaskType::Fix,
            instruction: "make it faster".to_string(),
            watch: true,
            match_by,
            follow_symlinks: false,
        },
        tx,
    );
    (session, rx)
}

/// Wait on the event queue until `done` holds after a ContextChanged.
async fn wait_for(
    rx: &mut UnboundedReceiver<AppEvent>,
    session: &Session,
    done: impl Fn(&str) -> bool,
) {
    let result = timeout(WAIT, async {
        while let Some(event) = rx.recv().await {
            if let AppEvent::ContextChanged { .. } = event {
                if done(&session.render()) {
                    return;
                }
            }
        }
        panic!("event queue closed");
    })
    .await;
    assert!(result.is_ok(), "timed out waiting for reload");
}

fn content_of(session: &Session, dir: &Path, name: &str) -> String {
    let path = fs::canonicalize(dir.join(name)).unwrap();
    session
        .tracked()
        .into_iter()
        .find(|f| f.path == path)
        .map(|f| f.content)
        .unwrap()
}

#[tokio::test]
async fn test_modified_file_reloads_into_prompt() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.py"), "print(1)").unwrap();
    fs::write(tmp.path().join("b.py"), "print(2)").unwrap();

    let (mut session, mut rx) = watching_session(WatchMatch::Path);
    session.drop_paths(&[tmp.path()]);
    assert!(session.is_watching());

    fs::write(tmp.path().join("a.py"), "print(3)").unwrap();

    wait_for(&mut rx, &session, |p| p.contains("File: a.py\n```\nprint(3)```\n\n")).await;

    let prompt = session.render();
    assert!(prompt.contains("File: b.py\n```\nprint(2)```\n\n"));
    assert!(!prompt.contains("print(1)"));

    session.shutdown();
}

#[tokio::test]
async fn test_path_mode_does_not_cross_update() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("one")).unwrap();
    fs::create_dir(tmp.path().join("two")).unwrap();
    fs::write(tmp.path().join("one/x.txt"), "one").unwrap();
    fs::write(tmp.path().join("two/x.txt"), "two").unwrap();

    let (mut session, mut rx) = watching_session(WatchMatch::Path);
    session.drop_paths(&[tmp.path().join("one/x.txt"), tmp.path().join("two/x.txt")]);
    assert_eq!(session.watched_dirs().len(), 2);

    fs::write(tmp.path().join("one/x.txt"), "one-edited").unwrap();

    wait_for(&mut rx, &session, |p| p.contains("one-edited")).await;
    assert_eq!(content_of(&session, &tmp.path().join("two"), "x.txt"), "two");

    session.shutdown();
}

#[tokio::test]
async fn test_name_mode_cross_updates() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("one")).unwrap();
    fs::create_dir(tmp.path().join("two")).unwrap();
    fs::write(tmp.path().join("one/x.txt"), "one").unwrap();
    fs::write(tmp.path().join("two/x.txt"), "two").unwrap();

    let (mut session, mut rx) = watching_session(WatchMatch::Name);
    session.drop_paths(&[tmp.path().join("one/x.txt"), tmp.path().join("two/x.txt")]);

    fs::write(tmp.path().join("one/x.txt"), "shared").unwrap();

    wait_for(&mut rx, &session, |p| p.matches("```\nshared```").count() == 2).await;

    session.shutdown();
}

#[tokio::test]
async fn test_removed_entry_not_resurrected_by_change() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.py"), "print(1)").unwrap();
    fs::write(tmp.path().join("b.py"), "print(2)").unwrap();

    let (mut session, mut rx) = watching_session(WatchMatch::Path);
    session.drop_paths(&[tmp.path().join("a.py"), tmp.path().join("b.py")]);
    session.remove_at(0);

    fs::write(tmp.path().join("a.py"), "print(10)").unwrap();
    fs::write(tmp.path().join("b.py"), "print(20)").unwrap();

    wait_for(&mut rx, &session, |p| p.contains("print(20)")).await;
    assert_eq!(session.file_count(), 1);
    assert!(!session.render().contains("File: a.py"));

    session.shutdown();
}
