// Tests for running command scripts with `load`

use memtier::interpreter::engine::{LoadSummary, Session};
use memtier::interpreter::errors::SimError;
use memtier::memory::MemoryConfig;
use memtier::snapshot::LineKind;
use std::io::Write;
use tempfile::NamedTempFile;

fn session() -> Session {
    Session::new(MemoryConfig::new(256, 32, 96).with_seed(5)).expect("valid config")
}

fn script(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write script");
    file.flush().expect("flush script");
    file
}

#[test]
fn test_load_runs_every_line() {
    let file = script(
        "# fill the top of the stack\n\
         stack a 16\n\
         stack b 16\n\
         \n\
         heap c 8\n\
         get a\n",
    );

    let mut session = session();
    let summary = session.load(file.path()).expect("script loads");

    assert_eq!(
        summary,
        LoadSummary {
            executed: 4,
            failed: 0
        }
    );
    assert_eq!(session.memory().find_owning_page("b").unwrap().id(), 7);
    assert_eq!(session.memory().find_owning_page("c").unwrap().id(), 0);
    assert!(session.memory().lookup(7).unwrap().highlighted);
    assert!(session.check_invariants().is_ok());
}

#[test]
fn test_failing_lines_are_reported_and_skipped() {
    let file = script("stack a 4\nstack a 4\nbogus line\nget a\n");

    let mut session = session();
    let summary = session.load(file.path()).unwrap();
    assert_eq!(
        summary,
        LoadSummary {
            executed: 4,
            failed: 2
        }
    );

    let errors: Vec<&str> = session
        .console()
        .lines
        .iter()
        .filter(|line| line.kind == LineKind::Error)
        .map(|line| line.text.as_str())
        .collect();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].ends_with(":2: Variable 'a' already exists (page 7)"));
    assert!(errors[1].contains(":3: Unknown command 'bogus'"));
}

#[test]
fn test_missing_file_is_not_fatal() {
    let mut session = session();
    let err = session
        .load(std::path::Path::new("/definitely/not/here.txt"))
        .unwrap_err();
    assert!(matches!(err, SimError::LoadFailed { .. }));
    assert!(!err.is_fatal());

    let message = session.submit("load /definitely/not/here.txt");
    assert!(message.starts_with("Cannot load '/definitely/not/here.txt'"));

    // Session keeps working afterwards
    let message = session.submit("stack after 4");
    assert!(message.starts_with("placed after"));
}

#[test]
fn test_self_including_script_stops() {
    let mut file = NamedTempFile::new().unwrap();
    let path = file.path().display().to_string();
    writeln!(file, "load {}", path).unwrap();
    file.flush().unwrap();

    let mut session = session();
    let summary = session.load(file.path()).unwrap();
    assert_eq!(summary.executed, 1);

    assert_eq!(session.console().error_count(), 1);
    let last_error = session
        .console()
        .lines
        .iter()
        .rev()
        .find(|line| line.kind == LineKind::Error)
        .unwrap();
    assert!(last_error.text.contains("nested more than 8 levels"));
}

#[test]
fn test_submit_load_reports_summary() {
    let file = script("stack a 4\nheap b 4\n");
    let mut session = session();

    let message = session.submit(&format!("load {}", file.path().display()));
    assert_eq!(message, "loaded 2 command(s), 0 failed");
    assert_eq!(session.memory().total_used(), 8);
}
