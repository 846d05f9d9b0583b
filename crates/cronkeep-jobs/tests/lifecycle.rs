//! End-to-end job lifecycle over an in-memory crontab.

use cronkeep_jobs::{CrontabLine, JobError, JobStore, MemoryCrontab};

#[test]
fn add_list_remove_lifecycle() {
    let mut store = JobStore::new(MemoryCrontab::new());

    let id = store
        .add("0 5 * * *", "/bin/true", Some("backup"))
        .expect("add succeeds");

    let jobs = store.list_all();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].schedule, "0 5 * * *");
    assert_eq!(jobs[0].command, "/bin/true");
    assert!(jobs[0].annotation().contains("backup"));
    assert!(jobs[0].annotation().contains(&id));

    store.remove(&id).expect("remove succeeds");
    assert!(store.list_all().is_empty());
}

#[test]
fn unrelated_entries_are_invisible_but_survive() {
    let table = MemoryCrontab::with_lines(vec![
        CrontabLine::Raw("PATH=/usr/bin:/bin".to_string()),
        CrontabLine::Raw("15 3 * * * /opt/other-tool/run".to_string()),
    ]);
    let mut store = JobStore::new(table);

    // Foreign lines never show up in list, no matter how many there are.
    assert!(store.list_all().is_empty());

    let id = store.add("*/5 * * * *", "/bin/true", None).unwrap();
    assert_eq!(store.list_all().len(), 1);

    store.remove(&id).unwrap();
    assert_eq!(
        store.table().lines(),
        &[
            CrontabLine::Raw("PATH=/usr/bin:/bin".to_string()),
            CrontabLine::Raw("15 3 * * * /opt/other-tool/run".to_string()),
        ]
    );
}

#[test]
fn remove_unknown_id_is_idempotent_non_mutation() {
    let mut store = JobStore::new(MemoryCrontab::new());
    let id = store.add("0 5 * * *", "/bin/true", None).unwrap();

    assert!(matches!(
        store.remove("00000000-0000-0000-0000-000000000000"),
        Err(JobError::NotFound { .. })
    ));
    // The stored job is untouched.
    let jobs = store.list_all();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, id);
}
