//! End-to-end synchronisation scenarios over in-memory fakes.

use chrono::{DateTime, TimeZone, Utc};
use prism::github::test_support::StaticSourceGateway;
use prism::github::{PullRequestComment, PullRequestCommit};
use prism::persistence::test_support::InMemoryStore;
use prism::telemetry::TelemetryEvent;
use prism::telemetry::test_support::RecordingSink;
use prism::{ClosedPullRequest, RepositoryId, Synchronizer, mirror_repositories};

fn instant(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0)
        .single()
        .expect("timestamp should be valid")
}

fn merged_pull(id: u64, number: u64, assignee: Option<&str>) -> ClosedPullRequest {
    ClosedPullRequest {
        id,
        number,
        repository: "repo".to_owned(),
        title: format!("PR {number}"),
        assignee: assignee.map(str::to_owned),
        target_branch: "main".to_owned(),
        source_branch: format!("feature/{number}"),
        merged_at: Some(instant(10, 0)),
    }
}

fn unmerged_pull(id: u64, number: u64) -> ClosedPullRequest {
    ClosedPullRequest {
        merged_at: None,
        ..merged_pull(id, number, None)
    }
}

fn commits() -> Vec<PullRequestCommit> {
    vec![PullRequestCommit {
        sha: "abc123".to_owned(),
        authored_at: Some(instant(1, 0)),
    }]
}

fn comment(id: u64, author: &str) -> PullRequestComment {
    PullRequestComment {
        id,
        author: author.to_owned(),
        body: format!("comment {id}"),
        created_at: instant(11, 0),
    }
}

fn repo() -> RepositoryId {
    RepositoryId::parse("octo/repo").expect("identifier should parse")
}

#[tokio::test]
async fn only_merged_pull_requests_are_stored() {
    // Three closed PRs: A and B merged, C unmerged.
    let gateway = StaticSourceGateway::new()
        .with_pull("octo/repo", merged_pull(1, 10, None), commits(), vec![])
        .with_pull("octo/repo", merged_pull(2, 11, None), commits(), vec![])
        .with_pull("octo/repo", unmerged_pull(3, 12), commits(), vec![]);
    let mut store = InMemoryStore::new();

    let report = Synchronizer::new(&gateway, &mut store)
        .sync(&repo())
        .await
        .expect("sync should succeed");

    assert_eq!(report.pull_requests, 2);
    let stored_ids: Vec<i64> = store.pull_requests.iter().map(|r| r.id).collect();
    assert_eq!(stored_ids, vec![1, 2]);
    // instant(10, 0) is midnight UTC, 09:00 in the display timezone.
    assert!(
        store
            .pull_requests
            .iter()
            .all(|r| r.merged_at.to_string() == "2024-03-10 09:00:00")
    );
}

#[tokio::test]
async fn rerun_against_unchanged_remote_inserts_nothing() {
    let gateway = StaticSourceGateway::new().with_pull(
        "octo/repo",
        merged_pull(1, 10, Some("alice")),
        commits(),
        vec![comment(71, "bob")],
    );
    let mut store = InMemoryStore::new();

    let first = Synchronizer::new(&gateway, &mut store)
        .sync(&repo())
        .await
        .expect("first sync should succeed");
    assert_eq!((first.pull_requests, first.comments), (1, 1));

    let second = Synchronizer::new(&gateway, &mut store)
        .sync(&repo())
        .await
        .expect("second sync should succeed");
    assert_eq!((second.pull_requests, second.comments), (0, 0));
    assert_eq!(store.pull_requests.len(), 1);
    assert_eq!(store.comments.len(), 1);
}

#[tokio::test]
async fn stored_comments_never_come_from_the_assignee() {
    let gateway = StaticSourceGateway::new().with_pull(
        "octo/repo",
        merged_pull(1, 10, Some("alice")),
        commits(),
        vec![comment(71, "alice"), comment(72, "bob"), comment(73, "carol")],
    );
    let mut store = InMemoryStore::new();

    Synchronizer::new(&gateway, &mut store)
        .sync(&repo())
        .await
        .expect("sync should succeed");

    assert_eq!(store.comments.len(), 2);
    assert!(
        store
            .comments
            .iter()
            .all(|record| record.assignee.as_deref() != Some(record.commenter.as_str()))
    );
}

#[tokio::test]
async fn commit_failure_rolls_back_one_repository_but_not_the_next() {
    let gateway = StaticSourceGateway::new()
        .with_pull("octo/alpha", merged_pull(1, 10, None), commits(), vec![])
        .with_pull("octo/beta", merged_pull(2, 20, None), commits(), vec![]);
    let mut store = InMemoryStore::new();
    store.fail_next_insert();
    let telemetry = RecordingSink::default();

    let identifiers = vec![
        RepositoryId::parse("octo/alpha").expect("identifier should parse"),
        RepositoryId::parse("octo/beta").expect("identifier should parse"),
    ];

    mirror_repositories(&gateway, &mut store, &telemetry, &identifiers)
        .await
        .expect("the run should continue past the failed commit");

    // Alpha's batch was discarded wholesale; beta still landed.
    let stored_ids: Vec<i64> = store.pull_requests.iter().map(|r| r.id).collect();
    assert_eq!(stored_ids, vec![2]);
    assert_eq!(
        telemetry.take(),
        vec![TelemetryEvent::RepositoryMirrored {
            repository: "octo/beta".to_owned(),
            pull_requests: 1,
            comments: 0,
        }]
    );
}

#[tokio::test]
async fn repositories_sharing_a_number_keep_their_own_listings() {
    let gateway = StaticSourceGateway::new()
        .with_pull("octo/alpha", merged_pull(1, 10, None), commits(), vec![])
        .with_pull(
            "octo/beta",
            merged_pull(2, 10, Some("alice")),
            vec![
                PullRequestCommit {
                    sha: "abc123".to_owned(),
                    authored_at: Some(instant(1, 0)),
                },
                PullRequestCommit {
                    sha: "def456".to_owned(),
                    authored_at: Some(instant(2, 0)),
                },
            ],
            vec![comment(91, "bob")],
        );
    let mut store = InMemoryStore::new();
    let telemetry = RecordingSink::default();

    let identifiers = vec![
        RepositoryId::parse("octo/alpha").expect("identifier should parse"),
        RepositoryId::parse("octo/beta").expect("identifier should parse"),
    ];

    mirror_repositories(&gateway, &mut store, &telemetry, &identifiers)
        .await
        .expect("both repositories should mirror");

    let alpha = store
        .pull_requests
        .iter()
        .find(|r| r.id == 1)
        .expect("alpha's pull request should be stored");
    let beta = store
        .pull_requests
        .iter()
        .find(|r| r.id == 2)
        .expect("beta's pull request should be stored");
    assert_eq!(alpha.num_commits, 1);
    assert_eq!(beta.num_commits, 2);
    assert_eq!(store.comments.len(), 1);
    assert!(store.comments.iter().all(|c| c.pull_id == 2));
}

#[tokio::test]
async fn already_stored_pull_request_is_left_untouched() {
    let gateway = StaticSourceGateway::new()
        .with_pull("octo/repo", merged_pull(1, 10, None), commits(), vec![])
        .with_pull(
            "octo/repo",
            merged_pull(2, 11, Some("alice")),
            commits(),
            vec![comment(81, "bob")],
        );
    let mut store = InMemoryStore::new();

    // First run stores only PR 1: the remote did not know PR 2 yet.
    let first_gateway =
        StaticSourceGateway::new().with_pull("octo/repo", merged_pull(1, 10, None), commits(), vec![]);
    Synchronizer::new(&first_gateway, &mut store)
        .sync(&repo())
        .await
        .expect("first sync should succeed");
    let original = store.pull_requests.clone();

    let report = Synchronizer::new(&gateway, &mut store)
        .sync(&repo())
        .await
        .expect("second sync should succeed");

    assert_eq!((report.pull_requests, report.comments), (1, 1));
    assert_eq!(store.pull_requests.first(), original.first());
    assert_eq!(store.pull_requests.len(), 2);
}
