mod common;

use common::{track, FakeCatalog};
use spotify_import::{
    review_bad_matches, ConfirmPrompt, FailureRecord, FailureReport, QueryBuilder, Result,
    RetryConfig,
};
use std::collections::VecDeque;

/// Prompt that replays a fixed list of answers and records the questions.
struct ScriptedPrompt {
    answers: VecDeque<bool>,
    questions: Vec<String>,
}

impl ScriptedPrompt {
    fn new(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            questions: Vec::new(),
        }
    }
}

impl ConfirmPrompt for ScriptedPrompt {
    fn confirm(&mut self, message: &str, _default: bool) -> Result<bool> {
        self.questions.push(message.to_string());
        Ok(self.answers.pop_front().expect("script exhausted"))
    }
}

fn bad_match_report() -> FailureReport {
    let mut report = FailureReport::default();
    report.record(
        "Mix",
        FailureRecord {
            song: track("Song", "Artist", "Album", "3:30"),
            reason: "Bad match, -15".to_string(),
            playlist_id: Some("pl1".to_string()),
            song_resolution_id: Some("cand1".to_string()),
        },
    );
    report
}

#[tokio::test]
async fn accepting_adds_the_track_and_removes_the_record() {
    let catalog = FakeCatalog::new();
    let retry = RetryConfig::default();
    let builder = QueryBuilder::default();
    let mut report = bad_match_report();
    // Yes to review, yes to accept.
    let mut prompt = ScriptedPrompt::new(&[true, true]);

    let summary = review_bad_matches(&catalog, &retry, &builder, &mut report, &mut prompt)
        .await
        .unwrap();

    assert_eq!(summary.reviewed, 1);
    assert_eq!(summary.accepted, 1);
    assert!(!summary.aborted);
    assert_eq!(report.total(), 0);
    assert_eq!(catalog.submitted_ids("pl1"), vec!["cand1".to_string()]);
    assert_eq!(*catalog.playback_log.borrow(), vec!["cand1".to_string()]);
    // The acceptance prompt shows the entry as its exact query.
    assert!(prompt.questions[1].contains(r#"track:"Song""#));
    assert!(prompt.questions[1].contains("Mix"));
}

#[tokio::test]
async fn declining_keeps_the_record() {
    let catalog = FakeCatalog::new();
    let retry = RetryConfig::default();
    let builder = QueryBuilder::default();
    let mut report = bad_match_report();
    // Yes to review, no to accept.
    let mut prompt = ScriptedPrompt::new(&[true, false]);

    let summary = review_bad_matches(&catalog, &retry, &builder, &mut report, &mut prompt)
        .await
        .unwrap();

    assert_eq!(summary.accepted, 0);
    assert_eq!(report.total(), 1);
    assert!(catalog.added.borrow().is_empty());
}

#[tokio::test]
async fn skipping_review_leaves_everything_untouched() {
    let catalog = FakeCatalog::new();
    let retry = RetryConfig::default();
    let builder = QueryBuilder::default();
    let mut report = bad_match_report();
    let mut prompt = ScriptedPrompt::new(&[false]);

    let summary = review_bad_matches(&catalog, &retry, &builder, &mut report, &mut prompt)
        .await
        .unwrap();

    assert_eq!(summary.reviewed, 0);
    assert_eq!(report.total(), 1);
    assert!(catalog.playback_log.borrow().is_empty());
}

#[tokio::test]
async fn missing_device_can_be_retried() {
    let catalog = FakeCatalog::new().failing_playback_attempts(1);
    let retry = RetryConfig::default();
    let builder = QueryBuilder::default();
    let mut report = bad_match_report();
    // Yes to review, yes to retry playback, yes to accept.
    let mut prompt = ScriptedPrompt::new(&[true, true, true]);

    let summary = review_bad_matches(&catalog, &retry, &builder, &mut report, &mut prompt)
        .await
        .unwrap();

    assert_eq!(summary.accepted, 1);
    assert!(!summary.aborted);
    assert_eq!(report.total(), 0);
}

#[tokio::test]
async fn declining_the_device_retry_aborts_the_review() {
    let catalog = FakeCatalog::new().failing_playback_attempts(u32::MAX);
    let retry = RetryConfig::default();
    let builder = QueryBuilder::default();
    let mut report = bad_match_report();
    // Second bad match that must stay unreviewed after the abort.
    report.record(
        "Other",
        FailureRecord {
            song: track("Later", "", "", "2:00"),
            reason: "Bad match, -20".to_string(),
            playlist_id: Some("pl2".to_string()),
            song_resolution_id: Some("cand2".to_string()),
        },
    );
    // Yes to review, no to the retry prompt.
    let mut prompt = ScriptedPrompt::new(&[true, false]);

    let summary = review_bad_matches(&catalog, &retry, &builder, &mut report, &mut prompt)
        .await
        .unwrap();

    assert!(summary.aborted);
    assert_eq!(summary.accepted, 0);
    assert_eq!(report.total(), 2);
    assert!(catalog.added.borrow().is_empty());
}

#[tokio::test]
async fn unresolved_entries_are_not_reviewable() {
    let catalog = FakeCatalog::new();
    let retry = RetryConfig::default();
    let builder = QueryBuilder::default();
    let mut report = FailureReport::default();
    report.record(
        "Mix",
        FailureRecord {
            song: track("Ghost", "", "", "2:00"),
            reason: "No candidates found".to_string(),
            playlist_id: None,
            song_resolution_id: None,
        },
    );
    let mut prompt = ScriptedPrompt::new(&[]);

    let summary = review_bad_matches(&catalog, &retry, &builder, &mut report, &mut prompt)
        .await
        .unwrap();

    assert_eq!(summary.reviewed, 0);
    assert!(prompt.questions.is_empty());
    assert_eq!(report.total(), 1);
}
