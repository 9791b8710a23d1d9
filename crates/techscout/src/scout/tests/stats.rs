use super::common::*;
use crate::scout::domain::{CampaignId, ScoutDecision};
use crate::scout::service::ScoutError;

#[test]
fn stats_tally_counts_and_acceptance_rate() {
    let (manager, store) = build_manager();
    let suffixes: Vec<String> = (0..10).map(|n| format!("{n}")).collect();
    let students = recipients(&suffixes.iter().map(String::as_str).collect::<Vec<_>>());

    let report = manager
        .create_bulk(
            company(),
            &students,
            job_posting(),
            "join us".to_string(),
            None,
        )
        .expect("bulk send succeeds");

    // 6 accept, 2 reject, 2 stay pending.
    for invitation in &report.created[..6] {
        manager
            .respond(&invitation.id, &invitation.student, ScoutDecision::Accept)
            .expect("accept applies");
    }
    for invitation in &report.created[6..8] {
        manager
            .respond(&invitation.id, &invitation.student, ScoutDecision::Reject)
            .expect("reject applies");
    }

    let stats = build_aggregator(&store)
        .stats(&report.campaign)
        .expect("campaign exists");

    assert_eq!(stats.total_sent, 10);
    assert_eq!(stats.accepted, 6);
    assert_eq!(stats.rejected, 2);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.expired, 0);
    assert!((stats.acceptance_rate - 75.0).abs() < 0.001);
}

#[test]
fn acceptance_rate_is_zero_before_anyone_responds() {
    let (manager, store) = build_manager();
    let report = manager
        .create_bulk(
            company(),
            &recipients(&["a", "b"]),
            job_posting(),
            "join us".to_string(),
            None,
        )
        .expect("bulk send succeeds");

    let stats = build_aggregator(&store)
        .stats(&report.campaign)
        .expect("campaign exists");

    assert_eq!(stats.pending, 2);
    assert!(stats.acceptance_rate.abs() < f32::EPSILON);
}

#[test]
fn stats_reflect_responses_made_after_the_first_read() {
    let (manager, store) = build_manager();
    let report = manager
        .create_bulk(
            company(),
            &recipients(&["a", "b"]),
            job_posting(),
            "join us".to_string(),
            None,
        )
        .expect("bulk send succeeds");
    let aggregator = build_aggregator(&store);

    let before = aggregator.stats(&report.campaign).expect("campaign exists");
    assert_eq!(before.accepted, 0);

    manager
        .respond(
            &report.created[0].id,
            &report.created[0].student,
            ScoutDecision::Accept,
        )
        .expect("accept applies");

    let after = aggregator.stats(&report.campaign).expect("campaign exists");
    assert_eq!(after.accepted, 1);
    assert!((after.acceptance_rate - 100.0).abs() < 0.001);
}

#[test]
fn unknown_campaign_is_not_found() {
    let (_manager, store) = build_manager();

    match build_aggregator(&store).stats(&CampaignId("cmp-ghost".to_string())) {
        Err(ScoutError::CampaignNotFound(id)) => {
            assert_eq!(id, CampaignId("cmp-ghost".to_string()));
        }
        other => panic!("expected campaign not found, got {other:?}"),
    }
}
