//! Tests for the session object.

use super::*;
use crate::{
    models::ResourceKind,
    store::{keys, MemoryStore},
    testing::{guitar_profile, plan_json, ScriptedGenerator},
};

async fn session(generator: ScriptedGenerator) -> Momentum<MemoryStore, ScriptedGenerator> {
    let momentum = Momentum::new(MemoryStore::new(), generator);
    momentum.load().await;
    momentum
}

async fn onboarded(generator: ScriptedGenerator) -> Momentum<MemoryStore, ScriptedGenerator> {
    let momentum = session(generator).await;
    momentum
        .update_profile(&ProfileUpdate::replace_with(guitar_profile()))
        .await
        .expect("Failed to save profile");
    momentum
}

fn video(week_index: usize) -> LastViewedResource {
    LastViewedResource {
        kind: ResourceKind::Video,
        title: "Strumming patterns".to_string(),
        url: "https://youtu.be/strum".to_string(),
        week_index,
    }
}

#[tokio::test]
async fn test_last_resource_survives_profile_update() {
    let momentum = onboarded(ScriptedGenerator::with_plan(4)).await;
    momentum.record_resource(&video(2)).await.unwrap();

    momentum
        .update_profile(&ProfileUpdate::single(ProfileField::TimeCommitment, "intense"))
        .await
        .unwrap();

    assert_eq!(momentum.last_resource().await, Some(video(2)));
}

#[tokio::test]
async fn test_profile_change_invalidates_plan() {
    let generator = ScriptedGenerator::new()
        .then_body(plan_json(4))
        .then_body(plan_json(6));
    let momentum = onboarded(generator).await;

    assert_eq!(momentum.get_plan().await.unwrap().plan.week_count(), 4);
    assert_eq!(momentum.get_plan().await.unwrap().source, PlanSource::Memory);

    momentum
        .update_profile(&ProfileUpdate::single(ProfileField::HobbyName, "Chess"))
        .await
        .unwrap();
    assert!(!momentum.store().contains(keys::LEARNING_PLAN).await);
    assert!(momentum.plan_state().await.dirty);

    let loaded = momentum.get_plan().await.unwrap();
    assert_eq!(loaded.source, PlanSource::Network);
    assert_eq!(loaded.plan.week_count(), 6);
    assert_eq!(momentum.generator().calls(), 2);
}

#[tokio::test]
async fn test_failed_profile_write_still_invalidates() {
    let momentum = onboarded(ScriptedGenerator::with_plan(4)).await;
    momentum.get_plan().await.unwrap();
    momentum.store().fail_writes(keys::DESIRED_SKILL_LEVEL).await;

    let update = ProfileUpdate {
        current_skill_level: Some("advanced".to_string()),
        desired_skill_level: Some("professional".to_string()),
        ..Default::default()
    };
    assert!(momentum.update_profile(&update).await.is_err());

    assert!(momentum.plan_state().await.dirty);
    assert!(!momentum.store().contains(keys::LEARNING_PLAN).await);
    assert_eq!(momentum.profile().await.current_skill_level, "advanced");
}

#[tokio::test]
async fn test_fresh_plan_aligns_weeks() {
    let momentum = onboarded(ScriptedGenerator::with_plan(6)).await;
    momentum.toggle_week("1").await.unwrap();

    momentum.get_plan().await.unwrap();

    let weeks = momentum.weeks().await;
    assert_eq!(weeks.len(), 6);
    assert!(weeks[0].completed);
    assert_eq!(momentum.progress().await, 17);
    assert!(momentum.is_week_eligible(1).await);
    assert!(!momentum.is_finished().await);
}

#[tokio::test]
async fn test_events_are_published() {
    let momentum = session(ScriptedGenerator::with_plan(4)).await;
    let mut events = momentum.subscribe();

    momentum
        .update_profile(&ProfileUpdate::replace_with(guitar_profile()))
        .await
        .unwrap();
    momentum.get_plan().await.unwrap();
    momentum.toggle_week("1").await.unwrap();
    momentum.toggle_week("3").await.unwrap();
    momentum.record_resource(&video(0)).await.unwrap();

    assert_eq!(
        events.recv().await.unwrap(),
        MomentumEvent::ProfileUpdated(guitar_profile())
    );
    assert_eq!(
        events.recv().await.unwrap(),
        MomentumEvent::PlanLoaded {
            source: PlanSource::Network,
            weeks: 4,
        }
    );
    match events.recv().await.unwrap() {
        MomentumEvent::ProgressChanged { progress, weeks } => {
            assert_eq!(progress, 25);
            assert!(weeks[0].completed);
        }
        other => panic!("expected progress event, got {other:?}"),
    }
    // The locked toggle of week 3 publishes nothing
    assert_eq!(
        events.recv().await.unwrap(),
        MomentumEvent::ResourceRecorded(video(0))
    );
}

#[tokio::test]
async fn test_stale_profile_snapshot_does_not_pin_plan() {
    let generator = ScriptedGenerator::new()
        .then_body(plan_json(4))
        .then_body(plan_json(6));
    let momentum = onboarded(generator).await;
    let before = momentum.profile().await;

    momentum
        .update_profile(&ProfileUpdate::single(ProfileField::HobbyName, "Chess"))
        .await
        .unwrap();
    // A load that read the profile just before the update lands afterwards
    momentum.plans.get_plan(&before).await.unwrap();

    let loaded = momentum.get_plan().await.unwrap();
    assert_eq!(loaded.source, PlanSource::Network);
    assert_eq!(loaded.plan.week_count(), 6);
    assert_eq!(momentum.generator().calls(), 2);
}

#[tokio::test]
async fn test_failed_progress_write_still_publishes() {
    let momentum = session(ScriptedGenerator::with_plan(4)).await;
    momentum.store().fail_writes(keys::PROGRESS).await;
    let mut events = momentum.subscribe();

    let toggle = momentum.toggle_week("1").await.unwrap();

    assert!(matches!(toggle, Toggle::Completed { progress: 25, .. }));
    match events.recv().await.unwrap() {
        MomentumEvent::ProgressChanged { progress, weeks } => {
            assert_eq!(progress, 25);
            assert!(weeks[0].completed);
        }
        other => panic!("expected progress event, got {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_plan_publishes_failure() {
    let momentum = onboarded(ScriptedGenerator::new().then_fail("offline")).await;
    let mut events = momentum.subscribe();

    let err = momentum.get_plan().await.unwrap_err();

    assert!(err.is_fetch_failure());
    match events.recv().await.unwrap() {
        MomentumEvent::PlanFailed { message } => assert!(message.contains("offline")),
        other => panic!("expected failure event, got {other:?}"),
    }
    assert!(momentum.plan_state().await.last_error.is_some());
}

#[tokio::test]
async fn test_onboarding_flow() {
    let momentum = session(ScriptedGenerator::with_plan(4)).await;

    assert!(momentum.get_plan().await.is_err());
    assert_eq!(momentum.generator().calls(), 0);

    for (step, value) in [(1, "Guitar"), (2, "beginner"), (3, "intermediate"), (4, "casual")] {
        momentum.save_onboarding_step(step, value).await.unwrap();
    }
    assert!(momentum.onboarding_completed().await);
    assert_eq!(momentum.profile().await, guitar_profile());

    let err = momentum.save_onboarding_step(2, "").await.unwrap_err();
    assert!(matches!(err, MomentumError::InvalidInput { .. }));

    assert_eq!(momentum.get_plan().await.unwrap().source, PlanSource::Network);
}

#[tokio::test]
async fn test_load_restores_persisted_state() {
    let momentum = onboarded(ScriptedGenerator::with_plan(4)).await;
    momentum.save_onboarding_step(4, "casual").await.unwrap();
    momentum.get_plan().await.unwrap();
    momentum.toggle_week("1").await.unwrap();
    momentum.record_resource(&video(0)).await.unwrap();

    let restarted = Momentum::new(momentum.store().clone(), ScriptedGenerator::with_plan(4));
    let overview = restarted.load().await;

    assert_eq!(overview.profile, guitar_profile());
    assert!(overview.onboarding_completed);
    assert_eq!(overview.progress, 25);
    assert_eq!(overview.last_resource, Some(video(0)));

    // The cached plan is reused across sessions
    assert_eq!(restarted.get_plan().await.unwrap().source, PlanSource::Cache);
    assert_eq!(restarted.generator().calls(), 0);
}

#[tokio::test]
async fn test_cascade_policy() {
    let momentum = Momentum::new(MemoryStore::new(), ScriptedGenerator::with_plan(4))
        .with_uncomplete_policy(UncompletePolicy::Cascade);
    momentum.load().await;
    momentum.toggle_week("1").await.unwrap();
    momentum.toggle_week("2").await.unwrap();

    momentum.toggle_week("1").await.unwrap();
    assert_eq!(momentum.progress().await, 0);
}
