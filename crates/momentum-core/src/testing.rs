//! Shared fixtures for unit tests.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use crate::{
    error::{MomentumError, Result},
    models::Profile,
    plan::PlanGenerator,
};

/// Plan JSON with `weeks` weeks, one video each.
pub fn plan_json(weeks: usize) -> String {
    let weeks = (1..=weeks)
        .map(|i| {
            serde_json::json!({
                "week": format!("Week {i}"),
                "youtubeVideos": [{ "title": format!("Lesson {i}"), "url": format!("https://youtu.be/{i}") }],
                "learningArticles": [],
            })
        })
        .collect::<Vec<_>>();
    serde_json::json!({ "weeks": weeks }).to_string()
}

pub fn guitar_profile() -> Profile {
    Profile {
        hobby_name: "Guitar".to_string(),
        current_skill_level: "beginner".to_string(),
        desired_skill_level: "intermediate".to_string(),
        time_commitment: "casual".to_string(),
    }
}

pub fn chess_profile() -> Profile {
    Profile {
        hobby_name: "Chess".to_string(),
        ..guitar_profile()
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Body(String),
    Fail(String),
}

/// Generator that replays scripted replies and counts calls.
///
/// Once the script runs out the last reply is repeated.
#[derive(Debug, Clone)]
pub struct ScriptedGenerator {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    calls: Arc<AtomicUsize>,
    delay: Duration,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(AtomicUsize::new(0)),
            delay: Duration::ZERO,
        }
    }

    /// Always answers with a `weeks`-week plan.
    pub fn with_plan(weeks: usize) -> Self {
        Self::new().then_body(plan_json(weeks))
    }

    pub fn then_body(self, body: impl Into<String>) -> Self {
        self.push(Reply::Body(body.into()));
        self
    }

    pub fn then_fail(self, message: impl Into<String>) -> Self {
        self.push(Reply::Fail(message.into()));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn push(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    fn next_reply(&self) -> Reply {
        let mut replies = self.replies.lock().unwrap();
        if replies.len() > 1 {
            replies.pop_front().unwrap()
        } else {
            replies
                .front()
                .cloned()
                .unwrap_or_else(|| Reply::Fail("no scripted reply".to_string()))
        }
    }
}

impl PlanGenerator for ScriptedGenerator {
    async fn generate(&self, _profile: &Profile) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.next_reply();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match reply {
            Reply::Body(body) => Ok(body),
            Reply::Fail(message) => Err(MomentumError::Generator { message }),
        }
    }
}
