//! End-to-end planning through the public API, without network access.

use std::sync::Arc;
use std::time::Duration;

use flightplan::ai::{ManualClock, ScriptedProvider};
use flightplan::{
    ContentSource, GateLimits, GenerationMode, InterviewResponse, PlanError, Planner,
    QuestionKind, RequestGate, curate,
};

const LESSON_REPLY: &str = r#"Here is your plan:
```json
{
  "lessonPlan": {
    "title": "Paper Helicopters",
    "objectives": ["Describe how rotating blades create lift"],
    "materials": ["Paper", "Scissors", "Paper clips"],
    "procedure": ["Cut the template (10 minutes)", "Test drops (15 minutes)"],
    "extensions": ["Vary blade length"]
  },
  "assessment": {
    "questions": [
      {"question": "What makes the helicopter spin?", "type": "open-ended"},
      {"question": "Which blade falls slowest?", "type": "multiple-choice", "options": ["Short", "Long"]}
    ]
  }
}
```"#;

fn answers(assessment: bool) -> InterviewResponse {
    InterviewResponse {
        time: "25 minutes".to_string(),
        grade_level: "4th grade".to_string(),
        environment: "classroom".to_string(),
        confidence: "Somewhat confident".to_string(),
        assessment,
    }
}

fn gate(limits: GateLimits, clock: Arc<ManualClock>) -> Arc<RequestGate> {
    Arc::new(RequestGate::with_clock(limits, clock))
}

#[tokio::test]
async fn ai_lesson_is_parsed_from_fenced_reply() {
    let provider = Arc::new(ScriptedProvider::new().reply(LESSON_REPLY));
    let clock = Arc::new(ManualClock::new());
    let planner = Planner::new(
        GenerationMode::Ai,
        provider.clone(),
        gate(GateLimits::default(), clock),
    );

    let lesson = planner.plan(&answers(true)).await.unwrap();
    assert_eq!(lesson.source, ContentSource::Ai);
    assert_eq!(lesson.lesson_plan.title, "Paper Helicopters");

    let assessment = lesson.assessment.unwrap();
    assert_eq!(assessment.questions.len(), 2);
    assert_eq!(assessment.questions[1].kind, QuestionKind::MultipleChoice);

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].json_mode);
    assert!(requests[0].user.contains("4th grade"));
}

#[tokio::test]
async fn auto_mode_matches_curated_output_on_failure() {
    let provider = Arc::new(ScriptedProvider::new().reply("I cannot help with that."));
    let planner = Planner::new(
        GenerationMode::Auto,
        provider,
        gate(GateLimits::default(), Arc::new(ManualClock::new())),
    );

    let response = answers(false);
    let lesson = planner.plan(&response).await.unwrap();
    let curated = curate(&response);

    assert_eq!(lesson.source, ContentSource::Curated);
    assert_eq!(lesson.lesson_plan, curated.lesson_plan);
    assert!(lesson.assessment.is_none());
}

#[tokio::test]
async fn spacing_is_enforced_between_calls() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .reply("Lift pushes the wing up.")
            .reply("Drag slows it down."),
    );
    let clock = Arc::new(ManualClock::new());
    let planner = Planner::new(
        GenerationMode::Ai,
        provider,
        gate(GateLimits::default(), clock.clone()),
    );

    planner.explain("lift").await.unwrap();
    let before = clock.elapsed();
    planner.explain("drag").await.unwrap();

    assert!(clock.elapsed() - before >= Duration::from_secs(20));
}

#[tokio::test]
async fn minute_limit_reaches_caller_with_wait_estimate() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .reply("one")
            .reply("two")
            .reply("three")
            .reply("four"),
    );
    let limits = GateLimits {
        min_spacing: Duration::ZERO,
        ..GateLimits::default()
    };
    let planner = Planner::new(
        GenerationMode::Auto,
        provider.clone(),
        gate(limits, Arc::new(ManualClock::new())),
    );

    for concept in ["lift", "drag", "thrust"] {
        planner.explain(concept).await.unwrap();
    }

    let err = planner.plan(&answers(true)).await.unwrap_err();
    assert!(matches!(err, PlanError::MinuteLimitExceeded { .. }));
    assert!(err.user_message().starts_with("Please wait"));
    assert_eq!(provider.call_count(), 3);
}
