//! Grade-keyed reflection questions and their response-driven adjustments.

use regex::Regex;
use std::sync::LazyLock;

use crate::constants::curation;
use crate::types::{Assessment, GradeBucket, InterviewResponse, Question};

const KINDERGARTEN: &[&str] = &[
    "What did you like most about flying your machine?",
    "What is one thing you could try to make your machine fly better?",
];

const FIRST: &[&str] = &[
    "What happened when you made your flying machine move through the air?",
    "What is one way you could change your machine to make it fly differently?",
];

const SECOND: &[&str] = &[
    "What did you notice about how your flying machine moved through the air?",
    "If you could make another flying machine, what would you do differently?",
];

const THIRD: &[&str] = &[
    "What did you learn about how your flying machine works?",
    "How could you change your machine to make it fly farther or faster?",
];

const FOURTH: &[&str] = &[
    "What forces (like push, pull, or air) did you notice affecting your flying machine?",
    "If you wanted your machine to fly farther, what would you change or add?",
];

const FIFTH: &[&str] = &[
    "How did you use what you know about forces to design your flying machine?",
    "What adjustments would you make to improve its performance?",
];

const MIDDLE: &[&str] = &[
    "How did the design of your flying machine impact the way it moved through the air?",
    "What changes would you make to the design if you wanted it to fly with more stability or accuracy?",
];

/// Open-ended questions for a bucket, in presentation order
pub fn question_template(grade: GradeBucket) -> &'static [&'static str] {
    match grade {
        GradeBucket::Kindergarten => KINDERGARTEN,
        GradeBucket::First => FIRST,
        GradeBucket::Second => SECOND,
        GradeBucket::Third => THIRD,
        GradeBucket::Fourth => FOURTH,
        GradeBucket::Fifth => FIFTH,
        GradeBucket::Middle => MIDDLE,
    }
}

static EVALUATIVE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)performance|results").expect("evaluative words pattern is valid")
});

fn soften_for_support(questions: Vec<Question>) -> Vec<Question> {
    questions
        .into_iter()
        .map(|mut q| {
            q.question.push_str(curation::REASSURANCE_CLAUSE);
            q
        })
        .collect()
}

fn adapt_for_informal_setting(questions: Vec<Question>) -> Vec<Question> {
    questions
        .into_iter()
        .map(|mut q| {
            q.question = EVALUATIVE_WORDS
                .replace_all(&q.question, curation::INFORMAL_REPLACEMENT)
                .into_owned();
            q
        })
        .collect()
}

/// Build reflection questions from the static grade tables.
///
/// Adjustments run in a fixed order, each over the full current list:
/// reassurance for low confidence, then informal-setting wording, then the
/// reflection question for sessions of 45 minutes or more.
pub fn curate_assessment(response: &InterviewResponse) -> Assessment {
    let mut questions: Vec<Question> = question_template(response.grade_bucket())
        .iter()
        .map(|q| Question::open_ended(*q))
        .collect();

    if response.is_low_confidence() {
        questions = soften_for_support(questions);
    }

    if response.is_informal_setting() {
        questions = adapt_for_informal_setting(questions);
    }

    if response.available_minutes() >= curation::REFLECTION_THRESHOLD_MINUTES {
        questions.push(Question::open_ended(curation::REFLECTION_QUESTION));
    }

    Assessment { questions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QuestionKind;

    fn answers(time: &str, grade: &str, environment: &str, confidence: &str) -> InterviewResponse {
        InterviewResponse {
            time: time.to_string(),
            grade_level: grade.to_string(),
            environment: environment.to_string(),
            confidence: confidence.to_string(),
            assessment: true,
        }
    }

    #[test]
    fn test_base_questions_are_open_ended() {
        let assessment = curate_assessment(&answers("30", "4th", "classroom", "Very confident"));
        assert_eq!(assessment.questions.len(), 2);
        assert!(
            assessment
                .questions
                .iter()
                .all(|q| q.kind == QuestionKind::OpenEnded && q.options.is_none())
        );
    }

    #[test]
    fn test_informal_setting_rewrites_evaluative_words() {
        let formal = curate_assessment(&answers("30", "5th", "classroom", ""));
        assert!(formal.questions[1].question.contains("performance"));

        let informal = curate_assessment(&answers("30", "5th", "after-school club", ""));
        assert_eq!(
            informal.questions[1].question,
            "What adjustments would you make to improve its experience?"
        );
        for q in &informal.questions {
            let lower = q.question.to_lowercase();
            assert!(!lower.contains("performance"));
            assert!(!lower.contains("results"));
        }
    }

    #[test]
    fn test_replacement_ignores_case() {
        let rewritten = adapt_for_informal_setting(vec![Question::open_ended(
            "Share your RESULTS and Performance notes",
        )]);
        assert_eq!(
            rewritten[0].question,
            "Share your experience and experience notes"
        );
    }

    #[test]
    fn test_reflection_question_threshold() {
        let at_threshold = curate_assessment(&answers("45 minutes", "2nd", "classroom", ""));
        assert_eq!(at_threshold.questions.len(), 3);
        assert_eq!(
            at_threshold.questions[2].question,
            curation::REFLECTION_QUESTION
        );

        let below = curate_assessment(&answers("44 minutes", "2nd", "classroom", ""));
        assert_eq!(below.questions.len(), 2);
    }

    #[test]
    fn test_reflection_question_added_after_adjustments() {
        let assessment =
            curate_assessment(&answers("60 minutes", "kindergarten", "library", "Need support"));
        assert_eq!(assessment.questions.len(), 3);
        assert!(
            assessment.questions[0]
                .question
                .ends_with(curation::REASSURANCE_CLAUSE)
        );
        assert!(
            !assessment.questions[2]
                .question
                .ends_with(curation::REASSURANCE_CLAUSE)
        );
    }
}
