//! Grade-keyed lesson plan templates and time scaling.

use regex::Regex;
use std::sync::LazyLock;

use crate::constants::curation;
use crate::types::{GradeBucket, InterviewResponse, LessonPlan};

/// Static lesson content for one grade bucket
#[derive(Debug)]
pub struct LessonTemplate {
    pub title: &'static str,
    pub objectives: &'static [&'static str],
    pub procedure: &'static [&'static str],
    pub extensions: &'static [&'static str],
}

const KINDERGARTEN: LessonTemplate = LessonTemplate {
    title: "Let's Make Things Fly!",
    objectives: &[
        "Learn about how things move through the air",
        "Build a simple flying machine",
        "Practice following step-by-step instructions",
        "Share what we discover with friends",
    ],
    procedure: &[
        "Circle time: Talk about things that fly (10 minutes)",
        "Watch teacher show how to make a flying machine (10 minutes)",
        "Draw your flying machine idea (10 minutes)",
        "Build your flying machine together (20 minutes)",
        "Play and test your flying machine (15 minutes)",
        "Show and tell about your flying machine (10 minutes)",
    ],
    extensions: &[
        "Draw a picture of your flying machine",
        "Try different decorations on your wings",
        "Make up a story about your flying machine",
    ],
};

const FIRST: LessonTemplate = LessonTemplate {
    title: "Flying Machines: Moving Through Air",
    objectives: &[
        "Discover how things move through air",
        "Create and test a flying machine",
        "Observe how changes affect flight",
        "Share observations with classmates",
    ],
    procedure: &[
        "Discussion about flying things we know (10 minutes)",
        "Watch flying machine demonstration (10 minutes)",
        "Plan your flying machine (15 minutes)",
        "Build time (20 minutes)",
        "Test flights (15 minutes)",
        "Share what we learned (10 minutes)",
    ],
    extensions: &[
        "Try different wing shapes",
        "Count how many spins your propeller makes",
        "Make a poster about your flying machine",
    ],
};

const SECOND: LessonTemplate = LessonTemplate {
    title: "Flying Machines: Air and Motion",
    objectives: &[
        "Explore how air affects moving objects",
        "Build and test a flying machine",
        "Make observations about flight patterns",
        "Communicate findings with others",
    ],
    procedure: &[
        "Explore air and motion concepts (15 minutes)",
        "Flying machine demonstration (10 minutes)",
        "Design planning (15 minutes)",
        "Construction time (20 minutes)",
        "Testing and observing (15 minutes)",
        "Group sharing (10 minutes)",
    ],
    extensions: &[
        "Test your machine at different heights",
        "Measure how far it flies",
        "Keep a flight journal",
    ],
};

const THIRD: LessonTemplate = LessonTemplate {
    title: "Flying Machines: Forces and Motion",
    objectives: &[
        "Understand basic forces affecting flight",
        "Design and build a flying machine",
        "Test and modify designs",
        "Record and share results",
    ],
    procedure: &[
        "Introduction to forces in flight (15 minutes)",
        "Demonstration and discussion (10 minutes)",
        "Design planning (15 minutes)",
        "Building phase (20 minutes)",
        "Testing and modifications (15 minutes)",
        "Results sharing (10 minutes)",
    ],
    extensions: &[
        "Investigate different launch angles",
        "Compare flight distances",
        "Create a flight data chart",
    ],
};

const FOURTH: LessonTemplate = LessonTemplate {
    title: "Flying Machines: Engineering and Forces",
    objectives: &[
        "Analyze forces affecting flight",
        "Engineer a flying machine",
        "Conduct flight tests",
        "Document and present findings",
    ],
    procedure: &[
        "Forces in flight lesson (15 minutes)",
        "Engineering demonstration (10 minutes)",
        "Design process (15 minutes)",
        "Construction (20 minutes)",
        "Testing and data collection (15 minutes)",
        "Presentations (10 minutes)",
    ],
    extensions: &[
        "Study the effect of weight on flight",
        "Graph flight distances",
        "Write a technical report",
    ],
};

const FIFTH: LessonTemplate = LessonTemplate {
    title: "Flying Machines: Aerodynamics and Engineering",
    objectives: &[
        "Apply principles of aerodynamics",
        "Design and construct a flying machine",
        "Conduct controlled tests",
        "Analyze and present results",
    ],
    procedure: &[
        "Aerodynamics principles (15 minutes)",
        "Engineering demonstration (10 minutes)",
        "Technical design (15 minutes)",
        "Precision construction (20 minutes)",
        "Scientific testing (15 minutes)",
        "Data presentation (10 minutes)",
    ],
    extensions: &[
        "Analyze wing efficiency",
        "Calculate average flight distances",
        "Create a scientific poster",
    ],
};

const MIDDLE: LessonTemplate = LessonTemplate {
    title: "Advanced Flying Machines: Engineering and Physics",
    objectives: &[
        "Apply physics principles to flight design",
        "Engineer an optimized flying machine",
        "Conduct systematic testing",
        "Analyze and present findings",
    ],
    procedure: &[
        "Physics of flight discussion (15 minutes)",
        "Engineering principles demo (10 minutes)",
        "Technical design phase (15 minutes)",
        "Precision construction (20 minutes)",
        "Systematic testing (15 minutes)",
        "Data analysis and presentation (10 minutes)",
    ],
    extensions: &[
        "Study drag coefficients",
        "Calculate thrust-to-weight ratios",
        "Create an engineering report",
    ],
};

/// Template for a bucket. Every bucket has one; `Middle` is the catch-all.
pub fn lesson_template(grade: GradeBucket) -> &'static LessonTemplate {
    match grade {
        GradeBucket::Kindergarten => &KINDERGARTEN,
        GradeBucket::First => &FIRST,
        GradeBucket::Second => &SECOND,
        GradeBucket::Third => &THIRD,
        GradeBucket::Fourth => &FOURTH,
        GradeBucket::Fifth => &FIFTH,
        GradeBucket::Middle => &MIDDLE,
    }
}

/// A parenthesized annotation that starts with a number, e.g. "(15 minutes)"
static TIME_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d+[^)]*\)").expect("time annotation pattern is valid"));

/// Rewrite step durations so the procedure fits a short session.
///
/// Sessions under 30 minutes get every "(N ...)" annotation replaced with an
/// even share, `floor(minutes / steps)`. Longer sessions are returned as-is.
pub fn scale_procedure(procedure: &[&str], available_minutes: i64) -> Vec<String> {
    if available_minutes >= curation::SCALING_THRESHOLD_MINUTES || procedure.is_empty() {
        return procedure.iter().map(|step| step.to_string()).collect();
    }

    let per_step = available_minutes.div_euclid(procedure.len() as i64);
    let replacement = format!("({per_step} minutes)");
    tracing::debug!(
        available_minutes,
        steps = procedure.len(),
        per_step,
        "Rescaling procedure for short session"
    );

    procedure
        .iter()
        .map(|step| {
            TIME_ANNOTATION
                .replace_all(step, regex::NoExpand(&replacement))
                .into_owned()
        })
        .collect()
}

/// Build a lesson plan from the static grade tables.
///
/// Pure and total: the same answers always produce the same plan.
pub fn curate_lesson_plan(response: &InterviewResponse) -> LessonPlan {
    let grade = response.grade_bucket();
    let template = lesson_template(grade);

    let mut extensions: Vec<String> = template.extensions.iter().map(|e| e.to_string()).collect();
    if response.is_low_confidence() {
        extensions.push(curation::SUPPORT_TIP.to_string());
    }

    let title = if template.title.is_empty() {
        curation::FALLBACK_TITLE
    } else {
        template.title
    };

    LessonPlan {
        title: title.to_string(),
        objectives: template.objectives.iter().map(|o| o.to_string()).collect(),
        materials: curation::MATERIALS.iter().map(|m| m.to_string()).collect(),
        procedure: scale_procedure(template.procedure, response.available_minutes()),
        extensions,
    }
}
