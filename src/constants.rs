//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Request gate constants (admission control in front of the AI provider)
pub mod rate_limit {
    /// Maximum admitted requests per rolling minute window
    pub const REQUESTS_PER_MINUTE: u32 = 3;

    /// Maximum admitted requests per rolling day window
    pub const REQUESTS_PER_DAY: u32 = 200;

    /// Minimum spacing between two admitted requests (seconds)
    pub const MIN_SPACING_SECS: u64 = 20;

    /// Length of the minute window (seconds)
    pub const MINUTE_WINDOW_SECS: u64 = 60;

    /// Length of the day window (seconds)
    pub const DAY_WINDOW_SECS: u64 = 24 * 60 * 60;
}

/// Deterministic curation constants
pub mod curation {
    /// Minutes assumed when the time answer has no leading integer
    pub const DEFAULT_MINUTES: i64 = 30;

    /// Sessions shorter than this get their procedure rescaled
    pub const SCALING_THRESHOLD_MINUTES: i64 = 30;

    /// Sessions at least this long get the reflection question
    pub const REFLECTION_THRESHOLD_MINUTES: i64 = 45;

    /// Materials list shared by every grade
    pub const MATERIALS: [&str; 8] = [
        "2 craft sticks",
        "Sticky foam strips",
        "Paper clip",
        "Propeller",
        "Latex-free rubber band",
        "Cardstock",
        "Scissors",
        "Drawing materials",
    ];

    /// Appended to extensions for educators who asked for support
    pub const SUPPORT_TIP: &str =
        "Pro Tip: Take it step by step! Each small success builds confidence.";

    /// Appended to every question for educators who asked for support
    pub const REASSURANCE_CLAUSE: &str = " (There are no wrong answers, share your thoughts!)";

    /// Extra question for longer sessions
    pub const REFLECTION_QUESTION: &str =
        "What was your favorite part of today's flying machine activity?";

    /// Replacement word for evaluative terms in informal settings
    pub const INFORMAL_REPLACEMENT: &str = "experience";

    /// Title used when a grade record has no title
    pub const FALLBACK_TITLE: &str = "Flying Machines";
}

/// Free-text vocabularies used by answer matching
pub mod vocabulary {
    /// Confidence answers containing any of these ask for support
    pub const LOW_CONFIDENCE: [&str; 2] = ["not very", "need support"];

    /// Environment answers containing any of these are informal settings
    pub const INFORMAL_SETTINGS: [&str; 3] = ["after-school", "library", "camp"];
}

/// HTTP/Network constants
pub mod network {
    /// Default request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    /// Connection timeout (seconds)
    pub const CONNECTION_TIMEOUT_SECS: u64 = 30;
}

/// User-facing messages
pub mod messages {
    /// Shown when generation fails for any reason other than the request gate
    pub const GENERATION_FAILED: &str = "Unable to generate lesson plan. Please try again later.";
}
