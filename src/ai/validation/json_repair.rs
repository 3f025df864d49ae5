//! JSON Repair
//!
//! Recovers a JSON object from provider replies that are almost, but not
//! quite, valid JSON. Handles:
//! - Markdown code fence wrapping (```json ... ```)
//! - Prose before or after the object
//! - Trailing commas
//! - Truncated output (unclosed strings, brackets, braces)
//!
//! Repair never invents content. Anything that still fails to parse after
//! the repair passes is reported as an error with a short preview.

use serde_json::Value;
use tracing::{debug, warn};

use crate::types::{PlanError, Result};

const PREVIEW_CHARS: usize = 200;

/// Leading characters of a reply, for error messages and logs
pub fn preview(content: &str) -> String {
    let trimmed = content.trim();
    let mut preview: String = trimmed.chars().take(PREVIEW_CHARS).collect();
    if trimmed.chars().count() > PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRepairer;

impl JsonRepairer {
    pub fn new() -> Self {
        Self
    }

    /// Parse JSON, attempting repair if the direct parse fails.
    ///
    /// Returns `(value, was_repaired)`.
    pub fn parse_or_repair(&self, raw: &str) -> Result<(Value, bool)> {
        let cleaned = strip_code_fences(raw.trim().trim_start_matches('\u{feff}'));

        if let Ok(value) = serde_json::from_str::<Value>(cleaned) {
            return Ok((value, false));
        }
        debug!("Direct JSON parse failed, attempting repair");

        // Narrow to the outermost object first so surrounding prose is dropped
        let candidate = extract_object(cleaned).unwrap_or(cleaned);
        if let Ok(value) = serde_json::from_str::<Value>(candidate) {
            warn!("JSON extracted from mixed content");
            return Ok((value, true));
        }

        let repaired = close_open_structures(&remove_trailing_commas(candidate));
        if let Ok(value) = serde_json::from_str::<Value>(&repaired) {
            warn!("JSON repaired (trailing commas / unclosed structures)");
            return Ok((value, true));
        }

        Err(PlanError::malformed(format!(
            "reply is not valid JSON: {}",
            preview(raw)
        )))
    }
}

fn strip_code_fences(s: &str) -> &str {
    let mut body = s;
    if body.starts_with("```") {
        body = body.find('\n').map_or("", |nl| &body[nl + 1..]);
    }
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// String-aware scan state shared by the repair passes
#[derive(Default)]
struct Scanner {
    in_string: bool,
    escape: bool,
}

impl Scanner {
    /// Feed one char; returns true when it is structural (outside a string)
    fn structural(&mut self, ch: char) -> bool {
        if self.escape {
            self.escape = false;
            return false;
        }
        match ch {
            '\\' if self.in_string => {
                self.escape = true;
                false
            }
            '"' => {
                self.in_string = !self.in_string;
                false
            }
            _ => !self.in_string,
        }
    }
}

/// The first `{` through its matching `}`, or through end of input if truncated
fn extract_object(s: &str) -> Option<&str> {
    let start = s.find('{')?;
    let mut scanner = Scanner::default();
    let mut depth = 0usize;

    for (i, ch) in s[start..].char_indices() {
        if !scanner.structural(ch) {
            continue;
        }
        match ch {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&s[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }
    Some(&s[start..])
}

fn remove_trailing_commas(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut scanner = Scanner::default();
    let mut out = String::with_capacity(s.len());

    for (i, &ch) in chars.iter().enumerate() {
        if scanner.structural(ch) && ch == ',' {
            let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
            if matches!(next, Some(']') | Some('}')) {
                continue;
            }
        }
        out.push(ch);
    }
    out
}

/// Close an unterminated string, then any open arrays and objects in order
fn close_open_structures(s: &str) -> String {
    let mut scanner = Scanner::default();
    let mut open: Vec<char> = Vec::new();

    for ch in s.chars() {
        if !scanner.structural(ch) {
            continue;
        }
        match ch {
            '{' => open.push('}'),
            '[' => open.push(']'),
            '}' | ']' => {
                open.pop();
            }
            _ => {}
        }
    }

    let mut out = s.trim_end().to_string();
    if scanner.in_string {
        out.push('"');
    }
    let mut out = remove_trailing_commas(&out);
    while let Some(closer) = open.pop() {
        out.push(closer);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> (Value, bool) {
        JsonRepairer::new().parse_or_repair(input).unwrap()
    }

    #[test]
    fn test_parse_valid_json() {
        let (value, repaired) = parse(r#"{"key": "value"}"#);
        assert!(!repaired);
        assert_eq!(value["key"], "value");
    }

    #[test]
    fn test_strip_code_fences() {
        let (value, repaired) = parse("```json\n{\"key\": \"value\"}\n```");
        assert!(!repaired);
        assert_eq!(value["key"], "value");
    }

    #[test]
    fn test_extract_from_prose() {
        let (value, repaired) =
            parse("Sure! Here is your plan:\n{\"title\": \"Gliders {v2}\"}\nEnjoy the lesson.");
        assert!(repaired);
        assert_eq!(value["title"], "Gliders {v2}");
    }

    #[test]
    fn test_fix_trailing_comma() {
        let (value, repaired) = parse(r#"{"tips": ["a", "b",], }"#);
        assert!(repaired);
        assert_eq!(value["tips"][1], "b");
    }

    #[test]
    fn test_close_truncated_reply() {
        let (value, repaired) = parse(r#"{"lessonPlan": {"title": "Fly", "objectives": ["Lift", "Dra"#);
        assert!(repaired);
        assert_eq!(value["lessonPlan"]["objectives"][1], "Dra");
    }

    #[test]
    fn test_commas_inside_strings_untouched() {
        let (value, _) = parse(r#"{"note": "wait ,] here",}"#);
        assert_eq!(value["note"], "wait ,] here");
    }

    #[test]
    fn test_unrecoverable_is_malformed() {
        let err = JsonRepairer::new()
            .parse_or_repair("I cannot help with that.")
            .unwrap_err();
        assert!(matches!(err, PlanError::MalformedResponse { .. }));
        assert!(err.to_string().contains("I cannot help"));
    }

    #[test]
    fn test_preview_truncates() {
        let long = "x".repeat(500);
        let p = preview(&long);
        assert_eq!(p.len(), PREVIEW_CHARS + 3);
        assert!(p.ends_with("..."));
    }
}
