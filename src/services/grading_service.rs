use std::collections::{BTreeSet, HashMap};

use serde_json::Value as JsonValue;
use serde::Serialize;

use crate::models::question::{
    AnswerKey, DropdownFillBlankKey, FillBlankKey, MultipleChoiceKey, ParsonsKey, Question,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradingResult {
    pub score: i32,
    pub total_points: i32,
    pub percentage: f64,
}

pub struct GradingService;

impl GradingService {
    /// Grades one submission against the full question list of a bank.
    ///
    /// `answers` is keyed by question id rendered as a string; missing
    /// entries are unanswered questions. A malformed answer (or a key
    /// payload that does not fit the question's declared type) grades that
    /// question as incorrect and never aborts the pass.
    pub fn grade(questions: &[Question], answers: &HashMap<String, JsonValue>) -> GradingResult {
        let total_points: i32 = questions.iter().map(|q| q.points).sum();
        let mut score: i32 = 0;

        for question in questions {
            let submitted = answers.get(&question.id.to_string());
            let correct = Self::is_correct(question, submitted);
            tracing::debug!(
                question_id = %question.id,
                question_type = ?question.question_type,
                points = question.points,
                correct,
                "question graded"
            );
            if correct {
                score += question.points;
            }
        }

        let percentage = if total_points > 0 {
            round2(score as f64 / total_points as f64 * 100.0)
        } else {
            0.0
        };

        GradingResult {
            score,
            total_points,
            percentage,
        }
    }

    fn is_correct(question: &Question, submitted: Option<&JsonValue>) -> bool {
        let Some(key) = AnswerKey::parse(question.question_type, &question.question_data) else {
            tracing::debug!(
                question_id = %question.id,
                "answer key does not fit declared question type, grading as incorrect"
            );
            return false;
        };

        match key {
            AnswerKey::Choice(key) => match choice_match(submitted, &key.correct_answer) {
                Some(method) => {
                    tracing::debug!(question_id = %question.id, method, "choice answer accepted");
                    true
                }
                None => false,
            },
            AnswerKey::MultipleChoice(key) => multiple_choice_matches(&key, submitted),
            AnswerKey::FillBlank(key) => fill_blank_matches(&key, submitted),
            AnswerKey::DropdownFillBlank(key) => dropdown_fill_blank_matches(&key, submitted),
            AnswerKey::Parsons(key) => parsons_matches(&key, submitted),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Canonical string form used by the comparison cascade and the Parsons
/// sequence normalization: null is empty, strings are themselves, scalars
/// use their display form, containers their compact JSON rendering.
fn canonical_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

type TextComparator = fn(&str, &str) -> bool;

/// The layered equivalence cascade for choice-style answers, strictest
/// first. Evaluation short-circuits at the first level that matches, so a
/// looser rule is never consulted once a stricter one has succeeded.
const TEXT_CASCADE: &[(&str, TextComparator)] = &[
    ("string_match", text_eq),
    ("normalized_match", trimmed_eq),
    ("newline_normalized_match", newline_normalized_eq),
    ("multiline_normalized_match", multiline_normalized_eq),
    ("whitespace_ignored_match", whitespace_ignored_eq),
    ("unescaped_match", unescaped_eq),
];

/// Runs the submitted value through the equivalence cascade against the
/// key's answer. Returns the name of the first level that matched, for
/// audit logging; `None` means no level accepted the value.
pub fn choice_match(submitted: Option<&JsonValue>, correct_answer: &str) -> Option<&'static str> {
    let raw = submitted.unwrap_or(&JsonValue::Null);
    if raw.as_str() == Some(correct_answer) {
        return Some("exact_match");
    }
    let submitted_text = canonical_text(raw);
    TEXT_CASCADE
        .iter()
        .find(|(_, cmp)| cmp(&submitted_text, correct_answer))
        .map(|(name, _)| *name)
}

fn text_eq(a: &str, b: &str) -> bool {
    a == b
}

fn trimmed_eq(a: &str, b: &str) -> bool {
    a.trim() == b.trim()
}

fn newline_normalized_eq(a: &str, b: &str) -> bool {
    normalize_newlines(a).trim() == normalize_newlines(b).trim()
}

fn multiline_normalized_eq(a: &str, b: &str) -> bool {
    normalize_multiline(a) == normalize_multiline(b)
}

fn whitespace_ignored_eq(a: &str, b: &str) -> bool {
    strip_whitespace(a) == strip_whitespace(b)
}

fn unescaped_eq(a: &str, b: &str) -> bool {
    unescape_if_quoted(a) == unescape_if_quoted(b)
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Structural normalization for multiline answers (code, LaTeX): per line,
/// trailing whitespace is dropped, interior tabs become four spaces, and
/// interior space runs collapse to one space. Leading indentation is
/// preserved by character count, and the line sequence itself is kept.
fn normalize_multiline(text: &str) -> String {
    let unified = normalize_newlines(text);
    let lines: Vec<String> = unified
        .split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                return String::new();
            }
            let indent: String = line
                .chars()
                .take_while(|c| c.is_whitespace())
                .map(|_| ' ')
                .collect();
            let content = collapse_spaces(&line.trim().replace('\t', "    "));
            format!("{indent}{content}")
        })
        .collect();
    lines.join("\n").trim().to_string()
}

fn collapse_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c == ' ' {
            if !in_run {
                out.push(c);
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Best-effort decode of a value that looks like it went through an extra
/// JSON-escaping round trip (leading quote or literal `\n` sequences).
/// Decode failures fall back to the value as given.
fn unescape_if_quoted(value: &str) -> String {
    if !(value.starts_with('"') || value.contains("\\n")) {
        return value.to_string();
    }
    let requoted = format!("\"{}\"", value.replace('"', "\\\""));
    serde_json::from_str::<String>(&requoted).unwrap_or_else(|_| value.to_string())
}

fn multiple_choice_matches(key: &MultipleChoiceKey, submitted: Option<&JsonValue>) -> bool {
    let submitted_set: BTreeSet<String> = match submitted {
        Some(JsonValue::Array(items)) => items.iter().map(canonical_text).collect(),
        _ => BTreeSet::new(),
    };
    let correct_set: BTreeSet<String> = key.correct_answers.iter().cloned().collect();
    submitted_set == correct_set
}

fn fill_blank_matches(key: &FillBlankKey, submitted: Option<&JsonValue>) -> bool {
    let submitted_text = match submitted {
        None | Some(JsonValue::Null) => "",
        Some(JsonValue::String(s)) => s.as_str(),
        Some(_) => return false,
    };
    submitted_text.trim().to_lowercase() == key.correct_answer.trim().to_lowercase()
}

fn dropdown_fill_blank_matches(key: &DropdownFillBlankKey, submitted: Option<&JsonValue>) -> bool {
    let submitted_map = submitted.and_then(|v| v.as_object());
    let answered = submitted_map.map(|m| m.len()).unwrap_or(0);
    if answered != key.blanks.len() {
        return false;
    }
    key.blanks.iter().enumerate().all(|(i, blank)| {
        submitted_map
            .and_then(|m| m.get(&format!("blank_{i}")))
            .and_then(|v| v.as_str())
            == Some(blank.correct_answer.as_str())
    })
}

fn parsons_matches(key: &ParsonsKey, submitted: Option<&JsonValue>) -> bool {
    if let Some(correct_slots) = &key.slot_answers {
        let slot_value = submitted
            .and_then(|v| v.as_object())
            .and_then(|m| m.get("slot_answers"));
        if let Some(slot_value) = slot_value {
            let Some(user_slots) = slot_value.as_object() else {
                return false;
            };
            if user_slots.len() != correct_slots.len() {
                return false;
            }
            return correct_slots.iter().all(|(slot, label)| {
                user_slots.get(slot.as_str()).and_then(|v| v.as_str()) == Some(label.as_str())
            });
        }
    }

    if let Some(correct_order) = &key.correct_order {
        let submitted_order = extract_submitted_order(submitted, correct_order.len());
        return submitted_order.len() == correct_order.len()
            && submitted_order
                .iter()
                .zip(correct_order)
                .all(|(got, want)| got == want);
    }

    false
}

/// Ordered shape detection for legacy Parsons submissions. Whatever shape
/// the payload arrived in, the result is the sequence of labels the student
/// placed, ready for position-by-position comparison:
/// a mapping with an `order` list, a mapping with `slot_answers` flattened
/// by ascending numeric slot key, a plain 1-based positional mapping up to
/// the key's length, or a plain list. Anything else is an empty sequence.
fn extract_submitted_order(submitted: Option<&JsonValue>, expected_len: usize) -> Vec<String> {
    match submitted {
        Some(JsonValue::Object(map)) => {
            if let Some(order) = map.get("order") {
                return order
                    .as_array()
                    .map(|items| items.iter().map(canonical_text).collect())
                    .unwrap_or_default();
            }
            if let Some(slots) = map.get("slot_answers") {
                let Some(slots) = slots.as_object() else {
                    return Vec::new();
                };
                let mut numbered: Vec<(i64, &JsonValue)> = slots
                    .iter()
                    .filter_map(|(k, v)| k.parse::<i64>().ok().map(|n| (n, v)))
                    .collect();
                numbered.sort_by_key(|(n, _)| *n);
                return numbered.into_iter().map(|(_, v)| canonical_text(v)).collect();
            }
            (1..=expected_len)
                .filter_map(|i| map.get(&i.to_string()))
                .map(canonical_text)
                .collect()
        }
        Some(JsonValue::Array(items)) => items.iter().map(canonical_text).collect(),
        _ => Vec::new(),
    }
}
