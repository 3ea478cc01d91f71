//! Policy-driven decoding of API pages.
//!
//! The remote API serializes dates as Unix timestamps and field names in
//! snake_case, while the rest of the process may use different conventions.
//! Instead of flipping a process-wide serializer setting around each decode
//! call, the policy is an explicit [`DecodePolicy`] value passed into every
//! decode, so nothing leaks into unrelated code paths and concurrent callers
//! cannot race on shared serializer state.
//!
//! Lenient field matching accepts both `accepted_answer_id` and
//! `acceptedAnswerId`; the API has historically served both shapes through
//! different proxies.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::ImportError;
use crate::models::{Answer, Question};

/// How timestamp fields are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateHandling {
    UnixSeconds,
    UnixMillis,
}

/// How remote field names are matched against the expected snake_case names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMatching {
    /// Accept snake_case or camelCase.
    Lenient,
    /// snake_case only.
    SnakeCase,
}

/// Serialization policy for one decode call.
#[derive(Debug, Clone, Copy)]
pub struct DecodePolicy {
    pub dates: DateHandling,
    pub fields: FieldMatching,
}

impl Default for DecodePolicy {
    fn default() -> Self {
        Self {
            dates: DateHandling::UnixSeconds,
            fields: FieldMatching::Lenient,
        }
    }
}

/// One decoded questions page.
#[derive(Debug, Clone)]
pub struct QuestionsPage {
    pub items: Vec<Question>,
    pub has_more: bool,
    pub quota_remaining: Option<i64>,
}

/// One decoded answers page.
#[derive(Debug, Clone)]
pub struct AnswersPage {
    pub items: Vec<Answer>,
    pub has_more: bool,
    pub quota_remaining: Option<i64>,
}

pub fn decode_questions_page(
    json: &[u8],
    policy: &DecodePolicy,
) -> Result<QuestionsPage, ImportError> {
    let (items, has_more, quota_remaining) = decode_envelope(json)?;

    let mut questions = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let obj = item
            .as_object()
            .ok_or_else(|| ImportError::decode(format!("question item {} is not an object", idx)))?;

        questions.push(Question {
            question_id: require_i64(obj, "question_id", policy)?,
            title: field(obj, "title", policy)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            creation_date: require_date(obj, "creation_date", policy)?,
            accepted_answer_id: field(obj, "accepted_answer_id", policy).and_then(Value::as_i64),
            tags: field(obj, "tags", policy)
                .and_then(Value::as_array)
                .map(|arr| {
                    arr.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        });
    }

    Ok(QuestionsPage {
        items: questions,
        has_more,
        quota_remaining,
    })
}

pub fn decode_answers_page(json: &[u8], policy: &DecodePolicy) -> Result<AnswersPage, ImportError> {
    let (items, has_more, quota_remaining) = decode_envelope(json)?;

    let mut answers = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let obj = item
            .as_object()
            .ok_or_else(|| ImportError::decode(format!("answer item {} is not an object", idx)))?;

        answers.push(Answer {
            answer_id: require_i64(obj, "answer_id", policy)?,
            question_id: require_i64(obj, "question_id", policy)?,
            creation_date: require_date(obj, "creation_date", policy)?,
            score: field(obj, "score", policy).and_then(Value::as_i64).unwrap_or(0),
            is_accepted: field(obj, "is_accepted", policy)
                .and_then(Value::as_bool)
                .unwrap_or(false),
            body: field(obj, "body", policy)
                .and_then(Value::as_str)
                .map(str::to_string),
        });
    }

    Ok(AnswersPage {
        items: answers,
        has_more,
        quota_remaining,
    })
}

/// Parse the common page envelope: `items` array plus paging metadata.
///
/// `has_more`/`quota_remaining` are metadata, not entity data, so they are
/// matched leniently regardless of policy.
fn decode_envelope(json: &[u8]) -> Result<(Vec<Value>, bool, Option<i64>), ImportError> {
    let value: Value = serde_json::from_slice(json)
        .map_err(|e| ImportError::decode(format!("malformed JSON: {}", e)))?;

    let obj = value
        .as_object()
        .ok_or_else(|| ImportError::decode("page payload is not a JSON object"))?;

    let items = obj
        .get("items")
        .and_then(Value::as_array)
        .cloned()
        .ok_or_else(|| ImportError::decode("page payload missing 'items' array"))?;

    let has_more = obj
        .get("has_more")
        .or_else(|| obj.get("hasMore"))
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let quota_remaining = obj
        .get("quota_remaining")
        .or_else(|| obj.get("quotaRemaining"))
        .and_then(Value::as_i64);

    Ok((items, has_more, quota_remaining))
}

/// Look up `name` (given in snake_case) under the active matching policy.
fn field<'a>(obj: &'a Map<String, Value>, name: &str, policy: &DecodePolicy) -> Option<&'a Value> {
    if let Some(v) = obj.get(name) {
        if !v.is_null() {
            return Some(v);
        }
    }
    if policy.fields == FieldMatching::Lenient {
        let camel = snake_to_camel(name);
        if let Some(v) = obj.get(&camel) {
            if !v.is_null() {
                return Some(v);
            }
        }
    }
    None
}

fn require_i64(obj: &Map<String, Value>, name: &str, policy: &DecodePolicy) -> Result<i64, ImportError> {
    field(obj, name, policy)
        .and_then(Value::as_i64)
        .ok_or_else(|| ImportError::decode(format!("missing or non-integer field '{}'", name)))
}

fn require_date(
    obj: &Map<String, Value>,
    name: &str,
    policy: &DecodePolicy,
) -> Result<DateTime<Utc>, ImportError> {
    let raw = require_i64(obj, name, policy)?;
    let secs = match policy.dates {
        DateHandling::UnixSeconds => raw,
        DateHandling::UnixMillis => raw / 1000,
    };
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| ImportError::decode(format!("timestamp out of range in '{}': {}", name, raw)))
}

fn snake_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
