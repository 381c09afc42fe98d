//! Survey export parsing for the activity log importer.
//!
//! The survey platform exports two JSON documents:
//!
//! - a survey definition, mapping question ids (`QID7`) to question text;
//! - a response export, where each response carries free-text answers in
//!   `values["{QID}_TEXT"]` and choice answers in `labels["{QID}"]`.
//!
//! Questions are located by their exact text. A response may contain up to
//! [`MAX_LOGS_PER_RESPONSE`] repeated log blocks, each prefixed `"{i}_"`.
//!
//! This module only turns JSON into [`ParsedResponse`] values. Resolving
//! names to rows and writing logs is the importer's job.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::types::Date;

// ---------------------------------------------------------------------------
// Question texts (exact match against the survey definition)
// ---------------------------------------------------------------------------

pub const STUDENT_NAME_QUESTION: &str = "Student First Name + Last Name<em>(*ensure you use the same name each time your enter a log)</em>";
pub const SERVICE_DATE_QUESTION: &str = "Date of service<br />\n<br />\n<span style=\"font-size:13px;\">( If entering a bulk hours, please enter start date ONLY)</span>";
pub const LOCATION_QUESTION: &str = "Placement Location";
pub const SUPERVISOR_QUESTION: &str = "Placement Supervisor:";
pub const LOG_COUNT_QUESTION: &str = "How many activity logs will you be adding today?<br />\n<em>This is the number of separate logs to a maximum of 10 per shift/day.</em>";
pub const CATEGORY_QUESTION: &str = "Category";
pub const DOMAIN_QUESTION: &str = "Client Domain";
pub const MINUTES_QUESTION: &str = "Minutes spent on activity:<div>[eg. 1.5 hours = entered as 90] </div>";

/// Service dates are entered day-first.
pub const SERVICE_DATE_FORMAT: &str = "%d/%m/%Y";

/// The survey caps the number of log blocks per response.
pub const MAX_LOGS_PER_RESPONSE: u32 = 10;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurveyError {
    #[error("Survey definition has no question with text {0:?}")]
    UnknownQuestion(String),

    #[error("Response is missing field {0}")]
    MissingField(String),

    #[error("Could not parse {value:?} as a service date (expected DD/MM/YYYY)")]
    InvalidDate { value: String },

    #[error("Could not parse {value:?} as {field}")]
    InvalidNumber { field: &'static str, value: String },
}

// ---------------------------------------------------------------------------
// Raw JSON shapes
// ---------------------------------------------------------------------------

/// Survey definition document (`GET /surveys/{id}` payload).
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyDefinition {
    pub result: SurveyDefinitionResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SurveyDefinitionResult {
    pub questions: BTreeMap<String, QuestionDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionDefinition {
    #[serde(rename = "questionText")]
    pub question_text: String,
}

/// Response export document.
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyExport {
    pub responses: Vec<SurveyResponse>,
}

/// One submitted survey response.
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyResponse {
    #[serde(rename = "responseId", default)]
    pub response_id: Option<String>,
    #[serde(default)]
    pub values: Map<String, Value>,
    #[serde(default)]
    pub labels: Map<String, Value>,
}

impl SurveyResponse {
    /// The platform's response id, falling back to the embedded record id.
    pub fn external_id(&self) -> Option<String> {
        self.response_id
            .clone()
            .or_else(|| self.values.get("_recordId").and_then(value_text))
    }
}

// ---------------------------------------------------------------------------
// Question lookup
// ---------------------------------------------------------------------------

/// Question id lookup keyed by exact question text.
#[derive(Debug, Clone, Default)]
pub struct QuestionLookup {
    by_text: BTreeMap<String, Vec<String>>,
}

impl QuestionLookup {
    pub fn from_definition(definition: &SurveyDefinition) -> Self {
        let mut by_text: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (qid, question) in &definition.result.questions {
            by_text
                .entry(question.question_text.clone())
                .or_default()
                .push(qid.clone());
        }
        for qids in by_text.values_mut() {
            qids.sort_by(|a, b| question_order(a).cmp(&question_order(b)));
        }
        Self { by_text }
    }

    /// The id of the question with exactly this text.
    ///
    /// When several questions share the text, the first in question order
    /// (`QID4` before `QID10`) wins.
    pub fn question_id(&self, text: &str) -> Result<&str, SurveyError> {
        self.question_ids(text)
            .first()
            .map(String::as_str)
            .ok_or_else(|| SurveyError::UnknownQuestion(text.to_string()))
    }

    /// Every question id sharing this text, in question order.
    pub fn question_ids(&self, text: &str) -> &[String] {
        self.by_text.get(text).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Sort key for question ids: the numeric suffix of `QID<n>`, then the id
/// itself. Ids without a numeric suffix sort last.
fn question_order(qid: &str) -> (u64, &str) {
    let digits = qid.trim_start_matches(|c: char| !c.is_ascii_digit());
    (digits.parse().unwrap_or(u64::MAX), qid)
}

/// Question ids for every field the importer reads, resolved once per
/// survey definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyFields {
    pub student_name: String,
    pub service_date: String,
    pub location: String,
    /// The supervisor is asked through several questions with the same
    /// text (one per location); whichever one was answered carries it.
    pub supervisors: Vec<String>,
    pub log_count: String,
    pub category: String,
    pub domain: String,
    pub minutes: String,
}

impl SurveyFields {
    pub fn from_definition(definition: &SurveyDefinition) -> Result<Self, SurveyError> {
        let lookup = QuestionLookup::from_definition(definition);
        let supervisors = lookup.question_ids(SUPERVISOR_QUESTION).to_vec();
        if supervisors.is_empty() {
            return Err(SurveyError::UnknownQuestion(SUPERVISOR_QUESTION.to_string()));
        }

        Ok(Self {
            student_name: lookup.question_id(STUDENT_NAME_QUESTION)?.to_string(),
            service_date: lookup.question_id(SERVICE_DATE_QUESTION)?.to_string(),
            location: lookup.question_id(LOCATION_QUESTION)?.to_string(),
            supervisors,
            log_count: lookup.question_id(LOG_COUNT_QUESTION)?.to_string(),
            category: lookup.question_id(CATEGORY_QUESTION)?.to_string(),
            domain: lookup.question_id(DOMAIN_QUESTION)?.to_string(),
            minutes: lookup.question_id(MINUTES_QUESTION)?.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Parsed output
// ---------------------------------------------------------------------------

/// One log block within a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    /// 1-based block index within the response.
    pub index: u32,
    pub activity: String,
    pub domain: String,
    pub minutes_spent: i32,
}

/// A log block dropped because one of its answers could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub index: u32,
    pub reason: String,
}

/// A response reduced to the names and numbers the importer writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    pub response_id: Option<String>,
    pub student_name: String,
    pub service_date: Date,
    pub location: String,
    pub supervisor: String,
    pub entries: Vec<ParsedEntry>,
    pub skipped_entries: Vec<SkippedEntry>,
}

/// Parse one response.
///
/// Response-level problems (missing student, unparsable date or log count)
/// fail the whole response. Problems inside a single log block only drop
/// that block, recorded in [`ParsedResponse::skipped_entries`].
pub fn parse_response(
    fields: &SurveyFields,
    response: &SurveyResponse,
) -> Result<ParsedResponse, SurveyError> {
    let student_name = text_answer(response, &fields.student_name)?;

    let raw_date = text_answer(response, &fields.service_date)?;
    let service_date = parse_service_date(&raw_date)?;

    let location = label_answer(response, &fields.location)?;
    let supervisor = fields
        .supervisors
        .iter()
        .find_map(|qid| {
            response
                .labels
                .get(qid)
                .and_then(value_text)
                .filter(|s| !s.is_empty())
        })
        .ok_or_else(|| SurveyError::MissingField(SUPERVISOR_QUESTION.to_string()))?;

    let raw_count = text_answer(response, &fields.log_count)?;
    let log_count = parse_log_count(&raw_count)?;

    let mut entries = Vec::new();
    let mut skipped_entries = Vec::new();
    for index in 1..=log_count {
        match parse_entry(fields, response, index) {
            Ok(entry) => entries.push(entry),
            Err(err) => skipped_entries.push(SkippedEntry {
                index,
                reason: err.to_string(),
            }),
        }
    }

    Ok(ParsedResponse {
        response_id: response.external_id(),
        student_name,
        service_date,
        location,
        supervisor,
        entries,
        skipped_entries,
    })
}

fn parse_entry(
    fields: &SurveyFields,
    response: &SurveyResponse,
    index: u32,
) -> Result<ParsedEntry, SurveyError> {
    let activity = label_answer(response, &format!("{index}_{}", fields.category))?;
    let domain = label_answer(response, &format!("{index}_{}", fields.domain))?;
    let raw_minutes = text_answer(response, &format!("{index}_{}", fields.minutes))?;
    let minutes_spent = parse_minutes(&raw_minutes)?;

    Ok(ParsedEntry {
        index,
        activity,
        domain,
        minutes_spent,
    })
}

/// Parse a `DD/MM/YYYY` service date.
pub fn parse_service_date(raw: &str) -> Result<Date, SurveyError> {
    NaiveDate::parse_from_str(raw.trim(), SERVICE_DATE_FORMAT).map_err(|_| {
        SurveyError::InvalidDate {
            value: raw.to_string(),
        }
    })
}

fn parse_log_count(raw: &str) -> Result<u32, SurveyError> {
    match raw.trim().parse::<u32>() {
        Ok(count) if count <= MAX_LOGS_PER_RESPONSE => Ok(count),
        _ => Err(SurveyError::InvalidNumber {
            field: "log count",
            value: raw.to_string(),
        }),
    }
}

fn parse_minutes(raw: &str) -> Result<i32, SurveyError> {
    match raw.trim().parse::<i32>() {
        Ok(minutes) if minutes >= 0 => Ok(minutes),
        _ => Err(SurveyError::InvalidNumber {
            field: "minutes",
            value: raw.to_string(),
        }),
    }
}

/// Free-text answer stored under `values["{qid}_TEXT"]`.
fn text_answer(response: &SurveyResponse, qid: &str) -> Result<String, SurveyError> {
    let key = format!("{qid}_TEXT");
    response
        .values
        .get(&key)
        .and_then(value_text)
        .filter(|s| !s.is_empty())
        .ok_or(SurveyError::MissingField(key))
}

/// Choice answer label stored under `labels["{qid}"]`.
fn label_answer(response: &SurveyResponse, qid: &str) -> Result<String, SurveyError> {
    response
        .labels
        .get(qid)
        .and_then(value_text)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SurveyError::MissingField(qid.to_string()))
}

/// Render a scalar JSON value as trimmed text. Exports mix strings and numbers.
///
/// Whole-valued floats (`90.0`) render without the fraction so that numeric
/// answers parse as integers.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(whole), _) => Some(whole.to_string()),
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Some((f as i64).to_string())
            }
            _ => Some(n.to_string()),
        },
        _ => None,
    }
}
