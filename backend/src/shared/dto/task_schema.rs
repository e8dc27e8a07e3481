//! Request-boundary validation for task payloads.
//!
//! Each field of the task document has exactly one validator. Create runs
//! them all as required fields, update runs the same validators over
//! whichever fields are present. Every failing field is reported, not just
//! the first one.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    create_task_request::CreateTaskRequest, task_priority::TaskPriority, task_status::TaskStatus,
    timestamp, update_task_request::UpdateTaskRequest,
};

pub const TITLE: &str = "title";
pub const DESCRIPTION: &str = "description";
pub const DUE_DATE: &str = "dueDate";
pub const PRIORITY: &str = "priority";
pub const STATUS: &str = "status";

type Validator<T> = fn(&Value) -> Result<T, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", summary(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    fn required<T>(&mut self, body: &Map<String, Value>, field: &str, validator: Validator<T>) -> Option<T> {
        match body.get(field) {
            None | Some(Value::Null) => {
                self.push(field, "is required");
                None
            }
            Some(value) => self.check(field, value, validator),
        }
    }

    fn optional<T>(&mut self, body: &Map<String, Value>, field: &str, validator: Validator<T>) -> Option<T> {
        match body.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => self.check(field, value, validator),
        }
    }

    fn check<T>(&mut self, field: &str, value: &Value, validator: Validator<T>) -> Option<T> {
        match validator(value) {
            Ok(parsed) => Some(parsed),
            Err(message) => {
                self.push(field, message);
                None
            }
        }
    }

    fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

// ── Field validators ───────────────────────────────────────────

fn string(value: &Value) -> Result<&str, String> {
    value.as_str().ok_or_else(|| "must be a string".to_string())
}

fn title(value: &Value) -> Result<String, String> {
    let text = string(value)?;
    if text.trim().is_empty() {
        return Err("should not be empty".to_string());
    }
    Ok(text.to_string())
}

fn description(value: &Value) -> Result<String, String> {
    string(value).map(str::to_string)
}

fn due_date(value: &Value) -> Result<DateTime<Utc>, String> {
    timestamp::parse(string(value)?).ok_or_else(|| "must be a valid ISO 8601 date string".to_string())
}

fn priority(value: &Value) -> Result<TaskPriority, String> {
    TaskPriority::from_str(string(value)?).map_err(|e| e.to_string())
}

fn status(value: &Value) -> Result<TaskStatus, String> {
    TaskStatus::from_str(string(value)?).map_err(|e| e.to_string())
}

// ── Entry points ───────────────────────────────────────────────

fn as_object(body: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    body.as_object().ok_or_else(|| {
        let mut errors = ValidationErrors::default();
        errors.push("body", "must be a JSON object");
        errors
    })
}

pub fn validate_create(body: &Value) -> Result<CreateTaskRequest, ValidationErrors> {
    let fields = as_object(body)?;
    let mut errors = ValidationErrors::default();

    let title = errors.required(fields, TITLE, title);
    let description = errors.required(fields, DESCRIPTION, description);
    let due_date = errors.required(fields, DUE_DATE, due_date);
    let priority = errors.required(fields, PRIORITY, priority);
    let status = errors.required(fields, STATUS, status);

    match (title, description, due_date, priority, status) {
        (Some(title), Some(description), Some(due_date), Some(priority), Some(status)) => {
            errors.into_result(CreateTaskRequest { title, description, due_date, priority, status })
        }
        _ => Err(errors),
    }
}

pub fn validate_update(body: &Value) -> Result<UpdateTaskRequest, ValidationErrors> {
    let fields = as_object(body)?;
    let mut errors = ValidationErrors::default();

    let request = UpdateTaskRequest {
        title: errors.optional(fields, TITLE, title),
        description: errors.optional(fields, DESCRIPTION, description),
        due_date: errors.optional(fields, DUE_DATE, due_date),
        priority: errors.optional(fields, PRIORITY, priority),
        status: errors.optional(fields, STATUS, status),
    };
    errors.into_result(request)
}
