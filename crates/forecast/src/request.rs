//! Parsed prediction request.

use serde_json::{Map, Value as JsonValue};

use stockcast_core::{FeatureName, ServiceError, ServiceResult};

use crate::calendar::{CalendarFeatures, TARGET_DATE_FIELD};

/// One request body: field name → raw JSON value.
///
/// Lives for a single request. Calendar features are attached after the
/// target date has been derived; they take precedence over any client-sent
/// `Day`/`Month`/`Weekday` keys.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    fields: Map<String, JsonValue>,
    calendar: Option<CalendarFeatures>,
}

impl PredictionRequest {
    pub fn new(fields: Map<String, JsonValue>) -> Self {
        Self {
            fields,
            calendar: None,
        }
    }

    /// Accept only JSON objects.
    pub fn from_value(value: JsonValue) -> ServiceResult<Self> {
        match value {
            JsonValue::Object(fields) => Ok(Self::new(fields)),
            other => Err(ServiceError::validation(format!(
                "Request body must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn from_slice(body: &[u8]) -> ServiceResult<Self> {
        let value: JsonValue = serde_json::from_slice(body)
            .map_err(|e| ServiceError::validation(format!("Request body is not valid JSON: {e}")))?;
        Self::from_value(value)
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn target_date(&self) -> Option<&JsonValue> {
        self.get(TARGET_DATE_FIELD)
    }

    /// Raw value for a feature. Calendar features are not read from the body.
    pub fn feature(&self, name: FeatureName) -> Option<&JsonValue> {
        if name.is_calendar() {
            return None;
        }
        self.get(name.as_str())
    }

    pub fn inject_calendar(&mut self, calendar: CalendarFeatures) {
        self.calendar = Some(calendar);
    }

    pub fn calendar(&self) -> Option<CalendarFeatures> {
        self.calendar
    }

    pub fn fields(&self) -> &Map<String, JsonValue> {
        &self.fields
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
