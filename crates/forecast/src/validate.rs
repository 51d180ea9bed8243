//! Completeness checks on the required inputs.
//!
//! Calendar features are derived, never required from the client, so they are
//! excluded from every report here.

use serde_json::Value as JsonValue;

use stockcast_core::{FeatureName, ServiceError, ServiceResult};

use crate::request::PredictionRequest;

/// Required inputs absent from the request, in schema order.
pub fn missing_fields(request: &PredictionRequest) -> Vec<FeatureName> {
    FeatureName::required_inputs()
        .filter(|f| !request.contains(f.as_str()))
        .collect()
}

/// Check that every required input is present, non-null and a scalar.
pub fn validate(request: &PredictionRequest) -> ServiceResult<()> {
    let missing = missing_fields(request);
    if !missing.is_empty() {
        return Err(ServiceError::validation(format!(
            "Missing required fields: {}",
            render_list(&missing)
        )));
    }

    let nulls = offending(request, |v| v.is_null());
    if !nulls.is_empty() {
        return Err(ServiceError::validation(format!(
            "Required fields must not be null: {}",
            render_list(&nulls)
        )));
    }

    let composite = offending(request, |v| v.is_array() || v.is_object());
    if !composite.is_empty() {
        return Err(ServiceError::validation(format!(
            "Required fields must be scalar values: {}",
            render_list(&composite)
        )));
    }

    Ok(())
}

fn offending(request: &PredictionRequest, pred: impl Fn(&JsonValue) -> bool) -> Vec<FeatureName> {
    FeatureName::required_inputs()
        .filter(|f| request.feature(*f).is_some_and(&pred))
        .collect()
}

/// `['Region', 'Price']`
fn render_list(fields: &[FeatureName]) -> String {
    let items: Vec<String> = fields.iter().map(|f| format!("'{}'", f.as_str())).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn complete_body() -> Value {
        json!({
            "Target Date": "2024-03-15",
            "Store ID": "S001",
            "Product ID": "P0001",
            "Category": "Groceries",
            "Region": "North",
            "Inventory Level": 231,
            "Units Sold": 127,
            "Units Ordered": 55,
            "Price": 33.5,
            "Discount": 20,
            "Weather Condition": "Rainy",
            "Holiday/Promotion": 0,
            "Competitor Pricing": 29.69,
            "Seasonality": "Autumn"
        })
    }

    fn request_without(keys: &[&str]) -> PredictionRequest {
        let mut body = complete_body();
        for k in keys {
            body.as_object_mut().unwrap().remove(*k);
        }
        PredictionRequest::from_value(body).unwrap()
    }

    #[test]
    fn complete_request_passes() {
        assert!(validate(&request_without(&[])).is_ok());
    }

    #[test]
    fn names_exactly_the_missing_field() {
        let req = request_without(&["Region"]);
        assert_eq!(missing_fields(&req), vec![FeatureName::Region]);

        let err = validate(&req).unwrap_err();
        assert_eq!(err.message(), "Missing required fields: ['Region']");
        assert!(!err.message().contains("Day"));
        assert!(!err.message().contains("Weekday"));
    }

    #[test]
    fn reports_missing_fields_in_schema_order() {
        let req = request_without(&["Seasonality", "Price", "Store ID"]);
        let err = validate(&req).unwrap_err();
        assert_eq!(
            err.message(),
            "Missing required fields: ['Store ID', 'Price', 'Seasonality']"
        );
    }

    #[test]
    fn empty_body_lists_all_thirteen_inputs() {
        let req = PredictionRequest::from_value(json!({})).unwrap();
        let missing = missing_fields(&req);
        assert_eq!(missing.len(), 13);
        assert!(missing.iter().all(|f| !f.is_calendar()));
    }

    #[test]
    fn nulls_and_composites_are_rejected() {
        let mut body = complete_body();
        body["Price"] = Value::Null;
        let err = validate(&PredictionRequest::from_value(body).unwrap()).unwrap_err();
        assert_eq!(err.message(), "Required fields must not be null: ['Price']");

        let mut body = complete_body();
        body["Region"] = json!(["North"]);
        let err = validate(&PredictionRequest::from_value(body).unwrap()).unwrap_err();
        assert_eq!(err.message(), "Required fields must be scalar values: ['Region']");
    }
}
