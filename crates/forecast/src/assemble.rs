//! Feature vector assembly.

use stockcast_core::{FeatureName, FeatureValue, FeatureVector, ServiceError, ServiceResult};

use crate::request::PredictionRequest;

/// Build the predictor row from a validated request.
///
/// Values are carried over untouched; only the calendar fields are typed.
pub fn assemble(request: &PredictionRequest) -> ServiceResult<FeatureVector> {
    let calendar = request
        .calendar()
        .ok_or_else(|| ServiceError::unexpected("calendar features were not derived before assembly"))?;

    let take = |name: FeatureName| -> ServiceResult<FeatureValue> {
        request
            .feature(name)
            .and_then(FeatureValue::from_json)
            .ok_or_else(|| ServiceError::unexpected(format!("'{name}' was not validated before assembly")))
    };

    Ok(FeatureVector {
        store_id: take(FeatureName::StoreId)?,
        product_id: take(FeatureName::ProductId)?,
        category: take(FeatureName::Category)?,
        region: take(FeatureName::Region)?,
        inventory_level: take(FeatureName::InventoryLevel)?,
        units_sold: take(FeatureName::UnitsSold)?,
        units_ordered: take(FeatureName::UnitsOrdered)?,
        price: take(FeatureName::Price)?,
        discount: take(FeatureName::Discount)?,
        weather_condition: take(FeatureName::WeatherCondition)?,
        holiday_promotion: take(FeatureName::HolidayPromotion)?,
        competitor_pricing: take(FeatureName::CompetitorPricing)?,
        seasonality: take(FeatureName::Seasonality)?,
        day: calendar.day,
        month: calendar.month,
        weekday: calendar.weekday,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarFeatures;
    use serde_json::json;

    fn request() -> PredictionRequest {
        PredictionRequest::from_value(json!({
            "Store ID": "S001",
            "Product ID": "P0001",
            "Category": "Groceries",
            "Region": "North",
            "Inventory Level": 231,
            "Units Sold": "127",
            "Units Ordered": 55,
            "Price": 33.5,
            "Discount": 20,
            "Weather Condition": "Rainy",
            "Holiday/Promotion": true,
            "Competitor Pricing": 29.69,
            "Seasonality": "Autumn",
            "Day": 31
        }))
        .unwrap()
    }

    #[test]
    fn carries_values_through_without_coercion() {
        let mut req = request();
        req.inject_calendar(CalendarFeatures { day: 15, month: 3, weekday: 4 });

        let v = assemble(&req).unwrap();
        assert_eq!(v.units_sold, FeatureValue::Text("127".into()));
        assert_eq!(v.holiday_promotion, FeatureValue::Bool(true));
        assert_eq!(v.price, FeatureValue::Number(33.5));
        assert_eq!((v.day, v.month, v.weekday), (15, 3, 4));
    }

    #[test]
    fn refuses_to_assemble_without_calendar() {
        let err = assemble(&request()).unwrap_err();
        assert_eq!(err.kind(), "unexpected");
    }
}
