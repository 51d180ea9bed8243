//! Feature schema consumed by the demand predictor.
//!
//! The schema is a fixed list of 16 named fields in a fixed order. Thirteen of
//! them come straight from the client request; `Day`, `Month` and `Weekday` are
//! derived from the requested target date.

use std::borrow::Cow;

use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

/// One of the 16 predictor inputs, in schema order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureName {
    StoreId,
    ProductId,
    Category,
    Region,
    InventoryLevel,
    UnitsSold,
    UnitsOrdered,
    Price,
    Discount,
    WeatherCondition,
    HolidayPromotion,
    CompetitorPricing,
    Seasonality,
    Day,
    Month,
    Weekday,
}

impl FeatureName {
    /// Every feature, in schema order.
    pub const ALL: [FeatureName; 16] = [
        FeatureName::StoreId,
        FeatureName::ProductId,
        FeatureName::Category,
        FeatureName::Region,
        FeatureName::InventoryLevel,
        FeatureName::UnitsSold,
        FeatureName::UnitsOrdered,
        FeatureName::Price,
        FeatureName::Discount,
        FeatureName::WeatherCondition,
        FeatureName::HolidayPromotion,
        FeatureName::CompetitorPricing,
        FeatureName::Seasonality,
        FeatureName::Day,
        FeatureName::Month,
        FeatureName::Weekday,
    ];

    /// Wire name of the field (request key and model column).
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureName::StoreId => "Store ID",
            FeatureName::ProductId => "Product ID",
            FeatureName::Category => "Category",
            FeatureName::Region => "Region",
            FeatureName::InventoryLevel => "Inventory Level",
            FeatureName::UnitsSold => "Units Sold",
            FeatureName::UnitsOrdered => "Units Ordered",
            FeatureName::Price => "Price",
            FeatureName::Discount => "Discount",
            FeatureName::WeatherCondition => "Weather Condition",
            FeatureName::HolidayPromotion => "Holiday/Promotion",
            FeatureName::CompetitorPricing => "Competitor Pricing",
            FeatureName::Seasonality => "Seasonality",
            FeatureName::Day => "Day",
            FeatureName::Month => "Month",
            FeatureName::Weekday => "Weekday",
        }
    }

    /// Position in the schema (0..16).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Derived from the target date rather than supplied by the client.
    pub fn is_calendar(&self) -> bool {
        matches!(self, FeatureName::Day | FeatureName::Month | FeatureName::Weekday)
    }

    /// Identifier-like features the model encodes through a category table.
    pub fn is_categorical(&self) -> bool {
        matches!(
            self,
            FeatureName::StoreId
                | FeatureName::ProductId
                | FeatureName::Category
                | FeatureName::Region
                | FeatureName::WeatherCondition
                | FeatureName::Seasonality
        )
    }

    /// The features a client must send, in schema order.
    pub fn required_inputs() -> impl Iterator<Item = FeatureName> {
        Self::ALL.into_iter().filter(|f| !f.is_calendar())
    }
}

impl core::fmt::Display for FeatureName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scalar feature value exactly as the client sent it.
///
/// No coercion happens here; the predictor decides which shapes it accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl FeatureValue {
    /// Convert a JSON scalar. `null`, arrays and objects yield `None`.
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Number(n) => n.as_f64().map(FeatureValue::Number),
            JsonValue::String(s) => Some(FeatureValue::Text(s.clone())),
            JsonValue::Bool(b) => Some(FeatureValue::Bool(*b)),
            JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
        }
    }

    /// Numeric reading: numbers as-is, numeric strings parsed, booleans as 0/1.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(n) => Some(*n),
            FeatureValue::Text(s) => s.trim().parse::<f64>().ok(),
            FeatureValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        }
    }

    /// Key used for category lookups (`1.0` renders as `"1"`).
    pub fn category_key(&self) -> Cow<'_, str> {
        match self {
            FeatureValue::Text(s) => Cow::Borrowed(s.as_str()),
            FeatureValue::Number(n) => Cow::Owned(n.to_string()),
            FeatureValue::Bool(b) => Cow::Owned(b.to_string()),
        }
    }
}

impl Serialize for FeatureValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FeatureValue::Number(n) => serializer.serialize_f64(*n),
            FeatureValue::Text(s) => serializer.serialize_str(s),
            FeatureValue::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

/// The single row handed to the predictor.
///
/// Built only after validation succeeded, so every field is present.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub store_id: FeatureValue,
    pub product_id: FeatureValue,
    pub category: FeatureValue,
    pub region: FeatureValue,
    pub inventory_level: FeatureValue,
    pub units_sold: FeatureValue,
    pub units_ordered: FeatureValue,
    pub price: FeatureValue,
    pub discount: FeatureValue,
    pub weather_condition: FeatureValue,
    pub holiday_promotion: FeatureValue,
    pub competitor_pricing: FeatureValue,
    pub seasonality: FeatureValue,
    pub day: u32,
    pub month: u32,
    /// Monday = 0 .. Sunday = 6.
    pub weekday: u32,
}

impl FeatureVector {
    /// Value of a feature by name.
    pub fn value(&self, name: FeatureName) -> Cow<'_, FeatureValue> {
        let field = match name {
            FeatureName::StoreId => &self.store_id,
            FeatureName::ProductId => &self.product_id,
            FeatureName::Category => &self.category,
            FeatureName::Region => &self.region,
            FeatureName::InventoryLevel => &self.inventory_level,
            FeatureName::UnitsSold => &self.units_sold,
            FeatureName::UnitsOrdered => &self.units_ordered,
            FeatureName::Price => &self.price,
            FeatureName::Discount => &self.discount,
            FeatureName::WeatherCondition => &self.weather_condition,
            FeatureName::HolidayPromotion => &self.holiday_promotion,
            FeatureName::CompetitorPricing => &self.competitor_pricing,
            FeatureName::Seasonality => &self.seasonality,
            FeatureName::Day => return Cow::Owned(FeatureValue::Number(f64::from(self.day))),
            FeatureName::Month => return Cow::Owned(FeatureValue::Number(f64::from(self.month))),
            FeatureName::Weekday => {
                return Cow::Owned(FeatureValue::Number(f64::from(self.weekday)));
            }
        };
        Cow::Borrowed(field)
    }

    /// `(name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureName, Cow<'_, FeatureValue>)> + '_ {
        FeatureName::ALL.into_iter().map(move |name| (name, self.value(name)))
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(FeatureName::ALL.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name.as_str(), &*value)?;
        }
        map.end()
    }
}
