//! Preview of a submitted donation as the service parsed it.
//!
//! The service returns what it extracted from the donor's free text. Fields it
//! could not extract are filled with fixed wording; there is no local parsing.

use mealmitra_adapters::models::ParsedFood;
use serde::Serialize;

const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SafetyLevel {
    Safe,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanedFoodPreview {
    pub food_name: String,
    pub quantity: String,
    pub safe_until: String,
    pub safety_note: &'static str,
    pub safety_level: SafetyLevel,
    pub category: &'static str,
}

fn known(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty() && !text.eq_ignore_ascii_case(UNKNOWN))
        .map(str::to_string)
}

impl From<&ParsedFood> for CleanedFoodPreview {
    fn from(parsed: &ParsedFood) -> Self {
        Self {
            food_name: known(&parsed.food).unwrap_or_else(|| "Food Donation".to_string()),
            quantity: known(&parsed.quantity).unwrap_or_else(|| "As mentioned".to_string()),
            safe_until: known(&parsed.safe_until).unwrap_or_else(|| "Today".to_string()),
            safety_note: "Please ensure the food is consumed within the recommended time.",
            safety_level: SafetyLevel::Safe,
            category: "Food",
        }
    }
}
