use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::models::domain::StudentQuery;

/// Request to get internship recommendations
///
/// Every field is optional; `null` is treated like an absent field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RecommendationRequest {
    #[validate(length(max = 200))]
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub locations: Option<Vec<String>>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default, deserialize_with = "deserialize_top_n")]
    pub top_n: Option<i64>,
}

impl RecommendationRequest {
    /// Convert the payload into a normalized query
    pub fn to_query(&self) -> StudentQuery {
        StudentQuery::new(
            self.name.clone().unwrap_or_else(|| "Student".to_string()),
            self.course.clone().unwrap_or_default(),
            self.skills.iter().flatten(),
            self.locations.iter().flatten(),
            self.field.as_deref().unwrap_or_default(),
            self.top_n,
        )
    }
}

/// Accept integers, floats and numeric strings; anything else becomes `None`
fn deserialize_top_n<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}
