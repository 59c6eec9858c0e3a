use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Optional search constraints, each passed through verbatim to the match query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FilterCriteria {
    pub diet: Option<String>,
    pub cuisine: Option<String>,
    pub meal_type: Option<String>,
    pub max_ready_time: Option<String>,
}

impl FilterCriteria {
    /// Builds criteria from raw form values. Blank values mean "Any".
    pub fn from_raw(
        diet: Option<&str>,
        cuisine: Option<&str>,
        meal_type: Option<&str>,
        max_ready_time: Option<&str>,
    ) -> Self {
        Self {
            diet: non_blank(diet),
            cuisine: non_blank(cuisine),
            meal_type: non_blank(meal_type),
            max_ready_time: non_blank(max_ready_time),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }

    /// Query parameters for the match query, in a fixed order. Unset and blank
    /// fields are omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("diet", self.diet.as_deref()),
            ("cuisine", self.cuisine.as_deref()),
            ("type", self.meal_type.as_deref()),
            ("maxReadyTime", self.max_ready_time.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.filter(|v| !v.trim().is_empty()).map(|v| (key, v)))
        .collect()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_unset() {
        let filters = FilterCriteria::from_raw(Some(""), Some("  "), None, Some("30"));
        assert_eq!(filters.diet, None);
        assert_eq!(filters.cuisine, None);
        assert_eq!(filters.query_pairs(), vec![("maxReadyTime", "30")]);
    }

    #[test]
    fn non_blank_values_pass_through_verbatim() {
        let filters = FilterCriteria::from_raw(None, Some(" Italian "), None, None);
        assert_eq!(filters.cuisine.as_deref(), Some(" Italian "));
        assert_eq!(filters.query_pairs(), vec![("cuisine", " Italian ")]);
    }

    #[test]
    fn filters_serialize_with_tool_field_names() {
        let filters = FilterCriteria::from_raw(None, None, Some("dessert"), Some("45"));
        let value = serde_json::to_value(&filters).unwrap();
        assert_eq!(value["meal_type"], "dessert");
        assert_eq!(value["max_ready_time"], "45");
    }

    #[test]
    fn meal_type_maps_to_type_parameter() {
        let filters = FilterCriteria {
            diet: Some("vegan".to_string()),
            meal_type: Some("main course".to_string()),
            ..Default::default()
        };
        assert_eq!(
            filters.query_pairs(),
            vec![("diet", "vegan"), ("type", "main course")]
        );
        assert!(!filters.is_empty());
        assert!(FilterCriteria::default().is_empty());
    }
}
