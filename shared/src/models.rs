use serde::{Deserialize, Serialize};

/// Toppings payload returned by the catalog endpoint for a single product.
///
/// Only the fields the watcher reads are modelled; everything else the
/// catalog sends is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToppingsResponse {
    pub categories: Vec<ToppingCategory>,
}

/// A group of variant options (e.g. "Auto f1").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToppingCategory {
    pub description: String,
    pub toppings: Vec<Topping>,
}

/// A single purchasable variant option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topping {
    pub description: String,
    pub is_available: bool,
}

impl ToppingsResponse {
    /// Find the category whose description matches `name` exactly.
    pub fn category(&self, name: &str) -> Option<&ToppingCategory> {
        self.categories.iter().find(|c| c.description == name)
    }
}

impl ToppingCategory {
    /// First available topping whose description is not `sentinel`
    /// (compared case-insensitively).
    pub fn first_available_except(&self, sentinel: &str) -> Option<&Topping> {
        let sentinel = sentinel.to_lowercase();
        self.toppings
            .iter()
            .find(|t| t.description.to_lowercase() != sentinel && t.is_available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "product_id": 2113564293,
        "categories": [
            {
                "id": 1,
                "description": "Bebida",
                "toppings": [{"description": "Coca-Cola", "is_available": true, "price": 0}]
            },
            {
                "id": 2,
                "description": "Auto f1",
                "min_toppings_for_categories": 1,
                "toppings": [
                    {"description": "Sin Auto", "is_available": true},
                    {"description": "Auto Piloto", "is_available": false}
                ]
            }
        ]
    }"#;

    fn topping(description: &str, is_available: bool) -> Topping {
        Topping {
            description: description.to_string(),
            is_available,
        }
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let response: ToppingsResponse = serde_json::from_str(PAYLOAD).expect("should decode");
        assert_eq!(response.categories.len(), 2);

        let category = response.category("Auto f1").expect("category present");
        assert_eq!(category.toppings.len(), 2);
        assert_eq!(category.toppings[1], topping("Auto Piloto", false));
    }

    #[test]
    fn test_missing_toppings_is_an_error() {
        let result = serde_json::from_str::<ToppingsResponse>(
            r#"{"categories":[{"description":"Auto f1","options":[{"description":"Auto Piloto","is_available":true}]}]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_categories_is_an_error() {
        let result = serde_json::from_str::<ToppingsResponse>(r#"{"toppings":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_category_match_is_case_sensitive() {
        let response: ToppingsResponse = serde_json::from_str(PAYLOAD).unwrap();
        assert!(response.category("Auto f1").is_some());
        assert!(response.category("auto f1").is_none());
        assert!(response.category("Auto F1").is_none());
    }

    #[test]
    fn test_sentinel_only_is_not_available() {
        let category = ToppingCategory {
            description: "Auto f1".to_string(),
            toppings: vec![topping("Sin Auto", true), topping("Auto Piloto", false)],
        };
        assert_eq!(category.first_available_except("sin auto"), None);
    }

    #[test]
    fn test_first_available_skips_sentinel_case_insensitively() {
        let category = ToppingCategory {
            description: "Auto f1".to_string(),
            toppings: vec![
                topping("SIN AUTO", true),
                topping("Auto Piloto", true),
                topping("Auto Escuderia", true),
            ],
        };
        assert_eq!(
            category.first_available_except("sin auto"),
            Some(&topping("Auto Piloto", true))
        );
    }
}
