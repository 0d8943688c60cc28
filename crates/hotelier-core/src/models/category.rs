use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

impl Category {
    pub fn features_display(&self) -> String {
        self.features.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        let json = r#"{"_id":"c1","name":"Deluxe","price":150.5,"features":["Wifi","Sea view"],"description":"Large room","image":"https://img/1.jpg","disabled":true}"#;
        let c: Category = serde_json::from_str(json).expect("Failed to parse category JSON");
        assert_eq!(c.name, "Deluxe");
        assert_eq!(c.features_display(), "Wifi, Sea view");
        assert!(c.disabled);
    }
}
