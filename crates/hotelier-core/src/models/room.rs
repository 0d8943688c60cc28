use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(rename = "roomId")]
    pub room_id: i64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub available: bool,
    #[serde(rename = "maxGuests", default)]
    pub max_guests: u32,
    #[serde(rename = "specialDescription", default)]
    pub special_description: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Room {
    pub fn available_display(&self) -> &'static str {
        if self.available {
            "Yes"
        } else {
            "No"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_room_with_missing_fields() {
        let json = r#"{"roomId":101,"category":"Deluxe","maxGuests":3}"#;
        let room: Room = serde_json::from_str(json).expect("Failed to parse room JSON");
        assert_eq!(room.room_id, 101);
        assert_eq!(room.max_guests, 3);
        assert_eq!(room.available_display(), "No");
        assert!(room.photos.is_empty());
    }
}
