//! Profile records and the flattening of one record into a CSV row.

use std::fmt;

use serde_json::{Map, Number, Value};

/// A single CSV cell, stringified from whatever JSON type sat at its path.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Bool(bool),
    Number(Number),
    Text(String),
}

impl Cell {
    /// Absent paths and `null` both become [`Cell::Empty`].
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Cell::Empty,
            Some(Value::Bool(b)) => Cell::Bool(*b),
            Some(Value::Number(n)) => Cell::Number(n.clone()),
            Some(Value::String(s)) => Cell::Text(s.clone()),
            // For arrays/objects, fall back to compact JSON representation
            Some(other) => Cell::Text(other.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

/// A record known to carry both an `id` and an `email` key.
#[derive(Debug, Clone, Copy)]
pub struct ValidProfile<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> ValidProfile<'a> {
    /// Returns `None` for anything that is not an object holding `id` and `email`.
    /// Only key presence matters; `"id": null` still counts.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        let fields = value.as_object()?;
        if fields.contains_key("id") && fields.contains_key("email") {
            Some(Self { fields })
        } else {
            None
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key)
    }
}

pub fn is_valid_record(value: &Value) -> bool {
    ValidProfile::from_value(value).is_some()
}

/// Follows `path` through nested objects, stopping at the first missing key
/// or non-object intermediate.
pub fn dig<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// One output row, in header order.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRow {
    pub id: Cell,
    pub email: Cell,
    pub tags: Cell,
    pub facebook_id: Cell,
    pub facebook_picture: Cell,
    pub twitter_id: Cell,
    pub twitter_picture: Cell,
}

impl FlatRow {
    pub fn cells(&self) -> [&Cell; 7] {
        [
            &self.id,
            &self.email,
            &self.tags,
            &self.facebook_id,
            &self.facebook_picture,
            &self.twitter_id,
            &self.twitter_picture,
        ]
    }

    pub fn to_record(&self) -> Vec<String> {
        self.cells().iter().map(|cell| cell.to_string()).collect()
    }
}

// Embedded commas inside a tag are not escaped; the CSV layer quotes the
// whole cell but the tag boundaries are lost on read-back.
fn join_tags(tags: Option<&Value>) -> Cell {
    match tags {
        None | Some(Value::Null) => Cell::Empty,
        Some(Value::Array(items)) => Cell::Text(
            items
                .iter()
                .map(|item| Cell::from_value(Some(item)).to_string())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Some(other) => Cell::from_value(Some(other)),
    }
}

pub fn flatten(profile: &ValidProfile<'_>) -> FlatRow {
    let profiles = profile.get("profiles");
    let social = |network: &str, field: &str| {
        Cell::from_value(profiles.and_then(|p| dig(p, &[network, field])))
    };

    FlatRow {
        id: Cell::from_value(profile.get("id")),
        email: Cell::from_value(profile.get("email")),
        tags: join_tags(profile.get("tags")),
        facebook_id: social("facebook", "id"),
        facebook_picture: social("facebook", "picture"),
        twitter_id: social("twitter", "id"),
        twitter_picture: social("twitter", "picture"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flatten_value(value: &Value) -> Vec<String> {
        let profile = ValidProfile::from_value(value).expect("valid profile");
        flatten(&profile).to_record()
    }

    #[test]
    fn test_flatten_complete_profile() {
        let value = json!({
            "id": 0,
            "email": "email@test.com",
            "tags": ["consectetur", "quis"],
            "profiles": {
                "facebook": {"id": 0, "picture": "picture_fb"},
                "twitter": {"id": 0, "picture": "picture_tw"}
            }
        });

        assert_eq!(
            flatten_value(&value),
            ["0", "email@test.com", "consectetur,quis", "0", "picture_fb", "0", "picture_tw"]
        );
    }

    #[test]
    fn test_flatten_empty_and_null_tags() {
        for tags in [json!([]), Value::Null] {
            let value = json!({
                "id": 0,
                "email": "email@test.com",
                "tags": tags,
                "profiles": {
                    "facebook": {"id": 0, "picture": "picture_fb"},
                    "twitter": {"id": 0, "picture": "picture_tw"}
                }
            });
            assert_eq!(flatten_value(&value)[2], "");
        }
    }

    #[test]
    fn test_flatten_without_profiles() {
        let value = json!({"id": 4, "email": "d@mail.com"});
        assert_eq!(flatten_value(&value), ["4", "d@mail.com", "", "", "", "", ""]);
    }

    #[test]
    fn test_flatten_with_non_object_profiles() {
        let value = json!({"id": 5, "email": "e@mail.com", "profiles": "none"});
        assert_eq!(flatten_value(&value)[3..], ["", "", "", ""]);

        let value = json!({"id": 5, "email": "e@mail.com", "profiles": {"twitter": 7}});
        assert_eq!(flatten_value(&value)[5..], ["", ""]);
    }

    #[test]
    fn test_flatten_passes_scalars_through() {
        let value = json!({"id": "abc", "email": null, "tags": [1, true, null, "x"]});
        let row = flatten_value(&value);
        assert_eq!(row[0], "abc");
        assert_eq!(row[1], "");
        assert_eq!(row[2], "1,true,,x");
    }

    #[test]
    fn test_tags_with_commas_are_joined_verbatim() {
        let value = json!({"id": 1, "email": "a", "tags": ["a,b", "c"]});
        assert_eq!(flatten_value(&value)[2], "a,b,c");
    }

    #[test]
    fn test_is_valid_record() {
        assert!(is_valid_record(&json!({"id": null, "email": ""})));
        assert!(!is_valid_record(&json!({"name": "Kobe", "username": "BlackMamba"})));
        assert!(!is_valid_record(&json!({"id": 1})));
        assert!(!is_valid_record(&json!("Winter is coming")));
        assert!(!is_valid_record(&json!([{"id": 1, "email": "a"}])));
    }

    #[test]
    fn test_dig() {
        let value = json!({"profiles": {"facebook": {"id": 10}}});
        assert_eq!(dig(&value, &["profiles", "facebook", "id"]), Some(&json!(10)));
        assert_eq!(dig(&value, &["profiles", "twitter", "id"]), None);
        assert_eq!(dig(&json!(3), &["profiles"]), None);
        assert_eq!(dig(&value, &[]), Some(&value));
    }
}
