use crate::domain::model::FieldCounts;
use serde_json::{Map, Value};

/// 走訪整個結構，把每個葉節點的點號路徑累加到呼叫端的 `fields`。
///
/// 累加而不是重建：對同一張表重複呼叫可以統計多筆 record 的欄位分佈。
/// 陣列視為葉節點；頂層不是物件時沒有路徑可歸屬，直接忽略。
pub fn extract_fields(object: &Value, fields: &mut FieldCounts) {
    if let Value::Object(map) = object {
        extract_from_map(map, None, fields);
    }
}

pub fn extract_from_map(map: &Map<String, Value>, parent: Option<&str>, fields: &mut FieldCounts) {
    for (key, value) in map {
        let path = match parent {
            Some(parent) => format!("{}.{}", parent, key),
            None => key.clone(),
        };

        match value {
            Value::Object(child) => extract_from_map(child, Some(&path), fields),
            _ => *fields.entry(path).or_insert(0) += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn leaf_count(value: &Value) -> usize {
        match value {
            Value::Object(map) => map.values().map(leaf_count).sum(),
            _ => 1,
        }
    }

    #[test]
    fn test_finds_all_paths_through_a_hash() {
        let obj = json!({
            "a": "b",
            "b": "c",
            "d": {
                "e": "f",
                "g": {
                    "h": "i",
                    "j": {"k": "l"}
                },
                "m": "n"
            }
        });

        let mut fields = FieldCounts::from([("a".to_string(), 1)]);
        extract_fields(&obj, &mut fields);

        let expected = FieldCounts::from([
            ("a".to_string(), 2),
            ("b".to_string(), 1),
            ("d.e".to_string(), 1),
            ("d.g.h".to_string(), 1),
            ("d.g.j.k".to_string(), 1),
            ("d.m".to_string(), 1),
        ]);
        assert_eq!(fields, expected);
    }

    #[test]
    fn test_counts_accumulate_across_records() {
        let mut fields = FieldCounts::new();
        extract_fields(&json!({"text": "one", "user": {"lang": "en"}}), &mut fields);
        extract_fields(&json!({"text": "two", "user": {"id": 7}}), &mut fields);

        assert_eq!(fields["text"], 2);
        assert_eq!(fields["user.lang"], 1);
        assert_eq!(fields["user.id"], 1);
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn test_sum_of_counts_matches_leaves() {
        let obj = json!({
            "id": 1,
            "coordinates": null,
            "entities": {"hashtags": ["rust"], "urls": []},
            "user": {"name": "x", "profile": {"color": "fff", "empty": {}}}
        });

        let mut fields = FieldCounts::new();
        extract_fields(&obj, &mut fields);

        assert_eq!(fields.values().sum::<usize>(), leaf_count(&obj));
        assert!(fields.values().all(|count| *count == 1));
        assert!(fields.contains_key("entities.hashtags"));
        assert!(!fields.contains_key("user.profile.empty"));
    }

    #[test]
    fn test_empty_and_scalar_roots_are_ignored() {
        let mut fields = FieldCounts::new();
        extract_fields(&json!({}), &mut fields);
        extract_fields(&json!("just text"), &mut fields);
        extract_fields(&json!(42), &mut fields);

        assert!(fields.is_empty());
    }
}
