// JSON import
//
// Builds heap values from a parsed JSON document. Object keys keep document order.

use crate::{Heap, Value};
use serde_json::Value as Json;

impl Heap {
    /// Copy a JSON document into the heap and return its root value
    pub fn import_json(&mut self, json: &Json) -> Value {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::String(s.clone()),
            Json::Array(items) => {
                let elements = items.iter().map(|item| self.import_json(item)).collect();
                Value::Object(self.new_array(elements))
            }
            Json::Object(fields) => {
                let id = self.new_object();
                for (key, field) in fields {
                    let value = self.import_json(field);
                    if let Some(obj) = self.get_mut(id) {
                        obj.define(key.as_str().into(), crate::Property::Data(value));
                    }
                }
                Value::Object(id)
            }
        }
    }

    /// Parse JSON text, falling back to a plain string when it is not JSON
    pub fn import_json_or_string(&mut self, text: &str) -> Value {
        match serde_json::from_str::<Json>(text) {
            Ok(json) => self.import_json(&json),
            Err(_) => Value::String(text.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ObjectKind;

    #[test]
    fn test_import_keeps_key_order() {
        let mut heap = Heap::new();
        let json: Json = serde_json::from_str(r#"{"z": 1, "a": [true, null], "m": "x"}"#).unwrap();
        let root = heap.import_json(&json);

        let obj = heap.get(root.as_object().unwrap()).unwrap();
        let keys: Vec<&str> = obj.string_properties().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_import_array() {
        let mut heap = Heap::new();
        let root = heap.import_json(&serde_json::json!([1, 2.5, "three"]));
        match &heap.get(root.as_object().unwrap()).unwrap().kind {
            ObjectKind::Array(slots) => {
                assert_eq!(slots.len(), 3);
                assert_eq!(slots[1], Some(Value::Number(2.5)));
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_import_json_or_string() {
        let mut heap = Heap::new();
        assert_eq!(heap.import_json_or_string("42"), Value::Number(42.0));
        assert_eq!(
            heap.import_json_or_string("not json"),
            Value::String("not json".to_string())
        );
    }
}
