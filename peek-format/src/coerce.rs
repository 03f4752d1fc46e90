// String coercion (`String(value)`) used by `%s` and inspect hooks

use crate::rules::{iso_string, number_to_string};
use peek_value::{FunctionKind, Heap, ObjectId, ObjectKind, Primitive, Value};
use std::collections::HashSet;

/// Coerce a value to text the way `String(value)` does
pub fn to_display_string(heap: &Heap, value: &Value) -> String {
    let mut joining = HashSet::new();
    coerce(heap, value, &mut joining)
}

fn coerce(heap: &Heap, value: &Value, joining: &mut HashSet<ObjectId>) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(*n),
        Value::BigInt(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Symbol(sym) => sym.to_string(),
        Value::Object(id) => coerce_object(heap, *id, joining),
        Value::Host(_) => "[Not Implemented]".to_string(),
    }
}

fn coerce_object(heap: &Heap, id: ObjectId, joining: &mut HashSet<ObjectId>) -> String {
    let Some(obj) = heap.get(id) else {
        return "[Not Implemented]".to_string();
    };

    match &obj.kind {
        ObjectKind::Array(slots) => {
            // Array.prototype.join yields "" for an array already being joined
            if !joining.insert(id) {
                return String::new();
            }
            let parts: Vec<String> = slots
                .iter()
                .map(|slot| match slot {
                    None | Some(Value::Undefined) | Some(Value::Null) => String::new(),
                    Some(element) => coerce(heap, element, joining),
                })
                .collect();
            joining.remove(&id);
            parts.join(",")
        }
        ObjectKind::TypedArray { values, .. } => values
            .iter()
            .map(|element| coerce(heap, element, joining))
            .collect::<Vec<_>>()
            .join(","),
        ObjectKind::Boxed(Primitive::String(s)) => s.clone(),
        ObjectKind::Boxed(Primitive::Number(n)) => number_to_string(*n),
        ObjectKind::Boxed(Primitive::Boolean(b)) => b.to_string(),
        ObjectKind::Date(ms) => iso_string(*ms).unwrap_or_else(|| "Invalid Date".to_string()),
        ObjectKind::RegExp { source, flags } => format!("/{}/{}", source, flags),
        ObjectKind::Error { name, message, .. } => error_summary(name, message),
        ObjectKind::Function {
            kind: FunctionKind::Class,
            name,
        } => format!("class {} {{}}", name),
        ObjectKind::Function { kind, name } => {
            format!("{} {}() {{ [native code] }}", function_keyword(*kind), name)
        }
        ObjectKind::Promise(_) => "[object Promise]".to_string(),
        ObjectKind::Set(_) => "[object Set]".to_string(),
        ObjectKind::Map(_) => "[object Map]".to_string(),
        ObjectKind::WeakSet => "[object WeakSet]".to_string(),
        ObjectKind::WeakMap => "[object WeakMap]".to_string(),
        ObjectKind::Ordinary => match &obj.to_string_tag {
            Some(tag) => format!("[object {}]", tag),
            None => "[object Object]".to_string(),
        },
    }
}

fn function_keyword(kind: FunctionKind) -> &'static str {
    match kind {
        FunctionKind::Function => "function",
        FunctionKind::AsyncFunction => "async function",
        FunctionKind::GeneratorFunction => "function*",
        FunctionKind::AsyncGeneratorFunction => "async function*",
        FunctionKind::Class => "class",
    }
}

/// `Error.prototype.toString`
pub fn error_summary(name: &str, message: &str) -> String {
    match (name.is_empty(), message.is_empty()) {
        (_, true) if !name.is_empty() => name.to_string(),
        (true, _) => message.to_string(),
        _ => format!("{}: {}", name, message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives() {
        let heap = Heap::new();
        assert_eq!(to_display_string(&heap, &Value::Undefined), "undefined");
        assert_eq!(to_display_string(&heap, &Value::Number(-0.0)), "0");
        assert_eq!(to_display_string(&heap, &Value::bigint(12)), "12");
        assert_eq!(to_display_string(&heap, &Value::symbol(Some("k"))), "Symbol(k)");
    }

    #[test]
    fn test_array_join_skips_nullish_and_cycles() {
        let mut heap = Heap::new();
        let arr = heap.new_array(vec![Value::from(1), Value::Null, Value::from("x")]);
        assert_eq!(to_display_string(&heap, &Value::Object(arr)), "1,,x");

        heap.push_element(arr, Value::Object(arr)).unwrap();
        assert_eq!(to_display_string(&heap, &Value::Object(arr)), "1,,x,");
    }

    #[test]
    fn test_objects() {
        let mut heap = Heap::new();
        let obj = heap.new_object();
        let err = heap.new_error("TypeError", "bad", None);
        let boxed = heap.new_boxed(Primitive::String("s".to_string()));
        assert_eq!(to_display_string(&heap, &Value::Object(obj)), "[object Object]");
        assert_eq!(to_display_string(&heap, &Value::Object(err)), "TypeError: bad");
        assert_eq!(to_display_string(&heap, &Value::Object(boxed)), "s");
    }

    #[test]
    fn test_error_summary() {
        assert_eq!(error_summary("Error", ""), "Error");
        assert_eq!(error_summary("", "msg"), "msg");
        assert_eq!(error_summary("RangeError", "x"), "RangeError: x");
    }
}
