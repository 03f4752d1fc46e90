// Object arena
//
// Objects reference each other through ObjectId handles, so cyclic graphs are plain data.

use crate::object::{
    CustomInspect, FunctionKind, Getter, Object, ObjectKind, Primitive, PromiseState, Property,
    PropertyKey, TypedArrayKind,
};
use crate::{HeapError, ObjectId, Symbol, Value};

/// Synchronous view of a promise's settlement state
pub trait PromiseIntrospector {
    /// `None` when `id` is not a promise
    fn promise_state(&self, id: ObjectId) -> Option<PromiseState>;
}

/// Arena holding every object reachable from a set of values
#[derive(Debug, Default, Clone)]
pub struct Heap {
    objects: Vec<Object>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, object: Object) -> ObjectId {
        self.objects.push(object);
        ObjectId::from_index(self.objects.len() - 1)
    }

    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.index())
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn object_mut(&mut self, id: ObjectId) -> Result<&mut Object, HeapError> {
        self.get_mut(id).ok_or(HeapError::InvalidHandle(id))
    }

    // Constructors

    pub fn new_object(&mut self) -> ObjectId {
        self.alloc(Object::new(ObjectKind::Ordinary))
    }

    /// Instance of a named class
    pub fn new_instance(&mut self, class_name: &str) -> ObjectId {
        self.alloc(Object::new(ObjectKind::Ordinary).with_class_name(class_name))
    }

    pub fn new_array(&mut self, elements: Vec<Value>) -> ObjectId {
        let slots = elements.into_iter().map(Some).collect();
        self.alloc(Object::new(ObjectKind::Array(slots)))
    }

    /// Array that may contain holes
    pub fn new_sparse_array(&mut self, slots: Vec<Option<Value>>) -> ObjectId {
        self.alloc(Object::new(ObjectKind::Array(slots)))
    }

    pub fn new_typed_array(&mut self, element: TypedArrayKind, values: Vec<Value>) -> ObjectId {
        self.alloc(Object::new(ObjectKind::TypedArray { element, values }))
    }

    pub fn new_set(&mut self, values: Vec<Value>) -> ObjectId {
        self.alloc(Object::new(ObjectKind::Set(values)))
    }

    pub fn new_map(&mut self, entries: Vec<(Value, Value)>) -> ObjectId {
        self.alloc(Object::new(ObjectKind::Map(entries)))
    }

    pub fn new_weak_set(&mut self) -> ObjectId {
        self.alloc(Object::new(ObjectKind::WeakSet))
    }

    pub fn new_weak_map(&mut self) -> ObjectId {
        self.alloc(Object::new(ObjectKind::WeakMap))
    }

    pub fn new_date(&mut self, epoch_ms: f64) -> ObjectId {
        self.alloc(Object::new(ObjectKind::Date(epoch_ms)))
    }

    pub fn new_regexp(&mut self, source: &str, flags: &str) -> ObjectId {
        self.alloc(Object::new(ObjectKind::RegExp {
            source: source.to_string(),
            flags: flags.to_string(),
        }))
    }

    pub fn new_error(&mut self, name: &str, message: &str, stack: Option<&str>) -> ObjectId {
        self.alloc(Object::new(ObjectKind::Error {
            name: name.to_string(),
            message: message.to_string(),
            stack: stack.map(str::to_string),
        }))
    }

    pub fn new_function(&mut self, kind: FunctionKind, name: &str) -> ObjectId {
        self.alloc(Object::new(ObjectKind::Function {
            kind,
            name: name.to_string(),
        }))
    }

    pub fn new_promise(&mut self, state: PromiseState) -> ObjectId {
        self.alloc(Object::new(ObjectKind::Promise(state)))
    }

    pub fn new_boxed(&mut self, primitive: Primitive) -> ObjectId {
        self.alloc(Object::new(ObjectKind::Boxed(primitive)))
    }

    // Mutation

    pub fn set_property(&mut self, id: ObjectId, key: &str, value: Value) -> Result<(), HeapError> {
        self.object_mut(id)?
            .define(PropertyKey::from(key), Property::Data(value));
        Ok(())
    }

    pub fn set_symbol_property(
        &mut self,
        id: ObjectId,
        symbol: Symbol,
        value: Value,
    ) -> Result<(), HeapError> {
        self.object_mut(id)?
            .define(PropertyKey::Symbol(symbol), Property::Data(value));
        Ok(())
    }

    pub fn set_accessor(&mut self, id: ObjectId, key: &str, getter: Getter) -> Result<(), HeapError> {
        self.object_mut(id)?
            .define(PropertyKey::from(key), Property::Accessor(getter));
        Ok(())
    }

    pub fn set_custom_inspect(&mut self, id: ObjectId, hook: CustomInspect) -> Result<(), HeapError> {
        self.object_mut(id)?.set_custom_inspect(hook);
        Ok(())
    }

    /// Append an element to an array
    pub fn push_element(&mut self, id: ObjectId, value: Value) -> Result<(), HeapError> {
        match &mut self.object_mut(id)?.kind {
            ObjectKind::Array(slots) => {
                slots.push(Some(value));
                Ok(())
            }
            _ => Err(HeapError::WrongKind {
                id,
                expected: "an array",
            }),
        }
    }

    pub fn set_add(&mut self, id: ObjectId, value: Value) -> Result<(), HeapError> {
        match &mut self.object_mut(id)?.kind {
            ObjectKind::Set(values) => {
                if !values.iter().any(|member| member.same_value_zero(&value)) {
                    values.push(value);
                }
                Ok(())
            }
            _ => Err(HeapError::WrongKind {
                id,
                expected: "a set",
            }),
        }
    }

    pub fn map_insert(&mut self, id: ObjectId, key: Value, value: Value) -> Result<(), HeapError> {
        match &mut self.object_mut(id)?.kind {
            ObjectKind::Map(entries) => {
                match entries.iter_mut().find(|(k, _)| k.same_value_zero(&key)) {
                    Some(entry) => entry.1 = value,
                    None => entries.push((key, value)),
                }
                Ok(())
            }
            _ => Err(HeapError::WrongKind {
                id,
                expected: "a map",
            }),
        }
    }

    /// Settle a pending promise; settled promises are left alone
    pub fn settle_promise(&mut self, id: ObjectId, outcome: PromiseState) -> Result<(), HeapError> {
        match &mut self.object_mut(id)?.kind {
            ObjectKind::Promise(state) => {
                if *state == PromiseState::Pending {
                    *state = outcome;
                }
                Ok(())
            }
            _ => Err(HeapError::WrongKind {
                id,
                expected: "a promise",
            }),
        }
    }
}

impl PromiseIntrospector for Heap {
    fn promise_state(&self, id: ObjectId) -> Option<PromiseState> {
        match &self.get(id)?.kind {
            ObjectKind::Promise(state) => Some(state.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyclic_graph() {
        let mut heap = Heap::new();
        let a = heap.new_object();
        heap.set_property(a, "self", Value::Object(a)).unwrap();

        let obj = heap.get(a).unwrap();
        match obj.get_own(&PropertyKey::from("self")) {
            Some(Property::Data(Value::Object(id))) => assert_eq!(*id, a),
            other => panic!("unexpected property: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_handle() {
        let mut other = Heap::new();
        let foreign = other.new_object();
        let mut heap = Heap::new();
        assert_eq!(
            heap.set_property(foreign, "x", Value::Null),
            Err(HeapError::InvalidHandle(foreign))
        );
    }

    #[test]
    fn test_push_element_wrong_kind() {
        let mut heap = Heap::new();
        let obj = heap.new_object();
        assert!(matches!(
            heap.push_element(obj, Value::Null),
            Err(HeapError::WrongKind { .. })
        ));
    }

    #[test]
    fn test_settle_promise_once() {
        let mut heap = Heap::new();
        let p = heap.new_promise(PromiseState::Pending);
        assert_eq!(heap.promise_state(p), Some(PromiseState::Pending));

        heap.settle_promise(p, PromiseState::Fulfilled(Value::from(1)))
            .unwrap();
        heap.settle_promise(p, PromiseState::Rejected(Value::from(2)))
            .unwrap();
        assert_eq!(
            heap.promise_state(p),
            Some(PromiseState::Fulfilled(Value::from(1)))
        );
    }

    #[test]
    fn test_set_and_map_deduplicate() {
        let mut heap = Heap::new();
        let set = heap.new_set(vec![]);
        heap.set_add(set, Value::from(1)).unwrap();
        heap.set_add(set, Value::from(1)).unwrap();
        let map = heap.new_map(vec![]);
        heap.map_insert(map, Value::from("a"), Value::from(1)).unwrap();
        heap.map_insert(map, Value::from("a"), Value::from(2)).unwrap();

        match &heap.get(set).unwrap().kind {
            ObjectKind::Set(values) => assert_eq!(values.len(), 1),
            other => panic!("unexpected kind: {:?}", other),
        }
        match &heap.get(map).unwrap().kind {
            ObjectKind::Map(entries) => assert_eq!(entries, &vec![(Value::from("a"), Value::from(2))]),
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_set_members_use_same_value_zero() {
        let mut heap = Heap::new();
        let set = heap.new_set(vec![]);
        heap.set_add(set, Value::Number(f64::NAN)).unwrap();
        heap.set_add(set, Value::Number(f64::NAN)).unwrap();
        heap.set_add(set, Value::Number(-0.0)).unwrap();
        heap.set_add(set, Value::Number(0.0)).unwrap();
        heap.set_add(set, Value::symbol(None)).unwrap();
        heap.set_add(set, Value::symbol(None)).unwrap();

        match &heap.get(set).unwrap().kind {
            ObjectKind::Set(values) => assert_eq!(values.len(), 4),
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_map_keys_by_symbol_identity() {
        let mut heap = Heap::new();
        let map = heap.new_map(vec![]);
        let key = Value::symbol(Some("k"));
        heap.map_insert(map, key.clone(), Value::from(1)).unwrap();
        heap.map_insert(map, Value::symbol(Some("k")), Value::from(2)).unwrap();
        heap.map_insert(map, key, Value::from(3)).unwrap();
        heap.map_insert(map, Value::Number(f64::NAN), Value::from(4)).unwrap();
        heap.map_insert(map, Value::Number(f64::NAN), Value::from(5)).unwrap();

        match &heap.get(map).unwrap().kind {
            ObjectKind::Map(entries) => {
                let values: Vec<&Value> = entries.iter().map(|(_, v)| v).collect();
                assert_eq!(values, vec![&Value::from(3), &Value::from(2), &Value::from(5)]);
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_equal_descriptions_are_distinct_keys() {
        let mut heap = Heap::new();
        let obj = heap.new_object();
        let first = Symbol::new(Some("k"));
        heap.set_symbol_property(obj, first.clone(), Value::from(1)).unwrap();
        heap.set_symbol_property(obj, Symbol::new(Some("k")), Value::from(2)).unwrap();
        heap.set_symbol_property(obj, first, Value::from(3)).unwrap();

        let values: Vec<Value> = heap
            .get(obj)
            .unwrap()
            .symbol_properties()
            .map(|(_, property)| property.read(&heap).unwrap())
            .collect();
        assert_eq!(values, vec![Value::from(3), Value::from(2)]);
    }
}
