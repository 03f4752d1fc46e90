// Main inspector implementation

use crate::config::Config;
use crate::directives;
use crate::visitor::ValueVisitor;
use peek_value::{Heap, PromiseIntrospector, Value};

/// Value inspector bound to a heap
pub struct Inspector<'a> {
    heap: &'a Heap,
    promises: &'a dyn PromiseIntrospector,
    config: Config,
}

impl<'a> Inspector<'a> {
    /// Create an inspector that reads promise state straight from the heap
    pub fn new(heap: &'a Heap, config: Config) -> Self {
        Self {
            heap,
            promises: heap,
            config,
        }
    }

    /// Use a host-provided view of promise settlement
    pub fn with_promise_introspector(mut self, promises: &'a dyn PromiseIntrospector) -> Self {
        self.promises = promises;
        self
    }

    pub fn heap(&self) -> &'a Heap {
        self.heap
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Render a single value. Top-level strings pass through unchanged.
    pub fn inspect(&self, value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => self.stringify(other, 0),
        }
    }

    /// Render `value` as if found at nesting `level`, with a fresh inspection context
    pub fn stringify(&self, value: &Value, level: usize) -> String {
        ValueVisitor::new(self.heap, self.promises, &self.config).visit_value(value, level)
    }

    /// Like [`Inspector::stringify`], but strings are abbreviated and quoted
    pub fn stringify_with_quotes(&self, value: &Value, level: usize) -> String {
        ValueVisitor::new(self.heap, self.promises, &self.config).visit_quoted(value, level)
    }

    /// Format console-style arguments, honoring printf directives in a leading string
    pub fn stringify_args(&self, args: &[Value]) -> String {
        directives::stringify_args(self, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspector_creation() {
        let heap = Heap::new();
        let inspector = Inspector::new(&heap, Config::default());
        assert_eq!(inspector.config().depth, 4);
    }

    #[test]
    fn test_top_level_string_passthrough() {
        let heap = Heap::new();
        let inspector = Inspector::new(&heap, Config::default());
        assert_eq!(inspector.inspect(&Value::from("a b")), "a b");
        assert_eq!(inspector.stringify_with_quotes(&Value::from("a b"), 0), "\"a b\"");
    }
}
