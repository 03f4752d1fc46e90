// Value visitor: recursive, depth-bounded, cycle-safe rendering
//
// Every renderer is total. Hostile values (throwing getters or inspect hooks,
// dangling handles, unknown host categories) degrade to partial or marker output.

use crate::coerce::{error_summary, to_display_string};
use crate::config::Config;
use crate::context::InspectContext;
use crate::rules::{
    abbreviate, display_width, group_entries, indent_string, iso_string, number_to_inspect_string,
    number_to_string, paint, quote, GroupLayout, Style,
};
use peek_value::{
    FunctionKind, Heap, Object, ObjectId, ObjectKind, Primitive, PromiseIntrospector,
    PromiseState, Value,
};

/// Width of `Promise {  }` around a settled promise's value
const PROMISE_STRING_BASE_LENGTH: usize = 12;

const NOT_IMPLEMENTED: &str = "[Not Implemented]";

/// How an iterable container is labeled and laid out
struct IterableShape {
    /// Shown as `[type_name]` once the depth budget is spent
    type_name: String,
    /// Prefix before the opening delimiter; empty for plain arrays
    display_name: String,
    delims: (&'static str, &'static str),
    group: bool,
}

/// Entries of one container, capped at `limit`
struct EntryCollector {
    entries: Vec<String>,
    count: usize,
    limit: usize,
}

impl EntryCollector {
    fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            count: 0,
            limit,
        }
    }

    /// Count one entry, rendering it only while under the limit
    fn push_with<F: FnOnce() -> String>(&mut self, render: F) {
        if self.count < self.limit {
            self.entries.push(render());
        }
        self.count += 1;
    }

    fn finish(mut self) -> (Vec<String>, bool) {
        let overflow = self.count > self.limit;
        if overflow {
            self.entries
                .push(format!("... {} more items", self.count - self.limit));
        }
        (self.entries, overflow)
    }
}

/// Renders values for a single top-level call; owns that call's inspection context
pub struct ValueVisitor<'a> {
    heap: &'a Heap,
    promises: &'a dyn PromiseIntrospector,
    config: &'a Config,
    context: InspectContext,
}

impl<'a> ValueVisitor<'a> {
    pub fn new(heap: &'a Heap, promises: &'a dyn PromiseIntrospector, config: &'a Config) -> Self {
        Self {
            heap,
            promises,
            config,
            context: InspectContext::new(),
        }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        paint(text, style, self.config.colors)
    }

    /// Render a value; strings come back verbatim
    pub fn visit_value(&self, value: &Value, level: usize) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => self.paint(&number_to_inspect_string(*n), Style::Primitive),
            Value::Bool(b) => self.paint(&b.to_string(), Style::Primitive),
            Value::Undefined => self.paint("undefined", Style::Primitive),
            Value::Symbol(sym) => self.paint(&sym.to_string(), Style::Primitive),
            Value::BigInt(b) => self.paint(&format!("{}n", b), Style::Primitive),
            Value::Null => self.paint("null", Style::Null),
            Value::Object(id) => self.visit_object(*id, level),
            Value::Host(_) => self.paint(NOT_IMPLEMENTED, Style::Alert),
        }
    }

    /// Render a nested value: strings are abbreviated and quoted
    pub fn visit_quoted(&self, value: &Value, level: usize) -> String {
        match value {
            Value::String(s) => {
                let text = abbreviate(s, self.config.str_abbreviate_size);
                self.paint(&quote(&text), Style::Quoted)
            }
            other => self.visit_value(other, level),
        }
    }

    fn visit_object(&self, id: ObjectId, level: usize) -> String {
        let Some(obj) = self.heap.get(id) else {
            log::debug!("dangling object handle {}", id);
            return self.paint(NOT_IMPLEMENTED, Style::Alert);
        };

        // Functions render as a label before any cycle or hook handling
        let is_function = matches!(obj.kind, ObjectKind::Function { .. });
        if !is_function && self.context.contains(id) {
            return self.paint("[Circular]", Style::Special);
        }
        if let Some(hook) = obj.custom_inspect().filter(|_| !is_function) {
            match hook(self.heap) {
                Ok(result) => return to_display_string(self.heap, &result),
                Err(thrown) => {
                    log::debug!("inspect hook of {} threw, using default rendering: {}", id, thrown)
                }
            }
        }

        log::trace!("rendering {} at level {}", id, level);
        match &obj.kind {
            ObjectKind::Error {
                name,
                message,
                stack,
            } => match stack {
                Some(stack) if !stack.is_empty() => stack.clone(),
                _ => error_summary(name, message),
            },
            ObjectKind::Array(slots) => self.visit_array(id, slots, level),
            ObjectKind::Boxed(primitive) => self.boxed_label(primitive),
            ObjectKind::Promise(_) => self.visit_promise(id, level),
            ObjectKind::RegExp { source, flags } => {
                self.paint(&format!("/{}/{}", source, flags), Style::Alert)
            }
            ObjectKind::Date(ms) => match iso_string(*ms) {
                Some(iso) => self.paint(&iso, Style::Date),
                None => self.paint("Invalid Date", Style::Date),
            },
            ObjectKind::Set(values) => self.visit_set(id, values, level),
            ObjectKind::Map(entries) => self.visit_map(id, entries, level),
            ObjectKind::WeakSet => self.weak_collection_label("WeakSet"),
            ObjectKind::WeakMap => self.weak_collection_label("WeakMap"),
            ObjectKind::TypedArray { element, values } => {
                let shape = IterableShape {
                    type_name: element.name().to_string(),
                    display_name: format!("{}({})", element.name(), values.len()),
                    delims: ("[", "]"),
                    group: true,
                };
                let numeric = values.iter().all(Value::is_numeric);
                self.visit_iterable(id, level, shape, numeric, |collector| {
                    for value in values {
                        collector.push_with(|| self.visit_quoted(value, level + 1));
                    }
                })
            }
            ObjectKind::Ordinary => self.visit_plain(id, obj, level),
            ObjectKind::Function { kind, name } => self.function_label(*kind, name),
        }
    }

    fn function_label(&self, kind: FunctionKind, name: &str) -> String {
        let ctor = kind.constructor_name();
        let label = if !name.is_empty() && name != "anonymous" {
            format!("[{}: {}]", ctor, name)
        } else {
            format!("[{}]", ctor)
        };
        self.paint(&label, Style::Special)
    }

    /// Weak collections cannot be enumerated
    fn weak_collection_label(&self, type_name: &str) -> String {
        format!(
            "{} {{ {} }}",
            type_name,
            self.paint("[items unknown]", Style::Special)
        )
    }

    fn boxed_label(&self, primitive: &Primitive) -> String {
        let label = match primitive {
            Primitive::String(s) => format!("[String: \"{}\"]", s),
            Primitive::Number(n) => format!("[Number: {}]", number_to_string(*n)),
            Primitive::Boolean(b) => format!("[Boolean: {}]", b),
        };
        self.paint(&label, Style::Special)
    }

    fn visit_array(&self, id: ObjectId, slots: &[Option<Value>], level: usize) -> String {
        let shape = IterableShape {
            type_name: "Array".to_string(),
            display_name: String::new(),
            delims: ("[", "]"),
            group: true,
        };
        let limit = self.config.max_iterable_length;
        let rendered = slots.len().min(limit.saturating_add(1));
        // Holes and non-numeric elements switch grouped output to left alignment
        let numeric = slots
            .iter()
            .take(rendered)
            .all(|slot| matches!(slot, Some(value) if value.is_numeric()));

        self.visit_iterable(id, level, shape, numeric, |collector| {
            let mut index = 0;
            while index < slots.len() {
                match &slots[index] {
                    Some(value) => {
                        collector.push_with(|| self.visit_quoted(value, level + 1));
                        index += 1;
                    }
                    None => {
                        let run = slots[index..].iter().take_while(|slot| slot.is_none()).count();
                        collector.push_with(|| {
                            let plural = if run > 1 { "s" } else { "" };
                            self.paint(&format!("<{} empty item{}>", run, plural), Style::Dim)
                        });
                        index += run;
                    }
                }
            }
        })
    }

    fn visit_set(&self, id: ObjectId, values: &[Value], level: usize) -> String {
        let shape = IterableShape {
            type_name: "Set".to_string(),
            display_name: "Set".to_string(),
            delims: ("{", "}"),
            group: false,
        };
        self.visit_iterable(id, level, shape, false, |collector| {
            for value in values {
                collector.push_with(|| self.visit_quoted(value, level + 1));
            }
        })
    }

    fn visit_map(&self, id: ObjectId, entries: &[(Value, Value)], level: usize) -> String {
        let shape = IterableShape {
            type_name: "Map".to_string(),
            display_name: "Map".to_string(),
            delims: ("{", "}"),
            group: false,
        };
        self.visit_iterable(id, level, shape, false, |collector| {
            for (key, value) in entries {
                collector.push_with(|| {
                    format!(
                        "{} => {}",
                        self.visit_quoted(key, level + 1),
                        self.visit_quoted(value, level + 1)
                    )
                });
            }
        })
    }

    /// Shared layout for arrays, typed arrays, sets and maps
    fn visit_iterable<F>(
        &self,
        id: ObjectId,
        level: usize,
        shape: IterableShape,
        numeric: bool,
        collect: F,
    ) -> String
    where
        F: FnOnce(&mut EntryCollector),
    {
        if level >= self.config.depth {
            return self.paint(&format!("[{}]", shape.type_name), Style::Special);
        }

        let mut collector = EntryCollector::new(self.config.max_iterable_length);
        {
            let _entered = self.context.enter(id);
            collect(&mut collector);
        }
        let (entries, has_overflow) = collector.finish();

        let prefix = if shape.display_name.is_empty() {
            String::new()
        } else {
            format!("{} ", shape.display_name)
        };
        let init_indentation = format!("\n{}", indent_string(level + 1));
        let entry_indentation = format!(",\n{}", indent_string(level + 1));
        let closing_indentation = format!("\n{}", indent_string(level));

        let grouped = if shape.group && entries.len() > self.config.min_group_length {
            group_entries(
                &entries,
                GroupLayout {
                    level: level + 1,
                    line_break_length: self.config.line_break_length,
                    numeric,
                    has_overflow,
                },
            )
        } else {
            None
        };

        let content = match grouped {
            Some(rows) => format!(
                "{}{}{}",
                init_indentation,
                rows.join(&entry_indentation),
                closing_indentation
            ),
            None if entries.is_empty() => String::new(),
            None => {
                let single_line = format!(" {} ", entries.join(", "));
                if display_width(&single_line) > self.config.line_break_length {
                    format!(
                        "{}{}{}",
                        init_indentation,
                        entries.join(&entry_indentation),
                        closing_indentation
                    )
                } else {
                    single_line
                }
            }
        };

        format!("{}{}{}{}", prefix, shape.delims.0, content, shape.delims.1)
    }

    fn visit_promise(&self, id: ObjectId, level: usize) -> String {
        // An introspector that cannot see the promise reports it as unsettled
        let state = self
            .promises
            .promise_state(id)
            .unwrap_or(PromiseState::Pending);
        let (prefix, result) = match &state {
            PromiseState::Pending => {
                return format!("Promise {{ {} }}", self.paint("<pending>", Style::Special));
            }
            PromiseState::Fulfilled(value) => (String::new(), value),
            PromiseState::Rejected(reason) => {
                (format!("{} ", self.paint("<rejected>", Style::Alert)), reason)
            }
        };

        let rendered = {
            let _entered = self.context.enter(id);
            self.visit_quoted(result, level + 1)
        };
        let text = format!("{}{}", prefix, rendered);
        if display_width(&text) + PROMISE_STRING_BASE_LENGTH > self.config.line_break_length {
            format!(
                "Promise {{\n{}{}\n{}}}",
                indent_string(level + 1),
                text,
                indent_string(level)
            )
        } else {
            format!("Promise {{ {} }}", text)
        }
    }

    fn visit_plain(&self, id: ObjectId, obj: &Object, level: usize) -> String {
        if level >= self.config.depth {
            return self.paint("[Object]", Style::Special);
        }

        let display_name = obj
            .to_string_tag
            .as_deref()
            .filter(|tag| !tag.is_empty())
            .or(obj.class_name.as_deref())
            .unwrap_or("");
        let show_display_name =
            !display_name.is_empty() && display_name != "Object" && display_name != "anonymous";

        let mut entries = Vec::with_capacity(obj.property_count());
        {
            let _entered = self.context.enter(id);
            let keyed = obj
                .string_properties()
                .map(|(key, property)| (key.to_string(), property))
                .chain(
                    obj.symbol_properties()
                        .map(|(sym, property)| (format!("[{}]", sym), property)),
                );
            for (key, property) in keyed {
                match property.read(self.heap) {
                    Ok(value) => {
                        entries.push(format!("{}: {}", key, self.visit_quoted(&value, level + 1)))
                    }
                    Err(thrown) => {
                        log::debug!("reading {}.{} threw, truncating entries: {}", id, key, thrown);
                        break;
                    }
                }
            }
        }

        // Markup is ignored when measuring
        let total_length = entries.len() + level + display_width(&entries.concat());
        let body = if entries.is_empty() {
            "{}".to_string()
        } else if total_length > self.config.line_break_length {
            let entry_indent = indent_string(level + 1);
            format!(
                "{{\n{}{}\n{}}}",
                entry_indent,
                entries.join(&format!(",\n{}", entry_indent)),
                indent_string(level)
            )
        } else {
            format!("{{ {} }}", entries.join(", "))
        };

        if show_display_name {
            format!("{} {}", display_name, body)
        } else {
            body
        }
    }
}
