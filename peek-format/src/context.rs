// Inspection context: objects on the active rendering path

use peek_value::ObjectId;
use std::cell::RefCell;
use std::collections::HashSet;

/// Identities of the objects currently being rendered, outermost first.
///
/// An object is only present while its children render; siblings that share a
/// child are therefore not mistaken for cycles.
#[derive(Debug, Default)]
pub struct InspectContext {
    active: RefCell<HashSet<ObjectId>>,
}

impl InspectContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.active.borrow().contains(&id)
    }

    /// Mark `id` as being rendered until the returned guard drops
    pub fn enter(&self, id: ObjectId) -> Entered<'_> {
        self.active.borrow_mut().insert(id);
        Entered { context: self, id }
    }
}

/// Removes its object from the context on drop
#[must_use = "the object leaves the context as soon as the guard drops"]
pub struct Entered<'a> {
    context: &'a InspectContext,
    id: ObjectId,
}

impl Drop for Entered<'_> {
    fn drop(&mut self) {
        self.context.active.borrow_mut().remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peek_value::Heap;

    #[test]
    fn test_guard_releases_on_drop() {
        let mut heap = Heap::new();
        let a = heap.new_object();
        let b = heap.new_object();
        let ctx = InspectContext::new();

        {
            let _outer = ctx.enter(a);
            assert!(ctx.contains(a));
            {
                let _inner = ctx.enter(b);
                assert!(ctx.contains(a) && ctx.contains(b));
            }
            assert!(!ctx.contains(b));
        }
        assert!(!ctx.contains(a));
    }

    #[test]
    fn test_guard_releases_on_early_return() {
        fn render(ctx: &InspectContext, id: ObjectId, fail: bool) -> Result<(), ()> {
            let _entered = ctx.enter(id);
            if fail {
                return Err(());
            }
            Ok(())
        }

        let mut heap = Heap::new();
        let a = heap.new_object();
        let ctx = InspectContext::new();
        assert!(render(&ctx, a, true).is_err());
        assert!(!ctx.contains(a));
    }
}
