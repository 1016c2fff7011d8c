use crate::value::Value;
use gc::{Finalize, Gc, GcCell, Trace};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Trace, Finalize)]
struct EnvironmentCore {
    store: HashMap<Rc<str>, Value>,
    outer: Option<Environment>,
}

/// A frame of bindings chained to an optional outer frame. Clones share the
/// same frame, which is how closures observe later definitions in the scope
/// that created them.
///
/// Frames are garbage collected: a call frame that binds a closure over
/// itself is reclaimed once nothing outside the cycle refers to it.
#[derive(Clone, Trace, Finalize)]
pub struct Environment {
    environment: Gc<GcCell<EnvironmentCore>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            environment: Gc::new(GcCell::new(EnvironmentCore {
                store: HashMap::new(),
                outer: None,
            })),
        }
    }

    pub fn new_enclosed(outer: &Environment) -> Environment {
        Environment {
            environment: Gc::new(GcCell::new(EnvironmentCore {
                store: HashMap::new(),
                outer: Some(outer.clone()),
            })),
        }
    }

    /// Looks `name` up in this frame, then in each outer frame in turn.
    pub fn resolve(&self, name: &str) -> Option<Value> {
        let env = self.environment.borrow();
        env.store
            .get(name)
            .cloned()
            .or_else(|| env.outer.as_ref().and_then(|outer| outer.resolve(name)))
    }

    /// Binds `name` in this frame only, shadowing any outer binding.
    pub fn define(&self, name: impl Into<Rc<str>>, value: Value) {
        self.environment
            .borrow_mut()
            .store
            .insert(name.into(), value);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let env = self.environment.borrow();
        f.debug_struct("Environment")
            .field("bindings", &env.store.len())
            .field("enclosed", &env.outer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::List;

    #[test]
    fn test_resolve_through_outer() {
        let global = Environment::new();
        global.define("a", Value::integer(1));

        let inner = Environment::new_enclosed(&global);
        inner.define("b", Value::integer(2));

        assert_eq!(inner.resolve("a"), Some(Value::integer(1)));
        assert_eq!(inner.resolve("b"), Some(Value::integer(2)));
        assert_eq!(global.resolve("b"), None);
        assert_eq!(inner.resolve("c"), None);
    }

    #[test]
    fn test_define_shadows_without_touching_outer() {
        let global = Environment::new();
        global.define("a", Value::integer(1));

        let inner = Environment::new_enclosed(&global);
        inner.define("a", Value::integer(2));

        assert_eq!(inner.resolve("a"), Some(Value::integer(2)));
        assert_eq!(global.resolve("a"), Some(Value::integer(1)));
    }

    #[test]
    fn test_clones_share_the_frame() {
        let env = Environment::new();
        let captured = env.clone();
        env.define("late", Value::string("seen"));

        assert_eq!(captured.resolve("late"), Some(Value::string("seen")));
    }

    #[test]
    fn test_self_referencing_frame_is_collected() {
        let global = Environment::new();
        let local: Rc<str> = "only bound in the call frame".into();

        let frame = Environment::new_enclosed(&global);
        frame.define("local", Value::String(local.clone()));
        frame.define(
            "inner",
            Value::function(None, vec![], List::new(), frame.clone()),
        );
        assert_eq!(Rc::strong_count(&local), 2);

        drop(frame);
        gc::force_collect();

        assert_eq!(Rc::strong_count(&local), 1);
        assert_eq!(global.resolve("inner"), None);
    }
}
