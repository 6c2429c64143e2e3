use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::value::core::Value;

/// A lexically scoped symbol table.
///
/// An environment maps names to values and optionally points at the
/// environment of the enclosing scope. Lookup walks the parent chain;
/// definition always writes the current scope, which is what makes
/// shadowing work. Environments are shared through `Rc` because closures
/// keep their defining environment alive for as long as the closure value
/// itself lives.
///
/// The parent link is fixed at creation, so the chain is acyclic. A named
/// function stored in the environment it captured forms an `Rc` cycle
/// through the closure value; such environments are never reclaimed, which
/// is an accepted cost of supporting self-recursive functions without a
/// garbage collector.
#[derive(Debug, Default)]
pub struct Env {
    parent:   Option<Rc<Env>>,
    bindings: RefCell<HashMap<String, Value>>,
}

impl Env {
    /// Creates a new root environment with no parent.
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Creates a new environment whose lookups fall back to `parent`.
    #[must_use]
    pub fn with_parent(parent: Rc<Self>) -> Rc<Self> {
        Rc::new(Self { parent:   Some(parent),
                       bindings: RefCell::new(HashMap::new()), })
    }

    /// Binds `name` to `value` in this scope, replacing any binding of the
    /// same name in this scope. Bindings in enclosing scopes are untouched.
    pub fn define(&self, name: &str, value: Value) {
        self.bindings.borrow_mut().insert(name.to_owned(), value);
    }

    /// Looks up `name`, walking the parent chain.
    ///
    /// # Example
    /// ```
    /// use slate::interpreter::{env::Env, value::core::Value};
    ///
    /// let globals = Env::new();
    /// globals.define("x", Value::Integer(1));
    ///
    /// let inner = Env::with_parent(globals);
    /// inner.define("x", Value::Integer(2));
    ///
    /// assert_eq!(inner.lookup("x"), Some(Value::Integer(2)));
    /// assert_eq!(inner.lookup("y"), None);
    /// ```
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.bindings
            .borrow()
            .get(name)
            .cloned()
            .or_else(|| self.parent.as_ref().and_then(|parent| parent.lookup(name)))
    }

    /// Returns the root of this environment's parent chain.
    ///
    /// Scripts loaded at runtime evaluate against the globals of the chain
    /// they were started from.
    #[must_use]
    pub fn globals(self: &Rc<Self>) -> Rc<Self> {
        let mut current = Rc::clone(self);
        while let Some(parent) = current.parent.clone() {
            current = parent;
        }
        current
    }
}
