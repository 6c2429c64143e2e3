use std::rc::Rc;

use crate::{
    ast::Body,
    error::RuntimeError,
    interpreter::{env::Env, value::core::Value},
    span::Span,
};

/// A user-defined function value.
///
/// A function closes over the environment that was current at its
/// definition; calls resolve free variables through that environment, not
/// through the caller's. The body is shared with the AST node it came from,
/// so defining the same function repeatedly (for example in a loop) does not
/// copy it.
#[derive(Clone)]
pub struct Function {
    /// The function's self-name; `None` for anonymous functions.
    pub name:   Option<String>,
    /// Parameter names, bound positionally at each call.
    pub params: Vec<String>,
    /// The function body in either surface form.
    pub body:   Rc<Body>,
    /// The environment captured at definition.
    pub env:    Rc<Env>,
}

impl Function {
    /// Returns the name used in diagnostics.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("anonymous")
    }
}

// A closure bound in the environment it captured would send a derived Debug
// into that same closure again; print the shallow form instead.
impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<function {}>", self.display_name())
    }
}

/// Signature of a host-provided callable.
///
/// Natives receive the evaluated arguments, the environment of the call
/// site (whose globals anchor script execution), and the span of the call
/// for error reporting.
pub type NativeFn = fn(&[Value], &Rc<Env>, Span) -> Result<Value, RuntimeError>;

/// A host-provided callable registered in the global environment.
///
/// The declared arity is checked before the function pointer is invoked, so
/// implementations can index their argument slice freely.
#[derive(Clone, Copy)]
pub struct NativeFunction {
    /// Name the callable is registered under.
    pub name:  &'static str,
    /// Exact number of arguments the callable accepts.
    pub arity: usize,
    /// The host implementation.
    pub func:  NativeFn,
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl std::fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<built-in function {}>", self.name)
    }
}
