//! Function values: closures over a captured context.
//!
//! The expression tree lives with the evaluator. A closure only needs to
//! hold it and print it, so bodies and parameter defaults are trait
//! objects behind [`Expression`].

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::Value;

/// An evaluator expression a closure can hold.
///
/// `Display` must render source text; it is used for `function(...) body`.
pub trait Expression: fmt::Display + fmt::Debug {}

/// One declared parameter, with an optional default expression.
#[derive(Clone, Debug)]
pub struct Parameter {
    pub name: String,
    pub default: Option<Rc<dyn Expression>>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Parameter {
            name: name.into(),
            default: None,
        }
    }

    pub fn with_default(name: impl Into<String>, default: Rc<dyn Expression>) -> Self {
        Parameter {
            name: name.into(),
            default: Some(default),
        }
    }
}

/// Captured evaluation environment.
///
/// Frozen once a closure captures it; lookups fall back to the parent.
#[derive(Debug, Default)]
pub struct Context {
    parent: Option<Rc<Context>>,
    bindings: FxHashMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Context::default()
    }

    /// Child scope whose lookups fall back to `parent`.
    pub fn with_parent(parent: Rc<Context>) -> Self {
        Context {
            parent: Some(parent),
            bindings: FxHashMap::default(),
        }
    }

    /// Bind `name`, replacing any earlier binding in this scope.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Innermost binding of `name`.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        let mut scope = self;
        loop {
            if let Some(value) = scope.bindings.get(name) {
                return Some(value);
            }
            scope = scope.parent.as_deref()?;
        }
    }

    pub fn parent(&self) -> Option<&Rc<Context>> {
        self.parent.as_ref()
    }

    /// Bindings in this scope only.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Function value: context, body and parameters, all shared.
///
/// Functions are not comparable in the language. Every equality and
/// ordering test between two closures is false, even for a closure and
/// its own clone.
#[derive(Clone)]
pub struct Closure {
    context: Rc<Context>,
    body: Rc<dyn Expression>,
    params: Rc<[Parameter]>,
}

impl Closure {
    pub fn new(context: Rc<Context>, body: Rc<dyn Expression>, params: Vec<Parameter>) -> Self {
        Closure {
            context,
            body,
            params: params.into(),
        }
    }

    pub fn context(&self) -> &Rc<Context> {
        &self.context
    }

    pub fn body(&self) -> &Rc<dyn Expression> {
        &self.body
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }
}

impl PartialEq for Closure {
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}

impl PartialOrd for Closure {
    fn partial_cmp(&self, _other: &Self) -> Option<Ordering> {
        None
    }
}

impl fmt::Display for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param.name)?;
            if let Some(default) = &param.default {
                write!(f, " = {default}")?;
            }
        }
        write!(f, ") {}", self.body)
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("params", &self.params.len())
            .field("body", &self.body)
            .field("captures", &format!("{} bindings", self.context.len()))
            .finish()
    }
}
