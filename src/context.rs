//! Location context carried through a validation run.
//!
//! A [`Context`] records where the value currently being validated lives:
//! its path, the key used to reach it, the value one level up, and the root
//! input. Structural validators create a fresh child context for every member
//! they descend into, so sibling branches never share one.

use serde_json::Value;

use crate::path::{JsonPath, PathSegment};

/// Reference depth a run may reach unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Location metadata for the value under validation.
///
/// Contexts borrow from the input being validated and are cheap to create.
/// `None` for `value`, `parent` or `root` means the value is unset (never
/// supplied), which is distinct from `Some(&Value::Null)`.
///
/// A context also counts how many registry references were followed to reach
/// it. The count and its limit are inherited by every child.
///
/// # Example
///
/// ```rust
/// use triage::{Context, PathSegment};
/// use serde_json::json;
///
/// let input = json!({"user": {"name": "nana"}});
/// let root = Context::new(Some(&input));
///
/// let user = root.child(PathSegment::field("user"), input.get("user"));
/// assert_eq!(user.path().to_string(), "$.user");
/// assert_eq!(user.parent(), Some(&input));
/// assert_eq!(user.root(), Some(&input));
/// ```
#[derive(Debug, Clone)]
pub struct Context<'a> {
    path: JsonPath,
    key: Option<PathSegment>,
    parent: Option<&'a Value>,
    root: Option<&'a Value>,
    value: Option<&'a Value>,
    depth: usize,
    max_depth: usize,
}

impl<'a> Context<'a> {
    /// Creates a root context rendered with the default `$` marker.
    pub fn new(value: Option<&'a Value>) -> Self {
        Self::at(JsonPath::root(), value)
    }

    /// Creates a root context rendered with a custom marker.
    pub fn with_root_path(value: Option<&'a Value>, marker: impl Into<String>) -> Self {
        Self::at(JsonPath::with_marker(marker), value)
    }

    fn at(path: JsonPath, value: Option<&'a Value>) -> Self {
        Self {
            path,
            key: None,
            parent: None,
            root: value,
            value,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the reference depth limit and returns self for chaining.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Creates the context for a member reached from this one through `key`.
    ///
    /// The child's parent is this context's value; the root is inherited
    /// unchanged.
    pub fn child<'c>(&'c self, key: PathSegment, value: Option<&'c Value>) -> Context<'c>
    where
        'a: 'c,
    {
        Context {
            path: self.path.push(key.clone()),
            key: Some(key),
            parent: self.value,
            root: self.root,
            value,
            depth: self.depth,
            max_depth: self.max_depth,
        }
    }

    /// Returns a copy of this context one reference deeper.
    ///
    /// Location fields are unchanged.
    pub fn deeper(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self.clone()
        }
    }

    /// Returns the number of references followed to reach this context.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the reference depth limit.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns the path of the current value.
    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    /// Returns the key used to reach the current value, or None at the root.
    pub fn key(&self) -> Option<&PathSegment> {
        self.key.as_ref()
    }

    /// Returns the value of the enclosing context, or None at the root.
    pub fn parent(&self) -> Option<&'a Value> {
        self.parent
    }

    /// Returns the root input of this validation run.
    pub fn root(&self) -> Option<&'a Value> {
        self.root
    }

    /// Returns the value this context was created for.
    pub fn value(&self) -> Option<&'a Value> {
        self.value
    }
}

/// Builds a context from an optional parent, key and value.
///
/// Without a parent the result is a root context. With a parent, the path
/// gets `key` appended (a missing key leaves the path unchanged), `parent`
/// becomes the parent context's value and `root`, depth and depth limit are
/// inherited.
pub fn make_ctx<'a>(
    parent: Option<&Context<'a>>,
    key: Option<PathSegment>,
    value: Option<&'a Value>,
) -> Context<'a> {
    match parent {
        None => Context {
            key,
            ..Context::new(value)
        },
        Some(parent) => Context {
            path: match &key {
                Some(segment) => parent.path.push(segment.clone()),
                None => parent.path.clone(),
            },
            key,
            parent: parent.value,
            root: parent.root,
            value,
            depth: parent.depth,
            max_depth: parent.max_depth,
        },
    }
}
