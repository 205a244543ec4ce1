//! Stack growth for recursion over user-controlled nesting.
//!
//! Script values nest without a fixed bound: `[[[[1]]]]` can be built
//! thousands of levels deep by a loop. Rendering, comparing or combining
//! such values walks the nesting recursively, so every recursive step in
//! the value core goes through [`ensure_sufficient_stack`].
//!
//! Native targets grow the stack on demand with `stacker`; `wasm32` calls
//! the closure directly.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than [`RED_ZONE`] bytes remain.
///
/// ```text
/// fn depth(value: &Value) -> usize {
///     ensure_sufficient_stack(|| match value {
///         Value::Vector(items) => 1 + items.iter().map(depth).max().unwrap_or(0),
///         _ => 0,
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// `wasm32` manages its own stack; call through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
