//! Stack growth for the two recursive tree walks.
//!
//! MolQL trees arrive as JSON or from builders in other tools, so nothing
//! bounds their depth: a generated query can nest `and`/`not` chains
//! thousands of levels deep. `Compiler::compile_expr` and
//! `CompiledExpr::eval` recurse once per level, and each level runs under
//! [`ensure_sufficient_stack`] so such queries compile and evaluate instead
//! of overflowing the thread's stack. Rayon worker threads in
//! `execute_many` have smaller stacks than the main thread, which makes the
//! guard matter there too.

/// Headroom below which a new segment is allocated.
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Size of each freshly allocated segment.
#[cfg(not(target_arch = "wasm32"))]
const SEGMENT: usize = 1024 * 1024;

/// Run `f`, moving to a fresh stack segment first when less than
/// `RED_ZONE` bytes remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

/// wasm32 has no `stacker` support; deep trees rely on the host stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
