/// Default maximum nesting of function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 200;

/// Default maximum depth of nested nodes evaluated within one function body.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

/// How deeply the parser lets statements and expressions nest.
///
/// Every nested statement, parenthesised or argument expression, prefix
/// operator and operator in a chain counts one level. Source that nests
/// deeper is rejected with a diagnostic instead of exhausting the stack.
pub const MAX_PARSE_DEPTH: usize = 100;

/// Limits applied while evaluating a program.
///
/// A host that runs untrusted scripts sets these to make sure evaluation
/// terminates: runaway recursion hits `max_call_depth`, and infinite loops
/// exhaust `max_steps`. `max_nesting_depth` bounds how deep a single tree is
/// walked, which matters for trees that were not built by the parser.
///
/// # Example
/// ```
/// use kestrel::{config::RuntimeConfig, interpreter::runtime::Runtime};
///
/// let config = RuntimeConfig { max_steps: Some(10_000),
///                              ..RuntimeConfig::default() };
/// let runtime = Runtime::with_config(config);
/// assert_eq!(runtime.config().max_call_depth, 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Maximum number of nested function calls.
    pub max_call_depth:    usize,
    /// Maximum number of loop iterations plus function calls for a single
    /// evaluation; `None` means unlimited.
    pub max_steps:         Option<u64>,
    /// Maximum depth of nested nodes within one function body or the
    /// top-level program.
    pub max_nesting_depth: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { max_call_depth:    DEFAULT_MAX_CALL_DEPTH,
               max_steps:         None,
               max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH, }
    }
}
