use std::{collections::HashMap, rc::Rc};

use tracing::debug;

use crate::{ast::FunctionDef, config::RuntimeConfig, interpreter::value::core::Value};

/// Index of a frame inside a [`Runtime`].
///
/// Ids only ever come from the evaluator, which pops frames in the order it
/// pushed them, so an id never outlives its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct FrameId(usize);

impl FrameId {
    /// The root (global) frame, present in every runtime.
    pub(crate) const ROOT: Self = Self(0);
}

/// A single variable scope.
#[derive(Debug, Default)]
struct Frame {
    variables: HashMap<String, Value>,
    enclosing: Option<FrameId>,
}

/// Stores the state a program runs against.
///
/// Frames live in an arena indexed by frame ids. The root frame holds the
/// global variables and has no enclosing frame; every other frame links to
/// the frame it was created in. Besides the frames, the runtime owns the
/// state shared by the whole program: the function table and the output log.
///
/// ## Usage
///
/// A `Runtime` is created once and passed to
/// [`evaluate`](crate::interpreter::evaluator::core::evaluate). Variables,
/// functions and output persist across evaluations until [`Runtime::reset`]
/// is called.
#[derive(Debug)]
pub struct Runtime {
    frames:    Vec<Frame>,
    functions: HashMap<String, Rc<FunctionDef>>,
    output:    Vec<String>,
    config:    RuntimeConfig,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    /// Creates a runtime with only the root frame and default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    /// Creates a runtime with only the root frame and the given limits.
    #[must_use]
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self { frames: vec![Frame::default()],
               functions: HashMap::new(),
               output: Vec::new(),
               config }
    }

    /// The limits this runtime evaluates with.
    #[must_use]
    pub const fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Clears globals, functions and output so the runtime can serve an
    /// independent run.
    pub fn reset(&mut self) {
        debug!(globals = self.frames[0].variables.len(),
               functions = self.functions.len(),
               lines = self.output.len(),
               "resetting runtime");
        self.frames.truncate(1);
        self.frames[0].variables.clear();
        self.functions.clear();
        self.output.clear();
    }

    /// Pushes a new frame enclosed by `enclosing` and returns its id.
    pub(crate) fn push_frame(&mut self, enclosing: FrameId) -> FrameId {
        self.frames.push(Frame { variables: HashMap::new(),
                                 enclosing: Some(enclosing), });
        FrameId(self.frames.len() - 1)
    }

    /// Pops the most recently pushed frame. The root frame is never popped.
    pub(crate) fn pop_frame(&mut self, frame: FrameId) {
        debug_assert_eq!(frame.0 + 1, self.frames.len(), "frames are popped in LIFO order");
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Follows the enclosing links from `frame` up to the root.
    #[must_use]
    pub(crate) fn root_of(&self, frame: FrameId) -> FrameId {
        let mut current = frame;
        while let Some(enclosing) = self.frames[current.0].enclosing {
            current = enclosing;
        }
        current
    }

    /// Looks a variable up, starting at `frame` and walking outwards.
    #[must_use]
    pub(crate) fn lookup(&self, frame: FrameId, name: &str) -> Option<&Value> {
        let mut current = Some(frame);
        while let Some(id) = current {
            let frame = &self.frames[id.0];
            if let Some(value) = frame.variables.get(name) {
                return Some(value);
            }
            current = frame.enclosing;
        }
        None
    }

    /// Assigns a variable.
    ///
    /// The value replaces the binding in the nearest frame, starting at
    /// `frame`, that already defines `name`. If no frame does, the variable
    /// is created in `frame` itself.
    pub(crate) fn assign(&mut self, frame: FrameId, name: &str, value: Value) {
        let mut current = Some(frame);
        while let Some(id) = current {
            if let Some(slot) = self.frames[id.0].variables.get_mut(name) {
                *slot = value;
                return;
            }
            current = self.frames[id.0].enclosing;
        }
        self.define(frame, name, value);
    }

    /// Binds a variable directly in `frame`, shadowing outer bindings.
    pub(crate) fn define(&mut self, frame: FrameId, name: &str, value: Value) {
        self.frames[frame.0].variables.insert(name.to_string(), value);
    }

    /// Reads a global variable.
    ///
    /// # Example
    /// ```
    /// use kestrel::{interpreter::runtime::Runtime, run};
    ///
    /// let mut runtime = Runtime::new();
    /// run("x = 6 * 7;", &mut runtime).unwrap();
    /// assert_eq!(runtime.variable("x").map(ToString::to_string), Some("42".to_string()));
    /// ```
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.lookup(FrameId::ROOT, name)
    }

    /// Stores a function definition, replacing any previous one of that name.
    pub fn define_function(&mut self, def: Rc<FunctionDef>) {
        self.functions.insert(def.name.clone(), def);
    }

    /// Looks a function up by name.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<Rc<FunctionDef>> {
        self.functions.get(name).cloned()
    }

    /// Appends a line to the output log.
    pub fn emit(&mut self, line: String) {
        self.output.push(line);
    }

    /// The lines printed so far, in order.
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Removes and returns the lines printed so far.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_enclosing_frames() {
        let mut runtime = Runtime::new();
        runtime.define(FrameId::ROOT, "g", Value::Integer(1));
        let inner = runtime.push_frame(FrameId::ROOT);

        assert_eq!(runtime.lookup(inner, "g"), Some(&Value::Integer(1)));
        assert_eq!(runtime.lookup(inner, "missing"), None);
        assert_eq!(runtime.root_of(inner), FrameId::ROOT);
    }

    #[test]
    fn assign_updates_nearest_definition() {
        let mut runtime = Runtime::new();
        runtime.define(FrameId::ROOT, "g", Value::Integer(1));
        let inner = runtime.push_frame(FrameId::ROOT);

        runtime.assign(inner, "g", Value::Integer(2));
        runtime.assign(inner, "local", Value::Integer(3));
        assert_eq!(runtime.variable("g"), Some(&Value::Integer(2)));
        assert_eq!(runtime.variable("local"), None);
        assert_eq!(runtime.lookup(inner, "local"), Some(&Value::Integer(3)));

        runtime.pop_frame(inner);
        assert_eq!(runtime.push_frame(FrameId::ROOT), inner);
    }

    #[test]
    fn define_shadows_outer_binding() {
        let mut runtime = Runtime::new();
        runtime.define(FrameId::ROOT, "x", Value::Integer(1));
        let inner = runtime.push_frame(FrameId::ROOT);
        runtime.define(inner, "x", Value::Integer(5));

        assert_eq!(runtime.lookup(inner, "x"), Some(&Value::Integer(5)));
        assert_eq!(runtime.variable("x"), Some(&Value::Integer(1)));
    }

    #[test]
    fn reset_clears_shared_state() {
        let mut runtime = Runtime::new();
        runtime.define(FrameId::ROOT, "x", Value::Integer(1));
        runtime.emit("line".to_string());
        runtime.push_frame(FrameId::ROOT);

        runtime.reset();
        assert_eq!(runtime.variable("x"), None);
        assert!(runtime.output().is_empty());
        assert_eq!(runtime.push_frame(FrameId::ROOT), FrameId(1));
    }
}
