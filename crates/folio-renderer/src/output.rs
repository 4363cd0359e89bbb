//! Output sink with nested capture scopes.
//!
//! Writes go to the buffer on top of a stack. [`Output::capture`] pushes a
//! fresh buffer and returns a [`CaptureScope`] token; handing the token back
//! to [`Output::release`] pops that buffer and returns its text, so the
//! enclosing buffer receives writes again.

/// Token for an open capture; must be passed back to [`Output::release`].
#[derive(Debug)]
#[must_use = "an unreleased capture swallows all further output"]
pub struct CaptureScope {
    depth: usize,
}

/// Accumulating output buffer.
#[derive(Debug)]
pub struct Output {
    stack: Vec<String>,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: vec![String::with_capacity(4096)],
        }
    }

    /// Append `text` to the current buffer.
    ///
    /// # Returns
    ///
    /// Number of bytes written.
    pub fn write(&mut self, text: &str) -> usize {
        if let Some(buffer) = self.stack.last_mut() {
            buffer.push_str(text);
        }
        text.len()
    }

    /// Divert writes into a fresh buffer until the scope is released.
    pub fn capture(&mut self) -> CaptureScope {
        self.stack.push(String::new());
        CaptureScope {
            depth: self.stack.len(),
        }
    }

    /// Close a capture and return the text written inside it.
    ///
    /// Captures opened inside `scope` and never released are folded into
    /// the returned text.
    pub fn release(&mut self, scope: CaptureScope) -> String {
        while self.stack.len() > scope.depth {
            let inner = self.stack.pop().unwrap_or_default();
            if let Some(buffer) = self.stack.last_mut() {
                buffer.push_str(&inner);
            }
        }
        if self.stack.len() == scope.depth && scope.depth > 1 {
            self.stack.pop().unwrap_or_default()
        } else {
            String::new()
        }
    }

    /// Number of open captures.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Take the main buffer, leaving the sink empty.
    ///
    /// Open captures are folded into the result.
    pub fn take(&mut self) -> String {
        let mut html = String::new();
        for buffer in self.stack.drain(..) {
            html.push_str(&buffer);
        }
        self.stack.push(String::with_capacity(4096));
        html
    }
}
