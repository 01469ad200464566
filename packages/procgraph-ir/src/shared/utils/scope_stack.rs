//! Scope stack for qualified procedure names
//!
//! Tracks enclosing type declarations while walking a compilation unit so a
//! method can be reported as `Outer.Inner.method`.

/// Stack of enclosing type names
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    scopes: Vec<String>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.scopes.push(name.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.scopes.pop()
    }

    /// Qualified name of `member` inside the current scope
    pub fn qualify(&self, member: &str) -> String {
        if self.scopes.is_empty() {
            member.to_string()
        } else {
            format!("{}.{}", self.scopes.join("."), member)
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Run `f` with `name` pushed, popping afterwards even if `f` returns early
    pub fn with_scope<F, R>(&mut self, name: impl Into<String>, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.push(name);
        let result = f(self);
        self.pop();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualify_nested() {
        let mut stack = ScopeStack::new();
        stack.push("Outer");
        stack.push("Inner");
        assert_eq!(stack.qualify("run"), "Outer.Inner.run");
    }

    #[test]
    fn test_qualify_top_level() {
        assert_eq!(ScopeStack::new().qualify("main"), "main");
    }

    #[test]
    fn test_with_scope_restores_depth() {
        let mut stack = ScopeStack::new();
        stack.push("A");
        let name = stack.with_scope("B", |s| s.qualify("m"));
        assert_eq!(name, "A.B.m");
        assert_eq!(stack.depth(), 1);
    }
}
