use std::num::NonZeroUsize;

/// Ceilings and tunables of an engine instance, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// The maximum number of characters in an expression.
    pub max_expression_char_count: usize,
    /// The maximum number of characters of variable/function names.
    pub max_name_char_count: usize,
    /// The maximum number of tokens in an expression.
    pub max_token_count: usize,
    /// The maximum depth of an AST, where the root has depth 1.
    pub max_ast_depth: usize,
    /// The number of variable slots allocated up front.
    pub initial_memory_capacity: usize,
    /// The number of compiled expressions kept for reuse.
    pub cache_capacity: NonZeroUsize,
}

impl Settings {
    pub fn with_max_expression_char_count(mut self, count: usize) -> Self {
        self.max_expression_char_count = count;
        self
    }

    pub fn with_max_name_char_count(mut self, count: usize) -> Self {
        self.max_name_char_count = count;
        self
    }

    pub fn with_max_token_count(mut self, count: usize) -> Self {
        self.max_token_count = count;
        self
    }

    pub fn with_max_ast_depth(mut self, depth: usize) -> Self {
        self.max_ast_depth = depth;
        self
    }

    /// Zero is rounded up to one slot so that doubling always grows the storage.
    pub fn with_initial_memory_capacity(mut self, capacity: usize) -> Self {
        self.initial_memory_capacity = capacity.max(1);
        self
    }

    pub fn with_cache_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_expression_char_count: 256,
            max_name_char_count: 64,
            max_token_count: 64,
            max_ast_depth: 32,
            initial_memory_capacity: 64,
            cache_capacity: NonZeroUsize::MIN,
        }
    }
}
