/// Default container nesting limit.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// The XSSI guard line some servers prepend to JSON responses.
pub const NON_EXECUTE_PREFIX: &str = ")]}'";

/// Knobs for the lexer and parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept `0x`, `0o` and `0b` integer literals.
    pub radix_literals: bool,
    /// Fail on an unpaired `\uD800`-`\uDFFF` escape instead of replacing it
    /// with U+FFFD.
    pub reject_lone_surrogates: bool,
    /// The root value must be an object or an array.
    pub require_container_root: bool,
    /// Skip a leading `)]}'` line before the document.
    pub allow_non_execute_prefix: bool,
    /// Read JSON5: comments, single quotes, unquoted keys, trailing commas,
    /// hexadecimal and signed numbers. `Infinity` and `NaN` parse as `null`.
    pub json5: bool,
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            radix_literals: true,
            reject_lone_surrogates: false,
            require_container_root: false,
            allow_non_execute_prefix: false,
            json5: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Plain RFC 8259 documents: no radix literals, strict surrogates.
    pub fn strict() -> Self {
        Self {
            radix_literals: false,
            reject_lone_surrogates: true,
            ..Self::default()
        }
    }

    pub fn radix_literals(mut self, enabled: bool) -> Self {
        self.radix_literals = enabled;
        self
    }

    pub fn reject_lone_surrogates(mut self, enabled: bool) -> Self {
        self.reject_lone_surrogates = enabled;
        self
    }

    pub fn require_container_root(mut self, enabled: bool) -> Self {
        self.require_container_root = enabled;
        self
    }

    pub fn allow_non_execute_prefix(mut self, enabled: bool) -> Self {
        self.allow_non_execute_prefix = enabled;
        self
    }

    pub fn json5(mut self, enabled: bool) -> Self {
        self.json5 = enabled;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

/// Printer layout: compact when `indent` is `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrintOptions {
    pub indent: Option<usize>,
}

impl PrintOptions {
    pub fn compact() -> Self {
        Self { indent: None }
    }

    pub fn pretty() -> Self {
        Self { indent: Some(2) }
    }

    pub fn indent(mut self, width: usize) -> Self {
        self.indent = Some(width);
        self
    }
}
