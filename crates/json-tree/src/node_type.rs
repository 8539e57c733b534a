use std::fmt;

/// The closed set of node variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeType {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl NodeType {
    pub const ALL: [NodeType; 6] = [
        NodeType::Null,
        NodeType::Bool,
        NodeType::Number,
        NodeType::String,
        NodeType::Array,
        NodeType::Object,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Scalars: null, boolean, number and string.
    pub fn is_primitive(self) -> bool {
        !self.is_container()
    }

    pub fn is_container(self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
