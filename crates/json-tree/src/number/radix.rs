use std::fmt;

/// Base of a numeric literal. Only decimal literals may carry a fraction or
/// an exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Radix {
    Binary,
    Octal,
    #[default]
    Decimal,
    Hexadecimal,
}

impl Radix {
    pub fn base(self) -> u32 {
        match self {
            Self::Binary => 2,
            Self::Octal => 8,
            Self::Decimal => 10,
            Self::Hexadecimal => 16,
        }
    }

    /// Radix selected by the letter following a leading `0`, e.g. the `x` of `0x1F`.
    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            'x' | 'X' => Some(Self::Hexadecimal),
            'o' | 'O' => Some(Self::Octal),
            'b' | 'B' => Some(Self::Binary),
            _ => None,
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            Self::Binary => "0b",
            Self::Octal => "0o",
            Self::Decimal => "",
            Self::Hexadecimal => "0x",
        }
    }

    pub fn is_digit(self, c: char) -> bool {
        c.is_digit(self.base())
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "base {}", self.base())
    }
}
