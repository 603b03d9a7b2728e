use std::fmt;

/// Operators that combine an expression with a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationOp {
    /// Shift forward (`+`)
    Plus,
    /// Shift backward (`-`)
    Minus,
    /// Assign calendar fields (`@`)
    Replace,
}

impl DurationOp {
    pub fn symbol(self) -> char {
        match self {
            DurationOp::Plus => '+',
            DurationOp::Minus => '-',
            DurationOp::Replace => '@',
        }
    }
}

impl fmt::Display for DurationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
