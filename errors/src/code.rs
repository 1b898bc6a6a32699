use std::fmt;

/// Two-letter domain identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Type definition errors (ETY)
    TY,
    /// Type resolution errors (ETR)
    TR,
    /// Value conversion errors (ECV)
    CV,
    /// Configuration errors (ECF)
    CF,
    /// Internal errors (EIN)
    IN,
}

impl Domain {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TY => "TY",
            Self::TR => "TR",
            Self::CV => "CV",
            Self::CF => "CF",
            Self::IN => "IN",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category digit (0-9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Category {
    /// Malformed input
    Syntax = 0,
    /// Failed lookups
    Resolution = 1,
    /// Constraint violations
    Validation = 2,
    /// Duplicate definitions
    Conflict = 3,
    /// Required element absent
    Missing = 4,
    /// Circular definitions
    Cycle = 5,
    /// Bugs in the generator itself
    Internal = 9,
}

impl Category {
    pub const fn as_digit(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Category {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.as_digit())
    }
}

/// Compositional error code - E[Domain][Category][Seq]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode {
    pub domain: Domain,
    pub category: Category,
    pub sequence: u16,
}

impl ErrorCode {
    pub const fn new(
        domain: Domain,
        category: Category,
        sequence: u16,
    ) -> Self {
        Self {
            domain,
            category,
            sequence,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "E{}{}{:03}",
            self.domain,
            self.category.as_digit(),
            self.sequence
        )
    }
}
