//! Variable handles.
//!
//! Variables are owned by the solver's arenas. Everything outside the solver
//! refers to them through these copyable indices, which stay valid for the
//! lifetime of the solver that issued them.

use std::fmt;

/// The kind of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VariableKind {
    /// An integer variable with a `[min, max]` domain.
    Int,
    /// A scheduling variable with start, duration, end and performed status.
    Interval,
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableKind::Int => f.write_str("int"),
            VariableKind::Interval => f.write_str("interval"),
        }
    }
}

/// Handle to an integer variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntVarId(usize);

impl IntVarId {
    /// Creates a handle from an arena index.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Handle to an interval variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntervalVarId(usize);

impl IntervalVarId {
    /// Creates a handle from an arena index.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for IntVarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntVar#{}", self.0)
    }
}

impl fmt::Display for IntervalVarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntervalVar#{}", self.0)
    }
}
