//! Captured state of a single variable.
//!
//! An element records the bounds of one variable at the time of the last
//! [`store`](VarElement::store) plus an activation flag. Deactivated elements
//! keep their bounds but are skipped on restore and rendered as `(...)`.

use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use cpforge_core::{IntVarId, IntervalVarId, Result, VariableKind, VariableNetwork};
use cpforge_core::CpForgeError;

/// Behavior shared by every element kind, used by [`AssignmentContainer`].
///
/// [`AssignmentContainer`]: super::AssignmentContainer
pub trait VarElement: Clone + Debug + Display {
    /// Handle type of the variable this element captures.
    type Var: Copy + Eq + Hash + Debug;

    /// Variable kind, used in diagnostics and errors.
    const KIND: VariableKind;

    /// Creates a freshly reset element for `var`.
    fn new(var: Self::Var) -> Self;

    /// Returns the arena index of a handle.
    fn var_index(var: Self::Var) -> usize;

    /// Returns the handle this element is attached to.
    fn var(&self) -> Self::Var;

    /// Reattaches the element to `var` and resets every field to its default.
    fn reset(&mut self, var: Self::Var);

    /// Overwrites bounds and activation from `other`, keeping the handle.
    fn copy_from(&mut self, other: &Self);

    fn activate(&mut self);
    fn deactivate(&mut self);
    fn activated(&self) -> bool;

    /// Reads the live state of the variable into this element.
    fn store<N: VariableNetwork + ?Sized>(&mut self, network: &N);

    /// Writes this element's bounds onto the live variable.
    ///
    /// Does not look at the activation flag; containers skip inactive
    /// elements before calling this.
    fn restore<N: VariableNetwork + ?Sized>(&self, network: &mut N) -> Result<()>;

    /// Returns the name of the captured variable.
    fn var_name<'n, N: VariableNetwork + ?Sized>(&self, network: &'n N) -> &'n str;

    /// Checks `min <= max` for every bound pair.
    fn validate(&self) -> Result<()>;
}

fn check_pair(kind: VariableKind, index: usize, field: &str, min: i64, max: i64) -> Result<()> {
    if min > max {
        return Err(CpForgeError::InvalidElement(format!(
            "{kind} variable #{index}: {field} range {min}..{max} is empty"
        )));
    }
    Ok(())
}

fn bound_value(
    kind: VariableKind,
    index: usize,
    field: &'static str,
    min: i64,
    max: i64,
) -> Result<i64> {
    if min != max {
        return Err(CpForgeError::NotBound {
            kind,
            index,
            field,
            min,
            max,
        });
    }
    Ok(min)
}

/// Captured bounds of an integer variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntVarElement {
    var: IntVarId,
    min: i64,
    max: i64,
    active: bool,
}

impl IntVarElement {
    #[inline]
    pub fn min(&self) -> i64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Returns the captured value.
    ///
    /// # Errors
    ///
    /// Returns [`CpForgeError::NotBound`] unless [`bound`](Self::bound).
    #[inline]
    pub fn value(&self) -> Result<i64> {
        bound_value(Self::KIND, self.var.index(), "value", self.min, self.max)
    }

    /// Returns true if the captured range holds a single value.
    #[inline]
    pub fn bound(&self) -> bool {
        self.min == self.max
    }

    pub fn set_min(&mut self, m: i64) {
        self.min = m;
    }

    pub fn set_max(&mut self, m: i64) {
        self.max = m;
    }

    pub fn set_range(&mut self, min: i64, max: i64) {
        self.min = min;
        self.max = max;
    }

    pub fn set_value(&mut self, value: i64) {
        self.min = value;
        self.max = value;
    }
}

impl VarElement for IntVarElement {
    type Var = IntVarId;

    const KIND: VariableKind = VariableKind::Int;

    fn new(var: IntVarId) -> Self {
        Self {
            var,
            min: i64::MIN,
            max: i64::MAX,
            active: true,
        }
    }

    fn var_index(var: IntVarId) -> usize {
        var.index()
    }

    #[inline]
    fn var(&self) -> IntVarId {
        self.var
    }

    fn reset(&mut self, var: IntVarId) {
        *self = Self::new(var);
    }

    fn copy_from(&mut self, other: &Self) {
        self.set_range(other.min, other.max);
        self.active = other.active;
    }

    #[inline]
    fn activate(&mut self) {
        self.active = true;
    }

    #[inline]
    fn deactivate(&mut self) {
        self.active = false;
    }

    #[inline]
    fn activated(&self) -> bool {
        self.active
    }

    fn store<N: VariableNetwork + ?Sized>(&mut self, network: &N) {
        self.min = network.int_min(self.var);
        self.max = network.int_max(self.var);
    }

    fn restore<N: VariableNetwork + ?Sized>(&self, network: &mut N) -> Result<()> {
        network.set_int_range(self.var, self.min, self.max)
    }

    fn var_name<'n, N: VariableNetwork + ?Sized>(&self, network: &'n N) -> &'n str {
        network.int_var_name(self.var)
    }

    fn validate(&self) -> Result<()> {
        check_pair(Self::KIND, self.var.index(), "value", self.min, self.max)
    }
}

impl Display for IntVarElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.active {
            return f.write_str("(...)");
        }
        if self.min == self.max {
            write!(f, "({})", self.min)
        } else {
            write!(f, "({}..{})", self.min, self.max)
        }
    }
}

/// Captured bounds of an interval variable.
///
/// `performed_min`/`performed_max` encode the performed status as a 0/1
/// range: `(0, 0)` absent, `(1, 1)` performed, `(0, 1)` undecided. When
/// `performed_max == 0` the start, duration and end fields carry no meaning
/// and are neither captured nor restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalVarElement {
    var: IntervalVarId,
    start_min: i64,
    start_max: i64,
    duration_min: i64,
    duration_max: i64,
    end_min: i64,
    end_max: i64,
    performed_min: i64,
    performed_max: i64,
    active: bool,
}

impl IntervalVarElement {
    #[inline]
    pub fn start_min(&self) -> i64 {
        self.start_min
    }

    #[inline]
    pub fn start_max(&self) -> i64 {
        self.start_max
    }

    pub fn start_value(&self) -> Result<i64> {
        bound_value(Self::KIND, self.var.index(), "start", self.start_min, self.start_max)
    }

    #[inline]
    pub fn duration_min(&self) -> i64 {
        self.duration_min
    }

    #[inline]
    pub fn duration_max(&self) -> i64 {
        self.duration_max
    }

    pub fn duration_value(&self) -> Result<i64> {
        bound_value(Self::KIND, self.var.index(), "duration", self.duration_min, self.duration_max)
    }

    #[inline]
    pub fn end_min(&self) -> i64 {
        self.end_min
    }

    #[inline]
    pub fn end_max(&self) -> i64 {
        self.end_max
    }

    pub fn end_value(&self) -> Result<i64> {
        bound_value(Self::KIND, self.var.index(), "end", self.end_min, self.end_max)
    }

    #[inline]
    pub fn performed_min(&self) -> i64 {
        self.performed_min
    }

    #[inline]
    pub fn performed_max(&self) -> i64 {
        self.performed_max
    }

    pub fn performed_value(&self) -> Result<i64> {
        bound_value(Self::KIND, self.var.index(), "performed", self.performed_min, self.performed_max)
    }

    /// Returns true if the captured status forces the interval absent.
    #[inline]
    pub fn is_absent(&self) -> bool {
        self.performed_max == 0
    }

    pub fn set_start_min(&mut self, m: i64) {
        self.start_min = m;
    }

    pub fn set_start_max(&mut self, m: i64) {
        self.start_max = m;
    }

    pub fn set_start_range(&mut self, min: i64, max: i64) {
        self.start_min = min;
        self.start_max = max;
    }

    pub fn set_start_value(&mut self, v: i64) {
        self.set_start_range(v, v);
    }

    pub fn set_duration_min(&mut self, m: i64) {
        self.duration_min = m;
    }

    pub fn set_duration_max(&mut self, m: i64) {
        self.duration_max = m;
    }

    pub fn set_duration_range(&mut self, min: i64, max: i64) {
        self.duration_min = min;
        self.duration_max = max;
    }

    pub fn set_duration_value(&mut self, v: i64) {
        self.set_duration_range(v, v);
    }

    pub fn set_end_min(&mut self, m: i64) {
        self.end_min = m;
    }

    pub fn set_end_max(&mut self, m: i64) {
        self.end_max = m;
    }

    pub fn set_end_range(&mut self, min: i64, max: i64) {
        self.end_min = min;
        self.end_max = max;
    }

    pub fn set_end_value(&mut self, v: i64) {
        self.set_end_range(v, v);
    }

    pub fn set_performed_min(&mut self, m: i64) {
        self.performed_min = m;
    }

    pub fn set_performed_max(&mut self, m: i64) {
        self.performed_max = m;
    }

    pub fn set_performed_range(&mut self, min: i64, max: i64) {
        self.performed_min = min;
        self.performed_max = max;
    }

    pub fn set_performed_value(&mut self, v: i64) {
        self.set_performed_range(v, v);
    }
}

impl VarElement for IntervalVarElement {
    type Var = IntervalVarId;

    const KIND: VariableKind = VariableKind::Interval;

    fn new(var: IntervalVarId) -> Self {
        Self {
            var,
            start_min: i64::MIN,
            start_max: i64::MAX,
            duration_min: i64::MIN,
            duration_max: i64::MAX,
            end_min: i64::MIN,
            end_max: i64::MAX,
            performed_min: 0,
            performed_max: 1,
            active: true,
        }
    }

    fn var_index(var: IntervalVarId) -> usize {
        var.index()
    }

    #[inline]
    fn var(&self) -> IntervalVarId {
        self.var
    }

    fn reset(&mut self, var: IntervalVarId) {
        *self = Self::new(var);
    }

    fn copy_from(&mut self, other: &Self) {
        self.set_start_range(other.start_min, other.start_max);
        self.set_duration_range(other.duration_min, other.duration_max);
        self.set_end_range(other.end_min, other.end_max);
        self.set_performed_range(other.performed_min, other.performed_max);
        self.active = other.active;
    }

    #[inline]
    fn activate(&mut self) {
        self.active = true;
    }

    #[inline]
    fn deactivate(&mut self) {
        self.active = false;
    }

    #[inline]
    fn activated(&self) -> bool {
        self.active
    }

    fn store<N: VariableNetwork + ?Sized>(&mut self, network: &N) {
        self.performed_min = network.performed_min(self.var);
        self.performed_max = network.performed_max(self.var);
        if self.performed_max != 0 {
            self.start_min = network.start_min(self.var);
            self.start_max = network.start_max(self.var);
            self.duration_min = network.duration_min(self.var);
            self.duration_max = network.duration_max(self.var);
            self.end_min = network.end_min(self.var);
            self.end_max = network.end_max(self.var);
        }
    }

    fn restore<N: VariableNetwork + ?Sized>(&self, network: &mut N) -> Result<()> {
        if self.performed_min == self.performed_max {
            network.set_performed(self.var, self.performed_min != 0)?;
        }
        if self.performed_max != 0 {
            network.set_start_range(self.var, self.start_min, self.start_max)?;
            network.set_duration_range(self.var, self.duration_min, self.duration_max)?;
            network.set_end_range(self.var, self.end_min, self.end_max)?;
        }
        Ok(())
    }

    fn var_name<'n, N: VariableNetwork + ?Sized>(&self, network: &'n N) -> &'n str {
        network.interval_var_name(self.var)
    }

    fn validate(&self) -> Result<()> {
        let index = self.var.index();
        check_pair(Self::KIND, index, "performed", self.performed_min, self.performed_max)?;
        if self.performed_min < 0 || self.performed_max > 1 {
            return Err(CpForgeError::InvalidElement(format!(
                "interval variable #{index}: performed range {}..{} is not within 0..1",
                self.performed_min, self.performed_max
            )));
        }
        if self.performed_max != 0 {
            check_pair(Self::KIND, index, "start", self.start_min, self.start_max)?;
            check_pair(Self::KIND, index, "duration", self.duration_min, self.duration_max)?;
            check_pair(Self::KIND, index, "end", self.end_min, self.end_max)?;
        }
        Ok(())
    }
}

fn write_range(f: &mut fmt::Formatter<'_>, min: i64, max: i64) -> fmt::Result {
    write!(f, "{min}")?;
    if max != min {
        write!(f, "..{max}")?;
    }
    Ok(())
}

impl Display for IntervalVarElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.active {
            return f.write_str("(...)");
        }
        f.write_str("(start = ")?;
        write_range(f, self.start_min, self.start_max)?;
        f.write_str(", duration = ")?;
        write_range(f, self.duration_min, self.duration_max)?;
        f.write_str(", status = ")?;
        write_range(f, self.performed_min, self.performed_max)?;
        f.write_str(")")
    }
}
