//! Live variables owned by the solver.

/// Current bounds of a variable within its declared domain.
///
/// Writes replace the current bounds with the requested range clipped to the
/// declared domain. A write whose clipped range is empty is rejected and
/// leaves the bounds unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    declared_min: i64,
    declared_max: i64,
    min: i64,
    max: i64,
}

impl Bounds {
    pub fn new(min: i64, max: i64) -> Self {
        Self {
            declared_min: min,
            declared_max: max,
            min,
            max,
        }
    }

    #[inline]
    pub fn min(&self) -> i64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> i64 {
        self.max
    }

    #[inline]
    pub fn declared(&self) -> (i64, i64) {
        (self.declared_min, self.declared_max)
    }

    /// Sets the bounds to `[min, max]` clipped to the declared domain.
    ///
    /// Returns `None` if the clipped range is empty, otherwise whether the
    /// bounds changed.
    pub fn set_range(&mut self, min: i64, max: i64) -> Option<bool> {
        let min = min.max(self.declared_min);
        let max = max.min(self.declared_max);
        if min > max {
            return None;
        }
        let changed = (min, max) != (self.min, self.max);
        self.min = min;
        self.max = max;
        Some(changed)
    }
}

/// An integer decision variable.
#[derive(Debug, Clone)]
pub struct IntVar {
    pub(crate) name: String,
    pub(crate) bounds: Bounds,
}

impl IntVar {
    pub fn new(name: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            name: name.into(),
            bounds: Bounds::new(min, max),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min(&self) -> i64 {
        self.bounds.min()
    }

    pub fn max(&self) -> i64 {
        self.bounds.max()
    }

    pub fn bound(&self) -> bool {
        self.bounds.min() == self.bounds.max()
    }
}

/// A scheduling variable: an optional task with start, duration and end.
#[derive(Debug, Clone)]
pub struct IntervalVar {
    pub(crate) name: String,
    pub(crate) start: Bounds,
    pub(crate) duration: Bounds,
    pub(crate) end: Bounds,
    pub(crate) performed: Bounds,
}

impl IntervalVar {
    /// Creates an interval variable.
    ///
    /// An optional interval may end up performed or absent; a mandatory one
    /// is always performed.
    pub fn new(
        name: impl Into<String>,
        start: (i64, i64),
        duration: (i64, i64),
        end: (i64, i64),
        optional: bool,
    ) -> Self {
        Self {
            name: name.into(),
            start: Bounds::new(start.0, start.1),
            duration: Bounds::new(duration.0, duration.1),
            end: Bounds::new(end.0, end.1),
            performed: Bounds::new(if optional { 0 } else { 1 }, 1),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> &Bounds {
        &self.start
    }

    pub fn duration(&self) -> &Bounds {
        &self.duration
    }

    pub fn end(&self) -> &Bounds {
        &self.end
    }

    pub fn performed(&self) -> &Bounds {
        &self.performed
    }

    pub fn must_be_performed(&self) -> bool {
        self.performed.min() == 1
    }

    pub fn may_be_performed(&self) -> bool {
        self.performed.max() == 1
    }
}
