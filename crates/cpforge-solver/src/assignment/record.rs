//! Name-keyed serialized form of an assignment.
//!
//! Handles are only meaningful inside the network that issued them, so a
//! record identifies variables by name. Saving skips variables with an empty
//! or duplicate name; loading skips record entries whose name is not tracked
//! by the target assignment.

use std::fs;
use std::path::Path;

use cpforge_core::{CpForgeError, Result, VariableNetwork};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::element::{IntVarElement, IntervalVarElement, VarElement};
use super::snapshot::Assignment;

fn default_active() -> bool {
    true
}

/// Saved bounds of a named integer variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntVarRecord {
    pub name: String,
    pub min: i64,
    pub max: i64,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl IntVarRecord {
    fn from_element(name: String, element: &IntVarElement) -> Self {
        Self {
            name,
            min: element.min(),
            max: element.max(),
            active: element.activated(),
        }
    }

    fn apply_to(&self, element: &mut IntVarElement) {
        element.set_range(self.min, self.max);
        set_active(element, self.active);
    }
}

/// Saved bounds of a named interval variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalVarRecord {
    pub name: String,
    pub start_min: i64,
    pub start_max: i64,
    pub duration_min: i64,
    pub duration_max: i64,
    pub end_min: i64,
    pub end_max: i64,
    pub performed_min: i64,
    pub performed_max: i64,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl IntervalVarRecord {
    fn from_element(name: String, element: &IntervalVarElement) -> Self {
        Self {
            name,
            start_min: element.start_min(),
            start_max: element.start_max(),
            duration_min: element.duration_min(),
            duration_max: element.duration_max(),
            end_min: element.end_min(),
            end_max: element.end_max(),
            performed_min: element.performed_min(),
            performed_max: element.performed_max(),
            active: element.activated(),
        }
    }

    fn apply_to(&self, element: &mut IntervalVarElement) {
        element.set_start_range(self.start_min, self.start_max);
        element.set_duration_range(self.duration_min, self.duration_max);
        element.set_end_range(self.end_min, self.end_max);
        element.set_performed_range(self.performed_min, self.performed_max);
        set_active(element, self.active);
    }
}

fn set_active<E: VarElement>(element: &mut E, active: bool) {
    if active {
        element.activate();
    } else {
        element.deactivate();
    }
}

/// Serialized assignment.
///
/// # Example
///
/// ```
/// use cpforge_solver::AssignmentRecord;
///
/// let record = AssignmentRecord::from_yaml_str(r#"
/// int_vars:
///   - name: x
///     min: 3
///     max: 3
/// "#).unwrap();
///
/// assert_eq!(record.int_vars[0].name, "x");
/// assert!(record.int_vars[0].active);
/// assert!(record.objective.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    #[serde(default)]
    pub int_vars: Vec<IntVarRecord>,
    #[serde(default)]
    pub interval_vars: Vec<IntervalVarRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<IntVarRecord>,
}

impl AssignmentRecord {
    /// Returns the number of saved variables, objective excluded.
    pub fn len(&self) -> usize {
        self.int_vars.len() + self.interval_vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0 && self.objective.is_none()
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| CpForgeError::Record(e.to_string()))
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        serde_yaml::from_str(s).map_err(|e| CpForgeError::Record(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| CpForgeError::Record(e.to_string()))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| CpForgeError::Record(e.to_string()))
    }

    /// Writes the record to `path`, as TOML for a `.toml` extension and as
    /// YAML otherwise.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = if is_toml(path) {
            self.to_toml_string()?
        } else {
            self.to_yaml_string()?
        };
        fs::write(path, contents)
            .map_err(|e| CpForgeError::Record(format!("{}: {e}", path.display())))
    }

    /// Reads a record from `path`, choosing the format like
    /// [`save_to_file`](Self::save_to_file).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| CpForgeError::Record(format!("{}: {e}", path.display())))?;
        if is_toml(path) {
            Self::from_toml_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "toml")
}

impl Assignment {
    /// Writes every named element and the objective into a record.
    pub fn save<N: VariableNetwork + ?Sized>(&self, network: &N) -> AssignmentRecord {
        let ints = self.int_var_container();
        let intervals = self.interval_var_container();
        let int_vars: Vec<_> = ints
            .named_positions(network)
            .into_iter()
            .filter_map(|(name, position)| {
                ints.element_at(position)
                    .map(|e| IntVarRecord::from_element(name, e))
            })
            .collect();
        let interval_vars: Vec<_> = intervals
            .named_positions(network)
            .into_iter()
            .filter_map(|(name, position)| {
                intervals
                    .element_at(position)
                    .map(|e| IntervalVarRecord::from_element(name, e))
            })
            .collect();
        let objective = self.objective_element().and_then(|e| {
            let name = e.var_name(network);
            if name.is_empty() {
                info!(
                    event = "name_skipped",
                    kind = "objective",
                    "Cannot save objective with empty name; objective will be ignored"
                );
                None
            } else {
                Some(IntVarRecord::from_element(name.to_string(), e))
            }
        });
        debug!(
            event = "assignment_save",
            int_vars = int_vars.len(),
            interval_vars = interval_vars.len(),
            has_objective = objective.is_some(),
        );
        AssignmentRecord {
            int_vars,
            interval_vars,
            objective,
        }
    }

    /// Overwrites tracked elements from `record`, matching by name.
    ///
    /// Only bounds and activation change; no element is added. Returns the
    /// number of elements updated, objective included.
    pub fn load<N: VariableNetwork + ?Sized>(
        &mut self,
        record: &AssignmentRecord,
        network: &N,
    ) -> usize {
        let mut loaded = 0;

        {
            let mut ints = self.int_var_container_mut().name_to_element_map(network);
            for entry in &record.int_vars {
                match ints.get_mut(entry.name.as_str()) {
                    Some(element) => {
                        entry.apply_to(element);
                        loaded += 1;
                    }
                    None => info!(
                        event = "record_entry_skipped",
                        kind = "int",
                        name = %entry.name,
                        "Variable not found in assignment; record entry ignored"
                    ),
                }
            }
        }

        {
            let mut intervals = self
                .interval_var_container_mut()
                .name_to_element_map(network);
            for entry in &record.interval_vars {
                match intervals.get_mut(entry.name.as_str()) {
                    Some(element) => {
                        entry.apply_to(element);
                        loaded += 1;
                    }
                    None => info!(
                        event = "record_entry_skipped",
                        kind = "interval",
                        name = %entry.name,
                        "Interval variable not found in assignment; record entry ignored"
                    ),
                }
            }
        }

        if let Some(entry) = &record.objective {
            match self.objective_element_mut() {
                Some(objective) if objective.var_name(network) == entry.name => {
                    entry.apply_to(objective);
                    loaded += 1;
                }
                _ => info!(
                    event = "record_entry_skipped",
                    kind = "objective",
                    name = %entry.name,
                    "Objective does not match this assignment; record entry ignored"
                ),
            }
        }

        debug!(event = "assignment_load", loaded);
        loaded
    }
}
