//! Ordered, identity-keyed collection of elements of one variable kind.

use std::collections::{HashMap, HashSet};

use cpforge_core::{CpForgeError, Result, VariableNetwork};
use tracing::info;

use super::element::VarElement;

/// Elements of one kind in insertion order, indexed by variable handle.
///
/// Each handle appears at most once when elements are added through
/// [`add`](Self::add). [`fast_add`](Self::fast_add) skips the duplicate check;
/// if the caller adds a handle twice that way, lookups resolve to the most
/// recently added element while [`store`](Self::store) and
/// [`restore`](Self::restore) still visit both.
#[derive(Debug, Clone)]
pub struct AssignmentContainer<E: VarElement> {
    elements: Vec<E>,
    index: HashMap<E::Var, usize>,
}

impl<E: VarElement> Default for AssignmentContainer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: VarElement> AssignmentContainer<E> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Creates a container holding one element per distinct variable of `vars`.
    pub fn from_vars(vars: impl IntoIterator<Item = E::Var>) -> Self {
        let mut container = Self::new();
        container.add_all(vars);
        container
    }

    /// Returns the element for `var`, appending a fresh one if absent.
    ///
    /// An existing element is returned unchanged.
    pub fn add(&mut self, var: E::Var) -> &mut E {
        match self.index.get(&var) {
            Some(&position) => &mut self.elements[position],
            None => self.fast_add(var),
        }
    }

    /// Appends a fresh element for `var` without checking for duplicates.
    pub fn fast_add(&mut self, var: E::Var) -> &mut E {
        let position = self.elements.len();
        self.elements.push(E::new(var));
        self.index.insert(var, position);
        &mut self.elements[position]
    }

    /// Adds every variable of `vars` in order; duplicates collapse.
    pub fn add_all(&mut self, vars: impl IntoIterator<Item = E::Var>) {
        for var in vars {
            self.add(var);
        }
    }

    /// Returns the element for `var`, or `None` if it is not tracked.
    pub fn find(&self, var: E::Var) -> Option<&E> {
        self.index.get(&var).map(|&position| &self.elements[position])
    }

    /// Returns the element for `var`.
    ///
    /// # Errors
    ///
    /// Returns [`CpForgeError::VariableNotTracked`] if `var` was never added.
    pub fn element(&self, var: E::Var) -> Result<&E> {
        self.find(var).ok_or_else(|| not_tracked::<E>(var))
    }

    /// Returns the element for `var` for mutation.
    ///
    /// # Errors
    ///
    /// Returns [`CpForgeError::VariableNotTracked`] if `var` was never added.
    pub fn mutable_element(&mut self, var: E::Var) -> Result<&mut E> {
        match self.index.get(&var) {
            Some(&position) => Ok(&mut self.elements[position]),
            None => Err(not_tracked::<E>(var)),
        }
    }

    /// Returns the element at `position` in insertion order.
    pub fn element_at(&self, position: usize) -> Option<&E> {
        self.elements.get(position)
    }

    #[inline]
    pub fn contains(&self, var: E::Var) -> bool {
        self.index.contains_key(&var)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates elements in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.elements.iter()
    }

    /// Captures the live state of every tracked variable.
    pub fn store<N: VariableNetwork + ?Sized>(&mut self, network: &N) {
        for element in &mut self.elements {
            element.store(network);
        }
    }

    /// Writes every active element back onto its variable.
    ///
    /// Returns the number of elements restored. Stops at the first failing
    /// write.
    pub fn restore<N: VariableNetwork + ?Sized>(&self, network: &mut N) -> Result<usize> {
        let mut restored = 0;
        for element in self.elements.iter().filter(|e| e.activated()) {
            element.restore(network)?;
            restored += 1;
        }
        Ok(restored)
    }

    /// Checks the invariants of every active element.
    pub fn validate(&self) -> Result<()> {
        self.elements
            .iter()
            .filter(|e| e.activated())
            .try_for_each(|e| e.validate())
    }

    /// Checks the invariants of every element, active or not.
    pub fn validate_all(&self) -> Result<()> {
        self.elements.iter().try_for_each(|e| e.validate())
    }

    /// Copies bounds and activation for every variable tracked by both
    /// containers. Variables tracked by only one side are left untouched.
    pub fn copy_from(&mut self, other: &Self) {
        for source in &other.elements {
            if let Some(&position) = self.index.get(&source.var()) {
                self.elements[position].copy_from(source);
            }
        }
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.index.clear();
    }

    /// Returns `(name, position)` for every element addressable by name, in
    /// insertion order.
    ///
    /// Elements whose variable has an empty name are skipped. When several
    /// variables share a name only the first one is kept. Both cases are
    /// reported through `tracing` and are otherwise silent.
    pub(crate) fn named_positions<N: VariableNetwork + ?Sized>(
        &self,
        network: &N,
    ) -> Vec<(String, usize)> {
        let mut seen = HashSet::new();
        let mut named = Vec::with_capacity(self.elements.len());
        for (position, element) in self.elements.iter().enumerate() {
            let name = element.var_name(network);
            if name.is_empty() {
                info!(
                    event = "name_skipped",
                    kind = %E::KIND,
                    index = E::var_index(element.var()),
                    "Cannot save/load variables with empty name; variable will be ignored"
                );
            } else if !seen.insert(name) {
                info!(
                    event = "name_skipped",
                    kind = %E::KIND,
                    name,
                    "Cannot save/load variables with duplicate names; variable will be ignored"
                );
            } else {
                named.push((name.to_string(), position));
            }
        }
        named
    }

    /// Builds a map from variable name to element.
    ///
    /// See [`named_positions`](Self::named_positions) for the treatment of
    /// empty and duplicate names.
    pub fn name_to_element_map<N: VariableNetwork + ?Sized>(
        &mut self,
        network: &N,
    ) -> HashMap<String, &mut E> {
        let mut names: HashMap<usize, String> = self
            .named_positions(network)
            .into_iter()
            .map(|(name, position)| (position, name))
            .collect();
        self.elements
            .iter_mut()
            .enumerate()
            .filter_map(|(position, element)| names.remove(&position).map(|name| (name, element)))
            .collect()
    }
}

impl<'a, E: VarElement> IntoIterator for &'a AssignmentContainer<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

fn not_tracked<E: VarElement>(var: E::Var) -> CpForgeError {
    CpForgeError::VariableNotTracked {
        kind: E::KIND,
        index: E::var_index(var),
    }
}

#[cfg(test)]
#[path = "container_tests.rs"]
mod tests;
