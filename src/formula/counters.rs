use super::{BoxedCounter, FormulaId, RegisteredFormula};
use crate::core::Result;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Counters accumulated for one open tree level, at most one per formula.
///
/// A formula without an entry had no contributing file under this level.
/// That is not an error; the executor skips such formulas.
#[derive(Default)]
pub(crate) struct Counters {
    by_formula: HashMap<FormulaId, BoxedCounter>,
}

impl Counters {
    /// Merge a child's counter. The first contribution is stored as is.
    pub(crate) fn aggregate(&mut self, formula: &RegisteredFormula, child: BoxedCounter) -> Result<()> {
        match self.by_formula.entry(formula.id().clone()) {
            Entry::Occupied(mut entry) => formula.inner().aggregate_counter(entry.get_mut(), child),
            Entry::Vacant(entry) => {
                entry.insert(child);
                Ok(())
            }
        }
    }

    /// Remove the counter of a formula, if any descendant contributed.
    pub(crate) fn take(&mut self, formula: &FormulaId) -> Option<BoxedCounter> {
        self.by_formula.remove(formula)
    }

    pub(crate) fn len(&self) -> usize {
        self.by_formula.len()
    }
}
