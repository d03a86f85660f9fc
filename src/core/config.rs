// flatten settings, loadable from TOON text
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::flatten::VisitBudget;
use crate::core::list::{ListError, MultilevelList};
use crate::core::types::{NodeId, Strategy};

/// How [`MultilevelList::flatten_with`] runs.
///
/// ```text
/// strategy: work_stack
/// visit_limit: 10000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenConfig {
    pub strategy: Strategy,
    /// Fail with `VisitLimitExceeded` after visiting this many nodes. Unset means no
    /// guard, so cyclic input never returns.
    pub visit_limit: Option<usize>,
}

impl FlattenConfig {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy, visit_limit: None }
    }

    pub fn with_visit_limit(mut self, limit: usize) -> Self {
        self.visit_limit = Some(limit);
        self
    }

    pub fn from_toon(text: &str) -> Result<Self, ListError> {
        toon_format::decode_default::<FlattenConfig>(text).map_err(|e| ListError::Config(e.to_string()))
    }

    pub fn to_toon(&self) -> Result<String, ListError> {
        toon_format::encode_default(self).map_err(|e| ListError::Config(e.to_string()))
    }
}

impl MultilevelList {
    /// Flatten with the strategy and visit limit from `config`.
    ///
    /// When the limit trips, nothing reachable from `root` is lost. `WorkStack` restores the
    /// list exactly. `Recursive` may leave inner levels already spliced, but what's left is
    /// still a valid multilevel list with the same pre-order, so it can be flattened again.
    pub fn flatten_with(&mut self, root: Option<NodeId>, config: &FlattenConfig) -> Result<Option<NodeId>, ListError> {
        debug!(strategy = ?config.strategy, limit = ?config.visit_limit, "flatten_with");
        let budget = VisitBudget::new(config.visit_limit);

        match config.strategy {
            Strategy::Recursive => self.flatten_recursive(root, budget),
            Strategy::WorkStack => self.flatten_work_stack(root, budget),
        }
    }
}
