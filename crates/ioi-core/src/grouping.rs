//! Grouping strategy: partition inputs and outputs by linking key.
//!
//! Groups come out in first-occurrence order of their key (inputs scanned
//! before outputs). The hash index only answers "which group", it is never
//! iterated, so the order is reproducible across runs and parties.

use std::collections::HashMap;
use std::hash::Hash;

/// Inputs and outputs sharing one grouping key.
#[derive(Debug, Clone, PartialEq)]
pub struct InOutGroup<'a, S, K> {
    pub grouping_key: K,
    pub inputs: Vec<&'a S>,
    pub outputs: Vec<&'a S>,
}

impl<'a, S, K> InOutGroup<'a, S, K> {
    fn new(grouping_key: K) -> Self {
        Self {
            grouping_key,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty()
    }
}

/// Split `inputs` and `outputs` into groups keyed by `key_of`.
///
/// Every state lands in exactly one group and no empty group is produced.
/// An output whose key matches no input forms a group of its own.
pub fn group_states<'a, S, K, F>(
    inputs: &'a [S],
    outputs: &'a [S],
    key_of: F,
) -> Vec<InOutGroup<'a, S, K>>
where
    K: Eq + Hash + Clone,
    F: Fn(&S) -> K,
{
    let mut groups: Vec<InOutGroup<'a, S, K>> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();

    let mut slot = |key: K, groups: &mut Vec<InOutGroup<'a, S, K>>| -> usize {
        *index.entry(key.clone()).or_insert_with(|| {
            groups.push(InOutGroup::new(key));
            groups.len() - 1
        })
    };

    for state in inputs {
        let at = slot(key_of(state), &mut groups);
        groups[at].inputs.push(state);
    }

    for state in outputs {
        let at = slot(key_of(state), &mut groups);
        groups[at].outputs.push(state);
    }

    groups
}
