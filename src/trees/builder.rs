//! Recursive ID3 induction.
use super::node::Node;
use super::observer::{BuildEvent, BuildObserver};
use crate::data::Dataset;
use crate::error::Result;

/// Best split found for a node while scanning the candidate attributes.
pub(crate) struct SplitData {
    pub attribute_index: usize,
    pub information_gain: f64,
    pub branches: Vec<(String, Node)>,
}

/// Grows a tree over the records of `dataset`, choosing at every node the
/// unused attribute with the highest information gain on the goal attribute.
pub(crate) struct TreeBuilder<'a> {
    dataset: &'a Dataset,
    goal_index: usize,
    goal_domain: &'a [String],
    epsilon: f64,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(dataset: &'a Dataset, epsilon: f64) -> Result<Self> {
        let goal_index = dataset.goal_index();
        Ok(Self {
            dataset,
            goal_index,
            goal_domain: dataset.domain(goal_index)?,
            epsilon,
        })
    }

    /// Every attribute except the goal, in schema order.
    pub fn initial_candidates(&self) -> Vec<usize> {
        (0..self.dataset.attributes().len())
            .filter(|&index| index != self.goal_index)
            .collect()
    }

    /// Expands `node` in place until every leaf below it is pure or has no
    /// candidate attribute left that splits it with positive gain.
    pub fn grow<O: BuildObserver + ?Sized>(
        &self,
        node: &mut Node,
        candidates: &[usize],
        depth: usize,
        observer: &mut O,
    ) -> Result<()> {
        let entropy = node.entropy(self.goal_index, self.goal_domain)?;
        observer.on_event(&BuildEvent::NodeEntropy {
            depth,
            instances: node.len(),
            entropy,
        });
        if entropy.abs() < self.epsilon {
            observer.on_event(&BuildEvent::PureLeaf { depth });
            return Ok(());
        }

        let best_split = match self.best_split(node, entropy, candidates, depth, observer)? {
            Some(split) => split,
            None => {
                observer.on_event(&BuildEvent::Exhausted { depth });
                return Ok(());
            }
        };

        let attribute = self.dataset.attribute_name(best_split.attribute_index)?;
        observer.on_event(&BuildEvent::AttributeSelected {
            depth,
            attribute,
            gain: best_split.information_gain,
        });

        let remaining = candidates
            .iter()
            .copied()
            .filter(|&index| index != best_split.attribute_index)
            .collect::<Vec<_>>();
        node.split_attribute = Some(attribute.to_string());
        for (value, mut child) in best_split.branches {
            observer.on_event(&BuildEvent::Descend {
                depth,
                attribute,
                value: &value,
            });
            self.grow(&mut child, &remaining, depth + 1, observer)?;
            node.children.insert(value, child);
        }
        Ok(())
    }

    /// Scans `candidates` in order and keeps the first split with the strictly
    /// highest positive gain.
    fn best_split<O: BuildObserver + ?Sized>(
        &self,
        node: &Node,
        entropy: f64,
        candidates: &[usize],
        depth: usize,
        observer: &mut O,
    ) -> Result<Option<SplitData>> {
        let mut best_split: Option<SplitData> = None;
        let mut best_information_gain = 0.0;

        for &attribute_index in candidates {
            let attribute = self.dataset.attribute_name(attribute_index)?;
            let branches = node.partition(attribute_index, self.dataset.domain(attribute_index)?)?;
            if branches.is_empty() {
                observer.on_event(&BuildEvent::CandidateSkipped { depth, attribute });
                continue;
            }

            let information_gain = self.information_gain(node, entropy, &branches)?;
            observer.on_event(&BuildEvent::CandidateEvaluated {
                depth,
                attribute,
                gain: information_gain,
            });
            if information_gain > best_information_gain {
                best_information_gain = information_gain;
                best_split = Some(SplitData {
                    attribute_index,
                    information_gain,
                    branches,
                });
            }
        }
        Ok(best_split)
    }

    /// `H(parent) - sum(|child| / |parent| * H(child))`, weighted by the
    /// parent's own instance count.
    pub fn information_gain(
        &self,
        parent: &Node,
        parent_entropy: f64,
        branches: &[(String, Node)],
    ) -> Result<f64> {
        let num_samples = parent.len() as f64;
        let mut weighted_entropy = 0.0;
        for (_, child) in branches {
            weighted_entropy +=
                child.len() as f64 / num_samples * child.entropy(self.goal_index, self.goal_domain)?;
        }
        Ok(parent_entropy - weighted_entropy)
    }
}
