//! Hooks into the decision points of tree induction.
use tracing::debug;

/// A decision made while growing the tree. `depth` is 0 at the root.
#[derive(Clone, Debug, PartialEq)]
pub enum BuildEvent<'a> {
    /// Entropy of the node about to be expanded.
    NodeEntropy {
        depth: usize,
        instances: usize,
        entropy: f64,
    },
    /// The node's labels are pure, it stays a leaf.
    PureLeaf { depth: usize },
    /// A candidate attribute split the node with the given information gain.
    CandidateEvaluated {
        depth: usize,
        attribute: &'a str,
        gain: f64,
    },
    /// A candidate attribute had no value present among the node's instances.
    CandidateSkipped { depth: usize, attribute: &'a str },
    AttributeSelected {
        depth: usize,
        attribute: &'a str,
        gain: f64,
    },
    /// No candidate improves on the node, it stays a leaf.
    Exhausted { depth: usize },
    /// Recursion into the branch `attribute = value`.
    Descend {
        depth: usize,
        attribute: &'a str,
        value: &'a str,
    },
}

pub trait BuildObserver {
    fn on_event(&mut self, event: &BuildEvent<'_>);
}

impl<F> BuildObserver for F
where
    F: FnMut(&BuildEvent<'_>),
{
    fn on_event(&mut self, event: &BuildEvent<'_>) {
        self(event)
    }
}

/// Forwards every build event to `tracing` at debug level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl BuildObserver for TracingObserver {
    fn on_event(&mut self, event: &BuildEvent<'_>) {
        match *event {
            BuildEvent::NodeEntropy {
                depth,
                instances,
                entropy,
            } => debug!(depth, instances, entropy, "go deeper"),
            BuildEvent::PureLeaf { depth } => debug!(depth, "node is pure, no branching needed"),
            BuildEvent::CandidateEvaluated {
                depth,
                attribute,
                gain,
            } => debug!(depth, attribute, gain, "checked attribute"),
            BuildEvent::CandidateSkipped { depth, attribute } => {
                debug!(depth, attribute, "attribute does not have branches")
            }
            BuildEvent::AttributeSelected {
                depth,
                attribute,
                gain,
            } => debug!(depth, attribute, gain, "best attribute"),
            BuildEvent::Exhausted { depth } => debug!(depth, "no attribute left to split on"),
            BuildEvent::Descend {
                depth,
                attribute,
                value,
            } => debug!(depth, attribute, value, "check the path"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl BuildObserver for NoopObserver {
    fn on_event(&mut self, _event: &BuildEvent<'_>) {}
}
