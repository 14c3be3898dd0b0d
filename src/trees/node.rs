use crate::data::Record;
use crate::error::{Id3Error, Result};
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

/// Decision tree node
///
/// A node owns the training records that reached it. It is a leaf iff
/// `children` is empty, and `split_attribute` is set iff it is internal.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub(crate) instances: Vec<Record>,
    pub(crate) split_attribute: Option<String>,
    pub(crate) children: BTreeMap<String, Node>,
}

/// Receives the shape of a tree, one node at a time.
///
/// Implementors decide whether to descend by calling [`Node::accept`] on the
/// children handed to `visit_internal`.
pub trait TreeVisitor {
    fn visit_internal(&mut self, attribute: &str, children: &BTreeMap<String, Node>) -> Result<()>;
    fn visit_leaf(&mut self, label: &str) -> Result<()>;
}

impl Node {
    pub fn new(instances: Vec<Record>) -> Self {
        Self {
            instances,
            split_attribute: None,
            children: BTreeMap::new(),
        }
    }

    pub fn instances(&self) -> &[Record] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn split_attribute(&self) -> Option<&str> {
        self.split_attribute.as_deref()
    }

    pub fn children(&self) -> &BTreeMap<String, Node> {
        &self.children
    }

    pub fn child(&self, value: &str) -> Option<&Node> {
        self.children.get(value)
    }

    /// Number of edges on the longest path from this node down to a leaf.
    pub fn depth(&self) -> usize {
        self.children
            .values()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            return 1;
        }
        self.children.values().map(Node::leaf_count).sum()
    }

    /// Shannon entropy (in nats) of the attribute at `label_index` over this
    /// node's instances. Values of `domain` that never occur contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns `EmptyNode` if the node holds no instances and
    /// `IndexOutOfBounds` if `label_index` is outside the records.
    pub fn entropy(&self, label_index: usize, domain: &[String]) -> Result<f64> {
        if self.instances.is_empty() {
            return Err(Id3Error::EmptyNode);
        }
        let total = self.instances.len() as f64;
        let mut entropy = 0.0;
        for value in domain {
            let count = self.count_matching(label_index, value)?;
            if count > 0 {
                let p = count as f64 / total;
                entropy -= p * p.ln();
            }
        }
        Ok(entropy)
    }

    /// Partitions the instances by their value of the attribute at
    /// `attribute_index`, one child per value of `domain` that occurs.
    /// Children come back in domain order and are never empty.
    pub fn partition(&self, attribute_index: usize, domain: &[String]) -> Result<Vec<(String, Node)>> {
        let mut branches = Vec::new();
        for value in domain {
            let mut subset = Vec::new();
            for instance in &self.instances {
                if instance.get(attribute_index)? == value {
                    subset.push(instance.clone());
                }
            }
            if !subset.is_empty() {
                branches.push((value.clone(), Node::new(subset)));
            }
        }
        Ok(branches)
    }

    /// Most frequent value of the attribute at `label_index` among the
    /// instances. Ties go to the value seen first.
    ///
    /// # Errors
    ///
    /// Returns `EmptyNode` if there is nothing to vote on.
    pub fn majority_label(&self, label_index: usize) -> Result<&str> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for instance in &self.instances {
            let value = instance.get(label_index)?;
            match counts.iter_mut().find(|(seen, _)| *seen == value) {
                Some((_, count)) => *count += 1,
                None => counts.push((value, 1)),
            }
        }

        let mut best: Option<(&str, usize)> = None;
        for (value, count) in counts {
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((value, count));
            }
        }
        best.map(|(value, _)| value).ok_or(Id3Error::EmptyNode)
    }

    /// Walks down from this node following `record`'s values and returns the
    /// majority label where the walk stops.
    ///
    /// The walk stops at a leaf, or earlier when the split attribute is not in
    /// `schema` or the record's value was never seen under this node.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `schema` points past the end of `record`.
    pub fn predict(
        &self,
        record: &Record,
        schema: &HashMap<String, usize>,
        label_index: usize,
    ) -> Result<&str> {
        let mut node = self;
        while let Some(attribute) = node.split_attribute.as_deref() {
            let value = schema
                .get(attribute)
                .map(|&index| record.get(index))
                .transpose()?;
            match value.and_then(|value| node.children.get(value)) {
                Some(child) => node = child,
                None => {
                    trace!(attribute, ?value, "no matching branch, voting at inner node");
                    break;
                }
            }
        }
        node.majority_label(label_index)
    }

    pub fn accept<V: TreeVisitor>(&self, label_index: usize, visitor: &mut V) -> Result<()> {
        match self.split_attribute.as_deref() {
            Some(attribute) if !self.is_leaf() => visitor.visit_internal(attribute, &self.children),
            _ => visitor.visit_leaf(self.majority_label(label_index)?),
        }
    }

    fn count_matching(&self, index: usize, value: &str) -> Result<usize> {
        let mut count = 0;
        for instance in &self.instances {
            if instance.get(index)? == value {
                count += 1;
            }
        }
        Ok(count)
    }
}
