//! ID3 Decision Tree Classifier
use super::builder::TreeBuilder;
use super::node::Node;
use super::observer::{BuildObserver, TracingObserver};
use super::params::Id3Params;
use super::render::TreeRenderer;
use crate::data::{Dataset, Record};
use crate::error::{Id3Error, Result};
use crate::metrics::confusion::ClassificationMetrics;
use rayon::prelude::*;
use tracing::info;

/// Trained goal attribute: its name and its index in the training schema.
#[derive(Clone, Debug)]
struct Goal {
    name: String,
    index: usize,
}

/// Decision tree classifier for categorical data, grown with ID3.
#[derive(Clone, Debug, Default)]
pub struct Id3Classifier {
    root: Option<Node>,
    goal: Option<Goal>,
    params: Id3Params,
}

impl ClassificationMetrics for Id3Classifier {}

impl Id3Classifier {
    /// Creates an untrained classifier with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: Id3Params) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    pub fn params(&self) -> &Id3Params {
        &self.params
    }

    /// Root of the trained tree, `None` before `fit`.
    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Name of the goal attribute the tree was trained on.
    pub fn goal_attribute(&self) -> Option<&str> {
        self.goal.as_ref().map(|goal| goal.name.as_str())
    }

    /// Builds the decision tree from a dataset, reporting every decision to
    /// `tracing`.
    ///
    /// # Arguments
    ///
    /// * `dataset` - Training records; its goal attribute holds the labels.
    ///
    /// # Errors
    ///
    /// Fails if the dataset is structurally invalid or has no records.
    pub fn fit(&mut self, dataset: &Dataset) -> Result<String> {
        self.fit_with_observer(dataset, &mut TracingObserver)
    }

    /// Builds the decision tree, reporting every decision to `observer`.
    pub fn fit_with_observer<O: BuildObserver + ?Sized>(
        &mut self,
        dataset: &Dataset,
        observer: &mut O,
    ) -> Result<String> {
        dataset.validate()?;
        if dataset.is_empty() {
            return Err(Id3Error::EmptyDataset);
        }

        let builder = TreeBuilder::new(dataset, self.params.epsilon())?;
        let mut root = Node::new(dataset.records().to_vec());
        builder.grow(&mut root, &builder.initial_candidates(), 0, observer)?;

        info!(
            goal = dataset.goal_attribute(),
            depth = root.depth(),
            leaves = root.leaf_count(),
            "built ID3 tree"
        );
        self.root = Some(root);
        self.goal = Some(Goal {
            name: dataset.goal_attribute().to_string(),
            index: dataset.goal_index(),
        });
        Ok("Finished building the tree.".into())
    }

    /// Predicts the goal attribute of every record in `dataset`, overwriting
    /// its goal column in place.
    ///
    /// The dataset's goal is switched to the trained goal attribute first. If
    /// its schema has no such attribute, nothing is written.
    ///
    /// # Errors
    ///
    /// This method will return an error if the tree wasn't built yet, the
    /// dataset is malformed or it lacks the trained goal attribute. Labels are
    /// resolved for every record before any of them is written.
    pub fn predict(&self, dataset: &mut Dataset) -> Result<()> {
        let (root, goal) = self.trained()?;
        dataset.validate()?;
        dataset.set_goal_attribute(&goal.name)?;
        let target_index = dataset.goal_index();

        let (schema, records) = dataset.schema_and_records_mut();
        let labels = records
            .par_iter()
            .map(|record| root.predict(record, schema, goal.index))
            .collect::<Result<Vec<_>>>()?;
        for (record, label) in records.iter_mut().zip(labels) {
            record.set(target_index, label)?;
        }
        dataset.rebuild_domain(target_index)?;

        info!(records = dataset.len(), goal = %goal.name, "predicted");
        Ok(())
    }

    /// Predicts the goal value of one record laid out in `schema`'s attribute
    /// order, without modifying it.
    ///
    /// # Errors
    ///
    /// Returns `RowLength` if the record doesn't have one value per attribute
    /// of `schema`.
    pub fn predict_record(&self, record: &Record, schema: &Dataset) -> Result<String> {
        let (root, goal) = self.trained()?;
        if record.len() != schema.attributes().len() {
            return Err(Id3Error::RowLength {
                row: 1,
                expected: schema.attributes().len(),
                actual: record.len(),
            });
        }
        root.predict(record, schema.attribute_map(), goal.index)
            .map(str::to_string)
    }

    /// Renders the trained tree as indented text.
    pub fn render(&self) -> Result<String> {
        let (root, goal) = self.trained()?;
        TreeRenderer::render(root, goal.index)
    }

    fn trained(&self) -> Result<(&Node, &Goal)> {
        match (&self.root, &self.goal) {
            (Some(root), Some(goal)) => Ok((root, goal)),
            _ => Err(Id3Error::NotFitted),
        }
    }
}
