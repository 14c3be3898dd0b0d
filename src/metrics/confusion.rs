use crate::error::{Id3Error, Result};
use nalgebra::DMatrix;
use std::collections::HashMap;

/// Counts indexed by (true class, predicted class).
pub type ConfusionMatrix = DMatrix<usize>;

pub trait ClassificationMetrics {
    /// Computes the confusion matrix based on the true labels and predicted labels.
    ///
    /// # Arguments
    ///
    /// * `y_true` - The true labels.
    /// * `y_pred` - The predicted labels.
    ///
    /// # Returns
    ///
    /// The sorted class labels together with the confusion matrix whose rows
    /// and columns follow that order.
    fn confusion_matrix(
        &self,
        y_true: &[String],
        y_pred: &[String],
    ) -> Result<(Vec<String>, ConfusionMatrix)> {
        if y_true.len() != y_pred.len() {
            return Err(Id3Error::LengthMismatch {
                expected: y_true.len(),
                actual: y_pred.len(),
            });
        }
        if y_true.is_empty() {
            return Err(Id3Error::EmptyDataset);
        }

        let mut classes = y_true.iter().chain(y_pred).cloned().collect::<Vec<_>>();
        classes.sort();
        classes.dedup();

        let positions = classes
            .iter()
            .enumerate()
            .map(|(position, class)| (class.as_str(), position))
            .collect::<HashMap<_, _>>();

        let mut matrix = DMatrix::zeros(classes.len(), classes.len());
        for (y_t, y_p) in y_true.iter().zip(y_pred) {
            matrix[(positions[y_t.as_str()], positions[y_p.as_str()])] += 1;
        }

        Ok((classes, matrix))
    }

    /// Computes the accuracy based on the true labels and predicted labels.
    fn accuracy(&self, y_true: &[String], y_pred: &[String]) -> Result<f64> {
        let (_, matrix) = self.confusion_matrix(y_true, y_pred)?;
        let correct: usize = matrix.diagonal().iter().sum();
        Ok(correct as f64 / y_true.len() as f64)
    }

    /// Computes the macro-averaged precision based on the true labels and predicted labels.
    fn precision(&self, y_true: &[String], y_pred: &[String]) -> Result<f64> {
        let (classes, matrix) = self.confusion_matrix(y_true, y_pred)?;

        let mut precision_total = 0.0;
        for class in 0..classes.len() {
            let tp = matrix[(class, class)];
            let predicted = matrix.column(class).sum();
            if predicted > 0 {
                precision_total += tp as f64 / predicted as f64;
            }
        }
        Ok(precision_total / classes.len() as f64)
    }

    /// Computes the macro-averaged recall based on the true labels and predicted labels.
    fn recall(&self, y_true: &[String], y_pred: &[String]) -> Result<f64> {
        let (classes, matrix) = self.confusion_matrix(y_true, y_pred)?;

        let mut recall_total = 0.0;
        for class in 0..classes.len() {
            let tp = matrix[(class, class)];
            let actual = matrix.row(class).sum();
            if actual > 0 {
                recall_total += tp as f64 / actual as f64;
            }
        }
        Ok(recall_total / classes.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct Metrics;
    impl ClassificationMetrics for Metrics {}

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn test_confusion_matrix() {
        let y_true = labels(&["No", "No", "Yes", "Yes"]);
        let y_pred = labels(&["No", "Yes", "Yes", "Yes"]);
        let (classes, matrix) = Metrics.confusion_matrix(&y_true, &y_pred).unwrap();

        assert_eq!(classes, ["No", "Yes"]);
        assert_eq!(matrix, DMatrix::from_row_slice(2, 2, &[1, 1, 0, 2]));
    }

    #[test]
    fn test_confusion_matrix_with_unseen_prediction() {
        let y_true = labels(&["a", "b"]);
        let y_pred = labels(&["a", "c"]);
        let (classes, matrix) = Metrics.confusion_matrix(&y_true, &y_pred).unwrap();

        assert_eq!(classes, ["a", "b", "c"]);
        assert_eq!(matrix[(1, 2)], 1);
        assert_eq!(matrix.sum(), 2);
    }

    #[test]
    fn test_confusion_matrix_counts_every_pair_once() {
        let y_true = labels(&["c", "a", "b", "c", "a"]);
        let y_pred = labels(&["a", "a", "c", "c", "b"]);
        let (classes, matrix) = Metrics.confusion_matrix(&y_true, &y_pred).unwrap();

        assert_eq!(classes, ["a", "b", "c"]);
        assert_eq!(
            matrix,
            DMatrix::from_row_slice(3, 3, &[1, 1, 0, 0, 0, 1, 1, 0, 1])
        );
    }

    #[test]
    fn test_confusion_matrix_different_sizes() {
        let result = Metrics.confusion_matrix(&labels(&["a"]), &labels(&["a", "b"]));
        assert!(matches!(result, Err(Id3Error::LengthMismatch { expected: 1, actual: 2 })));
        assert!(Metrics.accuracy(&[], &[]).is_err());
    }

    #[test]
    fn test_accuracy_precision_recall() {
        let y_true = labels(&["No", "No", "Yes", "Yes"]);
        let y_pred = labels(&["No", "Yes", "Yes", "Yes"]);

        assert_relative_eq!(Metrics.accuracy(&y_true, &y_pred).unwrap(), 0.75);
        assert_relative_eq!(
            Metrics.precision(&y_true, &y_pred).unwrap(),
            (1.0 + 2.0 / 3.0) / 2.0
        );
        assert_relative_eq!(Metrics.recall(&y_true, &y_pred).unwrap(), (0.5 + 1.0) / 2.0);
    }
}
