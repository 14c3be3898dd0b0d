use crate::error::{Id3Error, Result};

/// Tolerance under which a node's entropy counts as zero.
pub const DEFAULT_EPSILON: f64 = 1e-8;

#[derive(Clone, Debug)]
pub struct Id3Params {
    pub epsilon: f64,
}

impl Default for Id3Params {
    fn default() -> Self {
        Self::new()
    }
}

impl Id3Params {
    pub fn new() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }

    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(Id3Error::InvalidParameter(
                "The entropy tolerance must be a positive, finite number.".into(),
            ));
        }
        self.epsilon = epsilon;
        Ok(())
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_epsilon() {
        assert_eq!(Id3Params::default().epsilon(), DEFAULT_EPSILON);
    }

    #[test]
    fn test_set_epsilon() {
        let mut params = Id3Params::new();
        params.set_epsilon(1e-6).unwrap();
        assert_eq!(params.epsilon(), 1e-6);
        assert!(params.set_epsilon(0.0).is_err());
        assert!(params.set_epsilon(-1.0).is_err());
        assert!(params.set_epsilon(f64::NAN).is_err());
        assert_eq!(params.epsilon(), 1e-6);
    }
}
