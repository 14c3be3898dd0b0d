use crate::error::{Id3Error, Result};
use std::fmt::{self, Display, Formatter};

/// A single row of categorical values, addressed by attribute index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    values: Vec<String>,
}

impl Record {
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Returns the value stored at `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `index` is not in `[0, len)`.
    pub fn get(&self, index: usize) -> Result<&str> {
        self.values
            .get(index)
            .map(String::as_str)
            .ok_or(Id3Error::IndexOutOfBounds {
                index,
                len: self.values.len(),
            })
    }

    /// Overwrites the value stored at `index`. The record length never changes.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `index` is not in `[0, len)`.
    pub fn set(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        let len = self.values.len();
        let slot = self
            .values
            .get_mut(index)
            .ok_or(Id3Error::IndexOutOfBounds { index, len })?;
        *slot = value.into();
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for Record {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.values.join(", "))
    }
}
