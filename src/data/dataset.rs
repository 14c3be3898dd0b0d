use super::record::Record;
use crate::error::{Id3Error, Result};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use std::collections::{HashMap, HashSet};
use std::fmt::{self, Debug, Formatter};
use std::io;
use std::path::Path;

/// Outcome of resolving an attribute name against a schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeSlot {
    Present(usize),
    Absent,
}

/// Table of categorical records with a designated goal (label) attribute.
///
/// Every record has exactly one value per attribute, and `domain(i)` holds the
/// distinct values of column `i` in the order they were first seen.
#[derive(Clone)]
pub struct Dataset {
    attributes: Vec<String>,
    attribute_index: HashMap<String, usize>,
    goal_index: usize,
    domains: Vec<Vec<String>>,
    records: Vec<Record>,
}

impl Debug for Dataset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset {{")?;
        writeln!(f, "    attributes: {:?},", self.attributes)?;
        writeln!(f, "    goal: {:?},", self.goal_attribute())?;
        writeln!(f, "    records: [")?;
        for record in &self.records {
            writeln!(f, "        {},", record)?;
        }
        write!(f, "    ]\n}}")
    }
}

impl Dataset {
    /// Creates an empty dataset over the given attribute names. The last
    /// attribute becomes the goal.
    ///
    /// # Errors
    ///
    /// Fails if there are no attributes or if two attributes share a name.
    pub fn new(attributes: Vec<String>) -> Result<Self> {
        if attributes.is_empty() {
            return Err(Id3Error::NoAttributes);
        }
        let mut attribute_index = HashMap::with_capacity(attributes.len());
        for (index, name) in attributes.iter().enumerate() {
            if attribute_index.insert(name.clone(), index).is_some() {
                return Err(Id3Error::DuplicateAttribute(name.clone()));
            }
        }
        Ok(Self {
            goal_index: attributes.len() - 1,
            domains: vec![Vec::new(); attributes.len()],
            attributes,
            attribute_index,
            records: Vec::new(),
        })
    }

    /// Builds a dataset from attribute names and rows of values.
    pub fn from_rows<A, R, V>(attributes: A, rows: R) -> Result<Self>
    where
        A: IntoIterator,
        A::Item: Into<String>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let mut dataset = Self::new(attributes.into_iter().map(Into::into).collect())?;
        for row in rows {
            dataset.push(row.into_iter().collect())?;
        }
        Ok(dataset)
    }

    /// Reads a delimited table whose first row holds the attribute names.
    pub fn from_reader<R: io::Read>(reader: R, delimiter: u8) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let attributes = reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        let mut dataset = Self::new(attributes)?;

        for result in reader.records() {
            let row = result?;
            dataset.push(row.iter().collect())?;
        }
        Ok(dataset)
    }

    pub fn from_path<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(io::BufReader::new(file), delimiter)
    }

    /// Appends a record and records its values in the column domains.
    ///
    /// # Errors
    ///
    /// Returns `RowLength` if the record doesn't have one value per attribute.
    pub fn push(&mut self, record: Record) -> Result<()> {
        if record.len() != self.attributes.len() {
            return Err(Id3Error::RowLength {
                row: self.records.len() + 2,
                expected: self.attributes.len(),
                actual: record.len(),
            });
        }
        for (domain, value) in self.domains.iter_mut().zip(record.values()) {
            if !domain.contains(value) {
                domain.push(value.clone());
            }
        }
        self.records.push(record);
        Ok(())
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Attribute name to column index.
    pub fn attribute_map(&self) -> &HashMap<String, usize> {
        &self.attribute_index
    }

    pub fn attribute_slot(&self, name: &str) -> AttributeSlot {
        match self.attribute_index.get(name) {
            Some(&index) => AttributeSlot::Present(index),
            None => AttributeSlot::Absent,
        }
    }

    pub fn attribute_index(&self, name: &str) -> Result<usize> {
        match self.attribute_slot(name) {
            AttributeSlot::Present(index) => Ok(index),
            AttributeSlot::Absent => Err(Id3Error::UnknownAttribute(name.to_string())),
        }
    }

    pub fn attribute_name(&self, index: usize) -> Result<&str> {
        self.attributes
            .get(index)
            .map(String::as_str)
            .ok_or(Id3Error::IndexOutOfBounds {
                index,
                len: self.attributes.len(),
            })
    }

    pub fn goal_attribute(&self) -> &str {
        &self.attributes[self.goal_index]
    }

    pub fn goal_index(&self) -> usize {
        self.goal_index
    }

    /// Makes `name` the goal attribute.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAttribute` if the schema has no such attribute.
    pub fn set_goal_attribute(&mut self, name: &str) -> Result<()> {
        self.goal_index = self.attribute_index(name)?;
        Ok(())
    }

    pub fn domain(&self, index: usize) -> Result<&[String]> {
        self.domains
            .get(index)
            .map(Vec::as_slice)
            .ok_or(Id3Error::IndexOutOfBounds {
                index,
                len: self.domains.len(),
            })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Collects the values of one column.
    pub fn column(&self, index: usize) -> Result<Vec<String>> {
        self.records
            .iter()
            .map(|record| record.get(index).map(str::to_string))
            .collect()
    }

    /// Checks the structural invariants: rectangular records and per-column
    /// domains that hold exactly the distinct values seen in each column.
    pub fn validate(&self) -> Result<()> {
        for (row, record) in self.records.iter().enumerate() {
            if record.len() != self.attributes.len() {
                return Err(Id3Error::RowLength {
                    row: row + 2,
                    expected: self.attributes.len(),
                    actual: record.len(),
                });
            }
        }
        for (index, domain) in self.domains.iter().enumerate() {
            let seen = self
                .records
                .iter()
                .map(|record| record.get(index))
                .collect::<Result<HashSet<_>>>()?;
            let declared = domain.iter().map(String::as_str).collect::<HashSet<_>>();
            if seen != declared || declared.len() != domain.len() {
                return Err(Id3Error::DomainMismatch(self.attributes[index].clone()));
            }
        }
        Ok(())
    }

    /// Splits the records into shuffled train and test datasets sharing this schema.
    ///
    /// # Arguments
    ///
    /// * `train_size` - Fraction of the records that go to the training set.
    /// * `seed` - Optional seed for a reproducible shuffle.
    pub fn train_test_split(&self, train_size: f64, seed: Option<u64>) -> Result<(Self, Self)> {
        if !(0.0..=1.0).contains(&train_size) {
            return Err(Id3Error::InvalidParameter(
                "Train size should be between 0.0 and 1.0".into(),
            ));
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut indices = (0..self.records.len()).collect::<Vec<_>>();
        indices.shuffle(&mut rng);
        let train_size = (self.records.len() as f64 * train_size).floor() as usize;

        let mut train = self.empty_like();
        let mut test = self.empty_like();
        for &index in &indices[..train_size] {
            train.push(self.records[index].clone())?;
        }
        for &index in &indices[train_size..] {
            test.push(self.records[index].clone())?;
        }
        Ok((train, test))
    }

    /// Writes the header and every record as delimited text.
    pub fn write_csv<W: io::Write>(&self, writer: W, delimiter: u8) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(writer);
        writer.write_record(&self.attributes)?;
        for record in &self.records {
            writer.write_record(record.values())?;
        }
        writer.flush()?;
        Ok(())
    }

    fn empty_like(&self) -> Self {
        Self {
            attributes: self.attributes.clone(),
            attribute_index: self.attribute_index.clone(),
            goal_index: self.goal_index,
            domains: vec![Vec::new(); self.attributes.len()],
            records: Vec::new(),
        }
    }

    /// Gives the schema together with mutable records so predictions can be
    /// written in place.
    pub(crate) fn schema_and_records_mut(&mut self) -> (&HashMap<String, usize>, &mut [Record]) {
        (&self.attribute_index, &mut self.records)
    }

    pub(crate) fn rebuild_domain(&mut self, index: usize) -> Result<()> {
        let mut domain: Vec<String> = Vec::new();
        for record in &self.records {
            let value = record.get(index)?;
            if !domain.iter().any(|seen| seen == value) {
                domain.push(value.to_string());
            }
        }
        let len = self.domains.len();
        *self
            .domains
            .get_mut(index)
            .ok_or(Id3Error::IndexOutOfBounds { index, len })? = domain;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather() -> Dataset {
        Dataset::from_rows(
            ["Weather", "Play"],
            [
                ["Sunny", "No"],
                ["Sunny", "No"],
                ["Rainy", "Yes"],
                ["Rainy", "Yes"],
                ["Overcast", "Yes"],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_dataset_new() {
        let dataset = weather();
        assert_eq!(dataset.len(), 5);
        assert_eq!(dataset.attributes(), &["Weather", "Play"]);
        assert_eq!(dataset.goal_attribute(), "Play");
        assert_eq!(dataset.goal_index(), 1);
    }

    #[test]
    fn test_dataset_duplicate_attribute() {
        let result = Dataset::new(vec!["a".into(), "b".into(), "a".into()]);
        assert!(matches!(result, Err(Id3Error::DuplicateAttribute(name)) if name == "a"));
    }

    #[test]
    fn test_dataset_no_attributes() {
        assert!(matches!(Dataset::new(vec![]), Err(Id3Error::NoAttributes)));
    }

    #[test]
    fn test_dataset_domains_in_first_seen_order() {
        let dataset = weather();
        assert_eq!(dataset.domain(0).unwrap(), &["Sunny", "Rainy", "Overcast"]);
        assert_eq!(dataset.domain(1).unwrap(), &["No", "Yes"]);
        assert!(dataset.domain(2).is_err());
    }

    #[test]
    fn test_dataset_push_wrong_length() {
        let mut dataset = weather();
        let result = dataset.push(["Sunny"].into_iter().collect());
        assert!(matches!(
            result,
            Err(Id3Error::RowLength {
                row: 7,
                expected: 2,
                actual: 1
            })
        ));
        assert_eq!(dataset.len(), 5);
    }

    #[test]
    fn test_dataset_attribute_slot() {
        let dataset = weather();
        assert_eq!(dataset.attribute_slot("Play"), AttributeSlot::Present(1));
        assert_eq!(dataset.attribute_slot("Wind"), AttributeSlot::Absent);
        assert!(dataset.attribute_index("Wind").is_err());
    }

    #[test]
    fn test_dataset_set_goal_attribute() {
        let mut dataset = weather();
        dataset.set_goal_attribute("Weather").unwrap();
        assert_eq!(dataset.goal_index(), 0);
        assert!(dataset.set_goal_attribute("Wind").is_err());
        assert_eq!(dataset.goal_attribute(), "Weather");
    }

    #[test]
    fn test_dataset_from_reader() {
        let data = "Weather, Wind, Play\nSunny, Weak, No\nRainy, Strong, Yes\n";
        let dataset = Dataset::from_reader(data.as_bytes(), b',').unwrap();
        assert_eq!(dataset.attributes(), &["Weather", "Wind", "Play"]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[1].get(1).unwrap(), "Strong");
        assert!(dataset.validate().is_ok());
    }

    #[test]
    fn test_dataset_from_reader_ragged_row() {
        let data = "Weather,Play\nSunny,No\nRainy\n";
        let result = Dataset::from_reader(data.as_bytes(), b',');
        assert!(matches!(result, Err(Id3Error::RowLength { row: 3, .. })));
    }

    #[test]
    fn test_dataset_from_reader_empty() {
        let result = Dataset::from_reader("".as_bytes(), b',');
        assert!(matches!(result, Err(Id3Error::NoAttributes)));
    }

    #[test]
    fn test_dataset_validate_detects_stale_domain() {
        let mut dataset = weather();
        dataset.records[0].set(1, "Maybe").unwrap();
        assert!(matches!(dataset.validate(), Err(Id3Error::DomainMismatch(_))));
        dataset.rebuild_domain(1).unwrap();
        assert!(dataset.validate().is_ok());
    }

    #[test]
    fn test_dataset_train_test_split() {
        let dataset = weather();
        let (train, test) = dataset.train_test_split(0.5, Some(7)).unwrap();
        assert_eq!(train.len(), 2);
        assert_eq!(test.len(), 3);
        assert_eq!(train.attributes(), dataset.attributes());
        assert!(train.validate().is_ok());
        assert!(test.validate().is_ok());
    }

    #[test]
    fn test_dataset_train_test_split_is_reproducible() {
        let dataset = weather();
        let (first, _) = dataset.train_test_split(0.5, Some(42)).unwrap();
        let (second, _) = dataset.train_test_split(0.5, Some(42)).unwrap();
        assert_eq!(first.records(), second.records());
    }

    #[test]
    fn test_dataset_train_test_split_invalid_size() {
        assert!(weather().train_test_split(1.5, None).is_err());
    }

    #[test]
    fn test_dataset_write_csv() {
        let dataset = Dataset::from_rows(["Weather", "Play"], [["Sunny", "No"]]).unwrap();
        let mut out = Vec::new();
        dataset.write_csv(&mut out, b',').unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Weather,Play\nSunny,No\n");
    }
}
