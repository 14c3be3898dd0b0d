use super::node::{Node, TreeVisitor};
use crate::error::Result;
use std::collections::BTreeMap;

const INDENT: &str = "|  ";

/// Renders a tree as indented text, one `attribute = value` line per branch
/// and `: label` at the end of each leaf line.
///
/// ```text
/// Outlook = Overcast: Yes
/// Outlook = Sunny
/// |  Humidity = High: No
/// |  Humidity = Normal: Yes
/// ```
pub struct TreeRenderer {
    label_index: usize,
    offset: String,
    output: String,
}

impl TreeRenderer {
    pub fn new(label_index: usize) -> Self {
        Self {
            label_index,
            offset: String::new(),
            output: String::new(),
        }
    }

    pub fn render(root: &Node, label_index: usize) -> Result<String> {
        let mut renderer = Self::new(label_index);
        root.accept(label_index, &mut renderer)?;
        Ok(renderer.into_string())
    }

    pub fn into_string(self) -> String {
        match self.output.strip_prefix('\n') {
            Some(output) => output.to_string(),
            None => self.output,
        }
    }
}

impl TreeVisitor for TreeRenderer {
    fn visit_internal(&mut self, attribute: &str, children: &BTreeMap<String, Node>) -> Result<()> {
        self.output.push('\n');
        for (value, child) in children {
            self.output
                .push_str(&format!("{}{} = {}", self.offset, attribute, value));
            self.offset.push_str(INDENT);
            child.accept(self.label_index, self)?;
            self.offset.truncate(self.offset.len() - INDENT.len());
        }
        Ok(())
    }

    fn visit_leaf(&mut self, label: &str) -> Result<()> {
        self.output.push_str(&format!(": {}\n", label));
        Ok(())
    }
}
