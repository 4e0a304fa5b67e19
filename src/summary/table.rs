use super::SummaryError;

/// One named metric column of a summary
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryColumn {
    /// Column name
    pub name: String,
    /// One value per cycle row
    pub values: Vec<f64>,
}

/// Per-cycle summary of one test.
///
/// Identification columns are typed, metric columns are kept in insertion
/// order so the persisted layout is stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryTable {
    /// Formatted wall clock time of every row
    pub date_time_txt: Option<Vec<String>>,
    /// Test time of every row
    pub test_time: Vec<f64>,
    /// Data point of every row
    pub data_point: Vec<i64>,
    /// Cycle number of every row
    pub cycle_index: Vec<i32>,
    columns: Vec<SummaryColumn>,
}

impl SummaryTable {
    /// Summary with identification columns and no metrics
    pub fn new(cycle_index: Vec<i32>, data_point: Vec<i64>, test_time: Vec<f64>) -> Self {
        Self {
            date_time_txt: None,
            test_time,
            data_point,
            cycle_index,
            columns: Vec::new(),
        }
    }

    /// Number of cycle rows
    pub fn len(&self) -> usize {
        self.cycle_index.len()
    }

    /// Whether the summary has no rows
    pub fn is_empty(&self) -> bool {
        self.cycle_index.is_empty()
    }

    /// Insert or replace a metric column
    pub fn insert(&mut self, name: &str, values: Vec<f64>) -> Result<(), SummaryError> {
        if values.len() != self.len() {
            return Err(SummaryError::LengthMismatch {
                column: name.to_string(),
                expected: self.len(),
                actual: values.len(),
            });
        }
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(column) => column.values = values,
            None => self.columns.push(SummaryColumn {
                name: name.to_string(),
                values,
            }),
        }
        Ok(())
    }

    /// Values of a metric column
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Metric column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Metric columns in order
    pub fn columns(&self) -> &[SummaryColumn] {
        &self.columns
    }

    /// Row index of a cycle
    pub fn row_of_cycle(&self, cycle: i32) -> Option<usize> {
        self.cycle_index.iter().position(|&c| c == cycle)
    }

    /// Shift the cycle and test time of every row.
    ///
    /// Data point references keep the numbering of their own raw file.
    pub fn offset(&mut self, cycle: i32, test_time: f64) {
        self.cycle_index.iter_mut().for_each(|c| *c += cycle);
        self.test_time.iter_mut().for_each(|t| *t += test_time);
    }

    /// Append the rows of another summary.
    ///
    /// Columns missing on either side are filled with NaN.
    pub fn append(&mut self, other: SummaryTable) {
        let left_len = self.len();
        let right_len = other.len();

        self.date_time_txt = match (self.date_time_txt.take(), other.date_time_txt) {
            (None, None) => None,
            (left, right) => {
                let mut texts = left.unwrap_or_else(|| vec![String::new(); left_len]);
                texts.extend(right.unwrap_or_else(|| vec![String::new(); right_len]));
                Some(texts)
            }
        };
        self.test_time.extend(other.test_time);
        self.data_point.extend(other.data_point);
        self.cycle_index.extend(other.cycle_index);

        let mut right_columns = other.columns;
        for column in &mut self.columns {
            match right_columns.iter().position(|c| c.name == column.name) {
                Some(pos) => column.values.extend(right_columns.remove(pos).values),
                None => column
                    .values
                    .extend(std::iter::repeat(f64::NAN).take(right_len)),
            }
        }
        for column in right_columns {
            let mut values = vec![f64::NAN; left_len];
            values.extend(column.values);
            self.columns.push(SummaryColumn {
                name: column.name,
                values,
            });
        }
    }
}
