//! In-memory tabular dataset.

use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::error::{Result, WganError};

/// Ordered, indexable table of fixed-width numeric records.
///
/// Row `i` always refers to the same record; the index set is stable
/// across epochs.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularDataset {
    records: Array2<f64>,
}

impl TabularDataset {
    /// Wrap a `(rows, data_dim)` matrix of records.
    pub fn new(records: Array2<f64>) -> Result<Self> {
        if records.nrows() == 0 || records.ncols() == 0 {
            return Err(WganError::Config(
                "dataset must contain at least one record and one column".to_string(),
            ));
        }
        Ok(Self { records })
    }

    /// Build a dataset from row vectors. All rows must share one width.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return Err(WganError::Config(
                "dataset rows must be rectangular".to_string(),
            ));
        }

        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let records = Array2::from_shape_vec((rows.len(), width), flat)
            .map_err(|e| WganError::Config(format!("dataset shape error: {e}")))?;
        Self::new(records)
    }

    /// Load a headered CSV of numeric columns.
    ///
    /// Values are parsed as-is; cleaning and scaling are up to the caller.
    pub fn load_csv(path: &str) -> anyhow::Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut rows = Vec::new();

        for result in reader.records() {
            let record = result?;
            let row = record
                .iter()
                .map(|field| field.trim().parse::<f64>())
                .collect::<std::result::Result<Vec<f64>, _>>()?;
            rows.push(row);
        }

        Ok(Self::from_rows(&rows)?)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width of each record.
    pub fn data_dim(&self) -> usize {
        self.records.ncols()
    }

    /// View of record `index`.
    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.records.row(index)
    }

    /// View of the full record table.
    pub fn records(&self) -> ArrayView2<'_, f64> {
        self.records.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_dataset_basic() {
        let data = Array2::<f64>::zeros((10, 3));
        let dataset = TabularDataset::new(data).unwrap();

        assert_eq!(dataset.len(), 10);
        assert_eq!(dataset.data_dim(), 3);
    }

    #[test]
    fn test_dataset_rejects_empty() {
        let err = TabularDataset::new(Array2::<f64>::zeros((0, 3))).unwrap_err();
        assert!(matches!(err, WganError::Config(_)));
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        let err = TabularDataset::from_rows(&rows).unwrap_err();
        assert!(matches!(err, WganError::Config(_)));
    }

    #[test]
    fn test_load_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a,b,c").unwrap();
        writeln!(file, "1.0,2.0,3.0").unwrap();
        writeln!(file, "4.0,5.0,6.0").unwrap();

        let dataset = TabularDataset::load_csv(file.path().to_str().unwrap()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.data_dim(), 3);
        assert_eq!(dataset.row(1)[2], 6.0);
    }
}
