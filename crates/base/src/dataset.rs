use crate::error::DatasetError;
use common::vec2::Vec2;
use serde::{Deserialize, Serialize};

/// An ordered, immutable collection of fixed-dimension points.
///
/// Points are identified by position. A point may carry an opaque key (a
/// station name, a record id); keys travel with the dataset and are never
/// interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    points: Vec2<f32>,
    keys: Option<Vec<String>>,
}

impl Dataset {
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self, DatasetError> {
        if rows.is_empty() {
            return Err(DatasetError::Empty);
        }
        let dims = rows[0].as_ref().len();
        if dims == 0 {
            return Err(DatasetError::ZeroDimension);
        }
        let mut base = Vec::with_capacity(rows.len() * dims);
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != dims {
                return Err(DatasetError::DimensionMismatch {
                    index,
                    found: row.len(),
                    expected: dims,
                });
            }
            base.extend_from_slice(row);
        }
        Ok(Self {
            points: Vec2::from_vec((rows.len(), dims), base),
            keys: None,
        })
    }

    pub fn with_keys<R: AsRef<[f32]>>(rows: &[R], keys: Vec<String>) -> Result<Self, DatasetError> {
        if keys.len() != rows.len() {
            return Err(DatasetError::KeyCountMismatch {
                keys: keys.len(),
                points: rows.len(),
            });
        }
        let mut dataset = Self::from_rows(rows)?;
        dataset.keys = Some(keys);
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.points.shape_0()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dims(&self) -> usize {
        self.points.shape_1()
    }

    pub fn point(&self, i: usize) -> &[f32] {
        &self.points[(i,)]
    }

    pub fn key(&self, i: usize) -> Option<&str> {
        self.keys.as_ref().map(|keys| keys[i].as_str())
    }

    pub fn as_slice(&self) -> &[f32] {
        self.points.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty() {
        assert_eq!(Dataset::from_rows::<[f32; 2]>(&[]), Err(DatasetError::Empty));
    }

    #[test]
    fn rejects_zero_dimension() {
        let rows: Vec<Vec<f32>> = vec![vec![], vec![]];
        assert_eq!(Dataset::from_rows(&rows), Err(DatasetError::ZeroDimension));
    }

    #[test]
    fn rejects_ragged_rows() {
        let rows: Vec<Vec<f32>> = vec![vec![1.0, 2.0], vec![3.0]];
        assert_eq!(
            Dataset::from_rows(&rows),
            Err(DatasetError::DimensionMismatch {
                index: 1,
                found: 1,
                expected: 2,
            })
        );
    }

    #[test]
    fn keys_are_preserved_in_order() {
        let rows = [[0.0f32, 1.0], [2.0, 3.0]];
        let dataset =
            Dataset::with_keys(&rows, vec!["USW00023188".into(), "USW00014771".into()]).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.dims(), 2);
        assert_eq!(dataset.key(0), Some("USW00023188"));
        assert_eq!(dataset.key(1), Some("USW00014771"));
        assert_eq!(dataset.point(1), &[2.0, 3.0]);
    }

    #[test]
    fn rejects_key_count_mismatch() {
        let rows = [[0.0f32, 1.0], [2.0, 3.0]];
        assert_eq!(
            Dataset::with_keys(&rows, vec!["a".into()]),
            Err(DatasetError::KeyCountMismatch { keys: 1, points: 2 })
        );
    }
}
