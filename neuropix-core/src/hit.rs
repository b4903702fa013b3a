//! Flat hit storage in Structure of Arrays (`SoA`) layout.
//!
//! The four columns are co-indexed: position `i` across all of them
//! describes one physical hit. Growth happens only through [`HitColumns::push`],
//! which keeps the columns equal length by construction.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Flattened per-hit output columns.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HitColumns {
    /// Owning event's index in the input stream, non-decreasing.
    pub event_number: Vec<i64>,
    /// Pixel column index.
    pub x: Vec<i32>,
    /// Pixel row index.
    pub y: Vec<i32>,
    /// Global timestamp of the hit.
    pub time: Vec<f64>,
}

impl HitColumns {
    /// Creates empty columns with the given capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            event_number: Vec::with_capacity(capacity),
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            time: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of hits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.event_number.len()
    }

    /// Returns true if no hits have been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.event_number.is_empty()
    }

    /// Appends one hit row.
    pub fn push(&mut self, event_number: i64, x: i32, y: i32, time: f64) {
        self.event_number.push(event_number);
        self.x.push(x);
        self.y.push(y);
        self.time.push(time);
    }

    /// Clears all columns.
    pub fn clear(&mut self) {
        self.event_number.clear();
        self.x.clear();
        self.y.clear();
        self.time.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_columns_stay_co_indexed() {
        let mut columns = HitColumns::with_capacity(4);
        assert!(columns.is_empty());

        columns.push(0, 12, 34, 1.5);
        columns.push(0, 13, 34, 1.6);
        columns.push(2, 200, 7, 9.0);

        assert_eq!(columns.len(), 3);
        assert_eq!(columns.event_number, vec![0, 0, 2]);
        assert_eq!(columns.x, vec![12, 13, 200]);
        assert_eq!(columns.y, vec![34, 34, 7]);
        assert_eq!(columns.time.len(), columns.len());

        columns.clear();
        assert!(columns.is_empty());
        assert_eq!(columns.time.len(), 0);
    }
}
