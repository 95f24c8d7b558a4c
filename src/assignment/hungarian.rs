//! Hungarian Algorithm for Optimal Assignment
//!
//! Implementation of the Hungarian (Kuhn-Munkres) algorithm for solving
//! the linear assignment problem in O(n³) time, in both its minimizing and
//! maximizing forms.

use alloc::vec;
use alloc::vec::Vec;

use crate::HandcartError;

/// Result of an assignment problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Matching {
    /// Assignment mapping: row i is assigned to column mapping[i]
    /// None means the row is unassigned
    pub mapping: Vec<Option<usize>>,
    /// Total value of the assignment under the solved objective
    pub total: f64,
}

impl Matching {
    /// Creates a matching with the given mapping and total.
    pub fn new(mapping: Vec<Option<usize>>, total: f64) -> Self {
        Self { mapping, total }
    }

    /// Returns the number of assigned pairs.
    pub fn num_assigned(&self) -> usize {
        self.mapping.iter().filter(|x| x.is_some()).count()
    }

    /// Returns an iterator over (row, col) pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.mapping
            .iter()
            .enumerate()
            .filter_map(|(row, col)| col.map(|c| (row, c)))
    }
}

/// Dense score (or cost) matrix for assignment problems.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix {
    /// Row-major data
    data: Vec<f64>,
    /// Number of rows
    rows: usize,
    /// Number of columns
    cols: usize,
}

impl ScoreMatrix {
    /// Creates a matrix from row-major data.
    pub fn from_vec(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self, HandcartError> {
        if data.len() != rows * cols {
            return Err(HandcartError::ShapeMismatch {
                expected: rows * cols,
                actual: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Creates a matrix filled with a value.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    /// Creates a zero-filled matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 0.0)
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Gets the value at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Sets the value at (row, col).
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    /// Returns the largest entry, or `None` for an empty matrix.
    pub fn max_value(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::max)
    }

    /// Concatenates the matrix with itself along the column axis.
    ///
    /// Column `j` and column `j + cols` of the result hold the same values, so
    /// a solver may award two rows to what is logically one column.
    pub fn duplicate_columns(&self) -> Self {
        let cols = self.cols * 2;
        let mut data = Vec::with_capacity(self.rows * cols);
        for row in self.data.chunks(self.cols.max(1)).take(self.rows) {
            data.extend_from_slice(row);
            data.extend_from_slice(row);
        }
        Self {
            data,
            rows: self.rows,
            cols,
        }
    }

    /// Returns a square copy padded with `fill` on the shorter side.
    pub fn padded_square(&self, fill: f64) -> Self {
        let n = self.rows.max(self.cols);
        let mut padded = Self::filled(n, n, fill);
        for i in 0..self.rows {
            for j in 0..self.cols {
                padded.set(i, j, self.get(i, j));
            }
        }
        padded
    }
}

/// Solves the linear assignment problem using the Hungarian algorithm.
///
/// Given a cost matrix C, finds an assignment that minimizes the total cost.
/// Non-square matrices are padded internally; rows matched to a padded
/// column come back as `None`.
///
/// # Arguments
/// - `cost`: The cost matrix (rows = workers, columns = jobs)
///
/// # Returns
/// A `Matching` with the optimal row-to-column mapping.
pub fn hungarian(cost: &ScoreMatrix) -> Result<Matching, HandcartError> {
    let n_rows = cost.rows();
    let n_cols = cost.cols();

    if n_rows == 0 || n_cols == 0 {
        return Ok(Matching::new(vec![None; n_rows], 0.0));
    }

    if cost.data.iter().any(|c| !c.is_finite()) {
        return Err(HandcartError::AssignmentFailed);
    }

    // Make the matrix square by padding with large values
    let n = n_rows.max(n_cols);
    let large = 1e20_f64;
    let matrix = cost.padded_square(large);

    // Potential vectors for rows and columns (dual variables)
    let mut u = vec![0.0_f64; n];
    let mut v = vec![0.0_f64; n];

    let mut col_assignment: Vec<Option<usize>> = vec![None; n];

    for i in 0..n {
        // Start augmenting path from row i
        let mut min_to = vec![f64::INFINITY; n]; // Minimum reduced cost to reach each column
        let mut way = vec![None::<usize>; n]; // Previous column in augmenting path
        let mut used = vec![false; n]; // Columns visited in this iteration

        let mut cur_row = i;
        let mut cur_col: Option<usize> = None;

        // Find augmenting path using Dijkstra-like approach
        loop {
            let mut min_val = f64::INFINITY;
            let mut min_col = None;

            for j in 0..n {
                if used[j] {
                    continue;
                }

                let reduced_cost = matrix.get(cur_row, j) - u[cur_row] - v[j];

                if reduced_cost < min_to[j] {
                    min_to[j] = reduced_cost;
                    way[j] = cur_col;
                }

                if min_to[j] < min_val {
                    min_val = min_to[j];
                    min_col = Some(j);
                }
            }

            let min_col = min_col.ok_or(HandcartError::AssignmentFailed)?;

            // Update potentials
            for j in 0..n {
                if used[j] {
                    if let Some(row) = col_assignment[j] {
                        u[row] += min_val;
                    }
                    v[j] -= min_val;
                } else {
                    min_to[j] -= min_val;
                }
            }
            u[i] += min_val;

            used[min_col] = true;
            cur_col = Some(min_col);

            // Follow assignment to next row, or stop on a free column
            match col_assignment[min_col] {
                Some(row) => cur_row = row,
                None => break,
            }
        }

        // Trace back augmenting path and update assignments
        while let Some(col) = cur_col {
            let prev_col = way[col];

            col_assignment[col] = match prev_col {
                Some(pc) => col_assignment[pc],
                None => Some(i),
            };

            cur_col = prev_col;
        }
    }

    let mut row_assignment: Vec<Option<usize>> = vec![None; n];
    for (j, col_asgn) in col_assignment.iter().enumerate() {
        if let Some(i) = col_asgn {
            row_assignment[*i] = Some(j);
        }
    }

    let mut total_cost = 0.0;
    let mut result_mapping = Vec::with_capacity(n_rows);

    for (i, row_asgn) in row_assignment.iter().enumerate().take(n_rows) {
        match row_asgn {
            Some(j) if *j < n_cols => {
                total_cost += cost.get(i, *j);
                result_mapping.push(Some(*j));
            }
            _ => result_mapping.push(None),
        }
    }

    Ok(Matching::new(result_mapping, total_cost))
}

/// Solves the assignment problem for the largest total score.
///
/// Scores are turned into costs as `max - score`, which keeps every cost
/// non-negative and leaves the optimal mapping unchanged.
pub fn hungarian_maximize(scores: &ScoreMatrix) -> Result<Matching, HandcartError> {
    let Some(max) = scores.max_value() else {
        return Ok(Matching::new(vec![None; scores.rows()], 0.0));
    };

    let mut cost = ScoreMatrix::zeros(scores.rows(), scores.cols());
    for i in 0..scores.rows() {
        for j in 0..scores.cols() {
            cost.set(i, j, max - scores.get(i, j));
        }
    }

    let mut result = hungarian(&cost)?;
    result.total = result.pairs().map(|(i, j)| scores.get(i, j)).sum();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hungarian_simple() {
        // Simple 3x3 cost matrix
        let cost =
            ScoreMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0], 3, 3).unwrap();

        let result = hungarian(&cost).unwrap();

        // Optimal assignment: 0->2, 1->1, 2->0 (cost = 3+5+7 = 15)
        assert_eq!(result.num_assigned(), 3);
        assert!(
            (result.total - 15.0).abs() < 0.01,
            "Expected cost 15.0, got {}",
            result.total
        );
    }

    #[test]
    fn test_hungarian_asymmetric() {
        let cost =
            ScoreMatrix::from_vec(vec![10.0, 5.0, 13.0, 3.0, 15.0, 8.0, 7.0, 4.0, 12.0], 3, 3)
                .unwrap();

        let result = hungarian(&cost).unwrap();

        // Optimal: 0->1 (5), 1->0 (3), 2->2 (12) = 20
        // or: 0->2 (13), 1->0 (3), 2->1 (4) = 20
        assert_eq!(result.num_assigned(), 3);
        assert!(
            (result.total - 20.0).abs() < 0.01,
            "Expected cost 20.0, got {}",
            result.total
        );
    }

    #[test]
    fn test_hungarian_rectangular() {
        // More rows than columns
        let cost = ScoreMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 2).unwrap();

        let result = hungarian(&cost).unwrap();

        assert_eq!(result.mapping.len(), 3);
        assert_eq!(result.num_assigned(), 2);
    }

    #[test]
    fn test_hungarian_rejects_non_finite() {
        let cost = ScoreMatrix::from_vec(vec![1.0, f64::NAN, 3.0, 4.0], 2, 2).unwrap();
        assert_eq!(hungarian(&cost), Err(HandcartError::AssignmentFailed));
    }

    #[test]
    fn test_from_vec_shape_mismatch() {
        let err = ScoreMatrix::from_vec(vec![1.0, 2.0, 3.0], 2, 2).unwrap_err();
        assert_eq!(
            err,
            HandcartError::ShapeMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_maximize_prefers_large_scores() {
        // [1, 10]
        // [10, 2]
        let scores = ScoreMatrix::from_vec(vec![1.0, 10.0, 10.0, 2.0], 2, 2).unwrap();

        let result = hungarian_maximize(&scores).unwrap();

        assert_eq!(result.mapping, vec![Some(1), Some(0)]);
        assert!((result.total - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_maximize_is_global_not_greedy() {
        // Greedy would take (0,0)=9 and then (1,1)=1 for 10; optimum is 8+8
        let scores = ScoreMatrix::from_vec(vec![9.0, 8.0, 8.0, 1.0], 2, 2).unwrap();

        let result = hungarian_maximize(&scores).unwrap();

        assert_eq!(result.mapping, vec![Some(1), Some(0)]);
        assert!((result.total - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_columns() {
        let m = ScoreMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
        let d = m.duplicate_columns();

        assert_eq!(d.rows(), 2);
        assert_eq!(d.cols(), 4);
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(d.get(i, j), m.get(i, j));
                assert_eq!(d.get(i, j + 2), m.get(i, j));
            }
        }
    }

    #[test]
    fn test_duplicate_lets_one_column_take_two_rows() {
        // Both rows strongly prefer column 0
        let scores = ScoreMatrix::from_vec(vec![5.0, 0.1, 4.0, 0.2], 2, 2)
            .unwrap()
            .duplicate_columns();

        let result = hungarian_maximize(&scores).unwrap();

        let logical: Vec<usize> = result.pairs().map(|(_, c)| c % 2).collect();
        assert_eq!(logical, vec![0, 0]);
    }

    #[test]
    fn test_padded_square() {
        let m = ScoreMatrix::from_vec(vec![1.0, 2.0, 3.0], 1, 3).unwrap();
        let p = m.padded_square(0.0);
        assert_eq!((p.rows(), p.cols()), (3, 3));
        assert_eq!(p.get(0, 2), 3.0);
        assert_eq!(p.get(2, 2), 0.0);
    }

    #[test]
    fn test_empty_matrix() {
        let result = hungarian_maximize(&ScoreMatrix::zeros(0, 0)).unwrap();
        assert_eq!(result.num_assigned(), 0);
        assert_eq!(result.total, 0.0);
    }
}
