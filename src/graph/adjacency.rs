//! Word-level dependency adjacency matrices.

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::parser::Head;

/// Symmetric 0/1 adjacency matrix over word positions.
///
/// Diagonal entries are always 1 (self-loops); every non-root dependency
/// edge contributes two symmetric off-diagonal entries. Dependency direction
/// is discarded: the graph convolution treats syntactic neighbors
/// symmetrically. Immutable once built; no normalization is applied here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjacencyMatrix(Array2<f32>);

impl AdjacencyMatrix {
    /// Build the matrix for a validated head list.
    ///
    /// The full N×N extent is allocated upfront; construction is O(N) in
    /// edges on top of the allocation.
    pub fn from_heads(heads: &[Head]) -> Self {
        let n = heads.len();
        let mut matrix = Array2::<f32>::zeros((n, n));
        for (i, head) in heads.iter().enumerate() {
            matrix[[i, i]] = 1.0;
            if let Head::Index(h) = head {
                matrix[[i, *h]] = 1.0;
                matrix[[*h, i]] = 1.0;
            }
        }
        Self(matrix)
    }

    /// Identity-only matrix: n isolated self-looped nodes.
    pub fn self_loops(n: usize) -> Self {
        Self(Array2::eye(n))
    }

    /// Number of word positions (matrix is square).
    pub fn size(&self) -> usize {
        self.0.nrows()
    }

    /// Entry at (i, j).
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.0[[i, j]]
    }

    /// Borrow the underlying matrix, e.g. for the model layer.
    pub fn view(&self) -> ArrayView2<'_, f32> {
        self.0.view()
    }

    /// Consume into the underlying matrix.
    pub fn into_inner(self) -> Array2<f32> {
        self.0
    }

    /// Whether M[i][j] == M[j][i] everywhere.
    pub fn is_symmetric(&self) -> bool {
        let n = self.size();
        (0..n).all(|i| (0..i).all(|j| self.0[[i, j]] == self.0[[j, i]]))
    }

    /// Count of nonzero off-diagonal entries; 2× the non-root edge count.
    pub fn edge_entry_count(&self) -> usize {
        self.0
            .indexed_iter()
            .filter(|((i, j), v)| i != j && **v != 0.0)
            .count()
    }

    /// Copy padded to an m×m extent with self-loops on the new diagonal.
    ///
    /// Padded positions connect to nothing but themselves, so they cannot
    /// influence real nodes under mean aggregation. Used both for fixed
    /// model input lengths and for pre-sizing a matrix ahead of
    /// heterogeneous-node prefixes (prepend case: `shift` new indices go in
    /// front of the existing block).
    pub fn pad_to(&self, m: usize, shift: usize) -> Self {
        let n = self.size();
        debug_assert!(m >= n + shift);
        let mut out = Array2::<f32>::zeros((m, m));
        for i in 0..m {
            out[[i, i]] = 1.0;
        }
        for i in 0..n {
            for j in 0..n {
                out[[i + shift, j + shift]] = self.0[[i, j]];
            }
        }
        Self(out)
    }
}

impl From<Array2<f32>> for AdjacencyMatrix {
    fn from(matrix: Array2<f32>) -> Self {
        Self(matrix)
    }
}
