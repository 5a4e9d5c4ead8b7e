use super::{DependencyEdge, DependencyMatrix};

/// Extract edges from the adjacency matrix
///
/// Cells are scanned row-major (`i` ascending, then `j` ascending) and every
/// cell equal to 1 yields one edge, so the output order is stable across
/// calls. Ragged rows are scanned as they are.
pub fn edges(matrix: &DependencyMatrix) -> Vec<DependencyEdge> {
    matrix
        .adjacency_matrix
        .iter()
        .enumerate()
        .flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| **cell == 1)
                .map(move |(j, _)| DependencyEdge::new(i, j))
        })
        .collect()
}

/// The analyzer's critical path, unchanged
pub fn critical_path_view(matrix: &DependencyMatrix) -> &[usize] {
    &matrix.critical_path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zeros(n: usize) -> Vec<Vec<u8>> {
        vec![vec![0; n]; n]
    }

    #[test]
    fn test_single_edge() {
        let mut adjacency_matrix = zeros(6);
        adjacency_matrix[2][5] = 1;
        let matrix = DependencyMatrix {
            adjacency_matrix,
            critical_path: vec![],
        };

        assert_eq!(edges(&matrix), vec![DependencyEdge::new(2, 5)]);
    }

    #[test]
    fn test_row_major_order_is_deterministic() {
        let mut adjacency_matrix = zeros(4);
        adjacency_matrix[3][0] = 1;
        adjacency_matrix[0][2] = 1;
        adjacency_matrix[0][1] = 1;
        adjacency_matrix[1][3] = 1;
        let matrix = DependencyMatrix {
            adjacency_matrix,
            critical_path: vec![],
        };

        let expected = vec![
            DependencyEdge::new(0, 1),
            DependencyEdge::new(0, 2),
            DependencyEdge::new(1, 3),
            DependencyEdge::new(3, 0),
        ];
        assert_eq!(edges(&matrix), expected);
        assert_eq!(edges(&matrix), edges(&matrix));
    }

    #[test]
    fn test_only_cells_equal_to_one_count() {
        let matrix = DependencyMatrix {
            adjacency_matrix: vec![vec![0, 2], vec![1, 0]],
            critical_path: vec![],
        };
        assert_eq!(edges(&matrix), vec![DependencyEdge::new(1, 0)]);
    }

    #[test]
    fn test_empty_and_ragged_matrices() {
        assert!(edges(&DependencyMatrix::default()).is_empty());

        let matrix = DependencyMatrix {
            adjacency_matrix: vec![vec![0, 0, 1], vec![1]],
            critical_path: vec![],
        };
        assert_eq!(
            edges(&matrix),
            vec![DependencyEdge::new(0, 2), DependencyEdge::new(1, 0)]
        );
    }

    #[test]
    fn test_critical_path_view_passthrough() {
        let matrix = DependencyMatrix {
            adjacency_matrix: zeros(5),
            critical_path: vec![3, 1, 4],
        };
        assert_eq!(critical_path_view(&matrix), &[3, 1, 4]);
        assert!(critical_path_view(&DependencyMatrix::default()).is_empty());
    }
}
