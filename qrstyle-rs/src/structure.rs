//! Classification of modules that belong to structural regions of a QR symbol.
//!
//! Structural modules (finder, timing, format and version information,
//! alignment, dark module) are always painted as plain squares. Only the
//! remaining data modules take the configured dot style.
//!
//! Every predicate takes `(row, col, size)` and is pure. Coordinates must lie
//! inside the matrix; out-of-range input panics.

/// Alignment pattern center coordinates for versions 2 through 40 (ISO/IEC 18004, Annex E).
const ALIGNMENT_CENTERS: [&[usize]; 39] = [
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

/// Symbol version for a legal side length (21, 25, ..., 177).
pub fn version_for_size(size: usize) -> Option<usize> {
    if (21..=177).contains(&size) && (size - 17) % 4 == 0 {
        Some((size - 17) / 4)
    } else {
        None
    }
}

fn check_bounds(row: usize, col: usize, size: usize) {
    assert!(
        row < size && col < size,
        "module ({row}, {col}) is outside a {size}x{size} matrix"
    );
}

/// Finder pattern plus its separator: the three 9x9 corner boxes.
pub fn is_finder_pattern(row: usize, col: usize, size: usize) -> bool {
    check_bounds(row, col, size);
    let far = size.saturating_sub(9);
    (row <= 8 && col <= 8) || (row <= 8 && col >= far) || (row >= far && col <= 8)
}

/// Row 6 and column 6 between the finder boxes.
pub fn is_timing_pattern(row: usize, col: usize, size: usize) -> bool {
    check_bounds(row, col, size);
    let Some(end) = size.checked_sub(9) else {
        return false;
    };
    (row == 6 && (8..=end).contains(&col)) || (col == 6 && (8..=end).contains(&row))
}

/// Format information strips next to the finder patterns.
pub fn is_format_information(row: usize, col: usize, size: usize) -> bool {
    check_bounds(row, col, size);
    if (row == 8 && col <= 8) || (col == 8 && row <= 8) {
        return true;
    }
    (row == 8 && col + 8 >= size) || (col == 8 && row + 7 >= size)
}

/// The two 6x3 version information blocks, present from version 7 (size 45).
pub fn is_version_information(row: usize, col: usize, size: usize) -> bool {
    check_bounds(row, col, size);
    if size < 45 {
        return false;
    }
    let band = (size - 11)..=(size - 9);
    (row <= 5 && band.contains(&col)) || (band.contains(&row) && col <= 5)
}

/// Alignment pattern center coordinates used on both axes.
///
/// Legal sizes use the standard per-version table. Any other size of at least
/// 25 modules falls back to a single pattern at the matrix center.
pub fn alignment_centers(size: usize) -> Vec<usize> {
    match version_for_size(size) {
        Some(1) => Vec::new(),
        Some(version) => ALIGNMENT_CENTERS[version - 2].to_vec(),
        None if size >= 25 => vec![size / 2],
        None => Vec::new(),
    }
}

/// Within Chebyshev distance 2 of an alignment center that is not inside a finder box.
pub fn is_alignment_pattern(row: usize, col: usize, size: usize) -> bool {
    check_bounds(row, col, size);
    let centers = alignment_centers(size);
    centers.iter().any(|&center_row| {
        centers.iter().any(|&center_col| {
            !is_finder_pattern(center_row, center_col, size)
                && row.abs_diff(center_row) <= 2
                && col.abs_diff(center_col) <= 2
        })
    })
}

/// The fixed dark module of a version 1 symbol.
pub fn is_dark_module(row: usize, col: usize, size: usize) -> bool {
    check_bounds(row, col, size);
    size == 21 && row == 13 && col == 8
}

/// Whether a module must keep its plain square shape.
pub fn is_structural_pattern(row: usize, col: usize, size: usize) -> bool {
    is_finder_pattern(row, col, size)
        || is_timing_pattern(row, col, size)
        || is_format_information(row, col, size)
        || is_version_information(row, col, size)
        || is_alignment_pattern(row, col, size)
        || is_dark_module(row, col, size)
}

/// Whether a module may take a custom dot shape.
pub fn is_data_area(row: usize, col: usize, size: usize) -> bool {
    !is_structural_pattern(row, col, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_1_landmarks() {
        assert!(is_structural_pattern(13, 8, 21));
        assert!(is_dark_module(13, 8, 21));
        assert!(is_structural_pattern(0, 0, 21));
        assert!(is_structural_pattern(0, 20, 21));
        assert!(is_structural_pattern(20, 0, 21));
        assert!(!is_structural_pattern(10, 10, 21));
        assert!(is_data_area(10, 10, 21));
        assert!(alignment_centers(21).is_empty());
    }

    #[test]
    fn test_finder_box_extent() {
        assert!(is_finder_pattern(8, 8, 21));
        assert!(!is_finder_pattern(9, 9, 21));
        assert!(is_finder_pattern(8, 12, 21));
        assert!(!is_finder_pattern(8, 11, 21));
        assert!(is_finder_pattern(12, 0, 21));
        assert!(!is_finder_pattern(20, 20, 21));
    }

    #[test]
    fn test_timing_and_format() {
        assert!(is_timing_pattern(6, 8, 21));
        assert!(is_timing_pattern(6, 12, 21));
        assert!(!is_timing_pattern(6, 13, 21));
        assert!(is_timing_pattern(10, 6, 21));
        assert!(!is_timing_pattern(7, 10, 21));

        assert!(is_format_information(8, 13, 21));
        assert!(!is_format_information(8, 12, 21));
        assert!(is_format_information(14, 8, 21));
        assert!(!is_format_information(13, 8, 21));
    }

    #[test]
    fn test_version_information_from_version_7() {
        assert!(!is_version_information(0, 30, 41));
        assert!(is_version_information(0, 34, 45));
        assert!(is_version_information(5, 36, 45));
        assert!(!is_version_information(6, 34, 45));
        assert!(is_version_information(34, 5, 45));
        assert!(!is_version_information(33, 5, 45));
    }

    #[test]
    fn test_small_version_alignment_positions() {
        assert_eq!(alignment_centers(25), vec![6, 18]);
        assert_eq!(alignment_centers(29), vec![6, 22]);
        assert_eq!(alignment_centers(33), vec![6, 26]);

        // Only the bottom-right center survives the finder exclusion
        assert!(is_alignment_pattern(18, 18, 25));
        assert!(is_alignment_pattern(16, 20, 25));
        assert!(!is_alignment_pattern(15, 18, 25));
        assert!(!is_alignment_pattern(12, 12, 25));
    }

    #[test]
    fn test_large_version_has_multiple_alignment_patterns() {
        // Version 7
        assert_eq!(alignment_centers(45), vec![6, 22, 38]);
        assert!(is_alignment_pattern(22, 22, 45));
        assert!(is_alignment_pattern(6, 22, 45));
        assert!(is_alignment_pattern(38, 38, 45));
        assert!(!is_alignment_pattern(30, 30, 45));
        // Version 40
        assert_eq!(alignment_centers(177).len(), 7);
        assert!(is_alignment_pattern(170, 170, 177));
    }

    #[test]
    fn test_non_standard_size_uses_center() {
        assert_eq!(alignment_centers(27), vec![13]);
        assert!(is_alignment_pattern(13, 13, 27));
        assert!(alignment_centers(23).is_empty());
    }

    #[test]
    fn test_top_left_diagonal_symmetry() {
        for size in (21..=177).step_by(4) {
            for row in 0..size {
                for col in 0..size {
                    if row < size - 9 && col < size - 9 {
                        assert_eq!(
                            is_structural_pattern(row, col, size),
                            is_structural_pattern(col, row, size),
                            "({row}, {col}) size {size}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_tiny_matrix_does_not_underflow() {
        for row in 0..3 {
            for col in 0..3 {
                assert!(is_structural_pattern(row, col, 3));
            }
        }
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_out_of_range_panics() {
        is_structural_pattern(21, 0, 21);
    }
}
