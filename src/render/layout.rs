//! Pure layout helpers shared by the section renderers.

/// Separator used when one certification line lists several certifications.
pub const CERTIFICATION_DELIMITER: &str = " | ";

/// Splits combined certification lines into individual entries.
///
/// Order is preserved and each piece is trimmed; empty pieces are dropped.
pub fn flatten_certifications<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| line.as_ref().split(CERTIFICATION_DELIMITER))
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(String::from)
        .collect()
}

/// Arranges `items` into rows of `columns`, filling left to right, top to
/// bottom. Trailing cells of the final row are `None`.
pub fn grid_rows<T: Clone>(items: &[T], columns: usize) -> Vec<Vec<Option<T>>> {
    if columns == 0 {
        return Vec::new();
    }
    items
        .chunks(columns)
        .map(|chunk| {
            let mut row: Vec<Option<T>> = chunk.iter().cloned().map(Some).collect();
            row.resize(columns, None);
            row
        })
        .collect()
}

/// Upper-cases `text` when the style asks for it.
pub fn apply_case(text: &str, uppercase: bool) -> String {
    if uppercase {
        text.to_uppercase()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattening_splits_on_delimiter_and_keeps_order() {
        assert_eq!(flatten_certifications(&["A | B", "C"]), vec!["A", "B", "C"]);
    }

    #[test]
    fn flattening_trims_and_skips_empty_pieces() {
        let lines = ["  AWS SAA | CKA  ", "", "PMP |  | ITIL"];
        assert_eq!(
            flatten_certifications(&lines),
            vec!["AWS SAA", "CKA", "PMP", "ITIL"]
        );
    }

    #[test]
    fn single_pipe_without_spaces_is_not_a_delimiter() {
        assert_eq!(flatten_certifications(&["A|B"]), vec!["A|B"]);
    }

    #[test]
    fn grid_fills_row_major_and_pads_the_last_row() {
        let entries = ["e0", "e1", "e2", "e3", "e4"];
        let rows = grid_rows(&entries, 2);
        assert_eq!(
            rows,
            vec![
                vec![Some("e0"), Some("e1")],
                vec![Some("e2"), Some("e3")],
                vec![Some("e4"), None],
            ]
        );
    }

    #[test]
    fn grid_of_nothing_has_no_rows() {
        assert!(grid_rows::<&str>(&[], 2).is_empty());
        assert!(grid_rows(&["a"], 0).is_empty());
    }
}
