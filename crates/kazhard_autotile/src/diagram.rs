//! 3x3 diagram strings
//!
//! A diagram is three rows of three characters separated by single spaces,
//! with the center cell left as a placeholder:
//!
//! ```text
//! "010 1 1 010"   ->   010
//!                      1 1
//!                      010
//! ```
//!
//! A `'1'` at one of the 8 outer positions sets that direction's bit. The
//! characters at positions 3, 5 and 7 (row separators and center) are ignored.

use crate::SelectorError;
use kazhard_core::{Direction, Pattern8};

/// Exact length of a diagram string
pub const DIAGRAM_LEN: usize = 11;

const POSITIONS: [(usize, Direction); 8] = [
    (0, Direction::NorthWest),
    (1, Direction::North),
    (2, Direction::NorthEast),
    (4, Direction::West),
    (6, Direction::East),
    (8, Direction::SouthWest),
    (9, Direction::South),
    (10, Direction::SouthEast),
];

/// Convert a diagram string into a directional pattern
pub fn parse_diagram(diagram: &str) -> Result<Pattern8, SelectorError> {
    let points: Vec<char> = diagram.chars().collect();
    if points.len() != DIAGRAM_LEN {
        return Err(SelectorError::InvalidDiagram(diagram.to_string()));
    }

    Ok(POSITIONS
        .iter()
        .fold(Pattern8::empty(), |pattern, &(position, direction)| {
            pattern.with(direction, points[position] == '1')
        }))
}

/// Render a pattern back into diagram form
pub fn format_diagram(pattern: Pattern8) -> String {
    let mut points = ['0'; DIAGRAM_LEN];
    points[3] = ' ';
    points[5] = ' ';
    points[7] = ' ';
    for (position, direction) in POSITIONS {
        if pattern.has(direction) {
            points[position] = '1';
        }
    }
    points.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_positions() {
        assert_eq!(parse_diagram("100 0 0 000").unwrap(), Pattern8::NORTH_WEST);
        assert_eq!(parse_diagram("010 0 0 000").unwrap(), Pattern8::NORTH);
        assert_eq!(parse_diagram("001 0 0 000").unwrap(), Pattern8::NORTH_EAST);
        assert_eq!(parse_diagram("000 1 0 000").unwrap(), Pattern8::WEST);
        assert_eq!(parse_diagram("000 0 1 000").unwrap(), Pattern8::EAST);
        assert_eq!(parse_diagram("000 0 0 100").unwrap(), Pattern8::SOUTH_WEST);
        assert_eq!(parse_diagram("000 0 0 010").unwrap(), Pattern8::SOUTH);
        assert_eq!(parse_diagram("000 0 0 001").unwrap(), Pattern8::SOUTH_EAST);
    }

    #[test]
    fn test_parse_cross() {
        assert_eq!(
            parse_diagram("010 1 1 010").unwrap(),
            Pattern8::ORTHOGONAL
        );
        assert_eq!(parse_diagram("111 1 1 111").unwrap(), Pattern8::all());
    }

    #[test]
    fn test_placeholders_ignored() {
        assert_eq!(
            parse_diagram("010x1X1-010").unwrap(),
            parse_diagram("010 1 1 010").unwrap()
        );
        // Only '1' sets a bit
        assert_eq!(parse_diagram("0a0 b c 0d0").unwrap(), Pattern8::empty());
    }

    #[test]
    fn test_invalid_length() {
        assert_eq!(
            parse_diagram("010 0 0 00"),
            Err(SelectorError::InvalidDiagram("010 0 0 00".to_string()))
        );
        assert!(parse_diagram("").is_err());
        assert!(parse_diagram("010 0 0 0000").is_err());
    }

    #[test]
    fn test_format() {
        assert_eq!(format_diagram(Pattern8::ORTHOGONAL), "010 1 1 010");
        assert_eq!(format_diagram(Pattern8::empty()), "000 0 0 000");
    }

    proptest! {
        #[test]
        fn prop_format_then_parse(bits in any::<u8>()) {
            let pattern = Pattern8::from_bits_retain(bits);
            let text = format_diagram(pattern);
            prop_assert_eq!(text.len(), DIAGRAM_LEN);
            prop_assert_eq!(parse_diagram(&text).unwrap(), pattern);
        }
    }
}
