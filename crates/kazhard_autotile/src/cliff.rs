//! Built-in cliff variants and the `IS_RAISED` rule tables
//!
//! Floor tiles pick a cliff-side piece from the three cells north of them;
//! raised tiles pick a cliff-top piece from their orthogonal cross. Both
//! lists are scanned in the order declared here.

use crate::rule::{PatternRule, VariantTag};
use crate::selector::{SpriteCatalog, SwitchKind, VariantSelector};
use crate::SelectorError;

pub const SIDE_PILLAR: VariantTag = VariantTag(0);
pub const SIDE_WEST: VariantTag = VariantTag(1);
pub const SIDE_EAST: VariantTag = VariantTag(2);
pub const SIDE_FLAT: VariantTag = VariantTag(3);
pub const PILLAR: VariantTag = VariantTag(4);
pub const NORTH_SOUTH: VariantTag = VariantTag(5);
pub const EAST_WEST: VariantTag = VariantTag(6);
pub const NORTH_EDGE: VariantTag = VariantTag(7);
pub const SOUTH_EDGE: VariantTag = VariantTag(8);
pub const EAST_EDGE: VariantTag = VariantTag(9);
pub const WEST_EDGE: VariantTag = VariantTag(10);
pub const NORTH: VariantTag = VariantTag(11);
pub const SOUTH: VariantTag = VariantTag(12);
pub const EAST: VariantTag = VariantTag(13);
pub const WEST: VariantTag = VariantTag(14);
pub const NORTHEAST: VariantTag = VariantTag(15);
pub const SOUTHEAST: VariantTag = VariantTag(16);
pub const SOUTHWEST: VariantTag = VariantTag(17);
pub const NORTHWEST: VariantTag = VariantTag(18);
pub const BLANK: VariantTag = VariantTag(19);

/// Number of declared cliff variants
pub const CLIFF_VARIANT_COUNT: usize = 20;

/// Configuration names, indexed by tag
pub const VARIANT_NAMES: [&str; CLIFF_VARIANT_COUNT] = [
    "side_pillar",
    "side_west",
    "side_east",
    "side_flat",
    "pillar",
    "north_south",
    "east_west",
    "north_edge",
    "south_edge",
    "east_edge",
    "west_edge",
    "north",
    "south",
    "east",
    "west",
    "northeast",
    "southeast",
    "southwest",
    "northwest",
    "blank",
];

pub fn variant_by_name(name: &str) -> Option<VariantTag> {
    VARIANT_NAMES
        .iter()
        .position(|n| *n == name)
        .map(|index| VariantTag(index as u8))
}

pub fn variant_name(tag: VariantTag) -> Option<&'static str> {
    VARIANT_NAMES.get(tag.index()).copied()
}

// (variant, relevant directions, expected directions)
type RuleRow = (VariantTag, &'static str, &'static str);

/// Floor tiles, keyed on the northern row
const CLIFFSIDE_TABLE: [RuleRow; 4] = [
    (SIDE_PILLAR, "111 0 0 000", "010 0 0 000"),
    (SIDE_WEST, "111 0 0 000", "011 0 0 000"),
    (SIDE_EAST, "111 0 0 000", "110 0 0 000"),
    (SIDE_FLAT, "111 0 0 000", "111 0 0 000"),
];

/// Raised tiles, keyed on the orthogonal cross
const CLIFFTOP_TABLE: [RuleRow; 15] = [
    (PILLAR, "010 1 1 010", "000 0 0 000"),
    (NORTH_SOUTH, "010 1 1 010", "010 0 0 010"),
    (EAST_WEST, "010 1 1 010", "000 1 1 000"),
    (NORTH_EDGE, "010 1 1 010", "000 1 1 010"),
    (SOUTH_EDGE, "010 1 1 010", "010 1 1 000"),
    (EAST_EDGE, "010 1 1 010", "010 1 0 010"),
    (WEST_EDGE, "010 1 1 010", "010 0 1 010"),
    (NORTH, "010 1 1 010", "000 0 0 010"),
    (SOUTH, "010 1 1 010", "010 0 0 000"),
    (EAST, "010 1 1 010", "000 1 0 000"),
    (WEST, "010 1 1 010", "000 0 1 000"),
    (NORTHEAST, "010 1 1 010", "000 1 0 010"),
    (SOUTHEAST, "010 1 1 010", "010 1 0 000"),
    (SOUTHWEST, "010 1 1 010", "010 0 1 000"),
    (NORTHWEST, "010 1 1 010", "000 0 1 010"),
];

fn rules_from_table(table: &[RuleRow]) -> Result<Vec<PatternRule>, SelectorError> {
    table
        .iter()
        .map(|&(tag, relevant, expected)| PatternRule::from_diagrams(tag, relevant, expected))
        .collect()
}

/// Rules for tiles that are not raised
pub fn cliffside_rules() -> Result<Vec<PatternRule>, SelectorError> {
    rules_from_table(&CLIFFSIDE_TABLE)
}

/// Rules for raised tiles
pub fn clifftop_rules() -> Result<Vec<PatternRule>, SelectorError> {
    rules_from_table(&CLIFFTOP_TABLE)
}

/// The `IS_RAISED` switch: branch on `is_raised`, match the adjacency pattern
pub fn is_raised_switch<H>(catalog: SpriteCatalog<H>) -> Result<VariantSelector<H>, SelectorError> {
    VariantSelector::builder(SwitchKind::IsRaised, catalog)
        .with_true_rules(clifftop_rules()?)
        .with_false_rules(cliffside_rules()?)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kazhard_core::{build, Pattern8, TerrainGrid, TerrainKind};

    fn tag_catalog() -> SpriteCatalog<Option<VariantTag>> {
        let mut catalog = SpriteCatalog::new(CLIFF_VARIANT_COUNT, None).unwrap();
        for index in 0..CLIFF_VARIANT_COUNT {
            let tag = VariantTag(index as u8);
            catalog.set_sprite(tag, Some(tag)).unwrap();
        }
        catalog
    }

    #[test]
    fn test_tables_parse() {
        assert_eq!(cliffside_rules().unwrap().len(), 4);
        assert_eq!(clifftop_rules().unwrap().len(), 15);
        let selector = is_raised_switch(tag_catalog()).unwrap();
        assert_eq!(selector.rules(true)[0].tag, PILLAR);
        assert_eq!(selector.rules(false)[3].tag, SIDE_FLAT);
    }

    #[test]
    fn test_side_pillar_rule() {
        let rule = cliffside_rules().unwrap()[0];
        assert_eq!(rule.tag, SIDE_PILLAR);
        assert_eq!(rule.required_mask(), Pattern8::NORTH);
        assert_eq!(
            rule.forbidden_mask(),
            Pattern8::NORTH_WEST | Pattern8::NORTH_EAST
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(variant_by_name("north_edge"), Some(NORTH_EDGE));
        assert_eq!(variant_by_name("blank"), Some(BLANK));
        assert_eq!(variant_by_name("lava"), None);
        assert_eq!(variant_name(SOUTHWEST), Some("southwest"));
        assert_eq!(variant_name(VariantTag(20)), None);
    }

    /// Resolve the tile at interior `(x, y)` of a walled map with a few walls added
    fn resolve_with_walls(walls: &[(usize, usize)], x: usize, y: usize) -> Option<VariantTag> {
        let mut terrain = TerrainGrid::walled();
        for &(wx, wy) in walls {
            terrain.set(wx + 1, wy + 1, TerrainKind::Wall).unwrap();
        }
        let grid = build(&terrain).unwrap();
        let selector = is_raised_switch(tag_catalog()).unwrap();
        selector.resolve_tag(grid.tile(x, y).unwrap())
    }

    #[test]
    fn test_lone_wall_is_pillar() {
        assert_eq!(resolve_with_walls(&[(7, 7)], 7, 7), Some(PILLAR));
    }

    #[test]
    fn test_cliff_top_pieces() {
        // Vertical line of three walls: middle is north-south
        let line = [(7, 6), (7, 7), (7, 8)];
        assert_eq!(resolve_with_walls(&line, 7, 7), Some(NORTH_SOUTH));
        // Top of that line only has a wall to the south
        assert_eq!(resolve_with_walls(&line, 7, 6), Some(NORTH));
        assert_eq!(resolve_with_walls(&line, 7, 8), Some(SOUTH));

        let row = [(6, 7), (7, 7), (8, 7)];
        assert_eq!(resolve_with_walls(&row, 7, 7), Some(EAST_WEST));
    }

    #[test]
    fn test_cliff_side_pieces() {
        // Floor directly below a lone wall
        assert_eq!(resolve_with_walls(&[(7, 7)], 7, 8), Some(SIDE_PILLAR));
        // Floor below the west end of a wall run sees walls N and NE
        let run = [(6, 7), (7, 7), (8, 7)];
        assert_eq!(resolve_with_walls(&run, 6, 8), Some(SIDE_WEST));
        assert_eq!(resolve_with_walls(&run, 8, 8), Some(SIDE_EAST));
        assert_eq!(resolve_with_walls(&run, 7, 8), Some(SIDE_FLAT));
        // Floor with nothing to the north matches no rule
        assert_eq!(resolve_with_walls(&run, 7, 6), None);
    }

    #[test]
    fn test_walled_map_edges() {
        // The top-left interior tile sits under the wall ring: N, NW, NE all raised
        assert_eq!(resolve_with_walls(&[], 0, 0), Some(SIDE_FLAT));
        // Open floor further in sees nothing
        assert_eq!(resolve_with_walls(&[], 5, 5), None);
    }
}
