//! Two-branch variant selection
//!
//! A [`VariantSelector`] looks through one of two ordered rule lists, picked
//! by a predicate on the center tile, and returns the sprite bound to the
//! first matching rule's variant.

use crate::rule::{PatternRule, VariantTag, MAX_VARIANTS};
use crate::SelectorError;
use kazhard_core::{Pattern8, TileRecord};
use log::{debug, trace};
use std::fmt;

/// Which predicate splits the rule lists, and which pattern is matched
#[derive(Clone, Copy)]
pub enum SwitchKind {
    /// Branch on `is_raised`, match the adjacency pattern
    IsRaised,
    /// Caller-supplied predicate and pattern extractor
    Custom {
        predicate: fn(&TileRecord) -> bool,
        pattern: fn(&TileRecord) -> Pattern8,
    },
}

impl fmt::Debug for SwitchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchKind::IsRaised => f.write_str("IsRaised"),
            SwitchKind::Custom { .. } => f.write_str("Custom"),
        }
    }
}

impl SwitchKind {
    pub fn is_true(&self, tile: &TileRecord) -> bool {
        match self {
            SwitchKind::IsRaised => tile.is_raised(),
            SwitchKind::Custom { predicate, .. } => predicate(tile),
        }
    }

    pub fn pattern(&self, tile: &TileRecord) -> Pattern8 {
        match self {
            SwitchKind::IsRaised => tile.adjacency_pattern(),
            SwitchKind::Custom { pattern, .. } => pattern(tile),
        }
    }
}

/// Sprite handles bound per variant tag, with a default for everything
/// left unbound
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteCatalog<H> {
    sprites: Vec<Option<H>>,
    default: H,
}

impl<H> SpriteCatalog<H> {
    /// Create a catalog declaring `variant_count` tags, all resolving to `default`.
    ///
    /// Fails if `variant_count` exceeds what a [`VariantTag`] can address.
    pub fn new(variant_count: usize, default: H) -> Result<Self, SelectorError> {
        if variant_count > MAX_VARIANTS {
            return Err(SelectorError::TooManyVariants(variant_count));
        }
        let mut sprites = Vec::with_capacity(variant_count);
        sprites.resize_with(variant_count, || None);
        Ok(Self { sprites, default })
    }

    pub fn variant_count(&self) -> usize {
        self.sprites.len()
    }

    pub fn set_default(&mut self, sprite: H) {
        self.default = sprite;
    }

    pub fn set_sprite(&mut self, tag: VariantTag, sprite: H) -> Result<(), SelectorError> {
        let slot = self
            .sprites
            .get_mut(tag.index())
            .ok_or(SelectorError::InvalidVariantTag(tag.index()))?;
        *slot = Some(sprite);
        Ok(())
    }

    /// Sprite bound to `tag`, or the default
    pub fn sprite(&self, tag: VariantTag) -> &H {
        self.sprites
            .get(tag.index())
            .and_then(Option::as_ref)
            .unwrap_or(&self.default)
    }

    pub fn default_sprite(&self) -> &H {
        &self.default
    }

    pub fn is_bound(&self, tag: VariantTag) -> bool {
        matches!(self.sprites.get(tag.index()), Some(Some(_)))
    }

    /// Declared tags with no sprite of their own
    pub fn unbound(&self) -> impl Iterator<Item = VariantTag> + '_ {
        self.sprites
            .iter()
            .enumerate()
            .filter(|(_, sprite)| sprite.is_none())
            .map(|(index, _)| VariantTag(index as u8))
    }
}

/// Collects rules before freezing them into a [`VariantSelector`]
#[derive(Debug, Clone)]
pub struct VariantSelectorBuilder<H> {
    kind: SwitchKind,
    when_true: Vec<PatternRule>,
    when_false: Vec<PatternRule>,
    catalog: SpriteCatalog<H>,
}

impl<H> VariantSelectorBuilder<H> {
    pub fn new(kind: SwitchKind, catalog: SpriteCatalog<H>) -> Self {
        Self {
            kind,
            when_true: Vec::new(),
            when_false: Vec::new(),
            catalog,
        }
    }

    /// Append a rule to the list used when the predicate holds
    pub fn when_true(mut self, rule: PatternRule) -> Self {
        self.when_true.push(rule);
        self
    }

    /// Append a rule to the list used when the predicate fails
    pub fn when_false(mut self, rule: PatternRule) -> Self {
        self.when_false.push(rule);
        self
    }

    pub fn with_true_rules(mut self, rules: impl IntoIterator<Item = PatternRule>) -> Self {
        self.when_true.extend(rules);
        self
    }

    pub fn with_false_rules(mut self, rules: impl IntoIterator<Item = PatternRule>) -> Self {
        self.when_false.extend(rules);
        self
    }

    pub fn catalog_mut(&mut self) -> &mut SpriteCatalog<H> {
        &mut self.catalog
    }

    /// Freeze the selector. Fails if any rule names an undeclared tag.
    pub fn build(self) -> Result<VariantSelector<H>, SelectorError> {
        let variant_count = self.catalog.variant_count();
        if let Some(rule) = self
            .when_true
            .iter()
            .chain(&self.when_false)
            .find(|rule| rule.tag.index() >= variant_count)
        {
            return Err(SelectorError::InvalidVariantTag(rule.tag.index()));
        }

        debug!(
            "Built variant selector ({:?}): {} true rules, {} false rules, {} variants",
            self.kind,
            self.when_true.len(),
            self.when_false.len(),
            variant_count
        );
        Ok(VariantSelector {
            kind: self.kind,
            when_true: self.when_true,
            when_false: self.when_false,
            catalog: self.catalog,
        })
    }
}

/// Immutable tile-to-sprite resolver
#[derive(Debug, Clone)]
pub struct VariantSelector<H> {
    kind: SwitchKind,
    when_true: Vec<PatternRule>,
    when_false: Vec<PatternRule>,
    catalog: SpriteCatalog<H>,
}

impl<H> VariantSelector<H> {
    pub fn builder(kind: SwitchKind, catalog: SpriteCatalog<H>) -> VariantSelectorBuilder<H> {
        VariantSelectorBuilder::new(kind, catalog)
    }

    pub fn kind(&self) -> SwitchKind {
        self.kind
    }

    /// The ordered rule list for one predicate outcome
    pub fn rules(&self, branch: bool) -> &[PatternRule] {
        if branch {
            &self.when_true
        } else {
            &self.when_false
        }
    }

    pub fn catalog(&self) -> &SpriteCatalog<H> {
        &self.catalog
    }

    /// Variant of the first rule matching the tile, in declaration order
    pub fn resolve_tag(&self, tile: &TileRecord) -> Option<VariantTag> {
        let branch = self.kind.is_true(tile);
        let subject = self.kind.pattern(tile);
        let tag = self
            .rules(branch)
            .iter()
            .find(|rule| rule.matches(subject))
            .map(|rule| rule.tag);
        trace!(
            "Resolved tile {:?} (branch {}, pattern {:08b}) to {:?}",
            tile.coordinates(),
            branch,
            subject.bits(),
            tag
        );
        tag
    }

    /// Sprite for the tile, falling back to the catalog default
    pub fn resolve(&self, tile: &TileRecord) -> &H {
        match self.resolve_tag(tile) {
            Some(tag) => self.catalog.sprite(tag),
            None => self.catalog.default_sprite(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kazhard_core::{build, Direction, TerrainGrid, TerrainKind};

    const DOUBLE: VariantTag = VariantTag(0);
    const SINGLE: VariantTag = VariantTag(1);
    const FLOOR: VariantTag = VariantTag(2);

    fn catalog() -> SpriteCatalog<&'static str> {
        let mut catalog = SpriteCatalog::new(3, "default").unwrap();
        catalog.set_sprite(DOUBLE, "double").unwrap();
        catalog.set_sprite(SINGLE, "single").unwrap();
        catalog.set_sprite(FLOOR, "floor").unwrap();
        catalog
    }

    fn north_rule(tag: VariantTag) -> PatternRule {
        PatternRule::new(tag, Pattern8::NORTH, Pattern8::NORTH)
    }

    #[test]
    fn test_catalog_rejects_out_of_range() {
        let mut catalog = SpriteCatalog::new(3, "default").unwrap();
        assert_eq!(
            catalog.set_sprite(VariantTag(3), "nope"),
            Err(SelectorError::InvalidVariantTag(3))
        );
        assert_eq!(*catalog.sprite(VariantTag(3)), "default");
    }

    #[test]
    fn test_catalog_unbound_resolves_default() {
        let mut catalog = SpriteCatalog::new(3, "default").unwrap();
        catalog.set_sprite(SINGLE, "single").unwrap();
        assert_eq!(*catalog.sprite(DOUBLE), "default");
        assert_eq!(*catalog.sprite(SINGLE), "single");
        assert!(catalog.is_bound(SINGLE));
        assert_eq!(catalog.unbound().collect::<Vec<_>>(), vec![DOUBLE, FLOOR]);

        catalog.set_default("blank");
        assert_eq!(*catalog.sprite(FLOOR), "blank");
    }

    #[test]
    fn test_catalog_rejects_oversized_declaration() {
        assert_eq!(
            SpriteCatalog::new(MAX_VARIANTS + 1, 0).err(),
            Some(SelectorError::TooManyVariants(MAX_VARIANTS + 1))
        );

        // The largest allowed catalog reports every slot correctly
        let mut catalog = SpriteCatalog::new(MAX_VARIANTS, 0).unwrap();
        for index in 0..MAX_VARIANTS - 3 {
            catalog.set_sprite(VariantTag(index as u8), 1).unwrap();
        }
        let unbound: Vec<_> = catalog.unbound().collect();
        assert_eq!(unbound, vec![VariantTag(253), VariantTag(254), VariantTag(255)]);
        assert!(unbound.iter().all(|tag| !catalog.is_bound(*tag)));
    }

    #[test]
    fn test_build_rejects_undeclared_rule_tag() {
        let result = VariantSelector::builder(SwitchKind::IsRaised, catalog())
            .when_false(north_rule(VariantTag(9)))
            .build();
        assert_eq!(result.err(), Some(SelectorError::InvalidVariantTag(9)));
    }

    #[test]
    fn test_first_declared_match_wins() {
        let mut terrain = TerrainGrid::walled();
        terrain.set(5, 4, TerrainKind::Wall).unwrap();
        let grid = build(&terrain).unwrap();
        // Interior (4, 4) is floor with a wall to the north
        let tile = grid.tile(4, 4).unwrap();
        assert!(tile.adjacency_pattern().has(Direction::North));

        let first = VariantSelector::builder(SwitchKind::IsRaised, catalog())
            .when_false(north_rule(SINGLE))
            .when_false(north_rule(DOUBLE))
            .build()
            .unwrap();
        assert_eq!(*first.resolve(tile), "single");

        let swapped = VariantSelector::builder(SwitchKind::IsRaised, catalog())
            .when_false(north_rule(DOUBLE))
            .when_false(north_rule(SINGLE))
            .build()
            .unwrap();
        assert_eq!(*swapped.resolve(tile), "double");
    }

    #[test]
    fn test_branch_selection() {
        let mut terrain = TerrainGrid::walled();
        terrain.set(5, 5, TerrainKind::Wall).unwrap();
        let grid = build(&terrain).unwrap();
        let wall = grid.tile(4, 4).unwrap();
        assert!(wall.is_raised());

        let selector = VariantSelector::builder(SwitchKind::IsRaised, catalog())
            .when_true(PatternRule::new(DOUBLE, Pattern8::empty(), Pattern8::empty()))
            .when_false(PatternRule::new(FLOOR, Pattern8::empty(), Pattern8::empty()))
            .build()
            .unwrap();
        assert_eq!(selector.resolve_tag(wall), Some(DOUBLE));
        assert_eq!(selector.resolve_tag(grid.tile(8, 8).unwrap()), Some(FLOOR));
    }

    #[test]
    fn test_no_match_falls_back_to_default() {
        let grid = build(&TerrainGrid::walled()).unwrap();
        // Open floor in the middle of the map sees nothing
        let tile = grid.tile(8, 8).unwrap();
        let selector = VariantSelector::builder(SwitchKind::IsRaised, catalog())
            .when_false(north_rule(SINGLE))
            .build()
            .unwrap();
        assert_eq!(selector.resolve_tag(tile), None);
        assert_eq!(*selector.resolve(tile), "default");
    }

    #[test]
    fn test_custom_switch() {
        fn is_ramp_base(tile: &TileRecord) -> bool {
            tile.is_ramp_base()
        }
        fn everything(_: &TileRecord) -> Pattern8 {
            Pattern8::all()
        }

        let mut terrain = TerrainGrid::walled();
        terrain.set(8, 8, TerrainKind::RampBase).unwrap();
        let grid = build(&terrain).unwrap();

        let kind = SwitchKind::Custom {
            predicate: is_ramp_base,
            pattern: everything,
        };
        let selector = VariantSelector::builder(kind, catalog())
            .with_true_rules([PatternRule::new(SINGLE, Pattern8::all(), Pattern8::all())])
            .build()
            .unwrap();
        assert_eq!(*selector.resolve(grid.tile(7, 7).unwrap()), "single");
        assert_eq!(*selector.resolve(grid.tile(0, 0).unwrap()), "default");
    }
}
