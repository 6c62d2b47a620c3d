//! Pattern rules keyed to sprite variants

use crate::diagram::{format_diagram, parse_diagram};
use crate::SelectorError;
use kazhard_core::Pattern8;
use std::fmt;

/// Identifies a named sprite slot (e.g. "north edge", "pillar")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantTag(pub u8);

/// Number of distinct tags a `VariantTag` can name
pub const MAX_VARIANTS: usize = u8::MAX as usize + 1;

impl VariantTag {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A required/forbidden mask pair that selects a variant.
///
/// Built from two patterns: `relevant` names the directions this rule looks
/// at, `expected` says which of those must be on. Directions outside
/// `relevant` are don't-care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternRule {
    pub tag: VariantTag,
    required: Pattern8,
    forbidden: Pattern8,
}

impl PatternRule {
    pub fn new(tag: VariantTag, relevant: Pattern8, expected: Pattern8) -> Self {
        Self {
            tag,
            required: relevant & expected,
            forbidden: relevant & !expected,
        }
    }

    /// Create a rule from a relevance diagram and an expectation diagram
    pub fn from_diagrams(
        tag: VariantTag,
        relevant: &str,
        expected: &str,
    ) -> Result<Self, SelectorError> {
        Ok(Self::new(
            tag,
            parse_diagram(relevant)?,
            parse_diagram(expected)?,
        ))
    }

    pub fn required_mask(&self) -> Pattern8 {
        self.required
    }

    pub fn forbidden_mask(&self) -> Pattern8 {
        self.forbidden
    }

    pub fn matches(&self, subject: Pattern8) -> bool {
        subject.matches_masks(self.required, self.forbidden)
    }
}

impl fmt::Display for PatternRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} required [{}] forbidden [{}]",
            self.tag.0,
            format_diagram(self.required),
            format_diagram(self.forbidden)
        )
    }
}
