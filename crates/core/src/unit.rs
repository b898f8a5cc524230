//! Source units and their chapter/section/subsection positions.
//!
//! A unit is identified by a serial such as `7-2-3`: chapter 7, section 2,
//! subsection 3. Zeros mark the level: `7-0-0` is a chapter, `7-2-0` a section.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::StructuralError;

/// Hierarchical position of a unit.
///
/// Ordering is numeric and lexicographic over `(chapter, section, subsection)`,
/// which is the document order units are expected to arrive in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    /// Chapter number
    pub chapter: u32,
    /// Section number, 0 for a chapter-level unit
    pub section: u32,
    /// Subsection number, 0 for chapter- and section-level units
    pub subsection: u32,
}

/// Structural level implied by a position's zero fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// `C-0-0`
    Chapter,
    /// `C-S-0`
    Section,
    /// `C-S-Z`
    Subsection,
}

impl Position {
    /// Create a position from its three numbers.
    pub const fn new(chapter: u32, section: u32, subsection: u32) -> Self {
        Self {
            chapter,
            section,
            subsection,
        }
    }

    /// Parse a `chapter-section-subsection` serial.
    pub fn from_serial(serial: &str) -> Result<Self, StructuralError> {
        let invalid = || StructuralError::InvalidSerial {
            serial: serial.to_string(),
        };

        let mut parts = serial.trim().split('-');
        let mut next = || -> Result<u32, StructuralError> {
            parts
                .next()
                .and_then(|p| p.trim().parse::<u32>().ok())
                .ok_or_else(invalid)
        };
        let position = Position::new(next()?, next()?, next()?);

        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(position)
    }

    /// Structural level of this position.
    pub fn level(&self) -> Level {
        match (self.section, self.subsection) {
            (0, 0) => Level::Chapter,
            (_, 0) => Level::Section,
            _ => Level::Subsection,
        }
    }

    /// Original position this unit's parent must occupy.
    ///
    /// Chapters hang off the root and have none.
    pub fn parent(&self) -> Option<Position> {
        match self.level() {
            Level::Chapter => None,
            Level::Section => Some(Position::new(self.chapter, 0, 0)),
            Level::Subsection => Some(Position::new(self.chapter, self.section, 0)),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.chapter, self.section, self.subsection)
    }
}

impl FromStr for Position {
    type Err = StructuralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_serial(s)
    }
}

/// One ingested document unit: a title plus its body paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceUnit {
    /// Position the unit was authored at (renumbered by the tree builder)
    pub position: Position,
    /// Unit title
    pub title: String,
    /// Body paragraphs in order
    pub paragraphs: Vec<String>,
}

impl SourceUnit {
    /// Creates a unit from already separated parts.
    pub fn new(position: Position, title: impl Into<String>, paragraphs: Vec<String>) -> Self {
        Self {
            position,
            title: title.into(),
            paragraphs,
        }
    }

    /// Builds a unit from the raw paragraph list of a source document.
    ///
    /// Paragraphs with embedded newlines are split into separate paragraphs.
    /// The first paragraph is the title and the second is a separator line;
    /// the remaining non-empty paragraphs form the body.
    pub fn from_paragraphs<I, S>(serial: &str, raw: I) -> Result<Self, StructuralError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let position = Position::from_serial(serial)?;
        let mut lines: Vec<String> = Vec::new();
        for paragraph in raw {
            lines.extend(paragraph.as_ref().split('\n').map(str::to_string));
        }

        let mut lines = lines.into_iter();
        let title = lines
            .next()
            .ok_or(StructuralError::EmptyUnit { unit: position })?;
        let paragraphs = lines.skip(1).filter(|p| !p.is_empty()).collect();

        Ok(Self {
            position,
            title,
            paragraphs,
        })
    }
}

/// Sorts units into document order by original position.
pub fn sort_units(units: &mut [SourceUnit]) {
    units.sort_by_key(|unit| unit.position);
}

/// Identifier shown to authors for a renumbered unit.
///
/// Includes the original serial when renumbering changed it, so the author
/// can find the source document.
pub fn unit_label(canonical: Position, original: Position) -> String {
    if canonical == original {
        canonical.to_string()
    } else {
        format!("{canonical} (originally {original})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serial() {
        assert_eq!(Position::from_serial("7-2-3").unwrap(), Position::new(7, 2, 3));
        assert_eq!("12-0-0".parse::<Position>().unwrap(), Position::new(12, 0, 0));
    }

    #[test]
    fn rejects_malformed_serials() {
        for serial in ["7-2", "7-2-3-4", "a-0-0", "", "7--0"] {
            assert!(
                matches!(
                    Position::from_serial(serial),
                    Err(StructuralError::InvalidSerial { .. })
                ),
                "serial {serial:?} should be rejected"
            );
        }
    }

    #[test]
    fn level_and_parent_follow_zero_fields() {
        assert_eq!(Position::new(3, 0, 0).level(), Level::Chapter);
        assert_eq!(Position::new(3, 0, 0).parent(), None);
        assert_eq!(Position::new(3, 2, 0).level(), Level::Section);
        assert_eq!(Position::new(3, 2, 0).parent(), Some(Position::new(3, 0, 0)));
        assert_eq!(Position::new(3, 2, 5).level(), Level::Subsection);
        assert_eq!(Position::new(3, 2, 5).parent(), Some(Position::new(3, 2, 0)));
    }

    #[test]
    fn sorts_numerically_not_lexically() {
        let mut units = vec![
            SourceUnit::new(Position::new(10, 0, 0), "ten", vec![]),
            SourceUnit::new(Position::new(2, 1, 0), "two-one", vec![]),
            SourceUnit::new(Position::new(2, 0, 0), "two", vec![]),
        ];
        sort_units(&mut units);
        let titles: Vec<_> = units.iter().map(|u| u.title.as_str()).collect();
        assert_eq!(titles, ["two", "two-one", "ten"]);
    }

    #[test]
    fn from_paragraphs_takes_title_and_skips_separator() {
        let unit = SourceUnit::from_paragraphs(
            "1-2-0",
            ["急救概述", "", "第一段\n第二段", "", "第三段"],
        )
        .unwrap();
        assert_eq!(unit.position, Position::new(1, 2, 0));
        assert_eq!(unit.title, "急救概述");
        assert_eq!(unit.paragraphs, ["第一段", "第二段", "第三段"]);
    }

    #[test]
    fn from_paragraphs_allows_title_only() {
        let unit = SourceUnit::from_paragraphs("1-0-0", ["标题", ""]).unwrap();
        assert!(unit.paragraphs.is_empty());
    }

    #[test]
    fn from_paragraphs_rejects_empty_documents() {
        let empty: [&str; 0] = [];
        assert_eq!(
            SourceUnit::from_paragraphs("1-0-0", empty),
            Err(StructuralError::EmptyUnit {
                unit: Position::new(1, 0, 0)
            })
        );
    }

    #[test]
    fn label_mentions_original_only_when_renumbered() {
        let same = Position::new(1, 0, 0);
        assert_eq!(unit_label(same, same), "1-0-0");
        assert_eq!(
            unit_label(Position::new(1, 1, 0), Position::new(6, 3, 0)),
            "1-1-0 (originally 6-3-0)"
        );
    }
}
