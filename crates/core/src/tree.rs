//! Document tree construction and canonical renumbering.
//!
//! Units arrive in original-position order, possibly with gaps (for example
//! when a handbook only takes a subset of chapters). The builder places each
//! unit under its structural parent and assigns a contiguous canonical tag;
//! a depth-first walk then yields the renumbered collection.

use log::debug;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use crate::error::StructuralError;
use crate::unit::{Level, Position, SourceUnit, unit_label};

/// Index of a node inside a [`DocumentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node, which has no payload and no parent.
    pub const ROOT: NodeId = NodeId(0);
}

/// A placed unit (or the root).
#[derive(Debug, Clone)]
pub struct DocumentNode {
    /// Original position of the unit; `None` for the root
    pub identifier: Option<Position>,
    /// Canonical position assigned during the build
    pub canonical: Position,
    /// Parent node; `None` for the root
    pub parent: Option<NodeId>,
    /// Children in insertion order
    pub children: Vec<NodeId>,
    /// The unit itself; `None` for the root
    pub payload: Option<SourceUnit>,
}

impl DocumentNode {
    /// Canonical `C-S-Z` tag.
    pub fn tag(&self) -> String {
        self.canonical.to_string()
    }

    fn title(&self) -> &str {
        self.payload.as_ref().map_or("", |unit| unit.title.as_str())
    }
}

/// A unit of the canonical collection, positioned by its canonical tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenumberedUnit {
    /// Position the unit was authored at
    pub original: Position,
    /// The unit with its position overwritten by the canonical tag
    pub unit: SourceUnit,
}

impl RenumberedUnit {
    /// Identifier for messages shown to authors.
    pub fn label(&self) -> String {
        unit_label(self.unit.position, self.original)
    }
}

/// Node counts by canonical level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TreeStatistics {
    /// Chapter-level nodes
    pub chapters: usize,
    /// Section-level nodes
    pub sections: usize,
    /// Subsection-level nodes
    pub subsections: usize,
    /// All non-root nodes
    pub total: usize,
}

/// Chapter/section/subsection tree over a unit collection.
#[derive(Debug, Clone)]
pub struct DocumentTree {
    nodes: Vec<DocumentNode>,
    index: HashMap<Position, NodeId>,
}

#[derive(Debug, Default)]
struct Counters {
    chapter: u32,
    section: u32,
    subsection: u32,
}

impl DocumentTree {
    fn empty() -> Self {
        Self {
            nodes: vec![DocumentNode {
                identifier: None,
                canonical: Position::default(),
                parent: None,
                children: Vec::new(),
                payload: None,
            }],
            index: HashMap::new(),
        }
    }

    /// Builds the tree from units in document order.
    ///
    /// Parent requirements are checked against the original positions of the
    /// whole collection, never against canonical tags.
    pub fn build(units: Vec<SourceUnit>) -> Result<Self, StructuralError> {
        let mut originals = HashSet::with_capacity(units.len());
        for unit in &units {
            if !originals.insert(unit.position) {
                return Err(StructuralError::DuplicateUnit {
                    unit: unit.position,
                });
            }
        }

        let mut tree = Self::empty();
        let mut counters = Counters::default();

        for unit in units {
            let original = unit.position;
            let (canonical, parent) = match original.level() {
                Level::Chapter => {
                    if original.chapter == 0 {
                        return Err(StructuralError::InvalidChapter { unit: original });
                    }
                    counters.chapter += 1;
                    counters.section = 0;
                    counters.subsection = 0;
                    (Position::new(counters.chapter, 0, 0), NodeId::ROOT)
                }
                Level::Section => {
                    let parent = tree.required_parent(original, &originals)?;
                    counters.section += 1;
                    counters.subsection = 0;
                    (
                        Position::new(counters.chapter, counters.section, 0),
                        parent,
                    )
                }
                Level::Subsection => {
                    let parent = tree.required_parent(original, &originals)?;
                    counters.subsection += 1;
                    (
                        Position::new(counters.chapter, counters.section, counters.subsection),
                        parent,
                    )
                }
            };

            debug!("placing unit {original} as {canonical}");
            tree.insert(original, canonical, parent, unit);
        }

        Ok(tree)
    }

    fn required_parent(
        &self,
        unit: Position,
        originals: &HashSet<Position>,
    ) -> Result<NodeId, StructuralError> {
        let Some(parent) = unit.parent() else {
            return Ok(NodeId::ROOT);
        };
        if !originals.contains(&parent) {
            return Err(StructuralError::MissingParent { unit, parent });
        }
        self.index
            .get(&parent)
            .copied()
            .ok_or(StructuralError::ParentOutOfOrder { unit, parent })
    }

    fn insert(&mut self, original: Position, canonical: Position, parent: NodeId, unit: SourceUnit) {
        let id = NodeId(self.nodes.len());
        self.nodes.push(DocumentNode {
            identifier: Some(original),
            canonical,
            parent: Some(parent),
            children: Vec::new(),
            payload: Some(unit),
        });
        self.nodes[parent.0].children.push(id);
        self.index.insert(original, id);
    }

    /// The root node.
    pub fn root(&self) -> &DocumentNode {
        &self.nodes[NodeId::ROOT.0]
    }

    /// Node by id.
    pub fn node(&self, id: NodeId) -> Option<&DocumentNode> {
        self.nodes.get(id.0)
    }

    /// Number of placed units, excluding the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Whether no unit was placed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Node for a unit's original position.
    pub fn find(&self, original: Position) -> Option<&DocumentNode> {
        self.index.get(&original).and_then(|id| self.node(*id))
    }

    /// Non-root node ids in depth-first, insertion order.
    pub fn depth_first(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.len());
        let mut stack: Vec<NodeId> = self.root().children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        order
    }

    /// The canonical collection: units in depth-first order, each positioned
    /// at its canonical tag.
    pub fn canonical_units(&self) -> Vec<RenumberedUnit> {
        self.depth_first()
            .into_iter()
            .filter_map(|id| {
                let node = &self.nodes[id.0];
                let original = node.identifier?;
                let mut unit = node.payload.clone()?;
                unit.position = node.canonical;
                Some(RenumberedUnit { original, unit })
            })
            .collect()
    }

    /// Counts nodes by canonical level.
    pub fn statistics(&self) -> TreeStatistics {
        let mut stats = TreeStatistics::default();
        for node in self.nodes.iter().skip(1) {
            match node.canonical.level() {
                Level::Chapter => stats.chapters += 1,
                Level::Section => stats.sections += 1,
                Level::Subsection => stats.subsections += 1,
            }
        }
        stats.total = stats.chapters + stats.sections + stats.subsections;
        stats
    }

    /// Canonical tags from the top-level ancestor down to the unit.
    pub fn path(&self, original: Position) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = self.index.get(&original).copied();
        while let Some(id) = current {
            if id == NodeId::ROOT {
                break;
            }
            let node = &self.nodes[id.0];
            path.push(node.tag());
            current = node.parent;
        }
        path.reverse();
        path
    }

    /// Canonical tags of a unit's direct children.
    pub fn children_tags(&self, original: Position) -> Vec<String> {
        self.find(original)
            .map(|node| node.children.iter().map(|id| self.nodes[id.0].tag()).collect())
            .unwrap_or_default()
    }

    /// Indented text rendering of the tree, one unit per line.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for &id in &self.root().children {
            let node = &self.nodes[id.0];
            writeln!(out, "{} {}", node.tag(), node.title()).ok();
            self.outline_children(id, "", &mut out);
        }
        out
    }

    fn outline_children(&self, id: NodeId, prefix: &str, out: &mut String) {
        let children = &self.nodes[id.0].children;
        for (i, &child) in children.iter().enumerate() {
            let last = i + 1 == children.len();
            let node = &self.nodes[child.0];
            let branch = if last { "└── " } else { "├── " };
            writeln!(out, "{prefix}{branch}{} {}", node.tag(), node.title()).ok();
            let next = format!("{prefix}{}", if last { "    " } else { "│   " });
            self.outline_children(child, &next, out);
        }
    }
}

/// Builds the tree and returns it with the canonical collection.
pub fn build_document(
    units: Vec<SourceUnit>,
) -> Result<(DocumentTree, Vec<RenumberedUnit>), StructuralError> {
    let tree = DocumentTree::build(units)?;
    let canonical = tree.canonical_units();
    Ok((tree, canonical))
}
