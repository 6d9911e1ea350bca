//! Discourse tree
//!
//! Leaves are EDUs, internal nodes carry a nuclearity pattern and a rhetorical
//! relation. The bracketed form is what the tree formatter consumes:
//!
//! ```text
//! (NS-elaboration (EDU 1) (SN-attribution (EDU 2) (EDU 3)))
//! ```

use std::fmt;
use std::str::FromStr;

/// Which children of a relation node are nuclei
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nuclearity {
    /// Multinuclear: every child is a nucleus
    NN,
    /// Left nucleus, right satellite
    NS,
    /// Left satellite, right nucleus
    SN,
}

impl Nuclearity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Nuclearity::NN => "NN",
            Nuclearity::NS => "NS",
            Nuclearity::SN => "SN",
        }
    }
}

impl fmt::Display for Nuclearity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Nuclearity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NN" => Ok(Nuclearity::NN),
            "NS" => Ok(Nuclearity::NS),
            "SN" => Ok(Nuclearity::SN),
            other => Err(format!("unknown nuclearity '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscourseTree {
    Leaf {
        edu: usize,
    },
    Node {
        nuclearity: Nuclearity,
        relation: String,
        children: Vec<DiscourseTree>,
    },
}

impl DiscourseTree {
    pub fn leaf(edu: usize) -> Self {
        DiscourseTree::Leaf { edu }
    }

    pub fn node(
        nuclearity: Nuclearity,
        relation: impl Into<String>,
        children: Vec<DiscourseTree>,
    ) -> Self {
        DiscourseTree::Node {
            nuclearity,
            relation: relation.into().to_lowercase(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, DiscourseTree::Leaf { .. })
    }

    /// EDU indices covered by this subtree, left to right
    pub fn edus(&self) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_edus(&mut out);
        out
    }

    fn collect_edus(&self, out: &mut Vec<usize>) {
        match self {
            DiscourseTree::Leaf { edu } => out.push(*edu),
            DiscourseTree::Node { children, .. } => {
                for child in children {
                    child.collect_edus(out);
                }
            }
        }
    }

    /// First and last EDU covered by this subtree
    pub fn edu_span(&self) -> (usize, usize) {
        match self {
            DiscourseTree::Leaf { edu } => (*edu, *edu),
            DiscourseTree::Node { children, .. } => {
                let first = children.first().map(|c| c.edu_span().0).unwrap_or(0);
                let last = children.last().map(|c| c.edu_span().1).unwrap_or(0);
                (first, last)
            }
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            DiscourseTree::Leaf { .. } => 1,
            DiscourseTree::Node { children, .. } => {
                1 + children.iter().map(|c| c.depth()).max().unwrap_or(0)
            }
        }
    }

    /// Single-line bracketed serialization
    pub fn to_bracketed(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DiscourseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscourseTree::Leaf { edu } => write!(f, "(EDU {})", edu),
            DiscourseTree::Node {
                nuclearity,
                relation,
                children,
            } => {
                write!(f, "({}-{}", nuclearity, relation)?;
                for child in children {
                    write!(f, " {}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}
