// lexkit - a configurable lexical-analysis toolkit.
// Copyright (C) 2025 Free Software Foundation, Inc.
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <http://www.gnu.org/licenses/>.

//! Apache-style path patterns.
//!
//! A [`PathPattern`] is compiled from a wildcard path and then matched
//! against concrete paths.  Within one segment, `*` matches any run of
//! characters except a separator (including none) and `?` matches exactly
//! one non-separator character.  A segment of exactly `**` matches zero or
//! more whole directories, lazily; `**` may not appear as part of a longer
//! segment.  Separators are `/` or the platform's own.
//!
//! A pattern consisting of a single file segment matches at any depth, as
//! though written `**/name`:
//!
//! ```
//! use lexkit::path::PathPattern;
//!
//! let pattern = PathPattern::compile("*.jsp").unwrap();
//! assert!(pattern.matches("deep/down/page.jsp").unwrap());
//! assert_eq!(pattern.to_string(), "**/*.jsp");
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::MAIN_SEPARATOR;
use std::str::FromStr;

use itertools::Itertools;
use smallvec::SmallVec;
use thiserror::Error as ThisError;


const ANY_DIRECTORY: &str = "**";

/// A pattern compilation or matching failure.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum PatternError {
    #[error("Input pattern cannot be empty.")]
    EmptyPattern,

    #[error("Input pattern cannot end with a file separator.")]
    TrailingSeparator,

    #[error("A path segment cannot have an empty name or pattern.")]
    EmptySegment,

    #[error("The lazy directory matcher must be a whole segment by itself: '{0}'.")]
    EmbeddedAnyDirectory(String),

    #[error("The target path cannot have an empty file or folder name.")]
    EmptyTargetSegment,

    #[error("The target path cannot contain any wildcard characters.")]
    WildcardInTarget,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum NodeType {
    /// A literal or glob segment matched against one directory.
    Directory,
    /// The `**` segment: zero or more whole directories.
    AnyDirectory,
    /// The final segment, matched against the file name.
    File,
}

/// One compiled segment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Node {
    node_type: NodeType,
    pattern: String,
}

impl Node {
    fn new(node_type: NodeType, pattern: &str) -> Self {
        Self {
            node_type,
            pattern: String::from(pattern),
        }
    }
}

/// A compiled, immutable path pattern.
///
/// Equality and hashing are structural: two patterns are equal exactly when
/// they compiled to the same node sequence, and equal patterns hash alike.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathPattern {
    nodes: SmallVec<[Node; 4]>,
}

impl PathPattern {
    /// Compiles a wildcard path into a pattern.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::EmptyPattern);
        }
        if pattern.ends_with('/') || pattern.ends_with(MAIN_SEPARATOR) {
            return Err(PatternError::TrailingSeparator);
        }

        let segments: Vec<&str> = pattern.split(is_separator).collect();
        let mut nodes: SmallVec<[Node; 4]> = SmallVec::new();
        for (index, segment) in segments.iter().enumerate() {
            let last = index == segments.len() - 1;
            if segment.is_empty() {
                return Err(PatternError::EmptySegment);
            } else if *segment == ANY_DIRECTORY {
                nodes.push(Node::new(NodeType::AnyDirectory, segment));
            } else if segment.contains(ANY_DIRECTORY) {
                return Err(PatternError::EmbeddedAnyDirectory(String::from(*segment)));
            } else if last {
                nodes.push(Node::new(NodeType::File, segment));
            } else {
                nodes.push(Node::new(NodeType::Directory, segment));
            }
        }

        // A bare file pattern matches at any depth.
        if nodes.len() == 1 && nodes[0].node_type != NodeType::AnyDirectory {
            nodes.insert(0, Node::new(NodeType::AnyDirectory, ANY_DIRECTORY));
        }

        Ok(Self { nodes })
    }

    /// Tests `path` against this pattern, case-sensitively.
    ///
    /// The target must be a concrete path: a wildcard character or an empty
    /// segment in it is an error.
    pub fn matches(&self, path: &str) -> Result<bool, PatternError> {
        self.matches_with(path, false)
    }

    /// Tests `path` against this pattern, ignoring letter case.
    pub fn matches_ignore_case(&self, path: &str) -> Result<bool, PatternError> {
        self.matches_with(path, true)
    }

    fn matches_with(&self, path: &str, case_insensitive: bool) -> Result<bool, PatternError> {
        if path.is_empty() {
            return Ok(false);
        }
        let segments: Vec<&str> = path.split(is_separator).collect();

        let mut n = 0;
        let mut s = 0;
        while n < self.nodes.len() && s < segments.len() {
            let segment = segments[s];
            if segment.is_empty() {
                return Err(PatternError::EmptyTargetSegment);
            }
            if segment.contains('*') || segment.contains('?') {
                return Err(PatternError::WildcardInTarget);
            }

            let node = &self.nodes[n];
            let next = self.nodes.get(n + 1);
            let last = s == segments.len() - 1;
            match node.node_type {
                NodeType::AnyDirectory => match next {
                    // Try the next node here; otherwise let `**` swallow
                    // this directory and move on.
                    Some(next) => {
                        if match_segment(&next.pattern, segment, case_insensitive) {
                            n += 1;
                        } else if last {
                            return Ok(false);
                        } else {
                            s += 1;
                        }
                    }
                    // A trailing `**` matches all remaining segments.
                    None => return Ok(true),
                },
                NodeType::Directory => {
                    if last || !match_segment(&node.pattern, segment, case_insensitive) {
                        return Ok(false);
                    }
                    s += 1;
                    n += 1;
                }
                NodeType::File => {
                    if !last || !match_segment(&node.pattern, segment, case_insensitive) {
                        return Ok(false);
                    }
                    s += 1;
                    n += 1;
                }
            }
        }
        Ok(s == segments.len() && n == self.nodes.len())
    }
}

impl Display for PathPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}",
            self.nodes.iter().map(|node| node.pattern.as_str()).join("/")
        )
    }
}

impl FromStr for PathPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || c == MAIN_SEPARATOR
}

/// Matches one glob segment against one path segment.  `?` matches any
/// single non-separator character; `*` matches any non-separator run,
/// including an empty one; consecutive `*`s collapse; anything else matches
/// itself, optionally case-folded.
fn match_segment(pattern: &str, target: &str, case_insensitive: bool) -> bool {
    if pattern == "*" {
        return true;
    }
    if pattern.is_empty() && target.is_empty() {
        return true;
    }

    let pattern: Vec<char> = pattern.chars().collect();
    let target: Vec<char> = target.chars().collect();
    let mut pi = 0;
    let mut ti = 0;
    while pi < pattern.len() && ti < target.len() {
        let p = pattern[pi];
        let t = target[ti];
        if p != '*' {
            if p == '?' {
                if is_separator(t) {
                    return false;
                }
                pi += 1;
                ti += 1;
            } else if p == t
                || (case_insensitive && p.to_lowercase().eq(t.to_lowercase()))
                || (is_separator(p) && is_separator(t))
            {
                pi += 1;
                ti += 1;
            } else {
                return false;
            }
        } else {
            match pattern.get(pi + 1) {
                // Consecutive stars collapse.
                Some('*') => pi += 1,
                Some(&next) => {
                    // A star never crosses a separator; otherwise it grows
                    // lazily until the character after it matches.
                    if matches!(t, '/' | '\\')
                        || next == t
                        || (case_insensitive && next.to_lowercase().eq(t.to_lowercase()))
                    {
                        pi += 1;
                    } else {
                        ti += 1;
                    }
                }
                None => {
                    if is_separator(t) {
                        pi += 1;
                    } else {
                        ti += 1;
                    }
                }
            }
        }
    }

    if pi + 1 == pattern.len() {
        return pattern[pi] == '*' && ti == target.len();
    }
    pi == pattern.len() && ti == target.len()
}
