//! Human-readable views of the tree shape, for debugging.

use std::fmt::{self, Display};

use crate::index::{IndexType, NodeIndex};
use crate::map::OrderedMap;

/// Indentation per tree level.
const INDENT: usize = 3;

/// In-order listing of the tree, one node per line.
///
/// Each line carries the node color (`R` or `B`), then `key: value`,
/// indented by depth. The root is suffixed with `(ROOT)`.
pub struct Dump<'a, K, V, Ix> {
    map_ref: &'a OrderedMap<K, V, Ix>,
}

impl<K, V, Ix> Dump<'_, K, V, Ix>
where
    K: Display,
    V: Display,
    Ix: IndexType,
{
    fn write_subtree(
        &self,
        f: &mut fmt::Formatter<'_>,
        x: NodeIndex<Ix>,
        level: usize,
    ) -> fmt::Result {
        if x.is_sentinel() {
            return Ok(());
        }
        let node = &self.map_ref.nodes[x.index()];
        self.write_subtree(f, node.left(), level + 1)?;
        write!(
            f,
            "{:indent$}{} {}: {}",
            "",
            node.color().tag(),
            node.key(),
            node.value(),
            indent = level * INDENT
        )?;
        if x == self.map_ref.root {
            f.write_str(" (ROOT)")?;
        }
        writeln!(f)?;
        self.write_subtree(f, node.right(), level + 1)
    }
}

impl<K, V, Ix> Display for Dump<'_, K, V, Ix>
where
    K: Display,
    V: Display,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_subtree(f, self.map_ref.root, 0)
    }
}

impl<K, V, Ix> OrderedMap<K, V, Ix>
where
    K: Display,
    V: Display,
    Ix: IndexType,
{
    /// A displayable dump of the tree shape.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.dump().to_string(), "   R 1: a\nB 2: b (ROOT)\n");
    /// ```
    #[inline]
    #[must_use]
    pub fn dump(&self) -> Dump<'_, K, V, Ix> {
        Dump { map_ref: self }
    }

    /// Print the tree shape to stdout.
    #[inline]
    pub fn print(&self) {
        print!("{}", self.dump());
    }
}

#[cfg(feature = "graphviz")]
mod graphviz {
    use std::fmt::Display;
    use std::fs::File;
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    use crate::index::IndexType;
    use crate::map::OrderedMap;
    use crate::node::Color;

    impl<K, V, Ix> OrderedMap<K, V, Ix>
    where
        K: Display,
        V: Display,
        Ix: IndexType,
    {
        /// Write the tree as a Graphviz digraph, labelling nodes with `key: value`.
        ///
        /// # Errors
        ///
        /// Returns any I/O error from creating or writing the file.
        pub fn draw(&self, path: impl AsRef<Path>) -> io::Result<()> {
            self.draw_inner(path.as_ref(), true)
        }

        /// Write the tree as a Graphviz digraph, labelling nodes with the key only.
        ///
        /// # Errors
        ///
        /// Returns any I/O error from creating or writing the file.
        pub fn draw_without_value(&self, path: impl AsRef<Path>) -> io::Result<()> {
            self.draw_inner(path.as_ref(), false)
        }

        fn draw_inner(&self, path: &Path, with_value: bool) -> io::Result<()> {
            let mut out = BufWriter::new(File::create(path)?);
            self.write_dot(&mut out, with_value)?;
            out.flush()
        }

        pub(crate) fn write_dot<W: Write>(&self, out: &mut W, with_value: bool) -> io::Result<()> {
            writeln!(out, "digraph {{")?;
            writeln!(out, "    node [style=filled, fontcolor=white];")?;
            for (idx, node) in self.nodes.iter().enumerate().skip(1) {
                let label = if with_value {
                    format!("{}: {}", node.key(), node.value())
                } else {
                    node.key().to_string()
                };
                let fill = match node.color() {
                    Color::Red => "red",
                    Color::Black => "black",
                };
                writeln!(
                    out,
                    "    n{idx} [label=\"{}\", fillcolor={fill}];",
                    label.replace('"', "\\\"")
                )?;
                for child in [node.left(), node.right()] {
                    if !child.is_sentinel() {
                        writeln!(out, "    n{idx} -> n{};", child.index())?;
                    }
                }
            }
            writeln!(out, "}}")
        }
    }
}
