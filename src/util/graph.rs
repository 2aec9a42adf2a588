//! Directed graph over an arena of vertices
//!
//! Vertices are stored once and addressed by index; edges are index pairs.
//! Only the operations the linters need are provided: build, count and ask
//! whether any cycle exists.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct DirectedGraph<T> {
    vertices: Vec<T>,
    indices: HashMap<T, usize>,
    successors: Vec<BTreeSet<usize>>,
}

impl<T: Eq + Hash + Clone> DirectedGraph<T> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: HashMap::new(),
            successors: Vec::new(),
        }
    }

    /// Add a vertex, returning its index. Adding an existing value is a no-op.
    pub fn add_vertex(&mut self, value: T) -> usize {
        if let Some(&index) = self.indices.get(&value) {
            return index;
        }
        let index = self.vertices.len();
        self.indices.insert(value.clone(), index);
        self.vertices.push(value);
        self.successors.push(BTreeSet::new());
        index
    }

    /// Add an edge `from → to`, creating missing vertices. Parallel edges
    /// collapse into one; self-loops are kept.
    pub fn add_edge(&mut self, from: T, to: T) {
        let from = self.add_vertex(from);
        let to = self.add_vertex(to);
        self.successors[from].insert(to);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.successors.iter().map(BTreeSet::len).sum()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.indices.contains_key(value)
    }

    /// True if any directed cycle exists, self-loops included.
    ///
    /// Iterative depth-first search with three-colour marking, so deep
    /// foreign-key chains cannot overflow the stack.
    pub fn contains_cycle(&self) -> bool {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            OnStack,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.vertices.len()];

        for root in 0..self.vertices.len() {
            if marks[root] != Mark::Unvisited {
                continue;
            }
            marks[root] = Mark::OnStack;
            let mut stack: Vec<(usize, Vec<usize>)> =
                vec![(root, self.successors[root].iter().copied().collect())];

            while let Some(top) = stack.len().checked_sub(1) {
                match stack[top].1.pop() {
                    Some(next) => match marks[next] {
                        Mark::OnStack => return true,
                        Mark::Done => {}
                        Mark::Unvisited => {
                            marks[next] = Mark::OnStack;
                            let successors = self.successors[next].iter().copied().collect();
                            stack.push((next, successors));
                        }
                    },
                    None => {
                        marks[stack[top].0] = Mark::Done;
                        stack.pop();
                    }
                }
            }
        }
        false
    }
}

impl<T: Eq + Hash + Clone> Default for DirectedGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}
