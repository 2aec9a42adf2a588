//! Small data structures and helpers shared by the linters

pub mod graph;
pub mod identifier;
pub mod multimap;
pub mod prefix;

pub use graph::DirectedGraph;
pub use multimap::Multimap;
