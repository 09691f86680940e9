//! Exact DSATUR-based branch-and-bound solvers for the Graph Coloring problem

// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// coloring solutions and checker
pub mod color;

/// bitset over the color range supported by the exact solvers
pub mod colorset;

/// compressed-sparse-row graph representation
pub mod csr;

/// read/write DIMACS formats
pub mod dimacs;

/// helper and utility methods for executables
pub mod util;

/// exact search algorithms for the graph coloring problem
pub mod search;
