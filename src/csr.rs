use std::fmt;

use crate::color::VertexId;
use crate::dimacs::read_from_file;

/** inconsistency found while validating a CSR graph given as raw arrays. */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsrError {
    /// `start` and `deg` do not describe the same number of vertices
    LengthMismatch(usize, usize),
    /// the neighbor slice of a vertex exceeds the adjacency array
    SliceOutOfBounds(VertexId),
    /// a vertex references a neighbor outside `[0, n)`
    NeighborOutOfRange(VertexId, VertexId),
    /// a vertex is adjacent to itself
    SelfLoop(VertexId),
    /// a neighbor slice is not sorted in strictly increasing order
    UnsortedNeighbors(VertexId),
    /// edge (u,v) present but (v,u) missing
    MissingReverse(VertexId, VertexId),
}

impl fmt::Display for CsrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::LengthMismatch(a, b) =>
                write!(f, "start has {} entries but deg has {}", a, b),
            Self::SliceOutOfBounds(v) =>
                write!(f, "neighbor slice of vertex {} exceeds the adjacency array", v),
            Self::NeighborOutOfRange(v, w) =>
                write!(f, "vertex {} references out-of-range neighbor {}", v, w),
            Self::SelfLoop(v) => write!(f, "vertex {} is adjacent to itself", v),
            Self::UnsortedNeighbors(v) =>
                write!(f, "neighbors of vertex {} are not sorted strictly increasing", v),
            Self::MissingReverse(u, v) =>
                write!(f, "edge ({},{}) present but ({},{}) missing", u, v, v, u),
        }
    }
}

impl std::error::Error for CsrError {}

/** models a Graph Coloring instance in compressed-sparse-row form.

The neighbor lists of all vertices are concatenated in `adj`; vertex v owns the
slice `adj[start[v] .. start[v]+deg[v]]`, sorted increasing, without duplicates
nor self-loops. The layout is immutable once built, so the solvers can borrow
it for the whole search.
*/
#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// nb vertices
    n: usize,
    /// nb edges
    m: usize,
    /// flat adjacency: concatenation of the sorted neighbor lists
    adj: Vec<VertexId>,
    /// start[v]: first index of v's neighbors in `adj`
    start: Vec<usize>,
    /// deg[v]: degree of v
    deg: Vec<usize>,
}

impl CsrGraph {

    /// number of vertices
    pub fn n(&self) -> usize { self.n }

    /// number of edges
    pub fn nb_edges(&self) -> usize { self.m }

    /// degree of vertex v
    pub fn degree(&self, v: VertexId) -> usize { self.deg[v] }

    /// sorted neighbor list of vertex v
    pub fn neighbors(&self, v: VertexId) -> &[VertexId] {
        &self.adj[self.start[v]..self.start[v] + self.deg[v]]
    }

    /** returns true iff t is a neighbor of v.
    O(log deg(v)) by binary search on the sorted neighbor slice. */
    pub fn has_edge(&self, v: VertexId, t: VertexId) -> bool {
        self.neighbors(v).binary_search(&t).is_ok()
    }

    /** constructor using an adjacency list.

    The input is normalized: neighbor lists are symmetrized, sorted, duplicate
    edges merged and self-loops dropped. Panics if a neighbor index is >= n. */
    pub fn from_adj_list(adj_list: Vec<Vec<VertexId>>) -> Self {
        let n = adj_list.len();
        let mut lists: Vec<Vec<VertexId>> = vec![Vec::new(); n];
        for (v, neighbors) in adj_list.iter().enumerate() {
            for w in neighbors {
                assert!(*w < n, "from_adj_list: vertex {} has neighbor {} but n={}", v, w, n);
                if *w != v {
                    lists[v].push(*w);
                    lists[*w].push(v);
                }
            }
        }
        let mut adj = Vec::new();
        let mut start = Vec::with_capacity(n);
        let mut deg = Vec::with_capacity(n);
        for l in lists.iter_mut() {
            l.sort_unstable();
            l.dedup();
            start.push(adj.len());
            deg.push(l.len());
            adj.extend_from_slice(l);
        }
        let m = adj.len() / 2;
        Self { n, m, adj, start, deg }
    }

    /** constructor from raw CSR arrays (the layout used by the solvers).

    Every invariant of the layout is checked: slice bounds, strictly increasing
    neighbor lists (which excludes duplicates), no self-loop, neighbor indices
    in range, and symmetry. */
    pub fn from_parts(adj: Vec<VertexId>, start: Vec<usize>, deg: Vec<usize>)
        -> Result<Self, CsrError>
    {
        if start.len() != deg.len() {
            return Err(CsrError::LengthMismatch(start.len(), deg.len()));
        }
        let n = start.len();
        for v in 0..n {
            let (sv, dv) = (start[v], deg[v]);
            if sv + dv > adj.len() { return Err(CsrError::SliceOutOfBounds(v)); }
            let slice = &adj[sv..sv + dv];
            for (i, w) in slice.iter().enumerate() {
                if *w >= n { return Err(CsrError::NeighborOutOfRange(v, *w)); }
                if *w == v { return Err(CsrError::SelfLoop(v)); }
                if i > 0 && slice[i - 1] >= *w {
                    return Err(CsrError::UnsortedNeighbors(v));
                }
            }
        }
        let res = Self { n, m: 0, adj, start, deg };
        for v in 0..n {
            for w in res.neighbors(v) {
                if !res.has_edge(*w, v) { return Err(CsrError::MissingReverse(v, *w)); }
            }
        }
        let m = res.deg.iter().sum::<usize>() / 2;
        Ok(Self { m, ..res })
    }

    /// creates an instance from a DIMACS file
    pub fn from_file(filename: &str) -> Self {
        let (_, _, adj_list) = read_from_file(filename);
        Self::from_adj_list(adj_list)
    }

    /// print statistics of the instance
    pub fn display_statistics(&self) {
        println!("\t{} \t vertices", self.n());
        println!("\t{} \t edges", self.nb_edges());
        if self.n > 0 {
            println!("\t{} \t min degree", self.deg.iter().min().unwrap());
            println!("\t{} \t max degree", self.deg.iter().max().unwrap());
        }
    }
}
