use std::fmt;
use std::time::Instant;

use serde::Serialize;

use crate::color::VertexId;
use crate::colorset::ColorSet;
use crate::csr::CsrGraph;
use crate::search::greedy_clique::greedy_clique;
use crate::search::greedy_dsatur::greedy_dsatur;

/** snapshot passed to the progress callback (fired on the 1st branch-and-bound
node, then every 500 nodes). The callback is invoked synchronously from the
search and must not block. */
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// branch-and-bound nodes visited so far
    pub nodes_visited: u64,
    /// best number of colors found so far
    pub ub: usize,
    /// initial lower bound on the chromatic number
    pub lb: usize,
    /// seconds elapsed since the solve started
    pub elapsed: f32,
    /// branches pruned so far
    pub branches_cut: u64,
}

/** input rejected before any search started */
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// negative or non-finite time budget
    InvalidTimeLimit(f32),
    /// the initial DSATUR coloring needs more colors than the bitset supports
    TooManyColors(usize),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidTimeLimit(t) => write!(f, "invalid time limit: {}", t),
            Self::TooManyColors(k) => write!(
                f, "instance needs {} colors but at most {} are supported",
                k, ColorSet::CAPACITY
            ),
        }
    }
}

impl std::error::Error for SolveError {}

/** result of an exact solve */
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    /// number of colors of the best coloring found (χ(G) when `optimal`)
    pub nb_colors: usize,
    /// best coloring found (coloring[v] = color of v)
    pub coloring: Vec<usize>,
    /// greedy-clique lower bound computed before the search
    pub initial_lb: usize,
    /// DSATUR-heuristic upper bound computed before the search
    pub initial_ub: usize,
    /// true iff the search proved `nb_colors` = χ(G)
    pub optimal: bool,
    /// branch-and-bound nodes visited
    pub nodes_visited: u64,
    /// branches pruned by the bounds
    pub branches_cut: u64,
    /// seconds spent in the solve (initial bounds included)
    pub elapsed: f32,
    /// true iff the time budget was exhausted before the tree was explored
    pub timeout: bool,
}

/** search state shared by the two branch-and-bound strategies.

The state is mutated exclusively through the `assign`/`unassign` pair, called
symmetrically on every edge of the recursion, so that a node leaves the state
exactly as it found it. Only the incumbent (`ub`, `best_color`), the counters
and the timeout flag persist across subtrees.
*/
pub(crate) struct BnbState<'a> {
    /// instance being solved (borrowed, immutable during the search)
    pub(crate) graph: &'a CsrGraph,
    /// color[v]: color assigned to v on the current path (None = uncolored)
    pub(crate) color: Vec<Option<usize>>,
    /// cset[v]: colors appearing on the colored neighbors of v
    /// (only maintained while v is uncolored)
    pub(crate) cset: Vec<ColorSet>,
    /// dsat[v]: saturation degree, cached popcount of cset[v]
    pub(crate) dsat: Vec<usize>,
    /// best number of colors found so far
    pub(crate) ub: usize,
    /// greedy-clique lower bound (fixed after initialization)
    pub(crate) lb: usize,
    /// DSATUR upper bound, kept for the final report
    initial_ub: usize,
    /// coloring achieving `ub`
    best_color: Vec<usize>,
    /// nodes visited so far
    pub(crate) nodes_visited: u64,
    /// branches pruned so far
    pub(crate) branches_cut: u64,
    time_start: Instant,
    time_limit: f32,
    /// set once the budget is exhausted; every frame then returns promptly
    pub(crate) timeout: bool,
    callback: Option<&'a mut dyn FnMut(&ProgressInfo)>,
}

impl<'a> BnbState<'a> {

    /** validates the inputs and computes the initial bounds.

    The greedy clique gives the lower bound, the DSATUR heuristic the upper
    bound and the fallback coloring returned if the search improves nothing
    before the budget runs out. */
    pub(crate) fn init(
        graph: &'a CsrGraph,
        time_limit: f32,
        callback: Option<&'a mut dyn FnMut(&ProgressInfo)>,
    ) -> Result<Self, SolveError> {
        if !time_limit.is_finite() || time_limit < 0.0 {
            return Err(SolveError::InvalidTimeLimit(time_limit));
        }
        let time_start = Instant::now();
        let n = graph.n();
        let lb = greedy_clique(graph).len();
        let (initial_ub, heuristic_coloring) = greedy_dsatur(graph);
        if initial_ub > ColorSet::CAPACITY {
            return Err(SolveError::TooManyColors(initial_ub));
        }
        Ok(Self {
            graph,
            color: vec![None; n],
            cset: vec![ColorSet::empty(); n],
            dsat: vec![0; n],
            ub: initial_ub,
            lb,
            initial_ub,
            best_color: heuristic_coloring,
            nodes_visited: 0,
            branches_cut: 0,
            time_start,
            time_limit,
            timeout: false,
            callback,
        })
    }

    /// true iff the branch-and-bound has anything left to prove
    pub(crate) fn search_needed(&self) -> bool {
        self.graph.n() > 0 && self.lb < self.ub
    }

    /// seconds elapsed since `init`
    pub(crate) fn elapsed(&self) -> f32 {
        self.time_start.elapsed().as_secs_f32()
    }

    /** bookkeeping shared by every node entry: time budget check, node
    counter, periodic progress callback. Returns false when the budget is
    exhausted (the caller must then unwind without exploring). */
    pub(crate) fn enter_node(&mut self) -> bool {
        if self.elapsed() > self.time_limit {
            self.timeout = true;
            return false;
        }
        self.nodes_visited += 1;
        if self.callback.is_some()
            && (self.nodes_visited == 1 || self.nodes_visited % 500 == 0)
        {
            let info = ProgressInfo {
                nodes_visited: self.nodes_visited,
                ub: self.ub,
                lb: self.lb,
                elapsed: self.elapsed(),
                branches_cut: self.branches_cut,
            };
            if let Some(callback) = self.callback.as_mut() {
                (*callback)(&info);
            }
        }
        true
    }

    /** assigns color c to vertex v and updates the saturation of its
    uncolored neighbors. */
    pub(crate) fn assign(&mut self, v: VertexId, c: usize) {
        let graph = self.graph;
        self.color[v] = Some(c);
        for w in graph.neighbors(v) {
            if self.color[*w].is_some() { continue; }
            if !self.cset[*w].contains(c) {
                self.cset[*w].insert(c);
                self.dsat[*w] += 1;
            }
        }
    }

    /** removes color c from vertex v, restoring the saturation of its
    uncolored neighbors.

    A neighbor w may still see c through another colored neighbor, so the
    O(deg(w)) rescan is required before clearing the bit. */
    pub(crate) fn unassign(&mut self, v: VertexId, c: usize) {
        let graph = self.graph;
        self.color[v] = None;
        for w in graph.neighbors(v) {
            if self.color[*w].is_some() { continue; }
            if !self.cset[*w].contains(c) { continue; }
            let still_seen = graph.neighbors(*w).iter()
                .any(|x| *x != v && self.color[*x] == Some(c));
            if !still_seen {
                self.cset[*w].remove(c);
                self.dsat[*w] -= 1;
            }
        }
    }

    /** standard DSATUR branching selection: maximum saturation, ties broken
    by maximum degree, then by smallest index. */
    pub(crate) fn select_dsatur(&self) -> Option<VertexId> {
        let mut best: Option<VertexId> = None;
        for v in 0..self.graph.n() {
            if self.color[v].is_some() { continue; }
            match best {
                None => best = Some(v),
                Some(b) => {
                    if self.dsat[v] > self.dsat[b]
                        || (self.dsat[v] == self.dsat[b]
                            && self.graph.degree(v) > self.graph.degree(b))
                    {
                        best = Some(v);
                    }
                }
            }
        }
        best
    }

    /// records a complete coloring of the current path if it improves the incumbent
    pub(crate) fn record_solution(&mut self, nb_colors: usize) {
        if nb_colors < self.ub {
            self.ub = nb_colors;
            for (slot, c) in self.best_color.iter_mut().zip(self.color.iter()) {
                *slot = c.unwrap();
            }
        }
    }

    /** consumes the state into the final report.

    A search that ran to completion has exhausted the tree, so the incumbent
    is proven optimal whenever the budget was not hit, even when the greedy
    clique bound stayed below it. */
    pub(crate) fn into_report(self) -> SolveReport {
        let elapsed = self.elapsed();
        SolveReport {
            nb_colors: self.ub,
            coloring: self.best_color,
            initial_lb: self.lb,
            initial_ub: self.initial_ub,
            optimal: !self.timeout,
            nodes_visited: self.nodes_visited,
            branches_cut: self.branches_cut,
            elapsed,
            timeout: self.timeout,
        }
    }
}
