use std::cmp::{max, min};

use crate::color::VertexId;
use crate::colorset::ColorSet;
use crate::csr::CsrGraph;
use crate::search::bnb::{BnbState, ProgressInfo, SolveError, SolveReport};

/// tie-break candidate lists longer than this fall back on the first candidate
const CANDIDATE_CAP: usize = 1024;

/** Sewell branching selection:
    1. maximum saturation degree
    2. tie-break: maximum degree
    3. tie-break: maximize the shared available-color options with the
       uncolored neighbors, score(v) = Σ_{u ∈ N(v) uncolored} |opts(v) ∩ opts(u)|
       where opts(x) = {0..UB-1} \ cset[x]

Among equal scores the candidate with the smallest index wins. Pass 3 is
skipped when a single candidate remains or when UB would saturate the color
bitset.
*/
fn select_sewell(s: &BnbState) -> Option<VertexId> {
    let graph = s.graph;
    let n = graph.n();
    // pass 1: maximum saturation among uncolored vertices
    let mut max_dsat: Option<usize> = None;
    for v in 0..n {
        if s.color[v].is_none() && max_dsat.map_or(true, |d| s.dsat[v] > d) {
            max_dsat = Some(s.dsat[v]);
        }
    }
    let max_dsat = max_dsat?;
    // pass 2: maximum degree among those
    let mut max_deg = 0;
    for v in 0..n {
        if s.color[v].is_none() && s.dsat[v] == max_dsat && graph.degree(v) > max_deg {
            max_deg = graph.degree(v);
        }
    }
    // pass 3: collect candidates
    let mut candidates = [0; CANDIDATE_CAP];
    let mut nb_candidates = 0;
    let mut first = None;
    for v in 0..n {
        if s.color[v].is_some() || s.dsat[v] != max_dsat || graph.degree(v) != max_deg {
            continue;
        }
        if first.is_none() { first = Some(v); }
        if nb_candidates < CANDIDATE_CAP { candidates[nb_candidates] = v; }
        nb_candidates += 1;
    }
    if nb_candidates <= 1 || s.ub >= ColorSet::CAPACITY {
        return first;
    }
    // too many ties to score: fall back on the first candidate
    if nb_candidates > CANDIDATE_CAP {
        return first;
    }
    let mask = ColorSet::prefix(s.ub);
    let mut best = first?;
    let mut best_score = -1i64;
    for v in candidates.iter().take(nb_candidates) {
        let opts_v = mask.difference(s.cset[*v]);
        let mut score = 0i64;
        for u in graph.neighbors(*v) {
            if s.color[*u].is_some() { continue; }
            score += opts_v.intersection(mask.difference(s.cset[*u])).len() as i64;
        }
        if score > best_score {
            best_score = score;
            best = *v;
        }
    }
    Some(best)
}

/** recursive branch-and-bound node. `nb_col` counts the colored vertices on
the current path, `k` the distinct colors they use. Only colors `0..=k` are
eligible for the branching vertex, which cuts permutation-equivalent
subtrees. */
fn explore(s: &mut BnbState, nb_col: usize, k: usize) {
    if !s.enter_node() { return; }

    // leaf: complete coloring
    if nb_col == s.graph.n() {
        s.record_solution(k);
        return;
    }

    // pruning: current cost already >= best
    if k + 1 >= s.ub {
        s.branches_cut += 1;
        return;
    }

    let v = match select_sewell(s) {
        Some(v) => v,
        None => return,
    };

    let c_limit = min(k + 1, s.ub - 1);
    for c in 0..c_limit {
        if s.cset[v].contains(c) { continue; }
        let new_k = max(k, c + 1);
        if new_k >= s.ub { continue; }

        s.assign(v, c);
        explore(s, nb_col + 1, new_k);
        s.unassign(v, c);

        if s.timeout || s.ub == s.lb { return; }
    }
}

/** solves an instance exactly with the Sewell DSATUR branch-and-bound.

Computes the initial bounds (greedy clique, DSATUR heuristic), then explores
the search tree until it is exhausted or `time_limit` seconds have passed. The
returned coloring is the best found either way; `optimal` tells whether it was
proven to be χ(G). */
pub fn sewell_solve<'a>(
    graph: &'a CsrGraph,
    time_limit: f32,
    callback: Option<&'a mut dyn FnMut(&ProgressInfo)>,
) -> Result<SolveReport, SolveError> {
    let mut state = BnbState::init(graph, time_limit, callback)?;
    if state.search_needed() {
        explore(&mut state, 0, 0);
    }
    Ok(state.into_report())
}
