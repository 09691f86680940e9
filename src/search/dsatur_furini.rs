use std::cmp::{max, min};

use crate::color::VertexId;
use crate::csr::CsrGraph;
use crate::search::bnb::{BnbState, ProgressInfo, SolveError, SolveReport};

/** scratch buffers of the reduced-graph bound, allocated once per solve and
reused at every node to keep the allocator out of the search. */
#[derive(Debug, Default)]
struct ReducedScratch {
    /// uncolored vertices, later reordered by degree in R
    uncolored: Vec<VertexId>,
    /// sees[c * nu + i] = 1 iff uncolored[i] is adjacent to color class c
    sees: Vec<u8>,
    /// super_adj[c * k + d] = 1 iff classes c and d are both seen by some uncolored vertex
    super_adj: Vec<u8>,
    /// degree of every node of R (super-nodes first, then uncolored vertices)
    deg_r: Vec<usize>,
    /// node ids of R sorted by decreasing degree
    nodes: Vec<usize>,
    /// current greedy clique of R
    clique: Vec<usize>,
    /// induced degrees, used when no color class exists yet
    subdeg: Vec<usize>,
}

impl ReducedScratch {
    fn new(n: usize) -> Self {
        Self {
            uncolored: Vec::with_capacity(n),
            subdeg: Vec::with_capacity(n),
            ..Self::default()
        }
    }
}

/** lower bound from the reduced graph R of Furini, Gabrel & Ternier (2017).

R has one super-node per used color class plus one node per uncolored vertex:
  - two super-nodes are adjacent iff some uncolored vertex sees both classes,
  - a super-node and an uncolored vertex are adjacent iff the vertex sees the class,
  - two uncolored vertices are adjacent iff they are adjacent in G.

Completing the partial coloring requires pairwise-distinct colors on any
clique of R, so ω(R) bounds the best completion from below; it is approximated
greedily by decreasing degree in R. When a scratch buffer cannot be grown, the
node degrades to the trivial bound `k_used`, which is always valid. */
fn lb_reduced(s: &BnbState, scratch: &mut ReducedScratch, k_used: usize) -> usize {
    let graph = s.graph;
    let ReducedScratch { uncolored, sees, super_adj, deg_r, nodes, clique, subdeg } = scratch;

    uncolored.clear();
    for v in 0..graph.n() {
        if s.color[v].is_none() { uncolored.push(v); }
    }
    let nu = uncolored.len();
    if nu == 0 { return k_used; } // the coloring is complete on this branch

    // no color class yet: R is G restricted to the uncolored vertices
    if k_used == 0 {
        subdeg.clear();
        subdeg.resize(graph.n(), 0);
        for v in uncolored.iter() {
            subdeg[*v] = graph.neighbors(*v).iter()
                .filter(|w| s.color[**w].is_none()).count();
        }
        uncolored.sort_by(|a, b| subdeg[*b].cmp(&subdeg[*a]));
        clique.clear();
        for v in uncolored.iter() {
            if clique.iter().all(|u| graph.has_edge(*v, *u)) {
                clique.push(*v);
            }
        }
        return clique.len();
    }

    // sees[c][i]: does uncolored[i] see color class c?
    sees.clear();
    if sees.try_reserve(k_used * nu).is_err() { return k_used; }
    sees.resize(k_used * nu, 0);
    for (i, u) in uncolored.iter().enumerate() {
        for c in s.cset[*u].iter() {
            if c < k_used { sees[c * nu + i] = 1; }
        }
    }

    // super_adj[c][d]: sees[c] and sees[d] overlap?
    super_adj.clear();
    if super_adj.try_reserve(k_used * k_used).is_err() { return k_used; }
    super_adj.resize(k_used * k_used, 0);
    for c in 0..k_used {
        for d in c + 1..k_used {
            let overlap = (0..nu).any(|i| sees[c * nu + i] != 0 && sees[d * nu + i] != 0);
            if overlap {
                super_adj[c * k_used + d] = 1;
                super_adj[d * k_used + c] = 1;
            }
        }
    }

    // degree of every node of R (node id < k_used: super-node,
    // node id >= k_used: uncolored[id - k_used])
    let total = k_used + nu;
    deg_r.clear();
    deg_r.resize(total, 0);
    for c in 0..k_used {
        deg_r[c] = (0..k_used).filter(|d| super_adj[c * k_used + d] != 0).count()
            + (0..nu).filter(|i| sees[c * nu + i] != 0).count();
    }
    for (i, v) in uncolored.iter().enumerate() {
        deg_r[k_used + i] = s.cset[*v].len()
            + graph.neighbors(*v).iter().filter(|w| s.color[**w].is_none()).count();
    }

    // greedy clique of R by decreasing degree
    nodes.clear();
    nodes.extend(0..total);
    nodes.sort_by(|a, b| deg_r[*b].cmp(&deg_r[*a]));
    let adjacent_in_r = |a: usize, b: usize| -> bool {
        if a < k_used && b < k_used {
            super_adj[a * k_used + b] != 0
        } else if a < k_used {
            sees[a * nu + (b - k_used)] != 0
        } else if b < k_used {
            sees[b * nu + (a - k_used)] != 0
        } else {
            graph.has_edge(uncolored[a - k_used], uncolored[b - k_used])
        }
    };
    clique.clear();
    for a in nodes.iter() {
        if clique.iter().all(|b| adjacent_in_r(*a, *b)) {
            clique.push(*a);
        }
    }
    clique.len()
}

/** recursive branch-and-bound node: same skeleton as the Sewell strategy, but
the branching vertex follows plain DSATUR and every node recomputes the
reduced-graph lower bound before branching. */
fn explore(s: &mut BnbState, scratch: &mut ReducedScratch, nb_col: usize, k: usize) {
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

    // reduced-graph lower bound
    if lb_reduced(s, scratch, k) >= s.ub {
        s.branches_cut += 1;
        return;
    }

    let v = match s.select_dsatur() {
        Some(v) => v,
        None => return,
    };

    let c_limit = min(k + 1, s.ub - 1);
    for c in 0..c_limit {
        if s.cset[v].contains(c) { continue; }
        let new_k = max(k, c + 1);
        if new_k >= s.ub { continue; }

        s.assign(v, c);
        explore(s, scratch, nb_col + 1, new_k);
        s.unassign(v, c);

        if s.timeout || s.ub == s.lb { return; }
    }
}

/** solves an instance exactly with the DSATUR branch-and-bound strengthened
by the per-node reduced-graph bound of Furini et al. (2017).

Same contract as `sewell_solve`; the extra bound pays off on dense instances
where the trivial `k >= UB - 1` prune leaves most of the tree standing. */
pub fn furini_solve<'a>(
    graph: &'a CsrGraph,
    time_limit: f32,
    callback: Option<&'a mut dyn FnMut(&ProgressInfo)>,
) -> Result<SolveReport, SolveError> {
    let mut state = BnbState::init(graph, time_limit, callback)?;
    let mut scratch = ReducedScratch::new(graph.n());
    if state.search_needed() {
        explore(&mut state, &mut scratch, 0, 0);
    }
    Ok(state.into_report())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{checker, coloring_to_solution, CheckerResult};
    use crate::search::dsatur_sewell::sewell_solve;
    use crate::search::test_instances::{
        brute_force_chromatic, complete, complete_bipartite, cycle, empty, petersen,
        queen, random_gnp,
    };

    fn assert_proper(graph: &CsrGraph, report: &SolveReport) {
        let solution = coloring_to_solution(&report.coloring);
        assert_eq!(checker(graph, &solution), CheckerResult::Ok(report.nb_colors));
    }

    #[test]
    fn test_empty_graph() {
        let graph = empty(5);
        let report = furini_solve(&graph, 10.0, None).unwrap();
        assert_eq!(report.nb_colors, 1);
        assert!(report.optimal);
        assert!(report.nodes_visited <= 1);
    }

    #[test]
    fn test_complete_graph() {
        let graph = complete(5);
        let report = furini_solve(&graph, 10.0, None).unwrap();
        assert_eq!(report.nb_colors, 5);
        assert!(report.optimal);
        assert_proper(&graph, &report);
    }

    #[test]
    fn test_odd_cycle() {
        let graph = cycle(5);
        let report = furini_solve(&graph, 10.0, None).unwrap();
        assert_eq!(report.nb_colors, 3);
        assert!(report.optimal);
        assert_proper(&graph, &report);
    }

    #[test]
    fn test_bipartite() {
        let graph = complete_bipartite(3, 3);
        let report = furini_solve(&graph, 10.0, None).unwrap();
        assert_eq!(report.nb_colors, 2);
        assert!(report.optimal);
        assert_proper(&graph, &report);
    }

    #[test]
    fn test_petersen() {
        let graph = petersen();
        let report = furini_solve(&graph, 10.0, None).unwrap();
        assert_eq!(report.nb_colors, 3);
        assert!(report.optimal);
        assert_proper(&graph, &report);
    }

    #[test]
    fn test_agrees_with_sewell_and_brute_force() {
        for seed in 0..15u64 {
            let n = 5 + (seed as usize) % 4;
            let p = 0.25 + 0.05 * ((seed % 8) as f64);
            let graph = random_gnp(seed, n, p);
            let expected = brute_force_chromatic(&graph);
            let furini = furini_solve(&graph, 60.0, None).unwrap();
            let sewell = sewell_solve(&graph, 60.0, None).unwrap();
            assert_eq!(furini.nb_colors, expected, "seed {}", seed);
            assert_eq!(furini.nb_colors, sewell.nb_colors, "seed {}", seed);
            assert!(furini.optimal);
            assert_proper(&graph, &furini);
        }
    }

    #[test]
    fn test_queen5_both_strategies() {
        let graph = queen(5);
        let furini = furini_solve(&graph, 60.0, None).unwrap();
        let sewell = sewell_solve(&graph, 60.0, None).unwrap();
        assert_eq!(furini.nb_colors, 5);
        assert_eq!(sewell.nb_colors, 5);
        assert!(furini.optimal && sewell.optimal);
        // the per-node bound can only tighten the tree on this instance
        assert!(furini.nodes_visited <= sewell.nodes_visited);
        assert_proper(&graph, &furini);
        assert_proper(&graph, &sewell);
    }

    #[test]
    fn test_deterministic() {
        let graph = random_gnp(7, 14, 0.5);
        let a = furini_solve(&graph, 60.0, None).unwrap();
        let b = furini_solve(&graph, 60.0, None).unwrap();
        assert_eq!(a.nb_colors, b.nb_colors);
        assert_eq!(a.coloring, b.coloring);
        assert_eq!(a.nodes_visited, b.nodes_visited);
        assert_eq!(a.branches_cut, b.branches_cut);
    }

    #[test]
    fn test_lb_reduced_complete_graph_partial() {
        // K4 with two vertices colored: every node of R is adjacent to every
        // other, so the bound reaches χ(K4) = 4
        let graph = complete(4);
        let mut state = BnbState::init(&graph, 10.0, None).unwrap();
        let mut scratch = ReducedScratch::new(graph.n());
        state.assign(0, 0);
        state.assign(1, 1);
        assert_eq!(lb_reduced(&state, &mut scratch, 2), 4);
    }

    #[test]
    fn test_lb_reduced_complete_branch() {
        let graph = complete(4);
        let mut state = BnbState::init(&graph, 10.0, None).unwrap();
        let mut scratch = ReducedScratch::new(graph.n());
        for v in 0..4 { state.assign(v, v); }
        assert_eq!(lb_reduced(&state, &mut scratch, 4), 4); // nu = 0: k_used
    }

    #[test]
    fn test_lb_reduced_root_is_a_clique_bound() {
        // at the root R is G itself, so the bound is a clique lower bound
        for seed in 0..10u64 {
            let graph = random_gnp(seed, 8, 0.5);
            let state = BnbState::init(&graph, 10.0, None).unwrap();
            let mut scratch = ReducedScratch::new(graph.n());
            let bound = lb_reduced(&state, &mut scratch, 0);
            assert!(bound <= brute_force_chromatic(&graph));
        }
    }

    #[test]
    fn test_scratch_reused_across_calls() {
        let graph = petersen();
        let mut state = BnbState::init(&graph, 10.0, None).unwrap();
        let mut scratch = ReducedScratch::new(graph.n());
        let root_bound = lb_reduced(&state, &mut scratch, 0);
        state.assign(0, 0);
        state.assign(2, 1);
        let partial_bound = lb_reduced(&state, &mut scratch, 2);
        assert!(root_bound >= 2);
        assert!(partial_bound >= 2); // s_0 - s_1 - any vertex seeing both
        state.unassign(2, 1);
        state.unassign(0, 0);
        assert_eq!(lb_reduced(&state, &mut scratch, 0), root_bound);
    }
}
