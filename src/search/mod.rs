//! Exact algorithms for the graph coloring problem.

/// shared branch-and-bound state (partial coloring, bounds, statistics)
pub mod bnb;

/// greedy clique (initial lower bound)
pub mod greedy_clique;

/// greedy DSATUR coloring (initial upper bound)
pub mod greedy_dsatur;

/// DSATUR branch-and-bound with the Sewell (1996) tie-breaking rule
pub mod dsatur_sewell;

/// DSATUR branch-and-bound with the reduced-graph bound of Furini et al. (2017)
pub mod dsatur_furini;


#[cfg(test)]
pub(crate) mod test_instances {
    //! small instances and reference results shared by the solver tests

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::csr::CsrGraph;

    /// graph with n vertices and no edge
    pub fn empty(n: usize) -> CsrGraph {
        CsrGraph::from_adj_list(vec![Vec::new(); n])
    }

    /// complete graph K_n
    pub fn complete(n: usize) -> CsrGraph {
        let adj_list = (0..n)
            .map(|v| (0..n).filter(|w| *w != v).collect())
            .collect();
        CsrGraph::from_adj_list(adj_list)
    }

    /// cycle C_n
    pub fn cycle(n: usize) -> CsrGraph {
        let adj_list = (0..n).map(|v| vec![(v + 1) % n]).collect();
        CsrGraph::from_adj_list(adj_list)
    }

    /// complete bipartite graph K_{a,b}
    pub fn complete_bipartite(a: usize, b: usize) -> CsrGraph {
        let mut adj_list = vec![Vec::new(); a + b];
        for neighbors in adj_list.iter_mut().take(a) {
            *neighbors = (a..a + b).collect();
        }
        CsrGraph::from_adj_list(adj_list)
    }

    /// Petersen graph (outer 5-cycle, inner pentagram, spokes)
    pub fn petersen() -> CsrGraph {
        let mut adj_list = vec![Vec::new(); 10];
        for i in 0..5 {
            adj_list[i].push((i + 1) % 5); // outer cycle
            adj_list[i].push(5 + i); // spoke
            adj_list[5 + i].push(5 + (i + 2) % 5); // pentagram
        }
        CsrGraph::from_adj_list(adj_list)
    }

    /// queen graph on a k x k board (two squares adjacent iff a queen move apart)
    pub fn queen(k: usize) -> CsrGraph {
        let mut adj_list = vec![Vec::new(); k * k];
        for r1 in 0..k {
            for c1 in 0..k {
                for r2 in 0..k {
                    for c2 in 0..k {
                        if (r1, c1) < (r2, c2)
                            && (r1 == r2 || c1 == c2
                                || r1 + c2 == r2 + c1 || r1 + c1 == r2 + c2)
                        {
                            adj_list[r1 * k + c1].push(r2 * k + c2);
                        }
                    }
                }
            }
        }
        CsrGraph::from_adj_list(adj_list)
    }

    /// seeded G(n,p) random graph
    pub fn random_gnp(seed: u64, n: usize, p: f64) -> CsrGraph {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut adj_list = vec![Vec::new(); n];
        for v in 0..n {
            for w in v + 1..n {
                if rng.gen_bool(p) {
                    adj_list[v].push(w);
                }
            }
        }
        CsrGraph::from_adj_list(adj_list)
    }

    /// exact chromatic number by exhaustive backtracking (small graphs only)
    pub fn brute_force_chromatic(graph: &CsrGraph) -> usize {
        fn colorable(graph: &CsrGraph, nb_colors: usize, coloring: &mut [usize], v: usize) -> bool {
            if v == graph.n() { return true; }
            for c in 0..nb_colors {
                let feasible = graph.neighbors(v).iter()
                    .all(|w| *w >= v || coloring[*w] != c);
                if feasible {
                    coloring[v] = c;
                    if colorable(graph, nb_colors, coloring, v + 1) { return true; }
                }
            }
            false
        }
        if graph.n() == 0 { return 0; }
        for nb_colors in 1..=graph.n() {
            let mut coloring = vec![0; graph.n()];
            if colorable(graph, nb_colors, &mut coloring, 0) { return nb_colors; }
        }
        graph.n()
    }
}
