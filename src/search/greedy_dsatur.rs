use std::cmp::Ordering;

use bit_set::BitSet;
use priority_queue::PriorityQueue;

use crate::color::VertexId;
use crate::csr::CsrGraph;

#[derive(PartialEq, Eq)]
struct DSatInfo {
    dsat: usize,
    degree: usize,
}

impl Ord for DSatInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dsat.cmp(&other.dsat)
            .then_with(|| self.degree.cmp(&other.degree))
    }
}

// `PartialOrd` needs to be implemented as well.
impl PartialOrd for DSatInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/** implements the greedy DSATUR coloring heuristic.
    1. choose an uncolored vertex that sees the most colors (break ties by the largest degree)
    2. assign it the smallest color not present in its neighborhood
    3. mark all its uncolored neighbors as seeing this color
    4. repeat until every vertex is colored

Returns the number of colors used (a valid upper bound for the chromatic
number) together with the coloring itself, so that an exact solver can fall
back on it when its time budget expires before any improvement.
*/
pub fn greedy_dsatur(graph: &CsrGraph) -> (usize, Vec<usize>) {
    let n = graph.n();
    if n == 0 { return (0, Vec::new()); }
    let mut remaining_vertices: PriorityQueue<VertexId, DSatInfo> = PriorityQueue::new();
    for v in 0..n {
        remaining_vertices.push(v, DSatInfo { dsat: 0, degree: graph.degree(v) });
    }
    let mut colors: Vec<Option<usize>> = vec![None; n]; // colors[v] -> color assigned to v
    let mut adj_colors: Vec<BitSet> = vec![BitSet::default(); n]; // adj_colors[v] -> colors v sees
    let mut last_color: usize = 0;
    while let Some((current_vertex, _)) = remaining_vertices.pop() {
        // assign the smallest available color
        let mut color: usize = 0;
        while adj_colors[current_vertex].contains(color) { color += 1; }
        colors[current_vertex] = Some(color);
        last_color = last_color.max(color);
        // update saturation degree information
        for conflict_vertex in graph.neighbors(current_vertex).iter()
            .filter(|conflict_vertex| colors[**conflict_vertex].is_none())
        {
            if !adj_colors[*conflict_vertex].contains(color) {
                adj_colors[*conflict_vertex].insert(color);
                remaining_vertices.change_priority_by(conflict_vertex, |p| { p.dsat += 1; });
            }
        }
    }
    let coloring: Vec<usize> = colors.into_iter().map(|c| c.unwrap()).collect();
    (last_color + 1, coloring)
}
