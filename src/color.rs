use bit_set::BitSet;

use crate::csr::CsrGraph;

/** Vertex Id */
pub type VertexId = usize;

/** Solution of a graph coloring problem
(represented as a partition: res[c] lists the vertices of color c).
*/
pub type Solution = Vec<Vec<VertexId>>;

/** result of the solution checker */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckerResult {
    /// the solution is a proper coloring using the given number of colors
    Ok(usize),
    /// a vertex appears in no color class
    VertexNotColored(VertexId),
    /// a vertex appears in two color classes
    VertexColoredTwice(VertexId),
    /// two adjacent vertices share a color class
    ConflictingVertices(VertexId, VertexId),
}

/** checks a solution, returning the number of colors it uses or the first
violation found. */
pub fn checker(inst: &CsrGraph, solution: &[Vec<VertexId>]) -> CheckerResult {
    // check that all vertices are colored exactly once
    let mut visited = BitSet::new();
    for class in solution {
        for v in class {
            if visited.contains(*v) {
                return CheckerResult::VertexColoredTwice(*v);
            }
            visited.insert(*v);
        }
    }
    for v in 0..inst.n() {
        if !visited.contains(v) {
            return CheckerResult::VertexNotColored(v);
        }
    }
    // check conflicts
    for class in solution {
        for (i, v1) in class.iter().enumerate() {
            for v2 in &class[i + 1..] {
                if inst.has_edge(*v1, *v2) {
                    return CheckerResult::ConflictingVertices(*v1, *v2);
                }
            }
        }
    }
    CheckerResult::Ok(solution.iter().filter(|class| !class.is_empty()).count())
}

/** converts a coloring given as a vector (coloring[v] = color of v) into the
partition form used by the checker and the solution writers. */
pub fn coloring_to_solution(coloring: &[usize]) -> Solution {
    let nb_colors = coloring.iter().max().map_or(0, |c| c + 1);
    let mut res = vec![Vec::new(); nb_colors];
    for (v, c) in coloring.iter().enumerate() {
        res[*c].push(v);
    }
    res
}
