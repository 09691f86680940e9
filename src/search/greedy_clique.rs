use crate::color::VertexId;
use crate::csr::CsrGraph;

/** implements a greedy algorithm that finds a "large" clique.

Vertices are visited by decreasing degree (ties keep the index order, the sort
is stable); a vertex joins the clique iff it is adjacent to every current
member. The clique size is a valid lower bound for the chromatic number.
*/
pub fn greedy_clique(graph: &CsrGraph) -> Vec<VertexId> {
    let mut order: Vec<VertexId> = (0..graph.n()).collect();
    order.sort_by(|a, b| graph.degree(*b).cmp(&graph.degree(*a)));
    let mut clique: Vec<VertexId> = Vec::new();
    for v in order {
        if clique.iter().all(|u| graph.has_edge(v, *u)) {
            clique.push(v);
        }
    }
    clique
}
