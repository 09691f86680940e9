use std::fs;

use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{tag, take, take_until};
use nom::character::complete::{digit1, line_ending, space1};
use nom::combinator::{map_res, opt};
use nom::multi::many0;
use nom::sequence::{preceded, separated_pair, terminated};

use crate::color::VertexId;

/// reads an instance from a file, returns (n, m, adj_list)
pub fn read_from_file(filename: &str) -> (usize, usize, Vec<Vec<VertexId>>) {
    let content = fs::read_to_string(filename)
        .unwrap_or_else(|why| panic!("dimacs: unable to read {}: {}", filename, why));
    read_from_string(content.as_str())
}

/** reads an instance from the content of a DIMACS file.

Comment lines (`c ...`) are followed by a header (`p edge n m` or `p col n m`)
and edge lines (`e a b`, indices starting at 1). Files listing each edge once
or twice are both accepted (the header count is checked against both). */
pub fn read_from_string(content: &str) -> (usize, usize, Vec<Vec<VertexId>>) {
    let cleaned = content.replace('\r', "");
    let after_comments = skip_comments(cleaned.as_str())
        .expect("dimacs: invalid comment section").0;
    let (mut remaining, (n, m)) = read_header(after_comments)
        .expect("dimacs: invalid header");
    let mut adj_list = vec![Vec::new(); n];
    let mut nb_edges = 0;
    while let Ok((tail, (a, b))) = read_edge(remaining) {
        remaining = tail;
        assert!(1 <= a && a <= n, "dimacs: edge endpoint {} out of range", a);
        assert!(1 <= b && b <= n, "dimacs: edge endpoint {} out of range", b);
        adj_list[a - 1].push(b - 1);
        adj_list[b - 1].push(a - 1);
        nb_edges += 1;
    }
    assert!(
        nb_edges == m || 2 * nb_edges == m,
        "dimacs: read {} edges, header announces {}", nb_edges, m
    );
    (n, m, adj_list)
}

/// skips a single comment line
fn skip_comment(s: &str) -> IResult<&str, &str> {
    preceded(tag("c"), terminated(take_until("\n"), take(1usize)))(s)
}

/// skips all comment lines
pub fn skip_comments(s: &str) -> IResult<&str, Vec<&str>> {
    many0(skip_comment)(s)
}

/// reads an integer
fn integer(s: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse)(s)
}

/// reads two numbers separated by spaces, consuming an optional end of line
fn two_integers(s: &str) -> IResult<&str, (usize, usize)> {
    terminated(separated_pair(integer, space1, integer), opt(line_ending))(s)
}

/// reads the header containing (n, m)
pub fn read_header(s: &str) -> IResult<&str, (usize, usize)> {
    preceded(alt((tag("p edge "), tag("p col "))), two_integers)(s)
}

/// reads an edge line (WARNING: indices start at 1 in the DIMACS format)
pub fn read_edge(s: &str) -> IResult<&str, (usize, usize)> {
    preceded(tag("e "), two_integers)(s)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::csr::CsrGraph;

    #[test]
    fn test_skip_comments() {
        let s = "c this is a test comment\np edge 2 1\ne 1 2";
        assert_eq!(
            skip_comments(s).unwrap().0,
            "p edge 2 1\ne 1 2"
        );
    }

    #[test]
    fn test_read_header() {
        let s = "p edge 2 1\ne 1 2";
        assert_eq!(read_header(s).unwrap().0, "e 1 2");
        assert_eq!(read_header(s).unwrap().1, (2, 1));
    }

    #[test]
    fn test_read_header_col() {
        let s = "p col 2 1\ne 1 2";
        assert_eq!(read_header(s).unwrap().1, (2, 1));
    }

    #[test]
    fn test_read_edge() {
        let s = "e 1 2\n";
        assert_eq!(read_edge(s).unwrap().1, (1, 2));
        assert_eq!(read_edge(s).unwrap().0, "");
    }

    #[test]
    fn test_read_string() {
        let (n, m, adj_list) = read_from_string(
            "c tiny instance\np edge 3 2\ne 1 2\ne 2 3\n"
        );
        assert_eq!((n, m), (3, 2));
        assert_eq!(adj_list[1], vec![0, 2]);
    }

    #[test]
    fn test_read_grid_instance() {
        let inst = CsrGraph::from_file("insts/grid2x2.col");
        assert_eq!(inst.n(), 4);
        assert_eq!(inst.nb_edges(), 4);
        assert_eq!(inst.neighbors(0), &[1, 2]);
    }

    #[test]
    fn test_read_petersen_instance() {
        let inst = CsrGraph::from_file("insts/petersen.col");
        assert_eq!(inst.n(), 10);
        assert_eq!(inst.nb_edges(), 15);
        for v in 0..inst.n() {
            assert_eq!(inst.degree(v), 3);
        }
    }
}
