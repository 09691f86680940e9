use clap::{App, load_yaml};
use serde_json::json;

use bnb_color::color::coloring_to_solution;
use bnb_color::search::bnb::ProgressInfo;
use bnb_color::search::dsatur_sewell::sewell_solve;
use bnb_color::util::{export_results, read_params};


/** solves a coloring instance exactly (DSATUR branch-and-bound, Sewell tie-breaking) */
pub fn main() {
    // parse arguments
    let yaml = load_yaml!("dsatur_sewell.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let (
        inst_filename,
        instance,
        time_limit,
        sol_file,
        perf_file
    ) = read_params(main_args);

    // solve it
    let mut progress = |info: &ProgressInfo| {
        println!(
            "{:>12} nodes \t UB {} \t LB {} \t {} cut \t {:.1}s",
            info.nodes_visited, info.ub, info.lb, info.branches_cut, info.elapsed
        );
    };
    let report = sewell_solve(&instance, time_limit, Some(&mut progress))
        .unwrap_or_else(|why| panic!("sewell_solve: {}", why));
    println!(
        "B&B took {:.3} seconds. {} colors ({}) \t {} nodes \t {} cut",
        report.elapsed, report.nb_colors,
        if report.optimal { "optimal" } else { "not proven optimal" },
        report.nodes_visited, report.branches_cut
    );

    // export results
    let solution = coloring_to_solution(&report.coloring);
    let stats = json!({
        "inst_name": inst_filename,
        "report": report
    });
    export_results(&instance, &solution, &stats, perf_file, sol_file, true);
}
