use std::time::Instant;

use clap::{App, load_yaml};
use serde_json::json;

use bnb_color::color::coloring_to_solution;
use bnb_color::search::greedy_dsatur::greedy_dsatur;
use bnb_color::util::{export_results, read_params};


/** colors an instance with the DSATUR greedy heuristic (no optimality proof) */
pub fn main() {
    // parse arguments
    let yaml = load_yaml!("greedy_dsatur.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let (
        inst_filename,
        instance,
        _,
        sol_file,
        perf_file
    ) = read_params(main_args);

    // solve it
    let t_start = Instant::now();
    let (nb_colors, coloring) = greedy_dsatur(&instance);
    let duration = t_start.elapsed().as_secs_f32();
    println!("DSATUR took {:.3} seconds. Nb colors: {}", duration, nb_colors);
    let stats = json!({
        "primal_list": vec![nb_colors],
        "time_searched": duration,
        "inst_name": inst_filename
    });

    // export results
    let solution = coloring_to_solution(&coloring);
    export_results(&instance, &solution, &stats, perf_file, sol_file, true);
}
