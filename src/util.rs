use std::fs;

use clap::ArgMatches;
use serde_json::Value;

use crate::color::{checker, CheckerResult, VertexId};
use crate::csr::CsrGraph;

/** reads the command line input and returns the instance name, the instance,
the time limit, and the optional solution / performance filenames */
pub fn read_params(main_args: ArgMatches) -> (String, CsrGraph, f32, Option<String>, Option<String>) {
    let inst_filename = main_args.value_of("instance").unwrap();
    let time_limit: f32 = main_args.value_of("time").unwrap().parse::<f32>()
        .expect("unable to parse the time given");
    // read value of the solution filename
    let sol_file: Option<String> = match main_args.value_of("solution") {
        None => None,
        Some(e) => {
            println!("printing solutions in: {}", e);
            Some(e.to_string())
        }
    };
    // read value of the performance logs filename
    let perf_file: Option<String> = match main_args.value_of("perf") {
        None => None,
        Some(e) => {
            println!("printing perfs in: {}\n", e);
            Some(e.to_string())
        }
    };
    // read instance file
    let instance = CsrGraph::from_file(inst_filename);
    instance.display_statistics();
    println!("=======================");
    (inst_filename.to_string(), instance, time_limit, sol_file, perf_file)
}

/// exports search results to files
pub fn export_results(
    instance: &CsrGraph,
    solution: &[Vec<VertexId>],
    stats: &Value,
    perf_file: Option<String>,
    sol_file: Option<String>,
    check_result: bool,
) {
    // export statistics
    match perf_file {
        None => {},
        Some(filename) => {
            let mut file = match std::fs::File::create(filename.as_str()) {
                Err(why) => panic!("couldn't create {}: {}", filename, why),
                Ok(file) => file
            };
            if let Err(why) = std::io::Write::write(
                &mut file, serde_json::to_string(stats).unwrap().as_bytes()
            ) { panic!("couldn't write: {}", why) };
        }
    }
    // export solution
    match sol_file {
        None => {},
        Some(filename) => {
            if check_result {
                let checker_result = checker(instance, solution);
                match checker_result {
                    CheckerResult::Ok(_) => {},
                    _ => { println!("invalid solution (reason: {:?})", checker_result) }
                };
            }
            write_solution(filename.as_str(), solution);
        }
    }
}

/** writes a string encoding the solution (each line lists the vertices of a color) */
pub fn solution_to_string(solution: &[Vec<VertexId>]) -> String {
    let mut res = String::default();
    for class in solution {
        for v in class {
            res += format!("{} ", v).as_str();
        }
        res += "\n";
    }
    res
}

/** writes a solution into a file. each line corresponds to a color. */
pub fn write_solution(filename: &str, solution: &[Vec<VertexId>]) {
    fs::write(filename, solution_to_string(solution))
        .unwrap_or_else(|_|
            panic!("write_solution: unable to write the solution in {}", filename)
        );
}
