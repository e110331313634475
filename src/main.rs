//Vendor Imports
#[macro_use]
extern crate log;
extern crate simplelog;
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::process;

//Application Imports
use hitbenchlib::hitbench::HitBench;

#[tokio::main]
async fn main() {
    CombinedLogger::init(vec![TermLogger::new(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])
    .unwrap();

    info!("Welcome to hitbench!");

    let mut args = env::args().skip(1);
    let (data_path, script_path) = match (args.next(), args.next()) {
        (Some(d), Some(s)) => (d, s),
        _ => {
            error!("Usage: hitbench-runner <data.tsv> <script.sql>");
            process::exit(1);
        }
    };

    let mut bench = HitBench::new();

    match bench.load_tsv(&data_path).await {
        Ok(count) => info!("{} holds {} rows", data_path, count),
        Err(e) => {
            error!("Unable to load {}: {}", data_path, e);
            process::exit(1);
        }
    }

    let script = match tokio::fs::read_to_string(&script_path).await {
        Ok(s) => s,
        Err(e) => {
            error!("Unable to read {}: {}", script_path, e);
            process::exit(1);
        }
    };

    //TODO splitting on ';' breaks on quoted semicolons, needs a real statement splitter
    for statement in script.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        info!("Executing: {}", statement);
        match bench.process_query(statement.to_string()).await {
            Ok(result) => {
                info!("{} row(s)", result.rows.len());
                print!("{}", result);
            }
            Err(e) => {
                error!("Query failed: {}", e);
                process::exit(1);
            }
        }
    }
}
