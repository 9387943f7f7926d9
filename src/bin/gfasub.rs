use gfa_kit::{gfa, subgraph, utils};

use getopts::Options;

use std::{env, io, process};

//-----------------------------------------------------------------------------

fn main() -> Result<(), String> {
    let config = Config::new()?;

    let mut reader = utils::open_file(&config.filename)?;
    let mut graph = gfa::read_gfa(reader.as_mut())?;
    subgraph::extract(&mut graph, &config.seeds, config.step);

    let mut output = io::stdout();
    gfa::write_gfa(&graph, &mut output).map_err(|x| x.to_string())?;
    Ok(())
}

//-----------------------------------------------------------------------------

struct Config {
    filename: String,
    seeds: Vec<String>,
    step: usize,
}

impl Config {
    fn new() -> Result<Config, String> {
        let args: Vec<String> = env::args().collect();
        let program = args[0].clone();

        let mut opts = Options::new();
        opts.optflag("h", "help", "print this help");
        opts.optopt("r", "radius", "keep segments within INT hops of a seed (default 0)", "INT");
        let matches = opts.parse(&args[1..]).map_err(|x| x.to_string())?;

        let header = format!("Usage: {} [options] graph.gfa seed [seed ...]", program);
        if matches.opt_present("h") {
            eprint!("{}", opts.usage(&header));
            process::exit(0);
        }

        let mut step: usize = 0;
        if let Some(value) = matches.opt_str("r") {
            step = value.parse::<usize>().map_err(|x| format!("--radius: {}", x))?;
        }

        if matches.free.is_empty() {
            eprint!("{}", opts.usage(&header));
            process::exit(1);
        }
        let filename = matches.free[0].clone();
        let seeds = matches.free[1..].to_vec();

        Ok(Config { filename, seeds, step })
    }
}

//-----------------------------------------------------------------------------
