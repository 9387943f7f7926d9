use gfa_kit::{gfa, stable, utils, DiagnosticSink, Fragment, Graph};

use getopts::Options;

use std::{env, process};

//-----------------------------------------------------------------------------

fn main() -> Result<(), String> {
    let config = Config::new()?;

    let mut reader = utils::open_file(&config.filename)?;
    let graph = gfa::read_gfa(reader.as_mut())?;

    let mut sink = DiagnosticSink::new(config.verbosity);
    let fragments = stable::build_fragments(&graph, config.materialize, &mut sink);
    for fragment in fragments.iter() {
        println!("{}", fragment_line(&graph, fragment, config.materialize));
    }
    Ok(())
}

// One tab-separated line per fragment: stable sequence, offset, rank,
// length, the two joins, and the sequence when requested.
fn fragment_line(graph: &Graph, fragment: &Fragment, materialize: bool) -> String {
    let mut fields = vec![
        graph.stable_sequence(fragment.seq_id).name.clone(),
        fragment.offset.to_string(),
        fragment.rank.map_or(String::from("*"), |rank| rank.to_string()),
        fragment.len.to_string(),
        join_field(graph, fragment.start_join),
        join_field(graph, fragment.end_join),
    ];
    if materialize {
        let sequence = fragment.sequence.as_deref().unwrap_or(b"");
        fields.push(String::from_utf8_lossy(sequence).into_owned());
    }
    fields.join("\t")
}

fn join_field(graph: &Graph, join: Option<stable::Join>) -> String {
    match join {
        Some(join) => format!(
            "{}:{}:{}",
            graph.stable_sequence(join.seq_id).name, join.position, join.orientation
        ),
        None => String::from("*"),
    }
}

//-----------------------------------------------------------------------------

struct Config {
    filename: String,
    materialize: bool,
    verbosity: u32,
}

impl Config {
    fn new() -> Result<Config, String> {
        let args: Vec<String> = env::args().collect();
        let program = args[0].clone();

        let mut opts = Options::new();
        opts.optflag("h", "help", "print this help");
        opts.optflag("s", "sequences", "include the fragment sequences in the output");
        opts.optopt("v", "verbose", "verbosity level (default 0)", "INT");
        let matches = opts.parse(&args[1..]).map_err(|x| x.to_string())?;

        let header = format!("Usage: {} [options] graph.gfa", program);
        if matches.opt_present("h") {
            eprint!("{}", opts.usage(&header));
            process::exit(0);
        }

        let materialize = matches.opt_present("s");
        let mut verbosity: u32 = 0;
        if let Some(value) = matches.opt_str("v") {
            verbosity = value.parse::<u32>().map_err(|x| format!("--verbose: {}", x))?;
        }

        let filename = if let Some(value) = matches.free.first() {
            value.clone()
        } else {
            eprint!("{}", opts.usage(&header));
            process::exit(1);
        };

        Ok(Config { filename, materialize, verbosity })
    }
}

//-----------------------------------------------------------------------------
