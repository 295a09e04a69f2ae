use std::fs;
use std::io::BufReader;

use clap::Parser;
use serde::Serialize;
use tinytac::*;

#[derive(clap::Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file: a JSON message with a header and expanded subsets
    #[arg(index = 1)]
    filename: String,

    /// JSON file with decoding options
    #[arg(short, long)]
    options: Option<String>,

    /// Keep observations later than the current time
    #[arg(short, long)]
    accept_future: bool,

    /// Assume winds in knots when a subset does not say
    #[arg(short, long)]
    knots: bool,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Output {
    Report(Box<Report>),
    Rejected { subset: usize, error: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let args = Args::parse();

    let mut options: DecodeOptions = match &args.options {
        Some(path) => serde_json::from_reader(BufReader::new(fs::File::open(path)?))?,
        None => DecodeOptions::default(),
    };
    if args.accept_future {
        options.reject_future = false;
    }
    if args.knots {
        options.wind_in_knots = Some(true);
    }

    let file = fs::File::open(&args.filename)?;
    let message: Message = serde_json::from_reader(BufReader::new(file))?;

    let decoder = Decoder::new(options);
    let outputs: Vec<Output> = decoder
        .decode_message(&message)
        .into_iter()
        .enumerate()
        .map(|(subset, result)| match result {
            Ok(report) => Output::Report(Box::new(report)),
            Err(e) => Output::Rejected {
                subset,
                error: e.to_string(),
            },
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&outputs)?);
    Ok(())
}
