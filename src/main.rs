use clap::{App, Arg};
#[macro_use]
extern crate log;
use islet::error::{DecodeError, Result};
use islet::models;
use islet::segment::marked_segments;
use islet::Hmm;

fn main() {
    let matches = App::new("islet")
        .version("0.1")
        .about("DNA(TEXT)->CpG islands(TSV)")
        .setting(clap::AppSettings::ArgRequiredElseHelp)
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Debug mode"),
        )
        .arg(
            Arg::with_name("model")
                .long("model")
                .value_name("JSON")
                .takes_value(true)
                .help("Decode with a custom model. States labelled with a trailing '+' are reported."),
        )
        .arg(
            Arg::with_name("input")
                .value_name("INPUT")
                .required(true)
                .index(1)
                .help("Sequence file. Bytes outside the model alphabet are skipped."),
        )
        .get_matches();
    let level = match matches.occurrences_of("verbose") {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    if let Err(why) = run(&matches) {
        eprintln!("islet: {}", why);
        std::process::exit(1);
    }
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    let hmm = match matches.value_of("model") {
        Some(path) => load_model(path)?,
        None => models::cpg_island(),
    };
    let input = matches.value_of("input").unwrap();
    let raw = std::fs::read(input)?;
    let sequence = hmm.restrict_to_alphabet(&raw);
    debug!("kept {} of {} input bytes", sequence.len(), raw.len());
    let decoded = hmm.decode(&sequence)?;
    debug!("best path log-probability: {:.4}", decoded.log_prob);
    let segments = marked_segments(&decoded.path, |&s| models::is_island_state(hmm.label(s)));
    info!("{} island(s)", segments.len());
    if segments.is_empty() {
        println!("no CpG islands detected");
    } else {
        for segment in &segments {
            println!("{}\t{}", segment.start, segment.end);
        }
    }
    Ok(())
}

fn load_model(path: &str) -> Result<Hmm> {
    let file = std::fs::File::open(path)?;
    let rdr = std::io::BufReader::new(file);
    let spec: models::ModelSpec =
        serde_json::from_reader(rdr).map_err(|why| DecodeError::InvalidModel(why.to_string()))?;
    spec.into_hmm()
}
