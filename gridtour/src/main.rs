//! `gridtour`: plan a nearest-first route through targets on a terrain map,
//! then animate it in the terminal or print it.

use std::error::Error;
use std::process::ExitCode;

use structopt::StructOpt;

use gridtour_plan::{Playback, TerrainMap, play, plan_tour};

mod cli;
mod logger;
mod render;
mod report;
mod scenario;

use cli::{Opt, Output};
use render::TerminalPresenter;
use scenario::{Scenario, Settings};

fn main() -> ExitCode {
    let opt = Opt::from_args();
    match run(opt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprint!("{}", error_report(e.as_ref()));
            ExitCode::FAILURE
        }
    }
}

/// The error and each of its causes, one line apiece.
fn error_report(e: &(dyn Error + 'static)) -> String {
    let mut out = format!("error: {e}\n");
    let mut source = e.source();
    while let Some(cause) = source {
        out.push_str(&format!("  caused by: {cause}\n"));
        source = cause.source();
    }
    out
}

fn run(opt: Opt) -> Result<(), Box<dyn Error>> {
    logger::init(opt.verbose, opt.log_file.as_deref())?;

    let scenario = match &opt.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    let settings = Settings::resolve(opt, scenario)?;
    log::debug!("{settings:?}");

    let map = TerrainMap::load(&settings.map)?;
    let tour = plan_tour(&map, settings.start, settings.targets, settings.exit)?;

    match settings.output {
        Output::Terminal => {
            let mut presenter = TerminalPresenter::new(settings.hold);
            let done = play(&mut presenter, Playback::new(&map, &tour), settings.frame_delay)?;
            if !done {
                println!("Stopped early.");
            }
            println!("Visit order: {}", tour.visit_order().join(", "));
            println!("Total cost: {}", tour.total_cost());
        }
        Output::Plain => print!("{}", report::plain(&map, &tour)),
        Output::Json => println!("{}", report::json(&map, &tour)?),
    }
    Ok(())
}
