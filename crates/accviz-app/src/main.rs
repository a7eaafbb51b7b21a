//! Main application entry point: loads the data, wires the console views
//! to the dashboard and runs the interactive command loop.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use accviz_core::dashboard::{Dashboard, ViewSubscriber};
use accviz_core::events::{InteractionEvent, Origin};
use accviz_core::model::{Canton, GeoMode};
use accviz_core::options::FilterOptions;
use accviz_core::source::{AccidentSource, PopulationSource};
use accviz_data::{DashboardLoader, DsvAccidentSource, DsvPopulationSource};

mod console;
mod demo;

use console::{
    ConsoleMapView, ConsoleProportionView, ConsoleTimelineView, ConsoleTrendView, SnapshotView,
};
use demo::{DemoAccidentSource, DemoPopulationSource};

const DEFAULT_ACCIDENT_PATH: &str = "data/faelle.dsv";
const DEFAULT_POPULATION_PATH: &str = "data/bevoelkerung.csv";

struct Args {
    demo: bool,
    accidents: PathBuf,
    population: PathBuf,
    export_dir: PathBuf,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            demo: false,
            accidents: PathBuf::from(DEFAULT_ACCIDENT_PATH),
            population: PathBuf::from(DEFAULT_POPULATION_PATH),
            export_dir: PathBuf::from("."),
        }
    }
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--demo" => args.demo = true,
            "--data" => {
                if let Some(path) = iter.next() {
                    args.accidents = PathBuf::from(path);
                }
            }
            "--population" => {
                if let Some(path) = iter.next() {
                    args.population = PathBuf::from(path);
                }
            }
            "--export-dir" => {
                if let Some(path) = iter.next() {
                    args.export_dir = PathBuf::from(path);
                }
            }
            other => {
                eprintln!("unknown argument '{other}', try --demo, --data, --population, --export-dir");
            }
        }
    }
    args
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args = parse_args();
    info!("Starting accident dashboard");

    let runtime = tokio::runtime::Runtime::new()?;

    let use_demo = args.demo || !args.accidents.exists();
    if use_demo && !args.demo {
        warn!(
            "no accident data at {:?}, falling back to demo mode",
            args.accidents
        );
    }

    let (accidents, population): (Arc<dyn AccidentSource>, Arc<dyn PopulationSource>) = if use_demo
    {
        (
            Arc::new(DemoAccidentSource::new()),
            Arc::new(DemoPopulationSource::new()),
        )
    } else {
        (
            Arc::new(DsvAccidentSource::new(&args.accidents)),
            Arc::new(DsvPopulationSource::new(&args.population)),
        )
    };

    let loader = DashboardLoader::new(accidents, population);
    let data = runtime.block_on(loader.load_or_empty());
    info!("{} records loaded", data.store.len());

    let mut dashboard = Dashboard::new(data.store, data.population);

    // The views stay alive for the whole session; the dashboard only holds
    // weak references.
    let map_view = Arc::new(ConsoleMapView);
    let trend_view = Arc::new(ConsoleTrendView);
    let proportion_view = Arc::new(ConsoleProportionView);
    let timeline_view = Arc::new(ConsoleTimelineView);
    let snapshot_view = Arc::new(SnapshotView::new());
    dashboard.subscribe(map_view.clone() as Arc<dyn ViewSubscriber>);
    dashboard.subscribe(trend_view.clone() as Arc<dyn ViewSubscriber>);
    dashboard.subscribe(proportion_view.clone() as Arc<dyn ViewSubscriber>);
    dashboard.subscribe(timeline_view.clone() as Arc<dyn ViewSubscriber>);
    dashboard.subscribe(snapshot_view.clone() as Arc<dyn ViewSubscriber>);

    dashboard.refresh();
    run_command_loop(&mut dashboard, &snapshot_view, &args.export_dir)
}

fn run_command_loop(
    dashboard: &mut Dashboard,
    snapshots: &SnapshotView,
    export_dir: &Path,
) -> Result<()> {
    print_help();
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let mut parts = input.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let rest: Vec<&str> = parts.collect();

        match command {
            "quit" | "exit" => break,
            "help" => print_help(),
            "options" => print_options(dashboard.options()),
            "export" => match snapshots.latest() {
                Some(snapshot) => {
                    let dir = rest.first().map(Path::new).unwrap_or(export_dir);
                    match snapshot.write_to(dir) {
                        Ok(path) => println!("wrote {}", path.display()),
                        Err(err) => eprintln!("export failed: {err:#}"),
                    }
                }
                None => println!("nothing rendered yet"),
            },
            _ => match parse_event(command, &rest) {
                Ok(event) => dashboard.handle(event),
                Err(msg) => println!("{msg}"),
            },
        }
    }
    Ok(())
}

/// Translate one console command into an interaction event.
fn parse_event(command: &str, args: &[&str]) -> Result<InteractionEvent, String> {
    let joined = args.join(" ");
    let optional = if joined.is_empty() || joined == "all" {
        None
    } else {
        Some(joined.clone())
    };

    match command {
        "year" => {
            let (from, to) = match args {
                [from, to] => (
                    from.parse().map_err(|_| format!("bad year '{from}'"))?,
                    to.parse().map_err(|_| format!("bad year '{to}'"))?,
                ),
                _ => return Err("usage: year <from> <to>".to_string()),
            };
            Ok(InteractionEvent::YearWindowChanged {
                from,
                to,
                origin: Origin::UserInput,
            })
        }
        "branch" => Ok(InteractionEvent::BranchSelected(optional)),
        "age" => Ok(InteractionEvent::AgeGroupSelected(optional)),
        "gender" => Ok(InteractionEvent::GenderSelected(optional)),
        "activity" => Ok(InteractionEvent::ActivitySelected(optional)),
        "canton" => match optional {
            None => Ok(InteractionEvent::CantonSelected(None)),
            Some(name) => match Canton::from_name(&name) {
                Some(canton) => Ok(InteractionEvent::CantonSelected(Some(canton))),
                None => Err(format!("unknown canton '{name}'")),
            },
        },
        "mode" => match joined.as_str() {
            "unfall" | "accident" => Ok(InteractionEvent::GeoModeSelected(GeoMode::AccidentLocation)),
            "wohnort" | "residence" => Ok(InteractionEvent::GeoModeSelected(GeoMode::Residence)),
            other => Err(format!("unknown mode '{other}', use unfall or wohnort")),
        },
        "click-canton" => match Canton::from_name(&joined) {
            Some(canton) => Ok(InteractionEvent::CantonClicked(canton)),
            None => Err(format!("unknown canton '{joined}'")),
        },
        "click-activity" => {
            if joined.is_empty() {
                Err("usage: click-activity <name>".to_string())
            } else {
                Ok(InteractionEvent::ActivityClicked(joined))
            }
        }
        "click-gender" => {
            if joined.is_empty() {
                Err("usage: click-gender <g>".to_string())
            } else {
                Ok(InteractionEvent::GenderClicked(joined))
            }
        }
        "click-year" => match joined.parse() {
            Ok(year) => Ok(InteractionEvent::YearClicked(year)),
            Err(_) => Err(format!("bad year '{joined}'")),
        },
        "reset" => Ok(InteractionEvent::Reset),
        other => Err(format!("unknown command '{other}', try 'help'")),
    }
}

fn print_options(options: &FilterOptions) {
    let cantons: Vec<&str> = options.cantons.iter().map(|c| c.code()).collect();
    println!("years:      {:?}", options.years);
    println!("branches:   {}", options.branches.join(", "));
    println!("age groups: {}", options.age_groups.join(", "));
    println!("genders:    {}", options.genders.join(", "));
    println!("cantons:    {}", cantons.join(", "));
    println!("activities: {} choices", options.activities.len());
    for activity in &options.activities {
        println!("  {activity}");
    }
}

fn print_help() {
    println!("commands:");
    println!("  year <from> <to>        brush the year window");
    println!("  branch <name|all>       filter by insurance branch");
    println!("  age <group|all>         filter by age group");
    println!("  gender <g|all>          filter by gender");
    println!("  activity <name|all>     filter by activity");
    println!("  canton <code|all>       filter by canton");
    println!("  mode <unfall|wohnort>   aggregate by accident or residence canton");
    println!("  click-canton <code>     toggle a canton via the map");
    println!("  click-activity <name>   toggle the activity highlight");
    println!("  click-gender <g>        toggle the gender highlight");
    println!("  click-year <year>       collapse the window to one year");
    println!("  reset                   restore all defaults");
    println!("  options                 show the current option lists");
    println!("  export [dir]            write a JSON snapshot");
    println!("  quit");
}
