use clap::{arg, crate_version, Arg, Command};
use codespan_reporting::{
    diagnostic::Diagnostic,
    files::SimpleFile,
    term::{
        self,
        termcolor::{StandardStream, WriteColor},
        Config as TermConfig,
    },
};
use colored::Colorize;
use ptree::{write_tree, TreeBuilder};
use shrdlite_core::graph_export::{ExploredEdge, SearchGraph};
use shrdlite_core::{plan_interpretations, Config, RawWorld, ShrdliteError, WorldSnapshot};
use std::fs;
use std::path::Path;
use std::process::exit;

fn get_file_or_exit(path: &Path) -> SimpleFile<&str, String> {
    let file_name: &str = path
        .file_name()
        .map(|os_str| os_str.to_str())
        .unwrap()
        .unwrap();
    let file_content: String = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("Error reading {}: {}", path.display(), err);
            exit(1);
        }
    };
    SimpleFile::new(file_name, file_content)
}

fn load_world(path: &Path) -> WorldSnapshot {
    let raw_text = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(err) => {
            eprintln!("Error reading {}: {}", path.display(), err);
            exit(1);
        }
    };
    let raw: RawWorld = match serde_json::from_str(&raw_text) {
        Ok(w) => w,
        Err(err) => {
            eprintln!("❌ Did not parse world file successfully: {}", err);
            exit(1);
        }
    };
    match WorldSnapshot::try_new(raw) {
        Ok(w) => w,
        Err(err) => {
            eprintln!("❌ World is not well-formed: {}", err);
            exit(1);
        }
    }
}

fn print_diagnostic(diag: &Diagnostic<()>, writer: &mut dyn WriteColor, config: &TermConfig) {
    let files = SimpleFile::new("<command>", "");
    term::emit(writer, config, &files, diag).expect("Error when printing to term.")
}

fn main() {
    let matches = Command::new("shrdlite")
        .version(crate_version!())
        .about("A natural-language blocks-world instruction planner")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("plan")
                .about("Interpret an utterance and search for a plan that satisfies it.")
                .arg(
                    Arg::new("WORLD")
                        .required(true)
                        .help("Path to a world JSON file")
                        .index(1),
                )
                .arg(
                    Arg::new("COMMAND")
                        .required(true)
                        .help("The command, in the test fixture notation (e.g. \"take the white ball\")")
                        .index(2),
                )
                .arg(arg!(-e --explain "Prints the resolver's reasoning as a tree."))
                .arg(
                    Arg::new("GRAPH")
                        .long("graph")
                        .takes_value(true)
                        .value_name("FILE")
                        .required(false)
                        .help("Write the plan's state-transition trace as a DOT graph to FILE."),
                )
                .arg(
                    Arg::new("TIMEOUT")
                        .long("timeout")
                        .takes_value(true)
                        .value_name("SECONDS")
                        .required(false)
                        .help("Override the search's wall-clock timeout."),
                )
                .arg(
                    Arg::new("NODE_LIMIT")
                        .long("expanded-node-limit")
                        .takes_value(true)
                        .value_name("COUNT")
                        .required(false)
                        .help("Cap the number of states A* may expand before giving up."),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Validate a world file without planning.")
                .arg(
                    Arg::new("WORLD")
                        .required(true)
                        .help("Path to a world JSON file")
                        .index(1),
                ),
        )
        .get_matches();

    let err_writer = StandardStream::stderr(codespan_reporting::term::termcolor::ColorChoice::Auto);
    let term_config = TermConfig::default();

    match matches.subcommand().unwrap() {
        ("plan", sub) => {
            let world_path = Path::new(sub.value_of("WORLD").unwrap());
            let world = load_world(world_path);

            let command_text = sub.value_of("COMMAND").unwrap();
            let command: shrdlite_core::Command = match command_text.parse() {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("❌ Did not parse command successfully: {}", e);
                    exit(1);
                }
            };

            let mut config = Config::default();
            if let Some(timeout) = sub.value_of("TIMEOUT") {
                config.timeout_s = match timeout.parse() {
                    Ok(t) => t,
                    Err(_) => {
                        eprintln!("❌ --timeout expects a number of seconds");
                        exit(1);
                    }
                };
            }
            if let Some(limit) = sub.value_of("NODE_LIMIT") {
                config.expanded_node_limit = match limit.parse() {
                    Ok(n) => Some(n),
                    Err(_) => {
                        eprintln!("❌ --expanded-node-limit expects a whole number of states");
                        exit(1);
                    }
                };
            }

            match plan_interpretations(&[command.clone()], &world, &config) {
                Ok(outcomes) => {
                    for (i, outcome) in outcomes.iter().enumerate() {
                        if outcomes.len() > 1 {
                            println!("{}", format!("-- interpretation {} --", i + 1).bold());
                        }
                        println!(
                            "{} {}",
                            "goal:".dimmed(),
                            shrdlite_core::plan::describe_dnf(&outcome.dnf)
                        );
                        for token in &outcome.plan {
                            println!("{}", token);
                        }
                        println!("{} {:.1}", "cost:".dimmed(), outcome.cost);

                        if let Some(graph_path) = sub.value_of("GRAPH") {
                            write_plan_graph(&outcome.explored, graph_path);
                        }
                    }

                    if sub.is_present("explain") {
                        print_explanation(&command, &world);
                    }
                }
                Err(e) => {
                    let diag = e.to_diagnostic();
                    print_diagnostic(&diag, &mut err_writer.lock(), &term_config);
                    exit(1);
                }
            }
        }
        ("check", sub) => {
            let world_path = Path::new(sub.value_of("WORLD").unwrap());
            let file = get_file_or_exit(world_path);
            match serde_json::from_str::<RawWorld>(file.source()) {
                Ok(raw) => match WorldSnapshot::try_new(raw) {
                    Ok(_) => println!("{}", "world is well-formed".green()),
                    Err(e) => {
                        let diag = ShrdliteError::from(e).to_diagnostic();
                        print_diagnostic(&diag, &mut err_writer.lock(), &term_config);
                        exit(1);
                    }
                },
                Err(e) => {
                    eprintln!("❌ Did not parse world file successfully: {}", e);
                    exit(1);
                }
            }
        }
        _ => (),
    }
}

/// Builds the resolver's reasoning for `command` against `world` and prints
/// it as an indented tree, the same role `modus proof --explain` fills for
/// SLD resolution.
fn print_explanation(command: &shrdlite_core::Command, world: &WorldSnapshot) {
    match shrdlite_core::compiler::interpret(command, world, true) {
        Ok(interpretation) => {
            let mut builder = TreeBuilder::new("resolution".to_string());
            if let Some(trace) = &interpretation.trace {
                append_trace(&mut builder, trace);
            }
            let tree = builder.build();
            write_tree(&tree, &mut std::io::stdout()).expect("Error when printing tree to stdout.");
        }
        Err(e) => {
            eprintln!("(no explanation: {})", e);
        }
    }
}

fn append_trace(builder: &mut TreeBuilder, trace: &shrdlite_core::trace::Trace) {
    if trace.children.is_empty() {
        builder.add_empty_child(trace.label.clone());
        return;
    }
    builder.begin_child(trace.label.clone());
    for child in &trace.children {
        append_trace(builder, child);
    }
    builder.end_child();
}

/// Writes every transition A* actually explored (spec §4.2 SUPPLEMENT, not
/// just the winning path) as a DOT graph at `path`.
fn write_plan_graph(explored: &[ExploredEdge], path: &str) {
    let graph = SearchGraph::from_edges(explored);
    let mut out = match fs::File::create(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("❌ Unable to open {} for writing: {}", path, e);
            exit(1);
        }
    };
    if let Err(e) = graph.write_dot(&mut out) {
        eprintln!("❌ Unable to write graph: {}", e);
        exit(1);
    }
}
