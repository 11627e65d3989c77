use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use colored::*;
use fleetcfg::config::MissionConfig;
use fleetcfg::fleet::Role;
use fleetcfg::launch;

fn main() {
    let matches = App::new("fleetcfg")
        .version("0.1.0")
        .author("Marine Autonomy Systems Group")
        .about("Generates mission configuration text for the topside/USV/AUV fleet")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("format")
                .short("f")
                .long("format")
                .value_name("FORMAT")
                .help("Output format: rendered text, or the computed parameter summary as JSON")
                .takes_value(true)
                .possible_values(&["text", "json"])
                .default_value("text")
                .global(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Enable debug diagnostics on stderr")
                .global(true),
        )
        .subcommand(
            SubCommand::with_name("topside")
                .about("Generate configuration for the topside control station")
                .arg(
                    Arg::with_name("APP")
                        .help("Application name (gobyd, liaison, geov, opencpn, nav_manager)")
                        .required(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("usv")
                .about("Generate configuration for the unmanned surface vehicle")
                .arg(
                    Arg::with_name("APP")
                        .help("Application name (gobyd, frontseat, liaison, usv_manager, moos, bhv, frontseat_sim)")
                        .required(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("auv")
                .about("Generate configuration for one autonomous underwater vehicle")
                .arg(
                    Arg::with_name("APP")
                        .help("Application name (gobyd, frontseat, liaison, nav_manager, moos, bhv, frontseat_sim)")
                        .required(true),
                )
                .arg(
                    Arg::with_name("index")
                        .short("i")
                        .long("index")
                        .value_name("N")
                        .help("AUV deployment index (overrides FLEETCFG_AUV_INDEX)")
                        .takes_value(true)
                        .validator(|v| match v.parse::<u16>() {
                            Ok(_) => Ok(()),
                            Err(_) => Err("index must be a non-negative integer".into()),
                        }),
                ),
        )
        .get_matches();

    init_tracing(matches.is_present("verbose"));

    if let Err(e) = run(&matches) {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let (role, sub) = match matches.subcommand() {
        ("topside", Some(sub)) => (Role::Topside, sub),
        ("usv", Some(sub)) => (Role::Usv, sub),
        ("auv", Some(sub)) => (Role::Auv, sub),
        // SubcommandRequiredElseHelp exits before we get here.
        _ => unreachable!(),
    };

    let mut cfg = MissionConfig::from_env()?;
    if let Some(index) = sub.value_of("index") {
        cfg.auv_index = Some(index.parse()?);
    }

    let app = sub.value_of("APP").unwrap_or_default();
    match matches.value_of("format") {
        Some("json") => {
            let summary = launch::summarize(role, &cfg)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        _ => {
            let text = launch::generate(role, app, &cfg)?;
            println!("{text}");
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    // Rendered configuration goes to stdout; diagnostics stay on stderr.
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
