//! `sprof` command-line front end

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use sprof_cli::{commands, CliConfig};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let file = || {
        Arg::new("file")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("Profile document")
    };

    Command::new("sprof")
        .version(sprof_cli::VERSION)
        .about("Validate, migrate, format and lower session profiles")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .subcommand(
            Command::new("validate")
                .about("Decode a profile and report diagnostics")
                .arg(file())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("migrate")
                .about("Upgrade a profile to the current version")
                .arg(file())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_parser(value_parser!(PathBuf))
                        .help("Write here instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("fmt")
                .about("Rewrite a profile in canonical form")
                .arg(file())
                .arg(
                    Arg::new("check")
                        .long("check")
                        .action(ArgAction::SetTrue)
                        .help("Fail instead of rewriting when the file is not canonical"),
                ),
        )
        .subcommand(
            Command::new("generate")
                .about("Write one initialization script per profile section")
                .arg(file())
                .arg(
                    Arg::new("prefix")
                        .long("prefix")
                        .help("File name prefix; defaults to the profile's file stem"),
                )
                .arg(
                    Arg::new("output-dir")
                        .long("output-dir")
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory to write scripts to"),
                ),
        )
}

fn init_logging(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn file_arg(args: &ArgMatches) -> Result<&Path> {
    args.get_one::<PathBuf>("file")
        .map(PathBuf::as_path)
        .ok_or_else(|| anyhow::anyhow!("missing profile file"))
}

fn run(matches: &ArgMatches, config: &CliConfig) -> Result<bool> {
    let mut stdout = io::stdout().lock();

    match matches.subcommand() {
        Some(("validate", args)) => {
            commands::validate(file_arg(args)?, args.get_flag("json"), &mut stdout)
        }
        Some(("migrate", args)) => {
            let output = args.get_one::<PathBuf>("output").map(PathBuf::as_path);
            commands::migrate(file_arg(args)?, output, &mut stdout)?;
            Ok(true)
        }
        Some(("fmt", args)) => {
            let file = file_arg(args)?;
            let check = args.get_flag("check");
            let canonical = commands::fmt(file, check)?;
            if check && !canonical {
                println!("{} is not canonical", file.display());
            }
            Ok(canonical || !check)
        }
        Some(("generate", args)) => {
            let file = file_arg(args)?;
            let prefix = args.get_one::<String>("prefix").map(String::as_str);
            let output_dir = args
                .get_one::<PathBuf>("output-dir")
                .cloned()
                .or_else(|| config.generate.output_dir.clone())
                .or_else(|| file.parent().map(Path::to_path_buf))
                .unwrap_or_default();

            let written =
                commands::generate(file, prefix, &output_dir, &config.generator_config())?;
            for path in written {
                println!("{}", path.display());
            }
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let config_path = matches.get_one::<PathBuf>("config").map(PathBuf::as_path);
    let config = CliConfig::load_or_default(config_path)?;
    init_logging(&config);

    let success = run(&matches, &config)?;
    std::process::exit(if success { 0 } else { 1 });
}
