pub mod handlers;
pub mod setup;

use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("formkit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Form-definition builder: palette, session replay and preview checks")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("PATH")
                .help("Config file to use instead of .formkit/config.toml"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log store operations at debug level"),
        )
        .subcommand(cmd_palette())
        .subcommand(cmd_replay())
        .subcommand(cmd_submit())
}

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

fn script_arg() -> Arg {
    Arg::new("script")
        .required(true)
        .value_name("SCRIPT")
        .help("JSON file with an \"operations\" list")
}

fn cmd_palette() -> Command {
    Command::new("palette")
        .about("List field kinds with their default configuration")
        .arg(json_flag())
}

fn cmd_replay() -> Command {
    Command::new("replay")
        .about("Apply a script of builder operations and print the resulting form")
        .arg(script_arg())
        .arg(json_flag())
}

fn cmd_submit() -> Command {
    Command::new("submit")
        .about("Replay a script, then validate a preview submission against the form")
        .arg(script_arg())
        .arg(
            Arg::new("submission")
                .required(true)
                .value_name("SUBMISSION")
                .help("JSON object mapping field ids (or $N) to entered values"),
        )
}
