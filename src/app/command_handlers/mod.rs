use crate::app::cli::{help_text, parse_cli_verb, CliVerb};

pub mod provision;
pub mod serve;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    if args.is_empty() {
        return Ok(help_text());
    }

    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Serve => serve::cmd_serve(&args[1..]),
        CliVerb::Provision => provision::cmd_provision(&args[1..]),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(format!("unknown command `{}`", args[0])),
    }
}
