#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Serve,
    Provision,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "serve" => CliVerb::Serve,
        "provision" => CliVerb::Provision,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  serve                                Serve the site and setup wizard over HTTP"
            .to_string(),
        "  provision status                     Show the tenant's setup status".to_string(),
        "  provision confirm                    Mark a pending configuration as live"
            .to_string(),
        "  help                                 Show this help".to_string(),
        String::new(),
        "Environment:".to_string(),
        "  BIZSITE_CONFIG                       Path to config.yaml (default ~/.bizsite/config.yaml)"
            .to_string(),
        "  BIZSITE_AI_API_BASE                  Override the text generation API base URL"
            .to_string(),
    ]
}

pub fn help_text() -> String {
    cli_help_lines().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_aliases_parse_to_help() {
        for raw in ["help", "--help", "-h"] {
            assert_eq!(parse_cli_verb(raw), CliVerb::Help);
        }
        assert_eq!(parse_cli_verb("start"), CliVerb::Unknown);
    }
}
