use clap::Parser;
use spin::cli::auth::AuthCommands;
use spin::cli::{Cli, Commands, LogLevelArg};

#[test]
fn test_parse_auth_cookie() {
    let cli = Cli::try_parse_from(["spin", "auth", "cookie", "SESSION=abcd1234"]).unwrap();
    let Commands::Auth { command } = cli.command;
    assert_eq!(
        command,
        AuthCommands::Cookie {
            cookie: "SESSION=abcd1234".to_string()
        }
    );
    assert_eq!(cli.log_level, None);
}

#[test]
fn test_cookie_requires_exactly_one_value() {
    assert!(Cli::try_parse_from(["spin", "auth", "cookie"]).is_err());
    assert!(Cli::try_parse_from(["spin", "auth", "cookie", "A=1", "B=2"]).is_err());
}

#[test]
fn test_log_level_is_global() {
    let cli = Cli::try_parse_from(["spin", "auth", "cookie", "A=1", "--log-level", "debug"])
        .unwrap();
    assert_eq!(cli.log_level, Some(LogLevelArg::Debug));
    assert_eq!(
        LogLevelArg::Debug.to_level_filter(),
        log::LevelFilter::Debug
    );
}

#[test]
fn test_subcommand_is_required() {
    assert!(Cli::try_parse_from(["spin"]).is_err());
    assert!(Cli::try_parse_from(["spin", "auth"]).is_err());
}

#[test]
fn test_cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
