use std::path::PathBuf;

pub const DEFAULT_CONFIG: &str = "corelib.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Render,
    Init,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    Render(RenderArgs),
    Init(InitArgs),
}

#[derive(Debug, Clone)]
pub struct RenderArgs {
    pub config: PathBuf,
    /// Render only the statement with this name.
    pub only: Option<String>,
}

#[derive(Debug, Clone)]
pub struct InitArgs {
    pub config: PathBuf,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1);
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    match first.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help(HelpTopic::Root)),
        "render" => parse_render(it.map(|s| s.as_str())),
        "init" => parse_init(it.map(|s| s.as_str())),
        _ => anyhow::bail!("unknown command: {first}"),
    }
}

fn parse_render<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut config = PathBuf::from(DEFAULT_CONFIG);
    let mut only: Option<String> = None;

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Render)),
            "--config" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--config requires a value");
                };
                config = PathBuf::from(v);
            }
            _ if token.starts_with("--config=") => {
                config = PathBuf::from(token.trim_start_matches("--config="));
            }
            "--only" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--only requires a value");
                };
                only = Some(v.to_string());
            }
            _ if token.starts_with("--only=") => {
                only = Some(token.trim_start_matches("--only=").to_string());
            }
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }

    if only.as_deref().is_some_and(|s| s.trim().is_empty()) {
        anyhow::bail!("--only must not be empty");
    }

    Ok(Command::Render(RenderArgs { config, only }))
}

fn parse_init<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut config = PathBuf::from(DEFAULT_CONFIG);

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Init)),
            "--config" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--config requires a value");
                };
                config = PathBuf::from(v);
            }
            _ if token.starts_with("--config=") => {
                config = PathBuf::from(token.trim_start_matches("--config="));
            }
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }

    Ok(Command::Init(InitArgs { config }))
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
corelib - render SQL Server statements described in a TOML file

USAGE:
  corelib <COMMAND> [OPTIONS]

COMMANDS:
  render        Print the SQL of every configured statement
  init          Write a sample config file

Run `corelib <command> --help` for more.
Set RUST_LOG (e.g. RUST_LOG=corelib.sql=debug) for diagnostics."
            );
        }
        HelpTopic::Render => {
            println!(
                "\
USAGE:
  corelib render [OPTIONS]

OPTIONS:
  --config <FILE>       Config file path (default: {DEFAULT_CONFIG})
  --only <NAME>         Render a single statement
  -h, --help            Print help"
            );
        }
        HelpTopic::Init => {
            println!(
                "\
USAGE:
  corelib init [OPTIONS]

OPTIONS:
  --config <FILE>       Where to write the config (default: {DEFAULT_CONFIG})
  -h, --help            Print help"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("corelib")
            .chain(list.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn no_args_prints_help() {
        let cmd = parse_args(&args(&[])).unwrap();
        assert!(matches!(cmd, Command::Help(HelpTopic::Root)));
    }

    #[test]
    fn parse_render_with_options() {
        let cmd = parse_args(&args(&["render", "--config", "db/sql.toml", "--only=people"])).unwrap();
        let Command::Render(render) = cmd else {
            panic!("expected render");
        };
        assert_eq!(render.config, PathBuf::from("db/sql.toml"));
        assert_eq!(render.only.as_deref(), Some("people"));
    }

    #[test]
    fn parse_render_defaults() {
        let Command::Render(render) = parse_args(&args(&["render"])).unwrap() else {
            panic!("expected render");
        };
        assert_eq!(render.config, PathBuf::from(DEFAULT_CONFIG));
        assert_eq!(render.only, None);
    }

    #[test]
    fn parse_init_config_equals() {
        let Command::Init(init) = parse_args(&args(&["init", "--config=x.toml"])).unwrap() else {
            panic!("expected init");
        };
        assert_eq!(init.config, PathBuf::from("x.toml"));
    }

    #[test]
    fn subcommand_help() {
        let cmd = parse_args(&args(&["render", "-h"])).unwrap();
        assert!(matches!(cmd, Command::Help(HelpTopic::Render)));
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(parse_args(&args(&["frobnicate"])).is_err());
        assert!(parse_args(&args(&["render", "--verbose"])).is_err());
        assert!(parse_args(&args(&["render", "--config"])).is_err());
        assert!(parse_args(&args(&["render", "--only", " "])).is_err());
    }
}
