//! CLI for tasklib
//!
//! Thin commands over [`TaskContext`]:
//! - `vars`: list pipeline variables
//! - `get`: print one variable
//! - `input`: resolve a task input
//! - `endpoint`: resolve a service endpoint field
//! - `completions`: generate shell completions

pub mod completions;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tasklib::{
    Authorization, Config, MASK, ProcessEnvironment, TaskContext, VariableEntry, init_logging,
};

/// CLI arguments for tasklib
#[derive(Parser, Debug)]
#[command(name = "tasklib")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Print secret values in the clear
    #[arg(long, global = true)]
    show_secrets: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List pipeline variables
    Vars {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print a pipeline variable
    Get {
        /// Variable name, e.g. Build.Repository.Name
        name: String,
    },

    /// Resolve a task input
    Input {
        /// Input name
        name: String,
        /// Fail if the input is unset
        #[arg(short, long)]
        required: bool,
        /// Read the input as a boolean
        #[arg(long = "bool", conflicts_with_all = ["delimiter", "path"])]
        boolean: bool,
        /// Split the input on a delimiter, one item per line
        #[arg(short, long, conflicts_with = "path")]
        delimiter: Option<String>,
        /// Read the input as a path
        #[arg(long)]
        path: bool,
        /// Require the path to exist
        #[arg(long, requires = "path")]
        check: bool,
    },

    /// Resolve a service endpoint field
    Endpoint {
        /// Endpoint id
        id: String,
        /// Fail if the field is unset
        #[arg(short, long)]
        required: bool,
        #[command(subcommand)]
        field: EndpointField,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: ShellArg,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum EndpointField {
    /// Endpoint url
    Url,
    /// Full authorization object as JSON
    Auth,
    /// Authorization scheme
    Scheme,
    /// Authorization parameter
    Param {
        /// Parameter name
        name: String,
    },
    /// Data parameter
    Data {
        /// Parameter name
        name: String,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ShellArg {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Parse and execute CLI arguments
pub fn run() -> Result<()> {
    let args = Args::parse();

    if let Command::Completions { shell, output } = &args.command {
        use clap_complete::Shell;

        let shell_enum = match shell {
            ShellArg::Bash => Shell::Bash,
            ShellArg::Zsh => Shell::Zsh,
            ShellArg::Fish => Shell::Fish,
            ShellArg::PowerShell => Shell::PowerShell,
        };
        let completions = completions::generate_completions(shell_enum)?;
        if let Some(output_path) = output {
            completions::save_completions(&completions, output_path)?;
        } else {
            println!("{completions}");
        }
        return Ok(());
    }

    let config = Config::from_env();
    init_logging(&config.log_level);
    let mut ctx = TaskContext::new(ProcessEnvironment::new(), config);
    let show_secrets = args.show_secrets;

    match args.command {
        Command::Vars { format } => {
            let mut vars = ctx.variables();
            vars.sort_by(|a, b| a.name.cmp(&b.name));
            println!("{}", format_variables(&vars, format, show_secrets)?);
        }
        Command::Get { name } => {
            let entry = ctx
                .variable(&name)
                .with_context(|| format!("Variable not set: {name}"))?;
            println!("{}", display_value(entry, show_secrets));
        }
        Command::Input {
            name,
            required,
            boolean,
            delimiter,
            path,
            check,
        } => {
            if boolean {
                println!("{}", ctx.get_bool_input(&name, required)?);
            } else if let Some(delimiter) = delimiter {
                for item in ctx.get_delimited_input(&name, &delimiter, required)? {
                    println!("{item}");
                }
            } else if path {
                if let Some(value) = ctx.get_path_input(&name, required, check)? {
                    println!("{value}");
                }
            } else if let Some(value) = ctx.get_input(&name, required)? {
                println!("{value}");
            }
        }
        Command::Endpoint {
            id,
            required,
            field,
        } => {
            let value = match field {
                EndpointField::Url => Some(ctx.get_endpoint_url(&id, required)?),
                EndpointField::Auth => ctx
                    .get_endpoint_authorization(&id, required)?
                    .map(|auth| format_authorization(&auth, show_secrets))
                    .transpose()?,
                EndpointField::Scheme => ctx.get_endpoint_authorization_scheme(&id, required),
                EndpointField::Param { name } => ctx
                    .get_endpoint_authorization_parameter(&id, &name, required)
                    .map(|v| if show_secrets { v } else { MASK.to_string() }),
                EndpointField::Data { name } => {
                    ctx.get_endpoint_data_parameter(&id, &name, required)
                }
            };
            if let Some(value) = value {
                println!("{value}");
            }
        }
        Command::Completions { .. } => {}
    }

    Ok(())
}

fn display_value(entry: &VariableEntry, show_secrets: bool) -> &str {
    if entry.secret && !show_secrets {
        MASK
    } else {
        &entry.value
    }
}

fn format_variables(
    vars: &[VariableEntry],
    format: OutputFormat,
    show_secrets: bool,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(vars
            .iter()
            .map(|entry| {
                let marker = if entry.secret { " (secret)" } else { "" };
                format!("{}={}{}", entry.name, display_value(entry, show_secrets), marker)
            })
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => {
            let shown: Vec<VariableEntry> = vars
                .iter()
                .map(|entry| VariableEntry {
                    value: display_value(entry, show_secrets).to_string(),
                    ..entry.clone()
                })
                .collect();
            serde_json::to_string_pretty(&shown).context("Failed to serialize variables")
        }
    }
}

fn format_authorization(auth: &Authorization, show_secrets: bool) -> Result<String> {
    let mut shown = auth.clone();
    if !show_secrets {
        for value in shown.parameters.values_mut() {
            *value = MASK.to_string();
        }
    }
    serde_json::to_string(&shown).context("Failed to serialize authorization")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn vars() -> Vec<VariableEntry> {
        vec![
            VariableEntry::new("Build.Repository.Name", "repo", false),
            VariableEntry::new("Deploy.Token", "hunter2", true),
        ]
    }

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_format_variables_text_masks_secrets() {
        let text = format_variables(&vars(), OutputFormat::Text, false).unwrap();
        assert_eq!(text, "Build.Repository.Name=repo\nDeploy.Token=*** (secret)");
    }

    #[test]
    fn test_format_variables_show_secrets() {
        let text = format_variables(&vars(), OutputFormat::Text, true).unwrap();
        assert!(text.contains("Deploy.Token=hunter2"));
    }

    #[test]
    fn test_format_variables_json() {
        let json = format_variables(&vars(), OutputFormat::Json, false).unwrap();
        let decoded: Vec<VariableEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded[1].value, MASK);
        assert!(decoded[1].secret);
    }

    #[test]
    fn test_format_authorization_masks_parameters() {
        let auth: Authorization =
            serde_json::from_str(r#"{"parameters": {"password": "pw"}, "scheme": "Basic"}"#)
                .unwrap();
        let json = format_authorization(&auth, false).unwrap();
        assert!(json.contains("Basic"));
        assert!(!json.contains("\"pw\""));
    }

    #[test]
    fn test_parse_input_command() {
        let args = Args::try_parse_from(["tasklib", "input", "path1", "--path", "--check"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Input { path: true, check: true, .. }
        ));
        assert!(Args::try_parse_from(["tasklib", "input", "x", "--check"]).is_err());
    }

    #[test]
    fn test_parse_endpoint_command() {
        let args =
            Args::try_parse_from(["tasklib", "endpoint", "id1", "--required", "param", "username"])
                .unwrap();
        assert!(matches!(
            args.command,
            Command::Endpoint { required: true, field: EndpointField::Param { ref name }, .. }
                if name == "username"
        ));
        assert!(matches!(
            Args::try_parse_from(["tasklib", "endpoint", "id1", "scheme"]).unwrap().command,
            Command::Endpoint { field: EndpointField::Scheme, .. }
        ));
        assert!(Args::try_parse_from(["tasklib", "endpoint", "id1", "--url"]).is_err());
    }
}
