use anyhow::{Context, Result};
use chatbox_core::logging::{self, LoggingConfig};
use chatbox_core::{Config, ServiceConfig};
use chatbox_providers::AnswerServiceFactory;
use chatbox_ui::{App, ChatController, RenderedTranscript, TerminalView};
use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

/// Chatbox - a question-and-answer chat widget
#[derive(Parser, Debug)]
#[command(name = "chatbox")]
#[command(about = "A terminal chat widget backed by an answer service", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to chatbox.toml (default: ./chatbox.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive chat widget
    Start,
    /// Ask a single question and print the transcript
    Ask {
        /// Message to send
        #[arg(required = true, value_name = "MESSAGE")]
        message: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show the resolved configuration
    Status,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Html,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from("chatbox.toml"));
    let config = load_or_create_config(&config_path)?;

    let interactive = matches!(cli.command, Commands::Start);
    let mut logging_config = LoggingConfig::from(config.logging.clone()).with_stderr(!interactive);
    if cli.verbose {
        logging_config = logging_config.with_level("debug");
    }
    let _guard = logging::init_logging(Some(logging_config)).context("Failed to initialize logging")?;

    if cli.verbose {
        eprintln!("{} Using config: {}", "Info:".blue().bold(), config_path.display());
    }

    match cli.command {
        Commands::Start => cmd_start(config).await?,
        Commands::Ask { message, format } => cmd_ask(config, &message.join(" "), format).await?,
        Commands::Status => cmd_status(&config, &config_path, cli.verbose)?,
    }

    Ok(())
}

/// Load config from file or create from example
fn load_or_create_config(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::from_file(path).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    } else {
        eprintln!("{} Config not found at {}", "Warning:".yellow().bold(), path.display());
        eprintln!("{} Creating config from example...", "Info:".blue().bold());

        std::fs::write(path, Config::example()).context("Failed to create config")?;

        eprintln!(
            "{} Created config at {}. Please edit it with your settings.",
            "Success:".green().bold(),
            path.display()
        );

        anyhow::bail!("Please edit {} with your settings and run again", path.display())
    }
}

fn build_controller(config: &Config) -> Result<ChatController<TerminalView>> {
    let service = AnswerServiceFactory::create_from_config(&config.service)
        .map_err(|e| anyhow::anyhow!("Failed to create answer service: {}", e))?;

    Ok(ChatController::new(service, TerminalView::new(), &config.widget).with_privacy(config.logging.privacy.clone()))
}

/// Start the interactive chat widget
async fn cmd_start(config: Config) -> Result<()> {
    let controller = build_controller(&config)?;
    tracing::info!(service = config.service.kind(), "starting chat widget");

    let mut app = App::new(controller);
    app.run().await.context("Terminal widget failed")?;

    Ok(())
}

/// Run one turn and format the resulting transcript
async fn ask_output(config: &Config, message: &str, format: OutputFormat) -> Result<String> {
    let mut controller = build_controller(config)?;

    let placeholder = controller.converse(message).await.context("Failed to complete the turn")?;
    if placeholder.is_none() {
        anyhow::bail!("Message is empty");
    }

    Ok(format_transcript(&controller.rendered(), &config.widget.assistant_name, format))
}

fn format_transcript(rendered: &RenderedTranscript, assistant_name: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => rendered.to_plain_text(assistant_name),
        OutputFormat::Html => rendered.to_html(),
    }
}

/// Ask a single question and print the transcript
async fn cmd_ask(config: Config, message: &str, format: OutputFormat) -> Result<()> {
    let output = ask_output(&config, message, format).await?;
    println!("{}", output);
    Ok(())
}

/// Show the resolved configuration
fn cmd_status(config: &Config, config_path: &Path, verbose: bool) -> Result<()> {
    println!("{}", "Chatbox Status".green().bold().underline());
    println!();

    println!("{} Configuration", "Info:".blue().bold());
    println!("  Path: {}", config_path.display().cyan());

    println!();
    println!("{} Answer service", "Info:".blue().bold());
    println!("  Kind: {}", config.service.kind().cyan());
    match &config.service {
        ServiceConfig::Http { endpoint, timeout_secs } => {
            println!("  Endpoint: {}", endpoint.cyan());
            println!("  Timeout: {}s", timeout_secs.to_string().cyan());
        }
        ServiceConfig::Mock { responses_file } => match responses_file {
            Some(path) => println!("  Responses file: {}", path.display().cyan()),
            None => println!("  Responses file: {}", "(built-in answer)".yellow()),
        },
    }

    println!();
    println!("{} Widget", "Info:".blue().bold());
    println!("  Assistant name: {}", config.widget.assistant_name.cyan());
    println!("  Placeholder: {}", config.widget.placeholder_text.cyan());
    println!("  Error text: {}", config.widget.error_text.cyan());

    if verbose {
        println!("  Welcome message: {}", config.widget.welcome_message.cyan());

        println!();
        println!("{} Logging", "Info:".blue().bold());
        println!("  Level: {}", config.logging.level.cyan());
        println!("  Format: {}", config.logging.format.cyan());
        if config.logging.file.enabled {
            let dir = config
                .logging
                .file
                .directory
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_else(|| "~/.chatbox/logs".to_string());
            println!("  File: {}", dir.cyan());
        } else {
            println!("  File: {}", "disabled".yellow());
        }
        println!("  Log message text: {}", config.logging.privacy.log_message_text.to_string().cyan());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::try_parse_from(["chatbox", "status"]).unwrap();
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::try_parse_from(["chatbox", "--config", "/path/to/chatbox.toml", "status"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/chatbox.toml")));
    }

    #[test]
    fn test_cli_with_verbose() {
        let cli = Cli::try_parse_from(["chatbox", "--verbose", "status"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_start_command() {
        let cli = Cli::try_parse_from(["chatbox", "start"]).unwrap();
        assert!(matches!(cli.command, Commands::Start));
    }

    #[test]
    fn test_cli_ask_command() {
        let cli = Cli::try_parse_from(["chatbox", "ask", "where", "is", "it?"]).unwrap();
        if let Commands::Ask { message, format } = cli.command {
            assert_eq!(message, vec!["where", "is", "it?"]);
            assert_eq!(format, OutputFormat::Text);
        } else {
            panic!("Expected Ask command");
        }
    }

    #[test]
    fn test_cli_ask_html_format() {
        let cli = Cli::try_parse_from(["chatbox", "ask", "--format", "html", "Hi"]).unwrap();
        assert!(matches!(cli.command, Commands::Ask { format: OutputFormat::Html, .. }));
    }

    #[test]
    fn test_cli_ask_requires_message() {
        assert!(Cli::try_parse_from(["chatbox", "ask"]).is_err());
    }

    #[test]
    fn test_load_or_create_config_existing() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("chatbox.toml");
        std::fs::write(&config_path, Config::example()).unwrap();

        let config = load_or_create_config(&config_path).unwrap();
        assert_eq!(config.service.kind(), "http");
        assert_eq!(config.widget.error_text, "Error...");
    }

    #[test]
    fn test_load_or_create_config_not_existing() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("chatbox.toml");

        let result = load_or_create_config(&config_path);
        assert!(result.is_err());
        assert!(config_path.exists());

        let content = std::fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[service]"));
        assert!(content.contains("[widget]"));
    }

    #[test]
    fn test_load_or_create_config_invalid() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("chatbox.toml");
        std::fs::write(&config_path, "invalid toml").unwrap();

        assert!(load_or_create_config(&config_path).is_err());
    }

    #[test]
    fn test_cmd_status() {
        let config = create_test_config(None);
        assert!(cmd_status(&config, Path::new("chatbox.toml"), false).is_ok());
        assert!(cmd_status(&Config::default(), Path::new("chatbox.toml"), true).is_ok());
    }

    #[tokio::test]
    async fn test_ask_output_text() {
        let mut responses = NamedTempFile::new().unwrap();
        writeln!(responses, "[[responses]]\ntype = \"answer\"\ntext = \"Hello!\"").unwrap();
        let config = create_test_config(Some(responses.path()));

        let output = ask_output(&config, "Hi", OutputFormat::Text).await.unwrap();
        assert_eq!(output, "Assistant: Hello!\nYou: Hi\nAssistant: Welcome");
    }

    #[tokio::test]
    async fn test_ask_output_html() {
        let mut responses = NamedTempFile::new().unwrap();
        writeln!(responses, "[[responses]]\ntype = \"answer\"\ntext = \"See https://example.com\"").unwrap();
        let config = create_test_config(Some(responses.path()));

        let output = ask_output(&config, "Hi", OutputFormat::Html).await.unwrap();
        assert!(output.starts_with(r#"<div class="messages__item messages__item--operator">See <a href="https://example.com" target="_blank">"#));
    }

    #[tokio::test]
    async fn test_ask_output_failure_shows_error_text() {
        let mut responses = NamedTempFile::new().unwrap();
        writeln!(responses, "[[responses]]\ntype = \"failure\"\nmessage = \"down\"").unwrap();
        let config = create_test_config(Some(responses.path()));

        let output = ask_output(&config, "Hi", OutputFormat::Text).await.unwrap();
        assert!(output.starts_with("Assistant: Error..."));
    }

    #[tokio::test]
    async fn test_ask_output_empty_message() {
        let config = create_test_config(None);
        assert!(ask_output(&config, "   ", OutputFormat::Text).await.is_err());
    }

    fn create_test_config(responses_file: Option<&Path>) -> Config {
        let service = match responses_file {
            Some(path) => format!("kind = \"mock\"\nresponses_file = \"{}\"", path.display()),
            None => "kind = \"mock\"".to_string(),
        };
        let toml = format!(
            r#"
[service]
{service}

[widget]
welcome_message = "Welcome"
"#
        );
        Config::from_toml_str(&toml).unwrap()
    }
}
