use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use certigen::{
    CertificateRenderer, MessageTemplate, RenderConfig, SmtpChannel, SmtpConfig, load_roster,
    run_batch,
};

#[derive(Parser, Debug)]
#[command(name = "certigen", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render certificates without sending anything.
    Generate(GenerateArgs),
    /// Render certificates and email each one to its recipient.
    Send(SendArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Roster CSV (columns: Name, College Name, Email, optional Roll_No).
    #[arg(long)]
    roster: PathBuf,

    /// Render configuration JSON (template path, font specs, qr flag).
    #[arg(long)]
    config: PathBuf,

    /// Output directory for artifacts.
    #[arg(long, default_value = "certificates")]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct SendArgs {
    #[command(flatten)]
    generate: GenerateArgs,

    /// Sender email address (also the SMTP username).
    #[arg(long)]
    sender: String,

    /// Application-specific SMTP password.
    #[arg(long, env = "CERTIGEN_SMTP_PASSWORD", hide_env_values = true)]
    password: String,

    /// SMTP relay host (implicit TLS on connect).
    #[arg(long, default_value = "smtp.gmail.com")]
    smtp_host: String,

    /// SMTP relay port.
    #[arg(long, default_value_t = 465)]
    smtp_port: u16,

    /// SMTP connection timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Override the default subject line.
    #[arg(long)]
    subject: Option<String>,

    /// Override the default body template (`{name}` interpolates the
    /// recipient name).
    #[arg(long)]
    body: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Send(args) => cmd_send(args),
    }
}

fn load_inputs(
    args: &GenerateArgs,
) -> anyhow::Result<(Vec<certigen::RosterRow>, CertificateRenderer)> {
    let config_text = std::fs::read_to_string(&args.config)
        .with_context(|| format!("read config '{}'", args.config.display()))?;
    let config: RenderConfig = serde_json::from_str(&config_text)
        .with_context(|| format!("parse config '{}'", args.config.display()))?;

    let roster = load_roster(&args.roster)?;
    let renderer = CertificateRenderer::new(&config, &args.out_dir)?;
    Ok((roster, renderer))
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let (roster, renderer) = load_inputs(&args)?;
    let rows = roster.len();
    run_batch(&roster, &renderer, None, &MessageTemplate::default())?;
    eprintln!("processed {rows} rows into {}", args.out_dir.display());
    Ok(())
}

fn cmd_send(args: SendArgs) -> anyhow::Result<()> {
    let (roster, renderer) = load_inputs(&args.generate)?;

    let smtp = SmtpConfig {
        host: args.smtp_host,
        port: args.smtp_port,
        sender: args.sender,
        password: args.password,
        timeout_secs: args.timeout,
    };
    let channel = SmtpChannel::new(&smtp)?;

    let mut message = MessageTemplate::default();
    if let Some(subject) = args.subject {
        message.subject = subject;
    }
    if let Some(body) = args.body {
        message.body = body;
    }

    let result = run_batch(&roster, &renderer, Some(&channel), &message)?;
    eprintln!(
        "sent {} of {} certificates",
        result.success_count,
        roster.len()
    );
    Ok(())
}
