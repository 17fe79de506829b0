use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    Clock, GatewayConfig, GeminiGateway, TutorGateway, WorkflowOutcome, WorkflowService,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tutor_core::model::{Session, UploadedImage};
use ui::{App, UiApp, build_app_context};

const DEFAULT_LOG_FILTER: &str = "app=info,services=info,ui=info";

#[derive(Debug)]
enum ArgsError {
    MissingValue { what: &'static str },
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { what } => write!(f, "missing {what}"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

struct DesktopApp {
    workflow: Arc<WorkflowService>,
}

impl UiApp for DesktopApp {
    fn workflow(&self) -> Arc<WorkflowService> {
        Arc::clone(&self.workflow)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui");
    eprintln!("  cargo run -p app -- analyze <image-path> [--practice]");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TUTOR_API_KEY          API key (falls back to GEMINI_API_KEY, API_KEY)");
    eprintln!("  TUTOR_AI_BASE_URL      default https://generativelanguage.googleapis.com/v1beta");
    eprintln!("  TUTOR_AI_MODEL         default gemini-2.5-flash");
    eprintln!("  TUTOR_AI_TIMEOUT_SECS  default 60");
    eprintln!("  TUTOR_QUIZ_SIZE        default 3");
    eprintln!("  RUST_LOG               default {DEFAULT_LOG_FILTER}");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Ui,
    Analyze { image: PathBuf, practice: bool },
}

impl Command {
    fn parse_analyze(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut image = None;
        let mut practice = false;
        for arg in args {
            match arg.as_str() {
                "--practice" => practice = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ if arg.starts_with("--") || image.is_some() => {
                    return Err(ArgsError::UnknownArg(arg));
                }
                _ => image = Some(PathBuf::from(arg)),
            }
        }
        let image = image.ok_or(ArgsError::MissingValue { what: "<image-path>" })?;
        Ok(Self::Analyze { image, practice })
    }

    fn parse_ui(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(Self::Ui)
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_workflow() -> Result<Arc<WorkflowService>, Box<dyn std::error::Error>> {
    let gateway = GeminiGateway::new(GatewayConfig::from_env()?)?;
    let config = gateway.config();
    info!(
        model = %config.model,
        base_url = %config.base_url,
        timeout_secs = config.timeout.as_secs(),
        quiz_size = config.quiz_size,
        "gateway configured"
    );
    let gateway: Arc<dyn TutorGateway> = Arc::new(gateway);
    Ok(Arc::new(WorkflowService::new(gateway, Clock::default_clock())))
}

async fn analyze(
    workflow: &WorkflowService,
    path: PathBuf,
    practice: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(&path)?;
    let file_name = path.to_string_lossy();
    let image = UploadedImage::from_upload(bytes, None, &file_name)?;

    let mut session = workflow.new_session();
    if let WorkflowOutcome::RolledBack(notice) = workflow.submit_image(&mut session, image).await? {
        return Err(notice.to_string().into());
    }
    print_analysis(&session);

    if practice {
        if let WorkflowOutcome::RolledBack(notice) = workflow.start_practice(&mut session).await? {
            return Err(notice.to_string().into());
        }
        print_quiz(&session);
    }
    Ok(())
}

fn print_analysis(session: &Session) {
    let Some(analysis) = session.analysis() else {
        return;
    };
    println!("Subject:        {}", analysis.subject);
    println!("Core concept:   {}", analysis.core_concept);
    println!();
    println!("Mistake analysis:\n{}\n", analysis.mistake_analysis);
    println!("Correct solution:\n{}\n", analysis.correct_solution);
    println!("{}", analysis.encouragement);
}

fn print_quiz(session: &Session) {
    for question in session.questions() {
        println!();
        println!("{}. {}", question.id(), question.question());
        for (label, option) in ('A'..='D').zip(question.options()) {
            println!("   {label}) {option}");
        }
        println!("   Answer: {}", question.correct_answer());
        println!("   {}", question.explanation());
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let mut iter = argv.into_iter().peekable();

    // No subcommand opens the window.
    let cmd = match iter.peek().map(String::as_str) {
        None => Ok(Command::Ui),
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some("ui") => {
            iter.next();
            Command::parse_ui(&mut iter)
        }
        Some("analyze") => {
            iter.next();
            Command::parse_analyze(&mut iter)
        }
        Some(first) if first.starts_with("--") => Command::parse_ui(&mut iter),
        Some(first) => Err(ArgsError::UnknownArg(first.to_string())),
    }
    .inspect_err(|_| print_usage())?;

    init_tracing();
    let workflow = build_workflow()?;

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { workflow });
            let context = build_app_context(&app);

            // Keep the tutor window an ordinary window, never pinned above others.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("错题克星")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Analyze { image, practice } => analyze(&workflow, image, practice).await,
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
