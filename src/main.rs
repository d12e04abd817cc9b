//! AI Code Assistant - 命令行客户端
//!
//! 把命令行参数写入表单，提交给代码助手 API，并渲染结果。

use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use code_assistant_client::config::{get_config, load_config_from, set_config, update_config};
use code_assistant_client::models::{
    ComplexityRequest, ExamplesRequest, ExplainRequest, DEFAULT_DETAIL_LEVEL,
    DEFAULT_IMPROVEMENT_TYPE, DEFAULT_LANGUAGE, DETAIL_LEVELS, IMPROVEMENT_TYPES,
};
use code_assistant_client::utils::{detect_language_from_filename, is_supported_language, render_body};
use code_assistant_client::{ClientResult, FieldEdit, FormController, FormKind, StateEvent};

/// 在 Windows 上设置控制台代码页为 UTF-8
#[cfg(windows)]
fn setup_console_encoding() {
    unsafe {
        // 设置控制台输出代码页为 UTF-8 (65001)
        extern "system" {
            fn SetConsoleOutputCP(code_page: u32) -> i32;
            fn SetConsoleCP(code_page: u32) -> i32;
        }
        SetConsoleOutputCP(65001);
        SetConsoleCP(65001);
    }
}

#[cfg(not(windows))]
fn setup_console_encoding() {}

/// AI 代码助手命令行客户端
#[derive(Parser)]
#[command(name = "code-assistant")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API base URL, overrides the config file
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Path to a JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the raw JSON response instead of rendered text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// 代码来源：内联或文件
#[derive(Args)]
struct CodeInput {
    /// Source code to send
    #[arg(long, conflicts_with = "file")]
    code: Option<String>,

    /// Read source code from a file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Programming language (detected from --file when omitted)
    #[arg(short, long)]
    language: Option<String>,
}

impl CodeInput {
    /// 解析出代码与语言
    fn resolve(&self) -> Result<(String, String)> {
        let code = match (&self.code, &self.file) {
            (Some(code), _) => code.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            (None, None) => String::new(),
        };

        let language = match (&self.language, &self.file) {
            (Some(language), _) => language.clone(),
            (None, Some(path)) => detect_language_from_filename(&path.to_string_lossy()).to_string(),
            (None, None) => DEFAULT_LANGUAGE.to_string(),
        };
        if !is_supported_language(&language) {
            warn!("Language '{}' is not in the server's supported list", language);
        }

        Ok((code, language))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze code quality, issues and complexity
    Analyze {
        #[command(flatten)]
        input: CodeInput,

        /// Extra context for the analysis
        #[arg(long, default_value = "")]
        context: String,
    },

    /// Get improvement suggestions for code
    Suggest {
        #[command(flatten)]
        input: CodeInput,

        /// Kind of improvement to focus on
        #[arg(long, default_value = DEFAULT_IMPROVEMENT_TYPE,
              value_parser = PossibleValuesParser::new(IMPROVEMENT_TYPES.iter().copied()))]
        improvement_type: String,
    },

    /// Solve a programming problem
    Solve {
        /// Problem description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Related code
        #[arg(long, default_value = "", conflicts_with = "code_context_file")]
        code_context: String,

        /// Read related code from a file
        #[arg(long)]
        code_context_file: Option<PathBuf>,

        /// Programming language
        #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
        language: String,

        /// Use the Qianwen model
        #[arg(long)]
        qianwen: bool,
    },

    /// Ask a free-form question
    Ask {
        /// The question
        #[arg(default_value = "")]
        question: String,
    },

    /// Analyze code complexity only
    Complexity {
        #[command(flatten)]
        input: CodeInput,
    },

    /// Show code examples for a concept
    Examples {
        /// Concept to illustrate
        concept: String,

        #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
        language: String,

        #[arg(long, default_value = "")]
        context: String,
    },

    /// Explain a programming concept
    Explain {
        /// Concept to explain
        concept: String,

        #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
        language: String,

        #[arg(long, default_value = DEFAULT_DETAIL_LEVEL,
              value_parser = PossibleValuesParser::new(DETAIL_LEVELS.iter().copied()))]
        detail_level: String,
    },

    /// Check that the API is reachable
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    // 设置控制台编码
    setup_console_encoding();

    // 初始化日志，输出到 stderr 以免干扰结果
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "code_assistant_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    if let Some(path) = &cli.config {
        set_config(load_config_from(path)?);
    }
    if let Some(base_url) = cli.base_url {
        update_config(|config| config.api_base_url = base_url);
    }

    let controller = FormController::from_config(&get_config())?;
    let json = cli.json;

    let code = match cli.command {
        Commands::Analyze { input, context } => {
            let (code, language) = input.resolve()?;
            let edits = vec![
                FieldEdit::AnalysisCode(code),
                FieldEdit::AnalysisLanguage(language),
                FieldEdit::AnalysisContext(context),
            ];
            run_form(&controller, FormKind::Analysis, edits, json).await
        }
        Commands::Suggest {
            input,
            improvement_type,
        } => {
            let (code, language) = input.resolve()?;
            let edits = vec![
                FieldEdit::SuggestionCode(code),
                FieldEdit::SuggestionLanguage(language),
                FieldEdit::SuggestionImprovementType(improvement_type),
            ];
            run_form(&controller, FormKind::Suggestion, edits, json).await
        }
        Commands::Solve {
            description,
            code_context,
            code_context_file,
            language,
            qianwen,
        } => {
            let code_context = match code_context_file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => code_context,
            };
            let edits = vec![
                FieldEdit::ProblemDescription(description),
                FieldEdit::ProblemCodeContext(code_context),
                FieldEdit::ProblemLanguage(language),
                FieldEdit::ProblemUseQianwen(qianwen),
            ];
            run_form(&controller, FormKind::Problem, edits, json).await
        }
        Commands::Ask { question } => {
            let edits = vec![FieldEdit::Question(question)];
            run_form(&controller, FormKind::DirectQuestion, edits, json).await
        }
        Commands::Complexity { input } => {
            let (code, language) = input.resolve()?;
            let request = ComplexityRequest { code, language };
            print_outcome(controller.client().analyze_complexity(&request).await, json)
        }
        Commands::Examples {
            concept,
            language,
            context,
        } => {
            let request = ExamplesRequest {
                concept,
                language,
                context,
            };
            print_outcome(controller.client().code_examples(&request).await, json)
        }
        Commands::Explain {
            concept,
            language,
            detail_level,
        } => {
            let request = ExplainRequest {
                concept,
                language,
                detail_level,
            };
            print_outcome(controller.client().explain_concept(&request).await, json)
        }
        Commands::Health => print_outcome(controller.client().health().await, json),
    };

    Ok(code)
}

/// 填写表单、提交并输出结果
async fn run_form(
    controller: &FormController,
    kind: FormKind,
    edits: Vec<FieldEdit>,
    json: bool,
) -> ExitCode {
    for edit in edits {
        controller.apply_edit(edit);
    }

    let mut events = controller.subscribe();
    let outcome = controller.submit(kind).await;
    print_notices(&mut events, kind);

    match outcome {
        Ok(payload) => {
            print_body(&payload.body, json);
            ExitCode::SUCCESS
        }
        Err(_) => ExitCode::FAILURE,
    }
}

/// 把指定表单的提示输出到 stderr
fn print_notices(events: &mut broadcast::Receiver<StateEvent>, kind: FormKind) {
    loop {
        match events.try_recv() {
            Ok(event) if event.form() != kind => continue,
            Ok(StateEvent::Notice(notice)) => eprintln!("{}", notice),
            Ok(_) | Err(TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
}

/// 输出辅助端点的结果
fn print_outcome(outcome: ClientResult<Value>, json: bool) -> ExitCode {
    match outcome {
        Ok(body) => {
            print_body(&body, json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e.display_message());
            ExitCode::FAILURE
        }
    }
}

fn print_body(body: &Value, json: bool) {
    if json {
        println!("{}", serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string()));
    } else {
        println!("{}", render_body(body));
    }
}
