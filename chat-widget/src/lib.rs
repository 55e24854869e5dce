pub mod infrastructure;
pub mod modules;
pub mod shared;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use modules::chat::{KeyEvent, RendererPort, TerminalRenderer};
use modules::config::QuickOption;
use modules::{ChatModule, ConfigModule};
use shared::AppResult;

/// 数据目录环境变量
pub const HOME_ENV: &str = "CHAT_WIDGET_HOME";

const DEFAULT_DATA_DIR: &str = ".chat-widget";

/// 终端输入解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCommand {
    Quit,
    /// 快捷选项，序号从 0 开始
    QuickOption(usize),
    Message(String),
}

impl TerminalCommand {
    /// 解析一行输入：`/quit` 退出，`/N` 触发第 N 个快捷选项，其余按消息处理
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed == "/quit" {
            return Self::Quit;
        }

        if let Some(index) = trimmed
            .strip_prefix('/')
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|n| *n > 0)
        {
            return Self::QuickOption(index - 1);
        }

        Self::Message(line.to_string())
    }
}

/// 数据目录：优先读取环境变量，否则使用当前目录下的 `.chat-widget`
pub fn resolve_data_dir() -> PathBuf {
    std::env::var_os(HOME_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

fn init_tracing() {
    // 日志写到 stderr，避免与对话输出交错
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn print_quick_options(options: &[QuickOption]) {
    if options.is_empty() {
        return;
    }

    println!("Opções rápidas:");
    for (i, option) in options.iter().enumerate() {
        println!("  /{} {}", i + 1, option.label);
    }
    println!("  /quit para sair");
}

pub async fn run() -> AppResult<()> {
    init_tracing();

    tracing::info!("Chat widget starting...");

    let data_dir = resolve_data_dir();
    tracing::info!("App data directory: {:?}", data_dir);

    let config = ConfigModule::new_with_store(data_dir.clone())
        .get_all()
        .await?;
    tracing::info!("Using {} responder", config.responder.kind);

    let renderer: Arc<dyn RendererPort> = Arc::new(TerminalRenderer::stdout());
    let chat_module = ChatModule::new_with_persistence(data_dir, &config, renderer).await?;
    tracing::info!("Chat module initialized with persistent storage");

    let controller = chat_module.controller().clone();
    controller.restore_history().await;
    print_quick_options(&config.quick_options);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match TerminalCommand::parse(&line) {
            TerminalCommand::Quit => break,
            TerminalCommand::QuickOption(index) => {
                if controller.quick_option_at(index).await.is_none() {
                    tracing::warn!("No quick option at position {}", index + 1);
                }
            }
            TerminalCommand::Message(text) => {
                controller.set_input(text);
                controller.on_key(KeyEvent::enter()).await;
            }
        }
    }

    tracing::info!("Chat widget exiting");
    Ok(())
}
