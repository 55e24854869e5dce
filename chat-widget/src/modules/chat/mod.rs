// Chat Module - 聊天模块
//
// 实现六边形架构（Hexagonal Architecture）：
// - domain: 领域层，包含实体、值对象、领域服务和领域事件
// - ports: 端口层，定义与外部世界的抽象接口
// - infrastructure: 基础设施层，实现端口的具体适配器
// - application: 应用层，控制器与 CQRS 命令/查询处理器

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// 重新导出常用类型
pub use application::{
    ApplicationError, ChatController, CommandHandler, IgnoreReason, InputLock, InputSurface,
    LoadHistoryHandler, LoadHistoryQuery, LoadHistoryResponse, QueryHandler,
    RecordExchangeCommand, RecordExchangeHandler, RecordExchangeResponse, SubmitOutcome,
    FALLBACK_MESSAGE,
};

pub use domain::{
    escape_html, CannedReply, ChatDomainEvent, ChatMessage, DisplayOffset, HistoryWindow,
    InputState, Key, KeyEvent, KeywordMatcher, MessageView, Sender, TimeLabelFormatter,
    DEFAULT_HISTORY_LIMIT, DEFAULT_REPLY, UNKNOWN_TIME_LABEL,
};

pub use infrastructure::{
    CannedResponder, FileHistoryStore, HtmlRenderer, HttpResponder, InMemoryHistoryStore,
    TerminalRenderer,
};

pub use ports::{HistoryStore, RendererPort, RepositoryError, ResponderError, ResponderPort};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::EventBus;
use crate::modules::config::{ResponderConfig, ResponderKind, WidgetConfig};

/// 按配置创建 Responder
pub fn build_responder(config: &ResponderConfig) -> Result<Arc<dyn ResponderPort>, ResponderError> {
    match config.kind {
        ResponderKind::Canned => Ok(Arc::new(CannedResponder::new(Duration::from_millis(
            config.latency_ms,
        )))),
        ResponderKind::Http => {
            let endpoint = config.endpoint.clone().ok_or_else(|| {
                ResponderError::NotAvailable("HTTP responder requires an endpoint".to_string())
            })?;
            let timeout = config.timeout_secs.map(Duration::from_secs);
            Ok(Arc::new(HttpResponder::new(endpoint, timeout)?))
        }
    }
}

/// Chat 模块容器
///
/// 管理模块内的依赖注入
pub struct ChatModule {
    controller: Arc<ChatController>,
    history_store: Arc<dyn HistoryStore>,
    event_bus: Arc<EventBus>,
}

impl ChatModule {
    /// 创建新的 ChatModule 实例（内存存储，用于开发测试）
    pub fn new(
        config: &WidgetConfig,
        renderer: Arc<dyn RendererPort>,
    ) -> Result<Self, ApplicationError> {
        let responder = build_responder(&config.responder)?;
        let history_store: Arc<dyn HistoryStore> = Arc::new(InMemoryHistoryStore::new());

        Ok(Self::with_components(
            config,
            responder,
            history_store,
            renderer,
        ))
    }

    /// 创建带持久化存储的 ChatModule 实例
    ///
    /// # Arguments
    /// * `data_dir` - 应用数据目录路径
    /// * `config` - 组件配置
    /// * `renderer` - 会话视图
    pub async fn new_with_persistence(
        data_dir: PathBuf,
        config: &WidgetConfig,
        renderer: Arc<dyn RendererPort>,
    ) -> Result<Self, ApplicationError> {
        let responder = build_responder(&config.responder)?;
        let history_store: Arc<dyn HistoryStore> =
            Arc::new(FileHistoryStore::new(data_dir, config.history.storage_key.clone()).await?);

        Ok(Self::with_components(
            config,
            responder,
            history_store,
            renderer,
        ))
    }

    /// 使用自定义协作者创建 ChatModule
    pub fn with_components(
        config: &WidgetConfig,
        responder: Arc<dyn ResponderPort>,
        history_store: Arc<dyn HistoryStore>,
        renderer: Arc<dyn RendererPort>,
    ) -> Self {
        let event_bus = Arc::new(EventBus::new());

        let controller = ChatController::with_window(
            responder,
            history_store.clone(),
            renderer,
            HistoryWindow::new(config.history.max_entries),
        )
        .with_event_bus(event_bus.clone())
        .with_formatter(TimeLabelFormatter::new(
            config.general.time_format.clone(),
            DisplayOffset::Local,
        ))
        .with_fallback_message(config.general.fallback_message.clone())
        .with_quick_options(
            config
                .quick_options
                .iter()
                .map(|option| option.option.clone())
                .collect(),
        );

        Self {
            controller: Arc::new(controller),
            history_store,
            event_bus,
        }
    }

    // Accessors

    /// 获取控制器
    pub fn controller(&self) -> &Arc<ChatController> {
        &self.controller
    }

    /// 获取历史存储
    pub fn history_store(&self) -> &Arc<dyn HistoryStore> {
        &self.history_store
    }

    /// 获取事件总线
    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn instant_config() -> WidgetConfig {
        let mut config = WidgetConfig::default();
        config.responder.latency_ms = 0;
        config
    }

    #[tokio::test]
    async fn test_chat_module_integration() {
        let renderer = Arc::new(HtmlRenderer::new());
        let module = ChatModule::new(&instant_config(), renderer.clone()).unwrap();
        let mut events = module.event_bus().subscribe();

        let outcome = module.controller().quick_option_at(1).await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Answered { .. }));
        assert!(outcome.bot_message().unwrap().text().starts_with("Nossos planos"));

        let history = module.history_store().load().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(renderer.message_count(), 2);

        let mut types = Vec::new();
        while let Ok(event) = events.try_recv() {
            types.push(event.event_type());
        }
        assert_eq!(
            types,
            vec![
                "message.rendered",
                "input.state_changed",
                "message.rendered",
                "exchange.completed",
                "input.state_changed",
            ]
        );
    }

    #[tokio::test]
    async fn test_history_survives_restart() {
        let temp_dir = TempDir::new().unwrap();
        let config = instant_config();

        {
            let module = ChatModule::new_with_persistence(
                temp_dir.path().to_path_buf(),
                &config,
                Arc::new(HtmlRenderer::new()),
            )
            .await
            .unwrap();
            module.controller().submit("Olá").await;
            module.controller().submit("Preciso de suporte").await;
        }

        let renderer = Arc::new(RecordingSenders::default());
        let module = ChatModule::new_with_persistence(
            temp_dir.path().to_path_buf(),
            &config,
            renderer.clone(),
        )
        .await
        .unwrap();

        assert_eq!(module.controller().restore_history().await, 4);
        assert_eq!(
            renderer.senders(),
            vec![Sender::User, Sender::Bot, Sender::User, Sender::Bot]
        );
    }

    #[tokio::test]
    async fn test_cap_applies_with_configured_limit() {
        let mut config = instant_config();
        config.history.max_entries = 4;
        let module = ChatModule::new(&config, Arc::new(HtmlRenderer::new())).unwrap();
        let mut events = module.event_bus().subscribe();

        for i in 0..5 {
            module.controller().submit(&format!("mensagem {}", i)).await;
        }

        let history = module.history_store().load().await.unwrap();
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].text(), "mensagem 3");
        assert_eq!(history[2].text(), "mensagem 4");

        let mut evicted = Vec::new();
        while let Ok(event) = events.try_recv() {
            if let ChatDomainEvent::ExchangeCompleted(e) = event {
                evicted.push(e.evicted);
            }
        }
        assert_eq!(evicted, vec![0, 0, 2, 2, 2]);
    }

    #[tokio::test]
    async fn test_bad_time_format_shows_placeholder() {
        let mut config = instant_config();
        config.general.time_format = "%Q".to_string();
        let renderer = Arc::new(HtmlRenderer::new());
        let module = ChatModule::new(&config, renderer.clone()).unwrap();

        let handle = {
            let controller = module.controller().clone();
            tokio::spawn(async move { controller.submit("oi").await })
        };
        let outcome = handle.await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Answered { .. }));
        assert_eq!(renderer.message_count(), 2);
        assert!(renderer.markup().contains(UNKNOWN_TIME_LABEL));
    }

    #[test]
    fn test_build_http_responder_requires_endpoint() {
        let mut config = WidgetConfig::default();
        config.responder.kind = ResponderKind::Http;

        assert!(matches!(
            build_responder(&config.responder),
            Err(ResponderError::NotAvailable(_))
        ));
    }

    /// 只记录发送方的渲染器
    #[derive(Default)]
    struct RecordingSenders {
        senders: std::sync::Mutex<Vec<Sender>>,
    }

    impl RecordingSenders {
        fn senders(&self) -> Vec<Sender> {
            self.senders.lock().unwrap().clone()
        }
    }

    impl RendererPort for RecordingSenders {
        fn append(&self, view: &MessageView) {
            self.senders.lock().unwrap().push(view.sender);
        }

        fn set_input_state(&self, _state: InputState) {}
    }
}
