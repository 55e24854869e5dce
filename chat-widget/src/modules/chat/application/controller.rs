use chrono::Utc;
use std::sync::Arc;

use super::{
    ApplicationError, CommandHandler, InputLock, InputSurface, LoadHistoryHandler,
    LoadHistoryQuery, QueryHandler, RecordExchangeCommand, RecordExchangeHandler,
};
use crate::infrastructure::EventBus;
use crate::modules::chat::domain::{
    ChatDomainEvent, ChatMessage, ExchangeCompletedEvent, HistoryRestoredEvent, HistoryWindow,
    InputState, Key, KeyEvent, MessageView, ResponderFailedEvent, TimeLabelFormatter,
};
use crate::modules::chat::ports::{HistoryStore, RendererPort, ResponderPort};

/// 回复失败时展示的固定兜底消息
pub const FALLBACK_MESSAGE: &str = "Desculpe, tive um problema. Pode repetir?";

/// 提交被忽略的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// 去除空白后为空
    EmptyInput,
    /// 已有请求在途，输入被禁用
    Busy,
}

/// 一次提交的结果
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    Ignored(IgnoreReason),
    /// 正常回复并已写入历史
    Answered { user: ChatMessage, bot: ChatMessage },
    /// 出错，已渲染兜底消息
    Fallback {
        user: ChatMessage,
        bot: ChatMessage,
        error: String,
    },
}

impl SubmitOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, SubmitOutcome::Ignored(_))
    }

    /// 本次渲染的机器人消息
    pub fn bot_message(&self) -> Option<&ChatMessage> {
        match self {
            SubmitOutcome::Ignored(_) => None,
            SubmitOutcome::Answered { bot, .. } | SubmitOutcome::Fallback { bot, .. } => Some(bot),
        }
    }
}

/// 聊天控制器
///
/// 负责输入 -> 回复 -> 渲染 -> 持久化的完整往返。应用启动时创建一次，
/// 协作者通过构造函数注入
pub struct ChatController {
    responder: Arc<dyn ResponderPort>,
    renderer: Arc<dyn RendererPort>,
    record_exchange_handler: RecordExchangeHandler,
    load_history_handler: LoadHistoryHandler,
    surface: Arc<InputSurface>,
    event_bus: Option<Arc<EventBus>>,
    formatter: TimeLabelFormatter,
    fallback_message: String,
    quick_options: Vec<String>,
}

impl ChatController {
    pub fn new(
        responder: Arc<dyn ResponderPort>,
        history_store: Arc<dyn HistoryStore>,
        renderer: Arc<dyn RendererPort>,
    ) -> Self {
        Self::with_window(responder, history_store, renderer, HistoryWindow::default())
    }

    pub fn with_window(
        responder: Arc<dyn ResponderPort>,
        history_store: Arc<dyn HistoryStore>,
        renderer: Arc<dyn RendererPort>,
        window: HistoryWindow,
    ) -> Self {
        Self {
            responder,
            renderer,
            record_exchange_handler: RecordExchangeHandler::new(history_store.clone(), window),
            load_history_handler: LoadHistoryHandler::new(history_store, window),
            surface: Arc::new(InputSurface::new()),
            event_bus: None,
            formatter: TimeLabelFormatter::default(),
            fallback_message: FALLBACK_MESSAGE.to_string(),
            quick_options: Vec::new(),
        }
    }

    pub fn with_event_bus(mut self, event_bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    pub fn with_formatter(mut self, formatter: TimeLabelFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_fallback_message(mut self, message: impl Into<String>) -> Self {
        self.fallback_message = message.into();
        self
    }

    pub fn with_quick_options(mut self, options: Vec<String>) -> Self {
        self.quick_options = options;
        self
    }

    // Accessors

    pub fn input_state(&self) -> InputState {
        self.surface.state()
    }

    pub fn input_value(&self) -> String {
        self.surface.value()
    }

    /// 修改输入框内容，Busy 时无效
    pub fn set_input(&self, text: impl Into<String>) -> bool {
        self.surface.set_value(text)
    }

    pub fn quick_options(&self) -> &[String] {
        &self.quick_options
    }

    // Operations

    /// 提交一条消息
    ///
    /// 失败不会向外传播：回复或存储出错时渲染兜底消息
    pub async fn submit(&self, raw_text: &str) -> SubmitOutcome {
        let text = raw_text.trim();
        if text.is_empty() {
            tracing::debug!("[ChatController] Ignoring empty submission");
            return SubmitOutcome::Ignored(IgnoreReason::EmptyInput);
        }

        let Some(lock) =
            InputLock::acquire(&self.surface, &self.renderer, self.event_bus.as_ref())
        else {
            tracing::debug!("[ChatController] Input disabled, submission ignored");
            return SubmitOutcome::Ignored(IgnoreReason::Busy);
        };

        let user = ChatMessage::new_user(text);
        self.render(&user);
        lock.engage();

        let outcome = match self.exchange(&user).await {
            Ok(bot) => SubmitOutcome::Answered { user, bot },
            Err(e) => {
                tracing::error!(
                    "[ChatController] Responder {} failed: {}",
                    self.responder.responder_id(),
                    e
                );
                self.publish(ChatDomainEvent::ResponderFailed(ResponderFailedEvent {
                    error: e.to_string(),
                    timestamp: Utc::now(),
                }));

                let bot = ChatMessage::new_bot(self.fallback_message.clone());
                self.render(&bot);
                SubmitOutcome::Fallback {
                    user,
                    bot,
                    error: e.to_string(),
                }
            }
        };

        drop(lock);
        outcome
    }

    /// 提交输入框中的内容
    pub async fn submit_input(&self) -> SubmitOutcome {
        let value = self.surface.value();
        self.submit(&value).await
    }

    /// 快捷选项：填入预设文本并提交
    pub async fn quick_option(&self, option_text: &str) -> SubmitOutcome {
        if !self.surface.set_value(option_text) {
            return SubmitOutcome::Ignored(IgnoreReason::Busy);
        }
        self.submit_input().await
    }

    /// 按序号触发配置中的快捷选项
    pub async fn quick_option_at(&self, index: usize) -> Option<SubmitOutcome> {
        let option = self.quick_options.get(index)?.clone();
        Some(self.quick_option(&option).await)
    }

    /// 输入框按键：回车提交，Shift+回车换行
    pub async fn on_key(&self, event: KeyEvent) -> Option<SubmitOutcome> {
        if event.is_submit() {
            return Some(self.submit_input().await);
        }

        if event.key == Key::Enter {
            self.surface.insert_newline();
        }
        None
    }

    /// 启动时回放历史，返回回放的条数
    ///
    /// 读取失败时按空历史处理
    pub async fn restore_history(&self) -> usize {
        let messages = match self.load_history_handler.handle(LoadHistoryQuery).await {
            Ok(response) => response.messages,
            Err(e) => {
                tracing::warn!("[ChatController] Failed to load chat history: {}", e);
                return 0;
            }
        };

        for message in &messages {
            self.render(message);
        }

        tracing::info!("[ChatController] Restored {} messages", messages.len());
        self.publish(ChatDomainEvent::HistoryRestored(HistoryRestoredEvent {
            count: messages.len(),
            timestamp: Utc::now(),
        }));
        messages.len()
    }

    async fn exchange(&self, user: &ChatMessage) -> Result<ChatMessage, ApplicationError> {
        let reply = self.responder.respond(user.text()).await?;

        let bot = ChatMessage::new_bot(reply);
        self.render(&bot);

        let response = self
            .record_exchange_handler
            .handle(RecordExchangeCommand::new(user.clone(), bot.clone()))
            .await?;

        self.publish(ChatDomainEvent::ExchangeCompleted(ExchangeCompletedEvent {
            user_text: user.text().to_string(),
            bot_text: bot.text().to_string(),
            history_len: response.history_len,
            evicted: response.evicted,
            timestamp: Utc::now(),
        }));

        Ok(bot)
    }

    fn render(&self, message: &ChatMessage) {
        let view = MessageView::build(message, &self.formatter);
        self.renderer.append(&view);

        tracing::debug!(
            "[ChatController] Rendered {} message ({} chars)",
            message.sender(),
            message.text().chars().count()
        );
        self.publish(ChatDomainEvent::message_rendered(
            message.sender(),
            message.text(),
            message.timestamp(),
        ));
    }

    fn publish(&self, event: ChatDomainEvent) {
        if let Some(bus) = &self.event_bus {
            bus.publish(event);
        }
    }
}
