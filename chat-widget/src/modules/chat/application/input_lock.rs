use std::sync::{Arc, Mutex, MutexGuard};

use crate::infrastructure::EventBus;
use crate::modules::chat::domain::{ChatDomainEvent, InputState};
use crate::modules::chat::ports::RendererPort;

#[derive(Debug, Default)]
struct SurfaceState {
    value: String,
    state: InputState,
}

/// 输入区（输入框 + 发送按钮 + 加载指示器）
///
/// Busy 期间输入被禁用：无法编辑内容，也无法发起新的提交
#[derive(Debug, Default)]
pub struct InputSurface {
    inner: Mutex<SurfaceState>,
}

impl InputSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SurfaceState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn state(&self) -> InputState {
        self.lock().state
    }

    pub fn value(&self) -> String {
        self.lock().value.clone()
    }

    /// 设置输入框内容，禁用时返回 false
    pub fn set_value(&self, text: impl Into<String>) -> bool {
        let mut inner = self.lock();
        if !inner.state.is_enabled() {
            return false;
        }
        inner.value = text.into();
        true
    }

    /// Shift+Enter 插入换行
    pub fn insert_newline(&self) -> bool {
        let mut inner = self.lock();
        if !inner.state.is_enabled() {
            return false;
        }
        inner.value.push('\n');
        true
    }

    /// Idle -> Busy，同时清空输入框
    fn try_begin(&self) -> bool {
        let mut inner = self.lock();
        if !inner.state.is_enabled() {
            return false;
        }
        inner.state = InputState::Busy;
        inner.value.clear();
        true
    }

    fn finish(&self) {
        self.lock().state = InputState::Idle;
    }
}

/// 输入锁
///
/// 持有期间输入区处于 Busy；无论成功、失败还是 future 被取消，
/// drop 时都会恢复 Idle 并通知渲染端
pub struct InputLock {
    surface: Arc<InputSurface>,
    renderer: Arc<dyn RendererPort>,
    event_bus: Option<Arc<EventBus>>,
}

impl InputLock {
    /// 尝试获取输入锁，输入区已 Busy 时返回 None
    pub fn acquire(
        surface: &Arc<InputSurface>,
        renderer: &Arc<dyn RendererPort>,
        event_bus: Option<&Arc<EventBus>>,
    ) -> Option<Self> {
        if !surface.try_begin() {
            return None;
        }

        Some(Self {
            surface: surface.clone(),
            renderer: renderer.clone(),
            event_bus: event_bus.cloned(),
        })
    }

    /// 禁用输入控件并显示加载指示器
    pub fn engage(&self) {
        self.notify(InputState::Busy);
    }

    fn notify(&self, state: InputState) {
        self.renderer.set_input_state(state);
        if let Some(bus) = &self.event_bus {
            bus.publish(ChatDomainEvent::input_state_changed(state));
        }
    }
}

impl Drop for InputLock {
    fn drop(&mut self) {
        self.surface.finish();
        self.notify(InputState::Idle);
    }
}
