use super::super::domain::{InputState, MessageView};

/// 渲染端口
///
/// 会话视图只做追加；实现方负责滚动到最新一条
pub trait RendererPort: Send + Sync {
    /// 追加一条消息并滚动到底部
    fn append(&self, view: &MessageView);

    /// 更新输入区：启用/禁用控件、加载指示器，恢复可用时聚焦输入框
    fn set_input_state(&self, state: InputState);
}
