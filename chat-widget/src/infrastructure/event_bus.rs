use tokio::sync::broadcast;

use crate::modules::chat::ChatDomainEvent;

/// 事件总线容量，订阅方落后超过该数量时会丢失旧事件
const EVENT_BUS_CAPACITY: usize = 100;

pub struct EventBus {
    sender: broadcast::Sender<ChatDomainEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_BUS_CAPACITY);
        Self { sender }
    }

    pub fn publish(&self, event: ChatDomainEvent) {
        tracing::debug!("[EventBus] Publishing event: {}", event.event_type());
        // 没有订阅者时发送失败，直接忽略
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChatDomainEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::chat::{ChatDomainEvent, InputState, Sender};

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);
        bus.publish(ChatDomainEvent::input_state_changed(InputState::Busy));
    }

    #[tokio::test]
    async fn test_subscribers_receive_events_in_order() {
        let bus = EventBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(ChatDomainEvent::message_rendered(Sender::User, "oi", 1));
        bus.publish(ChatDomainEvent::input_state_changed(InputState::Busy));

        for receiver in [&mut first, &mut second] {
            assert_eq!(receiver.recv().await.unwrap().event_type(), "message.rendered");
            assert_eq!(
                receiver.recv().await.unwrap().event_type(),
                "input.state_changed"
            );
        }
    }
}
