// 关键词匹配 Responder
//
// 模拟后端：等待一段固定延迟后按关键词表返回固定回复

use async_trait::async_trait;
use std::time::Duration;

use crate::modules::chat::domain::KeywordMatcher;
use crate::modules::chat::ports::{ResponderError, ResponderPort};

/// 模拟网络请求的默认延迟
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1000);

pub struct CannedResponder {
    matcher: KeywordMatcher,
    latency: Duration,
}

impl CannedResponder {
    /// 使用默认关键词表
    pub fn new(latency: Duration) -> Self {
        Self::with_matcher(KeywordMatcher::default(), latency)
    }

    pub fn with_matcher(matcher: KeywordMatcher, latency: Duration) -> Self {
        Self { matcher, latency }
    }

    pub fn matcher(&self) -> &KeywordMatcher {
        &self.matcher
    }
}

impl Default for CannedResponder {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

#[async_trait]
impl ResponderPort for CannedResponder {
    fn responder_id(&self) -> &str {
        "canned"
    }

    async fn respond(&self, message: &str) -> Result<String, ResponderError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        Ok(self.matcher.find(message).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::chat::domain::{CannedReply, DEFAULT_REPLY};

    #[tokio::test]
    async fn test_keyword_reply() {
        let responder = CannedResponder::new(Duration::ZERO);

        let reply = responder.respond("Quais são os SERVIÇOS?").await.unwrap();
        assert!(reply.starts_with("Oferecemos"));

        let reply = responder.respond("xyzabc").await.unwrap();
        assert_eq!(reply, DEFAULT_REPLY);
    }

    #[tokio::test]
    async fn test_custom_matcher() {
        let matcher = KeywordMatcher::new(vec![CannedReply::new("ping", "pong")], "...");
        let responder = CannedResponder::with_matcher(matcher, Duration::from_millis(5));

        assert_eq!(responder.respond("PING!").await.unwrap(), "pong");
        assert_eq!(responder.respond("pang").await.unwrap(), "...");
    }
}
