use serde::{Deserialize, Serialize};

/// 关键词与固定回复
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CannedReply {
    pub keyword: String,
    pub reply: String,
}

impl CannedReply {
    pub fn new(keyword: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
            reply: reply.into(),
        }
    }
}

/// 关键词匹配服务
///
/// 领域服务：忽略大小写的子串匹配，按定义顺序取第一个命中的关键词，
/// 都未命中时返回默认回复
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    replies: Vec<CannedReply>,
    default_reply: String,
}

pub const DEFAULT_REPLY: &str = "Entendi sua mensagem. Em breve um de nossos atendentes entrará em contato. Enquanto isso, posso ajudar com mais informações?";

impl KeywordMatcher {
    pub fn new(replies: Vec<CannedReply>, default_reply: impl Into<String>) -> Self {
        Self {
            replies,
            default_reply: default_reply.into(),
        }
    }

    /// 查找回复
    pub fn find(&self, message: &str) -> &str {
        let lower = message.to_lowercase();

        self.replies
            .iter()
            .find(|canned| lower.contains(canned.keyword.as_str()))
            .map(|canned| canned.reply.as_str())
            .unwrap_or(&self.default_reply)
    }

    pub fn replies(&self) -> &[CannedReply] {
        &self.replies
    }

    pub fn default_reply(&self) -> &str {
        &self.default_reply
    }
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::new(
            vec![
                CannedReply::new(
                    "serviços",
                    "Oferecemos: IA para Chatbots, Análise de Dados, Automação de Processos e Consultoria em IA. Qual área te interessa?",
                ),
                CannedReply::new(
                    "preços",
                    "Nossos planos começam em R$ 97/mês. Temos opções para empresas de todos os portes. Gostaria de uma proposta personalizada?",
                ),
                CannedReply::new(
                    "contato",
                    "Você pode nos contatar pelo email: contato@samueltechia.com ou telefone: (11) 99999-9999",
                ),
                CannedReply::new(
                    "suporte",
                    "Nosso suporte funciona 24/7. Como posso ajudar especificamente?",
                ),
            ],
            DEFAULT_REPLY,
        )
    }
}
