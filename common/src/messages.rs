//! 通知メッセージ
//!
//! メッセージ領域に追加される一時的な通知。クリックで即時に消え、
//! 自動消去の秒数が指定されていればその時間後にも消える（タイマーはブラウザ側）。

use std::fmt;

/// 通知の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warning,
    Error,
}

impl MessageKind {
    /// CSSクラス名
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Info => "info",
            MessageKind::Warning => "warning",
            MessageKind::Error => "error",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type MessageId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub kind: MessageKind,
    pub text: String,
    /// 自動消去までの秒数
    pub auto_dismiss: Option<u32>,
}

/// 通知一覧（追加順、重複排除・件数上限なし）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBus {
    next_id: MessageId,
    messages: Vec<Message>,
}

impl MessageBus {
    pub fn show(
        &mut self,
        kind: MessageKind,
        text: impl Into<String>,
        auto_dismiss: Option<u32>,
    ) -> MessageId {
        let id = self.next_id;
        self.next_id += 1;

        let text = text.into();
        match kind {
            MessageKind::Error => log::error!("{}", text),
            MessageKind::Warning => log::warn!("{}", text),
            MessageKind::Info => log::info!("{}", text),
        }

        self.messages.push(Message {
            id,
            kind,
            text,
            auto_dismiss,
        });
        id
    }

    /// 消去（既に消えていれば何もしない）
    pub fn dismiss(&mut self, id: MessageId) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| m.id != id);
        self.messages.len() != before
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
