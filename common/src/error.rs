//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// HTTPステータスが200以外
    #[error("HTTP {status}: {status_text}")]
    Fetch { status: u16, status_text: String },

    /// 通信そのものの失敗（CORS、オフライン等）
    #[error("Network error: {0}")]
    Network(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Format error: {0}")]
    Format(String),
}

impl Error {
    /// 通信・HTTPレベルの失敗か（ペイロードの形式エラーではないか）
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Fetch { .. } | Error::Network(_))
    }

    /// ユーザー向けに表示するステータス文字列
    ///
    /// HTTPエラーはステータステキスト、それ以外はエラー全体の表示文字列。
    pub fn status_text(&self) -> String {
        match self {
            Error::Fetch { status_text, .. } => status_text.clone(),
            Error::Network(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_fetch() {
        let error = Error::Fetch {
            status: 404,
            status_text: "Not Found".to_string(),
        };
        assert_eq!(format!("{}", error), "HTTP 404: Not Found");
        assert_eq!(error.status_text(), "Not Found");
    }

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
        assert!(!error.is_transport());
    }

    #[test]
    fn test_is_transport() {
        assert!(Error::Network("offline".to_string()).is_transport());
        assert!(Error::Fetch { status: 500, status_text: "Internal Server Error".to_string() }.is_transport());
        assert!(!Error::Format("bad".to_string()).is_transport());
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Format("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Format"));
        assert!(debug.contains("テスト"));
    }
}
