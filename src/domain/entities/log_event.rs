//! # LogEvent Entity
//!
//! `.err` ファイルから再構築したログレコード

use chrono::{DateTime, NaiveDateTime, Utc};

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// 再構築されたログイベント
///
/// タイムスタンプ行で始まり、後続の継続行（スタックトレースなど）を含む
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    /// `YYYY-MM-DD HH:MM:SS,mmm` から得た時刻（タイムゾーンなし）
    pub timestamp: NaiveDateTime,
    /// ロガー名などの種別タグ
    pub kind: String,
    /// 本文（改行を含む）
    pub text: String,
}

impl LogEvent {
    /// タイムスタンプをUTCとして解釈した時刻
    pub fn time_utc(&self) -> DateTime<Utc> {
        self.timestamp.and_utc()
    }

    /// UTCとして解釈したエポックミリ秒
    pub fn epoch_millis(&self) -> i64 {
        self.time_utc().timestamp_millis()
    }

    /// ERRORレベルのログメッセージに変換
    pub fn to_error_message(&self) -> LogMessage {
        LogMessage {
            level: LogLevel::Error,
            time: self.time_utc(),
            message: self.text.clone(),
        }
    }
}

/// リモートのテストアイテムに送るログメッセージ
#[derive(Debug, Clone, PartialEq)]
pub struct LogMessage {
    pub level: LogLevel,
    pub time: DateTime<Utc>,
    pub message: String,
}
