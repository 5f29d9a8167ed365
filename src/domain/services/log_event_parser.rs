//! # Log Event Parser
//!
//! `.err` ファイルの生テキストからタイムスタンプ区切りのログイベントを再構築する
//!
//! 行の形式（例）:
//!
//! ```text
//! 2022-03-17 06:16:24,500 - cephci - ceph.ceph:1588 - ERROR - command failed
//! Traceback (most recent call last):
//!   File "run.py", line 10, in <module>
//! ```
//!
//! タイムスタンプで始まる行が新しいイベントを開始し、それ以外の行は直前の
//! イベントの本文に追記される。イベントは次のイベント開始時と入力の終端で
//! 1回だけ出力される。

use std::sync::OnceLock;

use chrono::NaiveDateTime;
use log::error;
use regex::Regex;
use thiserror::Error;

use crate::domain::entities::log_event::LogEvent;

/// タイムスタンプの書式
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// `YYYY-MM-DD HH:MM:SS,mmm` の長さ
const TIMESTAMP_LEN: usize = 23;

/// 種別タグのフィールド位置（`-` で最大6分割したときの添字）
const KIND_FIELD: usize = 3;
const MAX_FIELDS: usize = 6;

fn start_line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d\d\d\d-\d\d-\d\d \d\d:\d\d:\d\d,\d\d\d").expect("valid start line pattern")
    })
}

/// 開始行のパースエラー
#[derive(Debug, Error)]
pub enum LogLineError {
    #[error("expected at least {expected} '-' separated fields, found {found}")]
    MissingFields { expected: usize, found: usize },

    #[error("invalid timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),
}

/// ログイベント再構築サービス
pub struct LogEventParser;

impl LogEventParser {
    /// 行がタイムスタンプで始まるか判定
    pub fn is_start_line(line: &str) -> bool {
        start_line_pattern().is_match(line)
    }

    /// テキスト全体をログイベント列に変換
    ///
    /// 不正な行はログに記録してスキップし、処理を継続する
    pub fn parse(content: &str) -> Vec<LogEvent> {
        let mut events = Vec::new();
        let mut current: Option<LogEvent> = None;

        for (line_num, line) in content.split_inclusive('\n').enumerate() {
            if Self::is_start_line(line) {
                if let Some(event) = current.take() {
                    events.push(event);
                }

                match Self::parse_start_line(line) {
                    Ok(event) => current = Some(event),
                    Err(e) => {
                        error!(
                            "Unable to parse line {}: {} ({})",
                            line_num + 1,
                            line.trim_end(),
                            e
                        );
                    }
                }
            } else if let Some(event) = current.as_mut() {
                event.text.push_str(line);
            } else if !line.trim().is_empty() {
                error!(
                    "Unable to parse line {}: no preceding log record: {}",
                    line_num + 1,
                    line.trim_end()
                );
            }
        }

        if let Some(event) = current {
            events.push(event);
        }

        events
    }

    /// 開始行から時刻・種別・本文を取り出す
    pub fn parse_start_line(line: &str) -> Result<LogEvent, LogLineError> {
        let head = line.split("__").next().unwrap_or(line);
        let stamp: String = head.chars().take(TIMESTAMP_LEN).collect();
        let timestamp = NaiveDateTime::parse_from_str(&stamp, TIMESTAMP_FORMAT)?;

        let fields: Vec<&str> = line.splitn(MAX_FIELDS, '-').collect();
        if fields.len() <= KIND_FIELD {
            return Err(LogLineError::MissingFields {
                expected: KIND_FIELD + 1,
                found: fields.len(),
            });
        }

        Ok(LogEvent {
            timestamp,
            kind: fields[KIND_FIELD].trim().to_string(),
            text: fields[fields.len() - 1].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE_BLOCKS: &str = "\
2022-03-17 06:16:24,500 - cephci - ceph.ceph:1588 - ERROR - first failure
2022-03-17 06:16:25,001 - cephci - ceph.ceph:1590 - ERROR - second failure
2022-03-17 06:16:26,250 - cephci - run:412 - ERROR - Traceback (most recent call last):
  File \"run.py\", line 10, in <module>
RuntimeError: boom
";

    #[test]
    fn test_is_start_line() {
        assert!(LogEventParser::is_start_line(
            "2022-03-17 06:16:24,500 - cephci - x - ERROR - msg"
        ));
        assert!(!LogEventParser::is_start_line("  File \"run.py\", line 10"));
        assert!(!LogEventParser::is_start_line("2022-03-17 06:16:24.500 - x"));
        assert!(!LogEventParser::is_start_line(" 2022-03-17 06:16:24,500 - x"));
    }

    #[test]
    fn test_three_blocks_yield_three_events() {
        let events = LogEventParser::parse(THREE_BLOCKS);

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].text, " ERROR - first failure\n");
        assert_eq!(events[1].text, " ERROR - second failure\n");
        assert_eq!(
            events[2].text,
            " ERROR - Traceback (most recent call last):\n  File \"run.py\", line 10, in <module>\nRuntimeError: boom\n"
        );
        assert!(events.iter().all(|e| e.kind == "cephci"));
    }

    #[test]
    fn test_timestamp_to_epoch_millis() {
        let events = LogEventParser::parse(THREE_BLOCKS);
        assert_eq!(events[0].epoch_millis(), 1_647_497_784_500);
        assert_eq!(events[1].epoch_millis(), 1_647_497_785_001);
    }

    #[test]
    fn test_text_field_keeps_extra_dashes() {
        let line = "2022-03-17 06:16:24,500 - cephci - mod:1 - ERROR - a - b - c\n";
        let event = LogEventParser::parse_start_line(line).unwrap();
        assert_eq!(event.kind, "cephci");
        assert_eq!(event.text, " ERROR - a - b - c\n");
    }

    #[test]
    fn test_double_underscore_suffix_ignored_for_timestamp() {
        let line = "2022-03-17 06:16:24,500__worker-1 - cephci - mod:1 - ERROR - msg";
        let event = LogEventParser::parse_start_line(line).unwrap();
        assert_eq!(event.epoch_millis(), 1_647_497_784_500);
    }

    #[test]
    fn test_malformed_start_line_skipped() {
        let content = "\
2022-03-17 06:16:24,500 - cephci - mod:1 - ERROR - good
2022-03-17 06:16:25,000 no separators here
continuation of a dropped line
2022-03-17 06:16:26,000 - cephci - mod:2 - ERROR - also good
";
        let events = LogEventParser::parse(content);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].text, " ERROR - good\n");
        assert_eq!(events[1].text, " ERROR - also good\n");
    }

    #[test]
    fn test_invalid_date_is_malformed() {
        let result = LogEventParser::parse_start_line(
            "2022-13-45 06:16:24,500 - cephci - mod:1 - ERROR - msg",
        );
        assert!(matches!(result, Err(LogLineError::Timestamp(_))));
    }

    #[test]
    fn test_missing_fields_error() {
        let result = LogEventParser::parse_start_line("2022-03-17 06:16:24,500 only");
        assert!(matches!(
            result,
            Err(LogLineError::MissingFields { found: 3, .. })
        ));
    }

    #[test]
    fn test_leading_continuation_lines_dropped() {
        let content = "orphan line\n\n2022-03-17 06:16:24,500 - cephci - m - ERROR - x\n";
        let events = LogEventParser::parse(content);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].text, " ERROR - x\n");
    }

    #[test]
    fn test_last_line_without_newline() {
        let content = "2022-03-17 06:16:24,500 - cephci - m - ERROR - x\n  at frame";
        let events = LogEventParser::parse(content);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].text, " ERROR - x\n  at frame");
    }

    #[test]
    fn test_empty_input() {
        assert!(LogEventParser::parse("").is_empty());
    }
}
