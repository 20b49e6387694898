//! ドメイン層の値オブジェクト定義

use std::fmt;

use thiserror::Error;

/// 値オブジェクトの検証エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueObjectError {
    /// 前後の空白を取り除いた結果、内容が空になった
    #[error("message content is empty after trimming")]
    EmptyMessageContent,
}

macro_rules! id_value_object {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(i64);

        impl $name {
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_value_object!(
    /// 認証済みユーザーの安定した識別子
    UserId
);
id_value_object!(
    /// コートの識別子
    CourtId
);
id_value_object!(
    /// チャットの識別子
    ChatId
);
id_value_object!(
    /// メッセージの識別子（永続化層が単調増加で採番する）
    MessageId
);
id_value_object!(
    /// 予約の識別子（永続化層が単調増加で採番する）
    BookingId
);

/// メッセージ本文
///
/// 前後の空白を取り除いた上で空でないことを保証する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(raw: String) -> Result<Self, ValueObjectError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyMessageContent);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ValueObjectError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

/// Unix タイムスタンプ（UTC、ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// ワイヤー表現（秒、小数部あり）へ変換する
    pub fn as_epoch_seconds(&self) -> f64 {
        self.0 as f64 / 1000.0
    }
}
