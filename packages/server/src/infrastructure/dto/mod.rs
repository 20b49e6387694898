//! Data Transfer Objects (DTOs) for the booking/chat HTTP API.
//!
//! WebSocket のワイヤープロトコル（イベントエンベロープ）はサーバーと
//! クライアントで共有されるため `courtside-shared` の `protocol`
//! モジュールにあります。ここには HTTP API のリクエスト/レスポンス DTO と
//! ドメインモデルとの変換だけを置きます。

pub mod conversion;
pub mod http;
