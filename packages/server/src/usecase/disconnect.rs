//! UseCase: 切断処理（presence 解除）

use std::sync::Arc;

use crate::domain::{ConnectionId, PresenceRegistry};

/// 切断処理のユースケース
pub struct DisconnectUseCase {
    /// PresenceRegistry（presence 管理の抽象化）
    presence: Arc<dyn PresenceRegistry>,
}

impl DisconnectUseCase {
    /// 新しい DisconnectUseCase を作成
    pub fn new(presence: Arc<dyn PresenceRegistry>) -> Self {
        Self { presence }
    }

    /// 切断処理を実行
    ///
    /// コネクションの同一性で presence を解除する。再接続によりエントリが
    /// 既に新しい接続へ置き換えられている場合は何も削除されない。
    pub async fn execute(&self, connection_id: ConnectionId) {
        self.presence.unregister(&connection_id).await;
        tracing::info!("Connection {} unregistered", connection_id);
    }
}
