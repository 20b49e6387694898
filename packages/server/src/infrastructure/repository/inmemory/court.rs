//! InMemory Court Repository 実装
//!
//! コートは外部の管理ツールでのみ作成・編集される参照データなので、
//! この実装は構築時に受け取ったコート一覧を読み取り専用で保持します。
//! 可変状態を持たないためロックも不要です。

use async_trait::async_trait;

use crate::domain::{Court, CourtId, CourtRepository, RepositoryError};

/// インメモリ Court Repository 実装
pub struct InMemoryCourtRepository {
    courts: Vec<Court>,
}

impl InMemoryCourtRepository {
    /// 新しい InMemoryCourtRepository を作成
    ///
    /// # 引数
    ///
    /// - `courts`: 参照データとして保持するコート一覧
    pub fn new(courts: Vec<Court>) -> Self {
        Self { courts }
    }
}

#[async_trait]
impl CourtRepository for InMemoryCourtRepository {
    async fn list(&self) -> Result<Vec<Court>, RepositoryError> {
        Ok(self.courts.clone())
    }

    async fn find(&self, court_id: CourtId) -> Result<Court, RepositoryError> {
        self.courts
            .iter()
            .find(|court| court.id == court_id)
            .cloned()
            .ok_or(RepositoryError::CourtNotFound(court_id))
    }
}
