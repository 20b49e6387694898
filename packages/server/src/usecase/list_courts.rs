//! UseCase: コート一覧取得

use std::sync::Arc;

use crate::domain::{Court, CourtRepository};

use super::error::ListCourtsError;

/// コート一覧取得のユースケース
pub struct ListCourtsUseCase {
    /// Repository（データアクセス層の抽象化）
    court_repository: Arc<dyn CourtRepository>,
}

impl ListCourtsUseCase {
    /// 新しい ListCourtsUseCase を作成
    pub fn new(court_repository: Arc<dyn CourtRepository>) -> Self {
        Self { court_repository }
    }

    /// コート一覧取得を実行
    pub async fn execute(&self) -> Result<Vec<Court>, ListCourtsError> {
        self.court_repository
            .list()
            .await
            .map_err(|e| ListCourtsError::Repository(e.to_string()))
    }
}
