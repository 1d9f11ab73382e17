//! 教师名单存储操作

use super::SeaOrmStorage;
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::errors::{AssignHubError, Result};
use crate::models::teachers::entities::Teacher;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 把邮箱加入教师名单
    pub async fn add_teacher_impl(&self, email: &str) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            email: Set(email.to_string()),
            added_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("添加教师失败: {e}")))?;

        Ok(result.into_teacher())
    }

    /// 从名单移除教师
    pub async fn remove_teacher_impl(&self, id: i64) -> Result<bool> {
        let result = Teachers::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("移除教师失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出教师名单
    pub async fn list_teachers_impl(&self) -> Result<Vec<Teacher>> {
        let results = Teachers::find()
            .order_by_asc(Column::AddedAt)
            .all(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询教师名单失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_teacher()).collect())
    }

    /// 查询邮箱是否在教师名单中
    pub async fn get_teacher_by_email_impl(&self, email: &str) -> Result<Option<Teacher>> {
        let result = Teachers::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }
}
