//! 用户存储操作

use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{AssignHubError, Result};
use crate::models::users::{
    entities::{User, UserRole},
    requests::OnboardRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(
        &self,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            role: Set(role.to_string()),
            onboarded: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("创建用户失败: {e}")))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过学号获取用户
    pub async fn get_user_by_roll_no_impl(&self, roll_no: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::RollNo.eq(roll_no))
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 学生入驻：写入档案并标记 onboarded
    pub async fn onboard_user_impl(
        &self,
        id: i64,
        profile: OnboardRequest,
    ) -> Result<Option<User>> {
        let existing = self.get_user_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(id),
            name: Set(Some(profile.name)),
            roll_no: Set(Some(profile.roll_no)),
            course: Set(Some(profile.course)),
            year: Set(Some(profile.year)),
            onboarded: Set(true),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("学生入驻失败: {e}")))?;

        self.get_user_by_id_impl(id).await
    }

    /// 更新用户角色
    pub async fn update_user_role_impl(&self, id: i64, role: UserRole) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(
                Column::Role,
                sea_orm::sea_query::Expr::value(role.to_string()),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("更新用户角色失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出某 (course, year) 受众下已入驻的学生
    ///
    /// 只统计 role 为 student 且完成入驻的账号，名册对比以此为全集。
    pub async fn list_students_by_audience_impl(
        &self,
        course: &str,
        year: &str,
    ) -> Result<Vec<User>> {
        let results = Users::find()
            .filter(Column::Role.eq(UserRole::Student.to_string()))
            .filter(Column::Onboarded.eq(true))
            .filter(Column::Course.eq(course))
            .filter(Column::Year.eq(year))
            .order_by_asc(Column::RollNo)
            .all(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询学生名册失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_user()).collect())
    }
}
