//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{AssignHubError, Result};
use crate::models::{
    PaginationInfo,
    assignments::{
        entities::{self, Assignment},
        requests::{AssignmentListQuery, CreateAssignmentRequest},
        responses::AssignmentListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建作业（截止时间归一化到当天 UTC 零点）
    pub async fn create_assignment_impl(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();
        let due_date = entities::normalize_due_date(req.due_date);

        let model = ActiveModel {
            created_by: Set(created_by),
            name: Set(req.name),
            course: Set(req.course),
            year: Set(req.year),
            due_date: Set(entities::due_date_timestamp(due_date)),
            file_token: Set(req.file_token),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 同一教师下按名称查找作业（大小写敏感）
    pub async fn get_assignment_by_creator_and_name_impl(
        &self,
        created_by: i64,
        name: &str,
    ) -> Result<Option<Assignment>> {
        let result = Assignments::find()
            .filter(Column::CreatedBy.eq(created_by))
            .filter(Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 分页列出作业
    ///
    /// 教师视角按 created_by 过滤，学生视角按 (course, year) 受众过滤。
    pub async fn list_assignments_with_pagination_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Assignments::find();

        if let Some(created_by) = query.created_by {
            select = select.filter(Column::CreatedBy.eq(created_by));
        }

        if let Some((ref course, ref year)) = query.audience {
            select = select
                .filter(Column::Course.eq(course.clone()))
                .filter(Column::Year.eq(year.clone()));
        }

        // 学生的"待提交"视图：排除已持有在册提交的作业
        if let Some(student_id) = query.exclude_submitted_by {
            let submitted: Vec<i64> = Submissions::find()
                .select_only()
                .column(SubmissionColumn::AssignmentId)
                .filter(SubmissionColumn::StudentId.eq(student_id))
                .into_tuple()
                .all(&self.db)
                .await
                .map_err(|e| {
                    AssignHubError::database_operation(format!("查询已提交作业失败: {e}"))
                })?;

            if !submitted.is_empty() {
                select = select.filter(Column::Id.is_not_in(submitted));
            }
        }

        // 最新创建的作业排在前面
        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询作业总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询作业页数失败: {e}")))?;

        let assignments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(AssignmentListResponse {
            items: assignments
                .into_iter()
                .map(|m| m.into_assignment())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 删除作业及其全部提交
    ///
    /// 提交记录随作业一并删除，不留孤儿行。删除不存在的作业返回 false。
    pub async fn delete_assignment_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AssignHubError::database_operation(format!("开启事务失败: {e}")))?;

        Submissions::delete_many()
            .filter(SubmissionColumn::AssignmentId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("删除作业提交失败: {e}")))?;

        let result = Assignments::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("删除作业失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| AssignHubError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
