//! 提交存储操作
//!
//! 提交表对 (assignment_id, student_id) 有唯一约束，重交一律走 upsert。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{AssignHubError, Result};
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::{Submission, SubmissionOutcome},
        requests::SubmissionListQuery,
        responses::{
            StudentSubmissionView, SubmissionListItem, SubmissionListResponse, SubmissionStudent,
        },
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建或覆盖提交
    ///
    /// 已有在册提交时覆盖文件并清空批改状态，旧的批注随之作废。
    pub async fn upsert_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        file_token: &str,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let existing = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询在册提交失败: {e}")))?;

        let is_resubmit = existing.is_some();
        let model = submission_upsert_model(existing, assignment_id, student_id, file_token, now);

        let result = if is_resubmit {
            model
                .update(&self.db)
                .await
                .map_err(|e| AssignHubError::database_operation(format!("覆盖提交失败: {e}")))?
        } else {
            model
                .insert(&self.db)
                .await
                .map_err(|e| AssignHubError::database_operation(format!("创建提交失败: {e}")))?
        };

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 获取学生对某作业的在册提交
    pub async fn get_submission_by_assignment_and_student_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 列出某作业的提交（分页，附带学生姓名与学号）
    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Submissions::find().filter(Column::AssignmentId.eq(query.assignment_id));

        // 批改状态筛选：false = 待批改队列，true = 已批改队列
        if let Some(corrected) = query.corrected {
            select = select.filter(Column::Corrected.eq(corrected));
        }

        select = select.order_by_asc(Column::SubmittedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询提交总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询提交页数失败: {e}")))?;

        let submissions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询提交列表失败: {e}")))?;

        // 批量查询学生信息
        let student_ids: Vec<i64> = submissions
            .iter()
            .map(|s| s.student_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        let users = Users::find()
            .filter(UserColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询学生信息失败: {e}")))?;

        let user_map: HashMap<i64, SubmissionStudent> = users
            .into_iter()
            .map(|u| {
                (
                    u.id,
                    SubmissionStudent {
                        id: u.id,
                        name: u.name.unwrap_or_default(),
                        roll_no: u.roll_no.unwrap_or_default(),
                    },
                )
            })
            .collect();

        let items = submissions
            .into_iter()
            .map(|m| {
                let student = user_map
                    .get(&m.student_id)
                    .cloned()
                    .unwrap_or(SubmissionStudent {
                        id: m.student_id,
                        name: String::new(),
                        roll_no: String::new(),
                    });
                let s = m.into_submission();
                SubmissionListItem {
                    id: s.id,
                    assignment_id: s.assignment_id,
                    student,
                    file_token: s.file_token,
                    corrected: s.corrected,
                    outcome: s.outcome,
                    remark: s.remark,
                    submitted_at: s.submitted_at.to_rfc3339(),
                }
            })
            .collect();

        Ok(SubmissionListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 批改提交：写入结论与评语，标记已批改
    pub async fn grade_submission_impl(
        &self,
        id: i64,
        outcome: SubmissionOutcome,
        remark: &str,
    ) -> Result<Option<Submission>> {
        let existing = self.get_submission_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(id),
            corrected: Set(true),
            outcome: Set(outcome.to_string()),
            remark: Set(Some(remark.to_string())),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("批改提交失败: {e}")))?;

        self.get_submission_by_id_impl(id).await
    }

    /// 列出学生自己的全部提交（附带作业信息）
    pub async fn list_student_submissions_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<StudentSubmissionView>> {
        let submissions = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询提交历史失败: {e}")))?;

        let assignment_ids: Vec<i64> = submissions
            .iter()
            .map(|s| s.assignment_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        let assignments = Assignments::find()
            .filter(AssignmentColumn::Id.is_in(assignment_ids))
            .all(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询作业信息失败: {e}")))?;

        let assignment_map: HashMap<i64, crate::models::assignments::entities::Assignment> =
            assignments
                .into_iter()
                .map(|a| (a.id, a.into_assignment()))
                .collect();

        let views = submissions
            .into_iter()
            .filter_map(|m| {
                let assignment = assignment_map.get(&m.assignment_id)?;
                let s = m.into_submission();
                Some(StudentSubmissionView {
                    submission_id: s.id,
                    assignment_id: s.assignment_id,
                    assignment_name: assignment.name.clone(),
                    due_date: assignment.due_date,
                    file_token: s.file_token,
                    corrected: s.corrected,
                    outcome: s.outcome,
                    remark: s.remark,
                    submitted_at: s.submitted_at,
                })
            })
            .collect();

        Ok(views)
    }

    /// 某作业已提交的学生 ID 集合
    pub async fn list_submitted_student_ids_impl(&self, assignment_id: i64) -> Result<Vec<i64>> {
        let ids = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .select_only()
            .column(Column::StudentId)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| {
                AssignHubError::database_operation(format!("查询已提交学生失败: {e}"))
            })?;

        Ok(ids)
    }
}

/// 重交覆盖在册行并清空批改状态，首交插入新行
///
/// 覆盖时不碰 (assignment_id, student_id) 键列，唯一索引内始终同一条。
fn submission_upsert_model(
    existing: Option<crate::entity::submissions::Model>,
    assignment_id: i64,
    student_id: i64,
    file_token: &str,
    now: i64,
) -> ActiveModel {
    let mut model = ActiveModel {
        file_token: Set(file_token.to_string()),
        corrected: Set(false),
        outcome: Set(SubmissionOutcome::Unset.to_string()),
        remark: Set(None),
        submitted_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    match existing {
        Some(current) => model.id = Set(current.id),
        None => {
            model.assignment_id = Set(assignment_id);
            model.student_id = Set(student_id);
        }
    }

    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::submissions::Model;

    fn rejected_row() -> Model {
        Model {
            id: 11,
            assignment_id: 3,
            student_id: 42,
            file_token: "tok-old".to_string(),
            corrected: true,
            outcome: SubmissionOutcome::Rejected.to_string(),
            remark: Some("Question 2 is missing".to_string()),
            submitted_at: 1_767_225_600,
            updated_at: 1_767_312_000,
        }
    }

    #[test]
    fn test_resubmit_overwrites_same_row_and_resets_grading() {
        let model = submission_upsert_model(Some(rejected_row()), 3, 42, "tok-new", 1_767_398_400);

        assert_eq!(model.id.clone().unwrap(), 11);
        assert_eq!(model.file_token.clone().unwrap(), "tok-new");
        assert!(!model.corrected.clone().unwrap());
        assert_eq!(
            model.outcome.clone().unwrap(),
            SubmissionOutcome::Unset.to_string()
        );
        assert_eq!(model.remark.clone().unwrap(), None);
        assert_eq!(model.submitted_at.clone().unwrap(), 1_767_398_400);
        // 键列保持未设置，update 不会改动它们
        assert!(model.assignment_id.is_not_set());
        assert!(model.student_id.is_not_set());
    }

    #[test]
    fn test_first_submit_inserts_with_pair_keys() {
        let model = submission_upsert_model(None, 3, 42, "tok-a", 1_767_398_400);

        assert!(model.id.is_not_set());
        assert_eq!(model.assignment_id.clone().unwrap(), 3);
        assert_eq!(model.student_id.clone().unwrap(), 42);
        assert!(!model.corrected.clone().unwrap());
        assert_eq!(
            model.outcome.clone().unwrap(),
            SubmissionOutcome::Unset.to_string()
        );
    }
}
