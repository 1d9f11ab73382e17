use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    files::entities::File,
    submissions::{
        entities::{Submission, SubmissionOutcome},
        requests::SubmissionListQuery,
        responses::{StudentSubmissionView, SubmissionListResponse},
    },
    teachers::entities::Teacher,
    users::{
        entities::{User, UserRole},
        requests::OnboardRequest,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（密码已哈希，角色已由服务端解析）
    async fn create_user(&self, email: &str, password_hash: &str, role: UserRole) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过学号获取用户信息
    async fn get_user_by_roll_no(&self, roll_no: &str) -> Result<Option<User>>;
    // 学生入驻：填写姓名、学号、课程、年级
    async fn onboard_user(&self, id: i64, profile: OnboardRequest) -> Result<Option<User>>;
    // 更新用户角色（登录时按当前名单重新解析）
    async fn update_user_role(&self, id: i64, role: UserRole) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 列出某 (course, year) 受众下已入驻的学生
    async fn list_students_by_audience(&self, course: &str, year: &str) -> Result<Vec<User>>;

    /// 教师名单管理方法
    // 把邮箱加入教师名单
    async fn add_teacher(&self, email: &str) -> Result<Teacher>;
    // 从名单移除教师
    async fn remove_teacher(&self, id: i64) -> Result<bool>;
    // 列出教师名单
    async fn list_teachers(&self) -> Result<Vec<Teacher>>;
    // 查询邮箱是否在教师名单中
    async fn get_teacher_by_email(&self, email: &str) -> Result<Option<Teacher>>;

    /// 作业管理方法
    // 创建作业
    async fn create_assignment(
        &self,
        created_by: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    // 同一教师下按名称查找作业（重名检查）
    async fn get_assignment_by_creator_and_name(
        &self,
        created_by: i64,
        name: &str,
    ) -> Result<Option<Assignment>>;
    // 列出作业
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    // 删除作业及其全部提交
    async fn delete_assignment(&self, id: i64) -> Result<bool>;

    /// 提交管理方法
    // 创建或覆盖提交（每个学生每份作业至多一条在册提交）
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        file_token: &str,
    ) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    // 获取学生对某作业的在册提交
    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 列出某作业的提交（教师批改视角，含学生信息）
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    // 批改提交：写入结论与评语，标记已批改
    async fn grade_submission(
        &self,
        id: i64,
        outcome: SubmissionOutcome,
        remark: &str,
    ) -> Result<Option<Submission>>;
    // 列出学生自己的全部提交（含作业信息）
    async fn list_student_submissions(&self, student_id: i64)
    -> Result<Vec<StudentSubmissionView>>;
    // 某作业已提交的学生 ID 集合（名册对比用）
    async fn list_submitted_student_ids(&self, assignment_id: i64) -> Result<Vec<i64>>;

    /// 文件管理方法
    // 登记上传文件
    async fn create_file(
        &self,
        download_token: &str,
        file_name: &str,
        file_size: i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File>;
    // 通过唯一 token 获取文件信息
    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>>;
}

pub async fn create_storage() -> Result<std::sync::Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(std::sync::Arc::new(storage))
}
