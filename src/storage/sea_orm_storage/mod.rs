//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod files;
mod submissions;
mod teachers;
mod users;

use crate::config::AppConfig;
use crate::errors::{AssignHubError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| AssignHubError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| AssignHubError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| AssignHubError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AssignHubError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, email: &str, password_hash: &str, role: UserRole) -> Result<User> {
        self.create_user_impl(email, password_hash, role).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_roll_no(&self, roll_no: &str) -> Result<Option<User>> {
        self.get_user_by_roll_no_impl(roll_no).await
    }

    async fn onboard_user(&self, id: i64, profile: OnboardRequest) -> Result<Option<User>> {
        self.onboard_user_impl(id, profile).await
    }

    async fn update_user_role(&self, id: i64, role: UserRole) -> Result<bool> {
        self.update_user_role_impl(id, role).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn list_students_by_audience(&self, course: &str, year: &str) -> Result<Vec<User>> {
        self.list_students_by_audience_impl(course, year).await
    }

    // 教师名单模块
    async fn add_teacher(&self, email: &str) -> Result<Teacher> {
        self.add_teacher_impl(email).await
    }

    async fn remove_teacher(&self, id: i64) -> Result<bool> {
        self.remove_teacher_impl(id).await
    }

    async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        self.list_teachers_impl().await
    }

    async fn get_teacher_by_email(&self, email: &str) -> Result<Option<Teacher>> {
        self.get_teacher_by_email_impl(email).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        created_by: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(created_by, assignment).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn get_assignment_by_creator_and_name(
        &self,
        created_by: i64,
        name: &str,
    ) -> Result<Option<Assignment>> {
        self.get_assignment_by_creator_and_name_impl(created_by, name)
            .await
    }

    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        self.list_assignments_with_pagination_impl(query).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    // 提交模块
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        file_token: &str,
    ) -> Result<Submission> {
        self.upsert_submission_impl(assignment_id, student_id, file_token)
            .await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_by_assignment_and_student_impl(assignment_id, student_id)
            .await
    }

    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_with_pagination_impl(query).await
    }

    async fn grade_submission(
        &self,
        id: i64,
        outcome: SubmissionOutcome,
        remark: &str,
    ) -> Result<Option<Submission>> {
        self.grade_submission_impl(id, outcome, remark).await
    }

    async fn list_student_submissions(
        &self,
        student_id: i64,
    ) -> Result<Vec<StudentSubmissionView>> {
        self.list_student_submissions_impl(student_id).await
    }

    async fn list_submitted_student_ids(&self, assignment_id: i64) -> Result<Vec<i64>> {
        self.list_submitted_student_ids_impl(assignment_id).await
    }

    // 文件模块
    async fn create_file(
        &self,
        download_token: &str,
        file_name: &str,
        file_size: i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File> {
        self.create_file_impl(download_token, file_name, file_size, file_type, user_id)
            .await
    }

    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>> {
        self.get_file_by_token_impl(token).await
    }
}
