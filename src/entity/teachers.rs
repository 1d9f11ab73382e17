//! 教师注册表实体
//!
//! 由系主任维护的教师邮箱清单，角色解析在此查询。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub added_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_teacher(self) -> crate::models::teachers::entities::Teacher {
        use crate::models::teachers::entities::Teacher;
        use chrono::{DateTime, Utc};

        Teacher {
            id: self.id,
            email: self.email,
            added_at: DateTime::<Utc>::from_timestamp(self.added_at, 0).unwrap_or_default(),
        }
    }
}
