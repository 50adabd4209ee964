//! Persistence contract for employee records and its sea-orm implementation.

use async_trait::async_trait;
use entity::employees;
use platform_db::{DbPool, is_unique_violation};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    sea_query::OnConflict,
};
use thiserror::Error;

use crate::model::{Employee, NewEmployee};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email {0} is already taken")]
    EmailTaken(String),
    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable table of employees. Single-row operations are atomic.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Insert a new row; the store assigns the identity.
    async fn insert(&self, employee: NewEmployee) -> StoreResult<Employee>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Employee>>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Employee>>;

    /// Composite lookup on (first name, last name); lowest id wins on ties.
    async fn find_by_name(&self, first_name: &str, last_name: &str)
    -> StoreResult<Option<Employee>>;

    /// Every row in ascending id order.
    async fn find_all(&self) -> StoreResult<Vec<Employee>>;

    /// Upsert keyed on identity: overwrites the row with `employee.id`, or creates it.
    async fn save(&self, employee: Employee) -> StoreResult<Employee>;

    /// Overwrite the row with `employee.id` only if it still exists; `None` otherwise.
    async fn update_existing(&self, employee: Employee) -> StoreResult<Option<Employee>>;

    /// Returns the number of rows removed (0 or 1).
    async fn delete_by_id(&self, id: i64) -> StoreResult<u64>;

    async fn delete_all(&self) -> StoreResult<u64>;
}

#[derive(Clone, Debug)]
pub struct SeaOrmEmployeeStore {
    db: DbPool,
}

impl SeaOrmEmployeeStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

fn write_error(err: DbErr, email: &str) -> StoreError {
    if is_unique_violation(&err) {
        StoreError::EmailTaken(email.to_string())
    } else {
        StoreError::Db(err)
    }
}

#[async_trait]
impl EmployeeStore for SeaOrmEmployeeStore {
    async fn insert(&self, employee: NewEmployee) -> StoreResult<Employee> {
        let email = employee.email.clone();
        let active = employees::ActiveModel {
            id: NotSet,
            first_name: Set(employee.first_name),
            last_name: Set(employee.last_name),
            email: Set(employee.email),
        };
        let model = active
            .insert(&self.db)
            .await
            .map_err(|err| write_error(err, &email))?;
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Employee>> {
        let model = employees::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Employee::from))
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Employee>> {
        let model = employees::Entity::find()
            .filter(employees::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(model.map(Employee::from))
    }

    async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> StoreResult<Option<Employee>> {
        let model = employees::Entity::find()
            .filter(employees::Column::FirstName.eq(first_name))
            .filter(employees::Column::LastName.eq(last_name))
            .order_by_asc(employees::Column::Id)
            .one(&self.db)
            .await?;
        Ok(model.map(Employee::from))
    }

    async fn find_all(&self) -> StoreResult<Vec<Employee>> {
        let records = employees::Entity::find()
            .order_by_asc(employees::Column::Id)
            .all(&self.db)
            .await?;
        Ok(records.into_iter().map(Employee::from).collect())
    }

    async fn save(&self, employee: Employee) -> StoreResult<Employee> {
        let active = employees::ActiveModel {
            id: Set(employee.id),
            first_name: Set(employee.first_name.clone()),
            last_name: Set(employee.last_name.clone()),
            email: Set(employee.email.clone()),
        };
        employees::Entity::insert(active)
            .on_conflict(
                OnConflict::column(employees::Column::Id)
                    .update_columns([
                        employees::Column::FirstName,
                        employees::Column::LastName,
                        employees::Column::Email,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|err| write_error(err, &employee.email))?;
        Ok(employee)
    }

    async fn update_existing(&self, employee: Employee) -> StoreResult<Option<Employee>> {
        let email = employee.email.clone();
        let active = employees::ActiveModel {
            id: Unchanged(employee.id),
            first_name: Set(employee.first_name),
            last_name: Set(employee.last_name),
            email: Set(employee.email),
        };
        match employees::Entity::update(active).exec(&self.db).await {
            Ok(model) => Ok(Some(model.into())),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(err) => Err(write_error(err, &email)),
        }
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<u64> {
        let result = employees::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        let result = employees::Entity::delete_many().exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}
