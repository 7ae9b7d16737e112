// src/db/employee_repo.rs

use async_trait::async_trait;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::stores::EmployeeStore,
    models::employee::{CreateEmployeePayload, Employee},
};

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_employee<'e, E>(
        &self,
        executor: E,
        input: &CreateEmployeePayload,
    ) -> Result<Employee, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (name, email, wallet_address, salary_usd)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, wallet_address, salary_usd, created_at
            "#,
        )
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.wallet_address)
            .bind(input.salary_usd)
            .fetch_one(executor)
            .await?;

        Ok(employee)
    }

    pub async fn get_all_employees<'e, E>(&self, executor: E) -> Result<Vec<Employee>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT id, name, email, wallet_address, salary_usd, created_at FROM employees ORDER BY created_at ASC",
        )
            .fetch_all(executor)
            .await?;

        Ok(employees)
    }

    pub async fn find_employee<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Employee>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let employee = sqlx::query_as::<_, Employee>(
            "SELECT id, name, email, wallet_address, salary_usd, created_at FROM employees WHERE id = $1",
        )
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(employee)
    }
}

#[async_trait]
impl EmployeeStore for EmployeeRepository {
    async fn create(&self, input: &CreateEmployeePayload) -> Result<Employee, AppError> {
        self.create_employee(&self.pool, input).await
    }

    async fn list(&self) -> Result<Vec<Employee>, AppError> {
        self.get_all_employees(&self.pool).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, AppError> {
        self.find_employee(&self.pool, id).await
    }
}
