//! Employee business logic.

use crate::{
    entities::{Employee, employee},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Condition, QueryOrder, Set, prelude::*};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewEmployee {
    pub code: String,
    pub name: String,
    pub position: Option<String>,
    pub department: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmployeeUpdate {
    pub code: Option<String>,
    pub name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub email: Option<String>,
}

/// Active employees ordered by code.
pub async fn list_employees(
    db: &DatabaseConnection,
    search: Option<&str>,
) -> Result<Vec<employee::Model>> {
    let mut select = Employee::find().filter(employee::Column::IsDeleted.eq(false));
    if let Some(term) = search.map(str::trim).filter(|s| !s.is_empty()) {
        select = select.filter(
            Condition::any()
                .add(employee::Column::Code.contains(term))
                .add(employee::Column::Name.contains(term))
                .add(employee::Column::Department.contains(term)),
        );
    }
    select
        .order_by_asc(employee::Column::Code)
        .all(db)
        .await
        .map_err(Into::into)
}

pub async fn get_employee_by_id(
    db: &DatabaseConnection,
    employee_id: i64,
) -> Result<Option<employee::Model>> {
    Ok(Employee::find_by_id(employee_id)
        .one(db)
        .await?
        .filter(|e| !e.is_deleted))
}

pub async fn create_employee(db: &DatabaseConnection, input: NewEmployee) -> Result<employee::Model> {
    let code = input.code.trim().to_string();
    let name = input.name.trim().to_string();
    if code.is_empty() || name.is_empty() {
        return Err(Error::validation("Employee code and name are required"));
    }

    let now = Utc::now().naive_utc();
    let model = employee::ActiveModel {
        code: Set(code),
        name: Set(name),
        position: Set(input.position),
        department: Set(input.department),
        email: Set(input.email),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

pub async fn update_employee(
    db: &DatabaseConnection,
    employee_id: i64,
    update: EmployeeUpdate,
) -> Result<employee::Model> {
    let existing = get_employee_by_id(db, employee_id)
        .await?
        .ok_or_else(|| Error::not_found("Employee", employee_id))?;

    let code = update.code.map(|c| c.trim().to_string());
    let name = update.name.map(|n| n.trim().to_string());
    if code.as_deref().is_some_and(str::is_empty) || name.as_deref().is_some_and(str::is_empty) {
        return Err(Error::validation("Employee code and name are required"));
    }

    let mut active: employee::ActiveModel = existing.into();
    if let Some(code) = code {
        active.code = Set(code);
    }
    if let Some(name) = name {
        active.name = Set(name);
    }
    if update.position.is_some() {
        active.position = Set(update.position);
    }
    if update.department.is_some() {
        active.department = Set(update.department);
    }
    if update.email.is_some() {
        active.email = Set(update.email);
    }
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(db).await.map_err(Into::into)
}

pub async fn delete_employee(db: &DatabaseConnection, employee_id: i64) -> Result<()> {
    let existing = get_employee_by_id(db, employee_id)
        .await?
        .ok_or_else(|| Error::not_found("Employee", employee_id))?;
    let mut active: employee::ActiveModel = existing.into();
    active.is_deleted = Set(true);
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_employee_crud() -> Result<()> {
        let db = setup_test_db().await?;

        let missing_name = create_employee(
            &db,
            NewEmployee {
                code: "EMP-1".to_string(),
                ..NewEmployee::default()
            },
        )
        .await;
        assert!(matches!(missing_name.unwrap_err(), Error::Validation { .. }));

        let employee = create_test_employee(&db, "EMP-0042", "Somchai").await?;
        let updated = update_employee(
            &db,
            employee.id,
            EmployeeUpdate {
                department: Some("Procurement".to_string()),
                ..EmployeeUpdate::default()
            },
        )
        .await?;
        assert_eq!(updated.department.as_deref(), Some("Procurement"));

        let found = list_employees(&db, Some("procure")).await?;
        assert_eq!(found.len(), 1);

        delete_employee(&db, employee.id).await?;
        assert!(get_employee_by_id(&db, employee.id).await?.is_none());

        Ok(())
    }
}
