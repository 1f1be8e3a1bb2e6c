//! Employee Repository

use super::{RepoError, RepoResult};
use shared::models::{Employee, EmployeeInput};
use sqlx::SqlitePool;

const EMPLOYEE_SELECT: &str = "SELECT id, name, email, phone, department, salary, profile_image, created_at, updated_at FROM employee";

/// Escape LIKE wildcards so a search term matches literally
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

pub async fn count(pool: &SqlitePool, search: Option<&str>) -> RepoResult<i64> {
    let total = match search {
        Some(term) if !term.is_empty() => {
            let pattern = format!("%{}%", escape_like(term));
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM employee WHERE name LIKE ?1 ESCAPE '\\'",
            )
            .bind(pattern)
            .fetch_one(pool)
            .await?
        }
        _ => {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employee")
                .fetch_one(pool)
                .await?
        }
    };
    Ok(total)
}

/// One page of employees, most recently updated first.
///
/// `search` filters by case-insensitive substring on name (SQLite LIKE is
/// ASCII case-insensitive). The id tie-break keeps pagination stable when
/// two rows share an updated_at millisecond.
pub async fn find_page(
    pool: &SqlitePool,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Employee>> {
    let rows = match search {
        Some(term) if !term.is_empty() => {
            let pattern = format!("%{}%", escape_like(term));
            let sql = format!(
                "{} WHERE name LIKE ?1 ESCAPE '\\' ORDER BY updated_at DESC, id DESC LIMIT ?2 OFFSET ?3",
                EMPLOYEE_SELECT
            );
            sqlx::query_as::<_, Employee>(&sql)
                .bind(pattern)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
        }
        _ => {
            let sql = format!(
                "{} ORDER BY updated_at DESC, id DESC LIMIT ?1 OFFSET ?2",
                EMPLOYEE_SELECT
            );
            sqlx::query_as::<_, Employee>(&sql)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
        }
    };
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Employee>> {
    let sql = format!("{} WHERE id = ?", EMPLOYEE_SELECT);
    let row = sqlx::query_as::<_, Employee>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn email_exists(pool: &SqlitePool, email: &str) -> RepoResult<bool> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employee WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Insert a new employee.
///
/// The UNIQUE index on email is the authoritative duplicate check; a
/// constraint failure here maps to [`RepoError::Duplicate`] even when two
/// creates race past the handler's existence pre-check.
pub async fn create(
    pool: &SqlitePool,
    data: EmployeeInput,
    profile_image: Option<String>,
) -> RepoResult<Employee> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let result = sqlx::query(
        "INSERT INTO employee (id, name, email, phone, department, salary, profile_image, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.department)
    .bind(data.salary)
    .bind(&profile_image)
    .bind(now)
    .execute(pool)
    .await;

    if let Err(e) = result {
        if is_unique_violation(&e) {
            return Err(RepoError::Duplicate(
                "Employee with this email already exists".into(),
            ));
        }
        return Err(e.into());
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create employee".into()))
}

/// Overwrite the core fields of an employee.
///
/// `profile_image` is only replaced when a new path is supplied; COALESCE
/// keeps the stored one otherwise.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: EmployeeInput,
    profile_image: Option<String>,
) -> RepoResult<Employee> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE employee SET name = ?1, email = ?2, phone = ?3, department = ?4, salary = ?5, profile_image = COALESCE(?6, profile_image), updated_at = ?7 WHERE id = ?8",
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.department)
    .bind(data.salary)
    .bind(&profile_image)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound("Employee not found".into()));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound("Employee not found".into()))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM employee WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn test_pool() -> (tempfile::TempDir, SqlitePool) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = DbService::new(path.to_str().unwrap()).await.unwrap();
        (dir, db.pool)
    }

    fn input(name: &str, email: &str) -> EmployeeInput {
        EmployeeInput {
            name: name.into(),
            email: email.into(),
            phone: "123456789".into(),
            department: "QA".into(),
            salary: 42000.0,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let (_dir, pool) = test_pool().await;

        let created = create(&pool, input("Alice", "alice@example.com"), None)
            .await
            .unwrap();
        assert!(created.id > 0);
        assert_eq!(created.name, "Alice");
        assert_eq!(created.email, "alice@example.com");
        assert!(created.created_at > 0);
        assert_eq!(created.created_at, created.updated_at);
        assert!(created.profile_image.is_none());

        let found = find_by_id(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.salary, 42000.0);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_by_unique_index() {
        let (_dir, pool) = test_pool().await;

        create(&pool, input("Alice", "alice@example.com"), None)
            .await
            .unwrap();
        let err = create(&pool, input("Other", "alice@example.com"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
        assert_eq!(count(&pool, None).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_email_exists() {
        let (_dir, pool) = test_pool().await;

        assert!(!email_exists(&pool, "alice@example.com").await.unwrap());
        create(&pool, input("Alice", "alice@example.com"), None)
            .await
            .unwrap();
        assert!(email_exists(&pool, "alice@example.com").await.unwrap());
        // Email comparison stays case-sensitive
        assert!(!email_exists(&pool, "ALICE@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_overwrites_fields_and_keeps_image() {
        let (_dir, pool) = test_pool().await;

        let created = create(
            &pool,
            input("Alice", "alice@example.com"),
            Some("uploads/images/abc.jpg".into()),
        )
        .await
        .unwrap();

        let updated = update(&pool, created.id, input("Alicia", "alicia@example.com"), None)
            .await
            .unwrap();
        assert_eq!(updated.name, "Alicia");
        assert_eq!(updated.email, "alicia@example.com");
        assert_eq!(updated.profile_image.as_deref(), Some("uploads/images/abc.jpg"));
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);

        let updated = update(
            &pool,
            created.id,
            input("Alicia", "alicia@example.com"),
            Some("uploads/images/def.jpg".into()),
        )
        .await
        .unwrap();
        assert_eq!(updated.profile_image.as_deref(), Some("uploads/images/def.jpg"));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (_dir, pool) = test_pool().await;

        let err = update(&pool, 999, input("Ghost", "ghost@example.com"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let (_dir, pool) = test_pool().await;

        let created = create(&pool, input("Alice", "alice@example.com"), None)
            .await
            .unwrap();
        assert!(delete(&pool, created.id).await.unwrap());
        assert!(find_by_id(&pool, created.id).await.unwrap().is_none());
        assert!(!delete(&pool, created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_literal() {
        let (_dir, pool) = test_pool().await;

        for (name, email) in [
            ("Alice", "alice@example.com"),
            ("alicia", "alicia@example.com"),
            ("Bob", "bob@example.com"),
            ("100% Match", "match@example.com"),
            ("100x Match", "nomatch@example.com"),
        ] {
            create(&pool, input(name, email), None).await.unwrap();
        }

        assert_eq!(count(&pool, Some("ali")).await.unwrap(), 2);
        assert_eq!(count(&pool, Some("ALI")).await.unwrap(), 2);
        assert_eq!(count(&pool, Some("bob")).await.unwrap(), 1);
        // Wildcards in the term match literally, not as LIKE patterns
        assert_eq!(count(&pool, Some("100%")).await.unwrap(), 1);
        assert_eq!(count(&pool, Some("")).await.unwrap(), 5);
        assert_eq!(count(&pool, None).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_page_window_ordered_by_recency() {
        let (_dir, pool) = test_pool().await;

        let mut ids = Vec::new();
        for i in 0..5 {
            let e = create(
                &pool,
                input(&format!("Emp{i}"), &format!("emp{i}@example.com")),
                None,
            )
            .await
            .unwrap();
            ids.push(e.id);
        }
        // Pin distinct updated_at values so the expected order is exact
        for (i, id) in ids.iter().enumerate() {
            sqlx::query("UPDATE employee SET updated_at = ? WHERE id = ?")
                .bind(1_000 + i as i64)
                .bind(id)
                .execute(&pool)
                .await
                .unwrap();
        }

        let page = find_page(&pool, None, 2, 0).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name, "Emp4");
        assert_eq!(page[1].name, "Emp3");

        let page = find_page(&pool, None, 2, 2).await.unwrap();
        assert_eq!(page[0].name, "Emp2");
        assert_eq!(page[1].name, "Emp1");

        let page = find_page(&pool, None, 2, 4).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "Emp0");

        let page = find_page(&pool, None, 10, 10).await.unwrap();
        assert!(page.is_empty());
    }
}
