use sqlx::PgPool;

use crate::db::sql::{self, SqlValue};
use crate::errors::AppError;
use crate::models::{CreateJob, Job, JobFilter, UpdateJob};

// The updatable fields already carry their column names; the translation
// table exists for callers that diverge from the schema.
const JOB_COLUMNS: &[(&str, &str)] = &[];

pub async fn create(pool: &PgPool, input: CreateJob) -> Result<Job, AppError> {
    let job = sqlx::query_as::<_, Job>(
        "INSERT INTO jobs (title, salary, equity, company_handle)
         VALUES ($1, $2, $3, $4)
         RETURNING id, title, salary, equity, company_handle",
    )
    .bind(input.title)
    .bind(input.salary)
    .bind(input.equity)
    .bind(input.company_handle)
    .fetch_one(pool)
    .await?;
    Ok(job)
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<Job>, AppError> {
    let jobs = sqlx::query_as::<_, Job>(
        "SELECT id, title, salary, equity, company_handle FROM jobs ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(jobs)
}

pub async fn filter(pool: &PgPool, filter: &JobFilter) -> Result<Vec<Job>, AppError> {
    let (predicates, values) = filter_predicates(filter);

    let mut statement =
        String::from("SELECT id, title, salary, equity, company_handle FROM jobs");
    if !predicates.is_empty() {
        statement.push_str(" WHERE ");
        statement.push_str(&predicates.join(" AND "));
    }
    statement.push_str(" ORDER BY id");

    let mut query = sqlx::query_as::<_, Job>(&statement);
    for value in values {
        query = sql::bind_value(query, value);
    }
    let jobs = query.fetch_all(pool).await?;
    Ok(jobs)
}

pub async fn fetch_one(pool: &PgPool, id: i32) -> Result<Job, AppError> {
    sqlx::query_as::<_, Job>(
        "SELECT id, title, salary, equity, company_handle FROM jobs WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Job {} not found", id)))
}

pub async fn update(pool: &PgPool, id: i32, input: UpdateJob) -> Result<Job, AppError> {
    let clause = sql::partial_update(update_fields(input), JOB_COLUMNS)?;
    let statement = format!(
        "UPDATE jobs SET {} WHERE id = ${} RETURNING id, title, salary, equity, company_handle",
        clause.assignments,
        clause.values.len() + 1
    );

    let mut query = sqlx::query_as::<_, Job>(&statement);
    for value in clause.values {
        query = sql::bind_value(query, value);
    }
    query
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", id)))
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Job {} not found", id)));
    }
    Ok(())
}

/// The subset of fields a patch actually carries, in declaration order.
fn update_fields(input: UpdateJob) -> Vec<(&'static str, SqlValue)> {
    let mut fields = Vec::new();
    if let Some(title) = input.title {
        fields.push(("title", SqlValue::Text(title)));
    }
    if let Some(salary) = input.salary {
        fields.push(("salary", SqlValue::Int(salary)));
    }
    if let Some(equity) = input.equity {
        fields.push(("equity", SqlValue::Numeric(equity)));
    }
    fields
}

/// The three optional list predicates, ANDed by `filter`. Kept separate so
/// the composition is testable without a database.
fn filter_predicates(filter: &JobFilter) -> (Vec<String>, Vec<SqlValue>) {
    let mut predicates = Vec::new();
    let mut values = Vec::new();

    if let Some(title) = &filter.title {
        values.push(SqlValue::Text(format!("%{}%", title)));
        predicates.push(format!("title ILIKE ${}", values.len()));
    }
    if let Some(min_salary) = filter.min_salary {
        values.push(SqlValue::Int(min_salary));
        predicates.push(format!("salary >= ${}", values.len()));
    }
    if filter.has_equity == Some(true) {
        predicates.push("equity > 0".to_string());
    }

    (predicates, values)
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;

    use super::*;

    #[test]
    fn no_filters_produce_no_predicates() {
        let (predicates, values) = filter_predicates(&JobFilter::default());
        assert!(predicates.is_empty());
        assert!(values.is_empty());
    }

    #[test]
    fn all_filters_and_together() {
        let filter = JobFilter {
            title: Some("c".to_string()),
            min_salary: Some(50000),
            has_equity: Some(true),
        };
        let (predicates, values) = filter_predicates(&filter);

        assert_eq!(
            predicates,
            vec![
                "title ILIKE $1".to_string(),
                "salary >= $2".to_string(),
                "equity > 0".to_string(),
            ]
        );
        assert_eq!(
            values,
            vec![SqlValue::Text("%c%".to_string()), SqlValue::Int(50000)]
        );
    }

    #[test]
    fn has_equity_false_adds_no_predicate() {
        let filter = JobFilter {
            has_equity: Some(false),
            ..JobFilter::default()
        };
        let (predicates, values) = filter_predicates(&filter);
        assert!(predicates.is_empty());
        assert!(values.is_empty());
    }

    #[test]
    fn salary_only_filter_binds_from_one() {
        let filter = JobFilter {
            min_salary: Some(40000),
            ..JobFilter::default()
        };
        let (predicates, values) = filter_predicates(&filter);

        assert_eq!(predicates, vec!["salary >= $1".to_string()]);
        assert_eq!(values, vec![SqlValue::Int(40000)]);
    }

    #[test]
    fn update_fields_keeps_only_present_fields_in_order() {
        let fields = update_fields(UpdateJob {
            title: Some("Florist Assistant".to_string()),
            salary: None,
            equity: Some(BigDecimal::from(0)),
        });

        assert_eq!(
            fields,
            vec![
                ("title", SqlValue::Text("Florist Assistant".to_string())),
                ("equity", SqlValue::Numeric(BigDecimal::from(0))),
            ]
        );
    }

    #[test]
    fn empty_update_is_rejected_before_any_statement_runs() {
        let err = sql::partial_update(update_fields(UpdateJob::default()), JOB_COLUMNS)
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
