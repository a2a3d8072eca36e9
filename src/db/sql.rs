use bigdecimal::BigDecimal;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;

use crate::errors::AppError;

/// A value bound into a dynamically assembled statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Int(i32),
    Numeric(BigDecimal),
}

/// A `SET` fragment plus its bind values, placeholders contiguous from `$1`
/// in field order.
#[derive(Debug, Clone, PartialEq)]
pub struct SetClause {
    pub assignments: String,
    pub values: Vec<SqlValue>,
}

/// Builds the `SET` fragment for a partial UPDATE from the fields the caller
/// wants to change. `columns` translates field names to column names; fields
/// it does not mention keep their own name.
///
/// Fails with `BadRequest` when `fields` is empty so callers can never issue
/// a no-op UPDATE.
pub fn partial_update(
    fields: Vec<(&str, SqlValue)>,
    columns: &[(&str, &str)],
) -> Result<SetClause, AppError> {
    if fields.is_empty() {
        return Err(AppError::BadRequest("no data to update".to_string()));
    }

    let mut assignments = Vec::with_capacity(fields.len());
    let mut values = Vec::with_capacity(fields.len());
    for (idx, (field, value)) in fields.into_iter().enumerate() {
        let column = columns
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, column)| *column)
            .unwrap_or(field);
        assignments.push(format!("\"{}\"=${}", column, idx + 1));
        values.push(value);
    }

    Ok(SetClause {
        assignments: assignments.join(", "),
        values,
    })
}

/// Binds one [`SqlValue`] onto a query, preserving order at the call site.
pub fn bind_value<O>(
    query: QueryAs<'_, Postgres, O, PgArguments>,
    value: SqlValue,
) -> QueryAs<'_, Postgres, O, PgArguments> {
    match value {
        SqlValue::Text(v) => query.bind(v),
        SqlValue::Int(v) => query.bind(v),
        SqlValue::Numeric(v) => query.bind(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_field_names_and_numbers_placeholders() {
        let clause = partial_update(
            vec![
                ("firstName", SqlValue::Text("Aliya".to_string())),
                ("age", SqlValue::Int(32)),
            ],
            &[("firstName", "first_name")],
        )
        .unwrap();

        assert_eq!(clause.assignments, r#""first_name"=$1, "age"=$2"#);
        assert_eq!(
            clause.values,
            vec![SqlValue::Text("Aliya".to_string()), SqlValue::Int(32)]
        );
    }

    #[test]
    fn keeps_untranslated_field_names() {
        let clause = partial_update(
            vec![("title", SqlValue::Text("Florist".to_string()))],
            &[("firstName", "first_name")],
        )
        .unwrap();

        assert_eq!(clause.assignments, r#""title"=$1"#);
    }

    #[test]
    fn rejects_an_empty_field_set() {
        let err = partial_update(vec![], &[]).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.to_string(), "no data to update");
    }

    #[test]
    fn value_count_matches_field_count() {
        let fields = vec![
            ("title", SqlValue::Text("Florist".to_string())),
            ("salary", SqlValue::Int(90000)),
            ("equity", SqlValue::Numeric(BigDecimal::from(0))),
        ];
        let clause = partial_update(fields, &[]).unwrap();

        assert_eq!(clause.values.len(), 3);
        assert_eq!(
            clause.assignments,
            r#""title"=$1, "salary"=$2, "equity"=$3"#
        );
    }
}
