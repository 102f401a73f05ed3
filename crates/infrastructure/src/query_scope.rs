//! Shared helper for appending optional equality filters to scoped reads.

use sqlx::{Postgres, QueryBuilder};

/// Appends `AND <column> = <value>` to a query under construction.
///
/// `column` must be a trusted literal column reference; only the value is
/// bound as a parameter.
pub(crate) fn push_eq_filter<'args, T>(
    builder: &mut QueryBuilder<'args, Postgres>,
    column: &str,
    value: T,
) where
    T: sqlx::Encode<'args, Postgres> + sqlx::Type<Postgres> + Send + 'args,
{
    builder.push(" AND ");
    builder.push(column);
    builder.push(" = ");
    builder.push_bind(value);
}
