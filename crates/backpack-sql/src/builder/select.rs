//! SELECT statement builder.
//!
//! The builder is an accumulator of ordered clause tokens plus a parallel
//! ordered list of bound values; `build()` joins the tokens with single
//! spaces. Every chain call takes `self` by value and returns the updated
//! builder, so each logical query owns its accumulator outright.

use tracing::debug;

use crate::connection::Connection;
use crate::error::SqlError;
use crate::value::{Params, Row, Value};

/// A rendered field or table list.
///
/// Accepts the three argument forms the clause methods share: a raw
/// clause string, a list (joined with `,`), or field → alias pairs
/// rendered `field AS alias` and joined with `,`.
#[derive(Debug, Clone)]
pub struct FieldList(String);

impl FieldList {
    fn into_sql(self) -> String {
        self.0
    }
}

impl From<&str> for FieldList {
    fn from(raw: &str) -> Self {
        Self(String::from(raw))
    }
}

impl From<String> for FieldList {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&[&str]> for FieldList {
    fn from(items: &[&str]) -> Self {
        Self(items.join(","))
    }
}

impl<const N: usize> From<[&str; N]> for FieldList {
    fn from(items: [&str; N]) -> Self {
        Self(items.join(","))
    }
}

impl From<Vec<&str>> for FieldList {
    fn from(items: Vec<&str>) -> Self {
        Self(items.join(","))
    }
}

impl From<&[(&str, &str)]> for FieldList {
    fn from(pairs: &[(&str, &str)]) -> Self {
        let items: Vec<String> = pairs
            .iter()
            .map(|(field, alias)| format!("{field} AS {alias}"))
            .collect();
        Self(items.join(","))
    }
}

impl<const N: usize> From<[(&str, &str); N]> for FieldList {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs.as_slice().into()
    }
}

impl From<Vec<(&str, &str)>> for FieldList {
    fn from(pairs: Vec<(&str, &str)>) -> Self {
        pairs.as_slice().into()
    }
}

/// Join flavor for [`Select::join`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// INNER JOIN.
    Inner,
    /// OUTER JOIN.
    Outer,
    /// LEFT JOIN.
    Left,
    /// RIGHT JOIN.
    Right,
    /// CROSS JOIN.
    Cross,
}

impl JoinKind {
    const fn keyword(self) -> &'static str {
        match self {
            Self::Inner => "INNER",
            Self::Outer => "OUTER",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Cross => "CROSS",
        }
    }
}

/// Options form of LIMIT.
///
/// With an offset set (and nonzero) the clause renders `LIMIT offset,count`
/// with the count defaulting to 0; otherwise just `LIMIT count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LimitOpts {
    /// Row count.
    pub count: Option<u64>,
    /// Row offset.
    pub offset: Option<u64>,
}

/// A fluent SELECT statement accumulator.
///
/// ```
/// use backpack_sql::Select;
///
/// let (sql, values) = Select::new("*")
///     .from("badge")
///     .inner_join("user")
///     .on("user.id = badge.user_id", ())
///     .where_clause("user.id = ?", 2)
///     .build();
///
/// assert_eq!(
///     sql,
///     "SELECT * FROM badge INNER JOIN user ON user.id = badge.user_id WHERE user.id = ?"
/// );
/// assert_eq!(values.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Select {
    tokens: Vec<String>,
    values: Vec<Value>,
}

impl Select {
    /// Opens a builder with a SELECT clause.
    #[must_use]
    pub fn new(fields: impl Into<FieldList>) -> Self {
        let mut select = Self {
            tokens: Vec::new(),
            values: Vec::new(),
        };
        select.clause("SELECT", fields);
        select
    }

    fn clause(&mut self, keyword: &str, fields: impl Into<FieldList>) {
        self.tokens.push(String::from(keyword));
        self.tokens.push(fields.into().into_sql());
    }

    fn compare(mut self, keyword: &str, condition: &str, params: impl Into<Params>) -> Self {
        self.tokens.push(String::from(keyword));
        self.tokens.push(String::from(condition));
        self.values.extend(params.into().into_values());
        self
    }

    /// Adds a FROM clause.
    #[must_use]
    pub fn from(mut self, tables: impl Into<FieldList>) -> Self {
        self.clause("FROM", tables);
        self
    }

    /// Adds a JOIN clause of the given kind.
    #[must_use]
    pub fn join(mut self, kind: JoinKind, tables: impl Into<FieldList>) -> Self {
        self.clause(&format!("{} JOIN", kind.keyword()), tables);
        self
    }

    /// Shorthand for `join(JoinKind::Inner, ..)`.
    #[must_use]
    pub fn inner_join(self, tables: impl Into<FieldList>) -> Self {
        self.join(JoinKind::Inner, tables)
    }

    /// Shorthand for `join(JoinKind::Outer, ..)`.
    #[must_use]
    pub fn outer_join(self, tables: impl Into<FieldList>) -> Self {
        self.join(JoinKind::Outer, tables)
    }

    /// Shorthand for `join(JoinKind::Left, ..)`.
    #[must_use]
    pub fn left_join(self, tables: impl Into<FieldList>) -> Self {
        self.join(JoinKind::Left, tables)
    }

    /// Shorthand for `join(JoinKind::Right, ..)`.
    #[must_use]
    pub fn right_join(self, tables: impl Into<FieldList>) -> Self {
        self.join(JoinKind::Right, tables)
    }

    /// Shorthand for `join(JoinKind::Cross, ..)`.
    #[must_use]
    pub fn cross_join(self, tables: impl Into<FieldList>) -> Self {
        self.join(JoinKind::Cross, tables)
    }

    /// Adds an ON condition; params bind to `?` placeholders in call order.
    #[must_use]
    pub fn on(self, condition: &str, params: impl Into<Params>) -> Self {
        self.compare("ON", condition, params)
    }

    /// Adds a WHERE condition; params bind to `?` placeholders in call order.
    #[must_use]
    pub fn where_clause(self, condition: &str, params: impl Into<Params>) -> Self {
        self.compare("WHERE", condition, params)
    }

    /// Adds an AND condition.
    #[must_use]
    pub fn and(self, condition: &str, params: impl Into<Params>) -> Self {
        self.compare("AND", condition, params)
    }

    /// Adds an OR condition.
    #[must_use]
    pub fn or(self, condition: &str, params: impl Into<Params>) -> Self {
        self.compare("OR", condition, params)
    }

    /// Adds a LIMIT clause with a bare row count.
    #[must_use]
    pub fn limit(mut self, count: u64) -> Self {
        self.tokens.push(String::from("LIMIT"));
        self.tokens.push(count.to_string());
        self
    }

    /// Adds a LIMIT clause from count/offset options.
    #[must_use]
    pub fn limit_opts(mut self, opts: LimitOpts) -> Self {
        self.tokens.push(String::from("LIMIT"));
        let count = opts.count.unwrap_or(0);
        match opts.offset.filter(|&offset| offset > 0) {
            Some(offset) => self.tokens.push(format!("{offset},{count}")),
            None => self.tokens.push(count.to_string()),
        }
        self
    }

    /// Renders the statement: tokens joined by single spaces, plus the
    /// bound values in placeholder order.
    #[must_use]
    pub fn build(&self) -> (String, Vec<Value>) {
        (self.tokens.join(" "), self.values.clone())
    }

    /// Executes the accumulated statement.
    pub async fn go<C: Connection>(&self, conn: &C) -> Result<Vec<Row>, SqlError> {
        let (sql, values) = self.build();
        debug!(sql = %sql, params = values.len(), "executing select");
        conn.fetch(&sql, &values).await
    }
}
