//! Database schema definitions
//!
//! Tables are described as data and rendered to DDL by [`TableDef::create_sql`].
//! Constraint names follow a fixed convention:
//! - primary key: `pk_<table>`
//! - foreign key: `fk_<table>_<column>_<referred_table>`
//! - length check: `ck_<table>_<column>_length`

/// SQLite column types used by the mapped tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    /// Text bounded to the given number of characters
    VarChar(usize),
    Text,
}

impl ColumnType {
    fn sql(&self) -> String {
        match self {
            ColumnType::Integer => "INTEGER".to_string(),
            ColumnType::VarChar(len) => format!("VARCHAR({})", len),
            ColumnType::Text => "TEXT".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
}

/// A foreign key rendered with `ON DELETE NO ACTION`.
///
/// Foreign keys are checked per statement, so deleting a parent that still has
/// children fails with `SQLITE_CONSTRAINT_FOREIGNKEY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKeyDef {
    pub column: &'static str,
    pub references_table: &'static str,
    pub references_column: &'static str,
}

/// A table with an `INTEGER` primary key column named by `primary_key`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDef {
    pub name: &'static str,
    pub primary_key: &'static str,
    pub columns: &'static [ColumnDef],
    pub foreign_keys: &'static [ForeignKeyDef],
}

impl TableDef {
    pub fn primary_key_name(&self) -> String {
        format!("pk_{}", self.name)
    }

    pub fn foreign_key_name(&self, fk: &ForeignKeyDef) -> String {
        format!("fk_{}_{}_{}", self.name, fk.column, fk.references_table)
    }

    pub fn length_check_name(&self, column: &ColumnDef) -> String {
        format!("ck_{}_{}_length", self.name, column.name)
    }

    /// Render an idempotent `CREATE TABLE IF NOT EXISTS` statement.
    ///
    /// The primary key is declared as a table constraint on a plain `INTEGER`
    /// column so SQLite keeps it as the rowid alias and assigns ids on insert.
    pub fn create_sql(&self) -> String {
        let mut lines: Vec<String> = self
            .columns
            .iter()
            .map(|col| format!("    {} {} NOT NULL", col.name, col.ty.sql()))
            .collect();

        lines.push(format!(
            "    CONSTRAINT {} PRIMARY KEY ({})",
            self.primary_key_name(),
            self.primary_key
        ));

        for fk in self.foreign_keys {
            lines.push(format!(
                "    CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({}) ON DELETE NO ACTION",
                self.foreign_key_name(fk),
                fk.column,
                fk.references_table,
                fk.references_column
            ));
        }

        for col in self.columns {
            if let ColumnType::VarChar(len) = col.ty {
                lines.push(format!(
                    "    CONSTRAINT {} CHECK (length({}) <= {})",
                    self.length_check_name(col),
                    col.name,
                    len
                ));
            }
        }

        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
            self.name,
            lines.join(",\n")
        )
    }
}

/// Maximum length of names and titles
pub const MAX_TEXT_LEN: usize = 255;

/// Authors
pub const USERS: TableDef = TableDef {
    name: "users",
    primary_key: "id",
    columns: &[
        ColumnDef { name: "id", ty: ColumnType::Integer },
        ColumnDef { name: "name", ty: ColumnType::VarChar(MAX_TEXT_LEN) },
    ],
    foreign_keys: &[],
};

/// Articles, each owned by exactly one author
pub const POSTS: TableDef = TableDef {
    name: "posts",
    primary_key: "id",
    columns: &[
        ColumnDef { name: "id", ty: ColumnType::Integer },
        ColumnDef { name: "title", ty: ColumnType::VarChar(MAX_TEXT_LEN) },
        ColumnDef { name: "content", ty: ColumnType::Text },
        ColumnDef { name: "user_id", ty: ColumnType::Integer },
    ],
    foreign_keys: &[ForeignKeyDef {
        column: "user_id",
        references_table: "users",
        references_column: "id",
    }],
};

/// All tables, parents before children
pub const TABLES: &[TableDef] = &[USERS, POSTS];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<String> {
    TABLES.iter().map(TableDef::create_sql).collect()
}
