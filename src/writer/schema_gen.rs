use crate::schema::TableSchema;

/// Quote an identifier; `index` and the camelCase names need it.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Generate CREATE TABLE SQL for a table schema
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE {} (\n", quote_ident(schema.name));
    let mut columns = Vec::new();

    for col in schema.columns {
        let null_constraint = if !col.nullable { " NOT NULL" } else { "" };
        let pk = if col.name == "id" { " PRIMARY KEY" } else { "" };
        let unique = if col.unique { " UNIQUE" } else { "" };

        columns.push(format!(
            "    {} {}{}{}{}",
            quote_ident(col.name),
            col.col_type.sql_type(),
            pk,
            null_constraint,
            unique
        ));
    }

    // Add foreign key constraints
    for fk in schema.foreign_keys {
        columns.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({})",
            quote_ident(fk.column),
            quote_ident(fk.references_table),
            quote_ident(fk.references_column)
        ));
    }

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate CREATE INDEX statements for foreign key columns
pub fn generate_indexes(schema: &TableSchema) -> Vec<String> {
    schema
        .foreign_keys
        .iter()
        .map(|fk| {
            format!(
                "CREATE INDEX {} ON {}({})",
                quote_ident(&format!("idx_{}_{}", schema.name, fk.column)),
                quote_ident(schema.name),
                quote_ident(fk.column)
            )
        })
        .collect()
}

/// Generate a parameterised INSERT for every column except the surrogate id
pub fn generate_insert(schema: &TableSchema) -> String {
    let columns = schema.insert_columns();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(schema.name),
        columns
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Vec<_>>()
            .join(", "),
        placeholders.join(", ")
    )
}
