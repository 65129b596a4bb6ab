//! SQL builder helpers for search queries.

use common::field_value::{FilterSet, FilterValue, IN_SUFFIX, Scalar};

pub const SQL_OPTIONS_CLAUSE: &'static str = "OPTION max_query_time=60000";

pub const RESULT_COLUMNS: &'static str = "codigo, nombre, municipio, estado, manifestacion";


pub fn build_sql_where_clause(query_string: &str, filters: &FilterSet) -> anyhow::Result<String> {
    let mut terms = vec![];

    let query_string = query_string.trim();
    if !query_string.is_empty() {
        // quote @ so it is not read as the field selector operator
        let query_string = query_string.replace("@", "\\@");
        terms.push(format!("MATCH({})", format_sql_query::QuotedData(&query_string)));
    }

    for (key, value) in filters {
        let column = key.strip_suffix(IN_SUFFIX).unwrap_or(key);
        check_column_name(column)?;
        match value {
            FilterValue::Equals(scalar) => {
                terms.push(format!("{column} = {}", sql_literal(scalar)));
            }
            FilterValue::In(scalars) => {
                let values_str = scalars.iter().map(sql_literal).collect::<Vec<String>>().join(", ");
                terms.push(format!("{column} IN ({values_str})"));
            }
        }
    }

    if terms.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("WHERE {}", terms.join("
        AND ")))
}

fn sql_literal(value: &Scalar) -> String {
    match value {
        Scalar::Text(s) => format_sql_query::QuotedData(s).to_string(),
        Scalar::Int(i) => i.to_string(),
        Scalar::Bool(b) => (if *b { "1" } else { "0" }).to_string(),
        Scalar::Date(d) => format_sql_query::QuotedData(&d.format("%Y-%m-%d").to_string()).to_string(),
    }
}

fn check_column_name(column: &str) -> anyhow::Result<()> {
    if column.is_empty() || !column.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        anyhow::bail!("Invalid filter column name: {:?}", column);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_clause() {
        assert_eq!(build_sql_where_clause("  ", &FilterSet::new()).unwrap(), "");
    }

    #[test]
    fn test_equality_and_membership() {
        let mut filters = FilterSet::new();
        filters.insert("estado__in", FilterValue::In(vec!["Zulia".into(), "Lara".into()]));
        filters.insert("hayFotografia", FilterValue::Equals(Scalar::Bool(true)));
        filters.insert("manifestacion__in", FilterValue::In(vec![Scalar::Int(3), Scalar::Int(12)]));
        let clause = build_sql_where_clause("", &filters).unwrap();
        assert!(clause.starts_with("WHERE "));
        assert!(clause.contains("estado IN ('Zulia', 'Lara')"));
        assert!(clause.contains("hayFotografia = 1"));
        assert!(clause.contains("manifestacion IN (3, 12)"));
        assert!(!clause.contains("MATCH"));
        assert!(!clause.contains("__in"));
    }

    #[test]
    fn test_match_comes_first() {
        let mut filters = FilterSet::new();
        filters.insert("nroPiedras", FilterValue::Equals(Scalar::Int(4)));
        let clause = build_sql_where_clause("piedra @pintada", &filters).unwrap();
        assert!(clause.starts_with("WHERE MATCH("));
        assert!(clause.contains("\\@pintada"));
        assert!(clause.contains("nroPiedras = 4"));
    }

    #[test]
    fn test_dates_rendered_iso() {
        let mut filters = FilterSet::new();
        let date = NaiveDate::from_ymd_opt(2013, 4, 21).unwrap();
        filters.insert("fechaFotografia", FilterValue::Equals(Scalar::Date(date)));
        let clause = build_sql_where_clause("", &filters).unwrap();
        assert_eq!(clause, "WHERE fechaFotografia = '2013-04-21'");
    }

    #[test]
    fn test_rejects_bad_column_names() {
        let mut filters = FilterSet::new();
        filters.insert("nombre = 1 OR 1", FilterValue::Equals(Scalar::Int(1)));
        assert!(build_sql_where_clause("", &filters).is_err());
    }
}
