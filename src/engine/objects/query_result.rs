use std::fmt;

use super::SqlTuple;

#[derive(Clone, Debug, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<SqlTuple>,
}

//Tab separated rendering for the runner, nulls print as \N like the loader reads them
impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.columns.join("\t"))?;
        for row in &self.rows {
            let fields: Vec<String> = row
                .iter()
                .map(|v| match v {
                    Some(value) => value.to_string(),
                    None => "\\N".to_string(),
                })
                .collect();
            writeln!(f, "{}", fields.join("\t"))?;
        }
        Ok(())
    }
}
