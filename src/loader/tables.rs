use std::str::FromStr;

use csv::StringRecord;

use super::clean::RawTable;
use super::LoadError;
use crate::records::{CompoundRecord, ExperimentRecord, UserRecord};
use crate::schema::columns;

fn parse_field<T: FromStr>(
    table: &RawTable,
    line: u64,
    record: &StringRecord,
    index: usize,
    column: &str,
) -> Result<T, LoadError> {
    let value = table.field(line, record, index, column)?;
    value.parse().map_err(|_| {
        table.malformed(
            line,
            format!("cannot parse '{}' in column '{}'", value, column),
        )
    })
}

/// Parse `compounds.csv` rows
pub fn parse_compounds(table: &RawTable) -> Result<Vec<CompoundRecord>, LoadError> {
    let id_col = table.column(columns::COMPOUND_ID)?;
    let name_col = table.column(columns::COMPOUND_NAME)?;
    let structure_col = table.column(columns::COMPOUND_STRUCTURE)?;

    table
        .rows()
        .map(|(line, record)| -> Result<CompoundRecord, LoadError> {
            Ok(CompoundRecord {
                compound_id: parse_field(table, *line, record, id_col, columns::COMPOUND_ID)?,
                compound_name: table
                    .field(*line, record, name_col, columns::COMPOUND_NAME)?
                    .to_string(),
                compound_structure: table
                    .field(*line, record, structure_col, columns::COMPOUND_STRUCTURE)?
                    .to_string(),
            })
        })
        .collect()
}

/// Parse `users.csv` rows, renaming `name` to `user_name` and dropping other columns
pub fn parse_users(table: &RawTable) -> Result<Vec<UserRecord>, LoadError> {
    let id_col = table.column(columns::USER_ID)?;
    let name_col = table.column(columns::RAW_USER_NAME)?;

    table
        .rows()
        .map(|(line, record)| -> Result<UserRecord, LoadError> {
            Ok(UserRecord {
                user_id: parse_field(table, *line, record, id_col, columns::USER_ID)?,
                user_name: table
                    .field(*line, record, name_col, columns::RAW_USER_NAME)?
                    .to_string(),
            })
        })
        .collect()
}

/// Split a delimited compound list into integer ids.
///
/// Elements are trimmed; an empty element is a coercion failure like any other.
pub fn split_compound_ids(value: &str, delimiter: char) -> Result<Vec<i64>, String> {
    value
        .split(delimiter)
        .map(|id| {
            let id = id.trim();
            id.parse::<i64>()
                .map_err(|_| format!("invalid compound id '{}' in '{}'", id, value))
        })
        .collect()
}

/// Parse `user_experiments.csv` rows, splitting the compound list on `delimiter`
pub fn parse_experiments(
    table: &RawTable,
    delimiter: char,
) -> Result<Vec<ExperimentRecord>, LoadError> {
    let user_col = table.column(columns::USER_ID)?;
    let experiment_col = table.column(columns::EXPERIMENT_ID)?;
    let run_time_col = table.column(columns::EXPERIMENT_RUN_TIME)?;
    let compounds_col = table.column(columns::RAW_EXPERIMENT_COMPOUND_IDS)?;

    table
        .rows()
        .map(|(line, record)| -> Result<ExperimentRecord, LoadError> {
            let c_ids = table.field(
                *line,
                record,
                compounds_col,
                columns::RAW_EXPERIMENT_COMPOUND_IDS,
            )?;
            let compound_ids =
                split_compound_ids(c_ids, delimiter).map_err(|msg| table.malformed(*line, msg))?;

            Ok(ExperimentRecord {
                user_id: parse_field(table, *line, record, user_col, columns::USER_ID)?,
                experiment_id: parse_field(
                    table,
                    *line,
                    record,
                    experiment_col,
                    columns::EXPERIMENT_ID,
                )?,
                experiment_run_time: parse_field(
                    table,
                    *line,
                    record,
                    run_time_col,
                    columns::EXPERIMENT_RUN_TIME,
                )?,
                compound_ids,
            })
        })
        .collect()
}
