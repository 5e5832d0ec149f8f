use polars::prelude::*;
use rayon::prelude::*;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument};

use crate::domain::DTError;
use crate::record::{Record, Value};

/// Cell text used for null values.
pub const NULL_CELL: &str = "\u{2205}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    CSV,
    PARQUET,
    ARROW,
}

#[derive(Debug)]
pub struct FileInfo {
    pub path: PathBuf,
    pub file_size: u64,
    pub file_type: FileType,
}

struct LoadedColumn {
    name: String,
    values: Vec<Value>,
}

pub fn detect_file_type(path: &Path) -> Result<FileType, DTError> {
    match path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_uppercase())
        .as_deref()
    {
        Some("CSV") => Ok(FileType::CSV),
        Some("PARQUET") | Some("PQ") => Ok(FileType::PARQUET),
        Some("ARROW") | Some("IPC") | Some("FEATHER") => Ok(FileType::ARROW),
        _ => Err(DTError::UnknownFileType),
    }
}

pub fn get_file_info(path: PathBuf) -> Result<FileInfo, DTError> {
    let metadata = fs::metadata(&path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DTError::FileNotFound,
        ErrorKind::PermissionDenied => DTError::PermissionDenied,
        _ => DTError::IoError(e),
    })?;
    if !metadata.is_file() {
        return Err(DTError::LoadingFailed("Not a file!".into()));
    }

    let file_type = detect_file_type(&path)?;

    Ok(FileInfo {
        path,
        file_size: metadata.len(),
        file_type,
    })
}

fn is_numeric_type(dtype: &DataType) -> bool {
    dtype.is_primitive_numeric()
}

fn load_column(df: &DataFrame, col_name: &str) -> Result<LoadedColumn, PolarsError> {
    let column = df.column(col_name)?;
    let values = if is_numeric_type(column.dtype()) {
        let col = column.cast(&DataType::Float64)?;
        col.f64()?
            .into_iter()
            .map(|value| match value {
                Some(n) => Value::Number(n),
                None => Value::from(NULL_CELL),
            })
            .collect()
    } else {
        let col = column.cast(&DataType::String)?;
        col.str()?
            .into_iter()
            .map(|value| match value {
                Some(s) => Value::from(s),
                None => Value::from(NULL_CELL),
            })
            .collect()
    };

    Ok(LoadedColumn {
        name: col_name.to_string(),
        values,
    })
}

fn load_csv(path: &Path) -> Result<LazyFrame, PolarsError> {
    LazyCsvReader::new(PlPath::Local(path.into()))
        .with_has_header(true)
        .finish()
}

fn load_parquet(path: &Path) -> Result<LazyFrame, PolarsError> {
    LazyFrame::scan_parquet(PlPath::Local(path.into()), ScanArgsParquet::default())
}

fn load_arrow(path: &Path) -> Result<LazyFrame, PolarsError> {
    LazyFrame::scan_ipc(
        PlPath::Local(path.into()),
        polars::io::ipc::IpcScanOptions,
        UnifiedScanArgs::default(),
    )
}

/// Turns a data frame into records, one per row, with fields in column order.
///
/// Numeric columns become [`Value::Number`], all others [`Value::Text`].
/// Columns are converted in parallel.
pub fn frame_to_records(df: &DataFrame) -> Result<Vec<Record>, DTError> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let columns = names
        .par_iter()
        .map(|name| load_column(df, name))
        .collect::<Result<Vec<LoadedColumn>, PolarsError>>()?;

    let records = (0..df.height())
        .map(|row| {
            columns
                .iter()
                .map(|c| (c.name.clone(), c.values[row].clone()))
                .collect::<Record>()
        })
        .collect();
    Ok(records)
}

/// Loads a CSV, Parquet or Arrow IPC file as records.
#[instrument]
pub fn load_records(path: PathBuf) -> Result<Vec<Record>, DTError> {
    let file_info = get_file_info(path)?;
    debug!("Loading {:?}", file_info);
    let frame = match file_info.file_type {
        FileType::CSV => load_csv(&file_info.path)?,
        FileType::PARQUET => load_parquet(&file_info.path)?,
        FileType::ARROW => load_arrow(&file_info.path)?,
    };

    let start_time = Instant::now();
    let df = frame.collect()?;
    let records = frame_to_records(&df)?;
    let data_loading_duration = start_time.elapsed().as_millis();
    info!(
        "Loaded {} records with {} columns from {} bytes in {data_loading_duration}ms",
        records.len(),
        df.width(),
        file_info.file_size
    );
    Ok(records)
}
