//! Tabular I/O through polars: CSV or Parquet, chosen by file extension.

use std::fs::{self, File};
use std::path::Path;

use anyhow::{bail, Context, Result};
use polars::prelude::*;

fn is_parquet(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"))
}

/// Read the named columns as `f64`; nulls become NaN.
pub fn read_f64_columns(path: &Path, names: &[&str]) -> Result<Vec<Vec<f64>>> {
    let lf = if is_parquet(path) {
        LazyFrame::scan_parquet(path, ScanArgsParquet::default())?
    } else {
        LazyCsvReader::new(path)
            .with_infer_schema_length(Some(100))
            .finish()?
    };
    let exprs: Vec<Expr> = names
        .iter()
        .map(|n| col(*n).cast(DataType::Float64))
        .collect();
    let df = lf
        .select(exprs)
        .collect()
        .with_context(|| format!("reading columns {names:?} from {}", path.display()))?;
    tracing::info!(rows = df.height(), cols = df.width(), input = %path.display(), "input_shape");

    let mut out = Vec::with_capacity(names.len());
    for n in names {
        let ca = df.column(n)?.f64()?;
        out.push(ca.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect());
    }
    Ok(out)
}

/// Write `df` to `path`, creating parent directories.
pub fn write_frame(df: &mut DataFrame, path: &Path) -> Result<()> {
    if df.height() == 0 {
        bail!("refusing to write an empty table to {}", path.display());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    if is_parquet(path) {
        ParquetWriter::new(file).finish(df)?;
    } else {
        let mut file = file;
        CsvWriter::new(&mut file).finish(df)?;
    }
    tracing::info!(rows = df.height(), out = %path.display(), "wrote_table");
    Ok(())
}
