//! Row sink contract.
//!
//! The decoder hands every decoded record to a [`RowSink`], once per record
//! slot, in block-then-record order. It never reads anything back from the
//! sink and never filters rows: shaping, filtering and accumulation belong
//! to the sink.
//!
//! [`RowCollector`] keeps every row as-is, [`FnSink`] adapts a closure, and
//! [`RowReader`] helps a sink pull typed values out of a row by position.

use chrono::{DateTime, Utc};

use crate::paradox::field_decode::Value;
use crate::PxError;

/// Consumer of decoded rows.
pub trait RowSink {
    /// Accept one decoded record, one value per field in descriptor order.
    ///
    /// Returning an error stops the decode pass and surfaces the error to
    /// the caller of the decoder.
    fn append_row(&mut self, values: Vec<Value>) -> Result<(), PxError>;
}

/// Sink that stores every row unchanged.
#[derive(Debug, Default, Clone)]
pub struct RowCollector {
    pub rows: Vec<Vec<Value>>,
}

impl RowSink for RowCollector {
    fn append_row(&mut self, values: Vec<Value>) -> Result<(), PxError> {
        self.rows.push(values);
        Ok(())
    }
}

/// Sink backed by a closure.
///
/// # Examples
///
/// ```
/// use pxdb::paradox::field_decode::Value;
/// use pxdb::paradox::sink::{FnSink, RowSink};
///
/// let mut count = 0;
/// let mut sink = FnSink(|_row: Vec<Value>| {
///     count += 1;
///     Ok::<(), pxdb::PxError>(())
/// });
/// sink.append_row(vec![Value::Int(1)]).unwrap();
/// drop(sink);
/// assert_eq!(count, 1);
/// ```
pub struct FnSink<F>(pub F);

impl<F> RowSink for FnSink<F>
where
    F: FnMut(Vec<Value>) -> Result<(), PxError>,
{
    fn append_row(&mut self, values: Vec<Value>) -> Result<(), PxError> {
        (self.0)(values)
    }
}

/// Positional reader over one decoded row.
///
/// Each accessor takes the next value and checks its kind, so a sink can
/// map a row onto a struct field by field. A kind mismatch or a short row
/// is reported as [`PxError::Row`] naming the position and the table.
pub struct RowReader<'a> {
    table: &'a str,
    values: std::vec::IntoIter<Value>,
    position: usize,
}

impl<'a> RowReader<'a> {
    /// Read `values`; `table` names the row's table in error messages.
    pub fn new(table: &'a str, values: Vec<Value>) -> Self {
        RowReader {
            table,
            values: values.into_iter(),
            position: 0,
        }
    }

    fn take(&mut self, expected: &str) -> Result<Value, PxError> {
        let pos = self.position;
        self.position += 1;
        self.values.next().ok_or_else(|| {
            PxError::Row(format!(
                "{}: row has no value at position {} (expected {})",
                self.table, pos, expected
            ))
        })
    }

    fn mismatch(&self, expected: &str, got: &Value) -> PxError {
        PxError::Row(format!(
            "{}: value at position {} is {}, expected {}",
            self.table,
            self.position - 1,
            got.kind(),
            expected
        ))
    }

    /// Next value as an integer.
    pub fn int(&mut self) -> Result<i64, PxError> {
        let v = self.take("integer")?;
        v.as_int().ok_or_else(|| self.mismatch("integer", &v))
    }

    /// Next value as text. A date placeholder reads as an empty string.
    pub fn text(&mut self) -> Result<String, PxError> {
        match self.take("text")? {
            Value::Text(s) => Ok(s),
            Value::Date => Ok(String::new()),
            other => Err(self.mismatch("text", &other)),
        }
    }

    /// Next value as a timestamp.
    pub fn timestamp(&mut self) -> Result<DateTime<Utc>, PxError> {
        let v = self.take("timestamp")?;
        v.as_timestamp().ok_or_else(|| self.mismatch("timestamp", &v))
    }
}
