//! Access event log consumer for `pLogData.db`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::paradox::field_decode::Value;
use crate::paradox::sink::{RowReader, RowSink};
use crate::PxError;

/// File name of the event log table inside a database directory.
pub const EVENTS_TABLE: &str = "pLogData.db";

/// Event code of a granted pass through a door.
pub const EVENT_ACCESS_GRANTED: i64 = 28;

/// One row of the event log, 16 fields in record order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub num: i64,
    pub time: DateTime<Utc>,
    pub door_index: i64,
    /// Employee id of the key holder.
    pub owner: i64,
    pub section_index: i64,
    pub reader_index: i64,
    pub loop_index: i64,
    pub access_zone_index: i64,
    pub event_code: i64,
    pub key_index: i64,
    pub remark: String,
    pub net_prz: i64,
    pub adc: i64,
    pub mode: i64,
    pub device_time: DateTime<Utc>,
    pub sign: i64,
}

impl Event {
    /// Map one decoded row onto an event.
    pub fn from_row(values: Vec<Value>) -> Result<Self, PxError> {
        let mut r = RowReader::new(EVENTS_TABLE, values);
        Ok(Event {
            num: r.int()?,
            time: r.timestamp()?,
            door_index: r.int()?,
            owner: r.int()?,
            section_index: r.int()?,
            reader_index: r.int()?,
            loop_index: r.int()?,
            access_zone_index: r.int()?,
            event_code: r.int()?,
            key_index: r.int()?,
            remark: r.text()?,
            net_prz: r.int()?,
            adc: r.int()?,
            mode: r.int()?,
            device_time: r.timestamp()?,
            sign: r.int()?,
        })
    }
}

/// Sink keeping the events with one event code.
#[derive(Debug)]
pub struct EventsTable {
    event_code: i64,
    pub events: Vec<Event>,
    /// Rows decoded but dropped by the event code filter.
    pub filtered: u64,
}

impl Default for EventsTable {
    fn default() -> Self {
        Self::with_event_code(EVENT_ACCESS_GRANTED)
    }
}

impl EventsTable {
    /// Keep only events whose code equals `event_code`.
    pub fn with_event_code(event_code: i64) -> Self {
        EventsTable {
            event_code,
            events: Vec::new(),
            filtered: 0,
        }
    }

    /// Returns the event code this table keeps.
    pub fn event_code(&self) -> i64 {
        self.event_code
    }

    /// Sort newest first. Events with equal times keep table order.
    pub fn sort(&mut self) {
        self.events.sort_by(|a, b| b.time.cmp(&a.time));
    }
}

impl RowSink for EventsTable {
    fn append_row(&mut self, values: Vec<Value>) -> Result<(), PxError> {
        let event = Event::from_row(values)?;
        if event.event_code == self.event_code {
            self.events.push(event);
        } else {
            self.filtered += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_row(owner: i64, code: i64, secs: i64) -> Vec<Value> {
        let ts = Value::Timestamp(DateTime::from_timestamp(secs, 0).unwrap());
        let mut row = vec![Value::Int(1), ts.clone()];
        row.extend([2, owner, 0, 0, 0, 0, code, 0].map(Value::Int));
        row.push(Value::Text(String::new()));
        row.extend([0, 0, 0].map(Value::Int));
        row.push(ts);
        row.push(Value::Int(0));
        row
    }

    #[test]
    fn test_from_row() {
        let e = Event::from_row(event_row(5, 28, 1_600_000_000)).unwrap();
        assert_eq!(e.owner, 5);
        assert_eq!(e.event_code, 28);
        assert_eq!(e.time.timestamp(), 1_600_000_000);
        assert_eq!(e.door_index, 2);
    }

    #[test]
    fn test_filter_by_event_code() {
        let mut table = EventsTable::default();
        table.append_row(event_row(1, 28, 100)).unwrap();
        table.append_row(event_row(1, 29, 200)).unwrap();
        table.append_row(event_row(2, 28, 300)).unwrap();
        assert_eq!(table.events.len(), 2);
        assert_eq!(table.filtered, 1);

        let mut other = EventsTable::with_event_code(29);
        other.append_row(event_row(1, 29, 200)).unwrap();
        assert_eq!(other.events.len(), 1);
        assert_eq!(other.event_code(), 29);
    }

    #[test]
    fn test_sort_newest_first() {
        let mut table = EventsTable::default();
        for secs in [200, 100, 300] {
            table.append_row(event_row(1, 28, secs)).unwrap();
        }
        table.sort();
        let times: Vec<i64> = table.events.iter().map(|e| e.time.timestamp()).collect();
        assert_eq!(times, vec![300, 200, 100]);
    }

    #[test]
    fn test_wrong_kind_is_row_error() {
        let mut row = event_row(1, 28, 100);
        row[1] = Value::Int(0);
        match Event::from_row(row) {
            Err(PxError::Row(msg)) => assert!(msg.contains("position 1")),
            other => panic!("Expected Row error, got {:?}", other),
        }
    }
}
