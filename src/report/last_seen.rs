//! Last-seen employees report.
//!
//! Joins the employee list with the access event log: for every employee,
//! the newest event whose owner is that employee gives the time the
//! employee was last seen at a door.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

use crate::paradox::table::{DecodeOptions, Table};
use crate::report::employees::{Employee, EmployeesTable, EMPLOYEES_TABLE};
use crate::report::events::{Event, EventsTable, EVENTS_TABLE};
use crate::util::fs::find_table_file;
use crate::PxError;

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastSeenEmployee {
    #[serde(rename = "TabNum")]
    pub tab_num: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Time")]
    pub time: DateTime<Utc>,
}

/// Join employees with events.
///
/// `employees` and `events` are taken in the order given; the first event
/// whose owner matches an employee's id wins, so events should already be
/// sorted newest first. Employees without any event are left out.
pub fn last_seen(employees: &[Employee], events: &[Event]) -> Vec<LastSeenEmployee> {
    employees
        .iter()
        .filter_map(|emp| {
            events
                .iter()
                .find(|ev| ev.owner == emp.id)
                .map(|ev| LastSeenEmployee {
                    tab_num: emp.tab_number,
                    name: emp.full_name(),
                    time: ev.time,
                })
        })
        .collect()
}

/// Read `pList.DB` and `pLogData.db` from `dir` and build the report.
///
/// Employees are ordered by surname. Only events with `event_code` count.
/// Timestamps are shifted by `opts.fix_hour`.
pub fn build_report(
    dir: &Path,
    opts: &DecodeOptions,
    event_code: i64,
) -> Result<Vec<LastSeenEmployee>, PxError> {
    let employees_path = find_table_file(dir, EMPLOYEES_TABLE)?;
    let mut employees = EmployeesTable::default();
    let summary = Table::open(&employees_path)?.read_rows(&mut employees, opts)?;
    tracing::debug!(
        path = %employees_path.display(),
        rows = summary.rows,
        skipped_blocks = summary.skipped_blocks,
        "employees loaded"
    );
    employees.sort();

    let events_path = find_table_file(dir, EVENTS_TABLE)?;
    let mut events = EventsTable::with_event_code(event_code);
    let summary = Table::open(&events_path)?.read_rows(&mut events, opts)?;
    tracing::debug!(
        path = %events_path.display(),
        rows = summary.rows,
        kept = events.events.len(),
        filtered = events.filtered,
        "events loaded"
    );
    events.sort();

    let report = last_seen(&employees.employees, &events.events);
    tracing::info!(
        employees = employees.employees.len(),
        events = events.events.len(),
        seen = report.len(),
        "last-seen report built"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: i64, tab: i64, name: &str) -> Employee {
        Employee {
            id,
            tab_number: tab,
            name: name.to_string(),
            first_name: "I".to_string(),
            mid_name: "P".to_string(),
            ..Employee::default()
        }
    }

    fn event(owner: i64, secs: i64) -> Event {
        let t = DateTime::from_timestamp(secs, 0).unwrap();
        Event {
            num: 0,
            time: t,
            door_index: 0,
            owner,
            section_index: 0,
            reader_index: 0,
            loop_index: 0,
            access_zone_index: 0,
            event_code: 28,
            key_index: 0,
            remark: String::new(),
            net_prz: 0,
            adc: 0,
            mode: 0,
            device_time: t,
            sign: 0,
        }
    }

    #[test]
    fn test_first_matching_event_wins() {
        let employees = vec![employee(1, 101, "Abramov"), employee(2, 102, "Borisov")];
        let events = vec![event(2, 300), event(1, 200), event(1, 100)];

        let report = last_seen(&employees, &events);
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].tab_num, 101);
        assert_eq!(report[0].name, "AbramovIP");
        assert_eq!(report[0].time.timestamp(), 200);
        assert_eq!(report[1].tab_num, 102);
        assert_eq!(report[1].time.timestamp(), 300);
    }

    #[test]
    fn test_employee_without_events_omitted() {
        let employees = vec![employee(1, 101, "A"), employee(9, 109, "Z")];
        let report = last_seen(&employees, &[event(1, 5)]);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].tab_num, 101);
    }

    #[test]
    fn test_json_keys() {
        let item = LastSeenEmployee {
            tab_num: 42,
            name: "IvanovIvanIvanovich".to_string(),
            time: DateTime::from_timestamp(1_600_000_000, 0).unwrap(),
        };
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(
            json,
            r#"{"TabNum":42,"Name":"IvanovIvanIvanovich","Time":"2020-09-13T12:26:40Z"}"#
        );
    }
}
