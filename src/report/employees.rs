//! Employee list consumer for `pList.DB`.

use serde::Serialize;

use crate::paradox::field_decode::Value;
use crate::paradox::sink::{RowReader, RowSink};
use crate::PxError;

/// File name of the employee table inside a database directory.
pub const EMPLOYEES_TABLE: &str = "pList.DB";

/// One row of the employee table, 20 fields in record order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub id: i64,
    pub tab_number: i64,
    /// Surname.
    pub name: String,
    pub first_name: String,
    pub mid_name: String,
    pub status: i64,
    pub work_phone: String,
    pub home_phone: String,
    pub picture: String,
    /// Date field; not decoded, always empty.
    pub birth_date: String,
    pub address: String,
    pub section: i64,
    pub post: String,
    pub schedule: i64,
    pub company: String,
    pub car: String,
    pub spack: i64,
    pub weight: i64,
    pub deviation: i64,
    pub config: i64,
}

impl Employee {
    /// Map one decoded row onto an employee.
    pub fn from_row(values: Vec<Value>) -> Result<Self, PxError> {
        let mut r = RowReader::new(EMPLOYEES_TABLE, values);
        Ok(Employee {
            id: r.int()?,
            tab_number: r.int()?,
            name: r.text()?,
            first_name: r.text()?,
            mid_name: r.text()?,
            status: r.int()?,
            work_phone: r.text()?,
            home_phone: r.text()?,
            picture: r.text()?,
            birth_date: r.text()?,
            address: r.text()?,
            section: r.int()?,
            post: r.text()?,
            schedule: r.int()?,
            company: r.text()?,
            car: r.text()?,
            spack: r.int()?,
            weight: r.int()?,
            deviation: r.int()?,
            config: r.int()?,
        })
    }

    /// Surname, first name and middle name joined as stored, without separators.
    pub fn full_name(&self) -> String {
        format!("{}{}{}", self.name, self.first_name, self.mid_name)
    }
}

/// Sink collecting every employee row.
#[derive(Debug, Default)]
pub struct EmployeesTable {
    pub employees: Vec<Employee>,
}

impl EmployeesTable {
    /// Sort by surname, ascending. Equal surnames keep table order.
    pub fn sort(&mut self) {
        self.employees.sort_by(|a, b| a.name.cmp(&b.name));
    }
}

impl RowSink for EmployeesTable {
    fn append_row(&mut self, values: Vec<Value>) -> Result<(), PxError> {
        self.employees.push(Employee::from_row(values)?);
        Ok(())
    }
}
