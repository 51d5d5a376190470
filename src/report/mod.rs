//! Reporting consumers built on the row sink.
//!
//! [`employees`] and [`events`] map rows of the access control database's
//! `pList.DB` and `pLogData.db` onto typed records. [`last_seen`] joins the
//! two into the last-seen employees report.

pub mod employees;
pub mod events;
pub mod last_seen;
