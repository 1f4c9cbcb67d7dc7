//! Payroll Engine
//!
//! This crate computes monthly pay slips: attendance-based proration,
//! overtime, holiday allowances, tip pool shares and Philippine statutory
//! deductions (SSS, PhilHealth, Pag-IBIG), with an audit trace for every
//! decision. A thin axum API exposes the calculation over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
