//! Performance benchmarks for the Payroll Engine.
//!
//! Covers:
//! - One pay slip computed directly
//! - One pay slip through the HTTP router
//! - Payroll batches of 100 and 1000 employees
//! - Attendance summaries for growing record counts
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;

use payroll_engine::api::{create_router, AppState};
use payroll_engine::calculation::{
    calculate_payroll, calculate_payroll_batch, summarize_attendance, FixedTipPool,
    PayrollBatchEntry, PayrollContext,
};
use payroll_engine::config::ConfigLoader;
use payroll_engine::models::{AttendanceAggregate, AttendanceRecord, EmployeeProfile, PayPeriod};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const POSITIONS: [&str; 4] = ["Dive Master", "Driver", "Accountant", "Senior Diving Instructor"];
const RELIGIONS: [&str; 4] = ["islam", "katolik", "hindu", "kristen"];

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config").expect("Failed to load config")
}

fn fixed_tips() -> FixedTipPool {
    FixedTipPool::new(Decimal::from(15_000_000), 20)
}

fn employee_json(i: usize) -> serde_json::Value {
    serde_json::json!({
        "id": format!("emp_bench_{:04}", i),
        "name": format!("Bench Employee {}", i),
        "position": POSITIONS[i % POSITIONS.len()],
        "department": "Operations",
        "base_salary": (15_000 + (i % 20) * 500).to_string(),
        "is_management": i % 10 == 0,
        "religion": RELIGIONS[i % RELIGIONS.len()],
        "sss_number": "34-1234567-8",
        "phil_health_number": "12-345678901-2",
        "pag_ibig_number": "1234-5678-9012",
        "allowances": { "transport": "1500", "meal": "1000" },
        "deductions": { "tax": "800" }
    })
}

fn create_entries(count: usize) -> Vec<PayrollBatchEntry> {
    (0..count)
        .map(|i| {
            let employee: EmployeeProfile = serde_json::from_value(employee_json(i)).unwrap();
            PayrollBatchEntry {
                employee,
                attendance: Some(AttendanceAggregate {
                    work_days: Some(Decimal::from(21)),
                    days_present: Some(Decimal::from(21 - (i % 4) as i64)),
                    overtime_hours: Some(Decimal::from((i % 6) as i64)),
                    expected_hours: Some(Decimal::from(168)),
                }),
            }
        })
        .collect()
}

/// Benchmark: one pay slip without the HTTP layer.
fn bench_single_pay_slip(c: &mut Criterion) {
    let loader = load_config();
    let tips = fixed_tips();
    let ctx = PayrollContext {
        config: loader.config(),
        holidays: loader.holidays(),
        tip_source: &tips,
    };
    let entry = create_entries(1).remove(0);

    c.bench_function("single_pay_slip", |b| {
        b.iter(|| {
            black_box(
                calculate_payroll(
                    black_box(&entry.employee),
                    "9/2025",
                    entry.attendance.as_ref(),
                    &ctx,
                )
                .unwrap(),
            )
        })
    });
}

/// Benchmark: one pay slip through the router, including JSON handling.
fn bench_calculate_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = AppState::with_tip_source(load_config(), Arc::new(fixed_tips()));
    let router = create_router(state);
    let body = serde_json::json!({
        "employee": employee_json(1),
        "period": "9/2025",
        "attendance": { "work_days": "21", "days_present": "19", "overtime_hours": "4" }
    })
    .to_string();

    c.bench_function("calculate_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/payroll/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: payroll batches of 100 and 1000 employees.
fn bench_batches(c: &mut Criterion) {
    let loader = load_config();
    let tips = fixed_tips();
    let ctx = PayrollContext {
        config: loader.config(),
        holidays: loader.holidays(),
        tip_source: &tips,
    };

    let mut group = c.benchmark_group("batch_processing");
    // Keep large batches from dominating the run
    group.sample_size(10);

    for count in [100usize, 1000].iter() {
        let entries = create_entries(*count);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("employees", count), &entries, |b, entries| {
            b.iter(|| black_box(calculate_payroll_batch(entries, "9/2025", &ctx).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark: attendance summaries over increasing numbers of daily records.
fn bench_attendance_summary(c: &mut Criterion) {
    let loader = load_config();
    let period = PayPeriod::parse("9/2025").unwrap();
    let start = NaiveDate::from_ymd_opt(2025, 8, 25).unwrap();

    let mut group = c.benchmark_group("attendance_summary");

    for days in [7usize, 31, 90].iter() {
        let records: Vec<AttendanceRecord> = (0..*days)
            .map(|i| {
                let date = start + Duration::days(i as i64);
                let time_in = date.and_hms_opt(9, (i % 30) as u32, 0).unwrap();
                let time_out = date.and_hms_opt(17 + (i % 3) as u32, 30, 0).unwrap();
                AttendanceRecord::from_clock("emp_bench_0001", date, Some(time_in), Some(time_out))
            })
            .collect();

        group.throughput(Throughput::Elements(*days as u64));
        group.bench_with_input(BenchmarkId::new("records", days), &records, |b, records| {
            b.iter(|| {
                black_box(summarize_attendance(records, &period, loader.holidays(), 1).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_pay_slip,
    bench_calculate_endpoint,
    bench_batches,
    bench_attendance_summary,
);
criterion_main!(benches);
