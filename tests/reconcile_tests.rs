use chrono::{NaiveDate, NaiveTime};
use rclinic::core::calculator::billing::{Classification, classify, is_billable, is_pending};
use rclinic::core::calculator::client_summary::build_client_summaries;
use rclinic::core::calculator::pending::build_pending_report;
use rclinic::core::calculator::totals::Totals;
use rclinic::errors::AppError;
use rclinic::models::client::Client;
use rclinic::models::money::Money;
use rclinic::models::scheduling_day::SchedulingDay;
use rclinic::models::session::Session;
use rclinic::models::session_status::SessionStatus;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn session(
    client_id: i64,
    date: &str,
    cents: i64,
    status: SessionStatus,
    chargeable: bool,
    paid: bool,
) -> Session {
    let mut s = Session::new(
        client_id,
        d(date),
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        Money::from_cents(cents),
        status,
    );
    s.chargeable_if_missed = chargeable;
    s.paid = paid;
    s
}

fn client(id: i64, name: &str) -> Client {
    Client {
        id,
        name: name.to_string(),
        session_price: Money::from_cents(10_000),
        clinician_id: Some(1),
        scheduling_day: SchedulingDay::Undefined,
    }
}

/// realized+paid, realized unpaid, missed chargeable, missed not chargeable
fn mixed_month(client_id: i64) -> Vec<Session> {
    vec![
        session(client_id, "2025-03-03", 10_000, SessionStatus::Realized, false, true),
        session(client_id, "2025-03-10", 10_000, SessionStatus::Realized, false, false),
        session(client_id, "2025-03-17", 5_000, SessionStatus::Missed, true, false),
        session(client_id, "2025-03-24", 5_000, SessionStatus::Missed, false, false),
    ]
}

#[test]
fn test_mixed_sessions_totals() {
    let t = Totals::from_sessions(&mixed_month(1));

    assert_eq!(t.total_received, Money::from_cents(10_000));
    assert_eq!(t.total_pending, Money::from_cents(15_000));
    assert_eq!(t.total_billable, Money::from_cents(25_000));
    assert_eq!(t.sessions_done, 2);
    assert_eq!(t.sessions_missed, 2);
    assert_eq!(t.realized_pending, 1);
    assert_eq!(t.missed_chargeable_pending, 1);
    assert_eq!(t.pending_items(), 2);
}

#[test]
fn test_realized_paid_is_never_pending() {
    let s = session(1, "2025-01-02", 12_345, SessionStatus::Realized, false, true);
    let t = Totals::from_sessions([&s]);

    assert_eq!(classify(&s), Classification::Paid);
    assert_eq!(t.total_received, Money::from_cents(12_345));
    assert!(t.total_pending.is_zero());
}

#[test]
fn test_missed_not_chargeable_excluded_unless_paid() {
    let unpaid = session(1, "2025-01-02", 5_000, SessionStatus::Missed, false, false);
    assert!(!is_billable(&unpaid));
    assert_eq!(classify(&unpaid), Classification::NotBillable);

    let t = Totals::from_sessions([&unpaid]);
    assert!(t.total_received.is_zero());
    assert!(t.total_pending.is_zero());

    // a payment is received even when the session was not billable
    let paid = session(1, "2025-01-03", 5_000, SessionStatus::Missed, false, true);
    let t = Totals::from_sessions([&paid]);
    assert_eq!(t.total_received, Money::from_cents(5_000));
    assert!(t.total_pending.is_zero());
}

#[test]
fn test_realized_unpaid_is_pending() {
    let s = session(1, "2025-01-02", 8_000, SessionStatus::Realized, false, false);
    assert!(is_pending(&s));
    assert_eq!(classify(&s), Classification::Pending);
}

#[test]
fn test_billable_split_into_received_and_pending() {
    let sessions = mixed_month(1);
    let billable: Vec<&Session> = sessions.iter().filter(|s| is_billable(s)).collect();

    let t = Totals::from_sessions(billable.iter().copied());
    let sum: Money = billable.iter().map(|s| s.amount).sum();

    assert_eq!(t.total_received + t.total_pending, sum);
    assert_eq!(t.total_billable, sum);
}

#[test]
fn test_aggregation_is_idempotent() {
    let sessions = mixed_month(1);
    let clients = vec![client(1, "Ana")];

    assert_eq!(
        Totals::from_sessions(&sessions),
        Totals::from_sessions(&sessions)
    );
    assert_eq!(
        build_client_summaries(&clients, &sessions),
        build_client_summaries(&clients, &sessions)
    );
}

#[test]
fn test_client_summaries_include_idle_clients_sorted_by_name() {
    let clients = vec![client(1, "Óscar"), client(2, "beatriz"), client(3, "Ana")];
    let sessions = mixed_month(1);

    let rows = build_client_summaries(&clients, &sessions);
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();

    assert_eq!(names, vec!["Ana", "beatriz", "Óscar"]);
    assert_eq!(rows[0].totals, Totals::default());
    assert_eq!(rows[2].totals.total_pending, Money::from_cents(15_000));
}

#[test]
fn test_client_summaries_sort_any_accented_name() {
    let clients = vec![
        client(1, "Zé"),
        client(2, "Ýara"),
        client(3, "Åsa"),
        client(4, "Bruno"),
        client(5, "Łucja"),
        client(6, "Ștefan"),
    ];

    let rows = build_client_summaries(&clients, &[]);
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();

    // Ł has no decomposition and sorts after every ASCII letter
    assert_eq!(names, vec!["Åsa", "Bruno", "Ștefan", "Ýara", "Zé", "Łucja"]);
}

#[test]
fn test_pending_report_orders_by_amount_and_filters_range() {
    let clients = vec![client(1, "Ana"), client(2, "Bruno"), client(3, "Carla")];

    let mut sessions = mixed_month(1); // 150.00 pending
    sessions.push(session(2, "2025-03-05", 30_000, SessionStatus::Realized, false, false));
    sessions.push(session(3, "2025-03-05", 10_000, SessionStatus::Realized, false, true));
    // outside the range
    sessions.push(session(3, "2025-04-01", 10_000, SessionStatus::Realized, false, false));

    let report = build_pending_report(&clients, &sessions, d("2025-03-01"), d("2025-03-31")).unwrap();

    let names: Vec<&str> = report.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Bruno", "Ana"]);
    assert_eq!(report.total_pending, Money::from_cents(45_000));
    assert_eq!(report.total_items, 3);
}

#[test]
fn test_pending_report_rejects_inverted_range() {
    let err = build_pending_report(&[], &[], d("2025-03-31"), d("2025-03-01")).unwrap_err();
    assert!(matches!(err, AppError::InvalidRange { .. }));
}
