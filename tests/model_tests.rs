use chrono::NaiveDate;
use rclinic::core::document::{client_folders, document_key, template_key};
use rclinic::core::user::check_password;
use rclinic::errors::AppError;
use rclinic::models::document_type::{DocumentType, TemplateType};
use rclinic::models::money::Money;
use rclinic::models::period::Period;
use rclinic::models::session_status::SessionStatus;
use rclinic::utils::format_money;
use rclinic::utils::text::sort_key;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn money(s: &str) -> Money {
    Money::parse(s, "R$").unwrap()
}

#[test]
fn test_money_parse_accepts_local_formats() {
    assert_eq!(money("150"), Money::from_cents(15_000));
    assert_eq!(money("150.5"), Money::from_cents(15_050));
    assert_eq!(money("150,50"), Money::from_cents(15_050));
    assert_eq!(money("R$ 150,00"), Money::from_cents(15_000));
    assert_eq!(money("R$150"), Money::from_cents(15_000));
}

#[test]
fn test_money_parse_reads_back_formatted_amounts() {
    let amount = Money::from_cents(123_450);
    assert_eq!(money(&format_money(amount, "R$")), amount);
    assert_eq!(money("1.234,50"), amount);
    assert_eq!(money("1,234,567.00"), Money::from_cents(123_456_700));
    assert_eq!(Money::parse("€ 12,00", "€").unwrap(), Money::from_cents(1_200));
}

#[test]
fn test_money_parse_rejects_negative_and_garbage() {
    let rejected = [
        "-10", "abc", "abc5", "Rs5", "USD 12", ".", ",", "", "1.234", "12,34,5.00", "1,2.50",
        "R$ -5", "5 R$",
    ];
    for input in rejected {
        assert!(
            matches!(Money::parse(input, "R$"), Err(AppError::InvalidAmount(_))),
            "{input:?} should be rejected"
        );
    }

    // a symbol other than the configured one is not stripped
    assert!(Money::parse("€ 12", "R$").is_err());
}

#[test]
fn test_sort_key_drops_every_combining_mark() {
    assert_eq!(sort_key("Åsa"), "asa");
    assert_eq!(sort_key("Ýara"), "yara");
    assert_eq!(sort_key("Ștefan Dvořák"), "stefan dvorak");
    assert_eq!(sort_key("JOÃO"), "joao");
}

#[test]
fn test_money_db_roundtrip_rounds_to_cents() {
    assert_eq!(Money::from_db(0.1 + 0.2), Money::from_cents(30));
    assert_eq!(Money::from_cents(12_345).to_db(), 123.45);
}

#[test]
fn test_format_money_groups_thousands() {
    assert_eq!(format_money(Money::from_cents(123_450), "R$"), "R$ 1,234.50");
    assert_eq!(format_money(Money::from_cents(5), ""), "0.05");
}

#[test]
fn test_period_parse_shapes() {
    assert_eq!(Period::parse("all").unwrap(), Period::All);
    assert_eq!(Period::parse("2025").unwrap(), Period::Year(2025));
    assert_eq!(
        Period::parse("2025-02").unwrap(),
        Period::Month {
            year: 2025,
            month: 2
        }
    );
    assert_eq!(
        Period::parse("2025-02-10").unwrap(),
        Period::Range(d("2025-02-10"), d("2025-02-10"))
    );
    assert_eq!(
        Period::parse("2025-01:2025-03").unwrap(),
        Period::Range(d("2025-01-01"), d("2025-03-31"))
    );
}

#[test]
fn test_period_parse_errors() {
    assert!(matches!(
        Period::parse("2025-13"),
        Err(AppError::InvalidPeriod(_))
    ));
    assert!(matches!(
        Period::parse("2025:2025-03"),
        Err(AppError::InvalidPeriod(_))
    ));
    assert!(matches!(
        Period::parse("2025-03-10:2025-03-01"),
        Err(AppError::InvalidRange { .. })
    ));
}

#[test]
fn test_period_month_bounds_handle_leap_years() {
    let (start, end) = Period::parse("2024-02").unwrap().bounds().unwrap();
    assert_eq!(start, d("2024-02-01"));
    assert_eq!(end, d("2024-02-29"));
    assert!(Period::All.bounds().is_none());
}

#[test]
fn test_legacy_cancelled_status_reads_as_missed() {
    assert_eq!(
        SessionStatus::from_db_str("cancelada"),
        Some(SessionStatus::Missed)
    );
    assert_eq!(SessionStatus::Missed.to_db_str(), "falta");
}

#[test]
fn test_password_rules_reported_together() {
    match check_password("abc") {
        Err(AppError::WeakPassword(problems)) => {
            assert_eq!(problems.len(), 4);
            assert!(problems.iter().any(|p| p.contains("8 characters")));
            assert!(problems.iter().any(|p| p.contains("uppercase")));
            assert!(problems.iter().any(|p| p.contains("digit")));
            assert!(problems.iter().any(|p| p.contains("special")));
        }
        other => panic!("expected WeakPassword, got {:?}", other),
    }

    assert!(check_password("Senha@123").is_ok());
}

#[test]
fn test_document_keys() {
    assert_eq!(
        document_key("", "João Silva", DocumentType::Reports, " laudo final ").unwrap(),
        "João Silva/Laudos/Laudos_laudo_final.pdf"
    );
    assert_eq!(
        document_key("clinica", "Ana", DocumentType::Invoices, "março.pdf").unwrap(),
        "clinica/Ana/Notas Fiscais/Notas Fiscais_março.pdf"
    );
    assert_eq!(
        template_key("", TemplateType::Contracts, "padrão 2025").unwrap(),
        "modelos/Contratos/Contratos_padrão_2025.pdf"
    );
    assert!(document_key("", "Ana", DocumentType::Contract, "   ").is_err());
}

#[test]
fn test_client_folders_cover_every_type() {
    let folders = client_folders("", "Ana");
    assert_eq!(folders.len(), DocumentType::ALL.len());
    assert!(folders.contains(&"Ana/Questionários/".to_string()));
    assert!(folders.contains(&"Ana/Testes Corrigidos/".to_string()));
}
