mod common;

use chrono::NaiveDate;
use common::setup_store;
use finance_core::core::Dashboard;
use finance_core::domain::{
    CategoryFilter, FilterState, InvestmentType, InvestmentUpdate, MonthFilter, NewInvestment,
    NewTransaction, TransactionKind, UserId,
};
use finance_core::session::Session;
use finance_core::store::DocumentStore;
use finance_core::FinanceError;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn cdb(amount: f64) -> NewInvestment {
    NewInvestment {
        name: "CDB Banco X".into(),
        initial_amount: amount,
        start_date: date(2025, 1, 10),
        return_rate: 0.12,
        investment_type: InvestmentType::Cdb,
        term_months: 12,
    }
}

#[test]
fn stored_transactions_derive_year_and_month() {
    let store = setup_store();
    let user = UserId::new("alice");
    let record = store
        .insert_transaction(
            &user,
            NewTransaction::expense("Rent", 1500.0, "Casa", date(2025, 12, 5)),
        )
        .expect("insert");
    assert_eq!((record.year, record.month), (2025, 12));
    assert!(record.created_at.is_some());
    assert!(!record.id.is_empty());
}

#[test]
fn invalid_drafts_are_rejected_before_writing() {
    let store = setup_store();
    let user = UserId::new("alice");
    let err = store
        .insert_transaction(
            &user,
            NewTransaction::expense("Rent", 0.0, "Casa", date(2025, 1, 1)),
        )
        .unwrap_err();
    assert!(matches!(err, FinanceError::Validation(_)));
    let err = store
        .insert_transaction(
            &user,
            NewTransaction::expense("Rent", 10.0, " ", date(2025, 1, 1)),
        )
        .unwrap_err();
    assert!(matches!(err, FinanceError::Validation(_)));
    assert!(store.all_transactions(&user).expect("read").is_empty());
}

#[test]
fn top_up_persists_the_summed_principal() {
    let store = setup_store();
    let user = UserId::new("bob");
    let stored = store.insert_investment(&user, cdb(1000.0)).expect("insert");

    let update = InvestmentUpdate::from_record(&stored).with_top_up(250.0);
    let updated = store
        .update_investment(&user, &stored.id, update)
        .expect("update");
    assert_eq!(updated.initial_amount, 1250.0);

    let reloaded = store.investments(&user).expect("read");
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].initial_amount, 1250.0);
    assert_eq!(reloaded[0].created_at, stored.created_at);
}

#[test]
fn updating_a_missing_investment_is_not_found() {
    let store = setup_store();
    let user = UserId::new("bob");
    let stored = store.insert_investment(&user, cdb(1000.0)).expect("insert");
    let err = store
        .update_investment(&user, "missing", InvestmentUpdate::from_record(&stored))
        .unwrap_err();
    assert!(matches!(err, FinanceError::NotFound(_)));
}

#[test]
fn deleted_transactions_disappear_from_the_dashboard() {
    let store = setup_store();
    let user = UserId::new("carol");
    let food = store
        .insert_transaction(
            &user,
            NewTransaction::expense("Market", 80.0, "Food", date(2025, 6, 2)),
        )
        .expect("insert");
    store
        .insert_transaction(
            &user,
            NewTransaction::income("Salary", 500.0, date(2025, 6, 1)),
        )
        .expect("insert");

    let session = Session::signed_in(user.clone());
    let filter = FilterState::new(2025, MonthFilter::Month(6), CategoryFilter::All);
    let mut dashboard = Dashboard::new(filter);
    dashboard.load_from(&store, &session).expect("load");
    assert_eq!(dashboard.summary().period.period_balance, 420.0);

    store
        .delete_transaction(&user, TransactionKind::Expense, &food.id)
        .expect("delete");
    dashboard.load_from(&store, &session).expect("reload");
    assert_eq!(dashboard.summary().period.period_balance, 500.0);
    assert_eq!(dashboard.categories(), vec!["all"]);
}
