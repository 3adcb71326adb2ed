// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::RefCell;

use ledgerclip::db;
use ledgerclip::filter::{DeleteConfig, DeleteTarget, FilterConfig, RawFilter};
use ledgerclip::models::{Kind, NewTransaction, Transaction};
use ledgerclip::repository::{Repository, SqliteRepository};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use std::str::FromStr;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn seed(conn: &Connection, kind: &str, desc: &str, amount: &str, created_at: &str) {
    conn.execute(
        "INSERT INTO transactions(type, description, amount, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?4)",
        params![kind, desc, amount, created_at],
    )
    .unwrap();
}

fn seeded() -> Connection {
    let conn = setup();
    seed(&conn, "income", "Salary", "3000", "2024-01-01 09:00:00");
    seed(&conn, "expense", "Rent", "1200.00", "2024-01-03 10:00:00");
    seed(&conn, "expense", "Coffee", "4.50", "2024-01-15 08:30:00");
    seed(&conn, "expense", "Groceries", "85.20", "2024-02-02 18:00:00");
    seed(&conn, "income", "Refund 50%_off", "20", "2024-02-10 12:00:00");
    conn
}

fn filter(raw: RawFilter) -> FilterConfig {
    RawFilter {
        page: if raw.page == 0 { 1 } else { raw.page },
        limit: if raw.limit == 0 { 10 } else { raw.limit },
        ..raw
    }
    .validate()
    .unwrap()
}

fn ids(rows: &[Transaction]) -> Vec<i64> {
    rows.iter().map(|t| t.id).collect()
}

#[test]
fn create_then_list_round_trips() {
    let conn = setup();
    let repo = SqliteRepository::new(&conn);
    let amount = Decimal::from_str("12.50").unwrap();
    let id = repo
        .create(&NewTransaction::new(Kind::Expense, "Lunch", amount))
        .unwrap();
    assert_eq!(id, 1);

    let rows = repo.list(&FilterConfig::default()).unwrap();
    assert_eq!(rows.len(), 1);
    let tx = &rows[0];
    assert_eq!(tx.id, 1);
    assert_eq!(tx.kind, Kind::Expense);
    assert_eq!(tx.description, "Lunch");
    assert_eq!(tx.amount, amount);
    assert_eq!(tx.amount.to_string(), "12.50");
    assert_eq!(tx.created_at, tx.updated_at);
    assert_eq!(repo.count(&FilterConfig::default()).unwrap(), 1);
}

#[test]
fn schema_rejects_unknown_type() {
    let conn = setup();
    let res = conn.execute(
        "INSERT INTO transactions(type, description, amount) VALUES ('gift', 'x', '1')",
        [],
    );
    assert!(res.is_err());
}

#[test]
fn filters_by_kind_date_and_amount() {
    let conn = seeded();
    let repo = SqliteRepository::new(&conn);

    let config = filter(RawFilter {
        kind: Some("expense".into()),
        date: Some("2024-01-01:2024-01-31".into()),
        sort: Some("amt".into()),
        ..Default::default()
    });
    let rows = repo.list(&config).unwrap();
    assert_eq!(ids(&rows), vec![2, 3]);
    assert_eq!(repo.count(&config).unwrap(), 2);

    // numeric, not lexical, comparison: "85.20" < "1200.00"
    let config = filter(RawFilter {
        amount: Some("50:1000".into()),
        ..Default::default()
    });
    assert_eq!(ids(&repo.list(&config).unwrap()), vec![4]);

    let config = filter(RawFilter {
        amount: Some(":20".into()),
        sort: Some("amt".into()),
        ascending: true,
        ..Default::default()
    });
    assert_eq!(ids(&repo.list(&config).unwrap()), vec![3, 5]);

    let config = filter(RawFilter {
        date: Some("2024-02-02".into()),
        ..Default::default()
    });
    assert_eq!(ids(&repo.list(&config).unwrap()), vec![4]);

    let config = filter(RawFilter {
        date: Some("2024/2/1:".into()),
        sort: Some("date".into()),
        ascending: true,
        ..Default::default()
    });
    assert_eq!(ids(&repo.list(&config).unwrap()), vec![4, 5]);
}

#[test]
fn description_matches_literal_substring() {
    let conn = seeded();
    let repo = SqliteRepository::new(&conn);
    let config = filter(RawFilter {
        description: Some("%_".into()),
        ..Default::default()
    });
    assert_eq!(ids(&repo.list(&config).unwrap()), vec![5]);

    let config = filter(RawFilter {
        description: Some("re".into()),
        ..Default::default()
    });
    // LIKE is case-insensitive for ASCII
    assert_eq!(ids(&repo.list(&config).unwrap()), vec![2, 5]);
}

#[test]
fn pagination_walks_sorted_rows() {
    let conn = seeded();
    let repo = SqliteRepository::new(&conn);
    let page = |n: i64| {
        filter(RawFilter {
            sort: Some("date".into()),
            ascending: true,
            page: n,
            limit: 2,
            ..Default::default()
        })
    };
    assert_eq!(ids(&repo.list(&page(1)).unwrap()), vec![1, 2]);
    assert_eq!(ids(&repo.list(&page(2)).unwrap()), vec![3, 4]);
    assert_eq!(ids(&repo.list(&page(3)).unwrap()), vec![5]);
    assert!(repo.list(&page(4)).unwrap().is_empty());
    assert_eq!(page(1).total_pages(repo.count(&page(1)).unwrap()), 3);

    let all = filter(RawFilter {
        limit: 2,
        all: true,
        ..Default::default()
    });
    assert_eq!(repo.list(&all).unwrap().len(), 5);
}

#[test]
fn equal_sort_keys_break_ties_by_id() {
    let conn = setup();
    for desc in ["a", "b", "c"] {
        seed(&conn, "expense", desc, "10", "2024-03-01 00:00:00");
    }
    let repo = SqliteRepository::new(&conn);
    let desc = filter(RawFilter {
        sort: Some("amt".into()),
        ..Default::default()
    });
    assert_eq!(ids(&repo.list(&desc).unwrap()), vec![3, 2, 1]);
    let asc = filter(RawFilter {
        sort: Some("date".into()),
        ascending: true,
        ..Default::default()
    });
    assert_eq!(ids(&repo.list(&asc).unwrap()), vec![1, 2, 3]);
}

#[test]
fn today_matches_rows_created_now() {
    let conn = seeded();
    let repo = SqliteRepository::new(&conn);
    repo.create(&NewTransaction::new(Kind::Income, "Bonus", Decimal::from(5)))
        .unwrap();
    let today = filter(RawFilter {
        date: Some("today".into()),
        ..Default::default()
    });
    assert_eq!(ids(&repo.list(&today).unwrap()), vec![6]);

    let year = filter(RawFilter {
        date: Some("thisyear".into()),
        ..Default::default()
    });
    assert_eq!(repo.count(&year).unwrap(), 1);
}

#[test]
fn projection_leaves_other_fields_default() {
    let conn = seeded();
    let repo = SqliteRepository::new(&conn);
    let config = filter(RawFilter {
        columns: vec!["id,amt".into()],
        sort: Some("date".into()),
        ascending: true,
        ..Default::default()
    });
    let rows = repo.list(&config).unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[1].id, 2);
    assert_eq!(rows[1].amount.to_string(), "1200.00");
    assert_eq!(rows[1].description, "");
    assert_eq!(rows[1].kind, Kind::default());
}

#[test]
fn delete_by_ids_ignores_missing() {
    let conn = seeded();
    let repo = SqliteRepository::new(&conn);
    let config = DeleteConfig::new(false, &["1,3".into(), "99".into()], false, false).unwrap();
    assert_eq!(config.target, DeleteTarget::Ids(vec![1, 3, 99]));
    assert_eq!(repo.delete(&config).unwrap(), 2);
    assert_eq!(repo.count(&FilterConfig::default()).unwrap(), 3);
}

#[test]
fn delete_all_resets_ids() {
    let conn = seeded();
    let repo = SqliteRepository::new(&conn);
    let config = DeleteConfig::new(true, &[], false, false).unwrap();
    assert_eq!(repo.delete(&config).unwrap(), 5);
    assert_eq!(repo.count(&FilterConfig::default()).unwrap(), 0);

    let id = repo
        .create(&NewTransaction::new(Kind::Income, "Fresh", Decimal::ONE))
        .unwrap();
    assert_eq!(id, 1);
}

#[test]
fn dry_run_never_touches_the_store() {
    // no schema: any executed statement would fail
    let conn = Connection::open_in_memory().unwrap();
    let repo = SqliteRepository::new(&conn);
    let config = FilterConfig {
        dry_run: true,
        ..FilterConfig::default()
    };
    assert!(repo.list(&config).unwrap().is_empty());
    assert_eq!(repo.count(&config).unwrap(), 0);

    let all = DeleteConfig::new(true, &[], true, false).unwrap();
    assert_eq!(repo.delete(&all).unwrap(), 0);
    let some = DeleteConfig::new(false, &["4".into()], true, false).unwrap();
    assert_eq!(repo.delete(&some).unwrap(), 0);
}

#[test]
fn verbose_echoes_compiled_queries() {
    let lines = RefCell::new(Vec::<String>::new());
    let conn = seeded();
    let repo = SqliteRepository::with_echo(&conn, |l| lines.borrow_mut().push(l.to_string()));

    let config = filter(RawFilter {
        kind: Some("income".into()),
        verbose: true,
        dry_run: true,
        ..Default::default()
    });
    repo.list(&config).unwrap();
    repo.count(&config).unwrap();
    repo.delete(&DeleteConfig::new(false, &["2".into()], true, true).unwrap())
        .unwrap();

    let lines = lines.borrow();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "SELECT => SELECT id, type, description, amount, created_at, updated_at FROM transactions \
         WHERE type = ? LIMIT ? OFFSET ? ['income', 10, 0]"
    );
    assert_eq!(
        lines[1],
        "COUNT => SELECT COUNT(*) FROM transactions WHERE type = ? ['income']"
    );
    assert_eq!(
        lines[2],
        "DELETE => DELETE FROM transactions WHERE id IN (?) [2]"
    );
    // dry run left the rows alone
    assert_eq!(repo.count(&FilterConfig::default()).unwrap(), 5);
}

#[test]
fn quiet_runs_do_not_echo() {
    let lines = RefCell::new(Vec::<String>::new());
    let conn = seeded();
    let repo = SqliteRepository::with_echo(&conn, |l| lines.borrow_mut().push(l.to_string()));
    repo.list(&FilterConfig::default()).unwrap();
    assert!(lines.borrow().is_empty());
}
