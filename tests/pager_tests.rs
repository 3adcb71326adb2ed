// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::RefCell;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ledgerclip::error::LedgerResult;
use ledgerclip::filter::{DeleteConfig, FilterConfig};
use ledgerclip::models::{Kind, NewTransaction, Transaction};
use ledgerclip::pager::{Nav, Pager, PagerState};
use ledgerclip::repository::Repository;
use rust_decimal::Decimal;

/// Serves `total` synthetic rows and records the pages it was asked for.
struct MockRepo {
    total: u64,
    fetched: RefCell<Vec<u32>>,
}

impl MockRepo {
    fn new(total: u64) -> Self {
        Self {
            total,
            fetched: RefCell::new(Vec::new()),
        }
    }
}

impl Repository for MockRepo {
    fn create(&self, _tx: &NewTransaction) -> LedgerResult<i64> {
        Ok(0)
    }

    fn list(&self, config: &FilterConfig) -> LedgerResult<Vec<Transaction>> {
        self.fetched.borrow_mut().push(config.page);
        if config.dry_run {
            return Ok(Vec::new());
        }
        let start = if config.all { 0 } else { config.offset() };
        let end = if config.all {
            self.total
        } else {
            (start + u64::from(config.limit)).min(self.total)
        };
        Ok((start..end)
            .map(|i| Transaction {
                id: i as i64 + 1,
                kind: Kind::Expense,
                description: format!("row {}", i + 1),
                amount: Decimal::from(10),
                ..Default::default()
            })
            .collect())
    }

    fn count(&self, config: &FilterConfig) -> LedgerResult<u64> {
        Ok(if config.dry_run { 0 } else { self.total })
    }

    fn delete(&self, _config: &DeleteConfig) -> LedgerResult<usize> {
        Ok(0)
    }
}

fn config(page: u32, limit: u32) -> FilterConfig {
    FilterConfig {
        page,
        limit,
        ..FilterConfig::default()
    }
}

#[test]
fn load_counts_rows_and_shows_first_page() {
    let repo = MockRepo::new(25);
    let mut pager = Pager::new(&repo, config(1, 10));
    assert_eq!(pager.state(), PagerState::Loading);
    assert_eq!(pager.load().unwrap(), PagerState::Displaying);
    assert_eq!(pager.total(), 25);
    assert_eq!(pager.total_pages(), 3);
    assert_eq!(pager.page(), 1);

    let view = pager.view().unwrap();
    assert!(view.contains("row 1"));
    assert!(view.contains("row 10"));
    assert!(!view.contains("row 11"));
    assert!(view.contains("Page: 1 of 3 | Results: 10 | Total: 25"));
    assert!(view.contains("● ○ ○"));
    assert!(view.contains("q: quit"));
}

#[test]
fn navigation_is_clamped() {
    let repo = MockRepo::new(25);
    let mut pager = Pager::new(&repo, config(1, 10));
    pager.load().unwrap();

    pager.handle(Nav::Previous);
    assert_eq!(pager.page(), 1);
    pager.handle(Nav::Next);
    pager.handle(Nav::Next);
    assert_eq!(pager.page(), 3);
    pager.handle(Nav::Next);
    assert_eq!(pager.page(), 3);
    assert!(pager
        .view()
        .unwrap()
        .contains("Page: 3 of 3 | Results: 5 | Total: 25"));
    assert_eq!(pager.indicator(), "○ ○ ●");

    pager.handle(Nav::First);
    assert_eq!(pager.page(), 1);
    pager.handle(Nav::Last);
    assert_eq!(pager.page(), 3);
}

#[test]
fn out_of_range_start_page_is_clamped() {
    let repo = MockRepo::new(25);
    let mut pager = Pager::new(&repo, config(9, 10));
    pager.load().unwrap();
    assert_eq!(pager.page(), 3);
}

#[test]
fn quit_terminates_and_ignores_further_keys() {
    let repo = MockRepo::new(25);
    let mut pager = Pager::new(&repo, config(1, 10));
    pager.load().unwrap();
    assert_eq!(pager.handle(Nav::Quit), PagerState::Terminated);
    assert_eq!(pager.handle(Nav::Next), PagerState::Terminated);
    assert_eq!(pager.page(), 1);
}

#[test]
fn keys_are_ignored_while_loading() {
    let repo = MockRepo::new(25);
    let mut pager = Pager::new(&repo, config(1, 10));
    assert_eq!(pager.handle(Nav::Next), PagerState::Loading);
    assert_eq!(pager.page(), 1);
}

#[test]
fn dry_run_terminates_after_load() {
    let repo = MockRepo::new(25);
    let cfg = FilterConfig {
        dry_run: true,
        ..config(1, 10)
    };
    let mut pager = Pager::new(&repo, cfg);
    assert_eq!(pager.load().unwrap(), PagerState::Terminated);
    assert!(repo.fetched.borrow().is_empty());
}

#[test]
fn empty_result_reports_zero_pages() {
    let repo = MockRepo::new(0);
    let mut pager = Pager::new(&repo, config(1, 10));
    pager.load().unwrap();
    assert_eq!(pager.total_pages(), 0);
    assert_eq!(pager.page(), 1);
    let view = pager.view().unwrap();
    assert!(view.contains("Page: 1 of 0 | Results: 0 | Total: 0"));
}

#[test]
fn all_override_is_a_single_page() {
    let repo = MockRepo::new(25);
    let cfg = FilterConfig {
        all: true,
        ..config(1, 10)
    };
    let mut pager = Pager::new(&repo, cfg);
    pager.load().unwrap();
    assert_eq!(pager.total_pages(), 1);
    pager.handle(Nav::Next);
    assert_eq!(pager.page(), 1);
    let view = pager.view().unwrap();
    assert!(view.contains("row 25"));
    assert!(view.contains("Page: 1 of 1 | Results: 25 | Total: 25"));
}

#[test]
fn indicator_is_hidden_for_many_pages() {
    let repo = MockRepo::new(51);
    let mut pager = Pager::new(&repo, config(1, 1));
    pager.load().unwrap();
    assert_eq!(pager.total_pages(), 51);
    let view = pager.view().unwrap();
    assert!(!view.contains('●'));
    assert!(view.contains("Page: 1 of 51"));

    let repo = MockRepo::new(50);
    let mut pager = Pager::new(&repo, config(1, 1));
    pager.load().unwrap();
    assert!(pager.view().unwrap().contains('●'));
}

#[test]
fn every_render_fetches_the_current_page() {
    let repo = MockRepo::new(25);
    let mut pager = Pager::new(&repo, config(1, 10));
    pager.load().unwrap();
    pager.view().unwrap();
    pager.handle(Nav::Next);
    pager.view().unwrap();
    pager.handle(Nav::Last);
    pager.view().unwrap();
    pager.view().unwrap();
    assert_eq!(*repo.fetched.borrow(), vec![1, 2, 3, 3]);
}

#[test]
fn keys_map_to_navigation() {
    let press = |code| KeyEvent::new(code, KeyModifiers::NONE);
    assert_eq!(Nav::from_key(&press(KeyCode::Char('l'))), Some(Nav::Next));
    assert_eq!(Nav::from_key(&press(KeyCode::Right)), Some(Nav::Next));
    assert_eq!(Nav::from_key(&press(KeyCode::Char('h'))), Some(Nav::Previous));
    assert_eq!(Nav::from_key(&press(KeyCode::Left)), Some(Nav::Previous));
    assert_eq!(Nav::from_key(&press(KeyCode::Char('g'))), Some(Nav::First));
    assert_eq!(Nav::from_key(&press(KeyCode::Char('G'))), Some(Nav::Last));
    assert_eq!(Nav::from_key(&press(KeyCode::Char('q'))), Some(Nav::Quit));
    assert_eq!(Nav::from_key(&press(KeyCode::Esc)), Some(Nav::Quit));
    assert_eq!(Nav::from_key(&press(KeyCode::Char('x'))), None);

    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(Nav::from_key(&ctrl_c), Some(Nav::Quit));
    let ctrl_l = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL);
    assert_eq!(Nav::from_key(&ctrl_l), None);

    let release = KeyEvent::new_with_kind(
        KeyCode::Char('l'),
        KeyModifiers::NONE,
        KeyEventKind::Release,
    );
    assert_eq!(Nav::from_key(&release), None);
}
