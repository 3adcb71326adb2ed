// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Interactive page-by-page browsing of a list query.
//!
//! [`Pager`] is the state machine: it owns its copy of the filter, counts the
//! matching rows once, and re-fetches the current page from the repository
//! every time it is rendered. [`run`] wires it to the terminal.

use std::io::{self, Stdout, Write};
use std::panic;

use anyhow::Result;
use crossterm::cursor::{Hide, MoveTo, MoveToNextLine, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};

use crate::error::LedgerResult;
use crate::filter::FilterConfig;
use crate::models::Transaction;
use crate::render;
use crate::repository::Repository;

/// Above this many pages the dot indicator is left out.
pub const INDICATOR_LIMIT: u32 = 50;

const KEY_HELP: &str = "h/l ←/→ page • g/G first/last • q: quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerState {
    Loading,
    Displaying,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Next,
    Previous,
    First,
    Last,
    Quit,
}

impl Nav {
    pub fn from_key(key: &KeyEvent) -> Option<Nav> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(key.code, KeyCode::Char('c')).then_some(Nav::Quit);
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Nav::Quit),
            KeyCode::Char('l') | KeyCode::Right => Some(Nav::Next),
            KeyCode::Char('h') | KeyCode::Left => Some(Nav::Previous),
            KeyCode::Char('g') | KeyCode::Home => Some(Nav::First),
            KeyCode::Char('G') | KeyCode::End => Some(Nav::Last),
            _ => None,
        }
    }
}

pub struct Pager<'r, R: Repository + ?Sized> {
    repo: &'r R,
    config: FilterConfig,
    human_time: bool,
    total: u64,
    total_pages: u32,
    state: PagerState,
}

impl<'r, R: Repository + ?Sized> Pager<'r, R> {
    pub fn new(repo: &'r R, config: FilterConfig) -> Self {
        Self {
            repo,
            config,
            human_time: false,
            total: 0,
            total_pages: 0,
            state: PagerState::Loading,
        }
    }

    pub fn with_human_time(mut self, on: bool) -> Self {
        self.human_time = on;
        self
    }

    pub fn state(&self) -> PagerState {
        self.state
    }

    pub fn page(&self) -> u32 {
        self.config.page
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Counts the matching rows. A dry run stops here.
    pub fn load(&mut self) -> LedgerResult<PagerState> {
        self.total = self.repo.count(&self.config)?;
        if self.config.dry_run {
            self.state = PagerState::Terminated;
            return Ok(self.state);
        }
        self.total_pages = self.config.total_pages(self.total);
        self.config.page = self.clamp(self.config.page);
        self.state = PagerState::Displaying;
        Ok(self.state)
    }

    fn clamp(&self, page: u32) -> u32 {
        page.clamp(1, self.total_pages.max(1))
    }

    pub fn handle(&mut self, nav: Nav) -> PagerState {
        if self.state != PagerState::Displaying {
            return self.state;
        }
        let page = self.config.page;
        match nav {
            Nav::Next => self.config.page = self.clamp(page.saturating_add(1)),
            Nav::Previous => self.config.page = self.clamp(page.saturating_sub(1)),
            Nav::First => self.config.page = 1,
            Nav::Last => self.config.page = self.clamp(self.total_pages),
            Nav::Quit => self.state = PagerState::Terminated,
        }
        self.state
    }

    pub fn fetch(&self) -> LedgerResult<Vec<Transaction>> {
        self.repo.list(&self.config)
    }

    pub fn indicator(&self) -> String {
        (1..=self.total_pages)
            .map(|p| if p == self.config.page { "●" } else { "○" })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Renders the current page: table, summary, indicator and key help.
    pub fn view(&self) -> LedgerResult<String> {
        let rows = self.fetch()?;
        let columns = self.config.display_columns();
        let mut out = render::table(&rows, &columns, self.human_time).to_string();
        out.push_str("\n\n");
        out.push_str(&render::summary(
            self.config.page,
            self.total_pages,
            rows.len(),
            self.total,
        ));
        if self.total_pages <= INDICATOR_LIMIT {
            out.push_str("\n  ");
            out.push_str(&self.indicator());
        }
        out.push_str("\n\n  ");
        out.push_str(KEY_HELP);
        out.push('\n');
        Ok(out)
    }
}

/// Runs the pager on the terminal until the user quits.
pub fn run<R: Repository + ?Sized>(pager: &mut Pager<'_, R>) -> Result<()> {
    if pager.state() == PagerState::Loading {
        pager.load()?;
    }
    if pager.state() == PagerState::Terminated {
        return Ok(());
    }
    // Per-page query echoes would be drawn over by the next frame.
    pager.config.verbose = false;

    let mut stdout = enter_screen()?;
    let result = event_loop(pager, &mut stdout);
    leave_screen(&mut stdout)?;
    result
}

fn event_loop<R: Repository + ?Sized>(pager: &mut Pager<'_, R>, out: &mut Stdout) -> Result<()> {
    while pager.state() == PagerState::Displaying {
        let view = pager.view()?;
        queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
        for line in view.lines() {
            queue!(out, Print(line), MoveToNextLine(1))?;
        }
        out.flush()?;

        loop {
            if let Event::Key(key) = event::read()? {
                if let Some(nav) = Nav::from_key(&key) {
                    tracing::trace!(?nav, page = pager.page(), "navigation");
                    pager.handle(nav);
                    break;
                }
            }
        }
    }
    Ok(())
}

fn enter_screen() -> Result<Stdout> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = leave_screen(&mut io::stdout());
        original_hook(info);
    }));
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    Ok(stdout)
}

fn leave_screen(out: &mut Stdout) -> Result<()> {
    disable_raw_mode()?;
    execute!(out, Show, LeaveAlternateScreen)?;
    Ok(())
}
