// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::filter::{FilterConfig, RawFilter};
use crate::pager::{self, Pager};
use crate::render::{self, OutputFormat};
use crate::repository::{Repository, SqliteRepository};
use crate::utils::date_help;
use anyhow::Result;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
pub struct ListOutput {
    pub format: OutputFormat,
    pub pretty: bool,
    pub human_time: bool,
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    if sub.get_flag("date_help") {
        println!("{}", date_help());
        return Ok(());
    }
    let config = raw_filter(sub).validate()?;
    tracing::debug!(?config, "list filter");

    let repo = SqliteRepository::new(conn);
    let human_time = sub.get_flag("htime");
    if sub.get_flag("interactive") {
        let mut pager = Pager::new(&repo, config).with_human_time(human_time);
        return pager::run(&mut pager);
    }

    let output = ListOutput {
        format: sub
            .get_one::<String>("format")
            .map(|s| s.parse::<OutputFormat>())
            .transpose()?
            .unwrap_or(OutputFormat::Table),
        pretty: sub.get_flag("pretty"),
        human_time,
    };
    let text = render_list(&repo, &config, output)?;
    if !text.is_empty() {
        println!("{}", text);
    }
    Ok(())
}

pub fn raw_filter(sub: &clap::ArgMatches) -> RawFilter {
    let text = |name: &str| sub.get_one::<String>(name).cloned();
    RawFilter {
        kind: text("type"),
        date: text("date"),
        amount: text("amount"),
        description: text("desc"),
        sort: text("sort"),
        ascending: sub.get_flag("asc"),
        page: sub.get_one::<i64>("page").copied().unwrap_or(1),
        limit: sub
            .get_one::<i64>("limit")
            .copied()
            .unwrap_or(i64::from(crate::filter::DEFAULT_LIMIT)),
        all: sub.get_flag("all"),
        columns: sub
            .get_many::<String>("columns")
            .map(|v| v.cloned().collect())
            .unwrap_or_default(),
        dry_run: sub.get_flag("dry"),
        verbose: sub.get_flag("verbose"),
    }
}

/// One-shot rendering of every row the filter selects. A dry run renders
/// nothing.
pub fn render_list<R: Repository + ?Sized>(
    repo: &R,
    config: &FilterConfig,
    output: ListOutput,
) -> Result<String> {
    let rows = repo.list(config)?;
    let total = repo.count(config)?;
    if config.dry_run {
        return Ok(String::new());
    }
    let text = match output.format {
        OutputFormat::Json => render::to_json(&rows, &config.columns, output.pretty)?,
        OutputFormat::Csv => {
            let mut buf = Vec::new();
            render::write_csv(&mut buf, &rows)?;
            String::from_utf8(buf)?.trim_end().to_string()
        }
        OutputFormat::Table => {
            let table = render::table(&rows, &config.display_columns(), output.human_time);
            let summary = render::summary(
                config.page,
                config.total_pages(total),
                rows.len(),
                total,
            );
            format!("{}\n{}", table, summary)
        }
    };
    Ok(text)
}
