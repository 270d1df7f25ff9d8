//! Plain-text rendering of a year view: ledger table, category bar chart,
//! and monthly trend chart.
//!
//! Each surface renders independently; a failure in one must not stop the
//! others from being printed.

use kakeibo_core::{CategoryAggregate, Ledger, LedgerRecord, MonthlyAggregate};
use kakeibo_finance::YearView;
use std::fmt::Write;
use thiserror::Error;

const BAR_WIDTH: usize = 40;
const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("cannot display table: {0}")]
    Display(String),

    #[error("cannot plot {chart}: {reason}")]
    Plot { chart: &'static str, reason: String },
}

pub fn title(view: &YearView) -> String {
    let sum = |keep: fn(&LedgerRecord) -> bool| {
        view.ledger
            .iter()
            .filter(|r| keep(r))
            .fold(0i64, |acc, r| acc.saturating_add(r.amount))
    };
    let income = sum(LedgerRecord::is_income);
    let expense = sum(LedgerRecord::is_expense);
    format!(
        "# Household ledger {}\n{} records | income {} | expenses {} | net {}",
        view.year,
        view.ledger.len(),
        yen(income),
        yen(expense),
        yen(income.saturating_add(expense))
    )
}

/// Table, category chart and monthly chart, in print order. Each entry
/// stands alone: one failing surface leaves the others intact.
pub fn render_view(view: &YearView, limit: usize) -> Vec<Result<String, RenderError>> {
    vec![
        render_table(&view.ledger, view.year, limit),
        render_category_chart(&view.by_category),
        render_monthly_chart(&view.by_month),
    ]
}

/// First `limit` records as an aligned table
pub fn render_table(ledger: &Ledger, year: i32, limit: usize) -> Result<String, RenderError> {
    if ledger.is_empty() {
        return Err(RenderError::Display(format!("no records for {year}")));
    }

    let header = ["date", "category", "subcategory", "amount", "institution", "description", "memo"];
    let rows: Vec<[String; 7]> = ledger
        .iter()
        .take(limit)
        .map(|r| {
            [
                r.date.format("%Y/%m/%d").to_string(),
                r.category.clone(),
                r.subcategory.clone(),
                yen(r.amount),
                r.institution.clone(),
                r.description.clone(),
                r.memo.clone().unwrap_or_default(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let fail = |e: std::fmt::Error| RenderError::Display(e.to_string());
    write_row(&mut out, header.iter().map(|s| s.to_string()), &widths).map_err(fail)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(&mut out, rule.into_iter(), &widths).map_err(fail)?;
    for row in rows {
        write_row(&mut out, row.into_iter(), &widths).map_err(fail)?;
    }
    if ledger.len() > limit {
        writeln!(out, "... {} more", ledger.len() - limit).map_err(fail)?;
    }
    Ok(out)
}

fn write_row(
    out: &mut String,
    cells: impl Iterator<Item = String>,
    widths: &[usize],
) -> std::fmt::Result {
    let mut line = String::new();
    for (i, (cell, w)) in cells.zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let pad = w.saturating_sub(cell.chars().count());
        // Right-align the amount column
        if i == 3 {
            line.push_str(&" ".repeat(pad));
            line.push_str(&cell);
        } else {
            line.push_str(&cell);
            line.push_str(&" ".repeat(pad));
        }
    }
    writeln!(out, "{}", line.trim_end())
}

/// Horizontal bars of each category total, largest magnitude first
pub fn render_category_chart(agg: &CategoryAggregate) -> Result<String, RenderError> {
    const CHART: &str = "category totals";
    if agg.is_empty() {
        return Err(RenderError::Plot {
            chart: CHART,
            reason: "no data".to_string(),
        });
    }

    let ranked = agg.ranked();
    let max = ranked.iter().map(|(_, v)| v.unsigned_abs()).max().unwrap_or(0);
    let label_w = ranked.iter().map(|(c, _)| c.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    let fail = |e: std::fmt::Error| RenderError::Plot {
        chart: CHART,
        reason: e.to_string(),
    };
    writeln!(out, "## Category totals").map_err(fail)?;
    for (category, total) in ranked {
        let len = scale(total.unsigned_abs(), max, BAR_WIDTH);
        let pad = label_w - category.chars().count();
        writeln!(
            out,
            "{}{} |{:<width$}| {}",
            category,
            " ".repeat(pad),
            "█".repeat(len),
            yen(total),
            width = BAR_WIDTH
        )
        .map_err(fail)?;
    }
    Ok(out)
}

/// One sparkline per category across the observed months, followed by the
/// month × category grid
pub fn render_monthly_chart(grid: &MonthlyAggregate) -> Result<String, RenderError> {
    const CHART: &str = "monthly trends";
    if grid.is_empty() {
        return Err(RenderError::Plot {
            chart: CHART,
            reason: "no data".to_string(),
        });
    }

    let fail = |e: std::fmt::Error| RenderError::Plot {
        chart: CHART,
        reason: e.to_string(),
    };
    let label_w = grid.categories().iter().map(|c| c.chars().count()).max().unwrap_or(0);
    let months: Vec<String> = grid.months().iter().map(|m| format!("{m:02}")).collect();

    let mut out = String::new();
    writeln!(out, "## Monthly trends ({})", months.join(" ")).map_err(fail)?;
    for category in grid.categories() {
        let series = grid.series(category).unwrap_or_default();
        let pad = label_w - category.chars().count();
        writeln!(out, "{}{} {}", category, " ".repeat(pad), sparkline(&series)).map_err(fail)?;
    }

    writeln!(out).map_err(fail)?;
    let col_w: Vec<usize> = grid
        .categories()
        .iter()
        .map(|c| {
            let values = grid.series(c).unwrap_or_default();
            values
                .iter()
                .map(|(_, v)| yen(*v).chars().count())
                .chain(std::iter::once(c.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut header = String::from("month");
    for (c, w) in grid.categories().iter().zip(&col_w) {
        let pad = w - c.chars().count();
        write!(header, "  {}{}", " ".repeat(pad), c).map_err(fail)?;
    }
    writeln!(out, "{header}").map_err(fail)?;

    for (i, month) in months.iter().enumerate() {
        let mut line = format!("{month:<5}");
        for (c, w) in grid.categories().iter().zip(&col_w) {
            let value = grid.get(grid.months()[i], c).unwrap_or(0);
            write!(line, "  {:>w$}", yen(value), w = *w).map_err(fail)?;
        }
        writeln!(out, "{line}").map_err(fail)?;
    }

    Ok(out)
}

fn sparkline(series: &[(u32, i64)]) -> String {
    let min = series.iter().map(|(_, v)| *v).min().unwrap_or(0);
    let max = series.iter().map(|(_, v)| *v).max().unwrap_or(0);
    let span = max.abs_diff(min);
    series
        .iter()
        .map(|(_, v)| {
            let idx = scale(v.abs_diff(min), span, SPARKS.len() - 1);
            SPARKS[idx]
        })
        .collect()
}

/// `value / max * width`, rounded, with `max == 0` mapping to 0
fn scale(value: u64, max: u64, width: usize) -> usize {
    if max == 0 {
        return 0;
    }
    ((value as f64 / max as f64) * width as f64).round() as usize
}

/// `-1234567` → `¥-1,234,567`
pub fn yen(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("¥-{grouped}")
    } else {
        format!("¥{grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ledger() -> Ledger {
        let d = |m| NaiveDate::from_ymd_opt(2023, m, 1).unwrap();
        Ledger::new(vec![
            LedgerRecord::new(d(1), "Food", -1200, 2023).with_description("スーパー"),
            LedgerRecord::new(d(1), "Income", 250_000, 2023),
            LedgerRecord::new(d(2), "Food", -800, 2023).with_memo("外食"),
        ])
    }

    #[test]
    fn test_yen_grouping() {
        assert_eq!(yen(0), "¥0");
        assert_eq!(yen(999), "¥999");
        assert_eq!(yen(1000), "¥1,000");
        assert_eq!(yen(-1_234_567), "¥-1,234,567");
    }

    #[test]
    fn test_table_limit() {
        let out = render_table(&ledger(), 2023, 2).unwrap();
        assert!(out.starts_with("date"));
        assert!(out.contains("スーパー"));
        assert!(out.contains("... 1 more"));
    }

    #[test]
    fn test_empty_table_is_display_error() {
        let err = render_table(&Ledger::default(), 2022, 10).unwrap_err();
        assert_eq!(err, RenderError::Display("no records for 2022".to_string()));
    }

    #[test]
    fn test_category_chart_largest_first() {
        let view = YearView::build(&ledger(), 2023);
        let out = render_category_chart(&view.by_category).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert!(lines[1].starts_with("Income"));
        assert!(lines[1].contains(&"█".repeat(BAR_WIDTH)));
        assert!(lines[2].starts_with("Food"));
    }

    #[test]
    fn test_monthly_chart_zero_filled() {
        let view = YearView::build(&ledger(), 2023);
        let out = render_monthly_chart(&view.by_month).unwrap();
        assert!(out.contains("## Monthly trends (01 02)"));
        // Income has no February record
        let feb = out.lines().find(|l| l.starts_with("02")).unwrap();
        assert!(feb.contains("¥0"));
        assert!(feb.contains("¥-800"));
    }

    #[test]
    fn test_empty_view_fails_every_surface() {
        let view = YearView::build(&ledger(), 2024);
        let surfaces = render_view(&view, 5);
        assert!(matches!(surfaces[0], Err(RenderError::Display(_))));
        assert!(matches!(
            surfaces[1],
            Err(RenderError::Plot { chart: "category totals", .. })
        ));
        assert!(matches!(
            surfaces[2],
            Err(RenderError::Plot { chart: "monthly trends", .. })
        ));
    }

    #[test]
    fn test_failed_chart_leaves_other_surfaces() {
        let mut view = YearView::build(&ledger(), 2023);
        view.by_month = MonthlyAggregate::default();

        let surfaces = render_view(&view, 5);
        assert_eq!(surfaces.len(), 3);
        assert!(surfaces[0].as_ref().unwrap().contains("スーパー"));
        assert!(surfaces[1].as_ref().unwrap().starts_with("## Category totals"));
        assert_eq!(
            surfaces[2],
            Err(RenderError::Plot { chart: "monthly trends", reason: "no data".to_string() })
        );

        let mut view = YearView::build(&ledger(), 2023);
        view.by_category = CategoryAggregate::default();
        let surfaces = render_view(&view, 5);
        assert!(surfaces[0].is_ok());
        assert!(matches!(surfaces[1], Err(RenderError::Plot { chart: "category totals", .. })));
        assert!(surfaces[2].as_ref().unwrap().contains("## Monthly trends"));
    }

    #[test]
    fn test_title_totals() {
        let view = YearView::build(&ledger(), 2023);
        let title = title(&view);
        assert!(title.contains("income ¥250,000"));
        assert!(title.contains("expenses ¥-2,000"));
        assert!(title.contains("net ¥248,000"));
    }

    #[test]
    fn test_sparkline_flat_series() {
        assert_eq!(sparkline(&[(1, 5), (2, 5)]), "▁▁");
        assert_eq!(sparkline(&[(1, 0), (2, 10)]), "▁█");
    }
}
