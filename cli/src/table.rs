// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::{Color, Colorize};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::util::OutputFormat;

/// A column of a table over rows of type `T`.
pub trait TableColumn<T> {
    fn name(&self) -> Cow<'_, str>;

    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

/// Renders rows either as an aligned table or as a JSON array.
#[derive(Debug)]
pub struct Formatter<C> {
    columns: Vec<C>,
    format: OutputFormat,
}

impl<C> Formatter<C> {
    pub fn new(columns: Vec<C>) -> Self {
        Self {
            columns,
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a, T>(&'a self, rows: &'a [T]) -> Display<'a, T, C>
    where
        T: Serialize,
        C: TableColumn<T>,
    {
        Display {
            rows,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a, T, C> {
    rows: &'a [T],
    formatter: &'a Formatter<C>,
}

impl<T: Serialize, C: TableColumn<T>> fmt::Display for Display<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(self.rows).map_err(|_| fmt::Error)?;
                write!(f, "{json}")
            }
            OutputFormat::Table => write!(f, "{}", Table::new(&self.formatter.columns, self.rows)),
        }
    }
}

/// A plain text table with a bold header row.
pub struct Table<'a, T, C> {
    columns: &'a [C],
    rows: &'a [T],
}

impl<'a, T, C: TableColumn<T>> Table<'a, T, C> {
    pub fn new(columns: &'a [C], rows: &'a [T]) -> Self {
        Self { columns, rows }
    }

    fn widths(&self, cells: &[Vec<Cow<'_, str>>]) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                cells
                    .iter()
                    .map(|row| row[i].width())
                    .chain(std::iter::once(col.name().width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

impl<T, C: TableColumn<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<Cow<'_, str>>> = self
            .rows
            .iter()
            .map(|row| self.columns.iter().map(|col| col.format(row)).collect())
            .collect();
        let widths = self.widths(&cells);
        let last = self.columns.len().saturating_sub(1);

        for (i, (col, width)) in self.columns.iter().zip(&widths).enumerate() {
            let name = col.name();
            let cell = pad(&name, *width, col.padding_direction(), i == last);
            write!(f, "{}", cell.bold())?;
            f.write_str(if i == last { "\n" } else { "  " })?;
        }

        for (row, data) in cells.iter().zip(self.rows) {
            for (i, ((col, width), cell)) in self.columns.iter().zip(&widths).zip(row).enumerate() {
                let cell = pad(cell, *width, col.padding_direction(), i == last);
                match col.color(data) {
                    Some(color) => write!(f, "{}", cell.color(color))?,
                    None => f.write_str(&cell)?,
                }
                f.write_str(if i == last { "\n" } else { "  " })?;
            }
        }
        Ok(())
    }
}

fn pad(cell: &str, width: usize, direction: PaddingDirection, last: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.width()));
    match direction {
        // Last column does not need padding if it's left-aligned
        PaddingDirection::Left if last => cell.to_string(),
        PaddingDirection::Left => format!("{cell}{fill}"),
        PaddingDirection::Right => format!("{fill}{cell}"),
    }
}
