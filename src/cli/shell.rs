//! Interactive shell and line-oriented script mode over the ledger core.

use std::{
    env,
    io::{self, BufRead},
    path::Path,
};

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::cli::{output, CliError};
use crate::currency::format_money;
use crate::domain::entry::{Category, Direction, EntryId};
use crate::errors::LedgerError;
use crate::export;
use crate::ledger::{month_view, Book, EntryRequest, LoanTerms, MonthCursor};
use crate::storage::JsonFileStore;
use crate::utils;

const SCRIPT_MODE_VAR: &str = "CASHBOOK_CLI_SCRIPT";

/// Opens the book from the default data directory and runs the shell.
pub fn run_cli() -> Result<(), CliError> {
    let data_dir = utils::app_data_dir();
    let storage = JsonFileStore::new(&data_dir).map_err(LedgerError::from)?;
    let mut book = Book::open(Box::new(storage))?;
    let mut cursor = MonthCursor::current();

    if script_mode() {
        script_loop(&mut book, &mut cursor)
    } else {
        interactive_loop(&mut book, &mut cursor)
    }
}

fn script_mode() -> bool {
    env::var(SCRIPT_MODE_VAR).map(|value| value == "1").unwrap_or(false)
}

fn script_loop(book: &mut Book, cursor: &mut MonthCursor) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }
        if matches!(words[0], "exit" | "quit") {
            break;
        }
        report(dispatch(book, cursor, &words))?;
    }
    Ok(())
}

fn dispatch(book: &mut Book, cursor: &mut MonthCursor, words: &[&str]) -> Result<(), CliError> {
    match words {
        ["income", amount, rest @ ..] => {
            record(book, Direction::Income, Category::Normal, amount, None, rest)
        }
        ["expense", amount, rest @ ..] => {
            record(book, Direction::Expense, Category::Normal, amount, None, rest)
        }
        ["loan-in", amount, total, installments, rest @ ..] => {
            let terms = parse_terms(total, installments);
            record(book, Direction::Income, Category::Loan, amount, Some(terms), rest)
        }
        ["loan-out", amount, rest @ ..] => {
            record(book, Direction::Expense, Category::Loan, amount, None, rest)
        }
        ["debt-in", amount, rest @ ..] => {
            record(book, Direction::Income, Category::Debt, amount, None, rest)
        }
        ["debt-out", amount, rest @ ..] => {
            record(book, Direction::Expense, Category::Debt, amount, None, rest)
        }
        ["edit", id, direction, category, amount, rest @ ..] => {
            edit(book, id, direction, category, amount, rest)
        }
        ["delete", id] => delete(book, id),
        ["balances"] => {
            show_balances(book);
            Ok(())
        }
        ["list"] => {
            list_month(book, *cursor);
            Ok(())
        }
        ["month", year, month] => {
            jump_month(cursor, year, month);
            Ok(())
        }
        ["prev"] => {
            *cursor = cursor.prev();
            output::info(format!("Showing {}", cursor.label()));
            Ok(())
        }
        ["next"] => {
            *cursor = cursor.next();
            output::info(format!("Showing {}", cursor.label()));
            Ok(())
        }
        ["export", path] => export_month(book, *cursor, path),
        ["help"] => {
            print_help();
            Ok(())
        }
        _ => {
            output::warning(format!("unknown command: {}", words.join(" ")));
            Ok(())
        }
    }
}

fn record(
    book: &mut Book,
    direction: Direction,
    category: Category,
    amount: &str,
    terms: Option<LoanTerms>,
    rest: &[&str],
) -> Result<(), CliError> {
    let request = EntryRequest {
        direction,
        category,
        amount: parse_amount(amount),
        description: join_description(rest),
        loan_terms: terms,
    };
    let id = book.record(request)?;
    output::success(format!("Movement {} recorded.", id));
    Ok(())
}

fn edit(
    book: &mut Book,
    id: &str,
    direction: &str,
    category: &str,
    amount: &str,
    rest: &[&str],
) -> Result<(), CliError> {
    let Some(id) = parse_id(id) else {
        return Ok(());
    };
    let Some(direction) = parse_direction(direction) else {
        output::warning("direction must be `income` or `expense`");
        return Ok(());
    };
    let Some(category) = parse_category(category) else {
        output::warning("category must be `normal`, `loan`, or `debt`");
        return Ok(());
    };

    // Loan income carries its repayment terms right after the amount.
    let (terms, rest) = if direction == Direction::Income && category == Category::Loan {
        match rest {
            [total, installments, tail @ ..] => (Some(parse_terms(total, installments)), tail),
            _ => {
                output::warning("loan income edit needs: <amount> <total> <installments>");
                return Ok(());
            }
        }
    } else {
        (None, rest)
    };

    let request = EntryRequest {
        direction,
        category,
        amount: parse_amount(amount),
        description: join_description(rest),
        loan_terms: terms,
    };
    book.amend(id, request)?;
    output::success(format!("Movement {} updated.", id));
    Ok(())
}

fn delete(book: &mut Book, id: &str) -> Result<(), CliError> {
    let Some(id) = parse_id(id) else {
        return Ok(());
    };
    let removed = book.delete_by_id(id)?;
    output::success(format!("Movement {} deleted.", removed.id));
    Ok(())
}

fn show_balances(book: &Book) {
    let report = book.balances();
    output::section("Balances");
    output::balance(
        format!("Cash: ${}", format_money(report.cash)),
        report.cash_is_positive(),
    );
    output::info(format!(
        "Loans outstanding: {}",
        format_money(report.loan_outstanding)
    ));
    output::info(format!(
        "Debts outstanding: {}",
        format_money(report.debt_outstanding)
    ));
    output::info(format!("Net worth: {}", format_money(report.net_worth)));
}

fn list_month(book: &Book, cursor: MonthCursor) {
    let view = month_view(book.entries(), cursor.year, cursor.month);
    output::section(format!("Movements {}", cursor.label()));
    if view.is_empty() {
        output::info("No movements this month.");
        return;
    }
    for entry in &view.entries {
        let sign = match entry.direction {
            Direction::Income => "+",
            Direction::Expense => "-",
        };
        output::info(format!(
            "#{} {} {}${} {}",
            entry.id,
            entry.date.format("%Y-%m-%d %H:%M"),
            sign,
            format_money(entry.amount),
            entry.description.as_deref().unwrap_or("(no description)"),
        ));
    }
}

fn jump_month(cursor: &mut MonthCursor, year: &str, month: &str) {
    let (Ok(year), Ok(month)) = (year.parse::<i32>(), month.parse::<u32>()) else {
        output::warning("usage: month <year> <month>");
        return;
    };
    if !(1..=12).contains(&month) {
        output::warning("month must be between 1 and 12");
        return;
    }
    *cursor = MonthCursor::new(year, month);
    output::info(format!("Showing {}", cursor.label()));
}

fn export_month(book: &Book, cursor: MonthCursor, path: &str) -> Result<(), CliError> {
    let view = month_view(book.entries(), cursor.year, cursor.month);
    export::export_month_to_path(Path::new(path), &view)?;
    output::success(format!("Exported {} movements to {}.", view.len(), path));
    Ok(())
}

fn print_help() {
    output::section("Commands");
    output::info("income <amount> [description]       record normal income");
    output::info("expense <amount> [description]      record normal expense");
    output::info("loan-in <amount> <total> <installments> [description]");
    output::info("loan-out <amount> [description]     repay a loan");
    output::info("debt-in <amount> [description]      take on a debt");
    output::info("debt-out <amount> [description]     pay down a debt");
    output::info("edit <id> <direction> <category> <amount> [terms] [description]");
    output::info("delete <id>");
    output::info("balances | list | month <y> <m> | prev | next");
    output::info("export <path> | help | exit");
}

/// Non-numeric input becomes NaN and is rejected by the amount guard.
fn parse_amount(raw: &str) -> f64 {
    raw.parse().unwrap_or(f64::NAN)
}

fn parse_terms(total: &str, installments: &str) -> LoanTerms {
    LoanTerms {
        total_to_pay: total.parse().unwrap_or(f64::NAN),
        installments: installments.parse().unwrap_or(0),
    }
}

fn parse_id(raw: &str) -> Option<EntryId> {
    match raw.parse::<i64>() {
        Ok(id) => Some(EntryId(id)),
        Err(_) => {
            output::warning(format!("invalid movement id: {}", raw));
            None
        }
    }
}

fn parse_direction(raw: &str) -> Option<Direction> {
    match raw {
        "income" => Some(Direction::Income),
        "expense" => Some(Direction::Expense),
        _ => None,
    }
}

fn parse_category(raw: &str) -> Option<Category> {
    match raw {
        "normal" => Some(Category::Normal),
        "loan" => Some(Category::Loan),
        "debt" => Some(Category::Debt),
        _ => None,
    }
}

fn join_description(words: &[&str]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Reports ledger errors and keeps the shell alive; prompt and I/O failures
/// bubble up.
fn report(result: Result<(), CliError>) -> Result<(), CliError> {
    match result {
        Err(CliError::Ledger(err)) => {
            print_ledger_error(&err);
            Ok(())
        }
        other => other,
    }
}

fn print_ledger_error(err: &LedgerError) {
    output::error(err);
    if matches!(err, LedgerError::Storage(_)) {
        output::warning("The last change may not survive a restart.");
    }
}

const ACTIONS: [&str; 10] = [
    "Record income",
    "Record expense",
    "Show balances",
    "List month",
    "Previous month",
    "Next month",
    "Export month",
    "Edit movement",
    "Delete movement",
    "Quit",
];

fn interactive_loop(book: &mut Book, cursor: &mut MonthCursor) -> Result<(), CliError> {
    let theme = ColorfulTheme::default();
    loop {
        let choice = Select::with_theme(&theme)
            .with_prompt(format!("Cashbook {}", cursor.label()))
            .items(&ACTIONS)
            .default(0)
            .interact()?;
        match choice {
            0 => report(prompt_record(book, &theme, Direction::Income))?,
            1 => report(prompt_record(book, &theme, Direction::Expense))?,
            2 => show_balances(book),
            3 => list_month(book, *cursor),
            4 => {
                *cursor = cursor.prev();
                list_month(book, *cursor);
            }
            5 => {
                *cursor = cursor.next();
                list_month(book, *cursor);
            }
            6 => report(prompt_export(book, &theme, *cursor))?,
            7 => report(prompt_edit(book, &theme))?,
            8 => report(prompt_delete(book, &theme))?,
            _ => break,
        }
    }
    Ok(())
}

fn prompt_category(theme: &ColorfulTheme, default: usize) -> Result<Category, CliError> {
    let options = ["normal", "loan", "debt"];
    let index = Select::with_theme(theme)
        .with_prompt("Category")
        .items(&options)
        .default(default)
        .interact()?;
    Ok(match index {
        1 => Category::Loan,
        2 => Category::Debt,
        _ => Category::Normal,
    })
}

fn prompt_loan_terms(theme: &ColorfulTheme) -> Result<LoanTerms, CliError> {
    let total: String = Input::with_theme(theme)
        .with_prompt("Total to pay back")
        .interact_text()?;
    let installments: String = Input::with_theme(theme)
        .with_prompt("Installments")
        .interact_text()?;
    Ok(LoanTerms {
        total_to_pay: total.parse().unwrap_or(f64::NAN),
        installments: installments.parse().unwrap_or(0),
    })
}

fn prompt_request(
    theme: &ColorfulTheme,
    direction: Direction,
) -> Result<EntryRequest, CliError> {
    let category = prompt_category(theme, 0)?;
    let amount: String = Input::with_theme(theme).with_prompt("Amount").interact_text()?;
    let amount = parse_amount(&amount);
    let description: String = Input::with_theme(theme)
        .with_prompt("Description")
        .allow_empty(true)
        .interact_text()?;
    let description = if description.trim().is_empty() {
        None
    } else {
        Some(description.trim().to_string())
    };

    // Two-phase loan terms: gathered up front, quoted inside the builder.
    let loan_terms = if direction == Direction::Income && category == Category::Loan {
        Some(prompt_loan_terms(theme)?)
    } else {
        None
    };

    Ok(EntryRequest {
        direction,
        category,
        amount,
        description,
        loan_terms,
    })
}

fn prompt_record(
    book: &mut Book,
    theme: &ColorfulTheme,
    direction: Direction,
) -> Result<(), CliError> {
    let request = prompt_request(theme, direction)?;
    let id = book.record(request)?;
    output::success(format!("Movement {} recorded.", id));
    show_balances(book);
    Ok(())
}

/// Pre-fills the creation form from the stored movement, then replaces it.
fn prompt_edit(book: &mut Book, theme: &ColorfulTheme) -> Result<(), CliError> {
    let raw: String = Input::with_theme(theme).with_prompt("Movement id").interact_text()?;
    let Some(id) = parse_id(raw.trim()) else {
        return Ok(());
    };
    let Some(existing) = book.find(id) else {
        print_ledger_error(&LedgerError::NotFound(id));
        return Ok(());
    };
    let previous_direction = existing.direction;
    let previous_category = existing.category;
    let previous_amount = existing.amount;
    let previous_description = existing.description.clone().unwrap_or_default();

    let directions = ["income", "expense"];
    let index = Select::with_theme(theme)
        .with_prompt("Direction")
        .items(&directions)
        .default(match previous_direction {
            Direction::Income => 0,
            Direction::Expense => 1,
        })
        .interact()?;
    let direction = if index == 0 {
        Direction::Income
    } else {
        Direction::Expense
    };
    let category = prompt_category(
        theme,
        match previous_category {
            Category::Normal => 0,
            Category::Loan => 1,
            Category::Debt => 2,
        },
    )?;
    let amount: String = Input::with_theme(theme)
        .with_prompt("Amount")
        .default(previous_amount.to_string())
        .interact_text()?;
    let amount = parse_amount(amount.trim());
    let description: String = Input::with_theme(theme)
        .with_prompt("Description")
        .default(previous_description)
        .allow_empty(true)
        .interact_text()?;
    let description = if description.trim().is_empty() {
        None
    } else {
        Some(description.trim().to_string())
    };
    let loan_terms = if direction == Direction::Income && category == Category::Loan {
        Some(prompt_loan_terms(theme)?)
    } else {
        None
    };

    let request = EntryRequest {
        direction,
        category,
        amount,
        description,
        loan_terms,
    };
    book.amend(id, request)?;
    output::success(format!("Movement {} updated.", id));
    show_balances(book);
    Ok(())
}

fn prompt_delete(book: &mut Book, theme: &ColorfulTheme) -> Result<(), CliError> {
    let raw: String = Input::with_theme(theme).with_prompt("Movement id").interact_text()?;
    let Some(id) = parse_id(raw.trim()) else {
        return Ok(());
    };
    let confirmed = Confirm::with_theme(theme)
        .with_prompt(format!("Delete movement {}?", id))
        .default(false)
        .interact()?;
    if !confirmed {
        output::info("Delete cancelled.");
        return Ok(());
    }
    let removed = book.delete_by_id(id)?;
    output::success(format!("Movement {} deleted.", removed.id));
    show_balances(book);
    Ok(())
}

fn prompt_export(
    book: &Book,
    theme: &ColorfulTheme,
    cursor: MonthCursor,
) -> Result<(), CliError> {
    let default_name = export::month_file_name(cursor.year, cursor.month);
    let path: String = Input::with_theme(theme)
        .with_prompt("Export to")
        .default(default_name)
        .interact_text()?;
    export_month(book, cursor, &path)
}
