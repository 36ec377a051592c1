use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of accounts movements are posted against. Closed set, not
/// user-extensible.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Account {
    /// Cash on hand.
    Caja,
    /// Income.
    Ingresos,
    /// Expenses.
    Gastos,
    /// Loans owed after borrowing.
    Prestamos,
    /// Debts owed, tracked separately from loans.
    Deudas,
}

impl Account {
    pub const ALL: [Account; 5] = [
        Account::Caja,
        Account::Ingresos,
        Account::Gastos,
        Account::Prestamos,
        Account::Deudas,
    ];

    /// Label used in storage and report output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Account::Caja => "Caja",
            Account::Ingresos => "Ingresos",
            Account::Gastos => "Gastos",
            Account::Prestamos => "Prestamos",
            Account::Deudas => "Deudas",
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
