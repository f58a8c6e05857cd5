use super::Amount;

/// Income and expense totals over the whole ledger.
///
/// `expense` covers every record that is not income, so
/// `income - expense` is the balance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub income: Amount,
    pub expense: Amount,
    pub count: usize,
}
