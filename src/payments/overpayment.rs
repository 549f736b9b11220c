use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{Result, ScheduleError};
use crate::types::OverpaymentMode;

/// extra payment towards principal on top of the scheduled payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overpayment {
    amount: Money,
    mode: OverpaymentMode,
}

impl Overpayment {
    /// create an overpayment; the amount must be greater than zero
    pub fn new(amount: Money, mode: OverpaymentMode) -> Result<Self> {
        if !amount.is_positive() {
            return Err(ScheduleError::InvalidOverpayment { amount });
        }
        Ok(Self { amount, mode })
    }

    pub fn reduce_monthly_payment(amount: Money) -> Result<Self> {
        Self::new(amount, OverpaymentMode::ReduceMonthlyPayment)
    }

    pub fn reduce_loan_term(amount: Money) -> Result<Self> {
        Self::new(amount, OverpaymentMode::ReduceLoanTerm)
    }

    /// build without the amount check, for exercising the divergence guard
    #[cfg(test)]
    pub(crate) fn unchecked(amount: Money, mode: OverpaymentMode) -> Self {
        Self { amount, mode }
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn mode(&self) -> OverpaymentMode {
        self.mode
    }

    pub fn reduces_monthly_payment(&self) -> bool {
        self.mode.reduces_monthly_payment()
    }
}

/// overpayments keyed by 1-based month, insertion order kept within a month
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverpaymentSchedule {
    by_month: BTreeMap<u32, Vec<Overpayment>>,
}

impl OverpaymentSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// append an overpayment to a month
    pub fn add(&mut self, month: u32, overpayment: Overpayment) {
        self.by_month.entry(month).or_default().push(overpayment);
    }

    /// overpayments for a month, empty when none are scheduled
    pub fn for_month(&self, month: u32) -> &[Overpayment] {
        self.by_month.get(&month).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Overpayment)> + '_ {
        self.by_month
            .iter()
            .flat_map(|(month, list)| list.iter().map(move |o| (*month, o)))
    }

    pub fn is_empty(&self) -> bool {
        self.by_month.values().all(Vec::is_empty)
    }
}
