use serde::{Deserialize, Serialize};

/// how an overpayment is applied to the rest of the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OverpaymentMode {
    /// keep the term, recalculate a lower monthly payment
    ReduceMonthlyPayment,
    /// keep the monthly payment, finish the loan sooner
    ReduceLoanTerm,
}

impl OverpaymentMode {
    pub fn reduces_monthly_payment(&self) -> bool {
        matches!(self, OverpaymentMode::ReduceMonthlyPayment)
    }
}

/// how a month is identified in a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScheduleKeying {
    /// months are numbered 1..=n
    PaymentNumber,
    /// months carry a calendar due date
    CalendarDate,
}
