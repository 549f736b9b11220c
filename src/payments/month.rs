use chrono::NaiveDate;

use crate::decimal::Money;

use super::overpayment::Overpayment;

/// one month of an amortization schedule
///
/// Built by the calculator with every field known; callers only read it.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthRecord {
    payment_number: u32,
    payment_date: Option<NaiveDate>,
    opening_balance: Money,
    principal_due: Money,
    interest_due: Money,
    closing_balance: Money,
    overpayments: Vec<Overpayment>,
}

impl MonthRecord {
    pub(crate) fn new(
        payment_number: u32,
        payment_date: Option<NaiveDate>,
        opening_balance: Money,
        principal_due: Money,
        interest_due: Money,
        closing_balance: Money,
        overpayments: Vec<Overpayment>,
    ) -> Self {
        Self {
            payment_number,
            payment_date,
            opening_balance,
            principal_due,
            interest_due,
            closing_balance,
            overpayments,
        }
    }

    /// 1-based position in the schedule
    pub fn payment_number(&self) -> u32 {
        self.payment_number
    }

    /// due date, present when the schedule was given a start date
    pub fn payment_date(&self) -> Option<NaiveDate> {
        self.payment_date
    }

    pub fn opening_balance(&self) -> Money {
        self.opening_balance
    }

    pub fn principal_due(&self) -> Money {
        self.principal_due
    }

    pub fn interest_due(&self) -> Money {
        self.interest_due
    }

    pub fn closing_balance(&self) -> Money {
        self.closing_balance
    }

    pub fn overpayments(&self) -> &[Overpayment] {
        &self.overpayments
    }

    /// scheduled payment for the month, excluding overpayments
    pub fn total_amount_due(&self) -> Money {
        self.principal_due + self.interest_due
    }

    pub fn total_overpayments(&self) -> Money {
        self.overpayments.iter().map(Overpayment::amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_derived_totals() {
        let month = MonthRecord::new(
            4,
            None,
            Money::from_major(1_000),
            Money::from_decimal(dec!(80.115)),
            Money::from_decimal(dec!(10.004)),
            Money::from_decimal(dec!(719.88)),
            vec![
                Overpayment::reduce_loan_term(Money::from_decimal(dec!(150.005))).unwrap(),
                Overpayment::reduce_monthly_payment(Money::from_major(50)).unwrap(),
            ],
        );

        assert_eq!(month.principal_due().as_decimal(), dec!(80.12));
        assert_eq!(month.interest_due().as_decimal(), dec!(10.00));
        assert_eq!(month.total_amount_due().as_decimal(), dec!(90.12));
        assert_eq!(month.total_overpayments().as_decimal(), dec!(200.01));
        assert_eq!(month.overpayments().len(), 2);
        assert_eq!(month.payment_number(), 4);
        assert_eq!(month.payment_date(), None);
    }

    #[test]
    fn test_month_without_overpayments() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let month = MonthRecord::new(
            1,
            Some(date),
            Money::from_major(20),
            Money::from_decimal(dec!(1.32)),
            Money::from_decimal(dec!(0.83)),
            Money::from_decimal(dec!(18.68)),
            Vec::new(),
        );

        assert_eq!(month.total_overpayments(), Money::ZERO);
        assert_eq!(month.total_amount_due().as_decimal(), dec!(2.15));
        assert_eq!(month.payment_date(), Some(date));
    }
}
