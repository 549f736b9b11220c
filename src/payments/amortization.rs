use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use crate::config::LoanConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};
use crate::events::{Event, EventStore};

use super::month::MonthRecord;
use super::overpayment::Overpayment;

/// generation gives up after this many multiples of the nominal term
pub const DIVERGENCE_FACTOR: u32 = 10;

/// amortization schedule with aggregate totals
#[derive(Debug, Clone)]
pub struct AmortizationSchedule {
    pub principal: Money,
    pub interest_rate: Rate,
    pub term_months: u32,
    pub start_date: Option<NaiveDate>,
    /// payment derived from the full principal and term
    pub initial_payment: Money,
    /// payment in effect at payoff, after any recalculation
    pub final_payment: Money,
    pub months: Vec<MonthRecord>,
    pub total_interest: Money,
    pub total_principal: Money,
    pub total_overpayments: Money,
    /// sum of scheduled payments, overpayments excluded
    pub total_amount_due: Money,
}

impl AmortizationSchedule {
    /// get month for specific payment number
    pub fn get_month(&self, payment_number: u32) -> Option<&MonthRecord> {
        payment_number
            .checked_sub(1)
            .and_then(|i| self.months.get(i as usize))
    }

    /// remaining balance after a payment, the principal before the first one
    pub fn balance_after_month(&self, payment_number: u32) -> Money {
        match payment_number {
            0 => self.principal,
            n => self
                .get_month(n)
                .or_else(|| self.months.last())
                .map(MonthRecord::closing_balance)
                .unwrap_or(self.principal),
        }
    }

    pub fn months_saved(&self) -> u32 {
        self.term_months.saturating_sub(self.months.len() as u32)
    }

    pub fn paid_off_early(&self) -> bool {
        self.months_saved() > 0
    }
}

/// generates month-by-month schedules for one loan configuration
#[derive(Debug, Clone)]
pub struct ScheduleCalculator {
    config: LoanConfig,
}

/// output of one pass through the amortization loop
struct Generated {
    months: Vec<MonthRecord>,
    initial_payment: Money,
    final_payment: Money,
    totals: Totals,
}

/// running sums over generated months, overflow checked
#[derive(Debug, Default)]
struct Totals {
    interest: Money,
    principal: Money,
    overpayments: Money,
    amount_due: Money,
}

impl Totals {
    fn record(&mut self, month: &MonthRecord) -> Result<()> {
        self.interest = checked_add(self.interest, month.interest_due(), "total interest")?;
        self.principal = checked_add(self.principal, month.principal_due(), "total principal")?;
        self.amount_due = checked_add(self.amount_due, month.principal_due(), "total amount due")?;
        self.amount_due = checked_add(self.amount_due, month.interest_due(), "total amount due")?;
        for overpayment in month.overpayments() {
            self.overpayments =
                checked_add(self.overpayments, overpayment.amount(), "total overpayments")?;
        }
        Ok(())
    }
}

impl ScheduleCalculator {
    pub fn new(config: LoanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoanConfig {
        &self.config
    }

    /// level payment that clears `principal` over `months` at the loan's rate
    pub fn compute_monthly_payment(&self, principal: Money, months: u32) -> Result<Money> {
        calculate_monthly_payment(principal, self.config.annual_rate(), months)
    }

    /// full month-by-month breakdown
    pub fn generate_schedule(&self) -> Result<Vec<MonthRecord>> {
        self.generate_schedule_with_events(&mut EventStore::new())
    }

    /// full breakdown, recording what happened along the way
    ///
    /// Events reach `events` only when generation succeeds.
    pub fn generate_schedule_with_events(&self, events: &mut EventStore) -> Result<Vec<MonthRecord>> {
        Ok(self.generate(events)?.months)
    }

    /// schedule plus aggregate totals
    pub fn schedule(&self) -> Result<AmortizationSchedule> {
        self.schedule_with_events(&mut EventStore::new())
    }

    pub fn schedule_with_events(&self, events: &mut EventStore) -> Result<AmortizationSchedule> {
        let generated = self.generate(events)?;
        let totals = generated.totals;

        Ok(AmortizationSchedule {
            principal: self.config.principal(),
            interest_rate: self.config.annual_rate(),
            term_months: self.config.term_months(),
            start_date: self.config.start_date(),
            initial_payment: generated.initial_payment,
            final_payment: generated.final_payment,
            months: generated.months,
            total_interest: totals.interest,
            total_principal: totals.principal,
            total_overpayments: totals.overpayments,
            total_amount_due: totals.amount_due,
        })
    }

    /// everything the borrower pays through scheduled payments
    ///
    /// An interest-free loan always costs exactly its principal.
    pub fn total_amount_due_over_term(&self) -> Result<Money> {
        if self.config.annual_rate().is_zero() {
            return Ok(self.config.principal());
        }

        Ok(self.generate(&mut EventStore::new())?.totals.amount_due)
    }

    fn generate(&self, sink: &mut EventStore) -> Result<Generated> {
        let mut events = EventStore::new();
        let term = self.config.term_months();
        let monthly_rate = self.config.annual_rate().monthly_rate().as_decimal();
        let cap = term.saturating_mul(DIVERGENCE_FACTOR);

        let mut balance = self.config.principal();
        let initial_payment = self.compute_monthly_payment(balance, term)?;
        let mut payment = initial_payment;
        let mut months = Vec::with_capacity(term as usize);
        let mut totals = Totals::default();
        let mut payment_number = 0u32;

        events.emit(Event::ScheduleStarted {
            principal: balance,
            annual_rate: self.config.annual_rate(),
            term_months: term,
            monthly_payment: payment,
        });

        while balance.is_positive() {
            payment_number += 1;
            if payment_number > cap {
                return Err(ScheduleError::ScheduleDivergence {
                    months: payment_number - 1,
                    cap,
                });
            }

            let opening_balance = balance;
            let interest_due = balance * monthly_rate;
            let standard_principal = payment - interest_due;

            // the final month, or a balance smaller than the usual split, clears the loan
            let principal_due = if payment_number == term || balance < standard_principal {
                balance
            } else {
                standard_principal.max(Money::ZERO)
            };
            balance -= principal_due;

            let overpayments = self.config.overpayments().for_month(payment_number).to_vec();
            for overpayment in &overpayments {
                balance = (balance - overpayment.amount()).max(Money::ZERO);
                events.emit(Event::OverpaymentApplied {
                    payment_number,
                    amount: overpayment.amount(),
                    mode: overpayment.mode(),
                    balance_after: balance,
                });
            }

            if overpayments.iter().any(Overpayment::reduces_monthly_payment) {
                let remaining_months = term.saturating_sub(payment_number);
                if remaining_months == 0 {
                    events.emit(Event::RecalculationSkipped { payment_number });
                } else {
                    let new_payment = self.compute_monthly_payment(balance, remaining_months)?;
                    events.emit(Event::MonthlyPaymentRecalculated {
                        payment_number,
                        old_payment: payment,
                        new_payment,
                        remaining_months,
                    });
                    payment = new_payment;
                }
            }

            let payment_date = match self.config.start_date() {
                Some(start) => Some(due_date(start, payment_number)?),
                None => None,
            };

            let month = MonthRecord::new(
                payment_number,
                payment_date,
                opening_balance,
                principal_due,
                interest_due,
                balance,
                overpayments,
            );
            totals.record(&month)?;
            months.push(month);
        }

        if payment_number > 0 && payment_number < term {
            events.emit(Event::LoanPaidOffEarly {
                payment_number,
                term_months: term,
            });
        }

        events.emit(Event::ScheduleCompleted {
            months: payment_number,
            total_interest: totals.interest,
            total_amount_due: totals.amount_due,
            total_overpayments: totals.overpayments,
        });

        for event in events.take_events() {
            sink.emit(event);
        }

        Ok(Generated {
            months,
            initial_payment,
            final_payment: payment,
            totals,
        })
    }
}

/// calculate the level monthly payment for a loan
///
/// `P * r(1+r)^n / ((1+r)^n - 1)` with `r` the monthly rate, or `P / n`
/// when the loan is interest free. Rounded to cents.
pub fn calculate_monthly_payment(principal: Money, annual_rate: Rate, months: u32) -> Result<Money> {
    if months == 0 {
        return Err(ScheduleError::DegenerateTerm { principal });
    }

    if annual_rate.is_zero() {
        return Ok(principal / Decimal::from(months));
    }

    let r = annual_rate.monthly_rate().as_decimal();
    let compound = compound_factor(r, months)?;

    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        // rate too small to register at decimal precision
        return Ok(principal / Decimal::from(months));
    }

    let numerator = r.checked_mul(compound).ok_or_else(|| overflow("payment numerator"))?;
    let factor = numerator
        .checked_div(denominator)
        .ok_or_else(|| overflow("payment factor"))?;

    principal
        .checked_mul(factor)
        .ok_or_else(|| overflow("monthly payment"))
}

/// (1 + r)^n by repeated multiplication
fn compound_factor(monthly_rate: Decimal, months: u32) -> Result<Decimal> {
    let base = Decimal::ONE + monthly_rate;
    let mut compound = Decimal::ONE;
    for _ in 0..months {
        compound = compound
            .checked_mul(base)
            .ok_or_else(|| overflow("compound factor"))?;
    }
    Ok(compound)
}

fn checked_add(total: Money, amount: Money, what: &str) -> Result<Money> {
    total.checked_add(amount).ok_or_else(|| overflow(what))
}

fn overflow(what: &str) -> ScheduleError {
    ScheduleError::Calculation {
        message: format!("{} exceeds decimal range", what),
    }
}

/// due date of a payment, counted in calendar months from the first one
fn due_date(start: NaiveDate, payment_number: u32) -> Result<NaiveDate> {
    start
        .checked_add_months(Months::new(payment_number - 1))
        .ok_or_else(|| ScheduleError::InvalidDate {
            message: format!("payment {} falls outside the supported calendar", payment_number),
        })
}
