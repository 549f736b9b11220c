//! serializable views of generated schedules
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::payments::{AmortizationSchedule, MonthRecord, Overpayment};
use crate::types::{OverpaymentMode, ScheduleKeying};

/// serializable view of one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    #[serde(with = "rust_decimal::serde::float")]
    pub interest_due: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub principal_due: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub opening_balance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub closing_balance: Decimal,
    pub overpayments: Vec<OverpaymentView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_number: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverpaymentView {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub mode: OverpaymentMode,
}

impl From<&Overpayment> for OverpaymentView {
    fn from(overpayment: &Overpayment) -> Self {
        OverpaymentView {
            amount: overpayment.amount().as_decimal(),
            mode: overpayment.mode(),
        }
    }
}

impl MonthView {
    /// dated months are keyed by date, the rest by payment number
    pub fn from_month(month: &MonthRecord) -> Self {
        let (date, payment_number) = match month.payment_date() {
            Some(date) => (Some(date), None),
            None => (None, Some(month.payment_number())),
        };

        MonthView {
            interest_due: month.interest_due().as_decimal(),
            principal_due: month.principal_due().as_decimal(),
            opening_balance: month.opening_balance().as_decimal(),
            closing_balance: month.closing_balance().as_decimal(),
            overpayments: month.overpayments().iter().map(OverpaymentView::from).collect(),
            date,
            payment_number,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// serializable view of a whole schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    pub keying: ScheduleKeying,
    #[serde(with = "rust_decimal::serde::float")]
    pub principal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub annual_rate_percent: Decimal,
    pub term_months: u32,
    pub months_scheduled: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub initial_payment: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_interest: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_overpayments: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount_due: Decimal,
    pub months: Vec<MonthView>,
}

impl ScheduleView {
    pub fn from_schedule(schedule: &AmortizationSchedule) -> Self {
        let keying = match schedule.start_date {
            Some(_) => ScheduleKeying::CalendarDate,
            None => ScheduleKeying::PaymentNumber,
        };

        ScheduleView {
            keying,
            principal: schedule.principal.as_decimal(),
            annual_rate_percent: schedule.interest_rate.as_percentage().normalize(),
            term_months: schedule.term_months,
            months_scheduled: schedule.months.len() as u32,
            initial_payment: schedule.initial_payment.as_decimal(),
            total_interest: schedule.total_interest.as_decimal(),
            total_overpayments: schedule.total_overpayments.as_decimal(),
            total_amount_due: schedule.total_amount_due.as_decimal(),
            months: schedule.months.iter().map(MonthView::from_month).collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
