use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::OverpaymentMode;

/// events emitted while a schedule is generated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    ScheduleStarted {
        principal: Money,
        annual_rate: Rate,
        term_months: u32,
        monthly_payment: Money,
    },
    OverpaymentApplied {
        payment_number: u32,
        amount: Money,
        mode: OverpaymentMode,
        balance_after: Money,
    },
    MonthlyPaymentRecalculated {
        payment_number: u32,
        old_payment: Money,
        new_payment: Money,
        remaining_months: u32,
    },
    /// a payment-reducing overpayment landed on the final month
    RecalculationSkipped {
        payment_number: u32,
    },
    LoanPaidOffEarly {
        payment_number: u32,
        term_months: u32,
    },
    ScheduleCompleted {
        months: u32,
        total_interest: Money,
        total_amount_due: Money,
        total_overpayments: Money,
    },
}

/// event store for collecting events during generation
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// events serialized one per line, for shipping as structured logs
    pub fn to_json_lines(&self) -> Result<String, serde_json::Error> {
        let lines = self
            .events
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lines.join("\n"))
    }
}
