pub mod amortization;
pub mod month;
pub mod overpayment;

pub use amortization::{
    calculate_monthly_payment, AmortizationSchedule, ScheduleCalculator, DIVERGENCE_FACTOR,
};
pub use month::MonthRecord;
pub use overpayment::{Overpayment, OverpaymentSchedule};
