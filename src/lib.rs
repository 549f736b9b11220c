pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod payments;
pub mod serialization;
pub mod types;

// re-export key types
pub use config::{LoanConfig, LoanConfigBuilder, LoanTerms};
pub use decimal::{Money, Rate};
pub use errors::{Result, ScheduleError};
pub use events::{Event, EventStore};
pub use payments::{
    calculate_monthly_payment, AmortizationSchedule, MonthRecord, Overpayment,
    OverpaymentSchedule, ScheduleCalculator,
};
pub use serialization::{MonthView, OverpaymentView, ScheduleView};
pub use types::{OverpaymentMode, ScheduleKeying};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
