use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("invalid overpayment amount: {amount}")]
    InvalidOverpayment {
        amount: Money,
    },

    #[error("cannot amortize {principal} over zero months")]
    DegenerateTerm {
        principal: Money,
    },

    #[error("schedule did not converge: {months} months generated, cap is {cap}")]
    ScheduleDivergence {
        months: u32,
        cap: u32,
    },

    #[error("calculation error: {message}")]
    Calculation {
        message: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
