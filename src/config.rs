use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};
use crate::payments::overpayment::{Overpayment, OverpaymentSchedule};
use crate::types::ScheduleKeying;

/// validated loan configuration, immutable once built
#[derive(Debug, Clone, PartialEq)]
pub struct LoanConfig {
    principal: Money,
    annual_rate: Rate,
    term_months: u32,
    start_date: Option<NaiveDate>,
    overpayments: OverpaymentSchedule,
}

impl LoanConfig {
    pub fn builder() -> LoanConfigBuilder {
        LoanConfigBuilder::new()
    }

    /// parse and validate the external json configuration
    ///
    /// ```json
    /// {
    ///   "principal": "1000000",
    ///   "annualRatePercent": "3.5",
    ///   "termMonths": 60,
    ///   "startDate": "2024-01-01",
    ///   "overpayments": { "12": [{ "amount": "5000", "mode": "reduceMonthlyPayment" }] }
    /// }
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let terms: LoanTerms = serde_json::from_str(json)?;
        terms.try_into()
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn annual_rate(&self) -> Rate {
        self.annual_rate
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn overpayments(&self) -> &OverpaymentSchedule {
        &self.overpayments
    }

    pub fn keying(&self) -> ScheduleKeying {
        match self.start_date {
            Some(_) => ScheduleKeying::CalendarDate,
            None => ScheduleKeying::PaymentNumber,
        }
    }

    /// external representation of this configuration
    pub fn to_terms(&self) -> LoanTerms {
        LoanTerms {
            principal: self.principal.as_decimal(),
            annual_rate_percent: self.annual_rate.as_percentage().normalize(),
            term_months: self.term_months,
            start_date: self.start_date,
            overpayments: self.overpayments.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn unchecked(
        principal: Money,
        annual_rate: Rate,
        term_months: u32,
        overpayments: OverpaymentSchedule,
    ) -> Self {
        Self {
            principal,
            annual_rate,
            term_months,
            start_date: None,
            overpayments,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.term_months == 0 {
            return Err(invalid("term must be at least one month"));
        }
        if self.principal.is_negative() {
            return Err(invalid(format!("principal cannot be negative: {}", self.principal)));
        }
        if self.annual_rate.is_negative() {
            return Err(invalid(format!("interest rate cannot be negative: {}", self.annual_rate)));
        }
        for (month, overpayment) in self.overpayments.iter() {
            if month == 0 || month > self.term_months {
                return Err(invalid(format!(
                    "overpayment month {} outside term of {} months",
                    month, self.term_months
                )));
            }
            if !overpayment.amount().is_positive() {
                return Err(ScheduleError::InvalidOverpayment {
                    amount: overpayment.amount(),
                });
            }
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ScheduleError {
    ScheduleError::InvalidConfiguration {
        message: message.into(),
    }
}

/// loan terms as exchanged with external collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    pub principal: Decimal,
    pub annual_rate_percent: Decimal,
    pub term_months: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub overpayments: OverpaymentSchedule,
}

impl TryFrom<LoanTerms> for LoanConfig {
    type Error = ScheduleError;

    fn try_from(terms: LoanTerms) -> Result<Self> {
        let config = LoanConfig {
            principal: Money::from_decimal(terms.principal),
            annual_rate: Rate::from_percent(terms.annual_rate_percent),
            term_months: terms.term_months,
            start_date: terms.start_date,
            overpayments: terms.overpayments,
        };
        config.validate()?;
        Ok(config)
    }
}

/// builder for loan configurations
#[derive(Debug, Default)]
pub struct LoanConfigBuilder {
    principal: Option<Money>,
    annual_rate: Option<Rate>,
    term_months: Option<u32>,
    start_date: Option<NaiveDate>,
    overpayments: OverpaymentSchedule,
}

impl LoanConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn annual_rate(mut self, rate: Rate) -> Self {
        self.annual_rate = Some(rate);
        self
    }

    /// annual rate in percent units, 50 means 50%
    pub fn annual_rate_percent(self, percent: Decimal) -> Self {
        self.annual_rate(Rate::from_percent(percent))
    }

    pub fn term_months(mut self, months: u32) -> Self {
        self.term_months = Some(months);
        self
    }

    /// date the first payment falls due; switches the schedule to calendar keys
    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// first payment falls due on the provider's current date
    pub fn starting_now(self, time: &SafeTimeProvider) -> Self {
        self.start_date(time.now().date_naive())
    }

    pub fn add_overpayment(mut self, month: u32, overpayment: Overpayment) -> Self {
        self.overpayments.add(month, overpayment);
        self
    }

    pub fn build(self) -> Result<LoanConfig> {
        let principal = self.principal.ok_or_else(|| invalid("principal required"))?;
        let annual_rate = self.annual_rate.ok_or_else(|| invalid("interest rate required"))?;
        let term_months = self.term_months.ok_or_else(|| invalid("term required"))?;

        let config = LoanConfig {
            principal,
            annual_rate,
            term_months,
            start_date: self.start_date,
            overpayments: self.overpayments,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;

    fn base() -> LoanConfigBuilder {
        LoanConfig::builder()
            .principal(Money::from_major(10_000))
            .annual_rate_percent(dec!(5))
            .term_months(12)
    }

    #[test]
    fn test_builder_produces_config() {
        let config = base().build().unwrap();
        assert_eq!(config.principal(), Money::from_major(10_000));
        assert_eq!(config.annual_rate(), Rate::from_percentage(5));
        assert_eq!(config.term_months(), 12);
        assert_eq!(config.keying(), ScheduleKeying::PaymentNumber);
        assert!(config.overpayments().is_empty());
    }

    #[test]
    fn test_missing_fields_rejected() {
        let err = LoanConfig::builder().term_months(12).build().unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidConfiguration { .. }));

        let err = LoanConfig::builder()
            .principal(Money::from_major(1))
            .term_months(12)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("interest rate required"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(base().term_months(0).build().is_err());
        assert!(base().principal(Money::from_major(-1)).build().is_err());
        assert!(base().annual_rate_percent(dec!(-0.5)).build().is_err());
    }

    #[test]
    fn test_overpayment_month_must_fall_within_term() {
        let o = Overpayment::reduce_loan_term(Money::from_major(100)).unwrap();
        assert!(base().add_overpayment(0, o).build().is_err());
        assert!(base().add_overpayment(13, o).build().is_err());
        assert!(base().add_overpayment(12, o).build().is_ok());
    }

    #[test]
    fn test_zero_principal_is_valid() {
        let config = base().principal(Money::ZERO).build().unwrap();
        assert!(config.principal().is_zero());
    }

    #[test]
    fn test_starting_now_uses_time_provider() {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 2, 29, 9, 30, 0).unwrap(),
        ));
        let config = base().starting_now(&time).build().unwrap();
        assert_eq!(config.start_date(), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(config.keying(), ScheduleKeying::CalendarDate);
    }

    #[test]
    fn test_from_json() {
        let config = LoanConfig::from_json(
            r#"{
                "principal": "1000000",
                "annualRatePercent": "3.5",
                "termMonths": 60,
                "startDate": "2024-01-01",
                "overpayments": {
                    "12": [{ "amount": "5000", "mode": "reduceMonthlyPayment" }],
                    "24": [
                        { "amount": "100", "mode": "reduceLoanTerm" },
                        { "amount": "200", "mode": "reduceLoanTerm" }
                    ]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.principal(), Money::from_major(1_000_000));
        assert_eq!(config.annual_rate().as_decimal(), dec!(0.035));
        assert_eq!(config.start_date(), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert!(config.overpayments().for_month(12)[0].reduces_monthly_payment());
        assert_eq!(config.overpayments().for_month(24).len(), 2);
        assert_eq!(config.to_terms().annual_rate_percent, dec!(3.5));
    }

    #[test]
    fn test_from_json_validates() {
        let err = LoanConfig::from_json(
            r#"{ "principal": "100", "annualRatePercent": "5", "termMonths": 0 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidConfiguration { .. }));

        let err = LoanConfig::from_json(
            r#"{
                "principal": "100", "annualRatePercent": "5", "termMonths": 6,
                "overpayments": { "2": [{ "amount": "-10", "mode": "reduceLoanTerm" }] }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidOverpayment { .. }));

        let err = LoanConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ScheduleError::Json(_)));
    }
}
